// SPDX-License-Identifier: GPL-3.0-or-later

use anyhow::Result;
use serde::Serialize;

use crate::aggregate::Report;
use crate::locale::Locale;
use crate::report::ReportMeta;

/// A JSON-serializable report. The shape is described by
/// `schemas/report.v1.json`.
#[derive(Serialize)]
pub struct JsonReport<'a> {
    pub year: i32,
    pub locale: Locale,
    pub currency: &'a str,
    #[serde(flatten)]
    pub report: &'a Report,
}

impl<'a> JsonReport<'a> {
    pub fn new(report: &'a Report, meta: &'a ReportMeta) -> Self {
        Self {
            year: meta.year,
            locale: meta.locale,
            currency: &meta.currency,
            report,
        }
    }
}

pub fn render(report: &Report, meta: &ReportMeta) -> Result<String> {
    Ok(serde_json::to_string_pretty(&JsonReport::new(report, meta))?)
}

/// Generate a JSON report and print it to stdout.
pub fn print_json(report: &Report, meta: &ReportMeta) -> Result<()> {
    let json = render(report, meta)?;
    println!("{json}");
    Ok(())
}
