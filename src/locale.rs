// SPDX-License-Identifier: GPL-3.0-or-later

//! Report wording for the supported locales.
//!
//! Only the strings that end up inside a [`Report`](crate::aggregate::Report)
//! live here: month short names, the label for records without a category,
//! and the impact summary template. Renderer chrome (table headers, page
//! titles) stays in the `report` module.

use serde::{Deserialize, Serialize};

/// Language used for month labels and generated summaries.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
pub enum Locale {
    #[default]
    #[serde(rename = "pt-BR")]
    #[value(name = "pt-BR")]
    PtBr,
    #[serde(rename = "en")]
    #[value(name = "en")]
    En,
}

const MONTHS_PT_BR: [&str; 12] = [
    "Jan", "Fev", "Mar", "Abr", "Mai", "Jun", "Jul", "Ago", "Set", "Out", "Nov", "Dez",
];

const MONTHS_EN: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

impl Locale {
    /// Short month names in calendar order, January first.
    pub fn month_names(&self) -> &'static [&'static str; 12] {
        match self {
            Locale::PtBr => &MONTHS_PT_BR,
            Locale::En => &MONTHS_EN,
        }
    }

    /// Label used for records whose category is missing or blank.
    pub fn unspecified(&self) -> &'static str {
        match self {
            Locale::PtBr => "Não informado",
            Locale::En => "Unspecified",
        }
    }

    /// One-line summary of a year's donations.
    ///
    /// The monetary figure is always printed with two decimals and a `.`
    /// separator so the output does not depend on the host's locale.
    pub fn impact_summary(&self, currency: &str, total_monetary: f64, item_units: u64) -> String {
        match self {
            Locale::PtBr => format!(
                "{currency} {total_monetary:.2} em doações financeiras e {item_units} itens recebidos neste ano"
            ),
            Locale::En => format!(
                "{currency} {total_monetary:.2} in funds and {item_units} items received this year"
            ),
        }
    }
}

impl std::fmt::Display for Locale {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Locale::PtBr => write!(f, "pt-BR"),
            Locale::En => write!(f, "en"),
        }
    }
}
