// SPDX-License-Identifier: GPL-3.0-or-later

//! Dated domain events that feed the report aggregator.

use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime};

/// A single dated event: one adoption, one monetary donation, or one line of
/// an item donation.
#[derive(Debug, Clone, PartialEq)]
pub struct DomainRecord {
    /// Raw timestamp as received from the API.
    ///
    /// Kept unparsed so that a bad date only drops the record from month
    /// bucketing instead of rejecting it outright.
    pub timestamp: Option<String>,
    pub kind: RecordKind,
}

/// What kind of event a [`DomainRecord`] describes.
#[derive(Debug, Clone, PartialEq)]
pub enum RecordKind {
    Adoption {
        species: Option<String>,
    },
    MonetaryDonation {
        amount: Option<f64>,
    },
    ItemDonation {
        name: Option<String>,
        quantity: Option<u32>,
    },
}

impl DomainRecord {
    pub fn adoption(timestamp: impl Into<String>, species: Option<&str>) -> Self {
        Self {
            timestamp: Some(timestamp.into()),
            kind: RecordKind::Adoption {
                species: species.map(str::to_string),
            },
        }
    }

    pub fn monetary(timestamp: impl Into<String>, amount: Option<f64>) -> Self {
        Self {
            timestamp: Some(timestamp.into()),
            kind: RecordKind::MonetaryDonation { amount },
        }
    }

    pub fn item(timestamp: impl Into<String>, name: Option<&str>, quantity: Option<u32>) -> Self {
        Self {
            timestamp: Some(timestamp.into()),
            kind: RecordKind::ItemDonation {
                name: name.map(str::to_string),
                quantity,
            },
        }
    }

    /// Calendar date of the event, if the timestamp can be parsed.
    pub fn date(&self) -> Option<NaiveDate> {
        self.timestamp.as_deref().and_then(parse_date)
    }

    /// Zero-based month index (0 = January).
    pub fn month_index(&self) -> Option<usize> {
        self.date().map(|d| d.month0() as usize)
    }

    pub fn year(&self) -> Option<i32> {
        self.date().map(|d| d.year())
    }
}

/// Parse the date formats the API is known to emit.
///
/// Accepts RFC 3339 (`2024-03-15T10:00:00Z`), a naive datetime with or
/// without fractional seconds, and a bare `YYYY-MM-DD` date.
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    let s = raw.trim();
    if s.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.date_naive());
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(dt.date());
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d").ok()
}

/// Trim a free-text label, treating blank strings as missing.
pub fn normalize_label(label: Option<&str>) -> Option<&str> {
    label.map(str::trim).filter(|s| !s.is_empty())
}
