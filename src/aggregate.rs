// SPDX-License-Identifier: GPL-3.0-or-later

//! Yearly report aggregation.
//!
//! [`ReportAggregator`] turns a list of [`DomainRecord`]s that the caller has
//! already narrowed to one calendar year into an immutable report: totals,
//! a 12-bucket monthly histogram, and a frequency ranking of categories.
//! Everything here is pure; the same input in the same order always yields
//! the same report.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::locale::Locale;
use crate::records::{DomainRecord, RecordKind, normalize_label};

/// Activity total for one calendar month.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthBucket {
    pub month: String,
    pub total: u64,
}

/// How often a category (species, item name) occurred.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryCount {
    pub label: String,
    pub count: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdoptionReport {
    pub total_adoptions: u64,
    /// Number of animals the adoption rate is measured against.
    pub candidate_pool: u64,
    /// Percentage in `[0, 100]`; 0 when the candidate pool is empty.
    pub adoption_rate: f64,
    pub monthly: Vec<MonthBucket>,
    pub top_categories: Vec<CategoryCount>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DonationReport {
    pub total_monetary: f64,
    pub total_item_units: u64,
    pub monthly: Vec<MonthBucket>,
    /// Item names ranked by units donated.
    pub top_categories: Vec<CategoryCount>,
    pub impact_summary: String,
}

/// A finished report, ready for a renderer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Report {
    Adoptions(AdoptionReport),
    Donations(DonationReport),
}

impl Report {
    pub fn monthly(&self) -> &[MonthBucket] {
        match self {
            Report::Adoptions(r) => &r.monthly,
            Report::Donations(r) => &r.monthly,
        }
    }

    pub fn top_categories(&self) -> &[CategoryCount] {
        match self {
            Report::Adoptions(r) => &r.top_categories,
            Report::Donations(r) => &r.top_categories,
        }
    }
}

/// Stateless report builder, parameterised only by presentation settings.
#[derive(Debug, Clone)]
pub struct ReportAggregator {
    locale: Locale,
    currency: String,
}

impl Default for ReportAggregator {
    fn default() -> Self {
        Self::new(Locale::default(), "R$")
    }
}

impl ReportAggregator {
    pub fn new(locale: Locale, currency: impl Into<String>) -> Self {
        Self {
            locale,
            currency: currency.into(),
        }
    }

    pub fn locale(&self) -> Locale {
        self.locale
    }

    /// Summarise one year of adoptions.
    ///
    /// Every record counts as one adoption. The rate is measured against
    /// `candidate_pool_size` and capped at 100 when the pool is smaller than
    /// the number of adoptions.
    pub fn aggregate_adoptions(
        &self,
        records: &[DomainRecord],
        candidate_pool_size: u64,
    ) -> AdoptionReport {
        let total_adoptions = records.len() as u64;
        let adoption_rate = adoption_rate(total_adoptions, candidate_pool_size);

        let mut categories = CategoryTally::default();
        for record in records {
            let species = match &record.kind {
                RecordKind::Adoption { species } => normalize_label(species.as_deref()),
                _ => None,
            };
            categories.add(species.unwrap_or(self.locale.unspecified()), 1);
        }

        AdoptionReport {
            total_adoptions,
            candidate_pool: candidate_pool_size,
            adoption_rate,
            monthly: self.monthly(records),
            top_categories: categories.ranked(),
        }
    }

    /// Summarise one year of donations.
    ///
    /// Months count every dated record. Money comes from monetary records,
    /// units and the category ranking from item records; anything else is
    /// only bucketed.
    pub fn aggregate_donations(&self, records: &[DomainRecord]) -> DonationReport {
        let mut total_monetary = 0.0;
        let mut total_item_units = 0u64;
        let mut categories = CategoryTally::default();

        for record in records {
            match &record.kind {
                RecordKind::MonetaryDonation { amount } => {
                    // Negative or non-finite amounts are malformed and count as 0.
                    total_monetary += amount
                        .filter(|a| a.is_finite() && *a >= 0.0)
                        .unwrap_or(0.0);
                }
                RecordKind::ItemDonation { name, quantity } => {
                    let units = u64::from(quantity.unwrap_or(0));
                    total_item_units += units;
                    let label = normalize_label(name.as_deref()).unwrap_or(self.locale.unspecified());
                    categories.add(label, units);
                }
                RecordKind::Adoption { .. } => {}
            }
        }

        DonationReport {
            total_monetary,
            total_item_units,
            monthly: self.monthly(records),
            top_categories: categories.ranked(),
            impact_summary: self.locale.impact_summary(
                &self.currency,
                total_monetary,
                total_item_units,
            ),
        }
    }

    /// Twelve buckets, January first, counting every record with a
    /// parseable timestamp.
    fn monthly(&self, records: &[DomainRecord]) -> Vec<MonthBucket> {
        let mut totals = [0u64; 12];
        for month in records.iter().filter_map(DomainRecord::month_index) {
            totals[month] += 1;
        }

        self.locale
            .month_names()
            .iter()
            .zip(totals)
            .map(|(name, total)| MonthBucket {
                month: (*name).to_string(),
                total,
            })
            .collect()
    }
}

/// Percentage of the pool that was adopted, never dividing by zero.
pub fn adoption_rate(total_adoptions: u64, candidate_pool_size: u64) -> f64 {
    if candidate_pool_size == 0 {
        return 0.0;
    }
    (total_adoptions as f64 / candidate_pool_size as f64 * 100.0).min(100.0)
}

/// Insertion-ordered frequency counter.
#[derive(Default)]
struct CategoryTally {
    counts: Vec<CategoryCount>,
    index: HashMap<String, usize>,
}

impl CategoryTally {
    fn add(&mut self, label: &str, amount: u64) {
        match self.index.get(label) {
            Some(&i) => self.counts[i].count += amount,
            None => {
                self.index.insert(label.to_string(), self.counts.len());
                self.counts.push(CategoryCount {
                    label: label.to_string(),
                    count: amount,
                });
            }
        }
    }

    /// Descending by count; `sort_by` is stable, so ties stay in the order
    /// they were first seen.
    fn ranked(mut self) -> Vec<CategoryCount> {
        self.counts.sort_by(|a, b| b.count.cmp(&a.count));
        self.counts
    }
}
