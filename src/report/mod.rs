// SPDX-License-Identifier: GPL-3.0-or-later

//! Report rendering in multiple output formats.
//!
//! Renderers only read a finished [`Report`](crate::aggregate::Report); they
//! never call back into the aggregator.

use crate::locale::Locale;

pub mod html;
pub mod json;
pub mod terminal;

/// Context a renderer needs besides the report itself.
#[derive(Debug, Clone)]
pub struct ReportMeta {
    pub year: i32,
    pub locale: Locale,
    pub currency: String,
}

/// Fixed wording around the report data.
pub struct Headings {
    pub adoptions_title: &'static str,
    pub donations_title: &'static str,
    pub metric: &'static str,
    pub value: &'static str,
    pub total_adoptions: &'static str,
    pub adoption_rate: &'static str,
    pub candidate_pool: &'static str,
    pub total_monetary: &'static str,
    pub total_items: &'static str,
    pub adoptions_by_month: &'static str,
    pub donations_by_month: &'static str,
    pub most_adopted: &'static str,
    pub most_donated: &'static str,
    pub month: &'static str,
    pub total: &'static str,
    pub species: &'static str,
    pub item: &'static str,
    pub quantity: &'static str,
    pub impact: &'static str,
    pub no_activity: &'static str,
}

const HEADINGS_PT_BR: Headings = Headings {
    adoptions_title: "Relatório Anual de Adoções",
    donations_title: "Relatório de Doações",
    metric: "Indicador",
    value: "Valor",
    total_adoptions: "Total de Adoções",
    adoption_rate: "Taxa de Adoção",
    candidate_pool: "Animais Candidatos",
    total_monetary: "Total Financeiro",
    total_items: "Total de Itens",
    adoptions_by_month: "Adoções por Mês",
    donations_by_month: "Doações por Mês",
    most_adopted: "Animais Mais Adotados",
    most_donated: "Itens Mais Doados",
    month: "Mês",
    total: "Total",
    species: "Espécie",
    item: "Item",
    quantity: "Quantidade",
    impact: "Impacto",
    no_activity: "Nenhuma atividade registrada neste ano.",
};

const HEADINGS_EN: Headings = Headings {
    adoptions_title: "Annual Adoption Report",
    donations_title: "Donation Report",
    metric: "Metric",
    value: "Value",
    total_adoptions: "Total adoptions",
    adoption_rate: "Adoption rate",
    candidate_pool: "Candidate animals",
    total_monetary: "Funds received",
    total_items: "Items received",
    adoptions_by_month: "Adoptions by month",
    donations_by_month: "Donations by month",
    most_adopted: "Most adopted species",
    most_donated: "Most donated items",
    month: "Month",
    total: "Total",
    species: "Species",
    item: "Item",
    quantity: "Quantity",
    impact: "Impact",
    no_activity: "No activity recorded this year.",
};

impl Headings {
    pub fn for_locale(locale: Locale) -> &'static Headings {
        match locale {
            Locale::PtBr => &HEADINGS_PT_BR,
            Locale::En => &HEADINGS_EN,
        }
    }
}

/// Return a page of items from a slice, plus how many remain.
///
/// A `limit` of 0 means "show all".
pub fn paginate<T>(items: &[T], limit: usize) -> (&[T], usize) {
    if limit == 0 || limit >= items.len() {
        (items, 0)
    } else {
        (&items[..limit], items.len() - limit)
    }
}

/// Share of the busiest month, in `[0, 1]`. An all-zero year yields 0
/// everywhere instead of dividing by zero.
pub fn bar_fraction(total: u64, max: u64) -> f64 {
    if max == 0 {
        0.0
    } else {
        total as f64 / max as f64
    }
}

pub fn format_money(currency: &str, amount: f64) -> String {
    format!("{currency} {amount:.2}")
}

pub fn format_rate(rate: f64) -> String {
    format!("{rate:.1}%")
}
