// SPDX-License-Identifier: GPL-3.0-or-later

use comfy_table::{CellAlignment, ContentArrangement, Table};

use crate::aggregate::{AdoptionReport, CategoryCount, DonationReport, MonthBucket, Report};
use crate::report::{Headings, ReportMeta, bar_fraction, format_money, format_rate, paginate};

const BAR_WIDTH: usize = 30;

/// Proportional bar of `█` characters, scaled so the busiest month fills
/// [`BAR_WIDTH`].
pub fn bar(total: u64, max: u64) -> String {
    let len = (bar_fraction(total, max) * BAR_WIDTH as f64).round() as usize;
    "█".repeat(len)
}

fn new_table(header: Vec<&str>) -> Table {
    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(header);
    table
}

fn summary_table(h: &Headings, rows: Vec<(&str, String)>) -> Table {
    let mut table = new_table(vec![h.metric, h.value]);
    for (metric, value) in rows {
        table.add_row(vec![metric.to_string(), value]);
    }
    table
}

fn monthly_table(h: &Headings, monthly: &[MonthBucket]) -> Table {
    let max = monthly.iter().map(|b| b.total).max().unwrap_or(0);

    let mut table = new_table(vec![h.month, "", h.total]);
    for bucket in monthly {
        table.add_row(vec![
            bucket.month.clone(),
            bar(bucket.total, max),
            bucket.total.to_string(),
        ]);
    }
    if let Some(column) = table.column_mut(2) {
        column.set_cell_alignment(CellAlignment::Right);
    }
    table
}

/// Render the category ranking, or `None` when there is nothing to rank.
fn categories_table(
    label_header: &str,
    count_header: &str,
    categories: &[CategoryCount],
    limit: usize,
) -> Option<(Table, usize)> {
    if categories.is_empty() {
        return None;
    }

    let (page, remaining) = paginate(categories, limit);
    let mut table = new_table(vec![label_header, count_header]);
    for category in page {
        table.add_row(vec![category.label.clone(), category.count.to_string()]);
    }
    Some((table, remaining))
}

fn push_section(out: &mut String, title: &str, body: impl std::fmt::Display) {
    out.push_str(&format!("\n{title}\n{body}\n"));
}

fn render_adoptions(out: &mut String, h: &Headings, r: &AdoptionReport, limit: usize) {
    let summary = summary_table(
        h,
        vec![
            (h.total_adoptions, r.total_adoptions.to_string()),
            (h.adoption_rate, format_rate(r.adoption_rate)),
            (h.candidate_pool, r.candidate_pool.to_string()),
        ],
    );
    out.push_str(&format!("{summary}\n"));
    push_section(out, h.adoptions_by_month, monthly_table(h, &r.monthly));

    if let Some((table, remaining)) =
        categories_table(h.species, h.quantity, &r.top_categories, limit)
    {
        push_section(out, h.most_adopted, table);
        push_remaining(out, remaining);
    }
}

fn render_donations(
    out: &mut String,
    h: &Headings,
    meta: &ReportMeta,
    r: &DonationReport,
    limit: usize,
) {
    let summary = summary_table(
        h,
        vec![
            (h.total_monetary, format_money(&meta.currency, r.total_monetary)),
            (h.total_items, r.total_item_units.to_string()),
        ],
    );
    out.push_str(&format!("{summary}\n"));
    push_section(out, h.donations_by_month, monthly_table(h, &r.monthly));

    if let Some((table, remaining)) =
        categories_table(h.item, h.quantity, &r.top_categories, limit)
    {
        push_section(out, h.most_donated, table);
        push_remaining(out, remaining);
    }

    out.push_str(&format!("\n{}: {}\n", h.impact, r.impact_summary));
}

fn push_remaining(out: &mut String, remaining: usize) {
    if remaining > 0 {
        out.push_str(&format!(
            "  ... and {remaining} more (use --limit 0 to show all)\n"
        ));
    }
}

/// Build the terminal rendering of a report.
///
/// `limit` caps the number of categories listed (0 = all).
pub fn render(report: &Report, meta: &ReportMeta, limit: usize) -> String {
    let h = Headings::for_locale(meta.locale);
    let title = match report {
        Report::Adoptions(_) => h.adoptions_title,
        Report::Donations(_) => h.donations_title,
    };

    let mut out = format!("\n{title} {}\n\n", meta.year);

    if report.monthly().iter().all(|b| b.total == 0) && report.top_categories().is_empty() {
        out.push_str(&format!("{}\n\n", h.no_activity));
    }

    match report {
        Report::Adoptions(r) => render_adoptions(&mut out, h, r, limit),
        Report::Donations(r) => render_donations(&mut out, h, meta, r, limit),
    }

    out
}

/// Print a report to the terminal.
pub fn print_report(report: &Report, meta: &ReportMeta, limit: usize) {
    print!("{}", render(report, meta, limit));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregate::ReportAggregator;
    use crate::locale::Locale;
    use crate::records::DomainRecord;

    fn meta(locale: Locale) -> ReportMeta {
        ReportMeta {
            year: 2024,
            locale,
            currency: "R$".to_string(),
        }
    }

    fn adoptions() -> Report {
        let records = vec![
            DomainRecord::adoption("2024-01-10", Some("Cachorro")),
            DomainRecord::adoption("2024-01-22", Some("Gato")),
            DomainRecord::adoption("2024-03-05", Some("Cachorro")),
        ];
        Report::Adoptions(ReportAggregator::default().aggregate_adoptions(&records, 10))
    }

    // --- bar tests ---

    #[test]
    fn bar_scales_to_busiest_month() {
        assert_eq!(bar(2, 2).chars().count(), BAR_WIDTH);
        assert_eq!(bar(1, 2).chars().count(), BAR_WIDTH / 2);
        assert!(bar(0, 2).is_empty());
    }

    #[test]
    fn bar_empty_when_no_activity() {
        assert!(bar(0, 0).is_empty());
    }

    // --- render tests ---

    #[test]
    fn render_adoptions_shows_totals_and_species() {
        let out = render(&adoptions(), &meta(Locale::PtBr), 0);
        assert!(out.contains("Relatório Anual de Adoções 2024"));
        assert!(out.contains("30.0%"));
        assert!(out.contains("Cachorro"));
        assert!(out.contains("Gato"));
        assert!(out.contains("Fev"));
        assert!(!out.contains("Nenhuma atividade"));
    }

    #[test]
    fn render_limits_categories() {
        let out = render(&adoptions(), &meta(Locale::En), 1);
        assert!(out.contains("Cachorro"));
        assert!(out.contains("... and 1 more"));
    }

    #[test]
    fn render_donations_includes_impact() {
        let records = vec![
            DomainRecord::monetary("2024-02-10", Some(100.5)),
            DomainRecord::item("2024-02-14", Some("Ração"), Some(5)),
            DomainRecord::monetary("2024-08-01", Some(50.0)),
        ];
        let report = Report::Donations(
            ReportAggregator::new(Locale::En, "R$").aggregate_donations(&records),
        );
        let out = render(&report, &meta(Locale::En), 0);
        assert!(out.contains("Donation Report 2024"));
        assert!(out.contains("R$ 150.50"));
        assert!(out.contains("Ração"));
        assert!(out.contains("Impact: R$ 150.50 in funds and 5 items received this year"));
    }

    #[test]
    fn render_empty_year() {
        let report = Report::Donations(ReportAggregator::default().aggregate_donations(&[]));
        let out = render(&report, &meta(Locale::PtBr), 0);
        assert!(out.contains("Nenhuma atividade registrada neste ano."));
        assert!(out.contains("R$ 0.00"));
        assert!(!out.contains("Itens Mais Doados"));
    }
}
