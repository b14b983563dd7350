// SPDX-License-Identifier: GPL-3.0-or-later

use crate::aggregate::{CategoryCount, MonthBucket, Report};
use crate::report::{Headings, ReportMeta, bar_fraction, format_money, format_rate};

/// Escape HTML special characters.
fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

fn push_summary(html: &mut String, rows: &[(&str, String)]) {
    html.push_str("<div class=\"cards\">\n");
    for (label, value) in rows {
        html.push_str(&format!(
            "<div class=\"card\"><h2>{}</h2><p class=\"figure\">{}</p></div>\n",
            escape_html(label),
            escape_html(value),
        ));
    }
    html.push_str("</div>\n");
}

fn push_monthly(html: &mut String, title: &str, monthly: &[MonthBucket]) {
    let max = monthly.iter().map(|b| b.total).max().unwrap_or(0);

    html.push_str(&format!("<h2>{}</h2>\n<table>\n", escape_html(title)));
    for bucket in monthly {
        let width = bar_fraction(bucket.total, max) * 100.0;
        html.push_str(&format!(
            "<tr><td>{}</td><td class=\"bar-cell\"><div class=\"bar\" style=\"width: {width:.1}%\"></div></td><td class=\"num\">{}</td></tr>\n",
            escape_html(&bucket.month),
            bucket.total,
        ));
    }
    html.push_str("</table>\n");
}

fn push_categories(
    html: &mut String,
    title: &str,
    label_header: &str,
    count_header: &str,
    categories: &[CategoryCount],
) {
    if categories.is_empty() {
        return;
    }

    html.push_str(&format!("<h2>{}</h2>\n", escape_html(title)));
    html.push_str(&format!(
        "<table>\n<tr><th>{}</th><th>{}</th></tr>\n",
        escape_html(label_header),
        escape_html(count_header),
    ));
    for category in categories {
        html.push_str(&format!(
            "<tr><td>{}</td><td class=\"num\">{}</td></tr>\n",
            escape_html(&category.label),
            category.count,
        ));
    }
    html.push_str("</table>\n");
}

/// Build a standalone HTML page for a report.
pub fn render(report: &Report, meta: &ReportMeta) -> String {
    let h = Headings::for_locale(meta.locale);
    let title = match report {
        Report::Adoptions(_) => h.adoptions_title,
        Report::Donations(_) => h.donations_title,
    };
    let lang = meta.locale.to_string();

    let mut html = String::new();

    html.push_str(&format!("<!DOCTYPE html>\n<html lang=\"{lang}\">\n<head>\n"));
    html.push_str("<meta charset=\"utf-8\">\n");
    html.push_str("<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n");
    html.push_str(&format!(
        "<title>{} {}</title>\n",
        escape_html(title),
        meta.year
    ));
    html.push_str("<style>\n");
    html.push_str(
        "body { font-family: system-ui, sans-serif; max-width: 960px; margin: 2rem auto; padding: 0 1rem; color: #1a1a1a; }\n",
    );
    html.push_str("h1, h2 { margin-top: 2rem; }\n");
    html.push_str(".cards { display: flex; gap: 1rem; flex-wrap: wrap; }\n");
    html.push_str(
        ".card { flex: 1; min-width: 200px; padding: 1rem 1.5rem; border-radius: 8px; box-shadow: 0 1px 4px rgba(0,0,0,.15); }\n",
    );
    html.push_str(".card h2 { margin: 0 0 .5rem; font-size: 1.1rem; }\n");
    html.push_str(".figure { font-size: 2rem; font-weight: bold; color: #2563eb; margin: 0; }\n");
    html.push_str("table { border-collapse: collapse; width: 100%; margin: 1rem 0; }\n");
    html.push_str(
        "th, td { text-align: left; padding: 0.5rem 1rem; border-bottom: 1px solid #ddd; }\n",
    );
    html.push_str("th { background: #f5f5f5; }\n");
    html.push_str(".num { text-align: right; width: 4rem; }\n");
    html.push_str(".bar-cell { width: 70%; }\n");
    html.push_str(".bar { background: #2563eb; height: 1rem; border-radius: 8px; }\n");
    html.push_str(".impact { font-size: 1.1rem; }\n");
    html.push_str("</style>\n");
    html.push_str("</head>\n<body>\n");

    html.push_str(&format!(
        "<h1>{} {}</h1>\n",
        escape_html(title),
        meta.year
    ));

    match report {
        Report::Adoptions(r) => {
            push_summary(
                &mut html,
                &[
                    (h.total_adoptions, r.total_adoptions.to_string()),
                    (h.adoption_rate, format_rate(r.adoption_rate)),
                ],
            );
            push_monthly(&mut html, h.adoptions_by_month, &r.monthly);
            push_categories(
                &mut html,
                h.most_adopted,
                h.species,
                h.quantity,
                &r.top_categories,
            );
        }
        Report::Donations(r) => {
            push_summary(
                &mut html,
                &[
                    (h.total_monetary, format_money(&meta.currency, r.total_monetary)),
                    (h.total_items, r.total_item_units.to_string()),
                ],
            );
            push_monthly(&mut html, h.donations_by_month, &r.monthly);
            push_categories(
                &mut html,
                h.most_donated,
                h.item,
                h.quantity,
                &r.top_categories,
            );
            html.push_str(&format!(
                "<h2>{}</h2>\n<p class=\"impact\">{}</p>\n",
                escape_html(h.impact),
                escape_html(&r.impact_summary),
            ));
        }
    }

    html.push_str("</body>\n</html>\n");
    html
}

/// Generate an HTML report and print it to stdout.
pub fn print_html(report: &Report, meta: &ReportMeta) {
    print!("{}", render(report, meta));
}
