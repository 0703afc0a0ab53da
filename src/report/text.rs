//! Plain-text rendering of the report for `--headless` runs.
//!
//! Produces the same content as the dashboard as aligned stdout text, one
//! block per section, with simple ASCII gauges for the ranked tables.

use super::{PanelBody, Report, SCORE_MAX};
use crate::aggregate::{CrossTab, FrequencyTable, ScoreSummary};
use std::fmt::Write;

const GAUGE_WIDTH: usize = 24;

/// Render the whole report as plain text.
#[must_use]
pub fn render_text(report: &Report) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "SHOPLENS SURVEY REPORT");
    let _ = writeln!(out, "======================");
    let _ = writeln!(out, "Respondents: {}", report.respondents);
    if let Some(top) = &report.kpis.top_channel {
        let _ = writeln!(out, "Top channel: {} ({}% of respondents)", top.channel, top.share);
    }
    if let Some(mean) = report.kpis.online_trust_mean {
        let _ = writeln!(out, "Avg online trust: {mean:.2}/{SCORE_MAX:.0}");
    }

    for section in &report.sections {
        let _ = writeln!(out, "\n== {} ==", section.title);
        for panel in &section.panels {
            let _ = writeln!(out, "\n-- {} --", panel.title);
            match &panel.body {
                PanelBody::Frequency { table } => write_frequency(&mut out, table),
                PanelBody::Stacked { crosstab } => write_crosstab(&mut out, crosstab),
                PanelBody::Scores { summary } => write_scores(&mut out, summary),
                PanelBody::Metrics { metrics } => {
                    for metric in metrics {
                        match &metric.note {
                            Some(note) => {
                                let _ =
                                    writeln!(out, "  {}: {} ({note})", metric.label, metric.value);
                            }
                            None => {
                                let _ = writeln!(out, "  {}: {}", metric.label, metric.value);
                            }
                        }
                    }
                }
                PanelBody::Insights { insights } => {
                    for insight in insights {
                        let _ = writeln!(out, "  - {}: {}", insight.label, insight.value);
                    }
                }
            }
        }
    }

    if !report.skipped.is_empty() {
        let _ = writeln!(out, "\n== Skipped sections ==");
        for skipped in &report.skipped {
            let _ = writeln!(out, "  ! {}: {}", skipped.title, skipped.reason);
        }
    }

    out
}

fn write_frequency(out: &mut String, table: &FrequencyTable) {
    if table.is_empty() {
        let _ = writeln!(out, "  (no answers)");
        return;
    }
    let max_count = table.entries().iter().map(|e| e.count).max().unwrap_or(1).max(1);
    let label_width = table.entries().iter().map(|e| e.label.chars().count()).max().unwrap_or(0);

    for entry in table.entries() {
        #[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let filled =
            ((entry.count as f64 / max_count as f64) * GAUGE_WIDTH as f64).round() as usize;
        let gauge = format!("{}{}", "#".repeat(filled), ".".repeat(GAUGE_WIDTH - filled));
        let padding = " ".repeat(label_width - entry.label.chars().count());
        match entry.percentage {
            Some(share) => {
                let _ = writeln!(
                    out,
                    "  {}{padding}  {gauge} {:>4} ({share}%)",
                    entry.label, entry.count
                );
            }
            None => {
                let _ = writeln!(out, "  {}{padding}  {gauge} {:>4}", entry.label, entry.count);
            }
        }
    }
}

fn write_crosstab(out: &mut String, crosstab: &CrossTab) {
    if crosstab.is_empty() {
        let _ = writeln!(out, "  (no answers)");
        return;
    }
    for row in &crosstab.rows {
        let cells: Vec<String> = crosstab
            .columns
            .iter()
            .zip(row.percentages())
            .map(|(column, share)| format!("{column} {share}%"))
            .collect();
        let _ = writeln!(out, "  {}: {}", row.label, cells.join(" | "));
    }
}

fn write_scores(out: &mut String, summary: &ScoreSummary) {
    write_frequency(out, &summary.distribution);
    if let (Some(mean), Some(median)) = (summary.mean, summary.median) {
        let _ = writeln!(out, "  mean {mean:.2} | median {median:.0}");
    }
}

#[cfg(test)]
mod tests {
    use super::super::{build_report, schema};
    use super::*;
    use crate::dataset::Dataset;

    #[test]
    fn test_text_report_lists_sections_and_skips() {
        let csv = format!(
            "\"{}\",\"{}\"\nOnline,Preço\nLoja física,Preço\n",
            schema::PRIMARY_CHANNEL,
            schema::ONLINE_MOTIVE
        );
        let dataset = Dataset::from_reader(csv.as_bytes()).expect("fixture CSV should parse");
        let report = build_report(&dataset, ";");
        let text = render_text(&report);

        assert!(text.contains("SHOPLENS SURVEY REPORT"));
        assert!(text.contains("Respondents: 2"));
        assert!(text.contains("Top channel: Online (50% of respondents)"));
        assert!(text.contains("== Survey insights =="));
        assert!(text.contains("== Skipped sections =="));
        assert!(text.contains("Respondent profile"));
    }

    #[test]
    fn test_empty_tables_render_placeholder() {
        // Full schema, zero responses: every section builds, tables are empty
        let columns = [
            schema::AGE_BAND,
            schema::GENDER,
            schema::PURCHASE_FREQUENCY,
            schema::PRIMARY_CHANNEL,
            schema::ONLINE_MOTIVE,
            schema::STORE_MOTIVE,
            schema::ONLINE_TRUST,
            schema::STORE_EXPERIENCE,
            schema::ONLINE_PRODUCTS,
            schema::STORE_PRODUCTS,
            schema::ABANDONMENT,
        ];
        let header =
            columns.iter().map(|c| format!("\"{c}\"")).collect::<Vec<_>>().join(",");
        let dataset =
            Dataset::from_reader(format!("{header}\n").as_bytes()).expect("fixture CSV should parse");
        let report = build_report(&dataset, ";");
        let text = render_text(&report);

        assert!(report.skipped.is_empty());
        assert!(text.contains("(no answers)"));
    }
}
