//! Panel renderers, one per chart/widget family of the report.
//!
//! Every renderer follows the same shape: take a frame, an area and the
//! panel data, build a `Vec<Line>`, and wrap it in a bordered `Paragraph`.
//! Scrolling is handled by the caller passing a row offset for the ranked
//! lists.

#![allow(clippy::cast_precision_loss, clippy::cast_possible_truncation, clippy::cast_sign_loss)]

use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use super::theme::{gauge_bar, series_color, ACCENT, DIM, HIGHLIGHT, TEXT};
use crate::aggregate::{CrossTab, FrequencyTable, ScoreSummary};
use crate::report::{Insight, Metric, Panel, PanelBody, SCORE_MAX};

const GAUGE_WIDTH: usize = 16;

/// Render one panel into its area, dispatching on the body kind.
pub fn render_panel(f: &mut Frame, area: Rect, panel: &Panel, scroll: usize) {
    let lines = match &panel.body {
        PanelBody::Frequency { table } => frequency_lines(table, area, scroll),
        PanelBody::Stacked { crosstab } => stacked_lines(crosstab, area),
        PanelBody::Scores { summary } => score_lines(summary, area),
        PanelBody::Metrics { metrics } => metric_lines(metrics),
        PanelBody::Insights { insights } => insight_lines(insights),
    };

    let paragraph = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .title(format!("[ {} ]", panel.title))
            .border_style(Style::default().fg(ACCENT)),
    );
    f.render_widget(paragraph, area);
}

/// Rows that fit inside a bordered panel.
fn visible_rows(area: Rect) -> usize {
    (area.height.saturating_sub(2) as usize).max(1)
}

fn empty_notice() -> Vec<Line<'static>> {
    vec![Line::from(Span::styled(" (no answers)", Style::default().fg(DIM)))]
}

fn frequency_lines(table: &FrequencyTable, area: Rect, scroll: usize) -> Vec<Line<'static>> {
    if table.is_empty() {
        return empty_notice();
    }
    let max_count = table.entries().iter().map(|e| e.count).max().unwrap_or(1).max(1);
    let label_width = (area.width as usize).saturating_sub(GAUGE_WIDTH + 14).max(8);

    let mut lines = Vec::new();
    for entry in table.entries().iter().skip(scroll).take(visible_rows(area)) {
        let share_of_max = entry.count as f64 / max_count as f64 * 100.0;
        let label = truncate_label(&entry.label, label_width);
        let padding = " ".repeat(label_width.saturating_sub(label.chars().count()));

        let mut spans = vec![
            Span::styled(format!(" {label}{padding} "), Style::default().fg(TEXT)),
            Span::styled(gauge_bar(share_of_max, GAUGE_WIDTH), Style::default().fg(ACCENT)),
            Span::styled(format!(" {:>4}", entry.count), Style::default().fg(HIGHLIGHT)),
        ];
        if let Some(share) = entry.percentage {
            spans.push(Span::styled(format!(" {share:>5.1}%"), Style::default().fg(DIM)));
        }
        lines.push(Line::from(spans));
    }
    lines
}

fn stacked_lines(crosstab: &CrossTab, area: Rect) -> Vec<Line<'static>> {
    if crosstab.is_empty() {
        return empty_notice();
    }
    let mut lines = Vec::new();

    // Legend: one colored chip per channel
    let mut legend = vec![Span::raw(" ")];
    for (index, column) in crosstab.columns.iter().enumerate() {
        legend.push(Span::styled("■ ", Style::default().fg(series_color(index))));
        legend.push(Span::styled(format!("{column}  "), Style::default().fg(DIM)));
    }
    lines.push(Line::from(legend));
    lines.push(Line::from(""));

    let bar_width = (area.width as usize).saturating_sub(4).max(10);
    for row in &crosstab.rows {
        lines.push(Line::from(Span::styled(
            format!(" {} ({} respondents)", row.label, row.total()),
            Style::default().fg(TEXT),
        )));

        // Each bar spans the full width; segments are proportional to the
        // per-row percentages, so every bar reads as 100%
        let mut spans = vec![Span::raw(" ")];
        let mut used = 0usize;
        let segments = row.percentages();
        for (index, share) in segments.iter().enumerate() {
            let is_last = index + 1 == segments.len();
            let cells = if is_last {
                bar_width.saturating_sub(used)
            } else {
                ((share / 100.0) * bar_width as f64).round() as usize
            };
            used += cells;
            if cells > 0 {
                spans.push(Span::styled(
                    "█".repeat(cells),
                    Style::default().fg(series_color(index)),
                ));
            }
        }
        lines.push(Line::from(spans));
        lines.push(Line::from(""));
    }
    lines
}

fn score_lines(summary: &ScoreSummary, area: Rect) -> Vec<Line<'static>> {
    let mut lines = frequency_lines(&summary.distribution, area, 0);
    if let (Some(mean), Some(median)) = (summary.mean, summary.median) {
        lines.push(Line::from(""));
        lines.push(Line::from(vec![
            Span::styled(" Mean ", Style::default().fg(DIM)),
            Span::styled(
                format!("{mean:.2}/{SCORE_MAX:.0}"),
                Style::default().fg(HIGHLIGHT).add_modifier(Modifier::BOLD),
            ),
            Span::styled("  Median ", Style::default().fg(DIM)),
            Span::styled(format!("{median:.0}"), Style::default().fg(HIGHLIGHT)),
        ]));
    }
    lines
}

fn metric_lines(metrics: &[Metric]) -> Vec<Line<'static>> {
    if metrics.is_empty() {
        return empty_notice();
    }
    let mut lines = Vec::new();
    for metric in metrics {
        lines.push(Line::from(Span::styled(
            format!(" {}", metric.label),
            Style::default().fg(DIM),
        )));
        let mut value_spans = vec![Span::styled(
            format!(" {}", metric.value),
            Style::default().fg(ACCENT).add_modifier(Modifier::BOLD),
        )];
        if let Some(note) = &metric.note {
            value_spans.push(Span::styled(format!("  {note}"), Style::default().fg(HIGHLIGHT)));
        }
        lines.push(Line::from(value_spans));
        lines.push(Line::from(""));
    }
    lines
}

fn insight_lines(insights: &[Insight]) -> Vec<Line<'static>> {
    if insights.is_empty() {
        return empty_notice();
    }
    let mut lines = vec![Line::from("")];
    for insight in insights {
        lines.push(Line::from(vec![
            Span::styled(format!(" • {}: ", insight.label), Style::default().fg(DIM)),
            Span::styled(insight.value.clone(), Style::default().fg(TEXT)),
        ]));
        lines.push(Line::from(""));
    }
    lines
}

/// Truncate a label for display, adding "..." if too long
fn truncate_label(label: &str, max_len: usize) -> String {
    if label.chars().count() > max_len {
        let kept: String = label.chars().take(max_len.saturating_sub(3)).collect();
        format!("{kept}...")
    } else {
        label.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_label_keeps_short_labels() {
        assert_eq!(truncate_label("Livros", 10), "Livros");
    }

    #[test]
    fn test_truncate_label_handles_multibyte() {
        // Must truncate on char boundaries, not bytes
        let label = "Eletrônicos e eletrodomésticos";
        let truncated = truncate_label(label, 12);
        assert_eq!(truncated.chars().count(), 12);
        assert!(truncated.ends_with("..."));
    }
}
