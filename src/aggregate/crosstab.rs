//! Cross-tabulation of two categorical columns.
//!
//! Produces counts for every observed (row value, column value) pair, used
//! by the report to compare channel preference across age bands. The
//! normalization here is **per row**: each row's percentages sum to 100%
//! regardless of how many respondents fall into that row category, which is
//! what a normalized stacked bar renders.

#![allow(clippy::cast_precision_loss)]

use super::round1;
use crate::dataset::Dataset;
use crate::domain::SchemaError;
use serde::Serialize;
use std::collections::HashMap;

/// One row category with its counts aligned to [`CrossTab::columns`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CrossRow {
    pub label: String,
    pub counts: Vec<u64>,
}

impl CrossRow {
    /// Sum of the row's counts.
    #[must_use]
    pub fn total(&self) -> u64 {
        self.counts.iter().sum()
    }

    /// Per-row percentages (1-decimal), summing to 100% for non-empty rows.
    #[must_use]
    pub fn percentages(&self) -> Vec<f64> {
        let total = self.total();
        self.counts
            .iter()
            .map(|&count| if total > 0 { round1(count as f64 / total as f64 * 100.0) } else { 0.0 })
            .collect()
    }
}

/// Counts keyed by a pair of categorical values from two columns.
///
/// Row and column labels keep first-seen order unless reordered with
/// [`CrossTab::with_row_order`].
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CrossTab {
    pub columns: Vec<String>,
    pub rows: Vec<CrossRow>,
}

impl CrossTab {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Reorder rows to match a canonical label order (e.g. age bands from
    /// youngest to oldest). Rows absent from `order` keep their first-seen
    /// order after the matched ones; labels in `order` with no data are
    /// skipped.
    #[must_use]
    pub fn with_row_order(mut self, order: &[&str]) -> Self {
        let position = |label: &str| order.iter().position(|&wanted| wanted == label);
        // Stable sort: unmatched rows keep their relative order at the end
        self.rows
            .sort_by_key(|row| position(&row.label).unwrap_or(order.len()));
        self
    }
}

/// Count every observed (row value, column value) pair.
///
/// Responses with an empty value on either axis are skipped entirely; they
/// contribute to no pair. Both label orders are first-seen.
///
/// # Errors
/// Returns a [`SchemaError`] if either column does not exist.
pub fn cross_tabulate(
    dataset: &Dataset,
    row_column: &str,
    col_column: &str,
) -> Result<CrossTab, SchemaError> {
    let row_handle = dataset.column(row_column)?;
    let col_handle = dataset.column(col_column)?;

    let mut columns: Vec<String> = Vec::new();
    let mut column_positions: HashMap<String, usize> = HashMap::new();
    let mut rows: Vec<CrossRow> = Vec::new();
    let mut row_positions: HashMap<String, usize> = HashMap::new();

    for (row_value, col_value) in dataset.values(row_handle).zip(dataset.values(col_handle)) {
        let (row_value, col_value) = (row_value.trim(), col_value.trim());
        if row_value.is_empty() || col_value.is_empty() {
            continue;
        }

        let col_pos = *column_positions.entry(col_value.to_string()).or_insert_with(|| {
            columns.push(col_value.to_string());
            columns.len() - 1
        });

        let row_pos = *row_positions.entry(row_value.to_string()).or_insert_with(|| {
            rows.push(CrossRow { label: row_value.to_string(), counts: Vec::new() });
            rows.len() - 1
        });

        let row = &mut rows[row_pos];
        if row.counts.len() <= col_pos {
            row.counts.resize(col_pos + 1, 0);
        }
        row.counts[col_pos] += 1;
    }

    // Align every row to the full column set
    for row in &mut rows {
        row.counts.resize(columns.len(), 0);
    }

    Ok(CrossTab { columns, rows })
}
