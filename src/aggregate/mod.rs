//! Aggregation pipeline turning raw survey columns into chart-ready tables.
//!
//! This module contains the pure business logic of the report, separated
//! from the TUI presentation layer:
//!
//! - **`rank()`** - ranked frequency table for one column
//! - **`explode_multi_select()`** - delimiter-joined answers fanned out into
//!   one count per token, then ranked
//! - **[`FrequencyTable`]** - the shared output type, with percentage
//!   normalization and head-N truncation
//! - **`cross_tabulate()`** - paired counts with per-row normalization
//!   (`crosstab` submodule)
//! - **`score_summary()`** - Likert distributions with mean/median
//!   (`scores` submodule)
//!
//! # Ordering guarantee
//!
//! Tables are sorted by descending count with ties in **first-seen order**:
//! counting preserves the order labels first appear in the column, and the
//! descending sort is stable. Equal counts therefore never reshuffle
//! between renders.

// Percentage calculations intentionally convert counts to f64
#![allow(clippy::cast_precision_loss)]

use crate::dataset::Dataset;
use crate::domain::{AggregateError, ArgumentError, SchemaError};
use serde::Serialize;
use std::cmp::Reverse;
use std::collections::HashMap;

pub mod crosstab;
pub mod scores;

pub use crosstab::{cross_tabulate, CrossRow, CrossTab};
pub use scores::{score_summary, ScoreSummary};

/// One ranked category: label, count, and the optional percentage added by
/// a normalization pass.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FrequencyEntry {
    pub label: String,
    pub count: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub percentage: Option<f64>,
}

/// Ranked (category, count) pairs derived from a dataset column.
///
/// Always sorted by descending count, ties in first-seen order. Recomputed
/// fresh from the dataset on every render; never persisted.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct FrequencyTable {
    entries: Vec<FrequencyEntry>,
}

impl FrequencyTable {
    /// Count non-empty trimmed labels in encounter order, then rank.
    fn from_labels<'a>(labels: impl Iterator<Item = &'a str>) -> Self {
        let mut entries: Vec<FrequencyEntry> = Vec::new();
        let mut positions: HashMap<String, usize> = HashMap::new();

        for raw in labels {
            let label = raw.trim();
            if label.is_empty() {
                continue;
            }
            if let Some(&position) = positions.get(label) {
                entries[position].count += 1;
            } else {
                positions.insert(label.to_string(), entries.len());
                entries.push(FrequencyEntry {
                    label: label.to_string(),
                    count: 1,
                    percentage: None,
                });
            }
        }

        // Stable sort: equal counts keep the order labels first appeared
        entries.sort_by_key(|entry| Reverse(entry.count));
        Self { entries }
    }

    #[must_use]
    pub fn entries(&self) -> &[FrequencyEntry] {
        &self.entries
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Sum of counts over the current entries. Before any truncation this
    /// equals the number of non-empty answers (or tokens) counted.
    #[must_use]
    pub fn total(&self) -> u64 {
        self.entries.iter().map(|entry| entry.count).sum()
    }

    /// Highest-ranked entry, if any. Callers deriving "top result" insights
    /// must handle the empty-table case rather than assume a first row.
    #[must_use]
    pub fn top(&self) -> Option<&FrequencyEntry> {
        self.entries.first()
    }

    /// First `n` entries of the already-sorted table. Returns the table
    /// unchanged when `n >= len`. The count is unsigned, so the
    /// negative-count failure mode of loosely typed callers cannot occur.
    #[must_use]
    pub fn head(&self, n: usize) -> Self {
        Self { entries: self.entries.iter().take(n).cloned().collect() }
    }

    /// Add percentages computed against this table's own count sum
    /// ("share of answers shown"). Apply before or after [`head`] depending
    /// on whether the denominator should include truncated entries.
    ///
    /// [`head`]: FrequencyTable::head
    #[must_use]
    pub fn normalized(&self) -> Self {
        self.normalized_by(self.total())
    }

    /// Add percentages against an external denominator, e.g. the respondent
    /// total ("share of people") for multi-select columns where one person
    /// contributes several counts.
    #[must_use]
    pub fn normalized_by(&self, denominator: u64) -> Self {
        let entries = self
            .entries
            .iter()
            .map(|entry| FrequencyEntry {
                label: entry.label.clone(),
                count: entry.count,
                percentage: (denominator > 0)
                    .then(|| round1(entry.count as f64 / denominator as f64 * 100.0)),
            })
            .collect();
        Self { entries }
    }

    /// Re-sort ascending by the numeric value of the label (score scales).
    /// Labels that do not parse sort after the numeric ones, keeping their
    /// relative order.
    #[must_use]
    pub fn sorted_by_score(&self) -> Self {
        let mut entries = self.entries.clone();
        entries.sort_by(|a, b| match (parse_score(&a.label), parse_score(&b.label)) {
            (Some(x), Some(y)) => x.total_cmp(&y),
            (Some(_), None) => std::cmp::Ordering::Less,
            (None, Some(_)) => std::cmp::Ordering::Greater,
            (None, None) => std::cmp::Ordering::Equal,
        });
        Self { entries }
    }
}

fn parse_score(label: &str) -> Option<f64> {
    label.trim().parse::<f64>().ok()
}

/// Round to one decimal place, the precision shown throughout the report.
pub(crate) fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Rank the distinct values of one column by occurrence count.
///
/// Empty and whitespace-only cells are not counted and do not appear as
/// categories. An empty dataset (or an all-empty column) yields an empty
/// table, not an error.
///
/// # Errors
/// Returns a [`SchemaError`] if the column does not exist.
pub fn rank(dataset: &Dataset, column: &str) -> Result<FrequencyTable, SchemaError> {
    let handle = dataset.column(column)?;
    Ok(FrequencyTable::from_labels(dataset.values(handle)))
}

/// Split each answer on `delimiter`, trim the tokens, drop empties, and
/// rank the flattened pool. A response answering `"A; B"` contributes one
/// count to `A` and one to `B`; an empty answer contributes nothing.
///
/// # Errors
/// Returns a [`SchemaError`] for a missing column or an [`ArgumentError`]
/// for an empty delimiter.
pub fn explode_multi_select(
    dataset: &Dataset,
    column: &str,
    delimiter: &str,
) -> Result<FrequencyTable, AggregateError> {
    if delimiter.is_empty() {
        return Err(ArgumentError::EmptyDelimiter.into());
    }
    let handle = dataset.column(column).map_err(AggregateError::from)?;
    Ok(FrequencyTable::from_labels(
        dataset.values(handle).flat_map(|cell| cell.split(delimiter)),
    ))
}
