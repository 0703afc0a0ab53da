//! Likert-scale summaries.
//!
//! The two 1-to-5 scale questions are the only columns the report treats as
//! numeric. Cells are parsed individually; blanks and unparsable answers
//! are skipped rather than failing the section.

use super::{rank, FrequencyTable};
use crate::dataset::Dataset;
use crate::domain::SchemaError;
use serde::Serialize;

/// Distribution and central tendency of one score column.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoreSummary {
    /// Score frequency table, sorted ascending by score.
    pub distribution: FrequencyTable,
    /// Mean over parseable cells; `None` when nothing parsed.
    pub mean: Option<f64>,
    /// Median over parseable cells (midpoint average for even counts).
    pub median: Option<f64>,
}

/// Summarize a Likert column: ascending score distribution plus mean and
/// median over the cells that parse as numbers.
///
/// # Errors
/// Returns a [`SchemaError`] if the column does not exist.
pub fn score_summary(dataset: &Dataset, column: &str) -> Result<ScoreSummary, SchemaError> {
    let distribution = rank(dataset, column)?.sorted_by_score();

    let handle = dataset.column(column)?;
    let mut values: Vec<f64> = dataset
        .values(handle)
        .filter_map(|cell| cell.trim().parse::<f64>().ok())
        .collect();
    values.sort_by(f64::total_cmp);

    let mean = if values.is_empty() {
        None
    } else {
        #[allow(clippy::cast_precision_loss)]
        Some(values.iter().sum::<f64>() / values.len() as f64)
    };
    let median = match values.len() {
        0 => None,
        n if n % 2 == 1 => Some(values[n / 2]),
        n => Some((values[n / 2 - 1] + values[n / 2]) / 2.0),
    };

    Ok(ScoreSummary { distribution, mean, median })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dataset(csv: &str) -> Dataset {
        Dataset::from_reader(csv.as_bytes()).expect("test CSV should parse")
    }

    #[test]
    fn test_distribution_is_sorted_by_score() {
        let data = dataset("Trust\n5\n3\n5\n1\n3\n");
        let summary = score_summary(&data, "Trust").expect("column exists");

        let labels: Vec<&str> =
            summary.distribution.entries().iter().map(|e| e.label.as_str()).collect();
        assert_eq!(labels, vec!["1", "3", "5"]);
    }

    #[test]
    fn test_mean_and_odd_median() {
        let data = dataset("Trust\n5\n3\n1\n");
        let summary = score_summary(&data, "Trust").expect("column exists");

        assert_eq!(summary.mean, Some(3.0));
        assert_eq!(summary.median, Some(3.0));
    }

    #[test]
    fn test_even_median_averages_midpoints() {
        let data = dataset("Trust\n1\n2\n4\n5\n");
        let summary = score_summary(&data, "Trust").expect("column exists");
        assert_eq!(summary.median, Some(3.0));
    }

    #[test]
    fn test_blank_and_unparsable_cells_are_skipped() {
        let data = dataset("Trust\n4\n\nnot sure\n2\n");
        let summary = score_summary(&data, "Trust").expect("column exists");

        assert_eq!(summary.mean, Some(3.0));
        // "not sure" still shows up in the distribution, sorted after scores
        let labels: Vec<&str> =
            summary.distribution.entries().iter().map(|e| e.label.as_str()).collect();
        assert_eq!(labels, vec!["2", "4", "not sure"]);
    }

    #[test]
    fn test_all_blank_column_has_no_central_tendency() {
        let data = dataset("Trust,Other\n,x\n,y\n");
        let summary = score_summary(&data, "Trust").expect("column exists");

        assert!(summary.distribution.is_empty());
        assert_eq!(summary.mean, None);
        assert_eq!(summary.median, None);
    }
}
