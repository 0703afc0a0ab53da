//! Survey dataset loading and column access.
//!
//! The dataset is an immutable in-memory table: one row per survey response,
//! one cell per question. Headers are whitespace-trimmed on load (the source
//! export pads some question texts), and columns are only reachable through
//! the validated [`Dataset::column`] lookup, so a typo'd question name fails
//! with a [`SchemaError`] instead of propagating garbage downstream.

use crate::domain::{ColumnIdx, LoadError, SchemaError};
use log::debug;
use std::collections::HashMap;
use std::io::Read;
use std::path::Path;

pub mod cache;

pub use cache::load_cached;

/// Immutable survey table (loaded once, never edited).
#[derive(Debug)]
pub struct Dataset {
    headers: Vec<String>,
    index: HashMap<String, usize>,
    rows: Vec<Vec<String>>,
}

impl Dataset {
    /// Load a survey CSV from disk.
    ///
    /// # Errors
    /// Returns a [`LoadError`] if the file is missing or unparsable.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, LoadError> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(LoadError::FileNotFound(path.to_path_buf()));
        }
        let file = std::fs::File::open(path)?;
        let dataset = Self::from_reader(file)?;
        debug!(
            "loaded {} responses across {} columns from {}",
            dataset.len(),
            dataset.headers.len(),
            path.display()
        );
        Ok(dataset)
    }

    /// Parse survey CSV data from any reader.
    ///
    /// Headers are trimmed before indexing. Short rows are padded with empty
    /// cells so every row stays aligned to the header; rows wider than the
    /// header are rejected.
    ///
    /// # Errors
    /// Returns a [`LoadError`] on malformed CSV, a missing header row,
    /// duplicate trimmed headers, or an over-wide row.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, LoadError> {
        let mut csv_reader = csv::ReaderBuilder::new().flexible(true).from_reader(reader);

        let headers: Vec<String> =
            csv_reader.headers()?.iter().map(|h| h.trim().to_string()).collect();
        if headers.is_empty() || headers.iter().all(String::is_empty) {
            return Err(LoadError::MissingHeader);
        }

        let mut index = HashMap::with_capacity(headers.len());
        for (position, name) in headers.iter().enumerate() {
            if index.insert(name.clone(), position).is_some() {
                return Err(LoadError::DuplicateColumn(name.clone()));
            }
        }

        let mut rows = Vec::new();
        for (record_no, record) in csv_reader.records().enumerate() {
            let record = record?;
            if record.len() > headers.len() {
                return Err(LoadError::RowTooWide {
                    // +2: records are 0-indexed and the header occupies line 1
                    row: record_no + 2,
                    cells: record.len(),
                    columns: headers.len(),
                });
            }
            let mut cells: Vec<String> = record.iter().map(str::to_string).collect();
            cells.resize(headers.len(), String::new());
            rows.push(cells);
        }

        Ok(Self { headers, index, rows })
    }

    /// Number of survey responses.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Trimmed question headers, in file order.
    #[must_use]
    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    /// Raw response rows, aligned to [`Dataset::headers`].
    #[must_use]
    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    /// Validated column lookup. The requested name is trimmed before
    /// matching, mirroring the header normalization.
    ///
    /// # Errors
    /// Returns a [`SchemaError`] if no column carries the trimmed name.
    pub fn column(&self, name: &str) -> Result<ColumnIdx, SchemaError> {
        self.index
            .get(name.trim())
            .copied()
            .map(ColumnIdx::new)
            .ok_or_else(|| SchemaError::ColumnNotFound(name.to_string()))
    }

    /// Iterate the raw cells of one column, in response order.
    pub fn values(&self, column: ColumnIdx) -> impl Iterator<Item = &str> + '_ {
        self.rows.iter().map(move |row| row[column.index()].as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Dataset {
        let csv = "\
 Channel , Score\n\
Online,4\n\
Physical,2\n\
Online,5\n";
        Dataset::from_reader(csv.as_bytes()).expect("sample CSV should parse")
    }

    #[test]
    fn test_headers_are_trimmed() {
        let dataset = sample();
        assert_eq!(dataset.headers(), &["Channel".to_string(), "Score".to_string()]);
    }

    #[test]
    fn test_column_lookup_trims_requested_name() {
        let dataset = sample();
        let by_exact = dataset.column("Channel").expect("column exists");
        let by_padded = dataset.column("  Channel ").expect("trimmed lookup");
        assert_eq!(by_exact, by_padded);
    }

    #[test]
    fn test_unknown_column_is_schema_error() {
        let dataset = sample();
        let err = dataset.column("Favorite color").unwrap_err();
        assert!(err.to_string().contains("Favorite color"));
    }

    #[test]
    fn test_values_iterates_in_response_order() {
        let dataset = sample();
        let channel = dataset.column("Channel").expect("column exists");
        let values: Vec<&str> = dataset.values(channel).collect();
        assert_eq!(values, vec!["Online", "Physical", "Online"]);
    }

    #[test]
    fn test_short_rows_are_padded() {
        let dataset = Dataset::from_reader("A,B,C\n1,2\n".as_bytes()).expect("parse");
        assert_eq!(dataset.rows()[0], vec!["1".to_string(), "2".to_string(), String::new()]);
    }

    #[test]
    fn test_over_wide_row_is_rejected() {
        let err = Dataset::from_reader("A,B\n1,2,3\n".as_bytes()).unwrap_err();
        assert!(matches!(err, LoadError::RowTooWide { row: 2, cells: 3, columns: 2 }));
    }

    #[test]
    fn test_duplicate_trimmed_header_is_rejected() {
        let err = Dataset::from_reader("A, A \n1,2\n".as_bytes()).unwrap_err();
        assert!(matches!(err, LoadError::DuplicateColumn(name) if name == "A"));
    }

    #[test]
    fn test_empty_input_has_no_header() {
        let err = Dataset::from_reader("".as_bytes()).unwrap_err();
        assert!(matches!(err, LoadError::MissingHeader));
    }

    #[test]
    fn test_missing_file_is_load_error() {
        let err = Dataset::from_path("/no/such/survey.csv").unwrap_err();
        assert!(matches!(err, LoadError::FileNotFound(_)));
    }
}
