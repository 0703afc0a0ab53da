//! Structured error types for shoplens
//!
//! Using thiserror for automatic Display implementation and error chaining.

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while loading the survey CSV. Fatal to the whole run:
/// no partial dashboard is shown on a load failure.
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("Survey file not found: {}", .0.display())]
    FileNotFound(PathBuf),

    #[error("Survey data has no header row")]
    MissingHeader,

    #[error("Duplicate column after header trimming: {0:?}")]
    DuplicateColumn(String),

    #[error("Row {row} has {cells} cells but the header has {columns} columns")]
    RowTooWide { row: usize, cells: usize, columns: usize },

    #[error(transparent)]
    Csv(#[from] csv::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// A required question column is absent after header trimming.
/// Fatal only to the section that asked for it.
#[derive(Error, Debug)]
pub enum SchemaError {
    #[error("Column not found in survey: {0:?}")]
    ColumnNotFound(String),
}

/// Invalid aggregation arguments. Programmer error with a fixed caller set;
/// covered by tests rather than expected at runtime.
#[derive(Error, Debug)]
pub enum ArgumentError {
    #[error("Multi-select delimiter must not be empty")]
    EmptyDelimiter,
}

/// Union of the failures a section builder can hit.
#[derive(Error, Debug)]
pub enum AggregateError {
    #[error(transparent)]
    Schema(#[from] SchemaError),

    #[error(transparent)]
    Argument(#[from] ArgumentError),
}

#[derive(Error, Debug)]
pub enum ExportError {
    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Csv(#[from] csv::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
