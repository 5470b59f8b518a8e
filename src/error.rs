//! Error types for table construction, lookup, statistics and scaling.

use thiserror::Error;

/// Every recoverable failure the table engine reports.
///
/// Variants name the offending column, index or row so a message is
/// actionable on its own.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TableError {
    #[error("table: input data is empty")]
    EmptyInput,

    #[error("column '{column}' not found")]
    UnknownColumn { column: String },

    #[error("column '{column}' already exists")]
    DuplicateColumn { column: String },

    #[error("column '{column}' has length {actual}, expected {expected}")]
    LengthMismatch {
        column: String,
        expected: usize,
        actual: usize,
    },

    #[error("column name must not be empty")]
    EmptyName,

    #[error("row index {index} at position {position} is out of range (table has {len} rows)")]
    IndexOutOfRange {
        position: usize,
        index: usize,
        len: usize,
    },

    #[error("column index {index} is out of range (table has {count} columns)")]
    ColumnIndexOutOfRange { index: usize, count: usize },

    #[error("no columns specified")]
    NoColumnsSpecified,

    #[error("column '{column}' is empty")]
    EmptyColumn { column: String },

    #[error("column '{column}' has no numeric values")]
    NotNumeric { column: String },

    #[error("column '{column}' contains a non-numeric value at row {row}")]
    NonNumericValue { column: String, row: usize },

    #[error("column '{column}' has zero range")]
    ZeroRange { column: String },

    #[error("column '{column}' has zero standard deviation")]
    ZeroStd { column: String },

    #[error("column '{column}' was not fitted")]
    NotFitted { column: String },

    #[error("no fitted features to transform")]
    NoFittedFeatures,

    #[error("row {row} has {got} columns, expected {expected}")]
    RowLengthMismatch {
        row: usize,
        got: usize,
        expected: usize,
    },
}

impl TableError {
    pub(crate) fn unknown_column(column: impl Into<String>) -> Self {
        Self::UnknownColumn {
            column: column.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, TableError>;
