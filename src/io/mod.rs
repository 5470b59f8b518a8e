//! Ingestion and export collaborators
//!
//! Sources hand over raw text rows; type inference and validation happen in
//! the core. Errors here are `anyhow` with file context; core failures stay
//! downcastable to [`TableError`](crate::error::TableError).

pub mod csv;
pub mod json;
pub mod records;

use crate::data::datatable::Table;
use anyhow::{Context, Result};
use tracing::debug;

/// Column names plus rows of raw text tokens, one token per column
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawRows {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

/// Anything that can produce [`RawRows`]
pub trait DataSource {
    fn read(&self) -> Result<RawRows>;

    /// Short label for log and error messages
    fn describe(&self) -> String {
        "data source".to_string()
    }
}

/// Read `source` and build a typed table from it
pub fn load(source: &dyn DataSource) -> Result<Table> {
    let raw = source.read()?;
    debug!(
        "loaded {} rows x {} columns from {}",
        raw.rows.len(),
        raw.columns.len(),
        source.describe()
    );
    Table::from_rows(&raw.columns, &raw.rows)
        .with_context(|| format!("Failed to build table from {}", source.describe()))
}
