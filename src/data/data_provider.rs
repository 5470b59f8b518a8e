//! Read-only row access for export collaborators
//!
//! Writers only need column names and stringified rows; this trait keeps
//! them independent of how a table stores its cells.

use crate::data::datatable::Table;
use std::fmt::Debug;

/// Core trait for read-only data access
pub trait DataProvider: Send + Sync + Debug {
    /// A single row, stringified. `None` if the index is out of bounds.
    fn get_row(&self, index: usize) -> Option<Vec<String>>;

    fn get_column_names(&self) -> Vec<String>;

    fn get_row_count(&self) -> usize;
}

impl DataProvider for Table {
    fn get_row(&self, index: usize) -> Option<Vec<String>> {
        self.row_as_strings(index)
    }

    fn get_column_names(&self) -> Vec<String> {
        self.columns()
    }

    fn get_row_count(&self) -> usize {
        self.len()
    }
}
