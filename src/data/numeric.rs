//! Plain `f64` exports for numeric consumers (model fitting, plotting)

use crate::data::datatable::Table;
use crate::error::{Result, TableError};

impl Table {
    /// The column at `column_index` as `f64`s.
    ///
    /// Every cell must be `Int` or `Float`; the first other cell is reported
    /// with its row.
    pub fn numeric_slice(&self, column_index: usize) -> Result<Vec<f64>> {
        let name = self
            .columns
            .get(column_index)
            .ok_or(TableError::ColumnIndexOutOfRange {
                index: column_index,
                count: self.columns.len(),
            })?;

        self.storage(name)
            .iter()
            .enumerate()
            .map(|(row, v)| {
                v.as_f64().ok_or_else(|| TableError::NonNumericValue {
                    column: name.clone(),
                    row,
                })
            })
            .collect()
    }

    /// Like [`Table::numeric_slice`], for columns known to be fully numeric.
    ///
    /// # Panics
    /// If the index is out of range or a cell is not numeric.
    pub fn must_numeric_slice(&self, column_index: usize) -> Vec<f64> {
        self.numeric_slice(column_index)
            .unwrap_or_else(|e| panic!("{e}"))
    }

    /// All columns as a row-major matrix
    pub fn numeric_matrix(&self) -> Result<Vec<Vec<f64>>> {
        if self.columns.is_empty() {
            return Err(TableError::NoColumnsSpecified);
        }

        let mut matrix = vec![Vec::with_capacity(self.columns.len()); self.length];
        for j in 0..self.columns.len() {
            for (row, x) in matrix.iter_mut().zip(self.numeric_slice(j)?) {
                row.push(x);
            }
        }
        Ok(matrix)
    }
}
