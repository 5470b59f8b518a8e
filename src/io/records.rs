//! Tables from fixed-schema Rust values
//!
//! Each record type states its column names once and lays its fields out
//! in that order.

use crate::data::cell_value::CellValue;
use crate::data::datatable::Table;
use crate::error::{Result, TableError};

/// A value that maps onto one table row
///
/// ```
/// use tablekit::{CellValue, Record, Table};
///
/// struct Point {
///     x: i64,
///     label: String,
/// }
///
/// impl Record for Point {
///     fn columns() -> &'static [&'static str] {
///         &["x", "label"]
///     }
///
///     fn cells(&self) -> Vec<CellValue> {
///         vec![self.x.into(), self.label.as_str().into()]
///     }
/// }
///
/// let t = Table::from_records(&[Point { x: 1, label: "a".into() }]).unwrap();
/// assert_eq!(t.columns(), vec!["x", "label"]);
/// ```
pub trait Record {
    fn columns() -> &'static [&'static str];

    /// One cell per entry of [`Record::columns`], in the same order
    fn cells(&self) -> Vec<CellValue>;
}

impl Table {
    /// Build a table with one row per record. Cells are kept as given;
    /// no type inference runs.
    pub fn from_records<T: Record>(records: &[T]) -> Result<Table> {
        if records.is_empty() {
            return Err(TableError::EmptyInput);
        }

        let columns = T::columns();
        let mut data: Vec<Vec<CellValue>> = vec![Vec::with_capacity(records.len()); columns.len()];
        for (i, record) in records.iter().enumerate() {
            let cells = record.cells();
            if cells.len() != columns.len() {
                return Err(TableError::RowLengthMismatch {
                    row: i + 1,
                    got: cells.len(),
                    expected: columns.len(),
                });
            }
            for (column, cell) in data.iter_mut().zip(cells) {
                column.push(cell);
            }
        }

        Table::with_order(columns.iter().copied().zip(data), columns)
    }
}
