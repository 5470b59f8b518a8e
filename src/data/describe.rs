//! Table-level summaries, themselves returned as tables

use crate::data::cell_value::CellValue;
use crate::data::column::Column;
use crate::data::datatable::Table;
use crate::error::Result;

/// Columns of the table produced by [`Table::describe`]
pub const DESCRIBE_COLUMNS: [&str; 10] = [
    "Column", "Count", "Missing", "Mean", "Std", "Min", "Q1", "Median", "Q3", "Max",
];

impl Table {
    /// Descriptive statistics, one row per column holding at least one
    /// numeric cell. Statistics that cannot be computed are missing.
    pub fn describe(&self) -> Result<Table> {
        let mut out: Vec<Vec<CellValue>> = vec![Vec::new(); DESCRIBE_COLUMNS.len()];

        for name in &self.columns {
            let col = self.col(name)?;
            if !col.is_numeric() {
                continue;
            }

            let row = describe_row(&col);
            for (cells, value) in out.iter_mut().zip(row) {
                cells.push(value);
            }
        }

        Table::with_order(DESCRIBE_COLUMNS.iter().copied().zip(out), &DESCRIBE_COLUMNS)
    }

    /// Column names with the type of their first present cell
    pub fn overview(&self) -> Result<Table> {
        let mut names = Vec::with_capacity(self.columns.len());
        let mut types = Vec::with_capacity(self.columns.len());
        for name in &self.columns {
            names.push(CellValue::text(name.as_str()));
            types.push(CellValue::text(self.col(name)?.dtype()));
        }
        Table::with_order(vec![("Column", names), ("Type", types)], &["Column", "Type"])
    }
}

fn describe_row(col: &Column) -> Vec<CellValue> {
    vec![
        CellValue::text(col.name()),
        CellValue::Int(col.count() as i64),
        CellValue::Int(col.missing() as i64),
        col.mean().into(),
        col.std().into(),
        col.min().into(),
        col.q1().into(),
        col.median().into(),
        col.q3().into(),
        col.max().into(),
    ]
}
