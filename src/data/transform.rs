//! Column-level transformations producing new tables
//!
//! `replace_column` is the only operation here that writes to the receiver.

use crate::data::cell_value::CellValue;
use crate::data::column::Column;
use crate::data::datatable::Table;
use crate::error::{Result, TableError};
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use tracing::{debug, warn};

/// Suffix of the integer-coded twin `categorize` adds for each categorical column
pub const CATEGORIZED_SUFFIX: &str = "_categorized";

impl Table {
    /// Replace one column's cells with `f` applied to each of them
    pub fn map_col<F>(&self, name: &str, f: F) -> Result<Table>
    where
        F: FnMut(&CellValue) -> CellValue,
    {
        let mapped = self.col(name)?.map(f);
        let mut result = self.clone();
        result
            .data
            .insert(name.to_string(), mapped.into_shared());
        Ok(result)
    }

    /// Append one column
    pub fn add_column(&self, name: impl Into<String>, values: Vec<CellValue>) -> Result<Table> {
        self.add_columns(vec![(name.into(), values)])
    }

    /// Append several columns at once. If any of them is invalid, none is
    /// added.
    ///
    /// On a table without columns the first new column sets the row count.
    pub fn add_columns<K: Into<String>>(&self, columns: Vec<(K, Vec<CellValue>)>) -> Result<Table> {
        let columns: Vec<(String, Vec<CellValue>)> = columns
            .into_iter()
            .map(|(name, values)| (name.into(), values))
            .collect();

        let mut expected = if self.columns.is_empty() {
            None
        } else {
            Some(self.length)
        };
        let mut seen = HashSet::new();
        for (name, values) in &columns {
            if name.is_empty() {
                return Err(TableError::EmptyName);
            }
            if self.has_column(name) || !seen.insert(name.as_str()) {
                return Err(TableError::DuplicateColumn {
                    column: name.clone(),
                });
            }
            let expected = *expected.get_or_insert(values.len());
            if values.len() != expected {
                return Err(TableError::LengthMismatch {
                    column: name.clone(),
                    expected,
                    actual: values.len(),
                });
            }
        }

        let mut result = self.clone();
        if let Some(length) = expected {
            result.length = length;
        }
        for (name, values) in columns {
            debug!("adding column '{}'", name);
            result.columns.push(name.clone());
            result.data.insert(name, Arc::new(values));
        }
        Ok(result)
    }

    /// Overwrite an existing column's cells in place.
    ///
    /// Tables cloned from this one before the call keep the old cells.
    pub fn replace_column(&mut self, name: &str, values: Vec<CellValue>) -> Result<()> {
        if values.len() != self.length {
            if !self.has_column(name) {
                return Err(TableError::unknown_column(name));
            }
            return Err(TableError::LengthMismatch {
                column: name.to_string(),
                expected: self.length,
                actual: values.len(),
            });
        }

        let slot = self
            .data
            .get_mut(name)
            .ok_or_else(|| TableError::unknown_column(name))?;
        match Arc::get_mut(slot) {
            Some(cells) => *cells = values,
            None => *slot = Arc::new(values),
        }
        Ok(())
    }

    /// Add an integer-coded twin `<name>_categorized` for every categorical
    /// column.
    ///
    /// Codes start at zero and follow first occurrence. Twins are appended
    /// after the existing columns. If the table already has a column named
    /// `<name>_categorized`, its cells are overwritten by the codes and it
    /// keeps its position, whether it came from an earlier call or not.
    pub fn categorize(&self) -> Table {
        let mut result = self.clone();

        for name in &self.columns {
            let column = Column::from_shared(name.as_str(), Arc::clone(self.storage(name)));
            if !column.is_categorical() {
                continue;
            }

            let encoded = encode_categories(&column);
            let target = format!("{name}{CATEGORIZED_SUFFIX}");
            debug!("categorized '{}' into '{}'", name, target);
            if !result.has_column(&target) {
                result.columns.push(target.clone());
            }
            result.data.insert(target, Arc::new(encoded));
        }

        result
    }

    /// Min-max scale the given columns (all columns when `columns` is
    /// empty). Columns that cannot be scaled are left as they are.
    pub fn normalize(&self, columns: &[&str]) -> Result<Table> {
        self.rescale(columns, "normalize", Column::normalize)
    }

    /// Z-score the given columns (all columns when `columns` is empty).
    /// Columns that cannot be standardized are left as they are.
    pub fn standardize(&self, columns: &[&str]) -> Result<Table> {
        self.rescale(columns, "standardize", Column::standardize)
    }

    fn rescale<F>(&self, columns: &[&str], op: &str, f: F) -> Result<Table>
    where
        F: Fn(&Column) -> Result<Column>,
    {
        let targets: Vec<&str> = if columns.is_empty() {
            self.columns.iter().map(String::as_str).collect()
        } else {
            columns.to_vec()
        };

        let mut result = self.clone();
        for name in targets {
            let column = self.col(name)?;
            match f(&column) {
                Ok(scaled) => {
                    result.data.insert(name.to_string(), scaled.into_shared());
                }
                Err(e) => warn!("{}: leaving column '{}' unchanged: {}", op, name, e),
            }
        }
        Ok(result)
    }
}

fn encode_categories(column: &Column) -> Vec<CellValue> {
    let mut codes: HashMap<&CellValue, i64> = HashMap::new();
    column
        .values()
        .iter()
        .map(|value| {
            let next = codes.len() as i64;
            CellValue::Int(*codes.entry(value).or_insert(next))
        })
        .collect()
}
