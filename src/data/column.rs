use crate::data::cell_value::CellValue;
use crate::error::{Result, TableError};
use std::collections::HashSet;
use std::sync::{Arc, OnceLock};

/// Maximum number of distinct values for a column to count as categorical
pub const MAX_CATEGORICAL_UNIQUES: usize = 3;

/// A named, immutable sequence of cells
///
/// Storage is shared with the table it came from; nothing here writes to it.
/// The categorical classification is computed on first use and cached.
#[derive(Debug, Clone)]
pub struct Column {
    name: String,
    values: Arc<Vec<CellValue>>,
    categorical: OnceLock<bool>,
}

impl Column {
    pub fn new(name: impl Into<String>, values: Vec<CellValue>) -> Self {
        Self::from_shared(name, Arc::new(values))
    }

    pub(crate) fn from_shared(name: impl Into<String>, values: Arc<Vec<CellValue>>) -> Self {
        Self {
            name: name.into(),
            values,
            categorical: OnceLock::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn values(&self) -> &[CellValue] {
        &self.values
    }

    pub fn to_vec(&self) -> Vec<CellValue> {
        self.values.as_ref().clone()
    }

    pub(crate) fn into_shared(self) -> Arc<Vec<CellValue>> {
        self.values
    }

    pub fn get(&self, index: usize) -> Option<&CellValue> {
        self.values.get(index)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Type label of the first non-missing cell, `unknown` if there is none
    pub fn dtype(&self) -> &'static str {
        self.values
            .iter()
            .find(|v| !v.is_null())
            .map(|v| v.type_name())
            .unwrap_or("unknown")
    }

    /// Whether the column looks like a small set of labels.
    ///
    /// Boolean columns never are. Otherwise the cells are scanned in order
    /// and the scan stops as soon as more than three distinct values have
    /// been seen.
    pub fn is_categorical(&self) -> bool {
        *self
            .categorical
            .get_or_init(|| infer_categorical(&self.values, MAX_CATEGORICAL_UNIQUES))
    }

    /// Apply `f` to every cell, producing a new column with the same name
    pub fn map<F>(&self, f: F) -> Column
    where
        F: FnMut(&CellValue) -> CellValue,
    {
        Column::new(self.name.clone(), self.values.iter().map(f).collect())
    }

    pub(crate) fn numeric_values(&self) -> impl Iterator<Item = f64> + '_ {
        self.values.iter().filter_map(CellValue::as_f64)
    }

    /// Min-max scale every numeric cell into `[0, 1]`.
    ///
    /// Missing cells pass through; any other non-numeric cell is an error.
    pub fn normalize(&self) -> Result<Column> {
        self.check_rescalable()?;
        let (min, max) = match (self.min(), self.max()) {
            (Some(min), Some(max)) => (min, max),
            _ => return Err(self.not_numeric()),
        };
        let range = max - min;
        if range == 0.0 {
            return Err(TableError::ZeroRange {
                column: self.name.clone(),
            });
        }

        Ok(self.map(|v| match v.as_f64() {
            Some(x) => CellValue::Float((x - min) / range),
            None => v.clone(),
        }))
    }

    /// Z-score every numeric cell using the sample standard deviation.
    ///
    /// Same pass-through policy as [`Column::normalize`].
    pub fn standardize(&self) -> Result<Column> {
        self.check_rescalable()?;
        let mean = self.mean().ok_or_else(|| self.not_numeric())?;
        let std = match self.std() {
            Some(std) if std != 0.0 => std,
            _ => {
                return Err(TableError::ZeroStd {
                    column: self.name.clone(),
                })
            }
        };

        Ok(self.map(|v| match v.as_f64() {
            Some(x) => CellValue::Float((x - mean) / std),
            None => v.clone(),
        }))
    }

    fn check_rescalable(&self) -> Result<()> {
        if self.values.is_empty() {
            return Err(TableError::EmptyColumn {
                column: self.name.clone(),
            });
        }
        if !self.values.iter().any(CellValue::is_numeric) {
            return Err(self.not_numeric());
        }
        if let Some(row) = self
            .values
            .iter()
            .position(|v| !v.is_numeric() && !v.is_missing())
        {
            return Err(TableError::NonNumericValue {
                column: self.name.clone(),
                row,
            });
        }
        Ok(())
    }

    fn not_numeric(&self) -> TableError {
        TableError::NotNumeric {
            column: self.name.clone(),
        }
    }
}

impl PartialEq for Column {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name && self.values == other.values
    }
}

fn infer_categorical(values: &[CellValue], max_unique: usize) -> bool {
    if values.is_empty() {
        return false;
    }

    let is_bool = values
        .iter()
        .find(|v| !v.is_null())
        .is_some_and(|v| matches!(v, CellValue::Bool(_)));
    if is_bool {
        return false;
    }

    let mut uniques: HashSet<&CellValue> = HashSet::new();
    for value in values {
        uniques.insert(value);
        if uniques.len() > max_unique {
            return false;
        }
    }
    true
}
