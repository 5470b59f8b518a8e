//! Z-score standardization: `(x - mean) / std`, with the sample standard
//! deviation.

use super::{FitState, Scaler};
use crate::data::datatable::Table;
use crate::error::{Result, TableError};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ZParams {
    pub mean: f64,
    pub std: f64,
}

/// Centers numeric cells on the fitted mean and divides by the fitted std
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ZScaler {
    state: FitState<ZParams>,
}

impl ZScaler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn params(&self, column: &str) -> Option<ZParams> {
        self.state.params(column)
    }
}

impl Scaler for ZScaler {
    /// Fails with `ZeroStd` for constant columns and columns with fewer than
    /// two numeric cells.
    fn fit(&mut self, table: &Table, columns: &[&str]) -> Result<()> {
        self.state.fit(table, columns, |name, column| {
            let mean = column.mean().ok_or_else(|| TableError::NotNumeric {
                column: name.to_string(),
            })?;
            match column.std() {
                Some(std) if std != 0.0 => Ok(ZParams { mean, std }),
                _ => Err(TableError::ZeroStd {
                    column: name.to_string(),
                }),
            }
        })
    }

    fn transform(&self, table: &Table, columns: &[&str]) -> Result<Table> {
        self.state
            .transform(table, columns, |_, _| Ok(()), |x, p| (x - p.mean) / p.std)
    }

    fn features(&self) -> Vec<String> {
        self.state.features()
    }

    fn reset(&mut self) {
        self.state.clear();
    }
}
