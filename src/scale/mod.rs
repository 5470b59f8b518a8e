//! Stateful two-phase column scalers
//!
//! A scaler learns per-column parameters from one table (`fit`) and applies
//! them to the same or another table with those columns (`transform`).
//! Instances are not synchronized; share them behind a lock if needed.

pub mod range_scaler;
pub mod z_scaler;

pub use range_scaler::{RangeParams, RangeScaler};
pub use z_scaler::{ZParams, ZScaler};

use crate::data::cell_value::CellValue;
use crate::data::column::Column;
use crate::data::datatable::Table;
use crate::error::{Result, TableError};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::debug;

/// Capability shared by every scaler
pub trait Scaler {
    /// Learn parameters for `columns`, replacing earlier parameters for the
    /// same names. Nothing is stored if any column fails.
    fn fit(&mut self, table: &Table, columns: &[&str]) -> Result<()>;

    /// Scale `columns` (the fitted features when empty) into a new table.
    /// Non-numeric cells pass through unchanged.
    fn transform(&self, table: &Table, columns: &[&str]) -> Result<Table>;

    /// Fitted column names in fit order. Refitting a column lists it again.
    fn features(&self) -> Vec<String>;

    fn is_fitted(&self) -> bool {
        !self.features().is_empty()
    }

    /// Forget every fitted parameter
    fn reset(&mut self);

    fn fit_transform(&mut self, table: &Table, columns: &[&str]) -> Result<Table> {
        self.fit(table, columns)?;
        self.transform(table, columns)
    }
}

/// Fitted parameters keyed by column, plus the fit-order feature list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub(crate) struct FitState<P> {
    features: Vec<String>,
    params: HashMap<String, P>,
}

impl<P> Default for FitState<P> {
    fn default() -> Self {
        Self {
            features: Vec::new(),
            params: HashMap::new(),
        }
    }
}

impl<P: Copy> FitState<P> {
    /// Compute parameters for every column first, then commit them all
    pub(crate) fn fit<F>(&mut self, table: &Table, columns: &[&str], mut learn: F) -> Result<()>
    where
        F: FnMut(&str, &Column) -> Result<P>,
    {
        let learned = columns
            .iter()
            .map(|&name| {
                let column = table.col(name)?;
                learn(name, &column).map(|p| (name, p))
            })
            .collect::<Result<Vec<_>>>()?;

        for (name, params) in learned {
            debug!("fitted column '{}'", name);
            self.features.push(name.to_string());
            self.params.insert(name.to_string(), params);
        }
        Ok(())
    }

    /// Apply `scale` to the numeric cells of each target column
    pub(crate) fn transform<C, S>(
        &self,
        table: &Table,
        columns: &[&str],
        mut check: C,
        scale: S,
    ) -> Result<Table>
    where
        C: FnMut(&str, P) -> Result<()>,
        S: Fn(f64, P) -> f64,
    {
        let targets: Vec<&str> = if columns.is_empty() {
            self.features.iter().map(String::as_str).collect()
        } else {
            columns.to_vec()
        };
        if targets.is_empty() {
            return Err(TableError::NoFittedFeatures);
        }

        let mut result = table.clone();
        for name in targets {
            let column = table.col(name)?;
            let params = *self
                .params
                .get(name)
                .ok_or_else(|| TableError::NotFitted {
                    column: name.to_string(),
                })?;
            check(name, params)?;

            let scaled = column.map(|v| match v.as_f64() {
                Some(x) => CellValue::Float(scale(x, params)),
                None => v.clone(),
            });
            result.data.insert(name.to_string(), scaled.into_shared());
        }
        Ok(result)
    }

    pub(crate) fn features(&self) -> Vec<String> {
        self.features.clone()
    }

    pub(crate) fn params(&self, column: &str) -> Option<P> {
        self.params.get(column).copied()
    }

    pub(crate) fn clear(&mut self) {
        self.features.clear();
        self.params.clear();
    }
}
