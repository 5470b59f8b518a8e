//! Min-max scaling: `(x - min) / (max - min)`

use super::{FitState, Scaler};
use crate::data::datatable::Table;
use crate::error::{Result, TableError};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RangeParams {
    pub min: f64,
    pub max: f64,
}

impl RangeParams {
    pub fn range(&self) -> f64 {
        self.max - self.min
    }
}

/// Scales numeric cells into `[0, 1]` using the fitted minimum and maximum
///
/// A column whose fitted range is zero can be fitted but not transformed.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RangeScaler {
    state: FitState<RangeParams>,
}

impl RangeScaler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fitted parameters of one column
    pub fn params(&self, column: &str) -> Option<RangeParams> {
        self.state.params(column)
    }
}

impl Scaler for RangeScaler {
    fn fit(&mut self, table: &Table, columns: &[&str]) -> Result<()> {
        self.state.fit(table, columns, |name, column| {
            match (column.min(), column.max()) {
                (Some(min), Some(max)) => Ok(RangeParams { min, max }),
                _ => Err(TableError::NotNumeric {
                    column: name.to_string(),
                }),
            }
        })
    }

    fn transform(&self, table: &Table, columns: &[&str]) -> Result<Table> {
        self.state.transform(
            table,
            columns,
            |name, p| {
                if p.range() == 0.0 {
                    return Err(TableError::ZeroRange {
                        column: name.to_string(),
                    });
                }
                Ok(())
            },
            |x, p| (x - p.min) / p.range(),
        )
    }

    fn features(&self) -> Vec<String> {
        self.state.features()
    }

    fn reset(&mut self) {
        self.state.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::cell_value::CellValue;

    fn table() -> Table {
        Table::with_order(
            vec![
                ("x", vec![0.into(), 5.into(), 10.into()]),
                ("flat", vec![2.into(), 2.into(), 2.into()]),
                ("name", vec!["a".into(), "b".into(), "c".into()]),
            ],
            &["x", "flat", "name"],
        )
        .unwrap()
    }

    #[test]
    fn test_fit_transform_x() {
        let t = table();
        let mut scaler = RangeScaler::new();
        scaler.fit(&t, &["x"]).unwrap();
        assert!(scaler.is_fitted());
        assert_eq!(
            scaler.params("x"),
            Some(RangeParams {
                min: 0.0,
                max: 10.0
            })
        );

        let scaled = scaler.transform(&t, &[]).unwrap();
        assert_eq!(
            scaled.values("x").unwrap(),
            &[
                CellValue::Float(0.0),
                CellValue::Float(0.5),
                CellValue::Float(1.0)
            ]
        );
        assert_eq!(t.values("x").unwrap()[1], CellValue::Int(5));
    }

    #[test]
    fn test_zero_range_fails_at_transform() {
        let t = table();
        let mut scaler = RangeScaler::new();
        scaler.fit(&t, &["flat"]).unwrap();
        assert_eq!(
            scaler.transform(&t, &["flat"]).unwrap_err(),
            TableError::ZeroRange {
                column: "flat".to_string()
            }
        );
    }

    #[test]
    fn test_fit_errors_store_nothing() {
        let t = table();
        let mut scaler = RangeScaler::new();
        assert_eq!(
            scaler.fit(&t, &["x", "name"]).unwrap_err(),
            TableError::NotNumeric {
                column: "name".to_string()
            }
        );
        assert!(!scaler.is_fitted());
        assert!(matches!(
            scaler.fit(&t, &["nope"]).unwrap_err(),
            TableError::UnknownColumn { .. }
        ));
    }

    #[test]
    fn test_transform_requires_fit() {
        let t = table();
        let mut scaler = RangeScaler::new();
        assert_eq!(
            scaler.transform(&t, &[]).unwrap_err(),
            TableError::NoFittedFeatures
        );

        scaler.fit(&t, &["x"]).unwrap();
        assert_eq!(
            scaler.transform(&t, &["flat"]).unwrap_err(),
            TableError::NotFitted {
                column: "flat".to_string()
            }
        );
    }

    #[test]
    fn test_refit_lists_feature_twice_and_reset() {
        let t = table();
        let mut scaler = RangeScaler::new();
        scaler.fit(&t, &["x"]).unwrap();
        scaler.fit(&t, &["x"]).unwrap();
        assert_eq!(scaler.features(), vec!["x", "x"]);

        scaler.reset();
        assert!(!scaler.is_fitted());
        assert_eq!(scaler.params("x"), None);
    }
}
