//! Type inference for raw text tokens
//!
//! Every ingestion path (CSV, JSON strings, hand-built rows) funnels its
//! tokens through here so that typing is identical regardless of source.

use crate::data::cell_value::CellValue;
use crate::error::{Result, TableError};
use tracing::trace;

/// Type inference utilities
pub struct TypeInference;

impl TypeInference {
    /// Infer a typed cell from a single raw token.
    ///
    /// Order of checks matters: boolean, then integer, then float, and
    /// anything else stays text. Thousands separators and currency symbols
    /// are not recognised and fall through to text.
    pub fn infer(token: &str) -> CellValue {
        let value = token.trim();

        if value.eq_ignore_ascii_case("true") {
            return CellValue::Bool(true);
        }
        if value.eq_ignore_ascii_case("false") {
            return CellValue::Bool(false);
        }

        if let Ok(i) = value.parse::<i64>() {
            return CellValue::Int(i);
        }

        // Includes scientific notation and integers too large for i64
        if let Ok(f) = value.parse::<f64>() {
            return CellValue::Float(f);
        }

        CellValue::Text(value.to_string())
    }

    /// Promote every integer cell to float when the column holds at least
    /// one float. Text and boolean cells are left alone.
    ///
    /// Returns `true` if a promotion happened.
    pub fn reconcile(values: &mut [CellValue]) -> bool {
        let has_float = values.iter().any(|v| matches!(v, CellValue::Float(_)));
        if !has_float {
            return false;
        }

        for value in values.iter_mut() {
            if let CellValue::Int(i) = *value {
                *value = CellValue::Float(i as f64);
            }
        }
        true
    }

    /// Parse row-oriented raw tokens into typed, column-oriented data.
    ///
    /// Each row must have exactly one token per column; the first ragged row
    /// fails with `RowLengthMismatch` (rows are numbered from 1, header
    /// excluded). Columns are returned in the given order.
    pub fn parse_rows<C, R, S>(columns: &[C], rows: &[R]) -> Result<Vec<(String, Vec<CellValue>)>>
    where
        C: AsRef<str>,
        R: AsRef<[S]>,
        S: AsRef<str>,
    {
        let expected = columns.len();
        let mut data: Vec<Vec<CellValue>> = (0..expected)
            .map(|_| Vec::with_capacity(rows.len()))
            .collect();

        for (i, row) in rows.iter().enumerate() {
            let row = row.as_ref();
            if row.len() != expected {
                return Err(TableError::RowLengthMismatch {
                    row: i + 1,
                    got: row.len(),
                    expected,
                });
            }

            for (j, token) in row.iter().enumerate() {
                data[j].push(Self::infer(token.as_ref()));
            }
        }

        Ok(columns
            .iter()
            .zip(data)
            .map(|(name, mut values)| {
                if Self::reconcile(&mut values) {
                    trace!("promoted integers to float in column '{}'", name.as_ref());
                }
                (name.as_ref().to_string(), values)
            })
            .collect())
    }
}
