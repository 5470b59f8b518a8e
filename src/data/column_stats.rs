//! Descriptive statistics over a column's numeric cells
//!
//! Only `Int` and `Float` cells take part; booleans, text and missing cells
//! are skipped. A statistic that cannot be computed returns `None`.

use crate::data::cell_value::CellValue;
use crate::data::column::Column;

impl Column {
    pub fn sum(&self) -> Option<f64> {
        let mut sum = 0.0;
        let mut found = false;
        for x in self.numeric_values() {
            sum += x;
            found = true;
        }
        found.then_some(sum)
    }

    pub fn mean(&self) -> Option<f64> {
        let (sum, count) = self
            .numeric_values()
            .fold((0.0, 0usize), |(sum, count), x| (sum + x, count + 1));
        if count == 0 {
            return None;
        }
        Some(sum / count as f64)
    }

    /// Smallest numeric value; ties keep the earlier one
    pub fn min(&self) -> Option<f64> {
        self.numeric_values().fold(None, |min, x| match min {
            Some(m) if x < m => Some(x),
            None => Some(x),
            kept => kept,
        })
    }

    /// Largest numeric value; ties keep the earlier one
    pub fn max(&self) -> Option<f64> {
        self.numeric_values().fold(None, |max, x| match max {
            Some(m) if x > m => Some(x),
            None => Some(x),
            kept => kept,
        })
    }

    /// Sample standard deviation (denominator `n - 1`), needs two values
    pub fn std(&self) -> Option<f64> {
        let values: Vec<f64> = self.numeric_values().collect();
        let n = values.len();
        if n < 2 {
            return None;
        }

        let mean = values.iter().sum::<f64>() / n as f64;
        let sum_sq: f64 = values.iter().map(|x| (x - mean) * (x - mean)).sum();
        Some((sum_sq / (n - 1) as f64).sqrt())
    }

    /// Quantile by linear interpolation at index `q * (n - 1)` of the
    /// sorted numeric values. `q` outside `[0, 1]` yields `None`.
    pub fn quantile(&self, q: f64) -> Option<f64> {
        if !(0.0..=1.0).contains(&q) {
            return None;
        }

        let mut values: Vec<f64> = self.numeric_values().collect();
        if values.is_empty() {
            return None;
        }
        values.sort_by(|a, b| a.total_cmp(b));

        let pos = q * (values.len() - 1) as f64;
        let lower = pos.floor() as usize;
        let upper = pos.ceil() as usize;
        if lower == upper {
            return Some(values[lower]);
        }

        let frac = pos - lower as f64;
        Some(values[lower] + (values[upper] - values[lower]) * frac)
    }

    pub fn median(&self) -> Option<f64> {
        self.quantile(0.5)
    }

    pub fn q1(&self) -> Option<f64> {
        self.quantile(0.25)
    }

    pub fn q3(&self) -> Option<f64> {
        self.quantile(0.75)
    }

    /// Number of present cells; missing cells and empty text are excluded
    pub fn count(&self) -> usize {
        self.values().iter().filter(|v| !v.is_missing()).count()
    }

    pub fn missing(&self) -> usize {
        self.len() - self.count()
    }

    /// At least one `Int` or `Float` cell
    pub fn is_numeric(&self) -> bool {
        self.values().iter().any(CellValue::is_numeric)
    }
}
