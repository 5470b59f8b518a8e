//! Column projection and row selection
//!
//! All of these return a new table. Projections share column storage with
//! the source; row selections gather fresh vectors.

use crate::data::datatable::{RowView, Table};
use crate::error::{Result, TableError};
use rand::seq::SliceRandom;
use rand::Rng;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use tracing::debug;

/// Rows returned by `first`, `last` and `sample` when no count is given
pub const DEFAULT_PREVIEW_ROWS: usize = 5;

impl Table {
    /// Keep exactly `names`, in that order
    pub fn select<S: AsRef<str>>(&self, names: &[S]) -> Result<Table> {
        if names.is_empty() {
            return Err(TableError::NoColumnsSpecified);
        }

        let mut columns = Vec::with_capacity(names.len());
        let mut data = HashMap::with_capacity(names.len());
        for name in names {
            let name = name.as_ref();
            let values = self
                .data
                .get(name)
                .ok_or_else(|| TableError::unknown_column(name))?;
            if data.insert(name.to_string(), Arc::clone(values)).is_some() {
                return Err(TableError::DuplicateColumn {
                    column: name.to_string(),
                });
            }
            columns.push(name.to_string());
        }

        Ok(Table::from_parts(columns, data, self.length))
    }

    /// Remove `names`, keeping the survivors' order. No names is a plain copy;
    /// dropping every column gives [`Table::new_empty`].
    pub fn drop<S: AsRef<str>>(&self, names: &[S]) -> Result<Table> {
        let mut dropped = HashSet::with_capacity(names.len());
        for name in names {
            let name = name.as_ref();
            if !self.has_column(name) {
                return Err(TableError::unknown_column(name));
            }
            dropped.insert(name);
        }

        let columns: Vec<String> = self
            .columns
            .iter()
            .filter(|c| !dropped.contains(c.as_str()))
            .cloned()
            .collect();
        if columns.is_empty() {
            return Ok(Table::new_empty());
        }
        let data = columns
            .iter()
            .map(|c| (c.clone(), Arc::clone(self.storage(c))))
            .collect();

        Ok(Table::from_parts(columns, data, self.length))
    }

    /// Keep the rows for which `predicate` returns true
    pub fn where_rows<F>(&self, mut predicate: F) -> Table
    where
        F: FnMut(&RowView<'_>) -> bool,
    {
        let indexes: Vec<usize> = self
            .rows()
            .filter(|row| predicate(row))
            .map(|row| row.index())
            .collect();
        debug!("where_rows kept {} of {} rows", indexes.len(), self.length);
        self.fetch_rows(&indexes)
    }

    /// Gather rows by index, in the given order (repeats allowed).
    ///
    /// The first index outside `[0, len)` fails with `IndexOutOfRange`,
    /// reporting its position in `indexes`.
    pub fn select_rows(&self, indexes: &[usize]) -> Result<Table> {
        if let Some((position, &index)) = indexes
            .iter()
            .enumerate()
            .find(|&(_, &i)| i >= self.length)
        {
            return Err(TableError::IndexOutOfRange {
                position,
                index,
                len: self.length,
            });
        }
        Ok(self.fetch_rows(indexes))
    }

    /// Like [`Table::select_rows`], for callers that have checked the indexes.
    ///
    /// # Panics
    /// If any index is out of range.
    pub fn must_select_rows(&self, indexes: &[usize]) -> Table {
        self.select_rows(indexes).unwrap_or_else(|e| panic!("{e}"))
    }

    /// Up to `n` rows from the start (default 5)
    pub fn first(&self, n: Option<usize>) -> Table {
        let n = self.clamp_rows(n);
        let indexes: Vec<usize> = (0..n).collect();
        self.fetch_rows(&indexes)
    }

    /// Up to `n` rows from the end (default 5), in table order
    pub fn last(&self, n: Option<usize>) -> Table {
        let n = self.clamp_rows(n);
        let indexes: Vec<usize> = (self.length - n..self.length).collect();
        self.fetch_rows(&indexes)
    }

    /// Up to `n` rows drawn uniformly without replacement (default 5)
    pub fn sample(&self, n: Option<usize>) -> Table {
        self.sample_with_rng(n, &mut rand::thread_rng())
    }

    /// [`Table::sample`] with a caller-supplied random source
    pub fn sample_with_rng<R: Rng + ?Sized>(&self, n: Option<usize>, rng: &mut R) -> Table {
        let n = self.clamp_rows(n);
        let mut indexes: Vec<usize> = (0..self.length).collect();
        indexes.shuffle(rng);
        indexes.truncate(n);
        self.fetch_rows(&indexes)
    }

    fn clamp_rows(&self, n: Option<usize>) -> usize {
        n.unwrap_or(DEFAULT_PREVIEW_ROWS).min(self.length)
    }

    /// Gather rows without bounds checking; callers validate `indexes`
    pub(crate) fn fetch_rows(&self, indexes: &[usize]) -> Table {
        if indexes.is_empty() {
            return Table::empty_from(self);
        }

        let data = self
            .columns
            .iter()
            .map(|c| {
                let source = self.storage(c);
                let values = indexes.iter().map(|&i| source[i].clone()).collect();
                (c.clone(), Arc::new(values))
            })
            .collect();

        Table::from_parts(self.columns.clone(), data, indexes.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::cell_value::CellValue;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn numbered(n: i64) -> Table {
        Table::with_order(
            vec![
                ("i", (0..n).map(CellValue::Int).collect::<Vec<_>>()),
                ("sq", (0..n).map(|i| CellValue::Int(i * i)).collect::<Vec<_>>()),
            ],
            &["i", "sq"],
        )
        .unwrap()
    }

    fn ints(table: &Table, column: &str) -> Vec<i64> {
        table
            .values(column)
            .unwrap()
            .iter()
            .filter_map(CellValue::as_i64)
            .collect()
    }

    #[test]
    fn test_select_order_and_errors() {
        let t = numbered(3);
        let s = t.select(&["sq", "i"]).unwrap();
        assert_eq!(s.columns(), vec!["sq", "i"]);
        assert_eq!(s.len(), 3);

        let none: &[&str] = &[];
        assert_eq!(t.select(none).unwrap_err(), TableError::NoColumnsSpecified);
        assert!(matches!(
            t.select(&["nope"]).unwrap_err(),
            TableError::UnknownColumn { .. }
        ));
    }

    #[test]
    fn test_drop() {
        let t = numbered(3);
        let d = t.drop(&["i"]).unwrap();
        assert_eq!(d.columns(), vec!["sq"]);

        let none: &[&str] = &[];
        assert_eq!(t.drop(none).unwrap(), t);
        assert!(t.drop(&["nope"]).is_err());
    }

    #[test]
    fn test_drop_every_column_is_empty_table() {
        let t = numbered(3);
        let d = t.drop(&["sq", "i"]).unwrap();
        assert_eq!(d, Table::new_empty());
        assert_eq!(d.len(), 0);
        assert_eq!(d.column_count(), 0);

        let added = d.add_column("c", vec![CellValue::Int(1)]).unwrap();
        assert_eq!(added.len(), 1);
    }

    #[test]
    fn test_where_rows_no_match_is_empty_table() {
        let t = numbered(4);
        let even = t.where_rows(|row| row["i"].as_i64().is_some_and(|i| i % 2 == 0));
        assert_eq!(ints(&even, "i"), vec![0, 2]);

        let none = t.where_rows(|_| false);
        assert_eq!(none.len(), 0);
        assert_eq!(none.columns(), t.columns());
    }

    #[test]
    fn test_select_rows() {
        let t = numbered(3);
        let picked = t.select_rows(&[2, 0, 2]).unwrap();
        assert_eq!(ints(&picked, "sq"), vec![4, 0, 4]);

        assert_eq!(
            t.select_rows(&[0, 5]).unwrap_err(),
            TableError::IndexOutOfRange {
                position: 1,
                index: 5,
                len: 3
            }
        );

        let empty = t.select_rows(&[]).unwrap();
        assert_eq!(empty, Table::empty_from(&t));
    }

    #[test]
    fn test_first_last_clamp() {
        let t = numbered(8);
        assert_eq!(ints(&t.first(None), "i"), vec![0, 1, 2, 3, 4]);
        assert_eq!(ints(&t.first(Some(2)), "i"), vec![0, 1]);
        assert_eq!(ints(&t.last(Some(3)), "i"), vec![5, 6, 7]);
        assert_eq!(t.last(Some(100)).len(), 8);
        assert_eq!(t.first(Some(0)).len(), 0);
    }

    #[test]
    fn test_sample_without_replacement() {
        let t = numbered(10);
        let mut rng = StdRng::seed_from_u64(7);
        let s = t.sample_with_rng(Some(4), &mut rng);
        let mut picked = ints(&s, "i");
        assert_eq!(picked.len(), 4);
        picked.sort();
        picked.dedup();
        assert_eq!(picked.len(), 4);

        // Rows stay aligned across columns
        for row in s.rows() {
            let i = row["i"].as_i64().unwrap();
            assert_eq!(row["sq"], CellValue::Int(i * i));
        }

        assert_eq!(t.sample(Some(50)).len(), 10);
    }
}
