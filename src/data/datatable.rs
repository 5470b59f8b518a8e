use crate::data::cell_value::CellValue;
use crate::data::column::Column;
use crate::data::type_inference::TypeInference;
use crate::error::{Result, TableError};
use std::collections::HashMap;
use std::ops::Index;
use std::sync::Arc;
use tracing::debug;

/// An in-memory, column-oriented table
///
/// The column list is the single source of truth for ordering; the map is
/// only used for lookup. Column storage is reference counted, so cloning a
/// table or projecting columns does not copy cells. Every operation other
/// than [`Table::replace_column`] returns a new table.
#[derive(Debug, Clone)]
pub struct Table {
    pub(crate) columns: Vec<String>,
    pub(crate) data: HashMap<String, Arc<Vec<CellValue>>>,
    pub(crate) length: usize,
}

impl Table {
    /// Build a table from `(name, values)` pairs, keeping the pairs'
    /// iteration order as column order.
    ///
    /// Pass an ordered collection (a `Vec` of pairs) for a deterministic
    /// layout; a `HashMap` gives whatever order it iterates in. Use
    /// [`Table::with_order`] to pin the order explicitly.
    pub fn new<I, K>(data: I) -> Result<Self>
    where
        I: IntoIterator<Item = (K, Vec<CellValue>)>,
        K: Into<String>,
    {
        let mut columns = Vec::new();
        let mut map = HashMap::new();
        let mut length: Option<usize> = None;

        for (name, values) in data {
            let name = name.into();
            let expected = *length.get_or_insert(values.len());
            if values.len() != expected {
                return Err(TableError::LengthMismatch {
                    column: name,
                    expected,
                    actual: values.len(),
                });
            }
            if map.contains_key(&name) {
                return Err(TableError::DuplicateColumn { column: name });
            }
            columns.push(name.clone());
            map.insert(name, Arc::new(values));
        }

        let length = length.ok_or(TableError::EmptyInput)?;
        debug!(
            "created table with {} columns and {} rows",
            columns.len(),
            length
        );

        Ok(Self {
            columns,
            data: map,
            length,
        })
    }

    /// Build a table using `order` as the column order.
    ///
    /// Every name in `order` must be present in `data`; entries of `data`
    /// not named in `order` are dropped. A name repeated in `data` fails with
    /// `DuplicateColumn`, as in [`Table::new`].
    pub fn with_order<I, K, S>(data: I, order: &[S]) -> Result<Self>
    where
        I: IntoIterator<Item = (K, Vec<CellValue>)>,
        K: Into<String>,
        S: AsRef<str>,
    {
        let mut source: HashMap<String, Vec<CellValue>> = HashMap::new();
        for (name, values) in data {
            let name = name.into();
            if source.contains_key(&name) {
                return Err(TableError::DuplicateColumn { column: name });
            }
            source.insert(name, values);
        }

        if source.is_empty() {
            return Err(TableError::EmptyInput);
        }
        if order.is_empty() {
            return Err(TableError::NoColumnsSpecified);
        }

        let mut columns = Vec::with_capacity(order.len());
        let mut map = HashMap::with_capacity(order.len());
        let mut length: Option<usize> = None;

        for name in order {
            let name = name.as_ref();
            if map.contains_key(name) {
                return Err(TableError::DuplicateColumn {
                    column: name.to_string(),
                });
            }
            let values = source
                .remove(name)
                .ok_or_else(|| TableError::unknown_column(name))?;

            let expected = *length.get_or_insert(values.len());
            if values.len() != expected {
                return Err(TableError::LengthMismatch {
                    column: name.to_string(),
                    expected,
                    actual: values.len(),
                });
            }

            columns.push(name.to_string());
            map.insert(name.to_string(), Arc::new(values));
        }

        if !source.is_empty() {
            debug!("dropped {} columns absent from the column order", source.len());
        }

        Ok(Self {
            columns,
            data: map,
            length: length.unwrap_or(0),
        })
    }

    /// Infer cell types from raw text rows and build the table.
    ///
    /// This is the entry point for every row-oriented source: `columns`
    /// fixes the column order, each row must have one token per column.
    pub fn from_rows<C, R, S>(columns: &[C], rows: &[R]) -> Result<Self>
    where
        C: AsRef<str>,
        R: AsRef<[S]>,
        S: AsRef<str>,
    {
        if columns.is_empty() {
            return Err(TableError::EmptyInput);
        }
        let parsed = TypeInference::parse_rows(columns, rows)?;
        Self::with_order(parsed, columns)
    }

    /// A table with no columns and no rows
    pub fn new_empty() -> Self {
        Self {
            columns: Vec::new(),
            data: HashMap::new(),
            length: 0,
        }
    }

    /// Same columns as `table`, zero rows
    pub fn empty_from(table: &Table) -> Self {
        Self {
            columns: table.columns.clone(),
            data: table
                .columns
                .iter()
                .map(|c| (c.clone(), Arc::new(Vec::new())))
                .collect(),
            length: 0,
        }
    }

    /// Assemble a table from parts that already satisfy the invariants
    pub(crate) fn from_parts(
        columns: Vec<String>,
        data: HashMap<String, Arc<Vec<CellValue>>>,
        length: usize,
    ) -> Self {
        debug_assert!(columns.iter().all(|c| data[c].len() == length));
        debug_assert_eq!(columns.len(), data.len());
        Self {
            columns,
            data,
            length,
        }
    }

    /// Column names in order
    pub fn columns(&self) -> Vec<String> {
        self.columns.clone()
    }

    pub fn column_names(&self) -> &[String] {
        &self.columns
    }

    /// Number of rows
    pub fn len(&self) -> usize {
        self.length
    }

    pub fn is_empty(&self) -> bool {
        self.length == 0
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.data.contains_key(name)
    }

    pub fn column_index(&self, name: &str) -> Result<usize> {
        self.columns
            .iter()
            .position(|c| c == name)
            .ok_or_else(|| TableError::unknown_column(name))
    }

    /// Like [`Table::column_index`], for callers that know the column exists.
    ///
    /// # Panics
    /// If the column is absent.
    pub fn must_column_index(&self, name: &str) -> usize {
        self.column_index(name).unwrap_or_else(|e| panic!("{e}"))
    }

    /// Look up a column by name. The column shares this table's storage.
    pub fn col(&self, name: &str) -> Result<Column> {
        self.data
            .get(name)
            .map(|values| Column::from_shared(name, Arc::clone(values)))
            .ok_or_else(|| TableError::unknown_column(name))
    }

    /// Like [`Table::col`], for callers that know the column exists.
    ///
    /// # Panics
    /// If the column is absent.
    pub fn must_col(&self, name: &str) -> Column {
        self.col(name).unwrap_or_else(|e| panic!("{e}"))
    }

    /// Raw cells of a column
    pub fn values(&self, name: &str) -> Result<&[CellValue]> {
        self.data
            .get(name)
            .map(|v| v.as_slice())
            .ok_or_else(|| TableError::unknown_column(name))
    }

    pub fn cell(&self, row: usize, name: &str) -> Option<&CellValue> {
        self.data.get(name)?.get(row)
    }

    pub fn row(&self, index: usize) -> Option<RowView<'_>> {
        (index < self.length).then_some(RowView { table: self, index })
    }

    pub fn rows(&self) -> impl Iterator<Item = RowView<'_>> + '_ {
        (0..self.length).map(move |index| RowView { table: self, index })
    }

    /// Stringified cells of one row in column order; missing cells are empty
    pub fn row_as_strings(&self, index: usize) -> Option<Vec<String>> {
        if index >= self.length {
            return None;
        }
        Some(
            self.columns
                .iter()
                .map(|c| self.data[c][index].to_string())
                .collect(),
        )
    }

    pub(crate) fn storage(&self, name: &str) -> &Arc<Vec<CellValue>> {
        &self.data[name]
    }
}

impl PartialEq for Table {
    fn eq(&self, other: &Self) -> bool {
        self.length == other.length
            && self.columns == other.columns
            && self
                .columns
                .iter()
                .all(|c| self.data[c] == other.data[c])
    }
}

/// Read-only view of one row, addressed by column name
#[derive(Debug, Clone, Copy)]
pub struct RowView<'a> {
    table: &'a Table,
    index: usize,
}

impl<'a> RowView<'a> {
    pub fn get(&self, column: &str) -> Option<&'a CellValue> {
        self.table.cell(self.index, column)
    }

    /// Position of this row in its table
    pub fn index(&self) -> usize {
        self.index
    }

    pub fn columns(&self) -> &'a [String] {
        &self.table.columns
    }
}

impl<'a> Index<&str> for RowView<'a> {
    type Output = CellValue;

    /// # Panics
    /// If the column is absent.
    fn index(&self, column: &str) -> &Self::Output {
        self.get(column)
            .unwrap_or_else(|| panic!("column '{}' not found", column))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Table {
        Table::from_rows(&["id", "score"], &[vec!["1", "10.5"], vec!["2", "20"]]).unwrap()
    }

    #[test]
    fn test_new_keeps_pair_order() {
        let table = Table::new(vec![
            ("b", vec![CellValue::Int(1)]),
            ("a", vec![CellValue::Int(2)]),
        ])
        .unwrap();
        assert_eq!(table.columns(), vec!["b", "a"]);
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn test_new_rejects_empty_input() {
        let data: Vec<(String, Vec<CellValue>)> = Vec::new();
        assert_eq!(Table::new(data).unwrap_err(), TableError::EmptyInput);
    }

    #[test]
    fn test_new_length_mismatch() {
        let err = Table::new(vec![
            ("a", vec![CellValue::Int(1), CellValue::Int(2)]),
            ("b", vec![CellValue::Int(1)]),
        ])
        .unwrap_err();
        assert_eq!(
            err,
            TableError::LengthMismatch {
                column: "b".to_string(),
                expected: 2,
                actual: 1
            }
        );
    }

    #[test]
    fn test_with_order_drops_unlisted_and_rejects_unknown() {
        let data = || {
            vec![
                ("a", vec![CellValue::Int(1)]),
                ("b", vec![CellValue::Int(2)]),
                ("c", vec![CellValue::Int(3)]),
            ]
        };

        let table = Table::with_order(data(), &["c", "a"]).unwrap();
        assert_eq!(table.columns(), vec!["c", "a"]);
        assert!(!table.has_column("b"));

        assert_eq!(
            Table::with_order(data(), &["a", "zzz"]).unwrap_err(),
            TableError::UnknownColumn {
                column: "zzz".to_string()
            }
        );
    }

    #[test]
    fn test_with_order_rejects_repeated_input_name() {
        let data = vec![
            ("a", vec![CellValue::Int(1)]),
            ("a", vec![CellValue::Int(2), CellValue::Int(3)]),
        ];
        assert_eq!(
            Table::with_order(data.clone(), &["a"]).unwrap_err(),
            TableError::DuplicateColumn {
                column: "a".to_string()
            }
        );
        assert_eq!(
            Table::new(data).unwrap_err(),
            TableError::DuplicateColumn {
                column: "a".to_string()
            }
        );

        // Repeats outside the order are still an error
        let unlisted = vec![
            ("a", vec![CellValue::Int(1)]),
            ("b", vec![CellValue::Int(2)]),
            ("b", vec![CellValue::Int(3)]),
        ];
        assert!(matches!(
            Table::with_order(unlisted, &["a"]),
            Err(TableError::DuplicateColumn { .. })
        ));
    }

    #[test]
    fn test_empty_constructors() {
        let empty = Table::new_empty();
        assert_eq!(empty.len(), 0);
        assert!(empty.columns().is_empty());

        let t = sample();
        let shaped = Table::empty_from(&t);
        assert_eq!(shaped.columns(), t.columns());
        assert_eq!(shaped.len(), 0);
        assert_eq!(shaped.values("id").unwrap().len(), 0);
    }

    #[test]
    fn test_lookup() {
        let t = sample();
        assert_eq!(t.column_index("score").unwrap(), 1);
        assert_eq!(t.must_column_index("id"), 0);
        assert!(t.column_index("nope").is_err());
        assert_eq!(t.col("id").unwrap().values(), &[CellValue::Int(1), CellValue::Int(2)]);
        assert_eq!(t.row_as_strings(1).unwrap(), vec!["2", "20"]);
        assert_eq!(t.row_as_strings(2), None);
    }

    #[test]
    #[should_panic(expected = "column 'nope' not found")]
    fn test_must_col_panics() {
        sample().must_col("nope");
    }

    #[test]
    fn test_row_view() {
        let t = sample();
        let row = t.row(1).unwrap();
        assert_eq!(row["id"], CellValue::Int(2));
        assert_eq!(row.get("missing"), None);
        assert_eq!(t.rows().count(), 2);
    }
}
