//! JSON records: arrays of objects, one object per row

use crate::data::cell_value::CellValue;
use crate::data::datatable::Table;
use crate::data::type_inference::TypeInference;
use crate::error::TableError;
use anyhow::{Context, Result};
use serde_json::{Map, Number, Value};

/// JSON form of one cell. Non-finite floats become `null`.
pub fn cell_to_json(value: &CellValue) -> Value {
    match value {
        CellValue::Missing => Value::Null,
        CellValue::Bool(b) => Value::Bool(*b),
        CellValue::Int(i) => Value::Number((*i).into()),
        CellValue::Float(f) => Number::from_f64(*f).map_or(Value::Null, Value::Number),
        CellValue::Text(s) => Value::String(s.clone()),
    }
}

/// Typed cell from a JSON scalar. Nested arrays and objects are kept as
/// their JSON text.
pub fn json_to_cell(value: &Value) -> CellValue {
    match value {
        Value::Null => CellValue::Missing,
        Value::Bool(b) => CellValue::Bool(*b),
        Value::Number(n) => match n.as_i64() {
            Some(i) => CellValue::Int(i),
            None => n.as_f64().map_or(CellValue::Missing, CellValue::Float),
        },
        Value::String(s) => CellValue::Text(s.clone()),
        other => CellValue::Text(other.to_string()),
    }
}

/// One object per row, keys in column order
pub fn to_records(table: &Table) -> Value {
    let records = table
        .rows()
        .map(|row| {
            let object: Map<String, Value> = row
                .columns()
                .iter()
                .map(|c| (c.clone(), cell_to_json(&row[c.as_str()])))
                .collect();
            Value::Object(object)
        })
        .collect();
    Value::Array(records)
}

/// Build a table from JSON objects.
///
/// `order` fixes the columns; when empty, the keys of the first object are
/// used. Absent keys become missing cells. Integer cells are promoted in
/// columns that also hold floats.
pub fn from_records<S: AsRef<str>>(records: &[Value], order: &[S]) -> Result<Table> {
    let first = records.first().ok_or(TableError::EmptyInput)?;
    let columns: Vec<String> = if order.is_empty() {
        first
            .as_object()
            .context("JSON data must be an array of objects")?
            .keys()
            .cloned()
            .collect()
    } else {
        order.iter().map(|c| c.as_ref().to_string()).collect()
    };

    let mut data: Vec<Vec<CellValue>> = vec![Vec::with_capacity(records.len()); columns.len()];
    for (i, record) in records.iter().enumerate() {
        let object = record
            .as_object()
            .with_context(|| format!("JSON record {} is not an object", i + 1))?;
        for (cells, name) in data.iter_mut().zip(&columns) {
            cells.push(object.get(name).map_or(CellValue::Missing, json_to_cell));
        }
    }

    for cells in &mut data {
        TypeInference::reconcile(cells);
    }

    Ok(Table::with_order(columns.iter().cloned().zip(data), &columns)?)
}

/// Parse a JSON array of objects from text
pub fn from_json_str(text: &str) -> Result<Table> {
    let records: Vec<Value> = serde_json::from_str(text).context("Failed to parse JSON records")?;
    let order: &[&str] = &[];
    from_records(&records, order)
}

impl Table {
    /// Serialize as a JSON array of objects
    pub fn to_json_string(&self) -> Result<String> {
        serde_json::to_string_pretty(&to_records(self)).context("Failed to serialize table")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_to_records_keeps_column_order() {
        let t = Table::with_order(
            vec![
                ("b", vec![CellValue::Int(1), CellValue::Missing]),
                ("a", vec![CellValue::Float(f64::NAN), CellValue::text("x")]),
            ],
            &["b", "a"],
        )
        .unwrap();

        let records = to_records(&t);
        assert_eq!(records, json!([{"b": 1, "a": null}, {"b": null, "a": "x"}]));
        let keys: Vec<&String> = records[0].as_object().unwrap().keys().collect();
        assert_eq!(keys, vec!["b", "a"]);
    }

    #[test]
    fn test_from_records_types_and_promotion() {
        let records = vec![
            json!({"id": 1, "score": 2, "ok": true, "tags": ["a"]}),
            json!({"id": 2, "score": 2.5, "ok": null}),
        ];
        let t = from_records(&records, &["id", "score", "ok", "tags"]).unwrap();
        assert_eq!(t.values("id").unwrap(), &[CellValue::Int(1), CellValue::Int(2)]);
        assert_eq!(
            t.values("score").unwrap(),
            &[CellValue::Float(2.0), CellValue::Float(2.5)]
        );
        assert_eq!(t.values("ok").unwrap()[1], CellValue::Missing);
        assert_eq!(t.values("tags").unwrap()[0], CellValue::text("[\"a\"]"));
        assert_eq!(t.values("tags").unwrap()[1], CellValue::Missing);
    }

    #[test]
    fn test_from_records_errors() {
        let none: &[&str] = &[];
        let err = from_records(&[], none).unwrap_err();
        assert_eq!(err.downcast_ref::<TableError>(), Some(&TableError::EmptyInput));
        assert!(from_records(&[json!(1)], none).is_err());
        assert!(from_json_str("not json").is_err());
    }

    #[test]
    fn test_json_text_round_trip() {
        let t = from_json_str(r#"[{"name": "ann", "age": 30}, {"name": "bob", "age": 41}]"#).unwrap();
        assert_eq!(t.columns(), vec!["name", "age"]);
        let back = from_json_str(&t.to_json_string().unwrap()).unwrap();
        assert_eq!(back, t);
    }
}
