use std::fs;
use tablekit::config::CsvConfig;
use tablekit::io::csv::{write_csv, CsvSource};
use tablekit::io::{load, DataSource};
use tablekit::{CellValue, Table, TableError};
use tempfile::TempDir;

fn write_file(dir: &TempDir, name: &str, contents: &str) -> std::path::PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, contents).unwrap();
    path
}

#[test]
fn test_load_csv_file() {
    let dir = TempDir::new().unwrap();
    let path = write_file(
        &dir,
        "people.csv",
        "name, age, active, height\nann, 31, true, 1.62\nbob, , FALSE, 1.8\n",
    );

    let table = Table::from_csv(&path).unwrap();
    assert_eq!(table.columns(), vec!["name", "age", "active", "height"]);
    assert_eq!(table.len(), 2);
    assert_eq!(table.values("age").unwrap()[0], CellValue::Int(31));
    assert!(table.values("age").unwrap()[1].is_missing());
    assert_eq!(table.values("active").unwrap()[1], CellValue::Bool(false));
    assert_eq!(table.values("height").unwrap()[1], CellValue::Float(1.8));
}

#[test]
fn test_semicolon_file_is_detected() {
    let dir = TempDir::new().unwrap();
    let path = write_file(&dir, "eu.csv", "city;temp\nOslo;-3\nRome;14\n");
    let table = load(&CsvSource::from_path(&path)).unwrap();
    assert_eq!(table.col("temp").unwrap().sum(), Some(11.0));
}

#[test]
fn test_delimiter_from_config() {
    let config = CsvConfig {
        delimiter: Some('\t'),
        ..CsvConfig::default()
    };
    let raw = CsvSource::from_text("a\tb\n1\t2\n")
        .with_config(&config)
        .read()
        .unwrap();
    assert_eq!(raw.columns, vec!["a", "b"]);
    assert_eq!(raw.rows, vec![vec!["1", "2"]]);
}

#[test]
fn test_missing_and_empty_files() {
    let dir = TempDir::new().unwrap();
    assert!(Table::from_csv(dir.path().join("absent.csv")).is_err());

    let empty = write_file(&dir, "empty.csv", "");
    let err = Table::from_csv(&empty).unwrap_err();
    assert!(err.to_string().contains("empty"));
}

#[test]
fn test_ragged_file_reports_row() {
    let dir = TempDir::new().unwrap();
    let path = write_file(&dir, "ragged.csv", "a,b\n1,2\n3,4,5\n");
    let err = Table::from_csv(&path).unwrap_err();
    assert_eq!(
        err.downcast_ref::<TableError>(),
        Some(&TableError::RowLengthMismatch {
            row: 2,
            got: 3,
            expected: 2
        })
    );
}

#[test]
fn test_write_then_read_back() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("out.csv");
    let table = Table::with_order(
        vec![
            ("id", vec![1.into(), 2.into()]),
            ("note", vec!["a, b".into(), CellValue::Missing]),
            ("score", vec![0.5.into(), 2.0.into()]),
        ],
        &["id", "note", "score"],
    )
    .unwrap();

    write_csv(&table, &path).unwrap();
    let written = fs::read_to_string(&path).unwrap();
    assert_eq!(written, "id,note,score\n1,\"a, b\",0.5\n2,,2\n");

    let back = Table::from_csv(&path).unwrap();
    assert_eq!(back.values("id").unwrap(), table.values("id").unwrap());
    assert_eq!(back.values("score").unwrap(), table.values("score").unwrap());

    let leftovers: Vec<_> = fs::read_dir(dir.path()).unwrap().collect();
    assert_eq!(leftovers.len(), 1);
}

#[test]
fn test_write_rejects_empty_tables() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("out.csv");
    assert!(write_csv(&Table::new_empty(), &path).is_err());

    let shaped = Table::empty_from(&Table::new(vec![("a", vec![1.into()])]).unwrap());
    assert!(write_csv(&shaped, &path).is_err());
    assert!(!path.exists());
}
