//! CSV reading and writing

use super::{DataSource, RawRows};
use crate::config::CsvConfig;
use crate::data::data_provider::DataProvider;
use crate::data::datatable::Table;
use anyhow::{bail, Context, Result};
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::debug;

#[derive(Debug, Clone)]
enum Input {
    Path(PathBuf),
    Text(String),
}

/// CSV file or in-memory text with a header row
#[derive(Debug, Clone)]
pub struct CsvSource {
    input: Input,
    delimiter: Option<char>,
    trim: bool,
}

impl CsvSource {
    pub fn from_path(path: impl Into<PathBuf>) -> Self {
        Self::with_input(Input::Path(path.into()))
    }

    pub fn from_text(text: impl Into<String>) -> Self {
        Self::with_input(Input::Text(text.into()))
    }

    fn with_input(input: Input) -> Self {
        let defaults = CsvConfig::default();
        Self {
            input,
            delimiter: defaults.delimiter,
            trim: defaults.trim_leading_space,
        }
    }

    /// Fix the separator instead of detecting it
    pub fn with_delimiter(mut self, delimiter: char) -> Self {
        self.delimiter = Some(delimiter);
        self
    }

    pub fn with_config(mut self, config: &CsvConfig) -> Self {
        self.delimiter = config.delimiter;
        self.trim = config.trim_leading_space;
        self
    }

    fn contents(&self) -> Result<String> {
        match &self.input {
            Input::Path(path) => fs::read_to_string(path)
                .with_context(|| format!("Failed to open CSV file: {:?}", path)),
            Input::Text(text) => Ok(text.clone()),
        }
    }
}

/// `;` when the header line holds more semicolons than commas, else `,`
pub fn detect_delimiter(header_line: &str) -> char {
    let commas = header_line.matches(',').count();
    let semicolons = header_line.matches(';').count();
    if semicolons > commas {
        ';'
    } else {
        ','
    }
}

impl DataSource for CsvSource {
    fn read(&self) -> Result<RawRows> {
        let contents = self.contents()?;
        let Some(header_line) = contents.lines().next() else {
            bail!("csv: empty file");
        };

        let delimiter = self
            .delimiter
            .unwrap_or_else(|| detect_delimiter(header_line));
        if !delimiter.is_ascii() {
            bail!("csv: delimiter {:?} is not a single-byte character", delimiter);
        }

        let mut reader = ::csv::ReaderBuilder::new()
            .has_headers(true)
            .delimiter(delimiter as u8)
            .flexible(true)
            .trim(if self.trim {
                ::csv::Trim::All
            } else {
                ::csv::Trim::None
            })
            .from_reader(contents.as_bytes());

        let columns: Vec<String> = reader
            .headers()
            .context("csv: failed to read header")?
            .iter()
            .map(str::to_string)
            .collect();
        if columns.iter().all(String::is_empty) {
            bail!("csv: no columns found");
        }

        let mut rows = Vec::new();
        for (i, record) in reader.records().enumerate() {
            let record = record.with_context(|| format!("csv: failed to read row {}", i + 1))?;
            rows.push(record.iter().map(str::to_string).collect());
        }

        Ok(RawRows { columns, rows })
    }

    fn describe(&self) -> String {
        match &self.input {
            Input::Path(path) => path.display().to_string(),
            Input::Text(_) => "inline CSV".to_string(),
        }
    }
}

/// Write header and stringified rows to `writer`. Missing cells are empty.
pub fn write_csv_to<W: Write>(provider: &dyn DataProvider, writer: W) -> Result<()> {
    let mut wtr = ::csv::Writer::from_writer(writer);
    wtr.write_record(provider.get_column_names())?;
    for i in 0..provider.get_row_count() {
        if let Some(row) = provider.get_row(i) {
            wtr.write_record(&row)?;
        }
    }
    wtr.flush()?;
    Ok(())
}

/// Write `table` to `path` through a temporary sibling file, so readers
/// never see a partial file
pub fn write_csv(table: &Table, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    if table.column_count() == 0 {
        bail!("csv: table has no columns");
    }
    if table.is_empty() {
        bail!("csv: table has no rows");
    }

    let file_name = path
        .file_name()
        .with_context(|| format!("csv: not a file path: {}", path.display()))?;
    let tmp = path.with_file_name(format!(".{}.tmp", file_name.to_string_lossy()));

    let file = File::create(&tmp)
        .with_context(|| format!("Failed to create temporary file: {}", tmp.display()))?;
    if let Err(e) = write_csv_to(table, file) {
        let _ = fs::remove_file(&tmp);
        return Err(e);
    }
    fs::rename(&tmp, path)
        .with_context(|| format!("Failed to move CSV into place: {}", path.display()))?;

    debug!("wrote {} rows to {}", table.len(), path.display());
    Ok(())
}

impl Table {
    /// Read a CSV file with a header row
    pub fn from_csv(path: impl AsRef<Path>) -> Result<Table> {
        super::load(&CsvSource::from_path(path.as_ref()))
    }
}
