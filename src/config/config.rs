use crate::data::datatable::Table;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub display: DisplayConfig,
    pub preview: PreviewConfig,
    pub csv: CsvConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    /// Digits after the decimal point for float cells
    pub float_precision: usize,

    /// Rows rendered before the output is cut off; all rows when unset
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_rows: Option<usize>,

    /// Text shown for missing cells
    pub null_marker: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PreviewConfig {
    /// Rows returned by `first`, `last` and `sample` when no count is given
    pub default_rows: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CsvConfig {
    /// Field separator; detected from the header line when unset
    #[serde(skip_serializing_if = "Option::is_none")]
    pub delimiter: Option<char>,

    pub trim_leading_space: bool,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            float_precision: 2,
            max_rows: None,
            null_marker: String::new(),
        }
    }
}

impl Default for PreviewConfig {
    fn default() -> Self {
        Self {
            default_rows: crate::data::selection::DEFAULT_PREVIEW_ROWS,
        }
    }
}

impl Default for CsvConfig {
    fn default() -> Self {
        Self {
            delimiter: None,
            trim_leading_space: true,
        }
    }
}

impl PreviewConfig {
    fn rows(&self, n: Option<usize>) -> Option<usize> {
        Some(n.unwrap_or(self.default_rows))
    }

    pub fn first(&self, table: &Table, n: Option<usize>) -> Table {
        table.first(self.rows(n))
    }

    pub fn last(&self, table: &Table, n: Option<usize>) -> Table {
        table.last(self.rows(n))
    }

    pub fn sample(&self, table: &Table, n: Option<usize>) -> Table {
        table.sample(self.rows(n))
    }
}

impl Config {
    pub fn from_toml_str(contents: &str) -> Result<Self> {
        toml::from_str(contents).context("Failed to parse configuration")
    }

    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string_pretty(self).context("Failed to serialize configuration")
    }

    /// Load config from `path`
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        Self::from_toml_str(&contents)
            .with_context(|| format!("Invalid config file: {}", path.display()))
    }

    /// Load config from the default location, falling back to defaults when
    /// no file exists there
    pub fn load_or_default() -> Result<Self> {
        Self::load_or_default_from(Self::default_path()?)
    }

    /// Load config from `path`, or defaults if nothing is there
    pub fn load_or_default_from(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Ok(Self::default());
        }
        Self::load(path)
    }

    /// Write config to `path`, creating parent directories
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, self.to_toml_string()?)
            .with_context(|| format!("Failed to write config file: {}", path.display()))
    }

    /// `<config dir>/tablekit/config.toml`
    pub fn default_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?;

        Ok(config_dir.join("tablekit").join("config.toml"))
    }

    /// Default config file with comments
    pub fn create_default_with_comments() -> String {
        r#"# tablekit configuration
# Location: ~/.config/tablekit/config.toml (Linux)

[display]
# Digits after the decimal point for float cells
float_precision = 2
# Uncomment to cut rendered tables off after this many rows
# max_rows = 50
# Text shown for missing cells
null_marker = ""

[preview]
# Rows returned by first/last/sample when no count is given
default_rows = 5

[csv]
# Field separator; detected from the header line when unset
# delimiter = ";"
trim_leading_space = true
"#
        .to_string()
    }
}
