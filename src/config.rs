use crate::error::{CountriesError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const DEFAULT_COLUMN: &str = "country";

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    pub extraction: ExtractionConfig,
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ExtractionConfig {
    pub column: String,
    pub delimiter: char,
    pub trim: bool,
    pub skip_empty: bool,
    pub order: ValueOrder,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct OutputConfig {
    pub show_summary: bool,
}

/// Order in which distinct values are returned.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ValueOrder {
    /// Order of first appearance in the file
    #[default]
    FirstSeen,
    /// Lexicographic order
    Sorted,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            column: DEFAULT_COLUMN.to_string(),
            delimiter: ',',
            trim: false,
            skip_empty: false,
            order: ValueOrder::FirstSeen,
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self { show_summary: true }
    }
}

impl Config {
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        if !path.exists() {
            return Err(CountriesError::Config {
                message: format!("Configuration file not found: {}", path.display()),
            });
        }

        let content = std::fs::read_to_string(path).map_err(|e| CountriesError::Config {
            message: format!("Failed to read config file {}: {}", path.display(), e),
        })?;

        let config: Config = toml::from_str(&content).map_err(|e| CountriesError::Config {
            message: format!("Failed to parse config file {}: {}", path.display(), e),
        })?;

        Ok(config)
    }

    pub fn load_with_defaults<P: AsRef<Path>>(config_path: Option<P>) -> Result<Self> {
        match config_path {
            Some(path) => Self::load_from_file(path),
            None => {
                let default_paths = ["countries.toml", ".countries.toml"];

                for default_path in &default_paths {
                    if Path::new(default_path).exists() {
                        log::debug!("using configuration file {}", default_path);
                        return Self::load_from_file(default_path);
                    }
                }

                Ok(Self::default())
            }
        }
    }

    pub fn merge_with_cli_args(&mut self, cli_args: &CliOverrides) {
        if let Some(ref column) = cli_args.column {
            self.extraction.column = column.clone();
        }

        if let Some(delimiter) = cli_args.delimiter {
            self.extraction.delimiter = delimiter;
        }

        if let Some(order) = cli_args.order {
            self.extraction.order = order;
        }

        if let Some(trim) = cli_args.trim {
            self.extraction.trim = trim;
        }

        if let Some(skip_empty) = cli_args.skip_empty {
            self.extraction.skip_empty = skip_empty;
        }
    }

    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let content = toml::to_string_pretty(self).map_err(|e| CountriesError::Config {
            message: format!("Failed to serialize config: {}", e),
        })?;

        std::fs::write(path, content).map_err(|e| CountriesError::Config {
            message: format!("Failed to write config file {}: {}", path.display(), e),
        })?;

        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        if self.extraction.column.is_empty() {
            return Err(CountriesError::Config {
                message: "Column name must not be empty".to_string(),
            });
        }

        self.delimiter_byte()?;

        Ok(())
    }

    /// The delimiter as the single byte the CSV reader expects.
    pub fn delimiter_byte(&self) -> Result<u8> {
        delimiter_to_byte(self.extraction.delimiter).map_err(|message| CountriesError::Config {
            message,
        })
    }
}

pub(crate) fn delimiter_to_byte(c: char) -> std::result::Result<u8, String> {
    if !c.is_ascii() {
        return Err(format!("Delimiter must be a single ASCII character, got '{}'", c));
    }
    if matches!(c, '"' | '\n' | '\r') {
        return Err(format!("Delimiter cannot be {:?}", c));
    }
    Ok(c as u8)
}

#[derive(Debug, Default)]
pub struct CliOverrides {
    pub column: Option<String>,
    pub delimiter: Option<char>,
    pub order: Option<ValueOrder>,
    pub trim: Option<bool>,
    pub skip_empty: Option<bool>,
}

impl CliOverrides {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_column(mut self, column: Option<String>) -> Self {
        self.column = column;
        self
    }

    pub fn with_delimiter(mut self, delimiter: Option<char>) -> Self {
        self.delimiter = delimiter;
        self
    }

    pub fn with_order(mut self, order: Option<ValueOrder>) -> Self {
        self.order = order;
        self
    }

    pub fn with_trim(mut self, trim: Option<bool>) -> Self {
        self.trim = trim;
        self
    }

    pub fn with_skip_empty(mut self, skip_empty: Option<bool>) -> Self {
        self.skip_empty = skip_empty;
        self
    }
}
