use thiserror::Error;

#[derive(Error, Debug)]
pub enum CountriesError {
    #[error("File not found or unreadable: {path}")]
    FileNotFound {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed input in {path}: {message}")]
    MalformedInput {
        path: String,
        line: Option<u64>,
        message: String,
    },

    #[error("Column '{column}' not found in {path}")]
    MissingColumn {
        column: String,
        path: String,
        available: Vec<String>,
    },

    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("IO operation failed: {0}")]
    Io(#[from] std::io::Error),
}

pub trait UserFriendlyError {
    fn user_message(&self) -> String;
    fn suggestion(&self) -> Option<String>;
}

impl UserFriendlyError for CountriesError {
    fn user_message(&self) -> String {
        match self {
            CountriesError::FileNotFound { path, source } => {
                format!("Cannot read file {}: {}", path, source)
            }
            CountriesError::MalformedInput {
                path,
                line: Some(line),
                message,
            } => {
                format!("Could not parse {} (line {}): {}", path, line, message)
            }
            CountriesError::MalformedInput { path, message, .. } => {
                format!("Could not parse {}: {}", path, message)
            }
            CountriesError::MissingColumn {
                column,
                path,
                available,
            } => {
                if available.is_empty() {
                    format!("Column '{}' not found: {} has no header row", column, path)
                } else {
                    format!(
                        "Column '{}' not found in {}. Available columns: {}",
                        column,
                        path,
                        available.join(", ")
                    )
                }
            }
            CountriesError::Config { message } => {
                format!("Configuration error: {}", message)
            }
            _ => self.to_string(),
        }
    }

    fn suggestion(&self) -> Option<String> {
        match self {
            CountriesError::FileNotFound { .. } => Some(
                "Check the path and make sure the file exists and is readable.".to_string()
            ),
            CountriesError::MalformedInput { .. } => Some(
                "Make sure every row has the same number of fields as the header and the file is UTF-8 encoded. Use --delimiter if the file is not comma-separated.".to_string()
            ),
            CountriesError::MissingColumn { .. } => Some(
                "Use --column to select a different column, or --trim if the header contains padding.".to_string()
            ),
            CountriesError::Config { .. } => Some(
                "Check your configuration file syntax and ensure all values are valid.".to_string()
            ),
            _ => None,
        }
    }
}

impl From<toml::de::Error> for CountriesError {
    fn from(error: toml::de::Error) -> Self {
        CountriesError::Config {
            message: error.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, CountriesError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    #[test]
    fn test_missing_column_lists_available_headers() {
        let error = CountriesError::MissingColumn {
            column: "country".to_string(),
            path: "data.csv".to_string(),
            available: vec!["name".to_string(), "city".to_string()],
        };
        let message = error.user_message();
        assert!(message.contains("'country'"));
        assert!(message.contains("name, city"));
        assert!(error.suggestion().is_some());
    }

    #[test]
    fn test_missing_column_without_header() {
        let error = CountriesError::MissingColumn {
            column: "country".to_string(),
            path: "empty.csv".to_string(),
            available: Vec::new(),
        };
        assert!(error.user_message().contains("no header row"));
    }

    #[test]
    fn test_malformed_input_mentions_line() {
        let error = CountriesError::MalformedInput {
            path: "data.csv".to_string(),
            line: Some(3),
            message: "found record with 3 fields, but the previous record has 2 fields".to_string(),
        };
        assert!(error.user_message().contains("line 3"));
    }

    #[test]
    fn test_file_not_found_keeps_source() {
        let error = CountriesError::FileNotFound {
            path: "missing.csv".to_string(),
            source: io::Error::new(io::ErrorKind::NotFound, "No such file or directory"),
        };
        assert!(std::error::Error::source(&error).is_some());
        assert!(error.user_message().contains("missing.csv"));
    }

    #[test]
    fn test_toml_error_conversion() {
        let toml_error = toml::from_str::<toml::Value>("not = = valid").unwrap_err();
        let error = CountriesError::from(toml_error);
        assert!(matches!(error, CountriesError::Config { .. }));
    }
}
