use crate::config::{ExtractionConfig, ValueOrder, DEFAULT_COLUMN};
use crate::error::{CountriesError, Result};
use crate::extractor::ExtractionReport;
use chrono::Utc;
use csv::{ErrorKind, ReaderBuilder, Trim};
use std::collections::HashSet;
use std::io::Read;
use std::path::Path;
use std::time::Instant;

const UTF8_BOM: &[u8] = b"\xef\xbb\xbf";
const READER_SOURCE: &str = "<reader>";

/// Loads a delimited file into memory and collects the distinct values of
/// one column.
#[derive(Debug, Clone)]
pub struct CountryExtractor {
    column: String,
    delimiter: u8,
    trim: bool,
    skip_empty: bool,
    order: ValueOrder,
}

/// Outcome of scanning one loaded file.
#[derive(Debug, Clone, Default)]
struct ColumnScan {
    values: Vec<String>,
    rows_scanned: usize,
    empty_skipped: usize,
}

impl Default for CountryExtractor {
    fn default() -> Self {
        Self {
            column: DEFAULT_COLUMN.to_string(),
            delimiter: b',',
            trim: false,
            skip_empty: false,
            order: ValueOrder::FirstSeen,
        }
    }
}

impl CountryExtractor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build an extractor from validated configuration.
    pub fn from_config(config: &ExtractionConfig) -> Result<Self> {
        let delimiter = crate::config::delimiter_to_byte(config.delimiter)
            .map_err(|message| CountriesError::Config { message })?;

        Ok(Self {
            column: config.column.clone(),
            delimiter,
            trim: config.trim,
            skip_empty: config.skip_empty,
            order: config.order,
        })
    }

    pub fn with_column<S: Into<String>>(mut self, column: S) -> Self {
        self.column = column.into();
        self
    }

    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }

    pub fn with_order(mut self, order: ValueOrder) -> Self {
        self.order = order;
        self
    }

    pub fn with_trim(mut self, trim: bool) -> Self {
        self.trim = trim;
        self
    }

    pub fn with_skip_empty(mut self, skip_empty: bool) -> Self {
        self.skip_empty = skip_empty;
        self
    }

    /// Return the distinct values of the configured column in `path`.
    pub fn get_countries<P: AsRef<Path>>(&self, path: P) -> Result<Vec<String>> {
        let path = path.as_ref();
        let bytes = load_file(path)?;
        let scan = self.scan(&bytes, &path.display().to_string())?;
        Ok(scan.values)
    }

    /// Same as [`get_countries`](Self::get_countries) over any reader. The
    /// input is still read completely before parsing starts.
    pub fn extract_from_reader<R: Read>(&self, mut reader: R) -> Result<Vec<String>> {
        let mut bytes = Vec::new();
        reader.read_to_end(&mut bytes)?;
        let scan = self.scan(&bytes, READER_SOURCE)?;
        Ok(scan.values)
    }

    /// Run the extraction and describe it as a report.
    pub fn extract_report<P: AsRef<Path>>(&self, path: P) -> Result<ExtractionReport> {
        let start = Instant::now();
        let path = path.as_ref();
        let source = path.display().to_string();

        let bytes = load_file(path)?;
        let scan = self.scan(&bytes, &source)?;

        Ok(ExtractionReport {
            source,
            column: self.column.clone(),
            order: self.order,
            rows_scanned: scan.rows_scanned,
            empty_skipped: scan.empty_skipped,
            bytes_read: bytes.len() as u64,
            values: scan.values,
            duration: start.elapsed(),
            extracted_at: Utc::now(),
        })
    }

    fn scan(&self, bytes: &[u8], source: &str) -> Result<ColumnScan> {
        let bytes = bytes.strip_prefix(UTF8_BOM).unwrap_or(bytes);

        let mut reader = ReaderBuilder::new()
            .delimiter(self.delimiter)
            .has_headers(true)
            .flexible(false)
            .trim(if self.trim { Trim::All } else { Trim::None })
            .from_reader(bytes);

        let headers = reader
            .headers()
            .map_err(|e| malformed(source, e))?
            .clone();
        log::trace!("{}: header {:?}", source, headers);

        let index = headers
            .iter()
            .position(|name| name == self.column)
            .ok_or_else(|| CountriesError::MissingColumn {
                column: self.column.clone(),
                path: source.to_string(),
                available: headers
                    .iter()
                    .filter(|name| !name.is_empty())
                    .map(str::to_string)
                    .collect(),
            })?;

        let mut scan = ColumnScan::default();
        let mut seen: HashSet<String> = HashSet::new();

        for result in reader.records() {
            let record = result.map_err(|e| malformed(source, e))?;
            scan.rows_scanned += 1;

            // Field count is enforced by the reader, so the index is in range.
            let value = record.get(index).unwrap_or_default();
            if value.is_empty() && self.skip_empty {
                scan.empty_skipped += 1;
                continue;
            }

            if !seen.contains(value) {
                seen.insert(value.to_string());
                scan.values.push(value.to_string());
            }
        }

        if self.order == ValueOrder::Sorted {
            scan.values.sort();
        }

        log::debug!(
            "{}: {} rows scanned, {} distinct values in '{}'",
            source,
            scan.rows_scanned,
            scan.values.len(),
            self.column
        );

        Ok(scan)
    }
}

fn load_file(path: &Path) -> Result<Vec<u8>> {
    let bytes = std::fs::read(path).map_err(|source| CountriesError::FileNotFound {
        path: path.display().to_string(),
        source,
    })?;
    log::debug!("loaded {} bytes from {}", bytes.len(), path.display());
    Ok(bytes)
}

fn malformed(source: &str, error: csv::Error) -> CountriesError {
    let line = error.position().map(|pos| pos.line());

    let message = match error.kind() {
        ErrorKind::UnequalLengths {
            expected_len, len, ..
        } => format!("expected {} fields, found {}", expected_len, len),
        ErrorKind::Utf8 { err, .. } => {
            format!("invalid UTF-8 in field {}", err.field() + 1)
        }
        _ => error.to_string(),
    };

    CountriesError::MalformedInput {
        path: source.to_string(),
        line,
        message,
    }
}
