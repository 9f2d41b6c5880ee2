pub mod cli;
pub mod config;
pub mod error;
pub mod extractor;
pub mod ui;

// Public API re-exports
pub use cli::{Cli, OutputFormat};
pub use config::{CliOverrides, Config, ExtractionConfig, OutputConfig, ValueOrder};
pub use error::{CountriesError, Result, UserFriendlyError};

// Core functionality re-exports
pub use extractor::{CountryExtractor, ExtractionReport};
pub use ui::{OutputFormatter, OutputMode};

use std::path::Path;

/// Command-line application: configuration, extractor and output together.
pub struct Countries {
    config: Config,
    extractor: CountryExtractor,
    output_formatter: OutputFormatter,
}

impl Countries {
    pub fn new(config: Config, output_mode: OutputMode, verbose: u8, quiet: bool) -> Result<Self> {
        let extractor = CountryExtractor::from_config(&config.extraction)?;
        let output_formatter = OutputFormatter::new(output_mode, verbose, quiet);

        Ok(Self {
            config,
            extractor,
            output_formatter,
        })
    }

    pub fn from_cli(cli_args: &Cli) -> Result<Self> {
        let config = cli_args.load_config()?;
        Self::new(
            config,
            cli_args.output_mode(),
            cli_args.verbose,
            cli_args.quiet,
        )
    }

    /// Extract the distinct values from `path` and print them.
    pub fn run(&self, path: &Path) -> Result<ExtractionReport> {
        self.output_formatter
            .start_operation(&format!("Reading {}", path.display()));

        let report = self.extractor.extract_report(path)?;
        self.output_formatter.debug(&report.display_summary());

        if report.is_empty() {
            self.output_formatter.warning(&format!(
                "No values found in column '{}'",
                report.column
            ));
        }

        self.output_formatter
            .print_countries(&report, self.config.output.show_summary);

        Ok(report)
    }

    pub fn generate_sample_config<P: AsRef<Path>>(output_path: P) -> Result<()> {
        Config::default().save_to_file(output_path)
    }

    pub fn handle_error(&self, error: &CountriesError) {
        self.output_formatter.print_user_friendly_error(error);
    }
}

/// Distinct values of the `country` column of a comma-separated file, in
/// order of first appearance.
pub fn get_countries<P: AsRef<Path>>(filename: P) -> Result<Vec<String>> {
    CountryExtractor::new().get_countries(filename)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_get_countries() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("people.csv");
        std::fs::write(&path, "name,country\na,US\nb,US\nc,FR\nd,DE\ne,FR\n").unwrap();

        let countries = get_countries(&path).unwrap();
        assert_eq!(countries.len(), 3);
        assert_eq!(countries, vec!["US", "FR", "DE"]);
    }

    #[test]
    fn test_app_uses_configured_extraction() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("nations.csv");
        std::fs::write(&path, "id,nation\n1,SE\n2,NO\n3,SE\n").unwrap();

        let mut config = Config::default();
        config.extraction.order = ValueOrder::Sorted;
        config.extraction.column = "nation".to_string();

        let app = Countries::new(config, OutputMode::Plain, 0, true).unwrap();
        let report = app.run(&path).unwrap();
        assert_eq!(report.column, "nation");
        assert_eq!(report.values, vec!["NO", "SE"]);
    }

    #[test]
    fn test_app_rejects_bad_delimiter() {
        let mut config = Config::default();
        config.extraction.delimiter = '"';
        assert!(Countries::new(config, OutputMode::Plain, 0, true).is_err());
    }

    #[test]
    fn test_run_returns_report() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("people.csv");
        std::fs::write(&path, "country\nUS\nFR\nUS\n").unwrap();

        let app = Countries::new(Config::default(), OutputMode::Plain, 0, true).unwrap();
        let report = app.run(&path).unwrap();
        assert_eq!(report.values, vec!["US", "FR"]);
        assert_eq!(report.rows_scanned, 3);
    }

    #[test]
    fn test_sample_config_generation() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("sample.toml");

        Countries::generate_sample_config(&config_path).unwrap();

        let content = std::fs::read_to_string(&config_path).unwrap();
        assert!(content.contains("[extraction]"));
        assert!(content.contains("column = \"country\""));
    }
}
