use crate::config::{CliOverrides, Config, ValueOrder};
use crate::error::Result;
use crate::ui::OutputMode;
use clap::{Parser, ValueEnum};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "countries")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "List the distinct countries found in a CSV file")]
#[command(
    long_about = "Reads a comma-separated file with a header row and prints each distinct \
                  value of its `country` column exactly once."
)]
#[command(after_help = "EXAMPLES:\n  \
    countries customers.csv\n  \
    countries customers.csv --sort --output-format plain\n  \
    countries export.tsv --delimiter '\\t' --column nation\n  \
    countries customers.csv --output-format json")]
#[command(arg_required_else_help = true)]
pub struct Cli {
    /// CSV file to read
    #[arg(required_unless_present = "generate_config")]
    pub file: Option<PathBuf>,

    /// Column to collect values from (default: country)
    #[arg(long)]
    pub column: Option<String>,

    /// Field delimiter (default: ',')
    #[arg(short, long, value_parser = parse_delimiter)]
    pub delimiter: Option<char>,

    /// Sort values instead of keeping first-seen order
    #[arg(short, long)]
    pub sort: bool,

    /// Trim whitespace around header names and values
    #[arg(short, long)]
    pub trim: bool,

    /// Keep empty cells as a distinct value
    #[arg(long)]
    pub skip_empty: bool,

    /// Configuration file path
    #[arg(short, long, help = "Path to TOML configuration file")]
    pub config: Option<PathBuf>,

    /// Output format for results
    #[arg(long, value_enum, default_value_t = OutputFormat::Human)]
    pub output_format: OutputFormat,

    /// Verbose output level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Quiet mode (print values only)
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Generate sample configuration file
    #[arg(long, help = "Generate a sample configuration file")]
    pub generate_config: bool,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable colored output
    Human,
    /// JSON report
    Json,
    /// One value per line
    Plain,
}

impl Cli {
    pub fn load_config(&self) -> Result<Config> {
        let mut config = Config::load_with_defaults(self.config.as_ref())?;

        let overrides = self.create_cli_overrides();
        config.merge_with_cli_args(&overrides);
        config.validate()?;

        Ok(config)
    }

    /// Flags only override the file when they are set.
    pub fn create_cli_overrides(&self) -> CliOverrides {
        CliOverrides::new()
            .with_column(self.column.clone())
            .with_delimiter(self.delimiter)
            .with_order(self.sort.then_some(ValueOrder::Sorted))
            .with_trim(self.trim.then_some(true))
            .with_skip_empty(self.skip_empty.then_some(true))
    }

    pub fn output_mode(&self) -> OutputMode {
        match self.output_format {
            OutputFormat::Human => OutputMode::Human,
            OutputFormat::Json => OutputMode::Json,
            OutputFormat::Plain => OutputMode::Plain,
        }
    }

    pub fn verbosity_level(&self) -> u8 {
        if self.quiet {
            0
        } else {
            self.verbose
        }
    }

    /// Default `log` filter for the verbosity flags.
    pub fn log_filter(&self) -> &'static str {
        match self.verbosity_level() {
            0 => "countries=warn",
            1 => "countries=info",
            2 => "countries=debug",
            _ => "countries=trace",
        }
    }
}

/// Accepts a single ASCII character or one of the escapes `\t`, `tab`.
pub fn parse_delimiter(s: &str) -> std::result::Result<char, String> {
    let c = match s {
        "\\t" | "tab" => '\t',
        _ => {
            let mut chars = s.chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) => c,
                _ => {
                    return Err(format!(
                        "Delimiter must be a single character, got '{}'",
                        s
                    ))
                }
            }
        }
    };

    crate::config::delimiter_to_byte(c)?;
    Ok(c)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cli(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("countries").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn test_parse_delimiter() {
        assert_eq!(parse_delimiter(",").unwrap(), ',');
        assert_eq!(parse_delimiter(";").unwrap(), ';');
        assert_eq!(parse_delimiter("\\t").unwrap(), '\t');
        assert_eq!(parse_delimiter("tab").unwrap(), '\t');

        assert!(parse_delimiter("").is_err());
        assert!(parse_delimiter(",,").is_err());
        assert!(parse_delimiter("\"").is_err());
        assert!(parse_delimiter("ß").is_err());
    }

    #[test]
    fn test_file_required_unless_generating_config() {
        assert!(Cli::try_parse_from(["countries", "--sort"]).is_err());
        assert!(Cli::try_parse_from(["countries", "--generate-config"]).is_ok());
    }

    #[test]
    fn test_quiet_conflicts_with_verbose() {
        assert!(Cli::try_parse_from(["countries", "data.csv", "-q", "-v"]).is_err());
    }

    #[test]
    fn test_unset_flags_do_not_override() {
        let overrides = cli(&["data.csv"]).create_cli_overrides();
        assert!(overrides.column.is_none());
        assert!(overrides.delimiter.is_none());
        assert!(overrides.order.is_none());
        assert!(overrides.trim.is_none());
        assert!(overrides.skip_empty.is_none());
    }

    #[test]
    fn test_flags_become_overrides() {
        let overrides =
            cli(&["data.csv", "--sort", "--trim", "-d", ";", "--column", "nation"])
                .create_cli_overrides();
        assert_eq!(overrides.column.as_deref(), Some("nation"));
        assert_eq!(overrides.delimiter, Some(';'));
        assert_eq!(overrides.order, Some(ValueOrder::Sorted));
        assert_eq!(overrides.trim, Some(true));
    }

    #[test]
    fn test_output_mode_follows_format_flag() {
        assert_eq!(cli(&["data.csv"]).output_mode(), OutputMode::Human);
        assert_eq!(
            cli(&["data.csv", "--output-format", "json"]).output_mode(),
            OutputMode::Json
        );
        assert_eq!(
            cli(&["data.csv", "--output-format", "plain"]).output_mode(),
            OutputMode::Plain
        );
    }

    #[test]
    fn test_log_filter_follows_verbosity() {
        assert_eq!(cli(&["data.csv"]).log_filter(), "countries=warn");
        assert_eq!(cli(&["data.csv", "-vv"]).log_filter(), "countries=debug");
        assert_eq!(cli(&["data.csv", "-q"]).log_filter(), "countries=warn");
    }
}
