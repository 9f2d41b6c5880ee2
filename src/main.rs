use clap::Parser;
use countries::{Cli, Countries, CountriesError, OutputFormatter};
use std::process;

fn main() {
    let exit_code = run();
    process::exit(exit_code);
}

fn run() -> i32 {
    let cli = Cli::parse();
    setup_logging(&cli);

    if cli.generate_config {
        return handle_generate_config(&cli);
    }

    let app = match Countries::from_cli(&cli) {
        Ok(app) => app,
        Err(e) => {
            print_startup_error(&cli, &e);
            return exit_code_for(&e);
        }
    };

    // clap enforces the file argument unless --generate-config was given
    let Some(file) = cli.file.as_deref() else {
        return 1;
    };

    match app.run(file) {
        Ok(report) => {
            log::info!("{}", report.display_summary());
            0
        }
        Err(e) => {
            app.handle_error(&e);
            exit_code_for(&e)
        }
    }
}

fn exit_code_for(error: &CountriesError) -> i32 {
    match error {
        CountriesError::Config { .. } => 2,
        CountriesError::FileNotFound { .. } => 3,
        CountriesError::MissingColumn { .. } => 4,
        CountriesError::MalformedInput { .. } => 5,
        CountriesError::Io(_) => 1,
    }
}

fn handle_generate_config(cli: &Cli) -> i32 {
    let config_path = cli
        .config
        .as_ref()
        .map(|p| p.to_string_lossy().to_string())
        .unwrap_or_else(|| "countries.toml".to_string());

    let formatter = cli_formatter(cli);

    match Countries::generate_sample_config(&config_path) {
        Ok(()) => {
            formatter.success(&format!(
                "Generated sample configuration file: {}",
                config_path
            ));
            formatter.info(&format!(
                "To use this configuration: countries <file.csv> --config {}",
                config_path
            ));
            0
        }
        Err(e) => {
            formatter.print_user_friendly_error(&e);
            1
        }
    }
}

fn print_startup_error(cli: &Cli, error: &CountriesError) {
    cli_formatter(cli).print_user_friendly_error(error);
}

/// Formatter for messages printed before the app exists.
fn cli_formatter(cli: &Cli) -> OutputFormatter {
    OutputFormatter::new(cli.output_mode(), cli.verbose, cli.quiet)
}

fn setup_logging(cli: &Cli) {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(cli.log_filter()))
        .format_timestamp(None)
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    #[test]
    fn test_exit_codes() {
        let not_found = CountriesError::FileNotFound {
            path: "x.csv".to_string(),
            source: io::Error::new(io::ErrorKind::NotFound, "missing"),
        };
        assert_eq!(exit_code_for(&not_found), 3);

        let missing = CountriesError::MissingColumn {
            column: "country".to_string(),
            path: "x.csv".to_string(),
            available: Vec::new(),
        };
        assert_eq!(exit_code_for(&missing), 4);

        let malformed = CountriesError::MalformedInput {
            path: "x.csv".to_string(),
            line: None,
            message: "bad".to_string(),
        };
        assert_eq!(exit_code_for(&malformed), 5);

        let config = CountriesError::Config {
            message: "bad".to_string(),
        };
        assert_eq!(exit_code_for(&config), 2);
    }
}
