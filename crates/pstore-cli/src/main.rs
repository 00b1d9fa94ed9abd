//! aws-parameter-store CLI
//!
//! Exports, imports, and deletes AWS Systems Manager parameters.

mod cli;
mod commands;
mod error;
mod settings;

use clap::{CommandFactory, Parser};
use colored::Colorize;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use cli::{Action, Cli};
use error::Result;
use settings::Settings;

/// Filter used with `--verbose`: our crates at debug, the SDK at info.
const VERBOSE_FILTER: &str =
    "info,aws_parameter_store=debug,pstore_core=debug,pstore_aws=debug,pstore_fs=debug";

fn main() {
    // Flag errors exit 2, --help and --version exit 0
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(e) = run(cli) {
        eprintln!("{}: {}", "error".red().bold(), e);
        std::process::exit(1);
    }
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new(VERBOSE_FILTER)
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(verbose)
        .finish();

    if tracing::subscriber::set_global_default(subscriber).is_err() {
        eprintln!("{} logging was already initialized", "warning:".yellow().bold());
    }
    tracing::debug!("Verbose mode enabled");
}

fn run(cli: Cli) -> Result<()> {
    let Some(action) = cli.action() else {
        Cli::command().print_help()?;
        println!();
        return Ok(());
    };

    let settings = Settings::resolve(&cli)?;
    execute_action(action, &settings, cli.dry_run)
}

fn execute_action(action: Action, settings: &Settings, dry_run: bool) -> Result<()> {
    match action {
        Action::Export { path, output } => commands::run_export(settings, &path, output.as_deref()),
        Action::Import { file, key } => commands::run_import(settings, &file, key.as_deref(), dry_run),
        Action::Delete { file } => commands::run_delete(settings, &file, dry_run),
        Action::List => commands::run_list(settings),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_error_user() {
        let error = crate::error::CliError::user("test error");
        assert_eq!(format!("{}", error), "test error");
    }

    #[test]
    fn test_verbose_filter_parses() {
        assert!(VERBOSE_FILTER.parse::<EnvFilter>().is_ok());
    }
}
