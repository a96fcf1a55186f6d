//! Versa CLI - command-line interface for version numbers and value comparison
//!
//! This is the main entry point for the Versa CLI application, providing
//! commands for parsing, comparing and sorting version numbers and for
//! comparing structured documents with the generic comparator.

mod cli;
mod config;
mod error;
mod handlers;
mod logging;
mod output;

use cli::{Cli, Commands};
use colored::control;
use config::Config;
use error::Result;
use logging::{timing::Timer, LoggingConfig};
use output::OutputWriter;
use std::process;
use tracing::instrument;

fn main() {
    // Parse command-line arguments
    let cli = Cli::parse_args();

    // Load configuration before logging so the file can shape it
    let config = match Config::load_with_file(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => exit_with(&e, !cli.no_color),
    };

    // Set up colored output
    let use_color = cli.use_color() && config.output.color;
    control::set_override(use_color);

    // Initialize logging
    if let Err(e) = init_logging(&cli, &config) {
        eprintln!("Failed to initialize logging: {}", e);
    }

    match run(cli, config, use_color) {
        Ok(()) => process::exit(0),
        Err(e) => exit_with(&e, use_color),
    }
}

/// Report an error and exit with its code
fn exit_with(e: &error::Error, use_color: bool) -> ! {
    eprintln!("{}", error::format_error(e, use_color));

    if e.should_show_help() {
        eprintln!("\nFor more information, try '--help'");
    }

    process::exit(e.exit_code());
}

/// Main application logic
#[instrument(skip(cli, config), fields(command = ?cli.command))]
fn run(cli: Cli, config: Config, use_color: bool) -> Result<()> {
    let _timer = Timer::new("cli_execution");

    let format = cli.output.unwrap_or(config.output.format);
    let mut output = OutputWriter::new(format, use_color, cli.quiet);

    tracing::info!(
        command = ?cli.command,
        format = ?output.format(),
        verbosity = cli.verbosity_level(),
        "Executing command"
    );

    match cli.command {
        Commands::Parse(args) => handlers::handle_parse(args, &config, &mut output),
        Commands::Compare(args) => handlers::handle_compare(args, &config, &mut output),
        Commands::Sort(args) => handlers::handle_sort(args, &config, &mut output),
        Commands::Values(args) => handlers::handle_values(args, &config, &mut output),
        Commands::Config(args) => handlers::handle_config(args, &config, &mut output),
        Commands::Completions(args) => handlers::handle_completions(args),
    }
}

/// Initialize the logging system
fn init_logging(cli: &Cli, config: &Config) -> Result<()> {
    let verbosity = cli.verbosity_level();
    let mut logging_config = LoggingConfig::from_verbosity(verbosity);

    // Config file first, then environment overrides
    logging_config.merge_with_settings(&config.logging, verbosity);
    logging_config.merge_with_env();

    // If quiet mode, only log errors
    if cli.quiet {
        logging_config.level = "error".to_string();
        logging_config.console = false;
    }

    logging::init_logging(logging_config)
}
