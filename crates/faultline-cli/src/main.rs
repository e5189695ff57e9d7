//! Faultline CLI - localized messages, results and fault responses
//!
//! This is the main entry point for the Faultline CLI application, providing
//! commands for rendering message templates, running the example endpoints
//! through the response mapper, and managing configuration.

mod cli;
mod config;
mod error;
mod handlers;
mod logging;
mod output;

use cli::{Cli, Commands};
use colored::control;
use config::Config;
use error::{Error, Result};
use logging::{timing::Timer, LoggingConfig};
use output::OutputWriter;
use std::process;
use tracing::instrument;

fn main() {
    // Parse command-line arguments
    let cli = Cli::parse_args();

    // Set up colored output
    control::set_override(cli.use_color());

    // Configuration feeds logging defaults, so read it first and report
    // failures once logging is up
    let config = Config::load_with_file(cli.config.as_deref());

    if let Err(e) = init_logging(&cli, config.as_ref().ok()) {
        eprintln!("Failed to initialize logging: {}", e);
    }

    let result = config.and_then(|config| run(cli, config));

    match result {
        Ok(()) => {
            process::exit(0);
        }
        Err(e) => {
            crate::log_with_request_id!(debug, error = ?e, "Command failed");
            eprintln!(
                "{}",
                error::format_error(&e, control::SHOULD_COLORIZE.should_colorize())
            );

            if e.should_show_help() {
                eprintln!("\nFor more information, try '--help'");
            }

            process::exit(e.exit_code());
        }
    }
}

/// Main application logic
#[instrument(skip(cli, config), fields(command = ?cli.command))]
fn run(cli: Cli, config: Config) -> Result<()> {
    let _timer = Timer::new("cli_execution");

    let format = match cli.output {
        Some(format) => format,
        None => config
            .output
            .format
            .parse::<cli::OutputFormat>()
            .map_err(Error::config)?,
    };
    let mut output = OutputWriter::new(format, cli.use_color() && config.output.color, cli.quiet);

    tracing::info!(
        command = ?cli.command,
        verbosity = cli.verbosity_level(),
        "Executing command"
    );

    match cli.command {
        Commands::Format(args) => handlers::handle_format(args, &mut output),
        Commands::Render(args) => {
            let ctx = context_for(&cli.lng, &cli.accept_language, &config)?;
            handlers::handle_render(args, &ctx, &mut output)
        }
        Commands::Scenario(args) => {
            let ctx = context_for(&cli.lng, &cli.accept_language, &config)?;
            handlers::handle_scenario(args, &ctx, &mut output)
        }
        Commands::Config(args) => {
            handlers::handle_config(args, &config, cli.config.as_deref(), &mut output)
        }
        Commands::Completions(args) => handlers::handle_completions(args),
    }
}

fn context_for(
    lng: &Option<String>,
    accept_language: &Option<String>,
    config: &Config,
) -> Result<faultline_core::RenderContext> {
    let _timer = Timer::new("catalog_loading");
    let locale =
        handlers::utils::resolve_locale(lng.as_deref(), accept_language.as_deref(), config);
    handlers::utils::build_context(config, locale)
}

/// Initialize the logging system
fn init_logging(cli: &Cli, config: Option<&Config>) -> Result<()> {
    let mut logging_config = LoggingConfig::from_verbosity(cli.verbosity_level());

    // The config file only speaks when no -v flag was given
    if cli.verbosity_level() == 0 {
        if let Some(config) = config {
            logging_config.apply_file_config(&config.logging);
        }
    }

    // Apply environment overrides
    logging_config.merge_with_env();

    // If quiet mode, only log errors
    if cli.quiet {
        logging_config.level = "error".to_string();
        logging_config.console = false;
    }

    logging::init_logging(logging_config)
}
