// Copyright (c) 2025 Pueo Authors
//
// Licensed under dual license:
// - MIT License (LICENSE-MIT or https://opensource.org/licenses/MIT)
// - Apache License, Version 2.0 (LICENSE-APACHE or https://www.apache.org/licenses/LICENSE-2.0)

//! Pueo - Main entrypoint.
//!
//! Loads configuration, initializes logging, then reads directives from
//! standard input and answers queries on standard output.

use std::io;
use std::path::PathBuf;
use std::process;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

use pueo_lib::command::{CommandLoop, Outcome};
use pueo_lib::config::{ConfigLoader, LogConfig, PueoConfig, ENV_PREFIX};
use pueo_lib::error::{set_error_reporter, PueoError, PueoResult, TracingErrorReporter};
use pueo_lib::index::MovieIndex;

/// Command line arguments for Pueo.
#[derive(Parser, Debug)]
#[clap(name = "pueo", version, author, about)]
struct Args {
    /// Path to configuration file
    #[clap(short, long, value_parser)]
    config: Option<PathBuf>,

    /// Maximum number of results printed per query
    #[clap(short, long, value_parser)]
    limit: Option<usize>,

    /// Command to execute
    #[clap(subcommand)]
    command: Option<Command>,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
enum Command {
    /// Read directives from standard input (the default)
    Run,

    /// Validate the configuration file
    Validate,

    /// Generate a default configuration file
    GenConfig {
        /// Path to output configuration file
        #[clap(short, long, value_parser)]
        output: PathBuf,
    },
}

/// Initialize the logging system.
///
/// `RUST_LOG` takes precedence over the configured level. Logs go to stderr
/// so that standard output carries only directive echoes and results.
fn init_logging(log: &LogConfig) -> PueoResult<()> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&log.level))
        .map_err(|e| PueoError::Custom(format!("Invalid log filter: {e}")))?;

    let fmt_layer = fmt::layer()
        .with_writer(io::stderr)
        .with_file(log.source_location)
        .with_line_number(log.source_location)
        .with_thread_names(true);

    let registry = tracing_subscriber::registry()
        .with(filter)
        .with(tracing_error::ErrorLayer::default());

    let result = if log.json {
        registry.with(fmt_layer.json()).try_init()
    } else {
        registry.with(fmt_layer).try_init()
    };

    result.map_err(|e| PueoError::Custom(format!("Failed to set global tracing subscriber: {e}")))
}

/// Loads the configuration or exits with a message on stderr.
///
/// Logging is not set up yet at this point.
fn load_config(loader: &ConfigLoader) -> PueoConfig {
    match loader.load() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Configuration error: {e}");
            process::exit(1);
        }
    }
}

fn run(config: &PueoConfig, limit: usize) -> PueoResult<()> {
    let index = MovieIndex::with_config(&config.index)?;
    info!(limit, "Reading directives from standard input");

    let stdin = io::stdin();
    let stdout = io::stdout();
    let outcome = CommandLoop::new(&index, limit).run(stdin.lock(), stdout.lock());

    match outcome {
        Ok(Outcome::Quit) => {
            index.shutdown();
            Ok(())
        }
        Ok(Outcome::EndOfInput) => {
            info!("End of input");
            Ok(())
        }
        Err(e) => {
            index.shutdown();
            Err(e.into())
        }
    }
}

/// Main entry point for the application.
fn main() -> PueoResult<()> {
    let args = Args::parse();
    let loader = ConfigLoader::new(args.config.as_deref(), ENV_PREFIX);

    match args.command.unwrap_or(Command::Run) {
        Command::Run => {
            let config = load_config(&loader);
            init_logging(&config.log)?;
            set_error_reporter(Arc::new(TracingErrorReporter));

            let limit = args.limit.unwrap_or(config.query.limit);
            if limit == 0 {
                return Err(PueoError::Custom("--limit must be greater than 0".to_string()));
            }

            run(&config, limit)
        }
        Command::Validate => {
            let config = load_config(&loader);
            init_logging(&config.log)?;
            info!("Configuration validated successfully");
            println!("{}", config.to_toml()?);
            Ok(())
        }
        Command::GenConfig { output } => {
            init_logging(&LogConfig::default())?;
            info!("Generating default configuration");

            if let Some(parent) = output.parent() {
                std::fs::create_dir_all(parent)?;
            }

            let toml = PueoConfig::default().to_toml()?;
            std::fs::write(&output, toml)?;

            info!("Default configuration written to {:?}", output);
            Ok(())
        }
    }
}
