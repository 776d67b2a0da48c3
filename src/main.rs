//! Mauka LPM - Main entrypoint.
//!
//! Loads configuration, initializes logging and runs the lock strategy
//! benchmark against the Lanai Hash Trie.

use anyhow::Context;
use clap::{Parser, Subcommand};
use mauka_lpm_lib::config::{write_config, ConfigLoader, LogConfig, LpmConfig, ENV_PREFIX};
use mauka_lpm_lib::error::{ErrorContext, ErrorReporter, LpmError, TracingErrorReporter};
use mauka_lpm_lib::workload;
use std::path::{Path, PathBuf};
use std::process;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Command line arguments for Mauka LPM.
#[derive(Parser, Debug)]
#[clap(name = "Mauka LPM", version, author, about)]
struct Args {
    /// Path to configuration file
    #[clap(short, long, value_parser)]
    config: Option<PathBuf>,

    /// Print the benchmark report as JSON
    #[clap(long)]
    json: bool,

    /// Command to execute
    #[clap(subcommand)]
    command: Option<Command>,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
enum Command {
    /// Run the lock strategy benchmark
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

/// Initialize the logging system. `RUST_LOG` takes precedence over the
/// configured level.
fn init_logging(log: &LogConfig) -> anyhow::Result<()> {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&log.level));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_line_number(log.source_location)
        .with_file(log.source_location)
        .with_thread_names(true);

    let installed = if log.json {
        tracing::subscriber::set_global_default(builder.json().finish())
    } else {
        tracing::subscriber::set_global_default(builder.pretty().finish())
    };
    installed.context("Failed to set global tracing subscriber")
}

/// Reports a fatal error and exits.
fn fail(context: ErrorContext) -> ! {
    TracingErrorReporter.report(context);
    process::exit(1);
}

/// Context for a configuration failure, naming the file when one was given.
fn config_failure(error: LpmError, path: Option<&Path>) -> ErrorContext {
    let context = ErrorContext::new(error, "config");
    match path {
        Some(path) => context.with_details(format!("config file: {}", path.display())),
        None => context,
    }
}

/// Main entry point for the application.
fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let loader = ConfigLoader::new(args.config.as_deref(), ENV_PREFIX);
    let loaded = loader.load();

    // Logging comes up before configuration errors are reported so that they
    // go through the same subscriber.
    let log_config = loaded
        .as_ref()
        .map(|config| config.log.clone())
        .unwrap_or_default();
    init_logging(&log_config)?;

    match args.command.unwrap_or(Command::Run) {
        Command::Run => {
            let config =
                loaded.unwrap_or_else(|e| fail(config_failure(e.into(), args.config.as_deref())));
            info!(
                chunk_size = config.trie.chunk_size,
                runtime = ?config.workload.runtime,
                "Starting Mauka LPM benchmark"
            );

            let runtime = workload::build_runtime(&config.workload)
                .unwrap_or_else(|e| fail(ErrorContext::new(e.into(), "runtime")));
            let report = runtime
                .block_on(workload::run_benchmark(&config))
                .unwrap_or_else(|e| fail(ErrorContext::new(e, "workload")));

            if args.json {
                let rendered = report
                    .to_json()
                    .unwrap_or_else(|e| fail(ErrorContext::new(e, "report")));
                println!("{rendered}");
            } else {
                println!("{report}");
            }
            Ok(())
        }
        Command::Validate => {
            info!("Validating configuration");
            loaded.unwrap_or_else(|e| fail(config_failure(e.into(), args.config.as_deref())));
            info!("Configuration validated successfully");
            Ok(())
        }
        Command::GenConfig { output } => {
            info!("Generating default configuration");
            write_config(&LpmConfig::default(), &output).unwrap_or_else(|e| {
                fail(
                    ErrorContext::new(e, "gen-config")
                        .with_details(format!("output: {}", output.display())),
                )
            });

            info!("Default configuration written to {:?}", output);
            Ok(())
        }
    }
}
