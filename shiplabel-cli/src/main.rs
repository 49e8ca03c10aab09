//! shiplabel CLI - Command-line interface
//!
//! Weighs packages and generates carrier labels against a JSON snapshot of
//! the shipping store.

mod commands;
mod error;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use shiplabel::context::{Context, DEFAULT_TYPE_KEY};
use shiplabel::logging::init_logging;
use tracing::error;

use commands::common::{load_config, resolve_snapshot};
use commands::config::ConfigCommands;
use commands::labels::LabelCommands;
use commands::weigh::WeighCommands;
use error::CliError;

#[derive(Debug, Parser)]
#[command(name = "shiplabel", version, about = "Package weighing and carrier labels")]
struct Cli {
    /// Configuration file (defaults to the user config directory)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Store snapshot to operate on (overrides store.snapshot)
    #[arg(long, global = true)]
    snapshot: Option<PathBuf>,

    /// Log filter, e.g. "debug" (overrides logging.level)
    #[arg(long, global = true)]
    log_level: Option<String>,

    /// Default type for records the store creates on this run
    #[arg(long, global = true)]
    default_type: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Compute package weights
    Weigh {
        #[command(subcommand)]
        command: WeighCommands,
    },

    /// Generate, list, delete or export shipment labels
    Labels {
        #[command(subcommand)]
        command: LabelCommands,
    },

    /// View or change configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = %e, "Command failed");
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), CliError> {
    let config_path = cli.config.as_deref();

    if let Commands::Config { command } = cli.command {
        return commands::config::run(command, config_path);
    }

    let mut config = load_config(config_path)?;
    if let Some(level) = cli.log_level {
        config.logging.level = level;
    }
    let _guard = init_logging(&config.logging)?;

    let mut ctx = Context::new(u64::from(std::process::id()));
    if let Some(default_type) = cli.default_type {
        ctx = ctx.with_value(DEFAULT_TYPE_KEY, default_type);
    }
    let snapshot = resolve_snapshot(cli.snapshot, &config)?;

    match cli.command {
        Commands::Weigh { command } => commands::weigh::run(command, &snapshot, &ctx),
        Commands::Labels { command } => commands::labels::run(command, &snapshot, &config, &ctx),
        Commands::Config { .. } => Ok(()),
    }
}
