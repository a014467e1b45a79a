//! Coralert CLI
//!
//! Inspect and drive the dataset cache the mobile client keeps on disk:
//! check freshness, load payloads, clear datasets, and preview the ranked
//! advisories.

mod commands;
mod error;

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};
use console::style;
use coralert::logging::{init_logging, LoggingConfig};
use coralert::Dataset;

use commands::common::Context;
use commands::config::ConfigCommands;
use commands::put::PutArgs;
use error::CliError;

#[derive(Debug, Parser)]
#[command(name = "coralert", version, about = "Coralert data-freshness cache tools")]
struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Configuration file (default: <config_dir>/coralert/config.ini)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Dataset cache directory (overrides store.directory)
    #[arg(long, global = true)]
    store_dir: Option<PathBuf>,

    /// Also write logs to this directory
    #[arg(long, global = true)]
    log_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Write the configuration file with the effective settings
    Init,

    /// Show freshness of cached datasets
    Status {
        /// Only show this dataset
        dataset: Option<Dataset>,
    },

    /// Store a payload file as the current snapshot of a dataset
    Put(PutArgs),

    /// Remove a cached dataset, or all of them
    Clear {
        /// Dataset to remove (all when omitted)
        dataset: Option<Dataset>,
    },

    /// Rank cached incidents, rain gauges and alerts
    Advisories {
        /// Print cards as JSON
        #[arg(long)]
        json: bool,
    },

    /// View and modify configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

fn main() {
    let cli = Cli::parse();

    let mut logging = if cli.verbose {
        LoggingConfig::verbose()
    } else {
        LoggingConfig::default()
    };
    logging.ansi = console::colors_enabled_stderr();
    if let Some(dir) = &cli.log_dir {
        logging = logging.with_log_dir(dir);
    }

    let _guard = match init_logging(&logging) {
        Ok(guard) => guard,
        Err(e) => exit_with(CliError::from(e)),
    };

    if let Err(e) = run(cli) {
        exit_with(e);
    }
}

fn run(cli: Cli) -> Result<(), CliError> {
    // init and config must work on a broken file so the user can repair it.
    let ctx = match cli.command {
        Commands::Init | Commands::Config { .. } => {
            Context::load_lenient(cli.config, cli.store_dir)
        }
        _ => Context::load(cli.config, cli.store_dir)?,
    };

    match cli.command {
        Commands::Init => commands::init::run(&ctx),
        Commands::Status { dataset } => commands::status::run(&ctx, dataset),
        Commands::Put(args) => commands::put::run(&ctx, args),
        Commands::Clear { dataset } => commands::clear::run(&ctx, dataset),
        Commands::Advisories { json } => commands::advisories::run(&ctx, json),
        Commands::Config { command } => commands::config::run(&ctx, command),
    }
}

fn exit_with(error: CliError) -> ! {
    eprintln!("{} {}", style("error:").red().bold(), error);
    process::exit(1);
}
