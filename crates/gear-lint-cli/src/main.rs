//! gear CLI tool.
//!
//! Usage:
//! ```bash
//! gear validate [OPTIONS] [PATH]
//! gear list-rules
//! gear config [--force]
//! ```

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

mod commands;
mod config_resolver;

/// Exit status for configuration and IO failures.
const FATAL_EXIT: u8 = 2;

/// GEAR architecture validator for Go projects
#[derive(Parser)]
#[command(name = "gear")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to configuration file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate a Go project against the GEAR rules
    Validate {
        /// Project root (default: current directory)
        #[arg(default_value = ".")]
        path: PathBuf,

        /// Exclusion patterns, comma-separated; replaces the configured list
        #[arg(short, long, value_delimiter = ',')]
        exclude: Vec<String>,

        /// Output format
        #[arg(short, long, default_value = "text")]
        format: OutputFormat,
    },

    /// List the GEAR rules
    ListRules,

    /// Write a default .gearrc in the current directory
    Config {
        /// Overwrite an existing .gearrc
        #[arg(long)]
        force: bool,
    },
}

/// Output format for validation reports.
#[derive(Clone, Copy, Debug, Default, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text output.
    #[default]
    Text,
    /// JSON output.
    Json,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if cli.verbose {
            EnvFilter::new("debug")
        } else {
            EnvFilter::new("warn")
        }
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    let outcome = match cli.command {
        Commands::Validate {
            path,
            exclude,
            format,
        } => commands::validate::run(&path, exclude, format, cli.config.as_deref()),
        Commands::ListRules => {
            commands::list_rules::run();
            Ok(0)
        }
        Commands::Config { force } => commands::init::run(force).map(|()| 0),
    };

    match outcome {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            eprintln!("error: {e:#}");
            ExitCode::from(FATAL_EXIT)
        }
    }
}
