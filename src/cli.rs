// src/cli.rs

//! CLI argument parsing using `clap`.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

/// Command-line arguments for `wsiprep`.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "wsiprep",
    version,
    about = "Resolve and validate a preprocessing configuration, then hand off to the pipeline.",
    long_about = None
)]
pub struct CliArgs {
    /// Path to the config file (YAML).
    ///
    /// If unspecified, `config.yaml` in the working directory is used, or the
    /// factory settings shipped with the package if no `config.yaml` exists.
    #[arg(short = 'c', long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Logging level (error, warn, info, debug, trace).
    ///
    /// If omitted, `WSIPREP_LOG` or a default level will be used.
    #[arg(long, global = true, value_enum, value_name = "LEVEL")]
    pub log_level: Option<LogLevel>,

    #[command(subcommand)]
    pub command: Command,
}

/// The closed set of invocable operations.
#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Create a new configuration file at the path given by --config.
    Init,
    /// Download required resources (normalization template, extractor weights).
    Setup,
    /// Print the loaded configuration with environment references resolved.
    Config,
    /// Preprocess whole-slide images into feature vectors.
    Preprocess,
    /// Anything else: rejected by the dispatcher as an unknown command.
    #[command(external_subcommand)]
    External(Vec<String>),
}

/// Log level as exposed on the CLI.
#[derive(Debug, Copy, Clone, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// Convenience wrapper around `CliArgs::parse()`.
pub fn parse() -> CliArgs {
    CliArgs::parse()
}
