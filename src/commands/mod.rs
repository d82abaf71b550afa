// src/commands/mod.rs

//! Dispatch over the closed command set.
//!
//! `init` bypasses config resolution entirely; every other real command
//! resolves and loads the configuration exactly once before running. Unknown
//! command names (clap's external-subcommand catch-all) are rejected here
//! with a structured error.

pub mod init;
pub mod preprocess;
pub mod setup;
pub mod show;

use crate::cli::{CliArgs, Command};
use crate::config;
use crate::context::RunContext;
use crate::errors::{Result, WsiprepError};
use crate::fs::FileSystem;
use crate::pipeline::PipelineBackend;

pub fn dispatch(
    args: &CliArgs,
    ctx: &RunContext,
    fs: &dyn FileSystem,
    backend: &dyn PipelineBackend,
) -> Result<()> {
    if matches!(args.command, Command::Init) {
        return init::run(fs, ctx, args.config.as_deref());
    }
    if let Command::External(argv) = &args.command {
        let name = argv.first().cloned().unwrap_or_default();
        return Err(WsiprepError::UnknownCommand(name));
    }

    let store = config::resolve_and_load(fs, ctx, args.config.as_deref())?;

    match &args.command {
        Command::Setup => setup::run(&store, ctx, backend),
        Command::Config => show::run(&store),
        Command::Preprocess => preprocess::run(&store, ctx, fs, backend),
        Command::Init | Command::External(_) => unreachable!("handled above"),
    }
}
