// src/lib.rs

pub mod cli;
pub mod commands;
pub mod config;
pub mod context;
pub mod errors;
pub mod fs;
pub mod logging;
pub mod pipeline;
pub mod resources;

use crate::cli::CliArgs;
use crate::context::RunContext;
use crate::errors::Result;
use crate::fs::RealFileSystem;
use crate::pipeline::ExtractionPipeline;

/// High-level entry point used by `main.rs`.
///
/// Wires the production collaborators (real filesystem, extraction pipeline)
/// into the command dispatcher. Tests call [`commands::dispatch`] directly
/// with mocks instead.
pub fn run(args: &CliArgs, ctx: &RunContext) -> Result<()> {
    let fs = RealFileSystem;
    let backend = ExtractionPipeline;
    commands::dispatch(args, ctx, &fs, &backend)
}
