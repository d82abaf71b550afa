// src/main.rs

use wsiprep::{cli, context, logging};

fn main() {
    if let Err(err) = run_main() {
        eprintln!("wsiprep error: {err}");
        std::process::exit(1);
    }
}

fn run_main() -> anyhow::Result<()> {
    let args = cli::parse();
    logging::init_logging(args.log_level)?;

    // Process contract: child processes see the resources dir even when the
    // user never set it; everything in-crate reads it from RunContext.
    context::seed_resources_dir_env();
    let ctx = context::RunContext::from_env();

    wsiprep::run(&args, &ctx)?;
    Ok(())
}
