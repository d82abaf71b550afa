// src/commands/show.rs

//! `wsiprep config`: print the loaded configuration.
//!
//! Pure introspection — `${env:VAR}` references are resolved before printing,
//! but no requirement validation runs.

use crate::config::ConfigStore;
use crate::config::interpolate::resolve_env_refs;
use crate::errors::Result;

pub fn run(store: &ConfigStore) -> Result<()> {
    let resolved = resolve_env_refs(store.root());
    let yaml = serde_yaml::to_string(&resolved)?;
    print!("{yaml}");
    Ok(())
}
