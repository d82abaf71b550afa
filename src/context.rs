// src/context.rs

//! Process-level context threaded into the components that need it.
//!
//! The resources directory is designated by `WSIPREP_RESOURCES_DIR`. The
//! binary seeds that variable with the packaged default location before any
//! command logic runs (so child processes inherit it), but everything inside
//! the crate reads the location from a [`RunContext`] value rather than from
//! the environment, which keeps the resolver and validator testable in
//! isolation.

use std::path::{Path, PathBuf};

/// Environment variable naming the resources directory.
pub const RESOURCES_DIR_ENV: &str = "WSIPREP_RESOURCES_DIR";

/// Conventional config filename looked up in the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "config.yaml";

/// Immutable per-invocation context.
#[derive(Debug, Clone)]
pub struct RunContext {
    resources_dir: PathBuf,
}

impl RunContext {
    pub fn new(resources_dir: impl Into<PathBuf>) -> Self {
        Self {
            resources_dir: resources_dir.into(),
        }
    }

    /// Build the context from `WSIPREP_RESOURCES_DIR`, falling back to the
    /// packaged default location when the variable is unset.
    pub fn from_env() -> Self {
        let resources_dir = std::env::var_os(RESOURCES_DIR_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(default_resources_dir);
        Self { resources_dir }
    }

    pub fn resources_dir(&self) -> &Path {
        &self.resources_dir
    }

    /// Packaged ("factory") configuration shipped alongside the resources.
    pub fn factory_config_path(&self) -> PathBuf {
        self.resources_dir.join("config.yaml")
    }
}

/// Seed `WSIPREP_RESOURCES_DIR` with the packaged default if unset.
///
/// Called once at startup, before any command logic.
pub fn seed_resources_dir_env() {
    if std::env::var_os(RESOURCES_DIR_ENV).is_none() {
        // Safety: called from `main` before any other thread is spawned.
        unsafe {
            std::env::set_var(RESOURCES_DIR_ENV, default_resources_dir());
        }
    }
}

/// Default resources location: a `resources` directory next to the
/// executable, or `./resources` if the executable path is unavailable.
pub fn default_resources_dir() -> PathBuf {
    std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(|dir| dir.join("resources")))
        .unwrap_or_else(|| PathBuf::from("resources"))
}
