// src/config/resolver.rs

use std::path::{Path, PathBuf};

use tracing::info;

use crate::config::store::ConfigStore;
use crate::context::{DEFAULT_CONFIG_FILE, RunContext};
use crate::errors::{Result, WsiprepError};
use crate::fs::FileSystem;

/// Decide which configuration file a command should load.
///
/// Policy, in order:
/// 1. An explicitly given path must exist, else `ConfigNotFound`.
/// 2. `config.yaml` in the working directory, if present.
/// 3. The factory settings shipped in the resources directory; using them is
///    a first-run convenience and only logged, not an error.
/// 4. If even the factory settings are missing the install is broken:
///    `ConfigNotFound`.
pub fn resolve_config_path(
    fs: &dyn FileSystem,
    ctx: &RunContext,
    explicit: Option<&Path>,
) -> Result<PathBuf> {
    let path = match explicit {
        Some(path) => path.to_path_buf(),
        None => {
            let conventional = PathBuf::from(DEFAULT_CONFIG_FILE);
            if fs.exists(&conventional) {
                conventional
            } else {
                let factory = ctx.factory_config_path();
                info!(
                    factory = %factory.display(),
                    "no {DEFAULT_CONFIG_FILE} in the working directory, falling back to factory settings"
                );
                factory
            }
        }
    };

    if !fs.exists(&path) {
        return Err(WsiprepError::ConfigNotFound(absolute(&path)));
    }
    Ok(path)
}

/// Read and parse a configuration file.
///
/// A missing file is `ConfigNotFound`; an existing but unreadable file
/// surfaces as a lower-level IO error; malformed YAML is `ConfigParse`.
pub fn load(fs: &dyn FileSystem, path: &Path) -> Result<ConfigStore> {
    if !fs.exists(path) {
        return Err(WsiprepError::ConfigNotFound(absolute(path)));
    }
    let contents = fs.read_to_string(path)?;
    ConfigStore::from_yaml_str(&contents)
}

/// Resolve and load in one step; the entry point used by the dispatcher.
pub fn resolve_and_load(
    fs: &dyn FileSystem,
    ctx: &RunContext,
    explicit: Option<&Path>,
) -> Result<ConfigStore> {
    let path = resolve_config_path(fs, ctx, explicit)?;
    load(fs, &path)
}

/// Best-effort absolutization for user-facing messages.
pub(crate) fn absolute(path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        std::env::current_dir()
            .map(|cwd| cwd.join(path))
            .unwrap_or_else(|_| path.to_path_buf())
    }
}
