// src/fs/check.rs

//! Segment-wise path existence checking.
//!
//! Instead of a single `exists()` on the full path, the check walks the path
//! component by component from the root and reports the first component that
//! is missing. This lets the caller say "directory 'cohort' does not exist"
//! when `/data/cohort/slides` is wrong because `cohort` was never created,
//! rather than a generic not-found on the leaf.

use std::path::{Component, Path, PathBuf};

use crate::errors::{Result, WsiprepError};
use crate::fs::FileSystem;

/// Outcome of checking one filesystem path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathCheck {
    Exists,
    /// The shallowest path component that does not exist.
    MissingAt(String),
}

/// Walk `path` from its root, testing existence after each component.
///
/// Stops at the first missing component; deeper components are never probed.
/// A missing path is a normal result, not an error — only an empty path is
/// rejected.
pub fn check_path(fs: &dyn FileSystem, path: &Path) -> Result<PathCheck> {
    if path.as_os_str().is_empty() {
        return Err(WsiprepError::EmptyPath);
    }

    let mut current = PathBuf::new();
    for component in path.components() {
        current.push(component);
        if let Component::Normal(name) = component {
            if !fs.exists(&current) {
                return Ok(PathCheck::MissingAt(name.to_string_lossy().into_owned()));
            }
        }
    }

    Ok(PathCheck::Exists)
}
