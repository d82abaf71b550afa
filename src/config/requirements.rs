// src/config/requirements.rs

use std::path::Path;

use serde_yaml::Value;

use crate::config::store::ConfigStore;
use crate::errors::{Result, WsiprepError};
use crate::fs::{FileSystem, PathCheck, check_path};

/// The keys an operation declares mandatory, scoped under one section.
///
/// `paths` is the subset of `required` whose values are filesystem paths and
/// must also exist on disk.
#[derive(Debug, Clone, Copy)]
pub struct RequirementSpec {
    pub section: &'static str,
    pub required: &'static [&'static str],
    pub paths: &'static [&'static str],
}

/// Everything the `preprocess` command needs, mirroring the factory config.
pub const PREPROCESS_REQUIREMENTS: RequirementSpec = RequirementSpec {
    section: "preprocessing",
    required: &[
        "output_dir",
        "wsi_dir",
        "cache_dir",
        "microns",
        "cores",
        "norm",
        "del_slide",
        "only_feature_extraction",
        "device",
        "feat_extractor",
    ],
    paths: &["wsi_dir"],
};

/// Check that every required key is present and that path-valued keys point
/// at existing locations.
///
/// Key presence is checked first and batched: every absent or null key is
/// collected so the user can fix them all in one pass. Path checks run only
/// once presence has fully passed (a path error about an absent key would
/// point at the wrong root cause) and stop at the first bad path — each path
/// is a single ordered walk where only the first divergence matters.
pub fn validate(store: &ConfigStore, fs: &dyn FileSystem, spec: &RequirementSpec) -> Result<()> {
    let missing: Vec<String> = spec
        .required
        .iter()
        .map(|name| format!("{}.{}", spec.section, name))
        .filter(|dotted| !store.get(dotted).is_present())
        .collect();
    if !missing.is_empty() {
        return Err(WsiprepError::MissingRequiredKeys(missing));
    }

    for key in spec.paths {
        let dotted = format!("{}.{}", spec.section, key);
        // Presence was verified above, so the key always resolves.
        let Some(value) = store.select_raw(&dotted) else {
            continue;
        };
        match value {
            Value::Sequence(elements) => {
                for element in elements {
                    check_one(fs, element, key, spec.section)?;
                }
            }
            scalar => check_one(fs, scalar, key, spec.section)?,
        }
    }

    Ok(())
}

fn check_one(fs: &dyn FileSystem, value: &Value, key: &str, section: &str) -> Result<()> {
    let path = value.as_str().ok_or_else(|| {
        WsiprepError::ConfigError(format!("'{section}.{key}' must be a path string"))
    })?;
    match check_path(fs, Path::new(path))? {
        PathCheck::Exists => Ok(()),
        PathCheck::MissingAt(segment) => Err(WsiprepError::InvalidPath {
            path: path.to_string(),
            segment,
            key: key.to_string(),
            section: section.to_string(),
        }),
    }
}
