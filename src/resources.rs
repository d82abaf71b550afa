// src/resources.rs

//! Locations of downloadable resource artifacts and the prerequisite checks
//! the `preprocess` command runs before handing off to the pipeline.

use std::path::PathBuf;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::context::RunContext;
use crate::errors::{Result, WsiprepError};
use crate::fs::FileSystem;

pub const NORMALIZATION_TEMPLATE_URL: &str =
    "https://github.com/Avic3nna/STAMP/blob/main/resources/normalization_template.jpg?raw=true";
pub const CTRANSPATH_WEIGHTS_URL: &str =
    "https://drive.google.com/u/0/uc?id=1DoDx_70_TLj98gTf6YTXnu4tFhsFocDX&export=download";

/// Feature extractor backbone selected by `preprocessing.feat_extractor`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FeatureExtractor {
    Ctp,
    Uni,
}

impl FromStr for FeatureExtractor {
    type Err = WsiprepError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "ctp" => Ok(FeatureExtractor::Ctp),
            "uni" => Ok(FeatureExtractor::Uni),
            other => Err(WsiprepError::ConfigError(format!(
                "unknown feat_extractor '{other}' (expected 'ctp' or 'uni')"
            ))),
        }
    }
}

/// Stain-normalization template shared by both extractors.
pub fn normalization_template_path(ctx: &RunContext) -> PathBuf {
    ctx.resources_dir().join("normalization_template.jpg")
}

/// Weights location for the configured extractor.
pub fn model_weights_path(ctx: &RunContext, extractor: FeatureExtractor) -> PathBuf {
    match extractor {
        FeatureExtractor::Ctp => ctx.resources_dir().join("ctranspath.pth"),
        FeatureExtractor::Uni => ctx
            .resources_dir()
            .join("uni/vit_large_patch16_224.dinov2.uni_mass100k/pytorch_model.bin"),
    }
}

/// Fail when normalization is requested but the template is missing.
pub fn ensure_normalization_template(fs: &dyn FileSystem, ctx: &RunContext) -> Result<PathBuf> {
    let path = normalization_template_path(ctx);
    if !fs.exists(&path) {
        return Err(WsiprepError::ConfigError(format!(
            "Normalization template {} does not exist, please run `wsiprep setup` to download it",
            path.display()
        )));
    }
    Ok(path)
}

/// Fail when the extractor weights have not been downloaded yet.
pub fn ensure_model_weights(
    fs: &dyn FileSystem,
    ctx: &RunContext,
    extractor: FeatureExtractor,
) -> Result<PathBuf> {
    let path = model_weights_path(ctx, extractor);
    if !fs.exists(&path) {
        return Err(WsiprepError::ConfigError(format!(
            "Feature extractor model {} does not exist, please run `wsiprep setup` to download it",
            path.display()
        )));
    }
    Ok(path)
}
