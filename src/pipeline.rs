// src/pipeline.rs

//! Pluggable pipeline backend abstraction.
//!
//! The dispatcher talks to a `PipelineBackend` instead of calling the
//! downstream tooling directly. This keeps the expensive collaborators
//! (resource downloads, the feature-extraction worker) behind one seam, so
//! tests can use a recording fake while production uses
//! [`ExtractionPipeline`].

use std::fmt::Debug;
use std::path::{Path, PathBuf};
use std::process::Command;

use anyhow::{Context, anyhow};
use serde::Serialize;
use tracing::info;

use crate::context::RunContext;
use crate::errors::Result;
use crate::resources::{
    self, CTRANSPATH_WEIGHTS_URL, FeatureExtractor, NORMALIZATION_TEMPLATE_URL,
};

/// Fully validated, typed parameters handed to the pipeline.
///
/// By the time this struct exists, every field has passed requirement
/// validation; the pipeline never re-reads the configuration document.
/// Serializable so a run can be logged or dumped for inspection.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PreprocessParams {
    pub output_dir: PathBuf,
    pub wsi_dirs: Vec<PathBuf>,
    pub cache_dir: PathBuf,
    pub model_path: PathBuf,
    pub normalization_template: Option<PathBuf>,
    pub target_microns: f64,
    pub cores: u64,
    pub norm: bool,
    pub del_slide: bool,
    pub cache: bool,
    pub only_feature_extraction: bool,
    pub keep_dir_structure: bool,
    pub device: String,
    pub extractor: FeatureExtractor,
}

/// Trait abstracting the downstream collaborators.
pub trait PipelineBackend: Debug {
    /// Download resource artifacts (normalization template, extractor
    /// weights) into the resources directory. Idempotent: artifacts that
    /// already exist are skipped.
    fn fetch_resources(&self, ctx: &RunContext, extractor: FeatureExtractor) -> Result<()>;

    /// Run the feature-extraction pipeline with validated parameters.
    fn preprocess(&self, params: &PreprocessParams) -> Result<()>;
}

/// Production backend.
///
/// Resource artifacts are fetched over HTTP; preprocessing is delegated to
/// the external extraction worker (`wsiprep-extract`), which owns the
/// GPU-heavy image processing.
#[derive(Debug, Clone, Default)]
pub struct ExtractionPipeline;

impl PipelineBackend for ExtractionPipeline {
    fn fetch_resources(&self, ctx: &RunContext, extractor: FeatureExtractor) -> Result<()> {
        let template = resources::normalization_template_path(ctx);
        if template.exists() {
            info!(path = %template.display(), "normalization template already exists, skipping download");
        } else {
            info!(path = %template.display(), "downloading normalization template");
            download(NORMALIZATION_TEMPLATE_URL, &template)?;
        }

        let weights = resources::model_weights_path(ctx, extractor);
        if weights.exists() {
            info!(path = %weights.display(), "feature extractor model already exists, skipping download");
            return Ok(());
        }
        match extractor {
            FeatureExtractor::Ctp => {
                info!(path = %weights.display(), "downloading CTransPath weights");
                download(CTRANSPATH_WEIGHTS_URL, &weights)?;
            }
            FeatureExtractor::Uni => {
                // UNI weights sit behind an authenticated gate and cannot be
                // fetched anonymously.
                return Err(anyhow!(
                    "UNI weights require an authenticated download; place them at {}",
                    weights.display()
                )
                .into());
            }
        }
        Ok(())
    }

    fn preprocess(&self, params: &PreprocessParams) -> Result<()> {
        info!(
            output_dir = %params.output_dir.display(),
            device = %params.device,
            extractor = ?params.extractor,
            "starting extraction worker"
        );

        let mut cmd = Command::new("wsiprep-extract");
        cmd.arg("--output-dir").arg(&params.output_dir);
        for dir in &params.wsi_dirs {
            cmd.arg("--wsi-dir").arg(dir);
        }
        cmd.arg("--cache-dir").arg(&params.cache_dir);
        cmd.arg("--model").arg(&params.model_path);
        if let Some(template) = &params.normalization_template {
            cmd.arg("--normalization-template").arg(template);
        }
        cmd.arg("--microns").arg(params.target_microns.to_string());
        cmd.arg("--cores").arg(params.cores.to_string());
        cmd.arg("--device").arg(&params.device);
        for (flag, enabled) in [
            ("--norm", params.norm),
            ("--del-slide", params.del_slide),
            ("--no-cache", !params.cache),
            ("--only-feature-extraction", params.only_feature_extraction),
            ("--keep-dir-structure", params.keep_dir_structure),
        ] {
            if enabled {
                cmd.arg(flag);
            }
        }

        let status = cmd
            .status()
            .context("spawning the extraction worker (is wsiprep-extract on PATH?)")?;
        if !status.success() {
            return Err(anyhow!(
                "extraction worker exited with status {}",
                status.code().unwrap_or(-1)
            )
            .into());
        }
        info!("extraction worker finished");
        Ok(())
    }
}

fn download(url: &str, dest: &Path) -> Result<()> {
    if let Some(parent) = dest.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let response = reqwest::blocking::get(url)
        .with_context(|| format!("requesting {url}"))?
        .error_for_status()
        .with_context(|| format!("requesting {url}"))?;
    let bytes = response
        .bytes()
        .with_context(|| format!("reading response body from {url}"))?;
    std::fs::write(dest, &bytes)?;
    Ok(())
}
