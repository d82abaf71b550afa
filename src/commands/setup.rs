// src/commands/setup.rs

//! `wsiprep setup`: fetch the resource artifacts the pipeline depends on.
//!
//! No RequirementSpec applies; the only configuration read is
//! `preprocessing.feat_extractor`, which decides which weights to fetch.

use crate::config::ConfigStore;
use crate::context::RunContext;
use crate::errors::Result;
use crate::pipeline::PipelineBackend;
use crate::resources::FeatureExtractor;

pub fn run(store: &ConfigStore, ctx: &RunContext, backend: &dyn PipelineBackend) -> Result<()> {
    let extractor: FeatureExtractor = store.str_value("preprocessing.feat_extractor")?.parse()?;
    backend.fetch_resources(ctx, extractor)
}
