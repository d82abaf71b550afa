// src/commands/preprocess.rs

//! `wsiprep preprocess`: gate the expensive pipeline behind cheap checks.
//!
//! Order matters here:
//! 1. requirement validation (all keys present, `wsi_dir` paths exist),
//! 2. resource prerequisites (normalization template, extractor weights),
//! 3. only then hand typed parameters to the pipeline backend.

use std::path::PathBuf;

use serde_yaml::Value;

use crate::config::{self, ConfigStore, PREPROCESS_REQUIREMENTS};
use crate::context::RunContext;
use crate::errors::{Result, WsiprepError};
use crate::fs::FileSystem;
use crate::pipeline::{PipelineBackend, PreprocessParams};
use crate::resources::{self, FeatureExtractor};

pub fn run(
    store: &ConfigStore,
    ctx: &RunContext,
    fs: &dyn FileSystem,
    backend: &dyn PipelineBackend,
) -> Result<()> {
    config::validate(store, fs, &PREPROCESS_REQUIREMENTS)?;

    let extractor: FeatureExtractor = store.str_value("preprocessing.feat_extractor")?.parse()?;
    let norm = store.bool_value("preprocessing.norm")?;
    let normalization_template = if norm {
        Some(resources::ensure_normalization_template(fs, ctx)?)
    } else {
        None
    };
    let model_path = resources::ensure_model_weights(fs, ctx, extractor)?;

    let params = PreprocessParams {
        output_dir: store.str_value("preprocessing.output_dir")?.into(),
        wsi_dirs: path_values(store, "preprocessing.wsi_dir")?,
        cache_dir: store.str_value("preprocessing.cache_dir")?.into(),
        model_path,
        normalization_template,
        target_microns: store.f64_value("preprocessing.microns")?,
        cores: store.u64_value("preprocessing.cores")?,
        norm,
        del_slide: store.bool_value("preprocessing.del_slide")?,
        cache: store.bool_value_or("preprocessing.cache", true)?,
        only_feature_extraction: store.bool_value("preprocessing.only_feature_extraction")?,
        keep_dir_structure: store.bool_value_or("preprocessing.keep_dir_structure", false)?,
        device: store.str_value("preprocessing.device")?.to_string(),
        extractor,
    };

    backend.preprocess(&params)
}

/// A path key may hold a single string or a sequence of strings.
fn path_values(store: &ConfigStore, dotted: &str) -> Result<Vec<PathBuf>> {
    let wrong_shape =
        || WsiprepError::ConfigError(format!("'{dotted}' must be a path or a list of paths"));
    match store.select_raw(dotted) {
        Some(Value::String(s)) => Ok(vec![PathBuf::from(s)]),
        Some(Value::Sequence(seq)) => seq
            .iter()
            .map(|v| v.as_str().map(PathBuf::from).ok_or_else(wrong_shape))
            .collect(),
        _ => Err(wrong_shape()),
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use super::*;
    use crate::fs::mock::MockFileSystem;

    /// Backend that records hand-offs instead of spawning anything.
    #[derive(Debug, Default)]
    struct RecordingBackend {
        preprocessed: RefCell<Vec<PreprocessParams>>,
    }

    impl PipelineBackend for RecordingBackend {
        fn fetch_resources(&self, _ctx: &RunContext, _extractor: FeatureExtractor) -> Result<()> {
            Ok(())
        }

        fn preprocess(&self, params: &PreprocessParams) -> Result<()> {
            self.preprocessed.borrow_mut().push(params.clone());
            Ok(())
        }
    }

    const FULL_CONFIG: &str = "\
preprocessing:
  output_dir: /out
  wsi_dir: /data/slides
  cache_dir: /cache
  microns: 256.0
  cores: 8
  norm: true
  del_slide: false
  only_feature_extraction: false
  device: cuda
  feat_extractor: ctp
";

    fn ready_fs() -> MockFileSystem {
        let fs = MockFileSystem::new();
        fs.add_dir("/data/slides");
        fs.add_file("/opt/wsiprep/resources/normalization_template.jpg", b"jpg".to_vec());
        fs.add_file("/opt/wsiprep/resources/ctranspath.pth", b"pth".to_vec());
        fs
    }

    #[test]
    fn hands_typed_params_to_the_backend() {
        let fs = ready_fs();
        let ctx = RunContext::new("/opt/wsiprep/resources");
        let store = ConfigStore::from_yaml_str(FULL_CONFIG).unwrap();
        let backend = RecordingBackend::default();

        run(&store, &ctx, &fs, &backend).unwrap();

        let calls = backend.preprocessed.borrow();
        assert_eq!(calls.len(), 1);
        let params = &calls[0];
        assert_eq!(params.output_dir, PathBuf::from("/out"));
        assert_eq!(params.wsi_dirs, vec![PathBuf::from("/data/slides")]);
        assert_eq!(params.extractor, FeatureExtractor::Ctp);
        assert!(params.cache, "cache defaults to true when omitted");
        assert!(!params.keep_dir_structure);
        assert_eq!(
            params.normalization_template.as_deref(),
            Some(std::path::Path::new(
                "/opt/wsiprep/resources/normalization_template.jpg"
            ))
        );
    }

    #[test]
    fn missing_weights_block_the_hand_off() {
        let fs = MockFileSystem::new();
        fs.add_dir("/data/slides");
        fs.add_file("/opt/wsiprep/resources/normalization_template.jpg", b"jpg".to_vec());
        let ctx = RunContext::new("/opt/wsiprep/resources");
        let store = ConfigStore::from_yaml_str(FULL_CONFIG).unwrap();
        let backend = RecordingBackend::default();

        let err = run(&store, &ctx, &fs, &backend).unwrap_err();
        assert!(err.to_string().contains("wsiprep setup"));
        assert!(backend.preprocessed.borrow().is_empty());
    }

    #[test]
    fn validation_failure_never_reaches_the_backend() {
        let fs = ready_fs();
        let ctx = RunContext::new("/opt/wsiprep/resources");
        let store = ConfigStore::from_yaml_str("preprocessing:\n  output_dir: /out\n").unwrap();
        let backend = RecordingBackend::default();

        let err = run(&store, &ctx, &fs, &backend).unwrap_err();
        assert!(matches!(err, WsiprepError::MissingRequiredKeys(_)));
        assert!(backend.preprocessed.borrow().is_empty());
    }
}
