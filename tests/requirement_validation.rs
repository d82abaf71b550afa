// tests/requirement_validation.rs

mod common;

use tempfile::TempDir;
use wsiprep::config::{ConfigStore, RequirementSpec, validate};
use wsiprep::errors::WsiprepError;
use wsiprep::fs::RealFileSystem;

const SPEC: RequirementSpec = RequirementSpec {
    section: "preprocessing",
    required: &["output_dir", "wsi_dir"],
    paths: &["wsi_dir"],
};

#[test]
fn absent_key_is_reported_with_its_full_dotted_name() {
    common::init_tracing();
    let store =
        ConfigStore::from_yaml_str("preprocessing:\n  output_dir: \"/out\"\n").unwrap();

    let err = validate(&store, &RealFileSystem, &SPEC).unwrap_err();
    match err {
        WsiprepError::MissingRequiredKeys(keys) => {
            assert_eq!(keys, vec!["preprocessing.wsi_dir".to_string()]);
        }
        other => panic!("expected MissingRequiredKeys, got {other:?}"),
    }
}

#[test]
fn all_missing_keys_are_batched_into_one_error() {
    common::init_tracing();
    let spec = RequirementSpec {
        section: "preprocessing",
        required: &["a", "b", "c"],
        paths: &[],
    };
    let store = ConfigStore::from_yaml_str("preprocessing:\n  a: 1\n").unwrap();

    let err = validate(&store, &RealFileSystem, &spec).unwrap_err();
    match err {
        WsiprepError::MissingRequiredKeys(keys) => {
            assert_eq!(
                keys,
                vec![
                    "preprocessing.b".to_string(),
                    "preprocessing.c".to_string(),
                ]
            );
        }
        other => panic!("expected MissingRequiredKeys, got {other:?}"),
    }
}

#[test]
fn bad_path_produces_the_full_diagnostic() {
    common::init_tracing();
    let dir = TempDir::new().unwrap();
    let bad = dir.path().join("cohort/slides");
    let yaml = format!(
        "preprocessing:\n  output_dir: /out\n  wsi_dir: \"{}\"\n",
        bad.display()
    );
    let store = ConfigStore::from_yaml_str(&yaml).unwrap();

    let err = validate(&store, &RealFileSystem, &SPEC).unwrap_err();
    match &err {
        WsiprepError::InvalidPath {
            path,
            segment,
            key,
            section,
        } => {
            assert_eq!(path, &bad.display().to_string());
            assert_eq!(segment, "cohort");
            assert_eq!(key, "wsi_dir");
            assert_eq!(section, "preprocessing");
        }
        other => panic!("expected InvalidPath, got {other:?}"),
    }

    let message = err.to_string();
    assert!(message.contains(&format!("From input path: '{}'", bad.display())));
    assert!(message.contains("Directory 'cohort' does not exist"));
    assert!(message.contains("'wsi_dir' from the 'preprocessing' section"));
}

#[test]
fn path_errors_never_surface_before_presence_errors() {
    common::init_tracing();
    // wsi_dir points nowhere AND output_dir is missing: the missing key is
    // the root cause and must be the error the user sees.
    let store =
        ConfigStore::from_yaml_str("preprocessing:\n  wsi_dir: /definitely/not/here\n").unwrap();

    let err = validate(&store, &RealFileSystem, &SPEC).unwrap_err();
    assert!(matches!(err, WsiprepError::MissingRequiredKeys(_)));
}

#[test]
fn sequence_valued_path_key_checks_every_element() {
    common::init_tracing();
    let dir = TempDir::new().unwrap();
    let good = dir.path().join("a");
    std::fs::create_dir_all(&good).unwrap();
    let bad = dir.path().join("b/deep");
    let yaml = format!(
        "preprocessing:\n  output_dir: /out\n  wsi_dir:\n    - \"{}\"\n    - \"{}\"\n",
        good.display(),
        bad.display()
    );
    let store = ConfigStore::from_yaml_str(&yaml).unwrap();

    let err = validate(&store, &RealFileSystem, &SPEC).unwrap_err();
    match err {
        WsiprepError::InvalidPath { path, segment, .. } => {
            assert_eq!(path, bad.display().to_string());
            assert_eq!(segment, "b");
        }
        other => panic!("expected InvalidPath, got {other:?}"),
    }
}

#[test]
fn fully_satisfied_spec_passes() {
    common::init_tracing();
    let dir = TempDir::new().unwrap();
    let slides = dir.path().join("slides");
    std::fs::create_dir_all(&slides).unwrap();
    let yaml = format!(
        "preprocessing:\n  output_dir: /out\n  wsi_dir: \"{}\"\n",
        slides.display()
    );
    let store = ConfigStore::from_yaml_str(&yaml).unwrap();

    validate(&store, &RealFileSystem, &SPEC).unwrap();
}
