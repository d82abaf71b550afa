// src/config/mod.rs

pub mod interpolate;
pub mod requirements;
pub mod resolver;
pub mod store;

pub use requirements::{PREPROCESS_REQUIREMENTS, RequirementSpec, validate};
pub use resolver::{load, resolve_and_load, resolve_config_path};
pub use store::{ConfigStore, Lookup};
