// src/errors.rs

//! Crate-wide error taxonomy and `Result` alias.
//!
//! Every variant except `IoError` and `Other` is a user-input problem: it is
//! rendered as a one-line message at the top level and the process exits
//! non-zero. `IoError` covers environment problems (e.g. an existing but
//! unreadable file) and is kept apart from the configuration taxonomy.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum WsiprepError {
    #[error("Config file {} not found", .0.display())]
    ConfigNotFound(PathBuf),

    #[error("YAML parsing error: {0}")]
    ConfigParse(#[from] serde_yaml::Error),

    #[error("Missing required configuration keys: [{}]", .0.join(", "))]
    MissingRequiredKeys(Vec<String>),

    #[error(
        "From input path: '{path}'. Directory '{segment}' does not exist. \
         Check the input path of '{key}' from the '{section}' section."
    )]
    InvalidPath {
        path: String,
        segment: String,
        key: String,
        section: String,
    },

    #[error("Invalid path: cannot check an empty path")]
    EmptyPath,

    #[error("Unknown command: {0}")]
    UnknownCommand(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub use anyhow::Error;
pub type Result<T> = std::result::Result<T, WsiprepError>;
