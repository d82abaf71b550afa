// src/config/store.rs

//! In-memory configuration document with dotted-key lookup.
//!
//! The document is held as a [`serde_yaml::Value`] tree and never mutated
//! after load. Lookup distinguishes three outcomes:
//!
//! - `Absent`: some segment of the dotted key does not resolve (missing key,
//!   or an intermediate segment is not a mapping),
//! - `Null`: every segment resolves but the final value is an explicit null,
//! - `Value(v)`: the key resolves to a real value.
//!
//! Shape mismatches mid-walk (a scalar where a mapping was expected) count as
//! `Absent`, never as an error — the validator only cares about pass/fail.

use serde_yaml::Value;

use crate::errors::{Result, WsiprepError};

/// Result of a dotted-key lookup.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Lookup<'a> {
    Absent,
    Null,
    Value(&'a Value),
}

impl Lookup<'_> {
    /// A key "has" a value only when it is present and non-null.
    pub fn is_present(&self) -> bool {
        matches!(self, Lookup::Value(_))
    }
}

/// Loaded configuration document, read-only after construction.
#[derive(Debug, Clone)]
pub struct ConfigStore {
    root: Value,
}

impl ConfigStore {
    pub fn from_yaml_str(contents: &str) -> Result<Self> {
        let root: Value = serde_yaml::from_str(contents)?;
        Ok(Self { root })
    }

    pub fn root(&self) -> &Value {
        &self.root
    }

    /// Resolve a dotted key (`a.b.c`) against the document.
    pub fn get(&self, dotted: &str) -> Lookup<'_> {
        let mut current = &self.root;
        for segment in dotted.split('.') {
            match current.get(segment) {
                Some(next) => current = next,
                None => return Lookup::Absent,
            }
        }
        if current.is_null() {
            Lookup::Null
        } else {
            Lookup::Value(current)
        }
    }

    /// Raw value access for the validator's list-valued path keys.
    ///
    /// Returns `None` when the key is absent; a present-but-null key still
    /// returns the null value.
    pub fn select_raw(&self, dotted: &str) -> Option<&Value> {
        let mut current = &self.root;
        for segment in dotted.split('.') {
            current = current.get(segment)?;
        }
        Some(current)
    }

    /// String value of a key, for reads after validation has passed.
    pub fn str_value(&self, dotted: &str) -> Result<&str> {
        match self.get(dotted) {
            Lookup::Value(Value::String(s)) => Ok(s.as_str()),
            _ => Err(type_error(dotted, "a string")),
        }
    }

    pub fn bool_value(&self, dotted: &str) -> Result<bool> {
        match self.get(dotted) {
            Lookup::Value(Value::Bool(b)) => Ok(*b),
            _ => Err(type_error(dotted, "a boolean")),
        }
    }

    /// Boolean value with a default for keys the document may omit.
    pub fn bool_value_or(&self, dotted: &str, default: bool) -> Result<bool> {
        match self.get(dotted) {
            Lookup::Value(Value::Bool(b)) => Ok(*b),
            Lookup::Absent | Lookup::Null => Ok(default),
            Lookup::Value(_) => Err(type_error(dotted, "a boolean")),
        }
    }

    pub fn f64_value(&self, dotted: &str) -> Result<f64> {
        match self.get(dotted) {
            Lookup::Value(Value::Number(n)) => n
                .as_f64()
                .ok_or_else(|| type_error(dotted, "a number")),
            _ => Err(type_error(dotted, "a number")),
        }
    }

    pub fn u64_value(&self, dotted: &str) -> Result<u64> {
        match self.get(dotted) {
            Lookup::Value(Value::Number(n)) => n
                .as_u64()
                .ok_or_else(|| type_error(dotted, "a non-negative integer")),
            _ => Err(type_error(dotted, "a non-negative integer")),
        }
    }
}

fn type_error(dotted: &str, expected: &str) -> WsiprepError {
    WsiprepError::ConfigError(format!("'{dotted}' must be {expected}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store(yaml: &str) -> ConfigStore {
        ConfigStore::from_yaml_str(yaml).unwrap()
    }

    #[test]
    fn absent_when_key_missing() {
        let s = store("preprocessing:\n  output_dir: /out\n");
        assert_eq!(s.get("preprocessing.wsi_dir"), Lookup::Absent);
        assert_eq!(s.get("modeling.targets"), Lookup::Absent);
    }

    #[test]
    fn null_when_final_segment_is_explicit_null() {
        let s = store("preprocessing:\n  cache_dir:\n");
        assert_eq!(s.get("preprocessing.cache_dir"), Lookup::Null);
    }

    #[test]
    fn value_when_key_resolves() {
        let s = store("preprocessing:\n  cores: 8\n");
        match s.get("preprocessing.cores") {
            Lookup::Value(v) => assert_eq!(v.as_u64(), Some(8)),
            other => panic!("expected Value, got {other:?}"),
        }
    }

    #[test]
    fn scalar_mid_walk_counts_as_absent() {
        // `preprocessing` is a scalar, so `preprocessing.cores` cannot
        // resolve; that is a missing key, not an error.
        let s = store("preprocessing: 42\n");
        assert_eq!(s.get("preprocessing.cores"), Lookup::Absent);
    }

    #[test]
    fn select_raw_returns_sequences() {
        let s = store("preprocessing:\n  wsi_dir:\n    - /a\n    - /b\n");
        let raw = s.select_raw("preprocessing.wsi_dir").unwrap();
        assert!(raw.is_sequence());
        assert!(s.select_raw("preprocessing.nope").is_none());
    }

    #[test]
    fn typed_getters_reject_wrong_shapes() {
        let s = store("preprocessing:\n  norm: true\n  microns: 256.0\n");
        assert!(s.bool_value("preprocessing.norm").unwrap());
        assert_eq!(s.f64_value("preprocessing.microns").unwrap(), 256.0);
        assert!(s.str_value("preprocessing.norm").is_err());
        assert!(s.bool_value_or("preprocessing.cache", true).unwrap());
    }
}
