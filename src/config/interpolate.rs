// src/config/interpolate.rs

//! `${env:VAR}` interpolation for the `config` command.
//!
//! Only string values are interpolated; mappings and sequences are walked
//! recursively. References to unset variables are left as-is so the printed
//! document shows the user exactly which reference failed to resolve.

use std::sync::LazyLock;

use regex::Regex;
use serde_yaml::Value;
use tracing::warn;

static ENV_REF: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\$\{env:([A-Za-z_][A-Za-z0-9_]*)\}").unwrap());

/// Return a copy of the document with all `${env:VAR}` references replaced
/// by the variable's current value.
pub fn resolve_env_refs(value: &Value) -> Value {
    match value {
        Value::String(s) => Value::String(resolve_str(s)),
        Value::Sequence(seq) => Value::Sequence(seq.iter().map(resolve_env_refs).collect()),
        Value::Mapping(map) => Value::Mapping(
            map.iter()
                .map(|(k, v)| (k.clone(), resolve_env_refs(v)))
                .collect(),
        ),
        other => other.clone(),
    }
}

fn resolve_str(s: &str) -> String {
    ENV_REF
        .replace_all(s, |caps: &regex::Captures<'_>| {
            let name = &caps[1];
            match std::env::var(name) {
                Ok(value) => value,
                Err(_) => {
                    warn!(variable = name, "environment variable not set, leaving reference unresolved");
                    caps[0].to_string()
                }
            }
        })
        .into_owned()
}
