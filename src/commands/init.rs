// src/commands/init.rs

//! `wsiprep init`: write a fresh config file by copying the factory settings.

use std::path::Path;

use crate::config::resolver::absolute;
use crate::context::{DEFAULT_CONFIG_FILE, RunContext};
use crate::errors::{Result, WsiprepError};
use crate::fs::FileSystem;

/// Copy the factory settings to `output` (default `./config.yaml`).
///
/// No config resolution happens here; a missing factory file means the
/// install itself is broken.
pub fn run(fs: &dyn FileSystem, ctx: &RunContext, output: Option<&Path>) -> Result<()> {
    let dest = output.unwrap_or(Path::new(DEFAULT_CONFIG_FILE));
    let factory = ctx.factory_config_path();
    if !fs.exists(&factory) {
        return Err(WsiprepError::ConfigNotFound(factory));
    }
    let contents = fs.read_to_string(&factory)?;
    fs.write(dest, contents.as_bytes())?;
    println!("Created new config file at {}", absolute(dest).display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fs::mock::MockFileSystem;

    #[test]
    fn copies_factory_settings_to_default_location() {
        let fs = MockFileSystem::new();
        fs.add_file("/opt/wsiprep/resources/config.yaml", "preprocessing:\n");
        let ctx = RunContext::new("/opt/wsiprep/resources");

        run(&fs, &ctx, None).unwrap();

        assert_eq!(
            fs.read_to_string(Path::new("config.yaml")).unwrap(),
            "preprocessing:\n"
        );
    }

    #[test]
    fn honours_explicit_output_path() {
        let fs = MockFileSystem::new();
        fs.add_file("/opt/wsiprep/resources/config.yaml", "preprocessing:\n");
        let ctx = RunContext::new("/opt/wsiprep/resources");

        run(&fs, &ctx, Some(Path::new("/tmp/my.yaml"))).unwrap();

        assert!(fs.exists(Path::new("/tmp/my.yaml")));
    }

    #[test]
    fn missing_factory_settings_is_config_not_found() {
        let fs = MockFileSystem::new();
        let ctx = RunContext::new("/opt/wsiprep/resources");

        let err = run(&fs, &ctx, None).unwrap_err();
        assert!(matches!(err, WsiprepError::ConfigNotFound(_)));
    }
}
