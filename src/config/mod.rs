//! Configuration loading
//!
//! Layers, lowest precedence first: built-in defaults, `gitload.toml` (or an
//! explicit `--config` file), then `GITLOAD_*` environment variables. CLI
//! flags are merged on top by [`merge_cli_with_config`].

mod merge;

pub use merge::{merge_cli_with_config, CliOverrides};

use crate::domain::Config;
use anyhow::{Context, Result};
use figment::providers::{Env, Format, Serialized, Toml};
use figment::Figment;
use std::path::Path;

pub const DEFAULT_CONFIG_FILE: &str = "gitload.toml";

pub fn load_config(explicit: Option<&Path>) -> Result<Config> {
    let mut figment = Figment::from(Serialized::defaults(Config::default()));

    match explicit {
        Some(path) => {
            if !path.exists() {
                anyhow::bail!("config file not found: {}", path.display());
            }
            figment = figment.merge(Toml::file(path));
        }
        None => {
            let default = Path::new(DEFAULT_CONFIG_FILE);
            if default.exists() {
                figment = figment.merge(Toml::file(default));
            }
        }
    }

    figment
        .merge(Env::prefixed("GITLOAD_"))
        .extract()
        .context("failed to load configuration")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn missing_explicit_config_is_an_error() {
        let dir = TempDir::new().expect("temp dir");
        let err = load_config(Some(&dir.path().join("absent.toml"))).expect_err("should fail");
        assert!(err.to_string().contains("config file not found"));
    }

    #[test]
    fn explicit_config_file_overrides_defaults() {
        let dir = TempDir::new().expect("temp dir");
        let path = dir.path().join("gitload.toml");
        fs::write(&path, "max_characters = 4200\noutput_dir = \"packs\"\n").expect("write config");

        let config = load_config(Some(&path)).expect("load");
        assert_eq!(config.max_characters, 4200);
        assert_eq!(config.output_dir, std::path::PathBuf::from("packs"));
    }

    #[test]
    fn ref_alias_is_accepted() {
        let dir = TempDir::new().expect("temp dir");
        let path = dir.path().join("gitload.toml");
        fs::write(&path, "ref = \"main\"\n").expect("write config");

        let config = load_config(Some(&path)).expect("load");
        assert_eq!(config.ref_.as_deref(), Some("main"));
    }
}
