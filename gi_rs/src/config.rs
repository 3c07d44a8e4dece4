//! Configuration file support for gi.
//!
//! Loads an optional `config.toml` from `$GI_CONFIG`, or from
//! `<config dir>/gi/config.toml` when the variable is unset.

use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Environment variable naming an explicit config file.
pub const CONFIG_ENV: &str = "GI_CONFIG";

/// Root configuration structure
#[derive(Debug, Default, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct GiConfig {
    /// Git executable to wrap (overridden by `--gi-git=`)
    pub git: Option<String>,
    /// Default dash policy (`--gi-do-not-process-dashes` always turns it off)
    pub process_dashes: Option<bool>,
}

impl GiConfig {
    /// Load config from the default location.
    /// Returns default config if the file doesn't exist or is invalid.
    pub fn load() -> Self {
        match Self::default_path() {
            Some(path) => Self::load_from_path(&path),
            None => Self::default(),
        }
    }

    /// `$GI_CONFIG`, else `<config dir>/gi/config.toml`.
    pub fn default_path() -> Option<PathBuf> {
        std::env::var_os(CONFIG_ENV)
            .map(PathBuf::from)
            .or_else(|| dirs::config_dir().map(|dir| dir.join("gi").join("config.toml")))
    }

    /// Load config from a specific path.
    pub fn load_from_path(path: &Path) -> Self {
        if !path.exists() {
            debug!(path = %path.display(), "no config file");
            return Self::default();
        }

        match std::fs::read_to_string(path) {
            Ok(content) => match toml::from_str(&content) {
                Ok(config) => config,
                Err(e) => {
                    warn!("Failed to parse {}: {}", path.display(), e);
                    Self::default()
                }
            },
            Err(e) => {
                warn!("Failed to read {}: {}", path.display(), e);
                Self::default()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = GiConfig::default();
        assert!(config.git.is_none());
        assert!(config.process_dashes.is_none());
    }

    #[test]
    fn test_load_missing_file() {
        let temp = TempDir::new().expect("temp dir");
        let config = GiConfig::load_from_path(&temp.path().join("config.toml"));
        assert_eq!(config, GiConfig::default());
    }

    #[test]
    fn test_load_valid_config() {
        let temp = TempDir::new().expect("temp dir");
        let config_path = temp.path().join("config.toml");
        let mut file = std::fs::File::create(&config_path).expect("create config");
        writeln!(
            file,
            r#"
git = "/usr/local/bin/git"
process_dashes = false
"#
        )
        .expect("write config");

        let config = GiConfig::load_from_path(&config_path);
        assert_eq!(config.git.as_deref(), Some("/usr/local/bin/git"));
        assert_eq!(config.process_dashes, Some(false));
    }

    #[test]
    fn test_partial_config() {
        let temp = TempDir::new().expect("temp dir");
        let config_path = temp.path().join("config.toml");
        std::fs::write(&config_path, "process_dashes = true\n").expect("write config");

        let config = GiConfig::load_from_path(&config_path);
        assert!(config.git.is_none());
        assert_eq!(config.process_dashes, Some(true));
    }

    #[test]
    fn test_invalid_config_falls_back_to_default() {
        let temp = TempDir::new().expect("temp dir");
        let config_path = temp.path().join("config.toml");
        std::fs::write(&config_path, "git = [not valid toml").expect("write config");

        assert_eq!(GiConfig::load_from_path(&config_path), GiConfig::default());
    }
}
