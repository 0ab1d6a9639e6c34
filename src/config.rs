//! Configuration discovery and loading
//!
//! Resolution order:
//! 1. Explicit path (`--config`)
//! 2. `KIN_CONFIG` environment variable
//! 3. `kin.yaml` in the platform config directory, if it exists
//! 4. Built-in defaults

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, trace};

use crate::page::HOME_SCREEN;
use crate::{KinError, Result};

pub const CONFIG_ENV: &str = "KIN_CONFIG";
pub const CONFIG_FILE: &str = "kin.yaml";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct KinConfig {
    /// Screen shown at startup
    pub home_screen: String,
    /// Reject switches to unknown screens instead of hiding everything
    pub strict_screens: bool,
    /// YAML prompt catalog replacing the built-in one
    pub catalog: Option<PathBuf>,
    /// YAML page layout replacing the built-in one
    pub layout: Option<PathBuf>,
}

impl Default for KinConfig {
    fn default() -> Self {
        Self {
            home_screen: HOME_SCREEN.to_string(),
            strict_screens: false,
            catalog: None,
            layout: None,
        }
    }
}

impl KinConfig {
    /// Load a config file. Relative catalog/layout paths resolve against the file's directory.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|e| {
            KinError::Config(format!("Failed to read config {}: {}", path.display(), e))
        })?;
        let mut config: KinConfig = serde_yaml_ng::from_str(&contents)?;

        if config.home_screen.trim().is_empty() {
            return Err(KinError::Config("home_screen must not be empty".into()));
        }

        if let Some(base) = path.parent() {
            config.catalog = config.catalog.map(|p| resolve(base, p));
            config.layout = config.layout.map(|p| resolve(base, p));
        }

        debug!(path = %path.display(), "Loaded configuration");
        Ok(config)
    }

    /// Find and load configuration, falling back to defaults when nothing is found
    pub fn discover(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::load(path);
        }

        if let Some(path) = std::env::var_os(CONFIG_ENV).filter(|v| !v.is_empty()) {
            trace!("Using config from {}", CONFIG_ENV);
            return Self::load(PathBuf::from(path));
        }

        if let Some(path) = Self::default_path().filter(|p| p.exists()) {
            return Self::load(path);
        }

        trace!("No configuration file found, using defaults");
        Ok(Self::default())
    }

    /// `kin.yaml` inside the platform config directory
    pub fn default_path() -> Option<PathBuf> {
        ProjectDirs::from("", "", "kin").map(|dirs| dirs.config_dir().join(CONFIG_FILE))
    }
}

fn resolve(base: &Path, path: PathBuf) -> PathBuf {
    if path.is_absolute() {
        path
    } else {
        base.join(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_defaults() {
        let config = KinConfig::default();
        assert_eq!(config.home_screen, "home-screen");
        assert!(!config.strict_screens);
        assert!(config.catalog.is_none());
    }

    #[test]
    fn test_load_resolves_relative_paths() {
        let dir = tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE);
        fs::write(
            &path,
            "home_screen: prompts\nstrict_screens: true\ncatalog: prompts.yaml\n",
        )
        .unwrap();

        let config = KinConfig::load(&path).unwrap();
        assert_eq!(config.home_screen, "prompts");
        assert!(config.strict_screens);
        assert_eq!(config.catalog, Some(dir.path().join("prompts.yaml")));
        assert_eq!(config.layout, None);
    }

    #[test]
    fn test_unknown_keys_rejected() {
        let dir = tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE);
        fs::write(&path, "home: prompts\n").unwrap();
        assert!(matches!(KinConfig::load(&path), Err(KinError::Yaml(_))));
    }

    #[test]
    fn test_explicit_path_wins() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("custom.yaml");
        fs::write(&path, "home_screen: family\n").unwrap();
        let config = KinConfig::discover(Some(&path)).unwrap();
        assert_eq!(config.home_screen, "family");
    }

    #[test]
    fn test_missing_explicit_path_is_config_error() {
        let dir = tempdir().unwrap();
        let result = KinConfig::discover(Some(&dir.path().join("absent.yaml")));
        assert!(matches!(result, Err(KinError::Config(_))));
    }
}
