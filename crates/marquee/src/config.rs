//! # Configuration
//!
//! Marquee configuration is managed by [`confique`], which layers
//! environment variables over an optional TOML file over compiled defaults.
//!
//! ## Resolution Order
//!
//! 1. **Environment variables**: `MARQUEE_DATA_DIR`, `MARQUEE_SESSION_DIR`,
//!    `MARQUEE_SEED_CATALOG`.
//! 2. **Config file**: the `marquee.toml` passed to [`MarqueeConfig::load`].
//! 3. **Compiled defaults**: OS-appropriate directories via the
//!    `directories` crate.
//!
//! ## Available Settings
//!
//! | Key | Default | Description |
//! |-----|---------|-------------|
//! | `data_dir` | platform data dir | Durable storage (users, catalog) |
//! | `session_dir` | platform cache dir | Ephemeral storage (session, selected profile) |
//! | `seed_catalog` | `true` | Seed the demo catalog when the store is opened |

use crate::error::{MarqueeError, Result};
use confique::Config;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Config, Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct MarqueeConfig {
    /// Directory for durable data. Platform data dir when unset.
    #[config(env = "MARQUEE_DATA_DIR")]
    pub data_dir: Option<PathBuf>,

    /// Directory for session data. Platform cache dir when unset.
    #[config(env = "MARQUEE_SESSION_DIR")]
    pub session_dir: Option<PathBuf>,

    /// Seed the demo catalog on open if the stored catalog is empty.
    #[config(default = true, env = "MARQUEE_SEED_CATALOG")]
    pub seed_catalog: bool,
}

impl Default for MarqueeConfig {
    fn default() -> Self {
        Self {
            data_dir: None,
            session_dir: None,
            seed_catalog: true,
        }
    }
}

/// Concrete directories for the two storage scopes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoragePaths {
    pub durable: PathBuf,
    pub ephemeral: PathBuf,
}

impl MarqueeConfig {
    /// Load from the environment and, if it exists, `file`.
    pub fn load(file: Option<&Path>) -> Result<Self> {
        let mut builder = Self::builder().env();
        if let Some(file) = file {
            builder = builder.file(file);
        }
        builder
            .load()
            .map_err(|e| MarqueeError::Config(e.to_string()))
    }

    pub fn resolve_paths(&self) -> Result<StoragePaths> {
        if let (Some(durable), Some(ephemeral)) = (&self.data_dir, &self.session_dir) {
            return Ok(StoragePaths {
                durable: durable.clone(),
                ephemeral: ephemeral.clone(),
            });
        }

        let dirs = ProjectDirs::from("", "", "marquee").ok_or_else(|| {
            MarqueeError::Config("Could not determine a home directory".to_string())
        })?;
        Ok(StoragePaths {
            durable: self
                .data_dir
                .clone()
                .unwrap_or_else(|| dirs.data_dir().to_path_buf()),
            ephemeral: self
                .session_dir
                .clone()
                .unwrap_or_else(|| dirs.cache_dir().join("session")),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_default_config() {
        let config = MarqueeConfig::default();
        assert!(config.seed_catalog);
        assert!(config.data_dir.is_none());
        assert!(config.session_dir.is_none());
    }

    #[test]
    fn test_explicit_paths_win() {
        let config = MarqueeConfig {
            data_dir: Some(PathBuf::from("/tmp/m/data")),
            session_dir: Some(PathBuf::from("/tmp/m/session")),
            seed_catalog: true,
        };
        let paths = config.resolve_paths().unwrap();
        assert_eq!(paths.durable, PathBuf::from("/tmp/m/data"));
        assert_eq!(paths.ephemeral, PathBuf::from("/tmp/m/session"));
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("marquee.toml");
        fs::write(
            &file,
            "data_dir = \"/srv/marquee\"\nsession_dir = \"/run/marquee\"\nseed_catalog = false\n",
        )
        .unwrap();

        let config = MarqueeConfig::load(Some(&file)).unwrap();
        // Skip keys overridden by the environment.
        if std::env::var_os("MARQUEE_SEED_CATALOG").is_none() {
            assert!(!config.seed_catalog);
        }
        if std::env::var_os("MARQUEE_DATA_DIR").is_none() {
            assert_eq!(config.data_dir, Some(PathBuf::from("/srv/marquee")));
        }
    }

    #[test]
    fn test_load_without_file_uses_defaults() {
        if std::env::var_os("MARQUEE_SEED_CATALOG").is_some() {
            return;
        }
        let config = MarqueeConfig::load(None).unwrap();
        assert!(config.seed_catalog);
    }
}
