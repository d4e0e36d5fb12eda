//! Configuration for retention reports
//!
//! Supports loading configuration from:
//! - Default values
//! - Config file (retention.toml)
//! - Environment variables (RETENTION__*)
//!
//! ## Example config file (retention.toml):
//! ```toml
//! [scan]
//! path = "/srv/app/releases"
//! prefix = "Ver"
//!
//! [policy]
//! keep = 5
//! min_age = "2w"
//! ```

use config_crate::{Config, ConfigError, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::age::MinAge;

/// Main configuration for retention reports
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RetentionConfig {
    /// Where to look for version directories
    #[serde(default)]
    pub scan: ScanConfig,

    /// Which versions to keep
    #[serde(default)]
    pub policy: PolicyConfig,
}

/// Scan settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanConfig {
    /// Directory holding the version directories
    #[serde(default = "default_scan_path")]
    pub path: PathBuf,

    /// Text preceding the version in each directory name
    #[serde(default)]
    pub prefix: String,
}

/// Retention policy settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PolicyConfig {
    /// Minimum number of newest versions always kept
    #[serde(default = "default_keep")]
    pub keep: usize,

    /// Versions younger than this are kept regardless of count
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_age: Option<MinAge>,
}

fn default_scan_path() -> PathBuf {
    PathBuf::from(".")
}

fn default_keep() -> usize {
    3
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            path: default_scan_path(),
            prefix: String::new(),
        }
    }
}

impl Default for PolicyConfig {
    fn default() -> Self {
        Self {
            keep: default_keep(),
            min_age: None,
        }
    }
}

impl RetentionConfig {
    /// Load configuration from default locations
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(None)
    }

    /// Load configuration, layering an explicit file over the default locations
    pub fn load_from(config_path: Option<&str>) -> Result<Self, ConfigError> {
        let mut builder = Config::builder();

        // Load from the working directory, later names override earlier ones
        let config_locations = ["retention.toml", ".retention.toml", "config/retention.toml"];

        for location in config_locations {
            builder = builder.add_source(File::with_name(location).required(false));
        }

        // Load from the user config dir (~/.config/retention/retention.toml on Linux)
        let project_dirs = directories::ProjectDirs::from("dev", "version-retention", "retention");
        if let Some(config_dir) = project_dirs {
            let xdg_config = config_dir.config_dir().join("retention.toml");
            if xdg_config.exists() {
                builder = builder.add_source(File::from(xdg_config).required(false));
            }
        }

        // Load the explicit --config file, which must exist
        if let Some(path) = config_path {
            builder = builder.add_source(File::with_name(path).required(true));
        }

        // Environment overrides last: RETENTION__SCAN__PREFIX=Ver, RETENTION__POLICY__KEEP=5
        builder = builder.add_source(
            Environment::with_prefix("RETENTION")
                .prefix_separator("__")
                .separator("__")
                .try_parsing(true),
        );

        let config = builder.build()?;
        config.try_deserialize()
    }

    /// Save configuration to a file
    pub fn save(&self, path: &str) -> std::io::Result<()> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;
        std::fs::write(path, content)
    }

    /// Get the scan path (resolves relative paths)
    pub fn scan_path(&self) -> PathBuf {
        if self.scan.path.is_absolute() {
            self.scan.path.clone()
        } else {
            std::env::current_dir()
                .unwrap_or_default()
                .join(&self.scan.path)
        }
    }
}
