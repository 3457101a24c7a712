//! Configuration Management
//!
//! Optional defaults file for awsweep. Command-line flags always win; the
//! file only supplies values the user did not pass.

use serde::Deserialize;
use std::path::PathBuf;

/// User defaults, read from `<config dir>/awsweep/config.json`.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct Config {
    /// Default AWS region.
    #[serde(default)]
    pub region: Option<String>,
    /// Default AWS credentials profile.
    #[serde(default)]
    pub profile: Option<String>,
}

impl Config {
    fn config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("awsweep").join("config.json"))
    }

    /// Load the defaults file; a missing or malformed file means no defaults.
    pub fn load() -> Self {
        let Some(path) = Self::config_path() else {
            return Self::default();
        };

        if !path.exists() {
            return Self::default();
        }

        match std::fs::read_to_string(&path) {
            Ok(content) => serde_json::from_str(&content).unwrap_or_default(),
            Err(_) => Self::default(),
        }
    }
}
