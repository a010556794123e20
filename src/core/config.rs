//! Configuration management with layered hierarchy

use serde::Deserialize;
use std::path::PathBuf;

/// CPT configuration with layered hierarchy
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Base URL of the hosted catalog store REST endpoint
    pub store_url: Option<String>,

    /// API key for the hosted catalog store
    pub store_key: Option<String>,
}

impl Config {
    /// Load configuration from all sources, merging in priority order
    pub fn load() -> Self {
        let mut config = Config::default();

        // 1. Built-in defaults (already in Default impl)

        // 2. Global user config (~/.config/cpt/config.yaml)
        if let Some(global_path) = Self::global_config_path() {
            if global_path.exists() {
                if let Ok(contents) = std::fs::read_to_string(&global_path) {
                    if let Ok(global) = serde_yml::from_str::<Config>(&contents) {
                        config.merge(global);
                    }
                }
            }
        }

        // 3. Environment variables
        if let Ok(url) = std::env::var("CPT_STORE_URL") {
            if !url.is_empty() {
                config.store_url = Some(url);
            }
        }
        if let Ok(key) = std::env::var("CPT_STORE_KEY") {
            if !key.is_empty() {
                config.store_key = Some(key);
            }
        }

        config
    }

    /// Get the path to the global config file
    fn global_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("", "", "cpt")
            .map(|dirs| dirs.config_dir().join("config.yaml"))
    }

    /// Merge another config into this one (other takes precedence)
    fn merge(&mut self, other: Config) {
        if other.store_url.is_some() {
            self.store_url = other.store_url;
        }
        if other.store_key.is_some() {
            self.store_key = other.store_key;
        }
    }
}
