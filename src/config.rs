//! Configuration module for the method finder.
//!
//! This module provides a layered configuration system that supports:
//! - Default values
//! - TOML configuration file
//! - Environment variable overrides
//! - CLI argument overrides
//!
//! # Environment Variables
//!
//! Environment variables must be prefixed with `PROMOTED_` and use double underscores
//! to separate nested levels:
//! - `PROMOTED_DISCOVERY__CONCURRENCY_LIMIT=8` sets `discovery.concurrency_limit`
//! - `PROMOTED_DISCOVERY__FAIL_FAST=true` sets `discovery.fail_fast`
//! - `PROMOTED_RESOLUTION__MEMOIZE=false` sets `resolution.memoize`

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

const CONFIG_DIR: &str = ".promoted";
const CONFIG_FILE: &str = "settings.toml";
const ENV_PREFIX: &str = "PROMOTED_";

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct Settings {
    /// Global debug mode
    #[serde(default = "default_false")]
    pub debug: bool,

    /// Package discovery settings
    #[serde(default)]
    pub discovery: DiscoveryConfig,

    /// Method resolution settings
    #[serde(default)]
    pub resolution: ResolutionConfig,

    /// Import path lookup settings
    #[serde(default)]
    pub search: SearchConfig,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct DiscoveryConfig {
    /// Maximum number of concurrently spawned discovery tasks (0 = discover inline)
    #[serde(default = "default_concurrency_limit")]
    pub concurrency_limit: usize,

    /// Cancel the remaining discovery work as soon as one package fails
    #[serde(default = "default_false")]
    pub fail_fast: bool,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ResolutionConfig {
    /// Cache resolved method sets per type
    #[serde(default = "default_true")]
    pub memoize: bool,

    /// Include diagnostics (unresolved bases, cycles, ...) in the report and
    /// log them at warn level
    #[serde(default = "default_true")]
    pub report_diagnostics: bool,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct SearchConfig {
    /// Environment variable holding colon-separated search roots
    #[serde(default = "default_env_var")]
    pub env_var: String,

    /// Directory under each root that holds import paths
    #[serde(default = "default_src_dir")]
    pub src_dir: PathBuf,

    /// Extra search roots, consulted before the environment variable
    #[serde(default)]
    pub paths: Vec<PathBuf>,
}

// Default value functions
fn default_concurrency_limit() -> usize {
    num_cpus::get()
}
fn default_true() -> bool {
    true
}
fn default_false() -> bool {
    false
}
fn default_env_var() -> String {
    "GOPATH".to_string()
}
fn default_src_dir() -> PathBuf {
    PathBuf::from("src")
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            debug: false,
            discovery: DiscoveryConfig::default(),
            resolution: ResolutionConfig::default(),
            search: SearchConfig::default(),
        }
    }
}

impl Default for DiscoveryConfig {
    fn default() -> Self {
        Self {
            concurrency_limit: default_concurrency_limit(),
            fail_fast: false,
        }
    }
}

impl Default for ResolutionConfig {
    fn default() -> Self {
        Self {
            memoize: true,
            report_diagnostics: true,
        }
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            env_var: default_env_var(),
            src_dir: default_src_dir(),
            paths: Vec::new(),
        }
    }
}

impl Settings {
    /// Load configuration from all sources
    pub fn load() -> Result<Self, Box<figment::Error>> {
        let config_path = Self::find_workspace_config()
            .unwrap_or_else(|| PathBuf::from(CONFIG_DIR).join(CONFIG_FILE));

        Self::figment(config_path).extract().map_err(Box::new)
    }

    /// Load configuration from a specific file
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self, Box<figment::Error>> {
        Self::figment(path.as_ref().to_path_buf())
            .extract()
            .map_err(Box::new)
    }

    fn figment(config_path: PathBuf) -> Figment {
        Figment::new()
            .merge(Serialized::defaults(Settings::default()))
            .merge(Toml::file(config_path))
            // Double underscore separates nested levels, single underscore stays in the key
            .merge(Env::prefixed(ENV_PREFIX).map(|key| {
                key.as_str().to_lowercase().replace("__", ".").into()
            }))
    }

    /// Find `.promoted/settings.toml` by searching from the current directory up to root
    fn find_workspace_config() -> Option<PathBuf> {
        let current = std::env::current_dir().ok()?;

        for ancestor in current.ancestors() {
            let config_dir = ancestor.join(CONFIG_DIR);
            if config_dir.is_dir() {
                return Some(config_dir.join(CONFIG_FILE));
            }
        }

        None
    }

    /// Save current configuration to file
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), Box<dyn std::error::Error>> {
        let parent = path.as_ref().parent().ok_or("Invalid path")?;
        std::fs::create_dir_all(parent)?;

        let toml_string = toml::to_string_pretty(self)?;
        std::fs::write(path, toml_string)?;

        Ok(())
    }
}
