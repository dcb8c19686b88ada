//! Configuration for rangegen.
//!
//! Every field has a built-in default, so no file is needed. An optional YAML
//! file can override the bulk sources, the fetch timeout and output paths.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::RangegenError;

pub const DEFAULT_OUTPUT: &str = "all_russia_combined.txt";
pub const DEFAULT_DIRECTORY: &str = "russia_ranges";
pub const DEFAULT_CONFIGS_DIR: &str = "scan_configs";
pub const DEFAULT_FETCH_TIMEOUT_SECS: u64 = 15;

const MAX_FETCH_TIMEOUT_SECS: u64 = 300;

/// A remote list of CIDR blocks for the bulk category
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BulkSource {
    pub name: String,
    pub url: String,
}

impl BulkSource {
    pub fn new(name: &str, url: &str) -> Self {
        Self {
            name: name.to_string(),
            url: url.to_string(),
        }
    }
}

/// Main configuration structure
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Sources merged into the bulk category
    pub sources: Vec<BulkSource>,

    /// Per-source HTTP timeout
    pub fetch_timeout_secs: u64,

    /// Combined output file
    pub output: PathBuf,

    /// Directory for the per-category files
    pub directory: PathBuf,

    /// Directory for scanner configuration templates
    pub configs_dir: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            sources: default_sources(),
            fetch_timeout_secs: DEFAULT_FETCH_TIMEOUT_SECS,
            output: PathBuf::from(DEFAULT_OUTPUT),
            directory: PathBuf::from(DEFAULT_DIRECTORY),
            configs_dir: PathBuf::from(DEFAULT_CONFIGS_DIR),
        }
    }
}

/// Country block lists for Russia
pub fn default_sources() -> Vec<BulkSource> {
    vec![
        BulkSource::new(
            "ipdeny",
            "http://www.ipdeny.com/ipblocks/data/countries/ru.zone",
        ),
        BulkSource::new(
            "country-ip-blocks",
            "https://raw.githubusercontent.com/herrbischoff/country-ip-blocks/master/ipv4/ru.cidr",
        ),
    ]
}

impl Config {
    /// Load configuration from YAML file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read config file: {:?}", path.as_ref()))?;
        let config = Self::from_yaml(&content)
            .with_context(|| format!("Failed to parse config file: {:?}", path.as_ref()))?;
        Ok(config)
    }

    /// Parse and validate configuration from YAML text
    pub fn from_yaml(content: &str) -> Result<Self, RangegenError> {
        let config: Config =
            serde_yaml::from_str(content).map_err(|e| RangegenError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<(), RangegenError> {
        if self.sources.is_empty() {
            return Err(RangegenError::Config(
                "At least one bulk source is required".to_string(),
            ));
        }

        for source in &self.sources {
            if source.name.trim().is_empty() {
                return Err(RangegenError::Config(format!(
                    "Source with URL '{}' has an empty name",
                    source.url
                )));
            }
            if !source.url.starts_with("http://") && !source.url.starts_with("https://") {
                return Err(RangegenError::Config(format!(
                    "Source '{}' URL must use http or https: {}",
                    source.name, source.url
                )));
            }
        }

        if self.fetch_timeout_secs == 0 || self.fetch_timeout_secs > MAX_FETCH_TIMEOUT_SECS {
            return Err(RangegenError::Config(format!(
                "Invalid fetch_timeout_secs {}. Use a value between 1 and {}",
                self.fetch_timeout_secs, MAX_FETCH_TIMEOUT_SECS
            )));
        }

        if self.output.as_os_str().is_empty() {
            return Err(RangegenError::Config("output must not be empty".to_string()));
        }

        if self.directory.as_os_str().is_empty() {
            return Err(RangegenError::Config(
                "directory must not be empty".to_string(),
            ));
        }

        Ok(())
    }
}
