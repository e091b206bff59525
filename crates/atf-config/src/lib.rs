use std::collections::HashMap;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use atf_types::OcrRegion;
use serde::{Deserialize, Serialize};

use self::input::InputConfig;
use self::navigation::NavigationConfig;
use self::ocr::OcrCorrections;

pub mod input;
pub mod navigation;
pub mod ocr;
pub mod teams;

pub use teams::{LeagueEntry, TeamEntry, TeamId, TeamsFile};

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Invalid YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Invalid value for {key}: {value:?}")]
    InvalidEnv { key: String, value: String },

    #[error("{key} must be in [0, 1), got {value}")]
    OutOfRange { key: String, value: f64 },

    #[error("No configuration for game version '{0}'")]
    UnknownVersion(String),

    #[error("Invalid teams list: {0}")]
    InvalidTeams(String),
}

/// Per game version screen layout
#[derive(Debug, Serialize, Deserialize, Clone, Default)]
#[serde(default)]
pub struct VersionConfig {
    pub ocr_regions: HashMap<String, OcrRegion>,
}

#[derive(Debug, Serialize, Deserialize, Clone, Default)]
#[serde(default)]
pub struct Config {
    pub ocr_corrections: OcrCorrections,
    pub navigation: NavigationConfig,
    pub input: InputConfig,
    pub versions: HashMap<String, VersionConfig>,
}

impl Config {
    /// Read `path` and apply `ATF_*` environment overrides
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        tracing::info!("Loading config from {}", path.display());
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let mut config = Self::from_yaml_str(&text)?;
        config.apply_overrides(|key| env::var(key).ok())?;
        Ok(config)
    }

    pub fn from_yaml_str(text: &str) -> Result<Self, ConfigError> {
        if text.trim().is_empty() {
            return Ok(Self::default());
        }
        let config: Self = serde_yaml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let threshold = self.navigation.match_threshold;
        if !is_valid_threshold(threshold) {
            return Err(ConfigError::OutOfRange {
                key: "navigation.match_threshold".to_string(),
                value: threshold,
            });
        }
        Ok(())
    }

    pub fn regions(&self, version: &str) -> Result<&HashMap<String, OcrRegion>, ConfigError> {
        self.versions
            .get(version)
            .map(|v| &v.ocr_regions)
            .ok_or_else(|| ConfigError::UnknownVersion(version.to_string()))
    }

    /// Override navigation tunables from `lookup` (the process environment in `load`)
    pub fn apply_overrides(
        &mut self,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<(), ConfigError> {
        let nav = &mut self.navigation;

        if let Some(v) = lookup("ATF_SAMPLE_INTERVAL_MS") {
            nav.sample_interval_ms = parse_env("ATF_SAMPLE_INTERVAL_MS", &v)?;
        }
        if let Some(v) = lookup("ATF_MATCH_THRESHOLD") {
            let threshold: f64 = parse_env("ATF_MATCH_THRESHOLD", &v)?;
            if !is_valid_threshold(threshold) {
                return Err(ConfigError::InvalidEnv {
                    key: "ATF_MATCH_THRESHOLD".to_string(),
                    value: v,
                });
            }
            nav.match_threshold = threshold;
        }
        if let Some(v) = lookup("ATF_MAX_ATTEMPTS") {
            nav.max_attempts = if v.eq_ignore_ascii_case("none") {
                None
            } else {
                Some(parse_env("ATF_MAX_ATTEMPTS", &v)?)
            };
        }
        if let Some(v) = lookup("ATF_TIMEOUT_SECS") {
            nav.timeout_secs = if v.eq_ignore_ascii_case("none") {
                None
            } else {
                Some(parse_env("ATF_TIMEOUT_SECS", &v)?)
            };
        }

        Ok(())
    }
}

// NaN fails both comparisons
fn is_valid_threshold(value: f64) -> bool {
    (0.0..1.0).contains(&value)
}

fn parse_env<T: std::str::FromStr>(key: &str, value: &str) -> Result<T, ConfigError> {
    value.trim().parse().map_err(|_| ConfigError::InvalidEnv {
        key: key.to_string(),
        value: value.to_string(),
    })
}
