//! Environment-backed configuration.
//!
//! Every setting has a default. Override with `URL_VALIDITY_*` environment
//! variables; CLI flags override both.

pub mod error;

#[cfg(test)]
mod tests;

pub use error::ConfigError;

use std::env;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::constants::{
    DEFAULT_EMBED_CACHE_CAPACITY, DEFAULT_FETCH_TIMEOUT, DEFAULT_OUTPUT_PATH, DEFAULT_USER_AGENT,
};
use crate::embedding::{ClassifierConfig, SentenceEmbedderConfig};
use crate::fetch::FetchConfig;

/// Runtime configuration loaded from environment variables.
///
/// Use [`Config::from_env`] to read `URL_VALIDITY_*` overrides on top of defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// Sentence embedding model directory. Stub embedder when unset.
    pub embedder_path: Option<PathBuf>,

    /// Sentiment classifier model directory. Stub classifier when unset.
    pub classifier_path: Option<PathBuf>,

    /// Evaluation table written by `batch`. Default: `./deliverable.csv`.
    pub output_path: PathBuf,

    /// Table read as prior rows instead of `output_path`.
    pub prior_path: Option<PathBuf>,

    /// Per-request fetch timeout in seconds. Default: `10`.
    pub timeout_secs: u64,

    /// `User-Agent` sent with every fetch.
    pub user_agent: String,

    /// Distinct texts kept by the embedding cache. `0` disables caching.
    pub embed_cache_capacity: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            embedder_path: None,
            classifier_path: None,
            output_path: PathBuf::from(DEFAULT_OUTPUT_PATH),
            prior_path: None,
            timeout_secs: DEFAULT_FETCH_TIMEOUT.as_secs(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            embed_cache_capacity: DEFAULT_EMBED_CACHE_CAPACITY,
        }
    }
}

impl Config {
    const ENV_OUTPUT_PATH: &'static str = "URL_VALIDITY_OUTPUT_PATH";
    const ENV_PRIOR_PATH: &'static str = "URL_VALIDITY_PRIOR_PATH";
    const ENV_TIMEOUT_SECS: &'static str = "URL_VALIDITY_TIMEOUT_SECS";
    const ENV_USER_AGENT: &'static str = "URL_VALIDITY_USER_AGENT";
    const ENV_EMBED_CACHE_CAPACITY: &'static str = "URL_VALIDITY_EMBED_CACHE_CAPACITY";

    /// Loads configuration from environment variables (falling back to defaults).
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let timeout_secs = Self::parse_u64_from_env(Self::ENV_TIMEOUT_SECS, defaults.timeout_secs)?;
        if timeout_secs == 0 {
            return Err(ConfigError::InvalidTimeout {
                value: timeout_secs,
            });
        }

        let embedder = SentenceEmbedderConfig::from_env();

        Ok(Self {
            embedder_path: (!embedder.testing_stub).then_some(embedder.model_dir),
            classifier_path: ClassifierConfig::from_env().model_path,
            output_path: Self::parse_optional_path_from_env(Self::ENV_OUTPUT_PATH)
                .unwrap_or(defaults.output_path),
            prior_path: Self::parse_optional_path_from_env(Self::ENV_PRIOR_PATH),
            timeout_secs,
            user_agent: Self::parse_string_from_env(Self::ENV_USER_AGENT, defaults.user_agent),
            embed_cache_capacity: Self::parse_u64_from_env(
                Self::ENV_EMBED_CACHE_CAPACITY,
                defaults.embed_cache_capacity,
            )?,
        })
    }

    /// Validates paths and basic invariants (does not create directories).
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.timeout_secs == 0 {
            return Err(ConfigError::InvalidTimeout {
                value: self.timeout_secs,
            });
        }
        if self.user_agent.trim().is_empty() {
            return Err(ConfigError::EmptyUserAgent);
        }

        for path in [&self.embedder_path, &self.classifier_path]
            .into_iter()
            .flatten()
        {
            Self::require_dir(path)?;
        }

        if self.output_path.is_dir() {
            return Err(ConfigError::NotAFile {
                path: self.output_path.clone(),
            });
        }

        if let Some(ref path) = self.prior_path {
            if !path.exists() {
                return Err(ConfigError::PathNotFound { path: path.clone() });
            }
            if !path.is_file() {
                return Err(ConfigError::NotAFile { path: path.clone() });
            }
        }

        Ok(())
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn fetch_config(&self) -> FetchConfig {
        FetchConfig::default()
            .with_timeout(self.timeout())
            .with_user_agent(self.user_agent.clone())
    }

    /// Embedder config for the configured path, or a stub config.
    pub fn embedder_config(&self) -> SentenceEmbedderConfig {
        match self.embedder_path {
            Some(ref path) => SentenceEmbedderConfig::new(path),
            None => SentenceEmbedderConfig::stub(),
        }
    }

    /// Classifier config for the configured path, or a stub config.
    pub fn classifier_config(&self) -> ClassifierConfig {
        match self.classifier_path {
            Some(ref path) => ClassifierConfig::new(path),
            None => ClassifierConfig::stub(),
        }
    }

    fn require_dir(path: &Path) -> Result<(), ConfigError> {
        if !path.exists() {
            return Err(ConfigError::PathNotFound {
                path: path.to_path_buf(),
            });
        }
        if !path.is_dir() {
            return Err(ConfigError::NotADirectory {
                path: path.to_path_buf(),
            });
        }
        Ok(())
    }

    fn parse_optional_path_from_env(var_name: &str) -> Option<PathBuf> {
        env::var(var_name)
            .ok()
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .map(PathBuf::from)
    }

    fn parse_string_from_env(var_name: &str, default: String) -> String {
        env::var(var_name)
            .ok()
            .filter(|v| !v.trim().is_empty())
            .unwrap_or(default)
    }

    fn parse_u64_from_env(name: &'static str, default: u64) -> Result<u64, ConfigError> {
        match env::var(name) {
            Ok(value) => value
                .trim()
                .parse()
                .map_err(|e| ConfigError::InvalidNumber {
                    name,
                    value,
                    source: e,
                }),
            Err(_) => Ok(default),
        }
    }
}
