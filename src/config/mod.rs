//! Environment-backed configuration.
//!
//! Most settings have defaults. Override with `GEORES_*` environment variables.

pub mod error;


pub use error::ConfigError;

use std::env;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::constants::{DEFAULT_RESULT_LIMIT, MAX_RESULT_LIMIT};

/// Resolver configuration loaded from environment variables.
///
/// Use [`Config::from_env`] to read `GEORES_*` overrides on top of defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// Elasticsearch endpoint holding the gazetteer. Default: `http://localhost:9200`.
    pub es_url: String,

    /// Gazetteer index name. Default: `geonames`.
    pub index_name: String,

    /// Candidates fetched per entity. Default: `25`.
    pub result_limit: usize,

    /// Timeout for every outbound HTTP call. Default: `10s`.
    pub request_timeout: Duration,

    /// Curated `name,replacement` alias table.
    pub substitutions_path: PathBuf,

    /// `Country,Adjectival,Demonym` table.
    pub demonyms_path: PathBuf,

    /// NER provider base URL.
    pub ner_url: Option<String>,

    /// Content extractor base URL.
    pub content_url: Option<String>,
}

/// Default Elasticsearch URL used when `GEORES_ES_URL` is not set.
pub const DEFAULT_ES_URL: &str = "http://localhost:9200";

/// Default gazetteer index name.
pub const DEFAULT_INDEX_NAME: &str = "geonames";

pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 10;

impl Default for Config {
    fn default() -> Self {
        Self {
            es_url: DEFAULT_ES_URL.to_string(),
            index_name: DEFAULT_INDEX_NAME.to_string(),
            result_limit: DEFAULT_RESULT_LIMIT,
            request_timeout: Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
            substitutions_path: PathBuf::from("data/custom-substitutions.csv"),
            demonyms_path: PathBuf::from("data/demonyms.csv"),
            ner_url: None,
            content_url: None,
        }
    }
}

impl Config {
    const ENV_ES_URL: &'static str = "GEORES_ES_URL";
    const ENV_INDEX_NAME: &'static str = "GEORES_INDEX_NAME";
    const ENV_RESULT_LIMIT: &'static str = "GEORES_RESULT_LIMIT";
    const ENV_REQUEST_TIMEOUT_SECS: &'static str = "GEORES_REQUEST_TIMEOUT_SECS";
    const ENV_SUBSTITUTIONS_PATH: &'static str = "GEORES_SUBSTITUTIONS_PATH";
    const ENV_DEMONYMS_PATH: &'static str = "GEORES_DEMONYMS_PATH";
    pub const ENV_NER_URL: &'static str = "GEORES_NER_URL";
    pub const ENV_CONTENT_URL: &'static str = "GEORES_CONTENT_URL";

    /// Loads configuration from environment variables (falling back to defaults).
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let es_url = Self::parse_string_from_env(Self::ENV_ES_URL, defaults.es_url);
        let index_name = Self::parse_string_from_env(Self::ENV_INDEX_NAME, defaults.index_name);
        let result_limit =
            Self::parse_number_from_env(Self::ENV_RESULT_LIMIT, defaults.result_limit as u64)?
                as usize;
        let request_timeout = Duration::from_secs(Self::parse_number_from_env(
            Self::ENV_REQUEST_TIMEOUT_SECS,
            defaults.request_timeout.as_secs(),
        )?);
        let substitutions_path =
            Self::parse_path_from_env(Self::ENV_SUBSTITUTIONS_PATH, defaults.substitutions_path);
        let demonyms_path =
            Self::parse_path_from_env(Self::ENV_DEMONYMS_PATH, defaults.demonyms_path);
        let ner_url = Self::parse_optional_string_from_env(Self::ENV_NER_URL);
        let content_url = Self::parse_optional_string_from_env(Self::ENV_CONTENT_URL);

        Ok(Self {
            es_url,
            index_name,
            result_limit,
            request_timeout,
            substitutions_path,
            demonyms_path,
            ner_url,
            content_url,
        })
    }

    /// Validates limits and that both alias tables are present.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.result_limit == 0 || self.result_limit > MAX_RESULT_LIMIT {
            return Err(ConfigError::InvalidResultLimit {
                value: self.result_limit,
                max: MAX_RESULT_LIMIT,
            });
        }

        if self.request_timeout.is_zero() {
            return Err(ConfigError::InvalidTimeout);
        }

        if self.index_name.trim().is_empty() {
            return Err(ConfigError::EmptyIndexName);
        }

        Self::validate_file(&self.substitutions_path)?;
        Self::validate_file(&self.demonyms_path)?;

        Ok(())
    }

    fn validate_file(path: &Path) -> Result<(), ConfigError> {
        if !path.exists() {
            return Err(ConfigError::PathNotFound {
                path: path.to_path_buf(),
            });
        }
        if !path.is_file() {
            return Err(ConfigError::NotAFile {
                path: path.to_path_buf(),
            });
        }
        Ok(())
    }

    fn parse_number_from_env(var_name: &'static str, default: u64) -> Result<u64, ConfigError> {
        match env::var(var_name) {
            Ok(value) => value
                .trim()
                .parse()
                .map_err(|e| ConfigError::InvalidNumber {
                    name: var_name,
                    value,
                    source: e,
                }),
            Err(_) => Ok(default),
        }
    }

    fn parse_path_from_env(var_name: &str, default: PathBuf) -> PathBuf {
        env::var(var_name).map(PathBuf::from).unwrap_or(default)
    }

    fn parse_optional_string_from_env(var_name: &str) -> Option<String> {
        env::var(var_name)
            .ok()
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
    }

    fn parse_string_from_env(var_name: &str, default: String) -> String {
        env::var(var_name).unwrap_or(default)
    }
}
