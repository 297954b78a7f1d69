// Runtime configuration
//
// Flags beat environment variables, environment variables beat defaults.
// The catalog lives in ~/.reelfind/movies.json unless told otherwise, with
// the bundled data/movies.json as a last resort.

use crate::core::DEFAULT_MAX_RESULTS;
use crate::error::{ReelfindError, Result};
use std::path::PathBuf;
use std::time::Duration;

/// Typed before a query to route it to the assistant, e.g. "AI: scary movies"
pub const TRIGGER_PREFIX: &str = "AI:";

pub const CATALOG_ENV: &str = "REELFIND_CATALOG";
pub const MAX_RESULTS_ENV: &str = "REELFIND_MAX_RESULTS";
pub const GENERATOR_TIMEOUT_ENV: &str = "REELFIND_GENERATOR_TIMEOUT_SECS";

/// How long an external generator gets before we give up on it
pub const DEFAULT_GENERATOR_TIMEOUT: Duration = Duration::from_secs(15);

const BUNDLED_CATALOG: &str = "data/movies.json";

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub catalog_path: PathBuf,
    pub max_results: usize,
    pub generator_timeout: Duration,
    /// Whether `max_results` came from the environment or a flag
    pub limit_overridden: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            catalog_path: default_catalog_path(),
            max_results: DEFAULT_MAX_RESULTS,
            generator_timeout: DEFAULT_GENERATOR_TIMEOUT,
            limit_overridden: false,
        }
    }
}

impl Config {
    /// Defaults overridden by whatever the environment sets
    pub fn from_env() -> Result<Self> {
        Self::from_vars(
            std::env::var(CATALOG_ENV).ok(),
            std::env::var(MAX_RESULTS_ENV).ok(),
            std::env::var(GENERATOR_TIMEOUT_ENV).ok(),
        )
    }

    fn from_vars(
        catalog: Option<String>,
        max_results: Option<String>,
        timeout_secs: Option<String>,
    ) -> Result<Self> {
        let mut config = Self::default();

        if let Some(path) = catalog.filter(|p| !p.trim().is_empty()) {
            config.catalog_path = PathBuf::from(path.trim());
        }

        if let Some(limit) = max_results {
            config.max_results = parse_limit(&limit)?;
            config.limit_overridden = true;
        }

        if let Some(secs) = timeout_secs {
            let secs: u64 = secs.trim().parse().map_err(|_| {
                ReelfindError::Config(format!("'{}' is not a number of seconds", secs))
            })?;
            config.generator_timeout = Duration::from_secs(secs);
        }

        Ok(config)
    }

    pub fn with_catalog_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.catalog_path = path.into();
        self
    }

    pub fn with_max_results(mut self, max_results: usize) -> Self {
        self.max_results = max_results;
        self.limit_overridden = true;
        self
    }

    /// The configured limit if one was set, otherwise the caller's own default
    pub fn limit_or(&self, fallback: usize) -> usize {
        if self.limit_overridden {
            self.max_results
        } else {
            fallback
        }
    }
}

/// Parse a result limit; it has to be a positive integer
pub fn parse_limit(value: &str) -> Result<usize> {
    match value.trim().parse::<usize>() {
        Ok(0) => Err(ReelfindError::Config(
            "result limit must be at least 1".to_string(),
        )),
        Ok(n) => Ok(n),
        Err(_) => Err(ReelfindError::Config(format!(
            "'{}' is not a valid result limit",
            value
        ))),
    }
}

/// ~/.reelfind/movies.json if it exists, otherwise the bundled catalog
pub fn default_catalog_path() -> PathBuf {
    dirs::home_dir()
        .map(|home| home.join(".reelfind").join("movies.json"))
        .filter(|path| path.exists())
        .unwrap_or_else(|| PathBuf::from(BUNDLED_CATALOG))
}

/// Strip the assistant trigger from a query
///
/// Returns the query after `AI:` (any case), or `None` if the trigger is missing.
pub fn strip_trigger(input: &str) -> Option<&str> {
    let trimmed = input.trim_start();
    let head = trimmed.get(..TRIGGER_PREFIX.len())?;

    if head.eq_ignore_ascii_case(TRIGGER_PREFIX) {
        Some(trimmed[TRIGGER_PREFIX.len()..].trim())
    } else {
        None
    }
}
