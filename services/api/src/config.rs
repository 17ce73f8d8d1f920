//! services/api/src/config.rs
//!
//! Defines the application's configuration structure and loading logic.
//!
//! All configuration is loaded from environment variables at startup. The `.env`
//! file is used for local development.

use std::net::SocketAddr;
use std::num::NonZeroUsize;
use std::path::PathBuf;
use std::time::Duration;
use tracing::Level;

/// A custom error type for configuration loading failures.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing the environment variable {0}")]
    MissingVar(String),
    #[error("Invalid value for the environment variable {0}: {1}")]
    InvalidValue(String, String),
}

/// Holds all configuration loaded from the environment at startup.
#[derive(Clone, Debug)]
pub struct Config {
    pub bind_address: SocketAddr,
    pub database_url: String,
    pub log_level: Level,
    pub catalog_path: PathBuf,
    /// Remote recipe lookups are disabled when no key is configured.
    pub spoonacular_api_key: Option<String>,
    pub spoonacular_base_url: String,
    pub remote_timeout: Duration,
    /// Most remote recipes kept in memory at once.
    pub recipe_cache_capacity: NonZeroUsize,
    /// How long a cached remote recipe is served before it is fetched again.
    pub recipe_cache_ttl: Duration,
    pub cors_origin: String,
}

impl Config {
    /// Loads configuration from environment variables.
    ///
    /// It will look for a `.env` file in the current directory for development,
    /// but this is skipped in test environments to ensure tests are hermetic.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Only load from .env in non-test mode to avoid contamination.
        if !cfg!(test) {
            dotenvy::dotenv().ok();
        }
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Builds the configuration from any variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        // --- Load Server and Database Settings ---
        let bind_address_str = lookup("BIND_ADDRESS").unwrap_or_else(|| "0.0.0.0:3000".to_string());
        let bind_address = bind_address_str.parse::<SocketAddr>().map_err(|e| {
            ConfigError::InvalidValue("BIND_ADDRESS".to_string(), e.to_string())
        })?;

        let database_url =
            lookup("DATABASE_URL").ok_or_else(|| ConfigError::MissingVar("DATABASE_URL".to_string()))?;

        let log_level_str = lookup("RUST_LOG").unwrap_or_else(|| "INFO".to_string());
        let log_level = log_level_str.parse::<Level>().map_err(|_| {
            ConfigError::InvalidValue(
                "RUST_LOG".to_string(),
                format!("'{}' is not a valid log level", log_level_str),
            )
        })?;

        let catalog_path = lookup("CATALOG_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("./data/recipes.json"));

        // --- Load Remote Recipe API Settings ---
        let spoonacular_api_key = lookup("SPOONACULAR_API_KEY").filter(|key| !key.trim().is_empty());
        let spoonacular_base_url = lookup("SPOONACULAR_BASE_URL")
            .unwrap_or_else(|| "https://api.spoonacular.com".to_string())
            .trim_end_matches('/')
            .to_string();

        let remote_timeout = Duration::from_secs(positive_number(&lookup, "REMOTE_TIMEOUT_SECS", 10)?);

        // --- Load Recipe Cache Settings ---
        let capacity = positive_number(&lookup, "RECIPE_CACHE_CAPACITY", 256)?;
        let recipe_cache_capacity = usize::try_from(capacity)
            .ok()
            .and_then(NonZeroUsize::new)
            .ok_or_else(|| {
                ConfigError::InvalidValue(
                    "RECIPE_CACHE_CAPACITY".to_string(),
                    format!("'{}' does not fit in memory", capacity),
                )
            })?;
        let recipe_cache_ttl = Duration::from_secs(positive_number(&lookup, "RECIPE_CACHE_TTL_SECS", 3600)?);

        let cors_origin = lookup("CORS_ORIGIN").unwrap_or_else(|| "http://localhost:3000".to_string());

        Ok(Self {
            bind_address,
            database_url,
            log_level,
            catalog_path,
            spoonacular_api_key,
            spoonacular_base_url,
            remote_timeout,
            recipe_cache_capacity,
            recipe_cache_ttl,
            cors_origin,
        })
    }
}

/// Reads a strictly positive integer, falling back to `default` when the variable is unset.
fn positive_number<F>(lookup: &F, name: &str, default: u64) -> Result<u64, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let Some(raw) = lookup(name) else {
        return Ok(default);
    };
    match raw.trim().parse::<u64>() {
        Ok(value) if value > 0 => Ok(value),
        _ => Err(ConfigError::InvalidValue(
            name.to_string(),
            format!("'{}' is not a positive number", raw),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn load(vars: &[(&str, &str)]) -> Result<Config, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|name| vars.get(name).cloned())
    }

    #[test]
    fn defaults_apply_when_only_the_database_is_set() {
        let config = load(&[("DATABASE_URL", "sqlite::memory:")]).unwrap();

        assert_eq!(config.bind_address.to_string(), "0.0.0.0:3000");
        assert_eq!(config.log_level, Level::INFO);
        assert_eq!(config.catalog_path, PathBuf::from("./data/recipes.json"));
        assert!(config.spoonacular_api_key.is_none());
        assert_eq!(config.spoonacular_base_url, "https://api.spoonacular.com");
        assert_eq!(config.remote_timeout, Duration::from_secs(10));
        assert_eq!(config.recipe_cache_capacity.get(), 256);
        assert_eq!(config.recipe_cache_ttl, Duration::from_secs(3600));
    }

    #[test]
    fn recipe_cache_bounds_are_configurable() {
        let config = load(&[
            ("DATABASE_URL", "sqlite::memory:"),
            ("RECIPE_CACHE_CAPACITY", "32"),
            ("RECIPE_CACHE_TTL_SECS", "120"),
        ])
        .unwrap();
        assert_eq!(config.recipe_cache_capacity.get(), 32);
        assert_eq!(config.recipe_cache_ttl, Duration::from_secs(120));

        let result = load(&[("DATABASE_URL", "sqlite::memory:"), ("RECIPE_CACHE_CAPACITY", "0")]);
        assert!(matches!(result, Err(ConfigError::InvalidValue(name, _)) if name == "RECIPE_CACHE_CAPACITY"));
    }

    #[test]
    fn database_url_is_required() {
        assert!(matches!(load(&[]), Err(ConfigError::MissingVar(name)) if name == "DATABASE_URL"));
    }

    #[test]
    fn invalid_values_are_rejected() {
        let result = load(&[("DATABASE_URL", "sqlite::memory:"), ("REMOTE_TIMEOUT_SECS", "0")]);
        assert!(matches!(result, Err(ConfigError::InvalidValue(name, _)) if name == "REMOTE_TIMEOUT_SECS"));

        let result = load(&[("DATABASE_URL", "sqlite::memory:"), ("RUST_LOG", "chatty")]);
        assert!(matches!(result, Err(ConfigError::InvalidValue(name, _)) if name == "RUST_LOG"));
    }

    #[test]
    fn blank_api_key_disables_the_remote_provider() {
        let config = load(&[("DATABASE_URL", "sqlite::memory:"), ("SPOONACULAR_API_KEY", "  ")]).unwrap();
        assert!(config.spoonacular_api_key.is_none());
    }
}
