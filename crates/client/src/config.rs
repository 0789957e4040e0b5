//! Client configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `RIDGELEA_API_BASE_URL` - Base URL of the record store web service
//! - `RIDGELEA_API_TOKEN` - API token for the record store
//!
//! ## Optional
//! - `RIDGELEA_CONTAINER` - Record container name (default: ridgelea)
//! - `RIDGELEA_EXCLUSIVE_IDS` - Comma-separated identifiers granted
//!   exclusive-member status (default: empty)
//! - `RIDGELEA_REQUEST_TIMEOUT_SECS` - Per-request timeout (default: 30)

use std::time::Duration;

use secrecy::SecretString;
use thiserror::Error;
use url::Url;

use ridgelea_core::{AllowList, UserIdentifier};

/// Default per-request timeout in seconds.
///
/// The store does not retry, so a hung request would otherwise stall the
/// user action that issued it indefinitely.
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// Blocklist of common placeholder patterns (case-insensitive).
const PLACEHOLDER_PATTERNS: &[&str] = &[
    "your-",
    "changeme",
    "replace",
    "placeholder",
    "example",
    "todo",
    "fixme",
];

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
    #[error("Insecure secret in {0}: {1}")]
    InsecureSecret(String, String),
}

/// Client application configuration.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Record store configuration.
    pub store: StoreConfig,
    /// Identifiers granted exclusive-member status.
    pub allow_list: AllowList,
}

/// Record store web service configuration.
///
/// Implements `Debug` manually to redact the API token.
#[derive(Clone)]
pub struct StoreConfig {
    /// Base URL of the record store web service.
    pub base_url: Url,
    /// Record container name.
    pub container: String,
    /// API token (server-issued, never logged).
    pub api_token: SecretString,
    /// Per-request timeout.
    pub request_timeout: Duration,
}

impl std::fmt::Debug for StoreConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StoreConfig")
            .field("base_url", &self.base_url.as_str())
            .field("container", &self.container)
            .field("api_token", &"[REDACTED]")
            .field("request_timeout", &self.request_timeout)
            .finish()
    }
}

impl ClientConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing or invalid,
    /// or if the API token looks like a placeholder.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let store = StoreConfig::from_env()?;
        let allow_list = parse_allow_list(&get_env_or_default("RIDGELEA_EXCLUSIVE_IDS", ""))
            .map_err(|e| ConfigError::InvalidEnvVar("RIDGELEA_EXCLUSIVE_IDS".to_owned(), e))?;

        Ok(Self { store, allow_list })
    }
}

impl StoreConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let base_url = get_required_env("RIDGELEA_API_BASE_URL")?
            .parse::<Url>()
            .map_err(|e| {
                ConfigError::InvalidEnvVar("RIDGELEA_API_BASE_URL".to_owned(), e.to_string())
            })?;
        let container = get_env_or_default("RIDGELEA_CONTAINER", "ridgelea");
        let api_token = get_validated_secret("RIDGELEA_API_TOKEN")?;
        let timeout_secs = get_env_or_default(
            "RIDGELEA_REQUEST_TIMEOUT_SECS",
            &DEFAULT_REQUEST_TIMEOUT_SECS.to_string(),
        )
        .parse::<u64>()
        .map_err(|e| {
            ConfigError::InvalidEnvVar("RIDGELEA_REQUEST_TIMEOUT_SECS".to_owned(), e.to_string())
        })?;

        Ok(Self {
            base_url,
            container,
            api_token,
            request_timeout: Duration::from_secs(timeout_secs),
        })
    }
}

/// Parse a comma-separated allow-list value.
///
/// Whitespace around entries is trimmed; empty entries are skipped so a
/// trailing comma is harmless.
pub fn parse_allow_list(value: &str) -> Result<AllowList, String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .map(|entry| UserIdentifier::parse(entry).map_err(|e| e.to_string()))
        .collect()
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get a required environment variable.
fn get_required_env(key: &str) -> Result<String, ConfigError> {
    std::env::var(key).map_err(|_| ConfigError::MissingEnvVar(key.to_owned()))
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_owned())
}

/// Validate that a secret is not an obvious placeholder.
fn validate_secret_strength(secret: &str, var_name: &str) -> Result<(), ConfigError> {
    let lower = secret.to_lowercase();

    for pattern in PLACEHOLDER_PATTERNS {
        if lower.contains(pattern) {
            return Err(ConfigError::InsecureSecret(
                var_name.to_owned(),
                format!("appears to be a placeholder (contains '{pattern}')"),
            ));
        }
    }

    Ok(())
}

/// Load and validate a secret from environment.
fn get_validated_secret(key: &str) -> Result<SecretString, ConfigError> {
    let value = get_required_env(key)?;
    validate_secret_strength(&value, key)?;
    Ok(SecretString::from(value))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_allow_list_empty() {
        assert!(parse_allow_list("").unwrap().is_empty());
    }

    #[test]
    fn test_parse_allow_list_single() {
        let list = parse_allow_list("001238.f786016f521b47ae9c336ccfc43bfa94.1609").unwrap();
        assert_eq!(list.len(), 1);
        assert!(list.contains(
            &UserIdentifier::parse("001238.f786016f521b47ae9c336ccfc43bfa94.1609").unwrap()
        ));
    }

    #[test]
    fn test_parse_allow_list_trims_and_skips_empty_entries() {
        let list = parse_allow_list(" id-1 , id-2 ,, id-3 ,").unwrap();
        assert_eq!(list.len(), 3);
        assert!(list.contains(&UserIdentifier::parse("id-2").unwrap()));
    }

    #[test]
    fn test_validate_secret_strength_placeholder() {
        let result = validate_secret_strength("your-api-token-here", "TEST_VAR");
        assert!(matches!(result, Err(ConfigError::InsecureSecret(_, _))));
    }

    #[test]
    fn test_validate_secret_strength_changeme() {
        assert!(validate_secret_strength("changeme123", "TEST_VAR").is_err());
    }

    #[test]
    fn test_validate_secret_strength_valid() {
        assert!(validate_secret_strength("aB3$xY9!mK2@nL5#pQ7&rT0", "TEST_VAR").is_ok());
    }

    #[test]
    fn test_store_config_debug_redacts_token() {
        let config = StoreConfig {
            base_url: "https://records.example.net".parse().unwrap(),
            container: "ridgelea".to_owned(),
            api_token: SecretString::from("super_secret_token"),
            request_timeout: Duration::from_secs(30),
        };

        let debug_output = format!("{config:?}");
        assert!(debug_output.contains("[REDACTED]"));
        assert!(!debug_output.contains("super_secret_token"));
    }
}
