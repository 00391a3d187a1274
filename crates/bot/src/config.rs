//! Bot configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `INVENTORY_TOKEN` - Bearer token for the inventory platform API
//! - `OPERATOR_CHAT_ID` - Chat identity that receives manual requests
//!
//! ## Optional
//! - `INVENTORY_BASE_URL` - Inventory API root (default: the MoySklad remap endpoint)
//! - `PRODUCTS_FILE` - Path to the category/code table (default: products.json)
//! - `CATALOG_CACHE` - `forever` or `bypass` (default: forever)
//! - `CURRENCY_CODE` - ISO 4217 code for payment sessions (default: RUB)
//! - `CURRENCY_SYMBOL` - Symbol appended to rendered amounts (default: ₽)
//! - `LOYALTY_BOT_URL` - Link for the loyalty-points menu button
//! - `SENTRY_DSN` - Sentry error tracking DSN

use std::path::PathBuf;

use secrecy::SecretString;
use thiserror::Error;

use divano_core::UserId;

use crate::catalog::CachePolicy;

const DEFAULT_INVENTORY_BASE_URL: &str = "https://api.moysklad.ru/api/remap/1.2";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Bot application configuration.
#[derive(Debug, Clone)]
pub struct BotConfig {
    /// Inventory platform API configuration
    pub inventory: InventoryConfig,
    /// Chat identity that receives manual-request summaries
    pub operator: UserId,
    /// Path to the category → code → display-name JSON table
    pub products_file: PathBuf,
    /// Catalog cache policy
    pub cache_policy: CachePolicy,
    /// ISO 4217 currency code for payment sessions
    pub currency_code: String,
    /// Symbol appended to rendered amounts
    pub currency_symbol: String,
    /// Optional loyalty-points bot link
    pub loyalty_url: Option<String>,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
}

/// Inventory platform API configuration.
///
/// Implements `Debug` manually to redact the token.
#[derive(Clone)]
pub struct InventoryConfig {
    /// API root URL
    pub base_url: String,
    /// Bearer token (server-side only)
    pub token: SecretString,
}

impl std::fmt::Debug for InventoryConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InventoryConfig")
            .field("base_url", &self.base_url)
            .field("token", &"[REDACTED]")
            .finish()
    }
}

impl BotConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing or invalid.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let inventory = InventoryConfig::from_env()?;

        let operator = get_required_env("OPERATOR_CHAT_ID")?
            .parse::<i64>()
            .map(UserId::new)
            .map_err(|e| {
                ConfigError::InvalidEnvVar("OPERATOR_CHAT_ID".to_string(), e.to_string())
            })?;

        let products_file = PathBuf::from(get_env_or_default("PRODUCTS_FILE", "products.json"));

        let cache_raw = get_env_or_default("CATALOG_CACHE", "forever");
        let cache_policy = CachePolicy::parse(&cache_raw).ok_or_else(|| {
            ConfigError::InvalidEnvVar(
                "CATALOG_CACHE".to_string(),
                format!("expected 'forever' or 'bypass', got '{cache_raw}'"),
            )
        })?;

        Ok(Self {
            inventory,
            operator,
            products_file,
            cache_policy,
            currency_code: get_env_or_default("CURRENCY_CODE", "RUB"),
            currency_symbol: get_env_or_default("CURRENCY_SYMBOL", "₽"),
            loyalty_url: get_optional_env("LOYALTY_BOT_URL"),
            sentry_dsn: get_optional_env("SENTRY_DSN"),
        })
    }
}

impl InventoryConfig {
    fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            base_url: get_env_or_default("INVENTORY_BASE_URL", DEFAULT_INVENTORY_BASE_URL),
            token: SecretString::from(get_required_env("INVENTORY_TOKEN")?),
        })
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get a required environment variable.
fn get_required_env(key: &str) -> Result<String, ConfigError> {
    std::env::var(key).map_err(|_| ConfigError::MissingEnvVar(key.to_string()))
}

/// Get an optional environment variable.
fn get_optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_inventory_config_debug_redacts_token() {
        let config = InventoryConfig {
            base_url: "https://inventory.example/api".to_string(),
            token: SecretString::from("very_secret_bearer_token"),
        };

        let debug_output = format!("{config:?}");
        assert!(debug_output.contains("https://inventory.example/api"));
        assert!(debug_output.contains("[REDACTED]"));
        assert!(!debug_output.contains("very_secret_bearer_token"));
    }

    #[test]
    fn test_config_error_display() {
        let err = ConfigError::MissingEnvVar("INVENTORY_TOKEN".to_string());
        assert_eq!(
            err.to_string(),
            "Missing environment variable: INVENTORY_TOKEN"
        );

        let err = ConfigError::InvalidEnvVar("OPERATOR_CHAT_ID".to_string(), "nan".to_string());
        assert!(err.to_string().contains("OPERATOR_CHAT_ID"));
    }
}
