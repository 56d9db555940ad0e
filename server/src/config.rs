//! Configuration module for environment variable parsing.
//!
//! All configuration is read once at process start and passed by reference
//! into the handler pipeline; business logic never reads the environment.

use std::env;
use thiserror::Error;

/// Default EFS order intake endpoint.
pub const DEFAULT_EFS_ENDPOINT: &str = "https://fcp.efulfillmentservice.com:443/xml/orders/";

/// Configuration errors. Missing credentials fail the process at startup
/// rather than producing an empty-credential request to the partner.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable {0}")]
    Missing(&'static str),
}

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Shared secret used to verify Shopify webhook signatures
    pub webhook_secret: String,

    /// EFS merchant account id
    pub merchant_id: String,

    /// EFS merchant account name
    pub merchant_name: String,

    /// EFS merchant API token
    pub merchant_token: String,

    /// EFS order intake endpoint URL
    pub efs_endpoint: String,

    /// HTTP request timeout in milliseconds for the outbound forward
    pub request_timeout_ms: u64,

    /// Port for the web server to listen on
    pub port: u16,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// The webhook secret and merchant credentials are required; absence is
    /// a fatal configuration error.
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Config {
            webhook_secret: require("SHOPIFY_WEBHOOK_SECRET")?,

            merchant_id: require("MERCHANT_ID")?,

            merchant_name: require("MERCHANT_NAME")?,

            merchant_token: require("MERCHANT_TOKEN")?,

            efs_endpoint: env::var("EFS_ENDPOINT")
                .unwrap_or_else(|_| DEFAULT_EFS_ENDPOINT.to_string()),

            request_timeout_ms: env::var("REQUEST_TIMEOUT_MS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(30_000),

            port: env::var("PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(8080),
        })
    }
}

/// Read a required environment variable, rejecting empty values.
fn require(name: &'static str) -> Result<String, ConfigError> {
    match env::var(name) {
        Ok(v) if !v.trim().is_empty() => Ok(v),
        _ => Err(ConfigError::Missing(name)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set_required_vars() {
        env::set_var("SHOPIFY_WEBHOOK_SECRET", "test-secret");
        env::set_var("MERCHANT_ID", "1234");
        env::set_var("MERCHANT_NAME", "Test Merchant");
        env::set_var("MERCHANT_TOKEN", "tok-abc");
    }

    fn clear_all_vars() {
        for name in [
            "SHOPIFY_WEBHOOK_SECRET",
            "MERCHANT_ID",
            "MERCHANT_NAME",
            "MERCHANT_TOKEN",
            "EFS_ENDPOINT",
            "REQUEST_TIMEOUT_MS",
            "PORT",
        ] {
            env::remove_var(name);
        }
    }

    // Environment variables are process-global, so all from_env scenarios
    // live in one test to avoid interference between parallel tests.
    #[test]
    fn test_from_env() {
        clear_all_vars();

        // Missing secret fails closed
        let err = Config::from_env().unwrap_err();
        assert!(matches!(err, ConfigError::Missing("SHOPIFY_WEBHOOK_SECRET")));

        // All required vars present, defaults applied
        set_required_vars();
        let config = Config::from_env().unwrap();
        assert_eq!(config.webhook_secret, "test-secret");
        assert_eq!(config.efs_endpoint, DEFAULT_EFS_ENDPOINT);
        assert_eq!(config.request_timeout_ms, 30_000);
        assert_eq!(config.port, 8080);

        // Overrides
        env::set_var("EFS_ENDPOINT", "http://127.0.0.1:9999/xml/orders/");
        env::set_var("REQUEST_TIMEOUT_MS", "5000");
        env::set_var("PORT", "9090");
        let config = Config::from_env().unwrap();
        assert_eq!(config.efs_endpoint, "http://127.0.0.1:9999/xml/orders/");
        assert_eq!(config.request_timeout_ms, 5000);
        assert_eq!(config.port, 9090);

        // Blank credential is treated as missing
        env::set_var("MERCHANT_TOKEN", "   ");
        let err = Config::from_env().unwrap_err();
        assert!(matches!(err, ConfigError::Missing("MERCHANT_TOKEN")));

        clear_all_vars();
    }
}
