//! Configuration error types

use thiserror::Error;

/// Errors that can occur during configuration loading
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration loading failed: {0}")]
    LoadError(#[from] config::ConfigError),

    #[error("Validation failed: {0}")]
    ValidationFailed(#[from] ValidationError),
}

/// Errors that can occur during configuration validation
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Required configuration missing: {0}")]
    MissingRequired(&'static str),

    #[error("Access and refresh secrets must differ")]
    SharedTokenSecret,

    #[error("Secret too short for production: {0}")]
    SecretTooShort(&'static str),

    #[error("Invalid duration for {field}: {reason}")]
    InvalidDuration { field: &'static str, reason: String },

    #[error("Refresh TTL must be longer than access TTL")]
    RefreshTtlNotLonger,

    #[error("Invalid payment key id format")]
    InvalidKeyId,

    #[error("Test mode payment key used in production")]
    TestKeyInProduction,

    #[error("Payment API base URL must use HTTPS in production")]
    ApiBaseUrlMustBeHttps,

    #[error("Invalid request timeout")]
    InvalidTimeout,

    #[error("Invalid currency code")]
    InvalidCurrency,
}
