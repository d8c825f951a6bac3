//! Application configuration module
//!
//! This module provides type-safe configuration loading from environment variables
//! using the `config` and `dotenvy` crates. Configuration is loaded once at startup
//! with the `LARNIK` prefix, nested values use double underscores as separators,
//! and the resulting values are passed explicitly into the token service and
//! payment gateway. Nothing reads configuration ambiently after startup.
//!
//! # Example
//!
//! ```no_run
//! use larnik_trust::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//!
//! println!("Issuing credentials as {}", config.auth.issuer);
//! ```

mod auth;
mod duration;
mod environment;
mod error;
mod logging;
mod payment;

pub use auth::AuthConfig;
pub use duration::parse_duration;
pub use environment::Environment;
pub use error::{ConfigError, ValidationError};
pub use logging::LoggingConfig;
pub use payment::PaymentConfig;

use serde::Deserialize;

/// Root application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Deployment environment
    #[serde(default)]
    pub environment: Environment,

    /// Token service configuration
    pub auth: AuthConfig,

    /// Payment gateway configuration
    pub payment: PaymentConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// This function:
    /// 1. Loads `.env` file if present (for development)
    /// 2. Reads environment variables with `LARNIK` prefix
    /// 3. Uses `__` (double underscore) to separate nested values
    /// 4. Deserializes into typed configuration structs
    ///
    /// # Environment Variable Format
    ///
    /// - `LARNIK__AUTH__ACCESS_SECRET=...` -> `auth.access_secret = ...`
    /// - `LARNIK__PAYMENT__KEY_ID=rzp_test_...` -> `payment.key_id = ...`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if:
    /// - Required environment variables are missing
    /// - Values cannot be parsed into expected types
    pub fn load() -> Result<Self, ConfigError> {
        // Load .env file if present (development)
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("LARNIK")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate all configuration values
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` if any configuration value is invalid.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.auth.validate(&self.environment)?;
        self.payment.validate(&self.environment)?;
        self.logging.validate()?;
        Ok(())
    }

    /// Check if running in production environment
    pub fn is_production(&self) -> bool {
        self.environment.is_production()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::ExposeSecret;
    use std::env;
    use std::sync::Mutex;
    use std::time::Duration;

    // Mutex to ensure tests don't run in parallel (env vars are global)
    static ENV_MUTEX: Mutex<()> = Mutex::new(());

    const VARS: &[&str] = &[
        "LARNIK__AUTH__ACCESS_SECRET",
        "LARNIK__AUTH__REFRESH_SECRET",
        "LARNIK__AUTH__ACCESS_TTL",
        "LARNIK__PAYMENT__KEY_ID",
        "LARNIK__PAYMENT__KEY_SECRET",
        "LARNIK__PAYMENT__WEBHOOK_SECRET",
        "LARNIK__PAYMENT__CONFIRMATION_ORDER",
        "LARNIK__ENVIRONMENT",
        "LARNIK__LOGGING__JSON",
    ];

    /// Helper to set environment variables for testing
    fn set_minimal_env() {
        env::set_var("LARNIK__AUTH__ACCESS_SECRET", "access-secret");
        env::set_var("LARNIK__AUTH__REFRESH_SECRET", "refresh-secret");
        env::set_var("LARNIK__PAYMENT__KEY_ID", "rzp_test_abc");
        env::set_var("LARNIK__PAYMENT__KEY_SECRET", "key-secret");
        env::set_var("LARNIK__PAYMENT__WEBHOOK_SECRET", "webhook-secret");
    }

    /// Helper to clear environment variables after testing
    fn clear_env() {
        for var in VARS {
            env::remove_var(var);
        }
    }

    #[test]
    fn test_load_from_environment() {
        let _guard = ENV_MUTEX.lock().unwrap();
        set_minimal_env();
        let result = AppConfig::load();
        clear_env();

        assert!(result.is_ok(), "Failed to load config: {:?}", result.err());
        let config = result.unwrap();
        assert_eq!(config.auth.access_secret.expose_secret(), "access-secret");
        assert_eq!(config.payment.key_id, "rzp_test_abc");
    }

    #[test]
    fn test_defaults_applied() {
        let _guard = ENV_MUTEX.lock().unwrap();
        set_minimal_env();
        let result = AppConfig::load();
        clear_env();

        let config = result.unwrap();
        assert_eq!(config.environment, Environment::Development);
        assert_eq!(config.auth.issuer, "larnik-lms");
        assert_eq!(config.auth.audience, "larnik-users");
        assert_eq!(config.auth.access_ttl().unwrap(), Duration::from_secs(86_400));
        assert_eq!(config.payment.currency, "INR");
        assert!(!config.logging.json);
    }

    #[test]
    fn test_validate_full_config() {
        let _guard = ENV_MUTEX.lock().unwrap();
        set_minimal_env();
        let result = AppConfig::load();
        clear_env();

        assert!(result.unwrap().validate().is_ok());
    }

    #[test]
    fn test_overrides() {
        let _guard = ENV_MUTEX.lock().unwrap();
        set_minimal_env();
        env::set_var("LARNIK__AUTH__ACCESS_TTL", "15m");
        env::set_var("LARNIK__PAYMENT__CONFIRMATION_ORDER", "order_first");
        env::set_var("LARNIK__LOGGING__JSON", "true");
        let result = AppConfig::load();
        clear_env();

        let config = result.unwrap();
        assert_eq!(config.auth.access_ttl().unwrap(), Duration::from_secs(900));
        assert_eq!(
            config.payment.confirmation_order,
            crate::domain::payment::ConfirmationOrder::OrderFirst
        );
        assert!(config.logging.json);
    }

    #[test]
    fn test_production_rejects_short_secrets() {
        let _guard = ENV_MUTEX.lock().unwrap();
        set_minimal_env();
        env::set_var("LARNIK__ENVIRONMENT", "production");
        let result = AppConfig::load();
        clear_env();

        let config = result.unwrap();
        assert!(config.is_production());
        assert!(matches!(
            config.validate(),
            Err(ValidationError::SecretTooShort(_))
        ));
    }

    #[test]
    fn test_missing_secret_fails_to_load() {
        let _guard = ENV_MUTEX.lock().unwrap();
        set_minimal_env();
        env::remove_var("LARNIK__AUTH__REFRESH_SECRET");
        let result = AppConfig::load();
        clear_env();

        assert!(matches!(result, Err(ConfigError::LoadError(_))));
    }
}
