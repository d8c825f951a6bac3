//! Authentication configuration

use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use std::time::Duration;

use super::duration::parse_duration;
use super::environment::Environment;
use super::error::ValidationError;

/// Minimum signing secret length accepted in production (256 bits).
const MIN_PRODUCTION_SECRET_LEN: usize = 32;

/// Token service configuration (HS256 access/refresh credentials)
#[derive(Debug, Clone, Deserialize)]
pub struct AuthConfig {
    /// Secret for signing access credentials
    pub access_secret: SecretString,

    /// Secret for signing refresh credentials
    pub refresh_secret: SecretString,

    /// Access credential lifetime (e.g. "24h")
    #[serde(default = "default_access_ttl")]
    pub access_ttl: String,

    /// Refresh credential lifetime (e.g. "7d")
    #[serde(default = "default_refresh_ttl")]
    pub refresh_ttl: String,

    /// Fixed issuer claim
    #[serde(default = "default_issuer")]
    pub issuer: String,

    /// Fixed audience claim
    #[serde(default = "default_audience")]
    pub audience: String,

    /// Clock skew tolerated when checking expiry, in seconds
    #[serde(default)]
    pub leeway_secs: u64,
}

impl AuthConfig {
    /// Creates a configuration with default lifetimes, issuer, and audience.
    pub fn new(access_secret: impl Into<String>, refresh_secret: impl Into<String>) -> Self {
        Self {
            access_secret: SecretString::new(access_secret.into()),
            refresh_secret: SecretString::new(refresh_secret.into()),
            access_ttl: default_access_ttl(),
            refresh_ttl: default_refresh_ttl(),
            issuer: default_issuer(),
            audience: default_audience(),
            leeway_secs: 0,
        }
    }

    /// Get access credential lifetime as Duration
    pub fn access_ttl(&self) -> Result<Duration, ValidationError> {
        parse_duration(&self.access_ttl).map_err(|reason| ValidationError::InvalidDuration {
            field: "AUTH__ACCESS_TTL",
            reason,
        })
    }

    /// Get refresh credential lifetime as Duration
    pub fn refresh_ttl(&self) -> Result<Duration, ValidationError> {
        parse_duration(&self.refresh_ttl).map_err(|reason| ValidationError::InvalidDuration {
            field: "AUTH__REFRESH_TTL",
            reason,
        })
    }

    /// Validate authentication configuration
    ///
    /// In production, requires signing secrets of at least 32 bytes.
    pub fn validate(&self, environment: &Environment) -> Result<(), ValidationError> {
        let access = self.access_secret.expose_secret();
        let refresh = self.refresh_secret.expose_secret();

        if access.is_empty() {
            return Err(ValidationError::MissingRequired("AUTH__ACCESS_SECRET"));
        }
        if refresh.is_empty() {
            return Err(ValidationError::MissingRequired("AUTH__REFRESH_SECRET"));
        }
        if self.issuer.is_empty() {
            return Err(ValidationError::MissingRequired("AUTH__ISSUER"));
        }
        if self.audience.is_empty() {
            return Err(ValidationError::MissingRequired("AUTH__AUDIENCE"));
        }

        // One leaked secret must not forge the other credential class
        if access == refresh {
            return Err(ValidationError::SharedTokenSecret);
        }

        if environment.is_production() {
            if access.len() < MIN_PRODUCTION_SECRET_LEN {
                return Err(ValidationError::SecretTooShort("AUTH__ACCESS_SECRET"));
            }
            if refresh.len() < MIN_PRODUCTION_SECRET_LEN {
                return Err(ValidationError::SecretTooShort("AUTH__REFRESH_SECRET"));
            }
        }

        if self.refresh_ttl()? <= self.access_ttl()? {
            return Err(ValidationError::RefreshTtlNotLonger);
        }

        Ok(())
    }
}

fn default_access_ttl() -> String {
    "24h".to_string()
}

fn default_refresh_ttl() -> String {
    "7d".to_string()
}

fn default_issuer() -> String {
    "larnik-lms".to_string()
}

fn default_audience() -> String {
    "larnik-users".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    const LONG_ACCESS: &str = "access-secret-that-is-at-least-32-bytes";
    const LONG_REFRESH: &str = "refresh-secret-that-is-at-least-32-bytes";

    #[test]
    fn test_auth_config_defaults() {
        let config = AuthConfig::new("a", "r");
        assert_eq!(config.issuer, "larnik-lms");
        assert_eq!(config.audience, "larnik-users");
        assert_eq!(config.access_ttl().unwrap(), Duration::from_secs(24 * 3600));
        assert_eq!(config.refresh_ttl().unwrap(), Duration::from_secs(7 * 86_400));
        assert_eq!(config.leeway_secs, 0);
    }

    #[test]
    fn test_validation_missing_access_secret() {
        let config = AuthConfig::new("", "r");
        assert_eq!(
            config.validate(&Environment::Development),
            Err(ValidationError::MissingRequired("AUTH__ACCESS_SECRET"))
        );
    }

    #[test]
    fn test_validation_missing_refresh_secret() {
        let config = AuthConfig::new("a", "");
        assert_eq!(
            config.validate(&Environment::Development),
            Err(ValidationError::MissingRequired("AUTH__REFRESH_SECRET"))
        );
    }

    #[test]
    fn test_validation_rejects_shared_secret() {
        let config = AuthConfig::new("same", "same");
        assert_eq!(
            config.validate(&Environment::Development),
            Err(ValidationError::SharedTokenSecret)
        );
    }

    #[test]
    fn test_validation_production_requires_long_secrets() {
        let config = AuthConfig::new("short-a", "short-r");
        // Allowed in development
        assert!(config.validate(&Environment::Development).is_ok());
        // Rejected in production
        assert_eq!(
            config.validate(&Environment::Production),
            Err(ValidationError::SecretTooShort("AUTH__ACCESS_SECRET"))
        );

        let config = AuthConfig::new(LONG_ACCESS, LONG_REFRESH);
        assert!(config.validate(&Environment::Production).is_ok());
    }

    #[test]
    fn test_validation_invalid_ttl() {
        let config = AuthConfig {
            access_ttl: "soon".to_string(),
            ..AuthConfig::new("a", "r")
        };
        assert!(matches!(
            config.validate(&Environment::Development),
            Err(ValidationError::InvalidDuration { field: "AUTH__ACCESS_TTL", .. })
        ));
    }

    #[test]
    fn test_validation_refresh_must_outlive_access() {
        let config = AuthConfig {
            access_ttl: "7d".to_string(),
            refresh_ttl: "1d".to_string(),
            ..AuthConfig::new("a", "r")
        };
        assert_eq!(
            config.validate(&Environment::Development),
            Err(ValidationError::RefreshTtlNotLonger)
        );
    }

    #[test]
    fn test_debug_redacts_secrets() {
        let config = AuthConfig::new(LONG_ACCESS, LONG_REFRESH);
        let printed = format!("{:?}", config);
        assert!(!printed.contains(LONG_ACCESS));
        assert!(!printed.contains(LONG_REFRESH));
    }
}
