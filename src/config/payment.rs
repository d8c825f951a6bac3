//! Payment configuration

use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use std::time::Duration;

use crate::domain::payment::ConfirmationOrder;

use super::environment::Environment;
use super::error::ValidationError;

/// Payment configuration (Razorpay)
#[derive(Debug, Clone, Deserialize)]
pub struct PaymentConfig {
    /// API key id (rzp_test_... or rzp_live_...)
    pub key_id: String,

    /// API key secret, also signs client payment confirmations
    pub key_secret: SecretString,

    /// Webhook signing secret
    pub webhook_secret: SecretString,

    /// Provider API base URL
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,

    /// Currency used for captures
    #[serde(default = "default_currency")]
    pub currency: String,

    /// Provider request timeout in seconds
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,

    /// Id order in the confirmation canonical string
    #[serde(default)]
    pub confirmation_order: ConfirmationOrder,
}

impl PaymentConfig {
    /// Creates a configuration with default base URL, currency, and timeout.
    pub fn new(
        key_id: impl Into<String>,
        key_secret: impl Into<String>,
        webhook_secret: impl Into<String>,
    ) -> Self {
        Self {
            key_id: key_id.into(),
            key_secret: SecretString::new(key_secret.into()),
            webhook_secret: SecretString::new(webhook_secret.into()),
            api_base_url: default_api_base_url(),
            currency: default_currency(),
            request_timeout_secs: default_request_timeout(),
            confirmation_order: ConfirmationOrder::default(),
        }
    }

    /// Check if using provider test mode
    pub fn is_test_mode(&self) -> bool {
        self.key_id.starts_with("rzp_test_")
    }

    /// Check if using provider live mode
    pub fn is_live_mode(&self) -> bool {
        self.key_id.starts_with("rzp_live_")
    }

    /// Get request timeout as Duration
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Validate payment configuration
    pub fn validate(&self, environment: &Environment) -> Result<(), ValidationError> {
        if self.key_id.is_empty() {
            return Err(ValidationError::MissingRequired("PAYMENT__KEY_ID"));
        }
        if self.key_secret.expose_secret().is_empty() {
            return Err(ValidationError::MissingRequired("PAYMENT__KEY_SECRET"));
        }
        if self.webhook_secret.expose_secret().is_empty() {
            return Err(ValidationError::MissingRequired("PAYMENT__WEBHOOK_SECRET"));
        }

        // Verify key prefix for safety
        if !self.is_test_mode() && !self.is_live_mode() {
            return Err(ValidationError::InvalidKeyId);
        }
        if environment.is_production() && self.is_test_mode() {
            return Err(ValidationError::TestKeyInProduction);
        }

        if self.currency.len() != 3 || !self.currency.chars().all(|c| c.is_ascii_uppercase()) {
            return Err(ValidationError::InvalidCurrency);
        }

        if self.request_timeout_secs == 0 || self.request_timeout_secs > 120 {
            return Err(ValidationError::InvalidTimeout);
        }

        if environment.is_production() && !self.api_base_url.starts_with("https://") {
            return Err(ValidationError::ApiBaseUrlMustBeHttps);
        }

        Ok(())
    }
}

fn default_api_base_url() -> String {
    "https://api.razorpay.com".to_string()
}

fn default_currency() -> String {
    "INR".to_string()
}

fn default_request_timeout() -> u64 {
    15
}
