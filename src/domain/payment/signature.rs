//! Payment signature verification.
//!
//! Two canonical strings are signed by the provider with HMAC-SHA256:
//!
//! - **Webhook deliveries**: the exact raw request body, signed with the
//!   webhook secret. The body is never decoded and re-encoded before
//!   verification, so key order and whitespace are whatever the provider sent.
//! - **Client payment confirmations**: `payment_id|order_id`, signed with the
//!   API key secret.
//!
//! Digests are compared as lowercase hex strings in constant time. Every
//! failure, including an internal one, yields `false`; verification never
//! raises an error a caller could mistake for success.

use hmac::{Hmac, Mac};
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use sha2::Sha256;
use subtle::ConstantTimeEq;

type HmacSha256 = Hmac<Sha256>;

/// Separator between the two ids of a confirmation canonical string.
const CONFIRMATION_SEPARATOR: char = '|';

/// Order of the ids in the confirmation canonical string.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConfirmationOrder {
    /// `payment_id|order_id`
    #[default]
    PaymentFirst,
    /// `order_id|payment_id`
    OrderFirst,
}

/// What a signature was computed over.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignedPayload<'a> {
    /// Raw webhook request body bytes.
    Webhook(&'a [u8]),
    /// Client confirmation for a payment against an order.
    Confirmation { order_id: &'a str },
}

/// Computes the lowercase hex HMAC-SHA256 of `message` under `secret`.
pub fn compute_signature(secret: &[u8], message: &[u8]) -> Option<String> {
    let mut mac = HmacSha256::new_from_slice(secret).ok()?;
    mac.update(message);
    Some(hex::encode(mac.finalize().into_bytes()))
}

/// Compares two signature strings without short-circuiting on content.
///
/// Only the length comparison can return early, and the expected length is
/// public (64 hex characters).
pub fn signatures_match(expected: &str, supplied: &str) -> bool {
    let expected = expected.as_bytes();
    let supplied = supplied.as_bytes();
    if expected.len() != supplied.len() {
        return false;
    }
    expected.ct_eq(supplied).into()
}

/// Builds the canonical string a confirmation signature is computed over.
pub fn canonical_confirmation(payment_id: &str, order_id: &str, order: ConfirmationOrder) -> String {
    let (first, second) = match order {
        ConfirmationOrder::PaymentFirst => (payment_id, order_id),
        ConfirmationOrder::OrderFirst => (order_id, payment_id),
    };
    format!("{first}{CONFIRMATION_SEPARATOR}{second}")
}

/// Verifies webhook and payment confirmation signatures.
#[derive(Clone)]
pub struct PaymentSignatureVerifier {
    key_secret: SecretString,
    webhook_secret: SecretString,
    confirmation_order: ConfirmationOrder,
}

impl PaymentSignatureVerifier {
    /// Creates a verifier from the API key secret and the webhook secret.
    pub fn new(key_secret: impl Into<String>, webhook_secret: impl Into<String>) -> Self {
        Self::from_secrets(
            SecretString::new(key_secret.into()),
            SecretString::new(webhook_secret.into()),
        )
    }

    pub fn from_secrets(key_secret: SecretString, webhook_secret: SecretString) -> Self {
        Self {
            key_secret,
            webhook_secret,
            confirmation_order: ConfirmationOrder::default(),
        }
    }

    pub fn with_confirmation_order(mut self, order: ConfirmationOrder) -> Self {
        self.confirmation_order = order;
        self
    }

    /// Verifies a webhook body against the delivery's signature header value.
    pub fn verify_webhook(&self, payload: &[u8], signature: &str) -> bool {
        let Some(expected) =
            compute_signature(self.webhook_secret.expose_secret().as_bytes(), payload)
        else {
            tracing::error!("Webhook signature could not be computed");
            return false;
        };

        let verified = signatures_match(&expected, signature);
        if !verified {
            tracing::warn!(body_len = payload.len(), "Webhook signature mismatch");
        }
        verified
    }

    /// Verifies a client-supplied payment confirmation.
    pub fn verify_confirmation(&self, payment_id: &str, order_id: &str, signature: &str) -> bool {
        let canonical = canonical_confirmation(payment_id, order_id, self.confirmation_order);
        let Some(expected) =
            compute_signature(self.key_secret.expose_secret().as_bytes(), canonical.as_bytes())
        else {
            tracing::error!(payment_id, "Confirmation signature could not be computed");
            return false;
        };

        let verified = signatures_match(&expected, signature);
        if verified {
            tracing::debug!(payment_id, order_id, "Payment confirmation verified");
        } else {
            tracing::warn!(payment_id, order_id, "Payment confirmation signature mismatch");
        }
        verified
    }

    /// Verifies a signature in the mode selected by `payload`.
    pub fn verify(&self, payment_id: &str, signature: &str, payload: SignedPayload<'_>) -> bool {
        match payload {
            SignedPayload::Webhook(body) => self.verify_webhook(body, signature),
            SignedPayload::Confirmation { order_id } => {
                self.verify_confirmation(payment_id, order_id, signature)
            }
        }
    }
}

impl std::fmt::Debug for PaymentSignatureVerifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PaymentSignatureVerifier")
            .field("confirmation_order", &self.confirmation_order)
            .finish_non_exhaustive()
    }
}
