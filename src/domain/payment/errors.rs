//! Payment error types.
//!
//! Provider failures are caught at the adapter boundary, logged there with
//! full detail, and surfaced here as one generic kind per operation. Raw
//! provider bodies never reach the caller.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Errors from payment gateway operations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentError {
    /// Which operation failed.
    pub code: PaymentErrorCode,

    /// Non-sensitive, human-readable message.
    pub message: String,

    /// Whether the failure looked transient (transport error, timeout,
    /// provider 5xx or rate limit). Retrying is the caller's decision.
    pub retryable: bool,
}

impl PaymentError {
    /// Creates an error with the generic message for its code.
    pub fn new(code: PaymentErrorCode) -> Self {
        Self {
            code,
            message: code.generic_message().to_string(),
            retryable: false,
        }
    }

    /// Creates a transient error with the generic message for its code.
    pub fn transient(code: PaymentErrorCode) -> Self {
        Self {
            retryable: true,
            ..Self::new(code)
        }
    }

    pub fn order_creation_failed() -> Self {
        Self::new(PaymentErrorCode::OrderCreationFailed)
    }

    pub fn capture_failed() -> Self {
        Self::new(PaymentErrorCode::CaptureFailed)
    }

    pub fn refund_failed() -> Self {
        Self::new(PaymentErrorCode::RefundFailed)
    }

    pub fn payment_lookup_failed() -> Self {
        Self::new(PaymentErrorCode::PaymentLookupFailed)
    }

    pub fn refund_lookup_failed() -> Self {
        Self::new(PaymentErrorCode::RefundLookupFailed)
    }

    pub fn payment_link_creation_failed() -> Self {
        Self::new(PaymentErrorCode::PaymentLinkCreationFailed)
    }
}

impl fmt::Display for PaymentError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code, self.message)
    }
}

impl std::error::Error for PaymentError {}

/// Payment error codes, one per gateway operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentErrorCode {
    OrderCreationFailed,
    CaptureFailed,
    RefundFailed,
    PaymentLookupFailed,
    RefundLookupFailed,
    PaymentLinkCreationFailed,
}

impl PaymentErrorCode {
    pub fn generic_message(&self) -> &'static str {
        match self {
            PaymentErrorCode::OrderCreationFailed => "Failed to create payment order",
            PaymentErrorCode::CaptureFailed => "Failed to capture payment",
            PaymentErrorCode::RefundFailed => "Failed to process refund",
            PaymentErrorCode::PaymentLookupFailed => "Failed to fetch payment details",
            PaymentErrorCode::RefundLookupFailed => "Failed to fetch refund details",
            PaymentErrorCode::PaymentLinkCreationFailed => "Failed to create payment link",
        }
    }
}

impl fmt::Display for PaymentErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            PaymentErrorCode::OrderCreationFailed => "order_creation_failed",
            PaymentErrorCode::CaptureFailed => "capture_failed",
            PaymentErrorCode::RefundFailed => "refund_failed",
            PaymentErrorCode::PaymentLookupFailed => "payment_lookup_failed",
            PaymentErrorCode::RefundLookupFailed => "refund_lookup_failed",
            PaymentErrorCode::PaymentLinkCreationFailed => "payment_link_creation_failed",
        };
        write!(f, "{}", s)
    }
}

/// Errors that occur while accepting a webhook delivery.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WebhookError {
    /// Signature header absent.
    #[error("Missing signature")]
    MissingSignature,

    /// Signature did not match the body.
    #[error("Invalid signature")]
    InvalidSignature,

    /// Body verified but could not be decoded.
    #[error("Parse error: {0}")]
    ParseError(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constructors_set_generic_messages() {
        let err = PaymentError::order_creation_failed();
        assert_eq!(err.code, PaymentErrorCode::OrderCreationFailed);
        assert_eq!(err.message, "Failed to create payment order");
        assert!(!err.retryable);
    }

    #[test]
    fn transient_marks_retryable() {
        let err = PaymentError::transient(PaymentErrorCode::CaptureFailed);
        assert!(err.retryable);
        assert_eq!(err.message, "Failed to capture payment");
    }

    #[test]
    fn display_includes_code_and_message() {
        let err = PaymentError::refund_lookup_failed();
        assert_eq!(
            err.to_string(),
            "refund_lookup_failed: Failed to fetch refund details"
        );
    }

    #[test]
    fn every_code_has_distinct_message() {
        let codes = [
            PaymentErrorCode::OrderCreationFailed,
            PaymentErrorCode::CaptureFailed,
            PaymentErrorCode::RefundFailed,
            PaymentErrorCode::PaymentLookupFailed,
            PaymentErrorCode::RefundLookupFailed,
            PaymentErrorCode::PaymentLinkCreationFailed,
        ];
        let messages: std::collections::HashSet<_> =
            codes.iter().map(|c| c.generic_message()).collect();
        assert_eq!(messages.len(), codes.len());
    }

    #[test]
    fn webhook_error_display() {
        assert_eq!(WebhookError::InvalidSignature.to_string(), "Invalid signature");
        assert_eq!(
            WebhookError::ParseError("bad json".into()).to_string(),
            "Parse error: bad json"
        );
    }
}
