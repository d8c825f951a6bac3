//! Payment and refund records returned by the provider.
//!
//! These are pass-through results. Nothing here is persisted by this crate.

use serde::{Deserialize, Serialize};

use super::Notes;

/// Payment lifecycle as reported by the provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentStatus {
    Created,
    /// Authorized by the bank, not yet captured.
    Authorized,
    /// Funds captured.
    Captured,
    Refunded,
    Failed,
    Unknown,
}

impl PaymentStatus {
    pub fn from_provider(status: &str) -> Self {
        match status {
            "created" => PaymentStatus::Created,
            "authorized" => PaymentStatus::Authorized,
            "captured" => PaymentStatus::Captured,
            "refunded" => PaymentStatus::Refunded,
            "failed" => PaymentStatus::Failed,
            _ => PaymentStatus::Unknown,
        }
    }

    /// Returns true if funds have been captured at some point.
    pub fn is_settled(&self) -> bool {
        matches!(self, PaymentStatus::Captured | PaymentStatus::Refunded)
    }
}

/// A payment attempt against an order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Payment {
    /// Provider payment id (`pay_...`).
    pub id: String,
    pub order_id: Option<String>,
    pub amount: u64,
    pub amount_refunded: u64,
    pub currency: String,
    pub status: PaymentStatus,
    pub captured: bool,
    /// Payment method (card, upi, netbanking, ...).
    pub method: Option<String>,
    pub email: Option<String>,
    pub contact: Option<String>,
    pub error_code: Option<String>,
    pub error_description: Option<String>,
    pub notes: Notes,
    pub created_at: Option<i64>,
}

/// Refund lifecycle as reported by the provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RefundStatus {
    Pending,
    Processed,
    Failed,
    Unknown,
}

impl RefundStatus {
    pub fn from_provider(status: &str) -> Self {
        match status {
            "pending" => RefundStatus::Pending,
            "processed" => RefundStatus::Processed,
            "failed" => RefundStatus::Failed,
            _ => RefundStatus::Unknown,
        }
    }
}

/// A refund issued against a captured payment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Refund {
    /// Provider refund id (`rfnd_...`).
    pub id: String,
    pub payment_id: String,
    pub amount: u64,
    pub currency: String,
    pub status: RefundStatus,
    /// "normal" or "optimum" processing speed.
    pub speed_processed: Option<String>,
    pub notes: Notes,
    pub created_at: Option<i64>,
}
