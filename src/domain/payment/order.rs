//! Payment orders.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Free-form key/value notes attached to provider records.
pub type Notes = BTreeMap<String, String>;

/// Parameters for creating a payment order with the provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateOrderRequest {
    /// Amount in the smallest currency unit.
    pub amount: u64,

    /// ISO 4217 currency code (e.g. "INR").
    pub currency: String,

    /// Merchant-side receipt reference.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub receipt: Option<String>,

    /// Whether the customer may pay the order in parts.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub partial_payment: Option<bool>,

    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub notes: Notes,
}

impl CreateOrderRequest {
    pub fn new(amount: u64, currency: impl Into<String>) -> Self {
        Self {
            amount,
            currency: currency.into(),
            receipt: None,
            partial_payment: None,
            notes: Notes::new(),
        }
    }

    pub fn with_receipt(mut self, receipt: impl Into<String>) -> Self {
        self.receipt = Some(receipt.into());
        self
    }

    pub fn with_note(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.notes.insert(key.into(), value.into());
        self
    }
}

/// Order lifecycle as reported by the provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    /// Created, no payment attempted yet.
    Created,
    /// At least one payment attempt was made.
    Attempted,
    /// Fully paid.
    Paid,
    /// Status not recognised.
    Unknown,
}

impl OrderStatus {
    pub fn from_provider(status: &str) -> Self {
        match status {
            "created" => OrderStatus::Created,
            "attempted" => OrderStatus::Attempted,
            "paid" => OrderStatus::Paid,
            _ => OrderStatus::Unknown,
        }
    }
}

/// Provider-side order record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    /// Provider order id (`order_...`).
    pub id: String,
    pub amount: u64,
    pub amount_paid: u64,
    pub amount_due: u64,
    pub currency: String,
    pub receipt: Option<String>,
    pub status: OrderStatus,
    pub attempts: u32,
    pub notes: Notes,
    /// Unix timestamp, when reported.
    pub created_at: Option<i64>,
}
