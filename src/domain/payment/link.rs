//! Hosted payment links.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::Notes;

/// Customer details pre-filled on a payment link.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkCustomer {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contact: Option<String>,
}

/// Which channels the provider should use to send the link.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkNotify {
    pub sms: bool,
    pub email: bool,
}

/// Parameters for creating a hosted payment link.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreatePaymentLinkRequest {
    pub amount: u64,
    pub currency: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Merchant reference, unique per link.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reference_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer: Option<LinkCustomer>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notify: Option<LinkNotify>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reminder_enable: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub callback_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub callback_method: Option<String>,
    /// Unix timestamp after which the link stops accepting payments.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expire_by: Option<i64>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub notes: Notes,
}

impl CreatePaymentLinkRequest {
    pub fn new(amount: u64, currency: impl Into<String>) -> Self {
        Self {
            amount,
            currency: currency.into(),
            description: None,
            reference_id: None,
            customer: None,
            notify: None,
            reminder_enable: None,
            callback_url: None,
            callback_method: None,
            expire_by: None,
            notes: Notes::new(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_reference(mut self, reference_id: impl Into<String>) -> Self {
        self.reference_id = Some(reference_id.into());
        self
    }

    pub fn with_customer(mut self, customer: LinkCustomer) -> Self {
        self.customer = Some(customer);
        self
    }

    /// Sets a GET callback the provider redirects to after payment.
    pub fn with_callback(mut self, url: impl Into<String>) -> Self {
        self.callback_url = Some(url.into());
        self.callback_method = Some("get".to_string());
        self
    }
}

/// Payment link lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentLinkStatus {
    Created,
    PartiallyPaid,
    Paid,
    Expired,
    Cancelled,
    Unknown,
}

impl PaymentLinkStatus {
    pub fn from_provider(status: &str) -> Self {
        match status {
            "created" => PaymentLinkStatus::Created,
            "partially_paid" => PaymentLinkStatus::PartiallyPaid,
            "paid" => PaymentLinkStatus::Paid,
            "expired" => PaymentLinkStatus::Expired,
            "cancelled" => PaymentLinkStatus::Cancelled,
            _ => PaymentLinkStatus::Unknown,
        }
    }
}

/// A hosted payment link.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentLink {
    /// Provider link id (`plink_...`).
    pub id: String,
    /// URL to send to the customer.
    pub short_url: String,
    pub amount: u64,
    pub amount_paid: u64,
    pub currency: String,
    pub status: PaymentLinkStatus,
    pub reference_id: Option<String>,
    pub description: Option<String>,
    pub expire_by: Option<i64>,
    pub created_at: Option<i64>,
}
