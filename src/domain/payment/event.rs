//! Webhook events pushed by the payment provider.
//!
//! An event is only constructed from a body whose signature has already been
//! verified. Nothing in this module checks signatures.

use serde::{Deserialize, Serialize};

use super::{Order, Payment, PaymentLink, Refund};

/// Event types we recognise.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GatewayEventType {
    PaymentAuthorized,
    PaymentCaptured,
    PaymentFailed,
    OrderPaid,
    RefundCreated,
    RefundProcessed,
    RefundFailed,
    PaymentLinkPaid,
    PaymentLinkExpired,
    PaymentLinkCancelled,
    /// Event type not handled by this crate.
    Unknown(String),
}

impl GatewayEventType {
    pub fn from_provider(event: &str) -> Self {
        match event {
            "payment.authorized" => GatewayEventType::PaymentAuthorized,
            "payment.captured" => GatewayEventType::PaymentCaptured,
            "payment.failed" => GatewayEventType::PaymentFailed,
            "order.paid" => GatewayEventType::OrderPaid,
            "refund.created" => GatewayEventType::RefundCreated,
            "refund.processed" => GatewayEventType::RefundProcessed,
            "refund.failed" => GatewayEventType::RefundFailed,
            "payment_link.paid" => GatewayEventType::PaymentLinkPaid,
            "payment_link.expired" => GatewayEventType::PaymentLinkExpired,
            "payment_link.cancelled" => GatewayEventType::PaymentLinkCancelled,
            other => GatewayEventType::Unknown(other.to_string()),
        }
    }

    /// Returns true if the event reports money received.
    pub fn confirms_payment(&self) -> bool {
        matches!(
            self,
            GatewayEventType::PaymentCaptured
                | GatewayEventType::OrderPaid
                | GatewayEventType::PaymentLinkPaid
        )
    }
}

/// Entities carried in the event payload. Which are present depends on the
/// event type.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GatewayEventData {
    pub payment: Option<Payment>,
    pub order: Option<Order>,
    pub refund: Option<Refund>,
    pub payment_link: Option<PaymentLink>,
}

/// A verified webhook event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GatewayEvent {
    /// Provider event id, from the delivery header when available.
    pub id: Option<String>,
    pub event_type: GatewayEventType,
    pub account_id: Option<String>,
    pub data: GatewayEventData,
    pub created_at: i64,
}

impl GatewayEvent {
    /// Payment id the event refers to, if any.
    pub fn payment_id(&self) -> Option<&str> {
        self.data
            .payment
            .as_ref()
            .map(|p| p.id.as_str())
            .or_else(|| self.data.refund.as_ref().map(|r| r.payment_id.as_str()))
    }

    /// Order id the event refers to, if any.
    pub fn order_id(&self) -> Option<&str> {
        self.data
            .order
            .as_ref()
            .map(|o| o.id.as_str())
            .or_else(|| self.data.payment.as_ref().and_then(|p| p.order_id.as_deref()))
    }
}
