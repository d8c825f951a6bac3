//! Razorpay API objects as they arrive over the wire.
//!
//! These types parse the provider's JSON as-is and convert into domain
//! records. They are deliberately lenient about optional fields: Razorpay
//! sends `notes` as `[]` when empty and uses `""` or `0` for unset values.

use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer, Serialize};

use crate::domain::payment::{
    GatewayEvent, GatewayEventData, GatewayEventType, Notes, Order, OrderStatus, Payment,
    PaymentLink, PaymentLinkStatus, PaymentStatus, Refund, RefundStatus, WebhookError,
};

// ════════════════════════════════════════════════════════════════════════════════
// Field Helpers
// ════════════════════════════════════════════════════════════════════════════════

/// Accepts `notes` as an object, an empty array, or null.
fn lenient_notes<'de, D>(deserializer: D) -> Result<Notes, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawNotes {
        Map(BTreeMap<String, serde_json::Value>),
        List(Vec<serde::de::IgnoredAny>),
    }

    let raw = Option::<RawNotes>::deserialize(deserializer)?;
    Ok(match raw {
        Some(RawNotes::Map(map)) => map
            .into_iter()
            .map(|(key, value)| {
                let value = match value {
                    serde_json::Value::String(s) => s,
                    other => other.to_string(),
                };
                (key, value)
            })
            .collect(),
        Some(RawNotes::List(items)) => {
            if !items.is_empty() {
                tracing::debug!(entries = items.len(), "Ignoring non-empty notes array");
            }
            Notes::new()
        }
        None => Notes::new(),
    })
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.is_empty())
}

fn non_zero(value: Option<i64>) -> Option<i64> {
    value.filter(|v| *v != 0)
}

// ════════════════════════════════════════════════════════════════════════════════
// Request Bodies
// ════════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Serialize)]
pub(super) struct CaptureRequest<'a> {
    pub amount: u64,
    pub currency: &'a str,
}

#[derive(Debug, Serialize)]
pub(super) struct RefundRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount: Option<u64>,
}

// ════════════════════════════════════════════════════════════════════════════════
// Entities
// ════════════════════════════════════════════════════════════════════════════════

/// Razorpay order object.
#[derive(Debug, Clone, Deserialize)]
pub struct RazorpayOrder {
    pub id: String,
    pub amount: u64,
    #[serde(default)]
    pub amount_paid: u64,
    #[serde(default)]
    pub amount_due: u64,
    pub currency: String,
    #[serde(default)]
    pub receipt: Option<String>,
    pub status: String,
    #[serde(default)]
    pub attempts: u32,
    #[serde(default, deserialize_with = "lenient_notes")]
    pub notes: Notes,
    #[serde(default)]
    pub created_at: Option<i64>,
}

impl From<RazorpayOrder> for Order {
    fn from(order: RazorpayOrder) -> Self {
        Order {
            status: OrderStatus::from_provider(&order.status),
            id: order.id,
            amount: order.amount,
            amount_paid: order.amount_paid,
            amount_due: order.amount_due,
            currency: order.currency,
            receipt: non_empty(order.receipt),
            attempts: order.attempts,
            notes: order.notes,
            created_at: order.created_at,
        }
    }
}

/// Razorpay payment object.
#[derive(Debug, Clone, Deserialize)]
pub struct RazorpayPayment {
    pub id: String,
    pub amount: u64,
    #[serde(default)]
    pub amount_refunded: u64,
    pub currency: String,
    pub status: String,
    #[serde(default)]
    pub order_id: Option<String>,
    #[serde(default)]
    pub captured: bool,
    #[serde(default)]
    pub method: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub contact: Option<String>,
    #[serde(default)]
    pub error_code: Option<String>,
    #[serde(default)]
    pub error_description: Option<String>,
    #[serde(default, deserialize_with = "lenient_notes")]
    pub notes: Notes,
    #[serde(default)]
    pub created_at: Option<i64>,
}

impl From<RazorpayPayment> for Payment {
    fn from(payment: RazorpayPayment) -> Self {
        Payment {
            status: PaymentStatus::from_provider(&payment.status),
            id: payment.id,
            order_id: non_empty(payment.order_id),
            amount: payment.amount,
            amount_refunded: payment.amount_refunded,
            currency: payment.currency,
            captured: payment.captured,
            method: non_empty(payment.method),
            email: non_empty(payment.email),
            contact: non_empty(payment.contact),
            error_code: non_empty(payment.error_code),
            error_description: non_empty(payment.error_description),
            notes: payment.notes,
            created_at: payment.created_at,
        }
    }
}

/// Razorpay refund object.
#[derive(Debug, Clone, Deserialize)]
pub struct RazorpayRefund {
    pub id: String,
    pub payment_id: String,
    pub amount: u64,
    pub currency: String,
    pub status: String,
    #[serde(default)]
    pub speed_processed: Option<String>,
    #[serde(default, deserialize_with = "lenient_notes")]
    pub notes: Notes,
    #[serde(default)]
    pub created_at: Option<i64>,
}

impl From<RazorpayRefund> for Refund {
    fn from(refund: RazorpayRefund) -> Self {
        Refund {
            status: RefundStatus::from_provider(&refund.status),
            id: refund.id,
            payment_id: refund.payment_id,
            amount: refund.amount,
            currency: refund.currency,
            speed_processed: non_empty(refund.speed_processed),
            notes: refund.notes,
            created_at: refund.created_at,
        }
    }
}

/// Razorpay payment link object.
#[derive(Debug, Clone, Deserialize)]
pub struct RazorpayPaymentLink {
    pub id: String,
    pub short_url: String,
    pub amount: u64,
    #[serde(default)]
    pub amount_paid: u64,
    pub currency: String,
    pub status: String,
    #[serde(default)]
    pub reference_id: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub expire_by: Option<i64>,
    #[serde(default)]
    pub created_at: Option<i64>,
}

impl From<RazorpayPaymentLink> for PaymentLink {
    fn from(link: RazorpayPaymentLink) -> Self {
        PaymentLink {
            status: PaymentLinkStatus::from_provider(&link.status),
            id: link.id,
            short_url: link.short_url,
            amount: link.amount,
            amount_paid: link.amount_paid,
            currency: link.currency,
            reference_id: non_empty(link.reference_id),
            description: non_empty(link.description),
            expire_by: non_zero(link.expire_by),
            created_at: link.created_at,
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Errors
// ════════════════════════════════════════════════════════════════════════════════

/// Razorpay error response body: `{"error": {...}}`.
#[derive(Debug, Clone, Deserialize)]
pub struct RazorpayErrorBody {
    pub error: RazorpayErrorDetail,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RazorpayErrorDetail {
    pub code: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub field: Option<String>,
    #[serde(default)]
    pub reason: Option<String>,
    #[serde(default)]
    pub step: Option<String>,
}

// ════════════════════════════════════════════════════════════════════════════════
// Webhooks
// ════════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Deserialize)]
struct EntityWrapper<T> {
    entity: T,
}

#[derive(Debug, Clone, Default, Deserialize)]
struct RazorpayWebhookPayload {
    #[serde(default)]
    payment: Option<EntityWrapper<RazorpayPayment>>,
    #[serde(default)]
    order: Option<EntityWrapper<RazorpayOrder>>,
    #[serde(default)]
    refund: Option<EntityWrapper<RazorpayRefund>>,
    #[serde(default)]
    payment_link: Option<EntityWrapper<RazorpayPaymentLink>>,
}

/// Razorpay webhook delivery body.
#[derive(Debug, Clone, Deserialize)]
struct RazorpayWebhookEvent {
    #[serde(default)]
    account_id: Option<String>,
    event: String,
    #[serde(default)]
    payload: RazorpayWebhookPayload,
    created_at: i64,
}

/// Decode a verified webhook body into a domain event.
///
/// The delivery id travels in a header, so the returned event has no `id`.
pub fn parse_gateway_event(payload: &[u8]) -> Result<GatewayEvent, WebhookError> {
    let event: RazorpayWebhookEvent = serde_json::from_slice(payload).map_err(|e| {
        tracing::warn!(error = %e, "Failed to parse webhook payload");
        WebhookError::ParseError(e.to_string())
    })?;

    let event_type = GatewayEventType::from_provider(&event.event);
    if let GatewayEventType::Unknown(name) = &event_type {
        tracing::debug!(event = %name, "Unhandled webhook event type");
    }

    let data = GatewayEventData {
        payment: event.payload.payment.map(|p| p.entity.into()),
        order: event.payload.order.map(|o| o.entity.into()),
        refund: event.payload.refund.map(|r| r.entity.into()),
        payment_link: event.payload.payment_link.map(|l| l.entity.into()),
    };

    Ok(GatewayEvent {
        id: None,
        event_type,
        account_id: non_empty(event.account_id),
        data,
        created_at: event.created_at,
    })
}
