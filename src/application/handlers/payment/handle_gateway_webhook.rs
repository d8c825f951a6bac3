//! HandleGatewayWebhookHandler - Command handler for payment provider webhooks.

use std::sync::Arc;

use crate::domain::payment::{GatewayEvent, GatewayEventType, WebhookError};
use crate::ports::PaymentGateway;

/// Header carrying the webhook body signature.
pub const SIGNATURE_HEADER: &str = "X-Razorpay-Signature";

/// Header carrying the provider's delivery id.
pub const EVENT_ID_HEADER: &str = "X-Razorpay-Event-Id";

/// Command to handle a webhook delivery.
#[derive(Debug, Clone)]
pub struct HandleGatewayWebhookCommand {
    /// Raw request body, exactly as received.
    pub payload: Vec<u8>,
    /// Signature header value.
    pub signature: Option<String>,
    /// Delivery id header value.
    pub event_id: Option<String>,
}

/// Result of webhook processing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HandleGatewayWebhookResult {
    /// Verified event that confirms money moved (capture, paid order, paid link).
    PaymentConfirmed(GatewayEvent),
    /// Verified event of a known type that confirms nothing.
    Acknowledged(GatewayEvent),
    /// Verified event of a type this service does not handle.
    Ignored { event: String },
}

/// Handler for processing payment provider webhooks.
///
/// Verifies the raw body against its signature before decoding it. A body
/// that fails verification is never parsed.
pub struct HandleGatewayWebhookHandler {
    gateway: Arc<dyn PaymentGateway>,
}

impl HandleGatewayWebhookHandler {
    pub fn new(gateway: Arc<dyn PaymentGateway>) -> Self {
        Self { gateway }
    }

    pub fn handle(
        &self,
        cmd: HandleGatewayWebhookCommand,
    ) -> Result<HandleGatewayWebhookResult, WebhookError> {
        // 1. Verify signature over the exact bytes
        let signature = cmd
            .signature
            .as_deref()
            .filter(|s| !s.is_empty())
            .ok_or_else(|| {
                tracing::warn!("Webhook delivery without signature header");
                WebhookError::MissingSignature
            })?;

        if !self.gateway.verify_webhook_signature(&cmd.payload, signature) {
            return Err(WebhookError::InvalidSignature);
        }

        // 2. Parse the verified body
        let mut event = self.gateway.parse_webhook_event(&cmd.payload)?;
        event.id = cmd.event_id;

        tracing::info!(
            event_id = ?event.id,
            event_type = ?event.event_type,
            payment_id = ?event.payment_id(),
            "Webhook verified"
        );

        Ok(match event.event_type.clone() {
            GatewayEventType::Unknown(name) => HandleGatewayWebhookResult::Ignored { event: name },
            kind if kind.confirms_payment() => HandleGatewayWebhookResult::PaymentConfirmed(event),
            _ => HandleGatewayWebhookResult::Acknowledged(event),
        })
    }
}
