//! Payment gateway port for the external payment provider.
//!
//! Defines the contract for all interaction with the provider: order and
//! payment link creation, capture, refund, lookups, and the two signature
//! checks that decide whether a payment event can be trusted.
//!
//! # Design
//!
//! - **Verification never errors**: signature checks return `bool`; any
//!   internal failure is reported as "not verified"
//! - **Opaque failures**: provider errors surface as one generic
//!   `PaymentError` kind per operation
//! - **No retries**: each call is a single request; retry policy belongs to
//!   the caller
//!
//! # Collaborator Contract
//!
//! No payment-derived state (enrollment unlock, invoice finalization) may be
//! committed until the relevant verification has returned `true`.

use async_trait::async_trait;

use crate::domain::payment::{
    CreateOrderRequest, CreatePaymentLinkRequest, GatewayEvent, Order, Payment, PaymentError,
    PaymentLink, Refund, SignedPayload, WebhookError,
};

/// Port for payment provider integrations.
#[async_trait]
pub trait PaymentGateway: Send + Sync {
    /// Create an order the client will pay against.
    ///
    /// Fails with `OrderCreationFailed`.
    async fn create_order(&self, request: CreateOrderRequest) -> Result<Order, PaymentError>;

    /// Verify a webhook delivery against its signature header.
    ///
    /// `payload` must be the exact bytes received, not a re-encoded body.
    fn verify_webhook_signature(&self, payload: &[u8], signature: &str) -> bool;

    /// Verify a client-supplied payment confirmation.
    fn verify_payment_confirmation(&self, payment_id: &str, order_id: &str, signature: &str)
        -> bool;

    /// Verify a signature in the mode selected by `payload`.
    fn verify_payment_signature(
        &self,
        payment_id: &str,
        signature: &str,
        payload: SignedPayload<'_>,
    ) -> bool {
        match payload {
            SignedPayload::Webhook(body) => self.verify_webhook_signature(body, signature),
            SignedPayload::Confirmation { order_id } => {
                self.verify_payment_confirmation(payment_id, order_id, signature)
            }
        }
    }

    /// Decode a webhook body that has already been verified.
    fn parse_webhook_event(&self, payload: &[u8]) -> Result<GatewayEvent, WebhookError>;

    /// Capture an authorized payment.
    ///
    /// Fails with `CaptureFailed`.
    async fn capture_payment(&self, payment_id: &str, amount: u64) -> Result<Payment, PaymentError>;

    /// Refund a captured payment. `None` refunds the full amount.
    ///
    /// Fails with `RefundFailed`.
    async fn process_refund(
        &self,
        payment_id: &str,
        amount: Option<u64>,
    ) -> Result<Refund, PaymentError>;

    /// Fetch a payment by id.
    ///
    /// Fails with `PaymentLookupFailed`.
    async fn get_payment(&self, payment_id: &str) -> Result<Payment, PaymentError>;

    /// Fetch a refund by id.
    ///
    /// Fails with `RefundLookupFailed`.
    async fn get_refund(&self, refund_id: &str) -> Result<Refund, PaymentError>;

    /// Create a hosted payment link.
    ///
    /// Fails with `PaymentLinkCreationFailed`.
    async fn create_payment_link(
        &self,
        request: CreatePaymentLinkRequest,
    ) -> Result<PaymentLink, PaymentError>;
}
