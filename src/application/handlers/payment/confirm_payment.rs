//! ConfirmPaymentHandler - Command handler for client-side payment confirmations.
//!
//! After checkout the client posts back `(order_id, payment_id, signature)`.
//! Nothing payment-derived may happen until that signature verifies, so the
//! provider is only contacted after a successful check.

use std::sync::Arc;

use thiserror::Error;

use crate::domain::payment::{Payment, PaymentError};
use crate::ports::PaymentGateway;

/// Command to confirm a payment reported by the client.
#[derive(Debug, Clone)]
pub struct ConfirmPaymentCommand {
    pub order_id: String,
    pub payment_id: String,
    /// Hex signature returned by the checkout.
    pub signature: String,
    /// Amount to capture. `None` only fetches the payment.
    pub capture_amount: Option<u64>,
}

/// Errors from payment confirmation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfirmPaymentError {
    #[error("Payment signature mismatch")]
    SignatureMismatch,

    #[error(transparent)]
    Gateway(#[from] PaymentError),
}

/// Handler for confirming client-reported payments.
pub struct ConfirmPaymentHandler {
    gateway: Arc<dyn PaymentGateway>,
}

impl ConfirmPaymentHandler {
    pub fn new(gateway: Arc<dyn PaymentGateway>) -> Self {
        Self { gateway }
    }

    pub async fn handle(&self, cmd: ConfirmPaymentCommand) -> Result<Payment, ConfirmPaymentError> {
        // 1. Verify before any provider call
        if !self
            .gateway
            .verify_payment_confirmation(&cmd.payment_id, &cmd.order_id, &cmd.signature)
        {
            return Err(ConfirmPaymentError::SignatureMismatch);
        }

        // 2. Capture or fetch the now-trusted payment
        let payment = match cmd.capture_amount {
            Some(amount) => self.gateway.capture_payment(&cmd.payment_id, amount).await?,
            None => self.gateway.get_payment(&cmd.payment_id).await?,
        };

        tracing::info!(
            payment_id = %payment.id,
            order_id = %cmd.order_id,
            status = ?payment.status,
            "Payment confirmed"
        );
        Ok(payment)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::MockPaymentGateway;
    use crate::domain::payment::{
        compute_signature, Notes, PaymentErrorCode, PaymentSignatureVerifier, PaymentStatus,
    };

    const KEY_SECRET: &str = "key-secret";

    fn authorized_payment() -> Payment {
        Payment {
            id: "pay_1".to_string(),
            order_id: Some("order_1".to_string()),
            amount: 50000,
            amount_refunded: 0,
            currency: "INR".to_string(),
            status: PaymentStatus::Authorized,
            captured: false,
            method: Some("card".to_string()),
            email: None,
            contact: None,
            error_code: None,
            error_description: None,
            notes: Notes::new(),
            created_at: Some(1_700_000_000),
        }
    }

    fn gateway() -> MockPaymentGateway {
        let mock =
            MockPaymentGateway::verifying(PaymentSignatureVerifier::new(KEY_SECRET, "hook-secret"));
        mock.add_payment(authorized_payment());
        mock
    }

    fn command(signature: String, capture_amount: Option<u64>) -> ConfirmPaymentCommand {
        ConfirmPaymentCommand {
            order_id: "order_1".to_string(),
            payment_id: "pay_1".to_string(),
            signature,
            capture_amount,
        }
    }

    fn valid_signature() -> String {
        compute_signature(KEY_SECRET.as_bytes(), b"pay_1|order_1").unwrap()
    }

    #[tokio::test]
    async fn valid_signature_captures_payment() {
        let mock = gateway();
        let handler = ConfirmPaymentHandler::new(Arc::new(mock.clone()));

        let payment = handler
            .handle(command(valid_signature(), Some(50000)))
            .await
            .unwrap();

        assert_eq!(payment.status, PaymentStatus::Captured);
        assert_eq!(mock.call_count("capture_payment"), 1);
    }

    #[tokio::test]
    async fn valid_signature_without_capture_fetches_payment() {
        let mock = gateway();
        let handler = ConfirmPaymentHandler::new(Arc::new(mock.clone()));

        let payment = handler.handle(command(valid_signature(), None)).await.unwrap();

        assert_eq!(payment.status, PaymentStatus::Authorized);
        assert!(mock.was_called("get_payment"));
        assert!(!mock.was_called("capture_payment"));
    }

    #[tokio::test]
    async fn mismatch_makes_no_provider_call() {
        let mock = gateway();
        let handler = ConfirmPaymentHandler::new(Arc::new(mock.clone()));
        let forged = compute_signature(b"wrong-secret", b"pay_1|order_1").unwrap();

        let result = handler.handle(command(forged, Some(50000))).await;

        assert_eq!(result, Err(ConfirmPaymentError::SignatureMismatch));
        assert!(!mock.was_called("capture_payment"));
        assert!(!mock.was_called("get_payment"));
        assert_eq!(mock.payment("pay_1").unwrap().status, PaymentStatus::Authorized);
    }

    #[tokio::test]
    async fn signature_for_other_order_is_rejected() {
        let mock = gateway();
        let handler = ConfirmPaymentHandler::new(Arc::new(mock.clone()));
        let other_order = compute_signature(KEY_SECRET.as_bytes(), b"pay_1|order_2").unwrap();

        let result = handler.handle(command(other_order, Some(50000))).await;

        assert_eq!(result, Err(ConfirmPaymentError::SignatureMismatch));
    }

    #[tokio::test]
    async fn capture_failure_is_surfaced_generically() {
        let mock = gateway();
        mock.set_method_error("capture_payment", PaymentError::capture_failed());
        let handler = ConfirmPaymentHandler::new(Arc::new(mock.clone()));

        let result = handler.handle(command(valid_signature(), Some(50000))).await;

        match result {
            Err(ConfirmPaymentError::Gateway(err)) => {
                assert_eq!(err.code, PaymentErrorCode::CaptureFailed)
            }
            other => panic!("expected gateway error, got {:?}", other),
        }
    }
}
