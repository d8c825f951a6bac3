//! Mock payment gateway for testing.
//!
//! Provides a configurable in-memory implementation of `PaymentGateway` for
//! unit and integration tests. Supports:
//! - Seeded payments and pre-configured responses
//! - Error injection
//! - Call tracking
//! - Signature checks that accept, reject, or really verify

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;

use crate::domain::payment::{
    CreateOrderRequest, CreatePaymentLinkRequest, GatewayEvent, Order, OrderStatus, Payment,
    PaymentError, PaymentLink, PaymentLinkStatus, PaymentSignatureVerifier, PaymentStatus, Refund,
    RefundStatus, WebhookError,
};
use crate::ports::PaymentGateway;

use super::wire_types::parse_gateway_event;

/// Mock payment gateway for testing.
///
/// # Example
///
/// ```ignore
/// let mock = MockPaymentGateway::new();
///
/// // Seed provider state
/// mock.add_payment(authorized_payment("pay_1", 50000));
///
/// // Inject errors
/// mock.set_method_error("capture_payment", PaymentError::capture_failed());
///
/// // Use in tests
/// let result = mock.capture_payment("pay_1", 50000).await;
/// ```
#[derive(Default)]
pub struct MockPaymentGateway {
    /// Inner state (thread-safe for async tests).
    inner: Arc<Mutex<MockState>>,
}

/// Internal mutable state.
#[derive(Default)]
struct MockState {
    /// Orders by ID.
    orders: HashMap<String, Order>,

    /// Payments by ID.
    payments: HashMap<String, Payment>,

    /// Refunds by ID.
    refunds: HashMap<String, Refund>,

    /// Next order to return from `create_order`.
    next_order: Option<Order>,

    /// Next webhook event to return from `parse_webhook_event`.
    next_webhook_event: Option<GatewayEvent>,

    /// Error to return on next call.
    next_error: Option<PaymentError>,

    /// Specific errors by method name.
    method_errors: HashMap<String, PaymentError>,

    /// Track method calls for assertions.
    call_log: Vec<MethodCall>,

    /// Signature verification behavior.
    verify_mode: VerifyMode,

    /// Sequence for generated ids.
    sequence: u64,
}

/// Recorded method call for assertions.
#[derive(Debug, Clone)]
pub struct MethodCall {
    pub method: String,
    pub args: Vec<String>,
}

/// How to handle signature verification.
#[derive(Default, Clone)]
enum VerifyMode {
    /// Accept every signature.
    #[default]
    AcceptAll,

    /// Verify with real secrets.
    Verify(PaymentSignatureVerifier),

    /// Reject every signature.
    AlwaysFail,
}

impl MockPaymentGateway {
    /// Create a new mock gateway that accepts every signature.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a mock that rejects every signature.
    pub fn rejecting_signatures() -> Self {
        let mock = Self::new();
        mock.state().verify_mode = VerifyMode::AlwaysFail;
        mock
    }

    /// Create a mock that verifies signatures with real secrets.
    pub fn verifying(verifier: PaymentSignatureVerifier) -> Self {
        let mock = Self::new();
        mock.state().verify_mode = VerifyMode::Verify(verifier);
        mock
    }

    // ════════════════════════════════════════════════════════════════════════════
    // Configuration Methods
    // ════════════════════════════════════════════════════════════════════════════

    /// Set the order to return on next `create_order` call.
    pub fn set_order(&self, order: Order) {
        self.state().next_order = Some(order);
    }

    /// Add a payment to the provider "database".
    pub fn add_payment(&self, payment: Payment) {
        let id = payment.id.clone();
        self.state().payments.insert(id, payment);
    }

    /// Set the event to return from `parse_webhook_event`.
    pub fn set_webhook_event(&self, event: GatewayEvent) {
        self.state().next_webhook_event = Some(event);
    }

    /// Set an error to return on the next call to any method.
    pub fn set_error(&self, error: PaymentError) {
        self.state().next_error = Some(error);
    }

    /// Set an error for a specific method.
    pub fn set_method_error(&self, method: &str, error: PaymentError) {
        self.state()
            .method_errors
            .insert(method.to_string(), error);
    }

    /// Clear all configured errors.
    pub fn clear_errors(&self) {
        let mut state = self.state();
        state.next_error = None;
        state.method_errors.clear();
    }

    /// Order created by `create_order`, by id.
    pub fn order(&self, order_id: &str) -> Option<Order> {
        self.state().orders.get(order_id).cloned()
    }

    /// Current provider view of a payment.
    pub fn payment(&self, payment_id: &str) -> Option<Payment> {
        self.state().payments.get(payment_id).cloned()
    }

    // ════════════════════════════════════════════════════════════════════════════
    // Call Tracking
    // ════════════════════════════════════════════════════════════════════════════

    /// Get all recorded method calls.
    pub fn calls(&self) -> Vec<MethodCall> {
        self.state().call_log.clone()
    }

    /// Check if a method was called.
    pub fn was_called(&self, method: &str) -> bool {
        self.call_count(method) > 0
    }

    /// Get count of calls to a method.
    pub fn call_count(&self, method: &str) -> usize {
        self.state()
            .call_log
            .iter()
            .filter(|c| c.method == method)
            .count()
    }

    /// Clear the call log.
    pub fn clear_calls(&self) {
        self.state().call_log.clear();
    }

    // ════════════════════════════════════════════════════════════════════════════
    // Internal Helpers
    // ════════════════════════════════════════════════════════════════════════════

    fn state(&self) -> MutexGuard<'_, MockState> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn record_call(&self, method: &str, args: Vec<String>) {
        self.state().call_log.push(MethodCall {
            method: method.to_string(),
            args,
        });
    }

    fn check_error(&self, method: &str) -> Result<(), PaymentError> {
        let mut state = self.state();

        // Check method-specific error first
        if let Some(error) = state.method_errors.get(method) {
            return Err(error.clone());
        }

        // Check global error (consumes it)
        if let Some(error) = state.next_error.take() {
            return Err(error);
        }

        Ok(())
    }

    fn verify_mode(&self) -> VerifyMode {
        self.state().verify_mode.clone()
    }
}

impl MockState {
    fn next_id(&mut self, prefix: &str) -> String {
        self.sequence += 1;
        format!("{prefix}_mock{:06}", self.sequence)
    }
}

impl Clone for MockPaymentGateway {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

#[async_trait]
impl PaymentGateway for MockPaymentGateway {
    async fn create_order(&self, request: CreateOrderRequest) -> Result<Order, PaymentError> {
        self.record_call(
            "create_order",
            vec![request.amount.to_string(), request.currency.clone()],
        );
        self.check_error("create_order")?;

        let mut state = self.state();

        let order = match state.next_order.take() {
            Some(order) => order,
            None => Order {
                id: state.next_id("order"),
                amount: request.amount,
                amount_paid: 0,
                amount_due: request.amount,
                currency: request.currency,
                receipt: request.receipt,
                status: OrderStatus::Created,
                attempts: 0,
                notes: request.notes,
                created_at: Some(chrono::Utc::now().timestamp()),
            },
        };

        state.orders.insert(order.id.clone(), order.clone());
        Ok(order)
    }

    fn verify_webhook_signature(&self, payload: &[u8], signature: &str) -> bool {
        self.record_call("verify_webhook_signature", vec![signature.to_string()]);
        match self.verify_mode() {
            VerifyMode::AcceptAll => true,
            VerifyMode::Verify(verifier) => verifier.verify_webhook(payload, signature),
            VerifyMode::AlwaysFail => false,
        }
    }

    fn verify_payment_confirmation(
        &self,
        payment_id: &str,
        order_id: &str,
        signature: &str,
    ) -> bool {
        self.record_call(
            "verify_payment_confirmation",
            vec![payment_id.to_string(), order_id.to_string()],
        );
        match self.verify_mode() {
            VerifyMode::AcceptAll => true,
            VerifyMode::Verify(verifier) => {
                verifier.verify_confirmation(payment_id, order_id, signature)
            }
            VerifyMode::AlwaysFail => false,
        }
    }

    fn parse_webhook_event(&self, payload: &[u8]) -> Result<GatewayEvent, WebhookError> {
        self.record_call("parse_webhook_event", vec![payload.len().to_string()]);

        if let Some(event) = self.state().next_webhook_event.take() {
            return Ok(event);
        }
        parse_gateway_event(payload)
    }

    async fn capture_payment(&self, payment_id: &str, amount: u64) -> Result<Payment, PaymentError> {
        self.record_call(
            "capture_payment",
            vec![payment_id.to_string(), amount.to_string()],
        );
        self.check_error("capture_payment")?;

        let mut state = self.state();
        let payment = state
            .payments
            .get_mut(payment_id)
            .ok_or_else(PaymentError::capture_failed)?;

        if payment.status != PaymentStatus::Authorized || payment.amount != amount {
            return Err(PaymentError::capture_failed());
        }

        payment.status = PaymentStatus::Captured;
        payment.captured = true;
        Ok(payment.clone())
    }

    async fn process_refund(
        &self,
        payment_id: &str,
        amount: Option<u64>,
    ) -> Result<Refund, PaymentError> {
        self.record_call(
            "process_refund",
            vec![payment_id.to_string(), format!("{:?}", amount)],
        );
        self.check_error("process_refund")?;

        let mut state = self.state();
        let refund_id = state.next_id("rfnd");
        let payment = state
            .payments
            .get_mut(payment_id)
            .ok_or_else(PaymentError::refund_failed)?;

        let refundable = payment.amount.saturating_sub(payment.amount_refunded);
        let amount = amount.unwrap_or(refundable);
        if !payment.captured || amount == 0 || amount > refundable {
            return Err(PaymentError::refund_failed());
        }

        payment.amount_refunded += amount;
        if payment.amount_refunded == payment.amount {
            payment.status = PaymentStatus::Refunded;
        }

        let refund = Refund {
            id: refund_id,
            payment_id: payment_id.to_string(),
            amount,
            currency: payment.currency.clone(),
            status: RefundStatus::Processed,
            speed_processed: Some("normal".to_string()),
            notes: Default::default(),
            created_at: Some(chrono::Utc::now().timestamp()),
        };

        state.refunds.insert(refund.id.clone(), refund.clone());
        Ok(refund)
    }

    async fn get_payment(&self, payment_id: &str) -> Result<Payment, PaymentError> {
        self.record_call("get_payment", vec![payment_id.to_string()]);
        self.check_error("get_payment")?;

        self.payment(payment_id)
            .ok_or_else(PaymentError::payment_lookup_failed)
    }

    async fn get_refund(&self, refund_id: &str) -> Result<Refund, PaymentError> {
        self.record_call("get_refund", vec![refund_id.to_string()]);
        self.check_error("get_refund")?;

        let state = self.state();
        state
            .refunds
            .get(refund_id)
            .cloned()
            .ok_or_else(PaymentError::refund_lookup_failed)
    }

    async fn create_payment_link(
        &self,
        request: CreatePaymentLinkRequest,
    ) -> Result<PaymentLink, PaymentError> {
        self.record_call(
            "create_payment_link",
            vec![request.amount.to_string(), request.currency.clone()],
        );
        self.check_error("create_payment_link")?;

        let id = self.state().next_id("plink");
        Ok(PaymentLink {
            short_url: format!("https://rzp.io/i/{id}"),
            id,
            amount: request.amount,
            amount_paid: 0,
            currency: request.currency,
            status: PaymentLinkStatus::Created,
            reference_id: request.reference_id,
            description: request.description,
            expire_by: request.expire_by,
            created_at: Some(chrono::Utc::now().timestamp()),
        })
    }
}
