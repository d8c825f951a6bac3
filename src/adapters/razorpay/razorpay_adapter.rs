//! Razorpay payment gateway adapter.
//!
//! Implements the `PaymentGateway` trait against the Razorpay REST API.
//! Handles orders, capture, refunds, lookups, payment links, and both
//! signature verification modes.
//!
//! # Security
//!
//! - HMAC-SHA256 signature verification with constant-time comparison
//! - Webhook bodies verified as the exact bytes received
//! - Secrets handled via `secrecy::SecretString`
//! - Provider error bodies are logged here and never returned to callers
//!
//! # Configuration
//!
//! ```ignore
//! let config = RazorpayConfig::from_config(&app_config.payment);
//! let gateway = RazorpayGateway::new(config)?;
//! ```

use std::time::Duration;

use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};
use serde::de::DeserializeOwned;

use crate::config::PaymentConfig;
use crate::domain::payment::{
    ConfirmationOrder, CreateOrderRequest, CreatePaymentLinkRequest, GatewayEvent, Order, Payment,
    PaymentError, PaymentErrorCode, PaymentLink, PaymentSignatureVerifier, Refund, WebhookError,
};
use crate::ports::PaymentGateway;

use super::wire_types::{
    parse_gateway_event, CaptureRequest, RazorpayErrorBody, RazorpayOrder, RazorpayPayment,
    RazorpayPaymentLink, RazorpayRefund, RefundRequest,
};

const DEFAULT_API_BASE_URL: &str = "https://api.razorpay.com";
const DEFAULT_CURRENCY: &str = "INR";
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(15);

/// Razorpay API configuration.
#[derive(Clone)]
pub struct RazorpayConfig {
    /// API key id (rzp_test_... or rzp_live_...).
    key_id: String,

    /// API key secret. Authenticates requests and signs confirmations.
    key_secret: SecretString,

    /// Webhook signing secret.
    webhook_secret: SecretString,

    /// Base URL for the API (default: https://api.razorpay.com).
    api_base_url: String,

    /// Currency sent with captures.
    currency: String,

    /// Per-request timeout.
    request_timeout: Duration,

    /// Id order in the confirmation canonical string.
    confirmation_order: ConfirmationOrder,
}

impl RazorpayConfig {
    /// Create a new Razorpay configuration.
    pub fn new(
        key_id: impl Into<String>,
        key_secret: impl Into<String>,
        webhook_secret: impl Into<String>,
    ) -> Self {
        Self {
            key_id: key_id.into(),
            key_secret: SecretString::new(key_secret.into()),
            webhook_secret: SecretString::new(webhook_secret.into()),
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            currency: DEFAULT_CURRENCY.to_string(),
            request_timeout: DEFAULT_TIMEOUT,
            confirmation_order: ConfirmationOrder::default(),
        }
    }

    /// Create configuration from the loaded application settings.
    pub fn from_config(config: &PaymentConfig) -> Self {
        Self {
            key_id: config.key_id.clone(),
            key_secret: config.key_secret.clone(),
            webhook_secret: config.webhook_secret.clone(),
            api_base_url: config.api_base_url.trim_end_matches('/').to_string(),
            currency: config.currency.clone(),
            request_timeout: config.request_timeout(),
            confirmation_order: config.confirmation_order,
        }
    }

    /// Set a custom API base URL (for testing).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.api_base_url = url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn with_currency(mut self, currency: impl Into<String>) -> Self {
        self.currency = currency.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    pub fn with_confirmation_order(mut self, order: ConfirmationOrder) -> Self {
        self.confirmation_order = order;
        self
    }
}

impl std::fmt::Debug for RazorpayConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RazorpayConfig")
            .field("key_id", &self.key_id)
            .field("api_base_url", &self.api_base_url)
            .field("currency", &self.currency)
            .field("request_timeout", &self.request_timeout)
            .field("confirmation_order", &self.confirmation_order)
            .finish_non_exhaustive()
    }
}

/// Razorpay payment gateway adapter.
///
/// Stateless apart from its configuration and pooled HTTP client; share one
/// instance behind an `Arc`.
pub struct RazorpayGateway {
    config: RazorpayConfig,
    verifier: PaymentSignatureVerifier,
    http_client: reqwest::Client,
}

impl RazorpayGateway {
    /// Create a new Razorpay gateway with the given configuration.
    ///
    /// Fails only if the HTTP client cannot be constructed.
    pub fn new(config: RazorpayConfig) -> Result<Self, reqwest::Error> {
        let http_client = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .build()?;

        let verifier = PaymentSignatureVerifier::from_secrets(
            config.key_secret.clone(),
            config.webhook_secret.clone(),
        )
        .with_confirmation_order(config.confirmation_order);

        Ok(Self {
            config,
            verifier,
            http_client,
        })
    }

    /// Build an API URL under `/v1` from path segments.
    ///
    /// Each segment is percent-encoded, so an id cannot add path segments or
    /// a query string. Empty and dot segments are rejected.
    fn endpoint(
        &self,
        operation: PaymentErrorCode,
        segments: &[&str],
    ) -> Result<reqwest::Url, PaymentError> {
        if let Some(segment) = segments
            .iter()
            .find(|s| s.is_empty() || **s == "." || **s == "..")
        {
            tracing::warn!(operation = %operation, segment = %segment, "Rejected Razorpay path segment");
            return Err(PaymentError::new(operation));
        }

        let mut url = reqwest::Url::parse(&self.config.api_base_url).map_err(|e| {
            tracing::error!(operation = %operation, error = %e, "Invalid Razorpay base URL");
            PaymentError::new(operation)
        })?;
        url.path_segments_mut()
            .map_err(|_| {
                tracing::error!(operation = %operation, "Razorpay base URL cannot take a path");
                PaymentError::new(operation)
            })?
            .pop_if_empty()
            .push("v1")
            .extend(segments);
        Ok(url)
    }

    /// Send an authenticated request and decode a successful response.
    ///
    /// Every failure is logged with full provider detail and collapsed into
    /// the generic error for `operation`.
    async fn send<T: DeserializeOwned>(
        &self,
        operation: PaymentErrorCode,
        request: reqwest::RequestBuilder,
    ) -> Result<T, PaymentError> {
        let response = request
            .basic_auth(&self.config.key_id, Some(self.config.key_secret.expose_secret()))
            .send()
            .await
            .map_err(|e| {
                tracing::error!(
                    operation = %operation,
                    error = %e,
                    timeout = e.is_timeout(),
                    "Razorpay request failed"
                );
                PaymentError::transient(operation)
            })?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            match serde_json::from_str::<RazorpayErrorBody>(&error_text) {
                Ok(body) => tracing::error!(
                    operation = %operation,
                    status = %status,
                    code = %body.error.code,
                    description = %body.error.description,
                    reason = ?body.error.reason,
                    field = ?body.error.field,
                    step = ?body.error.step,
                    "Razorpay API error"
                ),
                Err(_) => tracing::error!(
                    operation = %operation,
                    status = %status,
                    body = %error_text,
                    "Razorpay API error"
                ),
            }

            let retryable =
                status.is_server_error() || status == reqwest::StatusCode::TOO_MANY_REQUESTS;
            return Err(if retryable {
                PaymentError::transient(operation)
            } else {
                PaymentError::new(operation)
            });
        }

        response.json::<T>().await.map_err(|e| {
            tracing::error!(
                operation = %operation,
                error = %e,
                timeout = e.is_timeout(),
                "Failed to read Razorpay response"
            );
            if e.is_timeout() {
                PaymentError::transient(operation)
            } else {
                PaymentError::new(operation)
            }
        })
    }
}

#[async_trait]
impl PaymentGateway for RazorpayGateway {
    async fn create_order(&self, request: CreateOrderRequest) -> Result<Order, PaymentError> {
        let operation = PaymentErrorCode::OrderCreationFailed;
        let url = self.endpoint(operation, &["orders"])?;
        let order: RazorpayOrder = self
            .send(operation, self.http_client.post(url).json(&request))
            .await?;

        tracing::info!(
            order_id = %order.id,
            amount = order.amount,
            currency = %order.currency,
            "Razorpay order created"
        );
        Ok(order.into())
    }

    fn verify_webhook_signature(&self, payload: &[u8], signature: &str) -> bool {
        self.verifier.verify_webhook(payload, signature)
    }

    fn verify_payment_confirmation(
        &self,
        payment_id: &str,
        order_id: &str,
        signature: &str,
    ) -> bool {
        self.verifier
            .verify_confirmation(payment_id, order_id, signature)
    }

    fn parse_webhook_event(&self, payload: &[u8]) -> Result<GatewayEvent, WebhookError> {
        parse_gateway_event(payload)
    }

    async fn capture_payment(&self, payment_id: &str, amount: u64) -> Result<Payment, PaymentError> {
        let body = CaptureRequest {
            amount,
            currency: &self.config.currency,
        };

        let operation = PaymentErrorCode::CaptureFailed;
        let url = self.endpoint(operation, &["payments", payment_id, "capture"])?;
        let payment: RazorpayPayment = self
            .send(operation, self.http_client.post(url).json(&body))
            .await?;

        tracing::info!(payment_id = %payment.id, amount, status = %payment.status, "Payment captured");
        Ok(payment.into())
    }

    async fn process_refund(
        &self,
        payment_id: &str,
        amount: Option<u64>,
    ) -> Result<Refund, PaymentError> {
        let operation = PaymentErrorCode::RefundFailed;
        let url = self.endpoint(operation, &["payments", payment_id, "refund"])?;
        let refund: RazorpayRefund = self
            .send(operation, self.http_client.post(url).json(&RefundRequest { amount }))
            .await?;

        tracing::info!(
            payment_id,
            refund_id = %refund.id,
            amount = refund.amount,
            status = %refund.status,
            "Refund requested"
        );
        Ok(refund.into())
    }

    async fn get_payment(&self, payment_id: &str) -> Result<Payment, PaymentError> {
        let operation = PaymentErrorCode::PaymentLookupFailed;
        let url = self.endpoint(operation, &["payments", payment_id])?;
        let payment: RazorpayPayment = self.send(operation, self.http_client.get(url)).await?;
        Ok(payment.into())
    }

    async fn get_refund(&self, refund_id: &str) -> Result<Refund, PaymentError> {
        let operation = PaymentErrorCode::RefundLookupFailed;
        let url = self.endpoint(operation, &["refunds", refund_id])?;
        let refund: RazorpayRefund = self.send(operation, self.http_client.get(url)).await?;
        Ok(refund.into())
    }

    async fn create_payment_link(
        &self,
        request: CreatePaymentLinkRequest,
    ) -> Result<PaymentLink, PaymentError> {
        let operation = PaymentErrorCode::PaymentLinkCreationFailed;
        let url = self.endpoint(operation, &["payment_links"])?;
        let link: RazorpayPaymentLink = self
            .send(operation, self.http_client.post(url).json(&request))
            .await?;

        tracing::info!(link_id = %link.id, amount = link.amount, "Payment link created");
        Ok(link.into())
    }
}
