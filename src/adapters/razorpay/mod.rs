//! Razorpay payment gateway adapter.
//!
//! Implements the `PaymentGateway` port for Razorpay integration, including:
//! - Orders and hosted payment links
//! - Capture and refunds
//! - Payment and refund lookups
//! - Webhook and payment confirmation signature verification
//!
//! # Security
//!
//! - Signatures use HMAC-SHA256 with constant-time comparison
//! - Webhook bodies are verified as received, never re-encoded
//! - All secrets are handled via `secrecy::SecretString`
//!
//! # Configuration
//!
//! Required environment variables:
//! - `LARNIK__PAYMENT__KEY_ID`: API key id (rzp_test_... / rzp_live_...)
//! - `LARNIK__PAYMENT__KEY_SECRET`: API key secret
//! - `LARNIK__PAYMENT__WEBHOOK_SECRET`: Webhook signing secret

mod mock_payment_gateway;
mod razorpay_adapter;
mod wire_types;

pub use mock_payment_gateway::{MethodCall, MockPaymentGateway};
pub use razorpay_adapter::{RazorpayConfig, RazorpayGateway};
pub use wire_types::{
    parse_gateway_event, RazorpayErrorBody, RazorpayErrorDetail, RazorpayOrder, RazorpayPayment,
    RazorpayPaymentLink, RazorpayRefund,
};
