//! Payment handlers.
//!
//! Both handlers verify a provider signature before anything else happens:
//! - Confirming a client-reported payment (then capture or fetch)
//! - Accepting a webhook delivery (then parse)

mod confirm_payment;
mod handle_gateway_webhook;

pub use confirm_payment::{ConfirmPaymentCommand, ConfirmPaymentError, ConfirmPaymentHandler};
pub use handle_gateway_webhook::{
    HandleGatewayWebhookCommand, HandleGatewayWebhookHandler, HandleGatewayWebhookResult,
    EVENT_ID_HEADER, SIGNATURE_HEADER,
};
