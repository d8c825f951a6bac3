//! Application handlers.
//!
//! Command and query handlers that sit between transport code and the
//! token service and payment gateway ports.

pub mod auth;
pub mod payment;

pub use auth::{
    AuthenticateRequestCommand, AuthenticateRequestHandler, RefreshSessionCommand,
    RefreshSessionHandler,
};
pub use payment::{
    ConfirmPaymentCommand, ConfirmPaymentError, ConfirmPaymentHandler,
    HandleGatewayWebhookCommand, HandleGatewayWebhookHandler, HandleGatewayWebhookResult,
    EVENT_ID_HEADER, SIGNATURE_HEADER,
};
