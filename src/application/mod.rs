//! Application layer - Commands, Queries, and Handlers.
//!
//! This layer orchestrates the ports. No payment-derived action is taken and
//! no principal is trusted until the relevant verification has succeeded.

pub mod handlers;

pub use handlers::{
    // Auth handlers
    AuthenticateRequestCommand, AuthenticateRequestHandler,
    RefreshSessionCommand, RefreshSessionHandler,
    // Payment handlers
    ConfirmPaymentCommand, ConfirmPaymentError, ConfirmPaymentHandler,
    HandleGatewayWebhookCommand, HandleGatewayWebhookHandler, HandleGatewayWebhookResult,
};
