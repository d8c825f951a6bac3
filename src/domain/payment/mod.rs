//! Payment domain - provider records, webhook events, and signature checks.
//!
//! Amounts are always integers in the currency's smallest unit (paise for
//! INR). Records are owned by the provider; this crate only requests and
//! reads them.

mod errors;
mod event;
mod link;
mod order;
mod record;
mod signature;

pub use errors::{PaymentError, PaymentErrorCode, WebhookError};
pub use event::{GatewayEvent, GatewayEventData, GatewayEventType};
pub use link::{CreatePaymentLinkRequest, LinkCustomer, LinkNotify, PaymentLink, PaymentLinkStatus};
pub use order::{CreateOrderRequest, Notes, Order, OrderStatus};
pub use record::{Payment, PaymentStatus, Refund, RefundStatus};
pub use signature::{
    canonical_confirmation, compute_signature, signatures_match, ConfirmationOrder,
    PaymentSignatureVerifier, SignedPayload,
};
