//! Ports - Interfaces at the trust boundary.
//!
//! Following hexagonal architecture, ports define the contracts between
//! request handlers and the credential/payment machinery. Adapters
//! implement these ports.
//!
//! ## Auth Ports
//!
//! - `TokenService` - Issue and verify access/refresh credentials
//!
//! ## Payment Ports
//!
//! - `PaymentGateway` - Orders, signature checks, capture, refund, lookups,
//!   and payment links against the external provider

mod payment_gateway;
mod token_service;

pub use payment_gateway::PaymentGateway;
pub use token_service::TokenService;
