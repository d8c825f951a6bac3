//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the domain to external systems:
//! - `auth` - Token service (HS256 JWT)
//! - `razorpay` - Payment gateway (Razorpay REST API) and its test double

pub mod auth;
pub mod razorpay;

pub use auth::JwtTokenService;
pub use razorpay::{MockPaymentGateway, RazorpayConfig, RazorpayGateway};
