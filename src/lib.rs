//! Larnik Trust - credential and payment trust boundary for the Larnik LMS.
//!
//! Two services decide what the rest of the platform may believe:
//!
//! - **Token service**: issues and verifies HS256 access and refresh
//!   credentials carrying a principal's claims.
//! - **Payment gateway**: talks to the payment provider and verifies the
//!   signatures on webhook deliveries and client payment confirmations.
//!
//! Nothing payment-derived is committed and no principal is trusted until
//! the matching verification has succeeded.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
pub mod telemetry;
