//! Domain layer containing trust-boundary types and pure logic.
//!
//! # Module Organization
//!
//! - `auth` - Principal claims, credential classes, and token errors
//! - `payment` - Orders, payments, refunds, links, webhook events, and
//!   signature canonicalization

pub mod auth;
pub mod payment;
