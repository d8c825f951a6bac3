//! Authentication domain - principal claims and credential classes.
//!
//! These types have **no dependency on the signing primitive**. The
//! `TokenService` port turns them into signed credentials and back.

mod claims;
mod credential;
mod errors;

pub use claims::{PrincipalClaims, RESERVED_CLAIMS};
pub use credential::{CredentialKind, TokenPair};
pub use errors::{RejectionReason, TokenError};
