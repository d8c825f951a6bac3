//! Token errors.
//!
//! Verification failures are deliberately opaque: the caller learns only that
//! a credential was rejected, never why. The reason is kept internal as a
//! [`RejectionReason`] for logging.

use std::fmt;
use thiserror::Error;

use super::CredentialKind;

/// Errors returned by the token service.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TokenError {
    /// Access credential rejected.
    #[error("Invalid credential")]
    InvalidCredential,

    /// Refresh credential rejected.
    #[error("Invalid refresh credential")]
    InvalidRefreshCredential,

    /// Credential could not be signed.
    #[error("Credential issuance failed: {0}")]
    IssuanceFailed(String),
}

impl TokenError {
    /// Returns the opaque rejection error for a credential class.
    pub fn rejected(kind: CredentialKind) -> Self {
        match kind {
            CredentialKind::Access => TokenError::InvalidCredential,
            CredentialKind::Refresh => TokenError::InvalidRefreshCredential,
        }
    }

    /// Returns true if the client must log in again.
    pub fn requires_reauthentication(&self) -> bool {
        matches!(
            self,
            TokenError::InvalidCredential | TokenError::InvalidRefreshCredential
        )
    }
}

/// Why a credential was rejected. Logged, never returned to callers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectionReason {
    Expired,
    BadSignature,
    WrongIssuer,
    WrongAudience,
    WrongTokenUse,
    UnsupportedAlgorithm,
    MissingClaim,
    Malformed,
}

impl fmt::Display for RejectionReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            RejectionReason::Expired => "expired",
            RejectionReason::BadSignature => "bad_signature",
            RejectionReason::WrongIssuer => "wrong_issuer",
            RejectionReason::WrongAudience => "wrong_audience",
            RejectionReason::WrongTokenUse => "wrong_token_use",
            RejectionReason::UnsupportedAlgorithm => "unsupported_algorithm",
            RejectionReason::MissingClaim => "missing_claim",
            RejectionReason::Malformed => "malformed",
        };
        f.write_str(s)
    }
}
