//! Token service port for credential issuance and verification.
//!
//! Issuance and verification are pure functions of their inputs and the
//! signing secrets held by the implementation. They never suspend, so the
//! port is synchronous and safe to call from any number of tasks at once.
//!
//! # Security Requirements
//!
//! All implementations MUST:
//! - Sign access and refresh credentials with different secrets
//! - Validate signature, expiry, issuer, and audience on every verification
//! - Report every verification failure as the single opaque error for the
//!   credential class, never the cause
//!
//! # Example
//!
//! ```ignore
//! let claims = service.verify_access_token(bearer)?;
//! if !claims.has_role("instructor") {
//!     return Err(Forbidden);
//! }
//! ```

use crate::domain::auth::{PrincipalClaims, TokenError, TokenPair};

/// Issues and verifies signed, time-bounded credentials.
pub trait TokenService: Send + Sync {
    /// Signs `claims` as an access credential.
    fn issue_access_token(&self, claims: &PrincipalClaims) -> Result<String, TokenError>;

    /// Signs `claims` as a refresh credential.
    fn issue_refresh_token(&self, claims: &PrincipalClaims) -> Result<String, TokenError>;

    /// Verifies an access credential and returns its claims unchanged.
    ///
    /// Fails with `TokenError::InvalidCredential` on any rejection.
    fn verify_access_token(&self, token: &str) -> Result<PrincipalClaims, TokenError>;

    /// Verifies a refresh credential and returns its claims unchanged.
    ///
    /// Fails with `TokenError::InvalidRefreshCredential` on any rejection.
    fn verify_refresh_token(&self, token: &str) -> Result<PrincipalClaims, TokenError>;

    /// Access credential lifetime in seconds, reported to clients.
    fn access_ttl_secs(&self) -> i64;

    /// Issues an access and a refresh credential for the same claims.
    fn issue_token_pair(&self, claims: &PrincipalClaims) -> Result<TokenPair, TokenError> {
        let access = self.issue_access_token(claims)?;
        let refresh = self.issue_refresh_token(claims)?;
        Ok(TokenPair::new(access, refresh, self.access_ttl_secs()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Echoes the subject back as the token.
    struct EchoTokenService;

    impl TokenService for EchoTokenService {
        fn issue_access_token(&self, claims: &PrincipalClaims) -> Result<String, TokenError> {
            Ok(format!("access:{}", claims.sub))
        }

        fn issue_refresh_token(&self, claims: &PrincipalClaims) -> Result<String, TokenError> {
            Ok(format!("refresh:{}", claims.sub))
        }

        fn verify_access_token(&self, token: &str) -> Result<PrincipalClaims, TokenError> {
            token
                .strip_prefix("access:")
                .map(|sub| PrincipalClaims::new(sub, "student"))
                .ok_or(TokenError::InvalidCredential)
        }

        fn verify_refresh_token(&self, token: &str) -> Result<PrincipalClaims, TokenError> {
            token
                .strip_prefix("refresh:")
                .map(|sub| PrincipalClaims::new(sub, "student"))
                .ok_or(TokenError::InvalidRefreshCredential)
        }

        fn access_ttl_secs(&self) -> i64 {
            60
        }
    }

    #[test]
    fn issue_token_pair_combines_both_credentials() {
        let pair = EchoTokenService
            .issue_token_pair(&PrincipalClaims::new("u1", "student"))
            .unwrap();

        assert_eq!(pair.access_token, "access:u1");
        assert_eq!(pair.refresh_token, "refresh:u1");
        assert_eq!(pair.expires_in, 60);
    }

    #[test]
    fn token_service_is_object_safe_and_send_sync() {
        fn _assert_trait_object(_: &dyn TokenService) {}
        fn _assert_send_sync<T: Send + Sync + ?Sized>() {}
        _assert_send_sync::<std::sync::Arc<dyn TokenService>>();
    }
}
