//! HS256 JWT adapter for the `TokenService` port.
//!
//! Access and refresh credentials are signed with separate secrets and carry
//! the class they were issued for in a `token_use` claim. Verification pins
//! the algorithm to HS256 and validates:
//!
//! - **Signature**: against the secret of the requested class
//! - **Issuer (iss)** and **Audience (aud)**: must equal the fixed values
//! - **Expiry (exp)**: must not have passed (minus configured leeway)
//! - **Token use**: must match the requested class
//!
//! Every rejection is logged with its cause and reported to the caller as
//! the single opaque error for the class.
//!
//! # Example
//!
//! ```ignore
//! let service = JwtTokenService::from_config(&config.auth)?;
//! let pair = service.issue_token_pair(&PrincipalClaims::new("user-1", "student"))?;
//! let claims = service.verify_access_token(&pair.access_token)?;
//! ```

use std::time::Duration;

use jsonwebtoken::{
    decode, encode, errors::ErrorKind, Algorithm, DecodingKey, EncodingKey, Header, Validation,
};
use secrecy::ExposeSecret;
use serde::{Deserialize, Serialize};

use crate::config::{AuthConfig, ValidationError};
use crate::domain::auth::{CredentialKind, PrincipalClaims, RejectionReason, TokenError};
use crate::ports::TokenService;

const DEFAULT_ACCESS_TTL: Duration = Duration::from_secs(24 * 60 * 60);
const DEFAULT_REFRESH_TTL: Duration = Duration::from_secs(7 * 24 * 60 * 60);
const DEFAULT_ISSUER: &str = "larnik-lms";
const DEFAULT_AUDIENCE: &str = "larnik-users";

/// Encoded claim set: principal claims plus registered fields.
#[derive(Debug, Serialize, Deserialize)]
struct CredentialClaims {
    #[serde(flatten)]
    principal: PrincipalClaims,
    iss: String,
    aud: String,
    iat: i64,
    exp: i64,
    token_use: CredentialKind,
}

/// Signing material and lifetime for one credential class.
struct CredentialKeys {
    encoding: EncodingKey,
    decoding: DecodingKey,
    ttl: Duration,
}

impl CredentialKeys {
    fn new(secret: &[u8], ttl: Duration) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret),
            decoding: DecodingKey::from_secret(secret),
            ttl,
        }
    }

    fn ttl_secs(&self) -> i64 {
        i64::try_from(self.ttl.as_secs()).unwrap_or(i64::MAX)
    }
}

/// Stateless JWT token service.
///
/// Holds only read-only key material, so one instance can be shared across
/// all request-handling tasks.
pub struct JwtTokenService {
    access: CredentialKeys,
    refresh: CredentialKeys,
    issuer: String,
    audience: String,
    leeway_secs: u64,
}

impl JwtTokenService {
    /// Create a service with default lifetimes (24h / 7d), issuer, and audience.
    pub fn new(access_secret: &[u8], refresh_secret: &[u8]) -> Self {
        Self {
            access: CredentialKeys::new(access_secret, DEFAULT_ACCESS_TTL),
            refresh: CredentialKeys::new(refresh_secret, DEFAULT_REFRESH_TTL),
            issuer: DEFAULT_ISSUER.to_string(),
            audience: DEFAULT_AUDIENCE.to_string(),
            leeway_secs: 0,
        }
    }

    /// Build a service from validated configuration.
    pub fn from_config(config: &AuthConfig) -> Result<Self, ValidationError> {
        Ok(Self::new(
            config.access_secret.expose_secret().as_bytes(),
            config.refresh_secret.expose_secret().as_bytes(),
        )
        .with_ttls(config.access_ttl()?, config.refresh_ttl()?)
        .with_issuer(&config.issuer)
        .with_audience(&config.audience)
        .with_leeway(config.leeway_secs))
    }

    pub fn with_ttls(mut self, access_ttl: Duration, refresh_ttl: Duration) -> Self {
        self.access.ttl = access_ttl;
        self.refresh.ttl = refresh_ttl;
        self
    }

    pub fn with_issuer(mut self, issuer: impl Into<String>) -> Self {
        self.issuer = issuer.into();
        self
    }

    pub fn with_audience(mut self, audience: impl Into<String>) -> Self {
        self.audience = audience.into();
        self
    }

    pub fn with_leeway(mut self, leeway_secs: u64) -> Self {
        self.leeway_secs = leeway_secs;
        self
    }

    fn keys(&self, kind: CredentialKind) -> &CredentialKeys {
        match kind {
            CredentialKind::Access => &self.access,
            CredentialKind::Refresh => &self.refresh,
        }
    }

    fn validation(&self) -> Validation {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_issuer(&[&self.issuer]);
        validation.set_audience(&[&self.audience]);
        validation.set_required_spec_claims(&["exp", "iss", "aud", "sub"]);
        validation.validate_exp = true;
        validation.leeway = self.leeway_secs;
        validation
    }

    fn issue(&self, kind: CredentialKind, claims: &PrincipalClaims) -> Result<String, TokenError> {
        self.issue_at(kind, claims, chrono::Utc::now().timestamp())
    }

    /// Sign `claims` as if issued at `issued_at` (Unix seconds).
    fn issue_at(
        &self,
        kind: CredentialKind,
        claims: &PrincipalClaims,
        issued_at: i64,
    ) -> Result<String, TokenError> {
        let keys = self.keys(kind);
        let credential = CredentialClaims {
            principal: claims.clone(),
            iss: self.issuer.clone(),
            aud: self.audience.clone(),
            iat: issued_at,
            exp: issued_at.saturating_add(keys.ttl_secs()),
            token_use: kind,
        };

        encode(&Header::new(Algorithm::HS256), &credential, &keys.encoding).map_err(|e| {
            tracing::error!(credential = %kind, error = %e, "Failed to sign credential");
            TokenError::IssuanceFailed(format!("failed to sign {kind} credential"))
        })
    }

    fn verify(&self, kind: CredentialKind, token: &str) -> Result<PrincipalClaims, TokenError> {
        let keys = self.keys(kind);

        let data = decode::<CredentialClaims>(token, &keys.decoding, &self.validation()).map_err(
            |e| {
                let reason = rejection_reason(e.kind());
                tracing::warn!(credential = %kind, reason = %reason, "Credential rejected");
                TokenError::rejected(kind)
            },
        )?;

        // SECURITY: class check is independent of which secret verified it
        if data.claims.token_use != kind {
            tracing::warn!(
                credential = %kind,
                reason = %RejectionReason::WrongTokenUse,
                presented = %data.claims.token_use,
                "Credential rejected"
            );
            return Err(TokenError::rejected(kind));
        }

        tracing::debug!(credential = %kind, sub = %data.claims.principal.sub, "Credential verified");
        Ok(data.claims.principal)
    }
}

fn rejection_reason(kind: &ErrorKind) -> RejectionReason {
    match kind {
        ErrorKind::ExpiredSignature => RejectionReason::Expired,
        ErrorKind::InvalidSignature => RejectionReason::BadSignature,
        ErrorKind::InvalidIssuer => RejectionReason::WrongIssuer,
        ErrorKind::InvalidAudience => RejectionReason::WrongAudience,
        ErrorKind::InvalidAlgorithm => RejectionReason::UnsupportedAlgorithm,
        ErrorKind::MissingRequiredClaim(_) => RejectionReason::MissingClaim,
        _ => RejectionReason::Malformed,
    }
}

impl TokenService for JwtTokenService {
    fn issue_access_token(&self, claims: &PrincipalClaims) -> Result<String, TokenError> {
        self.issue(CredentialKind::Access, claims)
    }

    fn issue_refresh_token(&self, claims: &PrincipalClaims) -> Result<String, TokenError> {
        self.issue(CredentialKind::Refresh, claims)
    }

    fn verify_access_token(&self, token: &str) -> Result<PrincipalClaims, TokenError> {
        self.verify(CredentialKind::Access, token)
    }

    fn verify_refresh_token(&self, token: &str) -> Result<PrincipalClaims, TokenError> {
        self.verify(CredentialKind::Refresh, token)
    }

    fn access_ttl_secs(&self) -> i64 {
        self.access.ttl_secs()
    }
}

impl std::fmt::Debug for JwtTokenService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtTokenService")
            .field("issuer", &self.issuer)
            .field("audience", &self.audience)
            .field("access_ttl", &self.access.ttl)
            .field("refresh_ttl", &self.refresh.ttl)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::sync::Arc;

    const ACCESS_SECRET: &[u8] = b"access-secret-for-tests-0123456789";
    const REFRESH_SECRET: &[u8] = b"refresh-secret-for-tests-0123456789";

    fn service() -> JwtTokenService {
        JwtTokenService::new(ACCESS_SECRET, REFRESH_SECRET)
    }

    fn claims() -> PrincipalClaims {
        PrincipalClaims::new("user-42", "student")
            .with_claim("email", "learner@larnik.example")
            .with_claim("courses", json!(["rust-101", "sql-201"]))
    }

    /// Replace one character in the given JWT segment.
    fn tamper(token: &str, segment: usize) -> String {
        let mut parts: Vec<String> = token.split('.').map(str::to_string).collect();
        let target = &mut parts[segment];
        let mid = target.len() / 2;
        let original = target.as_bytes()[mid];
        let replacement = if original == b'A' { "B" } else { "A" };
        target.replace_range(mid..mid + 1, replacement);
        parts.join(".")
    }

    // ════════════════════════════════════════════════════════════════════════════
    // Round Trip Tests
    // ════════════════════════════════════════════════════════════════════════════

    #[test]
    fn access_round_trip_returns_claims_unchanged() {
        let svc = service();
        let token = svc.issue_access_token(&claims()).unwrap();

        assert_eq!(svc.verify_access_token(&token).unwrap(), claims());
    }

    #[test]
    fn refresh_round_trip_returns_claims_unchanged() {
        let svc = service();
        let token = svc.issue_refresh_token(&claims()).unwrap();

        assert_eq!(svc.verify_refresh_token(&token).unwrap(), claims());
    }

    #[test]
    fn token_is_compact_three_segment_jws() {
        let token = service().issue_access_token(&claims()).unwrap();
        assert_eq!(token.split('.').count(), 3);
    }

    #[test]
    fn encoded_claims_carry_registered_fields() {
        let svc = service().with_ttls(Duration::from_secs(3600), Duration::from_secs(7200));
        let token = svc.issue_access_token(&claims()).unwrap();

        let mut validation = Validation::new(Algorithm::HS256);
        validation.insecure_disable_signature_validation();
        validation.validate_aud = false;
        let raw = decode::<serde_json::Value>(&token, &DecodingKey::from_secret(b""), &validation)
            .unwrap()
            .claims;

        assert_eq!(raw["iss"], "larnik-lms");
        assert_eq!(raw["aud"], "larnik-users");
        assert_eq!(raw["sub"], "user-42");
        assert_eq!(raw["role"], "student");
        assert_eq!(raw["token_use"], "access");
        assert_eq!(raw["exp"].as_i64().unwrap() - raw["iat"].as_i64().unwrap(), 3600);
    }

    // ════════════════════════════════════════════════════════════════════════════
    // Cross-Class Rejection Tests
    // ════════════════════════════════════════════════════════════════════════════

    #[test]
    fn access_token_fails_refresh_verification() {
        let svc = service();
        let token = svc.issue_access_token(&claims()).unwrap();

        assert_eq!(
            svc.verify_refresh_token(&token),
            Err(TokenError::InvalidRefreshCredential)
        );
    }

    #[test]
    fn refresh_token_fails_access_verification() {
        let svc = service();
        let token = svc.issue_refresh_token(&claims()).unwrap();

        assert_eq!(svc.verify_access_token(&token), Err(TokenError::InvalidCredential));
    }

    #[test]
    fn token_use_guards_even_with_shared_secret() {
        let svc = JwtTokenService::new(ACCESS_SECRET, ACCESS_SECRET);
        let refresh = svc.issue_refresh_token(&claims()).unwrap();

        assert_eq!(svc.verify_access_token(&refresh), Err(TokenError::InvalidCredential));
    }

    // ════════════════════════════════════════════════════════════════════════════
    // Expiry Tests
    // ════════════════════════════════════════════════════════════════════════════

    #[test]
    fn expired_access_token_is_rejected() {
        let svc = service();
        let issued_at = chrono::Utc::now().timestamp() - 2 * svc.access_ttl_secs();
        let token = svc.issue_at(CredentialKind::Access, &claims(), issued_at).unwrap();

        assert_eq!(svc.verify_access_token(&token), Err(TokenError::InvalidCredential));
    }

    #[test]
    fn expired_refresh_token_is_rejected() {
        let svc = service();
        let issued_at = chrono::Utc::now().timestamp() - 8 * 24 * 60 * 60;
        let token = svc.issue_at(CredentialKind::Refresh, &claims(), issued_at).unwrap();

        assert_eq!(
            svc.verify_refresh_token(&token),
            Err(TokenError::InvalidRefreshCredential)
        );
    }

    #[test]
    fn token_inside_lifetime_is_accepted() {
        let svc = service();
        let issued_at = chrono::Utc::now().timestamp() - svc.access_ttl_secs() / 2;
        let token = svc.issue_at(CredentialKind::Access, &claims(), issued_at).unwrap();

        assert!(svc.verify_access_token(&token).is_ok());
    }

    #[test]
    fn leeway_tolerates_recent_expiry() {
        let strict = service();
        let lenient = service().with_leeway(120);
        let issued_at = chrono::Utc::now().timestamp() - strict.access_ttl_secs() - 30;
        let token = strict.issue_at(CredentialKind::Access, &claims(), issued_at).unwrap();

        assert!(strict.verify_access_token(&token).is_err());
        assert!(lenient.verify_access_token(&token).is_ok());
    }

    // ════════════════════════════════════════════════════════════════════════════
    // Tamper Tests
    // ════════════════════════════════════════════════════════════════════════════

    #[test]
    fn tampered_signature_is_rejected() {
        let svc = service();
        let token = svc.issue_access_token(&claims()).unwrap();

        assert_eq!(
            svc.verify_access_token(&tamper(&token, 2)),
            Err(TokenError::InvalidCredential)
        );
    }

    #[test]
    fn tampered_claims_are_rejected() {
        let svc = service();
        let token = svc.issue_access_token(&claims()).unwrap();

        assert_eq!(
            svc.verify_access_token(&tamper(&token, 1)),
            Err(TokenError::InvalidCredential)
        );
    }

    #[test]
    fn token_signed_with_unknown_secret_is_rejected() {
        let forger = JwtTokenService::new(b"attacker-secret", b"attacker-refresh");
        let token = forger
            .issue_access_token(&PrincipalClaims::new("user-42", "admin"))
            .unwrap();

        assert_eq!(service().verify_access_token(&token), Err(TokenError::InvalidCredential));
    }

    #[test]
    fn garbage_is_rejected() {
        let svc = service();
        assert_eq!(svc.verify_access_token(""), Err(TokenError::InvalidCredential));
        assert_eq!(svc.verify_access_token("not.a.jwt"), Err(TokenError::InvalidCredential));
        assert_eq!(
            svc.verify_refresh_token("a.b"),
            Err(TokenError::InvalidRefreshCredential)
        );
    }

    #[test]
    fn other_algorithm_is_rejected() {
        let credential = CredentialClaims {
            principal: claims(),
            iss: DEFAULT_ISSUER.into(),
            aud: DEFAULT_AUDIENCE.into(),
            iat: chrono::Utc::now().timestamp(),
            exp: chrono::Utc::now().timestamp() + 600,
            token_use: CredentialKind::Access,
        };
        let token = encode(
            &Header::new(Algorithm::HS512),
            &credential,
            &EncodingKey::from_secret(ACCESS_SECRET),
        )
        .unwrap();

        assert_eq!(service().verify_access_token(&token), Err(TokenError::InvalidCredential));
    }

    // ════════════════════════════════════════════════════════════════════════════
    // Issuer / Audience Tests
    // ════════════════════════════════════════════════════════════════════════════

    #[test]
    fn wrong_issuer_is_rejected() {
        let other = service().with_issuer("someone-else");
        let token = other.issue_access_token(&claims()).unwrap();

        assert_eq!(service().verify_access_token(&token), Err(TokenError::InvalidCredential));
    }

    #[test]
    fn wrong_audience_is_rejected() {
        let other = service().with_audience("larnik-admins");
        let token = other.issue_access_token(&claims()).unwrap();

        assert_eq!(service().verify_access_token(&token), Err(TokenError::InvalidCredential));
    }

    // ════════════════════════════════════════════════════════════════════════════
    // Configuration and Concurrency Tests
    // ════════════════════════════════════════════════════════════════════════════

    #[test]
    fn from_config_applies_ttls_and_constants() {
        let config = AuthConfig {
            access_ttl: "15m".to_string(),
            issuer: "larnik-staging".to_string(),
            ..AuthConfig::new("access-secret", "refresh-secret")
        };

        let svc = JwtTokenService::from_config(&config).unwrap();

        assert_eq!(svc.access_ttl_secs(), 900);
        assert_eq!(svc.issuer, "larnik-staging");
        assert_eq!(svc.audience, "larnik-users");
        assert_eq!(svc.refresh.ttl, Duration::from_secs(7 * 86_400));
    }

    #[test]
    fn from_config_rejects_bad_ttl() {
        let config = AuthConfig {
            refresh_ttl: "forever".to_string(),
            ..AuthConfig::new("a", "r")
        };

        assert!(JwtTokenService::from_config(&config).is_err());
    }

    #[test]
    fn token_pair_reports_access_lifetime() {
        let pair = service().issue_token_pair(&claims()).unwrap();

        assert_eq!(pair.expires_in, 86_400);
        assert_eq!(pair.token_type, "Bearer");
        assert_ne!(pair.access_token, pair.refresh_token);
    }

    #[test]
    fn concurrent_verification_is_consistent() {
        let svc = Arc::new(service());
        let token = svc.issue_access_token(&claims()).unwrap();

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let svc = Arc::clone(&svc);
                let token = token.clone();
                std::thread::spawn(move || svc.verify_access_token(&token))
            })
            .collect();

        for handle in handles {
            assert_eq!(handle.join().unwrap(), Ok(claims()));
        }
    }

    #[test]
    fn debug_does_not_print_key_material() {
        let printed = format!("{:?}", service());
        assert!(printed.contains("larnik-lms"));
        assert!(!printed.contains("access-secret-for-tests"));
    }

    #[test]
    fn jwt_token_service_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<JwtTokenService>();
    }
}
