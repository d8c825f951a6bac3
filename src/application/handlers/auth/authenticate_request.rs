//! AuthenticateRequestHandler - Resolves the principal behind a bearer credential.

use std::sync::Arc;

use crate::domain::auth::{PrincipalClaims, TokenError};
use crate::ports::TokenService;

/// Command to authenticate an incoming request.
#[derive(Debug, Clone)]
pub struct AuthenticateRequestCommand {
    /// Raw `Authorization` header value, if the request carried one.
    pub authorization: Option<String>,
}

impl AuthenticateRequestCommand {
    pub fn from_header(value: impl Into<String>) -> Self {
        Self {
            authorization: Some(value.into()),
        }
    }
}

/// Handler for authenticating requests with an access credential.
///
/// Only the `Bearer` scheme is accepted. A missing header, another scheme,
/// and a rejected credential all produce the same `InvalidCredential`.
pub struct AuthenticateRequestHandler {
    token_service: Arc<dyn TokenService>,
}

impl AuthenticateRequestHandler {
    pub fn new(token_service: Arc<dyn TokenService>) -> Self {
        Self { token_service }
    }

    pub fn handle(&self, cmd: AuthenticateRequestCommand) -> Result<PrincipalClaims, TokenError> {
        let header = cmd.authorization.as_deref().ok_or_else(|| {
            tracing::debug!("Request has no Authorization header");
            TokenError::InvalidCredential
        })?;

        let token = bearer_token(header).ok_or_else(|| {
            tracing::warn!("Authorization header is not a bearer credential");
            TokenError::InvalidCredential
        })?;

        self.token_service.verify_access_token(token)
    }
}

/// Extracts the credential from `Bearer <token>`; the scheme is case-insensitive.
fn bearer_token(header: &str) -> Option<&str> {
    let (scheme, token) = header.trim().split_once(' ')?;
    if !scheme.eq_ignore_ascii_case("bearer") {
        return None;
    }
    let token = token.trim();
    (!token.is_empty()).then_some(token)
}
