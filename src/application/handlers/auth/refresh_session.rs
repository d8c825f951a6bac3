//! RefreshSessionHandler - Exchanges a refresh credential for a new token pair.

use std::sync::Arc;

use crate::domain::auth::{TokenError, TokenPair};
use crate::ports::TokenService;

/// Command to refresh a session.
#[derive(Debug, Clone)]
pub struct RefreshSessionCommand {
    /// Refresh credential presented by the client.
    pub refresh_token: String,
}

/// Handler for refreshing sessions.
///
/// The new pair carries exactly the claims of the presented refresh
/// credential. Refresh credentials stay valid until they expire; nothing is
/// revoked on use.
pub struct RefreshSessionHandler {
    token_service: Arc<dyn TokenService>,
}

impl RefreshSessionHandler {
    pub fn new(token_service: Arc<dyn TokenService>) -> Self {
        Self { token_service }
    }

    pub fn handle(&self, cmd: RefreshSessionCommand) -> Result<TokenPair, TokenError> {
        let claims = self.token_service.verify_refresh_token(&cmd.refresh_token)?;

        let pair = self.token_service.issue_token_pair(&claims)?;
        tracing::info!(sub = %claims.sub, "Session refreshed");
        Ok(pair)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::JwtTokenService;
    use crate::domain::auth::PrincipalClaims;

    fn service() -> Arc<JwtTokenService> {
        Arc::new(JwtTokenService::new(b"access-secret", b"refresh-secret"))
    }

    #[test]
    fn refresh_issues_pair_with_same_claims() {
        let service = service();
        let handler = RefreshSessionHandler::new(service.clone());
        let claims = PrincipalClaims::new("user-9", "student").with_claim("tenant", "north");
        let refresh = service.issue_refresh_token(&claims).unwrap();

        let pair = handler
            .handle(RefreshSessionCommand {
                refresh_token: refresh,
            })
            .unwrap();

        assert_eq!(service.verify_access_token(&pair.access_token).unwrap(), claims);
        assert_eq!(service.verify_refresh_token(&pair.refresh_token).unwrap(), claims);
        assert_eq!(pair.token_type, "Bearer");
    }

    #[test]
    fn access_token_cannot_refresh() {
        let service = service();
        let handler = RefreshSessionHandler::new(service.clone());
        let access = service
            .issue_access_token(&PrincipalClaims::new("user-9", "student"))
            .unwrap();

        let result = handler.handle(RefreshSessionCommand {
            refresh_token: access,
        });

        assert_eq!(result, Err(TokenError::InvalidRefreshCredential));
        assert!(result.unwrap_err().requires_reauthentication());
    }

    #[test]
    fn garbage_cannot_refresh() {
        let handler = RefreshSessionHandler::new(service());

        let result = handler.handle(RefreshSessionCommand {
            refresh_token: "garbage".to_string(),
        });

        assert_eq!(result, Err(TokenError::InvalidRefreshCredential));
    }
}
