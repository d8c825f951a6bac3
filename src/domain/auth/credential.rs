//! Credential classes and the token pair handed to a client at login.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The two credential classes issued by the token service.
///
/// Each class has its own signing secret and lifetime. The class is also
/// embedded in the credential as `token_use`, so a refresh credential can
/// never be replayed as an access credential even if both secrets leak.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CredentialKind {
    /// Short-lived credential presented on every protected request.
    Access,
    /// Longer-lived credential exchanged for a new access credential.
    Refresh,
}

impl CredentialKind {
    /// Returns the wire value used for the `token_use` claim.
    pub fn as_str(&self) -> &'static str {
        match self {
            CredentialKind::Access => "access",
            CredentialKind::Refresh => "refresh",
        }
    }
}

impl fmt::Display for CredentialKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Access and refresh credentials issued together.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenPair {
    /// Signed access credential.
    pub access_token: String,

    /// Signed refresh credential.
    pub refresh_token: String,

    /// Always "Bearer".
    pub token_type: String,

    /// Access credential lifetime in seconds.
    pub expires_in: i64,
}

impl TokenPair {
    pub fn new(access_token: String, refresh_token: String, expires_in: i64) -> Self {
        Self {
            access_token,
            refresh_token,
            token_type: "Bearer".to_string(),
            expires_in,
        }
    }
}
