//! Principal claims carried inside a signed credential.
//!
//! Claims are immutable once issued and are never stored server-side. The
//! token service adds registered fields (issuer, audience, timestamps) around
//! them; those names are reserved and cannot be supplied as custom claims.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Claim names owned by the token service.
pub const RESERVED_CLAIMS: &[&str] = &["iss", "aud", "exp", "iat", "nbf", "jti", "sub", "role", "token_use"];

/// Identity and authorization attributes of an authenticated principal.
///
/// `sub` and `role` are always present. Any other attributes live in the
/// custom map and are flattened to the top level of the encoded claims.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PrincipalClaims {
    /// Subject identifier (user id).
    pub sub: String,

    /// Role of the principal (e.g. "student", "instructor", "admin").
    pub role: String,

    #[serde(flatten)]
    custom: Map<String, Value>,
}

impl PrincipalClaims {
    /// Creates claims for a subject with the given role.
    pub fn new(sub: impl Into<String>, role: impl Into<String>) -> Self {
        Self {
            sub: sub.into(),
            role: role.into(),
            custom: Map::new(),
        }
    }

    /// Adds a custom claim.
    ///
    /// Reserved names are dropped with a warning; the registered fields are
    /// always set by the token service itself.
    pub fn with_claim(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        let name = name.into();
        if is_reserved(&name) {
            tracing::warn!(claim = %name, "Ignoring reserved claim name");
            return self;
        }
        self.custom.insert(name, value.into());
        self
    }

    /// Returns a custom claim by name.
    pub fn claim(&self, name: &str) -> Option<&Value> {
        self.custom.get(name)
    }

    /// Returns all custom claims.
    pub fn custom_claims(&self) -> &Map<String, Value> {
        &self.custom
    }

    /// Returns true if the principal holds the given role.
    pub fn has_role(&self, role: &str) -> bool {
        self.role == role
    }
}

fn is_reserved(name: &str) -> bool {
    RESERVED_CLAIMS.contains(&name)
}
