//! Authentication handlers.
//!
//! ## Commands
//! - Refreshing a session with a refresh credential
//!
//! ## Queries
//! - Authenticating a request from its `Authorization` header

mod authenticate_request;
mod refresh_session;

pub use authenticate_request::{AuthenticateRequestCommand, AuthenticateRequestHandler};
pub use refresh_session::{RefreshSessionCommand, RefreshSessionHandler};
