//! Authentication adapters.
//!
//! Implementations of the `TokenService` port:
//!
//! - `jwt` - HS256 signed access and refresh credentials

mod jwt;

pub use jwt::JwtTokenService;
