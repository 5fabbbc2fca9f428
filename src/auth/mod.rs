//! Bearer-token identity.
//!
//! Tokens are minted by the upstream auth service; this gateway only
//! verifies signatures and reads the claims checkout needs. There is no
//! registration or login surface here.

pub mod middleware;
pub mod service;

pub use middleware::jwt_auth_middleware;
pub use service::{AuthService, Claims};
