//! Authentication infrastructure module
//!
//! This module provides JWT session tokens and the service that registers
//! accounts, logs them in and resolves request identities.

mod jwt;
mod service;

pub use jwt::{IssuedToken, JwtClaims, JwtConfig, JwtService, TokenError, TokenService};
pub use service::{AuthService, LoginRequest, RegisterRequest};
