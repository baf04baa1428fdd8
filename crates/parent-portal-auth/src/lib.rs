//! # Parent Portal Auth
//!
//! Token claims and JWT utilities for the Parent Portal API.
//!
//! - [`claims`]: the claim set carried by every access token
//! - [`jwt`]: token creation and verification
//!
//! Tokens are HS256-signed, carry the user's id, role, name and email, and
//! expire after `JwtConfig::access_token_expiry` seconds. There is no refresh
//! token; clients log in again when a token expires.
//!
//! # Example
//!
//! ```ignore
//! use parent_portal_auth::{create_access_token, verify_token};
//! use parent_portal_config::JwtConfig;
//! use parent_portal_core::Role;
//!
//! let config = JwtConfig::from_env();
//! let token = create_access_token(user_id, Role::Parent, "Jane Doe", "jane@x.com", &config)?;
//! let claims = verify_token(&token, &config)?;
//! assert_eq!(claims.role, Role::Parent);
//! ```

pub mod claims;
pub mod jwt;

// Re-export commonly used types at crate root
pub use claims::Claims;
pub use jwt::{create_access_token, verify_token};
