//! Authentication data models and DTOs.
//!
//! Re-exports the auth models from the `parent-portal-models` crate and the
//! token claims from `parent-portal-auth`.

pub use parent_portal_auth::Claims;
pub use parent_portal_models::auth::*;
