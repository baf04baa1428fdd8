//! User data models and DTOs.
//!
//! Re-exports the user models from the `parent-portal-models` crate.

pub use parent_portal_models::users::*;
