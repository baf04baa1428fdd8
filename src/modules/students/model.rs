//! Student data models and DTOs.
//!
//! Re-exports the student models from the `parent-portal-models` crate.

pub use parent_portal_models::students::*;
