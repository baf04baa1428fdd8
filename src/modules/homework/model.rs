//! Homework data models and DTOs.
//!
//! Re-exports the homework models from the `parent-portal-models` crate.

pub use parent_portal_models::homework::*;
