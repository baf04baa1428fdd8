//! # Parent Portal Core
//!
//! Core types, errors, and utilities for the Parent Portal API.
//!
//! This crate provides foundational types used throughout the application:
//!
//! - [`errors`]: Application error type with HTTP response conversion
//! - [`password`]: Password hashing and verification
//! - [`roles`]: The closed set of user roles
//! - [`permissions`]: The role × resource × action permission table
//!
//! # Example
//!
//! ```ignore
//! use parent_portal_core::errors::AppError;
//! use parent_portal_core::password::{hash_password, verify_password};
//! use parent_portal_core::permissions::{Action, Resource, is_allowed};
//! use parent_portal_core::Role;
//!
//! let error = AppError::not_found(anyhow::anyhow!("Student not found"));
//! let hash = hash_password("secret1")?;
//! assert!(is_allowed(Role::Teacher, Resource::Homework, Action::Create));
//! ```

pub mod errors;
pub mod password;
pub mod permissions;
pub mod roles;

// Re-export commonly used types at crate root
pub use errors::AppError;
pub use password::{hash_password, verify_password};
pub use permissions::{Action, Resource, Scope};
pub use roles::Role;
