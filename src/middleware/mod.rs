//! Middleware modules for request processing.
//!
//! # Modules
//!
//! - [`auth`]: Token verification and the [`auth::AuthUser`] extractor
//! - [`role`]: Role gates derived from the permission table
//!
//! # Request lifecycle
//!
//! 1. Client sends request with `Authorization: Bearer <token>` header
//! 2. [`auth::authenticate`] verifies the token and stores the claims in the
//!    request extensions (401 otherwise)
//! 3. A role gate such as [`role::can_create_homework`] checks the permission
//!    table (403 otherwise)
//! 4. The handler runs, using `AuthUser` for ownership checks
//!
//! # Example
//!
//! ```ignore
//! use axum::{Router, middleware, routing::{get, post}};
//! use crate::middleware::role::can_create_homework;
//!
//! Router::new().route(
//!     "/",
//!     get(get_homework).merge(
//!         post(create_homework).route_layer(middleware::from_fn(can_create_homework)),
//!     ),
//! );
//! ```

pub mod auth;
pub mod role;
