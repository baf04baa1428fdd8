//! # Parent Portal CLI
//!
//! Account management and database seeding utilities for Parent Portal
//! development.
//!
//! This library crate provides the seeding functionality used by the CLI binary.
//!
//! ## Usage
//!
//! ```ignore
//! use parent_portal_cli::seeder::{seed_all, SeedConfig};
//!
//! let config = SeedConfig::new(20); // demo accounts plus 20 fake families
//! seed_all(&pool, config).await?;
//! ```

pub mod accounts;
pub mod seeder;
