//! Authentication DTOs.
//!
//! Request fields default to empty strings so that a missing field is reported
//! with the same message as an empty one.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::users::{User, validate_phone};

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct LoginRequest {
    #[serde(default)]
    #[validate(
        length(min = 1, message = "Email and password are required"),
        email(message = "Invalid email format")
    )]
    #[schema(example = "parent@example.com")]
    pub email: String,
    #[serde(default)]
    #[validate(length(min = 1, message = "Email and password are required"))]
    #[schema(example = "password")]
    pub password: String,
}

/// Self-service registration. Registered accounts always get the parent role.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct RegisterRequest {
    #[serde(default)]
    #[validate(length(min = 1, message = "All fields are required"))]
    #[schema(example = "Jane Doe")]
    pub name: String,
    #[serde(default)]
    #[validate(
        length(min = 1, message = "All fields are required"),
        email(message = "Invalid email format")
    )]
    #[schema(example = "jane@x.com")]
    pub email: String,
    #[serde(default)]
    #[validate(length(min = 6, message = "Password must be at least 6 characters long"))]
    #[schema(example = "secret1")]
    pub password: String,
    #[serde(default)]
    #[validate(custom(function = "validate_phone"))]
    #[schema(example = "5551234567")]
    pub phone: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AuthResponse {
    pub token: String,
    pub user: User,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
