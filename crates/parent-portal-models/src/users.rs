//! User domain models and DTOs.
//!
//! The password hash lives only in the `users` table; none of the types in
//! this module carry it, so it can never be serialized into a response.

use chrono::{DateTime, Utc};
use parent_portal_core::Role;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::{Validate, ValidationError};

/// A user of the portal.
#[derive(Serialize, Deserialize, FromRow, Debug, Clone, PartialEq, Eq, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub role: Role,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A messageable user, as listed by `GET /api/users/available`.
#[derive(Serialize, Deserialize, FromRow, Debug, Clone, PartialEq, Eq, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserSummary {
    pub id: Uuid,
    pub name: String,
    pub role: Role,
}

/// Phone numbers are exactly ten digits.
pub fn validate_phone(phone: &str) -> Result<(), ValidationError> {
    if phone.len() == 10 && phone.chars().all(|c| c.is_ascii_digit()) {
        Ok(())
    } else {
        Err(ValidationError::new("phone")
            .with_message("Phone number must be 10 digits".into()))
    }
}

#[derive(Deserialize, Serialize, Debug, Clone, Default, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProfileDto {
    #[validate(length(min = 1, message = "Name cannot be empty"))]
    pub name: Option<String>,
    #[validate(email(message = "Invalid email format"))]
    pub email: Option<String>,
    #[validate(custom(function = "validate_phone"))]
    pub phone: Option<String>,
}

impl UpdateProfileDto {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.email.is_none() && self.phone.is_none()
    }
}

#[derive(Deserialize, Serialize, Debug, Clone, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ChangePasswordDto {
    #[serde(default)]
    #[validate(length(min = 1, message = "Current password and new password are required"))]
    pub current_password: String,
    #[serde(default)]
    #[validate(length(min = 6, message = "Password must be at least 6 characters long"))]
    #[schema(example = "newsecret")]
    pub new_password: String,
}
