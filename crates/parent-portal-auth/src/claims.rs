//! JWT claim structure for access tokens.

use parent_portal_core::{AppError, Role};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// JWT claims for access tokens.
///
/// Carries everything the access policy needs so that authorization never
/// requires a database lookup.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Claims {
    /// User ID (subject claim)
    pub sub: String,
    pub role: Role,
    /// Display name at the time the token was issued
    pub name: String,
    pub email: String,
    /// Token expiration timestamp (Unix timestamp)
    pub exp: usize,
    /// Token issued-at timestamp (Unix timestamp)
    pub iat: usize,
}

impl Claims {
    pub fn user_id(&self) -> Result<Uuid, AppError> {
        Uuid::parse_str(&self.sub)
            .map_err(|_| AppError::unauthorized("Invalid or expired token"))
    }
}
