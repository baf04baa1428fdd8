//! Message domain models and DTOs.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

pub const MAX_MESSAGE_LENGTH: u64 = 5000;

/// A direct message, with both parties' display names joined in.
#[derive(Serialize, Deserialize, FromRow, Debug, Clone, PartialEq, Eq, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    pub id: Uuid,
    pub sender_id: Uuid,
    pub sender_name: String,
    pub receiver_id: Uuid,
    pub receiver_name: String,
    pub content: String,
    pub is_read: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Deserialize, Serialize, Debug, Clone, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SendMessageDto {
    pub receiver_id: Uuid,
    #[serde(default)]
    #[validate(length(
        min = 1,
        max = 5000,
        message = "Message content must be between 1 and 5000 characters"
    ))]
    #[schema(example = "Hello, how is Alex doing in class?")]
    pub content: String,
}
