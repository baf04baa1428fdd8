//! Homework domain models and DTOs.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

/// A homework assignment for one class section. Immutable once created.
#[derive(Serialize, Deserialize, FromRow, Debug, Clone, PartialEq, Eq, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Homework {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    #[serde(rename = "class")]
    pub class_name: String,
    pub section: String,
    pub subject: String,
    pub due_date: NaiveDate,
    pub uploaded_by: Uuid,
    /// Display name of the uploader, joined from `users`
    pub uploader_name: Option<String>,
    pub attachment_url: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Deserialize, Serialize, Debug, Clone, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateHomeworkDto {
    #[validate(length(min = 1, max = 255, message = "Title is required"))]
    #[schema(example = "Math Assignment")]
    pub title: String,
    #[validate(length(min = 1, message = "Description is required"))]
    pub description: String,
    #[serde(rename = "class")]
    #[validate(length(min = 1, max = 50, message = "Class is required"))]
    #[schema(example = "10")]
    pub class_name: String,
    #[validate(length(min = 1, max = 50, message = "Section is required"))]
    #[schema(example = "A")]
    pub section: String,
    #[validate(length(min = 1, max = 100, message = "Subject is required"))]
    #[schema(example = "Mathematics")]
    pub subject: String,
    #[schema(example = "2025-01-15")]
    pub due_date: NaiveDate,
    #[validate(url(message = "Attachment URL must be a valid URL"))]
    pub attachment_url: Option<String>,
}

/// `GET /api/homework` requires both filters; they are optional here so the
/// handler can answer with a specific message when one is missing.
#[derive(Deserialize, Serialize, Debug, Clone, Default, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct HomeworkQuery {
    #[serde(rename = "class")]
    pub class_name: Option<String>,
    pub section: Option<String>,
}

impl HomeworkQuery {
    /// Both filters, trimmed, when both are present and non-empty.
    pub fn class_and_section(&self) -> Option<(&str, &str)> {
        let class_name = self.class_name.as_deref().map(str::trim)?;
        let section = self.section.as_deref().map(str::trim)?;
        if class_name.is_empty() || section.is_empty() {
            return None;
        }
        Some((class_name, section))
    }
}
