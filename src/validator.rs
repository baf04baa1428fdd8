//! Request extractors that answer malformed input with `400 {"error": ...}`.

use anyhow::anyhow;
use axum::{
    Json,
    extract::{FromRequest, FromRequestParts, Path, Query, Request, rejection::JsonRejection},
    http::request::Parts,
};
use parent_portal_core::AppError;
use serde::de::DeserializeOwned;
use validator::{Validate, ValidationErrors, ValidationErrorsKind};

/// Joins every validation message, ordered by field name, without repeats.
/// Messages from nested structs and lists are included.
pub fn format_errors(errors: &ValidationErrors) -> String {
    let mut messages: Vec<String> = Vec::new();
    collect_messages(errors, &mut messages);

    if messages.is_empty() {
        return "Invalid request body".to_string();
    }
    messages.join(", ")
}

fn collect_messages(errors: &ValidationErrors, messages: &mut Vec<String>) {
    let mut fields: Vec<_> = errors.errors().iter().collect();
    fields.sort_by(|(a, _), (b, _)| a.cmp(b));

    for (field, kind) in fields {
        match kind {
            ValidationErrorsKind::Field(errors) => {
                for error in errors {
                    let msg = error
                        .message
                        .as_ref()
                        .map(|msg| msg.to_string())
                        .unwrap_or_else(|| format!("{} is invalid", field));
                    if !messages.contains(&msg) {
                        messages.push(msg);
                    }
                }
            }
            ValidationErrorsKind::Struct(nested) => collect_messages(nested, messages),
            ValidationErrorsKind::List(items) => {
                for nested in items.values() {
                    collect_messages(nested, messages);
                }
            }
        }
    }
}

fn json_rejection_to_error(rejection: JsonRejection) -> AppError {
    let error_msg = rejection.body_text();

    if error_msg.contains("missing field") {
        let field = error_msg
            .split("missing field `")
            .nth(1)
            .and_then(|s| s.split('`').next())
            .unwrap_or("unknown");
        return AppError::bad_request(anyhow!("{} is required", field));
    }

    if error_msg.contains("invalid type") || error_msg.contains("invalid value") {
        return AppError::bad_request(anyhow!("Invalid field type in request"));
    }

    if matches!(rejection, JsonRejection::MissingJsonContentType(_)) {
        return AppError::bad_request(anyhow!("Missing 'Content-Type: application/json' header"));
    }

    AppError::bad_request(anyhow!("Invalid request body"))
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ValidatedJson<T>(pub T);

impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(json_rejection_to_error)?;

        value
            .validate()
            .map_err(|errors| AppError::bad_request(anyhow!("{}", format_errors(&errors))))?;

        Ok(ValidatedJson(value))
    }
}

/// `Path` with a JSON 400 for unparsable segments (e.g. a malformed UUID).
#[derive(Debug, Clone, Copy, Default)]
pub struct ValidatedPath<T>(pub T);

impl<T, S> FromRequestParts<S> for ValidatedPath<T>
where
    T: DeserializeOwned + Send,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(value) = Path::<T>::from_request_parts(parts, state)
            .await
            .map_err(|_| AppError::bad_request(anyhow!("Invalid ID in request path")))?;
        Ok(ValidatedPath(value))
    }
}

/// `Query` with a JSON 400 for unparsable parameters.
#[derive(Debug, Clone, Copy, Default)]
pub struct ValidatedQuery<T>(pub T);

impl<T, S> FromRequestParts<S> for ValidatedQuery<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(value) = Query::<T>::from_request_parts(parts, state)
            .await
            .map_err(|_| AppError::bad_request(anyhow!("Invalid query parameters")))?;
        Ok(ValidatedQuery(value))
    }
}
