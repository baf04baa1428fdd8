use axum::{Json, extract::State, http::StatusCode};
use parent_portal_core::AppError;
use tracing::instrument;
use uuid::Uuid;

use super::model::{ConversationSummary, Message, SendMessageDto};
use super::service::MessageService;
use crate::middleware::auth::AuthUser;
use crate::modules::auth::controller::ErrorResponse;
use crate::state::AppState;
use crate::validator::{ValidatedJson, ValidatedPath};

/// List the caller's messages, newest first
#[utoipa::path(
    get,
    path = "/api/messages",
    responses(
        (status = 200, description = "Messages sent or received by the caller", body = Vec<Message>),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Messages"
)]
#[instrument(skip(state))]
pub async fn get_messages(
    State(state): State<AppState>,
    auth_user: AuthUser,
) -> Result<Json<Vec<Message>>, AppError> {
    let messages = MessageService::list_for_user(&state.db, auth_user.user_id()?).await?;
    Ok(Json(messages))
}

/// Mailbox: one summary per counterpart
#[utoipa::path(
    get,
    path = "/api/messages/conversations",
    responses(
        (status = 200, description = "Conversations, newest first", body = Vec<ConversationSummary>),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Messages"
)]
#[instrument(skip(state))]
pub async fn get_conversations(
    State(state): State<AppState>,
    auth_user: AuthUser,
) -> Result<Json<Vec<ConversationSummary>>, AppError> {
    let summaries = MessageService::list_conversations(&state.db, auth_user.user_id()?).await?;
    Ok(Json(summaries))
}

/// Conversation with another user, oldest first
#[utoipa::path(
    get,
    path = "/api/messages/conversation/{other_user_id}",
    params(("other_user_id" = Uuid, Path, description = "The other participant")),
    responses(
        (status = 200, description = "Messages between the two users", body = Vec<Message>),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Messages"
)]
#[instrument(skip(state))]
pub async fn get_conversation(
    State(state): State<AppState>,
    auth_user: AuthUser,
    ValidatedPath(other_user_id): ValidatedPath<Uuid>,
) -> Result<Json<Vec<Message>>, AppError> {
    let messages =
        MessageService::list_conversation(&state.db, auth_user.user_id()?, other_user_id).await?;
    Ok(Json(messages))
}

/// Send a message
#[utoipa::path(
    post,
    path = "/api/messages",
    request_body = SendMessageDto,
    responses(
        (status = 201, description = "Message sent", body = Message),
        (status = 400, description = "Missing content or self-addressed message", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 404, description = "Receiver not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Messages"
)]
#[instrument(skip(state, dto))]
pub async fn send_message(
    State(state): State<AppState>,
    auth_user: AuthUser,
    ValidatedJson(dto): ValidatedJson<SendMessageDto>,
) -> Result<(StatusCode, Json<Message>), AppError> {
    let message = MessageService::send(&state.db, auth_user.user_id()?, dto).await?;
    Ok((StatusCode::CREATED, Json(message)))
}

/// Mark a message as read (receiver only)
#[utoipa::path(
    put,
    path = "/api/messages/{message_id}/read",
    params(("message_id" = Uuid, Path, description = "Message ID")),
    responses(
        (status = 200, description = "Message marked as read", body = Message),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Caller is not the receiver", body = ErrorResponse),
        (status = 404, description = "Message not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Messages"
)]
#[instrument(skip(state))]
pub async fn mark_message_read(
    State(state): State<AppState>,
    auth_user: AuthUser,
    ValidatedPath(message_id): ValidatedPath<Uuid>,
) -> Result<Json<Message>, AppError> {
    let message = MessageService::mark_read(
        &state.db,
        message_id,
        auth_user.user_id()?,
        auth_user.role(),
    )
    .await?;
    Ok(Json(message))
}
