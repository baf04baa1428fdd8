use axum::{Json, extract::State};
use parent_portal_core::AppError;
use parent_portal_core::permissions::{Action, Resource};
use tracing::instrument;
use uuid::Uuid;

use super::model::{ChangePasswordDto, UpdateProfileDto, User, UserSummary};
use super::service::UserService;
use crate::middleware::auth::AuthUser;
use crate::modules::auth::controller::ErrorResponse;
use crate::modules::auth::model::MessageResponse;
use crate::state::AppState;
use crate::validator::{ValidatedJson, ValidatedPath};

const UNAUTHORIZED_UPDATE: &str = "Unauthorized";

/// List users the caller can message
#[utoipa::path(
    get,
    path = "/api/users/available",
    responses(
        (status = 200, description = "Every user except the caller", body = Vec<UserSummary>),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Users"
)]
#[instrument(skip(state))]
pub async fn get_available_users(
    State(state): State<AppState>,
    auth_user: AuthUser,
) -> Result<Json<Vec<UserSummary>>, AppError> {
    let users = UserService::list_available(&state.db, auth_user.user_id()?).await?;
    Ok(Json(users))
}

/// Get a user's public profile
#[utoipa::path(
    get,
    path = "/api/users/{id}",
    params(("id" = Uuid, Path, description = "User ID")),
    responses(
        (status = 200, description = "User profile", body = User),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 404, description = "User not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Users"
)]
#[instrument(skip(state))]
pub async fn get_user(
    State(state): State<AppState>,
    _auth_user: AuthUser,
    ValidatedPath(id): ValidatedPath<Uuid>,
) -> Result<Json<User>, AppError> {
    let user = UserService::get_by_id(&state.db, id).await?;
    Ok(Json(user))
}

/// Update the caller's own profile
#[utoipa::path(
    put,
    path = "/api/users/profile",
    request_body = UpdateProfileDto,
    responses(
        (status = 200, description = "Profile updated", body = User),
        (status = 400, description = "Validation error, empty update or email already in use", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Users"
)]
#[instrument(skip(state))]
pub async fn update_own_profile(
    State(state): State<AppState>,
    auth_user: AuthUser,
    ValidatedJson(dto): ValidatedJson<UpdateProfileDto>,
) -> Result<Json<User>, AppError> {
    let user = UserService::update_profile(&state.db, auth_user.user_id()?, dto).await?;
    Ok(Json(user))
}

/// Update a user's profile (self, or any user for admins)
#[utoipa::path(
    put,
    path = "/api/users/{id}",
    params(("id" = Uuid, Path, description = "User ID")),
    request_body = UpdateProfileDto,
    responses(
        (status = 200, description = "Profile updated", body = User),
        (status = 400, description = "Validation error, empty update or email already in use", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Not your profile", body = ErrorResponse),
        (status = 404, description = "User not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Users"
)]
#[instrument(skip(state))]
pub async fn update_user_profile(
    State(state): State<AppState>,
    auth_user: AuthUser,
    ValidatedPath(id): ValidatedPath<Uuid>,
    ValidatedJson(dto): ValidatedJson<UpdateProfileDto>,
) -> Result<Json<User>, AppError> {
    auth_user.ensure_can_act_on(Resource::Users, Action::Update, id, UNAUTHORIZED_UPDATE)?;

    let user = UserService::update_profile(&state.db, id, dto).await?;
    Ok(Json(user))
}

/// Change the caller's own password
#[utoipa::path(
    put,
    path = "/api/users/password",
    request_body = ChangePasswordDto,
    responses(
        (status = 200, description = "Password updated", body = MessageResponse),
        (status = 400, description = "Current password is incorrect or new password too short", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Users"
)]
#[instrument(skip(state, dto))]
pub async fn update_own_password(
    State(state): State<AppState>,
    auth_user: AuthUser,
    ValidatedJson(dto): ValidatedJson<ChangePasswordDto>,
) -> Result<Json<MessageResponse>, AppError> {
    UserService::update_password(&state.db, auth_user.user_id()?, dto).await?;
    Ok(Json(MessageResponse::new("Password updated successfully")))
}

/// Change a user's password (self, or any user for admins)
#[utoipa::path(
    put,
    path = "/api/users/{id}/password",
    params(("id" = Uuid, Path, description = "User ID")),
    request_body = ChangePasswordDto,
    responses(
        (status = 200, description = "Password updated", body = MessageResponse),
        (status = 400, description = "Current password is incorrect or new password too short", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Not your account", body = ErrorResponse),
        (status = 404, description = "User not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Users"
)]
#[instrument(skip(state, dto))]
pub async fn update_user_password(
    State(state): State<AppState>,
    auth_user: AuthUser,
    ValidatedPath(id): ValidatedPath<Uuid>,
    ValidatedJson(dto): ValidatedJson<ChangePasswordDto>,
) -> Result<Json<MessageResponse>, AppError> {
    auth_user.ensure_can_act_on(Resource::Users, Action::Update, id, UNAUTHORIZED_UPDATE)?;

    UserService::update_password(&state.db, id, dto).await?;
    Ok(Json(MessageResponse::new("Password updated successfully")))
}
