//! Role gates for route layers.
//!
//! Each gate reads the [`AuthUser`] stored by
//! [`authenticate`](crate::middleware::auth::authenticate) and checks the
//! caller's role against the whitelist derived from the permission table.

use axum::{extract::Request, middleware::Next, response::Response};
use parent_portal_core::permissions::{Action, Resource, allowed_roles};
use parent_portal_core::{AppError, Role};

use crate::middleware::auth::{AUTHENTICATION_REQUIRED, AuthUser};

pub const ACCESS_DENIED: &str = "Access denied. You do not have the required permission.";

/// Runs `next` only if the authenticated caller has one of `allowed` roles.
pub async fn require_roles(
    allowed: &[Role],
    req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let role = req
        .extensions()
        .get::<AuthUser>()
        .map(AuthUser::role)
        .ok_or_else(|| AppError::unauthorized(AUTHENTICATION_REQUIRED))?;

    if !allowed.contains(&role) {
        tracing::debug!(role = %role, ?allowed, "Role gate rejected request");
        return Err(AppError::forbidden(ACCESS_DENIED));
    }

    Ok(next.run(req).await)
}

pub async fn require_permission(
    resource: Resource,
    action: Action,
    req: Request,
    next: Next,
) -> Result<Response, AppError> {
    require_roles(&allowed_roles(resource, action), req, next).await
}

pub async fn can_create_students(req: Request, next: Next) -> Result<Response, AppError> {
    require_permission(Resource::Students, Action::Create, req, next).await
}

pub async fn can_update_attendance(req: Request, next: Next) -> Result<Response, AppError> {
    require_permission(Resource::Students, Action::Update, req, next).await
}

pub async fn can_create_homework(req: Request, next: Next) -> Result<Response, AppError> {
    require_permission(Resource::Homework, Action::Create, req, next).await
}
