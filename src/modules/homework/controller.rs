use axum::{Json, extract::State, http::StatusCode};
use parent_portal_core::AppError;
use tracing::instrument;

use super::model::{CreateHomeworkDto, Homework, HomeworkQuery};
use super::service::HomeworkService;
use crate::middleware::auth::AuthUser;
use crate::modules::auth::controller::ErrorResponse;
use crate::state::AppState;
use crate::validator::{ValidatedJson, ValidatedQuery};

/// List homework for a class section
#[utoipa::path(
    get,
    path = "/api/homework",
    params(HomeworkQuery),
    responses(
        (status = 200, description = "Homework, newest first", body = Vec<Homework>),
        (status = 400, description = "Class and section are required", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Homework"
)]
#[instrument(skip(state))]
pub async fn get_homework(
    State(state): State<AppState>,
    ValidatedQuery(query): ValidatedQuery<HomeworkQuery>,
) -> Result<Json<Vec<Homework>>, AppError> {
    let (class_name, section) = query
        .class_and_section()
        .ok_or_else(|| AppError::bad_request(anyhow::anyhow!("Class and section are required")))?;

    let homework = HomeworkService::list_by_class_section(&state.db, class_name, section).await?;
    Ok(Json(homework))
}

/// Post homework for a class section (teachers and admins)
#[utoipa::path(
    post,
    path = "/api/homework",
    request_body = CreateHomeworkDto,
    responses(
        (status = 201, description = "Homework created", body = Homework),
        (status = 400, description = "Validation error", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Forbidden - teachers and admins only", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Homework"
)]
#[instrument(skip(state))]
pub async fn create_homework(
    State(state): State<AppState>,
    auth_user: AuthUser,
    ValidatedJson(dto): ValidatedJson<CreateHomeworkDto>,
) -> Result<(StatusCode, Json<Homework>), AppError> {
    let homework = HomeworkService::create(&state.db, dto, auth_user.user_id()?).await?;
    Ok((StatusCode::CREATED, Json(homework)))
}
