use axum::{Json, extract::State, http::StatusCode};
use parent_portal_core::AppError;
use parent_portal_core::permissions::{Action, Resource, Scope, lookup};
use tracing::instrument;
use uuid::Uuid;

use super::model::{AttendanceUpdateDto, CreateStudentDto, Student, StudentQuery};
use super::service::StudentService;
use crate::middleware::auth::AuthUser;
use crate::middleware::role::ACCESS_DENIED;
use crate::modules::auth::controller::ErrorResponse;
use crate::state::AppState;
use crate::validator::{ValidatedJson, ValidatedPath, ValidatedQuery};

/// List students visible to the caller
///
/// Parents always receive their own children. Teachers and admins may filter
/// by `class` + `section` or by `parentId`; without filters every student is
/// returned.
#[utoipa::path(
    get,
    path = "/api/students",
    params(StudentQuery),
    responses(
        (status = 200, description = "List of students", body = Vec<Student>),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Students"
)]
#[instrument(skip(state))]
pub async fn get_students(
    State(state): State<AppState>,
    auth_user: AuthUser,
    ValidatedQuery(query): ValidatedQuery<StudentQuery>,
) -> Result<Json<Vec<Student>>, AppError> {
    let students = match lookup(auth_user.role(), Resource::Students, Action::Read) {
        Some(Scope::Own) => StudentService::list_for_parent(&state.db, auth_user.user_id()?).await?,
        Some(Scope::Any) => match (query.class_and_section(), query.parent_id) {
            (Some((class_name, section)), _) => {
                StudentService::list_for_class_section(&state.db, class_name, section).await?
            }
            (None, Some(parent_id)) => StudentService::list_for_parent(&state.db, parent_id).await?,
            (None, None) => StudentService::list_all(&state.db).await?,
        },
        None => return Err(AppError::forbidden(ACCESS_DENIED)),
    };

    Ok(Json(students))
}

/// Get a single student
#[utoipa::path(
    get,
    path = "/api/students/{id}",
    params(("id" = Uuid, Path, description = "Student ID")),
    responses(
        (status = 200, description = "Student details", body = Student),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Parent requesting someone else's child", body = ErrorResponse),
        (status = 404, description = "Student not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Students"
)]
#[instrument(skip(state))]
pub async fn get_student(
    State(state): State<AppState>,
    auth_user: AuthUser,
    ValidatedPath(id): ValidatedPath<Uuid>,
) -> Result<Json<Student>, AppError> {
    let student = StudentService::get_by_id(&state.db, id).await?;

    auth_user.ensure_can_act_on(
        Resource::Students,
        Action::Read,
        student.parent_id,
        "Unauthorized access",
    )?;

    Ok(Json(student))
}

/// Create a student (teachers and admins)
#[utoipa::path(
    post,
    path = "/api/students",
    request_body = CreateStudentDto,
    responses(
        (status = 201, description = "Student created successfully", body = Student),
        (status = 400, description = "Validation error, duplicate roll number or invalid parent", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Forbidden - teachers and admins only", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Students"
)]
#[instrument(skip(state))]
pub async fn create_student(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<CreateStudentDto>,
) -> Result<(StatusCode, Json<Student>), AppError> {
    let student = StudentService::create(&state.db, dto).await?;
    Ok((StatusCode::CREATED, Json(student)))
}

/// Update a student's attendance counters (teachers and admins)
#[utoipa::path(
    put,
    path = "/api/students/{id}/attendance",
    params(("id" = Uuid, Path, description = "Student ID")),
    request_body = AttendanceUpdateDto,
    responses(
        (status = 200, description = "Attendance updated; total = present + absent", body = Student),
        (status = 400, description = "Negative or missing counters", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Forbidden - teachers and admins only", body = ErrorResponse),
        (status = 404, description = "Student not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Students"
)]
#[instrument(skip(state))]
pub async fn update_attendance(
    State(state): State<AppState>,
    ValidatedPath(id): ValidatedPath<Uuid>,
    ValidatedJson(dto): ValidatedJson<AttendanceUpdateDto>,
) -> Result<Json<Student>, AppError> {
    let student = StudentService::update_attendance(&state.db, id, dto).await?;
    Ok(Json(student))
}
