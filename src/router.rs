use axum::http::{HeaderValue, Method, Uri};
use axum::{Json, Router, middleware, routing::get};
use chrono::{DateTime, Utc};
use parent_portal_core::AppError;
use serde::Serialize;
use tower_http::cors::{AllowOrigin, CorsLayer};
use utoipa::{OpenApi, ToSchema};
use utoipa_scalar::{Scalar, Servable as _};

use crate::docs::ApiDoc;
use crate::logging::logging_middleware;
use crate::metrics::metrics_middleware;
use crate::middleware::auth::authenticate;
use crate::modules::auth::router::init_auth_router;
use crate::modules::homework::router::init_homework_router;
use crate::modules::messages::router::init_messages_router;
use crate::modules::students::router::init_students_router;
use crate::modules::users::router::init_users_router;
use crate::state::AppState;

#[derive(Serialize, ToSchema)]
pub struct StatusResponse {
    pub status: String,
    pub message: String,
    pub timestamp: DateTime<Utc>,
}

/// API status
#[utoipa::path(
    get,
    path = "/api",
    responses(
        (status = 200, description = "The API is running", body = StatusResponse)
    ),
    tag = "Status"
)]
pub async fn api_status() -> Json<StatusResponse> {
    Json(StatusResponse {
        status: "success".to_string(),
        message: "Parent Portal API is running".to_string(),
        timestamp: Utc::now(),
    })
}

async fn route_not_found(method: Method, uri: Uri) -> AppError {
    AppError::not_found(anyhow::anyhow!("Cannot {} {}", method, uri.path()))
}

fn cors_layer(state: &AppState) -> CorsLayer {
    let allow_origin = if state.cors_config.allows_any_origin() {
        AllowOrigin::any()
    } else {
        let allowed_origins: Vec<HeaderValue> = state
            .cors_config
            .allowed_origins
            .iter()
            .filter_map(|origin| origin.parse().ok())
            .collect();
        AllowOrigin::list(allowed_origins)
    };

    CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::OPTIONS,
        ])
        .allow_headers([
            axum::http::header::AUTHORIZATION,
            axum::http::header::CONTENT_TYPE,
            axum::http::header::ACCEPT,
        ])
}

pub fn init_router(state: AppState) -> Router {
    let authenticated = || middleware::from_fn_with_state(state.clone(), authenticate);

    Router::new()
        .merge(Scalar::with_url("/scalar", ApiDoc::openapi()))
        .nest(
            "/api",
            Router::new()
                .route("/", get(api_status))
                .nest("/auth", init_auth_router())
                .nest("/students", init_students_router().route_layer(authenticated()))
                .nest("/homework", init_homework_router().route_layer(authenticated()))
                .nest("/messages", init_messages_router().route_layer(authenticated()))
                .nest("/users", init_users_router().route_layer(authenticated())),
        )
        .fallback(route_not_found)
        .with_state(state.clone())
        .layer(cors_layer(&state))
        .layer(middleware::from_fn(metrics_middleware))
        .layer(middleware::from_fn(logging_middleware))
}
