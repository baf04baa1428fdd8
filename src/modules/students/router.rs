use axum::{
    Router, middleware,
    routing::{get, post, put},
};

use super::controller::{create_student, get_student, get_students, update_attendance};
use crate::middleware::role::{can_create_students, can_update_attendance};
use crate::state::AppState;

pub fn init_students_router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(get_students)
                .merge(post(create_student).route_layer(middleware::from_fn(can_create_students))),
        )
        .route("/{id}", get(get_student))
        .route(
            "/{id}/attendance",
            put(update_attendance).route_layer(middleware::from_fn(can_update_attendance)),
        )
}
