use axum::{
    Router, middleware,
    routing::{get, post},
};

use super::controller::{create_homework, get_homework};
use crate::middleware::role::can_create_homework;
use crate::state::AppState;

pub fn init_homework_router() -> Router<AppState> {
    Router::new().route(
        "/",
        get(get_homework)
            .merge(post(create_homework).route_layer(middleware::from_fn(can_create_homework))),
    )
}
