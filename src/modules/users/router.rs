use axum::{
    Router,
    routing::{get, put},
};

use super::controller::{
    get_available_users, get_user, update_own_password, update_own_profile, update_user_password,
    update_user_profile,
};
use crate::state::AppState;

pub fn init_users_router() -> Router<AppState> {
    Router::new()
        .route("/available", get(get_available_users))
        .route("/profile", put(update_own_profile))
        .route("/password", put(update_own_password))
        .route("/{id}", get(get_user).put(update_user_profile))
        .route("/{id}/password", put(update_user_password))
}
