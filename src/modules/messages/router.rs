use axum::{
    Router,
    routing::{get, put},
};

use super::controller::{
    get_conversation, get_conversations, get_messages, mark_message_read, send_message,
};
use crate::state::AppState;

pub fn init_messages_router() -> Router<AppState> {
    Router::new()
        .route("/", get(get_messages).post(send_message))
        .route("/conversations", get(get_conversations))
        .route("/conversation/{other_user_id}", get(get_conversation))
        .route("/{message_id}/read", put(mark_message_read))
}
