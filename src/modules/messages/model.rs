//! Message data models and DTOs.
//!
//! Re-exports the message and mailbox models from the `parent-portal-models`
//! crate.

pub use parent_portal_models::conversations::{ConversationSummary, mailbox};
pub use parent_portal_models::messages::*;
