use anyhow::Context;
use parent_portal_core::permissions::{self, Action, Resource};
use parent_portal_core::{AppError, Role};
use sqlx::PgPool;
use tracing::{info, instrument};
use uuid::Uuid;

use super::model::{ConversationSummary, Message, SendMessageDto, mailbox};
use crate::metrics::track_message_sent;

const MESSAGE_COLUMNS: &str = "m.id, m.sender_id, s.name AS sender_name, m.receiver_id, \
     r.name AS receiver_name, m.content, m.is_read, m.created_at";

const MESSAGE_JOINS: &str =
    "JOIN users s ON s.id = m.sender_id JOIN users r ON r.id = m.receiver_id";

pub struct MessageService;

impl MessageService {
    /// Every message sent or received by `user_id`, newest first.
    #[instrument(skip(db))]
    pub async fn list_for_user(db: &PgPool, user_id: Uuid) -> Result<Vec<Message>, AppError> {
        let messages = sqlx::query_as::<_, Message>(&format!(
            "SELECT {MESSAGE_COLUMNS} FROM messages m {MESSAGE_JOINS}
             WHERE m.sender_id = $1 OR m.receiver_id = $1
             ORDER BY m.created_at DESC"
        ))
        .bind(user_id)
        .fetch_all(db)
        .await
        .context("Failed to fetch messages")
        .map_err(AppError::database)?;

        Ok(messages)
    }

    /// The messages exchanged between two users, oldest first.
    #[instrument(skip(db))]
    pub async fn list_conversation(
        db: &PgPool,
        user_id: Uuid,
        other_user_id: Uuid,
    ) -> Result<Vec<Message>, AppError> {
        let messages = sqlx::query_as::<_, Message>(&format!(
            "SELECT {MESSAGE_COLUMNS} FROM messages m {MESSAGE_JOINS}
             WHERE (m.sender_id = $1 AND m.receiver_id = $2)
                OR (m.sender_id = $2 AND m.receiver_id = $1)
             ORDER BY m.created_at ASC"
        ))
        .bind(user_id)
        .bind(other_user_id)
        .fetch_all(db)
        .await
        .context("Failed to fetch conversation")
        .map_err(AppError::database)?;

        Ok(messages)
    }

    #[instrument(skip(db))]
    pub async fn list_conversations(
        db: &PgPool,
        user_id: Uuid,
    ) -> Result<Vec<ConversationSummary>, AppError> {
        let messages = Self::list_for_user(db, user_id).await?;
        Ok(mailbox(&messages, user_id))
    }

    #[instrument(skip(db, dto), fields(receiver_id = %dto.receiver_id))]
    pub async fn send(
        db: &PgPool,
        sender_id: Uuid,
        dto: SendMessageDto,
    ) -> Result<Message, AppError> {
        if dto.content.trim().is_empty() {
            return Err(AppError::bad_request(anyhow::anyhow!(
                "Receiver ID and content are required"
            )));
        }

        if dto.receiver_id == sender_id {
            return Err(AppError::bad_request(anyhow::anyhow!(
                "You cannot send a message to yourself"
            )));
        }

        let receiver_exists =
            sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM users WHERE id = $1)")
                .bind(dto.receiver_id)
                .fetch_one(db)
                .await
                .context("Failed to check receiver")
                .map_err(AppError::database)?;

        if !receiver_exists {
            return Err(AppError::not_found(anyhow::anyhow!("Receiver not found")));
        }

        let message = sqlx::query_as::<_, Message>(&format!(
            "WITH m AS (
                INSERT INTO messages (sender_id, receiver_id, content)
                VALUES ($1, $2, $3)
                RETURNING *
             )
             SELECT {MESSAGE_COLUMNS} FROM m {MESSAGE_JOINS}"
        ))
        .bind(sender_id)
        .bind(dto.receiver_id)
        .bind(&dto.content)
        .fetch_one(db)
        .await
        .context("Failed to send message")
        .map_err(AppError::database)?;

        track_message_sent();
        info!(message_id = %message.id, "Message sent");

        Ok(message)
    }

    /// Marks a message read. Only its receiver may do so.
    #[instrument(skip(db))]
    pub async fn mark_read(
        db: &PgPool,
        message_id: Uuid,
        requester_id: Uuid,
        requester_role: Role,
    ) -> Result<Message, AppError> {
        let receiver_id =
            sqlx::query_scalar::<_, Uuid>("SELECT receiver_id FROM messages WHERE id = $1")
                .bind(message_id)
                .fetch_optional(db)
                .await
                .context("Failed to fetch message")
                .map_err(AppError::database)?
                .ok_or_else(|| AppError::not_found(anyhow::anyhow!("Message not found")))?;

        if !permissions::may_act_on(
            requester_role,
            Resource::Messages,
            Action::Update,
            &requester_id,
            &receiver_id,
        ) {
            return Err(AppError::forbidden(
                "Unauthorized to mark this message as read",
            ));
        }

        sqlx::query_as::<_, Message>(&format!(
            "WITH m AS (
                UPDATE messages SET is_read = TRUE
                WHERE id = $1 AND receiver_id = $2
                RETURNING *
             )
             SELECT {MESSAGE_COLUMNS} FROM m {MESSAGE_JOINS}"
        ))
        .bind(message_id)
        .bind(receiver_id)
        .fetch_optional(db)
        .await
        .context("Failed to mark message as read")
        .map_err(AppError::database)?
        .ok_or_else(|| AppError::not_found(anyhow::anyhow!("Message not found")))
    }
}
