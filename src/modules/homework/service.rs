use anyhow::Context;
use parent_portal_core::AppError;
use sqlx::PgPool;
use tracing::{info, instrument};
use uuid::Uuid;

use super::model::{CreateHomeworkDto, Homework};
use crate::metrics::track_homework_created;

const HOMEWORK_COLUMNS: &str = "h.id, h.title, h.description, h.class_name, h.section, h.subject, \
     h.due_date, h.uploaded_by, u.name AS uploader_name, h.attachment_url, h.created_at";

pub struct HomeworkService;

impl HomeworkService {
    /// Homework for one class section, newest first.
    #[instrument(skip(db))]
    pub async fn list_by_class_section(
        db: &PgPool,
        class_name: &str,
        section: &str,
    ) -> Result<Vec<Homework>, AppError> {
        let homework = sqlx::query_as::<_, Homework>(&format!(
            "SELECT {HOMEWORK_COLUMNS}
             FROM homework h
             LEFT JOIN users u ON u.id = h.uploaded_by
             WHERE h.class_name = $1 AND h.section = $2
             ORDER BY h.created_at DESC"
        ))
        .bind(class_name)
        .bind(section)
        .fetch_all(db)
        .await
        .context("Failed to fetch homework")
        .map_err(AppError::database)?;

        Ok(homework)
    }

    #[instrument(skip(db))]
    pub async fn create(
        db: &PgPool,
        dto: CreateHomeworkDto,
        uploaded_by: Uuid,
    ) -> Result<Homework, AppError> {
        let homework = sqlx::query_as::<_, Homework>(&format!(
            "WITH h AS (
                INSERT INTO homework
                    (title, description, class_name, section, subject, due_date, uploaded_by, attachment_url)
                VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
                RETURNING *
             )
             SELECT {HOMEWORK_COLUMNS}
             FROM h
             LEFT JOIN users u ON u.id = h.uploaded_by"
        ))
        .bind(dto.title.trim())
        .bind(&dto.description)
        .bind(dto.class_name.trim())
        .bind(dto.section.trim())
        .bind(dto.subject.trim())
        .bind(dto.due_date)
        .bind(uploaded_by)
        .bind(dto.attachment_url.as_deref())
        .fetch_one(db)
        .await
        .context("Failed to create homework")
        .map_err(AppError::database)?;

        track_homework_created();
        info!(homework_id = %homework.id, "Homework created");

        Ok(homework)
    }
}
