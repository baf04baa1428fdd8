use anyhow::Context;
use parent_portal_core::{AppError, hash_password, verify_password};
use sqlx::PgPool;
use tracing::instrument;
use uuid::Uuid;

use super::model::{ChangePasswordDto, UpdateProfileDto, User, UserSummary};

pub(crate) const USER_COLUMNS: &str = "id, name, email, phone, role, created_at, updated_at";

/// A user row together with its password hash. Never leaves the service layer.
#[derive(sqlx::FromRow)]
pub(crate) struct UserWithPassword {
    #[sqlx(flatten)]
    pub user: User,
    pub password: String,
}

pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

pub struct UserService;

impl UserService {
    #[instrument(skip(db))]
    pub async fn list_available(db: &PgPool, excluding: Uuid) -> Result<Vec<UserSummary>, AppError> {
        let users = sqlx::query_as::<_, UserSummary>(
            "SELECT id, name, role FROM users WHERE id <> $1 ORDER BY name",
        )
        .bind(excluding)
        .fetch_all(db)
        .await
        .context("Failed to fetch available users")
        .map_err(AppError::database)?;

        Ok(users)
    }

    #[instrument(skip(db))]
    pub async fn get_by_id(db: &PgPool, id: Uuid) -> Result<User, AppError> {
        sqlx::query_as::<_, User>(&format!("SELECT {USER_COLUMNS} FROM users WHERE id = $1"))
            .bind(id)
            .fetch_optional(db)
            .await
            .context("Failed to fetch user")
            .map_err(AppError::database)?
            .ok_or_else(|| AppError::not_found(anyhow::anyhow!("User not found")))
    }

    #[instrument(skip(db))]
    pub(crate) async fn find_with_password(
        db: &PgPool,
        email: &str,
    ) -> Result<Option<UserWithPassword>, AppError> {
        let user = sqlx::query_as::<_, UserWithPassword>(&format!(
            "SELECT {USER_COLUMNS}, password FROM users WHERE email = $1"
        ))
        .bind(normalize_email(email))
        .fetch_optional(db)
        .await
        .context("Failed to fetch user by email")
        .map_err(AppError::database)?;

        Ok(user)
    }

    #[instrument(skip(db))]
    pub async fn email_exists(
        db: &PgPool,
        email: &str,
        excluding: Option<Uuid>,
    ) -> Result<bool, AppError> {
        let exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM users WHERE email = $1 AND ($2::uuid IS NULL OR id <> $2))",
        )
        .bind(normalize_email(email))
        .bind(excluding)
        .fetch_one(db)
        .await
        .context("Failed to check email")
        .map_err(AppError::database)?;

        Ok(exists)
    }

    /// Updates the supplied profile fields. Emails must stay unique.
    #[instrument(skip(db))]
    pub async fn update_profile(
        db: &PgPool,
        id: Uuid,
        dto: UpdateProfileDto,
    ) -> Result<User, AppError> {
        if dto.is_empty() {
            return Err(AppError::bad_request(anyhow::anyhow!(
                "At least one of name, email or phone is required"
            )));
        }

        let email = dto.email.as_deref().map(normalize_email);

        if let Some(email) = &email {
            if Self::email_exists(db, email, Some(id)).await? {
                return Err(AppError::bad_request(anyhow::anyhow!("Email already in use")));
            }
        }

        let result = sqlx::query_as::<_, User>(&format!(
            "UPDATE users
             SET name = COALESCE($2, name),
                 email = COALESCE($3, email),
                 phone = COALESCE($4, phone),
                 updated_at = NOW()
             WHERE id = $1
             RETURNING {USER_COLUMNS}"
        ))
        .bind(id)
        .bind(dto.name.as_deref().map(str::trim))
        .bind(email)
        .bind(dto.phone)
        .fetch_optional(db)
        .await;

        match result {
            Ok(Some(user)) => Ok(user),
            Ok(None) => Err(AppError::not_found(anyhow::anyhow!("User not found"))),
            Err(e) => {
                if let sqlx::Error::Database(db_err) = &e {
                    if db_err.is_unique_violation() {
                        return Err(AppError::bad_request(anyhow::anyhow!(
                            "Email already in use"
                        )));
                    }
                }
                Err(AppError::database(
                    anyhow::Error::new(e).context("Failed to update user"),
                ))
            }
        }
    }

    /// Replaces the password after checking the current one.
    #[instrument(skip(db, dto))]
    pub async fn update_password(
        db: &PgPool,
        id: Uuid,
        dto: ChangePasswordDto,
    ) -> Result<(), AppError> {
        let current_hash = sqlx::query_scalar::<_, String>("SELECT password FROM users WHERE id = $1")
            .bind(id)
            .fetch_optional(db)
            .await
            .context("Failed to fetch user password")
            .map_err(AppError::database)?
            .ok_or_else(|| AppError::not_found(anyhow::anyhow!("User not found")))?;

        if !verify_password(&dto.current_password, &current_hash)? {
            return Err(AppError::bad_request(anyhow::anyhow!(
                "Current password is incorrect"
            )));
        }

        let new_hash = hash_password(&dto.new_password)?;

        sqlx::query("UPDATE users SET password = $2, updated_at = NOW() WHERE id = $1")
            .bind(id)
            .bind(new_hash)
            .execute(db)
            .await
            .context("Failed to update password")
            .map_err(AppError::database)?;

        Ok(())
    }
}
