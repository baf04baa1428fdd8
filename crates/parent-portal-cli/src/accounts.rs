//! Staff and parent account creation for the `create-user` command.

use anyhow::{Context, bail};
use parent_portal_core::{Role, hash_password};
use parent_portal_models::users::validate_phone;
use sqlx::PgPool;
use uuid::Uuid;
use validator::{Validate, ValidationError};

fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("required").with_message("Name is required".into()));
    }
    Ok(())
}

/// Fields for a new account. Validated with the same rules registration
/// enforces, except that any role is accepted.
#[derive(Debug, Validate)]
pub struct NewAccount {
    #[validate(custom(function = "not_blank"))]
    pub name: String,
    #[validate(email(message = "Invalid email format"))]
    pub email: String,
    #[validate(length(min = 6, message = "Password must be at least 6 characters long"))]
    pub password: String,
    #[validate(custom(function = "validate_phone"))]
    pub phone: String,
    pub role: Role,
}

impl NewAccount {
    pub fn check(&self) -> anyhow::Result<()> {
        let Err(errors) = self.validate() else {
            return Ok(());
        };

        let mut messages: Vec<String> = errors
            .field_errors()
            .values()
            .flat_map(|errs| errs.iter())
            .map(|e| match &e.message {
                Some(message) => message.to_string(),
                None => format!("{} is invalid", e.code),
            })
            .collect();
        messages.sort();
        bail!(messages.join(", "))
    }
}

pub async fn create_account(db: &PgPool, account: &NewAccount) -> anyhow::Result<Uuid> {
    account.check()?;

    let hashed = hash_password(&account.password).map_err(|e| e.error)?;

    let id = sqlx::query_scalar::<_, Uuid>(
        "INSERT INTO users (name, email, password, phone, role)
         VALUES ($1, $2, $3, $4, $5)
         ON CONFLICT (email) DO NOTHING
         RETURNING id",
    )
    .bind(account.name.trim())
    .bind(account.email.trim().to_lowercase())
    .bind(hashed)
    .bind(&account.phone)
    .bind(account.role)
    .fetch_optional(db)
    .await
    .context("Failed to insert user")?;

    match id {
        Some(id) => Ok(id),
        None => bail!("User with this email already exists"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn account() -> NewAccount {
        NewAccount {
            name: "Mary Teacher".to_string(),
            email: "teacher@example.com".to_string(),
            password: "password".to_string(),
            phone: "5550200000".to_string(),
            role: Role::Teacher,
        }
    }

    #[test]
    fn test_valid_account() {
        assert!(account().check().is_ok());
    }

    #[test]
    fn test_short_password() {
        let mut a = account();
        a.password = "123".to_string();
        let err = a.check().unwrap_err();
        assert_eq!(err.to_string(), "Password must be at least 6 characters long");
    }

    #[test]
    fn test_bad_phone() {
        let mut a = account();
        a.phone = "555-0200".to_string();
        let err = a.check().unwrap_err();
        assert_eq!(err.to_string(), "Phone number must be 10 digits");
    }

    #[test]
    fn test_missing_email() {
        let mut a = account();
        a.email = "  ".to_string();
        let err = a.check().unwrap_err();
        assert_eq!(err.to_string(), "Invalid email format");
    }

    #[test]
    fn test_email_needs_a_domain() {
        let mut a = account();
        a.email = "teacher@".to_string();
        assert!(a.check().is_err());
    }

    #[test]
    fn test_blank_name() {
        let mut a = account();
        a.name = "   ".to_string();
        let err = a.check().unwrap_err();
        assert_eq!(err.to_string(), "Name is required");
    }

    #[test]
    fn test_reports_every_invalid_field() {
        let mut a = account();
        a.password = "123".to_string();
        a.phone = "555".to_string();
        let err = a.check().unwrap_err();
        assert_eq!(
            err.to_string(),
            "Password must be at least 6 characters long, Phone number must be 10 digits"
        );
    }
}
