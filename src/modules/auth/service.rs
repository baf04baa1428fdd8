use parent_portal_auth::create_access_token;
use parent_portal_config::JwtConfig;
use parent_portal_core::{AppError, Role, hash_password, verify_password};
use sqlx::PgPool;
use tracing::{info, instrument, warn};

use super::model::{AuthResponse, LoginRequest, RegisterRequest};
use crate::metrics::{
    track_token_issued, track_user_login_failure, track_user_login_success, track_user_registered,
};
use crate::modules::users::model::User;
use crate::modules::users::service::{USER_COLUMNS, UserService, normalize_email};

const INVALID_CREDENTIALS: &str = "Invalid credentials";
const USER_EXISTS: &str = "User already exists";

pub struct AuthService;

impl AuthService {
    fn issue_token(user: &User, jwt_config: &JwtConfig) -> Result<String, AppError> {
        let token =
            create_access_token(user.id, user.role, &user.name, &user.email, jwt_config)?;
        track_token_issued();
        Ok(token)
    }

    /// Creates a parent account and signs the new user in.
    #[instrument(skip(db, dto, jwt_config), fields(email = %dto.email))]
    pub async fn register(
        db: &PgPool,
        dto: RegisterRequest,
        jwt_config: &JwtConfig,
    ) -> Result<AuthResponse, AppError> {
        let email = normalize_email(&dto.email);

        if UserService::email_exists(db, &email, None).await? {
            return Err(AppError::bad_request(anyhow::anyhow!(USER_EXISTS)));
        }

        let hashed_password = hash_password(&dto.password)?;

        let result = sqlx::query_as::<_, User>(&format!(
            "INSERT INTO users (name, email, password, phone, role)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {USER_COLUMNS}"
        ))
        .bind(dto.name.trim())
        .bind(&email)
        .bind(&hashed_password)
        .bind(&dto.phone)
        .bind(Role::Parent)
        .fetch_one(db)
        .await;

        let user = match result {
            Ok(user) => user,
            Err(e) => {
                if let sqlx::Error::Database(db_err) = &e {
                    if db_err.is_unique_violation() {
                        return Err(AppError::bad_request(anyhow::anyhow!(USER_EXISTS)));
                    }
                }
                return Err(AppError::database(
                    anyhow::Error::new(e).context("Failed to create user"),
                ));
            }
        };

        track_user_registered();
        info!(user_id = %user.id, "User registered");

        let token = Self::issue_token(&user, jwt_config)?;
        Ok(AuthResponse { token, user })
    }

    #[instrument(skip(db, dto, jwt_config), fields(email = %dto.email))]
    pub async fn login(
        db: &PgPool,
        dto: LoginRequest,
        jwt_config: &JwtConfig,
    ) -> Result<AuthResponse, AppError> {
        let Some(found) = UserService::find_with_password(db, &dto.email).await? else {
            warn!("Login failed: unknown email");
            track_user_login_failure("unknown_email");
            return Err(AppError::bad_request(anyhow::anyhow!(INVALID_CREDENTIALS)));
        };

        let is_valid = verify_password(&dto.password, &found.password)?;

        if !is_valid {
            warn!(user_id = %found.user.id, "Login failed: wrong password");
            track_user_login_failure("wrong_password");
            return Err(AppError::bad_request(anyhow::anyhow!(INVALID_CREDENTIALS)));
        }

        let user = found.user;
        track_user_login_success(user.role.as_str());

        let token = Self::issue_token(&user, jwt_config)?;
        Ok(AuthResponse { token, user })
    }
}
