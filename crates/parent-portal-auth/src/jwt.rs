//! JWT (JSON Web Token) utilities for authentication.

use chrono::Utc;
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use uuid::Uuid;

use parent_portal_config::JwtConfig;
use parent_portal_core::{AppError, Role};

use crate::claims::Claims;

/// Creates a signed access token for `user_id`.
///
/// # Errors
///
/// Returns an internal error if token encoding fails.
pub fn create_access_token(
    user_id: Uuid,
    role: Role,
    name: &str,
    email: &str,
    jwt_config: &JwtConfig,
) -> Result<String, AppError> {
    let now = Utc::now().timestamp() as usize;
    let lifetime = usize::try_from(jwt_config.access_token_expiry).unwrap_or(usize::MAX);
    let exp = now.saturating_add(lifetime);

    let claims = Claims {
        sub: user_id.to_string(),
        role,
        name: name.to_string(),
        email: email.to_string(),
        exp,
        iat: now,
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(jwt_config.secret.as_bytes()),
    )
    .map_err(|e| AppError::internal_error(format!("Failed to create token: {}", e)))
}

/// Verifies an access token and returns the embedded claims.
///
/// Any failure (bad signature, expiry, malformed token) is reported as
/// 401 "Invalid or expired token".
pub fn verify_token(token: &str, jwt_config: &JwtConfig) -> Result<Claims, AppError> {
    decode::<Claims>(
        token,
        &DecodingKey::from_secret(jwt_config.secret.as_bytes()),
        &Validation::default(),
    )
    .map(|data| data.claims)
    .map_err(|_| AppError::unauthorized("Invalid or expired token"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn get_test_jwt_config() -> JwtConfig {
        JwtConfig {
            secret: "test-secret-key-at-least-32-characters-long".to_string(),
            access_token_expiry: 86400,
        }
    }

    #[test]
    fn test_verify_token_success() {
        let config = get_test_jwt_config();
        let user_id = Uuid::new_v4();

        let token = create_access_token(
            user_id,
            Role::Parent,
            "Jane Doe",
            "jane@x.com",
            &config,
        )
        .unwrap();

        let claims = verify_token(&token, &config).unwrap();

        assert_eq!(claims.sub, user_id.to_string());
        assert_eq!(claims.role, Role::Parent);
        assert_eq!(claims.name, "Jane Doe");
        assert_eq!(claims.email, "jane@x.com");
        assert_eq!(claims.exp - claims.iat, 86400);
    }

    #[test]
    fn test_huge_expiry_saturates() {
        let config = JwtConfig {
            access_token_expiry: u64::MAX,
            ..get_test_jwt_config()
        };

        let token =
            create_access_token(Uuid::new_v4(), Role::Parent, "Jane Doe", "jane@x.com", &config)
                .unwrap();

        let claims = verify_token(&token, &config).unwrap();
        assert_eq!(claims.exp, usize::MAX);
    }

    #[test]
    fn test_verify_token_invalid() {
        let config = get_test_jwt_config();
        let err = verify_token("invalid-token", &config).unwrap_err();
        assert_eq!(err.status.as_u16(), 401);
        assert_eq!(err.error.to_string(), "Invalid or expired token");
    }

    #[test]
    fn test_verify_token_wrong_secret() {
        let config = get_test_jwt_config();
        let token = create_access_token(
            Uuid::new_v4(),
            Role::Admin,
            "Admin User",
            "admin@example.com",
            &config,
        )
        .unwrap();

        let wrong_config = JwtConfig {
            secret: "different-secret-key-at-least-32-characters".to_string(),
            access_token_expiry: 86400,
        };

        assert!(verify_token(&token, &wrong_config).is_err());
    }

    #[test]
    fn test_verify_token_expired() {
        let config = get_test_jwt_config();
        let now = Utc::now().timestamp() as usize;
        let claims = Claims {
            sub: Uuid::new_v4().to_string(),
            role: Role::Teacher,
            name: "Sarah Johnson".to_string(),
            email: "teacher@example.com".to_string(),
            exp: now - 3600,
            iat: now - 7200,
        };
        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(config.secret.as_bytes()),
        )
        .unwrap();

        let err = verify_token(&token, &config).unwrap_err();
        assert_eq!(err.status.as_u16(), 401);
    }

    #[test]
    fn test_tampered_role_is_rejected() {
        let config = get_test_jwt_config();
        let token = create_access_token(
            Uuid::new_v4(),
            Role::Parent,
            "Jane Doe",
            "jane@x.com",
            &config,
        )
        .unwrap();

        let mut parts: Vec<String> = token.split('.').map(String::from).collect();
        parts[1] = parts[1].chars().rev().collect();
        let tampered = parts.join(".");

        assert!(verify_token(&tampered, &config).is_err());
    }
}
