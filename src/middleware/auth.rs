use axum::{
    extract::{FromRequestParts, Request, State},
    http::request::Parts,
    middleware::Next,
    response::Response,
};
use axum_extra::{
    TypedHeader,
    headers::{Authorization, authorization::Bearer},
};
use parent_portal_auth::{Claims, verify_token};
use parent_portal_core::permissions::{self, Action, Resource};
use parent_portal_core::{AppError, Role};
use uuid::Uuid;

use crate::state::AppState;

pub const AUTHENTICATION_REQUIRED: &str = "Authentication required";

/// The authenticated caller, built from verified token claims.
#[derive(Debug, Clone)]
pub struct AuthUser(pub Claims);

impl AuthUser {
    /// Get the user ID as UUID
    pub fn user_id(&self) -> Result<Uuid, AppError> {
        self.0.user_id()
    }

    pub fn role(&self) -> Role {
        self.0.role
    }

    pub fn name(&self) -> &str {
        &self.0.name
    }

    pub fn email(&self) -> &str {
        &self.0.email
    }

    pub fn can(&self, resource: Resource, action: Action) -> bool {
        permissions::is_allowed(self.role(), resource, action)
    }

    /// Whether the caller may act on a record owned by `owner`.
    pub fn may_act_on(
        &self,
        resource: Resource,
        action: Action,
        owner: Uuid,
    ) -> Result<bool, AppError> {
        let user_id = self.user_id()?;
        Ok(permissions::may_act_on(
            self.role(),
            resource,
            action,
            &user_id,
            &owner,
        ))
    }

    /// Like [`AuthUser::may_act_on`], but fails with 403 and `message`.
    pub fn ensure_can_act_on(
        &self,
        resource: Resource,
        action: Action,
        owner: Uuid,
        message: &str,
    ) -> Result<(), AppError> {
        if self.may_act_on(resource, action, owner)? {
            Ok(())
        } else {
            Err(AppError::forbidden(message))
        }
    }
}

async fn claims_from_header(parts: &mut Parts, state: &AppState) -> Result<Claims, AppError> {
    let TypedHeader(Authorization(bearer)) =
        TypedHeader::<Authorization<Bearer>>::from_request_parts(parts, state)
            .await
            .map_err(|_| AppError::unauthorized(AUTHENTICATION_REQUIRED))?;

    verify_token(bearer.token(), &state.jwt_config)
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        if let Some(auth_user) = parts.extensions.get::<AuthUser>() {
            return Ok(auth_user.clone());
        }

        let claims = claims_from_header(parts, state).await?;
        Ok(AuthUser(claims))
    }
}

/// Rejects unauthenticated requests and stores the [`AuthUser`] in the
/// request extensions for downstream gates and handlers.
pub async fn authenticate(
    State(state): State<AppState>,
    req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let (mut parts, body) = req.into_parts();

    let auth_user = AuthUser::from_request_parts(&mut parts, &state).await?;
    parts.extensions.insert(auth_user);

    Ok(next.run(Request::from_parts(parts, body)).await)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn auth_user(role: Role, id: Uuid) -> AuthUser {
        AuthUser(Claims {
            sub: id.to_string(),
            role,
            name: "Test User".to_string(),
            email: "test@example.com".to_string(),
            exp: 9999999999,
            iat: 1234567890,
        })
    }

    #[test]
    fn test_accessors() {
        let id = Uuid::new_v4();
        let user = auth_user(Role::Teacher, id);
        assert_eq!(user.user_id().unwrap(), id);
        assert_eq!(user.role(), Role::Teacher);
        assert_eq!(user.name(), "Test User");
        assert_eq!(user.email(), "test@example.com");
    }

    #[test]
    fn test_parent_only_acts_on_own_students() {
        let id = Uuid::new_v4();
        let parent = auth_user(Role::Parent, id);
        assert!(parent.may_act_on(Resource::Students, Action::Read, id).unwrap());
        assert!(
            !parent
                .may_act_on(Resource::Students, Action::Read, Uuid::new_v4())
                .unwrap()
        );
    }

    #[test]
    fn test_ensure_can_act_on_returns_forbidden() {
        let teacher = auth_user(Role::Teacher, Uuid::new_v4());
        let err = teacher
            .ensure_can_act_on(Resource::Users, Action::Update, Uuid::new_v4(), "Unauthorized")
            .unwrap_err();
        assert_eq!(err.status.as_u16(), 403);
        assert_eq!(err.error.to_string(), "Unauthorized");
    }

    #[test]
    fn test_admin_updates_any_profile() {
        let admin = auth_user(Role::Admin, Uuid::new_v4());
        assert!(
            admin
                .ensure_can_act_on(Resource::Users, Action::Update, Uuid::new_v4(), "Unauthorized")
                .is_ok()
        );
    }
}
