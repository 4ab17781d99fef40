use axum::{
    async_trait,
    extract::{FromRef, FromRequestParts},
    http::request::Parts,
};
use tracing::warn;
use uuid::Uuid;

use crate::auth::claims::{Role, TokenKind};
use crate::auth::jwt::JwtKeys;
use crate::error::ApiError;

/// Authenticated identity extracted from the bearer token. Handlers receive
/// this value explicitly; nothing reads ambient session state.
pub struct AuthUser {
    pub id: Uuid,
    pub role: Role,
}

impl AuthUser {
    /// Role gate, configured per route in the handler layer.
    pub fn require_role(&self, allowed: &[Role]) -> Result<(), ApiError> {
        if allowed.contains(&self.role) {
            Ok(())
        } else {
            Err(ApiError::Forbidden(
                "Unauthorized - role not allowed".to_string(),
            ))
        }
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
    JwtKeys: FromRef<S>,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let keys = JwtKeys::from_ref(state);
        let auth_header = parts
            .headers
            .get(axum::http::header::AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| ApiError::Unauthorized("Missing Authorization header".to_string()))?;

        let token = auth_header
            .strip_prefix("Bearer ")
            .ok_or_else(|| ApiError::Unauthorized("Invalid Authorization header".to_string()))?;

        let claims = match keys.verify(token) {
            Ok(c) => c,
            Err(_) => {
                warn!("invalid or expired token");
                return Err(ApiError::Unauthorized(
                    "Invalid or expired token".to_string(),
                ));
            }
        };

        if claims.kind != TokenKind::Access {
            return Err(ApiError::Unauthorized("Access token required".to_string()));
        }

        Ok(AuthUser {
            id: claims.sub,
            role: claims.role,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn require_role_accepts_listed_roles() {
        let user = AuthUser {
            id: Uuid::new_v4(),
            role: Role::User,
        };
        assert!(user.require_role(&[Role::User, Role::Admin]).is_ok());
    }

    #[test]
    fn require_role_rejects_unlisted_roles() {
        let user = AuthUser {
            id: Uuid::new_v4(),
            role: Role::User,
        };
        let err = user.require_role(&[Role::Admin]).unwrap_err();
        assert!(matches!(err, ApiError::Forbidden(_)));
    }
}
