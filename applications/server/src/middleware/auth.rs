/// Authentication and authorization middleware
use crate::{error::ServerError, state::AppState};
use axum::{
    extract::{FromRequestParts, Request, State},
    http::request::Parts,
    middleware::Next,
    response::Response,
};
use musicapp_core::{authorize, StorageContext, UserId, ADMIN_ROLE};

/// Extension type to store the authenticated principal in the request
/// Can be used as an extractor in handlers
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    pub user_id: UserId,
    /// Role names, loaded once per request
    pub roles: Vec<String>,
    /// Identifier of the presented token
    pub jti: String,
    /// Expiry of the presented token (unix seconds)
    pub expires_at: i64,
}

impl AuthenticatedUser {
    pub fn has_role(&self, role: &str) -> bool {
        authorize(&self.roles, role)
    }
}

fn unauthenticated() -> ServerError {
    ServerError::Auth("Unauthenticated.".to_string())
}

/// Middleware that extracts and validates the bearer token
///
/// Rejects missing, malformed, expired and revoked tokens with 401, then
/// attaches the user's roles to the request.
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, ServerError> {
    // Extract Authorization header
    let auth_header = request
        .headers()
        .get(axum::http::header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .ok_or_else(unauthenticated)?;

    // Check Bearer prefix
    let token = auth_header
        .strip_prefix("Bearer ")
        .ok_or_else(unauthenticated)?;

    // Verify token
    let claims = state.auth_service.verify_access_token(token).map_err(|e| {
        tracing::warn!("Token verification failed: {}", e);
        unauthenticated()
    })?;

    if state.db.is_token_revoked(&claims.jti).await? {
        tracing::warn!(jti = %claims.jti, "Rejected revoked token");
        return Err(unauthenticated());
    }

    let user_id = claims.user_id()?;
    let user = state.db.get_user_with_roles(user_id).await?.ok_or_else(|| {
        tracing::warn!(user_id, "Token for unknown user");
        unauthenticated()
    })?;

    request.extensions_mut().insert(AuthenticatedUser {
        user_id,
        roles: user.role_names(),
        jti: claims.jti,
        expires_at: claims.exp,
    });

    Ok(next.run(request).await)
}

/// Middleware that lets only admins through; layered inside `auth_middleware`
pub async fn require_admin(
    user: AuthenticatedUser,
    request: Request,
    next: Next,
) -> Result<Response, ServerError> {
    if !user.has_role(ADMIN_ROLE) {
        tracing::warn!(
            user_id = user.user_id,
            method = %request.method(),
            path = %request.uri().path(),
            "Forbidden: admin role required"
        );
        return Err(ServerError::Forbidden(
            "This action is unauthorized.".to_string(),
        ));
    }

    Ok(next.run(request).await)
}

/// Implement FromRequestParts so AuthenticatedUser can be used as an extractor
#[axum::async_trait]
impl<S> FromRequestParts<S> for AuthenticatedUser
where
    S: Send + Sync,
{
    type Rejection = ServerError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthenticatedUser>()
            .cloned()
            .ok_or_else(unauthenticated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn principal(roles: &[&str]) -> AuthenticatedUser {
        AuthenticatedUser {
            user_id: 1,
            roles: roles.iter().map(ToString::to_string).collect(),
            jti: "jti".to_string(),
            expires_at: 0,
        }
    }

    #[test]
    fn admin_check_is_exact() {
        assert!(principal(&["user", "admin"]).has_role(ADMIN_ROLE));
        assert!(!principal(&["user", "manager"]).has_role(ADMIN_ROLE));
        assert!(!principal(&[]).has_role(ADMIN_ROLE));
    }
}
