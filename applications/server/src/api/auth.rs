/// Authentication API routes
use crate::{
    api::{artists::MessageResponse, ValidatedJson},
    error::{ErrorResponse, Result, ServerError},
    middleware::AuthenticatedUser,
    state::AppState,
};
use axum::{extract::State, Json};
use musicapp_core::{
    LoginUser, RegisterUser, Role, StorageContext, User, UserWithRoles, DEFAULT_ROLE,
};
use serde::Serialize;
use utoipa::ToSchema;

#[derive(Debug, Serialize, ToSchema)]
pub struct RegisterResponse {
    pub success: bool,
    pub user: User,
    pub token: String,
    pub role: Option<Role>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct LoginResponse {
    pub success: bool,
    pub user: User,
    pub token: String,
    pub roles: Vec<String>,
}

fn invalid_credentials() -> ServerError {
    ServerError::Auth("Invalid credentials".to_string())
}

/// POST /api/register - Create an account with the default role
#[utoipa::path(
    post,
    path = "/api/register",
    tag = "auth",
    request_body = RegisterUser,
    responses(
        (status = 200, description = "Account created and logged in", body = RegisterResponse),
        (status = 422, description = "Invalid fields or email taken", body = ErrorResponse),
    )
)]
pub async fn register(
    State(app_state): State<AppState>,
    ValidatedJson(req): ValidatedJson<RegisterUser>,
) -> Result<Json<RegisterResponse>> {
    let password_hash = app_state.auth_service.hash_password(&req.password)?;

    let registered = app_state
        .db
        .register_user(&req, &password_hash, DEFAULT_ROLE)
        .await?;
    let issued = app_state
        .auth_service
        .create_access_token(registered.user.id)?;

    tracing::info!(user_id = registered.user.id, "User registered");

    Ok(Json(RegisterResponse {
        success: true,
        role: registered.roles.into_iter().next(),
        user: registered.user,
        token: issued.token,
    }))
}

/// POST /api/login
#[utoipa::path(
    post,
    path = "/api/login",
    tag = "auth",
    request_body = LoginUser,
    responses(
        (status = 200, description = "Logged in", body = LoginResponse),
        (status = 401, description = "Invalid credentials", body = ErrorResponse),
        (status = 422, description = "Invalid fields", body = ErrorResponse),
    )
)]
pub async fn login(
    State(app_state): State<AppState>,
    ValidatedJson(req): ValidatedJson<LoginUser>,
) -> Result<Json<LoginResponse>> {
    // Look up user by email
    let user = app_state
        .db
        .find_user_by_email(&req.email)
        .await?
        .ok_or_else(invalid_credentials)?;

    let password_hash = app_state
        .db
        .get_password_hash(user.id)
        .await?
        .ok_or_else(invalid_credentials)?;

    // Verify password
    if !app_state
        .auth_service
        .verify_password(&req.password, &password_hash)?
    {
        tracing::warn!(user_id = user.id, "Login with wrong password");
        return Err(invalid_credentials());
    }

    let roles = app_state
        .db
        .get_user_with_roles(user.id)
        .await?
        .map(|u| u.role_names())
        .unwrap_or_default();
    let issued = app_state.auth_service.create_access_token(user.id)?;

    Ok(Json(LoginResponse {
        success: true,
        user,
        token: issued.token,
        roles,
    }))
}

/// POST /api/logout - Revoke the presented token
#[utoipa::path(
    post,
    path = "/api/logout",
    tag = "auth",
    responses(
        (status = 200, description = "Token revoked", body = MessageResponse),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
    ),
    security(("bearerAuth" = []))
)]
pub async fn logout(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
) -> Result<Json<MessageResponse>> {
    app_state
        .db
        .revoke_token(&user.jti, user.expires_at)
        .await?;
    tracing::info!(user_id = user.user_id, "Logged out");

    Ok(Json(MessageResponse {
        message: "Logged out successfully".to_string(),
    }))
}

/// GET /api/user - The authenticated user with roles
#[utoipa::path(
    get,
    path = "/api/user",
    tag = "auth",
    responses(
        (status = 200, description = "The authenticated user", body = UserWithRoles),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
    ),
    security(("bearerAuth" = []))
)]
pub async fn current_user(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
) -> Result<Json<UserWithRoles>> {
    let found = app_state
        .db
        .get_user_with_roles(user.user_id)
        .await?
        .ok_or_else(|| ServerError::NotFound("User not found".to_string()))?;

    Ok(Json(found))
}
