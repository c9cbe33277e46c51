/// Server error types
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use musicapp_core::{CatalogError, FieldErrors};
use serde::Serialize;
use thiserror::Error;
use utoipa::ToSchema;

pub type Result<T> = std::result::Result<T, ServerError>;

/// Body of every error response
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    pub message: String,
    /// Messages per field, on 422 only
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<Object>)]
    pub errors: Option<FieldErrors>,
}

#[derive(Debug, Error)]
pub enum ServerError {
    #[error("Authentication failed: {0}")]
    Auth(String),

    #[error("Authorization failed: {0}")]
    Forbidden(String),

    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Validation failed: {0}")]
    Validation(FieldErrors),

    #[error("Internal server error: {0}")]
    Internal(String),

    #[error("Database error: {0}")]
    Database(CatalogError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("JWT error: {0}")]
    Jwt(#[from] jsonwebtoken::errors::Error),

    #[error("Bcrypt error: {0}")]
    Bcrypt(#[from] bcrypt::BcryptError),
}

impl From<CatalogError> for ServerError {
    fn from(err: CatalogError) -> Self {
        match err {
            CatalogError::NotFound { entity, .. } => {
                ServerError::NotFound(format!("{entity} not found"))
            }
            CatalogError::Validation(errors) => ServerError::Validation(errors),
            CatalogError::InvalidInput(msg) => ServerError::BadRequest(msg),
            other => ServerError::Database(other),
        }
    }
}

impl From<musicapp_storage::StorageError> for ServerError {
    fn from(err: musicapp_storage::StorageError) -> Self {
        // Convert StorageError -> CatalogError -> ServerError
        ServerError::from(CatalogError::from(err))
    }
}

impl From<validator::ValidationErrors> for ServerError {
    fn from(errors: validator::ValidationErrors) -> Self {
        ServerError::Validation(FieldErrors::from(errors))
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            ServerError::Auth(msg) => (StatusCode::UNAUTHORIZED, msg),
            ServerError::Forbidden(msg) => (StatusCode::FORBIDDEN, msg),
            ServerError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            ServerError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ServerError::Validation(errors) => {
                let message = errors
                    .first_message()
                    .unwrap_or("The given data was invalid.")
                    .to_string();
                let body = Json(ErrorResponse {
                    message,
                    errors: Some(errors),
                });
                return (StatusCode::UNPROCESSABLE_ENTITY, body).into_response();
            }
            ServerError::Database(ref e) => {
                tracing::error!("Database error: {:?}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Database error".to_string(),
                )
            }
            ServerError::Config(ref msg) => {
                tracing::error!("Config error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Configuration error".to_string(),
                )
            }
            ServerError::Internal(ref msg) => {
                tracing::error!("Internal error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
            ServerError::Jwt(ref e) => {
                tracing::warn!("JWT error: {:?}", e);
                (StatusCode::UNAUTHORIZED, "Unauthenticated.".to_string())
            }
            ServerError::Bcrypt(ref e) => {
                tracing::error!("Bcrypt error: {:?}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Password error".to_string(),
                )
            }
        };

        let body = Json(ErrorResponse {
            message: error_message,
            errors: None,
        });

        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_names_the_entity() {
        let err = ServerError::from(CatalogError::not_found("Artist", 9));
        assert!(matches!(err, ServerError::NotFound(ref msg) if msg == "Artist not found"));
        assert_eq!(err.into_response().status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn validation_is_unprocessable() {
        let err = ServerError::from(CatalogError::invalid_field("artist_id", "invalid"));
        assert_eq!(
            err.into_response().status(),
            StatusCode::UNPROCESSABLE_ENTITY
        );
    }

    #[test]
    fn plain_error_body_has_only_a_message() {
        let body = serde_json::to_value(ErrorResponse {
            message: "Album not found".to_string(),
            errors: None,
        })
        .unwrap();
        assert_eq!(body, serde_json::json!({ "message": "Album not found" }));
    }

    #[test]
    fn validation_body_lists_field_errors() {
        let body = serde_json::to_value(ErrorResponse {
            message: "invalid".to_string(),
            errors: Some(FieldErrors::single("annee", "invalid")),
        })
        .unwrap();
        assert_eq!(body["errors"]["annee"], serde_json::json!(["invalid"]));
    }

    #[test]
    fn missing_role_is_internal() {
        let err = ServerError::from(CatalogError::MissingRole("user".to_string()));
        assert_eq!(
            err.into_response().status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
