/// API route modules
pub mod albums;
pub mod artists;
pub mod auth;
pub mod chansons;
pub mod docs;
pub mod health;

use crate::error::ServerError;
use axum::{
    extract::{rejection::JsonRejection, FromRequest, FromRequestParts, Path, Query, Request},
    http::request::Parts,
    Json,
};
use musicapp_core::{Album, Artist, Chanson, FieldErrors};
use serde::{
    de::{self, DeserializeOwned},
    Deserialize, Deserializer,
};
use std::{fmt::Display, marker::PhantomData, str::FromStr};
use validator::Validate;

const DATA_ERROR_PREFIX: &str = "Failed to deserialize the JSON body into the target type: ";

/// JSON body extractor that also runs the payload's `validator` rules
///
/// Malformed JSON is a 400; a body of the wrong shape or one that breaks a
/// field rule is a 422 with per-field messages.
#[derive(Debug, Clone, Copy, Default)]
pub struct ValidatedJson<T>(pub T);

#[axum::async_trait]
impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = ServerError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(rejection_to_error)?;
        value.validate()?;
        Ok(Self(value))
    }
}

/// A catalog entity addressed by numeric id in the URL
pub trait Entity {
    /// Message of the 404 for an unknown id
    const NOT_FOUND: &'static str;
}

impl Entity for Artist {
    const NOT_FOUND: &'static str = "Artist not found";
}

impl Entity for Album {
    const NOT_FOUND: &'static str = "Album not found";
}

impl Entity for Chanson {
    const NOT_FOUND: &'static str = "Chanson not found";
}

/// The `:id` path segment of an entity route
///
/// An id that is not an integer cannot name a row, so it answers the same
/// 404 as an unknown one.
#[derive(Debug, Clone, Copy)]
pub struct EntityId<T>(pub i64, pub PhantomData<fn() -> T>);

#[axum::async_trait]
impl<T, S> FromRequestParts<S> for EntityId<T>
where
    T: Entity + 'static,
    S: Send + Sync,
{
    type Rejection = ServerError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|rejection| ServerError::BadRequest(rejection.body_text()))?;

        raw.parse::<i64>()
            .map(|id| Self(id, PhantomData))
            .map_err(|_| ServerError::NotFound(T::NOT_FOUND.to_string()))
    }
}

/// Query string extractor answering malformed values with a JSON 400
#[derive(Debug, Clone, Copy, Default)]
pub struct ApiQuery<T>(pub T);

#[axum::async_trait]
impl<T, S> FromRequestParts<S> for ApiQuery<T>
where
    T: DeserializeOwned + Send,
    S: Send + Sync,
{
    type Rejection = ServerError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(value) = Query::<T>::from_request_parts(parts, state)
            .await
            .map_err(|rejection| ServerError::BadRequest(rejection.body_text()))?;
        Ok(Self(value))
    }
}

/// Query parameter that counts as absent when empty or blank
///
/// Use with `#[serde(default, deserialize_with = "empty_as_none")]`.
pub fn empty_as_none<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: FromStr,
    T::Err: Display,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    match raw.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(value) => value.parse().map(Some).map_err(de::Error::custom),
    }
}

fn rejection_to_error(rejection: JsonRejection) -> ServerError {
    match rejection {
        JsonRejection::JsonDataError(err) => {
            let (field, message) = describe_data_error(&err.body_text());
            ServerError::Validation(FieldErrors::single(&field, message))
        }
        other => ServerError::BadRequest(other.body_text()),
    }
}

/// Field name and message for a serde shape error
///
/// The rejection text looks like `<prefix>annee: invalid type: ...` or
/// `<prefix>missing field `titre` at line 1 column 2`.
fn describe_data_error(text: &str) -> (String, String) {
    let detail = text.strip_prefix(DATA_ERROR_PREFIX).unwrap_or(text);

    if let Some(rest) = detail.strip_prefix("missing field `") {
        if let Some((field, _)) = rest.split_once('`') {
            return (field.to_string(), format!("The {field} field is required."));
        }
    }

    if let Some((path, _)) = detail.split_once(": ") {
        if !path.is_empty() && !path.contains(' ') && path != "." {
            let field = path.rsplit('.').next().unwrap_or(path);
            return (field.to_string(), format!("The {field} field has an invalid type."));
        }
    }

    ("body".to_string(), detail.to_string())
}
