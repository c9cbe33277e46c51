/// Song ("chanson") API routes
use crate::{
    api::{
        artists::MessageResponse, empty_as_none, ApiQuery, Entity, EntityId,
        ValidatedJson,
    },
    error::{ErrorResponse, Result, ServerError},
    state::AppState,
};
use axum::{extract::State, http::StatusCode, Json};
use musicapp_core::{
    Chanson, ChansonWithAlbum, ChansonWithAlbumArtist, CreateChanson, StorageContext,
    UpdateChanson,
};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct SearchParams {
    /// Substring of the song title or of the artist name
    #[serde(default, deserialize_with = "empty_as_none")]
    pub titre: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ChansonResponse {
    pub message: String,
    pub chanson: Chanson,
}

/// GET /api/chansons - Every song with its album
#[utoipa::path(
    get,
    path = "/api/chansons",
    tag = "chansons",
    responses((status = 200, description = "All songs", body = Vec<ChansonWithAlbum>))
)]
pub async fn list_chansons(
    State(app_state): State<AppState>,
) -> Result<Json<Vec<ChansonWithAlbum>>> {
    let chansons = app_state.db.get_all_chansons().await?;
    Ok(Json(chansons))
}

/// POST /api/chansons
#[utoipa::path(
    post,
    path = "/api/chansons",
    tag = "chansons",
    request_body = CreateChanson,
    responses(
        (status = 201, description = "Chanson created", body = ChansonResponse),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
        (status = 403, description = "Not an admin", body = ErrorResponse),
        (status = 422, description = "Invalid fields or unknown album", body = ErrorResponse),
    ),
    security(("bearerAuth" = []))
)]
pub async fn create_chanson(
    State(app_state): State<AppState>,
    ValidatedJson(input): ValidatedJson<CreateChanson>,
) -> Result<(StatusCode, Json<ChansonResponse>)> {
    let chanson = app_state.db.create_chanson(input).await?;
    tracing::info!(chanson_id = chanson.id, album_id = chanson.album_id, "Chanson created");

    Ok((
        StatusCode::CREATED,
        Json(ChansonResponse {
            message: "Chanson created successfully".to_string(),
            chanson,
        }),
    ))
}

/// GET /api/chansons/search?titre= - Match on song title or artist name
#[utoipa::path(
    get,
    path = "/api/chansons/search",
    tag = "chansons",
    params(SearchParams),
    responses(
        (status = 200, description = "Matching songs", body = Vec<ChansonWithAlbumArtist>),
        (status = 400, description = "No search term", body = ErrorResponse),
    )
)]
pub async fn search_chansons(
    State(app_state): State<AppState>,
    ApiQuery(params): ApiQuery<SearchParams>,
) -> Result<Json<Vec<ChansonWithAlbumArtist>>> {
    let query = params.titre.as_deref().map(str::trim).unwrap_or_default();
    if query.is_empty() {
        return Err(ServerError::BadRequest(
            "Veuillez fournir un titre ou nom d'artiste".to_string(),
        ));
    }

    let results = app_state.db.search_chansons(query).await?;
    Ok(Json(results))
}

/// GET /api/chansons/:id - Song with its album
#[utoipa::path(
    get,
    path = "/api/chansons/{id}",
    tag = "chansons",
    params(("id" = i64, Path, description = "Chanson id")),
    responses(
        (status = 200, description = "The song with its album", body = ChansonWithAlbum),
        (status = 404, description = "Chanson not found", body = ErrorResponse),
    )
)]
pub async fn get_chanson(
    State(app_state): State<AppState>,
    EntityId(id, _): EntityId<Chanson>,
) -> Result<Json<ChansonWithAlbum>> {
    let chanson = app_state
        .db
        .get_chanson_with_album(id)
        .await?
        .ok_or_else(|| ServerError::NotFound(Chanson::NOT_FOUND.to_string()))?;

    Ok(Json(chanson))
}

/// PUT /api/chansons/:id - Partial update
#[utoipa::path(
    put,
    path = "/api/chansons/{id}",
    tag = "chansons",
    params(("id" = i64, Path, description = "Chanson id")),
    request_body = UpdateChanson,
    responses(
        (status = 200, description = "Chanson updated", body = ChansonResponse),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
        (status = 403, description = "Not an admin", body = ErrorResponse),
        (status = 404, description = "Chanson not found", body = ErrorResponse),
        (status = 422, description = "Invalid fields or unknown album", body = ErrorResponse),
    ),
    security(("bearerAuth" = []))
)]
pub async fn update_chanson(
    State(app_state): State<AppState>,
    EntityId(id, _): EntityId<Chanson>,
    ValidatedJson(input): ValidatedJson<UpdateChanson>,
) -> Result<Json<ChansonResponse>> {
    let chanson = app_state.db.update_chanson(id, input).await?;

    Ok(Json(ChansonResponse {
        message: "Chanson updated successfully".to_string(),
        chanson,
    }))
}

/// DELETE /api/chansons/:id
#[utoipa::path(
    delete,
    path = "/api/chansons/{id}",
    tag = "chansons",
    params(("id" = i64, Path, description = "Chanson id")),
    responses(
        (status = 200, description = "Chanson deleted", body = MessageResponse),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
        (status = 403, description = "Not an admin", body = ErrorResponse),
        (status = 404, description = "Chanson not found", body = ErrorResponse),
    ),
    security(("bearerAuth" = []))
)]
pub async fn delete_chanson(
    State(app_state): State<AppState>,
    EntityId(id, _): EntityId<Chanson>,
) -> Result<Json<MessageResponse>> {
    app_state.db.delete_chanson(id).await?;
    tracing::info!(chanson_id = id, "Chanson deleted");

    Ok(Json(MessageResponse {
        message: "Chanson deleted successfully".to_string(),
    }))
}
