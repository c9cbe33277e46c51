/// Artist API routes
use crate::{
    api::{empty_as_none, ApiQuery, Entity, EntityId, ValidatedJson},
    error::{ErrorResponse, Result, ServerError},
    state::AppState,
};
use axum::{extract::State, http::StatusCode, Json};
use musicapp_core::{
    pagination::ARTISTS_PER_PAGE, Album, AlbumWithChansons, Artist, ArtistFilter, ArtistWithAlbums,
    CreateArtist, Page, PageRequest, StorageContext, UpdateArtist,
};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

/// Substring filters plus paging; empty values count as absent
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ListArtistsParams {
    #[serde(default, deserialize_with = "empty_as_none")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub genre: Option<String>,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub pays: Option<String>,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub page: Option<i64>,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub per_page: Option<i64>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ArtistResponse {
    pub message: String,
    pub artist: Artist,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct MessageResponse {
    pub message: String,
}

fn artist_not_found() -> ServerError {
    ServerError::NotFound(Artist::NOT_FOUND.to_string())
}

/// GET /api/show-artists - Filtered, paginated artists
#[utoipa::path(
    get,
    path = "/api/show-artists",
    tag = "artists",
    params(ListArtistsParams),
    responses(
        (status = 200, description = "One page of artists", body = Page<Artist>),
        (status = 400, description = "Malformed query", body = ErrorResponse),
    )
)]
pub async fn list_artists(
    State(app_state): State<AppState>,
    ApiQuery(params): ApiQuery<ListArtistsParams>,
) -> Result<Json<Page<Artist>>> {
    let filter = ArtistFilter {
        name: params.name,
        genre: params.genre,
        country: params.pays,
    };
    let page = PageRequest::new(
        params.page,
        params.per_page,
        ARTISTS_PER_PAGE,
        app_state.max_per_page,
    );

    let artists = app_state.db.list_artists(&filter, page).await?;
    Ok(Json(artists))
}

/// POST /api/artists
#[utoipa::path(
    post,
    path = "/api/artists",
    tag = "artists",
    request_body = CreateArtist,
    responses(
        (status = 201, description = "Artist created", body = Artist),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
        (status = 403, description = "Not an admin", body = ErrorResponse),
        (status = 422, description = "Invalid fields", body = ErrorResponse),
    ),
    security(("bearerAuth" = []))
)]
pub async fn create_artist(
    State(app_state): State<AppState>,
    ValidatedJson(input): ValidatedJson<CreateArtist>,
) -> Result<(StatusCode, Json<Artist>)> {
    let artist = app_state.db.create_artist(input).await?;
    tracing::info!(artist_id = artist.id, "Artist created");

    Ok((StatusCode::CREATED, Json(artist)))
}

/// GET /api/artists/:id
#[utoipa::path(
    get,
    path = "/api/artists/{id}",
    tag = "artists",
    params(("id" = i64, Path, description = "Artist id")),
    responses(
        (status = 200, description = "The artist", body = Artist),
        (status = 404, description = "Artist not found", body = ErrorResponse),
    )
)]
pub async fn get_artist(
    State(app_state): State<AppState>,
    EntityId(id, _): EntityId<Artist>,
) -> Result<Json<Artist>> {
    let artist = app_state
        .db
        .get_artist(id)
        .await?
        .ok_or_else(artist_not_found)?;

    Ok(Json(artist))
}

/// PUT /api/artists/:id - Partial update
#[utoipa::path(
    put,
    path = "/api/artists/{id}",
    tag = "artists",
    params(("id" = i64, Path, description = "Artist id")),
    request_body = UpdateArtist,
    responses(
        (status = 200, description = "Artist updated", body = ArtistResponse),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
        (status = 403, description = "Not an admin", body = ErrorResponse),
        (status = 404, description = "Artist not found", body = ErrorResponse),
        (status = 422, description = "Invalid fields", body = ErrorResponse),
    ),
    security(("bearerAuth" = []))
)]
pub async fn update_artist(
    State(app_state): State<AppState>,
    EntityId(id, _): EntityId<Artist>,
    ValidatedJson(input): ValidatedJson<UpdateArtist>,
) -> Result<Json<ArtistResponse>> {
    let artist = app_state.db.update_artist(id, input).await?;

    Ok(Json(ArtistResponse {
        message: "Successfully updated".to_string(),
        artist,
    }))
}

/// DELETE /api/artists/:id - Removes the artist with its albums and songs
#[utoipa::path(
    delete,
    path = "/api/artists/{id}",
    tag = "artists",
    params(("id" = i64, Path, description = "Artist id")),
    responses(
        (status = 200, description = "Artist deleted", body = MessageResponse),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
        (status = 403, description = "Not an admin", body = ErrorResponse),
        (status = 404, description = "Artist not found", body = ErrorResponse),
    ),
    security(("bearerAuth" = []))
)]
pub async fn delete_artist(
    State(app_state): State<AppState>,
    EntityId(id, _): EntityId<Artist>,
) -> Result<Json<MessageResponse>> {
    app_state.db.delete_artist(id).await?;
    tracing::info!(artist_id = id, "Artist deleted");

    Ok(Json(MessageResponse {
        message: "Artist deleted successfully".to_string(),
    }))
}

/// GET /api/artists/:id/albums
#[utoipa::path(
    get,
    path = "/api/artists/{id}/albums",
    tag = "artists",
    params(("id" = i64, Path, description = "Artist id")),
    responses(
        (status = 200, description = "The artist with its albums", body = ArtistWithAlbums<Album>),
        (status = 404, description = "Artist not found", body = ErrorResponse),
    )
)]
pub async fn get_artist_albums(
    State(app_state): State<AppState>,
    EntityId(id, _): EntityId<Artist>,
) -> Result<Json<ArtistWithAlbums>> {
    let artist = app_state
        .db
        .get_artist_with_albums(id)
        .await?
        .ok_or_else(artist_not_found)?;

    Ok(Json(artist))
}

/// GET /api/artists/:id/albums-chansons
#[utoipa::path(
    get,
    path = "/api/artists/{id}/albums-chansons",
    tag = "artists",
    params(("id" = i64, Path, description = "Artist id")),
    responses(
        (
            status = 200,
            description = "The artist with its albums and their songs",
            body = ArtistWithAlbums<AlbumWithChansons>
        ),
        (status = 404, description = "Artist not found", body = ErrorResponse),
    )
)]
pub async fn get_artist_albums_chansons(
    State(app_state): State<AppState>,
    EntityId(id, _): EntityId<Artist>,
) -> Result<Json<ArtistWithAlbums<AlbumWithChansons>>> {
    let artist = app_state
        .db
        .get_artist_with_albums_and_chansons(id)
        .await?
        .ok_or_else(artist_not_found)?;

    Ok(Json(artist))
}
