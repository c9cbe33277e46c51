/// Album API routes
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
    pagination::ALBUMS_PER_PAGE, Album, AlbumFilter, AlbumWithArtist, Chanson, CreateAlbum, Page,
    PageRequest, StorageContext, UpdateAlbum,
};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

/// Title and artist substring filters, exact year, paging
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ListAlbumsParams {
    #[serde(default, deserialize_with = "empty_as_none")]
    pub titre: Option<String>,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub annee: Option<i32>,
    /// Substring of the artist's name
    #[serde(default, deserialize_with = "empty_as_none")]
    pub artist: Option<String>,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub page: Option<i64>,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub per_page: Option<i64>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct AlbumResponse {
    pub message: String,
    pub album: Album,
}

fn album_not_found() -> ServerError {
    ServerError::NotFound(Album::NOT_FOUND.to_string())
}

/// GET /api/albums - Filtered, paginated albums with their artists
#[utoipa::path(
    get,
    path = "/api/albums",
    tag = "albums",
    params(ListAlbumsParams),
    responses(
        (status = 200, description = "One page of albums", body = Page<AlbumWithArtist>),
        (status = 400, description = "Malformed query", body = ErrorResponse),
    )
)]
pub async fn list_albums(
    State(app_state): State<AppState>,
    ApiQuery(params): ApiQuery<ListAlbumsParams>,
) -> Result<Json<Page<AlbumWithArtist>>> {
    let filter = AlbumFilter {
        title: params.titre,
        year: params.annee,
        artist_name: params.artist,
    };
    let page = PageRequest::new(
        params.page,
        params.per_page,
        ALBUMS_PER_PAGE,
        app_state.max_per_page,
    );

    let albums = app_state.db.list_albums(&filter, page).await?;
    Ok(Json(albums))
}

/// POST /api/albums
#[utoipa::path(
    post,
    path = "/api/albums",
    tag = "albums",
    request_body = CreateAlbum,
    responses(
        (status = 201, description = "Album created", body = AlbumResponse),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
        (status = 403, description = "Not an admin", body = ErrorResponse),
        (status = 422, description = "Invalid fields or unknown artist", body = ErrorResponse),
    ),
    security(("bearerAuth" = []))
)]
pub async fn create_album(
    State(app_state): State<AppState>,
    ValidatedJson(input): ValidatedJson<CreateAlbum>,
) -> Result<(StatusCode, Json<AlbumResponse>)> {
    let album = app_state.db.create_album(input).await?;
    tracing::info!(album_id = album.id, artist_id = album.artist_id, "Album created");

    Ok((
        StatusCode::CREATED,
        Json(AlbumResponse {
            message: "Album created successfully".to_string(),
            album,
        }),
    ))
}

/// GET /api/albums/:id - Album with its artist
#[utoipa::path(
    get,
    path = "/api/albums/{id}",
    tag = "albums",
    params(("id" = i64, Path, description = "Album id")),
    responses(
        (status = 200, description = "The album with its artist", body = AlbumWithArtist),
        (status = 404, description = "Album not found", body = ErrorResponse),
    )
)]
pub async fn get_album(
    State(app_state): State<AppState>,
    EntityId(id, _): EntityId<Album>,
) -> Result<Json<AlbumWithArtist>> {
    let album = app_state
        .db
        .get_album_with_artist(id)
        .await?
        .ok_or_else(album_not_found)?;

    Ok(Json(album))
}

/// PUT /api/albums/:id - Partial update
#[utoipa::path(
    put,
    path = "/api/albums/{id}",
    tag = "albums",
    params(("id" = i64, Path, description = "Album id")),
    request_body = UpdateAlbum,
    responses(
        (status = 200, description = "Album updated", body = AlbumResponse),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
        (status = 403, description = "Not an admin", body = ErrorResponse),
        (status = 404, description = "Album not found", body = ErrorResponse),
        (status = 422, description = "Invalid fields or unknown artist", body = ErrorResponse),
    ),
    security(("bearerAuth" = []))
)]
pub async fn update_album(
    State(app_state): State<AppState>,
    EntityId(id, _): EntityId<Album>,
    ValidatedJson(input): ValidatedJson<UpdateAlbum>,
) -> Result<Json<AlbumResponse>> {
    let album = app_state.db.update_album(id, input).await?;

    Ok(Json(AlbumResponse {
        message: "Album updated successfully".to_string(),
        album,
    }))
}

/// DELETE /api/albums/:id - Removes the album and its songs
#[utoipa::path(
    delete,
    path = "/api/albums/{id}",
    tag = "albums",
    params(("id" = i64, Path, description = "Album id")),
    responses(
        (status = 200, description = "Album deleted", body = MessageResponse),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
        (status = 403, description = "Not an admin", body = ErrorResponse),
        (status = 404, description = "Album not found", body = ErrorResponse),
    ),
    security(("bearerAuth" = []))
)]
pub async fn delete_album(
    State(app_state): State<AppState>,
    EntityId(id, _): EntityId<Album>,
) -> Result<Json<MessageResponse>> {
    app_state.db.delete_album(id).await?;
    tracing::info!(album_id = id, "Album deleted");

    Ok(Json(MessageResponse {
        message: "Album deleted successfully".to_string(),
    }))
}

/// GET /api/albums/:id/chansons
#[utoipa::path(
    get,
    path = "/api/albums/{id}/chansons",
    tag = "albums",
    params(("id" = i64, Path, description = "Album id")),
    responses(
        (status = 200, description = "Songs of the album", body = Vec<Chanson>),
        (status = 404, description = "Album not found", body = ErrorResponse),
    )
)]
pub async fn get_album_chansons(
    State(app_state): State<AppState>,
    EntityId(id, _): EntityId<Album>,
) -> Result<Json<Vec<Chanson>>> {
    let chansons = app_state
        .db
        .get_chansons_by_album(id)
        .await?
        .ok_or_else(album_not_found)?;

    Ok(Json(chansons))
}
