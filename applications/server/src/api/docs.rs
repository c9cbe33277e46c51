//! OpenAPI document for the whole API
//!
//! The JSON document is served at [`OPENAPI_JSON_PATH`] and browsed through
//! Swagger UI at [`DOCS_UI_PATH`].

use crate::{
    api::{albums, artists, auth, chansons, health},
    error::ErrorResponse,
};
use utoipa::{
    openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
    Modify, OpenApi,
};

/// Where Swagger UI is mounted
pub const DOCS_UI_PATH: &str = "/api/documentation";

/// Where the generated document is served
pub const OPENAPI_JSON_PATH: &str = "/api/docs/openapi.json";

#[derive(OpenApi)]
#[openapi(
    info(
        title = "MusicApp API",
        version = "1.0.0",
        description = "Documentation de l'API MusicApp (auth, artistes, albums, chansons)."
    ),
    paths(
        health::health,
        auth::register,
        auth::login,
        auth::logout,
        auth::current_user,
        artists::list_artists,
        artists::create_artist,
        artists::get_artist,
        artists::update_artist,
        artists::delete_artist,
        artists::get_artist_albums,
        artists::get_artist_albums_chansons,
        albums::list_albums,
        albums::create_album,
        albums::get_album,
        albums::update_album,
        albums::delete_album,
        albums::get_album_chansons,
        chansons::list_chansons,
        chansons::create_chanson,
        chansons::search_chansons,
        chansons::get_chanson,
        chansons::update_chanson,
        chansons::delete_chanson,
    ),
    components(schemas(ErrorResponse, artists::MessageResponse)),
    modifiers(&BearerAuth),
    tags(
        (name = "auth", description = "Accounts and tokens"),
        (name = "artists", description = "Artists"),
        (name = "albums", description = "Albums"),
        (name = "chansons", description = "Songs"),
        (name = "health", description = "Liveness"),
    )
)]
pub struct ApiDoc;

/// Registers the `bearerAuth` scheme the write routes refer to
struct BearerAuth;

impl Modify for BearerAuth {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearerAuth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .description(Some("Token from /api/login or /api/register"))
                        .build(),
                ),
            );
        }
    }
}
