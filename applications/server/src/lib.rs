//! MusicApp Server Library
//!
//! REST API over the music catalog: artists, albums and songs, with
//! token authentication and an admin gate on every write.
//!
//! This library exposes the router and its parts for the binary and for tests.

pub mod api;
pub mod config;
pub mod error;
pub mod middleware;
pub mod services;
pub mod state;

// Re-export commonly used types for convenience
pub use config::ServerConfig;
pub use error::{Result, ServerError};
pub use services::auth::AuthService;
pub use state::AppState;

use axum::{
    middleware as axum_middleware,
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, TraceLayer},
};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

/// Build the full application router, mounted under `/api`
///
/// Reads are open. Writes pass `auth_middleware` (401) and then
/// `require_admin` (403) before reaching a handler. The OpenAPI document and
/// Swagger UI are served next to the API, see [`api::docs`].
pub fn build_router(app_state: AppState) -> Router {
    // Public routes (no auth required)
    let public_routes = Router::new()
        .route("/health", get(api::health::health))
        .route("/register", post(api::auth::register))
        .route("/login", post(api::auth::login))
        // Artists
        .route("/show-artists", get(api::artists::list_artists))
        .route("/artists/:id", get(api::artists::get_artist))
        .route("/artists/:id/albums", get(api::artists::get_artist_albums))
        .route(
            "/artists/:id/albums-chansons",
            get(api::artists::get_artist_albums_chansons),
        )
        // Albums
        .route("/albums", get(api::albums::list_albums))
        .route("/albums/:id", get(api::albums::get_album))
        .route("/albums/:id/chansons", get(api::albums::get_album_chansons))
        // Chansons
        .route("/chansons", get(api::chansons::list_chansons))
        .route("/chansons/search", get(api::chansons::search_chansons))
        .route("/chansons/:id", get(api::chansons::get_chanson));

    // Authenticated routes (token required)
    let account_routes = Router::new()
        .route("/logout", post(api::auth::logout))
        .route("/user", get(api::auth::current_user))
        .route_layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            middleware::auth_middleware,
        ));

    // Admin routes (token + admin role required)
    let admin_routes = Router::new()
        .route("/artists", post(api::artists::create_artist))
        .route(
            "/artists/:id",
            axum::routing::put(api::artists::update_artist).delete(api::artists::delete_artist),
        )
        .route("/albums", post(api::albums::create_album))
        .route(
            "/albums/:id",
            axum::routing::put(api::albums::update_album).delete(api::albums::delete_album),
        )
        .route("/chansons", post(api::chansons::create_chanson))
        .route(
            "/chansons/:id",
            axum::routing::put(api::chansons::update_chanson)
                .delete(api::chansons::delete_chanson),
        )
        .route_layer(axum_middleware::from_fn(middleware::require_admin))
        .route_layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            middleware::auth_middleware,
        ));

    // Combine routes
    Router::new()
        .nest(
            "/api",
            public_routes.merge(account_routes).merge(admin_routes),
        )
        .merge(
            SwaggerUi::new(api::docs::DOCS_UI_PATH)
                .url(api::docs::OPENAPI_JSON_PATH, api::docs::ApiDoc::openapi()),
        )
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::default().include_headers(true)),
        )
        .layer(CorsLayer::permissive())
        .with_state(app_state)
}
