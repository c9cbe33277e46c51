//! Common test utilities and fixtures
#![allow(dead_code)]

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    Router,
};
use musicapp_core::{StorageContext, ADMIN_ROLE};
use musicapp_server::{build_router, services::AuthService, state::AppState};
use musicapp_storage::Database;
use serde_json::{json, Value};
use std::sync::Arc;
use tempfile::TempDir;
use tower::util::ServiceExt;

pub const TEST_SECRET: &str = "test-secret-key";
pub const TEST_PASSWORD: &str = "password123";
pub const TEST_MAX_PER_PAGE: i64 = 100;

/// A router over a fresh database in a temp dir
pub struct TestApp {
    pub router: Router,
    pub db: Arc<Database>,
    pub auth_service: Arc<AuthService>,
    _temp_dir: TempDir,
}

impl TestApp {
    pub async fn new() -> Self {
        let temp_dir = TempDir::new().unwrap();
        let url = format!("sqlite://{}", temp_dir.path().join("test.db").display());
        let db = Arc::new(Database::connect(&url).await.unwrap());

        // Lowest bcrypt cost keeps the suite fast
        let auth_service = Arc::new(AuthService::new(TEST_SECRET.to_string(), 1, 4));

        let app_state = AppState::new(db.clone(), auth_service.clone(), TEST_MAX_PER_PAGE);

        Self {
            router: build_router(app_state),
            db,
            auth_service,
            _temp_dir: temp_dir,
        }
    }

    /// Send one request and return status plus parsed JSON body (Null if empty)
    pub async fn send(
        &self,
        method: &str,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }
        let request = match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };

        (status, value)
    }

    pub async fn get(&self, uri: &str) -> (StatusCode, Value) {
        self.send("GET", uri, None, None).await
    }

    /// Register through the API and return the issued token
    pub async fn register(&self, name: &str, email: &str) -> String {
        let (status, body) = self
            .send("POST", "/api/register", None, Some(registration_body(name, email)))
            .await;
        assert_eq!(status, StatusCode::OK, "register failed: {body}");
        body["token"].as_str().unwrap().to_string()
    }

    /// Log in through the API and return the issued token
    pub async fn login(&self, email: &str) -> String {
        let (status, body) = self
            .send(
                "POST",
                "/api/login",
                None,
                Some(json!({ "email": email, "password": TEST_PASSWORD })),
            )
            .await;
        assert_eq!(status, StatusCode::OK, "login failed: {body}");
        body["token"].as_str().unwrap().to_string()
    }

    /// A plain user's token
    pub async fn user_token(&self) -> String {
        self.register("Plain User", "user@example.com").await
    }

    /// An admin's token; the role is granted in storage before logging in
    pub async fn admin_token(&self) -> String {
        self.register("Admin User", "admin@example.com").await;
        let admin = self
            .db
            .find_user_by_email("admin@example.com")
            .await
            .unwrap()
            .unwrap();
        self.db.assign_role(admin.id, ADMIN_ROLE).await.unwrap();
        self.login("admin@example.com").await
    }

    /// Create an artist as admin and return its id
    pub async fn create_artist(&self, token: &str, name: &str, genre: &str, pays: &str) -> i64 {
        let (status, body) = self
            .send(
                "POST",
                "/api/artists",
                Some(token),
                Some(json!({ "name": name, "genre": genre, "pays": pays })),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED, "create artist failed: {body}");
        body["id"].as_i64().unwrap()
    }

    /// Create an album as admin and return its id
    pub async fn create_album(&self, token: &str, titre: &str, annee: i32, artist_id: i64) -> i64 {
        let (status, body) = self
            .send(
                "POST",
                "/api/albums",
                Some(token),
                Some(json!({ "titre": titre, "annee": annee, "artist_id": artist_id })),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED, "create album failed: {body}");
        body["album"]["id"].as_i64().unwrap()
    }

    /// Create a song as admin and return its id
    pub async fn create_chanson(&self, token: &str, titre: &str, duree: f64, album_id: i64) -> i64 {
        let (status, body) = self
            .send(
                "POST",
                "/api/chansons",
                Some(token),
                Some(json!({ "titre": titre, "duree": duree, "album_id": album_id })),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED, "create chanson failed: {body}");
        body["chanson"]["id"].as_i64().unwrap()
    }
}

pub fn registration_body(name: &str, email: &str) -> Value {
    json!({
        "name": name,
        "email": email,
        "password": TEST_PASSWORD,
        "password_confirmation": TEST_PASSWORD,
        "date_of_birth": "1990-05-17",
        "gender": "homme",
    })
}
