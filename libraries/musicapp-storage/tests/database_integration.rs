/// Integration tests for the `StorageContext` implementation
///
/// These tests use REAL SQLite databases (NOT in-memory) to ensure
/// migrations, constraints, and queries work correctly in production.
use musicapp_core::{
    ArtistFilter, CreateAlbum, CreateArtist, CreateChanson, PageRequest, StorageContext,
    UpdateChanson,
};
use musicapp_storage::Database;
use tempfile::TempDir;

/// Helper to create a test database
///
/// Uses a temporary file-based SQLite database (not in-memory)
/// to match production behavior
async fn create_test_db() -> (Database, TempDir) {
    let temp_dir = tempfile::tempdir().unwrap();
    let db_path = temp_dir.path().join("test.db");
    let db_url = format!("sqlite://{}", db_path.display());

    let db = Database::connect(&db_url)
        .await
        .expect("Failed to create test database");

    (db, temp_dir)
}

#[tokio::test]
async fn test_catalog_through_trait_object() {
    let (db, _dir) = create_test_db().await;
    let storage: &dyn StorageContext = &db;

    let artist = storage
        .create_artist(CreateArtist {
            name: "Rachid Taha".to_string(),
            genre: "Rock".to_string(),
            country: "Algérie".to_string(),
        })
        .await
        .unwrap();
    let album = storage
        .create_album(CreateAlbum {
            title: "Diwân".to_string(),
            year: 1998,
            artist_id: artist.id,
        })
        .await
        .unwrap();
    let chanson = storage
        .create_chanson(CreateChanson {
            title: "Ya Rayah".to_string(),
            duration: 4.5,
            album_id: album.id,
        })
        .await
        .unwrap();

    let page = storage
        .list_artists(&ArtistFilter::default(), PageRequest::new(None, None, 10, 100))
        .await
        .unwrap();
    assert_eq!(page.total, 1);

    let tree = storage
        .get_artist_with_albums_and_chansons(artist.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(tree.albums[0].chansons[0], chanson);

    let updated = storage
        .update_chanson(
            chanson.id,
            UpdateChanson {
                duration: Some(5.0),
                ..UpdateChanson::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(updated.title, "Ya Rayah");
    assert_eq!(updated.duration, 5.0);

    storage.delete_artist(artist.id).await.unwrap();
    assert!(storage.get_chanson_with_album(chanson.id).await.unwrap().is_none());
}

#[tokio::test]
async fn test_reconnect_keeps_data_and_migrations_are_idempotent() {
    let temp_dir = tempfile::tempdir().unwrap();
    let db_url = format!("sqlite://{}", temp_dir.path().join("test.db").display());

    let db = Database::connect(&db_url).await.unwrap();
    db.create_artist(CreateArtist {
        name: "Persisted".to_string(),
        genre: "Pop".to_string(),
        country: "France".to_string(),
    })
    .await
    .unwrap();
    db.pool().close().await;

    let reopened = Database::connect(&db_url).await.unwrap();
    let page = reopened
        .list_artists(&ArtistFilter::default(), PageRequest::new(None, None, 10, 100))
        .await
        .unwrap();
    assert_eq!(page.data[0].name, "Persisted");
    assert!(reopened.get_role("admin").await.unwrap().is_some());
}
