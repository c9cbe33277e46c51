//! Integration tests for artists and albums vertical slices
//!
//! Tests artist and album CRUD operations including:
//! - Filtered listings and pagination metadata
//! - Nested artist → albums → songs fetches
//! - Partial updates and referential checks
//! - Cascading deletes


use musicapp_core::{types::*, CatalogError, PageRequest};
use musicapp_storage::{albums, artists};
use test_helpers::*;

fn page(page: i64, per_page: i64) -> PageRequest {
    PageRequest::new(Some(page), Some(per_page), 10, 100)
}

// ============================================================================
// Artist Tests
// ============================================================================

#[tokio::test]
async fn test_create_and_get_artist() {
    let test_db = TestDb::new().await;
    let pool = test_db.pool();

    let artist = create_test_artist(pool, "Cheb Khaled", "Raï", "Algérie").await;

    assert_eq!(artist.name, "Cheb Khaled");
    assert_eq!(artist.genre, "Raï");
    assert_eq!(artist.country, "Algérie");
    assert!(!artist.created_at.is_empty());

    // Retrieve by ID
    let retrieved = artists::get_by_id(pool, artist.id)
        .await
        .expect("Failed to get artist")
        .expect("Artist not found");

    assert_eq!(retrieved, artist);
}

#[tokio::test]
async fn test_get_missing_artist_is_none() {
    let test_db = TestDb::new().await;

    let missing = artists::get_by_id(test_db.pool(), 999).await.unwrap();
    assert!(missing.is_none());
}

#[tokio::test]
async fn test_list_artists_filters_by_genre_and_pays() {
    let test_db = TestDb::new().await;
    let pool = test_db.pool();

    create_test_artist(pool, "Artist1", "Rap", "Algérie").await;
    create_test_artist(pool, "Artist2", "Rap", "Maroc").await;
    create_test_artist(pool, "Artist3", "Raï", "Algérie").await;

    let filter = ArtistFilter {
        genre: Some("Rap".to_string()),
        country: Some("Algérie".to_string()),
        ..ArtistFilter::default()
    };
    let result = artists::list(pool, &filter, page(1, 10)).await.unwrap();

    assert_eq!(result.total, 1);
    assert_eq!(result.data.len(), 1);
    assert_eq!(result.data[0].name, "Artist1");
}

#[tokio::test]
async fn test_list_artists_filter_is_substring() {
    let test_db = TestDb::new().await;
    let pool = test_db.pool();

    create_test_artist(pool, "John Doe", "Pop", "France").await;
    create_test_artist(pool, "Jane Doe", "Pop", "France").await;
    create_test_artist(pool, "Someone", "Pop", "France").await;

    let filter = ArtistFilter {
        name: Some("Doe".to_string()),
        ..ArtistFilter::default()
    };
    let result = artists::list(pool, &filter, page(1, 10)).await.unwrap();

    let names: Vec<&str> = result.data.iter().map(|a| a.name.as_str()).collect();
    assert_eq!(names, vec!["John Doe", "Jane Doe"]);
}

#[tokio::test]
async fn test_list_artists_wildcards_match_literally() {
    let test_db = TestDb::new().await;
    let pool = test_db.pool();

    create_test_artist(pool, "100% Raï", "Raï", "Algérie").await;
    create_test_artist(pool, "1000 Raï", "Raï", "Algérie").await;

    let filter = ArtistFilter {
        name: Some("100%".to_string()),
        ..ArtistFilter::default()
    };
    let result = artists::list(pool, &filter, page(1, 10)).await.unwrap();

    assert_eq!(result.total, 1);
    assert_eq!(result.data[0].name, "100% Raï");
}

#[tokio::test]
async fn test_list_artists_past_last_page_is_empty() {
    let test_db = TestDb::new().await;
    let pool = test_db.pool();

    for i in 1..=3 {
        create_test_artist(pool, &format!("Artist{i}"), "Rap", "Maroc").await;
    }

    let result = artists::list(pool, &ArtistFilter::default(), page(5, 2))
        .await
        .unwrap();

    assert!(result.data.is_empty());
    assert_eq!(result.total, 3);
    assert_eq!(result.last_page, 2);
    assert_eq!(result.current_page, 5);
}

#[tokio::test]
async fn test_artist_with_albums_and_chansons() {
    let test_db = TestDb::new().await;
    let pool = test_db.pool();

    let artist = create_test_artist(pool, "Souad Massi", "Folk", "Algérie").await;
    for a in 1..=2 {
        let album = create_test_album(pool, &format!("Album{a}"), 2000 + a, artist.id).await;
        for c in 1..=3 {
            create_test_chanson(pool, &format!("Song{a}-{c}"), 3.5, album.id).await;
        }
    }

    let tree = artists::get_with_albums_and_chansons(pool, artist.id)
        .await
        .unwrap()
        .expect("Artist not found");

    assert_eq!(tree.artist, artist);
    assert_eq!(tree.albums.len(), 2);
    for (i, album) in tree.albums.iter().enumerate() {
        assert_eq!(album.album.title, format!("Album{}", i + 1));
        assert_eq!(album.chansons.len(), 3);
        assert!(album.chansons.iter().all(|c| c.album_id == album.album.id));
    }
}

#[tokio::test]
async fn test_artist_without_albums_has_empty_lists() {
    let test_db = TestDb::new().await;
    let pool = test_db.pool();

    let artist = create_test_artist(pool, "Newcomer", "Pop", "Tunisie").await;

    let shallow = artists::get_with_albums(pool, artist.id)
        .await
        .unwrap()
        .expect("Artist not found");
    assert!(shallow.albums.is_empty());

    let deep = artists::get_with_albums_and_chansons(pool, artist.id)
        .await
        .unwrap()
        .expect("Artist not found");
    assert!(deep.albums.is_empty());

    // An album without songs still shows up, with no songs
    create_test_album(pool, "Empty", 2024, artist.id).await;
    let deep = artists::get_with_albums_and_chansons(pool, artist.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(deep.albums.len(), 1);
    assert!(deep.albums[0].chansons.is_empty());
}

#[tokio::test]
async fn test_nested_fetch_of_missing_artist_is_none() {
    let test_db = TestDb::new().await;

    let result = artists::get_with_albums_and_chansons(test_db.pool(), 42)
        .await
        .unwrap();
    assert!(result.is_none());
}

#[tokio::test]
async fn test_update_artist_every_field_subset() {
    let test_db = TestDb::new().await;
    let pool = test_db.pool();

    // Each bit selects one of name, genre, pays
    for mask in 1u8..8 {
        let original = create_test_artist(pool, "Before", "Pop", "France").await;
        let update = UpdateArtist {
            name: (mask & 1 != 0).then(|| "After".to_string()),
            genre: (mask & 2 != 0).then(|| "Rock".to_string()),
            country: (mask & 4 != 0).then(|| "Belgique".to_string()),
        };

        let updated = artists::update(pool, original.id, update).await.unwrap();

        assert_eq!(updated.name, if mask & 1 != 0 { "After" } else { "Before" });
        assert_eq!(updated.genre, if mask & 2 != 0 { "Rock" } else { "Pop" });
        assert_eq!(
            updated.country,
            if mask & 4 != 0 { "Belgique" } else { "France" }
        );
    }
}

#[tokio::test]
async fn test_empty_update_returns_current_artist() {
    let test_db = TestDb::new().await;
    let pool = test_db.pool();

    let artist = create_test_artist(pool, "Stable", "Jazz", "Liban").await;
    let same = artists::update(pool, artist.id, UpdateArtist::default())
        .await
        .unwrap();

    assert_eq!(same, artist);
}

#[tokio::test]
async fn test_update_missing_artist_is_not_found() {
    let test_db = TestDb::new().await;

    let err = artists::update(
        test_db.pool(),
        999,
        UpdateArtist {
            name: Some("Ghost".to_string()),
            ..UpdateArtist::default()
        },
    )
    .await
    .unwrap_err();

    assert!(err.is_not_found());
}

#[tokio::test]
async fn test_delete_artist_cascades() {
    let test_db = TestDb::new().await;
    let pool = test_db.pool();

    let artist = create_test_artist(pool, "Gone", "Rap", "Maroc").await;
    let album = create_test_album(pool, "Last", 2010, artist.id).await;
    create_test_chanson(pool, "Final", 4.0, album.id).await;
    let other = create_test_artist(pool, "Stays", "Rap", "Maroc").await;
    create_test_album(pool, "Kept", 2011, other.id).await;

    artists::delete(pool, artist.id).await.unwrap();

    assert!(artists::get_by_id(pool, artist.id).await.unwrap().is_none());
    assert!(albums::get_by_id(pool, album.id).await.unwrap().is_none());
    assert_eq!(count_rows(pool, "chansons").await, 0);
    assert_eq!(count_rows(pool, "albums").await, 1);

    // Deleting again reports the artist as missing
    assert!(artists::delete(pool, artist.id).await.unwrap_err().is_not_found());
}

// ============================================================================
// Album Tests
// ============================================================================

#[tokio::test]
async fn test_album_pagination_second_page() {
    let test_db = TestDb::new().await;
    let pool = test_db.pool();

    let artist = create_test_artist(pool, "Prolific", "Pop", "France").await;
    for i in 1..=15 {
        create_test_album(pool, &format!("Album{i}"), 2000 + i, artist.id).await;
    }

    let result = albums::list(pool, &AlbumFilter::default(), page(2, 5))
        .await
        .unwrap();

    let titles: Vec<&str> = result.data.iter().map(|a| a.album.title.as_str()).collect();
    assert_eq!(
        titles,
        vec!["Album6", "Album7", "Album8", "Album9", "Album10"]
    );
    assert_eq!(result.current_page, 2);
    assert_eq!(result.per_page, 5);
    assert_eq!(result.last_page, 3);
    assert_eq!(result.total, 15);
    assert!(result.data.iter().all(|a| a.artist.id == artist.id));
}

#[tokio::test]
async fn test_album_filters_combine() {
    let test_db = TestDb::new().await;
    let pool = test_db.pool();

    let khaled = create_test_artist(pool, "Cheb Khaled", "Raï", "Algérie").await;
    let mami = create_test_artist(pool, "Cheb Mami", "Raï", "Algérie").await;
    create_test_album(pool, "Sahra", 1996, khaled.id).await;
    create_test_album(pool, "Kenza", 1999, khaled.id).await;
    create_test_album(pool, "Meli Meli", 1999, mami.id).await;

    let by_year = AlbumFilter {
        year: Some(1999),
        ..AlbumFilter::default()
    };
    let result = albums::list(pool, &by_year, page(1, 5)).await.unwrap();
    assert_eq!(result.total, 2);

    let by_year_and_artist = AlbumFilter {
        year: Some(1999),
        artist_name: Some("Khaled".to_string()),
        ..AlbumFilter::default()
    };
    let result = albums::list(pool, &by_year_and_artist, page(1, 5))
        .await
        .unwrap();
    assert_eq!(result.total, 1);
    assert_eq!(result.data[0].album.title, "Kenza");
    assert_eq!(result.data[0].artist.name, "Cheb Khaled");
}

#[tokio::test]
async fn test_create_album_with_unknown_artist_is_rejected() {
    let test_db = TestDb::new().await;
    let pool = test_db.pool();

    let err = albums::create(
        pool,
        CreateAlbum {
            title: "Orphan".to_string(),
            year: 2020,
            artist_id: 999,
        },
    )
    .await
    .unwrap_err();

    match err {
        CatalogError::Validation(errors) => assert!(errors.get("artist_id").is_some()),
        other => panic!("expected validation error, got {other:?}"),
    }
    assert_eq!(count_rows(pool, "albums").await, 0);
}

#[tokio::test]
async fn test_update_album_every_field_subset() {
    let test_db = TestDb::new().await;
    let pool = test_db.pool();

    let first = create_test_artist(pool, "First", "Pop", "France").await;
    let second = create_test_artist(pool, "Second", "Pop", "France").await;

    for mask in 1u8..8 {
        let original = create_test_album(pool, "Before", 2000, first.id).await;
        let update = UpdateAlbum {
            title: (mask & 1 != 0).then(|| "After".to_string()),
            year: (mask & 2 != 0).then_some(2026),
            artist_id: (mask & 4 != 0).then_some(second.id),
        };

        let updated = albums::update(pool, original.id, update).await.unwrap();

        assert_eq!(updated.title, if mask & 1 != 0 { "After" } else { "Before" });
        assert_eq!(updated.year, if mask & 2 != 0 { 2026 } else { 2000 });
        assert_eq!(
            updated.artist_id,
            if mask & 4 != 0 { second.id } else { first.id }
        );
    }
}

#[tokio::test]
async fn test_update_album_checks_target_before_artist() {
    let test_db = TestDb::new().await;
    let pool = test_db.pool();

    let update = UpdateAlbum {
        artist_id: Some(999),
        ..UpdateAlbum::default()
    };

    // Missing album wins over the unknown artist
    let err = albums::update(pool, 999, update.clone()).await.unwrap_err();
    assert!(err.is_not_found());

    let artist = create_test_artist(pool, "Owner", "Pop", "France").await;
    let album = create_test_album(pool, "Kept", 2001, artist.id).await;
    let err = albums::update(pool, album.id, update).await.unwrap_err();
    assert!(matches!(err, CatalogError::Validation(_)));

    let unchanged = albums::get_by_id(pool, album.id).await.unwrap().unwrap();
    assert_eq!(unchanged.artist_id, artist.id);
}

#[tokio::test]
async fn test_album_with_artist() {
    let test_db = TestDb::new().await;
    let pool = test_db.pool();

    let artist = create_test_artist(pool, "Fairuz", "Classique", "Liban").await;
    let album = create_test_album(pool, "Maarifti Feek", 1987, artist.id).await;

    let found = albums::get_with_artist(pool, album.id)
        .await
        .unwrap()
        .expect("Album not found");

    assert_eq!(found.album, album);
    assert_eq!(found.artist, artist);
    assert!(albums::get_with_artist(pool, 999).await.unwrap().is_none());
}

#[tokio::test]
async fn test_delete_album_removes_its_chansons() {
    let test_db = TestDb::new().await;
    let pool = test_db.pool();

    let artist = create_test_artist(pool, "Owner", "Pop", "France").await;
    let album = create_test_album(pool, "Doomed", 2001, artist.id).await;
    create_test_chanson(pool, "One", 3.0, album.id).await;
    create_test_chanson(pool, "Two", 3.0, album.id).await;

    albums::delete(pool, album.id).await.unwrap();

    assert_eq!(count_rows(pool, "chansons").await, 0);
    assert!(artists::get_by_id(pool, artist.id).await.unwrap().is_some());
}
