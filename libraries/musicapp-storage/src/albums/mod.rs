use crate::artists;
use crate::query::Conditions;
use crate::rows::{self, ALBUM_FIELDS, ARTIST_FIELDS};
use musicapp_core::{
    error::Result, Album, AlbumFilter, AlbumId, AlbumWithArtist, ArtistId, CatalogError,
    CreateAlbum, Page, PageRequest, UpdateAlbum,
};
use sqlx::{QueryBuilder, Sqlite, SqlitePool};

const SELECT_ALBUM: &str = "SELECT id, title, year, artist_id, created_at, updated_at FROM albums";

fn push_filter(qb: &mut QueryBuilder<'_, Sqlite>, filter: &AlbumFilter) {
    let mut conditions = Conditions::new();
    conditions.contains(qb, "al.title", filter.title.as_deref());
    conditions.equals(qb, "al.year", filter.year.map(i64::from));
    conditions.contains(qb, "ar.name", filter.artist_name.as_deref());
}

async fn check_artist(pool: &SqlitePool, artist_id: ArtistId) -> Result<()> {
    if artists::exists(pool, artist_id).await? {
        Ok(())
    } else {
        Err(CatalogError::invalid_field(
            "artist_id",
            "The selected artist id is invalid.",
        ))
    }
}

/// Filtered page of albums with their artists, oldest first
pub async fn list(
    pool: &SqlitePool,
    filter: &AlbumFilter,
    page: PageRequest,
) -> Result<Page<AlbumWithArtist>> {
    let mut count = QueryBuilder::<Sqlite>::new(
        "SELECT COUNT(*) FROM albums al JOIN artists ar ON ar.id = al.artist_id",
    );
    push_filter(&mut count, filter);
    let total: i64 = count.build_query_scalar().fetch_one(pool).await?;

    let mut select = QueryBuilder::<Sqlite>::new(format!(
        "SELECT {}, {} FROM albums al JOIN artists ar ON ar.id = al.artist_id",
        rows::select_list(ALBUM_FIELDS, "al", "al_"),
        rows::select_list(ARTIST_FIELDS, "ar", "ar_"),
    ));
    push_filter(&mut select, filter);
    select
        .push(" ORDER BY al.id LIMIT ")
        .push_bind(page.limit())
        .push(" OFFSET ")
        .push_bind(page.offset());

    let data = select
        .build()
        .fetch_all(pool)
        .await?
        .iter()
        .map(|row| -> sqlx::Result<AlbumWithArtist> {
            Ok(AlbumWithArtist {
                album: rows::album(row, "al_")?,
                artist: rows::artist(row, "ar_")?,
            })
        })
        .collect::<sqlx::Result<Vec<_>>>()?;

    Ok(Page::new(data, total, page))
}

pub async fn get_by_id(pool: &SqlitePool, id: AlbumId) -> Result<Option<Album>> {
    let album = sqlx::query_as::<_, Album>(&format!("{SELECT_ALBUM} WHERE id = ?"))
        .bind(id)
        .fetch_optional(pool)
        .await?;

    Ok(album)
}

pub async fn exists(pool: &SqlitePool, id: AlbumId) -> Result<bool> {
    let found: Option<i64> = sqlx::query_scalar("SELECT id FROM albums WHERE id = ?")
        .bind(id)
        .fetch_optional(pool)
        .await?;

    Ok(found.is_some())
}

pub async fn get_with_artist(pool: &SqlitePool, id: AlbumId) -> Result<Option<AlbumWithArtist>> {
    let sql = format!(
        "SELECT {}, {} FROM albums al
         JOIN artists ar ON ar.id = al.artist_id
         WHERE al.id = ?",
        rows::select_list(ALBUM_FIELDS, "al", "al_"),
        rows::select_list(ARTIST_FIELDS, "ar", "ar_"),
    );
    let row = sqlx::query(&sql).bind(id).fetch_optional(pool).await?;

    match row {
        Some(row) => Ok(Some(AlbumWithArtist {
            album: rows::album(&row, "al_")?,
            artist: rows::artist(&row, "ar_")?,
        })),
        None => Ok(None),
    }
}

pub async fn create(pool: &SqlitePool, album: CreateAlbum) -> Result<Album> {
    check_artist(pool, album.artist_id).await?;

    let result = sqlx::query("INSERT INTO albums (title, year, artist_id) VALUES (?, ?, ?)")
        .bind(&album.title)
        .bind(album.year)
        .bind(album.artist_id)
        .execute(pool)
        .await?;

    let id = result.last_insert_rowid();

    get_by_id(pool, id)
        .await?
        .ok_or_else(|| CatalogError::storage("Failed to retrieve created album"))
}

/// Apply the supplied fields; an empty update returns the album unchanged
///
/// A missing album is reported before an unknown `artist_id`.
pub async fn update(pool: &SqlitePool, id: AlbumId, update: UpdateAlbum) -> Result<Album> {
    let current = get_by_id(pool, id)
        .await?
        .ok_or_else(|| CatalogError::not_found("Album", id))?;
    if update.is_empty() {
        return Ok(current);
    }
    if let Some(artist_id) = update.artist_id {
        check_artist(pool, artist_id).await?;
    }

    let merged = update.apply(current);
    sqlx::query(
        "UPDATE albums
         SET title = ?, year = ?, artist_id = ?,
             updated_at = strftime('%Y-%m-%dT%H:%M:%fZ', 'now')
         WHERE id = ?",
    )
    .bind(&merged.title)
    .bind(merged.year)
    .bind(merged.artist_id)
    .bind(id)
    .execute(pool)
    .await?;

    get_by_id(pool, id)
        .await?
        .ok_or_else(|| CatalogError::not_found("Album", id))
}

/// Delete an album and its songs
pub async fn delete(pool: &SqlitePool, id: AlbumId) -> Result<()> {
    let result = sqlx::query("DELETE FROM albums WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(CatalogError::not_found("Album", id));
    }

    Ok(())
}
