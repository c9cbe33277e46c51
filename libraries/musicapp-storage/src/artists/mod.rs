use crate::query::Conditions;
use crate::rows::{self, ALBUM_FIELDS, ARTIST_FIELDS, CHANSON_FIELDS};
use musicapp_core::{
    error::Result, AlbumWithChansons, Artist, ArtistFilter, ArtistId, ArtistWithAlbums,
    CatalogError, CreateArtist, Page, PageRequest, UpdateArtist,
};
use sqlx::{QueryBuilder, Sqlite, SqlitePool};

const SELECT_ARTIST: &str = "SELECT id, name, genre, country, created_at, updated_at FROM artists";

fn push_filter(qb: &mut QueryBuilder<'_, Sqlite>, filter: &ArtistFilter) {
    let mut conditions = Conditions::new();
    conditions.contains(qb, "name", filter.name.as_deref());
    conditions.contains(qb, "genre", filter.genre.as_deref());
    conditions.contains(qb, "country", filter.country.as_deref());
}

/// Filtered page of artists, oldest first
pub async fn list(
    pool: &SqlitePool,
    filter: &ArtistFilter,
    page: PageRequest,
) -> Result<Page<Artist>> {
    let mut count = QueryBuilder::<Sqlite>::new("SELECT COUNT(*) FROM artists");
    push_filter(&mut count, filter);
    let total: i64 = count.build_query_scalar().fetch_one(pool).await?;

    let mut select = QueryBuilder::<Sqlite>::new(SELECT_ARTIST);
    push_filter(&mut select, filter);
    select
        .push(" ORDER BY id LIMIT ")
        .push_bind(page.limit())
        .push(" OFFSET ")
        .push_bind(page.offset());
    let data = select
        .build_query_as::<Artist>()
        .fetch_all(pool)
        .await?;

    Ok(Page::new(data, total, page))
}

pub async fn get_by_id(pool: &SqlitePool, id: ArtistId) -> Result<Option<Artist>> {
    let artist = sqlx::query_as::<_, Artist>(&format!("{SELECT_ARTIST} WHERE id = ?"))
        .bind(id)
        .fetch_optional(pool)
        .await?;

    Ok(artist)
}

pub async fn exists(pool: &SqlitePool, id: ArtistId) -> Result<bool> {
    let found: Option<i64> = sqlx::query_scalar("SELECT id FROM artists WHERE id = ?")
        .bind(id)
        .fetch_optional(pool)
        .await?;

    Ok(found.is_some())
}

/// Artist with its albums, from one joined fetch
pub async fn get_with_albums(pool: &SqlitePool, id: ArtistId) -> Result<Option<ArtistWithAlbums>> {
    let sql = format!(
        "SELECT {}, {} FROM artists ar
         LEFT JOIN albums al ON al.artist_id = ar.id
         WHERE ar.id = ?
         ORDER BY al.id",
        rows::select_list(ARTIST_FIELDS, "ar", "ar_"),
        rows::select_list(ALBUM_FIELDS, "al", "al_"),
    );
    let fetched = sqlx::query(&sql).bind(id).fetch_all(pool).await?;

    let Some(first) = fetched.first() else {
        return Ok(None);
    };
    let mut result = ArtistWithAlbums {
        artist: rows::artist(first, "ar_")?,
        albums: Vec::new(),
    };
    for row in &fetched {
        if let Some(album) = rows::optional_album(row, "al_")? {
            result.albums.push(album);
        }
    }

    Ok(Some(result))
}

/// Artist with its albums and each album's songs, from one joined fetch
pub async fn get_with_albums_and_chansons(
    pool: &SqlitePool,
    id: ArtistId,
) -> Result<Option<ArtistWithAlbums<AlbumWithChansons>>> {
    let sql = format!(
        "SELECT {}, {}, {} FROM artists ar
         LEFT JOIN albums al ON al.artist_id = ar.id
         LEFT JOIN chansons c ON c.album_id = al.id
         WHERE ar.id = ?
         ORDER BY al.id, c.id",
        rows::select_list(ARTIST_FIELDS, "ar", "ar_"),
        rows::select_list(ALBUM_FIELDS, "al", "al_"),
        rows::select_list(CHANSON_FIELDS, "c", "c_"),
    );
    let fetched = sqlx::query(&sql).bind(id).fetch_all(pool).await?;

    let Some(first) = fetched.first() else {
        return Ok(None);
    };
    let mut result = ArtistWithAlbums {
        artist: rows::artist(first, "ar_")?,
        albums: Vec::<AlbumWithChansons>::new(),
    };
    // Rows arrive grouped by album, so a new album id starts a new group
    for row in &fetched {
        let Some(album) = rows::optional_album(row, "al_")? else {
            continue;
        };
        if result.albums.last().map(|a| a.album.id) != Some(album.id) {
            result.albums.push(AlbumWithChansons {
                album,
                chansons: Vec::new(),
            });
        }
        if let (Some(chanson), Some(group)) =
            (rows::optional_chanson(row, "c_")?, result.albums.last_mut())
        {
            group.chansons.push(chanson);
        }
    }

    Ok(Some(result))
}

pub async fn create(pool: &SqlitePool, artist: CreateArtist) -> Result<Artist> {
    let result = sqlx::query("INSERT INTO artists (name, genre, country) VALUES (?, ?, ?)")
        .bind(&artist.name)
        .bind(&artist.genre)
        .bind(&artist.country)
        .execute(pool)
        .await?;

    let id = result.last_insert_rowid();

    get_by_id(pool, id)
        .await?
        .ok_or_else(|| CatalogError::storage("Failed to retrieve created artist"))
}

/// Apply the supplied fields; an empty update returns the artist unchanged
pub async fn update(pool: &SqlitePool, id: ArtistId, update: UpdateArtist) -> Result<Artist> {
    let current = get_by_id(pool, id)
        .await?
        .ok_or_else(|| CatalogError::not_found("Artist", id))?;
    if update.is_empty() {
        return Ok(current);
    }

    let merged = update.apply(current);
    sqlx::query(
        "UPDATE artists
         SET name = ?, genre = ?, country = ?,
             updated_at = strftime('%Y-%m-%dT%H:%M:%fZ', 'now')
         WHERE id = ?",
    )
    .bind(&merged.name)
    .bind(&merged.genre)
    .bind(&merged.country)
    .bind(id)
    .execute(pool)
    .await?;

    get_by_id(pool, id)
        .await?
        .ok_or_else(|| CatalogError::not_found("Artist", id))
}

/// Delete an artist; its albums and their songs go with it
pub async fn delete(pool: &SqlitePool, id: ArtistId) -> Result<()> {
    let result = sqlx::query("DELETE FROM artists WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(CatalogError::not_found("Artist", id));
    }

    Ok(())
}
