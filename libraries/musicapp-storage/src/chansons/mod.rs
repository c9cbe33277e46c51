use crate::albums;
use crate::query::contains_pattern;
use crate::rows::{self, ALBUM_FIELDS, ARTIST_FIELDS, CHANSON_FIELDS};
use musicapp_core::{
    error::Result, AlbumId, AlbumWithArtist, CatalogError, Chanson, ChansonId, ChansonWithAlbum,
    ChansonWithAlbumArtist, CreateChanson, UpdateChanson,
};
use sqlx::{QueryBuilder, Sqlite, SqlitePool};

const SELECT_CHANSON: &str =
    "SELECT id, title, duration, album_id, created_at, updated_at FROM chansons";

async fn check_album(pool: &SqlitePool, album_id: AlbumId) -> Result<()> {
    if albums::exists(pool, album_id).await? {
        Ok(())
    } else {
        Err(CatalogError::invalid_field(
            "album_id",
            "The selected album id is invalid.",
        ))
    }
}

fn with_album_sql(tail: &str) -> String {
    format!(
        "SELECT {}, {} FROM chansons c JOIN albums al ON al.id = c.album_id {tail}",
        rows::select_list(CHANSON_FIELDS, "c", "c_"),
        rows::select_list(ALBUM_FIELDS, "al", "al_"),
    )
}

/// Every song with its album
pub async fn get_all(pool: &SqlitePool) -> Result<Vec<ChansonWithAlbum>> {
    let fetched = sqlx::query(&with_album_sql("ORDER BY c.id"))
        .fetch_all(pool)
        .await?;

    let chansons = fetched
        .iter()
        .map(|row| -> sqlx::Result<ChansonWithAlbum> {
            Ok(ChansonWithAlbum {
                chanson: rows::chanson(row, "c_")?,
                album: rows::album(row, "al_")?,
            })
        })
        .collect::<sqlx::Result<Vec<_>>>()?;

    Ok(chansons)
}

pub async fn get_by_id(pool: &SqlitePool, id: ChansonId) -> Result<Option<Chanson>> {
    let chanson = sqlx::query_as::<_, Chanson>(&format!("{SELECT_CHANSON} WHERE id = ?"))
        .bind(id)
        .fetch_optional(pool)
        .await?;

    Ok(chanson)
}

pub async fn get_with_album(pool: &SqlitePool, id: ChansonId) -> Result<Option<ChansonWithAlbum>> {
    let row = sqlx::query(&with_album_sql("WHERE c.id = ?"))
        .bind(id)
        .fetch_optional(pool)
        .await?;

    match row {
        Some(row) => Ok(Some(ChansonWithAlbum {
            chanson: rows::chanson(&row, "c_")?,
            album: rows::album(&row, "al_")?,
        })),
        None => Ok(None),
    }
}

/// Songs of one album; `None` when the album itself does not exist
pub async fn get_by_album(pool: &SqlitePool, album_id: AlbumId) -> Result<Option<Vec<Chanson>>> {
    let sql = format!(
        "SELECT {} FROM albums al
         LEFT JOIN chansons c ON c.album_id = al.id
         WHERE al.id = ?
         ORDER BY c.id",
        rows::select_list(CHANSON_FIELDS, "c", "c_"),
    );
    let fetched = sqlx::query(&sql).bind(album_id).fetch_all(pool).await?;

    // An existing album yields at least one row, with NULL song columns when empty
    if fetched.is_empty() {
        return Ok(None);
    }

    let mut chansons = Vec::with_capacity(fetched.len());
    for row in &fetched {
        if let Some(chanson) = rows::optional_chanson(row, "c_")? {
            chansons.push(chanson);
        }
    }

    Ok(Some(chansons))
}

/// Songs whose title, or whose album's artist name, contains `query`
///
/// Each song appears at most once, ordered by id.
pub async fn search(pool: &SqlitePool, query: &str) -> Result<Vec<ChansonWithAlbumArtist>> {
    let pattern = contains_pattern(query);
    let mut qb = QueryBuilder::<Sqlite>::new(format!(
        "SELECT DISTINCT {}, {}, {} FROM chansons c
         JOIN albums al ON al.id = c.album_id
         JOIN artists ar ON ar.id = al.artist_id
         WHERE c.title LIKE ",
        rows::select_list(CHANSON_FIELDS, "c", "c_"),
        rows::select_list(ALBUM_FIELDS, "al", "al_"),
        rows::select_list(ARTIST_FIELDS, "ar", "ar_"),
    ));
    qb.push_bind(pattern.clone())
        .push(" ESCAPE '\\' OR ar.name LIKE ")
        .push_bind(pattern)
        .push(" ESCAPE '\\' ORDER BY c.id");

    let results = qb
        .build()
        .fetch_all(pool)
        .await?
        .iter()
        .map(|row| -> sqlx::Result<ChansonWithAlbumArtist> {
            Ok(ChansonWithAlbumArtist {
                chanson: rows::chanson(row, "c_")?,
                album: AlbumWithArtist {
                    album: rows::album(row, "al_")?,
                    artist: rows::artist(row, "ar_")?,
                },
            })
        })
        .collect::<sqlx::Result<Vec<_>>>()?;

    Ok(results)
}

pub async fn create(pool: &SqlitePool, chanson: CreateChanson) -> Result<Chanson> {
    check_album(pool, chanson.album_id).await?;

    let result = sqlx::query("INSERT INTO chansons (title, duration, album_id) VALUES (?, ?, ?)")
        .bind(&chanson.title)
        .bind(chanson.duration)
        .bind(chanson.album_id)
        .execute(pool)
        .await?;

    let id = result.last_insert_rowid();

    get_by_id(pool, id)
        .await?
        .ok_or_else(|| CatalogError::storage("Failed to retrieve created chanson"))
}

/// Apply the supplied fields; an empty update returns the song unchanged
pub async fn update(pool: &SqlitePool, id: ChansonId, update: UpdateChanson) -> Result<Chanson> {
    let current = get_by_id(pool, id)
        .await?
        .ok_or_else(|| CatalogError::not_found("Chanson", id))?;
    if update.is_empty() {
        return Ok(current);
    }
    if let Some(album_id) = update.album_id {
        check_album(pool, album_id).await?;
    }

    let merged = update.apply(current);
    sqlx::query(
        "UPDATE chansons
         SET title = ?, duration = ?, album_id = ?,
             updated_at = strftime('%Y-%m-%dT%H:%M:%fZ', 'now')
         WHERE id = ?",
    )
    .bind(&merged.title)
    .bind(merged.duration)
    .bind(merged.album_id)
    .bind(id)
    .execute(pool)
    .await?;

    get_by_id(pool, id)
        .await?
        .ok_or_else(|| CatalogError::not_found("Chanson", id))
}

pub async fn delete(pool: &SqlitePool, id: ChansonId) -> Result<()> {
    let result = sqlx::query("DELETE FROM chansons WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(CatalogError::not_found("Chanson", id));
    }

    Ok(())
}
