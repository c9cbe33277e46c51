//! Column lists and row decoders for joined queries
//!
//! Joined queries select each table's columns under a distinct prefix
//! (`ar_`, `al_`, `c_`) so one row can carry an artist, an album and a song.

use musicapp_core::{Album, Artist, Chanson};
use sqlx::sqlite::SqliteRow;
use sqlx::Row;

pub(crate) const ARTIST_FIELDS: &[&str] =
    &["id", "name", "genre", "country", "created_at", "updated_at"];

pub(crate) const ALBUM_FIELDS: &[&str] =
    &["id", "title", "year", "artist_id", "created_at", "updated_at"];

pub(crate) const CHANSON_FIELDS: &[&str] =
    &["id", "title", "duration", "album_id", "created_at", "updated_at"];

/// `alias.field AS prefixfield, ...` for a table alias
pub(crate) fn select_list(fields: &[&str], alias: &str, prefix: &str) -> String {
    fields
        .iter()
        .map(|f| format!("{alias}.{f} AS {prefix}{f}"))
        .collect::<Vec<_>>()
        .join(", ")
}

fn column(prefix: &str, field: &str) -> String {
    format!("{prefix}{field}")
}

pub(crate) fn artist(row: &SqliteRow, prefix: &str) -> sqlx::Result<Artist> {
    Ok(Artist {
        id: row.try_get(column(prefix, "id").as_str())?,
        name: row.try_get(column(prefix, "name").as_str())?,
        genre: row.try_get(column(prefix, "genre").as_str())?,
        country: row.try_get(column(prefix, "country").as_str())?,
        created_at: row.try_get(column(prefix, "created_at").as_str())?,
        updated_at: row.try_get(column(prefix, "updated_at").as_str())?,
    })
}

/// Decode an album, or `None` when a `LEFT JOIN` found no album
pub(crate) fn optional_album(row: &SqliteRow, prefix: &str) -> sqlx::Result<Option<Album>> {
    let id: Option<i64> = row.try_get(column(prefix, "id").as_str())?;
    let Some(id) = id else {
        return Ok(None);
    };
    Ok(Some(Album {
        id,
        title: row.try_get(column(prefix, "title").as_str())?,
        year: row.try_get(column(prefix, "year").as_str())?,
        artist_id: row.try_get(column(prefix, "artist_id").as_str())?,
        created_at: row.try_get(column(prefix, "created_at").as_str())?,
        updated_at: row.try_get(column(prefix, "updated_at").as_str())?,
    }))
}

pub(crate) fn album(row: &SqliteRow, prefix: &str) -> sqlx::Result<Album> {
    optional_album(row, prefix)?.ok_or_else(|| sqlx::Error::ColumnDecode {
        index: column(prefix, "id"),
        source: "unexpected NULL album".into(),
    })
}

/// Decode a song, or `None` when a `LEFT JOIN` found no song
pub(crate) fn optional_chanson(row: &SqliteRow, prefix: &str) -> sqlx::Result<Option<Chanson>> {
    let id: Option<i64> = row.try_get(column(prefix, "id").as_str())?;
    let Some(id) = id else {
        return Ok(None);
    };
    Ok(Some(Chanson {
        id,
        title: row.try_get(column(prefix, "title").as_str())?,
        duration: row.try_get(column(prefix, "duration").as_str())?,
        album_id: row.try_get(column(prefix, "album_id").as_str())?,
        created_at: row.try_get(column(prefix, "created_at").as_str())?,
        updated_at: row.try_get(column(prefix, "updated_at").as_str())?,
    }))
}

pub(crate) fn chanson(row: &SqliteRow, prefix: &str) -> sqlx::Result<Chanson> {
    optional_chanson(row, prefix)?.ok_or_else(|| sqlx::Error::ColumnDecode {
        index: column(prefix, "id"),
        source: "unexpected NULL chanson".into(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn select_list_prefixes_every_field() {
        assert_eq!(
            select_list(&["id", "name"], "ar", "ar_"),
            "ar.id AS ar_id, ar.name AS ar_name"
        );
    }
}
