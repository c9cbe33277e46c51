//! Album types

use super::{Artist, ArtistId, Chanson};
use serde::{Deserialize, Serialize};
use validator::Validate;

pub type AlbumId = i64;

/// An album
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[cfg_attr(feature = "sqlx-support", derive(sqlx::FromRow))]
pub struct Album {
    pub id: AlbumId,
    #[serde(rename = "titre")]
    pub title: String,
    #[serde(rename = "annee")]
    pub year: i32,
    pub artist_id: ArtistId,
    pub created_at: String,
    pub updated_at: String,
}

/// Data for creating a new album
///
/// `artist_id` must reference an existing artist; that check happens in
/// storage since it needs the database.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct CreateAlbum {
    #[serde(rename = "titre", alias = "title")]
    #[validate(length(
        min = 1,
        max = 255,
        message = "The titre field must be between 1 and 255 characters."
    ))]
    pub title: String,
    #[serde(rename = "annee", alias = "year")]
    pub year: i32,
    pub artist_id: ArtistId,
}

/// Partial update of an album; absent fields stay unchanged
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct UpdateAlbum {
    #[serde(default, rename = "titre", alias = "title")]
    #[validate(length(
        min = 1,
        max = 255,
        message = "The titre field must be between 1 and 255 characters."
    ))]
    pub title: Option<String>,
    #[serde(default, rename = "annee", alias = "year")]
    pub year: Option<i32>,
    #[serde(default)]
    pub artist_id: Option<ArtistId>,
}

impl UpdateAlbum {
    /// True when the payload supplies no field at all
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.year.is_none() && self.artist_id.is_none()
    }

    /// Overwrite the supplied fields of `album`, leaving the rest as is
    pub fn apply(self, mut album: Album) -> Album {
        if let Some(title) = self.title {
            album.title = title;
        }
        if let Some(year) = self.year {
            album.year = year;
        }
        if let Some(artist_id) = self.artist_id {
            album.artist_id = artist_id;
        }
        album
    }
}

/// Filters for the album listing
///
/// `title` and `artist_name` are substring matches, `year` is exact.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AlbumFilter {
    pub title: Option<String>,
    pub year: Option<i32>,
    pub artist_name: Option<String>,
}

/// An album with its owning artist
#[derive(Debug, Clone, PartialEq, Serialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct AlbumWithArtist {
    #[serde(flatten)]
    pub album: Album,
    pub artist: Artist,
}

/// An album with its songs
#[derive(Debug, Clone, PartialEq, Serialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct AlbumWithChansons {
    #[serde(flatten)]
    pub album: Album,
    pub chansons: Vec<Chanson>,
}
