//! Artist types

use super::Album;
use serde::{Deserialize, Serialize};
use validator::Validate;

pub type ArtistId = i64;

/// An artist
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[cfg_attr(feature = "sqlx-support", derive(sqlx::FromRow))]
pub struct Artist {
    pub id: ArtistId,
    pub name: String,
    pub genre: String,
    #[serde(rename = "pays")]
    pub country: String,
    pub created_at: String,
    pub updated_at: String,
}

/// Data for creating a new artist
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct CreateArtist {
    #[validate(length(
        min = 1,
        max = 255,
        message = "The name field must be between 1 and 255 characters."
    ))]
    pub name: String,
    #[validate(length(
        min = 1,
        max = 255,
        message = "The genre field must be between 1 and 255 characters."
    ))]
    pub genre: String,
    #[serde(rename = "pays", alias = "country")]
    #[validate(length(
        min = 1,
        max = 255,
        message = "The pays field must be between 1 and 255 characters."
    ))]
    pub country: String,
}

/// Partial update of an artist; absent fields stay unchanged
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct UpdateArtist {
    #[serde(default)]
    #[validate(length(
        min = 1,
        max = 255,
        message = "The name field must be between 1 and 255 characters."
    ))]
    pub name: Option<String>,
    #[serde(default)]
    #[validate(length(
        min = 1,
        max = 255,
        message = "The genre field must be between 1 and 255 characters."
    ))]
    pub genre: Option<String>,
    #[serde(default, rename = "pays", alias = "country")]
    #[validate(length(
        min = 1,
        max = 255,
        message = "The pays field must be between 1 and 255 characters."
    ))]
    pub country: Option<String>,
}

impl UpdateArtist {
    /// True when the payload supplies no field at all
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.genre.is_none() && self.country.is_none()
    }

    /// Overwrite the supplied fields of `artist`, leaving the rest as is
    pub fn apply(self, mut artist: Artist) -> Artist {
        if let Some(name) = self.name {
            artist.name = name;
        }
        if let Some(genre) = self.genre {
            artist.genre = genre;
        }
        if let Some(country) = self.country {
            artist.country = country;
        }
        artist
    }
}

/// Filters for the artist listing; every filter is a substring match
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ArtistFilter {
    pub name: Option<String>,
    pub genre: Option<String>,
    pub country: Option<String>,
}

/// An artist with its albums loaded in the same fetch
///
/// `A` is [`Album`] for the shallow view and
/// [`AlbumWithChansons`](super::AlbumWithChansons) for the full tree.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct ArtistWithAlbums<A = Album> {
    #[serde(flatten)]
    pub artist: Artist,
    pub albums: Vec<A>,
}
