//! Song ("chanson") types

use super::{Album, AlbumId, AlbumWithArtist};
use serde::{Deserialize, Serialize};
use validator::Validate;

pub type ChansonId = i64;

/// A song, with its duration in minutes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[cfg_attr(feature = "sqlx-support", derive(sqlx::FromRow))]
pub struct Chanson {
    pub id: ChansonId,
    #[serde(rename = "titre")]
    pub title: String,
    #[serde(rename = "duree")]
    pub duration: f64,
    pub album_id: AlbumId,
    pub created_at: String,
    pub updated_at: String,
}

/// Data for creating a new song
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct CreateChanson {
    #[serde(rename = "titre", alias = "title")]
    #[validate(length(
        min = 1,
        max = 255,
        message = "The titre field must be between 1 and 255 characters."
    ))]
    pub title: String,
    #[serde(rename = "duree", alias = "duration")]
    #[validate(range(min = 0.0, message = "The duree field must be a positive number."))]
    pub duration: f64,
    pub album_id: AlbumId,
}

/// Partial update of a song; absent fields stay unchanged
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct UpdateChanson {
    #[serde(default, rename = "titre", alias = "title")]
    #[validate(length(
        min = 1,
        max = 255,
        message = "The titre field must be between 1 and 255 characters."
    ))]
    pub title: Option<String>,
    #[serde(default, rename = "duree", alias = "duration")]
    #[validate(range(min = 0.0, message = "The duree field must be a positive number."))]
    pub duration: Option<f64>,
    #[serde(default)]
    pub album_id: Option<AlbumId>,
}

impl UpdateChanson {
    /// True when the payload supplies no field at all
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.duration.is_none() && self.album_id.is_none()
    }

    /// Overwrite the supplied fields of `chanson`, leaving the rest as is
    pub fn apply(self, mut chanson: Chanson) -> Chanson {
        if let Some(title) = self.title {
            chanson.title = title;
        }
        if let Some(duration) = self.duration {
            chanson.duration = duration;
        }
        if let Some(album_id) = self.album_id {
            chanson.album_id = album_id;
        }
        chanson
    }
}

/// A song with its album
#[derive(Debug, Clone, PartialEq, Serialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct ChansonWithAlbum {
    #[serde(flatten)]
    pub chanson: Chanson,
    pub album: Album,
}

/// A song with its album and the album's artist, as returned by search
#[derive(Debug, Clone, PartialEq, Serialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct ChansonWithAlbumArtist {
    #[serde(flatten)]
    pub chanson: Chanson,
    pub album: AlbumWithArtist,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn negative_duration_is_rejected() {
        let input = CreateChanson {
            title: "Aïcha".to_string(),
            duration: -1.0,
            album_id: 1,
        };
        let errors = input.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("duration"));
    }

    #[test]
    fn integer_duration_is_accepted() {
        let input: CreateChanson = serde_json::from_value(serde_json::json!({
            "titre": "Aïcha",
            "duree": 4,
            "album_id": 2,
        }))
        .unwrap();
        assert_eq!(input.duration, 4.0);
        assert!(input.validate().is_ok());
    }

    #[test]
    fn null_counts_as_absent_in_updates() {
        let update: UpdateChanson =
            serde_json::from_value(serde_json::json!({ "titre": null })).unwrap();
        assert!(update.is_empty());
    }
}
