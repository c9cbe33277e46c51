//! Storage trait for the catalog

use crate::error::Result;
use crate::pagination::{Page, PageRequest};
use crate::types::{
    Album, AlbumFilter, AlbumId, AlbumWithArtist, AlbumWithChansons, Artist, ArtistFilter,
    ArtistId, ArtistWithAlbums, Chanson, ChansonId, ChansonWithAlbum, ChansonWithAlbumArtist,
    CreateAlbum, CreateArtist, CreateChanson, RegisterUser, Role, UpdateAlbum, UpdateArtist,
    UpdateChanson, User, UserId, UserWithRoles,
};
use async_trait::async_trait;

/// Storage context providing access to catalog and account operations
///
/// Every method is one request-scoped unit of work. Nested reads
/// (`*_with_*`) resolve their whole graph in a single fetch.
///
/// Mutations return [`CatalogError::NotFound`](crate::CatalogError::NotFound)
/// when the target does not exist and
/// [`CatalogError::Validation`](crate::CatalogError::Validation) when a
/// referenced parent does not exist.
#[async_trait]
pub trait StorageContext: Send + Sync {
    // ========================================================================
    // Artists
    // ========================================================================

    /// Filtered, paginated artist listing in creation order
    async fn list_artists(&self, filter: &ArtistFilter, page: PageRequest) -> Result<Page<Artist>>;

    /// Get artist by ID
    async fn get_artist(&self, id: ArtistId) -> Result<Option<Artist>>;

    /// Get artist with its albums
    async fn get_artist_with_albums(&self, id: ArtistId) -> Result<Option<ArtistWithAlbums>>;

    /// Get artist with its albums and every album's songs
    async fn get_artist_with_albums_and_chansons(
        &self,
        id: ArtistId,
    ) -> Result<Option<ArtistWithAlbums<AlbumWithChansons>>>;

    /// Create a new artist
    async fn create_artist(&self, artist: CreateArtist) -> Result<Artist>;

    /// Apply a partial update and return the refreshed artist
    async fn update_artist(&self, id: ArtistId, update: UpdateArtist) -> Result<Artist>;

    /// Delete an artist together with its albums and songs
    async fn delete_artist(&self, id: ArtistId) -> Result<()>;

    // ========================================================================
    // Albums
    // ========================================================================

    /// Filtered, paginated album listing with each album's artist
    async fn list_albums(
        &self,
        filter: &AlbumFilter,
        page: PageRequest,
    ) -> Result<Page<AlbumWithArtist>>;

    /// Get album by ID
    async fn get_album(&self, id: AlbumId) -> Result<Option<Album>>;

    /// Get album with its owning artist
    async fn get_album_with_artist(&self, id: AlbumId) -> Result<Option<AlbumWithArtist>>;

    /// Create a new album
    async fn create_album(&self, album: CreateAlbum) -> Result<Album>;

    /// Apply a partial update and return the refreshed album
    async fn update_album(&self, id: AlbumId, update: UpdateAlbum) -> Result<Album>;

    /// Delete an album together with its songs
    async fn delete_album(&self, id: AlbumId) -> Result<()>;

    // ========================================================================
    // Chansons
    // ========================================================================

    /// Every song with its album, unpaginated
    async fn get_all_chansons(&self) -> Result<Vec<ChansonWithAlbum>>;

    /// Get song with its album
    async fn get_chanson_with_album(&self, id: ChansonId) -> Result<Option<ChansonWithAlbum>>;

    /// Songs of an album; `None` when the album does not exist
    async fn get_chansons_by_album(&self, album_id: AlbumId) -> Result<Option<Vec<Chanson>>>;

    /// Songs whose title or whose album's artist name contains `query`
    async fn search_chansons(&self, query: &str) -> Result<Vec<ChansonWithAlbumArtist>>;

    /// Create a new song
    async fn create_chanson(&self, chanson: CreateChanson) -> Result<Chanson>;

    /// Apply a partial update and return the refreshed song
    async fn update_chanson(&self, id: ChansonId, update: UpdateChanson) -> Result<Chanson>;

    /// Delete a song
    async fn delete_chanson(&self, id: ChansonId) -> Result<()>;

    // ========================================================================
    // Users & roles
    // ========================================================================

    /// Create a user with credentials and assign `role` atomically
    async fn register_user(
        &self,
        user: &RegisterUser,
        password_hash: &str,
        role: &str,
    ) -> Result<UserWithRoles>;

    /// Find a user by login email
    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>>;

    /// Get a user with roles
    async fn get_user_with_roles(&self, id: UserId) -> Result<Option<UserWithRoles>>;

    /// Get all users
    async fn get_all_users(&self) -> Result<Vec<User>>;

    /// Get the stored password hash for a user
    async fn get_password_hash(&self, id: UserId) -> Result<Option<String>>;

    /// Get a role by its unique name
    async fn get_role(&self, name: &str) -> Result<Option<Role>>;

    /// Assign an existing role to a user; assigning twice is a no-op
    async fn assign_role(&self, user_id: UserId, role: &str) -> Result<()>;

    // ========================================================================
    // Tokens
    // ========================================================================

    /// Revoke a token identifier until its expiry (unix seconds)
    async fn revoke_token(&self, jti: &str, expires_at: i64) -> Result<()>;

    /// Check whether a token identifier was revoked
    async fn is_token_revoked(&self, jti: &str) -> Result<bool>;
}
