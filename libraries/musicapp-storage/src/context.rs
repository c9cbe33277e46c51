use crate::{albums, artists, chansons, roles, tokens, users, StorageError};
use async_trait::async_trait;
use musicapp_core::{error::Result, storage::StorageContext, types::*, Page, PageRequest};
use sqlx::SqlitePool;

/// Local storage context using `SQLite`
#[derive(Clone)]
pub struct LocalStorageContext {
    pool: SqlitePool,
}

impl LocalStorageContext {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Open (creating if missing) and migrate the database at `database_url`
    pub async fn connect(database_url: &str) -> std::result::Result<Self, StorageError> {
        let pool = crate::create_pool(database_url)
            .await
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        crate::run_migrations(&pool).await?;

        Ok(Self::new(pool))
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Round-trip a trivial statement to check the database answers
    pub async fn ping(&self) -> std::result::Result<(), StorageError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}

#[async_trait]
impl StorageContext for LocalStorageContext {
    // Artists
    async fn list_artists(&self, filter: &ArtistFilter, page: PageRequest) -> Result<Page<Artist>> {
        artists::list(&self.pool, filter, page).await
    }

    async fn get_artist(&self, id: ArtistId) -> Result<Option<Artist>> {
        artists::get_by_id(&self.pool, id).await
    }

    async fn get_artist_with_albums(&self, id: ArtistId) -> Result<Option<ArtistWithAlbums>> {
        artists::get_with_albums(&self.pool, id).await
    }

    async fn get_artist_with_albums_and_chansons(
        &self,
        id: ArtistId,
    ) -> Result<Option<ArtistWithAlbums<AlbumWithChansons>>> {
        artists::get_with_albums_and_chansons(&self.pool, id).await
    }

    async fn create_artist(&self, artist: CreateArtist) -> Result<Artist> {
        artists::create(&self.pool, artist).await
    }

    async fn update_artist(&self, id: ArtistId, update: UpdateArtist) -> Result<Artist> {
        artists::update(&self.pool, id, update).await
    }

    async fn delete_artist(&self, id: ArtistId) -> Result<()> {
        artists::delete(&self.pool, id).await
    }

    // Albums
    async fn list_albums(
        &self,
        filter: &AlbumFilter,
        page: PageRequest,
    ) -> Result<Page<AlbumWithArtist>> {
        albums::list(&self.pool, filter, page).await
    }

    async fn get_album(&self, id: AlbumId) -> Result<Option<Album>> {
        albums::get_by_id(&self.pool, id).await
    }

    async fn get_album_with_artist(&self, id: AlbumId) -> Result<Option<AlbumWithArtist>> {
        albums::get_with_artist(&self.pool, id).await
    }

    async fn create_album(&self, album: CreateAlbum) -> Result<Album> {
        albums::create(&self.pool, album).await
    }

    async fn update_album(&self, id: AlbumId, update: UpdateAlbum) -> Result<Album> {
        albums::update(&self.pool, id, update).await
    }

    async fn delete_album(&self, id: AlbumId) -> Result<()> {
        albums::delete(&self.pool, id).await
    }

    // Chansons
    async fn get_all_chansons(&self) -> Result<Vec<ChansonWithAlbum>> {
        chansons::get_all(&self.pool).await
    }

    async fn get_chanson_with_album(&self, id: ChansonId) -> Result<Option<ChansonWithAlbum>> {
        chansons::get_with_album(&self.pool, id).await
    }

    async fn get_chansons_by_album(&self, album_id: AlbumId) -> Result<Option<Vec<Chanson>>> {
        chansons::get_by_album(&self.pool, album_id).await
    }

    async fn search_chansons(&self, query: &str) -> Result<Vec<ChansonWithAlbumArtist>> {
        chansons::search(&self.pool, query).await
    }

    async fn create_chanson(&self, chanson: CreateChanson) -> Result<Chanson> {
        chansons::create(&self.pool, chanson).await
    }

    async fn update_chanson(&self, id: ChansonId, update: UpdateChanson) -> Result<Chanson> {
        chansons::update(&self.pool, id, update).await
    }

    async fn delete_chanson(&self, id: ChansonId) -> Result<()> {
        chansons::delete(&self.pool, id).await
    }

    // Users & roles
    async fn register_user(
        &self,
        user: &RegisterUser,
        password_hash: &str,
        role: &str,
    ) -> Result<UserWithRoles> {
        Ok(users::register(&self.pool, user, password_hash, role).await?)
    }

    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>> {
        Ok(users::find_by_email(&self.pool, email).await?)
    }

    async fn get_user_with_roles(&self, id: UserId) -> Result<Option<UserWithRoles>> {
        Ok(users::get_with_roles(&self.pool, id).await?)
    }

    async fn get_all_users(&self) -> Result<Vec<User>> {
        Ok(users::get_all(&self.pool).await?)
    }

    async fn get_password_hash(&self, id: UserId) -> Result<Option<String>> {
        Ok(users::get_password_hash(&self.pool, id).await?)
    }

    async fn get_role(&self, name: &str) -> Result<Option<Role>> {
        Ok(roles::get_by_name(&self.pool, name).await?)
    }

    async fn assign_role(&self, user_id: UserId, role: &str) -> Result<()> {
        Ok(roles::assign_by_name(&self.pool, user_id, role).await?)
    }

    // Tokens
    async fn revoke_token(&self, jti: &str, expires_at: i64) -> Result<()> {
        Ok(tokens::revoke(&self.pool, jti, expires_at).await?)
    }

    async fn is_token_revoked(&self, jti: &str) -> Result<bool> {
        Ok(tokens::is_revoked(&self.pool, jti).await?)
    }
}
