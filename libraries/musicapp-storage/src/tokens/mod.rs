//! Revoked access tokens

use crate::StorageError;
use sqlx::SqlitePool;

type Result<T> = std::result::Result<T, StorageError>;

/// Record `jti` as revoked until `expires_at` (unix seconds)
///
/// Entries whose token has expired on its own are pruned here too.
pub async fn revoke(pool: &SqlitePool, jti: &str, expires_at: i64) -> Result<()> {
    let now = chrono::Utc::now().timestamp();

    sqlx::query("DELETE FROM revoked_tokens WHERE expires_at < ?")
        .bind(now)
        .execute(pool)
        .await?;

    sqlx::query("INSERT OR IGNORE INTO revoked_tokens (jti, expires_at) VALUES (?, ?)")
        .bind(jti)
        .bind(expires_at)
        .execute(pool)
        .await?;

    Ok(())
}

pub async fn is_revoked(pool: &SqlitePool, jti: &str) -> Result<bool> {
    let found: Option<String> = sqlx::query_scalar("SELECT jti FROM revoked_tokens WHERE jti = ?")
        .bind(jti)
        .fetch_optional(pool)
        .await?;

    Ok(found.is_some())
}
