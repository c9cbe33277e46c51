//! Role lookups and assignments

use crate::StorageError;
use musicapp_core::{CatalogError, Role, UserId};
use sqlx::{SqliteExecutor, SqlitePool};

type Result<T> = std::result::Result<T, StorageError>;

const SELECT_ROLE: &str = "SELECT id, name, display_name, description FROM roles";

pub async fn get_by_name<'e, E>(executor: E, name: &str) -> Result<Option<Role>>
where
    E: SqliteExecutor<'e>,
{
    let role = sqlx::query_as::<_, Role>(&format!("{SELECT_ROLE} WHERE name = ?"))
        .bind(name)
        .fetch_optional(executor)
        .await?;

    Ok(role)
}

pub async fn get_all(pool: &SqlitePool) -> Result<Vec<Role>> {
    let roles = sqlx::query_as::<_, Role>(&format!("{SELECT_ROLE} ORDER BY id"))
        .fetch_all(pool)
        .await?;

    Ok(roles)
}

/// Roles assigned to a user
pub async fn get_for_user<'e, E>(executor: E, user_id: UserId) -> Result<Vec<Role>>
where
    E: SqliteExecutor<'e>,
{
    let roles = sqlx::query_as::<_, Role>(
        "SELECT r.id, r.name, r.display_name, r.description
         FROM roles r
         JOIN role_user ru ON ru.role_id = r.id
         WHERE ru.user_id = ?
         ORDER BY r.id",
    )
    .bind(user_id)
    .fetch_all(executor)
    .await?;

    Ok(roles)
}

/// Assign a role by id; assigning an already held role is a no-op
pub async fn assign<'e, E>(executor: E, user_id: UserId, role_id: i64) -> Result<()>
where
    E: SqliteExecutor<'e>,
{
    sqlx::query("INSERT OR IGNORE INTO role_user (user_id, role_id) VALUES (?, ?)")
        .bind(user_id)
        .bind(role_id)
        .execute(executor)
        .await?;

    Ok(())
}

/// Assign a role by name
///
/// # Errors
///
/// [`CatalogError::MissingRole`] when no role has that name, and
/// [`CatalogError::NotFound`] when the user does not exist.
pub async fn assign_by_name(pool: &SqlitePool, user_id: UserId, name: &str) -> Result<()> {
    let role = get_by_name(pool, name)
        .await?
        .ok_or_else(|| CatalogError::MissingRole(name.to_string()))?;

    let user: Option<i64> = sqlx::query_scalar("SELECT id FROM users WHERE id = ?")
        .bind(user_id)
        .fetch_optional(pool)
        .await?;
    if user.is_none() {
        return Err(CatalogError::not_found("User", user_id).into());
    }

    assign(pool, user_id, role.id).await
}

/// Fail unless a role with `name` exists
///
/// Registration depends on the default role, so the server checks it once
/// at startup.
pub async fn ensure_exists(pool: &SqlitePool, name: &str) -> Result<Role> {
    get_by_name(pool, name)
        .await?
        .ok_or_else(|| StorageError::Invariant(format!("role '{name}' does not exist")))
}
