//! User accounts and credentials

use crate::{roles, StorageError};
use musicapp_core::{CatalogError, RegisterUser, User, UserId, UserWithRoles};
use sqlx::SqlitePool;

type Result<T> = std::result::Result<T, StorageError>;

const SELECT_USER: &str =
    "SELECT id, name, email, date_of_birth, gender, phone, created_at, updated_at FROM users";

fn email_taken() -> StorageError {
    CatalogError::invalid_field("email", "The email has already been taken.").into()
}

/// Create a user, their credentials and their role in one transaction
///
/// Nothing is written unless every step succeeds. The user row is the first
/// statement so the transaction takes the write lock before reading; a
/// taken email surfaces as the unique violation on that insert.
///
/// # Arguments
///
/// * `pool` - Database connection pool
/// * `input` - Validated registration payload
/// * `password_hash` - Already hashed password
/// * `role` - Name of the role to assign
pub async fn register(
    pool: &SqlitePool,
    input: &RegisterUser,
    password_hash: &str,
    role: &str,
) -> Result<UserWithRoles> {
    let mut tx = pool.begin().await?;

    let inserted = sqlx::query(
        "INSERT INTO users (name, email, date_of_birth, gender, phone)
         VALUES (?, ?, ?, ?, ?)",
    )
    .bind(&input.name)
    .bind(&input.email)
    .bind(input.date_of_birth)
    .bind(input.gender.as_str())
    .bind(&input.phone)
    .execute(&mut *tx)
    .await;

    let user_id = match inserted {
        Ok(result) => result.last_insert_rowid(),
        Err(sqlx::Error::Database(db)) if db.is_unique_violation() => return Err(email_taken()),
        Err(err) => return Err(err.into()),
    };

    // Dropping `tx` on this error rolls the user insert back
    let role = roles::get_by_name(&mut *tx, role)
        .await?
        .ok_or_else(|| CatalogError::MissingRole(role.to_string()))?;

    sqlx::query("INSERT INTO user_credentials (user_id, password_hash) VALUES (?, ?)")
        .bind(user_id)
        .bind(password_hash)
        .execute(&mut *tx)
        .await?;

    roles::assign(&mut *tx, user_id, role.id).await?;

    let user = sqlx::query_as::<_, User>(&format!("{SELECT_USER} WHERE id = ?"))
        .bind(user_id)
        .fetch_one(&mut *tx)
        .await?;

    tx.commit().await?;

    tracing::info!(user_id, role = %role.name, "Registered user");

    Ok(UserWithRoles {
        user,
        roles: vec![role],
    })
}

pub async fn get_by_id(pool: &SqlitePool, id: UserId) -> Result<Option<User>> {
    let user = sqlx::query_as::<_, User>(&format!("{SELECT_USER} WHERE id = ?"))
        .bind(id)
        .fetch_optional(pool)
        .await?;

    Ok(user)
}

pub async fn find_by_email(pool: &SqlitePool, email: &str) -> Result<Option<User>> {
    let user = sqlx::query_as::<_, User>(&format!("{SELECT_USER} WHERE email = ?"))
        .bind(email)
        .fetch_optional(pool)
        .await?;

    Ok(user)
}

/// Get a user together with their roles
pub async fn get_with_roles(pool: &SqlitePool, id: UserId) -> Result<Option<UserWithRoles>> {
    let Some(user) = get_by_id(pool, id).await? else {
        return Ok(None);
    };
    let roles = roles::get_for_user(pool, id).await?;

    Ok(Some(UserWithRoles { user, roles }))
}

/// Get all users
pub async fn get_all(pool: &SqlitePool) -> Result<Vec<User>> {
    let users = sqlx::query_as::<_, User>(&format!("{SELECT_USER} ORDER BY id"))
        .fetch_all(pool)
        .await?;

    Ok(users)
}

/// Get user's password hash for authentication
///
/// # Returns
///
/// Returns the password hash if found, or None if user has no credentials
pub async fn get_password_hash(pool: &SqlitePool, user_id: UserId) -> Result<Option<String>> {
    let hash: Option<String> =
        sqlx::query_scalar("SELECT password_hash FROM user_credentials WHERE user_id = ?")
            .bind(user_id)
            .fetch_optional(pool)
            .await?;

    Ok(hash)
}
