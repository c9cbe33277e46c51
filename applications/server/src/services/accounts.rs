/// Account creation outside the HTTP flow
use crate::{error::Result, services::AuthService};
use musicapp_core::{CatalogError, RegisterUser, StorageContext, UserWithRoles, DEFAULT_ROLE};
use validator::Validate;

/// Create a user with the default role, plus `extra_role` when given
///
/// `extra_role` is resolved before anything is written, so an unknown role
/// leaves no account behind.
pub async fn create_user<S>(
    storage: &S,
    auth_service: &AuthService,
    input: &RegisterUser,
    extra_role: Option<&str>,
) -> Result<UserWithRoles>
where
    S: StorageContext + ?Sized,
{
    input.validate()?;

    let extra_role = match extra_role {
        Some(name) => Some(
            storage
                .get_role(name)
                .await?
                .ok_or_else(|| CatalogError::MissingRole(name.to_string()))?,
        ),
        None => None,
    };

    let password_hash = auth_service.hash_password(&input.password)?;
    let mut created = storage
        .register_user(input, &password_hash, DEFAULT_ROLE)
        .await?;

    if let Some(role) = extra_role {
        if !created.roles.iter().any(|r| r.id == role.id) {
            storage.assign_role(created.user.id, &role.name).await?;
            created.roles.push(role);
        }
    }

    tracing::info!(
        user_id = created.user.id,
        roles = ?created.role_names(),
        "User created"
    );

    Ok(created)
}
