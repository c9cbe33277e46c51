/// User and role domain types
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use validator::Validate;

/// User identifier
pub type UserId = i64;

/// Role identifier
pub type RoleId = i64;

/// User gender as collected at registration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    /// Man
    Homme,
    /// Woman
    Femme,
}

impl Gender {
    /// Wire and storage representation
    pub fn as_str(&self) -> &'static str {
        match self {
            Gender::Homme => "homme",
            Gender::Femme => "femme",
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Gender {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "homme" => Ok(Gender::Homme),
            "femme" => Ok(Gender::Femme),
            other => Err(format!("unknown gender: {other}")),
        }
    }
}

impl TryFrom<String> for Gender {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// User account
///
/// The password hash lives in its own table and is never part of this type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[cfg_attr(feature = "sqlx-support", derive(sqlx::FromRow))]
pub struct User {
    /// Unique user identifier
    pub id: UserId,

    /// Display name
    pub name: String,

    /// Login email, unique across users
    pub email: String,

    /// Date of birth
    pub date_of_birth: NaiveDate,

    /// Gender
    #[cfg_attr(feature = "sqlx-support", sqlx(try_from = "String"))]
    pub gender: Gender,

    /// Optional phone number
    pub phone: Option<String>,

    /// Account creation timestamp (RFC 3339)
    pub created_at: String,

    /// Last update timestamp (RFC 3339)
    pub updated_at: String,
}

/// Named permission group
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[cfg_attr(feature = "sqlx-support", derive(sqlx::FromRow))]
pub struct Role {
    /// Role identifier
    pub id: RoleId,

    /// Unique machine name (`user`, `manager`, `admin`)
    pub name: String,

    /// Human readable name
    pub display_name: String,

    /// What the role is for
    pub description: Option<String>,
}

/// A user together with the roles assigned to them
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct UserWithRoles {
    /// The account
    #[serde(flatten)]
    pub user: User,

    /// Assigned roles
    pub roles: Vec<Role>,
}

impl UserWithRoles {
    /// Names of the assigned roles
    pub fn role_names(&self) -> Vec<String> {
        self.roles.iter().map(|r| r.name.clone()).collect()
    }
}

/// Registration payload
#[derive(Debug, Clone, Deserialize, Validate)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct RegisterUser {
    #[validate(length(
        min = 1,
        max = 255,
        message = "The name field must be between 1 and 255 characters."
    ))]
    pub name: String,

    #[validate(
        email(message = "The email field must be a valid email address."),
        length(max = 255, message = "The email field must not be greater than 255 characters.")
    )]
    pub email: String,

    #[validate(
        length(min = 8, message = "The password field must be at least 8 characters."),
        must_match(
            other = "password_confirmation",
            message = "The password field confirmation does not match."
        )
    )]
    pub password: String,

    pub password_confirmation: String,

    pub date_of_birth: NaiveDate,

    pub gender: Gender,

    #[serde(default)]
    #[validate(length(max = 20, message = "The phone field must not be greater than 20 characters."))]
    pub phone: Option<String>,
}

/// Login payload
#[derive(Debug, Clone, Deserialize, Validate)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct LoginUser {
    #[validate(email(message = "The email field must be a valid email address."))]
    pub email: String,

    #[validate(length(min = 1, message = "The password field is required."))]
    pub password: String,
}
