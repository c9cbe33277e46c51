/// Server services
pub mod accounts;
pub mod auth;

pub use auth::{AuthService, Claims, IssuedToken};
