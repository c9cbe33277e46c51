//! Role-based authorization
//!
//! Authorization is a pure decision over the roles carried by the request;
//! nothing here touches shared state.

/// Role assigned to every newly registered user
pub const DEFAULT_ROLE: &str = "user";

/// Role required for catalog mutations
pub const ADMIN_ROLE: &str = "admin";

/// Check whether a principal holding `principal_roles` satisfies `required_role`
///
/// Membership is exact: no role implies another.
pub fn authorize<S: AsRef<str>>(principal_roles: &[S], required_role: &str) -> bool {
    principal_roles
        .iter()
        .any(|role| role.as_ref() == required_role)
}
