//! Well-known role name constants.
//!
//! These must match the `CHECK` constraint on `users.role` in
//! `20260301000001_create_users_table.sql`.

pub const ROLE_ADMIN: &str = "admin";

/// Returns `true` if `role` is the singleton admin role.
pub fn is_admin(role: &str) -> bool {
    role == ROLE_ADMIN
}
