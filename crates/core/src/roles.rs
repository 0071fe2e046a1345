//! Well-known role name constants.
//!
//! These must match the column default in `20261016000001_create_users.sql`.

pub const ROLE_ADMIN: &str = "admin";
