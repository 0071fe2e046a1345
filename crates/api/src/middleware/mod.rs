//! Request extractors shared by the handlers.
//!
//! - [`auth::AuthUser`] -- the authenticated administrator (bearer token or session cookie).
//! - [`client::ClientInfo`] -- caller ip address and user agent.

pub mod auth;
pub mod client;
