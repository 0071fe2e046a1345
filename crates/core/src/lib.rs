//! Pure domain logic for the Atelier portfolio service.
//!
//! Nothing in this crate touches the database or the network; the `db` and
//! `api` crates build on these types and rules.

pub mod analytics;
pub mod content;
pub mod error;
pub mod pagination;
pub mod patch;
pub mod roles;
pub mod site_config;
pub mod types;
