//! Atelier API server library.
//!
//! Exposes the building blocks (config, state, error handling, extractors,
//! routes) so integration tests, the server binary, and the ops utility can
//! all share them.

pub mod auth;
pub mod config;
pub mod error;
pub mod extract;
pub mod fallback;
pub mod geo;
pub mod handlers;
pub mod middleware;
pub mod query;
pub mod response;
pub mod router;
pub mod routes;
pub mod state;
pub mod telemetry;
