use std::sync::Arc;

use crate::config::ServerConfig;
use crate::geo::GeoLookup;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: atelier_db::DbPool,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Visitor geolocation used by `POST /api/visits/track`.
    pub geo: Arc<dyn GeoLookup>,
}
