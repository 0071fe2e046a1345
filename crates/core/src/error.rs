use crate::types::DbId;

/// Domain error shared by every layer of the service.
///
/// The API crate maps each variant to exactly one HTTP status.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: DbId },

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Backend unavailable: {0}")]
    BackendUnavailable(String),

    #[error("Internal error: {0}")]
    Internal(String),
}
