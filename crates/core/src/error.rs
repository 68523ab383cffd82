use crate::types::{Money, Tenor};

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Entity not found: {entity} with key {key}")]
    NotFound { entity: &'static str, key: String },

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    /// Missing, malformed, expired, or superseded session.
    #[error("Unauthenticated: {0}")]
    Unauthenticated(String),

    /// Credentials were presented but rejected (wrong password, unknown account).
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Insufficient limit for tenor {tenor}: requested {requested}, available {available}")]
    InsufficientLimit {
        tenor: Tenor,
        requested: Money,
        available: Money,
    },

    #[error("Internal error: {0}")]
    Internal(String),
}

impl CoreError {
    /// Shorthand for a [`CoreError::NotFound`] keyed by anything displayable.
    pub fn not_found(entity: &'static str, key: impl std::fmt::Display) -> Self {
        Self::NotFound {
            entity,
            key: key.to_string(),
        }
    }
}
