use thiserror::Error;
use uuid::Uuid;

use crate::domain::training::entities::SessionState;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CoreError {
    #[error("validation failed: {0}")]
    Validation(String),

    #[error("{entity} {id} does not exist")]
    Reference { entity: &'static str, id: String },

    #[error("conflict: {0}")]
    Conflict(String),

    #[error("training session {session_id} is {state}, expected open")]
    InvalidState {
        session_id: Uuid,
        state: SessionState,
    },

    #[error("{entity} {id} not found")]
    NotFound { entity: &'static str, id: String },

    #[error("storage error: {0}")]
    Storage(String),
}

impl CoreError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    pub fn reference(entity: &'static str, id: impl ToString) -> Self {
        Self::Reference {
            entity,
            id: id.to_string(),
        }
    }

    pub fn not_found(entity: &'static str, id: impl ToString) -> Self {
        Self::NotFound {
            entity,
            id: id.to_string(),
        }
    }

    /// Whether the caller may retry after resolving the conflicting state.
    pub fn is_conflict(&self) -> bool {
        matches!(self, Self::Conflict(_))
    }
}
