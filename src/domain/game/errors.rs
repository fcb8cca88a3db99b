//! Game error types.
//!
//! Player input never produces an error (see `Ignored`); these cover the
//! collaborator failures that surface while a game talks to the outside.

use thiserror::Error;

use crate::domain::foundation::{DomainError, ErrorCode};

/// Errors returned by game operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GameError {
    /// A chat message or prompt could not be delivered.
    #[error("Chat delivery failed: {0}")]
    Delivery(String),

    /// Any other collaborator failure (event publishing, etc.).
    #[error("Infrastructure error: {0}")]
    Infrastructure(String),
}

impl GameError {
    pub fn delivery(message: impl Into<String>) -> Self {
        GameError::Delivery(message.into())
    }

    pub fn infrastructure(message: impl Into<String>) -> Self {
        GameError::Infrastructure(message.into())
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            GameError::Delivery(_) => ErrorCode::DeliveryFailed,
            GameError::Infrastructure(_) => ErrorCode::InternalError,
        }
    }
}

impl From<DomainError> for GameError {
    fn from(err: DomainError) -> Self {
        match err.code {
            ErrorCode::DeliveryFailed | ErrorCode::PromptFailed => {
                GameError::Delivery(err.to_string())
            }
            _ => GameError::Infrastructure(err.to_string()),
        }
    }
}
