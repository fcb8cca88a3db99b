//! Configuration error types

use thiserror::Error;

/// Errors that can occur during configuration loading
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration loading failed: {0}")]
    LoadError(#[from] config::ConfigError),

    #[error("Validation failed: {0}")]
    ValidationFailed(#[from] ValidationError),
}

/// Errors that can occur during configuration validation
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Command prefix must not be empty")]
    EmptyCommandPrefix,

    #[error("Command prefix must not contain whitespace")]
    WhitespaceInCommandPrefix,

    #[error("min_players must be at least 2 (got {0})")]
    TooFewPlayers(usize),

    #[error("vote_threshold must be at least 1")]
    ZeroVoteThreshold,

    #[error("Log level must not be empty")]
    EmptyLogLevel,
}
