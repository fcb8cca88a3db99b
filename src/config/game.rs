//! Game rules and command configuration

use serde::Deserialize;

use crate::domain::game::{GameRules, DEFAULT_MIN_PLAYERS, DEFAULT_VOTE_THRESHOLD};

use super::ValidationError;

/// Game configuration
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct GameConfig {
    /// Prefix that introduces channel commands
    #[serde(default = "default_command_prefix")]
    pub command_prefix: String,

    /// Roster size that starts the first round automatically
    #[serde(default = "default_min_players")]
    pub min_players: usize,

    /// Vote credit every voter must spend before a round completes
    #[serde(default = "default_vote_threshold")]
    pub vote_threshold: u32,

    /// Fixed RNG seed for reproducible answer orderings
    #[serde(default)]
    pub shuffle_seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            command_prefix: default_command_prefix(),
            min_players: default_min_players(),
            vote_threshold: default_vote_threshold(),
            shuffle_seed: None,
        }
    }
}

impl GameConfig {
    /// The rules every new game is played under.
    pub fn rules(&self) -> GameRules {
        GameRules {
            min_players: self.min_players,
            vote_threshold: self.vote_threshold,
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.command_prefix.is_empty() {
            return Err(ValidationError::EmptyCommandPrefix);
        }
        if self.command_prefix.chars().any(char::is_whitespace) {
            return Err(ValidationError::WhitespaceInCommandPrefix);
        }
        if self.min_players < 2 {
            return Err(ValidationError::TooFewPlayers(self.min_players));
        }
        if self.vote_threshold == 0 {
            return Err(ValidationError::ZeroVoteThreshold);
        }
        Ok(())
    }
}

fn default_command_prefix() -> String {
    "!".to_string()
}

fn default_min_players() -> usize {
    DEFAULT_MIN_PLAYERS
}

fn default_vote_threshold() -> u32 {
    DEFAULT_VOTE_THRESHOLD
}
