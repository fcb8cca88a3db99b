//! Tunable game rules.

/// Number of players at which a fresh roster starts its first round.
pub const DEFAULT_MIN_PLAYERS: usize = 2;

/// Vote credit every voter must spend before a round completes.
pub const DEFAULT_VOTE_THRESHOLD: u32 = 2;

/// Rules a game is played under.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameRules {
    /// Roster size that triggers the automatic first round.
    pub min_players: usize,
    /// Credit each voter needs before the round completes.
    pub vote_threshold: u32,
}

impl Default for GameRules {
    fn default() -> Self {
        Self {
            min_players: DEFAULT_MIN_PLAYERS,
            vote_threshold: DEFAULT_VOTE_THRESHOLD,
        }
    }
}
