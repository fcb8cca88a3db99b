//! Channel command recognition.
//!
//! Only the command keyword is parsed here; mentions arrive already
//! resolved by the chat platform alongside the message.

/// A recognised public channel command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChannelCommand {
    /// Create a game in the channel with the mentioned players.
    StartGame,
    /// Tear down the channel's game.
    EndGame,
    /// Start the next round.
    NextRound,
    /// Add the mentioned players.
    AddPlayers,
    /// The setter asks their question.
    Question(String),
}

impl ChannelCommand {
    /// Parse `content` against commands introduced by `prefix`.
    ///
    /// `nextround` and `endgame` match as bare prefixes; the others need a
    /// following space. Returns `None` for ordinary chat.
    pub fn parse(prefix: &str, content: &str) -> Option<Self> {
        let rest = content.strip_prefix(prefix)?;

        if rest.starts_with("startgame ") {
            return Some(ChannelCommand::StartGame);
        }
        if rest.starts_with("endgame") {
            return Some(ChannelCommand::EndGame);
        }
        if rest.starts_with("nextround") {
            return Some(ChannelCommand::NextRound);
        }
        if rest.starts_with("addplayers ") {
            return Some(ChannelCommand::AddPlayers);
        }
        if let Some(question) = rest.strip_prefix("question ") {
            return Some(ChannelCommand::Question(question.trim().to_string()));
        }
        None
    }

    /// True for commands handled by the dispatcher rather than a game.
    pub fn is_dispatcher_command(&self) -> bool {
        matches!(self, ChannelCommand::StartGame | ChannelCommand::EndGame)
    }
}
