//! Game domain events.
//!
//! Published by the application layer after the matching transition:
//! - `GameStarted` - A channel opened a game
//! - `PlayersJoined` - New players were added to the roster
//! - `RoundStarted` - A setter took their turn
//! - `AnswerChosen` - The setter picked an answer; voting is open
//! - `RoundCompleted` - Everyone voted and the answer was revealed
//! - `GameEnded` - The channel closed its game

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{domain_event, ChannelId, EventId, GameId, PlayerId, Timestamp};

// ════════════════════════════════════════════════════════════════════════════
// GameStarted
// ════════════════════════════════════════════════════════════════════════════

/// Published when a channel starts a game.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameStarted {
    pub event_id: EventId,
    pub game_id: GameId,
    pub channel_id: ChannelId,
    pub started_at: Timestamp,
}

domain_event!(
    GameStarted,
    event_type = "game.started.v1",
    schema_version = 1,
    aggregate_id = game_id,
    aggregate_type = "Game",
    occurred_at = started_at,
    event_id = event_id
);

// ════════════════════════════════════════════════════════════════════════════
// PlayersJoined
// ════════════════════════════════════════════════════════════════════════════

/// Published when at least one new player joins.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayersJoined {
    pub event_id: EventId,
    pub game_id: GameId,
    /// Only the players that were actually added, in join order.
    pub players: Vec<PlayerId>,
    pub joined_at: Timestamp,
}

domain_event!(
    PlayersJoined,
    event_type = "game.players_joined.v1",
    schema_version = 1,
    aggregate_id = game_id,
    aggregate_type = "Game",
    occurred_at = joined_at,
    event_id = event_id
);

// ════════════════════════════════════════════════════════════════════════════
// RoundStarted
// ════════════════════════════════════════════════════════════════════════════

/// Published when a new setter takes the round.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoundStarted {
    pub event_id: EventId,
    pub game_id: GameId,
    /// 1-based count of rounds started in this game.
    pub round_number: u32,
    pub setter: PlayerId,
    pub started_at: Timestamp,
}

domain_event!(
    RoundStarted,
    event_type = "game.round_started.v1",
    schema_version = 1,
    aggregate_id = game_id,
    aggregate_type = "Game",
    occurred_at = started_at,
    event_id = event_id
);

// ════════════════════════════════════════════════════════════════════════════
// AnswerChosen
// ════════════════════════════════════════════════════════════════════════════

/// Published when the setter has picked an answer.
///
/// Carries no author: the choice stays secret until the round completes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnswerChosen {
    pub event_id: EventId,
    pub game_id: GameId,
    pub round_number: u32,
    pub answer_count: usize,
    pub chosen_at: Timestamp,
}

domain_event!(
    AnswerChosen,
    event_type = "game.answer_chosen.v1",
    schema_version = 1,
    aggregate_id = game_id,
    aggregate_type = "Game",
    occurred_at = chosen_at,
    event_id = event_id
);

// ════════════════════════════════════════════════════════════════════════════
// RoundCompleted
// ════════════════════════════════════════════════════════════════════════════

/// Published when voting completes and the answer is revealed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoundCompleted {
    pub event_id: EventId,
    pub game_id: GameId,
    pub round_number: u32,
    pub setter: PlayerId,
    pub question: String,
    pub author: PlayerId,
    pub answer: String,
    pub completed_at: Timestamp,
}

domain_event!(
    RoundCompleted,
    event_type = "game.round_completed.v1",
    schema_version = 1,
    aggregate_id = game_id,
    aggregate_type = "Game",
    occurred_at = completed_at,
    event_id = event_id
);

// ════════════════════════════════════════════════════════════════════════════
// GameEnded
// ════════════════════════════════════════════════════════════════════════════

/// Published when a channel ends its game.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameEnded {
    pub event_id: EventId,
    pub game_id: GameId,
    pub channel_id: ChannelId,
    pub rounds_completed: u32,
    pub ended_at: Timestamp,
}

domain_event!(
    GameEnded,
    event_type = "game.ended.v1",
    schema_version = 1,
    aggregate_id = game_id,
    aggregate_type = "Game",
    occurred_at = ended_at,
    event_id = event_id
);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::{DomainEvent, SerializableDomainEvent};

    #[test]
    fn round_completed_envelope_carries_reveal() {
        let game_id = GameId::new();
        let event = RoundCompleted {
            event_id: EventId::new(),
            game_id,
            round_number: 3,
            setter: PlayerId::new("alice").unwrap(),
            question: "favorite food".to_string(),
            author: PlayerId::new("bob").unwrap(),
            answer: "pizza".to_string(),
            completed_at: Timestamp::now(),
        };

        let envelope = event.to_envelope();

        assert_eq!(envelope.event_type, "game.round_completed.v1");
        assert_eq!(envelope.schema_version, 1);
        assert_eq!(envelope.aggregate_id, game_id.to_string());
        assert_eq!(envelope.aggregate_type, "Game");
        assert_eq!(envelope.payload["author"], "bob");
        assert_eq!(envelope.payload["round_number"], 3);
    }

    #[test]
    fn answer_chosen_does_not_leak_author() {
        let event = AnswerChosen {
            event_id: EventId::new(),
            game_id: GameId::new(),
            round_number: 1,
            answer_count: 2,
            chosen_at: Timestamp::now(),
        };

        let payload = event.to_envelope().payload;
        assert!(payload.get("author").is_none());
        assert_eq!(event.schema_version(), 1);
    }
}
