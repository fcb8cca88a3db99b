//! Game domain module.
//!
//! One `Game` per channel: roster, setter rotation, and the round flow of
//! question, private answers, setter selection and anonymous voting.
//!
//! # Events
//!
//! - `GameStarted` / `GameEnded` - Channel lifecycle
//! - `PlayersJoined` - Roster grew
//! - `RoundStarted` / `AnswerChosen` / `RoundCompleted` - Round lifecycle

mod aggregate;
mod command;
mod errors;
mod events;
mod phase;
mod round;
mod rules;
mod vote;

pub use aggregate::{
    AnswerRecorded, Ballot, Game, Ignored, JoinOutcome, QuestionAsked, RoundReveal,
    SelectionRequest, VoteOutcome,
};
pub use command::ChannelCommand;
pub use errors::GameError;
pub use events::{
    AnswerChosen, GameEnded, GameStarted, PlayersJoined, RoundCompleted, RoundStarted,
};
pub use phase::RoundPhase;
pub use round::{AnswerEntry, Round};
pub use rules::{GameRules, DEFAULT_MIN_PLAYERS, DEFAULT_VOTE_THRESHOLD};
pub use vote::Confidence;
