//! Application handlers.
//!
//! Handlers that turn inbound chat events into domain operations and
//! outbound messages.

pub mod game;

pub use game::{
    ChannelMessage, GameDispatcher, GamePorts, GameSession, PrivateMessage, SessionSettings,
    VoteReaction,
};
