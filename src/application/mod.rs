//! Application layer - Handlers that orchestrate the game.
//!
//! This layer drives the domain through the ports: it receives inbound chat
//! events, applies them to the right `Game`, and performs the resulting
//! announcements, private messages and event publishing.

pub mod handlers;

pub use handlers::{
    ChannelMessage, GameDispatcher, GamePorts, GameSession, PrivateMessage, SessionSettings,
    VoteReaction,
};
