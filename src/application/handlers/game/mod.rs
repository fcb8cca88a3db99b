//! Game handlers.
//!
//! - `GameDispatcher` - Channel-keyed session registry and event routing
//! - `GameSession` - Drives one `Game` through the chat, shuffle and event ports
//! - `inbound` - Platform-neutral inbound events
//! - `messages` - Outbound message texts

mod dispatcher;
mod inbound;
pub mod messages;
mod session;

pub use dispatcher::GameDispatcher;
pub use inbound::{ChannelMessage, PrivateMessage, VoteReaction};
pub use session::{GamePorts, GameSession, SessionSettings};
