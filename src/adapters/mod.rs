//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the game to the outside world:
//! - `chat` - Chat gateways (console, in-memory recording)
//! - `events` - Event bus and event logging
//! - `random` - Shufflers (rand-backed, scripted)

pub mod chat;
pub mod events;
pub mod random;

pub use chat::{
    parse_console_line, ConsoleChatGateway, ConsoleInput, ConsoleInputError, Delivery,
    RecordingChatGateway,
};
pub use events::{EventLogger, InMemoryEventBus};
pub use random::{RngShuffler, ScriptedShuffler};
