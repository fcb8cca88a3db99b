//! Chat gateway adapters.
//!
//! - `ConsoleChatGateway` - Prints to stdout for the terminal driver
//! - `parse_console_line` - Reads terminal lines as inbound chat events
//! - `RecordingChatGateway` - Captures deliveries in memory for tests

mod console;
mod console_input;
mod recording;

pub use console::ConsoleChatGateway;
pub use console_input::{parse_console_line, ConsoleInput, ConsoleInputError};
pub use recording::{Delivery, RecordingChatGateway};
