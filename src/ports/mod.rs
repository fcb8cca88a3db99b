//! Ports - Interfaces for external dependencies.
//!
//! Ports define the contracts between the game and the outside world.
//! Adapters implement these ports.
//!
//! - `ChatGateway` - Public announcements, private messages, vote prompts
//! - `Shuffler` - Random permutations for answer ordering
//! - `EventPublisher` / `EventSubscriber` - Domain event fan-out

mod chat_gateway;
mod event_publisher;
mod event_subscriber;
mod shuffler;

pub use chat_gateway::ChatGateway;
pub use event_publisher::EventPublisher;
pub use event_subscriber::{EventHandler, EventSubscriber};
pub use shuffler::{shuffled_order, Shuffler};
