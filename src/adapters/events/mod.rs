//! Event bus adapters.
//!
//! - `InMemoryEventBus` - Synchronous, in-process bus
//! - `EventLogger` - Handler that writes events to the tracing log

mod event_logger;
mod in_memory;

pub use event_logger::EventLogger;
pub use in_memory::InMemoryEventBus;
