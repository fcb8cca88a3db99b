//! EventSubscriber port - Interface for reacting to domain events.

use async_trait::async_trait;
use std::sync::Arc;

use crate::domain::foundation::{DomainError, EventEnvelope};

/// Handler for processing domain events.
///
/// ```ignore
/// struct RoundLog;
///
/// #[async_trait]
/// impl EventHandler for RoundLog {
///     async fn handle(&self, event: EventEnvelope) -> Result<(), DomainError> {
///         let completed: RoundCompleted = event.payload_as()?;
///         tracing::info!(author = %completed.author, "round completed");
///         Ok(())
///     }
///
///     fn name(&self) -> &'static str {
///         "RoundLog"
///     }
/// }
/// ```
#[async_trait]
pub trait EventHandler: Send + Sync {
    /// Process an event.
    async fn handle(&self, event: EventEnvelope) -> Result<(), DomainError>;

    /// Handler name for logging.
    fn name(&self) -> &'static str;
}

/// Port for subscribing to domain events.
pub trait EventSubscriber: Send + Sync {
    /// Subscribe handler to a specific event type.
    fn subscribe(&self, event_type: &str, handler: Arc<dyn EventHandler>);

    /// Subscribe handler to multiple event types.
    fn subscribe_all(&self, event_types: &[&str], handler: Arc<dyn EventHandler>);
}
