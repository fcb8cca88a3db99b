//! Event handler that writes game events to the tracing log.

use async_trait::async_trait;
use tracing::info;

use crate::domain::foundation::{DomainError, EventEnvelope};
use crate::ports::EventHandler;

/// Logs every event it receives at `info` level.
#[derive(Debug, Default, Clone, Copy)]
pub struct EventLogger;

impl EventLogger {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl EventHandler for EventLogger {
    async fn handle(&self, event: EventEnvelope) -> Result<(), DomainError> {
        info!(
            event_type = %event.event_type,
            game_id = %event.aggregate_id,
            channel = event.metadata.channel_id.as_deref().unwrap_or("-"),
            payload = %event.payload,
            "game event"
        );
        Ok(())
    }

    fn name(&self) -> &'static str {
        "EventLogger"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn logging_never_fails() {
        let logger = EventLogger::new();
        let event = EventEnvelope::new("game.started.v1", "g1", "Game", json!({}));
        assert!(logger.handle(event).await.is_ok());
    }
}
