//! ChatGateway port - Outbound side of the chat platform.
//!
//! Everything a game says to people goes through this port: public channel
//! posts, private messages, answer acknowledgements and the votable answer
//! items. Rendering (mentions, emoji reactions, embeds) is the adapter's
//! business.

use async_trait::async_trait;

use crate::domain::foundation::{ChannelId, DomainError, PlayerId, PromptHandle};

/// Port for talking to players on the chat platform.
///
/// Calls are made synchronously while an inbound event is being handled.
/// Failures are returned as `DomainError` with `DeliveryFailed` or
/// `PromptFailed` codes and are not retried by the caller.
#[async_trait]
pub trait ChatGateway: Send + Sync {
    /// Post a public message in the game's channel.
    async fn announce(&self, channel: &ChannelId, text: &str) -> Result<(), DomainError>;

    /// Send a private message to one player.
    async fn notify(&self, player: &PlayerId, text: &str) -> Result<(), DomainError>;

    /// Confirm receipt of the player's latest private answer
    /// (a thumbs-up reaction on most platforms).
    async fn acknowledge_answer(&self, player: &PlayerId) -> Result<(), DomainError>;

    /// Post one votable answer item and return the handle later
    /// reactions will reference.
    ///
    /// `display_index` is the 1-based public number of the item.
    async fn present_vote_prompt(
        &self,
        channel: &ChannelId,
        display_index: usize,
        text: &str,
    ) -> Result<PromptHandle, DomainError>;
}
