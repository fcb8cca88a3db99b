//! Inbound chat events, already stripped of platform details.

use crate::domain::foundation::{ChannelId, PlayerId, PromptHandle};
use crate::domain::game::Confidence;

/// A public message posted in a channel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChannelMessage {
    pub channel: ChannelId,
    pub author: PlayerId,
    pub content: String,
    /// Players mentioned in the message, in the order they appear.
    pub mentions: Vec<PlayerId>,
}

impl ChannelMessage {
    pub fn new(channel: ChannelId, author: PlayerId, content: impl Into<String>) -> Self {
        Self {
            channel,
            author,
            content: content.into(),
            mentions: Vec::new(),
        }
    }

    pub fn with_mentions(mut self, mentions: Vec<PlayerId>) -> Self {
        self.mentions = mentions;
        self
    }
}

/// A private message sent to the bot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrivateMessage {
    pub author: PlayerId,
    pub content: String,
}

impl PrivateMessage {
    pub fn new(author: PlayerId, content: impl Into<String>) -> Self {
        Self {
            author,
            content: content.into(),
        }
    }

    /// The content as a selection number, if it is made only of digits.
    pub fn as_selection(&self) -> Option<usize> {
        let content = self.content.trim();
        if content.is_empty() || !content.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        content.parse().ok()
    }
}

/// A confidence reaction on a vote prompt.
///
/// Reactions other than the two confidence tiers never reach the game.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VoteReaction {
    pub channel: ChannelId,
    pub voter: PlayerId,
    pub prompt: PromptHandle,
    pub confidence: Confidence,
}

impl VoteReaction {
    pub fn new(channel: ChannelId, voter: PlayerId, prompt: PromptHandle, high_confidence: bool) -> Self {
        Self {
            channel,
            voter,
            prompt,
            confidence: Confidence::from_high_confidence(high_confidence),
        }
    }
}
