//! Recording chat gateway for tests.
//!
//! Implements the `ChatGateway` port by storing every outbound delivery in
//! memory, so tests can assert on exactly what players would have seen.
//!
//! # Example
//!
//! ```ignore
//! use say_anything::adapters::chat::RecordingChatGateway;
//!
//! let chat = RecordingChatGateway::new();
//! // ... drive a GameSession with Arc::new(chat.clone()) ...
//! assert_eq!(chat.announcements_in(&channel).len(), 2);
//! assert!(chat.notifications_to(&bob)[0].contains("favorite food"));
//! ```

use std::collections::HashSet;
use std::sync::{Arc, RwLock};

use async_trait::async_trait;

use crate::domain::foundation::{ChannelId, DomainError, ErrorCode, PlayerId, PromptHandle};
use crate::ports::ChatGateway;

/// One thing the game sent out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Delivery {
    Announcement {
        channel: ChannelId,
        text: String,
    },
    Notification {
        player: PlayerId,
        text: String,
    },
    Acknowledgement {
        player: PlayerId,
    },
    VotePrompt {
        channel: ChannelId,
        display_index: usize,
        text: String,
        handle: PromptHandle,
    },
}

#[derive(Debug, Default)]
struct Inner {
    deliveries: Vec<Delivery>,
    unreachable: HashSet<PlayerId>,
    fail_prompts: bool,
    fail_announcements: bool,
    next_prompt: usize,
}

/// In-memory `ChatGateway` with failure injection.
///
/// Cloning shares the underlying log, so a test can keep one clone and hand
/// another to the code under test.
#[derive(Debug, Clone, Default)]
pub struct RecordingChatGateway {
    inner: Arc<RwLock<Inner>>,
}

impl RecordingChatGateway {
    /// Creates a gateway with an empty log.
    pub fn new() -> Self {
        Self::default()
    }

    /// Private messages to `player` will fail with `DeliveryFailed`.
    pub fn with_unreachable(self, player: PlayerId) -> Self {
        self.inner.write().unwrap().unreachable.insert(player);
        self
    }

    /// Every vote prompt will fail with `PromptFailed`.
    pub fn with_failing_prompts(self) -> Self {
        self.inner.write().unwrap().fail_prompts = true;
        self
    }

    /// Channel posts will fail with `DeliveryFailed`.
    pub fn with_failing_announcements(self) -> Self {
        self.inner.write().unwrap().fail_announcements = true;
        self
    }

    /// Switches prompt failures on or off for an existing gateway.
    pub fn set_failing_prompts(&self, failing: bool) {
        self.inner.write().unwrap().fail_prompts = failing;
    }

    /// Every delivery, oldest first.
    pub fn deliveries(&self) -> Vec<Delivery> {
        self.inner.read().unwrap().deliveries.clone()
    }

    /// Public messages posted in `channel`.
    pub fn announcements_in(&self, channel: &ChannelId) -> Vec<String> {
        self.deliveries()
            .into_iter()
            .filter_map(|d| match d {
                Delivery::Announcement { channel: c, text } if &c == channel => Some(text),
                _ => None,
            })
            .collect()
    }

    /// Private messages sent to `player`.
    pub fn notifications_to(&self, player: &PlayerId) -> Vec<String> {
        self.deliveries()
            .into_iter()
            .filter_map(|d| match d {
                Delivery::Notification { player: p, text } if &p == player => Some(text),
                _ => None,
            })
            .collect()
    }

    /// How many answers from `player` were acknowledged.
    pub fn acknowledgements_for(&self, player: &PlayerId) -> usize {
        self.deliveries()
            .iter()
            .filter(|d| matches!(d, Delivery::Acknowledgement { player: p } if p == player))
            .count()
    }

    /// Vote prompts posted in `channel` as `(display_index, text, handle)`.
    pub fn prompts_in(&self, channel: &ChannelId) -> Vec<(usize, String, PromptHandle)> {
        self.deliveries()
            .into_iter()
            .filter_map(|d| match d {
                Delivery::VotePrompt {
                    channel: c,
                    display_index,
                    text,
                    handle,
                } if &c == channel => Some((display_index, text, handle)),
                _ => None,
            })
            .collect()
    }

    /// Forget everything recorded so far. Failure settings are kept.
    pub fn clear(&self) {
        self.inner.write().unwrap().deliveries.clear();
    }

    fn record(&self, delivery: Delivery) {
        self.inner.write().unwrap().deliveries.push(delivery);
    }
}

#[async_trait]
impl ChatGateway for RecordingChatGateway {
    async fn announce(&self, channel: &ChannelId, text: &str) -> Result<(), DomainError> {
        if self.inner.read().unwrap().fail_announcements {
            return Err(DomainError::new(ErrorCode::DeliveryFailed, "cannot post to channel")
                .with_detail("channel", channel.as_str()));
        }
        self.record(Delivery::Announcement {
            channel: channel.clone(),
            text: text.to_string(),
        });
        Ok(())
    }

    async fn notify(&self, player: &PlayerId, text: &str) -> Result<(), DomainError> {
        if self.inner.read().unwrap().unreachable.contains(player) {
            return Err(DomainError::delivery(player.as_str(), "player does not accept private messages"));
        }
        self.record(Delivery::Notification {
            player: player.clone(),
            text: text.to_string(),
        });
        Ok(())
    }

    async fn acknowledge_answer(&self, player: &PlayerId) -> Result<(), DomainError> {
        self.record(Delivery::Acknowledgement {
            player: player.clone(),
        });
        Ok(())
    }

    async fn present_vote_prompt(
        &self,
        channel: &ChannelId,
        display_index: usize,
        text: &str,
    ) -> Result<PromptHandle, DomainError> {
        let mut inner = self.inner.write().unwrap();
        if inner.fail_prompts {
            return Err(DomainError::new(ErrorCode::PromptFailed, "cannot post vote prompt")
                .with_detail("channel", channel.as_str()));
        }
        inner.next_prompt += 1;
        let handle = PromptHandle::from_string(format!("prompt-{}", inner.next_prompt));
        inner.deliveries.push(Delivery::VotePrompt {
            channel: channel.clone(),
            display_index,
            text: text.to_string(),
            handle: handle.clone(),
        });
        Ok(handle)
    }
}
