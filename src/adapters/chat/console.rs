//! Console chat gateway.
//!
//! Writes every outbound message to stdout so a game can be played from a
//! terminal. Vote prompts print their handle so the operator can react to
//! them by typing it back.

use std::io::Write;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use tracing::debug;

use crate::domain::foundation::{ChannelId, DomainError, ErrorCode, PlayerId, PromptHandle};
use crate::ports::ChatGateway;

/// `ChatGateway` that prints to stdout.
#[derive(Debug, Default)]
pub struct ConsoleChatGateway {
    next_prompt: AtomicUsize,
}

impl ConsoleChatGateway {
    pub fn new() -> Self {
        Self::default()
    }

    fn emit(&self, line: String) -> Result<(), DomainError> {
        let mut out = std::io::stdout().lock();
        writeln!(out, "{}", line)
            .and_then(|_| out.flush())
            .map_err(|e| DomainError::new(ErrorCode::DeliveryFailed, e.to_string()))
    }
}

/// Renders `text` with every line after the first indented under a prefix.
fn render(prefix: &str, text: &str) -> String {
    text.lines()
        .enumerate()
        .map(|(i, line)| {
            if i == 0 {
                format!("{} {}", prefix, line)
            } else {
                format!("{:width$} {}", "", line, width = prefix.len())
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

#[async_trait]
impl ChatGateway for ConsoleChatGateway {
    async fn announce(&self, channel: &ChannelId, text: &str) -> Result<(), DomainError> {
        self.emit(render(&format!("[#{}]", channel), text))
    }

    async fn notify(&self, player: &PlayerId, text: &str) -> Result<(), DomainError> {
        self.emit(render(&format!("[dm -> {}]", player), text))
            .map_err(|e| DomainError::delivery(player.as_str(), e.message))
    }

    async fn acknowledge_answer(&self, player: &PlayerId) -> Result<(), DomainError> {
        debug!(player = %player, "answer acknowledged");
        self.emit(format!("[dm -> {}] (answer received)", player))
    }

    async fn present_vote_prompt(
        &self,
        channel: &ChannelId,
        display_index: usize,
        text: &str,
    ) -> Result<PromptHandle, DomainError> {
        let n = self.next_prompt.fetch_add(1, Ordering::SeqCst) + 1;
        let handle = PromptHandle::from_string(format!("p{}", n));
        self.emit(format!("[#{}] ({}) {}", channel, handle, text))
            .map_err(|e| DomainError::new(ErrorCode::PromptFailed, e.message))?;
        debug!(channel = %channel, display_index, handle = %handle, "vote prompt posted");
        Ok(handle)
    }
}
