//! Console input parsing.
//!
//! Turns one line typed at the terminal into an inbound chat event:
//!
//! ```text
//! #general alice: !startgame @alice @bob @carol
//! dm bob: pizza
//! react carol #general p2 1
//! ```
//!
//! `@name` tokens in channel messages become mentions. Reactions other
//! than `1` (low confidence) and `2` (high confidence) are dropped here,
//! the way a chat platform adapter drops unrelated emoji.

use thiserror::Error;
use tracing::debug;

use crate::application::{ChannelMessage, PrivateMessage, VoteReaction};
use crate::domain::foundation::{ChannelId, PlayerId, PromptHandle, ValidationError};

/// A parsed console line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConsoleInput {
    Channel(ChannelMessage),
    Private(PrivateMessage),
    Reaction(VoteReaction),
}

/// Why a console line could not be understood.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConsoleInputError {
    #[error("expected '<sender>: <text>'")]
    MissingColon,

    #[error("expected 'react <player> #<channel> <prompt> <1|2>'")]
    MalformedReaction,

    #[error("unrecognised line; start with '#<channel>', 'dm' or 'react'")]
    UnknownForm,

    #[error(transparent)]
    InvalidId(#[from] ValidationError),
}

/// Parse one line. Blank lines and dropped reactions yield `Ok(None)`.
pub fn parse_console_line(line: &str) -> Result<Option<ConsoleInput>, ConsoleInputError> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }

    if let Some(rest) = line.strip_prefix('#') {
        let (channel, rest) = rest.split_once(char::is_whitespace).ok_or(ConsoleInputError::MissingColon)?;
        let (author, content) = split_sender(rest)?;
        let message = ChannelMessage::new(ChannelId::new(channel)?, author, content)
            .with_mentions(mentions_in(content)?);
        return Ok(Some(ConsoleInput::Channel(message)));
    }

    if let Some(rest) = line.strip_prefix("dm ") {
        let (author, content) = split_sender(rest)?;
        return Ok(Some(ConsoleInput::Private(PrivateMessage::new(author, content))));
    }

    if let Some(rest) = line.strip_prefix("react ") {
        return parse_reaction(rest);
    }

    Err(ConsoleInputError::UnknownForm)
}

fn split_sender(rest: &str) -> Result<(PlayerId, &str), ConsoleInputError> {
    let (sender, content) = rest.split_once(':').ok_or(ConsoleInputError::MissingColon)?;
    Ok((PlayerId::new(sender.trim())?, content.trim_start()))
}

fn mentions_in(content: &str) -> Result<Vec<PlayerId>, ConsoleInputError> {
    content
        .split_whitespace()
        .filter_map(|token| token.strip_prefix('@'))
        .map(|name| name.trim_end_matches(|c: char| c == ',' || c == '.'))
        .filter(|name| !name.is_empty())
        .map(|name| PlayerId::new(name).map_err(ConsoleInputError::from))
        .collect()
}

fn parse_reaction(rest: &str) -> Result<Option<ConsoleInput>, ConsoleInputError> {
    let parts: Vec<&str> = rest.split_whitespace().collect();
    let [voter, channel, prompt, tier] = parts.as_slice() else {
        return Err(ConsoleInputError::MalformedReaction);
    };
    let channel = channel
        .strip_prefix('#')
        .ok_or(ConsoleInputError::MalformedReaction)?;

    let high_confidence = match *tier {
        "1" => false,
        "2" => true,
        other => {
            debug!(reaction = other, "dropping reaction that is not a vote");
            return Ok(None);
        }
    };

    Ok(Some(ConsoleInput::Reaction(VoteReaction::new(
        ChannelId::new(channel)?,
        PlayerId::new(*voter)?,
        PromptHandle::from_string(*prompt),
        high_confidence,
    ))))
}
