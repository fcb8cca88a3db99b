//! GameDispatcher - Owns every live session, keyed by channel.
//!
//! At most one session per channel. Sessions in different channels run
//! independently; each session sits behind its own mutex so inbound events
//! for one channel are handled strictly one at a time.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use tokio::sync::{Mutex, RwLock};
use tracing::{debug, info};

use crate::domain::foundation::{ChannelId, PlayerId};
use crate::domain::game::{ChannelCommand, Game, GameError};

use super::inbound::{ChannelMessage, PrivateMessage, VoteReaction};
use super::messages;
use super::session::{GamePorts, GameSession, SessionSettings};

struct SessionSlot {
    /// Creation order; private messages go to the oldest matching session.
    seq: u64,
    session: Arc<Mutex<GameSession>>,
}

/// Routes inbound chat events to the right session.
pub struct GameDispatcher {
    sessions: RwLock<HashMap<ChannelId, SessionSlot>>,
    next_seq: AtomicU64,
    settings: SessionSettings,
    ports: GamePorts,
}

impl GameDispatcher {
    pub fn new(settings: SessionSettings, ports: GamePorts) -> Self {
        Self {
            sessions: RwLock::new(HashMap::new()),
            next_seq: AtomicU64::new(0),
            settings,
            ports,
        }
    }

    /// Number of live sessions.
    pub async fn session_count(&self) -> usize {
        self.sessions.read().await.len()
    }

    pub async fn has_game(&self, channel: &ChannelId) -> bool {
        self.sessions.read().await.contains_key(channel)
    }

    /// A copy of the channel's game state, if one is live.
    pub async fn game_snapshot(&self, channel: &ChannelId) -> Option<Game> {
        let session = self.session_for(channel).await?;
        let guard = session.lock().await;
        Some(guard.game().clone())
    }

    /// Handles a public message: `startgame` and `endgame` here, anything
    /// else by the channel's session.
    pub async fn handle_channel_message(&self, message: &ChannelMessage) -> Result<(), GameError> {
        match ChannelCommand::parse(&self.settings.command_prefix, &message.content) {
            Some(ChannelCommand::StartGame) => {
                return self
                    .start_game(&message.channel, &message.author, message.mentions.clone())
                    .await;
            }
            Some(ChannelCommand::EndGame) => {
                if self.end_game(&message.channel, &message.author).await? {
                    return Ok(());
                }
            }
            _ => {}
        }

        let Some(session) = self.session_for(&message.channel).await else {
            return Ok(());
        };
        let mut session = session.lock().await;
        session.handle_channel_message(message).await
    }

    /// Creates a session for `channel` and joins `players`.
    ///
    /// Refused with a public notice when the channel already has a game.
    pub async fn start_game(
        &self,
        channel: &ChannelId,
        started_by: &PlayerId,
        players: Vec<PlayerId>,
    ) -> Result<(), GameError> {
        let mut session = {
            let mut sessions = self.sessions.write().await;
            if sessions.contains_key(channel) {
                drop(sessions);
                debug!(channel = %channel, "game already exists");
                self.ports
                    .chat
                    .announce(channel, messages::GAME_ALREADY_EXISTS)
                    .await?;
                return Ok(());
            }

            let session = Arc::new(Mutex::new(GameSession::new(
                channel.clone(),
                &self.settings,
                self.ports.clone(),
            )));
            // Held until the players have joined so no other event sees an
            // empty game.
            let guard = Arc::clone(&session).lock_owned().await;
            let seq = self.next_seq.fetch_add(1, Ordering::SeqCst);
            sessions.insert(channel.clone(), SessionSlot { seq, session });
            guard
        };

        info!(channel = %channel, players = players.len(), "starting new game");
        session.open(started_by).await?;
        session.join(players).await
    }

    /// Removes the channel's session. Returns false if there was none.
    pub async fn end_game(&self, channel: &ChannelId, ended_by: &PlayerId) -> Result<bool, GameError> {
        let removed = self.sessions.write().await.remove(channel);
        let Some(slot) = removed else {
            debug!(channel = %channel, "no game to end");
            return Ok(false);
        };

        let session = slot.session.lock().await;
        session.close(ended_by).await?;
        Ok(true)
    }

    /// Delivers a private message to the oldest session the sender plays in.
    pub async fn handle_private_message(&self, message: &PrivateMessage) -> Result<(), GameError> {
        let mut candidates: Vec<(u64, Arc<Mutex<GameSession>>)> = {
            let sessions = self.sessions.read().await;
            sessions
                .values()
                .map(|slot| (slot.seq, Arc::clone(&slot.session)))
                .collect()
        };
        candidates.sort_by_key(|(seq, _)| *seq);

        for (_, session) in candidates {
            let mut session = session.lock().await;
            if session.game().is_player(&message.author) {
                return session.handle_private_message(message).await;
            }
        }

        debug!(player = %message.author, "private message from someone not in any game");
        Ok(())
    }

    /// Delivers a vote reaction to the session in the reaction's channel.
    pub async fn handle_reaction(&self, reaction: &VoteReaction) -> Result<(), GameError> {
        let Some(session) = self.session_for(&reaction.channel).await else {
            debug!(channel = %reaction.channel, "reaction in a channel without a game");
            return Ok(());
        };
        let mut session = session.lock().await;
        session
            .handle_vote(&reaction.voter, &reaction.prompt, reaction.confidence)
            .await
    }

    async fn session_for(&self, channel: &ChannelId) -> Option<Arc<Mutex<GameSession>>> {
        self.sessions
            .read()
            .await
            .get(channel)
            .map(|slot| Arc::clone(&slot.session))
    }
}
