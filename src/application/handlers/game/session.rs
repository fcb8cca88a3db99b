//! GameSession - Drives one channel's `Game` through the ports.
//!
//! The aggregate decides; the session talks. Every inbound operation runs
//! to completion before the next one starts (the dispatcher serializes
//! access), posting announcements, private messages and vote prompts as it
//! goes. Inputs the game ignores are logged at `debug` and return `Ok`.

use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::domain::foundation::{
    ChannelId, EventEnvelope, EventId, PlayerId, PromptHandle, SerializableDomainEvent, Timestamp,
};
use crate::domain::game::{
    AnswerChosen, ChannelCommand, Confidence, Game, GameEnded, GameError, GameRules, GameStarted,
    Ignored, PlayersJoined, RoundCompleted, RoundStarted, VoteOutcome,
};
use crate::ports::{ChatGateway, EventPublisher, Shuffler};

use super::inbound::{ChannelMessage, PrivateMessage};
use super::messages;

/// Collaborators shared by every session.
#[derive(Clone)]
pub struct GamePorts {
    pub chat: Arc<dyn ChatGateway>,
    pub shuffler: Arc<dyn Shuffler>,
    pub events: Arc<dyn EventPublisher>,
}

impl GamePorts {
    pub fn new(
        chat: Arc<dyn ChatGateway>,
        shuffler: Arc<dyn Shuffler>,
        events: Arc<dyn EventPublisher>,
    ) -> Self {
        Self {
            chat,
            shuffler,
            events,
        }
    }
}

/// Per-session settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionSettings {
    /// Prefix that introduces channel commands (e.g. `!`).
    pub command_prefix: String,
    pub rules: GameRules,
}

impl Default for SessionSettings {
    fn default() -> Self {
        Self {
            command_prefix: "!".to_string(),
            rules: GameRules::default(),
        }
    }
}

/// One live game and the ports it talks through.
pub struct GameSession {
    game: Game,
    ports: GamePorts,
    command_prefix: String,
}

impl GameSession {
    pub fn new(channel: ChannelId, settings: &SessionSettings, ports: GamePorts) -> Self {
        Self {
            game: Game::new(channel, settings.rules),
            ports,
            command_prefix: settings.command_prefix.clone(),
        }
    }

    pub fn game(&self) -> &Game {
        &self.game
    }

    pub fn channel_id(&self) -> &ChannelId {
        self.game.channel_id()
    }

    /// Publishes `GameStarted`. Called once by the dispatcher.
    pub async fn open(&self, started_by: &PlayerId) -> Result<(), GameError> {
        let event = GameStarted {
            event_id: EventId::new(),
            game_id: *self.game.id(),
            channel_id: self.game.channel_id().clone(),
            started_at: *self.game.created_at(),
        };
        info!(channel = %self.channel_id(), game_id = %self.game.id(), "game started");
        self.publish(event.to_envelope().with_triggered_by(started_by.as_str()))
            .await
    }

    /// Says goodbye and publishes `GameEnded`. Called once by the dispatcher.
    pub async fn close(&self, ended_by: &PlayerId) -> Result<(), GameError> {
        self.ports
            .chat
            .announce(self.channel_id(), messages::THANKS_FOR_PLAYING)
            .await?;

        let event = GameEnded {
            event_id: EventId::new(),
            game_id: *self.game.id(),
            channel_id: self.game.channel_id().clone(),
            rounds_completed: self.game.rounds_completed(),
            ended_at: Timestamp::now(),
        };
        info!(
            channel = %self.channel_id(),
            rounds_completed = self.game.rounds_completed(),
            "game ended"
        );
        self.publish(event.to_envelope().with_triggered_by(ended_by.as_str()))
            .await
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Inbound operations
    // ─────────────────────────────────────────────────────────────────────────

    /// Adds players, announces the newcomers and starts the first round
    /// once enough have joined.
    pub async fn join(&mut self, players: Vec<PlayerId>) -> Result<(), GameError> {
        let outcome = self.game.add_players(players);

        let mut announced = Ok(());
        if outcome.added.is_empty() {
            debug!(channel = %self.channel_id(), "join added nobody");
        } else {
            info!(channel = %self.channel_id(), added = outcome.added.len(), "players joined");
            announced = self
                .ports
                .chat
                .announce(self.channel_id(), &messages::players_added(&outcome.added))
                .await;

            let event = PlayersJoined {
                event_id: EventId::new(),
                game_id: *self.game.id(),
                players: outcome.added,
                joined_at: Timestamp::now(),
            };
            self.publish(event.to_envelope()).await?;
        }

        // The roster has crossed the threshold even if the announcement
        // failed; no later join would trigger the start again.
        if outcome.should_start_round {
            self.start_round().await?;
        }
        Ok(announced?)
    }

    /// Hands the round to the next setter.
    pub async fn start_round(&mut self) -> Result<(), GameError> {
        let setter = match self.game.start_round() {
            Ok(setter) => setter,
            Err(reason) => {
                self.ignored("start_round", None, reason);
                return Ok(());
            }
        };

        info!(
            channel = %self.channel_id(),
            setter = %setter,
            round = self.game.rounds_started(),
            "round started"
        );
        self.ports
            .chat
            .announce(
                self.channel_id(),
                &messages::round_prompt(&setter, &self.command_prefix),
            )
            .await?;

        let event = RoundStarted {
            event_id: EventId::new(),
            game_id: *self.game.id(),
            round_number: self.game.rounds_started(),
            setter,
            started_at: Timestamp::now(),
        };
        self.publish(event.to_envelope()).await
    }

    /// Handles `nextround`, `addplayers` and `question`; other text is
    /// ignored.
    pub async fn handle_channel_message(&mut self, message: &ChannelMessage) -> Result<(), GameError> {
        match ChannelCommand::parse(&self.command_prefix, &message.content) {
            Some(ChannelCommand::NextRound) => self.start_round().await,
            Some(ChannelCommand::AddPlayers) => self.join(message.mentions.clone()).await,
            Some(ChannelCommand::Question(text)) => self.ask_question(&message.author, &text).await,
            Some(command) => {
                debug!(channel = %self.channel_id(), ?command, "left to the dispatcher");
                Ok(())
            }
            None => Ok(()),
        }
    }

    /// Routes a private message to answer selection (setter) or answer
    /// collection (everyone else).
    pub async fn handle_private_message(&mut self, message: &PrivateMessage) -> Result<(), GameError> {
        let author = &message.author;
        if !self.game.is_player(author) {
            self.ignored("private_message", Some(author), Ignored::NotAPlayer);
            return Ok(());
        }
        if self.game.question().is_none() {
            self.ignored("private_message", Some(author), Ignored::NoQuestion);
            return Ok(());
        }

        if self.game.setter() == Some(author) {
            return match message.as_selection() {
                Some(index) => self.select_answer(author, index).await,
                None => {
                    debug!(channel = %self.channel_id(), "setter message is not a selection");
                    Ok(())
                }
            };
        }

        self.submit_answer(author, &message.content).await
    }

    /// Counts a confidence reaction on a vote prompt.
    pub async fn handle_vote(
        &mut self,
        voter: &PlayerId,
        prompt: &PromptHandle,
        confidence: Confidence,
    ) -> Result<(), GameError> {
        let reveal = match self.game.register_vote(voter, prompt, confidence) {
            Ok(VoteOutcome::Counted { voter_credit }) => {
                debug!(
                    channel = %self.channel_id(),
                    voter = %voter,
                    credit = voter_credit,
                    "vote counted"
                );
                return Ok(());
            }
            Ok(VoteOutcome::RoundComplete(reveal)) => reveal,
            Err(reason) => {
                self.ignored("vote", Some(voter), reason);
                return Ok(());
            }
        };

        info!(channel = %self.channel_id(), author = %reveal.author, "all players have voted");
        let channel = self.channel_id();
        self.ports
            .chat
            .announce(channel, &messages::reveal(&reveal.answer, &reveal.author))
            .await?;
        self.ports
            .chat
            .announce(channel, &messages::scoring_pending(&self.command_prefix))
            .await?;

        let event = RoundCompleted {
            event_id: EventId::new(),
            game_id: *self.game.id(),
            round_number: self.game.rounds_started(),
            setter: reveal.setter,
            question: reveal.question,
            author: reveal.author,
            answer: reveal.answer,
            completed_at: Timestamp::now(),
        };
        self.publish(event.to_envelope().with_triggered_by(voter.as_str()))
            .await
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Round steps
    // ─────────────────────────────────────────────────────────────────────────

    async fn ask_question(&mut self, author: &PlayerId, text: &str) -> Result<(), GameError> {
        let asked = match self.game.ask_question(author, text) {
            Ok(asked) => asked,
            Err(reason) => {
                self.ignored("question", Some(author), reason);
                return Ok(());
            }
        };

        info!(channel = %self.channel_id(), setter = %asked.setter, "question set");
        let request = messages::answer_request(&asked.setter, &asked.question);
        self.notify_each(&asked.answerers, &request).await
    }

    async fn submit_answer(&mut self, author: &PlayerId, text: &str) -> Result<(), GameError> {
        let recorded = match self.game.submit_answer(author, text) {
            Ok(recorded) => recorded,
            Err(reason) => {
                self.ignored("answer", Some(author), reason);
                return Ok(());
            }
        };

        debug!(channel = %self.channel_id(), player = %author, "answer accepted");
        self.ports.chat.acknowledge_answer(author).await?;

        if recorded.all_answered {
            self.request_selection().await?;
        }
        Ok(())
    }

    async fn request_selection(&mut self) -> Result<(), GameError> {
        let request = match self.game.open_selection(self.ports.shuffler.as_ref()) {
            Ok(request) => request,
            Err(reason) => {
                self.ignored("request_selection", None, reason);
                return Ok(());
            }
        };

        info!(
            channel = %self.channel_id(),
            setter = %request.setter,
            options = request.options.len(),
            "asking setter to select an answer"
        );
        self.ports
            .chat
            .notify(
                &request.setter,
                &messages::selection_request(&request.question, &request.options),
            )
            .await?;
        Ok(())
    }

    async fn select_answer(&mut self, setter: &PlayerId, index: usize) -> Result<(), GameError> {
        let ballot = match self.game.draw_ballot(index, self.ports.shuffler.as_ref()) {
            Ok(ballot) => ballot,
            Err(reason) => {
                self.ignored("select", Some(setter), reason);
                return Ok(());
            }
        };

        // Selection stays open until every prompt is posted, so a failed
        // post can be retried by choosing again.
        let channel = self.channel_id().clone();
        let mut prompts = Vec::with_capacity(ballot.entries.len());
        for (i, entry) in ballot.entries.iter().enumerate() {
            let display_index = i + 1;
            let handle = self
                .ports
                .chat
                .present_vote_prompt(&channel, display_index, &messages::vote_prompt(display_index, &entry.text))
                .await?;
            prompts.push(handle);
        }

        if let Err(reason) = self.game.select_answer(&ballot, prompts) {
            self.ignored("select", Some(setter), reason);
            return Ok(());
        }
        info!(channel = %self.channel_id(), index, "answer selected, voting open");

        let event = AnswerChosen {
            event_id: EventId::new(),
            game_id: *self.game.id(),
            round_number: self.game.rounds_started(),
            answer_count: ballot.entries.len(),
            chosen_at: Timestamp::now(),
        };
        self.publish(event.to_envelope().with_triggered_by(setter.as_str()))
            .await
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Helpers
    // ─────────────────────────────────────────────────────────────────────────

    /// Sends `text` to every player, returning the first failure after
    /// trying them all.
    async fn notify_each(&self, players: &[PlayerId], text: &str) -> Result<(), GameError> {
        let mut first_error = None;
        for player in players {
            if let Err(err) = self.ports.chat.notify(player, text).await {
                warn!(player = %player, error = %err, "private message not delivered");
                first_error.get_or_insert(err);
            }
        }
        match first_error {
            Some(err) => Err(err.into()),
            None => Ok(()),
        }
    }

    async fn publish(&self, envelope: EventEnvelope) -> Result<(), GameError> {
        self.ports
            .events
            .publish(envelope.with_channel_id(self.channel_id().as_str()))
            .await?;
        Ok(())
    }

    fn ignored(&self, action: &'static str, player: Option<&PlayerId>, reason: Ignored) {
        debug!(
            channel = %self.channel_id(),
            action,
            player = player.map(PlayerId::as_str).unwrap_or("-"),
            reason = %reason,
            "input ignored"
        );
    }
}
