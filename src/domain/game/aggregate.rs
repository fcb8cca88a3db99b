//! Game aggregate - one channel's Say Anything session.
//!
//! The game owns the roster, the cumulative scores, the setter rotation and
//! the current `Round`. Every operation either applies a transition and
//! reports what happened, or returns an [`Ignored`] reason and leaves the
//! state untouched. Nothing here performs I/O; the application layer turns
//! outcomes into chat messages.
//!
//! # Round flow
//!
//! 1. `start_round` picks the next setter round-robin
//! 2. `ask_question` records the setter's question
//! 3. `submit_answer` collects one answer per non-setter
//! 4. `open_selection` hands the setter a shuffled private list
//! 5. `draw_ballot` builds the public ballot for the setter's choice and
//!    `select_answer` commits it once its vote prompts are posted
//! 6. `register_vote` tallies credit until everyone has voted

use std::collections::HashMap;
use std::fmt;

use crate::domain::foundation::{ChannelId, GameId, PlayerId, PromptHandle, Timestamp};
use crate::ports::{shuffled_order, Shuffler};

use super::{AnswerEntry, Confidence, GameRules, Round, RoundPhase};

/// Why an inbound action had no effect.
///
/// Invalid input is never an error for the game: it is dropped and the
/// reason is only reported for logging.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Ignored {
    NotAPlayer,
    EmptyRoster,
    RoundInProgress,
    NoActiveRound,
    NotTheSetter,
    QuestionAlreadySet,
    EmptyQuestion,
    NoQuestion,
    SetterCannotAnswer,
    AnswersClosed,
    SelectionNotOpen,
    IndexOutOfRange { index: usize, len: usize },
    VotingNotOpen,
    NotAVoter,
    UnknownPrompt,
}

impl fmt::Display for Ignored {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Ignored::NotAPlayer => write!(f, "sender is not in the game"),
            Ignored::EmptyRoster => write!(f, "no players to pick a setter from"),
            Ignored::RoundInProgress => write!(f, "a round is already in progress"),
            Ignored::NoActiveRound => write!(f, "no round is in progress"),
            Ignored::NotTheSetter => write!(f, "sender is not the question setter"),
            Ignored::QuestionAlreadySet => write!(f, "the question is already set"),
            Ignored::EmptyQuestion => write!(f, "question text is empty"),
            Ignored::NoQuestion => write!(f, "no question has been asked"),
            Ignored::SetterCannotAnswer => write!(f, "the setter cannot answer their own question"),
            Ignored::AnswersClosed => write!(f, "answers are closed for this round"),
            Ignored::SelectionNotOpen => write!(f, "the setter is not selecting an answer"),
            Ignored::IndexOutOfRange { index, len } => {
                write!(f, "selection {} is outside 1..={}", index, len)
            }
            Ignored::VotingNotOpen => write!(f, "voting is not open"),
            Ignored::NotAVoter => write!(f, "sender is not a tracked voter"),
            Ignored::UnknownPrompt => write!(f, "reaction is not on a vote prompt"),
        }
    }
}

/// Result of adding players.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JoinOutcome {
    /// Newly added players, in input order.
    pub added: Vec<PlayerId>,
    /// True when this join filled the roster and the first round should start.
    pub should_start_round: bool,
}

/// The setter's question was accepted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionAsked {
    pub setter: PlayerId,
    pub question: String,
    /// Everyone who should be asked for an answer.
    pub answerers: Vec<PlayerId>,
}

/// An answer was stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnswerRecorded {
    /// True when every non-setter has now answered.
    pub all_answered: bool,
}

/// The setter's private list of answers, in presentation order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectionRequest {
    pub setter: PlayerId,
    pub question: String,
    pub options: Vec<String>,
}

/// The setter's choice and the public answer list to post for voting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ballot {
    /// 1-based position in the setter's selection list.
    pub index: usize,
    pub chosen: PlayerId,
    /// Public answer list, independently shuffled from the selection list.
    pub entries: Vec<AnswerEntry>,
}

/// Revealed at the end of a round.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoundReveal {
    pub setter: PlayerId,
    pub question: String,
    pub author: PlayerId,
    pub answer: String,
}

/// Effect of an accepted vote.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VoteOutcome {
    /// Vote counted; the round continues.
    Counted { voter_credit: u32 },
    /// Vote counted and everyone has voted; the round is over.
    RoundComplete(RoundReveal),
}

/// Game aggregate - the per-channel session.
///
/// # Invariants
///
/// - `roster` holds each player once, in join order
/// - every roster member has a `scores` entry
/// - at most one round (and therefore one setter) is active
#[derive(Debug, Clone)]
pub struct Game {
    id: GameId,
    channel_id: ChannelId,
    rules: GameRules,
    roster: Vec<PlayerId>,
    scores: HashMap<PlayerId, i64>,
    setter_cursor: Option<usize>,
    round: Option<Round>,
    rounds_started: u32,
    rounds_completed: u32,
    created_at: Timestamp,
}

impl Game {
    /// Create an empty game for `channel_id`.
    pub fn new(channel_id: ChannelId, rules: GameRules) -> Self {
        Self {
            id: GameId::new(),
            channel_id,
            rules,
            roster: Vec::new(),
            scores: HashMap::new(),
            setter_cursor: None,
            round: None,
            rounds_started: 0,
            rounds_completed: 0,
            created_at: Timestamp::now(),
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Accessors
    // ─────────────────────────────────────────────────────────────────────────

    pub fn id(&self) -> &GameId {
        &self.id
    }

    pub fn channel_id(&self) -> &ChannelId {
        &self.channel_id
    }

    pub fn rules(&self) -> &GameRules {
        &self.rules
    }

    /// Players in join order.
    pub fn roster(&self) -> &[PlayerId] {
        &self.roster
    }

    pub fn is_player(&self, player: &PlayerId) -> bool {
        self.scores.contains_key(player)
    }

    pub fn score_of(&self, player: &PlayerId) -> Option<i64> {
        self.scores.get(player).copied()
    }

    pub fn scores(&self) -> &HashMap<PlayerId, i64> {
        &self.scores
    }

    /// The current round, if a setter is active.
    pub fn round(&self) -> Option<&Round> {
        self.round.as_ref()
    }

    pub fn setter(&self) -> Option<&PlayerId> {
        self.round.as_ref().map(Round::setter)
    }

    pub fn question(&self) -> Option<&str> {
        self.round.as_ref().and_then(Round::question)
    }

    pub fn phase(&self) -> RoundPhase {
        self.round.as_ref().map_or(RoundPhase::Idle, Round::phase)
    }

    pub fn rounds_started(&self) -> u32 {
        self.rounds_started
    }

    pub fn rounds_completed(&self) -> u32 {
        self.rounds_completed
    }

    pub fn created_at(&self) -> &Timestamp {
        &self.created_at
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Roster & round lifecycle
    // ─────────────────────────────────────────────────────────────────────────

    /// Add players not already in the game, keeping input order.
    ///
    /// Duplicates (already present or repeated in `players`) are skipped.
    /// Requests the first round when this call takes the roster from below
    /// `min_players` to at least `min_players` while no round is active.
    pub fn add_players(&mut self, players: impl IntoIterator<Item = PlayerId>) -> JoinOutcome {
        let before = self.roster.len();
        let mut added = Vec::new();

        for player in players {
            if self.scores.contains_key(&player) {
                continue;
            }
            self.scores.insert(player.clone(), 0);
            self.roster.push(player.clone());
            added.push(player);
        }

        let min = self.rules.min_players;
        let should_start_round =
            before < min && self.roster.len() >= min && self.round.is_none();

        JoinOutcome {
            added,
            should_start_round,
        }
    }

    /// Start the next round with the next setter in join order.
    ///
    /// Returns the new setter. Ignored while a round is active or when
    /// there is nobody to pick.
    pub fn start_round(&mut self) -> Result<PlayerId, Ignored> {
        if self.round.is_some() {
            return Err(Ignored::RoundInProgress);
        }
        if self.roster.is_empty() {
            return Err(Ignored::EmptyRoster);
        }

        let next = self.setter_cursor.map_or(0, |cursor| cursor + 1);
        let next = if next >= self.roster.len() { 0 } else { next };
        self.setter_cursor = Some(next);

        let setter = self.roster[next].clone();
        self.round = Some(Round::new(setter.clone()));
        self.rounds_started += 1;
        Ok(setter)
    }

    /// Record the setter's question for this round.
    pub fn ask_question(&mut self, author: &PlayerId, text: &str) -> Result<QuestionAsked, Ignored> {
        let round = self.round.as_mut().ok_or(Ignored::NoActiveRound)?;
        if round.question().is_some() {
            return Err(Ignored::QuestionAlreadySet);
        }
        if round.setter() != author {
            return Err(Ignored::NotTheSetter);
        }

        let question = text.trim();
        if question.is_empty() {
            return Err(Ignored::EmptyQuestion);
        }
        if !round.ask(question.to_string()) {
            return Err(Ignored::QuestionAlreadySet);
        }

        let setter = round.setter().clone();
        let answerers = self
            .roster
            .iter()
            .filter(|player| **player != setter)
            .cloned()
            .collect();

        Ok(QuestionAsked {
            setter,
            question: question.to_string(),
            answerers,
        })
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Answers & selection
    // ─────────────────────────────────────────────────────────────────────────

    /// Store `author`'s answer, replacing any earlier one this round.
    pub fn submit_answer(&mut self, author: &PlayerId, text: &str) -> Result<AnswerRecorded, Ignored> {
        if !self.is_player(author) {
            return Err(Ignored::NotAPlayer);
        }
        let round = self.round.as_mut().ok_or(Ignored::NoActiveRound)?;
        if round.question().is_none() {
            return Err(Ignored::NoQuestion);
        }
        if round.phase().answers_closed() {
            return Err(Ignored::AnswersClosed);
        }
        if round.setter() == author {
            return Err(Ignored::SetterCannotAnswer);
        }

        round.record_answer(author.clone(), text.trim().to_string());

        let all_answered = round.answers().len() == self.roster.len().saturating_sub(1);
        Ok(AnswerRecorded { all_answered })
    }

    /// Shuffle the answers into the setter's private selection list.
    pub fn open_selection(&mut self, shuffler: &dyn Shuffler) -> Result<SelectionRequest, Ignored> {
        let round = self.round.as_mut().ok_or(Ignored::NoActiveRound)?;
        if round.phase() != RoundPhase::CollectingAnswers {
            return Err(Ignored::AnswersClosed);
        }

        let entries = round.answer_entries();
        let pool: Vec<AnswerEntry> = shuffled_order(shuffler, entries.len())
            .into_iter()
            .map(|i| entries[i].clone())
            .collect();
        let options = pool.iter().map(|entry| entry.text.clone()).collect();

        if !round.open_selection(pool) {
            return Err(Ignored::NoQuestion);
        }

        Ok(SelectionRequest {
            setter: round.setter().clone(),
            question: round.question().unwrap_or_default().to_string(),
            options,
        })
    }

    /// Build the public ballot for the setter's 1-based choice.
    ///
    /// The ballot is a second, independent shuffle of all answers so its
    /// numbering cannot be matched against the setter's private list.
    /// Nothing changes until the ballot is passed to [`Game::select_answer`].
    pub fn draw_ballot(&self, index: usize, shuffler: &dyn Shuffler) -> Result<Ballot, Ignored> {
        let round = self.round.as_ref().ok_or(Ignored::NoActiveRound)?;
        let pool = match round.selection_pool() {
            Some(pool) if !pool.is_empty() => pool,
            _ => return Err(Ignored::SelectionNotOpen),
        };
        let chosen = index
            .checked_sub(1)
            .and_then(|i| pool.get(i))
            .map(|entry| entry.author.clone())
            .ok_or(Ignored::IndexOutOfRange {
                index,
                len: pool.len(),
            })?;

        let answers = round.answer_entries();
        let entries = shuffled_order(shuffler, answers.len())
            .into_iter()
            .map(|i| answers[i].clone())
            .collect();

        Ok(Ballot {
            index,
            chosen,
            entries,
        })
    }

    /// Fix the chosen answer and open voting.
    ///
    /// `prompts[i]` is the posted vote prompt for `ballot.entries[i]`.
    /// Every current roster member, the setter included, becomes a voter.
    pub fn select_answer(&mut self, ballot: &Ballot, prompts: Vec<PromptHandle>) -> Result<(), Ignored> {
        let round = self.round.as_mut().ok_or(Ignored::NoActiveRound)?;
        if prompts.len() != ballot.entries.len() {
            return Err(Ignored::SelectionNotOpen);
        }
        match round.choose(ballot.index, self.roster.iter().cloned()) {
            Some(chosen) if chosen == ballot.chosen => {}
            _ => return Err(Ignored::SelectionNotOpen),
        }

        for (handle, entry) in prompts.into_iter().zip(&ballot.entries) {
            round.bind_prompt(handle, entry.author.clone());
        }
        Ok(())
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Voting
    // ─────────────────────────────────────────────────────────────────────────

    /// Count a vote and complete the round once every voter has spent the
    /// threshold.
    ///
    /// Completing clears the setter so the next round can start. Scores
    /// are left as they are; see [`Game::score_round`].
    pub fn register_vote(
        &mut self,
        voter: &PlayerId,
        handle: &PromptHandle,
        confidence: Confidence,
    ) -> Result<VoteOutcome, Ignored> {
        let threshold = self.rules.vote_threshold;
        let round = self.round.as_mut().ok_or(Ignored::VotingNotOpen)?;
        if round.chosen_answerer().is_none() {
            return Err(Ignored::VotingNotOpen);
        }
        if !round.is_voter(voter) {
            return Err(Ignored::NotAVoter);
        }
        if round.vote_target(handle).is_none() {
            return Err(Ignored::UnknownPrompt);
        }

        let voter_credit = round
            .add_credit(voter, confidence.credit())
            .ok_or(Ignored::NotAVoter)?;

        if !round.voting_complete(threshold) {
            return Ok(VoteOutcome::Counted { voter_credit });
        }

        let reveal = match round.chosen_answerer() {
            Some(author) => RoundReveal {
                setter: round.setter().clone(),
                question: round.question().unwrap_or_default().to_string(),
                author: author.clone(),
                answer: round.answer_of(author).unwrap_or_default().to_string(),
            },
            None => return Err(Ignored::VotingNotOpen),
        };

        round.finish();
        if let Some(finished) = self.round.take() {
            self.score_round(&finished);
        }
        self.rounds_completed += 1;

        Ok(VoteOutcome::RoundComplete(reveal))
    }

    /// Award points for a finished round.
    ///
    /// Scoring rules are not defined yet: this is deliberately a no-op and
    /// `scores` stay at their join-time values.
    pub fn score_round(&mut self, _round: &Round) {}
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    /// Keeps the input order.
    struct Identity;

    impl Shuffler for Identity {
        fn shuffle(&self, _indices: &mut [usize]) {}
    }

    /// Applies queued permutations in turn, identity once exhausted.
    struct Scripted(Mutex<Vec<Vec<usize>>>);

    impl Scripted {
        fn new(orders: Vec<Vec<usize>>) -> Self {
            Self(Mutex::new(orders))
        }
    }

    impl Shuffler for Scripted {
        fn shuffle(&self, indices: &mut [usize]) {
            let mut orders = self.0.lock().unwrap();
            if orders.is_empty() {
                return;
            }
            let order = orders.remove(0);
            let original = indices.to_vec();
            for (slot, &from) in indices.iter_mut().zip(order.iter()) {
                *slot = original[from];
            }
        }
    }

    fn player(id: &str) -> PlayerId {
        PlayerId::new(id).unwrap()
    }

    fn new_game() -> Game {
        Game::new(ChannelId::new("general").unwrap(), GameRules::default())
    }

    fn handle(id: &str) -> PromptHandle {
        PromptHandle::from_string(id)
    }

    /// Three players joined, alice setting "favorite food".
    fn asked_game() -> Game {
        let mut game = new_game();
        let join = game.add_players(vec![player("alice"), player("bob"), player("carol")]);
        assert!(join.should_start_round);
        game.start_round().unwrap();
        game.ask_question(&player("alice"), "favorite food").unwrap();
        game
    }

    /// Voting open on bob's answer, prompts p1 (bob) and p2 (carol) bound.
    fn voting_game() -> Game {
        let mut game = asked_game();
        game.submit_answer(&player("bob"), "pizza").unwrap();
        game.submit_answer(&player("carol"), "tacos").unwrap();
        game.open_selection(&Identity).unwrap();
        let ballot = game.draw_ballot(1, &Identity).unwrap();
        assert_eq!(ballot.chosen, player("bob"));
        game.select_answer(&ballot, vec![handle("p1"), handle("p2")]).unwrap();
        game
    }

    // Roster tests

    #[test]
    fn new_game_is_idle_and_empty() {
        let game = new_game();
        assert!(game.roster().is_empty());
        assert_eq!(game.phase(), RoundPhase::Idle);
        assert!(game.setter().is_none());
    }

    #[test]
    fn add_players_skips_duplicates_and_keeps_order() {
        let mut game = new_game();
        let outcome = game.add_players(vec![player("bob"), player("alice"), player("bob")]);
        assert_eq!(outcome.added, vec![player("bob"), player("alice")]);

        let outcome = game.add_players(vec![player("alice"), player("carol")]);
        assert_eq!(outcome.added, vec![player("carol")]);
        assert_eq!(game.roster(), &[player("bob"), player("alice"), player("carol")]);
    }

    #[test]
    fn joined_players_start_with_zero_score() {
        let mut game = new_game();
        game.add_players(vec![player("alice")]);
        assert_eq!(game.score_of(&player("alice")), Some(0));
        assert_eq!(game.score_of(&player("bob")), None);
    }

    #[test]
    fn single_player_does_not_trigger_start() {
        let mut game = new_game();
        assert!(!game.add_players(vec![player("alice")]).should_start_round);
        assert!(game.add_players(vec![player("bob")]).should_start_round);
    }

    #[test]
    fn join_to_full_roster_does_not_restart() {
        let mut game = new_game();
        game.add_players(vec![player("alice"), player("bob")]);
        let outcome = game.add_players(vec![player("carol")]);
        assert!(!outcome.should_start_round);
    }

    #[test]
    fn join_during_round_does_not_request_start() {
        let mut game = new_game();
        game.add_players(vec![player("alice")]);
        game.start_round().unwrap();
        let outcome = game.add_players(vec![player("bob")]);
        assert!(!outcome.should_start_round);
    }

    // Round lifecycle tests

    #[test]
    fn start_round_on_empty_roster_is_ignored() {
        let mut game = new_game();
        assert_eq!(game.start_round(), Err(Ignored::EmptyRoster));
        assert_eq!(game.phase(), RoundPhase::Idle);
    }

    #[test]
    fn start_round_twice_is_ignored() {
        let mut game = new_game();
        game.add_players(vec![player("alice"), player("bob")]);
        assert_eq!(game.start_round(), Ok(player("alice")));
        assert_eq!(game.start_round(), Err(Ignored::RoundInProgress));
        assert_eq!(game.setter(), Some(&player("alice")));
        assert_eq!(game.rounds_started(), 1);
    }

    #[test]
    fn question_only_from_setter_and_only_once() {
        let mut game = new_game();
        game.add_players(vec![player("alice"), player("bob")]);
        game.start_round().unwrap();

        assert_eq!(
            game.ask_question(&player("bob"), "hijack"),
            Err(Ignored::NotTheSetter)
        );
        let asked = game.ask_question(&player("alice"), "  best movie?  ").unwrap();
        assert_eq!(asked.question, "best movie?");
        assert_eq!(asked.answerers, vec![player("bob")]);
        assert_eq!(
            game.ask_question(&player("alice"), "another"),
            Err(Ignored::QuestionAlreadySet)
        );
        assert_eq!(game.question(), Some("best movie?"));
    }

    #[test]
    fn blank_question_is_ignored() {
        let mut game = new_game();
        game.add_players(vec![player("alice"), player("bob")]);
        game.start_round().unwrap();
        assert_eq!(game.ask_question(&player("alice"), "   "), Err(Ignored::EmptyQuestion));
        assert_eq!(game.phase(), RoundPhase::AwaitingQuestion);
    }

    #[test]
    fn question_without_round_is_ignored() {
        let mut game = new_game();
        game.add_players(vec![player("alice")]);
        assert_eq!(game.ask_question(&player("alice"), "q"), Err(Ignored::NoActiveRound));
    }

    // Answer tests

    #[test]
    fn answer_before_question_is_ignored() {
        let mut game = new_game();
        game.add_players(vec![player("alice"), player("bob")]);
        game.start_round().unwrap();
        assert_eq!(game.submit_answer(&player("bob"), "x"), Err(Ignored::NoQuestion));
    }

    #[test]
    fn setter_cannot_answer() {
        let mut game = asked_game();
        assert_eq!(
            game.submit_answer(&player("alice"), "my own"),
            Err(Ignored::SetterCannotAnswer)
        );
        assert!(game.round().unwrap().answers().is_empty());
    }

    #[test]
    fn stranger_cannot_answer() {
        let mut game = asked_game();
        assert_eq!(game.submit_answer(&player("mallory"), "x"), Err(Ignored::NotAPlayer));
    }

    #[test]
    fn resubmission_overwrites_and_trims() {
        let mut game = asked_game();
        let first = game.submit_answer(&player("bob"), "pizza").unwrap();
        assert!(!first.all_answered);
        let second = game.submit_answer(&player("bob"), "  sushi \n").unwrap();
        assert!(!second.all_answered);

        let round = game.round().unwrap();
        assert_eq!(round.answers().len(), 1);
        assert_eq!(round.answer_of(&player("bob")), Some("sushi"));
    }

    #[test]
    fn last_outstanding_answer_reports_all_answered() {
        let mut game = asked_game();
        game.submit_answer(&player("bob"), "pizza").unwrap();
        let outcome = game.submit_answer(&player("carol"), "tacos").unwrap();
        assert!(outcome.all_answered);
    }

    #[test]
    fn answers_close_once_selection_opens() {
        let mut game = asked_game();
        game.submit_answer(&player("bob"), "pizza").unwrap();
        game.submit_answer(&player("carol"), "tacos").unwrap();
        game.open_selection(&Identity).unwrap();

        assert_eq!(
            game.submit_answer(&player("bob"), "changed my mind"),
            Err(Ignored::AnswersClosed)
        );
        assert_eq!(game.round().unwrap().answer_of(&player("bob")), Some("pizza"));
    }

    // Selection tests

    #[test]
    fn selection_list_follows_shuffler() {
        let mut game = asked_game();
        game.submit_answer(&player("bob"), "pizza").unwrap();
        game.submit_answer(&player("carol"), "tacos").unwrap();

        let request = game.open_selection(&Scripted::new(vec![vec![1, 0]])).unwrap();

        assert_eq!(request.setter, player("alice"));
        assert_eq!(request.question, "favorite food");
        assert_eq!(request.options, vec!["tacos".to_string(), "pizza".to_string()]);
        assert_eq!(game.phase(), RoundPhase::SelectingAnswer);
    }

    #[test]
    fn select_index_bounds_are_checked() {
        let mut game = asked_game();
        game.submit_answer(&player("bob"), "pizza").unwrap();
        game.submit_answer(&player("carol"), "tacos").unwrap();
        game.open_selection(&Identity).unwrap();

        assert_eq!(
            game.draw_ballot(0, &Identity),
            Err(Ignored::IndexOutOfRange { index: 0, len: 2 })
        );
        assert_eq!(
            game.draw_ballot(3, &Identity),
            Err(Ignored::IndexOutOfRange { index: 3, len: 2 })
        );
        assert_eq!(game.phase(), RoundPhase::SelectingAnswer);
        assert_eq!(game.round().unwrap().selection_pool().map(<[_]>::len), Some(2));
    }

    #[test]
    fn select_picks_kth_pool_entry_and_clears_pool() {
        let mut game = asked_game();
        game.submit_answer(&player("bob"), "pizza").unwrap();
        game.submit_answer(&player("carol"), "tacos").unwrap();
        game.open_selection(&Scripted::new(vec![vec![1, 0]])).unwrap();

        // Pool is [carol, bob]; the second entry is bob's.
        let ballot = game.draw_ballot(2, &Identity).unwrap();
        game.select_answer(&ballot, vec![handle("p1"), handle("p2")]).unwrap();

        let round = game.round().unwrap();
        assert_eq!(ballot.chosen, player("bob"));
        assert_eq!(round.chosen_answerer(), Some(&player("bob")));
        assert!(round.selection_pool().is_none());
        assert_eq!(round.phase(), RoundPhase::Voting);
    }

    #[test]
    fn select_without_open_selection_is_ignored() {
        let mut game = asked_game();
        game.submit_answer(&player("bob"), "pizza").unwrap();
        assert_eq!(game.draw_ballot(1, &Identity), Err(Ignored::SelectionNotOpen));
    }

    #[test]
    fn drawing_a_ballot_leaves_selection_open() {
        let mut game = asked_game();
        game.submit_answer(&player("bob"), "pizza").unwrap();
        game.submit_answer(&player("carol"), "tacos").unwrap();
        game.open_selection(&Identity).unwrap();

        let ballot = game.draw_ballot(1, &Identity).unwrap();

        assert_eq!(ballot.index, 1);
        assert_eq!(game.phase(), RoundPhase::SelectingAnswer);
        assert_eq!(game.round().unwrap().selection_pool().map(<[_]>::len), Some(2));
        assert!(game.round().unwrap().chosen_answerer().is_none());
    }

    #[test]
    fn selection_binds_each_prompt_to_its_entry() {
        let mut game = asked_game();
        game.submit_answer(&player("bob"), "pizza").unwrap();
        game.submit_answer(&player("carol"), "tacos").unwrap();
        game.open_selection(&Identity).unwrap();
        let ballot = game.draw_ballot(1, &Scripted::new(vec![vec![1, 0]])).unwrap();

        game.select_answer(&ballot, vec![handle("p1"), handle("p2")]).unwrap();

        let round = game.round().unwrap();
        assert_eq!(round.vote_target(&handle("p1")), Some(&player("carol")));
        assert_eq!(round.vote_target(&handle("p2")), Some(&player("bob")));
        assert_eq!(
            game.select_answer(&ballot, vec![handle("p3"), handle("p4")]),
            Err(Ignored::SelectionNotOpen)
        );
    }

    #[test]
    fn selection_needs_a_prompt_per_entry() {
        let mut game = asked_game();
        game.submit_answer(&player("bob"), "pizza").unwrap();
        game.submit_answer(&player("carol"), "tacos").unwrap();
        game.open_selection(&Identity).unwrap();
        let ballot = game.draw_ballot(1, &Identity).unwrap();

        assert_eq!(
            game.select_answer(&ballot, vec![handle("p1")]),
            Err(Ignored::SelectionNotOpen)
        );
        assert_eq!(game.phase(), RoundPhase::SelectingAnswer);
    }

    #[test]
    fn ballot_uses_its_own_shuffle() {
        let mut game = asked_game();
        game.submit_answer(&player("bob"), "pizza").unwrap();
        game.submit_answer(&player("carol"), "tacos").unwrap();

        let shuffler = Scripted::new(vec![vec![1, 0], vec![0, 1]]);
        let request = game.open_selection(&shuffler).unwrap();
        let ballot = game.draw_ballot(1, &shuffler).unwrap();

        let public: Vec<String> = ballot.entries.iter().map(|e| e.text.clone()).collect();
        assert_eq!(request.options, vec!["tacos".to_string(), "pizza".to_string()]);
        assert_eq!(public, vec!["pizza".to_string(), "tacos".to_string()]);
    }

    #[test]
    fn every_roster_member_becomes_a_voter() {
        let game = voting_game();
        let round = game.round().unwrap();
        for id in ["alice", "bob", "carol"] {
            assert_eq!(round.credit_of(&player(id)), Some(0));
        }
    }

    // Voting tests

    #[test]
    fn vote_before_choice_is_ignored() {
        let mut game = asked_game();
        assert_eq!(
            game.register_vote(&player("bob"), &handle("p1"), Confidence::High),
            Err(Ignored::VotingNotOpen)
        );
    }

    #[test]
    fn vote_from_untracked_player_is_ignored() {
        let mut game = voting_game();
        assert_eq!(
            game.register_vote(&player("mallory"), &handle("p1"), Confidence::High),
            Err(Ignored::NotAVoter)
        );
    }

    #[test]
    fn vote_on_unknown_prompt_is_ignored() {
        let mut game = voting_game();
        assert_eq!(
            game.register_vote(&player("bob"), &handle("elsewhere"), Confidence::High),
            Err(Ignored::UnknownPrompt)
        );
        assert_eq!(game.round().unwrap().credit_of(&player("bob")), Some(0));
    }

    #[test]
    fn low_confidence_votes_accumulate() {
        let mut game = voting_game();
        assert_eq!(
            game.register_vote(&player("bob"), &handle("p2"), Confidence::Low),
            Ok(VoteOutcome::Counted { voter_credit: 1 })
        );
        assert_eq!(
            game.register_vote(&player("bob"), &handle("p1"), Confidence::Low),
            Ok(VoteOutcome::Counted { voter_credit: 2 })
        );
    }

    #[test]
    fn round_waits_for_every_voter() {
        let mut game = voting_game();
        game.register_vote(&player("bob"), &handle("p2"), Confidence::High).unwrap();
        let outcome = game
            .register_vote(&player("carol"), &handle("p1"), Confidence::High)
            .unwrap();

        assert!(matches!(outcome, VoteOutcome::Counted { .. }));
        assert_eq!(game.phase(), RoundPhase::Voting);
        assert_eq!(game.setter(), Some(&player("alice")));
    }

    #[test]
    fn last_vote_reveals_and_clears_setter() {
        let mut game = voting_game();
        game.register_vote(&player("bob"), &handle("p2"), Confidence::High).unwrap();
        game.register_vote(&player("carol"), &handle("p1"), Confidence::High).unwrap();
        let outcome = game
            .register_vote(&player("alice"), &handle("p1"), Confidence::High)
            .unwrap();

        assert_eq!(
            outcome,
            VoteOutcome::RoundComplete(RoundReveal {
                setter: player("alice"),
                question: "favorite food".to_string(),
                author: player("bob"),
                answer: "pizza".to_string(),
            })
        );
        assert!(game.setter().is_none());
        assert_eq!(game.phase(), RoundPhase::Idle);
        assert_eq!(game.rounds_completed(), 1);
    }

    #[test]
    fn completing_a_round_leaves_scores_untouched() {
        let mut game = voting_game();
        for voter in ["alice", "bob", "carol"] {
            game.register_vote(&player(voter), &handle("p1"), Confidence::High).unwrap();
        }
        for id in ["alice", "bob", "carol"] {
            assert_eq!(game.score_of(&player(id)), Some(0));
        }
    }

    #[test]
    fn votes_after_completion_are_ignored() {
        let mut game = voting_game();
        for voter in ["alice", "bob", "carol"] {
            game.register_vote(&player(voter), &handle("p1"), Confidence::High).unwrap();
        }
        assert_eq!(
            game.register_vote(&player("bob"), &handle("p1"), Confidence::High),
            Err(Ignored::VotingNotOpen)
        );
    }

    #[test]
    fn next_round_rotates_setter() {
        let mut game = voting_game();
        for voter in ["alice", "bob", "carol"] {
            game.register_vote(&player(voter), &handle("p1"), Confidence::High).unwrap();
        }
        assert_eq!(game.start_round(), Ok(player("bob")));
        let round = game.round().unwrap();
        assert!(round.answers().is_empty());
        assert!(round.question().is_none());
        assert_eq!(round.vote_target_count(), 0);
    }
}
