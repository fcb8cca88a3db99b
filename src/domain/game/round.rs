//! Round entity - everything that lives for exactly one round.
//!
//! A `Round` is created by `Game::start_round` and dropped when voting
//! completes. Nothing here survives into the next round: each start builds
//! fresh containers, so stale answers or vote credit can never leak across
//! rounds.

use std::collections::{BTreeMap, HashMap};

use crate::domain::foundation::{PlayerId, PromptHandle, StateMachine};

use super::RoundPhase;

/// One submitted answer and its author.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnswerEntry {
    pub author: PlayerId,
    pub text: String,
}

/// State of a single round.
///
/// # Invariants
///
/// - `answers` never contains the setter
/// - `selection_pool` is `Some` only in `SelectingAnswer`
/// - `chosen_answerer` is `Some` only in `Voting`
/// - every `vote_targets` value is a key of `answers`
#[derive(Debug, Clone)]
pub struct Round {
    phase: RoundPhase,
    setter: PlayerId,
    question: Option<String>,
    answers: BTreeMap<PlayerId, String>,
    selection_pool: Option<Vec<AnswerEntry>>,
    chosen_answerer: Option<PlayerId>,
    vote_targets: HashMap<PromptHandle, PlayerId>,
    vote_weight: HashMap<PlayerId, u32>,
}

impl Round {
    /// Starts a round held by `setter`, waiting for their question.
    pub(super) fn new(setter: PlayerId) -> Self {
        Self {
            phase: RoundPhase::AwaitingQuestion,
            setter,
            question: None,
            answers: BTreeMap::new(),
            selection_pool: None,
            chosen_answerer: None,
            vote_targets: HashMap::new(),
            vote_weight: HashMap::new(),
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Accessors
    // ─────────────────────────────────────────────────────────────────────────

    pub fn phase(&self) -> RoundPhase {
        self.phase
    }

    pub fn setter(&self) -> &PlayerId {
        &self.setter
    }

    pub fn question(&self) -> Option<&str> {
        self.question.as_deref()
    }

    /// Answers keyed by author. Iteration order is by player id.
    pub fn answers(&self) -> &BTreeMap<PlayerId, String> {
        &self.answers
    }

    pub fn answer_of(&self, player: &PlayerId) -> Option<&str> {
        self.answers.get(player).map(String::as_str)
    }

    /// The setter's private, shuffled view while they are choosing.
    pub fn selection_pool(&self) -> Option<&[AnswerEntry]> {
        self.selection_pool.as_deref()
    }

    pub fn chosen_answerer(&self) -> Option<&PlayerId> {
        self.chosen_answerer.as_ref()
    }

    /// Author bound to a posted vote prompt.
    pub fn vote_target(&self, handle: &PromptHandle) -> Option<&PlayerId> {
        self.vote_targets.get(handle)
    }

    pub fn vote_target_count(&self) -> usize {
        self.vote_targets.len()
    }

    /// Credit `voter` has spent so far, or `None` if they are not voting.
    pub fn credit_of(&self, voter: &PlayerId) -> Option<u32> {
        self.vote_weight.get(voter).copied()
    }

    pub fn is_voter(&self, player: &PlayerId) -> bool {
        self.vote_weight.contains_key(player)
    }

    /// True once every tracked voter has spent at least `threshold`.
    pub fn voting_complete(&self, threshold: u32) -> bool {
        !self.vote_weight.is_empty() && self.vote_weight.values().all(|&w| w >= threshold)
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Mutations (driven by Game)
    // ─────────────────────────────────────────────────────────────────────────

    pub(super) fn ask(&mut self, question: String) -> bool {
        if !self.advance(RoundPhase::CollectingAnswers) {
            return false;
        }
        self.question = Some(question);
        true
    }

    /// Records or replaces `author`'s answer. Last submission wins.
    pub(super) fn record_answer(&mut self, author: PlayerId, text: String) {
        self.answers.insert(author, text);
    }

    /// Current answers in their stored order.
    pub(super) fn answer_entries(&self) -> Vec<AnswerEntry> {
        self.answers
            .iter()
            .map(|(author, text)| AnswerEntry {
                author: author.clone(),
                text: text.clone(),
            })
            .collect()
    }

    /// Moves to selection with the answers arranged as `pool`.
    pub(super) fn open_selection(&mut self, pool: Vec<AnswerEntry>) -> bool {
        if pool.is_empty() || !self.advance(RoundPhase::SelectingAnswer) {
            return false;
        }
        self.selection_pool = Some(pool);
        true
    }

    /// Consumes the selection pool, binding the 1-based `index` as the
    /// chosen answer and opening voting for `voters`.
    pub(super) fn choose(
        &mut self,
        index: usize,
        voters: impl IntoIterator<Item = PlayerId>,
    ) -> Option<PlayerId> {
        let chosen = self
            .selection_pool
            .as_ref()
            .and_then(|pool| index.checked_sub(1).and_then(|i| pool.get(i)))
            .map(|entry| entry.author.clone())?;

        if !self.advance(RoundPhase::Voting) {
            return None;
        }

        self.selection_pool = None;
        self.chosen_answerer = Some(chosen.clone());
        self.vote_weight = voters.into_iter().map(|voter| (voter, 0)).collect();
        Some(chosen)
    }

    pub(super) fn bind_prompt(&mut self, handle: PromptHandle, author: PlayerId) -> bool {
        if self.phase != RoundPhase::Voting || !self.answers.contains_key(&author) {
            return false;
        }
        self.vote_targets.insert(handle, author);
        true
    }

    /// Adds `credit` to `voter`, returning their new total.
    ///
    /// There is no upper bound: repeated votes keep accumulating.
    pub(super) fn add_credit(&mut self, voter: &PlayerId, credit: u32) -> Option<u32> {
        let weight = self.vote_weight.get_mut(voter)?;
        *weight += credit;
        Some(*weight)
    }

    pub(super) fn finish(&mut self) -> bool {
        self.advance(RoundPhase::Idle)
    }

    fn advance(&mut self, target: RoundPhase) -> bool {
        match self.phase.transition_to(target) {
            Ok(next) => {
                self.phase = next;
                true
            }
            Err(_) => false,
        }
    }
}
