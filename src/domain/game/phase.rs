//! Round phase state machine.
//!
//! A game cycles through the same phases every round:
//!
//! ```text
//! Idle -> AwaitingQuestion -> CollectingAnswers -> SelectingAnswer -> Voting -> Idle
//! ```

use crate::domain::foundation::StateMachine;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Where the current round stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum RoundPhase {
    /// No setter; waiting for the next round to be started.
    #[default]
    Idle,

    /// Setter chosen, question not yet asked.
    AwaitingQuestion,

    /// Question asked; non-setters are sending answers privately.
    CollectingAnswers,

    /// Setter is privately picking the answer closest to their own.
    SelectingAnswer,

    /// Answer chosen; everyone votes on which answer was picked.
    Voting,
}

impl RoundPhase {
    /// Returns true while a setter holds the round.
    pub fn has_setter(&self) -> bool {
        !matches!(self, RoundPhase::Idle)
    }

    /// Returns true once judging has begun and answers are closed.
    pub fn answers_closed(&self) -> bool {
        matches!(self, RoundPhase::SelectingAnswer | RoundPhase::Voting)
    }
}

impl StateMachine for RoundPhase {
    fn can_transition_to(&self, target: &Self) -> bool {
        use RoundPhase::*;
        matches!(
            (self, target),
            (Idle, AwaitingQuestion)
                | (AwaitingQuestion, CollectingAnswers)
                | (CollectingAnswers, SelectingAnswer)
                | (SelectingAnswer, Voting)
                | (Voting, Idle)
        )
    }

    fn valid_transitions(&self) -> Vec<Self> {
        use RoundPhase::*;
        match self {
            Idle => vec![AwaitingQuestion],
            AwaitingQuestion => vec![CollectingAnswers],
            CollectingAnswers => vec![SelectingAnswer],
            SelectingAnswer => vec![Voting],
            Voting => vec![Idle],
        }
    }
}

impl fmt::Display for RoundPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            RoundPhase::Idle => "Idle",
            RoundPhase::AwaitingQuestion => "AwaitingQuestion",
            RoundPhase::CollectingAnswers => "CollectingAnswers",
            RoundPhase::SelectingAnswer => "SelectingAnswer",
            RoundPhase::Voting => "Voting",
        };
        write!(f, "{}", s)
    }
}
