//! Vote confidence tiers.

use serde::{Deserialize, Serialize};

/// How sure a voter is that an answer was the one picked.
///
/// Platforms render this as two reactions; the game only sees the tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Confidence {
    /// One credit.
    Low,
    /// Two credits.
    High,
}

impl Confidence {
    /// Maps the inbound `high_confidence` flag to a tier.
    pub fn from_high_confidence(high_confidence: bool) -> Self {
        if high_confidence {
            Confidence::High
        } else {
            Confidence::Low
        }
    }

    /// Vote credit this tier spends.
    pub fn credit(&self) -> u32 {
        match self {
            Confidence::Low => 1,
            Confidence::High => 2,
        }
    }
}
