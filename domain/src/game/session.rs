//! Session outcome and the final report.

use serde::{Deserialize, Serialize};

use crate::game::round::RoundRecord;

/// How a session ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum SessionOutcome {
    /// The target was identified (pool narrowed to the target, a correct
    /// final guess, or the oracle acknowledged a direct guess).
    Success { rounds: usize },
    /// The configured round limit was reached with the target unresolved.
    RoundLimitReached { rounds: usize },
    /// Filtering emptied the pool — the target's own answer disagreed
    /// with its recorded batch answer somewhere along the way.
    PoolExhausted { rounds: usize },
}

impl SessionOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, SessionOutcome::Success { .. })
    }

    pub fn rounds(&self) -> usize {
        match self {
            SessionOutcome::Success { rounds }
            | SessionOutcome::RoundLimitReached { rounds }
            | SessionOutcome::PoolExhausted { rounds } => *rounds,
        }
    }
}

impl std::fmt::Display for SessionOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SessionOutcome::Success { rounds } => {
                write!(f, "success after {} round(s)", rounds)
            }
            SessionOutcome::RoundLimitReached { rounds } => {
                write!(f, "failure: round limit reached after {} round(s)", rounds)
            }
            SessionOutcome::PoolExhausted { rounds } => {
                write!(f, "failure: pool exhausted after {} round(s)", rounds)
            }
        }
    }
}

/// Everything a finished session produced: the target, the ordered round
/// records, and how it ended. This is what gets archived.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionReport {
    pub target: String,
    pub initial_pool_size: usize,
    pub rounds: Vec<RoundRecord>,
    #[serde(flatten)]
    pub outcome: SessionOutcome,
}

impl SessionReport {
    pub fn new(
        target: impl Into<String>,
        initial_pool_size: usize,
        rounds: Vec<RoundRecord>,
        outcome: SessionOutcome,
    ) -> Self {
        Self {
            target: target.into(),
            initial_pool_size,
            rounds,
            outcome,
        }
    }

    /// Rounds flagged with an oracle inconsistency.
    pub fn inconsistent_rounds(&self) -> impl Iterator<Item = &RoundRecord> {
        self.rounds.iter().filter(|r| r.inconsistency)
    }
}
