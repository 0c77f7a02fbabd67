//! Domain error types

use thiserror::Error;

/// Domain-level errors
#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Candidate list is empty")]
    EmptyCandidateList,

    #[error("Target '{0}' is not in the candidate pool")]
    TargetNotInPool(String),

    #[error("Invalid reasoning effort: {0}")]
    InvalidReasoningEffort(String),
}
