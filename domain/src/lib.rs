//! Domain layer for twentyq
//!
//! Core entities and pure logic for the deduction-game elimination engine:
//! the candidate pool, oracle reply parsing, round metrics and session
//! outcomes. No I/O and no async — backends and orchestration live in the
//! application and infrastructure layers.

pub mod core;
pub mod game;
pub mod prompt;

// Re-export commonly used types
pub use crate::core::{
    error::DomainError,
    model::{Model, ReasoningEffort},
    question::Question,
};
pub use game::{
    answer::{parse_oracle_reply, parse_questioner_reply, OracleReply, QuestionerReply},
    candidate::{Candidate, CandidatePool},
    round::{split_deviation, Exchange, MetricsRecorder, RoundRecord},
    session::{SessionOutcome, SessionReport},
};
pub use prompt::PromptTemplate;
