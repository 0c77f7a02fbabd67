//! Questioner port
//!
//! Defines the interface for producing the next yes/no question (or a
//! terminal guess) from the game history and the surviving pool.

use async_trait::async_trait;
use thiserror::Error;
use twentyq_domain::{CandidatePool, Exchange, QuestionerReply};

/// Errors that can occur while generating the next question
#[derive(Error, Debug)]
pub enum QuestionerError {
    #[error("Questioner backend unreachable: {0}")]
    Unreachable(String),

    #[error("Questioner response unparseable: {0}")]
    Unparseable(String),
}

/// The component that drives the guessing.
///
/// Receives a read-only snapshot of the history and pool and returns
/// either a fresh question or a final guess naming one pool candidate.
/// Not repeating an earlier question is a quality property of the
/// implementation, not enforced by the engine.
#[async_trait]
pub trait Questioner: Send + Sync {
    async fn next_question(
        &self,
        history: &[Exchange],
        pool: &CandidatePool,
    ) -> Result<QuestionerReply, QuestionerError>;
}
