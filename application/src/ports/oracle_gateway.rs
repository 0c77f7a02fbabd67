//! Oracle gateway port
//!
//! Defines the interface for asking whether a statement is true of one
//! candidate. Implementations (LLM adapters) live in the infrastructure
//! layer; the engine fans a question out to every survivor concurrently.

use async_trait::async_trait;
use thiserror::Error;
use twentyq_domain::{Candidate, OracleReply, Question};

/// Errors that can occur on a single oracle query
#[derive(Error, Debug)]
pub enum OracleError {
    #[error("Oracle query timed out")]
    Timeout,

    #[error("Oracle request failed: {0}")]
    RequestFailed(String),

    #[error("Oracle unavailable: {0}")]
    Unavailable(String),
}

impl OracleError {
    pub fn is_timeout(&self) -> bool {
        matches!(self, OracleError::Timeout)
    }
}

/// Gateway to the oracle backend.
///
/// One call answers one question for one candidate, treating that
/// candidate as if it were the target. Calls are independent, so the
/// engine may issue any number of them concurrently. Repeated calls with
/// identical arguments are expected (not required) to agree — oracle
/// non-determinism is a known failure mode, recorded as inconsistency
/// rather than treated as a contract violation.
#[async_trait]
pub trait OracleGateway: Send + Sync {
    /// Answer `question` as if `candidate` were the hidden target.
    async fn answer_for(
        &self,
        question: &Question,
        candidate: &Candidate,
    ) -> Result<OracleReply, OracleError>;

    /// Evaluate a terminal guess against the target.
    ///
    /// The default is normalized name equality; backends that want the
    /// model itself to adjudicate may override.
    fn final_guess_check(&self, guess: &Candidate, target: &Candidate) -> bool {
        guess.matches_name(target.name())
    }
}
