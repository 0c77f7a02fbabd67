//! Session progress notification port
//!
//! Callbacks for observing a running session. Implementations live in the
//! CLI (console output); the engine only ever talks to this trait.

use twentyq_domain::{Candidate, OracleReply, RoundRecord, SessionOutcome};

/// Callback for progress updates during a session
pub trait SessionProgress: Send + Sync {
    /// Called once after the target has been fixed
    fn on_target_selected(&self, _target: &Candidate, _pool_size: usize) {}

    /// Called when the questioner has produced this round's question
    fn on_question(&self, _round: usize, _question: &str, _is_final_guess: bool) {}

    /// Called when the authoritative target answer is known
    fn on_ground_truth(&self, _round: usize, _answer: &OracleReply) {}

    /// Called after filtering, with the complete round record
    fn on_round_complete(&self, _record: &RoundRecord) {}

    /// Called exactly once when the session terminates
    fn on_session_end(&self, _outcome: &SessionOutcome) {}
}

/// No-op progress notifier for tests and quiet runs
pub struct NoProgress;

impl SessionProgress for NoProgress {}
