//! Session configuration
//!
//! An immutable value passed into the engine at construction time. There
//! is no ambient or global experiment state anywhere in the system.

use std::time::Duration;

use twentyq_domain::{Model, ReasoningEffort};

/// Everything the engine needs to know to run one session.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// Model generating questions
    pub questioner_model: Model,
    /// Model answering oracle queries
    pub oracle_model: Model,
    /// Opaque hint forwarded to reasoning-capable questioner models
    pub reasoning_effort: ReasoningEffort,
    /// Hard bound on the number of rounds (must be positive)
    pub max_rounds: usize,
    /// Explicit target name; random selection when absent
    pub target_name: Option<String>,
    /// How many times an ambiguous ground-truth answer is re-asked
    /// before the session aborts
    pub ground_truth_retries: usize,
    /// Retry budget for each individual batch query
    pub oracle_retries: usize,
    /// Per-query timeout; a timed-out batch query resolves to ambiguous
    pub oracle_timeout: Option<Duration>,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            questioner_model: Model::default_questioner(),
            oracle_model: Model::default_oracle(),
            reasoning_effort: ReasoningEffort::default(),
            max_rounds: 20,
            target_name: None,
            ground_truth_retries: 1,
            oracle_retries: 1,
            oracle_timeout: None,
        }
    }
}

impl SessionConfig {
    pub fn with_target(mut self, name: impl Into<String>) -> Self {
        self.target_name = Some(name.into());
        self
    }

    pub fn with_max_rounds(mut self, max_rounds: usize) -> Self {
        self.max_rounds = max_rounds;
        self
    }

    pub fn with_oracle_timeout(mut self, timeout: Duration) -> Self {
        self.oracle_timeout = Some(timeout);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = SessionConfig::default();
        assert_eq!(config.max_rounds, 20);
        assert_eq!(config.ground_truth_retries, 1);
        assert!(config.target_name.is_none());
        assert!(config.oracle_timeout.is_none());
    }

    #[test]
    fn test_builders() {
        let config = SessionConfig::default()
            .with_target("Steve Jobs")
            .with_max_rounds(5);
        assert_eq!(config.target_name.as_deref(), Some("Steve Jobs"));
        assert_eq!(config.max_rounds, 5);
    }
}
