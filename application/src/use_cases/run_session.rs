//! Run Session use case — the round-based elimination engine.
//!
//! Drives the question → oracle fan-out → filter → terminate loop. Each
//! round: obtain a question (or final guess) from the questioner, query
//! the oracle once per survivor concurrently plus one authoritative
//! ground-truth query for the target, keep the candidates whose answer
//! matches ground truth, record split metrics, and evaluate termination.
//!
//! Rounds are strictly sequential; only the fan-out inside a round is
//! concurrent. Each spawned query writes exactly one result slot, and the
//! batch is joined before any result is read.

use crate::config::SessionConfig;
use crate::ports::oracle_gateway::{OracleError, OracleGateway};
use crate::ports::progress::{NoProgress, SessionProgress};
use crate::ports::questioner::{Questioner, QuestionerError};
use std::collections::HashMap;
use std::sync::Arc;
use thiserror::Error;
use tokio::task::JoinSet;
use tracing::{debug, info, warn};
use twentyq_domain::{
    Candidate, CandidatePool, DomainError, Exchange, MetricsRecorder, OracleReply, Question,
    QuestionerReply, RoundRecord, SessionOutcome, SessionReport,
};

/// What went wrong, without the salvaged metrics
#[derive(Error, Debug)]
pub enum SessionErrorKind {
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error("Question generation failed: {0}")]
    QuestionGeneration(#[from] QuestionerError),

    #[error("Ground-truth query failed in round {round}: {source}")]
    GroundTruth { round: usize, source: OracleError },

    #[error("Ground truth stayed ambiguous in round {round} after {attempts} attempt(s)")]
    GroundTruthAmbiguous { round: usize, attempts: usize },
}

/// A fatal session error.
///
/// Carries the rounds recorded before the failure so callers can archive
/// the partial run for inspection.
#[derive(Error, Debug)]
#[error("{kind}")]
pub struct SessionError {
    pub kind: SessionErrorKind,
    pub partial_rounds: Vec<RoundRecord>,
}

impl SessionError {
    fn new(kind: SessionErrorKind, partial_rounds: Vec<RoundRecord>) -> Self {
        Self {
            kind,
            partial_rounds,
        }
    }

    fn at_start(kind: SessionErrorKind) -> Self {
        Self::new(kind, Vec::new())
    }
}

/// Input for the RunSession use case
#[derive(Debug, Clone)]
pub struct RunSessionInput {
    /// Raw candidate names, in input order
    pub names: Vec<String>,
    pub config: SessionConfig,
}

impl RunSessionInput {
    pub fn new(names: Vec<String>, config: SessionConfig) -> Self {
        Self { names, config }
    }
}

/// Use case for running one complete session
pub struct RunSessionUseCase<Q, O>
where
    Q: Questioner + 'static,
    O: OracleGateway + 'static,
{
    questioner: Arc<Q>,
    oracle: Arc<O>,
}

impl<Q, O> RunSessionUseCase<Q, O>
where
    Q: Questioner + 'static,
    O: OracleGateway + 'static,
{
    pub fn new(questioner: Arc<Q>, oracle: Arc<O>) -> Self {
        Self { questioner, oracle }
    }

    /// Execute the use case with default (no-op) progress
    pub async fn execute(&self, input: RunSessionInput) -> Result<SessionReport, SessionError> {
        self.execute_with_progress(input, &NoProgress).await
    }

    /// Execute the use case with progress callbacks
    pub async fn execute_with_progress(
        &self,
        input: RunSessionInput,
        progress: &dyn SessionProgress,
    ) -> Result<SessionReport, SessionError> {
        let config = input.config;
        if config.max_rounds == 0 {
            return Err(SessionError::at_start(SessionErrorKind::InvalidConfig(
                "max_rounds must be positive".to_string(),
            )));
        }

        let mut pool = CandidatePool::new(input.names)
            .map_err(|e| SessionError::at_start(e.into()))?;

        let target = match &config.target_name {
            Some(name) => pool.get(name).cloned().ok_or_else(|| {
                SessionError::at_start(DomainError::TargetNotInPool(name.clone()).into())
            })?,
            None => pool.pick_random().clone(),
        };
        let initial_pool_size = pool.len();

        info!("Target selected: {} ({} candidates)", target, pool.len());
        progress.on_target_selected(&target, pool.len());

        let mut recorder = MetricsRecorder::new();
        let mut history: Vec<Exchange> = Vec::new();

        for index in 1..=config.max_rounds {
            debug!(round = index, survivors = pool.len(), "awaiting question");

            let reply = match self.questioner.next_question(&history, &pool).await {
                Ok(reply) => reply,
                Err(e) => return Err(SessionError::new(e.into(), recorder.into_records())),
            };

            let round_result = match reply {
                QuestionerReply::FinalGuess(guess) => Ok(self.round_final_guess(
                    index,
                    guess,
                    &target,
                    &mut pool,
                    &mut recorder,
                    &mut history,
                    progress,
                )),
                QuestionerReply::Question(question) => {
                    self.round_question(
                        index,
                        question,
                        &target,
                        &mut pool,
                        &config,
                        &mut recorder,
                        &mut history,
                        progress,
                    )
                    .await
                }
            };

            match round_result {
                Ok(Some(outcome)) => {
                    progress.on_session_end(&outcome);
                    return Ok(SessionReport::new(
                        target.name(),
                        initial_pool_size,
                        recorder.into_records(),
                        outcome,
                    ));
                }
                Ok(None) => {}
                Err(kind) => return Err(SessionError::new(kind, recorder.into_records())),
            }
        }

        let outcome = SessionOutcome::RoundLimitReached {
            rounds: recorder.len(),
        };
        progress.on_session_end(&outcome);
        Ok(SessionReport::new(
            target.name(),
            initial_pool_size,
            recorder.into_records(),
            outcome,
        ))
    }

    /// Terminal-guess round: no oracle batch, just the guess check.
    ///
    /// A wrong guess removes the guessed candidate (it is definitively not
    /// the target) and the session continues.
    #[allow(clippy::too_many_arguments)]
    fn round_final_guess(
        &self,
        index: usize,
        guess: Candidate,
        target: &Candidate,
        pool: &mut CandidatePool,
        recorder: &mut MetricsRecorder,
        history: &mut Vec<Exchange>,
        progress: &dyn SessionProgress,
    ) -> Option<SessionOutcome> {
        progress.on_question(index, guess.name(), true);
        let question_text = format!("FINAL GUESS: {}", guess.name());
        let before = pool.len();

        if self.oracle.final_guess_check(&guess, target) {
            info!("Final guess correct: {}", guess);
            let record = RoundRecord::new(
                index,
                question_text,
                OracleReply::SuccessfulGuess,
                0,
                0,
                before,
                before,
            );
            progress.on_ground_truth(index, &OracleReply::SuccessfulGuess);
            progress.on_round_complete(&record);
            recorder.record(record);
            return Some(SessionOutcome::Success {
                rounds: recorder.len(),
            });
        }

        info!("Final guess wrong: {}", guess);
        pool.filter(|c| !c.matches_name(guess.name()));
        let record = RoundRecord::new(
            index,
            question_text.clone(),
            OracleReply::No,
            0,
            0,
            before,
            pool.len(),
        );
        history.push(Exchange::new(question_text, OracleReply::No));
        progress.on_ground_truth(index, &OracleReply::No);
        progress.on_round_complete(&record);
        recorder.record(record);

        evaluate_termination(pool, target, recorder)
    }

    /// Ordinary round: ground truth, concurrent batch, filter, metrics.
    #[allow(clippy::too_many_arguments)]
    async fn round_question(
        &self,
        index: usize,
        question: Question,
        target: &Candidate,
        pool: &mut CandidatePool,
        config: &SessionConfig,
        recorder: &mut MetricsRecorder,
        history: &mut Vec<Exchange>,
        progress: &dyn SessionProgress,
    ) -> Result<Option<SessionOutcome>, SessionErrorKind> {
        progress.on_question(index, question.content(), false);

        let truth = self.ground_truth(index, &question, target, config).await?;
        progress.on_ground_truth(index, &truth);

        if truth == OracleReply::SuccessfulGuess {
            // The question was a direct, correct guess of the target
            info!("Oracle acknowledged a successful guess");
            let before = pool.len();
            let record =
                RoundRecord::new(index, question.content(), truth, 0, 0, before, before);
            progress.on_round_complete(&record);
            recorder.record(record);
            return Ok(Some(SessionOutcome::Success {
                rounds: recorder.len(),
            }));
        }

        let answers = self.answer_batch(pool.survivors(), &question, config).await;

        let before = pool.len();
        let yes_count = answers.values().filter(|r| r.is_yes()).count();
        let no_count = answers
            .values()
            .filter(|r| matches!(r, OracleReply::No | OracleReply::Ambiguous))
            .count();
        let target_answer = answers.get(target.name()).copied();

        pool.filter(|c| {
            answers
                .get(c.name())
                .map(|r| r.matches_ground_truth(truth))
                .unwrap_or(false)
        });

        let target_dropped = !pool.contains(target.name());
        if target_dropped {
            warn!(
                round = index,
                "target '{}' filtered out of the pool: oracle inconsistency", target
            );
        }
        let majority = if yes_count > no_count {
            Some(OracleReply::Yes)
        } else if no_count > yes_count {
            Some(OracleReply::No)
        } else {
            None
        };
        let disagrees_with_majority = match (target_answer, majority) {
            (Some(answer), Some(majority)) => answer.effective() != majority,
            _ => false,
        };

        let mut record = RoundRecord::new(
            index,
            question.content(),
            truth,
            yes_count,
            no_count,
            before,
            pool.len(),
        );
        if target_dropped || disagrees_with_majority {
            record = record.with_inconsistency();
        }

        history.push(Exchange::new(question.content(), truth));
        progress.on_round_complete(&record);
        recorder.record(record);

        Ok(evaluate_termination(pool, target, recorder))
    }

    /// Authoritative target answer, with bounded ambiguity retry.
    ///
    /// An ambiguous or timed-out ground-truth answer re-asks the same
    /// query; once the budget is exhausted the session aborts. Any other
    /// oracle failure on this path is fatal immediately.
    async fn ground_truth(
        &self,
        round: usize,
        question: &Question,
        target: &Candidate,
        config: &SessionConfig,
    ) -> Result<OracleReply, SessionErrorKind> {
        let attempts = config.ground_truth_retries + 1;
        for attempt in 1..=attempts {
            match query_once(self.oracle.as_ref(), question, target, config).await {
                Ok(OracleReply::Ambiguous) => {
                    warn!(round, attempt, "ambiguous ground truth, re-asking");
                }
                Ok(reply) => return Ok(reply),
                Err(e) if e.is_timeout() => {
                    warn!(round, attempt, "ground-truth query timed out, re-asking");
                }
                Err(source) => return Err(SessionErrorKind::GroundTruth { round, source }),
            }
        }
        Err(SessionErrorKind::GroundTruthAmbiguous { round, attempts })
    }

    /// Query every survivor concurrently; join before reading any result.
    ///
    /// Partial failures never abort the batch: a query that exhausts its
    /// retry budget resolves to [`OracleReply::Ambiguous`] for that
    /// candidate.
    async fn answer_batch(
        &self,
        survivors: Vec<Candidate>,
        question: &Question,
        config: &SessionConfig,
    ) -> HashMap<String, OracleReply> {
        let mut join_set = JoinSet::new();

        for candidate in survivors {
            let oracle = Arc::clone(&self.oracle);
            let question = question.clone();
            let config = config.clone();

            join_set.spawn(async move {
                let reply = query_with_budget(oracle.as_ref(), &question, &candidate, &config).await;
                (candidate, reply)
            });
        }

        let mut answers = HashMap::new();
        while let Some(result) = join_set.join_next().await {
            match result {
                Ok((candidate, reply)) => {
                    debug!("oracle[{}] = {}", candidate, reply);
                    answers.insert(candidate.name().to_string(), reply);
                }
                Err(e) => {
                    warn!("Task join error: {}", e);
                }
            }
        }
        answers
    }
}

/// One oracle query, bounded by the configured per-query timeout.
async fn query_once<O: OracleGateway + ?Sized>(
    oracle: &O,
    question: &Question,
    candidate: &Candidate,
    config: &SessionConfig,
) -> Result<OracleReply, OracleError> {
    match config.oracle_timeout {
        Some(limit) => match tokio::time::timeout(limit, oracle.answer_for(question, candidate))
            .await
        {
            Ok(result) => result,
            Err(_) => Err(OracleError::Timeout),
        },
        None => oracle.answer_for(question, candidate).await,
    }
}

/// Batch-side query: retries failures and ambiguity within the budget,
/// then settles on ambiguous.
async fn query_with_budget<O: OracleGateway + ?Sized>(
    oracle: &O,
    question: &Question,
    candidate: &Candidate,
    config: &SessionConfig,
) -> OracleReply {
    let attempts = config.oracle_retries + 1;
    for _ in 0..attempts {
        match query_once(oracle, question, candidate, config).await {
            Ok(OracleReply::Ambiguous) => continue,
            Ok(reply) => return reply,
            Err(e) => {
                warn!("oracle query for '{}' failed: {}", candidate, e);
            }
        }
    }
    OracleReply::Ambiguous
}

/// Decide whether the session is over after this round's filtering.
fn evaluate_termination(
    pool: &CandidatePool,
    target: &Candidate,
    recorder: &MetricsRecorder,
) -> Option<SessionOutcome> {
    if pool.is_empty() {
        Some(SessionOutcome::PoolExhausted {
            rounds: recorder.len(),
        })
    } else if pool.len() == 1 && pool.contains(target.name()) {
        Some(SessionOutcome::Success {
            rounds: recorder.len(),
        })
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::collections::VecDeque;
    use std::sync::Mutex;
    use std::time::Duration;

    /// Questioner that replays a fixed script of replies.
    struct ScriptedQuestioner {
        replies: Mutex<VecDeque<QuestionerReply>>,
    }

    impl ScriptedQuestioner {
        fn new(replies: Vec<QuestionerReply>) -> Self {
            Self {
                replies: Mutex::new(replies.into()),
            }
        }

        fn questions(texts: &[&str]) -> Self {
            Self::new(
                texts
                    .iter()
                    .map(|t| QuestionerReply::Question(Question::new(*t)))
                    .collect(),
            )
        }
    }

    #[async_trait]
    impl Questioner for ScriptedQuestioner {
        async fn next_question(
            &self,
            _history: &[Exchange],
            _pool: &CandidatePool,
        ) -> Result<QuestionerReply, QuestionerError> {
            self.replies
                .lock()
                .unwrap()
                .pop_front()
                .ok_or_else(|| QuestionerError::Unreachable("script exhausted".to_string()))
        }
    }

    /// Oracle that answers from a (question, candidate) table.
    ///
    /// Each key maps to a sequence of replies so tests can model
    /// non-deterministic oracles; the last entry repeats.
    struct TableOracle {
        answers: Mutex<HashMap<(String, String), VecDeque<OracleReply>>>,
        fallback: OracleReply,
    }

    impl TableOracle {
        fn new(entries: &[(&str, &str, OracleReply)]) -> Self {
            let mut answers: HashMap<(String, String), VecDeque<OracleReply>> = HashMap::new();
            for (question, candidate, reply) in entries {
                answers
                    .entry((question.to_string(), candidate.to_string()))
                    .or_default()
                    .push_back(*reply);
            }
            Self {
                answers: Mutex::new(answers),
                fallback: OracleReply::No,
            }
        }
    }

    #[async_trait]
    impl OracleGateway for TableOracle {
        async fn answer_for(
            &self,
            question: &Question,
            candidate: &Candidate,
        ) -> Result<OracleReply, OracleError> {
            let key = (
                question.content().to_string(),
                candidate.name().to_string(),
            );
            let mut answers = self.answers.lock().unwrap();
            match answers.get_mut(&key) {
                Some(seq) if seq.len() > 1 => Ok(seq.pop_front().unwrap()),
                Some(seq) => Ok(*seq.front().unwrap()),
                None => Ok(self.fallback),
            }
        }
    }

    struct AmbiguousOracle;

    #[async_trait]
    impl OracleGateway for AmbiguousOracle {
        async fn answer_for(
            &self,
            _question: &Question,
            _candidate: &Candidate,
        ) -> Result<OracleReply, OracleError> {
            Ok(OracleReply::Ambiguous)
        }
    }

    /// Oracle that answers yes for everyone but never answers for one
    /// candidate.
    struct StallingOracle {
        stall_for: String,
    }

    #[async_trait]
    impl OracleGateway for StallingOracle {
        async fn answer_for(
            &self,
            _question: &Question,
            candidate: &Candidate,
        ) -> Result<OracleReply, OracleError> {
            if candidate.matches_name(&self.stall_for) {
                tokio::time::sleep(Duration::from_secs(60)).await;
            }
            Ok(OracleReply::Yes)
        }
    }

    fn names(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    fn use_case<Q: Questioner + 'static, O: OracleGateway + 'static>(
        questioner: Q,
        oracle: O,
    ) -> RunSessionUseCase<Q, O> {
        RunSessionUseCase::new(Arc::new(questioner), Arc::new(oracle))
    }

    const MALE: &str = "Is this person male?";
    const ALIVE: &str = "Is this person alive as of 2020?";

    #[tokio::test]
    async fn test_perfect_split_then_success() {
        // Scenario: 4 candidates, target Steve Jobs. Round 1 splits 2/2,
        // round 2 narrows to the target alone.
        let questioner = ScriptedQuestioner::questions(&[MALE, ALIVE]);
        let oracle = TableOracle::new(&[
            (MALE, "Ada Lovelace", OracleReply::No),
            (MALE, "Steve Jobs", OracleReply::Yes),
            (MALE, "Marie Curie", OracleReply::No),
            (MALE, "Nelson Mandela", OracleReply::Yes),
            (ALIVE, "Steve Jobs", OracleReply::No),
            (ALIVE, "Nelson Mandela", OracleReply::Yes),
        ]);
        let input = RunSessionInput::new(
            names(&["Ada Lovelace", "Steve Jobs", "Marie Curie", "Nelson Mandela"]),
            SessionConfig::default().with_target("Steve Jobs"),
        );

        let report = use_case(questioner, oracle).execute(input).await.unwrap();

        assert_eq!(report.outcome, SessionOutcome::Success { rounds: 2 });
        let round1 = &report.rounds[0];
        assert_eq!(round1.ground_truth, OracleReply::Yes);
        assert_eq!(round1.yes_count, 2);
        assert_eq!(round1.no_count, 2);
        assert_eq!(round1.deviation, 0.0);
        assert_eq!(round1.survivors_before, 4);
        assert_eq!(round1.survivors_after, 2);
        assert!(!round1.inconsistency);

        let round2 = &report.rounds[1];
        assert_eq!(round2.ground_truth, OracleReply::No);
        assert_eq!(round2.survivors_after, 1);
    }

    #[tokio::test]
    async fn test_target_dropped_flags_inconsistency_and_exhausts_pool() {
        // The oracle answers No for the target's authoritative query but
        // Yes for the same candidate inside the batch, so the target is
        // filtered out along with everyone else.
        let questioner = ScriptedQuestioner::questions(&[ALIVE]);
        let oracle = TableOracle::new(&[
            // Ground-truth query comes first; batch query pops the second entry
            (ALIVE, "Steve Jobs", OracleReply::No),
            (ALIVE, "Steve Jobs", OracleReply::Yes),
            (ALIVE, "Nelson Mandela", OracleReply::Yes),
        ]);
        let input = RunSessionInput::new(
            names(&["Steve Jobs", "Nelson Mandela"]),
            SessionConfig::default().with_target("Steve Jobs"),
        );

        let report = use_case(questioner, oracle).execute(input).await.unwrap();

        assert_eq!(report.outcome, SessionOutcome::PoolExhausted { rounds: 1 });
        assert!(report.rounds[0].inconsistency);
        assert_eq!(report.rounds[0].survivors_after, 0);
    }

    #[tokio::test]
    async fn test_round_limit_termination() {
        // max_rounds = 1 with an unhelpful question: everyone answers Yes,
        // nothing is eliminated, exactly one round is recorded.
        let questioner = ScriptedQuestioner::questions(&["Is this a person?"]);
        let oracle = TableOracle::new(&[
            ("Is this a person?", "a", OracleReply::Yes),
            ("Is this a person?", "b", OracleReply::Yes),
            ("Is this a person?", "c", OracleReply::Yes),
            ("Is this a person?", "d", OracleReply::Yes),
            ("Is this a person?", "e", OracleReply::Yes),
        ]);
        let input = RunSessionInput::new(
            names(&["a", "b", "c", "d", "e"]),
            SessionConfig::default().with_target("a").with_max_rounds(1),
        );

        let report = use_case(questioner, oracle).execute(input).await.unwrap();

        assert_eq!(
            report.outcome,
            SessionOutcome::RoundLimitReached { rounds: 1 }
        );
        assert_eq!(report.rounds.len(), 1);
        assert_eq!(report.rounds[0].survivors_after, 5);
    }

    #[tokio::test]
    async fn test_explicit_target_missing_fails_before_any_round() {
        let questioner = ScriptedQuestioner::questions(&[MALE]);
        let oracle = TableOracle::new(&[]);
        let input = RunSessionInput::new(
            names(&["Ada Lovelace", "Marie Curie"]),
            SessionConfig::default().with_target("Alan Turing"),
        );

        let err = use_case(questioner, oracle).execute(input).await.unwrap_err();

        assert!(matches!(
            err.kind,
            SessionErrorKind::Domain(DomainError::TargetNotInPool(_))
        ));
        assert!(err.partial_rounds.is_empty());
    }

    #[tokio::test]
    async fn test_empty_candidate_list_rejected() {
        let questioner = ScriptedQuestioner::questions(&[]);
        let oracle = TableOracle::new(&[]);
        let input = RunSessionInput::new(Vec::new(), SessionConfig::default());

        let err = use_case(questioner, oracle).execute(input).await.unwrap_err();

        assert!(matches!(
            err.kind,
            SessionErrorKind::Domain(DomainError::EmptyCandidateList)
        ));
    }

    #[tokio::test]
    async fn test_correct_final_guess_terminates() {
        let questioner = ScriptedQuestioner::new(vec![QuestionerReply::FinalGuess(
            Candidate::new("Steve Jobs"),
        )]);
        let oracle = TableOracle::new(&[]);
        let input = RunSessionInput::new(
            names(&["Ada Lovelace", "Steve Jobs"]),
            SessionConfig::default().with_target("Steve Jobs"),
        );

        let report = use_case(questioner, oracle).execute(input).await.unwrap();

        assert_eq!(report.outcome, SessionOutcome::Success { rounds: 1 });
        assert_eq!(report.rounds[0].ground_truth, OracleReply::SuccessfulGuess);
    }

    #[tokio::test]
    async fn test_wrong_final_guess_removes_candidate_and_continues() {
        // Wrong guess eliminates Ada, leaving only the target
        let questioner = ScriptedQuestioner::new(vec![QuestionerReply::FinalGuess(
            Candidate::new("Ada Lovelace"),
        )]);
        let oracle = TableOracle::new(&[]);
        let input = RunSessionInput::new(
            names(&["Ada Lovelace", "Steve Jobs"]),
            SessionConfig::default().with_target("Steve Jobs"),
        );

        let report = use_case(questioner, oracle).execute(input).await.unwrap();

        assert_eq!(report.outcome, SessionOutcome::Success { rounds: 1 });
        assert_eq!(report.rounds[0].ground_truth, OracleReply::No);
        assert_eq!(report.rounds[0].survivors_after, 1);
    }

    #[tokio::test]
    async fn test_ambiguous_ground_truth_is_fatal_after_retries() {
        let questioner = ScriptedQuestioner::questions(&[MALE]);
        let input = RunSessionInput::new(
            names(&["Ada Lovelace", "Steve Jobs"]),
            SessionConfig::default().with_target("Steve Jobs"),
        );

        let err = use_case(questioner, AmbiguousOracle)
            .execute(input)
            .await
            .unwrap_err();

        assert!(matches!(
            err.kind,
            SessionErrorKind::GroundTruthAmbiguous {
                round: 1,
                attempts: 2
            }
        ));
        assert!(err.partial_rounds.is_empty());
    }

    #[tokio::test]
    async fn test_questioner_failure_preserves_partial_metrics() {
        // One good round, then the script runs dry
        let questioner = ScriptedQuestioner::questions(&[MALE]);
        let oracle = TableOracle::new(&[
            (MALE, "Ada Lovelace", OracleReply::No),
            (MALE, "Steve Jobs", OracleReply::Yes),
            (MALE, "Nelson Mandela", OracleReply::Yes),
        ]);
        let input = RunSessionInput::new(
            names(&["Ada Lovelace", "Steve Jobs", "Nelson Mandela"]),
            SessionConfig::default().with_target("Steve Jobs"),
        );

        let err = use_case(questioner, oracle).execute(input).await.unwrap_err();

        assert!(matches!(
            err.kind,
            SessionErrorKind::QuestionGeneration(QuestionerError::Unreachable(_))
        ));
        assert_eq!(err.partial_rounds.len(), 1);
        assert_eq!(err.partial_rounds[0].survivors_after, 2);
    }

    #[tokio::test]
    async fn test_pool_never_grows() {
        let questioner = ScriptedQuestioner::questions(&[MALE, ALIVE, "Is this a person?"]);
        let oracle = TableOracle::new(&[
            (MALE, "Ada Lovelace", OracleReply::No),
            (MALE, "Steve Jobs", OracleReply::Yes),
            (MALE, "Nelson Mandela", OracleReply::Yes),
            (ALIVE, "Steve Jobs", OracleReply::No),
            (ALIVE, "Nelson Mandela", OracleReply::No),
            ("Is this a person?", "Steve Jobs", OracleReply::Yes),
            ("Is this a person?", "Nelson Mandela", OracleReply::Yes),
        ]);
        let input = RunSessionInput::new(
            names(&["Ada Lovelace", "Steve Jobs", "Nelson Mandela"]),
            SessionConfig::default()
                .with_target("Steve Jobs")
                .with_max_rounds(3),
        );

        let report = use_case(questioner, oracle).execute(input).await.unwrap();

        let mut previous = report.initial_pool_size;
        for round in &report.rounds {
            assert!(round.survivors_after <= round.survivors_before);
            assert_eq!(round.survivors_before, previous);
            assert!((0.0..=0.5).contains(&round.deviation));
            previous = round.survivors_after;
        }
    }

    #[tokio::test]
    async fn test_timed_out_batch_query_settles_ambiguous_and_filters() {
        // Ada's query never returns; with a per-query timeout it settles
        // on ambiguous, counts on the no side, and is filtered out
        // against a yes ground truth.
        let questioner = ScriptedQuestioner::questions(&[MALE]);
        let oracle = StallingOracle {
            stall_for: "Ada Lovelace".to_string(),
        };
        let input = RunSessionInput::new(
            names(&["Ada Lovelace", "Steve Jobs", "Nelson Mandela"]),
            SessionConfig::default()
                .with_target("Steve Jobs")
                .with_max_rounds(1)
                .with_oracle_timeout(Duration::from_millis(25)),
        );

        let report = use_case(questioner, oracle).execute(input).await.unwrap();

        assert_eq!(
            report.outcome,
            SessionOutcome::RoundLimitReached { rounds: 1 }
        );
        let round = &report.rounds[0];
        assert_eq!(round.ground_truth, OracleReply::Yes);
        assert_eq!(round.yes_count, 2);
        assert_eq!(round.no_count, 1);
        assert_eq!(round.survivors_before, 3);
        assert_eq!(round.survivors_after, 2);
        assert!(!round.inconsistency);
    }

    #[tokio::test]
    async fn test_target_minority_answer_flags_inconsistency() {
        // The target answers with the minority side yet matches ground
        // truth, so it survives; the disagreement with the batch majority
        // is flagged on the round and the session keeps going.
        let questioner = ScriptedQuestioner::questions(&[MALE]);
        let oracle = TableOracle::new(&[
            (MALE, "a", OracleReply::No),
            (MALE, "b", OracleReply::No),
            (MALE, "c", OracleReply::Yes),
            (MALE, "d", OracleReply::Yes),
            (MALE, "e", OracleReply::Yes),
        ]);
        let input = RunSessionInput::new(
            names(&["a", "b", "c", "d", "e"]),
            SessionConfig::default().with_target("a").with_max_rounds(1),
        );

        let report = use_case(questioner, oracle).execute(input).await.unwrap();

        assert_eq!(
            report.outcome,
            SessionOutcome::RoundLimitReached { rounds: 1 }
        );
        let round = &report.rounds[0];
        assert_eq!(round.ground_truth, OracleReply::No);
        assert_eq!(round.yes_count, 3);
        assert_eq!(round.no_count, 2);
        assert_eq!(round.survivors_after, 2);
        assert!(round.inconsistency);
    }

    #[tokio::test]
    async fn test_wrong_final_guess_ignores_name_casing() {
        // The guessed name is cased differently from the pool entry; the
        // candidate must still be removed.
        let questioner = ScriptedQuestioner::new(vec![QuestionerReply::FinalGuess(
            Candidate::new("ada lovelace"),
        )]);
        let oracle = TableOracle::new(&[]);
        let input = RunSessionInput::new(
            names(&["Ada Lovelace", "Steve Jobs"]),
            SessionConfig::default().with_target("Steve Jobs"),
        );

        let report = use_case(questioner, oracle).execute(input).await.unwrap();

        assert_eq!(report.outcome, SessionOutcome::Success { rounds: 1 });
        assert_eq!(report.rounds[0].survivors_after, 1);
    }

    #[tokio::test]
    async fn test_zero_max_rounds_is_invalid_config() {
        let questioner = ScriptedQuestioner::questions(&[]);
        let oracle = TableOracle::new(&[]);
        let input = RunSessionInput::new(
            names(&["a", "b"]),
            SessionConfig::default().with_max_rounds(0),
        );

        let err = use_case(questioner, oracle).execute(input).await.unwrap_err();
        assert!(matches!(err.kind, SessionErrorKind::InvalidConfig(_)));
    }
}
