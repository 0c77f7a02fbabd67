//! Per-round records and split-quality metrics.

use serde::{Deserialize, Serialize};

use crate::game::answer::OracleReply;

/// Absolute distance of a yes/no split from the ideal 0.5 ratio.
///
/// Defined as 0 when there are no votes at all, and 0 at an exact tie.
/// Always in `[0, 0.5]`.
pub fn split_deviation(yes_count: usize, no_count: usize) -> f64 {
    let total = yes_count + no_count;
    if total == 0 {
        return 0.0;
    }
    (yes_count as f64 / total as f64 - 0.5).abs()
}

/// One prior question/answer pair, replayed to the questioner as history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Exchange {
    pub question: String,
    pub answer: OracleReply,
}

impl Exchange {
    pub fn new(question: impl Into<String>, answer: OracleReply) -> Self {
        Self {
            question: question.into(),
            answer,
        }
    }
}

/// Complete record of one question/answer/filter cycle.
///
/// Immutable once constructed; the recorder only ever appends these.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoundRecord {
    /// 1-based round index
    pub index: usize,
    /// The question text (or the guessed name for a final-guess round)
    pub question: String,
    /// The authoritative answer for the target
    pub ground_truth: OracleReply,
    /// Survivors answering yes
    pub yes_count: usize,
    /// Survivors answering no (ambiguous counts here)
    pub no_count: usize,
    /// Pool size before filtering
    pub survivors_before: usize,
    /// Pool size after filtering
    pub survivors_after: usize,
    /// Distance of this split from the ideal 50/50
    pub deviation: f64,
    /// The target itself was filtered out, or its answer disagreed with
    /// the batch majority — oracle inconsistency, recorded but non-fatal
    pub inconsistency: bool,
}

impl RoundRecord {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        index: usize,
        question: impl Into<String>,
        ground_truth: OracleReply,
        yes_count: usize,
        no_count: usize,
        survivors_before: usize,
        survivors_after: usize,
    ) -> Self {
        Self {
            index,
            question: question.into(),
            ground_truth,
            yes_count,
            no_count,
            survivors_before,
            survivors_after,
            deviation: split_deviation(yes_count, no_count),
            inconsistency: false,
        }
    }

    pub fn with_inconsistency(mut self) -> Self {
        self.inconsistency = true;
        self
    }
}

/// Append-only accumulator of round records.
///
/// Pure accumulation — no computation, and a past record is never touched.
#[derive(Debug, Default, Clone)]
pub struct MetricsRecorder {
    records: Vec<RoundRecord>,
}

impl MetricsRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, record: RoundRecord) {
        debug_assert!(
            self.records
                .last()
                .map(|r| r.index < record.index)
                .unwrap_or(true),
            "round indices must be strictly increasing"
        );
        self.records.push(record);
    }

    pub fn export(&self) -> &[RoundRecord] {
        &self.records
    }

    pub fn into_records(self) -> Vec<RoundRecord> {
        self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deviation_perfect_split() {
        assert_eq!(split_deviation(2, 2), 0.0);
        assert_eq!(split_deviation(5, 5), 0.0);
    }

    #[test]
    fn test_deviation_one_sided() {
        assert_eq!(split_deviation(4, 0), 0.5);
        assert_eq!(split_deviation(0, 3), 0.5);
    }

    #[test]
    fn test_deviation_empty_is_zero() {
        assert_eq!(split_deviation(0, 0), 0.0);
    }

    #[test]
    fn test_deviation_bounds() {
        for yes in 0..10 {
            for no in 0..10 {
                let d = split_deviation(yes, no);
                assert!((0.0..=0.5).contains(&d), "deviation {} out of range", d);
            }
        }
    }

    #[test]
    fn test_record_computes_deviation() {
        let r = RoundRecord::new(1, "Is this person male?", OracleReply::Yes, 2, 2, 4, 2);
        assert_eq!(r.deviation, 0.0);
        assert!(!r.inconsistency);
    }

    #[test]
    fn test_recorder_appends_in_order() {
        let mut recorder = MetricsRecorder::new();
        recorder.record(RoundRecord::new(1, "q1", OracleReply::Yes, 3, 1, 4, 3));
        recorder.record(RoundRecord::new(2, "q2", OracleReply::No, 1, 2, 3, 2));
        assert_eq!(recorder.len(), 2);
        assert_eq!(recorder.export()[0].index, 1);
        assert_eq!(recorder.export()[1].index, 2);
    }
}
