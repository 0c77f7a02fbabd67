//! Oracle and questioner reply types, plus the text parsing boundary.
//!
//! Model output is free-form text; these functions turn it into tagged
//! variants so that the engine never inspects raw strings. No I/O here —
//! pure pattern matching, same spirit as classic keyword vote parsing.

use serde::{Deserialize, Serialize};

use crate::core::question::Question;
use crate::game::candidate::{Candidate, CandidatePool};

/// A single oracle verdict for one candidate and one question.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OracleReply {
    Yes,
    No,
    /// The reply carried no usable signal (timeout, refusal, garbage).
    Ambiguous,
    /// The question was a direct, correct guess of this candidate.
    SuccessfulGuess,
}

impl OracleReply {
    pub fn is_yes(&self) -> bool {
        matches!(self, OracleReply::Yes)
    }

    /// Collapse to the value used for pool filtering.
    ///
    /// `Ambiguous` filters as `No`: a candidate the oracle could not vouch
    /// for is not kept on the strength of a missing answer.
    pub fn effective(&self) -> OracleReply {
        match self {
            OracleReply::Ambiguous => OracleReply::No,
            other => *other,
        }
    }

    /// Whether a candidate with this reply survives filtering against the
    /// given ground-truth reply.
    pub fn matches_ground_truth(&self, truth: OracleReply) -> bool {
        self.effective() == truth.effective()
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            OracleReply::Yes => "yes",
            OracleReply::No => "no",
            OracleReply::Ambiguous => "ambiguous",
            OracleReply::SuccessfulGuess => "successful_guess",
        }
    }
}

impl std::fmt::Display for OracleReply {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// What the questioner produced for this round.
#[derive(Debug, Clone, PartialEq)]
pub enum QuestionerReply {
    /// A new yes/no question to put to the oracle.
    Question(Question),
    /// A terminal guess naming one candidate from the current pool.
    FinalGuess(Candidate),
}

/// Parse a raw oracle response into an [`OracleReply`].
///
/// The oracle is instructed to wrap its verdict in an `<answer>` tag.
/// Tag extraction is tried first; if the tag is missing the whole reply is
/// scanned for keywords (`successful_guess` before `yes` before `no`, since
/// replies like "yes, this is a successful guess" must not read as plain
/// yes). With no recognizable signal at all the reply is `Ambiguous`.
pub fn parse_oracle_reply(response: &str) -> OracleReply {
    let lower = response.to_lowercase();

    if let Some(tagged) = extract_answer_tag(&lower) {
        match tagged.trim() {
            "yes" => return OracleReply::Yes,
            "no" => return OracleReply::No,
            "successful_guess" => return OracleReply::SuccessfulGuess,
            _ => {}
        }
    }

    if lower.contains("successful_guess") {
        OracleReply::SuccessfulGuess
    } else if lower.contains("yes") {
        OracleReply::Yes
    } else if lower.contains("no") {
        OracleReply::No
    } else {
        OracleReply::Ambiguous
    }
}

/// Parse a raw questioner response into a [`QuestionerReply`].
///
/// A line starting with `FINAL GUESS:` whose remainder names a pool
/// candidate verbatim (case-insensitive) is a terminal guess; everything
/// else is treated as the next question. A "final guess" naming an unknown
/// candidate is demoted to a question rather than rejected — the oracle
/// will answer it truthfully either way.
pub fn parse_questioner_reply(response: &str, pool: &CandidatePool) -> Option<QuestionerReply> {
    let trimmed = response.trim();
    if trimmed.is_empty() {
        return None;
    }

    for line in trimmed.lines() {
        let lower = line.trim().to_lowercase();
        if let Some(rest) = lower.strip_prefix("final guess:") {
            let name = rest.trim().trim_matches(|c: char| {
                c == '"' || c == '\'' || c == '.' || c == '!' || c == '?'
            });
            if let Some(candidate) = pool.get(name) {
                return Some(QuestionerReply::FinalGuess(candidate.clone()));
            }
        }
    }

    Question::try_new(trimmed).map(QuestionerReply::Question)
}

fn extract_answer_tag(lower: &str) -> Option<&str> {
    let start = lower.find("<answer>")? + "<answer>".len();
    let end = lower[start..].find("</answer>")?;
    Some(&lower[start..start + end])
}
