//! Candidate and CandidatePool
//!
//! The pool is the single piece of mutable session state. It only ever
//! shrinks: candidates are removed by filtering, never added or renamed.

use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};

use crate::core::error::DomainError;

/// One named entity in the guessing pool (Value Object)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Candidate {
    name: String,
}

impl Candidate {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Case-insensitive name comparison, ignoring surrounding whitespace.
    ///
    /// Used wherever a model echoes a candidate name back (final guesses),
    /// since models are not reliable about exact casing.
    pub fn matches_name(&self, other: &str) -> bool {
        self.name.trim().eq_ignore_ascii_case(other.trim())
    }
}

impl std::fmt::Display for Candidate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// Ordered, deduplicated set of surviving candidates.
///
/// Input order is preserved; duplicate names are dropped (first occurrence
/// wins) so that random target selection is uniform over distinct names.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CandidatePool {
    candidates: Vec<Candidate>,
}

impl CandidatePool {
    /// Build a pool from raw names.
    ///
    /// Trims whitespace, skips blank entries and duplicates. Fails with
    /// [`DomainError::EmptyCandidateList`] if nothing survives.
    pub fn new<I, S>(names: I) -> Result<Self, DomainError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut candidates: Vec<Candidate> = Vec::new();
        for name in names {
            let name: String = name.into();
            let trimmed = name.trim();
            if trimmed.is_empty() {
                continue;
            }
            if candidates.iter().any(|c| c.matches_name(trimmed)) {
                continue;
            }
            candidates.push(Candidate::new(trimmed));
        }

        if candidates.is_empty() {
            return Err(DomainError::EmptyCandidateList);
        }

        Ok(Self { candidates })
    }

    pub fn len(&self) -> usize {
        self.candidates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.candidates.iter().any(|c| c.matches_name(name))
    }

    /// Look up a candidate by (case-insensitive) name.
    pub fn get(&self, name: &str) -> Option<&Candidate> {
        self.candidates.iter().find(|c| c.matches_name(name))
    }

    pub fn iter(&self) -> impl Iterator<Item = &Candidate> {
        self.candidates.iter()
    }

    /// Snapshot of the surviving candidates, in pool order.
    pub fn survivors(&self) -> Vec<Candidate> {
        self.candidates.clone()
    }

    /// Remove every candidate for which `keep` returns false.
    ///
    /// Relative order of survivors is preserved. Returns the number of
    /// candidates removed.
    pub fn filter<F>(&mut self, keep: F) -> usize
    where
        F: FnMut(&Candidate) -> bool,
    {
        let before = self.candidates.len();
        self.candidates.retain(keep);
        before - self.candidates.len()
    }

    /// Uniformly random candidate, for target selection at session start.
    pub fn pick_random(&self) -> &Candidate {
        self.candidates
            .choose(&mut rand::thread_rng())
            .expect("pool is never empty by construction")
    }
}
