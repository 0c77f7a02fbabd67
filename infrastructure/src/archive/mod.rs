//! Experiment archive: `params.json` + `results.jsonl` per experiment.
//!
//! One directory per experiment name. `results.jsonl` holds one JSON
//! object per round so the external plotting utility can stream it;
//! `params.json` records the configuration, `outcome.json` how the
//! session ended.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::info;
use twentyq_domain::{Model, ReasoningEffort, RoundRecord, SessionOutcome};

#[derive(Error, Debug)]
pub enum ArchiveError {
    #[error("Archive I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Archive serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Experiment configuration as persisted alongside the results.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExperimentParams {
    pub input_file: String,
    pub model: Model,
    pub oracle_model: Model,
    pub reasoning_effort: ReasoningEffort,
    pub max_rounds: usize,
    /// Explicitly requested target, if any (random selection otherwise)
    pub target_name: Option<String>,
    pub created_at: String,
}

impl ExperimentParams {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        input_file: impl Into<String>,
        model: Model,
        oracle_model: Model,
        reasoning_effort: ReasoningEffort,
        max_rounds: usize,
        target_name: Option<String>,
    ) -> Self {
        Self {
            input_file: input_file.into(),
            model,
            oracle_model,
            reasoning_effort,
            max_rounds,
            target_name,
            created_at: chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Secs, true),
        }
    }
}

/// Writer for one experiment's archive directory.
pub struct ExperimentArchive {
    dir: PathBuf,
}

impl ExperimentArchive {
    /// Create (or reuse) the directory `root/<experiment_name>`.
    pub fn create(root: impl AsRef<Path>, experiment_name: &str) -> Result<Self, ArchiveError> {
        let dir = root.as_ref().join(experiment_name);
        std::fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn write_params(&self, params: &ExperimentParams) -> Result<(), ArchiveError> {
        let path = self.dir.join("params.json");
        std::fs::write(&path, serde_json::to_string_pretty(params)?)?;
        Ok(())
    }

    /// Write the per-round records as line-delimited JSON.
    ///
    /// Also used for the partial records of an aborted session.
    pub fn write_results(&self, rounds: &[RoundRecord]) -> Result<PathBuf, ArchiveError> {
        let path = self.dir.join("results.jsonl");
        let mut writer = BufWriter::new(File::create(&path)?);
        for round in rounds {
            let record = serde_json::json!({
                "question_number": round.index,
                "question": round.question,
                "yes_count": round.yes_count,
                "no_count": round.no_count,
                "survivors_count": round.survivors_before,
                "survivors_after": round.survivors_after,
                "deviation": round.deviation,
                "ground_truth": round.ground_truth,
                "inconsistency": round.inconsistency,
            });
            writeln!(writer, "{}", serde_json::to_string(&record)?)?;
        }
        writer.flush()?;
        info!("Wrote {} round record(s) to {}", rounds.len(), path.display());
        Ok(path)
    }

    pub fn write_outcome(&self, outcome: &SessionOutcome) -> Result<(), ArchiveError> {
        let path = self.dir.join("outcome.json");
        std::fs::write(&path, serde_json::to_string_pretty(outcome)?)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Read;
    use twentyq_domain::OracleReply;

    #[test]
    fn test_results_jsonl_one_line_per_round() {
        let dir = tempfile::tempdir().unwrap();
        let archive = ExperimentArchive::create(dir.path(), "exp1").unwrap();

        let rounds = vec![
            RoundRecord::new(1, "Is this person male?", OracleReply::Yes, 2, 2, 4, 2),
            RoundRecord::new(2, "Is this person alive?", OracleReply::No, 1, 1, 2, 1)
                .with_inconsistency(),
        ];
        let path = archive.write_results(&rounds).unwrap();

        let mut content = String::new();
        File::open(&path).unwrap().read_to_string(&mut content).unwrap();
        let lines: Vec<&str> = content.trim().lines().collect();
        assert_eq!(lines.len(), 2);

        let first: serde_json::Value = serde_json::from_str(lines[0]).unwrap();
        assert_eq!(first["question_number"], 1);
        assert_eq!(first["yes_count"], 2);
        assert_eq!(first["no_count"], 2);
        assert_eq!(first["survivors_count"], 4);
        assert_eq!(first["deviation"], 0.0);
        assert_eq!(first["ground_truth"], "yes");

        let second: serde_json::Value = serde_json::from_str(lines[1]).unwrap();
        assert_eq!(second["inconsistency"], true);
    }

    #[test]
    fn test_params_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let archive = ExperimentArchive::create(dir.path(), "exp2").unwrap();

        let params = ExperimentParams::new(
            "names.txt",
            Model::Gpt35Turbo,
            Model::Gpt4o,
            ReasoningEffort::Medium,
            20,
            None,
        );
        archive.write_params(&params).unwrap();

        let content = std::fs::read_to_string(archive.dir().join("params.json")).unwrap();
        let loaded: ExperimentParams = serde_json::from_str(&content).unwrap();
        assert_eq!(loaded.model, Model::Gpt35Turbo);
        assert_eq!(loaded.oracle_model, Model::Gpt4o);
        assert_eq!(loaded.max_rounds, 20);
        assert!(loaded.target_name.is_none());
    }

    #[test]
    fn test_outcome_written_as_tagged_json() {
        let dir = tempfile::tempdir().unwrap();
        let archive = ExperimentArchive::create(dir.path(), "exp3").unwrap();

        archive
            .write_outcome(&SessionOutcome::Success { rounds: 7 })
            .unwrap();

        let content = std::fs::read_to_string(archive.dir().join("outcome.json")).unwrap();
        let value: serde_json::Value = serde_json::from_str(&content).unwrap();
        assert_eq!(value["outcome"], "success");
        assert_eq!(value["rounds"], 7);
    }
}
