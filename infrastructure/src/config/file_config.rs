//! On-disk configuration schema (`twentyq.toml`).

use std::time::Duration;

use serde::{Deserialize, Serialize};
use twentyq_application::SessionConfig;
use twentyq_domain::{Model, ReasoningEffort};

/// Root of the TOML configuration file
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    pub models: ModelsConfig,
    pub session: SessionFileConfig,
    pub archive: ArchiveConfig,
}

/// `[models]` section
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelsConfig {
    pub questioner: Model,
    pub oracle: Model,
    pub reasoning_effort: ReasoningEffort,
}

impl Default for ModelsConfig {
    fn default() -> Self {
        Self {
            questioner: Model::default_questioner(),
            oracle: Model::default_oracle(),
            reasoning_effort: ReasoningEffort::default(),
        }
    }
}

/// `[session]` section
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionFileConfig {
    pub max_rounds: usize,
    pub ground_truth_retries: usize,
    pub oracle_retries: usize,
    /// Per-query timeout in seconds; absent means no timeout
    pub oracle_timeout_secs: Option<u64>,
}

impl Default for SessionFileConfig {
    fn default() -> Self {
        Self {
            max_rounds: 20,
            ground_truth_retries: 1,
            oracle_retries: 1,
            oracle_timeout_secs: None,
        }
    }
}

/// `[archive]` section
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ArchiveConfig {
    /// Directory under which experiment directories are created
    pub root: String,
}

impl Default for ArchiveConfig {
    fn default() -> Self {
        Self {
            root: "experiments".to_string(),
        }
    }
}

impl FileConfig {
    /// Build the engine configuration from the file values.
    ///
    /// The target name is a per-run CLI concern and stays unset here.
    pub fn session_config(&self) -> SessionConfig {
        SessionConfig {
            questioner_model: self.models.questioner.clone(),
            oracle_model: self.models.oracle.clone(),
            reasoning_effort: self.models.reasoning_effort,
            max_rounds: self.session.max_rounds,
            target_name: None,
            ground_truth_retries: self.session.ground_truth_retries,
            oracle_retries: self.session.oracle_retries,
            oracle_timeout: self.session.oracle_timeout_secs.map(Duration::from_secs),
        }
    }
}
