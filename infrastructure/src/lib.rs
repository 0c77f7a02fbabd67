//! Infrastructure layer for twentyq
//!
//! Adapters for the outside world: the OpenAI chat-completions client
//! behind the questioner and oracle ports, the experiment archive, the
//! TOML configuration loader and the candidate list loader.

pub mod archive;
pub mod config;
pub mod input;
pub mod openai;

// Re-export commonly used types
pub use archive::{ArchiveError, ExperimentArchive, ExperimentParams};
pub use config::{ConfigLoader, FileConfig};
pub use input::{load_candidates, InputError};
pub use openai::{OpenAiClient, OpenAiError, OpenAiOracle, OpenAiQuestioner};
