//! OpenAI chat-completions adapters for the questioner and oracle ports.

pub mod client;
pub mod oracle;
pub mod questioner;

pub use client::{OpenAiClient, OpenAiError};
pub use oracle::OpenAiOracle;
pub use questioner::OpenAiQuestioner;
