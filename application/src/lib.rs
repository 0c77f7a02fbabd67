//! Application layer for twentyq
//!
//! This crate contains the round engine use case, port definitions, and
//! session configuration. It depends only on the domain layer.

pub mod config;
pub mod ports;
pub mod use_cases;

// Re-export commonly used types
pub use config::SessionConfig;
pub use ports::{
    oracle_gateway::{OracleError, OracleGateway},
    progress::{NoProgress, SessionProgress},
    questioner::{Questioner, QuestionerError},
};
pub use use_cases::run_session::{
    RunSessionInput, RunSessionUseCase, SessionError, SessionErrorKind,
};
