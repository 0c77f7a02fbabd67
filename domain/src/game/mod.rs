//! Game entities: the candidate pool, oracle replies, rounds and sessions.

pub mod answer;
pub mod candidate;
pub mod round;
pub mod session;
