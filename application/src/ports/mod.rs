//! Port definitions (interfaces to the outside world)

pub mod oracle_gateway;
pub mod progress;
pub mod questioner;
