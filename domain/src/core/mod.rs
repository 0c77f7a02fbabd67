//! Core value objects shared across the domain

pub mod error;
pub mod model;
pub mod question;
