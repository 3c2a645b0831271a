//! Combat: enemy records, encounter resolution, boost timers.

pub mod logic;
pub mod types;
