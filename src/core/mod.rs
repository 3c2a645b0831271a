//! Core simulation: state, constants, and the per-tick orchestrator.

pub mod constants;
pub mod game_state;
pub mod tick;
