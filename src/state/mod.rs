//! State management module
//!
//! This module contains the clock value types and the session store that owns them.

pub mod app_state;
pub mod clock_state;
pub mod structure;

// Re-export main types
pub use app_state::{AppState, Dispatch};
pub use clock_state::{ClockState, RunStatus};
pub use structure::{BlindLevel, BreakConfig, StructureError, TournamentStructure};
