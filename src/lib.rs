//! Blind Clock - A state-managed HTTP server running a poker tournament clock
//!
//! The clock counts down an ordered list of blind levels and inserts breaks
//! on a schedule. All behaviour lives in a pure transition function
//! (`clock::reduce`); the session store serializes actions into it, and a
//! background task issues one tick per second while the clock is running.

pub mod config;
pub mod state;
pub mod clock;
pub mod api;
pub mod tasks;
pub mod utils;

// Re-export commonly used types
pub use config::Config;
pub use state::{AppState, ClockState, RunStatus, TournamentStructure};
pub use clock::{reduce, Action, ClockFacade, ClockView};
pub use api::create_router;
pub use tasks::TickDriver;
pub use utils::signals::shutdown_signal;
