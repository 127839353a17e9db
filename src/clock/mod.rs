//! Tournament clock logic
//!
//! This module contains the break rules, the transition function and the
//! surfaces consumers use to observe and drive the clock.

pub mod break_policy;
pub mod events;
pub mod facade;
pub mod reducer;

// Re-export main types
pub use break_policy::{levels_until_break, should_take_break};
pub use events::ClockEvent;
pub use facade::{ClockFacade, ClockView};
pub use reducer::{reduce, Action};
