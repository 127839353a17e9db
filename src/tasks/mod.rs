//! Background tasks module
//!
//! This module contains background tasks that run alongside the HTTP server.

pub mod event_log;
pub mod tick_driver;

// Re-export main items
pub use event_log::event_log_task;
pub use tick_driver::{tick_driver_task, TickDriver, TICK_PERIOD};
