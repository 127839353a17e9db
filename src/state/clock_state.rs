//! Clock state structure

use serde::{Deserialize, Serialize};

use super::{BlindLevel, BreakConfig, TournamentStructure};

/// Whether the countdown is moving
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RunStatus {
    #[default]
    Idle,
    Running,
    Paused,
}

impl RunStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            RunStatus::Idle => "idle",
            RunStatus::Running => "running",
            RunStatus::Paused => "paused",
        }
    }
}

/// Full state of the tournament clock
///
/// Values are never mutated after they are published; every accepted
/// transition produces a new `ClockState`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClockState {
    pub status: RunStatus,
    /// Seconds left on the active countdown (break time while on a break)
    pub remaining_time: u32,
    /// Seconds elapsed since the active countdown started
    pub elapsed_time: u32,
    /// Zero-based index into `blind_levels`
    pub current_level: usize,
    pub blind_levels: Vec<BlindLevel>,
    pub break_config: BreakConfig,
    /// Seconds given to a fresh level
    pub level_duration: u32,
    pub is_on_break: bool,
}

impl ClockState {
    /// Create an idle clock at the first level of a structure
    pub fn new(structure: TournamentStructure) -> Self {
        Self {
            status: RunStatus::Idle,
            remaining_time: structure.level_duration,
            elapsed_time: 0,
            current_level: 0,
            blind_levels: structure.blind_levels,
            break_config: structure.break_config,
            level_duration: structure.level_duration,
            is_on_break: false,
        }
    }

    /// Check if `current_level` is the final level (or there are no levels)
    pub fn is_last_level(&self) -> bool {
        self.current_level + 1 >= self.blind_levels.len()
    }

    /// The structure this clock is running
    pub fn structure(&self) -> TournamentStructure {
        TournamentStructure {
            blind_levels: self.blind_levels.clone(),
            break_config: self.break_config,
            level_duration: self.level_duration,
        }
    }
}

impl Default for ClockState {
    fn default() -> Self {
        Self::new(TournamentStructure::standard())
    }
}
