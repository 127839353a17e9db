//! Clock transition function
//!
//! `reduce` is the only code that produces new clock states. It is pure and
//! total: an action that does not apply to the current state returns the
//! same `Arc` it was given, so callers can detect a no-op with `Arc::ptr_eq`.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use super::break_policy::should_take_break;
use crate::state::{BlindLevel, BreakConfig, ClockState, RunStatus, TournamentStructure};

/// Every event the clock understands
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload", rename_all = "camelCase")]
pub enum Action {
    Start,
    Pause,
    Reset,
    Tick,
    NextLevel,
    PrevLevel,
    LoadStructure(TournamentStructure),
    UpdateBlindLevels(Vec<BlindLevel>),
    UpdateBreakConfig(BreakConfig),
    UpdateLevelDuration(u32),
    StartBreak,
    EndBreak,
    SkipBreak,
    StartBreakTimer,
}

impl Action {
    /// Short name used in logs and the status endpoint
    pub fn name(&self) -> &'static str {
        match self {
            Action::Start => "start",
            Action::Pause => "pause",
            Action::Reset => "reset",
            Action::Tick => "tick",
            Action::NextLevel => "next-level",
            Action::PrevLevel => "prev-level",
            Action::LoadStructure(_) => "load-structure",
            Action::UpdateBlindLevels(_) => "update-blind-levels",
            Action::UpdateBreakConfig(_) => "update-break-config",
            Action::UpdateLevelDuration(_) => "update-level-duration",
            Action::StartBreak => "start-break",
            Action::EndBreak => "end-break",
            Action::SkipBreak => "skip-break",
            Action::StartBreakTimer => "start-break-timer",
        }
    }
}

/// Apply `action` to `state`, returning the next state
pub fn reduce(state: &Arc<ClockState>, action: Action) -> Arc<ClockState> {
    match action {
        Action::Start => {
            if state.status == RunStatus::Running {
                return Arc::clone(state);
            }
            update(state, |next| next.status = RunStatus::Running)
        }

        Action::Pause => {
            if state.status != RunStatus::Running {
                return Arc::clone(state);
            }
            update(state, |next| next.status = RunStatus::Paused)
        }

        Action::Reset => {
            if state.is_on_break {
                return Arc::clone(state);
            }
            update(state, |next| {
                next.status = RunStatus::Idle;
                next.elapsed_time = 0;
                next.remaining_time = next.level_duration;
            })
        }

        Action::Tick => tick(state),

        Action::NextLevel => {
            if state.status == RunStatus::Running || state.is_last_level() {
                return Arc::clone(state);
            }
            Arc::new(advance_level(state, RunStatus::Idle))
        }

        Action::PrevLevel => {
            if state.status == RunStatus::Running || state.current_level == 0 {
                return Arc::clone(state);
            }
            update(state, |next| {
                next.current_level -= 1;
                next.is_on_break = false;
                next.status = RunStatus::Idle;
                next.remaining_time = next.level_duration;
                next.elapsed_time = 0;
            })
        }

        Action::LoadStructure(structure) => Arc::new(ClockState::new(structure)),

        Action::UpdateBlindLevels(levels) => update(state, |next| {
            next.blind_levels = levels;
            if next.current_level >= next.blind_levels.len() {
                next.current_level = 0;
                next.is_on_break = false;
                next.status = RunStatus::Idle;
                next.remaining_time = next.level_duration;
                next.elapsed_time = 0;
            }
        }),

        Action::UpdateBreakConfig(config) => update(state, |next| next.break_config = config),

        Action::UpdateLevelDuration(duration) => update(state, |next| {
            next.level_duration = duration;
            // Only an idle level countdown follows the new duration
            if next.status == RunStatus::Idle && !next.is_on_break {
                next.remaining_time = duration;
            }
        }),

        Action::StartBreak => update(state, |next| {
            next.is_on_break = true;
            next.status = RunStatus::Idle;
            next.remaining_time = next.break_config.duration;
            next.elapsed_time = 0;
        }),

        Action::EndBreak => {
            if !state.is_on_break {
                return Arc::clone(state);
            }
            update(state, |next| {
                next.is_on_break = false;
                next.remaining_time = next.level_duration;
                next.elapsed_time = 0;
            })
        }

        Action::SkipBreak => {
            if !state.is_on_break {
                return Arc::clone(state);
            }
            update(state, |next| {
                next.is_on_break = false;
                next.status = RunStatus::Idle;
                next.remaining_time = next.level_duration;
                next.elapsed_time = 0;
            })
        }

        Action::StartBreakTimer => {
            if state.status == RunStatus::Running {
                return Arc::clone(state);
            }
            update(state, |next| next.status = RunStatus::Running)
        }
    }
}

/// Copy `state`, apply `f` to the copy and publish it
fn update(state: &ClockState, f: impl FnOnce(&mut ClockState)) -> Arc<ClockState> {
    let mut next = state.clone();
    f(&mut next);
    Arc::new(next)
}

fn tick(state: &Arc<ClockState>) -> Arc<ClockState> {
    if state.status != RunStatus::Running {
        return Arc::clone(state);
    }

    if state.remaining_time > 0 {
        return update(state, |next| {
            next.remaining_time -= 1;
            next.elapsed_time += 1;
        });
    }

    if state.is_on_break {
        // Break over, play continues at the level the break preceded
        return update(state, |next| {
            next.is_on_break = false;
            next.remaining_time = next.level_duration;
            next.elapsed_time = 0;
        });
    }

    if state.is_last_level() {
        return update(state, |next| {
            next.status = RunStatus::Idle;
            next.remaining_time = 0;
        });
    }

    Arc::new(advance_level(state, RunStatus::Running))
}

/// Move to the next level, inserting a break when one is due after the
/// level just completed. Callers guarantee a next level exists.
fn advance_level(state: &ClockState, status: RunStatus) -> ClockState {
    let break_due = should_take_break(state.current_level, &state.break_config);
    let mut next = state.clone();
    next.current_level += 1;
    next.status = status;
    next.elapsed_time = 0;
    next.is_on_break = break_due;
    next.remaining_time = if break_due {
        state.break_config.duration
    } else {
        state.level_duration
    };
    next
}
