//! Read and command surface for clock consumers

use std::sync::Arc;

use serde::Serialize;

use super::{break_policy::levels_until_break, Action};
use crate::state::{AppState, BlindLevel, ClockState, Dispatch, RunStatus};

/// Fields derived from a clock snapshot
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClockView {
    pub is_running: bool,
    pub is_paused: bool,
    pub is_idle: bool,
    pub current_blind: Option<BlindLevel>,
    pub next_blind: Option<BlindLevel>,
    pub has_next_level: bool,
    pub has_prev_level: bool,
    pub levels_until_break: Option<u32>,
}

impl ClockView {
    pub fn of(clock: &ClockState) -> Self {
        let next_blind = clock.blind_levels.get(clock.current_level + 1).copied();
        Self {
            is_running: clock.status == RunStatus::Running,
            is_paused: clock.status == RunStatus::Paused,
            is_idle: clock.status == RunStatus::Idle,
            current_blind: clock.blind_levels.get(clock.current_level).copied(),
            next_blind,
            has_next_level: next_blind.is_some(),
            has_prev_level: clock.current_level > 0,
            levels_until_break: levels_until_break(clock.current_level, &clock.break_config),
        }
    }
}

/// Commands forwarded to the session store as actions
#[derive(Debug, Clone)]
pub struct ClockFacade {
    state: Arc<AppState>,
}

impl ClockFacade {
    pub fn new(state: Arc<AppState>) -> Self {
        Self { state }
    }

    /// Current snapshot
    pub fn clock(&self) -> Arc<ClockState> {
        self.state.snapshot()
    }

    /// Derived fields for the current snapshot
    pub fn view(&self) -> ClockView {
        ClockView::of(&self.state.snapshot())
    }

    pub fn start(&self) -> Dispatch {
        self.state.dispatch(Action::Start)
    }

    pub fn pause(&self) -> Dispatch {
        self.state.dispatch(Action::Pause)
    }

    /// Pause if running, otherwise start
    pub fn toggle(&self) -> Dispatch {
        self.state.dispatch_with(|clock| {
            if clock.status == RunStatus::Running {
                Action::Pause
            } else {
                Action::Start
            }
        })
    }

    pub fn reset(&self) -> Dispatch {
        self.state.dispatch(Action::Reset)
    }

    pub fn next_level(&self) -> Dispatch {
        self.state.dispatch(Action::NextLevel)
    }

    pub fn prev_level(&self) -> Dispatch {
        self.state.dispatch(Action::PrevLevel)
    }

    pub fn skip_break(&self) -> Dispatch {
        self.state.dispatch(Action::SkipBreak)
    }

    pub fn start_break_timer(&self) -> Dispatch {
        self.state.dispatch(Action::StartBreakTimer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{BreakConfig, TournamentStructure};

    fn structure() -> TournamentStructure {
        TournamentStructure {
            blind_levels: vec![
                BlindLevel::new(25, 50),
                BlindLevel::new(50, 100),
                BlindLevel::with_ante(100, 200, 25),
            ],
            break_config: BreakConfig::new(4, 600),
            level_duration: 900,
        }
    }

    fn facade() -> ClockFacade {
        ClockFacade::new(Arc::new(AppState::new(0, "127.0.0.1".to_string(), structure())))
    }

    #[test]
    fn view_of_first_level() {
        let view = ClockView::of(&ClockState::new(structure()));
        assert!(view.is_idle);
        assert!(!view.is_running && !view.is_paused);
        assert_eq!(view.current_blind, Some(BlindLevel::new(25, 50)));
        assert_eq!(view.next_blind, Some(BlindLevel::new(50, 100)));
        assert!(view.has_next_level);
        assert!(!view.has_prev_level);
        assert_eq!(view.levels_until_break, Some(4));
    }

    #[test]
    fn view_of_last_level_has_no_next_blind() {
        let clock = ClockState {
            current_level: 2,
            ..ClockState::new(structure())
        };
        let view = ClockView::of(&clock);
        assert_eq!(view.current_blind, Some(BlindLevel::with_ante(100, 200, 25)));
        assert_eq!(view.next_blind, None);
        assert!(!view.has_next_level);
        assert!(view.has_prev_level);
        assert_eq!(view.levels_until_break, Some(2));
    }

    #[test]
    fn view_without_breaks() {
        let clock = ClockState {
            break_config: BreakConfig::disabled(),
            ..ClockState::new(structure())
        };
        assert_eq!(ClockView::of(&clock).levels_until_break, None);
    }

    #[test]
    fn toggle_alternates_between_running_and_paused() {
        let clock = facade();
        assert!(clock.toggle().state.status == RunStatus::Running);
        assert!(clock.view().is_running);
        assert!(clock.toggle().state.status == RunStatus::Paused);
        assert!(clock.view().is_paused);
    }

    #[test]
    fn navigation_commands_respect_running_clock() {
        let clock = facade();
        assert_eq!(clock.next_level().state.current_level, 1);
        assert_eq!(clock.prev_level().state.current_level, 0);

        clock.start();
        assert!(!clock.next_level().changed);
        assert_eq!(clock.clock().current_level, 0);
    }

    #[test]
    fn break_commands() {
        let clock = facade();
        assert!(!clock.skip_break().changed);

        clock.state.dispatch(Action::StartBreak);
        let resumed = clock.start_break_timer();
        assert!(resumed.state.is_on_break);
        assert_eq!(resumed.state.status, RunStatus::Running);

        let skipped = clock.skip_break();
        assert!(!skipped.state.is_on_break);
        assert_eq!(skipped.state.remaining_time, 900);
    }

    #[test]
    fn reset_restores_level_duration() {
        let clock = facade();
        clock.start();
        clock.state.dispatch_tick(clock.state.run_epoch());
        clock.pause();
        let reset = clock.reset();
        assert!(reset.changed);
        assert_eq!(reset.state.remaining_time, 900);
        assert_eq!(reset.state.status, RunStatus::Idle);
    }
}
