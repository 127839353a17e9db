//! Notable clock transitions, for sound and notification listeners

use serde::Serialize;

use super::Action;
use crate::state::{BlindLevel, ClockState, RunStatus};

/// Something a listener may want to announce
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "event", rename_all = "camelCase")]
pub enum ClockEvent {
    /// The countdown started or resumed
    Started,
    /// The countdown was paused
    Paused,
    /// A new level is on the clock
    LevelStarted { level: usize, blind: Option<BlindLevel> },
    /// A break began; `duration` is in seconds
    BreakStarted { duration: u32 },
    BreakEnded,
    /// The last level ran out
    Finished,
    /// A new structure replaced the old one
    StructureLoaded { levels: usize },
}

impl ClockEvent {
    /// Events produced by `action` moving the clock from `previous` to `next`
    pub fn between(action: &Action, previous: &ClockState, next: &ClockState) -> Vec<ClockEvent> {
        if let Action::LoadStructure(structure) = action {
            return vec![ClockEvent::StructureLoaded {
                levels: structure.blind_levels.len(),
            }];
        }

        let mut events = Vec::new();

        match (previous.is_on_break, next.is_on_break) {
            (false, true) => events.push(ClockEvent::BreakStarted {
                duration: next.remaining_time,
            }),
            (true, false) => events.push(ClockEvent::BreakEnded),
            _ => {}
        }

        let level_changed = previous.current_level != next.current_level;
        let break_ended = previous.is_on_break && !next.is_on_break;
        if !next.is_on_break && (level_changed || break_ended) {
            events.push(ClockEvent::LevelStarted {
                level: next.current_level,
                blind: next.blind_levels.get(next.current_level).copied(),
            });
        }

        match (previous.status, next.status) {
            (RunStatus::Running, RunStatus::Idle) if *action == Action::Tick => {
                events.push(ClockEvent::Finished)
            }
            (RunStatus::Running, RunStatus::Paused) => events.push(ClockEvent::Paused),
            (RunStatus::Idle | RunStatus::Paused, RunStatus::Running) => {
                events.push(ClockEvent::Started)
            }
            _ => {}
        }

        events
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{BreakConfig, TournamentStructure};

    fn clock() -> ClockState {
        ClockState::new(TournamentStructure {
            blind_levels: vec![
                BlindLevel::new(25, 50),
                BlindLevel::new(50, 100),
                BlindLevel::new(100, 200),
            ],
            break_config: BreakConfig::new(2, 300),
            level_duration: 600,
        })
    }

    #[test]
    fn level_advance_announces_new_blinds() {
        let previous = clock();
        let next = ClockState {
            current_level: 1,
            ..previous.clone()
        };
        assert_eq!(
            ClockEvent::between(&Action::NextLevel, &previous, &next),
            vec![ClockEvent::LevelStarted {
                level: 1,
                blind: Some(BlindLevel::new(50, 100)),
            }]
        );
    }

    #[test]
    fn break_start_hides_level_change() {
        let previous = ClockState {
            current_level: 1,
            ..clock()
        };
        let next = ClockState {
            current_level: 2,
            is_on_break: true,
            remaining_time: 300,
            ..previous.clone()
        };
        assert_eq!(
            ClockEvent::between(&Action::NextLevel, &previous, &next),
            vec![ClockEvent::BreakStarted { duration: 300 }]
        );
    }

    #[test]
    fn break_end_announces_level() {
        let previous = ClockState {
            current_level: 2,
            is_on_break: true,
            status: RunStatus::Running,
            remaining_time: 0,
            ..clock()
        };
        let next = ClockState {
            is_on_break: false,
            remaining_time: 600,
            ..previous.clone()
        };
        assert_eq!(
            ClockEvent::between(&Action::Tick, &previous, &next),
            vec![
                ClockEvent::BreakEnded,
                ClockEvent::LevelStarted {
                    level: 2,
                    blind: Some(BlindLevel::new(100, 200)),
                },
            ]
        );
    }

    #[test]
    fn running_out_of_levels_finishes() {
        let previous = ClockState {
            current_level: 2,
            status: RunStatus::Running,
            remaining_time: 0,
            ..clock()
        };
        let next = ClockState {
            status: RunStatus::Idle,
            ..previous.clone()
        };
        assert_eq!(
            ClockEvent::between(&Action::Tick, &previous, &next),
            vec![ClockEvent::Finished]
        );
        assert!(ClockEvent::between(&Action::Reset, &previous, &next).is_empty());
    }

    #[test]
    fn plain_tick_is_silent() {
        let previous = ClockState {
            status: RunStatus::Running,
            ..clock()
        };
        let next = ClockState {
            remaining_time: 599,
            elapsed_time: 1,
            ..previous.clone()
        };
        assert!(ClockEvent::between(&Action::Tick, &previous, &next).is_empty());
    }
}
