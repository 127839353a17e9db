//! Clock session store
//!
//! `AppState` is the single writer of the clock. Every change goes through
//! `dispatch`, which runs the reducer under the watch channel's write lock;
//! everyone else reads immutable `Arc<ClockState>` snapshots.

use std::{
    sync::{
        atomic::{AtomicU64, Ordering},
        Arc, Mutex,
    },
    time::Instant,
};
use chrono::{DateTime, Utc};
use tokio::sync::{broadcast, watch};
use tracing::{debug, trace};

use super::{ClockState, RunStatus, TournamentStructure};
use crate::clock::{reduce, Action, ClockEvent};

/// Result of dispatching one action
#[derive(Debug, Clone)]
pub struct Dispatch {
    /// Clock state after the action was applied
    pub state: Arc<ClockState>,
    /// False when the action was a no-op
    pub changed: bool,
}

/// Owns the clock of one tournament session
#[derive(Debug)]
pub struct AppState {
    /// Current clock snapshot, published to all subscribers
    clock_tx: watch::Sender<Arc<ClockState>>,
    /// Keep the receiver alive to prevent channel closure
    _clock_rx: watch::Receiver<Arc<ClockState>>,
    /// Bumped whenever the status enters or leaves `Running`
    run_epoch: AtomicU64,
    /// Channel for notable clock transitions
    event_tx: broadcast::Sender<ClockEvent>,
    /// Server metadata
    pub start_time: Instant,
    pub port: u16,
    pub host: String,
    /// Last action tracking
    last_action: Mutex<Option<String>>,
    last_action_time: Mutex<Option<DateTime<Utc>>>,
}

impl AppState {
    /// Create a session with an idle clock at the first level of `structure`
    pub fn new(port: u16, host: String, structure: TournamentStructure) -> Self {
        let (clock_tx, clock_rx) = watch::channel(Arc::new(ClockState::new(structure)));
        let (event_tx, _) = broadcast::channel(100);

        Self {
            clock_tx,
            _clock_rx: clock_rx,
            run_epoch: AtomicU64::new(0),
            event_tx,
            start_time: Instant::now(),
            port,
            host,
            last_action: Mutex::new(None),
            last_action_time: Mutex::new(None),
        }
    }

    /// Apply an action to the clock
    pub fn dispatch(&self, action: Action) -> Dispatch {
        self.apply(|_| action, None)
    }

    /// Apply an action chosen from the current state, atomically
    pub fn dispatch_with<F>(&self, choose: F) -> Dispatch
    where
        F: FnOnce(&ClockState) -> Action,
    {
        self.apply(choose, None)
    }

    /// Apply a `Tick` issued during run `epoch`
    ///
    /// The tick is dropped if the clock has left or re-entered `Running`
    /// since the epoch was observed.
    pub fn dispatch_tick(&self, epoch: u64) -> Dispatch {
        self.apply(|_| Action::Tick, Some(epoch))
    }

    fn apply<F>(&self, choose: F, tick_epoch: Option<u64>) -> Dispatch
    where
        F: FnOnce(&ClockState) -> Action,
    {
        let mut outcome = None;

        let changed = self.clock_tx.send_if_modified(|current| {
            if let Some(epoch) = tick_epoch {
                if epoch != self.run_epoch.load(Ordering::SeqCst) {
                    trace!("Dropping stale tick from run epoch {}", epoch);
                    outcome = Some((Arc::clone(current), None));
                    return false;
                }
            }

            let action = choose(&**current);
            let next = reduce(current, action.clone());
            if Arc::ptr_eq(&next, current) {
                outcome = Some((Arc::clone(current), None));
                return false;
            }

            let was_running = current.status == RunStatus::Running;
            let is_running = next.status == RunStatus::Running;
            if was_running != is_running {
                self.run_epoch.fetch_add(1, Ordering::SeqCst);
            }

            let previous = std::mem::replace(current, Arc::clone(&next));
            outcome = Some((next, Some((action, previous))));
            true
        });

        let (state, applied) = match outcome {
            Some(outcome) => outcome,
            None => (self.snapshot(), None),
        };

        if let Some((action, previous)) = applied {
            if action != Action::Tick {
                debug!(
                    "Applied {}: status={} level={} remaining={}s break={}",
                    action.name(),
                    state.status.as_str(),
                    state.current_level,
                    state.remaining_time,
                    state.is_on_break
                );
                self.record_action(action.name());
            }
            for event in ClockEvent::between(&action, &previous, &state) {
                if self.event_tx.send(event).is_err() {
                    trace!("No clock event subscribers");
                }
            }
        }

        Dispatch { state, changed }
    }

    fn record_action(&self, action: &str) {
        if let Ok(mut last_action) = self.last_action.lock() {
            *last_action = Some(action.to_string());
        }
        if let Ok(mut last_time) = self.last_action_time.lock() {
            *last_time = Some(Utc::now());
        }
    }

    /// Get the current clock snapshot
    pub fn snapshot(&self) -> Arc<ClockState> {
        Arc::clone(&self.clock_tx.borrow())
    }

    /// Watch clock snapshots as they are published
    pub fn subscribe(&self) -> watch::Receiver<Arc<ClockState>> {
        self.clock_tx.subscribe()
    }

    /// Subscribe to notable clock transitions
    pub fn subscribe_events(&self) -> broadcast::Receiver<ClockEvent> {
        self.event_tx.subscribe()
    }

    /// Current run epoch
    pub fn run_epoch(&self) -> u64 {
        self.run_epoch.load(Ordering::SeqCst)
    }

    /// Get last action information
    pub fn get_last_action(&self) -> (Option<String>, Option<DateTime<Utc>>) {
        let last_action = self.last_action.lock().ok().and_then(|a| a.clone());
        let last_action_time = self.last_action_time.lock().ok().and_then(|t| *t);
        (last_action, last_action_time)
    }

    /// Calculate server uptime as a formatted string
    pub fn get_uptime(&self) -> String {
        let duration = self.start_time.elapsed();
        let hours = duration.as_secs() / 3600;
        let minutes = (duration.as_secs() % 3600) / 60;
        let seconds = duration.as_secs() % 60;

        if hours > 0 {
            format!("{}h {}m {}s", hours, minutes, seconds)
        } else if minutes > 0 {
            format!("{}m {}s", minutes, seconds)
        } else {
            format!("{}s", seconds)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{BlindLevel, BreakConfig};

    fn session() -> AppState {
        AppState::new(
            0,
            "127.0.0.1".to_string(),
            TournamentStructure {
                blind_levels: vec![BlindLevel::new(25, 50), BlindLevel::new(50, 100)],
                break_config: BreakConfig::disabled(),
                level_duration: 60,
            },
        )
    }

    #[test]
    fn noop_dispatch_keeps_snapshot_identity() {
        let state = session();
        let before = state.snapshot();
        let outcome = state.dispatch(Action::Pause);
        assert!(!outcome.changed);
        assert!(Arc::ptr_eq(&before, &outcome.state));
        assert!(Arc::ptr_eq(&before, &state.snapshot()));
    }

    #[test]
    fn dispatch_publishes_new_snapshot_and_records_action() {
        let state = session();
        let mut rx = state.subscribe();
        let outcome = state.dispatch(Action::Start);
        assert!(outcome.changed);
        assert_eq!(state.snapshot().status, RunStatus::Running);
        assert!(rx.has_changed().unwrap());
        assert_eq!(rx.borrow_and_update().status, RunStatus::Running);
        assert_eq!(state.get_last_action().0.as_deref(), Some("start"));
    }

    #[test]
    fn run_epoch_moves_on_running_boundaries_only() {
        let state = session();
        assert_eq!(state.run_epoch(), 0);
        state.dispatch(Action::Start);
        assert_eq!(state.run_epoch(), 1);
        state.dispatch(Action::UpdateLevelDuration(90));
        assert_eq!(state.run_epoch(), 1);
        state.dispatch(Action::Pause);
        assert_eq!(state.run_epoch(), 2);
    }

    #[test]
    fn stale_ticks_are_dropped() {
        let state = session();
        state.dispatch(Action::Start);
        let epoch = state.run_epoch();
        assert!(state.dispatch_tick(epoch).changed);

        state.dispatch(Action::Pause);
        state.dispatch(Action::Start);
        let stale = state.dispatch_tick(epoch);
        assert!(!stale.changed);
        assert_eq!(stale.state.remaining_time, 59);

        assert!(state.dispatch_tick(state.run_epoch()).changed);
        assert_eq!(state.snapshot().remaining_time, 58);
    }

    #[test]
    fn ticks_do_not_overwrite_last_action() {
        let state = session();
        state.dispatch(Action::Start);
        state.dispatch_tick(state.run_epoch());
        assert_eq!(state.get_last_action().0.as_deref(), Some("start"));
    }

    #[test]
    fn dispatch_with_sees_current_state() {
        let state = session();
        let toggle = |clock: &ClockState| {
            if clock.status == RunStatus::Running {
                Action::Pause
            } else {
                Action::Start
            }
        };
        assert_eq!(state.dispatch_with(toggle).state.status, RunStatus::Running);
        assert_eq!(state.dispatch_with(toggle).state.status, RunStatus::Paused);
    }

    #[tokio::test]
    async fn transitions_are_broadcast_as_events() {
        let state = session();
        let mut events = state.subscribe_events();
        state.dispatch(Action::Start);
        assert_eq!(events.recv().await.unwrap(), ClockEvent::Started);
    }
}
