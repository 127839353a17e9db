//! Tick driver background task

use std::{sync::Arc, time::Duration};
use tokio::{
    task::JoinHandle,
    time::{interval_at, Instant, MissedTickBehavior},
};
use tracing::{debug, info};

use crate::state::{AppState, RunStatus};

/// Wall-clock length of one tick
pub const TICK_PERIOD: Duration = Duration::from_secs(1);

/// Handle to the task feeding `Tick` actions to a running clock
///
/// Dropping the handle stops the task.
#[derive(Debug)]
pub struct TickDriver {
    handle: JoinHandle<()>,
}

impl TickDriver {
    /// Spawn a driver ticking once per second
    pub fn spawn(state: Arc<AppState>) -> Self {
        Self::with_period(state, TICK_PERIOD)
    }

    /// Spawn a driver with a custom tick period
    pub fn with_period(state: Arc<AppState>, period: Duration) -> Self {
        Self {
            handle: tokio::spawn(tick_driver_task(state, period)),
        }
    }

    /// Stop ticking; no tick is delivered after this returns
    pub fn stop(&self) {
        if !self.handle.is_finished() {
            info!("Stopping tick driver");
        }
        self.handle.abort();
    }

    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }
}

impl Drop for TickDriver {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

/// Background task that ticks the clock while it is running
///
/// The task keeps only a weak handle on the store and exits once the
/// store is dropped.
pub async fn tick_driver_task(state: Arc<AppState>, period: Duration) {
    info!("Starting tick driver task");

    let mut clock_rx = state.subscribe();
    let store = Arc::downgrade(&state);
    drop(state);

    'session: loop {
        // The epoch is read under the snapshot lock so it belongs to this run
        let epoch = {
            let clock = clock_rx.borrow_and_update();
            if clock.status == RunStatus::Running {
                match store.upgrade() {
                    Some(state) => Some(state.run_epoch()),
                    None => break 'session,
                }
            } else {
                None
            }
        };

        let Some(epoch) = epoch else {
            if clock_rx.changed().await.is_err() {
                break;
            }
            continue;
        };

        debug!("Clock running, ticking every {:?} (run epoch {})", period, epoch);

        let mut interval = interval_at(Instant::now() + period, period);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                biased;

                // Status change - stop ticking once the run is over
                changed = clock_rx.changed() => {
                    if changed.is_err() {
                        break 'session;
                    }
                    let Some(state) = store.upgrade() else {
                        break 'session;
                    };
                    if state.run_epoch() != epoch {
                        debug!("Clock left running state, cancelling ticks");
                        break;
                    }
                }

                _ = interval.tick() => {
                    let Some(state) = store.upgrade() else {
                        break 'session;
                    };
                    let outcome = state.dispatch_tick(epoch);
                    if outcome.state.status != RunStatus::Running {
                        info!("Clock stopped at level {}", outcome.state.current_level + 1);
                    }
                }
            }
        }
    }

    info!("Clock store closed, tick driver exiting");
}
