//! Clock event logging task

use std::sync::Arc;
use tokio::sync::broadcast::error::RecvError;
use tracing::{info, warn};

use crate::{clock::ClockEvent, state::AppState};

/// Background task that logs every notable clock transition
pub async fn event_log_task(state: Arc<AppState>) {
    info!("Starting clock event log task");

    let mut events = state.subscribe_events();
    drop(state);

    loop {
        match events.recv().await {
            Ok(event) => log_event(&event),
            Err(RecvError::Lagged(skipped)) => {
                warn!("Event log fell behind, skipped {} clock events", skipped);
            }
            Err(RecvError::Closed) => break,
        }
    }
}

fn log_event(event: &ClockEvent) {
    match event {
        ClockEvent::Started => info!("Clock started"),
        ClockEvent::Paused => info!("Clock paused"),
        ClockEvent::LevelStarted { level, blind: Some(blind) } => info!(
            "Level {} started: blinds {}/{} ante {}",
            level + 1,
            blind.small_blind,
            blind.big_blind,
            blind.ante
        ),
        ClockEvent::LevelStarted { level, blind: None } => info!("Level {} started", level + 1),
        ClockEvent::BreakStarted { duration } => info!("Break started for {}s", duration),
        ClockEvent::BreakEnded => info!("Break over"),
        ClockEvent::Finished => info!("Final level finished, clock stopped"),
        ClockEvent::StructureLoaded { levels } => {
            info!("Loaded tournament structure with {} levels", levels)
        }
    }
}
