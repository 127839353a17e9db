//! Blind Clock - A state-managed HTTP server running a poker tournament clock
//!
//! This is the main entry point for the blind-clock application.

use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::info;

use blind_clock::{
    config::Config,
    state::AppState,
    api::create_router,
    tasks::{event_log_task, TickDriver},
    utils::shutdown_signal,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::parse();

    // Initialize tracing with appropriate log level
    tracing_subscriber::fmt()
        .with_env_filter(format!("blind_clock={},tower_http=info", config.log_level()))
        .init();

    info!("Starting blind-clock server v{}", env!("CARGO_PKG_VERSION"));

    let structure = config.structure();
    structure.validate()?;
    info!(
        "Configuration: host={}, port={}, levels={}, level={}s, breaks={}",
        config.host,
        config.port,
        structure.blind_levels.len(),
        structure.level_duration,
        if structure.break_config.enabled {
            format!(
                "every {} levels for {}s",
                structure.break_config.frequency, structure.break_config.duration
            )
        } else {
            "off".to_string()
        }
    );

    // Create application state
    let state = Arc::new(AppState::new(config.port, config.host.clone(), structure));

    // Log clock transitions
    tokio::spawn(event_log_task(Arc::clone(&state)));

    // Start the tick driver; it idles until the clock runs
    let tick_driver = TickDriver::spawn(Arc::clone(&state));

    // Create HTTP router with all endpoints
    let app = create_router(state);

    // Bind to the specified address
    let addr = config.address();
    let listener = TcpListener::bind(&addr).await?;

    info!("Server running on http://{}", addr);
    info!("Endpoints:");
    info!("  POST /start, /pause, /toggle, /reset - Clock control");
    info!("  POST /next, /prev                    - Level navigation");
    info!("  POST /break/start|end|skip|resume    - Break control");
    info!("  PUT  /structure, /levels, /break-config, /level-duration");
    info!("  GET  /status, /structure, /health");

    // Setup graceful shutdown
    let server = axum::serve(listener, app);

    tokio::select! {
        result = server => {
            if let Err(e) = result {
                tracing::error!("Server error: {}", e);
            }
        }
        _ = shutdown_signal() => {
            info!("Shutdown signal received");
        }
    }

    tick_driver.stop();
    info!("Server shutdown complete");
    Ok(())
}
