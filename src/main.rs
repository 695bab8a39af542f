//! Round Bell - An interval training timer service
//!
//! This is the main entry point for the round-bell application.

use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::EnvFilter;

use round_bell::{
    api::create_router,
    config::Config,
    services::{CommandPlayer, WakeLock},
    state::{AppState, TimerEngine},
    tasks::{cue_dispatch_task, keep_awake_task, presenter_task, ticker_task},
    utils::shutdown_signal,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::parse();

    // RUST_LOG wins over the verbose flag
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!("round_bell={},tower_http=info", config.log_level()))
    });
    tracing_subscriber::fmt().with_env_filter(filter).init();

    info!("Starting round-bell server v{}", env!("CARGO_PKG_VERSION"));

    let session = config.session()?;
    info!(
        "Session: {} rounds x {}s, {}s rest, cues={}, audio={}",
        session.total_rounds,
        session.round_duration,
        session.rest_duration,
        session.cue_strategy.name(),
        session.audio_enabled
    );

    // Create application state
    let engine = TimerEngine::new(session)?;
    let state = Arc::new(AppState::new(config.port, config.host.clone(), engine));

    // Start the background tasks
    tokio::spawn(ticker_task(Arc::clone(&state)));
    tokio::spawn(presenter_task(Arc::clone(&state)));

    let player = CommandPlayer::new(&config.tone_command, &config.clip_command)
        .probe()
        .await;
    tokio::spawn(cue_dispatch_task(Arc::clone(&state), player));

    if config.keep_awake {
        let lock = WakeLock::new(&config.inhibit_command);
        tokio::spawn(keep_awake_task(Arc::clone(&state), lock));
    }

    // Create HTTP router with all endpoints
    let app = create_router(Arc::clone(&state));

    // Bind to the specified address
    let addr = config.address();
    let listener = TcpListener::bind(&addr).await?;

    info!("Server running on http://{}", addr);
    info!("Endpoints:");
    info!("  POST /start  - Start or resume the session");
    info!("  POST /pause  - Pause the session");
    info!("  POST /reset  - Return to idle");
    info!("  GET  /config - Current session configuration");
    info!("  PUT  /config - Replace the session configuration (idle only)");
    info!("  POST /cues/:cue/test - Play one cue's sound");
    info!("  GET  /status - Timer state and countdown");
    info!("  GET  /health - Health check");

    if config.autostart {
        state.start()?;
    }

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

    info!("Server shutdown complete");
    Ok(())
}
