//! Encore - A state-managed HTTP service for countdown-gated playback continuation
//!
//! This is the main entry point for the encore service.

use std::{sync::Arc, time::Duration};

use chrono::Utc;
use tokio::net::TcpListener;
use tokio::sync::{mpsc, watch};
use tracing::{info, warn};

use encore::{
    api::create_router,
    config::Config,
    media::{CatalogItem, EpisodeMeta},
    state::{
        AppState, ArmCondition, ContinuationAction, ContinuationController, ControllerView,
    },
    tasks::{continuation_task, FireHook},
    utils::shutdown_signal,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::parse();

    // Initialize tracing with appropriate log level
    tracing_subscriber::fmt()
        .with_env_filter(format!("encore={},tower_http=info", config.log_level()))
        .init();

    info!("Starting encore server v{}", env!("CARGO_PKG_VERSION"));
    info!(
        "Configuration: host={}, port={}, countdown={}s, arm_window={}s, display_window={}s",
        config.host, config.port, config.countdown, config.arm_window, config.display_window
    );

    let tunables = config.tunables();

    let (episode_events_tx, episode_events_rx) = mpsc::channel(64);
    let (episode_view_tx, episode_view_rx) = watch::channel(ControllerView::idle());
    let (random_events_tx, random_events_rx) = mpsc::channel(64);
    let (random_view_tx, random_view_rx) = watch::channel(ControllerView::idle());

    // Create application state; it keeps the view receivers alive so the
    // watch channels never close
    let state = Arc::new(AppState::new(
        config.port,
        config.host.clone(),
        episode_events_tx,
        episode_view_rx,
        random_events_tx,
        random_view_rx,
    ));

    // Next-episode controller: arms when playback approaches the end
    let episode_controller =
        ContinuationController::<EpisodeMeta>::new(ArmCondition::OnApproach, tunables);
    let hook_state = Arc::clone(&state);
    let on_next: FireHook<EpisodeMeta> = Box::new(move |episode| {
        info!(
            series = %episode.series_id,
            number = episode.number,
            "Continuing to next episode"
        );
        let action = ContinuationAction::NextEpisode {
            episode,
            at: Utc::now(),
        };
        if let Err(e) = hook_state.record_action(action) {
            warn!("Failed to record continuation action: {}", e);
        }
    });
    tokio::spawn(continuation_task(
        "next-episode",
        episode_controller,
        episode_events_rx,
        episode_view_tx,
        on_next,
        Duration::from_secs(1),
    ));

    // Random-pick controller: arms directly on user request
    let random_controller =
        ContinuationController::<CatalogItem>::new(ArmCondition::OnRequest, tunables);
    let hook_state = Arc::clone(&state);
    let on_navigate: FireHook<CatalogItem> = Box::new(move |item| {
        info!(item = %item.id, "Navigating to random pick");
        let action = ContinuationAction::Navigate {
            item,
            at: Utc::now(),
        };
        if let Err(e) = hook_state.record_action(action) {
            warn!("Failed to record continuation action: {}", e);
        }
    });
    tokio::spawn(continuation_task(
        "random-pick",
        random_controller,
        random_events_rx,
        random_view_tx,
        on_navigate,
        Duration::from_secs(1),
    ));

    // Create HTTP router with all endpoints
    let app = create_router(Arc::clone(&state));

    // Bind to the specified address
    let addr = config.address();
    let listener = TcpListener::bind(&addr).await?;

    info!("Server running on http://{}", addr);
    info!("Endpoints:");
    info!("  POST /session       - Load a playback session snapshot");
    info!("  POST /progress      - Feed a playback progress sample");
    info!("  POST /toggle        - Cancel/resume the next-episode countdown");
    info!("  POST /dismiss       - Dismiss the next-episode affordance");
    info!("  POST /autoplay      - Set the autoplay preference");
    info!("  POST /random        - Arm random-pick navigation");
    info!("  POST /random/toggle - Cancel/resume the random countdown");
    info!("  GET  /status        - Controller views and last action");
    info!("  GET  /health        - Health check");

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
