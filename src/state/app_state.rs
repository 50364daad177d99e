//! Main application state management

use std::{
    sync::{
        atomic::{AtomicBool, Ordering},
        Mutex,
    },
    time::Instant,
};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::{mpsc, watch};

use crate::media::{self, CatalogItem, EpisodeMeta, PlaybackSession};
use crate::state::controller::ControllerView;
use crate::tasks::ControllerEvent;

/// A continuation action the service has dispatched; the front end is
/// responsible for actually switching playback or navigating.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ContinuationAction {
    NextEpisode {
        episode: EpisodeMeta,
        at: DateTime<Utc>,
    },
    Navigate {
        item: CatalogItem,
        at: DateTime<Utc>,
    },
}

/// Shared application state behind the HTTP API.
///
/// The controllers themselves live in their background tasks; this holds
/// the mailbox senders, the view receivers (which also keep the watch
/// channels open), and the caller-facing session and preference state.
#[derive(Debug)]
pub struct AppState {
    /// Playback session snapshot, loaded by the front end
    session: Mutex<Option<PlaybackSession>>,
    /// User preference: whether the next-episode countdown may arm
    autoplay_enabled: AtomicBool,
    /// Last continuation action dispatched
    last_action: Mutex<Option<ContinuationAction>>,
    /// Mailboxes of the two controller tasks
    pub episode_events: mpsc::Sender<ControllerEvent<EpisodeMeta>>,
    pub random_events: mpsc::Sender<ControllerEvent<CatalogItem>>,
    /// Controller view channels, polled by the status endpoint
    episode_view: watch::Receiver<ControllerView>,
    random_view: watch::Receiver<ControllerView>,
    /// Server metadata
    pub start_time: Instant,
    pub port: u16,
    pub host: String,
}

impl AppState {
    pub fn new(
        port: u16,
        host: String,
        episode_events: mpsc::Sender<ControllerEvent<EpisodeMeta>>,
        episode_view: watch::Receiver<ControllerView>,
        random_events: mpsc::Sender<ControllerEvent<CatalogItem>>,
        random_view: watch::Receiver<ControllerView>,
    ) -> Self {
        Self {
            session: Mutex::new(None),
            autoplay_enabled: AtomicBool::new(true),
            last_action: Mutex::new(None),
            episode_events,
            random_events,
            episode_view,
            random_view,
            start_time: Instant::now(),
            port,
            host,
        }
    }

    /// Replace the playback session snapshot
    pub fn load_session(&self, session: PlaybackSession) -> Result<(), String> {
        let mut guard = self
            .session
            .lock()
            .map_err(|e| format!("Failed to lock session: {}", e))?;
        *guard = Some(session);
        Ok(())
    }

    /// Current session snapshot, if one has been loaded
    pub fn session(&self) -> Result<Option<PlaybackSession>, String> {
        self.session
            .lock()
            .map(|guard| guard.clone())
            .map_err(|e| format!("Failed to lock session: {}", e))
    }

    /// Resolve the next episode for the loaded session, if any
    pub fn next_episode(&self) -> Result<Option<EpisodeMeta>, String> {
        Ok(self.session()?.as_ref().and_then(media::next_episode))
    }

    pub fn autoplay_enabled(&self) -> bool {
        self.autoplay_enabled.load(Ordering::Relaxed)
    }

    pub fn set_autoplay(&self, enabled: bool) {
        self.autoplay_enabled.store(enabled, Ordering::Relaxed);
    }

    /// Record a dispatched continuation action
    pub fn record_action(&self, action: ContinuationAction) -> Result<(), String> {
        let mut guard = self
            .last_action
            .lock()
            .map_err(|e| format!("Failed to lock last action: {}", e))?;
        *guard = Some(action);
        Ok(())
    }

    pub fn last_action(&self) -> Option<ContinuationAction> {
        self.last_action.lock().ok().and_then(|guard| guard.clone())
    }

    /// Latest next-episode controller view
    pub fn episode_view(&self) -> ControllerView {
        *self.episode_view.borrow()
    }

    /// Latest random-pick controller view
    pub fn random_view(&self) -> ControllerView {
        *self.random_view.borrow()
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
