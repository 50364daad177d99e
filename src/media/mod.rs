//! Media metadata snapshots consumed by the controllers
//!
//! These are transient, read-only snapshots supplied by the caller; the
//! controllers copy what they need into action payloads and never own
//! the metadata source.

pub mod resolver;

// Re-export main functions
pub use resolver::{next_episode, pick_random};

use serde::{Deserialize, Serialize};

/// Immutable snapshot of one episode
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EpisodeMeta {
    pub series_id: String,
    pub number: u32,
    #[serde(default)]
    pub title: Option<String>,
}

/// The playback session the front end is currently rendering: the series
/// episode list plus the episode being played
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaybackSession {
    pub series_id: String,
    pub episodes: Vec<EpisodeMeta>,
    pub current: EpisodeMeta,
}

/// A browsable catalog entry, used by the random-pick navigation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogItem {
    pub id: String,
    pub title: String,
}
