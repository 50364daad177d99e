//! Continuation target resolution

use rand::seq::SliceRandom;

use super::{CatalogItem, EpisodeMeta, PlaybackSession};

/// Resolve the episode that follows the one currently playing.
///
/// The episode list may arrive in any order; the successor is the entry
/// numbered exactly `current + 1`. An empty result is a normal outcome
/// (last episode, specials, movies), never an error.
pub fn next_episode(session: &PlaybackSession) -> Option<EpisodeMeta> {
    let wanted = session.current.number.checked_add(1)?;
    session
        .episodes
        .iter()
        .find(|episode| episode.number == wanted)
        .cloned()
}

/// Pick a uniformly random catalog entry, or nothing from an empty list
pub fn pick_random(items: &[CatalogItem]) -> Option<CatalogItem> {
    items.choose(&mut rand::thread_rng()).cloned()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn episode(number: u32) -> EpisodeMeta {
        EpisodeMeta {
            series_id: "series-1".to_string(),
            number,
            title: None,
        }
    }

    fn session(current: u32, numbers: &[u32]) -> PlaybackSession {
        PlaybackSession {
            series_id: "series-1".to_string(),
            episodes: numbers.iter().copied().map(episode).collect(),
            current: episode(current),
        }
    }

    #[test]
    fn finds_the_successor_episode() {
        let next = next_episode(&session(2, &[1, 2, 3, 4]));
        assert_eq!(next.map(|e| e.number), Some(3));
    }

    #[test]
    fn none_past_the_final_episode() {
        assert_eq!(next_episode(&session(4, &[1, 2, 3, 4])), None);
    }

    #[test]
    fn episode_order_does_not_matter() {
        let next = next_episode(&session(2, &[4, 1, 3, 2]));
        assert_eq!(next.map(|e| e.number), Some(3));
    }

    #[test]
    fn gaps_in_numbering_yield_none() {
        assert_eq!(next_episode(&session(2, &[1, 2, 4])), None);
    }

    #[test]
    fn resolves_from_a_deserialized_session() {
        let session: PlaybackSession = serde_json::from_str(
            r#"{
                "series_id": "series-9",
                "episodes": [
                    {"series_id": "series-9", "number": 1, "title": "Pilot"},
                    {"series_id": "series-9", "number": 2}
                ],
                "current": {"series_id": "series-9", "number": 1, "title": "Pilot"}
            }"#,
        )
        .expect("session should deserialize");
        let next = next_episode(&session).expect("episode 2 exists");
        assert_eq!(next.number, 2);
        assert_eq!(next.title, None);
    }

    #[test]
    fn random_pick_of_empty_catalog_is_none() {
        assert_eq!(pick_random(&[]), None);
    }

    #[test]
    fn random_pick_comes_from_the_catalog() {
        let items: Vec<CatalogItem> = (0..5)
            .map(|i| CatalogItem {
                id: format!("item-{i}"),
                title: format!("Item {i}"),
            })
            .collect();
        let picked = pick_random(&items).expect("catalog is non-empty");
        assert!(items.contains(&picked));
    }
}
