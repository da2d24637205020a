use crate::models::{Event, EventsResponse};
use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::Path;

/// Saved provider payloads come either as the full response or as a bare
/// list of events
#[derive(Deserialize)]
#[serde(untagged)]
enum SavedEvents {
    Response(EventsResponse),
    List(Vec<Event>),
}

/// Save events to a JSON cache file, creating parent directories
pub fn save_events_to_cache(events: &[Event], cache_file: impl AsRef<Path>) -> Result<()> {
    let cache_file = cache_file.as_ref();
    if let Some(parent) = cache_file.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).context("Failed to create cache directory")?;
    }

    let response = EventsResponse {
        events: events.to_vec(),
    };
    let json = serde_json::to_string_pretty(&response).context("Failed to serialize events")?;
    std::fs::write(cache_file, json).context("Failed to write cache file")?;
    Ok(())
}

/// Load events from a JSON file holding a provider response
pub fn load_events_from_file(path: impl AsRef<Path>) -> Result<Vec<Event>> {
    let path = path.as_ref();
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read events file {}", path.display()))?;
    parse_events(&json)
}

/// Parse a provider response body or a bare event list
pub fn parse_events(json: &str) -> Result<Vec<Event>> {
    let saved: SavedEvents = serde_json::from_str(json).context("Failed to deserialize events")?;
    Ok(match saved {
        SavedEvents::Response(response) => response.events,
        SavedEvents::List(events) => events,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::fixtures;

    #[test]
    fn test_parse_events_response_and_list() {
        let events = parse_events(fixtures::NBA_EVENTS).unwrap();
        assert_eq!(events.len(), 4);

        let list = parse_events(r#"[{"event_id": "a"}, {"event_id": "b"}]"#).unwrap();
        assert_eq!(list.len(), 2);
        assert_eq!(list[1].event_id, "b");
    }

    #[test]
    fn test_parse_events_rejects_garbage() {
        assert!(parse_events("not json").is_err());
    }

    #[test]
    fn test_cache_round_trip() {
        let dir = std::env::temp_dir().join(format!("rundown_adapter_{}", std::process::id()));
        let cache_file = dir.join("events_cache.json");

        let events = fixtures::mma_events();
        save_events_to_cache(&events, &cache_file).unwrap();
        let loaded = load_events_from_file(&cache_file).unwrap();

        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded[0].event_id, events[0].event_id);
        std::fs::remove_dir_all(dir).ok();
    }
}
