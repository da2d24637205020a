//! Provider payloads shared by the unit tests.

use crate::models::{Event, EventsResponse};

pub const NBA_EVENTS: &str = include_str!("../../tests/fixtures/events_nba.json");
pub const MMA_EVENTS: &str = include_str!("../../tests/fixtures/events_mma.json");
pub const MLS_EVENTS: &str = include_str!("../../tests/fixtures/events_mls.json");
pub const MALFORMED_EVENTS: &str = include_str!("../../tests/fixtures/events_malformed.json");

fn parse(json: &str) -> Vec<Event> {
    serde_json::from_str::<EventsResponse>(json)
        .expect("fixture should parse")
        .events
}

pub fn nba_events() -> Vec<Event> {
    parse(NBA_EVENTS)
}

pub fn mma_events() -> Vec<Event> {
    parse(MMA_EVENTS)
}

pub fn mls_events() -> Vec<Event> {
    parse(MLS_EVENTS)
}

pub fn malformed_events() -> Vec<Event> {
    parse(MALFORMED_EVENTS)
}
