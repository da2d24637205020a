pub mod therundown_api;

use crate::error::Result;
use crate::models::{Event, SportId};
use async_trait::async_trait;
use chrono::NaiveDate;

pub use therundown_api::TheRundownClient;

/// Anything that can supply provider events for a sport and day
///
/// Transport failures are `AdapterError::Provider`; events that arrive but do
/// not decode are `AdapterError::MalformedUpstreamData`.
#[async_trait]
pub trait EventSource: Send + Sync {
    async fn fetch_events(&self, sport: SportId, date: NaiveDate) -> Result<Vec<Event>>;
}
