use crate::api::EventSource;
use crate::error::{AdapterError, Result};
use crate::models::{Event, SportId};
use async_trait::async_trait;
use chrono::NaiveDate;
use serde_json::Value;
use tracing::{debug, info};

/// Client for TheRundown events API
pub struct TheRundownClient {
    api_key: String,
    base_url: String,
    client: reqwest::Client,
}

impl TheRundownClient {
    pub fn new(api_key: String, base_url: String) -> Self {
        Self {
            api_key,
            base_url: base_url.trim_end_matches('/').to_string(),
            client: reqwest::Client::new(),
        }
    }

    fn events_url(&self, sport: SportId, date: NaiveDate) -> String {
        format!(
            "{}/sports/{}/events/{}",
            self.base_url,
            sport.id(),
            date.format("%Y-%m-%d")
        )
    }

    /// RapidAPI routes on the host header; only send it for RapidAPI URLs
    fn rapidapi_host(&self) -> Option<&str> {
        let host = self
            .base_url
            .split("://")
            .nth(1)
            .unwrap_or(self.base_url.as_str())
            .split('/')
            .next()?;
        host.ends_with("rapidapi.com").then_some(host)
    }
}

/// Decode the events endpoint body one event at a time, so a field of the
/// wrong type is reported against the event that carries it
pub fn parse_events_response(body: Value) -> Result<Vec<Event>> {
    let events = match body {
        Value::Object(mut fields) => fields.remove("events").unwrap_or(Value::Null),
        _ => {
            return Err(AdapterError::MalformedUpstreamData(
                "events response is not a JSON object".to_string(),
            ))
        }
    };

    let events = match events {
        Value::Array(events) => events,
        Value::Null => return Ok(Vec::new()),
        _ => {
            return Err(AdapterError::MalformedUpstreamData(
                "`events` is not a list".to_string(),
            ))
        }
    };

    events
        .into_iter()
        .map(|event| {
            let event_id = event
                .get("event_id")
                .and_then(Value::as_str)
                .unwrap_or("<unknown>")
                .to_string();
            serde_json::from_value::<Event>(event)
                .map_err(|e| AdapterError::malformed(&event_id, &format!("invalid field: {}", e)))
        })
        .collect()
}

#[async_trait]
impl EventSource for TheRundownClient {
    /// Fetch all events (with scores and lines) for a sport on a given day
    async fn fetch_events(&self, sport: SportId, date: NaiveDate) -> Result<Vec<Event>> {
        let url = self.events_url(sport, date);
        debug!(%url, "fetching events");

        let mut request = self
            .client
            .get(&url)
            .query(&[("include", "scores"), ("offset", "0")])
            .header("x-rapidapi-key", &self.api_key);
        if let Some(host) = self.rapidapi_host() {
            request = request.header("x-rapidapi-host", host);
        }

        let response = request.send().await.map_err(|e| {
            AdapterError::Provider(format!("Failed to fetch events from TheRundown: {}", e))
        })?;

        if !response.status().is_success() {
            return Err(AdapterError::Provider(format!(
                "TheRundown returned error: {}",
                response.status()
            )));
        }

        let body: Value = response.json().await.map_err(|e| {
            AdapterError::Provider(format!("Failed to read TheRundown response: {}", e))
        })?;
        let events = parse_events_response(body)?;

        info!(sport = %sport, %date, events = events.len(), "fetched events");
        Ok(events)
    }
}
