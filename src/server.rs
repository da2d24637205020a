use crate::adapter::{process_events, EncodedGame, Market, RequestParams};
use crate::api::EventSource;
use crate::config::Config;
use crate::error::{AdapterError, Result};
use crate::models::SportId;
use axum::{
    body::Bytes,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

/// Shared state for request handlers
pub struct AppState {
    pub source: Arc<dyn EventSource>,
    pub config: Arc<Config>,
}

pub type SharedState = Arc<AppState>;

/// `data` section of an adapter request
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestData {
    pub endpoint: Option<String>,
    pub sport_id: Option<u32>,
    pub market: Option<u8>,
    /// Unix seconds of the day to fetch; defaults to today (UTC)
    pub date: Option<i64>,
    pub game_ids: Option<Vec<String>>,
    pub bookmaker_ids: Option<Vec<u32>>,
    pub status_ids: Option<Vec<u8>>,
}

impl RequestData {
    pub fn params(&self, config: &Config) -> Result<RequestParams> {
        let sport_id = self
            .sport_id
            .ok_or_else(|| AdapterError::InvalidRequest("missing sportId".to_string()))?;
        let sport = SportId::try_from(sport_id)?;
        let market = Market::from_request(self.endpoint.as_deref(), self.market)?;

        let bookmaker_ids = self
            .bookmaker_ids
            .clone()
            .unwrap_or_else(|| config.bookmakers_for(sport).to_vec());

        Ok(RequestParams {
            sport,
            market,
            bookmaker_ids,
            game_ids: self.game_ids.clone(),
            status_ids: self.status_ids.clone(),
        })
    }

    pub fn day(&self) -> Result<NaiveDate> {
        match self.date {
            Some(secs) => DateTime::<Utc>::from_timestamp(secs, 0)
                .map(|dt| dt.date_naive())
                .ok_or_else(|| AdapterError::InvalidRequest(format!("invalid date {}", secs))),
            None => Ok(Utc::now().date_naive()),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ResultData {
    pub result: Vec<EncodedGame>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SuccessResponse {
    #[serde(rename = "jobRunID")]
    pub job_run_id: Value,
    pub data: ResultData,
    pub result: Vec<EncodedGame>,
    pub status_code: u16,
}

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub name: String,
    pub message: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorResponse {
    #[serde(rename = "jobRunID")]
    pub job_run_id: Value,
    pub status: String,
    pub status_code: u16,
    pub error: ErrorBody,
}

/// Validation errors use 200 with the error envelope; provider failures 502
fn error_status(error: &AdapterError) -> StatusCode {
    match error {
        AdapterError::Provider(_) => StatusCode::BAD_GATEWAY,
        _ => StatusCode::OK,
    }
}

fn error_response(job_run_id: Value, error: AdapterError) -> Response {
    let status = error_status(&error);
    warn!(error = %error, "request failed");

    let body = ErrorResponse {
        job_run_id,
        status: "errored".to_string(),
        status_code: status.as_u16(),
        error: ErrorBody {
            name: error.name().to_string(),
            message: error.to_string(),
        },
    };
    (status, Json(body)).into_response()
}

fn parse_request(body: &[u8]) -> (Value, Result<RequestData>) {
    let value: Value = match serde_json::from_slice(body) {
        Ok(value) => value,
        Err(e) => {
            return (
                Value::from("1"),
                Err(AdapterError::InvalidRequest(format!("invalid JSON: {}", e))),
            )
        }
    };

    let job_run_id = value.get("id").cloned().unwrap_or_else(|| Value::from("1"));
    let data = match value.get("data") {
        Some(data) => serde_json::from_value::<RequestData>(data.clone())
            .map_err(|e| AdapterError::InvalidRequest(format!("invalid data: {}", e))),
        None => Err(AdapterError::InvalidRequest("missing data".to_string())),
    };
    (job_run_id, data)
}

/// Fetch the day's events for the sport and encode the requested records
pub async fn run_request(state: &AppState, data: &RequestData) -> Result<Vec<EncodedGame>> {
    let params = data.params(&state.config)?;
    let day = data.day()?;

    let events = state.source.fetch_events(params.sport, day).await?;

    process_events(&events, &params, &state.config.odds)
}

async fn handle_request(State(state): State<SharedState>, body: Bytes) -> Response {
    let (job_run_id, data) = parse_request(&body);
    let data = match data {
        Ok(data) => data,
        Err(e) => return error_response(job_run_id, e),
    };

    match run_request(&state, &data).await {
        Ok(result) => {
            info!(sport_id = ?data.sport_id, games = result.len(), "request succeeded");
            let body = SuccessResponse {
                job_run_id,
                data: ResultData {
                    result: result.clone(),
                },
                result,
                status_code: StatusCode::OK.as_u16(),
            };
            (StatusCode::OK, Json(body)).into_response()
        }
        Err(e) => error_response(job_run_id, e),
    }
}

async fn health() -> impl IntoResponse {
    Json(serde_json::json!({ "status": "ok" }))
}

pub fn router(state: SharedState) -> Router {
    Router::new()
        .route("/", post(handle_request))
        .route("/health", get(health))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
