pub mod sport;

pub use sport::{EventStatus, SportClass, SportId};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize, Serializer};
use sha2::{Digest, Sha256};
use std::collections::BTreeMap;
use std::fmt;

/// Response body of the provider's events endpoint
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EventsResponse {
    #[serde(default)]
    pub events: Vec<Event>,
}

/// One scheduled contest as returned by the provider
///
/// Fields the builders depend on are optional; the builders report a
/// missing one as `MalformedUpstreamData`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Event {
    #[serde(default)]
    pub event_id: String,
    pub sport_id: Option<u32>,
    pub event_date: Option<DateTime<Utc>>,
    pub score: Option<Score>,
    pub teams_normalized: Option<Vec<Team>>,
    /// Lines keyed by bookmaker (affiliate) id
    pub lines: Option<BTreeMap<u32, Line>>,
}

/// A participant in an event
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Team {
    #[serde(default)]
    pub name: String,
    pub mascot: Option<String>,
    #[serde(default)]
    pub is_away: bool,
    #[serde(default)]
    pub is_home: bool,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Score {
    pub event_status: Option<String>,
    pub score_away: Option<i64>,
    pub score_home: Option<i64>,
    pub updated_at: Option<DateTime<Utc>>,
}

/// Markets quoted by one bookmaker for an event
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Line {
    pub moneyline: Option<Moneyline>,
}

/// Moneyline quotes in American odds; the provider marks a missing quote
/// with a sentinel value rather than omitting it
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Moneyline {
    pub moneyline_away: Option<f64>,
    pub moneyline_home: Option<f64>,
    pub moneyline_draw: Option<f64>,
}

/// bytes32 game identifier shared by every record built from one event
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct GameId([u8; 32]);

impl GameId {
    pub const LEN: usize = 32;

    /// Derive the game id from the provider's event id.
    ///
    /// Ids of up to 32 bytes are used as-is, right-padded with zeros. Longer
    /// ids are replaced by the hex of the first 16 bytes of their SHA-256.
    /// Returns `None` for an empty id.
    pub fn from_event_id(event_id: &str) -> Option<Self> {
        if event_id.is_empty() {
            return None;
        }

        let mut bytes = [0u8; Self::LEN];
        if event_id.len() <= Self::LEN {
            bytes[..event_id.len()].copy_from_slice(event_id.as_bytes());
        } else {
            let hash = Sha256::digest(event_id.as_bytes());
            bytes.copy_from_slice(hex::encode(&hash[0..16]).as_bytes());
        }
        Some(Self(bytes))
    }

    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }
}

impl fmt::Display for GameId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(self.0))
    }
}

impl fmt::Debug for GameId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "GameId({})", self)
    }
}

impl Serialize for GameId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Record sent when a game is first listed on-chain
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GameCreate {
    pub game_id: GameId,
    pub home_team: String,
    pub away_team: String,
    pub home_odds: i64,
    pub away_odds: i64,
    pub draw_odds: i64,
    pub start_time: u64,
}

/// Record sent when a game's outcome is reported
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GameResolve {
    pub game_id: GameId,
    pub home_score: u64,
    pub away_score: u64,
    pub status_id: u8,
    pub last_updated: u64,
}

/// Record sent to refresh a game's odds
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GameOdds {
    pub game_id: GameId,
    pub home_odds: i64,
    pub away_odds: i64,
    pub draw_odds: i64,
}
