use crate::models::SportId;
use crate::utils::odds::{OddsConfig, DEFAULT_NO_ODDS_SENTINEL, DEFAULT_ODDS_MULTIPLIER};
use anyhow::{Context, Result};
use std::collections::{BTreeMap, HashMap};

pub const DEFAULT_API_URL: &str = "https://therundown-therundown-v1.p.rapidapi.com";
pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1:8080";
pub const DEFAULT_BOOKMAKER_IDS: [u32; 2] = [3, 11];

/// Adapter configuration, read once at startup
#[derive(Debug, Clone)]
pub struct Config {
    pub api_key: Option<String>,
    pub api_url: String,
    pub bind_addr: String,
    pub odds: OddsConfig,
    pub default_bookmaker_ids: Vec<u32>,
    pub sport_bookmaker_ids: BTreeMap<SportId, Vec<u32>>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_key: None,
            api_url: DEFAULT_API_URL.to_string(),
            bind_addr: DEFAULT_BIND_ADDR.to_string(),
            odds: OddsConfig::default(),
            default_bookmaker_ids: DEFAULT_BOOKMAKER_IDS.to_vec(),
            sport_bookmaker_ids: BTreeMap::new(),
        }
    }
}

impl Config {
    /// Load configuration from the environment (and `.env` if present)
    pub fn from_env() -> Result<Self> {
        dotenv::dotenv().ok();
        let vars: HashMap<String, String> = std::env::vars().collect();
        Self::from_vars(&vars)
    }

    /// Build configuration from a set of variables. Unknown sport ids in
    /// `SPORT_BOOKMAKER_IDS` are rejected here rather than at request time.
    pub fn from_vars(vars: &HashMap<String, String>) -> Result<Self> {
        let get = |key: &str| vars.get(key).map(|v| v.trim()).filter(|v| !v.is_empty());

        let multiplier = match get("ODDS_MULTIPLIER") {
            Some(value) => value
                .parse::<i64>()
                .with_context(|| format!("Invalid ODDS_MULTIPLIER: {}", value))?,
            None => DEFAULT_ODDS_MULTIPLIER,
        };
        let no_odds_sentinel = match get("NO_ODDS_SENTINEL") {
            Some(value) => value
                .parse::<f64>()
                .with_context(|| format!("Invalid NO_ODDS_SENTINEL: {}", value))?,
            None => DEFAULT_NO_ODDS_SENTINEL,
        };

        let default_bookmaker_ids = match get("DEFAULT_BOOKMAKER_IDS") {
            Some(value) => parse_id_list(value).context("Invalid DEFAULT_BOOKMAKER_IDS")?,
            None => DEFAULT_BOOKMAKER_IDS.to_vec(),
        };
        let sport_bookmaker_ids = match get("SPORT_BOOKMAKER_IDS") {
            Some(value) => parse_sport_bookmakers(value).context("Invalid SPORT_BOOKMAKER_IDS")?,
            None => BTreeMap::new(),
        };

        Ok(Self {
            api_key: get("THERUNDOWN_API_KEY").map(str::to_string),
            api_url: get("THERUNDOWN_API_URL")
                .unwrap_or(DEFAULT_API_URL)
                .trim_end_matches('/')
                .to_string(),
            bind_addr: get("BIND_ADDR").unwrap_or(DEFAULT_BIND_ADDR).to_string(),
            odds: OddsConfig {
                multiplier,
                no_odds_sentinel,
            },
            default_bookmaker_ids,
            sport_bookmaker_ids,
        })
    }

    /// Bookmakers to read odds from for a sport, in priority order
    pub fn bookmakers_for(&self, sport: SportId) -> &[u32] {
        self.sport_bookmaker_ids
            .get(&sport)
            .map(Vec::as_slice)
            .unwrap_or(&self.default_bookmaker_ids)
    }
}

/// Parse "3, 11" into [3, 11]
pub fn parse_id_list(value: &str) -> Result<Vec<u32>> {
    value
        .split(',')
        .map(str::trim)
        .filter(|id| !id.is_empty())
        .map(|id| {
            id.parse::<u32>()
                .with_context(|| format!("Invalid id: {}", id))
        })
        .collect()
}

/// Parse `{"4": [3, 11], "10": [11]}` keyed by sport id
fn parse_sport_bookmakers(value: &str) -> Result<BTreeMap<SportId, Vec<u32>>> {
    let raw: BTreeMap<u32, Vec<u32>> = serde_json::from_str(value)?;
    raw.into_iter()
        .map(|(sport_id, bookmaker_ids)| -> Result<(SportId, Vec<u32>)> {
            Ok((SportId::try_from(sport_id)?, bookmaker_ids))
        })
        .collect()
}
