use crate::models::{Line, Moneyline};
use std::collections::BTreeMap;

/// Multiplier turning American odds into the contract's fixed-point odds
pub const DEFAULT_ODDS_MULTIPLIER: i64 = 100;

/// Value the provider sends when a bookmaker has no quote for an outcome
pub const DEFAULT_NO_ODDS_SENTINEL: f64 = 0.0001;

/// Provider-specific odds constants
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OddsConfig {
    pub multiplier: i64,
    pub no_odds_sentinel: f64,
}

impl Default for OddsConfig {
    fn default() -> Self {
        Self {
            multiplier: DEFAULT_ODDS_MULTIPLIER,
            no_odds_sentinel: DEFAULT_NO_ODDS_SENTINEL,
        }
    }
}

impl OddsConfig {
    pub fn is_sentinel(&self, quote: f64) -> bool {
        (quote - self.no_odds_sentinel).abs() < f64::EPSILON
    }

    /// Scale a moneyline quote to fixed-point
    pub fn to_fixed_point(&self, quote: f64) -> i64 {
        (quote * self.multiplier as f64).round() as i64
    }
}

/// Moneyline outcome of a game
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Home,
    Away,
    Draw,
}

impl Outcome {
    fn quote(self, moneyline: &Moneyline) -> Option<f64> {
        match self {
            Outcome::Home => moneyline.moneyline_home,
            Outcome::Away => moneyline.moneyline_away,
            Outcome::Draw => moneyline.moneyline_draw,
        }
    }
}

/// Pick the quote for one outcome from the first bookmaker, in priority
/// order, that has a real quote for it
pub fn select_quote(
    lines: &BTreeMap<u32, Line>,
    bookmaker_ids: &[u32],
    outcome: Outcome,
    config: &OddsConfig,
) -> Option<f64> {
    for bookmaker_id in bookmaker_ids {
        let quote = lines
            .get(bookmaker_id)
            .and_then(|line| line.moneyline.as_ref())
            .and_then(|moneyline| outcome.quote(moneyline));

        match quote {
            Some(quote) if quote.is_finite() && !config.is_sentinel(quote) => return Some(quote),
            _ => continue,
        }
    }
    None
}

/// Fixed-point odds for one outcome, zero when no bookmaker quotes it
pub fn normalized_odds(
    lines: &BTreeMap<u32, Line>,
    bookmaker_ids: &[u32],
    outcome: Outcome,
    config: &OddsConfig,
) -> i64 {
    select_quote(lines, bookmaker_ids, outcome, config)
        .map(|quote| config.to_fixed_point(quote))
        .unwrap_or(0)
}
