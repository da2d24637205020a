use crate::error::{AdapterError, Result};
use crate::models::{Event, EventStatus, GameCreate, GameId, GameOdds, GameResolve, SportId, Team};
use crate::utils::odds::{normalized_odds, OddsConfig, Outcome};
use chrono::{DateTime, Utc};
use std::collections::BTreeMap;
use tracing::debug;

/// Display names of the two sides of a game
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HomeAwayName {
    pub home_name: String,
    pub away_name: String,
}

/// Resolve the home and away display names of an event
/// "St. Louis" + "Blues" -> "St. Louis Blues" for sports that use mascots
pub fn get_home_away_name(event: &Event, sport: SportId) -> Result<HomeAwayName> {
    let teams = event
        .teams_normalized
        .as_deref()
        .ok_or_else(|| AdapterError::malformed(&event.event_id, "missing teams_normalized"))?;

    if teams.len() != 2 {
        return Err(AdapterError::malformed(
            &event.event_id,
            &format!("expected 2 teams, got {}", teams.len()),
        ));
    }

    let home = teams
        .iter()
        .position(|team| team.is_home)
        .ok_or_else(|| AdapterError::malformed(&event.event_id, "no team flagged home"))?;
    let away = teams
        .iter()
        .position(|team| team.is_away)
        .ok_or_else(|| AdapterError::malformed(&event.event_id, "no team flagged away"))?;

    if home == away {
        return Err(AdapterError::malformed(
            &event.event_id,
            "same team flagged home and away",
        ));
    }

    Ok(HomeAwayName {
        home_name: display_name(&teams[home], sport, &event.event_id)?,
        away_name: display_name(&teams[away], sport, &event.event_id)?,
    })
}

fn display_name(team: &Team, sport: SportId, event_id: &str) -> Result<String> {
    let name = team.name.trim();
    if name.is_empty() {
        return Err(AdapterError::malformed(event_id, "team without a name"));
    }

    let mascot = team.mascot.as_deref().map(str::trim).unwrap_or_default();
    if sport.requires_mascot() && !mascot.is_empty() {
        Ok(format!("{} {}", name, mascot))
    } else {
        Ok(name.to_string())
    }
}

/// Game id shared by every record built from this event
pub fn get_game_id(event: &Event) -> Result<GameId> {
    GameId::from_event_id(&event.event_id)
        .ok_or_else(|| AdapterError::malformed(&event.event_id, "missing event_id"))
}

fn unix_seconds(event_id: &str, field: &str, time: Option<DateTime<Utc>>) -> Result<u64> {
    let time = time.ok_or_else(|| AdapterError::malformed(event_id, &format!("missing {}", field)))?;
    u64::try_from(time.timestamp())
        .map_err(|_| AdapterError::malformed(event_id, &format!("{} before 1970", field)))
}

/// Build the record that lists a new game. Odds are always zero here; they
/// are sent by a separate odds request, so the bookmaker list is not read.
pub fn get_game_create(
    event: &Event,
    sport: SportId,
    _bookmaker_ids: &[u32],
) -> Result<GameCreate> {
    let game_id = get_game_id(event)?;
    let names = get_home_away_name(event, sport)?;
    let start_time = unix_seconds(&event.event_id, "event_date", event.event_date)?;

    let game_create = GameCreate {
        game_id,
        home_team: names.home_name,
        away_team: names.away_name,
        home_odds: 0,
        away_odds: 0,
        draw_odds: 0,
        start_time,
    };
    debug!(game_id = %game_create.game_id, "built game create");
    Ok(game_create)
}

/// Build the record that reports a game's result.
///
/// Scores are only copied once the status is final for the sport; any
/// earlier status reports 0-0 so in-progress scores never look final.
pub fn get_game_resolve(event: &Event, sport: SportId) -> Result<GameResolve> {
    let game_id = get_game_id(event)?;
    let score = event
        .score
        .as_ref()
        .ok_or_else(|| AdapterError::malformed(&event.event_id, "missing score"))?;

    let status_name = score
        .event_status
        .as_deref()
        .ok_or_else(|| AdapterError::malformed(&event.event_id, "missing event_status"))?;
    let status = EventStatus::from_name(status_name).ok_or_else(|| {
        AdapterError::malformed(&event.event_id, &format!("unknown status {}", status_name))
    })?;

    let last_updated = unix_seconds(&event.event_id, "updated_at", score.updated_at)?;

    let (home_score, away_score) = if sport.is_final(status) {
        (
            final_score(&event.event_id, "score_home", score.score_home)?,
            final_score(&event.event_id, "score_away", score.score_away)?,
        )
    } else {
        (0, 0)
    };

    let game_resolve = GameResolve {
        game_id,
        home_score,
        away_score,
        status_id: status.id(),
        last_updated,
    };
    debug!(
        game_id = %game_resolve.game_id,
        status = status.name(),
        "built game resolve"
    );
    Ok(game_resolve)
}

fn final_score(event_id: &str, field: &str, score: Option<i64>) -> Result<u64> {
    let score = score.ok_or_else(|| AdapterError::malformed(event_id, &format!("missing {}", field)))?;
    u64::try_from(score)
        .map_err(|_| AdapterError::malformed(event_id, &format!("negative {}", field)))
}

/// Build the record carrying a game's current moneyline odds.
///
/// Each outcome takes its quote from the first bookmaker in `bookmaker_ids`
/// that has one. Draw odds are zero for sports without draws, whatever the
/// provider sends.
pub fn get_game_odds(
    event: &Event,
    sport: SportId,
    bookmaker_ids: &[u32],
    config: &OddsConfig,
) -> Result<GameOdds> {
    let game_id = get_game_id(event)?;
    let empty = BTreeMap::new();
    let lines = event.lines.as_ref().unwrap_or(&empty);

    let draw_odds = if sport.supports_draw() {
        normalized_odds(lines, bookmaker_ids, Outcome::Draw, config)
    } else {
        0
    };

    let game_odds = GameOdds {
        game_id,
        home_odds: normalized_odds(lines, bookmaker_ids, Outcome::Home, config),
        away_odds: normalized_odds(lines, bookmaker_ids, Outcome::Away, config),
        draw_odds,
    };
    debug!(game_id = %game_odds.game_id, "built game odds");
    Ok(game_odds)
}
