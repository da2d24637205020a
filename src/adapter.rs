use crate::error::{AdapterError, Result};
use crate::models::{Event, GameId, SportId};
use crate::utils::encoder::{encode_game_create, encode_game_odds, encode_game_resolve};
use crate::utils::odds::OddsConfig;
use crate::utils::records::{get_game_create, get_game_odds, get_game_resolve};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// Which record a request asks for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Market {
    Create,
    Resolve,
    Odds,
}

impl Market {
    /// Interpret the request's `endpoint` / `market` pair.
    /// The odds endpoint ignores `market`; otherwise 0 = create, 1 = resolve.
    pub fn from_request(endpoint: Option<&str>, market: Option<u8>) -> Result<Self> {
        if endpoint.is_some_and(|e| e.eq_ignore_ascii_case("odds")) {
            return Ok(Market::Odds);
        }
        match market {
            Some(0) => Ok(Market::Create),
            Some(1) => Ok(Market::Resolve),
            Some(other) => Err(AdapterError::InvalidRequest(format!(
                "unknown market {}",
                other
            ))),
            None => Err(AdapterError::InvalidRequest("missing market".to_string())),
        }
    }
}

/// Parameters of one adapter request, already validated
#[derive(Debug, Clone)]
pub struct RequestParams {
    pub sport: SportId,
    pub market: Market,
    /// Bookmakers to read odds from, in priority order
    pub bookmaker_ids: Vec<u32>,
    /// Only return these games (0x game ids or raw event ids)
    pub game_ids: Option<Vec<String>>,
    /// Only return resolved games with these status ids
    pub status_ids: Option<Vec<u8>>,
}

/// One encoded record in the response
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EncodedGame {
    pub game_id: GameId,
    pub encoded: String,
}

fn matches_game_ids(event: &Event, game_ids: &[String]) -> bool {
    let game_id = GameId::from_event_id(&event.event_id).map(|id| id.to_string());
    game_ids
        .iter()
        .map(|wanted| wanted.trim())
        .filter(|wanted| !wanted.is_empty())
        .any(|wanted| {
            wanted.eq_ignore_ascii_case(&event.event_id)
                || game_id
                    .as_deref()
                    .is_some_and(|id| id.eq_ignore_ascii_case(wanted))
        })
}

/// Build and encode the requested record for one event.
///
/// Returns `Ok(None)` when the record is filtered out by `status_ids`.
pub fn encode_event(
    event: &Event,
    params: &RequestParams,
    odds_config: &OddsConfig,
) -> Result<Option<EncodedGame>> {
    let encoded = match params.market {
        Market::Create => {
            let game = get_game_create(event, params.sport, &params.bookmaker_ids)?;
            EncodedGame {
                game_id: game.game_id,
                encoded: encode_game_create(&game)?,
            }
        }
        Market::Resolve => {
            let game = get_game_resolve(event, params.sport)?;
            if let Some(status_ids) = &params.status_ids {
                if !status_ids.contains(&game.status_id) {
                    debug!(game_id = %game.game_id, status_id = game.status_id, "status filtered out");
                    return Ok(None);
                }
            }
            EncodedGame {
                game_id: game.game_id,
                encoded: encode_game_resolve(&game)?,
            }
        }
        Market::Odds => {
            let game = get_game_odds(event, params.sport, &params.bookmaker_ids, odds_config)?;
            EncodedGame {
                game_id: game.game_id,
                encoded: encode_game_odds(&game)?,
            }
        }
    };
    Ok(Some(encoded))
}

/// Run the pipeline over a provider response.
///
/// Any malformed event fails the whole request, so callers never receive a
/// partial list.
pub fn process_events(
    events: &[Event],
    params: &RequestParams,
    odds_config: &OddsConfig,
) -> Result<Vec<EncodedGame>> {
    let mut encoded_games = Vec::new();

    for event in events {
        if let Some(game_ids) = &params.game_ids {
            if !matches_game_ids(event, game_ids) {
                continue;
            }
        }

        match encode_event(event, params, odds_config) {
            Ok(Some(encoded)) => encoded_games.push(encoded),
            Ok(None) => {}
            Err(e) => {
                warn!(event_id = %event.event_id, error = %e, "rejecting provider response");
                return Err(e);
            }
        }
    }

    debug!(
        sport = %params.sport,
        market = ?params.market,
        total = events.len(),
        encoded = encoded_games.len(),
        "processed events"
    );
    Ok(encoded_games)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::fixtures;

    fn params(market: Market) -> RequestParams {
        RequestParams {
            sport: SportId::Nba,
            market,
            bookmaker_ids: vec![3, 11],
            game_ids: None,
            status_ids: None,
        }
    }

    #[test]
    fn test_market_from_request() {
        assert_eq!(Market::from_request(None, Some(0)).unwrap(), Market::Create);
        assert_eq!(Market::from_request(Some("schedule"), Some(1)).unwrap(), Market::Resolve);
        assert_eq!(Market::from_request(Some("odds"), None).unwrap(), Market::Odds);
        assert!(Market::from_request(None, Some(2)).is_err());
        assert!(Market::from_request(None, None).is_err());
    }

    #[test]
    fn test_process_create() {
        let events = fixtures::nba_events();
        let encoded = process_events(&events, &params(Market::Create), &OddsConfig::default()).unwrap();

        assert_eq!(encoded.len(), 4);
        assert!(encoded[0].encoded.starts_with(
            "0x00000000000000000000000000000000000000000000000000000000000000203736"
        ));
    }

    #[test]
    fn test_process_resolve_matches_reference_encoding() {
        let events = fixtures::nba_events();
        let encoded = process_events(&events, &params(Market::Resolve), &OddsConfig::default()).unwrap();

        assert_eq!(
            encoded[3].encoded,
            "0x31316563333134393665613031303030383534313236343130623537623664630000000000000000000000000000000000000000000000000000000000000072000000000000000000000000000000000000000000000000000000000000007900000000000000000000000000000000000000000000000000000000000000080000000000000000000000000000000000000000000000000000000062db3e25"
        );
    }

    #[test]
    fn test_process_odds() {
        let events = fixtures::nba_events();
        let encoded = process_events(&events, &params(Market::Odds), &OddsConfig::default()).unwrap();

        // -160 / 140 from bookmaker 3, draw forced to zero
        assert_eq!(
            encoded[0].encoded,
            "0x3736313636626436623464653934653131633562643230636466336662313965ffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffc18000000000000000000000000000000000000000000000000000000000000036b00000000000000000000000000000000000000000000000000000000000000000"
        );
    }

    #[test]
    fn test_game_ids_filter() {
        let events = fixtures::nba_events();
        let mut request = params(Market::Resolve);

        request.game_ids = Some(vec![
            "0x3131656333313439366561303130303038353431323634313062353762366463".to_string(),
        ]);
        let encoded = process_events(&events, &request, &OddsConfig::default()).unwrap();
        assert_eq!(encoded.len(), 1);
        assert_eq!(
            encoded[0].game_id,
            GameId::from_event_id("11ec31496ea01000854126410b57b6dc").unwrap()
        );

        request.game_ids = Some(vec!["cd9e56325c4dd84b59f5cc213e77c9f8".to_string()]);
        let encoded = process_events(&events, &request, &OddsConfig::default()).unwrap();
        assert_eq!(encoded.len(), 1);

        request.game_ids = Some(vec!["0xdeadbeef".to_string()]);
        let encoded = process_events(&events, &request, &OddsConfig::default()).unwrap();
        assert!(encoded.is_empty());
    }

    #[test]
    fn test_blank_game_ids_match_nothing() {
        let mut events = fixtures::nba_events();
        let mut nameless = fixtures::nba_events().remove(0);
        nameless.event_id = String::new();
        events.push(nameless);

        let mut request = params(Market::Create);
        request.game_ids = Some(vec!["".to_string(), "   ".to_string()]);

        let encoded = process_events(&events, &request, &OddsConfig::default()).unwrap();
        assert!(encoded.is_empty());
    }

    #[test]
    fn test_status_ids_filter() {
        let events = fixtures::nba_events();
        let mut request = params(Market::Resolve);
        request.status_ids = Some(vec![8]);

        let encoded = process_events(&events, &request, &OddsConfig::default()).unwrap();
        assert_eq!(encoded.len(), 2);
    }

    #[test]
    fn test_game_id_stable_across_markets() {
        let events = fixtures::nba_events();
        let config = OddsConfig::default();

        let create = process_events(&events, &params(Market::Create), &config).unwrap();
        let resolve = process_events(&events, &params(Market::Resolve), &config).unwrap();
        let odds = process_events(&events, &params(Market::Odds), &config).unwrap();

        for i in 0..events.len() {
            assert_eq!(create[i].game_id, resolve[i].game_id);
            assert_eq!(resolve[i].game_id, odds[i].game_id);
            // Every encoding starts from the same bytes32 word
            let id_hex = &create[i].game_id.to_string()[2..];
            assert!(resolve[i].encoded[2..].starts_with(id_hex));
            assert!(odds[i].encoded[2..].starts_with(id_hex));
        }
    }

    #[test]
    fn test_malformed_event_fails_request() {
        let mut events = fixtures::nba_events();
        events.extend(fixtures::malformed_events());

        let err = process_events(&events, &params(Market::Create), &OddsConfig::default())
            .unwrap_err();
        assert!(matches!(err, AdapterError::MalformedUpstreamData(_)));
    }

    #[test]
    fn test_no_events() {
        let encoded = process_events(&[], &params(Market::Create), &OddsConfig::default()).unwrap();
        assert!(encoded.is_empty());
    }
}
