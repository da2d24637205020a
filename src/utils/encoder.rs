//! ABI encoding of game records for the consumer contract.
//!
//! Every value occupies one 32-byte big-endian word. Negative integers are
//! sign-extended to 256 bits, strings are length-prefixed and right-padded
//! to a word boundary. Output is `0x`-prefixed lowercase hex.

use crate::error::{AdapterError, Result};
use crate::models::{GameCreate, GameId, GameOdds, GameResolve};

const WORD: usize = 32;

type Word = [u8; WORD];

/// Largest value of a Solidity `uint40` (timestamps)
const UINT40_MAX: u64 = (1 << 40) - 1;
/// Largest value of a Solidity `uint8` (scores)
const UINT8_MAX: u64 = u8::MAX as u64;
/// Range of a Solidity `int24` (odds)
const INT24_MIN: i64 = -(1 << 23);
const INT24_MAX: i64 = (1 << 23) - 1;

fn uint_word(value: u64) -> Word {
    let mut word = [0u8; WORD];
    word[WORD - 8..].copy_from_slice(&value.to_be_bytes());
    word
}

fn int_word(value: i64) -> Word {
    let fill = if value < 0 { 0xff } else { 0x00 };
    let mut word = [fill; WORD];
    word[WORD - 8..].copy_from_slice(&value.to_be_bytes());
    word
}

fn game_id_word(game_id: &GameId) -> Word {
    *game_id.as_bytes()
}

fn checked_uint(field: &str, value: u64, max: u64) -> Result<Word> {
    if value > max {
        return Err(AdapterError::Encoding(format!(
            "{} {} exceeds {}",
            field, value, max
        )));
    }
    Ok(uint_word(value))
}

fn checked_int24(field: &str, value: i64) -> Result<Word> {
    if !(INT24_MIN..=INT24_MAX).contains(&value) {
        return Err(AdapterError::Encoding(format!(
            "{} {} does not fit int24",
            field, value
        )));
    }
    Ok(int_word(value))
}

/// Length word followed by the bytes, right-padded to a whole word
fn string_tail(value: &str) -> Vec<u8> {
    let bytes = value.as_bytes();
    let padded = bytes.len().div_ceil(WORD) * WORD;

    let mut tail = Vec::with_capacity(WORD + padded);
    tail.extend_from_slice(&uint_word(bytes.len() as u64));
    tail.extend_from_slice(bytes);
    tail.resize(WORD + padded, 0);
    tail
}

fn to_hex(words: &[u8]) -> String {
    format!("0x{}", hex::encode(words))
}

/// Encode `(bytes32, uint40, int24, int24, int24, string, string)` as a
/// single dynamic tuple, so the output starts with the tuple's offset.
pub fn encode_game_create(game: &GameCreate) -> Result<String> {
    const HEAD_WORDS: usize = 7;

    let home_tail = string_tail(&game.home_team);
    let away_tail = string_tail(&game.away_team);
    let home_offset = (HEAD_WORDS * WORD) as u64;
    let away_offset = home_offset + home_tail.len() as u64;

    let head = [
        game_id_word(&game.game_id),
        checked_uint("startTime", game.start_time, UINT40_MAX)?,
        checked_int24("homeOdds", game.home_odds)?,
        checked_int24("awayOdds", game.away_odds)?,
        checked_int24("drawOdds", game.draw_odds)?,
        uint_word(home_offset),
        uint_word(away_offset),
    ];

    let mut encoded = Vec::with_capacity(WORD * (1 + HEAD_WORDS) + home_tail.len() + away_tail.len());
    encoded.extend_from_slice(&uint_word(WORD as u64));
    for word in &head {
        encoded.extend_from_slice(word);
    }
    encoded.extend_from_slice(&home_tail);
    encoded.extend_from_slice(&away_tail);

    Ok(to_hex(&encoded))
}

/// Encode `(bytes32, uint8, uint8, uint8, uint40)`
pub fn encode_game_resolve(game: &GameResolve) -> Result<String> {
    let words = [
        game_id_word(&game.game_id),
        checked_uint("homeScore", game.home_score, UINT8_MAX)?,
        checked_uint("awayScore", game.away_score, UINT8_MAX)?,
        uint_word(u64::from(game.status_id)),
        checked_uint("lastUpdated", game.last_updated, UINT40_MAX)?,
    ];
    Ok(to_hex(&words.concat()))
}

/// Encode `(bytes32, int24, int24, int24)`
pub fn encode_game_odds(game: &GameOdds) -> Result<String> {
    let words = [
        game_id_word(&game.game_id),
        checked_int24("homeOdds", game.home_odds)?,
        checked_int24("awayOdds", game.away_odds)?,
        checked_int24("drawOdds", game.draw_odds)?,
    ];
    Ok(to_hex(&words.concat()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn game_id(event_id: &str) -> GameId {
        GameId::from_event_id(event_id).unwrap()
    }

    #[test]
    fn test_encode_game_create() {
        let game = GameCreate {
            game_id: game_id("76166bd6b4de94e11c5bd20cdf3fb19e"),
            home_team: "St. Louis Blues".to_string(),
            away_team: "New York Islanders".to_string(),
            home_odds: 0,
            away_odds: 0,
            draw_odds: 0,
            start_time: 1649548800,
        };
        let expected = "0x000000000000000000000000000000000000000000000000000000000000002037363136366264366234646539346531316335626432306364663366623139650000000000000000000000000000000000000000000000000000000062521e0000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000e00000000000000000000000000000000000000000000000000000000000000120000000000000000000000000000000000000000000000000000000000000000f53742e204c6f75697320426c756573000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000124e657720596f726b2049736c616e646572730000000000000000000000000000";

        assert_eq!(encode_game_create(&game).unwrap(), expected);
    }

    #[test]
    fn test_encode_game_resolve() {
        let game = GameResolve {
            game_id: game_id("11ec31496ea01000854126410b57b6dc"),
            home_score: 114,
            away_score: 121,
            status_id: 8,
            last_updated: 1658535461,
        };
        let expected = "0x31316563333134393665613031303030383534313236343130623537623664630000000000000000000000000000000000000000000000000000000000000072000000000000000000000000000000000000000000000000000000000000007900000000000000000000000000000000000000000000000000000000000000080000000000000000000000000000000000000000000000000000000062db3e25";

        assert_eq!(encode_game_resolve(&game).unwrap(), expected);
    }

    #[test]
    fn test_encode_game_odds() {
        let game = GameOdds {
            game_id: game_id("76166bd6b4de94e11c5bd20cdf3fb19e"),
            home_odds: -16000,
            away_odds: 14000,
            draw_odds: 0,
        };
        let expected = "0x3736313636626436623464653934653131633562643230636466336662313965ffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffc18000000000000000000000000000000000000000000000000000000000000036b00000000000000000000000000000000000000000000000000000000000000000";

        assert_eq!(encode_game_odds(&game).unwrap(), expected);
    }

    #[test]
    fn test_string_tail_padding() {
        assert_eq!(string_tail("").len(), WORD);
        assert_eq!(string_tail("a").len(), 2 * WORD);
        assert_eq!(string_tail(&"x".repeat(32)).len(), 2 * WORD);
        assert_eq!(string_tail(&"x".repeat(33)).len(), 3 * WORD);
    }

    #[test]
    fn test_create_offsets_follow_long_names() {
        let game = GameCreate {
            game_id: game_id("76166bd6b4de94e11c5bd20cdf3fb19e"),
            home_team: "Brighton & Hove Albion Football Club".to_string(),
            away_team: "Wolves".to_string(),
            home_odds: 0,
            away_odds: 0,
            draw_odds: 0,
            start_time: 1649548800,
        };
        let encoded = encode_game_create(&game).unwrap();
        let bytes = hex::decode(&encoded[2..]).unwrap();

        // Home name is 36 bytes: length word plus two data words
        let away_offset_word = &bytes[WORD * 7..WORD * 8];
        assert_eq!(away_offset_word, &uint_word(7 * 32 + 3 * 32));
        assert_eq!(bytes.len(), WORD * (1 + 7 + 3 + 2));
    }

    #[test]
    fn test_encoding_is_deterministic() {
        let game = GameOdds {
            game_id: game_id("3b2fec92e4dafda941237d8256237643"),
            home_odds: 80000,
            away_odds: -50000,
            draw_odds: -45000,
        };
        assert_eq!(encode_game_odds(&game).unwrap(), encode_game_odds(&game).unwrap());
    }

    #[test]
    fn test_out_of_range_values() {
        let odds = GameOdds {
            game_id: game_id("3b2fec92e4dafda941237d8256237643"),
            home_odds: 10_000_000,
            away_odds: 0,
            draw_odds: 0,
        };
        assert!(matches!(
            encode_game_odds(&odds).unwrap_err(),
            AdapterError::Encoding(_)
        ));

        let resolve = GameResolve {
            game_id: game_id("3b2fec92e4dafda941237d8256237643"),
            home_score: 256,
            away_score: 0,
            status_id: 8,
            last_updated: 1658535461,
        };
        assert!(encode_game_resolve(&resolve).is_err());
    }

    #[test]
    fn test_int24_bounds() {
        assert!(checked_int24("odds", INT24_MIN).is_ok());
        assert!(checked_int24("odds", INT24_MAX).is_ok());
        assert!(checked_int24("odds", INT24_MAX + 1).is_err());
        assert_eq!(int_word(-1), [0xff; WORD]);
    }
}
