use crate::error::AdapterError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Sports supported by the provider, keyed by the provider's sport id
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub enum SportId {
    Ncaaf = 1,
    Nfl = 2,
    Mlb = 3,
    Nba = 4,
    Ncaab = 5,
    Nhl = 6,
    Mma = 7,
    Wnba = 8,
    Mls = 10,
    Epl = 11,
    Ligue1 = 12,
    Bundesliga = 13,
    LaLiga = 14,
    SerieA = 15,
    UefaChampionsLeague = 16,
}

/// Static facts about a sport that drive record building
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SportClass {
    /// Team display names are "<name> <mascot>" (e.g. "St. Louis Blues")
    pub requires_mascot: bool,
    /// A draw is a possible outcome
    pub supports_draw: bool,
    /// Statuses after which scores are final
    pub final_statuses: &'static [EventStatus],
}

const US_LEAGUE: SportClass = SportClass {
    requires_mascot: true,
    supports_draw: false,
    final_statuses: &[EventStatus::Final],
};

const COMBAT: SportClass = SportClass {
    requires_mascot: false,
    supports_draw: false,
    final_statuses: &[EventStatus::Final],
};

const US_SOCCER: SportClass = SportClass {
    requires_mascot: true,
    supports_draw: true,
    final_statuses: &[EventStatus::Final, EventStatus::FullTime, EventStatus::FinalPen],
};

const SOCCER: SportClass = SportClass {
    requires_mascot: false,
    supports_draw: true,
    final_statuses: &[EventStatus::Final, EventStatus::FullTime, EventStatus::FinalPen],
};

impl SportId {
    pub const ALL: [SportId; 15] = [
        SportId::Ncaaf,
        SportId::Nfl,
        SportId::Mlb,
        SportId::Nba,
        SportId::Ncaab,
        SportId::Nhl,
        SportId::Mma,
        SportId::Wnba,
        SportId::Mls,
        SportId::Epl,
        SportId::Ligue1,
        SportId::Bundesliga,
        SportId::LaLiga,
        SportId::SerieA,
        SportId::UefaChampionsLeague,
    ];

    pub fn id(self) -> u32 {
        self as u32
    }

    pub fn classification(self) -> &'static SportClass {
        match self {
            SportId::Ncaaf
            | SportId::Nfl
            | SportId::Mlb
            | SportId::Nba
            | SportId::Ncaab
            | SportId::Nhl
            | SportId::Wnba => &US_LEAGUE,
            SportId::Mma => &COMBAT,
            SportId::Mls => &US_SOCCER,
            SportId::Epl
            | SportId::Ligue1
            | SportId::Bundesliga
            | SportId::LaLiga
            | SportId::SerieA
            | SportId::UefaChampionsLeague => &SOCCER,
        }
    }

    pub fn requires_mascot(self) -> bool {
        self.classification().requires_mascot
    }

    pub fn supports_draw(self) -> bool {
        self.classification().supports_draw
    }

    pub fn is_final(self, status: EventStatus) -> bool {
        self.classification().final_statuses.contains(&status)
    }
}

impl TryFrom<u32> for SportId {
    type Error = AdapterError;

    fn try_from(id: u32) -> Result<Self, Self::Error> {
        SportId::ALL
            .into_iter()
            .find(|sport| sport.id() == id)
            .ok_or(AdapterError::UnsupportedSport(id))
    }
}

impl From<SportId> for u32 {
    fn from(sport: SportId) -> Self {
        sport.id()
    }
}

impl fmt::Display for SportId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.id())
    }
}

/// Provider event status, numbered the way the consumer contract expects
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventStatus {
    Canceled = 1,
    Delayed = 2,
    EndOfFight = 3,
    EndOfRound = 4,
    EndPeriod = 5,
    FightersIntroduction = 6,
    FightersWalking = 7,
    Final = 8,
    FinalPen = 9,
    FirstHalf = 10,
    FullTime = 11,
    Halftime = 12,
    InProgress = 13,
    InProgress2 = 14,
    Postponed = 15,
    PreFight = 16,
    RainDelay = 17,
    Scheduled = 18,
    SecondHalf = 19,
    Tbd = 20,
    Uncontested = 21,
    Abandoned = 22,
    Forfeit = 23,
}

const STATUS_NAMES: [(&str, EventStatus); 23] = [
    ("STATUS_CANCELED", EventStatus::Canceled),
    ("STATUS_DELAYED", EventStatus::Delayed),
    ("STATUS_END_OF_FIGHT", EventStatus::EndOfFight),
    ("STATUS_END_OF_ROUND", EventStatus::EndOfRound),
    ("STATUS_END_PERIOD", EventStatus::EndPeriod),
    ("STATUS_FIGHTERS_INTRODUCTION", EventStatus::FightersIntroduction),
    ("STATUS_FIGHTERS_WALKING", EventStatus::FightersWalking),
    ("STATUS_FINAL", EventStatus::Final),
    ("STATUS_FINAL_PEN", EventStatus::FinalPen),
    ("STATUS_FIRST_HALF", EventStatus::FirstHalf),
    ("STATUS_FULL_TIME", EventStatus::FullTime),
    ("STATUS_HALFTIME", EventStatus::Halftime),
    ("STATUS_IN_PROGRESS", EventStatus::InProgress),
    ("STATUS_IN_PROGRESS_2", EventStatus::InProgress2),
    ("STATUS_POSTPONED", EventStatus::Postponed),
    ("STATUS_PRE_FIGHT", EventStatus::PreFight),
    ("STATUS_RAIN_DELAY", EventStatus::RainDelay),
    ("STATUS_SCHEDULED", EventStatus::Scheduled),
    ("STATUS_SECOND_HALF", EventStatus::SecondHalf),
    ("STATUS_TBD", EventStatus::Tbd),
    ("STATUS_UNCONTESTED", EventStatus::Uncontested),
    ("STATUS_ABANDONED", EventStatus::Abandoned),
    ("STATUS_FORFEIT", EventStatus::Forfeit),
];

impl EventStatus {
    pub fn id(self) -> u8 {
        self as u8
    }

    pub fn from_name(name: &str) -> Option<Self> {
        STATUS_NAMES
            .iter()
            .find(|(status_name, _)| *status_name == name)
            .map(|(_, status)| *status)
    }

    pub fn name(self) -> &'static str {
        STATUS_NAMES
            .iter()
            .find(|(_, status)| *status == self)
            .map(|(name, _)| *name)
            .unwrap_or("STATUS_UNKNOWN")
    }
}
