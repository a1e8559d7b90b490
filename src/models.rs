use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

// ============================================================================
// ENUMERATIONS
// ============================================================================

/// Ranked tier, ordered from lowest to highest
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum LeagueTier {
    Iron,
    Bronze,
    Silver,
    Gold,
    Platinum,
    Emerald,
    Diamond,
    Master,
    Grandmaster,
    Challenger,
}

impl LeagueTier {
    pub const ALL: [LeagueTier; 10] = [
        LeagueTier::Iron,
        LeagueTier::Bronze,
        LeagueTier::Silver,
        LeagueTier::Gold,
        LeagueTier::Platinum,
        LeagueTier::Emerald,
        LeagueTier::Diamond,
        LeagueTier::Master,
        LeagueTier::Grandmaster,
        LeagueTier::Challenger,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            LeagueTier::Iron => "IRON",
            LeagueTier::Bronze => "BRONZE",
            LeagueTier::Silver => "SILVER",
            LeagueTier::Gold => "GOLD",
            LeagueTier::Platinum => "PLATINUM",
            LeagueTier::Emerald => "EMERALD",
            LeagueTier::Diamond => "DIAMOND",
            LeagueTier::Master => "MASTER",
            LeagueTier::Grandmaster => "GRANDMASTER",
            LeagueTier::Challenger => "CHALLENGER",
        }
    }

    /// Apex tiers have no rank subdivision
    pub fn is_apex(&self) -> bool {
        matches!(
            self,
            LeagueTier::Master | LeagueTier::Grandmaster | LeagueTier::Challenger
        )
    }
}

impl FromStr for LeagueTier {
    type Err = ();

    /// Case insensitive: "Emerald", "EMERALD" and "emerald" are all accepted
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let upper = s.to_uppercase();
        LeagueTier::ALL
            .into_iter()
            .find(|tier| tier.as_str() == upper)
            .ok_or(())
    }
}

impl fmt::Display for LeagueTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum LeagueRank {
    I,
    II,
    III,
    IV,
}

impl LeagueRank {
    pub const ALL: [LeagueRank; 4] = [LeagueRank::I, LeagueRank::II, LeagueRank::III, LeagueRank::IV];

    pub fn as_str(&self) -> &'static str {
        match self {
            LeagueRank::I => "I",
            LeagueRank::II => "II",
            LeagueRank::III => "III",
            LeagueRank::IV => "IV",
        }
    }
}

impl FromStr for LeagueRank {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        LeagueRank::ALL
            .into_iter()
            .find(|rank| rank.as_str() == s)
            .ok_or(())
    }
}

impl fmt::Display for LeagueRank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Ranked queue as labelled on the live game page
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Queue {
    Soloqueue,
    Flex,
}

impl Queue {
    pub const ALL: [Queue; 2] = [Queue::Soloqueue, Queue::Flex];

    pub fn as_str(&self) -> &'static str {
        match self {
            Queue::Soloqueue => "Soloqueue",
            Queue::Flex => "Flex",
        }
    }
}

impl FromStr for Queue {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Queue::ALL.into_iter().find(|q| q.as_str() == s).ok_or(())
    }
}

/// Lane names as written by porofessor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Lane {
    Top,
    Jungler,
    Mid,
    AdCarry,
    Support,
}

impl Lane {
    pub const ALL: [Lane; 5] = [Lane::Top, Lane::Jungler, Lane::Mid, Lane::AdCarry, Lane::Support];

    pub fn as_str(&self) -> &'static str {
        match self {
            Lane::Top => "Top",
            Lane::Jungler => "Jungler",
            Lane::Mid => "Mid",
            Lane::AdCarry => "AD Carry",
            Lane::Support => "Support",
        }
    }

    pub fn position(&self) -> ChampionPosition {
        match self {
            Lane::Top => ChampionPosition::Top,
            Lane::Jungler => ChampionPosition::Jun,
            Lane::Mid => ChampionPosition::Mid,
            Lane::AdCarry => ChampionPosition::Bot,
            Lane::Support => ChampionPosition::Sup,
        }
    }
}

impl FromStr for Lane {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Lane::ALL.into_iter().find(|l| l.as_str() == s).ok_or(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChampionPosition {
    Top,
    Jun,
    Mid,
    Bot,
    Sup,
}

impl ChampionPosition {
    pub fn as_str(&self) -> &'static str {
        match self {
            ChampionPosition::Top => "top",
            ChampionPosition::Jun => "jun",
            ChampionPosition::Mid => "mid",
            ChampionPosition::Bot => "bot",
            ChampionPosition::Sup => "sup",
        }
    }
}

/// Reputation colour of a tag badge
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "i8", try_from = "i8")]
pub enum Niceness {
    /// red
    Bad,
    /// yellow
    Neutral,
    /// green
    Good,
    /// blue, e.g. pro players
    Pro,
}

impl Niceness {
    pub fn value(&self) -> i8 {
        match self {
            Niceness::Bad => -1,
            Niceness::Neutral => 0,
            Niceness::Good => 1,
            Niceness::Pro => 2,
        }
    }
}

impl From<Niceness> for i8 {
    fn from(n: Niceness) -> i8 {
        n.value()
    }
}

impl TryFrom<i8> for Niceness {
    type Error = String;

    fn try_from(value: i8) -> Result<Self, Self::Error> {
        match value {
            -1 => Ok(Niceness::Bad),
            0 => Ok(Niceness::Neutral),
            1 => Ok(Niceness::Good),
            2 => Ok(Niceness::Pro),
            other => Err(format!("Invalid niceness: {}", other)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(into = "u16", try_from = "u16")]
pub enum TeamId {
    Blue,
    Red,
}

impl TeamId {
    pub fn value(&self) -> u16 {
        match self {
            TeamId::Blue => 100,
            TeamId::Red => 200,
        }
    }
}

impl From<TeamId> for u16 {
    fn from(t: TeamId) -> u16 {
        t.value()
    }
}

impl TryFrom<u16> for TeamId {
    type Error = String;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        match value {
            100 => Ok(TeamId::Blue),
            200 => Ok(TeamId::Red),
            other => Err(format!("Invalid team id: {}", other)),
        }
    }
}

impl fmt::Display for TeamId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value())
    }
}

/// Riot platform (server) codes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Platform {
    BR,
    EUN,
    EUW,
    JP,
    KR,
    LA1,
    LA2,
    NA,
    OC,
    TR,
    RU,
}

impl Platform {
    pub const ALL: [Platform; 11] = [
        Platform::BR,
        Platform::EUN,
        Platform::EUW,
        Platform::JP,
        Platform::KR,
        Platform::LA1,
        Platform::LA2,
        Platform::NA,
        Platform::OC,
        Platform::TR,
        Platform::RU,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Platform::BR => "BR",
            Platform::EUN => "EUN",
            Platform::EUW => "EUW",
            Platform::JP => "JP",
            Platform::KR => "KR",
            Platform::LA1 => "LA1",
            Platform::LA2 => "LA2",
            Platform::NA => "NA",
            Platform::OC => "OC",
            Platform::TR => "TR",
            Platform::RU => "RU",
        }
    }

    /// Path segment used by porofessor ("euw", "la1", ...)
    pub fn lower(&self) -> String {
        self.as_str().to_lowercase()
    }
}

impl FromStr for Platform {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let upper = s.to_uppercase();
        Platform::ALL
            .into_iter()
            .find(|p| p.as_str() == upper)
            .ok_or_else(|| format!("Unknown platform: {}", s))
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GameId(pub u64);

impl fmt::Display for GameId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ============================================================================
// PARSED RECORDS
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WinRate {
    pub percent: u32,
    pub played: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TierRank {
    pub tier: LeagueTier,
    /// Always `None` for apex tiers
    pub rank: Option<LeagueRank>,
}

impl TierRank {
    pub fn new(tier: LeagueTier, rank: LeagueRank) -> Self {
        TierRank { tier, rank: Some(rank) }
    }

    pub fn apex(tier: LeagueTier) -> Self {
        TierRank { tier, rank: None }
    }

    /// Riot's representation, where apex tiers report rank "I"
    pub fn rank_or_sentinel(&self) -> LeagueRank {
        self.rank.unwrap_or(LeagueRank::I)
    }
}

impl fmt::Display for TierRank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.rank {
            Some(rank) => write!(f, "{} {}", self.tier, rank),
            None => write!(f, "{}", self.tier),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChampionStats {
    pub win_rate_percent: u32,
    pub games_played: u32,
    pub kills: f32,
    pub deaths: f32,
    pub assists: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct League {
    pub tier_rank: TierRank,
    pub league_points: u32,
    pub win_rate: WinRate,
    pub previous_season: Option<TierRank>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Leagues {
    pub solo_duo: Option<League>,
    pub flex: Option<League>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tag {
    pub niceness: Niceness,
    pub label: String,
    pub tooltip: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Participant {
    pub premade_id: Option<u32>,
    pub summoner_name: String,
    pub summoner_level: u32,
    pub champion: Option<ChampionStats>,
    pub leagues: Leagues,
    pub role: Option<ChampionPosition>,
    pub main_roles: Vec<ChampionPosition>,
    pub tags: Vec<Tag>,
}

/// Participants per team; a team is only present when it has participants
pub type TeamParticipants = BTreeMap<TeamId, Vec<Participant>>;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LiveGame {
    pub game_id: GameId,
    pub participants: TeamParticipants,
}

impl LiveGame {
    pub fn team(&self, team: TeamId) -> &[Participant] {
        self.participants.get(&team).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn participant_count(&self) -> usize {
        self.participants.values().map(Vec::len).sum()
    }
}

/// Outcome of parsing one live game page
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ParsedPage {
    NoActiveGame,
    ActiveGameFound(LiveGame),
}

/// A found game as kept by the cache, with its insertion time for TTL eviction
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredLiveGame {
    pub game: LiveGame,
    pub inserted_at: DateTime<Utc>,
}
