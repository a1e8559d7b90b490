use regex::Regex;
use std::sync::LazyLock;

use crate::models::{GameId, Lane, LeagueRank, LeagueTier, Niceness, Queue, TierRank, WinRate};
use crate::validated::{from_option, invalid, traverse, valid, Validated};

// ============================================================================
// PATTERNS
// ============================================================================

fn alternatives<T>(values: &[T], as_str: impl Fn(&T) -> &'static str) -> String {
    let names: Vec<_> = values.iter().map(|v| regex::escape(as_str(v))).collect();
    format!("({})", names.join("|"))
}

// "46% Win (39 Played)"
static RE_CHAMPION_WIN_RATE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(\d+)% Win \((\d+) Played\)$").expect("invalid regex: champion win rate")
});

static RE_TIER: LazyLock<Regex> = LazyLock::new(|| {
    let tiers = alternatives(&LeagueTier::ALL, LeagueTier::as_str);
    Regex::new(&format!("(?i)^{}(.*)$", tiers)).expect("invalid regex: tier")
});

static RE_RANK: LazyLock<Regex> = LazyLock::new(|| {
    let ranks = alternatives(&LeagueRank::ALL, LeagueRank::as_str);
    Regex::new(&format!("^ {}$", ranks)).expect("invalid regex: rank")
});

// " II 10 LP (Soloqueue) S13.1:"
static RE_RANK_LP_QUEUE: LazyLock<Regex> = LazyLock::new(|| {
    let ranks = alternatives(&LeagueRank::ALL, LeagueRank::as_str);
    let queues = alternatives(&Queue::ALL, Queue::as_str);
    Regex::new(&format!(r"^ {} (\d+) LP \({}\).*$", ranks, queues)).expect("invalid regex: rank lp queue")
});

// " 10 LP (Soloqueue) S13.1:"
static RE_APEX_LP_QUEUE: LazyLock<Regex> = LazyLock::new(|| {
    let queues = alternatives(&Queue::ALL, Queue::as_str);
    Regex::new(&format!(r"^ (\d+) LP \({}\).*$", queues)).expect("invalid regex: apex lp queue")
});

static RE_PLAYED: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\((\d+) Played\)$").expect("invalid regex: played")
});

static RE_PERCENTS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(\d+)% Win$").expect("invalid regex: percents")
});

// ============================================================================
// HELPERS
// ============================================================================

fn mismatch(input: &str, regex: &Regex) -> String {
    format!("{:?} didn't match /{}/", input, regex.as_str())
}

/// Capture groups 1..=N of a full match
fn captures<'t>(regex: &Regex, input: &'t str) -> Validated<Vec<&'t str>> {
    from_option(regex.captures(input), || mismatch(input, regex)).map(|caps| {
        caps.iter()
            .skip(1)
            .map(|m| m.map_or("", |m| m.as_str()))
            .collect()
    })
}

fn expected(name: &str, input: &str) -> String {
    format!("Expected {}, got: {:?}", name, input)
}

/// Unsigned integer
pub fn parse_number(input: &str) -> Validated<u32> {
    match input.trim().parse::<u32>() {
        Ok(n) => valid(n),
        Err(_) => invalid(expected("number", input)),
    }
}

/// Decimal number such as an average KDA value
pub fn parse_decimal(input: &str) -> Validated<f32> {
    match input.trim().parse::<f32>() {
        Ok(n) if n.is_finite() => valid(n),
        _ => invalid(expected("decimal", input)),
    }
}

pub fn parse_game_id(input: &str) -> Validated<GameId> {
    match input.trim().parse::<u64>() {
        Ok(id) if id > 0 => valid(GameId(id)),
        _ => invalid(expected("GameId", input)),
    }
}

pub fn parse_niceness(input: &str) -> Validated<Niceness> {
    let niceness = input
        .trim()
        .parse::<i8>()
        .ok()
        .and_then(|n| Niceness::try_from(n).ok());
    from_option(niceness, || expected("Niceness", input))
}

// ============================================================================
// WIN RATES
// ============================================================================

/// "46% Win (39 Played)"
pub fn parse_champion_win_rate(input: &str) -> Validated<WinRate> {
    // the regex guarantees digits
    captures(&RE_CHAMPION_WIN_RATE, input).and_then(|groups| {
        Validated::<()>::all((parse_number(groups[0]), parse_number(groups[1])))
            .map(|(percent, played)| WinRate { percent, played })
    })
}

/// "(109 Played)"
pub fn parse_played(input: &str) -> Validated<u32> {
    captures(&RE_PLAYED, input).and_then(|groups| parse_number(groups[0]))
}

/// "58% Win"
pub fn parse_percents(input: &str) -> Validated<u32> {
    captures(&RE_PERCENTS, input).and_then(|groups| parse_number(groups[0]))
}

// ============================================================================
// TIERS AND RANKS
// ============================================================================

/// Ranked title decoded into queue, tier, rank and league points
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QueueTierRankLeaguePoints {
    pub queue: Queue,
    pub tier_rank: TierRank,
    pub league_points: u32,
}

/// Splits the leading tier keyword (any case) from the rest of the text.
pub fn parse_tier(input: &str) -> Validated<(LeagueTier, &str)> {
    from_option(RE_TIER.captures(input), || mismatch(input, &RE_TIER)).and_then(|caps| {
        let keyword = caps.get(1).map_or("", |m| m.as_str());
        let rest = caps.get(2).map_or("", |m| m.as_str());
        from_option(keyword.parse::<LeagueTier>().ok(), || expected("LeagueTier", keyword))
            .map(|tier| (tier, rest))
    })
}

fn parse_rank(input: &str) -> Validated<LeagueRank> {
    from_option(input.parse::<LeagueRank>().ok(), || expected("LeagueRank", input))
}

fn parse_queue(input: &str) -> Validated<Queue> {
    from_option(input.parse::<Queue>().ok(), || expected("Queue", input))
}

/// "Emerald II" or "GrandMaster"; apex tiers are never matched against a rank
pub fn parse_tier_rank(input: &str) -> Validated<TierRank> {
    parse_tier(input).and_then(|(tier, rest)| {
        if tier.is_apex() {
            return valid(TierRank::apex(tier));
        }
        captures(&RE_RANK, rest)
            .and_then(|groups| parse_rank(groups[0]))
            .map(|rank| TierRank::new(tier, rank))
    })
}

/// "Emerald II 10 LP (Soloqueue) S13.1:" or "GrandMaster 10 LP (Soloqueue) S13.1:"
pub fn parse_queue_tier_rank_league_points(input: &str) -> Validated<QueueTierRankLeaguePoints> {
    parse_tier(input).and_then(|(tier, rest)| {
        if tier.is_apex() {
            return captures(&RE_APEX_LP_QUEUE, rest).and_then(|groups| {
                Validated::<()>::all((parse_number(groups[0]), parse_queue(groups[1]))).map(
                    |(league_points, queue)| QueueTierRankLeaguePoints {
                        queue,
                        tier_rank: TierRank::apex(tier),
                        league_points,
                    },
                )
            });
        }

        captures(&RE_RANK_LP_QUEUE, rest).and_then(|groups| {
            Validated::<()>::all((parse_rank(groups[0]), parse_number(groups[1]), parse_queue(groups[2]))).map(
                |(rank, league_points, queue)| QueueTierRankLeaguePoints {
                    queue,
                    tier_rank: TierRank::new(tier, rank),
                    league_points,
                },
            )
        })
    })
}

// ============================================================================
// LANES
// ============================================================================

pub fn parse_lane(input: &str) -> Validated<Lane> {
    from_option(input.parse::<Lane>().ok(), || expected("Lane", input))
}

/// "Top, Jungler": non-empty, separated by ", "
pub fn parse_lanes(input: &str) -> Validated<Vec<Lane>> {
    traverse(input.split(", "), parse_lane)
}
