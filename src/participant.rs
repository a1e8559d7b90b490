use scraper::ElementRef;

use crate::decoders::{
    parse_champion_win_rate, parse_decimal, parse_lane, parse_lanes, parse_niceness, parse_number,
    parse_percents, parse_played, parse_queue_tier_rank_league_points, parse_tier_rank,
};
use crate::dom::{
    attr_get, dataset_get, first_child_text, last_child_text, select_all, select_ensure_one,
    select_ensure_one_text, select_nullable, text_content,
};
use crate::models::{
    ChampionPosition, ChampionStats, League, Leagues, Participant, Queue, Tag, TeamId, TierRank, WinRate,
};
use crate::validated::{from_option, invalid, traverse_with_index, valid, Validated, ValidatedExt};

// ============================================================================
// PAGE MARKERS
// ============================================================================

const ZERO_PLAYED: &str = "0 Played";
const UNRANKED: &str = "Unranked";
const UNKNOWN_LANE: &str = "Unknown";

const PARTICIPANT: &str = ":scope > li > div";
const PREMADE: &str = ".premadeHistoryTagContainer > div";
const CHAMPION_LEVEL: &str = ".championBox .level";
const CHAMPION_TITLE: &str = ".championBox > .imgFlex > .txt > .title";
const CHAMPION_KDA: &str = ".championBox > .imgFlex > .txt > .content";
const MAIN_LEAGUE: &str = ".rankingsBox > .imgFlex";
const OTHER_LEAGUE: &str = ".rankingsBox .rankingOtherRankings > .imgFlex";
const LEAGUE_TITLE: &str = ":scope > .txt > .title";
const LEAGUE_ONE_LINER: &str = ":scope > .txt > .content > .oneLiner";
const LEAGUE_PERCENTS: &str = ":scope > .txt > .content > .oneLiner > .highlight";
const PREVIOUS_SEASON: &str = ".inlinePreviousSeasonRanking > img";
const ROLE_TITLE: &str = ".rolesBox > .imgFlex > .txt > .title";
const ROLES_HIGHLIGHT: &str = ".rolesBox > .imgFlex > .txt > .content > .highlight";
const TAG: &str = ".tags-box > tag";
const TAG_DIV: &str = "div.tag";
const TAG_NICENESS_ATTR: &str = "data-tag-niceness";
const TOOLTIP_ATTR: &str = "tooltip";

// ============================================================================
// TEAMS
// ============================================================================

/// Parses every participant of one `ul.cards-list`; errors are prefixed `Team <id> `
pub fn parse_team(team: TeamId, cards_list: Option<ElementRef<'_>>) -> Validated<Vec<Participant>> {
    let participants = match cards_list {
        None => invalid("Not found"),
        Some(list) => {
            select_all(list, PARTICIPANT).and_then(|found| traverse_with_index(found, parse_participant))
        }
    };
    participants.prefix_errors(&format!("Team {} ", team))
}

// ============================================================================
// PARTICIPANT
// ============================================================================

/// Decodes every field of one participant card; errors are prefixed `[<index>] `
pub fn parse_participant(index: usize, participant: ElementRef<'_>) -> Validated<Participant> {
    let identity = Validated::<()>::all((
        parse_premade_id(participant),
        dataset_get(participant, "summonername"),
        parse_summoner_level(participant),
        parse_champion(participant),
    ));
    let ranking = Validated::<()>::all((
        parse_leagues(participant),
        parse_role(participant),
        parse_main_roles(participant),
        parse_tags(participant),
    ));

    Validated::<()>::all((identity, ranking))
        .map(
            |((premade_id, summoner_name, summoner_level, champion), (leagues, role, main_roles, tags))| {
                Participant {
                    premade_id,
                    summoner_name,
                    summoner_level,
                    champion,
                    leagues,
                    role,
                    main_roles,
                    tags,
                }
            },
        )
        .prefix_errors(&format!("[{}] ", index))
}

fn parse_premade_id(participant: ElementRef<'_>) -> Validated<Option<u32>> {
    select_nullable(participant, PREMADE).and_then(|premade| match premade {
        None => valid(None),
        Some(div) => parse_number(&text_content(div))
            .map(Some)
            .prefix_errors(&format!("{}: ", PREMADE)),
    })
}

fn parse_summoner_level(participant: ElementRef<'_>) -> Validated<u32> {
    select_ensure_one_text(participant, CHAMPION_LEVEL)
        .and_then(|level| parse_number(&level).prefix_errors(&format!("{}: ", CHAMPION_LEVEL)))
}

// ============================================================================
// CHAMPION
// ============================================================================

/// `None` when the card shows "0 Played"; the KDA markup is then ignored
fn parse_champion(participant: ElementRef<'_>) -> Validated<Option<ChampionStats>> {
    select_ensure_one_text(participant, CHAMPION_TITLE).and_then(|title| {
        if title == ZERO_PLAYED {
            return valid(None);
        }

        Validated::<()>::all((
            parse_champion_win_rate(&title).prefix_errors(&format!("{}: ", CHAMPION_TITLE)),
            parse_kda(participant, "kills"),
            parse_kda(participant, "deaths"),
            parse_kda(participant, "assists"),
        ))
        .map(|(win_rate, kills, deaths, assists)| {
            Some(ChampionStats {
                win_rate_percent: win_rate.percent,
                games_played: win_rate.played,
                kills,
                deaths,
                assists,
            })
        })
    })
}

fn parse_kda(participant: ElementRef<'_>, class_name: &str) -> Validated<f32> {
    let selector = format!("{} .{}", CHAMPION_KDA, class_name);
    select_ensure_one_text(participant, &selector)
        .and_then(|value| parse_decimal(&value).prefix_errors(&format!("{}: ", selector)))
}

// ============================================================================
// LEAGUES
// ============================================================================

fn parse_leagues(participant: ElementRef<'_>) -> Validated<Leagues> {
    let main = select_ensure_one(participant, MAIN_LEAGUE)
        .and_then(|block| parse_league_block(block, MAIN_LEAGUE));
    let other = select_nullable(participant, OTHER_LEAGUE).and_then(|block| match block {
        None => valid(None),
        Some(block) => parse_league_block(block, OTHER_LEAGUE),
    });

    Validated::<()>::all((main, other)).map(|(main, other)| {
        let found: Vec<(Queue, League)> = main.into_iter().chain(other).collect();
        Leagues {
            solo_duo: find_league(&found, Queue::Soloqueue),
            flex: find_league(&found, Queue::Flex),
        }
    })
}

fn find_league(leagues: &[(Queue, League)], queue: Queue) -> Option<League> {
    leagues
        .iter()
        .find(|(q, _)| *q == queue)
        .map(|(_, league)| league.clone())
}

/// `None` when the block title reads "Unranked"
fn parse_league_block(block: ElementRef<'_>, selector: &str) -> Validated<Option<(Queue, League)>> {
    let league = select_ensure_one_text(block, LEAGUE_TITLE).and_then(|title| {
        if title == UNRANKED {
            return valid(None);
        }

        Validated::<()>::all((
            parse_queue_tier_rank_league_points(&title),
            parse_league_win_rate(block),
            parse_previous_season(block),
        ))
        .map(|(ranked, win_rate, previous_season)| {
            Some((
                ranked.queue,
                League {
                    tier_rank: ranked.tier_rank,
                    league_points: ranked.league_points,
                    win_rate,
                    previous_season,
                },
            ))
        })
    });
    league.prefix_errors(&format!("{}: ", selector))
}

fn parse_league_win_rate(block: ElementRef<'_>) -> Validated<WinRate> {
    let played = select_ensure_one(block, LEAGUE_ONE_LINER).and_then(|one_liner| {
        from_option(last_child_text(one_liner), || {
            format!("Element \"{}\" has no textContent", LEAGUE_ONE_LINER)
        })
        .and_then(|text| parse_played(&text))
    });
    let percent = select_ensure_one_text(block, LEAGUE_PERCENTS).and_then(|p| parse_percents(&p));

    Validated::<()>::all((played, percent)).map(|(played, percent)| WinRate { percent, played })
}

/// Badge is optional; its `alt` reads like "Emerald II"
fn parse_previous_season(block: ElementRef<'_>) -> Validated<Option<TierRank>> {
    select_nullable(block, PREVIOUS_SEASON).and_then(|badge| match badge {
        None => valid(None),
        Some(img) => attr_get(img, "alt", PREVIOUS_SEASON)
            .and_then(|alt| parse_tier_rank(&alt))
            .map(Some),
    })
}

// ============================================================================
// ROLES
// ============================================================================

fn parse_role(participant: ElementRef<'_>) -> Validated<Option<ChampionPosition>> {
    select_nullable(participant, ROLE_TITLE)
        .and_then(|title| {
            from_option(title.and_then(first_child_text), || {
                format!("Element \"{}\" has no textContent", ROLE_TITLE)
            })
        })
        .and_then(|lane| {
            if lane == UNKNOWN_LANE {
                return valid(None);
            }
            parse_lane(&lane)
                .map(|l| Some(l.position()))
                .prefix_errors(&format!("{}: ", ROLE_TITLE))
        })
}

fn parse_main_roles(participant: ElementRef<'_>) -> Validated<Vec<ChampionPosition>> {
    select_ensure_one_text(participant, ROLES_HIGHLIGHT)
        .and_then(|lanes| {
            if lanes == UNKNOWN_LANE {
                return valid(Vec::new());
            }
            parse_lanes(&lanes).map(|lanes| lanes.iter().map(|l| l.position()).collect())
        })
        .prefix_errors(&format!("{}: ", ROLES_HIGHLIGHT))
}

// ============================================================================
// TAGS
// ============================================================================

fn parse_tags(participant: ElementRef<'_>) -> Validated<Vec<Tag>> {
    select_all(participant, TAG).and_then(|tags| {
        traverse_with_index(tags, |i, tag| {
            let niceness = attr_get(tag, TAG_NICENESS_ATTR, TAG).and_then(|n| parse_niceness(&n));
            let label_tooltip = select_ensure_one(tag, TAG_DIV).and_then(|div| {
                attr_get(div, TOOLTIP_ATTR, &format!("{} {}", TAG, TAG_DIV))
                    .map(|tooltip| (text_content(div), tooltip))
            });

            Validated::<()>::all((niceness, label_tooltip))
                .map(|(niceness, (label, tooltip))| Tag { niceness, label, tooltip })
                .prefix_errors(&format!("{} [{}]: ", TAG, i))
        })
    })
}
