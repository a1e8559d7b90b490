mod common;

use common::{default_page, default_team, page_html, CardFixture};
use live_game_scraper::{
    parse_live_game_page, parse_page, ChampionPosition, GameId, LeagueRank, LeagueTier, LiveGame, Niceness,
    ParsedPage, ScrapeError, TeamId, TierRank, ValidatedExt, ValidationErrors,
};

fn parse_game(html: &str) -> LiveGame {
    match parse_live_game_page(html).into_result() {
        Ok(ParsedPage::ActiveGameFound(game)) => game,
        Ok(ParsedPage::NoActiveGame) => panic!("Expected a game, got NoActiveGame"),
        Err(e) => panic!("Expected a game, got errors:\n{}", e),
    }
}

fn parse_errors(html: &str) -> ValidationErrors {
    match parse_live_game_page(html).into_result() {
        Err(e) => e,
        Ok(page) => panic!("Expected errors, got {:?}", page),
    }
}

// ============================================================================
// NOT IN GAME
// ============================================================================

#[test]
fn test_not_in_game_short_circuits_malformed_html() {
    let html = "<div><p>The summoner is not in-game, please retry later<ul class=";
    assert_eq!(parse_page(html).unwrap(), ParsedPage::NoActiveGame);
}

#[test]
fn test_summoner_not_found() {
    let html = format!("{}<p>Summoner not found</p>", default_page());
    assert_eq!(parse_page(&html).unwrap(), ParsedPage::NoActiveGame);
}

// ============================================================================
// WELL FORMED PAGES
// ============================================================================

#[test]
fn test_two_full_teams_in_document_order() {
    let game = parse_game(&default_page());

    assert_eq!(game.game_id, GameId(6543210987));
    assert_eq!(game.participant_count(), 10);

    let blue: Vec<_> = game.team(TeamId::Blue).iter().map(|p| p.summoner_name.as_str()).collect();
    let red: Vec<_> = game.team(TeamId::Red).iter().map(|p| p.summoner_name.as_str()).collect();
    assert_eq!(blue, vec!["Blue1", "Blue2", "Blue3", "Blue4", "Blue5"]);
    assert_eq!(red, vec!["Red1", "Red2", "Red3", "Red4", "Red5"]);
}

#[test]
fn test_participant_fields() {
    let mut card = CardFixture::new("Faker");
    card.premade = Some("2".to_string());
    card.previous_season = Some("Diamond IV".to_string());
    card.other_league_title = Some("GrandMaster 321 LP (Flex)".to_string());
    card.role = "AD Carry".to_string();
    card.main_roles = "AD Carry, Support".to_string();
    card.tags = vec![
        ("1".to_string(), "On fire".to_string(), "Won 8 of last 10".to_string()),
        ("-1".to_string(), "Tilted".to_string(), "Lost 5 in a row".to_string()),
    ];

    let mut blue = default_team("Blue");
    blue[0] = card;
    let game = parse_game(&page_html("42", &[blue, default_team("Red")]));
    let faker = &game.team(TeamId::Blue)[0];

    assert_eq!(faker.summoner_name, "Faker");
    assert_eq!(faker.premade_id, Some(2));
    assert_eq!(faker.summoner_level, 312);

    let champion = faker.champion.as_ref().expect("champion stats");
    assert_eq!(champion.win_rate_percent, 46);
    assert_eq!(champion.games_played, 39);
    assert_eq!(champion.kills, 4.2);
    assert_eq!(champion.deaths, 3.1);
    assert_eq!(champion.assists, 7.5);

    let solo = faker.leagues.solo_duo.as_ref().expect("solo/duo league");
    assert_eq!(solo.tier_rank, TierRank::new(LeagueTier::Emerald, LeagueRank::II));
    assert_eq!(solo.league_points, 10);
    assert_eq!(solo.win_rate.percent, 58);
    assert_eq!(solo.win_rate.played, 109);
    assert_eq!(solo.previous_season, Some(TierRank::new(LeagueTier::Diamond, LeagueRank::IV)));

    let flex = faker.leagues.flex.as_ref().expect("flex league");
    assert_eq!(flex.tier_rank.tier, LeagueTier::Grandmaster);
    assert_eq!(flex.tier_rank.rank, None);
    assert_eq!(flex.league_points, 321);
    assert_eq!(flex.win_rate.played, 45);
    assert_eq!(flex.previous_season, None);

    assert_eq!(faker.role, Some(ChampionPosition::Bot));
    assert_eq!(faker.main_roles, vec![ChampionPosition::Bot, ChampionPosition::Sup]);

    assert_eq!(faker.tags.len(), 2);
    assert_eq!(faker.tags[0].niceness, Niceness::Good);
    assert_eq!(faker.tags[0].label, "On fire");
    assert_eq!(faker.tags[0].tooltip, "Won 8 of last 10");
    assert_eq!(faker.tags[1].niceness, Niceness::Bad);

    let other = &game.team(TeamId::Blue)[1];
    assert_eq!(other.premade_id, None);
    assert!(other.tags.is_empty());
    assert!(other.leagues.flex.is_none());
}

#[test]
fn test_zero_played_champion_ignores_broken_kda() {
    let mut card = CardFixture::new("Newbie");
    card.champion_title = "0 Played".to_string();
    card.kda = ["-".to_string(), "?".to_string(), "n/a".to_string()];

    let mut blue = default_team("Blue");
    blue[3] = card;
    let game = parse_game(&page_html("42", &[blue, default_team("Red")]));

    assert_eq!(game.team(TeamId::Blue)[3].champion, None);
}

#[test]
fn test_unranked_and_unknown_are_absent_not_errors() {
    let mut card = CardFixture::new("Smurf");
    card.main_league_title = "Unranked".to_string();
    card.main_league_win_rate = ("garbage".to_string(), "garbage".to_string());
    card.other_league_title = Some("Unranked".to_string());
    card.role = "Unknown".to_string();
    card.main_roles = "Unknown".to_string();

    let game = parse_game(&page_html("42", &[vec![card], default_team("Red")]));
    let smurf = &game.team(TeamId::Blue)[0];

    assert!(smurf.leagues.solo_duo.is_none());
    assert!(smurf.leagues.flex.is_none());
    assert_eq!(smurf.role, None);
    assert!(smurf.main_roles.is_empty());
}

#[test]
fn test_flex_only_in_main_block() {
    let mut card = CardFixture::new("FlexPlayer");
    card.main_league_title = "Silver I 55 LP (Flex)".to_string();

    let game = parse_game(&page_html("42", &[vec![card], default_team("Red")]));
    let leagues = &game.team(TeamId::Blue)[0].leagues;

    assert!(leagues.solo_duo.is_none());
    assert_eq!(
        leagues.flex.as_ref().map(|l| l.tier_rank),
        Some(TierRank::new(LeagueTier::Silver, LeagueRank::I))
    );
}

#[test]
fn test_empty_team_is_left_out() {
    let game = parse_game(&page_html("42", &[default_team("Blue"), Vec::new()]));
    assert_eq!(game.team(TeamId::Blue).len(), 5);
    assert!(!game.participants.contains_key(&TeamId::Red));
}

#[test]
fn test_other_rankings_block_is_optional() {
    let card = CardFixture::new("SoloOnly");
    assert!(card.other_league_title.is_none());

    let game = parse_game(&page_html("42", &[vec![card], default_team("Red")]));
    let leagues = &game.team(TeamId::Blue)[0].leagues;
    assert!(leagues.solo_duo.is_some());
    assert!(leagues.flex.is_none());
}

#[test]
fn test_apex_previous_season_badge() {
    let mut card = CardFixture::new("FormerMaster");
    card.previous_season = Some("Master".to_string());

    let game = parse_game(&page_html("42", &[vec![card], default_team("Red")]));
    let solo = game.team(TeamId::Blue)[0].leagues.solo_duo.clone().expect("solo/duo league");
    assert_eq!(solo.previous_season, Some(TierRank::apex(LeagueTier::Master)));
    assert_eq!(solo.tier_rank, TierRank::new(LeagueTier::Emerald, LeagueRank::II));
}

// ============================================================================
// ERROR ACCUMULATION
// ============================================================================

#[test]
fn test_more_than_two_teams() {
    let html = page_html("42", &[default_team("A"), default_team("B"), default_team("C")]);
    let errors = parse_errors(&html);

    assert!(errors.contains("Got more than 2 teams"));
    assert_eq!(errors.len(), 1);
}

#[test]
fn test_missing_teams_are_reported_per_team() {
    let errors = parse_errors(&page_html("42", &[]));
    assert_eq!(errors.clone().into_vec(), vec!["Team 100 Not found", "Team 200 Not found"]);
}

#[test]
fn test_two_broken_fields_give_two_prefixed_errors() {
    let mut card = CardFixture::new("Broken");
    card.level = None;
    card.main_league_title = "Wood II 10 LP (Soloqueue)".to_string();

    let mut blue = default_team("Blue");
    blue[2] = card;
    let errors = parse_errors(&page_html("42", &[blue, default_team("Red")]));
    let lines = errors.into_vec();

    assert_eq!(lines.len(), 2, "{:?}", lines);
    assert_eq!(lines[0], "Team 100 [2] Element not found: .championBox .level");
    assert!(
        lines[1].starts_with(r#"Team 100 [2] .rankingsBox > .imgFlex: "Wood II 10 LP (Soloqueue)" didn't match"#),
        "{}",
        lines[1]
    );
}

#[test]
fn test_errors_across_teams_and_game_id() {
    let mut blue = default_team("Blue");
    blue[0].level = Some("abc".to_string());
    let mut red = default_team("Red");
    red[4].tags = vec![("7".to_string(), "Odd".to_string(), "tooltip".to_string())];

    let html = page_html("not-a-number", &[blue, red]);
    let lines = parse_errors(&html).into_vec();

    assert_eq!(
        lines,
        vec![
            r#"Expected GameId, got: "not-a-number""#.to_string(),
            r#"Team 100 [0] .championBox .level: Expected number, got: "abc""#.to_string(),
            r#"Team 200 [4] .tags-box > tag [0]: Expected Niceness, got: "7""#.to_string(),
        ]
    );
}

#[test]
fn test_main_rankings_block_is_required() {
    let mut card = CardFixture::new("NoRanking");
    card.main_league = false;
    card.other_league_title = Some("Gold IV 0 LP (Flex)".to_string());

    let errors = parse_errors(&page_html("42", &[vec![card], default_team("Red")]));
    assert_eq!(errors.into_vec(), vec!["Team 100 [0] Element not found: .rankingsBox > .imgFlex"]);
}

#[test]
fn test_previous_season_badge_without_alt() {
    let mut card = CardFixture::new("NoAlt");
    card.previous_season = Some("Diamond IV".to_string());
    let html = page_html("42", &[vec![card], default_team("Red")]).replace(r#" alt="Diamond IV""#, "");

    let errors = parse_errors(&html);
    assert_eq!(
        errors.into_vec(),
        vec![r#"Team 100 [0] .rankingsBox > .imgFlex: No attribute "alt" for .inlinePreviousSeasonRanking > img"#]
    );
}

#[test]
fn test_missing_spectate_button() {
    let html = default_page().replace("spectate_button", "other_button");
    let errors = parse_errors(&html);
    assert_eq!(errors.first(), "Element not found: #spectate_button");
}

#[test]
fn test_missing_summoner_name_and_bad_role() {
    let mut card = CardFixture::new("X");
    card.role = "Roamer".to_string();
    let html = page_html("42", &[vec![card], default_team("Red")]).replace("data-summonername=\"X\"", "");

    let lines = parse_errors(&html).into_vec();
    assert_eq!(
        lines,
        vec![
            "Team 100 [0] data-summonername not found".to_string(),
            r#"Team 100 [0] .rolesBox > .imgFlex > .txt > .title: Expected Lane, got: "Roamer""#.to_string(),
        ]
    );
}

#[test]
fn test_error_report_is_newline_joined() {
    let errors = parse_errors(&page_html("42", &[]));
    assert_eq!(errors.to_string(), "Team 100 Not found\nTeam 200 Not found");
}

#[test]
fn test_malformed_page_error_prints_every_defect() {
    let err = parse_page(&page_html("42", &[])).unwrap_err();
    assert!(matches!(err, ScrapeError::MalformedPage(_)));
    assert_eq!(
        err.to_string(),
        "Malformed live game page:\nTeam 100 Not found\nTeam 200 Not found"
    );
}
