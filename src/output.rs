use std::error::Error;
use std::fs::File;
use std::path::Path;

use crate::models::{League, LiveGame, ParsedPage, Participant};

/// Used when `--csv` is given without a path
pub const CSV_OUTPUT_FILE: &str = "participants.csv";

// ============================================================================
// FORMATTING HELPERS
// ============================================================================

fn league_summary(league: Option<&League>) -> String {
    match league {
        None => "Unranked".to_string(),
        Some(l) => format!(
            "{} {} LP ({}% / {})",
            l.tier_rank, l.league_points, l.win_rate.percent, l.win_rate.played
        ),
    }
}

fn champion_summary(participant: &Participant) -> String {
    match &participant.champion {
        None => "0 played".to_string(),
        Some(c) => format!(
            "{}% / {} played, {:.1}/{:.1}/{:.1}",
            c.win_rate_percent, c.games_played, c.kills, c.deaths, c.assists
        ),
    }
}

fn positions(participant: &Participant) -> String {
    participant
        .main_roles
        .iter()
        .map(|p| p.as_str())
        .collect::<Vec<_>>()
        .join("/")
}

// ============================================================================
// CONSOLE OUTPUT
// ============================================================================

/// Prints both teams to stdout
pub fn print_live_game(game: &LiveGame) {
    println!("\nGame {}", game.game_id);

    for (team, participants) in &game.participants {
        println!("\nTeam {}", team);
        println!("{:-<100}", "");

        for participant in participants {
            let premade = participant
                .premade_id
                .map(|id| format!("[{}]", id))
                .unwrap_or_default();
            let role = participant.role.map(|r| r.as_str()).unwrap_or("?");

            println!(
                "{:4} {:20} lvl {:4} {:4} {:28} {}",
                premade,
                participant.summoner_name,
                participant.summoner_level,
                role,
                league_summary(participant.leagues.solo_duo.as_ref()),
                champion_summary(participant)
            );

            if !participant.tags.is_empty() {
                let labels: Vec<_> = participant.tags.iter().map(|t| t.label.as_str()).collect();
                println!("     Tags: {}", labels.join(", "));
            }
        }
    }
}

pub fn print_parsed_page(page: &ParsedPage) {
    match page {
        ParsedPage::NoActiveGame => println!("Summoner is not in game"),
        ParsedPage::ActiveGameFound(game) => print_live_game(game),
    }
}

// ============================================================================
// CSV OUTPUT
// ============================================================================

/// Writes one row per participant
pub fn write_participants_csv(games: &[LiveGame], path: &Path) -> Result<(), Box<dyn Error>> {
    let file = File::create(path)?;
    let mut writer = csv::Writer::from_writer(file);

    writer.write_record([
        "game_id", "team", "index", "summoner_name", "summoner_level", "premade_id",
        "role", "main_roles", "solo_duo", "flex", "champion_win_rate", "champion_played",
        "kills", "deaths", "assists", "tags",
    ])?;

    for game in games {
        for (team, participants) in &game.participants {
            for (i, p) in participants.iter().enumerate() {
                let (win_rate, played, kills, deaths, assists) = match &p.champion {
                    Some(c) => (
                        c.win_rate_percent.to_string(),
                        c.games_played.to_string(),
                        c.kills.to_string(),
                        c.deaths.to_string(),
                        c.assists.to_string(),
                    ),
                    None => (String::new(), "0".to_string(), String::new(), String::new(), String::new()),
                };

                let row: Vec<String> = vec![
                    game.game_id.to_string(),
                    team.to_string(),
                    i.to_string(),
                    p.summoner_name.clone(),
                    p.summoner_level.to_string(),
                    p.premade_id.map(|id| id.to_string()).unwrap_or_default(),
                    p.role.map(|r| r.as_str().to_string()).unwrap_or_default(),
                    positions(p),
                    p.leagues.solo_duo.as_ref().map(|l| league_summary(Some(l))).unwrap_or_default(),
                    p.leagues.flex.as_ref().map(|l| league_summary(Some(l))).unwrap_or_default(),
                    win_rate,
                    played,
                    kills,
                    deaths,
                    assists,
                    p.tags.iter().map(|t| t.label.as_str()).collect::<Vec<_>>().join(" | "),
                ];
                writer.write_record(&row)?;
            }
        }
    }

    writer.flush()?;
    tracing::info!("Participants written to {}", path.display());
    Ok(())
}

// ============================================================================
// JSON OUTPUT
// ============================================================================

pub fn to_json(page: &ParsedPage) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(page)
}

/// One JSON array for several pages
pub fn to_json_all(pages: &[ParsedPage]) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(pages)
}
