pub mod client;
pub mod config;
pub mod decoders;
pub mod dom;
pub mod error;
pub mod models;
pub mod output;
pub mod page;
pub mod participant;
pub mod service;
pub mod store;
pub mod validated;

// ============================================================================
// PUBLIC API RE-EXPORTS
// ============================================================================
pub use client::{live_page_url, LiveGameClient, LivePageSource};
pub use config::ScraperConfig;
pub use error::ScrapeError;
pub use models::{
    ChampionPosition, ChampionStats, GameId, Lane, League, LeagueRank, LeagueTier, Leagues, LiveGame,
    Niceness, ParsedPage, Participant, Platform, Queue, StoredLiveGame, Tag, TeamId, TeamParticipants,
    TierRank, WinRate,
};
pub use output::{print_live_game, print_parsed_page, to_json, to_json_all, write_participants_csv, CSV_OUTPUT_FILE};
pub use page::{is_not_in_game, parse_live_game_page};
pub use service::{LiveGameService, MIN_EVICTION_INTERVAL};
pub use store::{InMemoryLiveGameStore, LiveGameStore};
pub use validated::{Validated, ValidatedExt, ValidationErrors};

// ============================================================================
// MAIN ENTRY POINT
// ============================================================================

/// Parses a live game page, failing with every defect as [`ScrapeError::MalformedPage`]
pub fn parse_page(html: &str) -> Result<ParsedPage, ScrapeError> {
    Ok(parse_live_game_page(html).into_result()?)
}

/// Fetches and parses the live game page of one summoner, without caching
pub async fn scrape(
    client: &LiveGameClient,
    platform: Platform,
    summoner_name: &str,
) -> Result<ParsedPage, ScrapeError> {
    let html = client.fetch_live_page(platform, summoner_name).await?;
    parse_page(&html)
}
