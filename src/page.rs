use scraper::Html;

use crate::decoders::parse_game_id;
use crate::dom::{dataset_get, element_by_id, select_all_in};
use crate::models::{GameId, LiveGame, ParsedPage, TeamId, TeamParticipants};
use crate::participant::parse_team;
use crate::validated::{invalid, valid, Validated};

// ============================================================================
// PAGE MARKERS
// ============================================================================

/// Substrings porofessor renders instead of a live game
pub const NOT_IN_GAME_MARKERS: [&str; 2] = ["The summoner is not in-game", "Summoner not found"];

const SPECTATE_BUTTON: &str = "spectate_button";
const SPECTATE_GAME_ID: &str = "spectate-gameid";
const CARDS_LIST: &str = "div.site-content > ul.cards-list";

// ============================================================================
// ENTRY POINT
// ============================================================================

/// True when the page says the summoner has no running game
pub fn is_not_in_game(html: &str) -> bool {
    NOT_IN_GAME_MARKERS.iter().any(|marker| html.contains(marker))
}

/// Parses a porofessor live game fragment.
///
/// The "not in game" check runs on the raw text before the DOM is built, so a
/// page carrying one of [`NOT_IN_GAME_MARKERS`] is `NoActiveGame` even if the rest
/// of it is malformed. Otherwise the result is either the complete game or every
/// error found anywhere in the page.
pub fn parse_live_game_page(html: &str) -> Validated<ParsedPage> {
    if is_not_in_game(html) {
        return valid(ParsedPage::NoActiveGame);
    }

    let document = Html::parse_document(html);
    Validated::<()>::all((parse_game_id_from(&document), parse_participants(&document)))
        .map(|(game_id, participants)| ParsedPage::ActiveGameFound(LiveGame { game_id, participants }))
}

fn parse_game_id_from(document: &Html) -> Validated<GameId> {
    element_by_id(document, SPECTATE_BUTTON)
        .and_then(|button| dataset_get(button, SPECTATE_GAME_ID))
        .and_then(|id| parse_game_id(&id))
}

fn parse_participants(document: &Html) -> Validated<TeamParticipants> {
    select_all_in(document, CARDS_LIST).and_then(|lists| {
        let mut lists = lists.into_iter();
        let blue = lists.next();
        let red = lists.next();
        let extra = if lists.next().is_none() {
            valid(())
        } else {
            invalid(format!("Got more than 2 teams {}", CARDS_LIST))
        };

        Validated::<()>::all((parse_team(TeamId::Blue, blue), parse_team(TeamId::Red, red), extra)).map(
            |(blue, red, ())| {
                let mut teams = TeamParticipants::new();
                for (team, participants) in [(TeamId::Blue, blue), (TeamId::Red, red)] {
                    if !participants.is_empty() {
                        teams.insert(team, participants);
                    }
                }
                teams
            },
        )
    })
}
