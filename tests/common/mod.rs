#![allow(dead_code)]

/// What the fixture renders for one participant card
#[derive(Debug, Clone)]
pub struct CardFixture {
    pub summoner_name: String,
    pub premade: Option<String>,
    pub level: Option<String>,
    pub champion_title: String,
    pub kda: [String; 3],
    pub main_league: bool,
    pub main_league_title: String,
    pub main_league_win_rate: (String, String),
    pub previous_season: Option<String>,
    pub other_league_title: Option<String>,
    pub role: String,
    pub main_roles: String,
    pub tags: Vec<(String, String, String)>,
}

impl CardFixture {
    pub fn new(summoner_name: &str) -> Self {
        CardFixture {
            summoner_name: summoner_name.to_string(),
            premade: None,
            level: Some("312".to_string()),
            champion_title: "46% Win (39 Played)".to_string(),
            kda: ["4.2".to_string(), "3.1".to_string(), "7.5".to_string()],
            main_league: true,
            main_league_title: "Emerald II 10 LP (Soloqueue)".to_string(),
            main_league_win_rate: ("58% Win".to_string(), "(109 Played)".to_string()),
            previous_season: None,
            other_league_title: None,
            role: "Mid".to_string(),
            main_roles: "Mid, Top".to_string(),
            tags: Vec::new(),
        }
    }

    pub fn html(&self) -> String {
        let premade = self
            .premade
            .as_ref()
            .map(|p| format!(r#"<div class="premadeHistoryTagContainer"><div>{}</div></div>"#, p))
            .unwrap_or_default();

        let level = self
            .level
            .as_ref()
            .map(|l| format!(r#"<div class="level">{}</div>"#, l))
            .unwrap_or_default();

        let previous_season = self
            .previous_season
            .as_ref()
            .map(|alt| {
                format!(
                    r#" <span class="inlinePreviousSeasonRanking">S13.1: <img src="tier.png" alt="{}"></span>"#,
                    alt
                )
            })
            .unwrap_or_default();

        let main_league = if self.main_league {
            format!(
                r#"<div class="imgFlex"><div class="txt">
                    <div class="title">{}{}</div>
                    <div class="content"><div class="oneLiner"><span class="highlight">{}</span> {}</div></div>
                </div></div>"#,
                self.main_league_title, previous_season, self.main_league_win_rate.0, self.main_league_win_rate.1
            )
        } else {
            String::new()
        };

        let other_league = self
            .other_league_title
            .as_ref()
            .map(|title| {
                format!(
                    r#"<div class="rankingOtherRankings"><div class="imgFlex"><div class="txt">
                        <div class="title">{}</div>
                        <div class="content"><div class="oneLiner"><span class="highlight">51% Win</span> (45 Played)</div></div>
                    </div></div></div>"#,
                    title
                )
            })
            .unwrap_or_default();

        let tags: String = self
            .tags
            .iter()
            .map(|(niceness, label, tooltip)| {
                format!(
                    r#"<tag data-tag-niceness="{}"><div class="tag" tooltip="{}">{}</div></tag>"#,
                    niceness, tooltip, label
                )
            })
            .collect();

        format!(
            r#"<li><div class="card" data-summonername="{name}">
                {premade}
                <div class="championBox"><div class="imgFlex">
                    <div class="imgColumn">{level}</div>
                    <div class="txt">
                        <div class="title">{champion_title}</div>
                        <div class="content"><span class="kills">{kills}</span> / <span class="deaths">{deaths}</span> / <span class="assists">{assists}</span></div>
                    </div>
                </div></div>
                <div class="rankingsBox">
                    {main_league}
                    {other_league}
                </div>
                <div class="rolesBox"><div class="imgFlex"><div class="txt">
                    <div class="title">{role}<span class="sub">Role</span></div>
                    <div class="content"><span class="highlight">{main_roles}</span></div>
                </div></div></div>
                <div class="tags-box">{tags}</div>
            </div></li>"#,
            name = self.summoner_name,
            premade = premade,
            level = level,
            champion_title = self.champion_title,
            kills = self.kda[0],
            deaths = self.kda[1],
            assists = self.kda[2],
            main_league = main_league,
            other_league = other_league,
            role = self.role,
            main_roles = self.main_roles,
            tags = tags,
        )
    }
}

pub fn team_html(cards: &[CardFixture]) -> String {
    let items: String = cards.iter().map(CardFixture::html).collect();
    format!(r#"<ul class="cards-list">{}</ul>"#, items)
}

pub fn page_html(game_id: &str, teams: &[Vec<CardFixture>]) -> String {
    let lists: String = teams.iter().map(|t| team_html(t)).collect();
    format!(
        r#"<!DOCTYPE html><html><body>
            <div class="site-content">
                <button id="spectate_button" data-spectate-gameid="{}">Spectate</button>
                {}
            </div>
        </body></html>"#,
        game_id, lists
    )
}

/// Five default cards named `<prefix>1` .. `<prefix>5`
pub fn default_team(prefix: &str) -> Vec<CardFixture> {
    (1..=5).map(|i| CardFixture::new(&format!("{}{}", prefix, i))).collect()
}

pub fn default_page() -> String {
    page_html("6543210987", &[default_team("Blue"), default_team("Red")])
}
