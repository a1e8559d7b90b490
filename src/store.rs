use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::future::Future;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::models::{GameId, Platform, StoredLiveGame};

/// Persistence used by the live game service
pub trait LiveGameStore: Send + Sync {
    fn find_by_id(&self, game_id: GameId) -> impl Future<Output = Option<StoredLiveGame>> + Send;

    /// Most recent game involving `summoner_name` inserted after `inserted_after`
    fn find_by_summoner(
        &self,
        platform: Platform,
        summoner_name: &str,
        inserted_after: DateTime<Utc>,
    ) -> impl Future<Output = Option<StoredLiveGame>> + Send;

    /// Whether a "not in game" answer newer than `inserted_after` is remembered
    fn find_no_game(
        &self,
        platform: Platform,
        summoner_name: &str,
        inserted_after: DateTime<Utc>,
    ) -> impl Future<Output = bool> + Send;

    fn upsert_game(&self, platform: Platform, game: StoredLiveGame) -> impl Future<Output = ()> + Send;

    fn upsert_no_game(
        &self,
        platform: Platform,
        summoner_name: &str,
        inserted_at: DateTime<Utc>,
    ) -> impl Future<Output = ()> + Send;

    /// Drops games inserted before `games_before` and markers before `no_games_before`;
    /// returns how many entries were removed
    fn delete_before(
        &self,
        games_before: DateTime<Utc>,
        no_games_before: DateTime<Utc>,
    ) -> impl Future<Output = usize> + Send;
}

type SummonerKey = (Platform, String);

/// Summoner names are matched case-insensitively
fn summoner_key(platform: Platform, summoner_name: &str) -> SummonerKey {
    (platform, summoner_name.to_lowercase())
}

#[derive(Debug, Clone)]
struct GameEntry {
    platform: Platform,
    game: StoredLiveGame,
}

/// Process-local store
#[derive(Debug, Default)]
pub struct InMemoryLiveGameStore {
    games: Arc<RwLock<HashMap<GameId, GameEntry>>>,
    no_games: Arc<RwLock<HashMap<SummonerKey, DateTime<Utc>>>>,
}

impl Clone for InMemoryLiveGameStore {
    fn clone(&self) -> Self {
        Self {
            games: Arc::clone(&self.games),
            no_games: Arc::clone(&self.no_games),
        }
    }
}

impl InMemoryLiveGameStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn game_count(&self) -> usize {
        self.games.read().await.len()
    }
}

impl LiveGameStore for InMemoryLiveGameStore {
    async fn find_by_id(&self, game_id: GameId) -> Option<StoredLiveGame> {
        self.games.read().await.get(&game_id).map(|entry| entry.game.clone())
    }

    async fn find_by_summoner(
        &self,
        platform: Platform,
        summoner_name: &str,
        inserted_after: DateTime<Utc>,
    ) -> Option<StoredLiveGame> {
        let wanted = summoner_name.to_lowercase();
        let games = self.games.read().await;
        games
            .values()
            .filter(|entry| entry.platform == platform && entry.game.inserted_at > inserted_after)
            .filter(|entry| {
                entry
                    .game
                    .game
                    .participants
                    .values()
                    .flatten()
                    .any(|p| p.summoner_name.to_lowercase() == wanted)
            })
            .max_by_key(|entry| entry.game.inserted_at)
            .map(|entry| entry.game.clone())
    }

    async fn find_no_game(&self, platform: Platform, summoner_name: &str, inserted_after: DateTime<Utc>) -> bool {
        self.no_games
            .read()
            .await
            .get(&summoner_key(platform, summoner_name))
            .is_some_and(|at| *at > inserted_after)
    }

    async fn upsert_game(&self, platform: Platform, game: StoredLiveGame) {
        let mut no_games = self.no_games.write().await;
        for participant in game.game.participants.values().flatten() {
            no_games.remove(&summoner_key(platform, &participant.summoner_name));
        }
        drop(no_games);

        self.games
            .write()
            .await
            .insert(game.game.game_id, GameEntry { platform, game });
    }

    async fn upsert_no_game(&self, platform: Platform, summoner_name: &str, inserted_at: DateTime<Utc>) {
        self.no_games
            .write()
            .await
            .insert(summoner_key(platform, summoner_name), inserted_at);
    }

    async fn delete_before(&self, games_before: DateTime<Utc>, no_games_before: DateTime<Utc>) -> usize {
        let mut games = self.games.write().await;
        let before = games.len();
        games.retain(|_, entry| entry.game.inserted_at >= games_before);
        let mut removed = before - games.len();
        drop(games);

        let mut no_games = self.no_games.write().await;
        let before = no_games.len();
        no_games.retain(|_, at| *at >= no_games_before);
        removed += before - no_games.len();

        removed
    }
}
