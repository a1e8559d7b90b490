use chrono::{DateTime, Utc};
use futures::future::join_all;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;

use crate::client::LivePageSource;
use crate::config::ScraperConfig;
use crate::error::ScrapeError;
use crate::models::{GameId, LiveGame, ParsedPage, Platform, StoredLiveGame};
use crate::page::parse_live_game_page;
use crate::store::LiveGameStore;

/// Lower bound for [`LiveGameService::spawn_eviction`]
pub const MIN_EVICTION_INTERVAL: Duration = Duration::from_secs(1);

/// Read-through cache of live games in front of porofessor.
///
/// Found games are stored by id with their insertion time; "not in game" answers
/// are remembered per summoner for the shorter `no_game_ttl`. Malformed pages are
/// never cached.
pub struct LiveGameService<S, P> {
    store: Arc<S>,
    source: Arc<P>,
    config: ScraperConfig,
}

impl<S, P> Clone for LiveGameService<S, P> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            source: Arc::clone(&self.source),
            config: self.config.clone(),
        }
    }
}

fn cutoff(now: DateTime<Utc>, ttl: chrono::Duration) -> DateTime<Utc> {
    now.checked_sub_signed(ttl).unwrap_or(DateTime::<Utc>::MIN_UTC)
}

impl<S, P> LiveGameService<S, P>
where
    S: LiveGameStore + 'static,
    P: LivePageSource + 'static,
{
    pub fn new(store: S, source: P, config: ScraperConfig) -> Self {
        LiveGameService {
            store: Arc::new(store),
            source: Arc::new(source),
            config,
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn source(&self) -> &P {
        &self.source
    }

    /// Cached game `game_id`, or a fresh scrape of `summoner_name`'s page
    pub async fn find(
        &self,
        game_id: GameId,
        platform: Platform,
        summoner_name: &str,
    ) -> Result<Option<LiveGame>, ScrapeError> {
        if let Some(stored) = self.store.find_by_id(game_id).await {
            tracing::info!("Live game {} served from cache", game_id);
            return Ok(Some(stored.game));
        }
        self.fetch_and_store(platform, summoner_name).await
    }

    /// Like [`LiveGameService::find`] when the game id is not known yet
    pub async fn find_by_summoner(
        &self,
        platform: Platform,
        summoner_name: &str,
    ) -> Result<Option<LiveGame>, ScrapeError> {
        let now = Utc::now();
        let games_after = cutoff(now, self.config.active_game_ttl_chrono());
        if let Some(stored) = self.store.find_by_summoner(platform, summoner_name, games_after).await {
            tracing::info!("Live game {} of {} served from cache", stored.game.game_id, summoner_name);
            return Ok(Some(stored.game));
        }

        let no_game_after = cutoff(now, self.config.no_game_ttl_chrono());
        if self.store.find_no_game(platform, summoner_name, no_game_after).await {
            tracing::info!("{} ({}) recently not in game", summoner_name, platform);
            return Ok(None);
        }

        self.fetch_and_store(platform, summoner_name).await
    }

    /// [`LiveGameService::find_by_summoner`] for several summoners, results in input order.
    ///
    /// Lookups run one at a time until a game is found, then the remaining ones run
    /// concurrently so players of that game are served from the cache.
    pub async fn find_many(
        &self,
        platform: Platform,
        summoner_names: &[String],
    ) -> Vec<Result<Option<LiveGame>, ScrapeError>> {
        let mut results = Vec::with_capacity(summoner_names.len());
        let mut names = summoner_names.iter();

        for name in names.by_ref() {
            let result = self.find_by_summoner(platform, name).await;
            let found = matches!(result, Ok(Some(_)));
            results.push(result);
            if found {
                break;
            }
        }

        let rest = join_all(names.map(|name| self.find_by_summoner(platform, name))).await;
        results.extend(rest);
        results
    }

    async fn fetch_and_store(
        &self,
        platform: Platform,
        summoner_name: &str,
    ) -> Result<Option<LiveGame>, ScrapeError> {
        let html = self.source.fetch_live_page(platform, summoner_name).await?;

        match parse_live_game_page(&html).into_result() {
            Ok(ParsedPage::NoActiveGame) => {
                self.store.upsert_no_game(platform, summoner_name, Utc::now()).await;
                Ok(None)
            }
            Ok(ParsedPage::ActiveGameFound(game)) => {
                let stored = StoredLiveGame {
                    game: game.clone(),
                    inserted_at: Utc::now(),
                };
                self.store.upsert_game(platform, stored).await;
                tracing::info!(
                    "Stored live game {} ({} participants)",
                    game.game_id,
                    game.participant_count()
                );
                Ok(Some(game))
            }
            Err(errors) => {
                tracing::warn!(
                    "Malformed live game page for {} ({}): {} error(s)\n{}",
                    summoner_name,
                    platform,
                    errors.len(),
                    errors
                );
                Err(ScrapeError::MalformedPage(errors))
            }
        }
    }

    /// Removes every entry older than its TTL relative to `now`
    pub async fn evict_expired(&self, now: DateTime<Utc>) -> usize {
        let removed = self
            .store
            .delete_before(
                cutoff(now, self.config.active_game_ttl_chrono()),
                cutoff(now, self.config.no_game_ttl_chrono()),
            )
            .await;
        if removed > 0 {
            tracing::info!("Evicted {} expired live game cache entries", removed);
        }
        removed
    }

    /// Runs [`LiveGameService::evict_expired`] every `interval` until the handle is aborted.
    /// Intervals shorter than [`MIN_EVICTION_INTERVAL`] are raised to it.
    pub fn spawn_eviction(&self, interval: Duration) -> JoinHandle<()> {
        let service = self.clone();
        let interval = interval.max(MIN_EVICTION_INTERVAL);
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            loop {
                ticker.tick().await;
                service.evict_expired(Utc::now()).await;
            }
        })
    }
}
