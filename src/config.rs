use std::time::Duration;

/// Default live page endpoint
pub const DEFAULT_BASE_URL: &str = "https://porofessor.gg/partial/live-partial";

const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

/// 99 years
const INFINITE_TTL: Duration = Duration::from_secs(99 * 365 * 24 * 60 * 60);

/// Fetching and caching settings
#[derive(Debug, Clone)]
pub struct ScraperConfig {
    /// How long a found game stays cached
    pub active_game_ttl: Duration,
    /// How long a "not in game" answer stays cached
    pub no_game_ttl: Duration,
    pub request_timeout: Duration,
    pub user_agent: String,
    pub base_url: String,
}

impl Default for ScraperConfig {
    fn default() -> Self {
        ScraperConfig {
            active_game_ttl: Duration::from_secs(60 * 60),
            no_game_ttl: Duration::from_secs(30),
            request_timeout: Duration::from_secs(10),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }
}

impl ScraperConfig {
    /// Cache entries never expire in practice; useful while developing
    pub fn infinite_cache() -> Self {
        ScraperConfig {
            active_game_ttl: INFINITE_TTL,
            no_game_ttl: INFINITE_TTL,
            ..ScraperConfig::default()
        }
    }

    /// `chrono` form of [`ScraperConfig::active_game_ttl`], saturating on overflow
    pub fn active_game_ttl_chrono(&self) -> chrono::Duration {
        to_chrono(self.active_game_ttl)
    }

    pub fn no_game_ttl_chrono(&self) -> chrono::Duration {
        to_chrono(self.no_game_ttl)
    }
}

fn to_chrono(duration: Duration) -> chrono::Duration {
    chrono::Duration::from_std(duration).unwrap_or(chrono::Duration::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = ScraperConfig::default();
        assert_eq!(config.active_game_ttl, Duration::from_secs(3600));
        assert!(config.no_game_ttl < config.active_game_ttl);
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
    }

    #[test]
    fn infinite_cache_converts_to_chrono() {
        let config = ScraperConfig::infinite_cache();
        assert_eq!(config.active_game_ttl_chrono().num_days(), 99 * 365);
        assert_eq!(config.request_timeout, ScraperConfig::default().request_timeout);
    }
}
