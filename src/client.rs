use reqwest::Url;
use std::future::Future;

use crate::config::ScraperConfig;
use crate::error::ScrapeError;
use crate::models::Platform;

/// Anything able to hand over the raw live game page of a summoner
pub trait LivePageSource: Send + Sync {
    fn fetch_live_page(
        &self,
        platform: Platform,
        summoner_name: &str,
    ) -> impl Future<Output = Result<String, ScrapeError>> + Send;
}

/// HTTP fetcher for porofessor live game fragments
#[derive(Debug, Clone)]
pub struct LiveGameClient {
    client: reqwest::Client,
    base_url: String,
}

impl LiveGameClient {
    pub fn new(config: &ScraperConfig) -> Result<Self, ScrapeError> {
        let client = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .user_agent(&config.user_agent)
            .build()?;

        Ok(LiveGameClient {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    /// `<base>/<platform lowercase>/<summoner name>`, the name percent-encoded
    pub fn live_page_url(&self, platform: Platform, summoner_name: &str) -> Result<Url, ScrapeError> {
        live_page_url(&self.base_url, platform, summoner_name)
    }
}

pub fn live_page_url(base_url: &str, platform: Platform, summoner_name: &str) -> Result<Url, ScrapeError> {
    let mut url = Url::parse(base_url).map_err(|e| ScrapeError::Url(format!("{}: {}", base_url, e)))?;
    url.path_segments_mut()
        .map_err(|_| ScrapeError::Url(format!("{} cannot be a base", base_url)))?
        .pop_if_empty()
        .push(&platform.lower())
        .push(summoner_name);
    Ok(url)
}

impl LivePageSource for LiveGameClient {
    async fn fetch_live_page(&self, platform: Platform, summoner_name: &str) -> Result<String, ScrapeError> {
        let url = self.live_page_url(platform, summoner_name)?;
        let response = self.client.get(url.clone()).send().await?;
        let status = response.status();
        tracing::debug!("GET {} - {}", url, status.as_u16());

        if !status.is_success() {
            return Err(ScrapeError::Status {
                url: url.to_string(),
                status,
            });
        }
        Ok(response.text().await?)
    }
}
