use reqwest::StatusCode;
use thiserror::Error;

use crate::validated::ValidationErrors;

/// Errors of fetching and caching live game pages
#[derive(Debug, Error)]
pub enum ScrapeError {
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Unexpected status {status} for {url}")]
    Status { url: String, status: StatusCode },

    #[error("Invalid URL: {0}")]
    Url(String),

    /// Every defect found in the page, one per line
    #[error("Malformed live game page:\n{0}")]
    MalformedPage(ValidationErrors),
}

impl From<ValidationErrors> for ScrapeError {
    fn from(errors: ValidationErrors) -> Self {
        ScrapeError::MalformedPage(errors)
    }
}
