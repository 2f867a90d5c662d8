// Shared HTTP client utilities

use crate::constants;
use crate::versions::source_trait::FetchError;
use log::debug;
use reqwest::{Client, Response};

lazy_static::lazy_static! {
    /// Shared HTTP client with proper User-Agent
    static ref CLIENT: Client = Client::builder()
        .user_agent(constants::USER_AGENT)
        .build()
        .expect("Failed to create HTTP client");
}

/// Fetch a page as text
pub async fn fetch_text(url: &str) -> Result<String, FetchError> {
    let response: Response = CLIENT.get(url).send().await.map_err(|e| FetchError::Http {
        url: url.to_string(),
        source: e,
    })?;

    if !response.status().is_success() {
        return Err(FetchError::Status {
            url: url.to_string(),
            status: response.status(),
        });
    }

    response.text().await.map_err(|e| FetchError::Http {
        url: url.to_string(),
        source: e,
    })
}

/// Candidate URLs for a page: the page itself, then each mirror with the
/// page URL percent-encoded as its query
pub fn candidate_urls(url: &str, mirrors: &[&str]) -> Vec<String> {
    let encoded = urlencoding::encode(url);
    std::iter::once(url.to_string())
        .chain(mirrors.iter().map(|prefix| format!("{}{}", prefix, encoded)))
        .collect()
}

/// Fetch a page, falling back through mirrors until one answers with 2xx
pub async fn fetch_text_with_mirrors(url: &str, mirrors: &[&str]) -> Result<String, FetchError> {
    let mut last_error = None;

    for candidate in candidate_urls(url, mirrors) {
        debug!("Fetching {}", candidate);
        match fetch_text(&candidate).await {
            Ok(body) => {
                debug!("Received {} bytes from {}", body.len(), candidate);
                return Ok(body);
            }
            Err(e) => {
                debug!("Fetch failed: {}", e);
                last_error = Some(e);
            }
        }
    }

    Err(last_error.unwrap_or_else(|| FetchError::NoTable(url.to_string())))
}
