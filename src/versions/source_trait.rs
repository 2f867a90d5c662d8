// Trait definition for version catalog sources

use crate::versions::catalog::CatalogEntry;
use std::time::Duration;
use thiserror::Error;

/// Why a catalog source could not deliver entries
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("request to {url} failed: {source}")]
    Http {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("{url} returned HTTP {status}")]
    Status {
        url: String,
        status: reqwest::StatusCode,
    },

    #[error("no pack format table found on {0}")]
    NoTable(String),

    #[error("only {found} usable rows scraped, need at least {required}")]
    InsufficientData { found: usize, required: usize },

    #[error("timed out after {0:?}")]
    Timeout(Duration),
}

/// Trait for pack format catalog sources (wiki scrape, built-in table, ...)
///
/// Sources are advisory: callers must keep working with the built-in table
/// when `fetch` fails.
#[async_trait::async_trait]
pub trait CatalogSource: Send + Sync {
    /// Fetch the full (format, version spec) table
    async fn fetch(&self) -> Result<Vec<CatalogEntry>, FetchError>;

    /// Source name for log messages (e.g., "minecraft-wiki")
    fn name(&self) -> &'static str;
}
