// Resource pack format source

use crate::constants;
use crate::versions::catalog::CatalogEntry;
use crate::versions::fallback;
use crate::versions::source_trait::{CatalogSource, FetchError};
use crate::versions::wiki::{fetch_and_scrape, sort_newest_first};
use async_trait::async_trait;

/// Resource pack formats scraped from a pack.mcmeta reference page
///
/// Rows are appended to the built-in table as published; the page lists
/// ranges already, so no grouping is applied.
pub struct ResourcePackSource;

#[async_trait]
impl CatalogSource for ResourcePackSource {
    fn name(&self) -> &'static str {
        "pack-mcmeta-reference"
    }

    async fn fetch(&self) -> Result<Vec<CatalogEntry>, FetchError> {
        let scraped = fetch_and_scrape(constants::RESOURCE_PACK_FORMAT_URL).await?;

        let mut merged = fallback::resource_pack_entries();
        merged.extend(scraped);
        sort_newest_first(&mut merged);
        Ok(merged)
    }
}
