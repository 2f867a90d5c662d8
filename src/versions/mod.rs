// Versions module: pack format catalogs and their sources

use crate::pack_type::PackType;
use log::{debug, warn};
use std::sync::Arc;
use std::time::Duration;

pub mod catalog;
pub mod fallback;
pub mod http;
pub mod range_expander;
pub mod resource_pack;
pub mod scrape;
pub mod source_trait;
pub mod version_parser;
pub mod wiki;

pub use catalog::{CatalogEntry, DisplayOption, normalize};
pub use fallback::BuiltInSource;
pub use resource_pack::ResourcePackSource;
pub use source_trait::{CatalogSource, FetchError};
pub use wiki::WikiSource;

/// Selectable versions for one pack type
///
/// Starts out populated from the built-in table so it is usable before any
/// fetch completes; `overlay` swaps in fresher data when it arrives.
#[derive(Debug, Clone)]
pub struct Catalog {
    pack_type: PackType,
    options: Vec<DisplayOption>,
    origin: &'static str,
}

impl Catalog {
    pub fn built_in(pack_type: PackType) -> Self {
        Self {
            pack_type,
            options: normalize(&fallback::entries_for(pack_type)),
            origin: "built-in",
        }
    }

    /// Replace the options with `entries`, unless they normalize to nothing
    pub fn overlay(&mut self, entries: &[CatalogEntry], origin: &'static str) -> bool {
        let options = normalize(entries);
        if options.is_empty() {
            return false;
        }
        self.options = options;
        self.origin = origin;
        true
    }

    pub fn pack_type(&self) -> PackType {
        self.pack_type
    }

    pub fn options(&self) -> &[DisplayOption] {
        &self.options
    }

    /// Where the current options came from
    pub fn origin(&self) -> &'static str {
        self.origin
    }

    /// The newest version, i.e. the default selection
    pub fn newest(&self) -> Option<&DisplayOption> {
        self.options.first()
    }

    pub fn find(&self, version: &str) -> Option<&DisplayOption> {
        self.options.iter().find(|o| o.text == version)
    }
}

/// Pick the catalog source for a pack type
pub fn source_for(pack_type: PackType, offline: bool) -> Arc<dyn CatalogSource> {
    if offline {
        return Arc::new(BuiltInSource(pack_type));
    }
    match pack_type {
        PackType::Data => Arc::new(WikiSource),
        PackType::Resource => Arc::new(ResourcePackSource),
    }
}

/// Build a catalog: built-in data first, then whatever `source` delivers in time
///
/// Fetch failures never propagate; they are logged and the built-in table stays.
pub async fn load_catalog(
    pack_type: PackType,
    source: &dyn CatalogSource,
    fetch_timeout: Duration,
) -> Catalog {
    let mut catalog = Catalog::built_in(pack_type);

    let fetched = match tokio::time::timeout(fetch_timeout, source.fetch()).await {
        Ok(result) => result,
        Err(_) => Err(FetchError::Timeout(fetch_timeout)),
    };

    match fetched {
        Ok(entries) => {
            if catalog.overlay(&entries, source.name()) {
                debug!(
                    "Loaded {} {} versions from {}",
                    catalog.options().len(),
                    pack_type,
                    source.name()
                );
            } else {
                warn!(
                    "{} returned no usable {} versions, using built-in table",
                    source.name(),
                    pack_type
                );
            }
        }
        Err(e) => {
            warn!(
                "Could not fetch {} versions from {}: {}. Using built-in table",
                pack_type,
                source.name(),
                e
            );
        }
    }

    catalog
}
