// Hardcoded pack format history, used until (or instead of) a live fetch

use crate::pack_type::PackType;
use crate::versions::catalog::CatalogEntry;
use crate::versions::source_trait::{CatalogSource, FetchError};
use async_trait::async_trait;

/// Data pack formats, newest first
const DATA_PACK_FORMATS: &[(u32, &str)] = &[
    (61, "1.21.4"),
    (48, "1.21-1.21.3"),
    (15, "1.20.3-1.20.5"),
    (14, "1.20.2"),
    (13, "1.19.4-1.20.1"),
    (12, "1.19.3"),
    (11, "1.19-1.19.2"),
    (10, "1.18.2"),
    (9, "1.18-1.18.1"),
    (8, "1.17-1.17.1"),
    (7, "1.16.2-1.16.5"),
    (6, "1.15-1.16.1"),
    (5, "1.13-1.14.4"),
    (4, "1.11-1.12.2"),
    (3, "1.9-1.10.2"),
];

/// Resource pack formats, newest first
const RESOURCE_PACK_FORMATS: &[(u32, &str)] = &[
    (46, "1.21.4"),
    (42, "1.21.2-1.21.3"),
    (34, "1.21"),
    (32, "1.20.5-1.20.6"),
    (22, "1.20.4"),
    (18, "1.20.2-1.20.3"),
    (15, "1.20-1.20.1"),
    (13, "1.19.4"),
    (12, "1.19.2-1.19.3"),
    (9, "1.19-1.19.1"),
    (8, "1.18"),
    (7, "1.17"),
    (6, "1.16.2-1.16.5"),
    (5, "1.15-1.16"),
    (4, "1.13-1.14.4"),
    (3, "1.11-1.12.2"),
    (2, "1.9-1.10.2"),
    (1, "1.6.1-1.8.9"),
];

/// Versions whose data pack format differs from the rest of their minor group
pub const DATA_PACK_EXCEPTIONS: &[(&str, u32)] = &[("1.21.4", 61)];

fn to_entries(table: &[(u32, &str)]) -> Vec<CatalogEntry> {
    table
        .iter()
        .map(|(format, versions)| CatalogEntry::new(*format, *versions))
        .collect()
}

pub fn data_pack_entries() -> Vec<CatalogEntry> {
    to_entries(DATA_PACK_FORMATS)
}

pub fn resource_pack_entries() -> Vec<CatalogEntry> {
    to_entries(RESOURCE_PACK_FORMATS)
}

pub fn entries_for(pack_type: PackType) -> Vec<CatalogEntry> {
    match pack_type {
        PackType::Data => data_pack_entries(),
        PackType::Resource => resource_pack_entries(),
    }
}

/// Source that never leaves the process; used when running offline
pub struct BuiltInSource(pub PackType);

#[async_trait]
impl CatalogSource for BuiltInSource {
    fn name(&self) -> &'static str {
        "built-in"
    }

    async fn fetch(&self) -> Result<Vec<CatalogEntry>, FetchError> {
        Ok(entries_for(self.0))
    }
}
