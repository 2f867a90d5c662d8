// Minecraft wiki source for data pack formats

use crate::constants;
use crate::versions::catalog::CatalogEntry;
use crate::versions::fallback;
use crate::versions::http;
use crate::versions::scrape;
use crate::versions::source_trait::{CatalogSource, FetchError};
use crate::versions::version_parser::{Separator, VersionTuple, parse_version};
use async_trait::async_trait;
use log::info;

/// Sort key of a spec's lower boundary
fn lower_bound(spec: &str) -> VersionTuple {
    match Separator::detect(spec) {
        Some(sep) => parse_version(spec.split(sep.as_char()).next().unwrap_or("")),
        None => parse_version(spec),
    }
}

/// Order rows newest-first by lower boundary; ties keep their input order
pub fn sort_newest_first(entries: &mut [CatalogEntry]) {
    entries.sort_by(|a, b| lower_bound(&b.version_spec).cmp(&lower_bound(&a.version_spec)));
}

/// "1.21" for "1.21.3"
fn minor_group(version: &str) -> Option<String> {
    let rest = version.strip_prefix("1.")?;
    let digits: String = rest.chars().take_while(|c| c.is_ascii_digit()).collect();
    if digits.is_empty() {
        None
    } else {
        Some(format!("1.{}", digits))
    }
}

/// Merge scraped rows onto the built-in table
///
/// Exception versions keep their pinned format, ranges are kept as-is, and
/// single versions are folded per minor group into one `first-last` range
/// using the first format seen for the group.
pub fn overlay_scraped(
    base: Vec<CatalogEntry>,
    scraped: Vec<CatalogEntry>,
    exceptions: &[(&str, u32)],
) -> Vec<CatalogEntry> {
    let mut merged = base;
    let mut groups: Vec<(String, u32, Vec<String>)> = Vec::new();

    for entry in scraped {
        if let Some((_, format)) = exceptions.iter().find(|(v, _)| *v == entry.version_spec) {
            merged.push(CatalogEntry::new(*format, entry.version_spec));
            continue;
        }

        if Separator::detect(&entry.version_spec).is_some() {
            merged.push(entry);
            continue;
        }

        let Some(group) = minor_group(&entry.version_spec) else {
            continue;
        };
        match groups.iter_mut().find(|(name, _, _)| *name == group) {
            Some((_, _, versions)) => versions.push(entry.version_spec),
            None => groups.push((group, entry.format_id, vec![entry.version_spec])),
        }
    }

    for (_, format, mut versions) in groups {
        versions.sort_by_key(|v| parse_version(v));
        let spec = match (versions.first(), versions.last()) {
            (Some(first), Some(last)) if versions.len() > 1 => format!("{}-{}", first, last),
            (Some(only), _) => only.clone(),
            _ => continue,
        };
        merged.push(CatalogEntry::new(format, spec));
    }

    sort_newest_first(&mut merged);
    merged
}

/// Scrape `url` (through mirrors), requiring enough rows to trust the table
pub(crate) async fn fetch_and_scrape(url: &str) -> Result<Vec<CatalogEntry>, FetchError> {
    let html = http::fetch_text_with_mirrors(url, constants::MIRROR_PREFIXES).await?;
    let scraped =
        scrape::scrape_pack_format_table(&html).ok_or_else(|| FetchError::NoTable(url.to_string()))?;

    if scraped.len() < constants::MIN_SCRAPED_ROWS {
        return Err(FetchError::InsufficientData {
            found: scraped.len(),
            required: constants::MIN_SCRAPED_ROWS,
        });
    }

    info!("Scraped {} pack format rows from {}", scraped.len(), url);
    Ok(scraped)
}

/// Data pack formats scraped from the Minecraft wiki
pub struct WikiSource;

#[async_trait]
impl CatalogSource for WikiSource {
    fn name(&self) -> &'static str {
        "minecraft-wiki"
    }

    async fn fetch(&self) -> Result<Vec<CatalogEntry>, FetchError> {
        let scraped = fetch_and_scrape(constants::DATA_PACK_FORMAT_URL).await?;
        Ok(overlay_scraped(
            fallback::data_pack_entries(),
            scraped,
            fallback::DATA_PACK_EXCEPTIONS,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(format: u32, spec: &str) -> CatalogEntry {
        CatalogEntry::new(format, spec)
    }

    #[test]
    fn test_overlay_groups_single_versions() {
        let merged = overlay_scraped(
            vec![entry(15, "1.20.3-1.20.5")],
            vec![entry(71, "1.21.6"), entry(71, "1.21.5"), entry(80, "1.21.7")],
            &[],
        );

        assert_eq!(merged[0], entry(71, "1.21.5-1.21.7"));
        assert_eq!(merged[1], entry(15, "1.20.3-1.20.5"));
    }

    #[test]
    fn test_overlay_applies_exceptions() {
        let merged = overlay_scraped(
            vec![],
            vec![entry(48, "1.21.4"), entry(48, "1.21.3")],
            &[("1.21.4", 61)],
        );

        assert!(merged.contains(&entry(61, "1.21.4")));
        assert!(merged.contains(&entry(48, "1.21.3")));
    }

    #[test]
    fn test_overlay_keeps_ranges_and_base_wins_ties() {
        let merged = overlay_scraped(
            vec![entry(48, "1.21-1.21.3")],
            vec![entry(50, "1.21-1.21.1"), entry(11, "1.19–1.19.2")],
            &[],
        );

        assert_eq!(
            merged,
            vec![
                entry(48, "1.21-1.21.3"),
                entry(50, "1.21-1.21.1"),
                entry(11, "1.19–1.19.2"),
            ]
        );
    }

    #[test]
    fn test_overlay_then_normalize_prefers_base_format() {
        use crate::versions::catalog::normalize;

        let merged = overlay_scraped(
            fallback::data_pack_entries(),
            vec![entry(48, "1.21.4"), entry(71, "1.21.5")],
            fallback::DATA_PACK_EXCEPTIONS,
        );
        let options = normalize(&merged);

        assert_eq!(options[0].text, "1.21.5");
        assert_eq!(options[0].format_id, 71);
        let v1214 = options.iter().find(|o| o.text == "1.21.4").expect("1.21.4");
        assert_eq!(v1214.format_id, 61);
    }

    #[test]
    fn test_minor_group() {
        assert_eq!(minor_group("1.21.3").as_deref(), Some("1.21"));
        assert_eq!(minor_group("1.9").as_deref(), Some("1.9"));
        assert_eq!(minor_group("b1.7"), None);
    }
}
