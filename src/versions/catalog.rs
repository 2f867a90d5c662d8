// Catalog normalization: raw (format, version spec) rows into selectable options

use crate::versions::range_expander::{ExpandedVersion, expand_range};
use crate::versions::version_parser::{VersionTuple, format_version_number, parse_version};
use log::debug;
use serde::Serialize;
use std::collections::HashSet;

/// Raw catalog row, e.g. `48 => "1.21-1.21.3"`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogEntry {
    pub format_id: u32,
    pub version_spec: String,
}

impl CatalogEntry {
    pub fn new(format_id: u32, version_spec: impl Into<String>) -> Self {
        Self {
            format_id,
            version_spec: version_spec.into(),
        }
    }
}

/// One selectable version and the pack format it maps to
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DisplayOption {
    pub text: String,
    pub format_id: u32,
    #[serde(skip)]
    pub sort_key: VersionTuple,
}

/// Versions that never show up in the selection list
fn is_prerelease(text: &str) -> bool {
    text.contains("pre") || text.contains("snapshot")
}

/// Expand, filter, de-duplicate and sort catalog rows newest-first
///
/// The first row to produce a given version text wins; later duplicates are
/// dropped regardless of their format.
pub fn normalize(entries: &[CatalogEntry]) -> Vec<DisplayOption> {
    let mut seen = HashSet::new();
    let mut options = Vec::new();

    for entry in entries {
        for expanded in expand_range(&entry.version_spec) {
            if let ExpandedVersion::Unresolved(range) = &expanded {
                debug!(
                    "Keeping range {} as-is ({} to {} does not expand)",
                    range.text, range.start, range.end
                );
            }
            let text = expanded.text();
            if is_prerelease(text) {
                continue;
            }

            let text = format_version_number(text);
            if !seen.insert(text.clone()) {
                debug!(
                    "Skipping duplicate version {} (format {})",
                    text, entry.format_id
                );
                continue;
            }

            options.push(DisplayOption {
                sort_key: parse_version(&text),
                text,
                format_id: entry.format_id,
            });
        }
    }

    // Stable sort keeps input order among equal keys
    options.sort_by(|a, b| b.sort_key.cmp(&a.sort_key));
    options
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(format: u32, spec: &str) -> CatalogEntry {
        CatalogEntry::new(format, spec)
    }

    fn texts(options: &[DisplayOption]) -> Vec<&str> {
        options.iter().map(|o| o.text.as_str()).collect()
    }

    #[test]
    fn test_normalize_sorts_newest_first() {
        let options = normalize(&[
            entry(48, "1.21"),
            entry(48, "1.21.3"),
            entry(15, "1.20.3-1.20.5"),
        ]);

        assert_eq!(
            texts(&options),
            vec!["1.21.3", "1.21", "1.20.5", "1.20.4", "1.20.3"]
        );
        assert!(options.windows(2).all(|w| w[0].sort_key > w[1].sort_key));
        assert_eq!(options[2].format_id, 15);
    }

    #[test]
    fn test_normalize_first_seen_wins() {
        let options = normalize(&[entry(61, "1.21.4"), entry(48, "1.21-1.21.4")]);

        let v1214: Vec<_> = options.iter().filter(|o| o.text == "1.21.4").collect();
        assert_eq!(v1214.len(), 1);
        assert_eq!(v1214[0].format_id, 61);
        assert_eq!(options.len(), 5);
    }

    #[test]
    fn test_normalize_never_repeats_text() {
        let options = normalize(&crate::versions::fallback::data_pack_entries());
        let mut seen = HashSet::new();
        assert!(options.iter().all(|o| seen.insert(o.text.clone())));
    }

    #[test]
    fn test_normalize_empty() {
        assert!(normalize(&[]).is_empty());
    }

    #[test]
    fn test_normalize_drops_prereleases() {
        let options = normalize(&[
            entry(41, "1.20.5-pre1"),
            entry(26, "24w14a snapshot"),
            entry(32, "1.20.5-1.20.6"),
        ]);
        assert_eq!(texts(&options), vec!["1.20.6", "1.20.5"]);
    }

    #[test]
    fn test_normalize_keeps_unresolved_ranges() {
        let options = normalize(&[entry(1, "1.6.1-b1.7"), entry(3, "1.9")]);
        assert_eq!(texts(&options), vec!["1.9", "1.6.1-b1.7"]);
        assert_eq!(options[1].sort_key, VersionTuple::UNKNOWN);
    }

    #[test]
    fn test_normalize_resource_fallback() {
        let options = normalize(&crate::versions::fallback::resource_pack_entries());
        assert_eq!(options.first().map(|o| o.text.as_str()), Some("1.21.4"));
        assert_eq!(options.first().map(|o| o.format_id), Some(46));
        assert_eq!(options.last().map(|o| o.text.as_str()), Some("1.6.1"));
    }
}
