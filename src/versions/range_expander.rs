// Range expansion for compact version specs like "1.20.3-1.20.5"

use crate::versions::version_parser::{Separator, format_version_number, match_release};

/// Widest minor or patch span a range may cover before it is kept unexpanded
const MAX_SPAN: u32 = 100;

/// A range that could not be enumerated, kept verbatim for display
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawRange {
    pub text: String,
    pub start: String,
    pub end: String,
}

/// One element produced by expanding a version spec
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExpandedVersion {
    Resolved(String),
    Unresolved(RawRange),
}

impl ExpandedVersion {
    /// Text shown to the user for this element
    pub fn text(&self) -> &str {
        match self {
            ExpandedVersion::Resolved(version) => version,
            ExpandedVersion::Unresolved(range) => &range.text,
        }
    }
}

/// Expand a version spec into individual versions
///
/// Comma-separated parts are expanded independently and concatenated in input
/// order. Versions use a fixed `1.` epoch, so a range is walked over
/// (minor, patch): every minor between the boundaries is emitted, and the
/// patches of the final minor are enumerated up to the end boundary. Patch
/// releases of earlier minors are not known, so only the start boundary
/// itself carries a patch there.
///
/// Ranges that don't parse, run backwards or span implausibly many releases
/// come back as `Unresolved`.
pub fn expand_range(spec: &str) -> Vec<ExpandedVersion> {
    let mut versions = Vec::new();

    for part in spec.split(',') {
        let part = part.trim();
        if part.is_empty() {
            continue;
        }

        match Separator::detect(part) {
            Some(sep) => versions.extend(expand_part(part, sep)),
            None => versions.push(ExpandedVersion::Resolved(format_version_number(part))),
        }
    }

    versions
}

fn expand_part(part: &str, sep: Separator) -> Vec<ExpandedVersion> {
    let mut bounds = part.split(sep.as_char()).map(str::trim);
    let start = bounds.next().unwrap_or("");
    let end = bounds.next().unwrap_or("");

    let unresolved = || {
        vec![ExpandedVersion::Unresolved(RawRange {
            text: part.to_string(),
            start: start.to_string(),
            end: end.to_string(),
        })]
    };

    let (Some((start_minor, start_patch)), Some((end_minor, end_patch))) =
        (match_release(start), match_release(end))
    else {
        return unresolved();
    };

    let start_patch = start_patch.unwrap_or(0);
    let end_patch = end_patch.unwrap_or(0);

    if (start_minor, start_patch) > (end_minor, end_patch) {
        return unresolved();
    }

    let patch_floor = if start_minor == end_minor { start_patch } else { 0 };
    if end_minor - start_minor > MAX_SPAN || end_patch - patch_floor > MAX_SPAN {
        return unresolved();
    }

    let mut versions = Vec::new();
    for minor in start_minor..=end_minor {
        let first = if minor == start_minor { start_patch } else { 0 };
        let last = if minor == end_minor { end_patch } else { first };

        for patch in first..=last {
            versions.push(ExpandedVersion::Resolved(render(minor, patch)));
        }
    }

    versions
}

fn render(minor: u32, patch: u32) -> String {
    if patch == 0 {
        format!("1.{}", minor)
    } else {
        format_version_number(&format!("1.{}.{}", minor, patch))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn texts(spec: &str) -> Vec<String> {
        expand_range(spec)
            .iter()
            .map(|v| v.text().to_string())
            .collect()
    }

    #[test]
    fn test_expand_same_minor() {
        assert_eq!(texts("1.20.3-1.20.5"), vec!["1.20.3", "1.20.4", "1.20.5"]);
        assert_eq!(texts("1.21-1.21.3"), vec!["1.21", "1.21.1", "1.21.2", "1.21.3"]);
    }

    #[test]
    fn test_expand_across_minors() {
        assert_eq!(texts("1.15-1.16.1"), vec!["1.15", "1.16", "1.16.1"]);
        assert_eq!(texts("1.15–1.16.1"), vec!["1.15", "1.16", "1.16.1"]);
        assert_eq!(texts("1.19.4-1.20.1"), vec!["1.19.4", "1.20", "1.20.1"]);
        assert_eq!(texts("1.15-1.16"), vec!["1.15", "1.16"]);
    }

    #[test]
    fn test_expand_wide_range() {
        let versions = texts("1.6.1-1.8.9");
        assert_eq!(versions.first().map(String::as_str), Some("1.6.1"));
        assert!(versions.contains(&"1.7".to_string()));
        assert!(versions.contains(&"1.8".to_string()));
        assert_eq!(versions.last().map(String::as_str), Some("1.8.9"));
    }

    #[test]
    fn test_expand_single_and_comma_lists() {
        assert_eq!(texts("1.18.2"), vec!["1.18.2"]);
        assert_eq!(texts("1.20.0"), vec!["1.20"]);
        assert_eq!(
            texts("1.19, 1.19.1-1.19.2"),
            vec!["1.19", "1.19.1", "1.19.2"]
        );
        assert_eq!(texts("1.18,"), vec!["1.18"]);
    }

    #[test]
    fn test_expand_strips_zero_patch() {
        assert_eq!(texts("1.20.0-1.20.2"), vec!["1.20", "1.20.1", "1.20.2"]);
    }

    #[test]
    fn test_unparseable_range_passes_through() {
        let expanded = expand_range("1.20.5-pre1-1.20.5");
        assert_eq!(
            expanded,
            vec![ExpandedVersion::Unresolved(RawRange {
                text: "1.20.5-pre1-1.20.5".to_string(),
                start: "1.20.5".to_string(),
                end: "pre1".to_string(),
            })]
        );

        let expanded = expand_range("1.20-");
        assert!(matches!(&expanded[..], [ExpandedVersion::Unresolved(r)] if r.end.is_empty()));
    }

    #[test]
    fn test_oversized_range_passes_through() {
        let expanded = expand_range("1.21-1.21.4000000000");
        assert!(matches!(&expanded[..], [ExpandedVersion::Unresolved(r)] if r.end == "1.21.4000000000"));

        assert!(matches!(
            &expand_range("1.0-1.500")[..],
            [ExpandedVersion::Unresolved(_)]
        ));
        assert_eq!(texts("1.0-1.100").len(), 101);
    }

    #[test]
    fn test_backwards_range_passes_through() {
        let expanded = expand_range("1.20.5-1.20.3");
        assert!(matches!(&expanded[..], [ExpandedVersion::Unresolved(r)] if r.text == "1.20.5-1.20.3"));
    }

    #[test]
    fn test_expansion_is_ascending() {
        use crate::versions::version_parser::parse_version;

        let keys: Vec<_> = texts("1.13-1.14.4")
            .iter()
            .map(|v| parse_version(v))
            .collect();
        assert!(keys.windows(2).all(|w| w[0] < w[1]));
    }
}
