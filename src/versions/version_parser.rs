// Version parsing for Minecraft release strings

use std::fmt;

/// Range separators accepted in catalog version specs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Separator {
    /// ASCII hyphen, e.g. "1.20.3-1.20.5"
    Hyphen,
    /// En dash as used on the wiki, e.g. "1.15–1.16.1"
    EnDash,
}

impl Separator {
    /// Detect the separator used by a version spec, if any.
    /// The en dash wins when both are present.
    pub fn detect(spec: &str) -> Option<Self> {
        if spec.contains('–') {
            Some(Separator::EnDash)
        } else if spec.contains('-') {
            Some(Separator::Hyphen)
        } else {
            None
        }
    }

    pub fn as_char(self) -> char {
        match self {
            Separator::Hyphen => '-',
            Separator::EnDash => '–',
        }
    }
}

/// Sort key derived from a version string
///
/// Field order matters: the derived `Ord` compares major, then minor, then patch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct VersionTuple {
    pub major: u32,
    pub minor: u32,
    pub patch: u32,
}

impl VersionTuple {
    pub const UNKNOWN: VersionTuple = VersionTuple {
        major: 0,
        minor: 0,
        patch: 0,
    };

    pub fn new(major: u32, minor: u32, patch: u32) -> Self {
        Self {
            major,
            minor,
            patch,
        }
    }
}

impl fmt::Display for VersionTuple {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)
    }
}

/// Match `1.<minor>[.<patch>]` exactly.
/// Returns (minor, patch) where patch is `None` when it was not written.
pub fn match_release(version: &str) -> Option<(u32, Option<u32>)> {
    let rest = version.strip_prefix("1.")?;
    let mut parts = rest.split('.');

    let minor = parse_number(parts.next()?)?;
    let patch = match parts.next() {
        Some(p) => Some(parse_number(p)?),
        None => None,
    };

    if parts.next().is_some() {
        return None;
    }

    Some((minor, patch))
}

fn parse_number(part: &str) -> Option<u32> {
    if part.is_empty() || !part.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    part.parse().ok()
}

/// Parse a version string into a sort key
///
/// Ranges sort by their upper bound. Anything outside the `1.<minor>[.<patch>]`
/// grammar maps to `0.0.0` so it sorts last when ordering newest-first.
pub fn parse_version(version: &str) -> VersionTuple {
    if let Some(sep) = Separator::detect(version) {
        let upper = version.split(sep.as_char()).nth(1).unwrap_or("");
        return parse_version(upper);
    }

    match match_release(version) {
        Some((minor, patch)) => VersionTuple::new(1, minor, patch.unwrap_or(0)),
        None => VersionTuple::UNKNOWN,
    }
}

/// Drop a trailing `.0` ("1.20.0" -> "1.20")
pub fn format_version_number(version: &str) -> String {
    version.strip_suffix(".0").unwrap_or(version).to_string()
}
