// Constants module for shared string constants

/// The metadata file every pack carries at its archive root (case-sensitive).
pub const METADATA_ENTRY: &str = "pack.mcmeta";
pub const ARCHIVE_EXTENSION: &str = "zip";
pub const DEFAULT_OUT_DIR: &str = "updated";
pub const DEFAULT_FETCH_TIMEOUT_SECS: u64 = 10;

pub const USER_AGENT: &str = concat!("packbump/", env!("CARGO_PKG_VERSION"));

pub const DATA_PACK_FORMAT_URL: &str = "https://minecraft.fandom.com/wiki/Pack_format";
pub const RESOURCE_PACK_FORMAT_URL: &str = "https://htg-george.com/minecraft-pack-mcmeta/";

/// Pass-through proxies tried in order after a direct request fails.
/// Each one takes the percent-encoded target URL appended to its prefix.
pub const MIRROR_PREFIXES: &[&str] = &[
    "https://api.allorigins.win/raw?url=",
    "https://api.codetabs.com/v1/proxy/?quest=",
    "https://corsproxy.io/?",
];

/// A scraped table with fewer rows than this is treated as a broken page.
pub const MIN_SCRAPED_ROWS: usize = 10;

/// Schema version for the --json output formats.
/// Increment only on breaking changes to ensure future integrations can safely evolve.
pub const SCHEMA_VERSION: u32 = 1;
