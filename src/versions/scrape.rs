// HTML table scraping for pack format tables

use crate::versions::catalog::CatalogEntry;
use log::debug;
use regex::Regex;

lazy_static::lazy_static! {
    static ref TABLE_RE: Regex =
        Regex::new(r#"(?i)<table class="(wikitable|sortable|article-table)[^>]*>[\s\S]*?</table>"#)
            .expect("valid table regex");
    static ref ROW_RE: Regex = Regex::new(r"(?i)<tr[^>]*>([\s\S]*?)</tr>").expect("valid row regex");
    static ref HEADER_CELL_RE: Regex =
        Regex::new(r"(?i)<th[^>]*>([\s\S]*?)</th>").expect("valid header regex");
    static ref CELL_RE: Regex = Regex::new(r"(?i)<td[^>]*>([\s\S]*?)</td>").expect("valid cell regex");
    static ref TAG_RE: Regex = Regex::new(r"<[^>]*>").expect("valid tag regex");
    static ref RELEASE_PREFIX_RE: Regex = Regex::new(r"^1\.\d+").expect("valid version regex");
}

/// Plain text of a table cell: tags removed, common entities decoded
pub fn cell_text(html: &str) -> String {
    let text = TAG_RE.replace_all(html, "");
    text.replace("&nbsp;", " ")
        .replace("&#160;", " ")
        .replace("&ndash;", "–")
        .replace("&#8211;", "–")
        .replace("&amp;", "&")
        .trim()
        .to_string()
}

/// Column positions of the pack format and version cells
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Columns {
    format: usize,
    version: usize,
}

impl Default for Columns {
    fn default() -> Self {
        Self {
            format: 0,
            version: 1,
        }
    }
}

fn detect_columns(header_row: &str) -> Columns {
    let mut columns = Columns::default();

    for (i, cap) in HEADER_CELL_RE.captures_iter(header_row).enumerate() {
        let cell = cell_text(&cap[1]).to_lowercase();
        if cell.contains("pack") && cell.contains("format") {
            columns.format = i;
        } else if cell.contains("version") && !cell.contains("snapshot") && !cell.contains("beta") {
            columns.version = i;
        }
    }

    columns
}

fn is_pack_format_table(table: &str) -> bool {
    table.contains("pack_format")
        && (table.contains("Version range") || table.contains("Minecraft version"))
}

fn parse_row(row: &str, columns: Columns) -> Option<CatalogEntry> {
    let cells: Vec<String> = CELL_RE
        .captures_iter(row)
        .map(|cap| cell_text(&cap[1]))
        .collect();

    let format = cells.get(columns.format)?;
    let versions = cells.get(columns.version)?;

    if format.is_empty() || !format.bytes().all(|b| b.is_ascii_digit()) {
        debug!("Skipping row with pack format '{}'", format);
        return None;
    }
    if !RELEASE_PREFIX_RE.is_match(versions) {
        debug!("Skipping row with versions '{}'", versions);
        return None;
    }
    if versions.contains("pre") || versions.contains("snapshot") {
        return None;
    }

    Some(CatalogEntry::new(format.parse().ok()?, versions.clone()))
}

/// Scrape (pack format, versions) rows from the first matching table
///
/// Returns `None` when the page has no pack format table at all and an empty
/// list when a table exists but no row survives validation.
pub fn scrape_pack_format_table(html: &str) -> Option<Vec<CatalogEntry>> {
    let mut found_table = false;

    for table in TABLE_RE.find_iter(html) {
        let table = table.as_str();
        if !is_pack_format_table(table) {
            continue;
        }
        found_table = true;

        let rows: Vec<&str> = ROW_RE.find_iter(table).map(|m| m.as_str()).collect();
        let Some((header, body)) = rows.split_first() else {
            continue;
        };

        let columns = detect_columns(header);
        debug!(
            "Pack format table columns: format={}, version={}",
            columns.format, columns.version
        );

        let entries: Vec<CatalogEntry> = body
            .iter()
            .filter_map(|row| parse_row(row, columns))
            .collect();

        if !entries.is_empty() {
            return Some(entries);
        }
    }

    found_table.then(Vec::new)
}
