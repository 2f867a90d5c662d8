// Archive rewrite pipeline: one uploaded pack in, one rewritten pack (or an error) out

use crate::constants::METADATA_ENTRY;
use crate::pack::codec::EntryTable;
use crate::pack::error::PackError;
use crate::pack::metadata::{MetadataIssue, PackMetadata};
use crate::pack_type::PackType;
use log::{debug, warn};
use serde::Serialize;
use std::fs;
use std::path::Path;

/// A pack archive selected for processing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadedArchive {
    pub file_name: String,
    pub data: Vec<u8>,
}

impl UploadedArchive {
    pub fn new(file_name: impl Into<String>, data: Vec<u8>) -> Self {
        Self {
            file_name: file_name.into(),
            data,
        }
    }

    pub fn from_path(path: &Path) -> Result<Self, PackError> {
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());

        let data = fs::read(path).map_err(|e| PackError::Read {
            file: file_name.clone(),
            source: e,
        })?;

        Ok(Self { file_name, data })
    }

    pub fn size(&self) -> usize {
        self.data.len()
    }
}

/// What the caller asked for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RewriteOptions {
    pub pack_type: PackType,
    pub format_id: u32,
    pub clear_description: bool,
}

/// A rewritten archive, keyed by the original file name
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputArchive {
    pub file_name: String,
    pub data: Vec<u8>,
}

/// Outcome of processing one archive
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProcessResult {
    pub file_name: String,
    pub success: bool,
    pub pack_type: PackType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format_id: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub original_format: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub original_description: Option<String>,
    /// Name the rewritten archive is saved under; unique within a batch
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_code: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ProcessResult {
    pub(crate) fn failed(file_name: &str, pack_type: PackType, err: &PackError) -> Self {
        Self {
            file_name: file_name.to_string(),
            success: false,
            pack_type,
            format_id: None,
            original_format: None,
            original_description: None,
            output_name: None,
            error_code: Some(err.code()),
            error: Some(err.to_string()),
        }
    }
}

struct Rewritten {
    original_format: Option<i64>,
    original_description: String,
    data: Vec<u8>,
}

fn rewrite(archive: &UploadedArchive, options: &RewriteOptions) -> Result<Rewritten, PackError> {
    let file = || archive.file_name.clone();

    let mut table = EntryTable::load(&archive.data).map_err(|e| PackError::ArchiveDecode {
        file: file(),
        source: e,
    })?;
    debug!("{}: {} entries", archive.file_name, table.len());

    let text = table
        .read_text(METADATA_ENTRY)
        .ok_or_else(|| PackError::MissingMetadata { file: file() })?
        .map_err(|_| PackError::InvalidMetadata { file: file() })?;

    let mut metadata = PackMetadata::parse(text).map_err(|issue| match issue {
        MetadataIssue::Malformed => PackError::InvalidMetadata { file: file() },
        MetadataIssue::MissingPack => PackError::InvalidPackConfig { file: file() },
    })?;

    let original_format = metadata.pack_format();
    let original_description = metadata.description_text();

    metadata.set_pack_format(options.format_id);
    if options.clear_description {
        metadata.clear_description();
    }

    let encoded = metadata
        .to_pretty_json()
        .map_err(|e| PackError::ArchiveEncode {
            file: file(),
            reason: e.to_string(),
        })?;
    table.replace(METADATA_ENTRY, encoded);

    let data = table.to_bytes().map_err(|e| PackError::ArchiveEncode {
        file: file(),
        reason: e.to_string(),
    })?;

    Ok(Rewritten {
        original_format,
        original_description,
        data,
    })
}

/// Rewrite one archive's pack.mcmeta
///
/// Never fails: errors become an unsuccessful `ProcessResult` and no output
/// archive is produced for them.
pub fn process_archive(
    archive: &UploadedArchive,
    options: &RewriteOptions,
) -> (ProcessResult, Option<OutputArchive>) {
    match rewrite(archive, options) {
        Ok(rewritten) => {
            debug!(
                "Rewrote {}: pack_format {:?} -> {}",
                archive.file_name, rewritten.original_format, options.format_id
            );
            let result = ProcessResult {
                file_name: archive.file_name.clone(),
                success: true,
                pack_type: options.pack_type,
                format_id: Some(options.format_id),
                original_format: rewritten.original_format,
                original_description: Some(rewritten.original_description),
                output_name: None,
                error_code: None,
                error: None,
            };
            let output = OutputArchive {
                file_name: archive.file_name.clone(),
                data: rewritten.data,
            };
            (result, Some(output))
        }
        Err(e) => {
            warn!("Error processing file {}: {}", archive.file_name, e);
            (
                ProcessResult::failed(&archive.file_name, options.pack_type, &e),
                None,
            )
        }
    }
}

/// Record a file that could not even be loaded
pub fn unreadable(file_name: &str, pack_type: PackType, err: &PackError) -> ProcessResult {
    warn!("Error processing file {}: {}", file_name, err);
    ProcessResult::failed(file_name, pack_type, err)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pack::codec::tests::build_zip;
    use serde_json::{Value, json};

    fn options(format_id: u32, clear_description: bool) -> RewriteOptions {
        RewriteOptions {
            pack_type: PackType::Data,
            format_id,
            clear_description,
        }
    }

    fn metadata_of(output: &OutputArchive) -> Value {
        let table = EntryTable::load(&output.data).unwrap();
        serde_json::from_str(table.read_text(METADATA_ENTRY).unwrap().unwrap()).unwrap()
    }

    #[test]
    fn test_rewrites_format_and_clears_description() {
        let archive = UploadedArchive::new(
            "pack.zip",
            build_zip(&[(
                "pack.mcmeta",
                r#"{"pack":{"pack_format":5,"description":"Hi"}}"#,
            )]),
        );

        let (result, output) = process_archive(&archive, &options(48, true));

        assert!(result.success);
        assert_eq!(result.format_id, Some(48));
        assert_eq!(result.original_format, Some(5));
        assert_eq!(result.original_description.as_deref(), Some("Hi"));

        let output = output.expect("rewritten archive");
        assert_eq!(output.file_name, "pack.zip");
        assert_eq!(
            metadata_of(&output),
            json!({"pack": {"pack_format": 48, "description": ""}})
        );
    }

    #[test]
    fn test_keeps_description_and_other_entries() {
        let archive = UploadedArchive::new(
            "rp.zip",
            build_zip(&[
                ("pack.mcmeta", r#"{"pack":{"pack_format":13,"description":"Keep me"}}"#),
                ("assets/minecraft/lang/en_us.json", "{}"),
            ]),
        );

        let (result, output) = process_archive(&archive, &options(22, false));
        assert!(result.success);

        let output = output.unwrap();
        assert_eq!(
            metadata_of(&output),
            json!({"pack": {"pack_format": 22, "description": "Keep me"}})
        );
        let table = EntryTable::load(&output.data).unwrap();
        assert!(table.contains("assets/minecraft/lang/en_us.json"));
    }

    #[test]
    fn test_writes_four_space_indent() {
        let archive = UploadedArchive::new(
            "pack.zip",
            build_zip(&[("pack.mcmeta", r#"{"pack":{"pack_format":5}}"#)]),
        );
        let (_, output) = process_archive(&archive, &options(6, false));
        let table = EntryTable::load(&output.unwrap().data).unwrap();
        let text = table.read_text(METADATA_ENTRY).unwrap().unwrap().to_string();
        assert!(text.contains("\n        \"pack_format\": 6"), "{}", text);
    }

    #[test]
    fn test_missing_metadata() {
        let archive = UploadedArchive::new("empty.zip", build_zip(&[("data/x.json", "{}")]));
        let (result, output) = process_archive(&archive, &options(48, false));

        assert!(!result.success);
        assert!(output.is_none());
        assert_eq!(result.error_code, Some("missing_metadata"));
        assert!(
            result
                .error
                .unwrap()
                .contains("does not contain a pack.mcmeta")
        );
    }

    #[test]
    fn test_metadata_lookup_is_case_sensitive() {
        let archive = UploadedArchive::new(
            "upper.zip",
            build_zip(&[("PACK.MCMETA", r#"{"pack":{"pack_format":5}}"#)]),
        );
        let (result, _) = process_archive(&archive, &options(48, false));
        assert_eq!(result.error_code, Some("missing_metadata"));
    }

    #[test]
    fn test_nested_metadata_does_not_count() {
        let archive = UploadedArchive::new(
            "nested.zip",
            build_zip(&[("inner/pack.mcmeta", r#"{"pack":{"pack_format":5}}"#)]),
        );
        let (result, _) = process_archive(&archive, &options(48, false));
        assert_eq!(result.error_code, Some("missing_metadata"));
    }

    #[test]
    fn test_invalid_json() {
        let archive = UploadedArchive::new("bad.zip", build_zip(&[("pack.mcmeta", "{nope")]));
        let (result, output) = process_archive(&archive, &options(48, false));

        assert!(output.is_none());
        assert_eq!(result.error_code, Some("invalid_metadata"));
        assert_eq!(
            result.error.as_deref(),
            Some("bad.zip contains an invalid pack.mcmeta file")
        );
    }

    #[test]
    fn test_missing_pack_object() {
        let archive = UploadedArchive::new(
            "nopack.zip",
            build_zip(&[("pack.mcmeta", r#"{"filter":{}}"#)]),
        );
        let (result, _) = process_archive(&archive, &options(48, false));
        assert_eq!(result.error_code, Some("invalid_pack_config"));
    }

    #[test]
    fn test_not_a_zip() {
        let archive = UploadedArchive::new("junk.zip", b"PK? not really".to_vec());
        let (result, output) = process_archive(&archive, &options(48, false));

        assert!(output.is_none());
        assert_eq!(result.error_code, Some("archive_decode_error"));
        assert!(result.error.unwrap().starts_with("junk.zip is not a valid zip archive"));
    }

    #[test]
    fn test_input_is_not_mutated() {
        let data = build_zip(&[("pack.mcmeta", r#"{"pack":{"pack_format":5}}"#)]);
        let archive = UploadedArchive::new("pack.zip", data.clone());
        let _ = process_archive(&archive, &options(48, true));
        assert_eq!(archive.data, data);
    }
}
