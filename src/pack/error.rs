// Per-archive failures; each one is recorded against its file, never fatal to a batch

use thiserror::Error;

#[derive(Debug, Error)]
pub enum PackError {
    #[error("{file} could not be read: {source}")]
    Read {
        file: String,
        #[source]
        source: std::io::Error,
    },

    #[error("{file} is not a valid zip archive: {source}")]
    ArchiveDecode {
        file: String,
        #[source]
        source: zip::result::ZipError,
    },

    #[error("{file} does not contain a pack.mcmeta file")]
    MissingMetadata { file: String },

    #[error("{file} contains an invalid pack.mcmeta file")]
    InvalidMetadata { file: String },

    #[error("{file} does not contain a valid pack configuration in pack.mcmeta")]
    InvalidPackConfig { file: String },

    #[error("{file} could not be written back: {reason}")]
    ArchiveEncode { file: String, reason: String },

    #[error("{file} could not be saved to {path}: {source}")]
    Write {
        file: String,
        path: String,
        #[source]
        source: std::io::Error,
    },
}

impl PackError {
    /// Stable identifier for machine-readable output
    pub fn code(&self) -> &'static str {
        match self {
            PackError::Read { .. } => "read_error",
            PackError::ArchiveDecode { .. } => "archive_decode_error",
            PackError::MissingMetadata { .. } => "missing_metadata",
            PackError::InvalidMetadata { .. } => "invalid_metadata",
            PackError::InvalidPackConfig { .. } => "invalid_pack_config",
            PackError::ArchiveEncode { .. } => "archive_encode_error",
            PackError::Write { .. } => "write_error",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_name_the_file() {
        let err = PackError::MissingMetadata {
            file: "pack.zip".to_string(),
        };
        assert_eq!(err.to_string(), "pack.zip does not contain a pack.mcmeta file");

        let err = PackError::InvalidPackConfig {
            file: "pack.zip".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "pack.zip does not contain a valid pack configuration in pack.mcmeta"
        );
        assert_eq!(err.code(), "invalid_pack_config");
    }
}
