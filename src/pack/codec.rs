// In-memory zip entry table: load, read, replace, serialize

use std::io::{Cursor, Read, Write};
use zip::CompressionMethod;
use zip::result::{ZipError, ZipResult};
use zip::write::{FileOptions, ZipWriter};

#[derive(Debug, Clone)]
struct Entry {
    name: String,
    data: Vec<u8>,
    is_dir: bool,
    compression: CompressionMethod,
}

/// All entries of an archive, in their original order
#[derive(Debug, Clone, Default)]
pub struct EntryTable {
    entries: Vec<Entry>,
}

impl EntryTable {
    /// Decode a zip blob into an entry table
    pub fn load(bytes: &[u8]) -> ZipResult<Self> {
        let mut archive = zip::ZipArchive::new(Cursor::new(bytes))?;
        let mut entries = Vec::with_capacity(archive.len());

        for i in 0..archive.len() {
            let mut file = archive.by_index(i)?;
            let mut data = Vec::new();
            if !file.is_dir() {
                file.read_to_end(&mut data)?;
            }

            entries.push(Entry {
                name: file.name().to_string(),
                is_dir: file.is_dir(),
                compression: file.compression(),
                data,
            });
        }

        Ok(Self { entries })
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[allow(dead_code)]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[allow(dead_code)]
    pub fn contains(&self, name: &str) -> bool {
        self.find(name).is_some()
    }

    fn find(&self, name: &str) -> Option<&Entry> {
        self.entries.iter().find(|e| !e.is_dir && e.name == name)
    }

    /// Raw bytes of a file entry (exact, case-sensitive path)
    pub fn read(&self, name: &str) -> Option<&[u8]> {
        self.find(name).map(|e| e.data.as_slice())
    }

    /// UTF-8 contents of a file entry; `None` when the entry is absent
    pub fn read_text(&self, name: &str) -> Option<Result<&str, std::str::Utf8Error>> {
        self.read(name).map(std::str::from_utf8)
    }

    /// Replace (or add) a file entry's contents
    pub fn replace(&mut self, name: &str, data: Vec<u8>) {
        match self
            .entries
            .iter_mut()
            .find(|e| !e.is_dir && e.name == name)
        {
            Some(entry) => entry.data = data,
            None => self.entries.push(Entry {
                name: name.to_string(),
                data,
                is_dir: false,
                compression: CompressionMethod::Deflated,
            }),
        }
    }

    /// Encode the table back into a zip blob
    ///
    /// Stored entries stay stored; everything else is written deflated.
    pub fn to_bytes(&self) -> ZipResult<Vec<u8>> {
        let mut writer = ZipWriter::new(Cursor::new(Vec::new()));

        for entry in &self.entries {
            let method = match entry.compression {
                CompressionMethod::Stored => CompressionMethod::Stored,
                _ => CompressionMethod::Deflated,
            };
            let options = FileOptions::<()>::default().compression_method(method);

            if entry.is_dir {
                writer.add_directory(entry.name.as_str(), options)?;
            } else {
                writer.start_file(entry.name.as_str(), options)?;
                writer.write_all(&entry.data).map_err(ZipError::Io)?;
            }
        }

        Ok(writer.finish()?.into_inner())
    }
}
