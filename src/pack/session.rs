// Update session: the selected archives and the report of the last run

use crate::constants::ARCHIVE_EXTENSION;
use crate::pack::pipeline::{ProcessResult, RewriteOptions, UploadedArchive, process_archive};
use crate::pack::report::BatchReport;
use log::debug;

/// Why an archive was not added to the selection
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rejection {
    NotAnArchive(String),
    Duplicate(String),
}

/// One selected input, in the order it was given
#[derive(Debug, Clone)]
pub enum Selected {
    Loaded(UploadedArchive),
    /// Named like an archive but could not be loaded; reported as-is
    Unreadable(ProcessResult),
}

impl Selected {
    pub fn file_name(&self) -> &str {
        match self {
            Selected::Loaded(archive) => &archive.file_name,
            Selected::Unreadable(result) => &result.file_name,
        }
    }
}

/// Owns everything one update interaction needs; no global state
#[derive(Debug, Default)]
pub struct UpdateSession {
    selected: Vec<Selected>,
    report: Option<BatchReport>,
}

pub fn has_archive_extension(file_name: &str) -> bool {
    file_name.ends_with(&format!(".{}", ARCHIVE_EXTENSION))
}

impl UpdateSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an archive to the selection
    ///
    /// Only `.zip` files are accepted, and a file with the same name and size
    /// as one already selected is ignored.
    pub fn add(&mut self, archive: UploadedArchive) -> Result<(), Rejection> {
        if !has_archive_extension(&archive.file_name) {
            return Err(Rejection::NotAnArchive(archive.file_name));
        }

        let duplicate = self.selected.iter().any(|s| match s {
            Selected::Loaded(a) => a.file_name == archive.file_name && a.size() == archive.size(),
            Selected::Unreadable(_) => false,
        });
        if duplicate {
            return Err(Rejection::Duplicate(archive.file_name));
        }

        debug!("Selected {} ({} bytes)", archive.file_name, archive.size());
        self.selected.push(Selected::Loaded(archive));
        Ok(())
    }

    /// Keep the slot of an input that failed to load
    pub fn add_unreadable(&mut self, result: ProcessResult) {
        debug!("Selected unreadable {}", result.file_name);
        self.selected.push(Selected::Unreadable(result));
    }

    #[allow(dead_code)]
    pub fn remove(&mut self, index: usize) -> Option<Selected> {
        (index < self.selected.len()).then(|| self.selected.remove(index))
    }

    #[allow(dead_code)]
    pub fn clear(&mut self) {
        self.selected.clear();
        self.report = None;
    }

    pub fn selected(&self) -> &[Selected] {
        &self.selected
    }

    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }

    /// Process every selected archive in order, replacing the previous report
    ///
    /// `on_progress` is called after each archive with its result.
    pub fn run<F>(&mut self, options: &RewriteOptions, mut on_progress: F) -> &BatchReport
    where
        F: FnMut(&ProcessResult),
    {
        let mut report = BatchReport::new();

        for selected in &self.selected {
            let (result, output) = match selected {
                Selected::Loaded(archive) => process_archive(archive, options),
                Selected::Unreadable(result) => (result.clone(), None),
            };
            on_progress(&result);
            report.record(result, output);
        }

        self.report.insert(report)
    }

    #[allow(dead_code)]
    pub fn report(&self) -> Option<&BatchReport> {
        self.report.as_ref()
    }
}
