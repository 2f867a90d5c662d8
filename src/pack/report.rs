// Batch report: per-file results plus the archives that made it

use crate::pack::error::PackError;
use crate::pack::pipeline::{OutputArchive, ProcessResult};
use log::warn;
use serde::Serialize;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Summary {
    pub total: usize,
    pub succeeded: usize,
    pub failed: usize,
}

/// Results of one update run, in input order
#[derive(Debug, Clone, Default)]
pub struct BatchReport {
    results: Vec<ProcessResult>,
    outputs: Vec<OutputArchive>,
}

/// "pack (1).zip" for the first clash on "pack.zip"
fn numbered_name(file_name: &str, n: usize) -> String {
    match file_name.rsplit_once('.') {
        Some((stem, ext)) if !stem.is_empty() => format!("{} ({}).{}", stem, n, ext),
        _ => format!("{} ({})", file_name, n),
    }
}

impl BatchReport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a result; its output (if any) gets a name no earlier output uses
    pub fn record(&mut self, mut result: ProcessResult, output: Option<OutputArchive>) {
        if let Some(mut output) = output {
            output.file_name = self.unused_name(&output.file_name);
            result.output_name = Some(output.file_name.clone());
            self.outputs.push(output);
        }
        self.results.push(result);
    }

    fn unused_name(&self, file_name: &str) -> String {
        let taken = |name: &str| self.outputs.iter().any(|o| o.file_name == name);
        if !taken(file_name) {
            return file_name.to_string();
        }

        let mut n = 1;
        loop {
            let candidate = numbered_name(file_name, n);
            if !taken(&candidate) {
                return candidate;
            }
            n += 1;
        }
    }

    pub fn results(&self) -> &[ProcessResult] {
        &self.results
    }

    pub fn succeeded(&self) -> usize {
        self.results.iter().filter(|r| r.success).count()
    }

    pub fn failed(&self) -> usize {
        self.results.len() - self.succeeded()
    }

    pub fn counts(&self) -> Summary {
        Summary {
            total: self.results.len(),
            succeeded: self.succeeded(),
            failed: self.failed(),
        }
    }

    /// e.g. "2 of 3 succeeded"
    pub fn summary(&self) -> String {
        format!("{} of {} succeeded", self.succeeded(), self.results.len())
    }

    pub fn outputs(&self) -> &[OutputArchive] {
        &self.outputs
    }

    pub fn output(&self, file_name: &str) -> Option<&OutputArchive> {
        self.outputs.iter().find(|o| o.file_name == file_name)
    }

    /// Write one rewritten archive into `dir`
    #[allow(dead_code)]
    pub fn save(&self, file_name: &str, dir: &Path) -> anyhow::Result<PathBuf> {
        let output = self
            .output(file_name)
            .ok_or_else(|| anyhow::anyhow!("No updated archive named '{}'", file_name))?;
        write_output(output, dir)
            .map_err(|e| anyhow::anyhow!("Failed to write {}: {}", output.file_name, e))
    }

    /// Write every rewritten archive into `dir`
    ///
    /// An archive that cannot be written turns its result into a failure and
    /// is dropped from the outputs; the others are still written.
    pub fn save_all(&mut self, dir: &Path) -> Vec<PathBuf> {
        let mut written = Vec::new();
        let mut kept = Vec::new();

        for output in std::mem::take(&mut self.outputs) {
            match write_output(&output, dir) {
                Ok(path) => {
                    written.push(path);
                    kept.push(output);
                }
                Err(e) => self.mark_unsaved(&output, dir, e),
            }
        }

        self.outputs = kept;
        written
    }

    fn mark_unsaved(&mut self, output: &OutputArchive, dir: &Path, source: io::Error) {
        let Some(result) = self
            .results
            .iter_mut()
            .find(|r| r.output_name.as_deref() == Some(output.file_name.as_str()))
        else {
            return;
        };

        let err = PackError::Write {
            file: result.file_name.clone(),
            path: dir.join(&output.file_name).display().to_string(),
            source,
        };
        warn!("Error saving file {}: {}", result.file_name, err);

        *result = ProcessResult::failed(&result.file_name, result.pack_type, &err);
    }
}

fn write_output(output: &OutputArchive, dir: &Path) -> io::Result<PathBuf> {
    fs::create_dir_all(dir)?;
    let path = dir.join(&output.file_name);
    if let Err(e) = fs::write(&path, &output.data) {
        // no partial archive left behind
        if path.is_file() {
            let _ = fs::remove_file(&path);
        }
        return Err(e);
    }
    Ok(path)
}
