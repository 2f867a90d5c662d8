// Pack archives: zip entry table, metadata rewrite, batch session and report

pub mod codec;
pub mod error;
pub mod metadata;
pub mod pipeline;
pub mod report;
pub mod session;

pub use error::PackError;
pub use pipeline::{OutputArchive, ProcessResult, RewriteOptions, UploadedArchive, process_archive};
pub use report::BatchReport;
pub use session::{Rejection, UpdateSession, has_archive_extension};
