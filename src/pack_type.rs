// Pack kinds, each with its own pack_format history

use clap::ValueEnum;
use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ValueEnum, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PackType {
    Data,
    Resource,
}

impl PackType {
    pub const ALL: [PackType; 2] = [PackType::Data, PackType::Resource];

    /// Human-readable label used in reports
    pub fn label(self) -> &'static str {
        match self {
            PackType::Data => "Data Pack",
            PackType::Resource => "Resource Pack",
        }
    }
}

impl fmt::Display for PackType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
