// CLI module for handling command-line interface

use crate::pack_type::PackType;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "packbump")]
#[command(version)]
#[command(about = "Batch-update the pack_format of Minecraft data packs and resource packs")]
pub struct Cli {
    /// Skip network lookups and use the built-in version tables
    #[arg(long, global = true)]
    pub offline: bool,

    /// Show debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List Minecraft versions and the pack_format each one uses
    Versions {
        /// Only list one pack type (both when omitted)
        #[arg(long = "type", value_enum)]
        pack_type: Option<PackType>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Rewrite pack.mcmeta in one or more pack archives
    Update(UpdateArgs),
}

#[derive(Args)]
pub struct UpdateArgs {
    /// Pack archives (.zip) to update
    #[arg(required = true)]
    pub files: Vec<PathBuf>,

    #[arg(long = "type", value_enum, default_value = "data")]
    pub pack_type: PackType,

    /// Target Minecraft version (newest known when omitted)
    #[arg(long, conflicts_with = "format")]
    pub version: Option<String>,

    /// Write this pack_format directly without looking up a version
    #[arg(long)]
    pub format: Option<u32>,

    /// Blank out the pack description
    #[arg(long)]
    pub clear_description: bool,

    /// Directory for updated archives (default: $PACKBUMP_OUT_DIR or ./updated)
    #[arg(long)]
    pub out_dir: Option<PathBuf>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}
