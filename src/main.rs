mod cli;
mod commands;
mod config;
mod constants;
mod pack;
mod pack_type;
mod ui;
mod versions;

use clap::Parser;
use cli::{Cli, Commands};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let default_filter = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .format_timestamp(None)
        .init();

    let offline = cli.offline || config::offline();

    let result = match cli.command {
        Commands::Versions { pack_type, json } => {
            commands::versions::list_versions(pack_type, json, offline).await
        }
        Commands::Update(args) => commands::update::update(args, offline).await,
    };

    match result {
        Ok(code) => std::process::exit(code),
        Err(e) => {
            ui::error(&format!("{:#}", e));
            std::process::exit(1);
        }
    }
}
