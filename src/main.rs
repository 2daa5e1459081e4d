//! Codenames engine - command-line front end.

#![warn(missing_docs)]

mod cli;

use anyhow::{Context, Result};
use clap::Parser;
use cli::{Cli, Command};
use codenames_engine::{EngineConfig, GameRepository, GameService, GameStore, load_board};
use tracing::{debug, info, instrument};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = load_config(&cli)?;
    let repository = GameRepository::new(config.database_url().clone())?
        .with_busy_timeout(config.busy_timeout());

    match cli.command {
        Command::Init => {
            repository.run_migrations()?;
            println!("Database ready at {}", repository.db_path());
        }
        Command::Create { board } => {
            let cards = load_board(&board)?;
            let game_id = repository.create_game(&cards)?;
            println!("{}", game_id);
        }
        Command::List => {
            for (game_id, condition) in repository.list_games()? {
                println!("{}\t{}", game_id, condition);
            }
        }
        command => {
            let (target, action) = command
                .into_action()
                .context("Command does not act on a game")?;
            let service = GameService::with_rules(repository, *config.rules());
            let info = service
                .apply(target.game, &target.actor, action)
                .with_context(|| format!("Action failed for game {}", target.game))?;
            println!("{}", serde_json::to_string_pretty(&info)?);
        }
    }

    Ok(())
}

/// Resolves config: file (if given), then environment, then CLI flags.
#[instrument(skip(cli))]
fn load_config(cli: &Cli) -> Result<EngineConfig> {
    let config = match &cli.config {
        Some(path) => EngineConfig::from_file(path)?,
        None => EngineConfig::default(),
    };
    let mut config = config.with_env_overrides();
    if let Some(db_path) = &cli.db_path {
        debug!(%db_path, "Database path from command line");
        config = config.with_database_url(db_path.clone());
    }
    info!(database_url = %config.database_url(), "Configuration resolved");
    Ok(config)
}
