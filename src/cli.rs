//! Command-line interface for the codenames engine.

use clap::{Args, Parser, Subcommand};
use codenames_engine::{Action, Color, Role};

/// Codenames rules engine - apply game actions against a SQLite store
#[derive(Parser, Debug)]
#[command(name = "codenames")]
#[command(about = "Server-side rules engine for a team word-guessing game", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Path to a TOML engine config
    #[arg(short, long, global = true)]
    pub config: Option<std::path::PathBuf>,

    /// Database path (overrides config and environment)
    #[arg(long, global = true)]
    pub db_path: Option<String>,

    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Game and participant a command acts on
#[derive(Args, Debug)]
pub struct Target {
    /// Game id
    #[arg(short, long)]
    pub game: i32,

    /// Session id of the acting participant
    #[arg(short, long)]
    pub actor: String,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Create or upgrade the database schema
    Init,

    /// Create a game from a board file
    Create {
        /// TOML file with [[cards]] entries (word, color)
        #[arg(short, long)]
        board: std::path::PathBuf,
    },

    /// List games and their condition
    List,

    /// Show the game as the actor sees it
    Info(Target),

    /// Take a seat
    Join {
        #[command(flatten)]
        target: Target,

        /// Team (red or blue)
        #[arg(long)]
        color: Color,

        /// Role (spymaster or player)
        #[arg(long)]
        role: Role,
    },

    /// Start the game once every seat is taken
    Start(Target),

    /// Give a hint as the active spymaster
    Hint {
        #[command(flatten)]
        target: Target,

        /// Clue word
        #[arg(long)]
        word: String,

        /// Number of cards the clue covers (0 = unlimited guesses)
        #[arg(long)]
        num: u32,
    },

    /// Guess a card as the active player
    Guess {
        #[command(flatten)]
        target: Target,

        /// Board position of the card
        #[arg(long)]
        card: usize,
    },

    /// Stop guessing and pass the turn
    EndTurn(Target),
}

impl Command {
    /// Splits a game command into its target and action.
    ///
    /// Returns `None` for commands that do not act on a game.
    pub fn into_action(self) -> Option<(Target, Action)> {
        match self {
            Command::Init | Command::Create { .. } | Command::List => None,
            Command::Info(target) => Some((target, Action::GetInfo)),
            Command::Join {
                target,
                color,
                role,
            } => Some((target, Action::Join { color, role })),
            Command::Start(target) => Some((target, Action::StartGame)),
            Command::Hint { target, word, num } => Some((target, Action::GiveHint { word, num })),
            Command::Guess { target, card } => Some((target, Action::Guess { card_index: card })),
            Command::EndTurn(target) => Some((target, Action::EndTurn)),
        }
    }
}
