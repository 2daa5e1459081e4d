//! Codenames engine - server-side rules for a team word-guessing game.
//!
//! Two teams, each with a spymaster and a player, take turns: the spymaster
//! gives a one-word hint, the player guesses cards until they miss, run out
//! of guesses or stop. The engine enforces whose move it is and persists
//! every step.
//!
//! # Architecture
//!
//! - **Game**: enumerations, records and one state variant per phase
//! - **Dispatch**: [`load_state`] rebuilds the variant from the stored
//!   [`Condition`] on every request
//! - **Persistence**: the [`GamePersister`] port, with SQLite
//!   ([`GameRepository`]) and in-memory ([`MemoryStore`]) stores
//! - **Service**: [`GameService::apply`], one action in, one snapshot out
//!
//! # Example
//!
//! ```no_run
//! use codenames_engine::{Color, GameRepository, GameService, Role};
//!
//! # fn example() -> anyhow::Result<()> {
//! let repository = GameRepository::new("codenames.db".to_string())?;
//! repository.run_migrations()?;
//!
//! let service = GameService::new(repository);
//! let info = service.join(1, "session-abc", Color::Red, Role::Spymaster)?;
//! println!("{}", info.condition());
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Private module declarations
mod config;
mod db;
mod game;
mod memory;
mod persister;
mod service;

// Crate-level exports - Configuration
pub use config::{ConfigError, DATABASE_URL_ENV, EngineConfig, load_board, parse_board};

// Crate-level exports - Persistence
pub use db::{DbError, GameRepository, MIGRATIONS, SqliteGamePersister};
pub use memory::MemoryStore;
pub use persister::{GamePersister, GameStore};

// Crate-level exports - Game rules
pub use game::{
    Action, Board, Card, CardColor, CardView, Color, Condition, ErrorKind, GameError, GameInfo,
    GameOver, GameState, Guess, Hint, Metadata, NotStarted, Phase, PlayerTurn, Role, Roster,
    Rules, Seat, SeatAssignment, SpyTurn, StateContext, StateError, load_state,
};

// Crate-level exports - Service
pub use service::GameService;
