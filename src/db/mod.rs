//! SQLite persistence of games, rosters, hints, guesses and board keys.

mod error;
mod models;
mod repository;
mod schema; // Diesel generated schema - internal use only

pub use error::DbError;
pub use repository::{GameRepository, MIGRATIONS, SqliteGamePersister};
pub(crate) use repository::check_key;
