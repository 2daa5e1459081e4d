//! Persistence port consumed by the game states.
//!
//! The state machine never caches mutable game data. Every decision reads
//! through a [`GamePersister`], and every change is written through it before
//! the operation returns.

use tracing::instrument;

use crate::db::DbError;
use crate::game::{Board, Card, Condition, GameError, GameInfo, Guess, Hint, Roster, Seat};

/// Durable storage of one game.
///
/// Hints and guesses are append-only: the port offers no way to change or
/// remove a recorded entry.
pub trait GamePersister {
    /// Id of the game this persister is bound to.
    fn game_id(&self) -> i32;

    /// Reads the current phase.
    fn read_condition(&mut self) -> Result<Condition, DbError>;

    /// Sets the current phase. The only way a phase advances.
    fn push_condition(&mut self, condition: Condition) -> Result<(), DbError>;

    /// Reads all seat assignments.
    fn read_roster(&mut self) -> Result<Roster, DbError>;

    /// Assigns a participant to a seat.
    fn assign_seat(&mut self, seat: Seat, participant: &str) -> Result<(), DbError>;

    /// Reads the hint log in insertion order.
    fn read_hints(&mut self) -> Result<Vec<Hint>, DbError>;

    /// Appends a hint.
    fn record_hint(&mut self, hint: &Hint) -> Result<(), DbError>;

    /// Reads the guess log in insertion order.
    fn read_guesses(&mut self) -> Result<Vec<Guess>, DbError>;

    /// Appends a guess.
    fn record_guess(&mut self, guess: &Guess) -> Result<(), DbError>;

    /// Reads the card key in position order.
    fn read_cards(&mut self) -> Result<Vec<Card>, DbError>;

    /// Reads the key and guesses into a [`Board`].
    fn read_board(&mut self) -> Result<Board, DbError> {
        let cards = self.read_cards()?;
        let guesses = self.read_guesses()?;
        Ok(Board::new(cards, &guesses))
    }

    /// Reads a full, unredacted snapshot.
    #[instrument(skip(self), fields(game_id = self.game_id()))]
    fn get_info(&mut self) -> Result<GameInfo, DbError> {
        let condition = self.read_condition()?;
        let roster = self.read_roster()?;
        let hints = self.read_hints()?;
        let guesses = self.read_guesses()?;
        let board = Board::new(self.read_cards()?, &guesses);
        Ok(GameInfo::assemble(
            self.game_id(),
            condition,
            roster,
            hints,
            guesses,
            &board,
        ))
    }
}

/// Source of [`GamePersister`]s that serializes work per game.
///
/// `with_game` runs `f` as one exclusive unit: no other writer can change the
/// same game between the condition read and the writes `f` performs. If `f`
/// fails, nothing it wrote is kept.
pub trait GameStore {
    /// Creates a game in [`Condition::NotStarted`] with the given key.
    fn create_game(&self, cards: &[Card]) -> Result<i32, DbError>;

    /// Runs `f` against the game with exclusive access.
    fn with_game<T, F>(&self, game_id: i32, f: F) -> Result<T, GameError>
    where
        F: FnOnce(&mut dyn GamePersister) -> Result<T, GameError>;
}
