//! In-process game store.
//!
//! Keeps every game in a shared map behind one mutex. Useful for tests and
//! embedding; nothing survives the process.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

use tracing::{debug, info, instrument, warn};

use crate::db::{DbError, check_key};
use crate::game::{Card, Condition, GameError, Guess, Hint, Roster, Seat};
use crate::persister::{GamePersister, GameStore};

/// Everything stored for one game.
#[derive(Debug, Clone)]
struct GameRecord {
    condition: Condition,
    roster: Roster,
    hints: Vec<Hint>,
    guesses: Vec<Guess>,
    cards: Vec<Card>,
}

#[derive(Debug, Default)]
struct Games {
    records: HashMap<i32, GameRecord>,
    next_id: i32,
}

/// Thread-safe in-memory [`GameStore`].
///
/// Cloning shares the same games.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    games: Arc<Mutex<Games>>,
}

impl MemoryStore {
    /// Creates an empty store.
    #[instrument]
    pub fn new() -> Self {
        info!("Creating in-memory game store");
        Self::default()
    }

    fn lock(&self) -> Result<MutexGuard<'_, Games>, DbError> {
        self.games
            .lock()
            .map_err(|_| DbError::new("Game store lock poisoned"))
    }

    /// Ids of all games.
    #[instrument(skip(self))]
    pub fn list_games(&self) -> Result<Vec<i32>, DbError> {
        let games = self.lock()?;
        let mut ids: Vec<_> = games.records.keys().copied().collect();
        ids.sort_unstable();
        Ok(ids)
    }
}

impl GameStore for MemoryStore {
    #[instrument(skip(self, cards), fields(cards = cards.len()))]
    fn create_game(&self, cards: &[Card]) -> Result<i32, DbError> {
        check_key(cards)?;
        let mut games = self.lock()?;
        games.next_id += 1;
        let id = games.next_id;

        let mut cards = cards.to_vec();
        cards.sort_by_key(|c| c.position);
        games.records.insert(
            id,
            GameRecord {
                condition: Condition::NotStarted,
                roster: Roster::new(),
                hints: Vec::new(),
                guesses: Vec::new(),
                cards,
            },
        );
        info!(game_id = id, "Game created");
        Ok(id)
    }

    #[instrument(skip(self, f))]
    fn with_game<T, F>(&self, game_id: i32, f: F) -> Result<T, GameError>
    where
        F: FnOnce(&mut dyn GamePersister) -> Result<T, GameError>,
    {
        let mut games = self.lock()?;
        let record = games
            .records
            .get_mut(&game_id)
            .ok_or_else(|| DbError::game_not_found(game_id))?;

        // Restored on failure so a rejected action leaves no trace.
        let backup = record.clone();
        let result = f(&mut MemoryPersister { game_id, record });
        if result.is_err() {
            debug!(game_id, "Rolling back");
            if let Some(record) = games.records.get_mut(&game_id) {
                *record = backup;
            }
        }
        result
    }
}

/// [`GamePersister`] over one locked [`GameRecord`].
struct MemoryPersister<'g> {
    game_id: i32,
    record: &'g mut GameRecord,
}

impl GamePersister for MemoryPersister<'_> {
    fn game_id(&self) -> i32 {
        self.game_id
    }

    fn read_condition(&mut self) -> Result<Condition, DbError> {
        Ok(self.record.condition)
    }

    fn push_condition(&mut self, condition: Condition) -> Result<(), DbError> {
        debug!(game_id = self.game_id, %condition, "Condition pushed");
        self.record.condition = condition;
        Ok(())
    }

    fn read_roster(&mut self) -> Result<Roster, DbError> {
        Ok(self.record.roster.clone())
    }

    fn assign_seat(&mut self, seat: Seat, participant: &str) -> Result<(), DbError> {
        let roster = &mut self.record.roster;
        if roster.occupant(seat).is_some() || roster.seat_of(participant).is_some() {
            warn!(%seat, participant, "Seat constraint violated");
            return Err(DbError::new(format!(
                "Seat constraint violated for {} / '{}'",
                seat, participant
            )));
        }
        roster.insert(seat, participant);
        Ok(())
    }

    fn read_hints(&mut self) -> Result<Vec<Hint>, DbError> {
        Ok(self.record.hints.clone())
    }

    fn record_hint(&mut self, hint: &Hint) -> Result<(), DbError> {
        self.record.hints.push(hint.clone());
        Ok(())
    }

    fn read_guesses(&mut self) -> Result<Vec<Guess>, DbError> {
        Ok(self.record.guesses.clone())
    }

    fn record_guess(&mut self, guess: &Guess) -> Result<(), DbError> {
        if self
            .record
            .guesses
            .iter()
            .any(|g| g.card_index == guess.card_index)
        {
            return Err(DbError::new(format!(
                "Card {} already guessed",
                guess.card_index
            )));
        }
        self.record.guesses.push(guess.clone());
        Ok(())
    }

    fn read_cards(&mut self) -> Result<Vec<Card>, DbError> {
        Ok(self.record.cards.clone())
    }
}
