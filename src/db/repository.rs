//! SQLite-backed game store.

use std::collections::BTreeSet;
use std::time::Duration;

use diesel::connection::SimpleConnection;
use diesel::prelude::*;
use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};
use tracing::{debug, info, instrument, warn};

use crate::db::models::{CardRow, GameRow, GuessRow, HintRow, NewGame, NewGuess, NewHint, SeatRow};
use crate::db::{DbError, schema};
use crate::game::{Card, Color, Condition, GameError, Guess, Hint, Roster, Seat};
use crate::persister::{GamePersister, GameStore};

/// Schema migrations compiled into the binary.
pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

/// Database repository for games.
///
/// Opens one connection per unit of work. Each [`GameStore::with_game`] call
/// runs inside a `BEGIN IMMEDIATE` transaction, which holds SQLite's write
/// lock from the first read, so two requests against the same game are
/// applied one after the other.
#[derive(Debug, Clone)]
pub struct GameRepository {
    db_path: String,
    busy_timeout: Duration,
}

impl GameRepository {
    /// Creates a new repository for the database at the given path.
    ///
    /// Use `":memory:"` only for single-connection experiments: every call
    /// opens a fresh connection, so an in-memory database starts empty each
    /// time.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if the path is empty.
    #[instrument(skip(db_path), fields(db_path = %db_path))]
    pub fn new(db_path: String) -> Result<Self, DbError> {
        if db_path.trim().is_empty() {
            return Err(DbError::new("Database path is empty"));
        }
        info!(path = %db_path, "Creating GameRepository");
        Ok(Self {
            db_path,
            busy_timeout: Duration::from_secs(5),
        })
    }

    /// Sets how long a connection waits on a locked database.
    pub fn with_busy_timeout(mut self, busy_timeout: Duration) -> Self {
        self.busy_timeout = busy_timeout;
        self
    }

    /// Path of the database.
    pub fn db_path(&self) -> &str {
        &self.db_path
    }

    /// Establishes a database connection with the busy timeout applied.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if the database cannot be opened.
    #[instrument(skip(self))]
    pub fn connection(&self) -> Result<SqliteConnection, DbError> {
        debug!(path = %self.db_path, "Establishing connection");
        let mut conn = SqliteConnection::establish(&self.db_path)
            .map_err(|e| DbError::new(format!("Failed to connect to '{}': {}", self.db_path, e)))?;

        conn.batch_execute(&format!(
            "PRAGMA busy_timeout = {}; PRAGMA foreign_keys = ON;",
            self.busy_timeout.as_millis()
        ))?;
        Ok(conn)
    }

    /// Applies pending schema migrations.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if a migration fails.
    #[instrument(skip(self))]
    pub fn run_migrations(&self) -> Result<(), DbError> {
        let mut conn = self.connection()?;
        let applied = conn
            .run_pending_migrations(MIGRATIONS)
            .map_err(|e| DbError::new(format!("Migrations failed: {}", e)))?;
        info!(count = applied.len(), "Migrations applied");
        Ok(())
    }

    /// Lists all games with their current condition, oldest first.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if a database error occurs or a row is corrupt.
    #[instrument(skip(self))]
    pub fn list_games(&self) -> Result<Vec<(i32, Condition)>, DbError> {
        let mut conn = self.connection()?;
        let rows = schema::games::table
            .order(schema::games::id.asc())
            .select(GameRow::as_select())
            .load::<GameRow>(&mut conn)?;

        let games = rows
            .iter()
            .map(|row| Ok((*row.id(), row.parse_condition()?)))
            .collect::<Result<Vec<_>, DbError>>()?;
        info!(count = games.len(), "Games listed");
        Ok(games)
    }
}

/// Checks a board key before it is stored.
///
/// Positions must be distinct and each team needs at least one card.
#[instrument(skip(cards), fields(count = cards.len()))]
pub(crate) fn check_key(cards: &[Card]) -> Result<(), DbError> {
    let mut positions = BTreeSet::new();
    for card in cards {
        if !positions.insert(card.position) {
            return Err(DbError::new(format!(
                "Duplicate card position {}",
                card.position
            )));
        }
    }
    for color in [Color::Red, Color::Blue] {
        if !cards.iter().any(|c| c.color.team() == Some(color)) {
            return Err(DbError::new(format!("Board has no {} cards", color)));
        }
    }
    Ok(())
}

impl GameStore for GameRepository {
    #[instrument(skip(self, cards), fields(cards = cards.len()))]
    fn create_game(&self, cards: &[Card]) -> Result<i32, DbError> {
        check_key(cards)?;
        let mut conn = self.connection()?;

        let game = conn.immediate_transaction(|conn| -> Result<GameRow, DbError> {
            let game = diesel::insert_into(schema::games::table)
                .values(&NewGame::new(Condition::NotStarted.to_string()))
                .returning(GameRow::as_returning())
                .get_result::<GameRow>(conn)?;

            let rows = cards
                .iter()
                .map(|card| CardRow::from_card(*game.id(), card))
                .collect::<Result<Vec<_>, _>>()?;
            diesel::insert_into(schema::cards::table)
                .values(&rows)
                .execute(conn)?;
            Ok(game)
        })?;

        info!(game_id = game.id(), "Game created");
        Ok(*game.id())
    }

    #[instrument(skip(self, f))]
    fn with_game<T, F>(&self, game_id: i32, f: F) -> Result<T, GameError>
    where
        F: FnOnce(&mut dyn GamePersister) -> Result<T, GameError>,
    {
        let mut conn = self.connection()?;
        conn.immediate_transaction(|conn| {
            let mut persister = SqliteGamePersister::new(game_id, conn);
            f(&mut persister)
        })
    }
}

/// [`GamePersister`] over one open SQLite connection.
pub struct SqliteGamePersister<'c> {
    game_id: i32,
    conn: &'c mut SqliteConnection,
}

impl<'c> SqliteGamePersister<'c> {
    /// Binds a game id to a connection.
    pub fn new(game_id: i32, conn: &'c mut SqliteConnection) -> Self {
        Self { game_id, conn }
    }

    fn conn(&mut self) -> &mut SqliteConnection {
        self.conn
    }
}

impl GamePersister for SqliteGamePersister<'_> {
    fn game_id(&self) -> i32 {
        self.game_id
    }

    #[instrument(skip(self), fields(game_id = self.game_id))]
    fn read_condition(&mut self) -> Result<Condition, DbError> {
        let game_id = self.game_id;
        let row = schema::games::table
            .find(game_id)
            .select(GameRow::as_select())
            .first::<GameRow>(self.conn())
            .optional()?
            .ok_or_else(|| DbError::game_not_found(game_id))?;
        row.parse_condition()
    }

    #[instrument(skip(self), fields(game_id = self.game_id))]
    fn push_condition(&mut self, condition: Condition) -> Result<(), DbError> {
        let game_id = self.game_id;
        let updated = diesel::update(schema::games::table.find(game_id))
            .set((
                schema::games::condition.eq(condition.to_string()),
                schema::games::updated_at.eq(diesel::dsl::now),
            ))
            .execute(self.conn())?;

        if updated != 1 {
            warn!(updated, "Condition update touched unexpected row count");
            return Err(DbError::game_not_found(game_id));
        }
        debug!(%condition, "Condition pushed");
        Ok(())
    }

    #[instrument(skip(self), fields(game_id = self.game_id))]
    fn read_roster(&mut self) -> Result<Roster, DbError> {
        let rows = schema::seats::table
            .filter(schema::seats::game_id.eq(self.game_id))
            .select(SeatRow::as_select())
            .load::<SeatRow>(self.conn())?;

        let mut roster = Roster::new();
        for row in &rows {
            roster.insert(row.seat()?, row.participant().clone());
        }
        Ok(roster)
    }

    #[instrument(skip(self), fields(game_id = self.game_id))]
    fn assign_seat(&mut self, seat: Seat, participant: &str) -> Result<(), DbError> {
        let row = SeatRow::from_seat(self.game_id, seat, participant);
        diesel::insert_into(schema::seats::table)
            .values(&row)
            .execute(self.conn())?;
        debug!(%seat, participant, "Seat assigned");
        Ok(())
    }

    #[instrument(skip(self), fields(game_id = self.game_id))]
    fn read_hints(&mut self) -> Result<Vec<Hint>, DbError> {
        schema::hints::table
            .filter(schema::hints::game_id.eq(self.game_id))
            .order(schema::hints::id.asc())
            .select(HintRow::as_select())
            .load::<HintRow>(self.conn())?
            .into_iter()
            .map(Hint::try_from)
            .collect()
    }

    #[instrument(skip(self), fields(game_id = self.game_id))]
    fn record_hint(&mut self, hint: &Hint) -> Result<(), DbError> {
        let row = NewHint::from_hint(self.game_id, hint)?;
        diesel::insert_into(schema::hints::table)
            .values(&row)
            .execute(self.conn())?;
        Ok(())
    }

    #[instrument(skip(self), fields(game_id = self.game_id))]
    fn read_guesses(&mut self) -> Result<Vec<Guess>, DbError> {
        schema::guesses::table
            .filter(schema::guesses::game_id.eq(self.game_id))
            .order(schema::guesses::id.asc())
            .select(GuessRow::as_select())
            .load::<GuessRow>(self.conn())?
            .into_iter()
            .map(Guess::try_from)
            .collect()
    }

    #[instrument(skip(self), fields(game_id = self.game_id))]
    fn record_guess(&mut self, guess: &Guess) -> Result<(), DbError> {
        let row = NewGuess::from_guess(self.game_id, guess)?;
        diesel::insert_into(schema::guesses::table)
            .values(&row)
            .execute(self.conn())?;
        Ok(())
    }

    #[instrument(skip(self), fields(game_id = self.game_id))]
    fn read_cards(&mut self) -> Result<Vec<Card>, DbError> {
        schema::cards::table
            .filter(schema::cards::game_id.eq(self.game_id))
            .order(schema::cards::position.asc())
            .select(CardRow::as_select())
            .load::<CardRow>(self.conn())?
            .into_iter()
            .map(Card::try_from)
            .collect()
    }
}
