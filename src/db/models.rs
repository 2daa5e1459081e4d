//! Database rows and their conversion to game records.

use std::str::FromStr;

use chrono::NaiveDateTime;
use derive_getters::Getters;
use derive_new::new;
use diesel::prelude::*;
use tracing::instrument;

use crate::db::{DbError, schema};
use crate::game::{Card, CardColor, Color, Condition, Guess, Hint, Role, Seat};

/// Parses a stored enum string, naming the column on failure.
#[track_caller]
fn parse_column<T: FromStr>(column: &str, value: &str) -> Result<T, DbError> {
    value
        .parse()
        .map_err(|_| DbError::new(format!("Invalid {} value: '{}'", column, value)))
}

/// Converts a stored integer into an index or count.
#[track_caller]
fn non_negative<V, T>(column: &str, value: V) -> Result<T, DbError>
where
    V: Copy + std::fmt::Display,
    T: TryFrom<V>,
{
    T::try_from(value).map_err(|_| DbError::new(format!("Invalid {} value: {}", column, value)))
}

/// Converts an index or count into a stored integer.
#[track_caller]
pub(crate) fn to_column<T: TryInto<i32>>(column: &str, value: T) -> Result<i32, DbError> {
    value
        .try_into()
        .map_err(|_| DbError::new(format!("{} out of range", column)))
}

/// Game row.
#[derive(Debug, Clone, Queryable, Identifiable, Selectable, Getters)]
#[diesel(table_name = schema::games)]
pub struct GameRow {
    id: i32,
    condition: String,
    created_at: NaiveDateTime,
    updated_at: NaiveDateTime,
}

impl GameRow {
    /// Parses the stored condition.
    #[instrument(skip(self), fields(game_id = self.id, condition = %self.condition))]
    pub fn parse_condition(&self) -> Result<Condition, DbError> {
        parse_column("condition", &self.condition)
    }
}

/// Insertable game row.
#[derive(Debug, Clone, Insertable, new)]
#[diesel(table_name = schema::games)]
pub struct NewGame {
    condition: String,
}

/// Seat assignment row.
#[derive(Debug, Clone, Queryable, Selectable, Insertable, Getters, new)]
#[diesel(table_name = schema::seats)]
pub struct SeatRow {
    game_id: i32,
    color: String,
    role: String,
    participant: String,
}

impl SeatRow {
    /// Row for a seat assignment.
    pub fn from_seat(game_id: i32, seat: Seat, participant: &str) -> Self {
        Self::new(
            game_id,
            seat.color.to_string(),
            seat.role.to_string(),
            participant.to_string(),
        )
    }

    /// Parses the stored seat.
    pub fn seat(&self) -> Result<Seat, DbError> {
        let color: Color = parse_column("color", &self.color)?;
        let role: Role = parse_column("role", &self.role)?;
        Ok(Seat::new(color, role))
    }
}

/// Hint row.
#[derive(Debug, Clone, Queryable, Identifiable, Associations, Selectable)]
#[diesel(belongs_to(GameRow, foreign_key = game_id))]
#[diesel(table_name = schema::hints)]
pub struct HintRow {
    id: i32,
    game_id: i32,
    turn: i32,
    word: String,
    num: i64,
    color: String,
}

impl TryFrom<HintRow> for Hint {
    type Error = DbError;

    fn try_from(row: HintRow) -> Result<Self, Self::Error> {
        Ok(Hint::new(
            row.word,
            non_negative("num", row.num)?,
            parse_column("color", &row.color)?,
            non_negative("turn", row.turn)?,
        ))
    }
}

/// Insertable hint row.
#[derive(Debug, Clone, Insertable, new)]
#[diesel(table_name = schema::hints)]
pub struct NewHint {
    game_id: i32,
    turn: i32,
    word: String,
    num: i64,
    color: String,
}

impl NewHint {
    /// Row for a hint of a game.
    pub fn from_hint(game_id: i32, hint: &Hint) -> Result<Self, DbError> {
        Ok(Self::new(
            game_id,
            to_column("turn", hint.turn)?,
            hint.word.clone(),
            i64::from(hint.num),
            hint.color.to_string(),
        ))
    }
}

/// Guess row.
#[derive(Debug, Clone, Queryable, Identifiable, Associations, Selectable)]
#[diesel(belongs_to(GameRow, foreign_key = game_id))]
#[diesel(table_name = schema::guesses)]
pub struct GuessRow {
    id: i32,
    game_id: i32,
    turn: i32,
    card_index: i32,
    color: String,
    revealed: String,
}

impl TryFrom<GuessRow> for Guess {
    type Error = DbError;

    fn try_from(row: GuessRow) -> Result<Self, Self::Error> {
        Ok(Guess::new(
            non_negative("card_index", row.card_index)?,
            parse_column("color", &row.color)?,
            non_negative("turn", row.turn)?,
            parse_column::<CardColor>("revealed", &row.revealed)?,
        ))
    }
}

/// Insertable guess row.
#[derive(Debug, Clone, Insertable, new)]
#[diesel(table_name = schema::guesses)]
pub struct NewGuess {
    game_id: i32,
    turn: i32,
    card_index: i32,
    color: String,
    revealed: String,
}

impl NewGuess {
    /// Row for a guess of a game.
    pub fn from_guess(game_id: i32, guess: &Guess) -> Result<Self, DbError> {
        Ok(Self::new(
            game_id,
            to_column("turn", guess.turn)?,
            to_column("card_index", guess.card_index)?,
            guess.color.to_string(),
            guess.revealed.to_string(),
        ))
    }
}

/// Card key row.
#[derive(Debug, Clone, Queryable, Selectable, Insertable, new)]
#[diesel(table_name = schema::cards)]
pub struct CardRow {
    game_id: i32,
    position: i32,
    word: String,
    color: String,
}

impl CardRow {
    /// Row for a card of a game.
    pub fn from_card(game_id: i32, card: &Card) -> Result<Self, DbError> {
        Ok(Self::new(
            game_id,
            to_column("position", card.position)?,
            card.word.clone(),
            card.color.to_string(),
        ))
    }
}

impl TryFrom<CardRow> for Card {
    type Error = DbError;

    fn try_from(row: CardRow) -> Result<Self, Self::Error> {
        Ok(Card::new(
            non_negative("position", row.position)?,
            row.word,
            parse_column("color", &row.color)?,
        ))
    }
}

#[cfg(test)]
mod tests {
    use diesel::associations::BelongsTo;

    use super::*;

    #[test]
    fn test_seat_row_round_trip() {
        let seat = Seat::new(Color::Blue, Role::Spymaster);
        let row = SeatRow::from_seat(3, seat, "alice");
        assert_eq!(row.color(), "BLUE");
        assert_eq!(row.role(), "SPYMASTER");
        assert_eq!(row.seat().unwrap(), seat);
    }

    #[test]
    fn test_corrupt_hint_row_is_rejected() {
        let row = HintRow {
            id: 1,
            game_id: 1,
            turn: 1,
            word: "sea".into(),
            num: -2,
            color: "BLUE".into(),
        };
        let err = Hint::try_from(row).unwrap_err();
        assert!(err.message.contains("num"));
    }

    #[test]
    fn test_hint_row_keeps_large_counts() {
        let hint = Hint::new("sea".into(), u32::MAX, Color::Blue, 1);
        let new_row = NewHint::from_hint(7, &hint).unwrap();
        assert_eq!(new_row.num, i64::from(u32::MAX));

        let row = HintRow {
            id: 1,
            game_id: 7,
            turn: 1,
            word: "sea".into(),
            num: new_row.num,
            color: "BLUE".into(),
        };
        assert_eq!(<HintRow as BelongsTo<GameRow>>::foreign_key(&row), Some(&7));
        assert_eq!(Hint::try_from(row).unwrap(), hint);
    }

    #[test]
    fn test_guess_row_belongs_to_game() {
        let row = GuessRow {
            id: 1,
            game_id: 4,
            turn: 1,
            card_index: 3,
            color: "RED".into(),
            revealed: "NEUTRAL".into(),
        };
        assert_eq!(<GuessRow as BelongsTo<GameRow>>::foreign_key(&row), Some(&4));
    }

    #[test]
    fn test_bad_color_is_rejected() {
        let row = CardRow::new(1, 0, "apple".into(), "GREEN".into());
        assert!(Card::try_from(row).is_err());
    }
}
