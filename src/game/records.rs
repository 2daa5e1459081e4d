//! Durable records of a game: roster, hints, guesses and the card key.

use derive_new::new;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::instrument;

use super::{CardColor, Color, Seat};

/// A clue given by a spymaster. Appended once, never changed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, new)]
pub struct Hint {
    /// The clue word.
    pub word: String,
    /// Number of cards the clue refers to.
    pub num: u32,
    /// Team that gave the clue.
    pub color: Color,
    /// 1-based position of the hint in the game's hint sequence.
    pub turn: u32,
}

/// A card picked by a guessing player.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, new)]
pub struct Guess {
    /// Board position of the picked card.
    pub card_index: usize,
    /// Team that guessed.
    pub color: Color,
    /// Turn of the hint this guess answers.
    pub turn: u32,
    /// What the card turned out to be.
    pub revealed: CardColor,
}

/// One entry of the board key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, new)]
pub struct Card {
    /// Position on the board, starting at 0.
    pub position: usize,
    /// Word printed on the card.
    pub word: String,
    /// Hidden identity of the card.
    pub color: CardColor,
}

/// One seat assignment, the serialized form of a [`Roster`] entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, new)]
pub struct SeatAssignment {
    /// The seat.
    pub seat: Seat,
    /// Participant holding it.
    pub participant: String,
}

/// Seat assignments of a game, keyed by seat.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<SeatAssignment>", into = "Vec<SeatAssignment>")]
pub struct Roster {
    seats: BTreeMap<Seat, String>,
}

impl Roster {
    /// Creates an empty roster.
    pub fn new() -> Self {
        Self::default()
    }

    /// Participant holding a seat.
    pub fn occupant(&self, seat: Seat) -> Option<&str> {
        self.seats.get(&seat).map(String::as_str)
    }

    /// Seat held by a participant.
    pub fn seat_of(&self, participant: &str) -> Option<Seat> {
        self.seats
            .iter()
            .find(|(_, holder)| holder.as_str() == participant)
            .map(|(seat, _)| *seat)
    }

    /// Returns true when every seat is taken.
    #[instrument(skip(self))]
    pub fn is_full(&self) -> bool {
        Seat::ALL.iter().all(|seat| self.seats.contains_key(seat))
    }

    /// Seats still open, in [`Seat::ALL`] order.
    pub fn open_seats(&self) -> Vec<Seat> {
        Seat::ALL
            .into_iter()
            .filter(|seat| !self.seats.contains_key(seat))
            .collect()
    }

    /// Number of occupied seats.
    pub fn len(&self) -> usize {
        self.seats.len()
    }

    /// Returns true when nobody has joined.
    pub fn is_empty(&self) -> bool {
        self.seats.is_empty()
    }

    /// Records a seat assignment. Stores call this when loading or
    /// assigning; seat rules are enforced by the game states.
    pub fn insert(&mut self, seat: Seat, participant: impl Into<String>) {
        self.seats.insert(seat, participant.into());
    }

    /// Iterates over assignments in seat order.
    pub fn iter(&self) -> impl Iterator<Item = (Seat, &str)> {
        self.seats.iter().map(|(seat, p)| (*seat, p.as_str()))
    }
}

impl From<Vec<SeatAssignment>> for Roster {
    fn from(assignments: Vec<SeatAssignment>) -> Self {
        let mut roster = Roster::new();
        for a in assignments {
            roster.insert(a.seat, a.participant);
        }
        roster
    }
}

impl From<Roster> for Vec<SeatAssignment> {
    fn from(roster: Roster) -> Self {
        roster
            .seats
            .into_iter()
            .map(|(seat, participant)| SeatAssignment::new(seat, participant))
            .collect()
    }
}
