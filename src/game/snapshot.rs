//! Read-only snapshot returned by every game operation.

use serde::{Deserialize, Serialize};
use tracing::instrument;

use super::{Board, CardColor, Condition, Guess, Hint, Role, Roster};

/// Game-level metadata of a snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Metadata {
    /// Persister id of the game.
    pub game_id: i32,
    /// Current phase.
    pub condition: Condition,
    /// Seat assignments.
    pub roster: Roster,
}

/// A board card as shown to a participant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardView {
    /// Position on the board.
    pub position: usize,
    /// Word printed on the card.
    pub word: String,
    /// Card identity, `None` while hidden from the viewer.
    pub color: Option<CardColor>,
    /// Whether the card has been guessed.
    pub revealed: bool,
}

/// Everything a participant may know about a game.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameInfo {
    /// Phase and roster.
    pub metadata: Metadata,
    /// Hints in the order they were given.
    pub hints: Vec<Hint>,
    /// Guesses in the order they were made.
    pub guesses: Vec<Guess>,
    /// The board, hidden identities included.
    pub board: Vec<CardView>,
}

impl GameInfo {
    /// Assembles a full snapshot from the persisted pieces.
    #[instrument(skip_all, fields(game_id = game_id, condition = %condition))]
    pub fn assemble(
        game_id: i32,
        condition: Condition,
        roster: Roster,
        hints: Vec<Hint>,
        guesses: Vec<Guess>,
        board: &Board,
    ) -> Self {
        let board = board
            .cards()
            .iter()
            .map(|card| CardView {
                position: card.position,
                word: card.word.clone(),
                color: Some(card.color),
                revealed: board.is_revealed(card.position),
            })
            .collect();

        Self {
            metadata: Metadata {
                game_id,
                condition,
                roster,
            },
            hints,
            guesses,
            board,
        }
    }

    /// Hides the identity of unrevealed cards from `viewer`.
    ///
    /// Spymasters see the whole key, as does everyone once the game is over.
    #[instrument(skip(self), fields(game_id = self.metadata.game_id))]
    pub fn redacted_for(mut self, viewer: &str) -> Self {
        let sees_key = self.metadata.condition.is_terminal()
            || self
                .metadata
                .roster
                .seat_of(viewer)
                .is_some_and(|seat| seat.role == Role::Spymaster);

        if !sees_key {
            for card in self.board.iter_mut().filter(|c| !c.revealed) {
                card.color = None;
            }
        }
        self
    }

    /// Current phase.
    pub fn condition(&self) -> Condition {
        self.metadata.condition
    }

    /// Most recent hint.
    pub fn last_hint(&self) -> Option<&Hint> {
        self.hints.last()
    }
}
