//! Board reading: which cards are uncovered and what is left per team.

use std::collections::BTreeSet;
use tracing::instrument;

use super::{Card, CardColor, Color, Guess};

/// The card key joined with the guesses made so far.
///
/// A card counts as revealed exactly when a recorded guess names it.
#[derive(Debug, Clone)]
pub struct Board {
    cards: Vec<Card>,
    revealed: BTreeSet<usize>,
}

impl Board {
    /// Builds the board view from the key and the guess log.
    #[instrument(skip_all, fields(cards = cards.len(), guesses = guesses.len()))]
    pub fn new(cards: Vec<Card>, guesses: &[Guess]) -> Self {
        let revealed = guesses.iter().map(|g| g.card_index).collect();
        Self { cards, revealed }
    }

    /// All cards, in position order.
    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    /// Card at a position.
    pub fn card(&self, position: usize) -> Option<&Card> {
        self.cards.iter().find(|c| c.position == position)
    }

    /// Returns true once the card at `position` has been guessed.
    pub fn is_revealed(&self, position: usize) -> bool {
        self.revealed.contains(&position)
    }

    /// Marks a card as revealed.
    pub fn reveal(&mut self, position: usize) {
        self.revealed.insert(position);
    }

    /// Number of unrevealed cards belonging to a team.
    pub fn remaining(&self, color: Color) -> usize {
        let target = CardColor::from(color);
        self.cards
            .iter()
            .filter(|c| c.color == target && !self.is_revealed(c.position))
            .count()
    }

    /// Team with every one of its cards revealed, if any.
    ///
    /// When both qualify the `first` team is preferred.
    pub fn cleared_team(&self, first: Color) -> Option<Color> {
        [first, first.opponent()]
            .into_iter()
            .find(|&color| self.remaining(color) == 0)
    }
}
