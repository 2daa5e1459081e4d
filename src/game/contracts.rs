//! Preconditions checked by the game states before any write.
//!
//! Each check reads nothing itself; callers load the roster, board or
//! condition through the persister and hand it in.

use tracing::{instrument, warn};

use super::{Board, Card, Condition, GameError, Hint, Roster, Seat};

/// Precondition: the persisted condition is the one the state was built for.
pub struct InPhase;

impl InPhase {
    #[instrument]
    pub fn check(current: Condition, expected: Condition) -> Result<(), GameError> {
        if current != expected {
            warn!(%current, %expected, "Stale or wrong phase");
            return Err(GameError::state(format!(
                "Game is in {}, not {}",
                current, expected
            )));
        }
        Ok(())
    }
}

/// Precondition: the target seat is free.
pub struct SeatIsOpen;

impl SeatIsOpen {
    #[instrument(skip(roster))]
    pub fn check(roster: &Roster, seat: Seat) -> Result<(), GameError> {
        if roster.occupant(seat).is_some() {
            return Err(GameError::RoleOccupied { seat });
        }
        Ok(())
    }
}

/// Precondition: the participant holds no seat yet.
pub struct NotSeated;

impl NotSeated {
    #[instrument(skip(roster))]
    pub fn check(roster: &Roster, participant: &str) -> Result<(), GameError> {
        if let Some(seat) = roster.seat_of(participant) {
            return Err(GameError::AlreadyJoined {
                participant: participant.to_string(),
                seat,
            });
        }
        Ok(())
    }
}

/// Precondition: all four seats are occupied.
pub struct RosterIsFull;

impl RosterIsFull {
    #[instrument(skip(roster))]
    pub fn check(roster: &Roster) -> Result<(), GameError> {
        let open = roster.open_seats();
        if !open.is_empty() {
            let open = open
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join(", ");
            return Err(GameError::state(format!("Seats still open: {}", open)));
        }
        Ok(())
    }
}

/// Precondition: the acting participant holds the given seat.
pub struct HoldsSeat;

impl HoldsSeat {
    #[instrument(skip(roster))]
    pub fn check(roster: &Roster, participant: &str, seat: Seat) -> Result<(), GameError> {
        if roster.occupant(seat) != Some(participant) {
            warn!(participant, %seat, "Acting out of turn");
            return Err(GameError::state(format!(
                "Only the {} may act now",
                seat
            )));
        }
        Ok(())
    }
}

/// Precondition: a hint word is a single non-empty word without whitespace.
pub struct HintIsWord;

impl HintIsWord {
    #[instrument]
    pub fn check(word: &str) -> Result<(), GameError> {
        if word.is_empty() || word.contains(char::is_whitespace) {
            return Err(GameError::state(format!(
                "Hint must be a single word, got '{}'",
                word
            )));
        }
        Ok(())
    }
}

/// Precondition: the card exists and has not been guessed.
pub struct CardIsHidden;

impl CardIsHidden {
    #[instrument(skip(board))]
    pub fn check(board: &Board, position: usize) -> Result<&Card, GameError> {
        let card = board
            .card(position)
            .ok_or_else(|| GameError::state(format!("No card at position {}", position)))?;
        if board.is_revealed(position) {
            return Err(GameError::state(format!(
                "Card {} ('{}') is already revealed",
                position, card.word
            )));
        }
        Ok(card)
    }
}

/// Postcondition: the latest hint belongs to the team that gave it.
///
/// Checked in debug builds after a hint is recorded.
pub struct HintMatchesTurn;

impl HintMatchesTurn {
    #[instrument(skip(hints))]
    pub fn holds(hints: &[Hint], active: super::Color) -> bool {
        let valid = hints.last().is_some_and(|h| h.color == active)
            && hints
                .iter()
                .enumerate()
                .all(|(i, h)| h.turn as usize == i + 1);
        if !valid {
            warn!(%active, count = hints.len(), "Hint log inconsistent");
        }
        valid
    }
}
