//! Errors raised by game state operations.

use derive_more::{Display, Error};
use tracing::instrument;

use crate::db::DbError;
use crate::game::Seat;

/// The requested action is not legal in the current phase.
#[derive(Debug, Clone, Display, Error)]
#[display("State error: {} at {}:{}", message, file, line)]
pub struct StateError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl StateError {
    /// Creates a new state error with caller location tracking.
    #[track_caller]
    #[instrument(skip(message))]
    pub fn new(message: impl Into<String>) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message: message.into(),
            line: loc.line(),
            file: loc.file(),
        }
    }
}

/// Category of a [`GameError`], for callers deciding how to react.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum::Display)]
#[strum(serialize_all = "snake_case")]
pub enum ErrorKind {
    /// Wrong phase, wrong seat or invalid arguments.
    PhaseViolation,
    /// The participant already holds a seat.
    AlreadyJoined,
    /// The seat is held by someone else.
    RoleOccupied,
    /// Storage failed.
    Persistence,
}

/// Error returned by every game operation.
#[derive(Debug, Clone, Display, Error)]
pub enum GameError {
    /// Action not permitted in the current phase.
    #[display("{}", _0)]
    State(StateError),

    /// The acting participant already holds a seat in this game.
    #[display("Participant '{}' already holds seat {}", participant, seat)]
    AlreadyJoined {
        /// Participant that tried to join.
        participant: String,
        /// Seat the participant already holds.
        seat: Seat,
    },

    /// The requested seat is held by another participant.
    #[display("Seat {} is already occupied", seat)]
    RoleOccupied {
        /// Requested seat.
        seat: Seat,
    },

    /// The persistence port failed.
    #[display("{}", _0)]
    Persistence(DbError),
}

impl GameError {
    /// Shorthand for a phase violation at the caller's location.
    #[track_caller]
    pub fn state(message: impl Into<String>) -> Self {
        Self::State(StateError::new(message))
    }

    /// Returns the error category.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::State(_) => ErrorKind::PhaseViolation,
            Self::AlreadyJoined { .. } => ErrorKind::AlreadyJoined,
            Self::RoleOccupied { .. } => ErrorKind::RoleOccupied,
            Self::Persistence(_) => ErrorKind::Persistence,
        }
    }

    /// True when the same request may succeed later unchanged.
    ///
    /// Only storage failures qualify; every other kind needs a different action.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Persistence(_))
    }
}

impl From<StateError> for GameError {
    fn from(err: StateError) -> Self {
        Self::State(err)
    }
}

impl From<DbError> for GameError {
    fn from(err: DbError) -> Self {
        Self::Persistence(err)
    }
}

// Lets `immediate_transaction` closures return `GameError` directly.
impl From<diesel::result::Error> for GameError {
    #[track_caller]
    fn from(err: diesel::result::Error) -> Self {
        Self::Persistence(DbError::from(err))
    }
}
