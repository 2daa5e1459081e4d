mod action;
mod board;
mod contracts;
mod dispatch;
mod error;
mod phases;
mod records;
mod rules;
mod snapshot;
mod states;
mod types;

pub use action::Action;
pub use board::Board;
pub use dispatch::load_state;
pub use error::{ErrorKind, GameError, StateError};
pub use phases::Phase;
pub use records::{Card, Guess, Hint, Roster, SeatAssignment};
pub use rules::Rules;
pub use snapshot::{CardView, GameInfo, Metadata};
pub use states::{GameOver, GameState, NotStarted, PlayerTurn, SpyTurn, StateContext};
pub use types::{CardColor, Color, Condition, Role, Seat};
