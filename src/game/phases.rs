//! Mapping from the persisted condition to a state variant.

use serde::{Deserialize, Serialize};

use super::{Color, Condition};

/// The state variant a condition selects.
///
/// Total over [`Condition`]: every persisted value maps to exactly one phase,
/// and [`Phase::condition`] maps it back.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Phase {
    /// Roster open, game not started.
    NotStarted,
    /// The spymaster of a team gives a hint.
    SpyTurn(Color),
    /// The player of a team guesses.
    PlayerTurn(Color),
    /// A terminal condition was reached.
    GameOver(Condition),
}

impl Phase {
    /// The condition this phase is stored as.
    pub fn condition(self) -> Condition {
        match self {
            Phase::NotStarted => Condition::NotStarted,
            Phase::SpyTurn(color) => Condition::spy(color),
            Phase::PlayerTurn(color) => Condition::player(color),
            Phase::GameOver(condition) => condition,
        }
    }
}

impl From<Condition> for Phase {
    fn from(condition: Condition) -> Self {
        match condition {
            Condition::NotStarted => Phase::NotStarted,
            Condition::RedSpy => Phase::SpyTurn(Color::Red),
            Condition::BlueSpy => Phase::SpyTurn(Color::Blue),
            Condition::RedPlayer => Phase::PlayerTurn(Color::Red),
            Condition::BluePlayer => Phase::PlayerTurn(Color::Blue),
            Condition::RedWin | Condition::BlueWin => Phase::GameOver(condition),
        }
    }
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Phase::NotStarted => write!(f, "game not started"),
            Phase::SpyTurn(color) => write!(f, "{} spymaster's turn", color),
            Phase::PlayerTurn(color) => write!(f, "{} player's turn", color),
            Phase::GameOver(condition) => write!(f, "game over ({})", condition),
        }
    }
}
