//! Closed value sets for teams, seats and game phases.

use serde::{Deserialize, Serialize};
use strum::{EnumIter, EnumString};

/// A team.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    strum::Display,
    EnumString,
    EnumIter,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE", ascii_case_insensitive)]
pub enum Color {
    /// Red team.
    Red,
    /// Blue team.
    Blue,
}

impl Color {
    /// Returns the other team.
    pub fn opponent(self) -> Self {
        match self {
            Color::Red => Color::Blue,
            Color::Blue => Color::Red,
        }
    }
}

/// The part a participant plays within a team.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    strum::Display,
    EnumString,
    EnumIter,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE", ascii_case_insensitive)]
pub enum Role {
    /// Gives hints, sees the whole key.
    Spymaster,
    /// Guesses cards from the hints.
    Player,
}

/// A (color, role) pair. Each seat holds at most one participant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Seat {
    /// Team of the seat.
    pub color: Color,
    /// Role of the seat.
    pub role: Role,
}

impl Seat {
    /// Every seat of a game, in a fixed order.
    pub const ALL: [Seat; 4] = [
        Seat::new(Color::Red, Role::Spymaster),
        Seat::new(Color::Red, Role::Player),
        Seat::new(Color::Blue, Role::Spymaster),
        Seat::new(Color::Blue, Role::Player),
    ];

    /// Creates a seat.
    pub const fn new(color: Color, role: Role) -> Self {
        Self { color, role }
    }

    /// The spymaster seat of a team.
    pub const fn spymaster(color: Color) -> Self {
        Self::new(color, Role::Spymaster)
    }

    /// The player seat of a team.
    pub const fn player(color: Color) -> Self {
        Self::new(color, Role::Player)
    }
}

impl std::fmt::Display for Seat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.color, self.role)
    }
}

/// The persisted phase of a game.
///
/// Exactly one condition is current for a game at any time. It is the only
/// value the dispatcher needs to rebuild the matching state variant.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    EnumString,
    EnumIter,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum Condition {
    /// Roster is open, game not started.
    NotStarted,
    /// Red spymaster to give a hint.
    RedSpy,
    /// Blue spymaster to give a hint.
    BlueSpy,
    /// Red player to guess.
    RedPlayer,
    /// Blue player to guess.
    BluePlayer,
    /// Red won.
    RedWin,
    /// Blue won.
    BlueWin,
}

impl Condition {
    /// The hint-giving condition of a team.
    pub fn spy(color: Color) -> Self {
        match color {
            Color::Red => Condition::RedSpy,
            Color::Blue => Condition::BlueSpy,
        }
    }

    /// The guessing condition of a team.
    pub fn player(color: Color) -> Self {
        match color {
            Color::Red => Condition::RedPlayer,
            Color::Blue => Condition::BluePlayer,
        }
    }

    /// The terminal condition in which a team has won.
    pub fn win(color: Color) -> Self {
        match color {
            Color::Red => Condition::RedWin,
            Color::Blue => Condition::BlueWin,
        }
    }

    /// Returns true once a winner is decided.
    pub fn is_terminal(self) -> bool {
        matches!(self, Condition::RedWin | Condition::BlueWin)
    }

    /// Team whose turn it is, if any.
    pub fn active_color(self) -> Option<Color> {
        match self {
            Condition::RedSpy | Condition::RedPlayer => Some(Color::Red),
            Condition::BlueSpy | Condition::BluePlayer => Some(Color::Blue),
            Condition::NotStarted | Condition::RedWin | Condition::BlueWin => None,
        }
    }

    /// Winning team, if the game is over.
    pub fn winner(self) -> Option<Color> {
        match self {
            Condition::RedWin => Some(Color::Red),
            Condition::BlueWin => Some(Color::Blue),
            _ => None,
        }
    }
}

/// Hidden identity of a board card.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    EnumString,
    EnumIter,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE", ascii_case_insensitive)]
pub enum CardColor {
    /// Belongs to the red team.
    Red,
    /// Belongs to the blue team.
    Blue,
    /// Belongs to nobody.
    Neutral,
    /// Loses the game for whoever reveals it.
    Assassin,
}

impl CardColor {
    /// Team owning the card, if any.
    pub fn team(self) -> Option<Color> {
        match self {
            CardColor::Red => Some(Color::Red),
            CardColor::Blue => Some(Color::Blue),
            CardColor::Neutral | CardColor::Assassin => None,
        }
    }
}

impl From<Color> for CardColor {
    fn from(color: Color) -> Self {
        match color {
            Color::Red => CardColor::Red,
            Color::Blue => CardColor::Blue,
        }
    }
}
