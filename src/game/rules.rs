//! Turn rules that the state machine leaves configurable.

use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use super::{Board, CardColor, Color, Condition};

/// Tunable rules of a game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rules {
    /// Team that gives the first hint.
    #[serde(default = "default_starting_team")]
    pub starting_team: Color,

    /// Allow one guess beyond the hint number.
    #[serde(default = "default_extra_guess")]
    pub extra_guess: bool,
}

fn default_starting_team() -> Color {
    Color::Blue
}

fn default_extra_guess() -> bool {
    true
}

impl Default for Rules {
    fn default() -> Self {
        Self {
            starting_team: default_starting_team(),
            extra_guess: default_extra_guess(),
        }
    }
}

impl Rules {
    /// Maximum number of guesses allowed for a hint, `None` if unlimited.
    ///
    /// A hint number of zero places no limit on guesses.
    pub fn guess_allowance(&self, num: u32) -> Option<usize> {
        match num {
            0 => None,
            n if self.extra_guess => Some(n as usize + 1),
            n => Some(n as usize),
        }
    }

    /// Condition that follows a guess.
    ///
    /// `board` must already include the guessed card as revealed, and
    /// `guesses_this_turn` must count it.
    #[instrument(skip(self, board))]
    pub fn after_guess(
        &self,
        active: Color,
        revealed: CardColor,
        board: &Board,
        hint_num: u32,
        guesses_this_turn: usize,
    ) -> Condition {
        let next = if revealed == CardColor::Assassin {
            Condition::win(active.opponent())
        } else if let Some(team) = board.cleared_team(active) {
            Condition::win(team)
        } else if revealed != CardColor::from(active) {
            Condition::spy(active.opponent())
        } else if self
            .guess_allowance(hint_num)
            .is_some_and(|max| guesses_this_turn >= max)
        {
            Condition::spy(active.opponent())
        } else {
            Condition::player(active)
        };
        debug!(next = %next, "Guess resolved");
        next
    }
}
