//! Actions a participant can request.

use serde::{Deserialize, Serialize};

use super::{Color, Role};

/// One request against a game.
///
/// Actions are plain values: they can be logged, serialized and validated
/// before anything is written.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum Action {
    /// Take a seat.
    Join {
        /// Team to join.
        color: Color,
        /// Role within the team.
        role: Role,
    },
    /// Close the roster and begin the first turn.
    StartGame,
    /// Give a hint as the active spymaster.
    GiveHint {
        /// Clue word.
        word: String,
        /// Number of cards the clue covers.
        num: u32,
    },
    /// Pick a card as the active player.
    Guess {
        /// Board position.
        card_index: usize,
    },
    /// Stop guessing and pass the turn.
    EndTurn,
    /// Read the current snapshot.
    GetInfo,
}

impl Action {
    /// Operation name, for logs and error messages.
    pub fn name(&self) -> &'static str {
        match self {
            Action::Join { .. } => "join",
            Action::StartGame => "start_game",
            Action::GiveHint { .. } => "give_hint",
            Action::Guess { .. } => "guess",
            Action::EndTurn => "end_turn",
            Action::GetInfo => "get_info",
        }
    }

    /// Returns false only for [`Action::GetInfo`].
    pub fn is_mutating(&self) -> bool {
        !matches!(self, Action::GetInfo)
    }
}

impl std::fmt::Display for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Action::Join { color, role } => write!(f, "join {} {}", color, role),
            Action::GiveHint { word, num } => write!(f, "give_hint '{}' {}", word, num),
            Action::Guess { card_index } => write!(f, "guess {}", card_index),
            other => write!(f, "{}", other.name()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_action_json() {
        let action: Action =
            serde_json::from_str(r#"{"action":"give_hint","word":"sea","num":2}"#).unwrap();
        assert_eq!(
            action,
            Action::GiveHint {
                word: "sea".into(),
                num: 2
            }
        );
        let action: Action = serde_json::from_str(r#"{"action":"end_turn"}"#).unwrap();
        assert_eq!(action, Action::EndTurn);
    }

    #[test]
    fn test_display() {
        let join = Action::Join {
            color: Color::Red,
            role: Role::Spymaster,
        };
        assert_eq!(join.to_string(), "join RED SPYMASTER");
        assert_eq!(Action::StartGame.to_string(), "start_game");
        assert!(!Action::GetInfo.is_mutating());
    }
}
