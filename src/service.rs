//! Entry point for callers: one action in, one snapshot out.

use tracing::{info, instrument, warn};

use crate::db::DbError;
use crate::game::{Action, Card, Color, GameError, GameInfo, Role, Rules, load_state};
use crate::persister::GameStore;

/// Applies participant actions to stored games.
///
/// Every call loads the state variant fresh from the persisted condition
/// inside the store's exclusive unit, applies one action and returns the
/// snapshot as seen by the actor. Nothing is cached between calls.
#[derive(Debug, Clone)]
pub struct GameService<S> {
    store: S,
    rules: Rules,
}

impl<S: GameStore> GameService<S> {
    /// Creates a service with default rules.
    #[instrument(skip(store))]
    pub fn new(store: S) -> Self {
        Self::with_rules(store, Rules::default())
    }

    /// Creates a service with the given rules.
    #[instrument(skip(store))]
    pub fn with_rules(store: S, rules: Rules) -> Self {
        info!(
            starting_team = %rules.starting_team,
            extra_guess = rules.extra_guess,
            "Creating GameService"
        );
        Self { store, rules }
    }

    /// The backing store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Rules in force.
    pub fn rules(&self) -> &Rules {
        &self.rules
    }

    /// Creates a game with the given board key.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if the key is malformed or the store fails.
    #[instrument(skip(self, cards), fields(cards = cards.len()))]
    pub fn create_game(&self, cards: &[Card]) -> Result<i32, DbError> {
        self.store.create_game(cards)
    }

    /// Applies one action for `actor` and returns the resulting snapshot.
    ///
    /// # Errors
    ///
    /// Returns a phase or seat [`GameError`] when the action is illegal, in
    /// which case nothing was written, or a persistence error from the store.
    #[instrument(skip(self, action), fields(action = %action))]
    pub fn apply(&self, game_id: i32, actor: &str, action: Action) -> Result<GameInfo, GameError> {
        let rules = self.rules;
        let result = self.store.with_game(game_id, |persister| {
            let mut state = load_state(actor, persister, rules)?;
            state.apply(action)
        });

        match &result {
            Ok(info) => info!(condition = %info.condition(), "Action applied"),
            Err(e) => warn!(kind = %e.kind(), error = %e, "Action rejected"),
        }
        result
    }

    /// Takes a seat.
    pub fn join(
        &self,
        game_id: i32,
        actor: &str,
        color: Color,
        role: Role,
    ) -> Result<GameInfo, GameError> {
        self.apply(game_id, actor, Action::Join { color, role })
    }

    /// Starts the game.
    pub fn start_game(&self, game_id: i32, actor: &str) -> Result<GameInfo, GameError> {
        self.apply(game_id, actor, Action::StartGame)
    }

    /// Gives a hint.
    pub fn give_hint(
        &self,
        game_id: i32,
        actor: &str,
        word: &str,
        num: u32,
    ) -> Result<GameInfo, GameError> {
        self.apply(
            game_id,
            actor,
            Action::GiveHint {
                word: word.to_string(),
                num,
            },
        )
    }

    /// Guesses a card.
    pub fn guess(
        &self,
        game_id: i32,
        actor: &str,
        card_index: usize,
    ) -> Result<GameInfo, GameError> {
        self.apply(game_id, actor, Action::Guess { card_index })
    }

    /// Ends the current guessing turn.
    pub fn end_turn(&self, game_id: i32, actor: &str) -> Result<GameInfo, GameError> {
        self.apply(game_id, actor, Action::EndTurn)
    }

    /// Reads the snapshot.
    pub fn get_info(&self, game_id: i32, actor: &str) -> Result<GameInfo, GameError> {
        self.apply(game_id, actor, Action::GetInfo)
    }
}
