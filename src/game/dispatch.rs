//! Builds the state variant matching a game's persisted condition.

use tracing::{debug, instrument};

use super::states::{GameOver, GameState, NotStarted, PlayerTurn, SpyTurn, StateContext};
use super::{GameError, Phase, Rules};
use crate::persister::GamePersister;

/// Reads the current condition and returns the variant for it.
///
/// This is the only place conditions become behaviour. Call it once per
/// request; the returned variant must not outlive the request.
#[instrument(skip(persister, rules), fields(game_id = persister.game_id()))]
pub fn load_state<'a>(
    actor: &'a str,
    persister: &'a mut dyn GamePersister,
    rules: Rules,
) -> Result<Box<dyn GameState + 'a>, GameError> {
    let condition = persister.read_condition()?;
    let phase = Phase::from(condition);
    debug!(%condition, %phase, "Dispatching");

    let ctx = StateContext::new(actor, persister, rules);
    let state: Box<dyn GameState + 'a> = match phase {
        Phase::NotStarted => Box::new(NotStarted::new(ctx)),
        Phase::SpyTurn(color) => Box::new(SpyTurn::new(ctx, color)),
        Phase::PlayerTurn(color) => Box::new(PlayerTurn::new(ctx, color)),
        Phase::GameOver(condition) => Box::new(GameOver::new(ctx, condition)),
    };
    Ok(state)
}
