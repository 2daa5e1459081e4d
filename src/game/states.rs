//! One state variant per phase.
//!
//! Every variant offers the same operations through [`GameState`]. The
//! provided methods reject with a phase violation; each variant overrides only
//! the operations its phase allows. Variants hold nothing but the acting
//! participant, the persister and the rules, so a fresh one is built for
//! every request.

use tracing::{debug, info, instrument, warn};

use super::contracts::{
    CardIsHidden, HintIsWord, HoldsSeat, InPhase, NotSeated, RosterIsFull, SeatIsOpen,
};
use super::{Action, Color, Condition, GameError, GameInfo, Guess, Hint, Phase, Role, Rules, Seat};
use crate::persister::GamePersister;

/// Operations common to every phase.
pub trait GameState {
    /// Phase this variant was built for.
    fn phase(&self) -> Phase;

    /// Takes a seat.
    fn join(&mut self, _color: Color, _role: Role) -> Result<GameInfo, GameError> {
        Err(reject(self.phase(), "join"))
    }

    /// Closes the roster and starts the first turn.
    fn start_game(&mut self) -> Result<GameInfo, GameError> {
        Err(reject(self.phase(), "start_game"))
    }

    /// Records a hint from the active spymaster.
    ///
    /// The word is stored exactly as sent and must contain no whitespace.
    fn give_hint(&mut self, _word: &str, _num: u32) -> Result<GameInfo, GameError> {
        Err(reject(self.phase(), "give_hint"))
    }

    /// Reveals a card for the active player.
    fn guess(&mut self, _card_index: usize) -> Result<GameInfo, GameError> {
        Err(reject(self.phase(), "guess"))
    }

    /// Passes the turn to the other team.
    fn end_turn(&mut self) -> Result<GameInfo, GameError> {
        Err(reject(self.phase(), "end_turn"))
    }

    /// Reads the snapshot as seen by the acting participant. Always legal.
    fn get_info(&mut self) -> Result<GameInfo, GameError>;

    /// Routes an [`Action`] to the matching operation.
    fn apply(&mut self, action: Action) -> Result<GameInfo, GameError> {
        match action {
            Action::Join { color, role } => self.join(color, role),
            Action::StartGame => self.start_game(),
            Action::GiveHint { word, num } => self.give_hint(&word, num),
            Action::Guess { card_index } => self.guess(card_index),
            Action::EndTurn => self.end_turn(),
            Action::GetInfo => self.get_info(),
        }
    }
}

#[track_caller]
fn reject(phase: Phase, operation: &str) -> GameError {
    warn!(%phase, operation, "Operation not allowed in phase");
    GameError::state(format!("Cannot {} during {}", operation, phase))
}

/// What every variant is built from.
pub struct StateContext<'a> {
    actor: &'a str,
    persister: &'a mut dyn GamePersister,
    rules: Rules,
}

impl<'a> StateContext<'a> {
    /// Binds an acting participant to a game's persister.
    pub fn new(actor: &'a str, persister: &'a mut dyn GamePersister, rules: Rules) -> Self {
        Self {
            actor,
            persister,
            rules,
        }
    }

    /// The acting participant.
    pub fn actor(&self) -> &str {
        self.actor
    }

    /// Rules in force.
    pub fn rules(&self) -> &Rules {
        &self.rules
    }

    /// Fails unless the persisted condition still equals `expected`.
    fn ensure_phase(&mut self, expected: Condition) -> Result<(), GameError> {
        let current = self.persister.read_condition()?;
        InPhase::check(current, expected)
    }

    /// Fails unless the actor holds `seat`.
    fn ensure_seat(&mut self, seat: Seat) -> Result<(), GameError> {
        let roster = self.persister.read_roster()?;
        HoldsSeat::check(&roster, self.actor, seat)
    }

    fn snapshot(&mut self) -> Result<GameInfo, GameError> {
        Ok(self.persister.get_info()?.redacted_for(self.actor))
    }
}

// ─────────────────────────────────────────────────────────────
//  Not started
// ─────────────────────────────────────────────────────────────

/// Pre-game setup: joining seats and starting.
pub struct NotStarted<'a> {
    ctx: StateContext<'a>,
}

impl<'a> NotStarted<'a> {
    /// Creates the variant.
    pub fn new(ctx: StateContext<'a>) -> Self {
        Self { ctx }
    }
}

impl GameState for NotStarted<'_> {
    fn phase(&self) -> Phase {
        Phase::NotStarted
    }

    #[instrument(skip(self), fields(actor = self.ctx.actor))]
    fn join(&mut self, color: Color, role: Role) -> Result<GameInfo, GameError> {
        self.ctx.ensure_phase(Condition::NotStarted)?;

        let seat = Seat::new(color, role);
        let roster = self.ctx.persister.read_roster()?;
        SeatIsOpen::check(&roster, seat)?;
        NotSeated::check(&roster, self.ctx.actor)?;

        self.ctx.persister.assign_seat(seat, self.ctx.actor)?;
        info!(%seat, "Participant joined");
        self.ctx.snapshot()
    }

    #[instrument(skip(self), fields(actor = self.ctx.actor))]
    fn start_game(&mut self) -> Result<GameInfo, GameError> {
        self.ctx.ensure_phase(Condition::NotStarted)?;

        let roster = self.ctx.persister.read_roster()?;
        RosterIsFull::check(&roster)?;

        let first = Condition::spy(self.ctx.rules.starting_team);
        self.ctx.persister.push_condition(first)?;
        info!(condition = %first, "Game started");
        self.ctx.snapshot()
    }

    fn get_info(&mut self) -> Result<GameInfo, GameError> {
        self.ctx.snapshot()
    }
}

// ─────────────────────────────────────────────────────────────
//  Spymaster turn
// ─────────────────────────────────────────────────────────────

/// The hint-giving half of a team's turn.
pub struct SpyTurn<'a> {
    ctx: StateContext<'a>,
    color: Color,
}

impl<'a> SpyTurn<'a> {
    /// Creates the variant for the team whose spymaster is to act.
    pub fn new(ctx: StateContext<'a>, color: Color) -> Self {
        Self { ctx, color }
    }

    /// Active team.
    pub fn color(&self) -> Color {
        self.color
    }
}

impl GameState for SpyTurn<'_> {
    fn phase(&self) -> Phase {
        Phase::SpyTurn(self.color)
    }

    #[instrument(skip(self), fields(actor = self.ctx.actor, color = %self.color))]
    fn give_hint(&mut self, word: &str, num: u32) -> Result<GameInfo, GameError> {
        self.ctx.ensure_phase(Condition::spy(self.color))?;
        self.ctx.ensure_seat(Seat::spymaster(self.color))?;
        HintIsWord::check(word)?;

        let turn = self.ctx.persister.read_hints()?.len() as u32 + 1;
        let hint = Hint::new(word.to_string(), num, self.color, turn);
        self.ctx.persister.record_hint(&hint)?;
        self.ctx
            .persister
            .push_condition(Condition::player(self.color))?;

        #[cfg(debug_assertions)]
        {
            use super::contracts::HintMatchesTurn;
            let hints = self.ctx.persister.read_hints()?;
            debug_assert!(
                HintMatchesTurn::holds(&hints, self.color),
                "Hint log inconsistent"
            );
        }

        info!(turn, word = %hint.word, num, "Hint given");
        self.ctx.snapshot()
    }

    fn get_info(&mut self) -> Result<GameInfo, GameError> {
        self.ctx.snapshot()
    }
}

// ─────────────────────────────────────────────────────────────
//  Player turn
// ─────────────────────────────────────────────────────────────

/// The guessing half of a team's turn.
pub struct PlayerTurn<'a> {
    ctx: StateContext<'a>,
    color: Color,
}

impl<'a> PlayerTurn<'a> {
    /// Creates the variant for the team whose player is to act.
    pub fn new(ctx: StateContext<'a>, color: Color) -> Self {
        Self { ctx, color }
    }

    /// Active team.
    pub fn color(&self) -> Color {
        self.color
    }
}

impl GameState for PlayerTurn<'_> {
    fn phase(&self) -> Phase {
        Phase::PlayerTurn(self.color)
    }

    #[instrument(skip(self), fields(actor = self.ctx.actor, color = %self.color))]
    fn guess(&mut self, card_index: usize) -> Result<GameInfo, GameError> {
        let current = Condition::player(self.color);
        self.ctx.ensure_phase(current)?;
        self.ctx.ensure_seat(Seat::player(self.color))?;

        let hint = self
            .ctx
            .persister
            .read_hints()?
            .pop()
            .filter(|h| h.color == self.color)
            .ok_or_else(|| GameError::state(format!("No hint from {} to guess on", self.color)))?;

        let mut board = self.ctx.persister.read_board()?;
        let revealed = CardIsHidden::check(&board, card_index)?.color;

        let guesses_this_turn = self
            .ctx
            .persister
            .read_guesses()?
            .iter()
            .filter(|g| g.turn == hint.turn)
            .count()
            + 1;

        let guess = Guess::new(card_index, self.color, hint.turn, revealed);
        self.ctx.persister.record_guess(&guess)?;
        board.reveal(card_index);

        let next = self.ctx.rules.after_guess(
            self.color,
            revealed,
            &board,
            hint.num,
            guesses_this_turn,
        );
        if next != current {
            self.ctx.persister.push_condition(next)?;
        }

        info!(card_index, %revealed, next = %next, "Guess recorded");
        self.ctx.snapshot()
    }

    #[instrument(skip(self), fields(actor = self.ctx.actor, color = %self.color))]
    fn end_turn(&mut self) -> Result<GameInfo, GameError> {
        self.ctx.ensure_phase(Condition::player(self.color))?;
        self.ctx.ensure_seat(Seat::player(self.color))?;

        let next = Condition::spy(self.color.opponent());
        self.ctx.persister.push_condition(next)?;
        info!(next = %next, "Turn ended");
        self.ctx.snapshot()
    }

    fn get_info(&mut self) -> Result<GameInfo, GameError> {
        self.ctx.snapshot()
    }
}

// ─────────────────────────────────────────────────────────────
//  Game over
// ─────────────────────────────────────────────────────────────

/// Terminal phase. Only reading is allowed.
pub struct GameOver<'a> {
    ctx: StateContext<'a>,
    condition: Condition,
}

impl<'a> GameOver<'a> {
    /// Creates the variant for a terminal condition.
    pub fn new(ctx: StateContext<'a>, condition: Condition) -> Self {
        debug!(%condition, "Loading finished game");
        Self { ctx, condition }
    }

    /// Winning team.
    pub fn winner(&self) -> Option<Color> {
        self.condition.winner()
    }
}

impl GameState for GameOver<'_> {
    fn phase(&self) -> Phase {
        Phase::GameOver(self.condition)
    }

    fn get_info(&mut self) -> Result<GameInfo, GameError> {
        self.ctx.snapshot()
    }
}
