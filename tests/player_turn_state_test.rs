//! Tests for the guessing half of a turn and the terminal phase.

mod common;

use codenames_engine::{
    CardColor, Color, Condition, ErrorKind, GameError, GamePersister, GameRepository, GameState,
    Guess, Phase, PlayerTurn, Role, Rules, SpyTurn, SqliteGamePersister, StateContext, load_state,
};
use tempfile::NamedTempFile;

use common::{
    ASSASSIN_CARD, BLUE_CARDS, BLUE_PLAYER, BLUE_SPY, NEUTRAL_CARD, RED_CARDS, RED_PLAYER,
    add_players, create_default_game,
};

fn assert_kind<T: std::fmt::Debug>(result: Result<T, GameError>, kind: ErrorKind) {
    match result {
        Err(e) => assert_eq!(e.kind(), kind, "unexpected error: {e}"),
        Ok(v) => panic!("expected {kind}, got {v:?}"),
    }
}

/// A game in BLUE_PLAYER after the blue spymaster hinted `num`.
fn blue_player_turn(num: u32) -> (NamedTempFile, GameRepository, i32) {
    let (db, repo, game_id) = create_default_game();
    add_players(&repo, game_id);
    let mut conn = repo.connection().unwrap();
    let mut persister = SqliteGamePersister::new(game_id, &mut conn);
    persister.push_condition(Condition::BlueSpy).unwrap();
    SpyTurn::new(StateContext::new(BLUE_SPY, &mut persister, Rules::default()), Color::Blue)
        .give_hint("myhint", num)
        .unwrap();
    (db, repo, game_id)
}

fn guess_as(
    persister: &mut SqliteGamePersister<'_>,
    actor: &str,
    card_index: usize,
) -> Result<Condition, GameError> {
    PlayerTurn::new(StateContext::new(actor, persister, Rules::default()), Color::Blue)
        .guess(card_index)
        .map(|info| info.metadata.condition)
}

#[test]
fn test_invalid_invocations() {
    let (_db, repo, game_id) = blue_player_turn(2);
    let mut conn = repo.connection().unwrap();
    let mut persister = SqliteGamePersister::new(game_id, &mut conn);
    let mut state = PlayerTurn::new(
        StateContext::new(BLUE_PLAYER, &mut persister, Rules::default()),
        Color::Blue,
    );

    assert_kind(state.give_hint("myhint", 2), ErrorKind::PhaseViolation);
    assert_kind(state.start_game(), ErrorKind::PhaseViolation);
    assert_kind(state.join(Color::Red, Role::Player), ErrorKind::PhaseViolation);
}

#[test]
fn test_correct_guess_keeps_turn() {
    let (_db, repo, game_id) = blue_player_turn(2);
    let mut conn = repo.connection().unwrap();
    let mut persister = SqliteGamePersister::new(game_id, &mut conn);

    assert_eq!(guess_as(&mut persister, BLUE_PLAYER, 0).unwrap(), Condition::BluePlayer);

    let guesses = persister.read_guesses().unwrap();
    assert_eq!(guesses, vec![Guess::new(0, Color::Blue, 1, CardColor::Blue)]);
}

#[test]
fn test_neutral_guess_passes_turn() {
    let (_db, repo, game_id) = blue_player_turn(2);
    let mut conn = repo.connection().unwrap();
    let mut persister = SqliteGamePersister::new(game_id, &mut conn);

    assert_eq!(
        guess_as(&mut persister, BLUE_PLAYER, NEUTRAL_CARD).unwrap(),
        Condition::RedSpy
    );
}

#[test]
fn test_opponent_guess_passes_turn() {
    let (_db, repo, game_id) = blue_player_turn(2);
    let mut conn = repo.connection().unwrap();
    let mut persister = SqliteGamePersister::new(game_id, &mut conn);

    assert_eq!(
        guess_as(&mut persister, BLUE_PLAYER, RED_CARDS.start).unwrap(),
        Condition::RedSpy
    );
    assert_eq!(
        persister.read_guesses().unwrap()[0].revealed,
        CardColor::Red
    );
}

#[test]
fn test_assassin_ends_game() {
    let (_db, repo, game_id) = blue_player_turn(2);
    let mut conn = repo.connection().unwrap();
    let mut persister = SqliteGamePersister::new(game_id, &mut conn);

    assert_eq!(
        guess_as(&mut persister, BLUE_PLAYER, ASSASSIN_CARD).unwrap(),
        Condition::RedWin
    );
}

#[test]
fn test_guess_allowance_is_hint_plus_one() {
    let (_db, repo, game_id) = blue_player_turn(1);
    let mut conn = repo.connection().unwrap();
    let mut persister = SqliteGamePersister::new(game_id, &mut conn);

    assert_eq!(guess_as(&mut persister, BLUE_PLAYER, 0).unwrap(), Condition::BluePlayer);
    assert_eq!(guess_as(&mut persister, BLUE_PLAYER, 1).unwrap(), Condition::RedSpy);
}

#[test]
fn test_clearing_all_cards_wins() {
    let (_db, repo, game_id) = blue_player_turn(0);
    let mut conn = repo.connection().unwrap();
    let mut persister = SqliteGamePersister::new(game_id, &mut conn);

    let last = BLUE_CARDS.end - 1;
    for position in BLUE_CARDS.start..last {
        assert_eq!(
            guess_as(&mut persister, BLUE_PLAYER, position).unwrap(),
            Condition::BluePlayer
        );
    }
    assert_eq!(guess_as(&mut persister, BLUE_PLAYER, last).unwrap(), Condition::BlueWin);
}

#[test]
fn test_bad_card_choices_are_rejected() {
    let (_db, repo, game_id) = blue_player_turn(3);
    let mut conn = repo.connection().unwrap();
    let mut persister = SqliteGamePersister::new(game_id, &mut conn);

    guess_as(&mut persister, BLUE_PLAYER, 0).unwrap();
    assert_kind(guess_as(&mut persister, BLUE_PLAYER, 0), ErrorKind::PhaseViolation);
    assert_kind(guess_as(&mut persister, BLUE_PLAYER, 99), ErrorKind::PhaseViolation);
    assert_eq!(persister.read_guesses().unwrap().len(), 1);
}

#[test]
fn test_only_active_player_may_act() {
    let (_db, repo, game_id) = blue_player_turn(2);
    let mut conn = repo.connection().unwrap();
    let mut persister = SqliteGamePersister::new(game_id, &mut conn);

    for actor in [RED_PLAYER, BLUE_SPY] {
        assert_kind(guess_as(&mut persister, actor, 0), ErrorKind::PhaseViolation);
        let ended = PlayerTurn::new(
            StateContext::new(actor, &mut persister, Rules::default()),
            Color::Blue,
        )
        .end_turn();
        assert_kind(ended, ErrorKind::PhaseViolation);
    }

    assert!(persister.read_guesses().unwrap().is_empty());
    assert_eq!(persister.read_condition().unwrap(), Condition::BluePlayer);
}

#[test]
fn test_end_turn() {
    let (_db, repo, game_id) = blue_player_turn(2);
    let mut conn = repo.connection().unwrap();
    let mut persister = SqliteGamePersister::new(game_id, &mut conn);

    let info = PlayerTurn::new(
        StateContext::new(BLUE_PLAYER, &mut persister, Rules::default()),
        Color::Blue,
    )
    .end_turn()
    .unwrap();

    assert_eq!(info.metadata.condition, Condition::RedSpy);
    assert!(info.guesses.is_empty());
    assert_eq!(info.hints.len(), 1);
}

#[test]
fn test_game_over_rejects_everything_but_info() {
    let (_db, repo, game_id) = blue_player_turn(2);
    let mut conn = repo.connection().unwrap();
    let mut persister = SqliteGamePersister::new(game_id, &mut conn);
    guess_as(&mut persister, BLUE_PLAYER, ASSASSIN_CARD).unwrap();

    let mut state = load_state(BLUE_PLAYER, &mut persister, Rules::default()).unwrap();
    assert_eq!(state.phase(), Phase::GameOver(Condition::RedWin));

    assert_kind(state.join(Color::Red, Role::Player), ErrorKind::PhaseViolation);
    assert_kind(state.start_game(), ErrorKind::PhaseViolation);
    assert_kind(state.give_hint("late", 1), ErrorKind::PhaseViolation);
    assert_kind(state.guess(0), ErrorKind::PhaseViolation);
    assert_kind(state.end_turn(), ErrorKind::PhaseViolation);

    let info = state.get_info().unwrap();
    assert_eq!(info.metadata.condition, Condition::RedWin);
    assert!(info.board.iter().all(|card| card.color.is_some()));
}

#[test]
fn test_dispatch_follows_condition() {
    let (_db, repo, game_id) = blue_player_turn(2);
    let mut conn = repo.connection().unwrap();
    let mut persister = SqliteGamePersister::new(game_id, &mut conn);

    assert_eq!(
        load_state(BLUE_PLAYER, &mut persister, Rules::default())
            .unwrap()
            .phase(),
        Phase::PlayerTurn(Color::Blue)
    );

    persister.push_condition(Condition::RedSpy).unwrap();
    assert_eq!(
        load_state(BLUE_PLAYER, &mut persister, Rules::default())
            .unwrap()
            .phase(),
        Phase::SpyTurn(Color::Red)
    );
}
