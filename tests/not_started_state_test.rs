//! Tests for the pre-game state.

mod common;

use codenames_engine::{
    Color, Condition, ErrorKind, GameError, GamePersister, GameState, NotStarted, Role, Rules,
    Seat, SqliteGamePersister, StateContext,
};

use common::{add_players, create_default_game};

fn assert_kind<T: std::fmt::Debug>(result: Result<T, GameError>, kind: ErrorKind) {
    match result {
        Err(e) => assert_eq!(e.kind(), kind, "unexpected error: {e}"),
        Ok(v) => panic!("expected {kind}, got {v:?}"),
    }
}

#[test]
fn test_invalid_invocations() {
    let (_db, repo, game_id) = create_default_game();
    let mut conn = repo.connection().unwrap();
    let mut persister = SqliteGamePersister::new(game_id, &mut conn);
    let mut state = NotStarted::new(StateContext::new(
        "mysessionid",
        &mut persister,
        Rules::default(),
    ));

    assert_kind(state.guess(0), ErrorKind::PhaseViolation);
    assert_kind(state.give_hint("myhint", 2), ErrorKind::PhaseViolation);
    assert_kind(state.end_turn(), ErrorKind::PhaseViolation);
}

#[test]
fn test_cannot_join_twice() {
    let (_db, repo, game_id) = create_default_game();
    let mut conn = repo.connection().unwrap();
    let mut persister = SqliteGamePersister::new(game_id, &mut conn);
    let mut state = NotStarted::new(StateContext::new(
        "mysessionid",
        &mut persister,
        Rules::default(),
    ));

    state.join(Color::Red, Role::Player).expect("First join failed");
    assert_kind(state.join(Color::Blue, Role::Player), ErrorKind::AlreadyJoined);
}

#[test]
fn test_cannot_join_already_occupied_role() {
    let (_db, repo, game_id) = create_default_game();
    let mut conn = repo.connection().unwrap();
    let mut persister = SqliteGamePersister::new(game_id, &mut conn);
    let mut state = NotStarted::new(StateContext::new(
        "mysessionid",
        &mut persister,
        Rules::default(),
    ));

    state.join(Color::Red, Role::Player).expect("First join failed");
    assert_kind(state.join(Color::Red, Role::Player), ErrorKind::RoleOccupied);
}

#[test]
fn test_other_participant_cannot_take_occupied_seat() {
    let (_db, repo, game_id) = create_default_game();
    let mut conn = repo.connection().unwrap();
    let mut persister = SqliteGamePersister::new(game_id, &mut conn);

    NotStarted::new(StateContext::new("alice", &mut persister, Rules::default()))
        .join(Color::Red, Role::Player)
        .unwrap();
    let result = NotStarted::new(StateContext::new("bob", &mut persister, Rules::default()))
        .join(Color::Red, Role::Player);
    assert_kind(result, ErrorKind::RoleOccupied);

    let roster = persister.read_roster().unwrap();
    assert_eq!(roster.occupant(Seat::player(Color::Red)), Some("alice"));
    assert_eq!(roster.len(), 1);
}

#[test]
fn test_join_is_visible_in_info() {
    let (_db, repo, game_id) = create_default_game();
    let mut conn = repo.connection().unwrap();
    let mut persister = SqliteGamePersister::new(game_id, &mut conn);
    let mut state = NotStarted::new(StateContext::new(
        "mysessionid",
        &mut persister,
        Rules::default(),
    ));

    let before = state.get_info().unwrap();
    let after = state.join(Color::Blue, Role::Spymaster).unwrap();

    assert!(before.metadata.roster.is_empty());
    assert_eq!(
        after.metadata.roster.seat_of("mysessionid"),
        Some(Seat::spymaster(Color::Blue))
    );
    assert_eq!(after.metadata.condition, Condition::NotStarted);
    assert_eq!(after.hints, before.hints);
    assert_eq!(after.guesses, before.guesses);
}

#[test]
fn test_start_game_fails_if_any_role_is_still_open() {
    let (_db, repo, game_id) = create_default_game();
    let mut conn = repo.connection().unwrap();
    let mut persister = SqliteGamePersister::new(game_id, &mut conn);
    let mut state = NotStarted::new(StateContext::new(
        "mysessionid",
        &mut persister,
        Rules::default(),
    ));

    assert_kind(state.start_game(), ErrorKind::PhaseViolation);
    assert_eq!(
        state.get_info().unwrap().metadata.condition,
        Condition::NotStarted
    );

    state.join(Color::Red, Role::Player).unwrap();
    assert_kind(state.start_game(), ErrorKind::PhaseViolation);
}

#[test]
fn test_start_game() {
    let (_db, repo, game_id) = create_default_game();
    add_players(&repo, game_id);
    let mut conn = repo.connection().unwrap();
    let mut persister = SqliteGamePersister::new(game_id, &mut conn);
    let mut state = NotStarted::new(StateContext::new(
        "mysessionid",
        &mut persister,
        Rules::default(),
    ));

    let pre_condition = state.get_info().unwrap().metadata.condition;
    state.start_game().unwrap();
    let post_condition = state.get_info().unwrap().metadata.condition;

    assert_eq!(pre_condition, Condition::NotStarted);
    assert_eq!(post_condition, Condition::BlueSpy);
}

#[test]
fn test_start_game_honors_starting_team() {
    let (_db, repo, game_id) = create_default_game();
    add_players(&repo, game_id);
    let mut conn = repo.connection().unwrap();
    let mut persister = SqliteGamePersister::new(game_id, &mut conn);
    let rules = Rules {
        starting_team: Color::Red,
        ..Rules::default()
    };

    let info = NotStarted::new(StateContext::new("mysessionid", &mut persister, rules))
        .start_game()
        .unwrap();
    assert_eq!(info.metadata.condition, Condition::RedSpy);
}

#[test]
fn test_cannot_start_game_twice() {
    let (_db, repo, game_id) = create_default_game();
    add_players(&repo, game_id);
    let mut conn = repo.connection().unwrap();
    let mut persister = SqliteGamePersister::new(game_id, &mut conn);
    let mut state = NotStarted::new(StateContext::new(
        "mysessionid",
        &mut persister,
        Rules::default(),
    ));

    state.start_game().unwrap();
    assert_kind(state.start_game(), ErrorKind::PhaseViolation);
    assert_eq!(
        state.get_info().unwrap().metadata.condition,
        Condition::BlueSpy
    );
}
