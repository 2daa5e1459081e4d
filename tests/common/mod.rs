//! Shared fixtures for integration tests.

#![allow(dead_code)]

use tempfile::NamedTempFile;

use codenames_engine::{
    Card, CardColor, Color, GamePersister, GameRepository, GameStore, Seat, SqliteGamePersister,
};

pub const RED_SPY: &str = "red-spy";
pub const RED_PLAYER: &str = "red-player";
pub const BLUE_SPY: &str = "blue-spy";
pub const BLUE_PLAYER: &str = "blue-player";

/// Board positions by identity in [`default_board`].
pub const BLUE_CARDS: std::ops::Range<usize> = 0..9;
pub const RED_CARDS: std::ops::Range<usize> = 9..17;
pub const NEUTRAL_CARD: usize = 17;
pub const ASSASSIN_CARD: usize = 24;

/// 25 cards: 9 blue, 8 red, 7 neutral, 1 assassin.
pub fn default_board() -> Vec<Card> {
    (0..25)
        .map(|position| {
            let color = match position {
                0..=8 => CardColor::Blue,
                9..=16 => CardColor::Red,
                17..=23 => CardColor::Neutral,
                _ => CardColor::Assassin,
            };
            Card::new(position, format!("word{position}"), color)
        })
        .collect()
}

/// Creates a temporary database file with schema applied, returns the file
/// handle (must stay in scope to keep the file alive) and a ready repository.
pub fn setup_test_db() -> (NamedTempFile, GameRepository) {
    let db_file = NamedTempFile::new().expect("Failed to create temp file");
    let db_path = db_file.path().to_str().expect("Invalid path").to_string();

    let repo = GameRepository::new(db_path).expect("Failed to create repository");
    repo.run_migrations().expect("Migrations failed");
    (db_file, repo)
}

/// Test database holding one fresh game on the default board.
pub fn create_default_game() -> (NamedTempFile, GameRepository, i32) {
    let (db, repo) = setup_test_db();
    let game_id = repo.create_game(&default_board()).expect("Create failed");
    (db, repo, game_id)
}

/// Seats the four standard participants directly through the store.
pub fn add_players(repo: &GameRepository, game_id: i32) {
    let mut conn = repo.connection().expect("Connection failed");
    let mut persister = SqliteGamePersister::new(game_id, &mut conn);
    for (seat, participant) in [
        (Seat::spymaster(Color::Red), RED_SPY),
        (Seat::player(Color::Red), RED_PLAYER),
        (Seat::spymaster(Color::Blue), BLUE_SPY),
        (Seat::player(Color::Blue), BLUE_PLAYER),
    ] {
        persister
            .assign_seat(seat, participant)
            .expect("Assign failed");
    }
}

/// Participant holding the spymaster seat of a team.
pub fn spymaster_of(color: Color) -> &'static str {
    match color {
        Color::Red => RED_SPY,
        Color::Blue => BLUE_SPY,
    }
}

/// Participant holding the player seat of a team.
pub fn player_of(color: Color) -> &'static str {
    match color {
        Color::Red => RED_PLAYER,
        Color::Blue => BLUE_PLAYER,
    }
}
