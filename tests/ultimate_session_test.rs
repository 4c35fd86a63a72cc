//! Tests for game sessions and the save file.

use std::path::PathBuf;
use tempfile::TempDir;
use ultimate_games::{
    AppConfig, GameSession, GameState, LoadError, Move, Player, PlayerProfile, Players, Position,
    RulesConfig, SaveStore, SessionEvent, Target,
};

/// Creates a session saving into a temp directory. The directory handle
/// must stay in scope to keep the files alive.
fn setup_session() -> (TempDir, GameSession) {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let session = GameSession::new(
        Players::new(
            PlayerProfile::new("Alice", None),
            PlayerProfile::new("Bob", Some(PathBuf::from("bob.png"))),
        ),
        SaveStore::new(dir.path().join("save.txt")),
        RulesConfig::default(),
    );
    (dir, session)
}

const ALMOST_WON: &str = r#"{
    "currentPlayer": "O",
    "nextBoard": [2, 2],
    "boards": [
        [["O", "O", "O"], ["O", "O", "O"], ["O", "O", "O"]],
        [["O", "O", "O"], ["O", "O", "O"], ["O", "O", "O"]],
        [["", "", ""], ["", "", ""], ["", "", ""]],
        [["", "", ""], ["", "X", ""], ["", "", ""]],
        [["", "", ""], ["", "", ""], ["", "", ""]],
        [["", "", ""], ["", "", ""], ["", "", ""]],
        [["", "", ""], ["", "", ""], ["", "", ""]],
        [["", "", ""], ["", "", ""], ["", "", ""]],
        [["O", "", ""], ["", "O", ""], ["", "", ""]]
    ],
    "winners": [["O", "O", null], [null, null, null], [null, null, null]]
}"#;

/// Writes `ALMOST_WON`, adjusted by `edit`, as the session's save file.
fn write_save(dir: &TempDir, edit: impl FnOnce(&mut serde_json::Value)) {
    let mut json: serde_json::Value = serde_json::from_str(ALMOST_WON).expect("fixture is json");
    edit(&mut json);
    std::fs::write(dir.path().join("save.txt"), json.to_string()).expect("write save");
}

#[test]
fn test_decided_destination_frees_choice() {
    let (dir, mut session) = setup_session();
    write_save(&dir, |_| {});
    session.load().expect("Load failed");
    assert_eq!(session.turn_line(), "Bob (O) to move in (2, 2)");

    // O completes the diagonal of the bottom-right board and thereby sends
    // X to that same, now decided, board.
    let event = session.submit(Move::new(Player::O, Position::BottomRight, Position::BottomRight));
    match event {
        SessionEvent::Played(outcome) => {
            assert_eq!(outcome.sub_board_won, Some(Player::O));
            assert_eq!(outcome.next_constraint, None);
            assert_eq!(outcome.game_over, None);
        }
        other => panic!("unexpected event {:?}", other),
    }
    assert_eq!(session.turn_line(), "Alice (X) to move in any open board");

    let event = session.submit(Move::new(Player::X, Position::TopLeft, Position::Center));
    assert!(matches!(event, SessionEvent::Rejected(_)));
    assert_eq!(session.engine().state().current_player(), Player::X);

    let event = session.submit(Move::new(Player::X, Position::MiddleLeft, Position::TopRight));
    assert!(matches!(event, SessionEvent::Played(_)));
    assert_eq!(
        session.engine().state().active_constraint(),
        Some(Position::TopRight)
    );
}

#[test]
fn test_winning_move_resets_session() {
    let (dir, mut session) = setup_session();
    write_save(&dir, |json| {
        json["nextBoard"] = serde_json::json!([0, 2]);
        json["boards"][2][0] = serde_json::json!(["O", "O", ""]);
    });
    session.load().expect("Load failed");
    assert_eq!(
        session.engine().state().active_constraint(),
        Some(Position::TopRight)
    );

    let event = session.submit(Move::new(Player::O, Position::TopRight, Position::TopRight));
    assert_eq!(
        event,
        SessionEvent::GameOver {
            winner: Player::O,
            winner_name: "Bob".to_string(),
        }
    );
    assert_eq!(session.engine().state(), &GameState::new());
}

#[test]
fn test_save_and_load_round_trip() {
    let (_dir, mut session) = setup_session();
    session.submit_at(Target::new(Position::Center, Position::BottomLeft));
    session.submit_at(Target::new(Position::BottomLeft, Position::TopRight));
    session.save().expect("Save failed");
    let saved = session.engine().state().clone();

    session.reset();
    assert_eq!(session.engine().state(), &GameState::new());

    session.load().expect("Load failed");
    assert_eq!(session.engine().state(), &saved);
}

#[test]
fn test_saved_file_uses_flat_format() {
    let (dir, mut session) = setup_session();
    session.submit_at(Target::new(Position::TopCenter, Position::MiddleLeft));
    session.save().expect("Save failed");

    let text = std::fs::read_to_string(dir.path().join("save.txt")).expect("read save");
    let json: serde_json::Value = serde_json::from_str(&text).expect("json");
    assert_eq!(json["currentPlayer"], "O");
    assert_eq!(json["nextBoard"], serde_json::json!([1, 0]));
    assert_eq!(json["boards"][1][1][0], "X");
    assert_eq!(json["winners"][0][1], serde_json::Value::Null);
    // Display names are presentation state only.
    assert!(!text.contains("Alice"));
}

#[test]
fn test_missing_save_is_reported() {
    let (_dir, mut session) = setup_session();
    let err = session.load().unwrap_err();
    assert!(matches!(err, LoadError::Missing(_)));
    assert!(err.to_string().contains("No saved game"));
}

#[test]
fn test_malformed_save_keeps_current_game() {
    let (dir, mut session) = setup_session();
    session.submit_at(Target::new(Position::Center, Position::Center));
    let before = session.engine().state().clone();

    std::fs::write(dir.path().join("save.txt"), r#"{"currentPlayer": "X"}"#).expect("write");
    assert!(matches!(session.load(), Err(LoadError::Malformed(_))));
    assert_eq!(session.engine().state(), &before);

    std::fs::write(dir.path().join("save.txt"), "not json at all").expect("write");
    assert!(matches!(session.load(), Err(LoadError::Malformed(_))));
    assert_eq!(session.engine().state(), &before);
}

#[test]
fn test_invalid_save_keeps_current_game() {
    let (dir, mut session) = setup_session();
    let before = session.engine().state().clone();

    write_save(&dir, |json| json["nextBoard"] = serde_json::json!([0, 0]));
    assert!(matches!(session.load(), Err(LoadError::Invalid(_))));
    assert_eq!(session.engine().state(), &before);
}

#[test]
fn test_session_from_config() {
    let dir = TempDir::new().expect("temp dir");
    let config = AppConfig::default().with_save_path(dir.path().join("from_config.json"));
    let session = GameSession::from_config(&config);
    session.save().expect("Save failed");
    assert!(dir.path().join("from_config.json").exists());
    assert_eq!(session.players().name_of(Player::X), "Player X");
}
