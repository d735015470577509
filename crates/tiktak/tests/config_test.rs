//! Tests for loading game configuration.

use std::io::Write;
use std::time::Duration;
use tiktak::{GameConfig, MAX_BOARD_SIZE};

#[test]
fn test_defaults() {
    let config = GameConfig::default();
    assert_eq!(*config.board_size(), 3);
    assert_eq!(config.ai_delay(), Duration::from_secs(1));
    assert_eq!(config.player_one_name(), "Player 1");
    assert_eq!(config.player_two_name(), "Player 2");
    assert_eq!(*config.ai_seed(), None);
    assert!(config.validate().is_ok());
}

#[test]
fn test_partial_file_keeps_defaults() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "board_size = 4").unwrap();
    writeln!(file, "ai_seed = 99").unwrap();

    let config = GameConfig::from_file(file.path()).expect("valid config");
    assert_eq!(*config.board_size(), 4);
    assert_eq!(*config.ai_seed(), Some(99));
    assert_eq!(*config.ai_delay_ms(), 1000);
    assert_eq!(config.player_one_name(), "Player 1");
}

#[test]
fn test_invalid_board_size_rejected() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "board_size = 0").unwrap();

    let err = GameConfig::from_file(file.path()).unwrap_err();
    assert!(err.message.contains("board_size"), "{}", err.message);
}

#[test]
fn test_malformed_file_rejected() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "board_size = \"three\"").unwrap();

    let err = GameConfig::from_file(file.path()).unwrap_err();
    assert!(err.message.starts_with("Failed to parse config"));
}

#[test]
fn test_missing_file_falls_back_to_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let config = GameConfig::load_or_default(dir.path().join("absent.toml")).unwrap();
    assert_eq!(config, GameConfig::default());
}

#[test]
fn test_missing_file_is_an_error_for_from_file() {
    let dir = tempfile::tempdir().unwrap();
    let err = GameConfig::from_file(dir.path().join("absent.toml")).unwrap_err();
    assert!(err.message.starts_with("Failed to read config file"));
}

#[test]
fn test_overrides() {
    let config = GameConfig::default()
        .with_board_size(5)
        .with_ai_delay_ms(250)
        .with_ai_seed(1);
    assert_eq!(*config.board_size(), 5);
    assert_eq!(config.ai_delay(), Duration::from_millis(250));
    assert_eq!(*config.ai_seed(), Some(1));
}

#[test]
fn test_oversized_board_rejected() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "board_size = 100000").unwrap();

    let err = GameConfig::from_file(file.path()).unwrap_err();
    assert!(err.message.contains("at most"), "{}", err.message);

    assert!(GameConfig::default().with_board_size(MAX_BOARD_SIZE).validate().is_ok());
    assert!(
        GameConfig::default()
            .with_board_size(MAX_BOARD_SIZE + 1)
            .validate()
            .is_err()
    );
}
