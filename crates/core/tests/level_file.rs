use std::fs;

use gemdelve_core::{Level, LevelConfig, LevelFile, LevelFileError, LevelKind, SeededRandom};
use tempfile::tempdir;

#[test]
fn config_file_to_level_file_and_back() {
    let dir = tempdir().expect("tempdir");
    let config_path = dir.path().join("level.toml");
    fs::write(&config_path, "width = 11\nheight = 9\nroom_size = 6\n").expect("write config");

    let config = LevelConfig::load(&config_path).expect("load config");
    let mut rng = SeededRandom::new(Some("export"));
    let level = Level::generate(&config, LevelKind::Maze, &mut rng).expect("generate");

    let level_path = dir.path().join("out").join("export.json");
    LevelFile::new(level.clone()).write_atomic(&level_path).expect("write level");

    let loaded = LevelFile::load(&level_path).expect("load level");
    assert_eq!(loaded.level, level);
    assert_eq!(loaded.level.tiles.width(), 66);
    assert_eq!(loaded.regenerate().expect("regenerate").fingerprint(), level.fingerprint());
}

#[test]
fn merchant_level_round_trips() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("merchant.json");
    let mut rng = SeededRandom::new(Some("shop"));
    let level = Level::generate(&LevelConfig::default(), LevelKind::Merchant, &mut rng)
        .expect("generate");

    LevelFile::new(level).write_atomic(&path).expect("write");
    let loaded = LevelFile::load(&path).expect("load");
    assert_eq!(loaded.level.kind, LevelKind::Merchant);
    assert!(loaded.is_reproducible().expect("regenerate"));
}

#[test]
fn truncated_file_is_a_json_error() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("broken.json");
    let mut rng = SeededRandom::new(Some("cut"));
    let level =
        Level::generate(&LevelConfig::default(), LevelKind::Maze, &mut rng).expect("generate");
    let json = LevelFile::new(level).to_json().expect("serialize");
    fs::write(&path, &json[..json.len() / 2]).expect("write");

    match LevelFile::load(&path) {
        Err(LevelFileError::Json(_)) => {}
        other => panic!("expected a JSON error, got {other:?}"),
    }
}

#[test]
fn missing_file_is_an_io_error() {
    let dir = tempdir().expect("tempdir");
    let err = LevelFile::load(&dir.path().join("nope.json")).unwrap_err();
    assert!(matches!(err, LevelFileError::Io(_)));
    assert!(err.to_string().starts_with("level file I/O error"));
}
