use crawl_core::save_file;
use crawl_core::{Direction, EngineConfig, Game, Intent, PersistenceError};
use tempfile::tempdir;

#[test]
fn test_save_round_trip_reproduces_state() {
    let mut game = Game::new(555, EngineConfig::default());
    for direction in [Direction::East, Direction::East, Direction::South, Direction::West] {
        game.act(Intent::Move(direction)).expect("move");
    }

    let loaded = Game::load(&game.save().expect("save"), EngineConfig::default()).expect("load");

    assert_eq!(loaded.state().live, game.state().live);
    assert_eq!(loaded.state().inventory, game.state().inventory);
    assert_eq!(loaded.state().dungeon_level, game.state().dungeon_level);
    assert_eq!(loaded.state().messages, game.state().messages);
    assert_eq!(loaded.state().status, game.state().status);
    assert_eq!(loaded.frame(None), game.frame(None));
}

#[test]
fn test_save_slot_survives_overwrite() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("savegame.json");

    let first = Game::new(1, EngineConfig::default());
    first.save_to_slot(&path).expect("first save");
    let second = Game::new(2, EngineConfig::default());
    second.save_to_slot(&path).expect("second save");

    let loaded = Game::load_from_slot(&path, EngineConfig::default()).expect("load");
    assert_eq!(loaded.snapshot_hash(), second.snapshot_hash());
}

#[test]
fn test_corrupt_slot_is_reported_not_crashed() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("savegame.json");
    let game = Game::new(3, EngineConfig::default());
    let mut bytes = game.save().expect("save");
    bytes.truncate(bytes.len() / 2);
    save_file::write_slot(&path, &bytes).expect("write");

    let result = Game::load_from_slot(&path, EngineConfig::default());
    assert!(matches!(result, Err(PersistenceError::Malformed(_))));
}
