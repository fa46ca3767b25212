//! Persistence integration tests.
//!
//! Sessions write their durables through the store as they play; a new
//! session on the same store resumes them. Missing and corrupt blobs
//! both fall back to defaults.

use neon2048::board::{Board, SpecialTileMap};
use neon2048::core::{Coord, Direction, GameConfig, SpecialTuning};
use neon2048::persist::{keys, load_json, save_json, MemoryStore, StateStore};
use neon2048::session::GameSession;
use neon2048::{GhostSnapshot, PowerUpKind, StreakBests};

fn quiet_config() -> GameConfig {
    GameConfig::default().with_special(SpecialTuning::disabled())
}

/// Play one scoring move so the session has something to persist.
fn score_once(session: &mut GameSession) {
    session.set_position(
        Board::from_rows([[2, 2, 0, 0], [0; 4], [0; 4], [0; 4]]),
        SpecialTileMap::new(),
    );
    session.resolve_move(Direction::Left);
    session.spawn_next_tile().unwrap();
}

// =============================================================================
// Write-Through
// =============================================================================

/// Test a new best score lands in the store with a ghost snapshot.
#[test]
fn test_best_score_and_ghost_written() {
    let mut session = GameSession::new(quiet_config(), 42);
    score_once(&mut session);

    assert_eq!(load_json(session.store(), keys::BEST_SCORE, 0u32), 4);
    let ghost: Option<GhostSnapshot> = load_json(session.store(), keys::GHOST_DATA, None);
    let ghost = ghost.expect("new best must record a ghost snapshot");
    assert_eq!(ghost.score, 4);
    assert_eq!(ghost.move_count, 1);
    assert_eq!(ghost.board.get(Coord::new(0, 0)), 4);
}

/// Test streak bests are written when they improve.
#[test]
fn test_streak_bests_written() {
    let mut session = GameSession::new(quiet_config(), 7);
    score_once(&mut session);
    score_once(&mut session);

    let bests: StreakBests = load_json(session.store(), keys::STREAK_BESTS, StreakBests::default());
    assert_eq!(bests.merge, 2);
}

/// Test consuming a power-up updates the persisted inventory.
#[test]
fn test_inventory_written_on_use() {
    let mut session = GameSession::new(quiet_config(), 9);
    session.set_position(
        Board::from_rows([[2, 2, 0, 0], [0; 4], [0; 4], [0; 4]]),
        SpecialTileMap::new(),
    );
    session.use_hint().unwrap();

    let stored: neon2048::PowerUpInventory =
        load_json(session.store(), keys::POWER_UPS, neon2048::PowerUpInventory::default());
    assert_eq!(stored.count(PowerUpKind::Hint), 4);
}

// =============================================================================
// Resume
// =============================================================================

/// Test a second session on the same store resumes the durables.
#[test]
fn test_resume_from_store() {
    let mut store = MemoryStore::new();
    save_json(&mut store, keys::BEST_SCORE, &777u32);
    save_json(&mut store, keys::STREAK_BESTS, &StreakBests { merge: 6, perfect: 2 });

    let session = GameSession::with_store(quiet_config(), 1, Box::new(store));

    assert_eq!(session.best_score(), 777);
    assert_eq!(session.streaks().best_merge_streak, 6);
    assert_eq!(session.streaks().best_perfect_streak, 2);
    assert_eq!(session.streaks().current_merge_streak, 0);
}

/// Test corrupt blobs fall back to defaults instead of failing.
#[test]
fn test_corrupt_blobs_fall_back() {
    let mut store = MemoryStore::new();
    store.persist(keys::BEST_SCORE, "{definitely not json");
    store.persist(keys::POWER_UPS, "[1, 2, 3]");
    store.persist(keys::GHOST_DATA, "null nonsense");

    let session = GameSession::with_store(quiet_config(), 1, Box::new(store));

    assert_eq!(session.best_score(), 0);
    assert_eq!(session.inventory().count(PowerUpKind::Undo), 3);
    assert!(session.ghost_snapshot().is_none());
}

/// Test the ghost-enabled flag is ignored when no snapshot exists.
#[test]
fn test_ghost_enabled_requires_snapshot_on_resume() {
    let mut store = MemoryStore::new();
    save_json(&mut store, keys::GHOST_ENABLED, &true);

    let session = GameSession::with_store(quiet_config(), 1, Box::new(store));
    assert!(!session.ghost_enabled());
}

/// Test unrelated host keys survive a full session lifecycle.
#[test]
fn test_unrelated_keys_untouched() {
    let mut store = MemoryStore::new();
    store.persist("language", "\"de\"");

    let mut session = GameSession::with_store(quiet_config(), 1, Box::new(store));
    session.new_game();
    score_once(&mut session);

    assert_eq!(session.store().load("language").as_deref(), Some("\"de\""));
}
