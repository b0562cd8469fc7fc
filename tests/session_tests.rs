//! Integration tests for the session lifecycle

use std::path::PathBuf;

use tui_concentration::core::{EngineConfig, EngineState, MatchEngine, Resolution, SelectOutcome};
use tui_concentration::session::{GameSession, SessionConfig, StartKind};
use tui_concentration::store::{JsonFileStore, MemoryStore};
use tui_concentration::types::{CardId, GameEvent, MATCH_DELAY_MS, TICK_MS};

fn scratch_file(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!(
        "tui-concentration-session-{}-{}",
        name,
        std::process::id()
    ));
    let _ = std::fs::remove_dir_all(&dir);
    dir.join("save.json")
}

/// Drive the engine with host-sized ticks until the pending pair resolves.
fn settle(engine: &mut MatchEngine) -> Option<Resolution> {
    for _ in 0..(MATCH_DELAY_MS / TICK_MS + 2) {
        if let Some(resolution) = engine.tick(TICK_MS) {
            return Some(resolution);
        }
    }
    None
}

fn pair_positions(deck: &[CardId]) -> Vec<(usize, usize)> {
    let mut seen: Vec<Option<usize>> = vec![None; deck.len()];
    let mut pairs = Vec::new();
    for (index, &id) in deck.iter().enumerate() {
        match seen[id as usize].take() {
            Some(first) => pairs.push((first, index)),
            None => seen[id as usize] = Some(index),
        }
    }
    pairs
}

#[test]
fn test_two_by_two_perfect_game() {
    let mut engine = MatchEngine::new(2, 2, &[0, 1, 0, 1], EngineConfig::default()).unwrap();

    assert_eq!(engine.select(0), SelectOutcome::FirstSelected);
    assert_eq!(engine.select(2), SelectOutcome::Evaluating);
    assert!(engine.is_busy());
    assert_eq!(
        settle(&mut engine),
        Some(Resolution::Match {
            combo: 1,
            points: 10,
            completed: false
        })
    );
    assert_eq!((engine.matched_pairs(), engine.turns(), engine.combo(), engine.score()), (1, 1, 1, 10));

    engine.select(1);
    engine.select(3);
    assert_eq!(
        settle(&mut engine),
        Some(Resolution::Match {
            combo: 2,
            points: 20,
            completed: true
        })
    );
    assert_eq!(engine.score(), 30);
    assert_eq!(engine.state(), EngineState::Complete);

    let events = engine.take_events();
    match events.last() {
        Some(GameEvent::GameOver { score, turns, elapsed_secs }) => {
            assert_eq!((*score, *turns), (30, 2));
            assert!(*elapsed_secs > 0.0);
        }
        other => panic!("expected game over, got {:?}", other),
    }
}

#[test]
fn test_mismatch_then_match_resets_combo() {
    let mut engine = MatchEngine::new(2, 2, &[0, 1, 0, 1], EngineConfig::default()).unwrap();

    engine.select(0);
    engine.select(1);
    assert_eq!(settle(&mut engine), Some(Resolution::Mismatch));
    assert!(engine.cards().iter().all(|c| !c.flipped));
    assert_eq!((engine.turns(), engine.combo(), engine.score()), (1, 0, 0));

    engine.select(0);
    engine.select(2);
    settle(&mut engine);
    assert_eq!((engine.turns(), engine.combo(), engine.score()), (2, 1, 10));
}

#[test]
fn test_third_selection_is_locked_out_while_evaluating() {
    let mut engine = MatchEngine::new(2, 2, &[0, 1, 0, 1], EngineConfig::default()).unwrap();
    engine.select(0);
    engine.select(1);

    assert_eq!(engine.select(2), SelectOutcome::Ignored);
    assert!(!engine.cards()[2].flipped);

    engine.tick(MATCH_DELAY_MS - 1);
    assert!(engine.is_busy());
    engine.tick(1);
    assert!(!engine.is_busy());
}

#[test]
fn test_reset_while_evaluating_discards_pending_pair() {
    let mut engine = MatchEngine::new(2, 2, &[0, 1, 0, 1], EngineConfig::default()).unwrap();
    engine.select(0);
    engine.select(2);
    engine.reset();

    assert_eq!(engine.tick(MATCH_DELAY_MS * 2), None);
    assert_eq!((engine.score(), engine.turns(), engine.matched_pairs()), (0, 0, 0));
    assert_eq!(engine.state(), EngineState::Idle);
    assert!(engine.cards().iter().all(|c| !c.flipped && !c.matched));
}

#[test]
fn test_full_four_by_four_game_in_memory() {
    let config = SessionConfig::default().with_seed(2024);
    let mut session = GameSession::new(config, MemoryStore::new()).unwrap();
    assert_eq!(session.resume_or_new_game().unwrap(), StartKind::Fresh);

    let deck: Vec<CardId> = session.engine().cards().iter().map(|c| c.id).collect();
    let pairs = pair_positions(&deck);
    assert_eq!(pairs.len(), 8);

    for (i, &(a, b)) in pairs.iter().enumerate() {
        session.select_card(a);
        session.select_card(b);
        session.tick(MATCH_DELAY_MS).unwrap();
        assert_eq!(session.combo(), i as u32 + 1);
    }

    // 10 * (1 + 2 + ... + 8)
    assert_eq!(session.score(), 360);
    assert_eq!(session.turns(), 8);
    assert!(session.is_complete());
    assert!(!session.persistence().has_save().unwrap());
}

#[test]
fn test_progress_survives_reopening_the_save_file() {
    let path = scratch_file("reopen");
    let config = SessionConfig::default().with_grid(2, 4).with_seed(9);

    let (deck, cards) = {
        let store = JsonFileStore::open(&path).unwrap();
        let mut session = GameSession::new(config, store).unwrap();
        session.resume_or_new_game().unwrap();

        let deck: Vec<CardId> = session.engine().cards().iter().map(|c| c.id).collect();
        let pairs = pair_positions(&deck);
        for &(a, b) in &pairs[..2] {
            session.select_card(a);
            session.select_card(b);
            session.tick(MATCH_DELAY_MS).unwrap();
        }
        (deck, session.engine().cards().to_vec())
    };
    assert!(path.exists());

    let store = JsonFileStore::open(&path).unwrap();
    let mut session = GameSession::new(SessionConfig::default(), store).unwrap();
    assert_eq!(session.resume_or_new_game().unwrap(), StartKind::Resumed);

    assert_eq!((session.rows(), session.columns()), (2, 4));
    let resumed: Vec<CardId> = session.engine().cards().iter().map(|c| c.id).collect();
    assert_eq!(resumed, deck);
    assert_eq!(session.engine().cards(), &cards[..]);
    assert_eq!((session.score(), session.turns(), session.combo()), (30, 2, 2));
    assert_eq!(session.engine().matched_pairs(), 2);
    assert_eq!(session.engine().total_pairs(), 4);
    assert!(session.elapsed_secs() > 0.0);

    let _ = std::fs::remove_dir_all(path.parent().unwrap());
}

#[test]
fn test_forced_new_game_discards_save_file() {
    let path = scratch_file("forced-new");
    let config = SessionConfig::default().with_grid(2, 2).with_seed(3);

    {
        let mut session = GameSession::new(config, JsonFileStore::open(&path).unwrap()).unwrap();
        session.resume_or_new_game().unwrap();
        let deck: Vec<CardId> = session.engine().cards().iter().map(|c| c.id).collect();
        let (a, b) = pair_positions(&deck)[0];
        session.select_card(a);
        session.select_card(b);
        session.tick(MATCH_DELAY_MS).unwrap();
        assert!(session.persistence().has_save().unwrap());
    }

    let mut session = GameSession::new(config, JsonFileStore::open(&path).unwrap()).unwrap();
    session.new_game(2, 2).unwrap();
    assert_eq!(session.score(), 0);

    let reopened = JsonFileStore::open(&path).unwrap();
    let mut session = GameSession::new(config, reopened).unwrap();
    assert_eq!(session.resume_or_new_game().unwrap(), StartKind::Fresh);

    let _ = std::fs::remove_dir_all(path.parent().unwrap());
}

#[test]
fn test_corrupt_save_file_starts_fresh_game() {
    let path = scratch_file("corrupt");
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();

    for contents in [
        r#"{"Save_Score":"10","Save_Shuf"#,
        r#"{"Save_Score":10,"Save_Shuffled":"0,1,0,1"}"#,
    ] {
        std::fs::write(&path, contents).unwrap();

        let store = JsonFileStore::open_or_reset(&path).unwrap();
        let config = SessionConfig::default().with_grid(2, 2).with_seed(11);
        let mut session = GameSession::new(config, store).unwrap();
        assert_eq!(session.resume_or_new_game().unwrap(), StartKind::Fresh);
        assert_eq!(session.score(), 0);
        assert_eq!(session.engine().cards().len(), 4);

        // Nothing unreadable is left at the save path.
        assert!(JsonFileStore::open(&path).is_ok());
    }

    let _ = std::fs::remove_dir_all(path.parent().unwrap());
}
