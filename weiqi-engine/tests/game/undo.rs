use weiqi_engine::{Engine, Stone, sgf};

use crate::common::{ko_setup, nine, play_all};

#[test]
fn undo_restores_capture_and_history() {
    let mut engine = ko_setup();
    engine.try_play(Stone::Black, (2, 1)).unwrap();
    let history_len = engine.history().len();

    assert!(engine.undo());
    assert_eq!(engine.stone_at((1, 1)), Some(Stone::White));
    assert_eq!(engine.captures().get(Stone::Black), 0);
    assert_eq!(engine.history().len(), history_len - 1);
    assert_eq!(engine.current_turn_stone(), Stone::Black);
}

#[test]
fn undo_on_empty_game_is_noop() {
    let mut engine = nine();
    assert!(!engine.undo());
}

#[test]
fn saved_game_round_trips_through_json() {
    let mut engine = nine();
    play_all(&mut engine, &[(2, 2), (6, 6), (2, 6)]);
    engine.try_pass(Stone::White).unwrap();

    let json = serde_json::to_string(&engine.saved_game()).unwrap();
    let restored = Engine::from_saved(&serde_json::from_str(&json).unwrap()).unwrap();
    assert_eq!(restored.goban(), engine.goban());
    assert_eq!(restored.moves(), engine.moves());
}

#[test]
fn exported_record_lists_every_move() {
    let mut engine = nine();
    play_all(&mut engine, &[(2, 2), (6, 6)]);
    engine.try_resign(Stone::Black);
    let text = sgf::export(&engine.record());
    assert!(text.contains("SZ[9]KM[7.5]RE[W+R];B[cc];W[gg])"), "{text}");
}
