use weiqi_engine::{GoError, Stone};

use crate::common::ko_setup;

#[test]
fn ko_immediate_recapture_blocked() {
    let mut engine = ko_setup();

    // Black captures at (2,1), creating the ko.
    engine.try_play(Stone::Black, (2, 1)).unwrap();
    assert_eq!(engine.stone_at((1, 1)), None);
    assert_eq!(engine.captures().get(Stone::Black), 1);

    // White retaking would recreate the position after move 8.
    let before = engine.goban().clone();
    let moves = engine.moves().len();
    let err = engine.try_play(Stone::White, (1, 1)).unwrap_err();
    assert_eq!(err, GoError::Superko);
    assert_eq!(err.to_string(), "superko: move repeats a prior global board state");
    assert_eq!(engine.goban(), &before);
    assert_eq!(engine.moves().len(), moves);
    assert!(!engine.is_legal((1, 1), Stone::White));
}

#[test]
fn ko_retake_after_threat_exchange() {
    let mut engine = ko_setup();
    engine.try_play(Stone::Black, (2, 1)).unwrap();

    // Ko threat elsewhere and an answer.
    engine.try_play(Stone::White, (7, 7)).unwrap();
    engine.try_play(Stone::Black, (7, 6)).unwrap();

    // The whole board differs now, so the retake is fine.
    engine.try_play(Stone::White, (1, 1)).unwrap();
    assert_eq!(engine.stone_at((2, 1)), None);
    assert_eq!(engine.captures().get(Stone::White), 1);
}

#[test]
fn ai_never_proposes_the_retake() {
    use weiqi_engine::{Decision, Difficulty, HeuristicAi, MoveSelector};

    let mut engine = ko_setup();
    engine.try_play(Stone::Black, (2, 1)).unwrap();

    for difficulty in Difficulty::ALL {
        for seed in 0..5 {
            let mut ai = HeuristicAi::seeded(difficulty, seed);
            let decision = ai.select_move(&engine.ai_request());
            assert_ne!(decision, Decision::Play((1, 1)), "{difficulty} seed {seed}");
        }
    }
}
