use weiqi_engine::{AiRequest, Decision, Difficulty, Goban, HeuristicAi, MoveSelector, Stone};

use crate::common::{nine, play_all};

/// Same seed, same board, same answer.
#[test]
fn expert_is_reproducible() {
    let mut engine = nine();
    play_all(&mut engine, &[(2, 2), (6, 6), (6, 2)]);

    let a = HeuristicAi::seeded(Difficulty::Expert, 11).select_move(&engine.ai_request());
    let b = HeuristicAi::seeded(Difficulty::Expert, 11).select_move(&engine.ai_request());
    assert_eq!(a, b);
}

/// Two seeded opponents play a short game; every move they choose is legal.
#[test]
fn self_play_stays_legal() {
    let mut engine = nine();
    let mut black = HeuristicAi::seeded(Difficulty::Hard, 1);
    let mut white = HeuristicAi::seeded(Difficulty::Easy, 2);

    for _ in 0..60 {
        let stone = engine.current_turn_stone();
        let ai = match stone {
            Stone::Black => &mut black,
            Stone::White => &mut white,
        };
        let decision = ai.select_move(&engine.ai_request());
        match decision {
            Decision::Play(p) => {
                engine.try_play(stone, p).unwrap();
            }
            Decision::Pass => {
                engine.try_pass(stone).unwrap();
            }
        }
        if engine.stage() == weiqi_engine::Stage::Scoring {
            break;
        }
    }
    assert!(engine.goban().stone_count() > 0);
}

/// A full board with only own eyes left: pass.
#[test]
fn passes_when_only_eyes_remain() {
    let goban = Goban::from_rows(&[
        "X.XO.", //
        "XXXOO",
        "X.XO.",
        "XXXOO",
        "XXXO.",
    ]);
    for stone in [Stone::Black, Stone::White] {
        let decision =
            HeuristicAi::seeded(Difficulty::Expert, 0).select_move(&AiRequest::new(&goban, stone));
        assert_eq!(decision, Decision::Pass, "{stone}");
    }
}
