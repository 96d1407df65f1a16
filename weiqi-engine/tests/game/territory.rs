use weiqi_engine::{Goban, Stage, Stone, territory};

use crate::common::{nine, play_all};

#[test]
fn empty_boards_score_zero() {
    for n in [9, 13, 19] {
        let score = territory::score(&Goban::with_size(n));
        assert_eq!(score.area(Stone::Black), 0);
        assert_eq!(score.area(Stone::White), 0);
    }
}

/// Black walls off the left, White the right; komi decides.
#[test]
fn finished_game_result() {
    let mut engine = nine();
    let mut points = Vec::new();
    for y in 0..9 {
        points.push((3, y));
        points.push((5, y));
    }
    play_all(&mut engine, &points);
    engine.try_pass(Stone::Black).unwrap();
    assert_eq!(engine.try_pass(Stone::White), Ok(Stage::Scoring));

    let score = engine.finish();
    // column 4 touches both walls
    assert_eq!(score.black.total(), 36);
    assert_eq!(score.white.total(), 36);
    assert_eq!(engine.result(), Some("W+7.5"));
    assert_eq!(engine.stage(), Stage::Done);
}

#[test]
fn score_does_not_touch_the_session() {
    let mut engine = nine();
    play_all(&mut engine, &[(2, 2), (6, 6)]);
    let first = engine.score();
    let second = engine.score();
    assert_eq!(first, second);
    assert_eq!(engine.moves().len(), 2);
    assert_eq!(engine.result(), None);
}
