#![allow(dead_code)]

use weiqi_engine::{BoardSize, Engine, GameConfig, Point, Stone};

pub fn nine() -> Engine {
    Engine::new(GameConfig::new(BoardSize::Nine)).unwrap()
}

/// Play alternating moves starting with whoever is to move.
pub fn play_all(engine: &mut Engine, points: &[Point]) {
    for &p in points {
        let stone = engine.current_turn_stone();
        engine
            .try_play(stone, p)
            .unwrap_or_else(|e| panic!("{stone} at {p:?}: {e}"));
    }
}

/// Build the ko shape on a 9×9 board.
///
/// Target position (top-left corner, rest empty):
/// ```text
///      c0  c1  c2  c3
/// r0:   .   B   W   .
/// r1:   B   W   .   W
/// r2:   .   B   W   .
/// ```
///
/// After this, B(2,1) captures W(1,1) and White may not retake at once.
pub fn ko_setup() -> Engine {
    let mut engine = nine();
    play_all(
        &mut engine,
        &[
            (1, 0), // B
            (2, 0), // W
            (0, 1), // B
            (1, 1), // W
            (1, 2), // B
            (3, 1), // W
            (8, 8), // B, throwaway
            (2, 2), // W
        ],
    );
    engine
}

pub fn stones(engine: &Engine) -> Vec<(Point, Stone)> {
    engine
        .goban()
        .points()
        .filter_map(|p| engine.stone_at(p).map(|s| (p, s)))
        .collect()
}
