use weiqi_engine::{GoError, Goban, Stage, Stone};

use crate::common::{nine, play_all, stones};

/// Three plain moves leave exactly three stones and no captures.
#[test]
fn three_moves_no_captures() {
    let mut engine = nine();
    play_all(&mut engine, &[(4, 4), (4, 5), (5, 5)]);

    assert_eq!(
        stones(&engine),
        vec![
            ((4, 4), Stone::Black),
            ((4, 5), Stone::White),
            ((5, 5), Stone::Black),
        ]
    );
    assert_eq!(engine.captures().get(Stone::Black), 0);
    assert_eq!(engine.captures().get(Stone::White), 0);
    assert!(engine.moves().iter().all(|t| t.captured == 0));
    assert_eq!(engine.stage(), Stage::WhiteToPlay);
}

/// White in the corner: its own point is occupied, its last liberty captures.
#[test]
fn corner_capture_and_overwrite() {
    let mut engine = nine();
    engine.try_play(Stone::Black, (1, 0)).unwrap();
    engine.try_play(Stone::White, (0, 0)).unwrap();

    let before = engine.goban().clone();
    assert_eq!(engine.try_play(Stone::Black, (0, 0)), Err(GoError::Overwrite));
    assert_eq!(engine.goban(), &before);
    assert_eq!(engine.moves().len(), 2);

    engine.try_play(Stone::Black, (0, 1)).unwrap();
    assert_eq!(engine.stone_at((0, 0)), None);
    assert_eq!(engine.captures().get(Stone::Black), 1);
    assert_eq!(engine.last_move().map(|t| t.captured), Some(1));
}

#[test]
fn wrong_color_is_out_of_turn() {
    let mut engine = nine();
    assert_eq!(engine.try_play(Stone::White, (3, 3)), Err(GoError::OutOfTurn));
    assert!(engine.moves().is_empty());
}

/// Capturing at the last liberty removes the whole group.
#[test]
fn atari_then_capture_removes_group() {
    let goban = Goban::from_rows(&[
        ".XXX.", //
        "XOOOX",
        ".X...",
        ".....",
        ".....",
    ]);
    assert_eq!(goban.liberties((1, 1)).len(), 2);
    let atari = goban.play((2, 2), Stone::Black).unwrap();
    assert_eq!(atari.captured, 0);
    assert_eq!(atari.goban.liberties((1, 1)), vec![(3, 2)]);

    let size = atari.goban.group_info((1, 1)).stones.len();
    let capture = atari.goban.play((3, 2), Stone::Black).unwrap();
    assert_eq!(capture.captured as usize, size);
    assert!((1..=3).all(|x| capture.goban.stone_at((x, 1)).is_none()));
}

/// A stone with no liberties of its own is legal when it captures first.
#[test]
fn snapback_capture_is_legal() {
    let goban = Goban::from_rows(&[
        ".OX..", //
        "OX...",
        "X....",
        ".....",
        ".....",
    ]);
    let placement = goban.play((0, 0), Stone::Black).unwrap();
    assert_eq!(placement.captured, 2);
    assert_eq!(placement.goban.stone_at((1, 0)), None);
    assert_eq!(placement.goban.stone_at((0, 1)), None);
}

#[test]
fn suicide_leaves_board_untouched() {
    let goban = Goban::from_rows(&[".X...", "X....", ".....", ".....", "....."]);
    let before = goban.clone();
    assert_eq!(goban.play((0, 0), Stone::White).err(), Some(GoError::Suicide));
    assert_eq!(goban, before);
}

#[test]
fn two_passes_end_play() {
    let mut engine = nine();
    engine.try_play(Stone::Black, (2, 2)).unwrap();
    engine.try_pass(Stone::White).unwrap();
    assert_eq!(engine.try_pass(Stone::Black), Ok(Stage::Scoring));
    assert_eq!(engine.try_play(Stone::White, (6, 6)), Err(GoError::GameOver));
}
