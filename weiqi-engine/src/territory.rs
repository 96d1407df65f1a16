use serde::Serialize;

use crate::goban::Goban;
use crate::stone::Stone;

/// Per-color area: stones on the board plus empty points it surrounds alone.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct PlayerArea {
    pub stones: u32,
    pub territory: u32,
}

impl PlayerArea {
    pub fn total(&self) -> u32 {
        self.stones + self.territory
    }
}

/// Area score for both players and the ownership map it was derived from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AreaScore {
    pub black: PlayerArea,
    pub white: PlayerArea,
    /// Same layout as [`Goban::board`]. `None` is neutral; stones are always `None`.
    pub ownership: Vec<Option<Stone>>,
}

impl AreaScore {
    pub fn area(&self, stone: Stone) -> u32 {
        match stone {
            Stone::Black => self.black.total(),
            Stone::White => self.white.total(),
        }
    }

    pub fn black_total(&self) -> f64 {
        self.black.total() as f64
    }

    pub fn white_total(&self, komi: f64) -> f64 {
        self.white.total() as f64 + komi
    }

    pub fn result(&self, komi: f64) -> String {
        format_result(self.black_total(), self.white_total(komi))
    }
}

/// Chinese area scoring.
///
/// Every maximal empty region is flood-filled; a region bordered by stones of
/// exactly one color belongs to that color, anything else is neutral.
pub fn score(goban: &Goban) -> AreaScore {
    let size = goban.board().len();
    let mut ownership = vec![None; size];
    let mut visited = vec![false; size];

    let mut black = PlayerArea {
        stones: goban.count(Stone::Black) as u32,
        territory: 0,
    };
    let mut white = PlayerArea {
        stones: goban.count(Stone::White) as u32,
        territory: 0,
    };

    for start in goban.points() {
        let si = goban.idx(start);
        if visited[si] || goban.stone_at(start).is_some() {
            continue;
        }

        let mut region = Vec::new();
        let mut border_colors: u8 = 0; // bit 0 = Black seen, bit 1 = White seen
        let mut stack = vec![start];
        visited[si] = true;

        while let Some(p) = stack.pop() {
            region.push(p);
            for n in goban.neighbors(p) {
                match goban.stone_at(n) {
                    Some(Stone::Black) => border_colors |= 1,
                    Some(Stone::White) => border_colors |= 2,
                    None => {
                        let ni = goban.idx(n);
                        if !visited[ni] {
                            visited[ni] = true;
                            stack.push(n);
                        }
                    }
                }
            }
        }

        let owner = match border_colors {
            1 => Some(Stone::Black),
            2 => Some(Stone::White),
            _ => None,
        };

        match owner {
            Some(Stone::Black) => black.territory += region.len() as u32,
            Some(Stone::White) => white.territory += region.len() as u32,
            None => {}
        }
        for p in region {
            ownership[goban.idx(p)] = owner;
        }
    }

    AreaScore {
        black,
        white,
        ownership,
    }
}

/// Format a result string: `"B+{diff}"`, `"W+{diff}"` or `"Draw"`.
pub fn format_result(black_score: f64, white_score: f64) -> String {
    let diff = black_score - white_score;
    if diff > 0.0 {
        format!("B+{diff}")
    } else if diff < 0.0 {
        format!("W+{}", -diff)
    } else {
        "Draw".to_string()
    }
}
