use std::collections::VecDeque;
use std::fmt;

use arrayvec::ArrayVec;
use serde::{Deserialize, Serialize};

use crate::Point;
use crate::error::GoError;
use crate::stone::Stone;

/// Largest supported board side.
pub const MAX_SIZE: u8 = 19;

/// Board sizes a game can be created with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum BoardSize {
    Nine,
    Thirteen,
    #[default]
    Nineteen,
}

impl BoardSize {
    pub fn side(self) -> u8 {
        match self {
            BoardSize::Nine => 9,
            BoardSize::Thirteen => 13,
            BoardSize::Nineteen => 19,
        }
    }
}

impl TryFrom<u8> for BoardSize {
    type Error = GoError;

    fn try_from(side: u8) -> Result<Self, Self::Error> {
        match side {
            9 => Ok(BoardSize::Nine),
            13 => Ok(BoardSize::Thirteen),
            19 => Ok(BoardSize::Nineteen),
            other => Err(GoError::InvalidBoardSize(other)),
        }
    }
}

impl From<BoardSize> for u8 {
    fn from(size: BoardSize) -> u8 {
        size.side()
    }
}

impl fmt::Display for BoardSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let n = self.side();
        write!(f, "{n}x{n}")
    }
}

/// A stone's connected group and the group's liberties.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GroupInfo {
    pub stones: Vec<Point>,
    pub liberties: Vec<Point>,
}

impl GroupInfo {
    pub fn is_empty(&self) -> bool {
        self.stones.is_empty()
    }
}

/// Result of a successful placement.
#[derive(Debug, Clone, PartialEq)]
pub struct Placement {
    pub goban: Goban,
    pub captured: u32,
    pub captured_points: Vec<Point>,
}

/// Square Go board stored as a flat row-major array of `i8` cells
/// (`1` black, `-1` white, `0` empty).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Goban {
    board: Vec<i8>,
    size: u8,
}

impl Goban {
    /// Create an empty board. Panics if `size` is zero or larger than [`MAX_SIZE`].
    pub fn with_size(size: u8) -> Self {
        assert!(
            (1..=MAX_SIZE).contains(&size),
            "board side must be between 1 and {MAX_SIZE}"
        );
        Goban {
            board: vec![0i8; size as usize * size as usize],
            size,
        }
    }

    /// Create a board from rows of text. `X`/`B` are Black, `O`/`W` are White,
    /// anything else is empty. Panics unless the rows form a square.
    pub fn from_rows(rows: &[&str]) -> Self {
        let size = rows.len();
        assert!(
            rows.iter().all(|row| row.chars().count() == size),
            "malformed board layout"
        );
        let mut goban = Goban::with_size(size as u8);
        for (y, row) in rows.iter().enumerate() {
            for (x, c) in row.chars().enumerate() {
                if let Some(stone) = Stone::from_symbol(c) {
                    goban.set_stone((x as u8, y as u8), stone);
                }
            }
        }
        goban
    }

    // -- Accessors --

    pub fn board(&self) -> &[i8] {
        &self.board
    }

    pub fn size(&self) -> u8 {
        self.size
    }

    pub fn stone_at(&self, point: Point) -> Option<Stone> {
        if self.on_board(point) {
            Stone::from_int(self.board[self.idx(point)])
        } else {
            None
        }
    }

    pub fn on_board(&self, (x, y): Point) -> bool {
        x < self.size && y < self.size
    }

    pub fn is_empty(&self) -> bool {
        self.board.iter().all(|&s| s == 0)
    }

    pub fn stone_count(&self) -> usize {
        self.board.iter().filter(|&&s| s != 0).count()
    }

    pub fn count(&self, stone: Stone) -> usize {
        let v = stone.to_int();
        self.board.iter().filter(|&&s| s == v).count()
    }

    /// Every point in row-major order.
    pub fn points(&self) -> impl Iterator<Item = Point> + '_ {
        let n = self.size;
        (0..n).flat_map(move |y| (0..n).map(move |x| (x, y)))
    }

    pub fn empty_points(&self) -> impl Iterator<Item = Point> + '_ {
        self.points().filter(|&p| self.stone_at(p).is_none())
    }

    /// Row-major index of an on-board point.
    #[inline]
    pub fn idx(&self, (x, y): Point) -> usize {
        y as usize * self.size as usize + x as usize
    }

    /// Canonical serialization of the whole position, one symbol per cell.
    pub fn position_key(&self) -> String {
        self.board
            .iter()
            .map(|&v| Stone::from_int(v).map_or('.', Stone::symbol))
            .collect()
    }

    // -- Game actions --

    /// Place a stone, resolve captures, reject suicide. `self` is left untouched.
    pub fn play(&self, point: Point, stone: Stone) -> Result<Placement, GoError> {
        if !self.on_board(point) {
            return Err(GoError::NotOnBoard);
        }
        if self.stone_at(point).is_some() {
            return Err(GoError::Overwrite);
        }

        let mut goban = self.clone();
        goban.set_stone(point, stone);

        // Each opponent neighbor is checked independently; a group reached
        // from two sides is already gone the second time.
        let mut captured_points = Vec::new();
        for n in goban.neighbors(point) {
            if goban.stone_at(n) != Some(stone.opp()) {
                continue;
            }
            let group = goban.group_info(n);
            if group.liberties.is_empty() {
                for &p in &group.stones {
                    goban.clear_stone(p);
                }
                captured_points.extend(group.stones);
            }
        }

        if captured_points.is_empty() && goban.liberties(point).is_empty() {
            return Err(GoError::Suicide);
        }

        Ok(Placement {
            goban,
            captured: captured_points.len() as u32,
            captured_points,
        })
    }

    pub fn is_legal(&self, point: Point, stone: Stone) -> bool {
        self.play(point, stone).is_ok()
    }

    // -- Graph algorithms --

    /// The 4-connected neighbors that are on the board.
    pub fn neighbors(&self, (x, y): Point) -> ArrayVec<Point, 4> {
        let mut result = ArrayVec::new();
        if x > 0 {
            result.push((x - 1, y));
        }
        if x + 1 < self.size {
            result.push((x + 1, y));
        }
        if y > 0 {
            result.push((x, y - 1));
        }
        if y + 1 < self.size {
            result.push((x, y + 1));
        }
        result
    }

    /// The diagonal neighbors that are on the board.
    pub fn diagonals(&self, (x, y): Point) -> ArrayVec<Point, 4> {
        let mut result = ArrayVec::new();
        for (dx, dy) in [(-1i16, -1i16), (1, -1), (-1, 1), (1, 1)] {
            if let Some(p) = self.offset((x, y), dx, dy) {
                result.push(p);
            }
        }
        result
    }

    /// `point + (dx, dy)` if it stays on the board.
    pub fn offset(&self, (x, y): Point, dx: i16, dy: i16) -> Option<Point> {
        let nx = x as i16 + dx;
        let ny = y as i16 + dy;
        let n = self.size as i16;
        if (0..n).contains(&nx) && (0..n).contains(&ny) {
            Some((nx as u8, ny as u8))
        } else {
            None
        }
    }

    /// Breadth-first walk of the group at `point`. Empty or off-board points
    /// yield an empty group with no liberties.
    pub fn group_info(&self, point: Point) -> GroupInfo {
        let stone = match self.stone_at(point) {
            Some(s) => s,
            None => return GroupInfo::default(),
        };

        let mut visited = vec![false; self.board.len()];
        let mut info = GroupInfo::default();
        let mut queue = VecDeque::from([point]);
        visited[self.idx(point)] = true;

        while let Some(p) = queue.pop_front() {
            info.stones.push(p);
            for n in self.neighbors(p) {
                let ni = self.idx(n);
                if visited[ni] {
                    continue;
                }
                match self.stone_at(n) {
                    None => {
                        visited[ni] = true;
                        info.liberties.push(n);
                    }
                    Some(s) if s == stone => {
                        visited[ni] = true;
                        queue.push_back(n);
                    }
                    Some(_) => {}
                }
            }
        }

        info
    }

    pub fn chain(&self, point: Point) -> Vec<Point> {
        self.group_info(point).stones
    }

    pub fn liberties(&self, point: Point) -> Vec<Point> {
        self.group_info(point).liberties
    }

    // -- Internal helpers --

    pub(crate) fn set_stone(&mut self, point: Point, stone: Stone) {
        if self.on_board(point) {
            let i = self.idx(point);
            self.board[i] = stone.to_int();
        }
    }

    fn clear_stone(&mut self, point: Point) {
        if self.on_board(point) {
            let i = self.idx(point);
            self.board[i] = 0;
        }
    }
}

impl fmt::Display for Goban {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let columns: String = b"ABCDEFGHJKLMNOPQRST"
            .iter()
            .take(self.size as usize)
            .map(|&c| format!(" {}", c as char))
            .collect();
        writeln!(f, "   {columns}")?;
        for y in 0..self.size {
            write!(f, "{:>2} ", self.size - y)?;
            for x in 0..self.size {
                let c = self.stone_at((x, y)).map_or('.', Stone::symbol);
                write!(f, " {c}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
