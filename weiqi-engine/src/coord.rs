//! Human-readable coordinates: column letters `A..T` without `I`, row numbers
//! counted from the bottom edge (`A1` is the lower-left corner).

use crate::Point;

const COLUMNS: &[u8] = b"ABCDEFGHJKLMNOPQRST";

/// Format a point for a board of side `size`, e.g. `(3, 15)` on 19x19 is `D4`.
pub fn format_point((x, y): Point, size: u8) -> String {
    match COLUMNS.get(x as usize) {
        Some(&c) if x < size && y < size => format!("{}{}", c as char, size - y),
        _ => format!("{x},{y}"),
    }
}

/// Parse `D4`-style coordinates. Returns `None` for anything off the board.
pub fn parse_point(s: &str, size: u8) -> Option<Point> {
    let s = s.trim();
    let mut chars = s.chars();
    let col = chars.next()?.to_ascii_uppercase();
    let x = COLUMNS.iter().position(|&c| c as char == col)?;
    let row: u8 = chars.as_str().parse().ok()?;
    if x >= size as usize || row == 0 || row > size {
        return None;
    }
    Some((x as u8, size - row))
}
