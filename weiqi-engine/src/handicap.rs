use crate::Point;
use crate::goban::BoardSize;

/// Maximum number of handicap stones for a board size.
pub fn max_handicap(size: BoardSize) -> u8 {
    match size {
        // Corners and tengen only
        BoardSize::Nine => 5,
        BoardSize::Thirteen | BoardSize::Nineteen => 9,
    }
}

/// Hoshi points for `count` handicap stones, in placement order.
///
/// Returns `None` when `count` is below 2 or above [`max_handicap`].
pub fn handicap_points(size: BoardSize, count: u8) -> Option<Vec<Point>> {
    if count < 2 || count > max_handicap(size) {
        return None;
    }

    let n = size.side();
    let off = if n >= 13 { 3 } else { 2 };
    let far = n - 1 - off;
    let mid = n / 2;

    let tl = (off, off);
    let tr = (far, off);
    let bl = (off, far);
    let br = (far, far);
    let center = (mid, mid);
    let left = (off, mid);
    let right = (far, mid);
    let top = (mid, off);
    let bottom = (mid, far);

    let mut pts = match count {
        2 | 3 => vec![tr, bl],
        4 | 5 => vec![tl, tr, bl, br],
        6 | 7 => vec![tl, tr, left, right, bl, br],
        _ => vec![tl, tr, left, right, bl, br, top, bottom],
    };
    match count {
        3 => pts.push(br),
        5 | 7 | 9 => pts.push(center),
        _ => {}
    }

    Some(pts)
}
