//! SGF (FF[4]) export of a finished or in-progress game.
//!
//! Only a single main line is written: root properties, then one node per move.

use serde::{Deserialize, Serialize};

use crate::Point;
use crate::turn::Turn;

/// Everything an SGF file needs, detached from the live session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameRecord {
    pub size: u8,
    pub komi: f64,
    pub handicap: u8,
    pub handicap_stones: Vec<Point>,
    pub moves: Vec<Turn>,
    pub result: Option<String>,
}

pub fn export(record: &GameRecord) -> String {
    let mut buf = String::from("(;");

    write_number("FF", 4, &mut buf);
    write_number("GM", 1, &mut buf);
    write_app(&mut buf);
    write_number("SZ", record.size, &mut buf);
    write_real("KM", record.komi, &mut buf);
    if record.handicap >= 2 {
        write_number("HA", record.handicap, &mut buf);
    }
    if !record.handicap_stones.is_empty() {
        write_point_list("AB", &record.handicap_stones, &mut buf);
    }
    if let Some(result) = &record.result {
        write_simple_text("RE", result, &mut buf);
    }

    for turn in &record.moves {
        buf.push(';');
        write_move(turn.stone.letter(), turn.point(), &mut buf);
    }

    buf.push(')');
    buf
}

// -- Helpers --

fn coord_to_letter(c: u8) -> char {
    (b'a' + c) as char
}

fn push_point(buf: &mut String, (x, y): Point) {
    buf.push(coord_to_letter(x));
    buf.push(coord_to_letter(y));
}

fn push_escaped(buf: &mut String, s: &str) {
    for ch in s.chars() {
        if matches!(ch, ']' | '\\') {
            buf.push('\\');
        }
        buf.push(ch);
    }
}

fn write_app(buf: &mut String) {
    buf.push_str("AP[");
    push_escaped(buf, env!("CARGO_PKG_NAME"));
    buf.push(':');
    push_escaped(buf, env!("CARGO_PKG_VERSION"));
    buf.push(']');
}

fn write_number(ident: &str, n: impl std::fmt::Display, buf: &mut String) {
    buf.push_str(ident);
    buf.push('[');
    buf.push_str(&n.to_string());
    buf.push(']');
}

fn write_real(ident: &str, n: f64, buf: &mut String) {
    buf.push_str(ident);
    buf.push('[');
    // 6.0 -> "6", 6.5 -> "6.5"
    if n.fract() == 0.0 {
        buf.push_str(&(n as i64).to_string());
    } else {
        buf.push_str(&n.to_string());
    }
    buf.push(']');
}

fn write_simple_text(ident: &str, s: &str, buf: &mut String) {
    buf.push_str(ident);
    buf.push('[');
    push_escaped(buf, s);
    buf.push(']');
}

/// A pass is an empty value.
fn write_move(ident: &str, point: Option<Point>, buf: &mut String) {
    buf.push_str(ident);
    buf.push('[');
    if let Some(p) = point {
        push_point(buf, p);
    }
    buf.push(']');
}

fn write_point_list(ident: &str, points: &[Point], buf: &mut String) {
    buf.push_str(ident);
    for &p in points {
        buf.push('[');
        push_point(buf, p);
        buf.push(']');
    }
}
