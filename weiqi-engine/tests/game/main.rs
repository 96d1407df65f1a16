mod common;

mod ai;
mod ko;
mod moves;
mod territory;
mod undo;
