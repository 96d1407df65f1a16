pub mod ai;
pub mod coord;
pub mod engine;
pub mod error;
pub mod goban;
pub mod handicap;
pub mod sgf;
pub mod stone;
pub mod superko;
pub mod territory;
pub mod turn;

pub type Point = (u8, u8);

pub use ai::{AiRequest, Decision, Difficulty, HeuristicAi, MoveSelector};
pub use engine::{Captures, Engine, GameConfig, SavedGame, Stage};
pub use error::GoError;
pub use goban::{BoardSize, Goban, GroupInfo, Placement};
pub use sgf::GameRecord;
pub use stone::Stone;
pub use superko::PositionHistory;
pub use territory::AreaScore;
pub use turn::{Move, Turn};
