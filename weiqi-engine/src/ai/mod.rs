//! Move selection.
//!
//! [`MoveSelector`] is the one contract every opponent satisfies: the local
//! [`HeuristicAi`] and the [`DelegateSelector`] that asks an external service
//! and falls back to the local engine. Selectors only decide; committing the
//! move and the superko check stay with the caller.

pub mod delegate;
pub mod difficulty;
pub mod heuristic;

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::Point;
use crate::coord;
use crate::goban::Goban;
use crate::stone::Stone;
use crate::superko::PositionHistory;

pub use delegate::{DelegateError, DelegateReply, DelegateSelector, MoveDelegate};
pub use difficulty::{Difficulty, Profile};
pub use heuristic::HeuristicAi;

/// Everything a selector may look at for one decision.
#[derive(Debug, Clone, Copy)]
pub struct AiRequest<'a> {
    pub goban: &'a Goban,
    pub to_play: Stone,
    /// The opponent's most recent play, if the last move was not a pass.
    pub last_move: Option<Point>,
    /// When present, candidates that recreate a recorded position are skipped.
    pub history: Option<&'a PositionHistory>,
}

impl<'a> AiRequest<'a> {
    pub fn new(goban: &'a Goban, to_play: Stone) -> Self {
        AiRequest {
            goban,
            to_play,
            last_move: None,
            history: None,
        }
    }

    pub fn with_last_move(mut self, last_move: Option<Point>) -> Self {
        self.last_move = last_move;
        self
    }

    pub fn with_history(mut self, history: &'a PositionHistory) -> Self {
        self.history = Some(history);
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Decision {
    Play(Point),
    Pass,
}

impl Decision {
    pub fn point(self) -> Option<Point> {
        match self {
            Decision::Play(p) => Some(p),
            Decision::Pass => None,
        }
    }

    pub fn display(self, size: u8) -> String {
        match self {
            Decision::Play(p) => coord::format_point(p, size),
            Decision::Pass => "pass".to_string(),
        }
    }
}

impl fmt::Display for Decision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Decision::Play((x, y)) => write!(f, "play {x},{y}"),
            Decision::Pass => write!(f, "pass"),
        }
    }
}

pub trait MoveSelector {
    fn select_move(&mut self, request: &AiRequest<'_>) -> Decision;
}

impl<S: MoveSelector + ?Sized> MoveSelector for Box<S> {
    fn select_move(&mut self, request: &AiRequest<'_>) -> Decision {
        (**self).select_move(request)
    }
}
