use std::fmt;

use serde::{Deserialize, Serialize};

use crate::Point;
use crate::ai::AiRequest;
use crate::error::GoError;
use crate::goban::{BoardSize, Goban};
use crate::handicap;
use crate::sgf::GameRecord;
use crate::stone::Stone;
use crate::superko::PositionHistory;
use crate::territory::{self, AreaScore};
use crate::turn::{Move, Turn};

pub const DEFAULT_KOMI: f64 = 7.5;
pub const HANDICAP_KOMI: f64 = 0.5;

/// Settings a game is created with.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GameConfig {
    pub size: BoardSize,
    #[serde(default)]
    pub handicap: u8,
    #[serde(default = "default_komi")]
    pub komi: f64,
}

fn default_komi() -> f64 {
    DEFAULT_KOMI
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::new(BoardSize::default())
    }
}

impl GameConfig {
    pub fn new(size: BoardSize) -> Self {
        GameConfig {
            size,
            handicap: 0,
            komi: DEFAULT_KOMI,
        }
    }

    /// Set the handicap; komi drops to [`HANDICAP_KOMI`] for two or more stones.
    pub fn with_handicap(mut self, handicap: u8) -> Self {
        self.handicap = handicap;
        if handicap >= 2 {
            self.komi = HANDICAP_KOMI;
        }
        self
    }

    pub fn with_komi(mut self, komi: f64) -> Self {
        self.komi = komi;
        self
    }

    /// Board with the handicap stones already placed.
    pub fn initial_goban(&self) -> Result<Goban, GoError> {
        let mut goban = Goban::with_size(self.size.side());
        match self.handicap {
            0 => {}
            n => {
                let pts = handicap::handicap_points(self.size, n)
                    .ok_or(GoError::InvalidHandicap(n))?;
                for pt in pts {
                    goban.set_stone(pt, Stone::Black);
                }
            }
        }
        Ok(goban)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    Unstarted,
    BlackToPlay,
    WhiteToPlay,
    /// Both players passed in a row; the game is waiting to be scored.
    Scoring,
    Done,
}

impl Stage {
    pub fn is_play(&self) -> bool {
        matches!(
            self,
            Stage::Unstarted | Stage::BlackToPlay | Stage::WhiteToPlay
        )
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stage::Unstarted => write!(f, "unstarted"),
            Stage::BlackToPlay => write!(f, "black_to_play"),
            Stage::WhiteToPlay => write!(f, "white_to_play"),
            Stage::Scoring => write!(f, "scoring"),
            Stage::Done => write!(f, "done"),
        }
    }
}

/// Prisoners taken by each color.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Captures {
    pub black: u32,
    pub white: u32,
}

impl Captures {
    pub fn get(&self, stone: Stone) -> u32 {
        match stone {
            Stone::Black => self.black,
            Stone::White => self.white,
        }
    }

    fn add(&mut self, stone: Stone, count: u32) {
        match stone {
            Stone::Black => self.black += count,
            Stone::White => self.white += count,
        }
    }
}

/// What a storage collaborator keeps for a game: its settings and move list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavedGame {
    pub config: GameConfig,
    pub moves: Vec<Turn>,
}

/// A game session: the current board, the authoritative move record and the
/// superko history.
#[derive(Debug, Clone)]
pub struct Engine {
    config: GameConfig,
    moves: Vec<Turn>,
    goban: Goban,
    history: PositionHistory,
    captures: Captures,
    result: Option<String>,
}

impl Engine {
    pub fn new(config: GameConfig) -> Result<Self, GoError> {
        let goban = config.initial_goban()?;
        Ok(Engine {
            config,
            moves: Vec::new(),
            history: PositionHistory::with_initial(&goban),
            goban,
            captures: Captures::default(),
            result: None,
        })
    }

    /// Replay a recorded move list from the starting position.
    pub fn with_moves(config: GameConfig, moves: &[Turn]) -> Result<Self, GoError> {
        let mut engine = Self::new(config)?;
        for turn in moves {
            match turn.kind {
                Move::Play => {
                    let point = turn.pos.ok_or(GoError::NotOnBoard)?;
                    engine.try_play(turn.stone, point)?;
                }
                Move::Pass => {
                    engine.try_pass(turn.stone)?;
                }
            }
        }
        Ok(engine)
    }

    pub fn from_saved(saved: &SavedGame) -> Result<Self, GoError> {
        Self::with_moves(saved.config, &saved.moves)
    }

    // -- Accessors --

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn size(&self) -> u8 {
        self.config.size.side()
    }

    pub fn moves(&self) -> &[Turn] {
        &self.moves
    }

    pub fn goban(&self) -> &Goban {
        &self.goban
    }

    pub fn history(&self) -> &PositionHistory {
        &self.history
    }

    pub fn captures(&self) -> &Captures {
        &self.captures
    }

    pub fn stone_at(&self, point: Point) -> Option<Stone> {
        self.goban.stone_at(point)
    }

    pub fn current_turn_stone(&self) -> Stone {
        match self.moves.last() {
            None if self.config.handicap >= 2 => Stone::White,
            None => Stone::Black,
            Some(m) => m.stone.opp(),
        }
    }

    pub fn last_move(&self) -> Option<&Turn> {
        self.moves.last()
    }

    /// Point of the most recent move, if it was a play.
    pub fn last_play_pos(&self) -> Option<Point> {
        self.last_move().and_then(Turn::point)
    }

    pub fn result(&self) -> Option<&str> {
        self.result.as_deref()
    }

    pub fn saved_game(&self) -> SavedGame {
        SavedGame {
            config: self.config,
            moves: self.moves.clone(),
        }
    }

    /// Input for a move selector deciding for the side to move.
    pub fn ai_request(&self) -> AiRequest<'_> {
        AiRequest {
            goban: &self.goban,
            to_play: self.current_turn_stone(),
            last_move: self.last_play_pos(),
            history: Some(&self.history),
        }
    }

    // -- Game actions --

    /// Play a stone. On any error nothing about the session changes.
    pub fn try_play(&mut self, stone: Stone, point: Point) -> Result<Stage, GoError> {
        self.ensure_turn(stone)?;

        let placement = self.goban.play(point, stone)?;
        self.history.check(&placement.goban)?;

        self.history.record(&placement.goban);
        self.captures.add(stone, placement.captured);
        self.goban = placement.goban;
        self.moves
            .push(Turn::play(stone, point).with_captured(placement.captured));
        Ok(self.stage())
    }

    pub fn try_pass(&mut self, stone: Stone) -> Result<Stage, GoError> {
        self.ensure_turn(stone)?;
        self.moves.push(Turn::pass(stone));
        Ok(self.stage())
    }

    pub fn try_resign(&mut self, stone: Stone) -> Stage {
        if self.result.is_none() {
            self.result = Some(format!("{}+R", stone.opp().letter()));
        }
        self.stage()
    }

    /// Take back the last move. The board and superko history are rebuilt by
    /// replaying the remaining moves.
    pub fn undo(&mut self) -> bool {
        let Some((_, rest)) = self.moves.split_last() else {
            return false;
        };
        match Self::with_moves(self.config, rest) {
            Ok(engine) => {
                *self = engine;
                true
            }
            Err(e) => {
                tracing::warn!("undo: replay failed: {e}");
                false
            }
        }
    }

    /// Legal for `stone` right now, superko included.
    pub fn is_legal(&self, point: Point, stone: Stone) -> bool {
        self.goban
            .play(point, stone)
            .is_ok_and(|p| !self.history.contains(&p.goban))
    }

    pub fn stage(&self) -> Stage {
        if self.result.is_some() {
            Stage::Done
        } else if self.moves.is_empty() {
            Stage::Unstarted
        } else if matches!(
            self.moves.as_slice(),
            [.., a, b] if a.is_pass() && b.is_pass()
        ) {
            Stage::Scoring
        } else {
            match self.current_turn_stone() {
                Stone::Black => Stage::BlackToPlay,
                Stone::White => Stage::WhiteToPlay,
            }
        }
    }

    // -- Scoring --

    pub fn score(&self) -> AreaScore {
        territory::score(&self.goban)
    }

    /// Score the board, store the result string and end the game.
    pub fn finish(&mut self) -> AreaScore {
        let score = self.score();
        if self.result.is_none() {
            self.result = Some(score.result(self.config.komi));
        }
        score
    }

    /// Game record for SGF export.
    pub fn record(&self) -> GameRecord {
        let handicap_stones =
            handicap::handicap_points(self.config.size, self.config.handicap).unwrap_or_default();
        GameRecord {
            size: self.size(),
            komi: self.config.komi,
            handicap: self.config.handicap,
            handicap_stones,
            moves: self.moves.clone(),
            result: self.result.clone(),
        }
    }

    fn ensure_turn(&self, stone: Stone) -> Result<(), GoError> {
        if self.result.is_some() || self.stage() == Stage::Scoring {
            return Err(GoError::GameOver);
        }
        if stone != self.current_turn_stone() {
            return Err(GoError::OutOfTurn);
        }
        Ok(())
    }
}
