use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GoError {
    OutOfTurn,
    Overwrite,
    Suicide,
    NotOnBoard,
    /// The resulting position already occurred earlier in the game.
    Superko,
    GameOver,
    InvalidHandicap(u8),
    InvalidBoardSize(u8),
}

impl GoError {
    /// Occupied point, off-board coordinate or suicide.
    pub fn is_illegal_move(&self) -> bool {
        matches!(
            self,
            GoError::Overwrite | GoError::Suicide | GoError::NotOnBoard
        )
    }
}

impl fmt::Display for GoError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GoError::OutOfTurn => write!(f, "out of turn"),
            GoError::Overwrite => write!(f, "point is already occupied"),
            GoError::Suicide => write!(f, "suicide"),
            GoError::NotOnBoard => write!(f, "not on board"),
            GoError::Superko => write!(f, "superko: move repeats a prior global board state"),
            GoError::GameOver => write!(f, "game is over"),
            GoError::InvalidHandicap(n) => write!(f, "invalid handicap: {n}"),
            GoError::InvalidBoardSize(n) => write!(f, "unsupported board size: {n}"),
        }
    }
}

impl std::error::Error for GoError {}
