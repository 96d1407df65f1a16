use std::collections::HashSet;

use crate::error::GoError;
use crate::goban::Goban;

/// Positions seen so far in a game, keyed by [`Goban::position_key`].
///
/// Simple positional superko: whose turn it is does not take part in the
/// comparison. The history is owned by the game session; the move executor
/// never looks at it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PositionHistory {
    seen: HashSet<String>,
}

impl PositionHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// History seeded with the starting position (empty board or handicap stones).
    pub fn with_initial(goban: &Goban) -> Self {
        let mut history = Self::new();
        history.record(goban);
        history
    }

    pub fn contains(&self, goban: &Goban) -> bool {
        self.seen.contains(&goban.position_key())
    }

    /// `Err(GoError::Superko)` if `goban` recreates an earlier position.
    pub fn check(&self, goban: &Goban) -> Result<(), GoError> {
        if self.contains(goban) {
            tracing::debug!("superko: position already seen");
            Err(GoError::Superko)
        } else {
            Ok(())
        }
    }

    pub fn record(&mut self, goban: &Goban) {
        self.seen.insert(goban.position_key());
    }

    pub fn clear(&mut self) {
        self.seen.clear();
    }

    pub fn len(&self) -> usize {
        self.seen.len()
    }

    pub fn is_empty(&self) -> bool {
        self.seen.is_empty()
    }
}
