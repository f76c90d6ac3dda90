use crate::logic::board::{Board, Position, Side};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

pub mod config;
pub mod eval;
pub mod move_list;
pub mod search;

/// A move names only its endpoints; captures follow from applying it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Move {
    pub from: Position,
    pub to: Position,
    pub side: Side,
}

impl Move {
    #[must_use]
    pub const fn new(from: Position, to: Position, side: Side) -> Self {
        Self { from, to, side }
    }
}

impl Default for Move {
    fn default() -> Self {
        let origin = Position { row: 0, col: 0 };
        Self::new(origin, origin, Side::Defender)
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}-{}", self.side, self.from, self.to)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchLimit {
    pub depth: u8,
    /// Wall-clock budget for the whole call. `None` searches to full depth.
    pub time_limit: Option<Duration>,
}

impl SearchLimit {
    #[must_use]
    pub const fn depth(depth: u8) -> Self {
        Self {
            depth,
            time_limit: None,
        }
    }

    #[must_use]
    pub const fn with_time_limit(mut self, time_limit: Duration) -> Self {
        self.time_limit = Some(time_limit);
        self
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchStats {
    pub depth: u8,
    pub nodes: u64,
    pub time_ms: u64,
    /// Set when the deadline cut at least one subtree short.
    pub timed_out: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchOutcome {
    /// `None` when the side to move has no legal move at the root, or the
    /// deadline had already passed when the search started.
    pub best_move: Option<Move>,
    pub score: i32,
    pub stats: SearchStats,
}

pub trait Evaluator {
    /// Signed score; higher favours `perspective`.
    fn evaluate(&self, board: &Board, perspective: Side) -> i32;
}

pub trait Searcher {
    fn search(&mut self, board: &Board, side: Side, limit: SearchLimit) -> SearchOutcome;
}
