pub mod engine;
pub mod logic;

pub use engine::config::EngineConfig;
pub use engine::search::AlphaBetaEngine;
pub use engine::{Move, SearchLimit, SearchOutcome, SearchStats, Searcher};
pub use logic::board::{Board, Cell, Position, Side};
