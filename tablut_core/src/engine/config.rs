use crate::engine::SearchLimit;
use crate::logic::eval_constants::{
    DEFAULT_DEPTH, DEFAULT_SAFETY_MARGIN_MS, DEFAULT_TIME_LIMIT_MS, WEIGHT_ENCIRCLEMENT,
    WEIGHT_ESCAPE_PROXIMITY, WEIGHT_KING_MOBILITY, WEIGHT_MATERIAL_ATTACKER,
    WEIGHT_MATERIAL_DEFENDER, WEIGHT_OPEN_LINE, WIN_SCORE,
};
use serde::{Deserialize, Serialize};
use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    // Evaluation Parameters
    pub material_defender: i32,
    pub material_attacker: i32,
    pub escape_proximity: i32,
    pub open_line: i32,
    pub king_mobility: i32,
    pub encirclement: i32,
    pub win_score: i32,

    // Search Parameters
    pub depth: u8,
    pub time_limit_ms: u64,
    pub safety_margin_ms: u64, // Subtracted from the time limit to get the deadline
    pub alpha_beta: bool,      // false: plain minimax over the same tree
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            material_defender: WEIGHT_MATERIAL_DEFENDER,
            material_attacker: WEIGHT_MATERIAL_ATTACKER,
            escape_proximity: WEIGHT_ESCAPE_PROXIMITY,
            open_line: WEIGHT_OPEN_LINE,
            king_mobility: WEIGHT_KING_MOBILITY,
            encirclement: WEIGHT_ENCIRCLEMENT,
            win_score: WIN_SCORE,

            depth: DEFAULT_DEPTH,
            time_limit_ms: DEFAULT_TIME_LIMIT_MS,
            safety_margin_ms: DEFAULT_SAFETY_MARGIN_MS,
            alpha_beta: true,
        }
    }
}

impl EngineConfig {
    /// Missing keys keep their defaults.
    pub fn load_from_json(json_str: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json_str)
    }

    #[must_use]
    pub const fn search_limit(&self) -> SearchLimit {
        SearchLimit::depth(self.depth).with_time_limit(Duration::from_millis(self.time_limit_ms))
    }

    #[must_use]
    pub const fn safety_margin(&self) -> Duration {
        Duration::from_millis(self.safety_margin_ms)
    }
}
