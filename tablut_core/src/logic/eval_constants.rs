// Material, per unit of (defenders - attackers). Attackers value material more:
// defenders can afford to trade pieces while the king runs.
pub const WEIGHT_MATERIAL_DEFENDER: i32 = 4;
pub const WEIGHT_MATERIAL_ATTACKER: i32 = 6;

// King safety and escape
pub const WEIGHT_ESCAPE_PROXIMITY: i32 = 20;
pub const WEIGHT_OPEN_LINE: i32 = 60;
pub const WEIGHT_KING_MOBILITY: i32 = 2;
pub const WEIGHT_ENCIRCLEMENT: i32 = 40;

/// Magnitude returned for a decided game (king captured or king on a corner).
pub const WIN_SCORE: i32 = 99_999;

// Search defaults
pub const DEFAULT_DEPTH: u8 = 4;
pub const DEFAULT_TIME_LIMIT_MS: u64 = 60_000;
pub const DEFAULT_SAFETY_MARGIN_MS: u64 = 1_000;
