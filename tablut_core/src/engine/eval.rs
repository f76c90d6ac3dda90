use crate::engine::config::EngineConfig;
use crate::engine::Evaluator;
use crate::logic::board::{Board, Cell, Position, Side, BOARD_SIZE, CORNERS, DIRECTIONS};
use std::sync::Arc;

/// Raw heuristic features, each computed once per evaluation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EvalTerms {
    /// Defender pieces (king excluded) minus attacker pieces.
    pub material: i32,
    /// Largest possible corner distance minus the king's nearest corner distance.
    pub escape_proximity: i32,
    /// Directions in which nothing stands between the king and the edge.
    pub open_lines: i32,
    /// Empty squares in front of the king, counted along the same lines.
    pub king_mobility: i32,
    /// Attackers orthogonally next to the king.
    pub encirclement: i32,
}

impl EvalTerms {
    #[must_use]
    pub fn compute(board: &Board, king: Position) -> Self {
        let defenders = board.count(Cell::DefenderPiece);
        let attackers = board.count(Cell::AttackerPiece);

        let max_distance = 2 * (BOARD_SIZE - 1);
        let nearest_corner = CORNERS
            .iter()
            .map(|&corner| king.manhattan(corner))
            .min()
            .unwrap_or(max_distance);

        let mut open_lines = 0;
        let mut king_mobility = 0;
        let mut encirclement = 0;
        for (dr, dc) in DIRECTIONS {
            let reachable = king_line(board, king, (dr, dc)).count();
            king_mobility += reachable;
            if reachable == Board::ray(king, (dr, dc)).count() {
                open_lines += 1;
            }
            if king
                .offset(dr, dc)
                .is_some_and(|adj| board.get(adj) == Cell::AttackerPiece)
            {
                encirclement += 1;
            }
        }

        Self {
            material: to_score(defenders) - to_score(attackers),
            escape_proximity: to_score(max_distance.saturating_sub(nearest_corner)),
            open_lines: to_score(open_lines),
            king_mobility: to_score(king_mobility),
            encirclement: to_score(encirclement),
        }
    }
}

/// Squares from the king towards the edge, up to the first piece or the
/// throne. Empty camps do not close a line here.
fn king_line(board: &Board, king: Position, dir: (i8, i8)) -> impl Iterator<Item = Position> + '_ {
    Board::ray(king, dir).take_while(move |&pos| !pos.is_throne() && board.get(pos).is_empty())
}

fn to_score(n: usize) -> i32 {
    i32::try_from(n).unwrap_or(i32::MAX)
}

pub struct HeuristicEvaluator {
    config: Arc<EngineConfig>,
}

impl HeuristicEvaluator {
    #[must_use]
    pub const fn new(config: Arc<EngineConfig>) -> Self {
        Self { config }
    }
}

impl Evaluator for HeuristicEvaluator {
    fn evaluate(&self, board: &Board, perspective: Side) -> i32 {
        let win = self.config.win_score;
        let decided = |winner: Side| if winner == perspective { win } else { -win };

        // Decided games first: the heuristic terms are meaningless without a king.
        let Some(king) = board.king_position() else {
            return decided(Side::Attacker);
        };
        if king.is_corner() {
            return decided(Side::Defender);
        }

        let c = &self.config;
        let t = EvalTerms::compute(board, king);

        // Positive favours the defenders.
        let king_terms = c.escape_proximity * t.escape_proximity
            + c.open_line * t.open_lines
            + c.king_mobility * t.king_mobility
            - c.encirclement * t.encirclement;

        match perspective {
            Side::Defender => c.material_defender * t.material + king_terms,
            Side::Attacker => -c.material_attacker * t.material - king_terms,
        }
    }
}
