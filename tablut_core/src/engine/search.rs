use crate::engine::config::EngineConfig;
use crate::engine::eval::HeuristicEvaluator;
use crate::engine::{Evaluator, Move, SearchLimit, SearchOutcome, SearchStats, Searcher};
use crate::logic::board::{Board, Side};
use crate::logic::generator::MoveGenerator;
use crate::logic::rules::{apply_move, winner};
use std::sync::Arc;
use std::time::Instant;

/// Depth-bounded minimax with alpha-beta pruning and a wall-clock deadline.
///
/// Every node scores leaves from the root side's point of view: that side
/// maximises, the opponent minimises. Each child is a fresh board produced by
/// [`apply_move`]; nothing is shared between sibling subtrees.
pub struct AlphaBetaEngine {
    config: Arc<EngineConfig>,
    evaluator: HeuristicEvaluator,
    generator: MoveGenerator,
    perspective: Side,
    deadline: Option<Instant>,
    nodes_searched: u64,
    timed_out: bool,
}

impl AlphaBetaEngine {
    #[must_use]
    pub fn new(config: Arc<EngineConfig>) -> Self {
        Self {
            evaluator: HeuristicEvaluator::new(config.clone()),
            config,
            generator: MoveGenerator::new(),
            perspective: Side::Defender,
            deadline: None,
            nodes_searched: 0,
            timed_out: false,
        }
    }

    fn check_time(&mut self) -> bool {
        match self.deadline {
            Some(deadline) if Instant::now() >= deadline => {
                self.timed_out = true;
                true
            }
            _ => false,
        }
    }

    fn evaluate(&self, board: &Board) -> i32 {
        self.evaluator.evaluate(board, self.perspective)
    }

    fn alpha_beta(
        &mut self,
        board: &Board,
        depth: u8,
        mut alpha: i32,
        mut beta: i32,
        maximizing: bool,
    ) -> (i32, Option<Move>) {
        self.nodes_searched += 1;

        // Out of time: this subtree collapses to a static evaluation.
        if self.check_time() {
            return (self.evaluate(board), None);
        }

        if depth == 0 || winner(board).is_some() {
            return (self.evaluate(board), None);
        }

        let turn = if maximizing {
            self.perspective
        } else {
            self.perspective.opposite()
        };
        let moves = self.generator.generate_moves(board, turn);

        // No legal moves: scored like any other leaf.
        if moves.is_empty() {
            return (self.evaluate(board), None);
        }

        let mut best_score = if maximizing { i32::MIN } else { i32::MAX };
        let mut best_move = None;

        for mv in moves {
            let child = apply_move(board, &mv);
            let (score, _) = self.alpha_beta(&child, depth - 1, alpha, beta, !maximizing);

            // Strict comparison: ties keep the earliest generated move.
            if maximizing {
                if score > best_score {
                    best_score = score;
                    best_move = Some(mv);
                }
                alpha = alpha.max(score);
            } else {
                if score < best_score {
                    best_score = score;
                    best_move = Some(mv);
                }
                beta = beta.min(score);
            }

            if self.config.alpha_beta && beta <= alpha {
                break;
            }
        }

        (best_score, best_move)
    }
}

impl Searcher for AlphaBetaEngine {
    fn search(&mut self, board: &Board, side: Side, limit: SearchLimit) -> SearchOutcome {
        let start = Instant::now();
        self.perspective = side;
        self.nodes_searched = 0;
        self.timed_out = false;
        self.deadline = limit
            .time_limit
            .map(|budget| start + budget.saturating_sub(self.config.safety_margin()));

        let (score, best_move) = self.alpha_beta(board, limit.depth, i32::MIN, i32::MAX, true);

        let stats = SearchStats {
            depth: limit.depth,
            nodes: self.nodes_searched,
            time_ms: u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX),
            timed_out: self.timed_out,
        };

        match best_move {
            Some(mv) => log::debug!(
                "{side} search: {mv} score {score} depth {} nodes {} in {}ms{}",
                stats.depth,
                stats.nodes,
                stats.time_ms,
                if stats.timed_out { " (deadline hit)" } else { "" }
            ),
            None => log::debug!("{side} search: no move, static score {score}"),
        }

        SearchOutcome {
            best_move,
            score,
            stats,
        }
    }
}
