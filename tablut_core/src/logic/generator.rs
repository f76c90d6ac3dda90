use crate::engine::move_list::MoveList;
use crate::engine::Move;
use crate::logic::board::{Board, Side, DIRECTIONS};

#[derive(Debug, Default, Clone, Copy)]
pub struct MoveGenerator;

impl MoveGenerator {
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// All moves for `side`: origins row-major, then up/down/left/right, then
    /// increasing distance. Pieces slide over empty squares and stop before the
    /// first occupied square, throne or camp.
    #[must_use]
    pub fn generate_moves(&self, board: &Board, side: Side) -> MoveList {
        let mut moves = MoveList::new();
        for from in board.pieces(side) {
            for dir in DIRECTIONS {
                for to in board.slide(from, dir) {
                    moves.push(Move::new(from, to, side));
                }
            }
        }
        moves
    }

    /// Returns `true` as soon as one move is found.
    #[must_use]
    pub fn has_legal_moves(&self, board: &Board, side: Side) -> bool {
        board
            .pieces(side)
            .any(|from| DIRECTIONS.iter().any(|&dir| board.slide(from, dir).next().is_some()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logic::board::{Cell, Position};

    fn pos(row: usize, col: usize) -> Position {
        Position::new(row, col).unwrap()
    }

    #[test]
    fn test_king_blocked_by_attacker_above() {
        let board = Board::empty()
            .with(pos(4, 4), Cell::King)
            .with(pos(3, 4), Cell::AttackerPiece);
        let moves = MoveGenerator::new().generate_moves(&board, Side::Defender);

        assert!(moves.contains(&Move::new(pos(4, 4), pos(5, 4), Side::Defender)));
        for row in 0..4 {
            assert!(
                !moves.contains(&Move::new(pos(4, 4), pos(row, 4), Side::Defender)),
                "king must not pass the attacker to row {row}"
            );
        }
        // (7, 4) is a camp, so the king stops at (6, 4).
        assert!(moves.contains(&Move::new(pos(4, 4), pos(6, 4), Side::Defender)));
        assert!(!moves.contains(&Move::new(pos(4, 4), pos(7, 4), Side::Defender)));
    }

    #[test]
    fn test_deterministic_order() {
        let board = Board::empty()
            .with(pos(2, 2), Cell::DefenderPiece)
            .with(pos(6, 6), Cell::King);
        let moves: Vec<Move> = MoveGenerator::new()
            .generate_moves(&board, Side::Defender)
            .into_iter()
            .collect();

        // First origin in row-major order, first direction up, nearest first.
        assert_eq!(moves[0], Move::new(pos(2, 2), pos(1, 2), Side::Defender));
        assert_eq!(moves[1], Move::new(pos(2, 2), pos(0, 2), Side::Defender));
        // Then down from the same origin.
        assert_eq!(moves[2], Move::new(pos(2, 2), pos(3, 2), Side::Defender));
        assert!(moves.iter().skip_while(|m| m.from == pos(2, 2)).all(|m| m.from == pos(6, 6)));
    }

    #[test]
    fn test_ownership() {
        let board = Board::empty()
            .with(pos(2, 2), Cell::AttackerPiece)
            .with(pos(6, 6), Cell::King)
            .with(pos(6, 2), Cell::DefenderPiece);
        let gen = MoveGenerator::new();
        assert!(gen
            .generate_moves(&board, Side::Attacker)
            .iter()
            .all(|m| m.from == pos(2, 2) && m.side == Side::Attacker));
        assert!(gen
            .generate_moves(&board, Side::Defender)
            .iter()
            .all(|m| m.from == pos(6, 6) || m.from == pos(6, 2)));
    }

    #[test]
    fn test_no_pieces_means_no_moves() {
        let board = Board::empty().with(pos(6, 6), Cell::King);
        let gen = MoveGenerator::new();
        assert!(gen.generate_moves(&board, Side::Attacker).is_empty());
        assert!(!gen.has_legal_moves(&board, Side::Attacker));
        assert!(gen.has_legal_moves(&board, Side::Defender));
    }

    #[test]
    fn test_boxed_in_piece_has_no_moves() {
        let board = Board::empty()
            .with(pos(0, 0), Cell::DefenderPiece)
            .with(pos(0, 1), Cell::AttackerPiece)
            .with(pos(1, 0), Cell::AttackerPiece);
        let gen = MoveGenerator::new();
        assert!(gen.generate_moves(&board, Side::Defender).is_empty());
        assert!(!gen.has_legal_moves(&board, Side::Defender));
    }

    #[test]
    fn test_never_enters_occupied_square() {
        let board = Board::empty()
            .with(pos(0, 0), Cell::DefenderPiece)
            .with(pos(0, 2), Cell::DefenderPiece)
            .with(pos(0, 1), Cell::AttackerPiece)
            .with(pos(6, 6), Cell::DefenderPiece);
        let gen = MoveGenerator::new();
        let mv = Move::new(pos(6, 6), pos(6, 7), Side::Defender);
        let after = crate::logic::rules::apply_move(&board, &mv);

        assert_eq!(after.get(pos(0, 1)), Cell::AttackerPiece);
        assert!(gen
            .generate_moves(&after, Side::Defender)
            .iter()
            .all(|m| m.to != pos(0, 1)));
    }
}
