use crate::engine::Move;
use crate::logic::board::{Board, Cell, Position, Side, CORNERS, DIRECTIONS};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveError {
    OutOfBounds,
    NoPieceAtSource,
    NotYourPiece,
    NotStraightLine,
    BlockedPath,
    ForbiddenSquare,
    TargetOccupied,
}

/// Squares emptied by one applied move, at most one per direction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Captures {
    squares: [Option<Position>; 4],
}

impl Captures {
    #[must_use]
    pub fn len(&self) -> usize {
        self.squares.iter().flatten().count()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn iter(&self) -> impl Iterator<Item = Position> + '_ {
        self.squares.iter().flatten().copied()
    }
}

/// Returns a new board with `mv` played and sandwich captures resolved; `board`
/// is left untouched.
#[must_use]
pub fn apply_move(board: &Board, mv: &Move) -> Board {
    apply_move_with_captures(board, mv).0
}

#[must_use]
pub fn apply_move_with_captures(board: &Board, mv: &Move) -> (Board, Captures) {
    let mut next = board.clone();
    next.move_piece(mv.from, mv.to);
    let captures = resolve_captures(&mut next, mv.to, mv.side);
    (next, captures)
}

/// An enemy piece next to `to` is removed when the square beyond it, in the
/// same line, holds one of `side`'s pieces. Throne and camps never act as the
/// far side of a sandwich.
fn resolve_captures(board: &mut Board, to: Position, side: Side) -> Captures {
    let mut captures = Captures::default();
    for (slot, (dr, dc)) in captures.squares.iter_mut().zip(DIRECTIONS) {
        let Some(target) = to.offset(dr, dc) else {
            continue;
        };
        if !side.opposite().owns(board.get(target)) {
            continue;
        }
        let Some(anchor) = target.offset(dr, dc) else {
            continue;
        };
        if side.owns(board.get(anchor)) {
            board.set(target, Cell::Empty);
            *slot = Some(target);
        }
    }
    captures
}

#[must_use]
pub fn is_king_captured(board: &Board) -> bool {
    board.king_position().is_none()
}

#[must_use]
pub fn is_king_escaped(board: &Board) -> bool {
    CORNERS.iter().any(|&corner| board.get(corner) == Cell::King)
}

/// The side that has won, if the game is decided on this board.
#[must_use]
pub fn winner(board: &Board) -> Option<Side> {
    match board.king_position() {
        None => Some(Side::Attacker),
        Some(king) if king.is_corner() => Some(Side::Defender),
        Some(_) => None,
    }
}

/// Checks a move that did not come from the generator against the same
/// sliding policy.
pub fn validate_move(board: &Board, mv: &Move) -> Result<(), MoveError> {
    let (from, to) = (mv.from, mv.to);
    if Position::new(from.row(), from.col()).is_none() || Position::new(to.row(), to.col()).is_none()
    {
        return Err(MoveError::OutOfBounds);
    }

    let piece = board.get(from);
    if piece.is_empty() {
        return Err(MoveError::NoPieceAtSource);
    }
    if !mv.side.owns(piece) {
        return Err(MoveError::NotYourPiece);
    }
    if from == to || (from.row != to.row && from.col != to.col) {
        return Err(MoveError::NotStraightLine);
    }
    if to.is_forbidden() {
        return Err(MoveError::ForbiddenSquare);
    }
    if !board.get(to).is_empty() {
        return Err(MoveError::TargetOccupied);
    }

    let dir = (step(from.row, to.row), step(from.col, to.col));
    for square in Board::ray(from, dir).take_while(|&sq| sq != to) {
        if square.is_forbidden() {
            return Err(MoveError::ForbiddenSquare);
        }
        if !board.get(square).is_empty() {
            return Err(MoveError::BlockedPath);
        }
    }
    Ok(())
}

const fn step(from: u8, to: u8) -> i8 {
    if to > from {
        1
    } else if to < from {
        -1
    } else {
        0
    }
}
