use crate::engine::Move;

// Sixteen pieces with at most sixteen destinations each bounds any position.
const MAX_MOVES: usize = 256;

pub struct MoveList {
    moves: [Move; MAX_MOVES],
    count: usize,
}

impl Default for MoveList {
    fn default() -> Self {
        Self {
            moves: [Move::default(); MAX_MOVES],
            count: 0,
        }
    }
}

impl MoveList {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, mv: Move) {
        if let Some(slot) = self.moves.get_mut(self.count) {
            *slot = mv;
            self.count += 1;
        } else {
            debug_assert!(false, "MoveList overflow! Max moves: {MAX_MOVES}");
        }
    }

    #[must_use]
    pub const fn len(&self) -> usize {
        self.count
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.count == 0
    }

    #[must_use]
    pub fn first(&self) -> Option<&Move> {
        self.as_slice().first()
    }

    #[must_use]
    pub fn as_slice(&self) -> &[Move] {
        self.moves.get(0..self.count).unwrap_or(&[])
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Move> {
        self.as_slice().iter()
    }

    #[must_use]
    pub fn contains(&self, mv: &Move) -> bool {
        self.as_slice().contains(mv)
    }
}

impl<'a> IntoIterator for &'a MoveList {
    type Item = &'a Move;
    type IntoIter = std::slice::Iter<'a, Move>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl IntoIterator for MoveList {
    type Item = Move;
    type IntoIter = std::iter::Take<std::array::IntoIter<Move, MAX_MOVES>>;

    fn into_iter(self) -> Self::IntoIter {
        self.moves.into_iter().take(self.count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logic::board::{Position, Side};

    fn mv(to_col: usize) -> Move {
        Move::new(
            Position::new(0, 0).unwrap(),
            Position::new(0, to_col).unwrap(),
            Side::Defender,
        )
    }

    #[test]
    fn test_push_and_iterate_in_order() {
        let mut list = MoveList::new();
        assert!(list.is_empty());
        for c in 1..4 {
            list.push(mv(c));
        }
        assert_eq!(list.len(), 3);
        assert_eq!(list.first(), Some(&mv(1)));
        assert_eq!(list.as_slice()[2], mv(3));
        assert!(list.contains(&mv(2)));
        let collected: Vec<Move> = list.into_iter().collect();
        assert_eq!(collected, vec![mv(1), mv(2), mv(3)]);
    }
}
