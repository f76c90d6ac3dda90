use serde::{Deserialize, Serialize};
use std::fmt;

pub const BOARD_SIZE: usize = 9;
pub const NUM_SQUARES: usize = BOARD_SIZE * BOARD_SIZE;

const MID: usize = BOARD_SIZE / 2;
#[allow(clippy::cast_possible_truncation)]
const LAST: u8 = (BOARD_SIZE - 1) as u8;

/// Orthogonal steps in generation order: up, down, left, right.
pub const DIRECTIONS: [(i8, i8); 4] = [(-1, 0), (1, 0), (0, -1), (0, 1)];

pub const CORNERS: [Position; 4] = [
    Position { row: 0, col: 0 },
    Position { row: 0, col: LAST },
    Position { row: LAST, col: 0 },
    Position { row: LAST, col: LAST },
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    Attacker,
    Defender,
}

impl Side {
    #[must_use]
    pub const fn opposite(self) -> Self {
        match self {
            Self::Attacker => Self::Defender,
            Self::Defender => Self::Attacker,
        }
    }

    /// The king belongs to the defenders.
    #[must_use]
    pub const fn owns(self, cell: Cell) -> bool {
        matches!(
            (self, cell),
            (Self::Attacker, Cell::AttackerPiece)
                | (Self::Defender, Cell::DefenderPiece | Cell::King)
        )
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Attacker => f.write_str("attacker"),
            Self::Defender => f.write_str("defender"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Cell {
    #[default]
    Empty,
    AttackerPiece,
    DefenderPiece,
    King,
}

impl Cell {
    #[must_use]
    pub const fn is_empty(self) -> bool {
        matches!(self, Self::Empty)
    }

    const fn symbol(self) -> char {
        match self {
            Self::Empty => '.',
            Self::AttackerPiece => 'a',
            Self::DefenderPiece => 'd',
            Self::King => 'K',
        }
    }
}

/// Zero-based (row, column). Rendered externally as a column letter followed by
/// a 1-based row number, so (0, 0) is `A1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Position {
    pub row: u8,
    pub col: u8,
}

impl Position {
    #[must_use]
    pub fn new(row: usize, col: usize) -> Option<Self> {
        if row < BOARD_SIZE && col < BOARD_SIZE {
            Some(Self {
                row: u8::try_from(row).ok()?,
                col: u8::try_from(col).ok()?,
            })
        } else {
            None
        }
    }

    #[must_use]
    pub const fn row(self) -> usize {
        self.row as usize
    }

    #[must_use]
    pub const fn col(self) -> usize {
        self.col as usize
    }

    #[must_use]
    pub const fn index(self) -> usize {
        self.row() * BOARD_SIZE + self.col()
    }

    /// The neighbouring square one step away, if it is on the board.
    #[must_use]
    pub fn offset(self, dr: i8, dc: i8) -> Option<Self> {
        let row = self.row.checked_add_signed(dr)?;
        let col = self.col.checked_add_signed(dc)?;
        Self::new(row.into(), col.into())
    }

    /// Parses labels such as `E5`. The column letter is case-insensitive.
    #[must_use]
    pub fn from_label(label: &str) -> Option<Self> {
        let mut chars = label.trim().chars();
        let letter = chars.next()?.to_ascii_uppercase();
        if !letter.is_ascii_uppercase() {
            return None;
        }
        let col = usize::from(u8::try_from(letter).ok()? - b'A');
        let digits = chars.as_str();
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        let row: usize = digits.parse().ok()?;
        Self::new(row.checked_sub(1)?, col)
    }

    #[must_use]
    pub const fn is_throne(self) -> bool {
        self.row() == MID && self.col() == MID
    }

    /// Camps: the three edge squares centred on each edge midpoint, plus the
    /// square one step inward from that midpoint.
    #[must_use]
    pub const fn is_camp(self) -> bool {
        let (r, c) = (self.row(), self.col());
        (on_edge(r) && c.abs_diff(MID) <= 1)
            || (on_edge(c) && r.abs_diff(MID) <= 1)
            || (one_from_edge(r) && c == MID)
            || (one_from_edge(c) && r == MID)
    }

    #[must_use]
    pub const fn is_corner(self) -> bool {
        (self.row == 0 || self.row == LAST) && (self.col == 0 || self.col == LAST)
    }

    /// Squares no piece may enter or cross.
    #[must_use]
    pub const fn is_forbidden(self) -> bool {
        self.is_throne() || self.is_camp()
    }

    #[must_use]
    pub const fn manhattan(self, other: Self) -> usize {
        self.row().abs_diff(other.row()) + self.col().abs_diff(other.col())
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", char::from(b'A' + self.col), self.row() + 1)
    }
}

const fn on_edge(x: usize) -> bool {
    x == 0 || x == BOARD_SIZE - 1
}

const fn one_from_edge(x: usize) -> bool {
    x == 1 || x == BOARD_SIZE - 2
}

/// Squares walked from a start square (exclusive) to the board edge.
pub struct Ray {
    next: Option<Position>,
    dir: (i8, i8),
}

impl Iterator for Ray {
    type Item = Position;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next?;
        self.next = current.offset(self.dir.0, self.dir.1);
        Some(current)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Board {
    cells: [Cell; NUM_SQUARES],
}

impl Default for Board {
    fn default() -> Self {
        Self::empty()
    }
}

impl Board {
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            cells: [Cell::Empty; NUM_SQUARES],
        }
    }

    /// Opening position: attackers on every camp, defenders in a cross around
    /// the king on the throne.
    #[must_use]
    pub fn initial() -> Self {
        let mut board = Self::empty();
        for pos in Self::positions() {
            if pos.is_camp() {
                board.set(pos, Cell::AttackerPiece);
            } else if pos.is_throne() {
                board.set(pos, Cell::King);
            } else if (pos.row() == MID && pos.col().abs_diff(MID) <= 2)
                || (pos.col() == MID && pos.row().abs_diff(MID) <= 2)
            {
                board.set(pos, Cell::DefenderPiece);
            }
        }
        board
    }

    #[must_use]
    pub const fn size(&self) -> usize {
        BOARD_SIZE
    }

    #[must_use]
    pub fn get(&self, pos: Position) -> Cell {
        self.cells.get(pos.index()).copied().unwrap_or_default()
    }

    pub fn set(&mut self, pos: Position, cell: Cell) {
        if let Some(slot) = self.cells.get_mut(pos.index()) {
            *slot = cell;
        }
    }

    /// Builder form of [`Board::set`].
    #[must_use]
    pub fn with(mut self, pos: Position, cell: Cell) -> Self {
        self.set(pos, cell);
        self
    }

    /// Moves whatever occupies `from` onto `to`, leaving `from` empty.
    pub fn move_piece(&mut self, from: Position, to: Position) -> Cell {
        let piece = self.get(from);
        self.set(from, Cell::Empty);
        self.set(to, piece);
        piece
    }

    /// Every square in row-major order.
    pub fn positions() -> impl Iterator<Item = Position> {
        (0..BOARD_SIZE)
            .flat_map(|r| (0..BOARD_SIZE).filter_map(move |c| Position::new(r, c)))
    }

    /// Squares holding `side`'s pieces, row-major.
    pub fn pieces(&self, side: Side) -> impl Iterator<Item = Position> + '_ {
        Self::positions().filter(move |&pos| side.owns(self.get(pos)))
    }

    #[must_use]
    pub fn count(&self, cell: Cell) -> usize {
        self.cells.iter().filter(|&&c| c == cell).count()
    }

    #[must_use]
    pub fn king_position(&self) -> Option<Position> {
        Self::positions().find(|&pos| self.get(pos) == Cell::King)
    }

    #[must_use]
    pub fn ray(from: Position, dir: (i8, i8)) -> Ray {
        Ray {
            next: from.offset(dir.0, dir.1),
            dir,
        }
    }

    /// Destinations a piece on `from` can slide to along `dir`: empty squares up
    /// to the first occupied or forbidden one.
    pub fn slide(&self, from: Position, dir: (i8, i8)) -> impl Iterator<Item = Position> + '_ {
        Self::ray(from, dir).take_while(move |&pos| !pos.is_forbidden() && self.get(pos).is_empty())
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("  ")?;
        for c in 0..BOARD_SIZE {
            write!(f, "{}", char::from(b'A' + u8::try_from(c).unwrap_or(0)))?;
        }
        writeln!(f)?;
        for r in 0..BOARD_SIZE {
            write!(f, "{} ", r + 1)?;
            for c in 0..BOARD_SIZE {
                let cell = Position::new(r, c).map_or(Cell::Empty, |pos| self.get(pos));
                write!(f, "{}", cell.symbol())?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
