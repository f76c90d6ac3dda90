use serde::{Deserialize, Serialize};
use tablut_core::{Board, Cell, Move, Position, Side};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProtocolError {
    #[error("board must be {expected}x{expected}, got {rows} rows")]
    BadRowCount { expected: usize, rows: usize },

    #[error("board row {row} has {len} cells, expected {expected}")]
    BadRowLength { row: usize, len: usize, expected: usize },

    #[error("board holds more than one king")]
    MultipleKings,

    #[error("invalid square label {0:?}")]
    BadSquare(String),

    #[error("turn label {0:?} does not name a side")]
    NotASide(TurnLabel),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum CellLabel {
    Empty,
    White,
    Black,
    King,
    /// Sent by some servers for the empty centre square.
    Throne,
}

impl From<CellLabel> for Cell {
    fn from(label: CellLabel) -> Self {
        match label {
            CellLabel::Empty | CellLabel::Throne => Self::Empty,
            CellLabel::White => Self::DefenderPiece,
            CellLabel::Black => Self::AttackerPiece,
            CellLabel::King => Self::King,
        }
    }
}

impl From<Cell> for CellLabel {
    fn from(cell: Cell) -> Self {
        match cell {
            Cell::Empty => Self::Empty,
            Cell::DefenderPiece => Self::White,
            Cell::AttackerPiece => Self::Black,
            Cell::King => Self::King,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TurnLabel {
    White,
    Black,
    WhiteWin,
    BlackWin,
    Draw,
}

impl TurnLabel {
    /// The side to move, `None` once the game is over.
    #[must_use]
    pub const fn side(self) -> Option<Side> {
        match self {
            Self::White => Some(Side::Defender),
            Self::Black => Some(Side::Attacker),
            Self::WhiteWin | Self::BlackWin | Self::Draw => None,
        }
    }

    #[must_use]
    pub const fn is_terminal(self) -> bool {
        self.side().is_none()
    }
}

impl From<Side> for TurnLabel {
    fn from(side: Side) -> Self {
        match side {
            Side::Defender => Self::White,
            Side::Attacker => Self::Black,
        }
    }
}

impl std::fmt::Display for TurnLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::White => "WHITE",
            Self::Black => "BLACK",
            Self::WhiteWin => "WHITEWIN",
            Self::BlackWin => "BLACKWIN",
            Self::Draw => "DRAW",
        };
        f.write_str(s)
    }
}

/// Game state pushed by the server before every turn. Rows are listed top to
/// bottom, row 0 being label row 1.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StateMessage {
    pub board: Vec<Vec<CellLabel>>,
    pub turn: TurnLabel,
}

impl StateMessage {
    #[must_use]
    pub fn from_board(board: &Board, turn: TurnLabel) -> Self {
        let size = board.size();
        let board = (0..size)
            .map(|r| {
                (0..size)
                    .map(|c| {
                        Position::new(r, c).map_or(CellLabel::Empty, |pos| board.get(pos).into())
                    })
                    .collect()
            })
            .collect();
        Self { board, turn }
    }

    pub fn to_board(&self) -> Result<Board, ProtocolError> {
        let expected = Board::empty().size();
        if self.board.len() != expected {
            return Err(ProtocolError::BadRowCount {
                expected,
                rows: self.board.len(),
            });
        }

        let mut board = Board::empty();
        let mut kings = 0;
        for (r, row) in self.board.iter().enumerate() {
            if row.len() != expected {
                return Err(ProtocolError::BadRowLength {
                    row: r,
                    len: row.len(),
                    expected,
                });
            }
            for (c, &label) in row.iter().enumerate() {
                let cell = Cell::from(label);
                if cell == Cell::King {
                    kings += 1;
                    if kings > 1 {
                        return Err(ProtocolError::MultipleKings);
                    }
                }
                if let Some(pos) = Position::new(r, c) {
                    board.set(pos, cell);
                }
            }
        }
        Ok(board)
    }
}

/// A move as the server expects it: `{"from": "E3", "to": "F3", "turn": "WHITE"}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Action {
    pub from: String,
    pub to: String,
    pub turn: TurnLabel,
}

impl Action {
    #[must_use]
    pub fn from_move(mv: &Move) -> Self {
        Self {
            from: mv.from.to_string(),
            to: mv.to.to_string(),
            turn: mv.side.into(),
        }
    }

    /// Sent when the side to move has nothing legal to play.
    #[must_use]
    pub fn placeholder(side: Side) -> Self {
        Self {
            from: "z0".to_owned(),
            to: "z0".to_owned(),
            turn: side.into(),
        }
    }

    pub fn to_move(&self) -> Result<Move, ProtocolError> {
        let side = self.turn.side().ok_or(ProtocolError::NotASide(self.turn))?;
        let square = |label: &str| {
            Position::from_label(label).ok_or_else(|| ProtocolError::BadSquare(label.to_owned()))
        };
        Ok(Move::new(square(&self.from)?, square(&self.to)?, side))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_state_message_from_server_json() {
        let mut rows = vec![vec!["EMPTY"; 9]; 9];
        rows[4][4] = "THRONE";
        rows[2][4] = "KING";
        rows[0][3] = "BLACK";
        rows[3][4] = "WHITE";
        let json = serde_json::json!({ "board": rows, "turn": "BLACK" }).to_string();

        let state: StateMessage = serde_json::from_str(&json).unwrap();
        assert_eq!(state.turn, TurnLabel::Black);
        assert_eq!(state.turn.side(), Some(Side::Attacker));

        let board = state.to_board().unwrap();
        let at = |label: &str| board.get(Position::from_label(label).unwrap());
        assert_eq!(at("E3"), Cell::King);
        assert_eq!(at("D1"), Cell::AttackerPiece);
        assert_eq!(at("E4"), Cell::DefenderPiece);
        assert_eq!(at("E5"), Cell::Empty);
    }

    #[test]
    fn test_initial_board_survives_the_wire() {
        let state = StateMessage::from_board(&Board::initial(), TurnLabel::White);
        let json = serde_json::to_string(&state).unwrap();
        assert!(json.contains("\"turn\":\"WHITE\""));
        let back: StateMessage = serde_json::from_str(&json).unwrap();
        assert_eq!(back.to_board().unwrap(), Board::initial());
    }

    #[test]
    fn test_terminal_turn_labels() {
        for (json, terminal) in [
            ("\"WHITEWIN\"", true),
            ("\"BLACKWIN\"", true),
            ("\"DRAW\"", true),
            ("\"WHITE\"", false),
        ] {
            let turn: TurnLabel = serde_json::from_str(json).unwrap();
            assert_eq!(turn.is_terminal(), terminal, "{json}");
        }
        assert!(serde_json::from_str::<TurnLabel>("\"GREEN\"").is_err());
    }

    #[test]
    fn test_malformed_boards() {
        let short = StateMessage {
            board: vec![vec![CellLabel::Empty; 9]; 8],
            turn: TurnLabel::White,
        };
        assert_eq!(
            short.to_board(),
            Err(ProtocolError::BadRowCount { expected: 9, rows: 8 })
        );

        let mut ragged = StateMessage::from_board(&Board::empty(), TurnLabel::White);
        ragged.board[5].pop();
        assert_eq!(
            ragged.to_board(),
            Err(ProtocolError::BadRowLength { row: 5, len: 8, expected: 9 })
        );

        let mut two_kings = StateMessage::from_board(&Board::initial(), TurnLabel::White);
        two_kings.board[0][0] = CellLabel::King;
        assert_eq!(two_kings.to_board(), Err(ProtocolError::MultipleKings));
    }

    #[test]
    fn test_action_conversion() {
        let mv = Move::new(
            Position::new(2, 4).unwrap(),
            Position::new(2, 1).unwrap(),
            Side::Defender,
        );
        let action = Action::from_move(&mv);
        assert_eq!(action.from, "E3");
        assert_eq!(action.to, "B3");
        assert_eq!(
            serde_json::to_value(&action).unwrap(),
            serde_json::json!({ "from": "E3", "to": "B3", "turn": "WHITE" })
        );
        assert_eq!(action.to_move(), Ok(mv));
    }

    #[test]
    fn test_placeholder_action() {
        let action = Action::placeholder(Side::Attacker);
        assert_eq!(
            serde_json::to_value(&action).unwrap(),
            serde_json::json!({ "from": "z0", "to": "z0", "turn": "BLACK" })
        );
        assert_eq!(action.to_move(), Err(ProtocolError::BadSquare("z0".into())));

        let finished = Action {
            turn: TurnLabel::Draw,
            ..action
        };
        assert_eq!(finished.to_move(), Err(ProtocolError::NotASide(TurnLabel::Draw)));
    }
}
