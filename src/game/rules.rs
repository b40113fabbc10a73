//! Per-variant rules: geometry, placement style, winning run length and the
//! fixed move order. Everything that differs between line games lives here,
//! so the state machine and the search stay game-agnostic.

use crate::error::{GeometryError, MoveError};

use super::bitboard::BitboardPair;
use super::geometry::Geometry;
use super::lines::LineDetector;
use super::player::{Player, EMPTY_SYMBOL};

const EMPTY: u8 = EMPTY_SYMBOL as u8;

/// Which game a [`Rules`] value describes. Set once at construction and used
/// for labels and per-game settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GameKind {
    ConnectFour,
    TicTacToe,
}

impl GameKind {
    pub fn name(self) -> &'static str {
        match self {
            GameKind::ConnectFour => "Connect 4",
            GameKind::TicTacToe => "Tic-Tac-Toe",
        }
    }
}

/// How a move reference maps to a cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Placement {
    /// Move id is a linear cell index; the cell must be empty.
    Free,
    /// Move id is a column; the piece falls to its lowest empty cell.
    Gravity,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rules {
    kind: GameKind,
    placement: Placement,
    detector: LineDetector,
    move_order: Vec<usize>,
}

impl Rules {
    pub fn new(
        kind: GameKind,
        geometry: Geometry,
        run_length: usize,
        placement: Placement,
    ) -> Result<Self, GeometryError> {
        let detector = LineDetector::new(geometry, run_length)?;
        let move_order = match placement {
            Placement::Gravity => center_out_columns(geometry.cols()),
            Placement::Free => center_out_cells(geometry),
        };
        Ok(Rules {
            kind,
            placement,
            detector,
            move_order,
        })
    }

    /// Standard 7x6 Connect Four.
    pub fn connect_four() -> Self {
        Geometry::new(7, 6)
            .and_then(|g| Self::new(GameKind::ConnectFour, g, 4, Placement::Gravity))
            .unwrap_or_else(|e| unreachable!("connect four geometry is valid: {e}"))
    }

    /// Standard 3x3 Tic-Tac-Toe.
    pub fn tic_tac_toe() -> Self {
        Geometry::new(3, 3)
            .and_then(|g| Self::new(GameKind::TicTacToe, g, 3, Placement::Free))
            .unwrap_or_else(|e| unreachable!("tic-tac-toe geometry is valid: {e}"))
    }

    pub fn for_kind(kind: GameKind) -> Self {
        match kind {
            GameKind::ConnectFour => Self::connect_four(),
            GameKind::TicTacToe => Self::tic_tac_toe(),
        }
    }

    pub fn kind(&self) -> GameKind {
        self.kind
    }

    pub fn placement(&self) -> Placement {
        self.placement
    }

    pub fn geometry(&self) -> Geometry {
        self.detector.geometry()
    }

    pub fn run_length(&self) -> usize {
        self.detector.run_length()
    }

    pub fn detector(&self) -> &LineDetector {
        &self.detector
    }

    /// All move ids, most promising first.
    pub fn move_order(&self) -> &[usize] {
        &self.move_order
    }

    /// Number of distinct move ids (columns or cells).
    pub fn move_limit(&self) -> usize {
        match self.placement {
            Placement::Gravity => self.geometry().cols(),
            Placement::Free => self.geometry().cell_count(),
        }
    }

    /// Resolve a move id against a canonical state to the cell it would fill.
    pub fn target_cell(&self, cells: &[u8], mv: usize) -> Result<usize, MoveError> {
        let geometry = self.geometry();
        if mv >= self.move_limit() {
            return Err(MoveError::OutOfRange {
                mv,
                limit: self.move_limit(),
            });
        }
        match self.placement {
            Placement::Free => {
                if cells.get(mv) == Some(&EMPTY) {
                    Ok(mv)
                } else {
                    let (col, row) = geometry.coords(mv);
                    Err(MoveError::CellOccupied { col, row })
                }
            }
            Placement::Gravity => (0..geometry.rows())
                .rev()
                .filter_map(|row| geometry.index(mv, row))
                .find(|&i| cells.get(i) == Some(&EMPTY))
                .ok_or(MoveError::ColumnFull(mv)),
        }
    }

    /// Legal move ids in move order.
    pub fn legal_moves(&self, cells: &[u8]) -> Vec<usize> {
        self.move_order
            .iter()
            .copied()
            .filter(|&mv| self.target_cell(cells, mv).is_ok())
            .collect()
    }

    pub fn has_legal_move(&self, cells: &[u8]) -> bool {
        self.move_order
            .iter()
            .any(|&mv| self.target_cell(cells, mv).is_ok())
    }

    /// First player, in index order, whose mask contains a complete run.
    pub fn winner(&self, masks: &BitboardPair) -> Option<Player> {
        Player::ALL
            .into_iter()
            .find(|&p| self.detector.has_run(masks.mask(p)))
    }
}

/// Middle column first, then alternating outward (left before right).
fn center_out_columns(cols: usize) -> Vec<usize> {
    let center = (cols - 1) / 2;
    let mut order = vec![center];
    for d in 1..cols {
        if d <= center {
            order.push(center - d);
        }
        if center + d < cols {
            order.push(center + d);
        }
    }
    order
}

/// Cells by distance from the board centre, ties by index.
fn center_out_cells(geometry: Geometry) -> Vec<usize> {
    let mut order: Vec<usize> = (0..geometry.cell_count()).collect();
    order.sort_by_key(|&i| {
        let (col, row) = geometry.coords(i);
        let dx = 2 * col as isize - (geometry.cols() as isize - 1);
        let dy = 2 * row as isize - (geometry.rows() as isize - 1);
        dx * dx + dy * dy
    });
    order
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state(s: &str) -> Vec<u8> {
        s.as_bytes().to_vec()
    }

    #[test]
    fn test_connect_four_move_order() {
        let rules = Rules::connect_four();
        assert_eq!(rules.move_order(), &[3, 2, 4, 1, 5, 0, 6]);
    }

    #[test]
    fn test_even_width_move_order() {
        assert_eq!(center_out_columns(6), vec![2, 1, 3, 0, 4, 5]);
    }

    #[test]
    fn test_tic_tac_toe_move_order() {
        let rules = Rules::tic_tac_toe();
        assert_eq!(rules.move_order(), &[4, 1, 3, 5, 7, 0, 2, 6, 8]);
    }

    #[test]
    fn test_gravity_target_is_lowest_empty() {
        let rules = Rules::connect_four();
        let mut cells = state(&"0".repeat(42));
        assert_eq!(rules.target_cell(&cells, 3), Ok(38));
        cells[38] = b'1';
        assert_eq!(rules.target_cell(&cells, 3), Ok(31));
    }

    #[test]
    fn test_gravity_full_column() {
        let rules = Rules::connect_four();
        let mut cells = state(&"0".repeat(42));
        for row in 0..6 {
            cells[row * 7 + 6] = b'2';
        }
        assert_eq!(rules.target_cell(&cells, 6), Err(MoveError::ColumnFull(6)));
        assert_eq!(
            rules.target_cell(&cells, 7),
            Err(MoveError::OutOfRange { mv: 7, limit: 7 })
        );
        assert_eq!(rules.legal_moves(&cells), vec![3, 2, 4, 1, 5, 0]);
    }

    #[test]
    fn test_free_target_must_be_empty() {
        let rules = Rules::tic_tac_toe();
        let cells = state("100020000");
        assert_eq!(rules.target_cell(&cells, 1), Ok(1));
        assert_eq!(
            rules.target_cell(&cells, 4),
            Err(MoveError::CellOccupied { col: 1, row: 1 })
        );
        assert_eq!(rules.legal_moves(&cells).len(), 7);
    }

    #[test]
    fn test_winner_checks_first_player_first() {
        let rules = Rules::tic_tac_toe();
        let masks = BitboardPair::from_state("111222000");
        assert_eq!(rules.winner(&masks), Some(Player::First));
        let masks = BitboardPair::from_state("112221000");
        assert_eq!(rules.winner(&masks), None);
        let masks = BitboardPair::from_state("120120102");
        assert_eq!(rules.winner(&masks), Some(Player::First));
    }

    #[test]
    fn test_custom_geometry() {
        let geometry = Geometry::new(5, 4).unwrap();
        let rules = Rules::new(GameKind::ConnectFour, geometry, 4, Placement::Gravity).unwrap();
        assert_eq!(rules.move_order(), &[2, 1, 3, 0, 4]);
        assert_eq!(rules.move_limit(), 5);
    }
}
