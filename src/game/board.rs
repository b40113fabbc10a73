use std::fmt;

use crate::error::{MoveError, StateStringError};

use super::geometry::Geometry;
use super::player::{Player, EMPTY_SYMBOL};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Cell {
    Empty,
    Occupied(Player),
}

impl Cell {
    pub fn symbol(self) -> char {
        match self {
            Cell::Empty => EMPTY_SYMBOL,
            Cell::Occupied(p) => p.symbol(),
        }
    }

    fn from_symbol(symbol: char) -> Option<Cell> {
        if symbol == EMPTY_SYMBOL {
            Some(Cell::Empty)
        } else {
            Player::from_symbol(symbol).map(Cell::Occupied)
        }
    }
}

/// Grid of cells addressed by (col, row). Row 0 is the top.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    geometry: Geometry,
    cells: Vec<Cell>,
}

/// Check a canonical state string against a geometry without building a board.
pub fn validate_state(geometry: Geometry, state: &str) -> Result<(), StateStringError> {
    let found = state.chars().count();
    if found != geometry.cell_count() {
        return Err(StateStringError::WrongLength {
            expected: geometry.cell_count(),
            found,
        });
    }
    if let Some((index, symbol)) = state
        .chars()
        .enumerate()
        .find(|&(_, c)| Cell::from_symbol(c).is_none())
    {
        return Err(StateStringError::InvalidSymbol { index, symbol });
    }
    Ok(())
}

impl Board {
    /// Create a new empty board
    pub fn new(geometry: Geometry) -> Self {
        Board {
            geometry,
            cells: vec![Cell::Empty; geometry.cell_count()],
        }
    }

    pub fn geometry(&self) -> Geometry {
        self.geometry
    }

    /// Cell at (col, row), or `None` outside the grid
    pub fn cell_at(&self, col: usize, row: usize) -> Option<Cell> {
        self.geometry.index(col, row).map(|i| self.cells[i])
    }

    /// Place a piece on an empty cell. Returns false, without mutating, if the
    /// cell is occupied or off the board.
    pub fn place(&mut self, col: usize, row: usize, player: Player) -> bool {
        match self.geometry.index(col, row) {
            Some(i) if self.cells[i] == Cell::Empty => {
                self.cells[i] = player.to_cell();
                true
            }
            _ => false,
        }
    }

    /// Lowest empty row of a column, if any
    pub fn lowest_empty_row(&self, col: usize) -> Option<usize> {
        if col >= self.geometry.cols() {
            return None;
        }
        (0..self.geometry.rows())
            .rev()
            .find(|&row| self.cell_at(col, row) == Some(Cell::Empty))
    }

    /// Check if a column has no empty cell left, including holes under
    /// floating pieces from an imported position
    pub fn is_column_full(&self, col: usize) -> bool {
        self.lowest_empty_row(col).is_none()
    }

    /// Drop a piece in a column, returns the row where it landed
    pub fn drop_piece(&mut self, col: usize, player: Player) -> Result<usize, MoveError> {
        if col >= self.geometry.cols() {
            return Err(MoveError::OutOfRange {
                mv: col,
                limit: self.geometry.cols(),
            });
        }
        let row = self
            .lowest_empty_row(col)
            .ok_or(MoveError::ColumnFull(col))?;
        self.place(col, row, player);
        Ok(row)
    }

    /// Check if the board is completely full
    pub fn is_full(&self) -> bool {
        self.cells.iter().all(|&c| c != Cell::Empty)
    }

    pub fn count(&self, player: Player) -> usize {
        self.cells
            .iter()
            .filter(|&&c| c == Cell::Occupied(player))
            .count()
    }

    /// Remove every piece. Idempotent.
    pub fn clear(&mut self) {
        self.cells.fill(Cell::Empty);
    }

    /// Canonical row-major encoding, one symbol per cell
    pub fn state_string(&self) -> String {
        self.cells.iter().map(|c| c.symbol()).collect()
    }

    /// Replace the contents from a canonical string. On error the board is
    /// left untouched.
    pub fn set_state_string(&mut self, state: &str) -> Result<(), StateStringError> {
        validate_state(self.geometry, state)?;
        self.clear();
        for (i, symbol) in state.chars().enumerate() {
            if let Some(player) = Player::from_symbol(symbol) {
                let (col, row) = self.geometry.coords(i);
                self.place(col, row, player);
            }
        }
        Ok(())
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..self.geometry.rows() {
            for col in 0..self.geometry.cols() {
                let c = match self.cell_at(col, row) {
                    Some(Cell::Occupied(Player::First)) => 'X',
                    Some(Cell::Occupied(Player::Second)) => 'O',
                    _ => '.',
                };
                write!(f, "{c}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn connect_four_board() -> Board {
        Board::new(Geometry::new(7, 6).unwrap())
    }

    #[test]
    fn test_new_board_is_empty() {
        let board = connect_four_board();
        for row in 0..6 {
            for col in 0..7 {
                assert_eq!(board.cell_at(col, row), Some(Cell::Empty));
            }
        }
        assert_eq!(board.state_string(), "0".repeat(42));
    }

    #[test]
    fn test_cell_at_out_of_bounds() {
        let board = connect_four_board();
        assert_eq!(board.cell_at(7, 0), None);
        assert_eq!(board.cell_at(0, 6), None);
    }

    #[test]
    fn test_place_rejects_occupied() {
        let mut board = connect_four_board();
        assert!(board.place(2, 2, Player::First));
        assert!(!board.place(2, 2, Player::Second));
        assert!(!board.place(9, 9, Player::Second));
        assert_eq!(board.cell_at(2, 2), Some(Cell::Occupied(Player::First)));
    }

    #[test]
    fn test_drop_piece() {
        let mut board = connect_four_board();

        // Drop first piece in column 3
        let row = board.drop_piece(3, Player::First).unwrap();
        assert_eq!(row, 5); // Should land at bottom
        assert_eq!(board.cell_at(3, 5), Some(Cell::Occupied(Player::First)));

        // Drop second piece in same column
        let row = board.drop_piece(3, Player::Second).unwrap();
        assert_eq!(row, 4); // Should land on top of first piece
        assert_eq!(board.cell_at(3, 4), Some(Cell::Occupied(Player::Second)));
    }

    #[test]
    fn test_column_full() {
        let mut board = connect_four_board();

        // Fill column 0
        for _ in 0..6 {
            board.drop_piece(0, Player::First).unwrap();
        }

        assert!(board.is_column_full(0));
        assert_eq!(
            board.drop_piece(0, Player::Second),
            Err(MoveError::ColumnFull(0))
        );
    }

    #[test]
    fn test_invalid_column() {
        let mut board = connect_four_board();
        assert_eq!(
            board.drop_piece(7, Player::First),
            Err(MoveError::OutOfRange { mv: 7, limit: 7 })
        );
        assert!(board.is_column_full(7));
    }

    #[test]
    fn test_full_board() {
        let mut board = connect_four_board();
        for col in 0..7 {
            for _ in 0..6 {
                board.drop_piece(col, Player::First).unwrap();
            }
        }
        assert!(board.is_full());
    }

    #[test]
    fn test_clear_is_idempotent() {
        let mut board = connect_four_board();
        board.drop_piece(1, Player::Second).unwrap();
        board.clear();
        let once = board.clone();
        board.clear();
        assert_eq!(board, once);
        assert_eq!(board.count(Player::Second), 0);
    }

    #[test]
    fn test_state_string_roundtrip() {
        let mut board = Board::new(Geometry::new(3, 3).unwrap());
        board.set_state_string("120000021").unwrap();
        assert_eq!(board.cell_at(0, 0), Some(Cell::Occupied(Player::First)));
        assert_eq!(board.cell_at(1, 0), Some(Cell::Occupied(Player::Second)));
        assert_eq!(board.cell_at(2, 2), Some(Cell::Occupied(Player::First)));
        assert_eq!(board.state_string(), "120000021");
    }

    #[test]
    fn test_malformed_import_leaves_board_unchanged() {
        let mut board = Board::new(Geometry::new(3, 3).unwrap());
        board.set_state_string("100020000").unwrap();
        let before = board.clone();

        assert_eq!(
            board.set_state_string("1000"),
            Err(StateStringError::WrongLength {
                expected: 9,
                found: 4
            })
        );
        assert_eq!(
            board.set_state_string("000000x00"),
            Err(StateStringError::InvalidSymbol {
                index: 6,
                symbol: 'x'
            })
        );
        assert_eq!(board, before);
    }

    #[test]
    fn test_display() {
        let mut board = Board::new(Geometry::new(3, 2).unwrap());
        board.drop_piece(0, Player::First).unwrap();
        board.drop_piece(2, Player::Second).unwrap();
        assert_eq!(board.to_string(), "...\nX.O\n");
    }
}
