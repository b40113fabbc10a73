use super::board::Cell;

/// Symbol for an empty cell in the canonical state string.
pub const EMPTY_SYMBOL: char = '0';

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum Player {
    First,
    Second,
}

impl Player {
    pub const ALL: [Player; 2] = [Player::First, Player::Second];

    /// Get the other player
    pub fn other(self) -> Player {
        match self {
            Player::First => Player::Second,
            Player::Second => Player::First,
        }
    }

    /// Player index, 0 or 1
    pub fn index(self) -> usize {
        match self {
            Player::First => 0,
            Player::Second => 1,
        }
    }

    pub fn from_index(index: usize) -> Option<Player> {
        match index {
            0 => Some(Player::First),
            1 => Some(Player::Second),
            _ => None,
        }
    }

    /// Symbol used for this player's pieces in the canonical state string
    pub fn symbol(self) -> char {
        match self {
            Player::First => '1',
            Player::Second => '2',
        }
    }

    pub fn from_symbol(symbol: char) -> Option<Player> {
        match symbol {
            '1' => Some(Player::First),
            '2' => Some(Player::Second),
            _ => None,
        }
    }

    /// Convert player to cell type
    pub fn to_cell(self) -> Cell {
        Cell::Occupied(self)
    }

    /// Get player name for display
    pub fn name(self) -> &'static str {
        match self {
            Player::First => "Player 1",
            Player::Second => "Player 2",
        }
    }
}
