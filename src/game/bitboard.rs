//! Conversion between the canonical state string and one 64-bit occupancy
//! mask per player.
//!
//! Bit `i` of a player's mask is set iff that player's symbol sits at index
//! `i` of the string. Strings longer than 64 cells are not representable;
//! characters past index 63 are ignored.

use super::geometry::Geometry;
use super::player::{Player, EMPTY_SYMBOL};

/// Set bit `i` wherever `state[i] == symbol`. Works on partial strings.
pub fn encode(state: &str, symbol: char) -> u64 {
    let mut buf = [0u8; 4];
    match symbol.encode_utf8(&mut buf).as_bytes() {
        [byte] => encode_bytes(state.as_bytes(), *byte),
        // Multi-byte symbols never appear in a canonical string.
        _ => 0,
    }
}

/// Byte-level form of [`encode`], used by the search on its working copies.
pub fn encode_bytes(cells: &[u8], symbol: u8) -> u64 {
    cells
        .iter()
        .take(64)
        .enumerate()
        .filter(|&(_, &c)| c == symbol)
        .fold(0u64, |mask, (i, _)| mask | (1u64 << i))
}

/// Occupancy masks for both players. Always derived from a full board,
/// never updated incrementally.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BitboardPair {
    masks: [u64; 2],
}

impl BitboardPair {
    pub fn from_state(state: &str) -> Self {
        Self::from_bytes(state.as_bytes())
    }

    pub fn from_bytes(cells: &[u8]) -> Self {
        let mut masks = [0u64; 2];
        for (i, &c) in cells.iter().take(64).enumerate() {
            if let Some(player) = Player::from_symbol(c as char) {
                masks[player.index()] |= 1u64 << i;
            }
        }
        BitboardPair { masks }
    }

    pub fn mask(&self, player: Player) -> u64 {
        self.masks[player.index()]
    }

    pub fn occupied(&self) -> u64 {
        self.masks[0] | self.masks[1]
    }

    /// Render back into a canonical string for the given geometry.
    pub fn decode(&self, geometry: Geometry) -> String {
        (0..geometry.cell_count())
            .map(|i| {
                let bit = 1u64 << i;
                if self.masks[0] & bit != 0 {
                    Player::First.symbol()
                } else if self.masks[1] & bit != 0 {
                    Player::Second.symbol()
                } else {
                    EMPTY_SYMBOL
                }
            })
            .collect()
    }
}
