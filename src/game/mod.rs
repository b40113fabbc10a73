//! Core game logic: geometry and board, bitboard codec, line detection,
//! per-variant rules and the turn state machine.

pub mod bitboard;
mod board;
mod geometry;
pub mod lines;
mod player;
mod rules;
mod state;

pub use bitboard::BitboardPair;
pub use board::{validate_state, Board, Cell};
pub use geometry::Geometry;
pub use lines::{Direction, LineDetector, LinePattern};
pub use player::{Player, EMPTY_SYMBOL};
pub use rules::{GameKind, Placement, Rules};
pub use state::{GameOutcome, GameState, GameStatus};
