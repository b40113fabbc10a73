use tracing::{debug, info};

use crate::error::{MoveError, StateStringError};

use super::bitboard::BitboardPair;
use super::board::Board;
use super::player::Player;
use super::rules::{GameKind, Placement, Rules};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameOutcome {
    Winner(Player),
    Draw,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameStatus {
    NotStarted,
    InProgress,
    Over(GameOutcome),
}

/// Turn-based state machine for one game: board, side to move and outcome.
///
/// `NotStarted -> InProgress -> Over(..)`. A finished game stays finished
/// until [`GameState::stop_game`] / [`GameState::set_up_board`] or a state
/// import replaces it.
#[derive(Debug, Clone)]
pub struct GameState {
    rules: Rules,
    board: Board,
    current_player: Player,
    status: GameStatus,
    masks: std::cell::Cell<Option<BitboardPair>>,
}

impl GameState {
    /// Create a game that has not been set up yet
    pub fn new(rules: Rules) -> Self {
        GameState {
            board: Board::new(rules.geometry()),
            rules,
            current_player: Player::First,
            status: GameStatus::NotStarted,
            masks: std::cell::Cell::new(None),
        }
    }

    /// Create a game that is already set up and in progress
    pub fn initial(kind: GameKind) -> Self {
        let mut state = Self::new(Rules::for_kind(kind));
        state.set_up_board();
        state
    }

    pub fn kind(&self) -> GameKind {
        self.rules.kind()
    }

    pub fn rules(&self) -> &Rules {
        &self.rules
    }

    /// Get reference to board
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Get current player
    pub fn current_player(&self) -> Player {
        self.current_player
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    /// Get game outcome if game is over
    pub fn outcome(&self) -> Option<GameOutcome> {
        match self.status {
            GameStatus::Over(outcome) => Some(outcome),
            _ => None,
        }
    }

    /// Check if game is over
    pub fn is_terminal(&self) -> bool {
        self.outcome().is_some()
    }

    pub fn winner(&self) -> Option<Player> {
        match self.outcome() {
            Some(GameOutcome::Winner(p)) => Some(p),
            _ => None,
        }
    }

    /// Clear the board and start play with player 0 to move
    pub fn set_up_board(&mut self) {
        self.board.clear();
        self.masks.set(None);
        self.current_player = Player::First;
        self.status = GameStatus::InProgress;
        info!(game = self.kind().name(), "board set up");
    }

    /// Remove every piece and drop cached bitboards. The game must be set up
    /// again before moves are accepted.
    pub fn stop_game(&mut self) {
        self.board.clear();
        self.masks.set(None);
        self.current_player = Player::First;
        self.status = GameStatus::NotStarted;
        info!(game = self.kind().name(), "game stopped");
    }

    /// Get list of legal move ids, most promising first
    pub fn legal_actions(&self) -> Vec<usize> {
        if self.status != GameStatus::InProgress {
            return Vec::new();
        }
        self.rules.legal_moves(self.state_string().as_bytes())
    }

    /// Play the current player's piece. The move id is a column for gravity
    /// games and a cell index otherwise. Returns the linear index of the
    /// filled cell. On error nothing changes.
    pub fn attempt_move(&mut self, mv: usize) -> Result<usize, MoveError> {
        match self.status {
            GameStatus::NotStarted => return Err(MoveError::NotStarted),
            GameStatus::Over(_) => return Err(MoveError::GameOver),
            GameStatus::InProgress => {}
        }

        let player = self.current_player;
        let geometry = self.rules.geometry();
        let cell = match self.rules.placement() {
            Placement::Gravity => {
                let row = self.board.drop_piece(mv, player)?;
                row * geometry.cols() + mv
            }
            Placement::Free => {
                if mv >= geometry.cell_count() {
                    return Err(MoveError::OutOfRange {
                        mv,
                        limit: geometry.cell_count(),
                    });
                }
                let (col, row) = geometry.coords(mv);
                if !self.board.place(col, row, player) {
                    return Err(MoveError::CellOccupied { col, row });
                }
                mv
            }
        };
        self.masks.set(None);
        debug!(game = self.kind().name(), player = player.name(), mv, cell, "move applied");

        if let Some(winner) = self.check_for_winner() {
            self.status = GameStatus::Over(GameOutcome::Winner(winner));
            info!(game = self.kind().name(), winner = winner.name(), "game won");
        } else if self.check_for_draw() {
            self.status = GameStatus::Over(GameOutcome::Draw);
            info!(game = self.kind().name(), "game drawn");
        } else {
            self.current_player = player.other();
        }
        Ok(cell)
    }

    /// Move by cell reference. Gravity games only look at the column.
    pub fn attempt_move_at(&mut self, col: usize, row: usize) -> Result<usize, MoveError> {
        let geometry = self.rules.geometry();
        match self.rules.placement() {
            Placement::Gravity => self.attempt_move(col),
            Placement::Free => match geometry.index(col, row) {
                Some(i) => self.attempt_move(i),
                None => Err(MoveError::OutOfRange {
                    mv: row.saturating_mul(geometry.cols()).saturating_add(col),
                    limit: geometry.cell_count(),
                }),
            },
        }
    }

    /// Apply a move and return new state (immutable)
    pub fn apply_move(&self, mv: usize) -> Result<GameState, MoveError> {
        let mut next = self.clone();
        next.attempt_move(mv)?;
        Ok(next)
    }

    /// Occupancy masks of the live board, recomputed after any mutation.
    pub fn bitboards(&self) -> BitboardPair {
        if let Some(masks) = self.masks.get() {
            return masks;
        }
        let masks = BitboardPair::from_state(&self.board.state_string());
        self.masks.set(Some(masks));
        masks
    }

    /// Player with a complete line, checking player 0 first.
    pub fn check_for_winner(&self) -> Option<Player> {
        self.rules.winner(&self.bitboards())
    }

    /// True iff nobody has won and no legal move remains.
    pub fn check_for_draw(&self) -> bool {
        if self.check_for_winner().is_some() {
            return false;
        }
        match self.rules.placement() {
            Placement::Free => self.bitboards().occupied() == self.rules.geometry().full_mask(),
            Placement::Gravity => !self
                .rules
                .has_legal_move(self.board.state_string().as_bytes()),
        }
    }

    pub fn state_string(&self) -> String {
        self.board.state_string()
    }

    /// Import a canonical state string. The side to move is derived from the
    /// piece counts and the outcome is re-evaluated. On error nothing changes.
    pub fn set_state_string(&mut self, state: &str) -> Result<(), StateStringError> {
        self.board.set_state_string(state)?;
        self.masks.set(None);

        self.current_player = if self.board.count(Player::First) > self.board.count(Player::Second) {
            Player::Second
        } else {
            Player::First
        };
        self.status = if let Some(winner) = self.check_for_winner() {
            GameStatus::Over(GameOutcome::Winner(winner))
        } else if self.check_for_draw() {
            GameStatus::Over(GameOutcome::Draw)
        } else {
            GameStatus::InProgress
        };
        debug!(game = self.kind().name(), state, status = ?self.status, "state imported");
        Ok(())
    }
}
