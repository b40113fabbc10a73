//! Negamax with alpha-beta pruning over the canonical state string.
//!
//! The searcher never sees a live [`GameState`]: it takes a string snapshot,
//! works on private copies of it and hands back a move id that the caller
//! plays through the ordinary move path.

use tracing::debug;

use crate::error::SearchError;
use crate::game::bitboard::{encode_bytes, BitboardPair};
use crate::game::{validate_state, GameKind, GameState, Player, Rules};

use super::agent::Agent;
use super::evaluator::{EvalWeights, Heuristic, LineWindowHeuristic};

/// Score of a win found at the root. Wins `n` plies away score `WIN_SCORE - n`.
pub const WIN_SCORE: i32 = 1_000_000;

/// Deepest search a configuration may request.
pub const MAX_SEARCH_DEPTH: u32 = 12;

/// Horizon evaluations are clamped into this range so they never compete
/// with a proven win or loss.
const EVAL_BOUND: i32 = WIN_SCORE / 2;

/// Per-game search depths, fixed for the duration of a game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    pub connect_four_depth: u32,
    pub tic_tac_toe_depth: u32,
    /// Alpha-beta cutoffs. Disabling gives the same move with more nodes.
    pub pruning: bool,
}

impl Default for SearchConfig {
    fn default() -> Self {
        SearchConfig {
            connect_four_depth: 7,
            tic_tac_toe_depth: 9,
            pruning: true,
        }
    }
}

impl SearchConfig {
    pub fn depth_for(&self, kind: GameKind) -> u32 {
        match kind {
            GameKind::ConnectFour => self.connect_four_depth,
            GameKind::TicTacToe => self.tic_tac_toe_depth,
        }
    }
}

/// Result of one search, kept by the session for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchReport {
    pub best_move: usize,
    /// Score of `best_move` from the searching side's perspective.
    pub score: i32,
    pub depth: u32,
    /// Nodes visited, root excluded.
    pub nodes: u64,
}

impl SearchReport {
    /// Plies to a forced win (positive) or loss (negative), if one was proven.
    pub fn forced_result(&self) -> Option<i32> {
        if self.score > EVAL_BOUND {
            Some(WIN_SCORE - self.score)
        } else if self.score < -EVAL_BOUND {
            Some(-(WIN_SCORE + self.score))
        } else {
            None
        }
    }
}

/// Negamax searcher for one game variant.
pub struct NegamaxSearcher {
    rules: Rules,
    heuristic: Box<dyn Heuristic>,
    pruning: bool,
}

impl NegamaxSearcher {
    pub fn new(rules: Rules) -> Self {
        Self::with_heuristic(rules, Box::new(LineWindowHeuristic::default()))
    }

    pub fn with_weights(rules: Rules, weights: EvalWeights) -> Self {
        Self::with_heuristic(rules, Box::new(LineWindowHeuristic::new(weights)))
    }

    pub fn with_heuristic(rules: Rules, heuristic: Box<dyn Heuristic>) -> Self {
        NegamaxSearcher {
            rules,
            heuristic,
            pruning: true,
        }
    }

    pub fn with_pruning(mut self, pruning: bool) -> Self {
        self.pruning = pruning;
        self
    }

    /// Pick the best move for `ai_symbol` in `state`, searching `max_depth`
    /// plies. Pure: the same inputs always give the same report.
    pub fn select_move(
        &self,
        state: &str,
        ai_symbol: char,
        opponent_symbol: char,
        max_depth: u32,
    ) -> Result<SearchReport, SearchError> {
        if max_depth == 0 {
            return Err(SearchError::ZeroDepth);
        }
        validate_state(self.rules.geometry(), state)?;
        if ai_symbol == opponent_symbol {
            return Err(SearchError::SameSymbols(ai_symbol));
        }
        for symbol in [ai_symbol, opponent_symbol] {
            if Player::from_symbol(symbol).is_none() {
                return Err(SearchError::UnknownSymbol(symbol));
            }
        }

        let cells = state.as_bytes();
        if self.rules.winner(&BitboardPair::from_bytes(cells)).is_some() {
            return Err(SearchError::AlreadyDecided);
        }
        let moves = self.rules.legal_moves(cells);
        let Some(&first) = moves.first() else {
            return Err(SearchError::NoLegalMoves);
        };

        let (ai, opp) = (ai_symbol as u8, opponent_symbol as u8);
        let mut nodes = 0u64;
        let mut alpha = -WIN_SCORE - 1;
        let beta = WIN_SCORE + 1;
        let mut best_move = first;
        let mut best_score = i32::MIN;

        for mv in moves {
            let child = self.play(cells, mv, ai);
            let score = -self.negamax(
                &child,
                opp,
                ai,
                max_depth - 1,
                1,
                -beta,
                -alpha,
                &mut nodes,
            );
            if score > best_score {
                best_score = score;
                best_move = mv;
            }
            if self.pruning {
                alpha = alpha.max(score);
            }
        }

        let report = SearchReport {
            best_move,
            score: best_score,
            depth: max_depth,
            nodes,
        };
        debug!(
            game = self.rules.kind().name(),
            best_move,
            score = best_score,
            depth = max_depth,
            nodes,
            "search finished"
        );
        Ok(report)
    }

    /// Copy of `cells` with `mv` played by `symbol`. Only called with legal moves.
    fn play(&self, cells: &[u8], mv: usize, symbol: u8) -> Vec<u8> {
        let mut child = cells.to_vec();
        if let Ok(target) = self.rules.target_cell(cells, mv) {
            child[target] = symbol;
        }
        child
    }

    #[allow(clippy::too_many_arguments)]
    fn negamax(
        &self,
        cells: &[u8],
        mover: u8,
        opponent: u8,
        depth: u32,
        ply: u32,
        mut alpha: i32,
        beta: i32,
        nodes: &mut u64,
    ) -> i32 {
        *nodes += 1;
        let detector = self.rules.detector();
        let own = encode_bytes(cells, mover);
        let opp = encode_bytes(cells, opponent);

        // Terminal check
        if detector.has_run(opp) {
            return -(WIN_SCORE - ply as i32);
        }
        if detector.has_run(own) {
            return WIN_SCORE - ply as i32;
        }
        let moves = self.rules.legal_moves(cells);
        if moves.is_empty() {
            return 0;
        }

        if depth == 0 {
            return self
                .heuristic
                .evaluate(&self.rules, own, opp)
                .clamp(-EVAL_BOUND, EVAL_BOUND);
        }

        let mut best = i32::MIN;
        for mv in moves {
            let child = self.play(cells, mv, mover);
            let score = -self.negamax(
                &child,
                opponent,
                mover,
                depth - 1,
                ply + 1,
                -beta,
                -alpha,
                nodes,
            );
            best = best.max(score);
            if self.pruning {
                alpha = alpha.max(score);
                if alpha >= beta {
                    break;
                }
            }
        }
        best
    }
}

/// Negamax agent: searches a snapshot of the state at a fixed depth.
pub struct NegamaxAgent {
    searcher: NegamaxSearcher,
    depth: u32,
    last_report: Option<SearchReport>,
}

impl NegamaxAgent {
    pub fn new(rules: Rules, depth: u32) -> Self {
        NegamaxAgent {
            searcher: NegamaxSearcher::new(rules),
            depth,
            last_report: None,
        }
    }

    pub fn with_searcher(searcher: NegamaxSearcher, depth: u32) -> Self {
        NegamaxAgent {
            searcher,
            depth,
            last_report: None,
        }
    }

    pub fn last_report(&self) -> Option<SearchReport> {
        self.last_report
    }
}

impl Agent for NegamaxAgent {
    fn select_action(&mut self, state: &GameState) -> Option<usize> {
        let me = state.current_player();
        let report = match self.searcher.select_move(
            &state.state_string(),
            me.symbol(),
            me.other().symbol(),
            self.depth,
        ) {
            Ok(report) => report,
            Err(err) => {
                debug!(error = %err, player = me.name(), "search gave no move");
                self.last_report = None;
                return None;
            }
        };
        self.last_report = Some(report);
        Some(report.best_move)
    }

    fn name(&self) -> &str {
        "Negamax"
    }
}
