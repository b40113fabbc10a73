//! One owned play session: the active game, its seats and the searcher that
//! plays the AI seats.

use tracing::{debug, info};

use crate::ai::{NegamaxSearcher, SearchReport};
use crate::config::EngineConfig;
use crate::error::{MoveError, SessionError};
use crate::game::{GameKind, GameOutcome, GameState, GameStatus, Player, Rules};
use crate::players::{Mode, ModeKind, PlayerRegistry};

/// Mode applied when a session is created.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    pub mode: ModeKind,
    /// Seat taken by the engine in `human_vs_ai` mode.
    pub ai_player: Player,
}

impl Default for SessionConfig {
    fn default() -> Self {
        SessionConfig {
            mode: ModeKind::HumanVsAi,
            ai_player: Player::Second,
        }
    }
}

impl SessionConfig {
    pub fn mode(&self) -> Mode {
        self.mode.with_ai_player(self.ai_player)
    }
}

/// Everything a renderer needs from the core, copied out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionView {
    pub kind: GameKind,
    pub current_player: Player,
    pub current_is_ai: bool,
    pub state: String,
    pub game_over: bool,
    pub outcome: Option<GameOutcome>,
    pub last_search: Option<SearchReport>,
}

struct ActiveGame {
    state: GameState,
    searcher: NegamaxSearcher,
    depth: u32,
}

pub struct Session {
    config: EngineConfig,
    registry: PlayerRegistry,
    game: Option<ActiveGame>,
    last_search: Option<SearchReport>,
}

impl Session {
    pub fn new(config: EngineConfig) -> Self {
        let registry = PlayerRegistry::new(config.session.mode());
        Session {
            config,
            registry,
            game: None,
            last_search: None,
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn registry(&self) -> &PlayerRegistry {
        &self.registry
    }

    /// Replace any current game with a fresh, set-up game of `kind`.
    pub fn start(&mut self, kind: GameKind) {
        let rules = Rules::for_kind(kind);
        let searcher = NegamaxSearcher::with_weights(rules.clone(), self.config.eval)
            .with_pruning(self.config.search.pruning);
        let mut state = GameState::new(rules);
        state.set_up_board();
        self.game = Some(ActiveGame {
            state,
            searcher,
            depth: self.config.search.depth_for(kind),
        });
        self.last_search = None;
        info!(game = kind.name(), mode = %self.registry.mode().label(), "game started");
    }

    /// Stop and set up the current game again. Mode and AI flags are kept.
    pub fn reset(&mut self) {
        if let Some(game) = &mut self.game {
            game.state.stop_game();
            game.state.set_up_board();
            info!(game = game.state.kind().name(), "game reset");
        }
        self.last_search = None;
    }

    /// Drop the current game.
    pub fn teardown(&mut self) {
        if let Some(game) = self.game.take() {
            info!(game = game.state.kind().name(), "session torn down");
        }
        self.last_search = None;
    }

    pub fn game(&self) -> Option<&GameState> {
        self.game.as_ref().map(|g| &g.state)
    }

    pub fn set_mode(&mut self, mode: Mode) {
        self.registry.set_mode(mode);
    }

    pub fn last_search(&self) -> Option<SearchReport> {
        self.last_search
    }

    /// True if a game is in progress and its side to move is AI-flagged.
    pub fn is_ai_turn(&self) -> bool {
        self.game().is_some_and(|state| {
            state.status() == GameStatus::InProgress && self.registry.is_ai(state.current_player())
        })
    }

    /// Play a human move for the side to move.
    pub fn attempt_move(&mut self, mv: usize) -> Result<usize, SessionError> {
        let game = self.game.as_mut().ok_or(MoveError::NotStarted)?;
        Ok(game.state.attempt_move(mv)?)
    }

    /// Search the current position and play the result. Only valid on an AI
    /// turn; otherwise fails with [`SessionError::NotAiTurn`] and changes
    /// nothing.
    pub fn request_ai_move(&mut self) -> Result<usize, SessionError> {
        if !self.is_ai_turn() {
            return Err(SessionError::NotAiTurn);
        }
        let game = self.game.as_mut().ok_or(SessionError::NotAiTurn)?;
        let me = game.state.current_player();
        let snapshot = game.state.state_string();
        let report = game
            .searcher
            .select_move(&snapshot, me.symbol(), me.other().symbol(), game.depth)?;
        game.state.attempt_move(report.best_move)?;
        debug!(
            player = me.name(),
            best_move = report.best_move,
            score = report.score,
            nodes = report.nodes,
            forced = ?report.forced_result(),
            "AI move played"
        );
        self.last_search = Some(report);
        Ok(report.best_move)
    }

    /// Play one AI move if it is an AI's turn. Returns whether a move was made.
    pub fn tick(&mut self) -> Result<bool, SessionError> {
        if !self.is_ai_turn() {
            return Ok(false);
        }
        self.request_ai_move()?;
        Ok(true)
    }

    pub fn view(&self) -> Option<SessionView> {
        let state = self.game()?;
        Some(SessionView {
            kind: state.kind(),
            current_player: state.current_player(),
            current_is_ai: self.registry.is_ai(state.current_player()),
            state: state.state_string(),
            game_over: state.is_terminal(),
            outcome: state.outcome(),
            last_search: self.last_search,
        })
    }
}
