use std::path::PathBuf;

/// Errors raised when a board geometry cannot be represented.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GeometryError {
    #[error("board dimensions must be non-zero (got {cols}x{rows})")]
    Empty { cols: usize, rows: usize },

    #[error("board has {cells} cells, at most 64 fit in a bitboard")]
    TooLarge { cells: usize },

    #[error("run length {run} does not fit a {cols}x{rows} board")]
    RunLength { run: usize, cols: usize, rows: usize },
}

/// Reasons a move is rejected. The board is never mutated when one is returned.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MoveError {
    #[error("move {mv} is out of range (limit {limit})")]
    OutOfRange { mv: usize, limit: usize },

    #[error("cell ({col}, {row}) is already occupied")]
    CellOccupied { col: usize, row: usize },

    #[error("column {0} is full")]
    ColumnFull(usize),

    #[error("game has not been set up")]
    NotStarted,

    #[error("game is already over")]
    GameOver,
}

/// A canonical state string that failed validation on import.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StateStringError {
    #[error("state string has length {found}, expected {expected}")]
    WrongLength { expected: usize, found: usize },

    #[error("invalid symbol {symbol:?} at index {index}")]
    InvalidSymbol { index: usize, symbol: char },
}

/// Precondition failures of the adversarial search.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SearchError {
    #[error("malformed snapshot: {0}")]
    Snapshot(#[from] StateStringError),

    #[error("AI and opponent share the symbol {0:?}")]
    SameSymbols(char),

    #[error("symbol {0:?} is not a player symbol")]
    UnknownSymbol(char),

    #[error("search depth must be at least 1")]
    ZeroDepth,

    #[error("snapshot is already decided")]
    AlreadyDecided,

    #[error("no legal moves in snapshot")]
    NoLegalMoves,
}

/// Errors returned by session-level operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SessionError {
    #[error("current player is not AI-controlled")]
    NotAiTurn,

    #[error("illegal move: {0}")]
    Move(#[from] MoveError),

    #[error("search failed: {0}")]
    Search(#[from] SearchError),
}

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    FileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse TOML: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("config validation error: {0}")]
    Validation(String),
}
