//! # Board Engine
//!
//! A turn-based engine for two-player line games (Connect Four,
//! Tic-Tac-Toe, and any other "n in a row" variant that fits a 64-cell
//! bitboard), with a negamax/alpha-beta AI.
//!
//! ## Modules
//!
//! - [`game`] — Core game logic: board, bitboard codec, line detector, rules, state machine
//! - [`ai`] — Agent trait, evaluator, negamax searcher, random agent
//! - [`players`] — Player seats and game mode
//! - [`session`] — Owned session: active game, seats, AI turns
//! - [`config`] — TOML configuration loading and validation
//! - [`error`] — Structured error types

pub mod ai;
pub mod config;
pub mod error;
pub mod game;
pub mod players;
pub mod session;
