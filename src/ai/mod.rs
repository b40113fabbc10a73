//! Move selection: the agent trait, the line-window evaluator and the
//! negamax searcher.

mod agent;
pub mod evaluator;
pub mod negamax;
mod random;

pub use agent::Agent;
pub use evaluator::{EvalWeights, Heuristic, LineWindowHeuristic};
pub use negamax::{
    NegamaxAgent, NegamaxSearcher, SearchConfig, SearchReport, MAX_SEARCH_DEPTH, WIN_SCORE,
};
pub use random::RandomAgent;
