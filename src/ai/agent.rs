use crate::game::GameState;

/// Universal interface for move-selecting players.
pub trait Agent {
    /// Select a move id for the side to move, or `None` if the game has no
    /// legal move left.
    fn select_action(&mut self, state: &GameState) -> Option<usize>;

    /// Return the agent's display name.
    fn name(&self) -> &str;
}
