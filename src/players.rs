//! Player slots and the game mode that decides which of them the engine
//! plays.

use tracing::info;

use crate::game::Player;

/// Who controls each seat.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Mode {
    HumanVsHuman,
    /// The given player is AI, the other human.
    HumanVsAi(Player),
    AiVsAi,
}

impl Mode {
    pub fn label(self) -> String {
        match self {
            Mode::HumanVsHuman => "Human vs Human".to_string(),
            Mode::HumanVsAi(ai) => format!("Human vs AI (AI: {})", ai.name()),
            Mode::AiVsAi => "AI vs AI".to_string(),
        }
    }
}

/// Mode selector as written in configuration files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModeKind {
    HumanVsHuman,
    HumanVsAi,
    AiVsAi,
}

impl ModeKind {
    pub fn with_ai_player(self, ai: Player) -> Mode {
        match self {
            ModeKind::HumanVsHuman => Mode::HumanVsHuman,
            ModeKind::HumanVsAi => Mode::HumanVsAi(ai),
            ModeKind::AiVsAi => Mode::AiVsAi,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlayerSlot {
    pub player: Player,
    pub is_ai: bool,
}

impl PlayerSlot {
    pub fn label(&self) -> String {
        if self.is_ai {
            format!("{} (AI)", self.player.name())
        } else {
            self.player.name().to_string()
        }
    }
}

/// Both seats of a two-player game.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayerRegistry {
    slots: [PlayerSlot; 2],
    mode: Mode,
}

impl PlayerRegistry {
    pub fn new(mode: Mode) -> Self {
        let mut registry = PlayerRegistry {
            slots: Player::ALL.map(|player| PlayerSlot {
                player,
                is_ai: false,
            }),
            mode: Mode::HumanVsHuman,
        };
        registry.apply(mode);
        registry
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Switch mode and update each seat's AI flag.
    pub fn set_mode(&mut self, mode: Mode) {
        self.apply(mode);
        info!(mode = %mode.label(), "game mode set");
    }

    fn apply(&mut self, mode: Mode) {
        for slot in &mut self.slots {
            slot.is_ai = match mode {
                Mode::HumanVsHuman => false,
                Mode::HumanVsAi(ai) => slot.player == ai,
                Mode::AiVsAi => true,
            };
        }
        self.mode = mode;
    }

    pub fn slot(&self, player: Player) -> &PlayerSlot {
        &self.slots[player.index()]
    }

    pub fn is_ai(&self, player: Player) -> bool {
        self.slot(player).is_ai
    }
}

impl Default for PlayerRegistry {
    fn default() -> Self {
        Self::new(Mode::HumanVsHuman)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_all_human() {
        let registry = PlayerRegistry::default();
        assert!(!registry.is_ai(Player::First));
        assert!(!registry.is_ai(Player::Second));
    }

    #[test]
    fn test_human_vs_ai_flags_one_slot() {
        let mut registry = PlayerRegistry::default();
        registry.set_mode(Mode::HumanVsAi(Player::Second));
        assert!(!registry.is_ai(Player::First));
        assert!(registry.is_ai(Player::Second));

        registry.set_mode(Mode::HumanVsAi(Player::First));
        assert!(registry.is_ai(Player::First));
        assert!(!registry.is_ai(Player::Second));
    }

    #[test]
    fn test_ai_vs_ai_and_back() {
        let mut registry = PlayerRegistry::new(Mode::AiVsAi);
        assert!(registry.is_ai(Player::First) && registry.is_ai(Player::Second));
        registry.set_mode(Mode::HumanVsHuman);
        assert_eq!(registry.mode(), Mode::HumanVsHuman);
        assert!(!registry.is_ai(Player::First) && !registry.is_ai(Player::Second));
    }

    #[test]
    fn test_labels() {
        let registry = PlayerRegistry::new(Mode::HumanVsAi(Player::Second));
        assert_eq!(registry.slot(Player::Second).label(), "Player 2 (AI)");
        assert_eq!(registry.slot(Player::First).label(), "Player 1");
        assert_eq!(registry.mode().label(), "Human vs AI (AI: Player 2)");
        assert_eq!(
            ModeKind::AiVsAi.with_ai_player(Player::First),
            Mode::AiVsAi
        );
    }
}
