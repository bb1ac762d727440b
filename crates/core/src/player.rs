use crate::Hand;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum PlayerKind {
    Human,
    Ai,
}

impl PlayerKind {
    pub fn label(self) -> &'static str {
        match self {
            PlayerKind::Human => "Human",
            PlayerKind::Ai => "AI",
        }
    }
}

const AI_NAMES: [&str; 4] = ["CPU Alice", "CPU Bob", "CPU Charlie", "CPU Dana"];

/// Seat name used when the table config does not provide one.
pub fn default_player_name(index: usize, kind: PlayerKind) -> String {
    match kind {
        PlayerKind::Human if index == 0 => "You".to_string(),
        PlayerKind::Human => format!("Player {}", index + 1),
        PlayerKind::Ai => AI_NAMES
            .get(index)
            .map(|name| name.to_string())
            .unwrap_or_else(|| format!("CPU {}", index + 1)),
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub name: String,
    pub kind: PlayerKind,
    pub hand: Hand,
    pub score: u32,
    #[serde(default)]
    pub has_passed: bool,
}

impl Player {
    pub fn new(name: impl Into<String>, kind: PlayerKind) -> Self {
        Self {
            name: name.into(),
            kind,
            hand: Hand::new(),
            score: 0,
            has_passed: false,
        }
    }

    pub fn is_human(&self) -> bool {
        self.kind == PlayerKind::Human
    }

    pub fn add_score(&mut self, points: u32) {
        self.score = self.score.saturating_add(points);
    }

    pub fn reset_pass(&mut self) {
        self.has_passed = false;
    }

    /// A player wins by emptying their hand.
    pub fn has_won(&self) -> bool {
        self.hand.is_empty()
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({}) - Cards: {}, Score: {}",
            self.name,
            self.kind.label(),
            self.hand.len(),
            self.score
        )?;
        if self.has_passed {
            write!(f, " [PASSED]")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_names_follow_seat() {
        assert_eq!(default_player_name(0, PlayerKind::Human), "You");
        assert_eq!(default_player_name(1, PlayerKind::Human), "Player 2");
        assert_eq!(default_player_name(1, PlayerKind::Ai), "CPU Bob");
        assert_eq!(default_player_name(5, PlayerKind::Ai), "CPU 6");
    }

    #[test]
    fn summary_line() {
        let mut player = Player::new("CPU Dana", PlayerKind::Ai);
        player.has_passed = true;
        player.add_score(3);
        assert_eq!(
            player.to_string(),
            "CPU Dana (AI) - Cards: 0, Score: 3 [PASSED]"
        );
        assert!(player.has_won());
    }
}
