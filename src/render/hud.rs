//! Overlay text

use serde::{Deserialize, Serialize};

/// Values the host prints over the playfield
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hud {
    pub score: u32,
    pub asteroid_count: usize,
    pub game_over: bool,
}

impl Hud {
    /// Overlay lines, top to bottom
    pub fn lines(&self) -> Vec<String> {
        let mut lines = vec![
            format!("Score: {}", self.score),
            format!("Asteroid Count: {}", self.asteroid_count),
        ];
        if self.game_over {
            lines.push("Game Over".to_string());
        }
        lines
    }
}
