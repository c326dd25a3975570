//! Renderer-facing view of the simulation
//!
//! The host owns the window, textures and text. Each frame it asks the session
//! for a flat list of sprite instances and the HUD values, and draws them.

pub mod hud;
pub mod sprite;

pub use hud::Hud;
pub use sprite::{SpriteInstance, TextureId};

use crate::sim::GameState;
use crate::sim::state::Entity;

impl GameState {
    /// Every drawable entity in draw order: ship, life icons, asteroids, bullets
    pub fn draw_list(&self) -> Vec<SpriteInstance> {
        std::iter::once(&self.player)
            .chain(&self.life_icons)
            .chain(&self.asteroids)
            .chain(&self.bullets)
            .map(Entity::sprite_instance)
            .collect()
    }

    /// Overlay values
    pub fn hud(&self) -> Hud {
        Hud {
            score: self.score,
            asteroid_count: self.asteroid_count(),
            game_over: self.game_over(),
        }
    }
}
