//! Playfield and balance settings
//!
//! Every constant the simulation reads lives here so a host can retune the game
//! from a JSON file. Defaults reproduce the shipped game.

use std::path::Path;

use glam::Vec2;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;

/// Failure to load settings from disk
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to read settings file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse settings: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid settings: {0}")]
    Invalid(String),
}

/// Axis-aligned rectangle in world units
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub left: f32,
    pub right: f32,
    pub bottom: f32,
    pub top: f32,
}

impl Bounds {
    /// True when `pos` is inside or on the edge of the rectangle
    #[inline]
    pub fn contains(&self, pos: Vec2) -> bool {
        pos.x >= self.left && pos.x <= self.right && pos.y >= self.bottom && pos.y <= self.top
    }
}

/// Game settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Playfield ===
    pub screen_width: f32,
    pub screen_height: f32,
    /// Margin around the visible field that asteroids drift through before wrapping
    pub offscreen_space: f32,
    /// Bullets outside this rectangle are culled. Deliberately not derived from
    /// the wrap margin.
    pub bullet_bounds: Bounds,

    // === Session ===
    pub starting_lives: u32,
    pub starting_asteroid_count: u32,

    // === Player ===
    /// Forward speed (units/tick); no key changes it
    pub player_speed: f32,
    /// Degrees per tick while turning
    pub turn_speed: f32,
    pub bullet_speed: f32,

    // === Collision radii ===
    pub ship_radius: f32,
    pub bullet_radius: f32,
    /// Indexed by tier - 1
    pub asteroid_radius: [f32; 4],
    /// Cell edge of the spatial grid used to cross-check overlap queries
    pub grid_cell_size: f32,

    // === HUD ===
    /// Width and height of one life icon on screen
    pub life_icon_size: [f32; 2],

    // === Demo ===
    /// Frames between autopilot shots
    pub autopilot_fire_interval: u32,
    /// Frame cap for the headless demo
    pub demo_frames: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            screen_width: SCREEN_WIDTH,
            screen_height: SCREEN_HEIGHT,
            offscreen_space: OFFSCREEN_SPACE,
            bullet_bounds: Bounds {
                left: -100.0,
                right: 1500.0,
                bottom: -100.0,
                top: 1100.0,
            },

            starting_lives: STARTING_LIVES,
            starting_asteroid_count: STARTING_ASTEROID_COUNT,

            player_speed: 0.0,
            turn_speed: TURN_SPEED,
            bullet_speed: BULLET_SPEED,

            ship_radius: 20.0,
            bullet_radius: 4.0,
            asteroid_radius: [9.0, 15.0, 24.0, 45.0],
            grid_cell_size: 128.0,

            life_icon_size: [32.0, 32.0],

            autopilot_fire_interval: 20,
            demo_frames: 60 * 60 * 5,
        }
    }
}

impl Settings {
    #[inline]
    pub fn left_limit(&self) -> f32 {
        -self.offscreen_space
    }

    #[inline]
    pub fn right_limit(&self) -> f32 {
        self.screen_width + self.offscreen_space
    }

    #[inline]
    pub fn bottom_limit(&self) -> f32 {
        -self.offscreen_space
    }

    #[inline]
    pub fn top_limit(&self) -> f32 {
        self.screen_height + self.offscreen_space
    }

    /// Center of the visible field (player spawn point)
    pub fn screen_center(&self) -> Vec2 {
        Vec2::new(self.screen_width / 2.0, self.screen_height / 2.0)
    }

    /// Collision radius of an asteroid of the given tier (1..=4)
    pub fn asteroid_radius(&self, tier: u8) -> f32 {
        let idx = (tier.clamp(1, 4) - 1) as usize;
        self.asteroid_radius[idx]
    }

    /// Reject values the simulation cannot run with
    pub fn validate(&self) -> Result<(), SettingsError> {
        if self.screen_width <= 0.0 || self.screen_height <= 0.0 {
            return Err(SettingsError::Invalid(format!(
                "screen size must be positive, got {}x{}",
                self.screen_width, self.screen_height
            )));
        }
        if self.offscreen_space < 0.0 {
            return Err(SettingsError::Invalid(format!(
                "offscreen_space must not be negative, got {}",
                self.offscreen_space
            )));
        }
        if self.bullet_speed <= 0.0 {
            return Err(SettingsError::Invalid(format!(
                "bullet_speed must be positive, got {}",
                self.bullet_speed
            )));
        }
        let b = &self.bullet_bounds;
        if b.left >= b.right || b.bottom >= b.top {
            return Err(SettingsError::Invalid(format!(
                "bullet_bounds are inverted: {b:?}"
            )));
        }
        let radii = [self.ship_radius, self.bullet_radius]
            .into_iter()
            .chain(self.asteroid_radius);
        for r in radii {
            if !r.is_finite() || r < 0.0 {
                return Err(SettingsError::Invalid(format!(
                    "collision radii must be finite and non-negative, got {r}"
                )));
            }
        }
        // Asteroids spawn on the integer grid inside the limits
        if self.right_limit() as i32 <= self.left_limit() as i32
            || self.top_limit() as i32 <= self.bottom_limit() as i32
        {
            return Err(SettingsError::Invalid(format!(
                "playfield {}x{} with margin {} has no room to spawn asteroids",
                self.screen_width, self.screen_height, self.offscreen_space
            )));
        }
        if !self.grid_cell_size.is_finite() || self.grid_cell_size <= 0.0 {
            return Err(SettingsError::Invalid(format!(
                "grid_cell_size must be positive, got {}",
                self.grid_cell_size
            )));
        }
        Ok(())
    }

    /// Parse and validate settings from JSON. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        let settings: Settings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Load settings from a JSON file
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| SettingsError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let settings = Self::from_json(&json)?;
        log::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    /// Load settings from `path`, falling back to defaults on any failure
    pub fn load_or_default(path: Option<&Path>) -> Self {
        match path {
            Some(path) => Self::load_from(path).unwrap_or_else(|e| {
                log::warn!("{e}; using default settings");
                Self::default()
            }),
            None => {
                log::info!("Using default settings");
                Self::default()
            }
        }
    }
}
