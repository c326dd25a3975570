//! WRLD SVR - A single-screen asteroid shooter
//!
//! Core modules:
//! - `sim`: Deterministic simulation (motion, wrap, collisions, session state)
//! - `input`: Key bindings and per-tick player intent
//! - `autopilot`: Demo pilot that plays through the key bindings
//! - `render`: Sprite instances and HUD values handed to the host renderer
//! - `settings`: Data-driven playfield and balance constants

pub mod autopilot;
pub mod input;
pub mod render;
pub mod settings;
pub mod sim;

pub use input::{Key, KeyEvent, KeyMap};
pub use render::{Hud, SpriteInstance, TextureId};
pub use settings::{Settings, SettingsError};
pub use sim::{GamePhase, GameState, TickInput, tick};

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Window title
    pub const SCREEN_TITLE: &str = "WRLD SVR";
    /// Visible playfield, in world units
    pub const SCREEN_WIDTH: f32 = 1080.0;
    pub const SCREEN_HEIGHT: f32 = 1080.0;
    /// Band outside the visible field that asteroids drift through before wrapping
    pub const OFFSCREEN_SPACE: f32 = 200.0;

    /// Texture scale for most sprites
    pub const SCALE: f32 = 0.5;
    /// Texture scale for the player ship
    pub const SPRITE_SCALING: f32 = 0.35;

    pub const STARTING_ASTEROID_COUNT: u32 = 5;
    pub const STARTING_LIVES: u32 = 5;

    /// Degrees per tick while a turn key is held
    pub const TURN_SPEED: f32 = 3.0;
    /// Units per tick
    pub const BULLET_SPEED: f32 = 10.0;
}

/// Normalize an angle in degrees to [0, 360)
#[inline]
pub fn normalize_degrees(angle: f32) -> f32 {
    let wrapped = angle.rem_euclid(360.0);
    // rem_euclid can round up to exactly 360.0 for tiny negative inputs
    if wrapped >= 360.0 { 0.0 } else { wrapped }
}

/// Unit vector a sprite at `angle_deg` is facing.
///
/// Angles are measured from the +y axis, counter-clockwise positive, so a
/// heading of 0 points straight up and 90 points left.
#[inline]
pub fn heading_vector(angle_deg: f32) -> Vec2 {
    let rad = angle_deg.to_radians();
    Vec2::new(-rad.sin(), rad.cos())
}

/// Heading in degrees that a velocity points along, measured from +x
#[inline]
pub fn velocity_heading(vel: Vec2) -> f32 {
    normalize_degrees(vel.y.atan2(vel.x).to_degrees())
}
