//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One tick per frame, no wall-clock time
//! - Seeded RNG only
//! - Stable iteration order (by entity ID)
//! - No rendering or platform dependencies

pub mod collision;
pub mod state;
pub mod tick;

pub use collision::{Circle, SpatialGrid, checked_overlapping, overlapping};
pub use state::{
    Entity, EntityKind, FRAGMENTS_PER_SPLIT, GameEvent, GamePhase, GameState, Kinematics, PLAYER_ID,
    Tier, wrap_position,
};
pub use tick::{CollisionReport, TickInput, Turn, resolve_collisions, split_asteroid, tick};
