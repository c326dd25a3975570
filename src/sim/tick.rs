//! Per-frame simulation tick
//!
//! Order within a tick: input, batch motion (asteroids, bullets, life icons),
//! bullet culling, collision resolution, ship motion.

use glam::Vec2;
use rand::Rng;

use super::collision::{Circle, SpatialGrid, checked_overlapping};
use super::state::{Entity, FRAGMENTS_PER_SPLIT, GameEvent, GamePhase, GameState};
use crate::input::Key;

/// Requested rotation for the ship
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Turn {
    Left,
    Right,
    Straight,
}

/// Input commands for a single tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Change the turn intent (edge, not level: `None` keeps the current one)
    pub turn: Option<Turn>,
    /// Fire one bullet
    pub fire: bool,
}

/// Advance the game state by one frame
pub fn tick(state: &mut GameState, input: &TickInput) {
    state.frame_count += 1;
    state.events.clear();

    if state.phase == GamePhase::GameOver {
        return;
    }

    apply_input(state, input);

    // Batch update
    for asteroid in &mut state.asteroids {
        asteroid.advance(&state.settings);
    }
    for bullet in &mut state.bullets {
        bullet.advance(&state.settings);
    }
    for icon in &mut state.life_icons {
        icon.advance(&state.settings);
    }
    let settings = &state.settings;
    state.bullets.retain(|b| !b.is_expired(settings));

    resolve_collisions(state);

    if state.phase == GamePhase::Playing {
        state.player.advance(&state.settings);
    }

    state.normalize_order();
}

fn apply_input(state: &mut GameState, input: &TickInput) {
    match input.turn {
        Some(Turn::Left) => state.on_key_press(Key::TurnLeft),
        Some(Turn::Right) => state.on_key_press(Key::TurnRight),
        Some(Turn::Straight) => state.on_key_release(Key::TurnLeft),
        None => {}
    }
    if input.fire {
        state.on_key_press(Key::Fire);
    }
}

/// Outcome of one collision pass
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CollisionReport {
    /// Number of asteroids split this pass
    pub splits: u32,
    /// Bullets consumed by hits
    pub bullets_spent: usize,
    /// The ship hit an asteroid and lost a life
    pub crashed: bool,
    /// The ship hit an asteroid with no lives left
    pub game_over: bool,
}

/// Resolve bullet/asteroid and ship/asteroid overlaps.
///
/// Hits are marked during the scan and applied afterwards, so every query sees
/// the asteroids that existed when resolution began. An asteroid destroyed
/// earlier in the pass cannot be hit again, and fragments only join the field
/// once the pass is over.
pub fn resolve_collisions(state: &mut GameState) -> CollisionReport {
    let mut report = CollisionReport::default();
    let settings = &state.settings;

    let shapes: Vec<Circle> = state.asteroids.iter().map(|a| a.collider(settings)).collect();
    let grid = SpatialGrid::build(&shapes, settings.grid_cell_size);
    let mut destroyed = vec![false; shapes.len()];
    let mut hits: Vec<usize> = Vec::new();
    let mut spent: Vec<u32> = Vec::new();

    for bullet in &state.bullets {
        let probe = bullet.collider(settings);
        let mut hit_any = false;
        for idx in checked_overlapping(&probe, &shapes, &grid) {
            if destroyed[idx] {
                continue;
            }
            destroyed[idx] = true;
            hits.push(idx);
            hit_any = true;
        }
        if hit_any {
            spent.push(bullet.id);
        }
    }

    let ship = state.player.collider(settings);
    let crash = checked_overlapping(&ship, &shapes, &grid)
        .into_iter()
        .find(|&idx| !destroyed[idx]);

    let mut fragments = Vec::new();
    for idx in hits {
        let parent = state.asteroids[idx];
        fragments.extend(split_asteroid(state, &parent));
        report.splits += 1;
    }

    if let Some(idx) = crash {
        if state.lives > 0 {
            state.lives -= 1;
            let parent = state.asteroids[idx];
            fragments.extend(split_asteroid(state, &parent));
            report.splits += 1;
            destroyed[idx] = true;
            state.life_icons.pop();
            report.crashed = true;
            state.events.push(GameEvent::Crash {
                lives_left: state.lives,
            });
            log::info!("Crash! {} lives left", state.lives);
        } else {
            state.phase = GamePhase::GameOver;
            report.game_over = true;
            state.events.push(GameEvent::GameOver { score: state.score });
            log::info!(
                "Game over at frame {} with score {}",
                state.frame_count,
                state.score
            );
        }
    }

    // Compact
    let mut flags = destroyed.iter();
    state.asteroids.retain(|_| !flags.next().copied().unwrap_or(false));
    state.asteroids.extend(fragments);
    report.bullets_spent = spent.len();
    state.bullets.retain(|b| !spent.contains(&b.id));

    report
}

/// Score a destroyed asteroid and build its fragments.
///
/// Large, small and smaller asteroids break into three pieces of the next tier
/// at the parent's position; tiny ones leave nothing. The fragments are
/// returned rather than inserted.
pub fn split_asteroid(state: &mut GameState, parent: &Entity) -> Vec<Entity> {
    state.score += 1;

    let Some(tier) = parent.tier() else {
        return Vec::new();
    };
    let (Some(child_tier), Some(spread)) = (tier.next(), tier.fragment_spread()) else {
        state.events.push(GameEvent::AsteroidSplit {
            id: parent.id,
            tier,
            pos: parent.kin.pos,
            fragments: 0,
        });
        log::debug!("Asteroid {} destroyed", parent.id);
        return Vec::new();
    };

    let pos = parent.kin.pos;
    let mut children = Vec::with_capacity(FRAGMENTS_PER_SPLIT);
    for _ in 0..FRAGMENTS_PER_SPLIT {
        let rng = state.rng();
        let vel = Vec2::new(
            rng.random_range(-spread..spread),
            rng.random_range(-spread..spread),
        );
        let change_angle = rng.random_range(-1.0..1.0);
        children.push(state.make_asteroid(pos, vel, change_angle, child_tier));
    }

    state.events.push(GameEvent::AsteroidSplit {
        id: parent.id,
        tier,
        pos,
        fragments: children.len(),
    });
    log::debug!(
        "Asteroid {} (tier {}) split into {} at ({:.1}, {:.1})",
        parent.id,
        tier.size(),
        children.len(),
        pos.x,
        pos.y
    );
    children
}
