//! Game state and core simulation types
//!
//! One `Entity` type covers every sprite in the game; what differs between the
//! ship, asteroids, bullets and life icons is the `EntityKind` tag and the
//! motion rule `Entity::advance` picks for it.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::collision::Circle;
use crate::settings::Settings;
use crate::{heading_vector, normalize_degrees, velocity_heading};

/// Current phase of the session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Active gameplay
    Playing,
    /// Lives ran out. Only `GameState::setup` leaves this phase.
    GameOver,
}

/// Asteroid size class, largest first
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Tier {
    Tiny = 1,
    Smaller = 2,
    Small = 3,
    Large = 4,
}

impl Tier {
    /// Numeric size (4 = largest)
    #[inline]
    pub fn size(self) -> u8 {
        self as u8
    }

    pub fn from_size(size: u8) -> Option<Self> {
        match size {
            1 => Some(Tier::Tiny),
            2 => Some(Tier::Smaller),
            3 => Some(Tier::Small),
            4 => Some(Tier::Large),
            _ => None,
        }
    }

    /// Tier of the fragments this tier breaks into
    pub fn next(self) -> Option<Self> {
        Self::from_size(self.size() - 1)
    }

    /// Half-width of the uniform range each fragment velocity component is drawn from
    pub fn fragment_spread(self) -> Option<f32> {
        match self {
            Tier::Large => Some(1.25),
            Tier::Small => Some(1.5),
            Tier::Smaller => Some(1.75),
            Tier::Tiny => None,
        }
    }

    /// Number of texture variants available for this tier
    pub fn variant_count(self) -> u8 {
        match self {
            Tier::Large => 4,
            _ => 2,
        }
    }
}

/// Number of fragments every split produces
pub const FRAGMENTS_PER_SPLIT: usize = 3;

/// What an entity is
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum EntityKind {
    /// The ship. Moves along its heading at `speed`, ignoring `vel`.
    Player { speed: f32 },
    /// Drifts and wraps around the extended field
    Asteroid { tier: Tier },
    /// Flies straight, faces its direction of travel, expires offscreen
    Bullet,
    /// Static HUD marker for one remaining life
    LifeIcon,
}

/// Shared motion state
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Kinematics {
    /// Center position (world units)
    pub pos: Vec2,
    /// Displacement per tick
    pub vel: Vec2,
    /// Heading in degrees, [0, 360)
    pub angle: f32,
    /// Degrees per tick
    pub change_angle: f32,
}

/// A sprite in the simulation
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Entity {
    pub id: u32,
    pub kind: EntityKind,
    pub kin: Kinematics,
    /// Which texture of its kind this entity draws with
    pub sprite: u8,
}

impl Entity {
    pub fn new(id: u32, kind: EntityKind, kin: Kinematics) -> Self {
        Self {
            id,
            kind,
            kin,
            sprite: 0,
        }
    }

    /// Asteroid tier, if this is an asteroid
    pub fn tier(&self) -> Option<Tier> {
        match self.kind {
            EntityKind::Asteroid { tier } => Some(tier),
            _ => None,
        }
    }

    /// Move one tick according to this entity's rule
    pub fn advance(&mut self, settings: &Settings) {
        let kin = &mut self.kin;
        match self.kind {
            EntityKind::Player { speed } => {
                // Translation uses the heading from before this tick's rotation
                let heading = heading_vector(kin.angle);
                kin.angle = normalize_degrees(kin.angle + kin.change_angle);
                kin.pos += heading * speed;
            }
            EntityKind::Asteroid { .. } => {
                kin.pos += kin.vel;
                kin.angle = normalize_degrees(kin.angle + kin.change_angle);
                wrap_position(&mut kin.pos, settings);
            }
            EntityKind::Bullet => {
                kin.pos += kin.vel;
                kin.angle = velocity_heading(kin.vel);
            }
            EntityKind::LifeIcon => {}
        }
    }

    /// True once a bullet has left the bullet rectangle. Nothing else expires.
    pub fn is_expired(&self, settings: &Settings) -> bool {
        match self.kind {
            EntityKind::Bullet => !settings.bullet_bounds.contains(self.kin.pos),
            _ => false,
        }
    }

    /// Collision shape
    pub fn collider(&self, settings: &Settings) -> Circle {
        let radius = match self.kind {
            EntityKind::Player { .. } => settings.ship_radius,
            EntityKind::Asteroid { tier } => settings.asteroid_radius(tier.size()),
            EntityKind::Bullet => settings.bullet_radius,
            EntityKind::LifeIcon => 0.0,
        };
        Circle::new(self.kin.pos, radius)
    }
}

/// Toroidal wrap across the extended field. Each axis snaps to the opposite limit.
pub fn wrap_position(pos: &mut Vec2, settings: &Settings) {
    let (left, right) = (settings.left_limit(), settings.right_limit());
    let (bottom, top) = (settings.bottom_limit(), settings.top_limit());

    if pos.x < left {
        pos.x = right;
    }
    if pos.x > right {
        pos.x = left;
    }
    if pos.y > top {
        pos.y = bottom;
    }
    if pos.y < bottom {
        pos.y = top;
    }
}

/// Something gameplay-relevant that happened during the last tick
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    /// An asteroid was destroyed and broke into `fragments` pieces
    AsteroidSplit {
        id: u32,
        tier: Tier,
        pos: Vec2,
        fragments: usize,
    },
    /// The ship hit an asteroid and lost a life
    Crash { lives_left: u32 },
    /// The ship hit an asteroid with no lives left
    GameOver { score: u32 },
}

/// Complete session state
#[derive(Debug, Clone)]
pub struct GameState {
    pub settings: Settings,
    /// Seed the RNG was created from
    pub seed: u64,
    rng: Pcg32,
    pub phase: GamePhase,
    /// +1 per asteroid destroyed, whatever its tier
    pub score: u32,
    pub lives: u32,
    /// Ticks since setup, counted even after game over
    pub frame_count: u64,
    pub player: Entity,
    /// One icon per remaining life, oldest first
    pub life_icons: Vec<Entity>,
    /// Sorted by id
    pub asteroids: Vec<Entity>,
    /// Sorted by id
    pub bullets: Vec<Entity>,
    /// Events from the most recent tick
    pub events: Vec<GameEvent>,
    next_id: u32,
}

/// The ship keeps this ID for the whole session; `next_entity_id` starts above it
pub const PLAYER_ID: u32 = 0;

/// A fresh ship at the center of the field, at rest and facing up
fn new_player(settings: &Settings) -> Entity {
    Entity::new(
        PLAYER_ID,
        EntityKind::Player {
            speed: settings.player_speed,
        },
        Kinematics {
            pos: settings.screen_center(),
            ..Default::default()
        },
    )
}

impl GameState {
    /// Create a session and run `setup`
    pub fn new(settings: Settings, seed: u64) -> Self {
        let mut state = Self {
            player: new_player(&settings),
            settings,
            seed,
            rng: Pcg32::seed_from_u64(seed),
            phase: GamePhase::Playing,
            score: 0,
            lives: 0,
            frame_count: 0,
            life_icons: Vec::new(),
            asteroids: Vec::new(),
            bullets: Vec::new(),
            events: Vec::new(),
            next_id: PLAYER_ID + 1,
        };
        state.setup();
        state
    }

    /// Reset to a fresh session: new ship, full lives, new asteroid field.
    ///
    /// Settings are kept and the RNG stream continues, so a second setup lays
    /// out a different field than the first.
    pub fn setup(&mut self) {
        self.phase = GamePhase::Playing;
        self.frame_count = 0;
        self.score = 0;
        self.lives = self.settings.starting_lives;
        self.life_icons.clear();
        self.asteroids.clear();
        self.bullets.clear();
        self.events.clear();

        self.player = new_player(&self.settings);

        let [icon_w, icon_h] = self.settings.life_icon_size;
        let mut cur_pos = 10.0;
        for _ in 0..self.lives {
            let id = self.next_entity_id();
            let pos = Vec2::new(cur_pos + icon_w - 20.0, icon_h * 2.0 + 20.0);
            cur_pos += icon_w;
            self.life_icons.push(Entity::new(
                id,
                EntityKind::LifeIcon,
                Kinematics {
                    pos,
                    ..Default::default()
                },
            ));
        }

        for _ in 0..self.settings.starting_asteroid_count {
            self.spawn_random_asteroid();
        }

        log::info!(
            "Session set up: seed={} lives={} asteroids={}",
            self.seed,
            self.lives,
            self.asteroids.len()
        );
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    #[inline]
    pub fn game_over(&self) -> bool {
        self.phase == GamePhase::GameOver
    }

    #[inline]
    pub fn asteroid_count(&self) -> usize {
        self.asteroids.len()
    }

    pub(crate) fn rng(&mut self) -> &mut Pcg32 {
        &mut self.rng
    }

    /// Spawn an asteroid with the given motion. Returns its id.
    pub fn spawn_asteroid(&mut self, pos: Vec2, vel: Vec2, change_angle: f32, tier: Tier) -> u32 {
        let asteroid = self.make_asteroid(pos, vel, change_angle, tier);
        let id = asteroid.id;
        self.asteroids.push(asteroid);
        id
    }

    /// Build an asteroid with a random texture variant, without inserting it
    pub(crate) fn make_asteroid(
        &mut self,
        pos: Vec2,
        vel: Vec2,
        change_angle: f32,
        tier: Tier,
    ) -> Entity {
        let sprite = self.rng.random_range(0..tier.variant_count());
        let id = self.next_entity_id();
        let mut asteroid = Entity::new(
            id,
            EntityKind::Asteroid { tier },
            Kinematics {
                pos,
                vel,
                angle: 0.0,
                change_angle,
            },
        );
        asteroid.sprite = sprite;
        asteroid
    }

    /// Spawn a large asteroid anywhere on the extended field, drifting randomly.
    /// No attempt is made to keep clear of the ship.
    pub fn spawn_random_asteroid(&mut self) -> u32 {
        let s = &self.settings;
        let (left, right) = (s.left_limit() as i32, s.right_limit() as i32);
        let (bottom, top) = (s.bottom_limit() as i32, s.top_limit() as i32);

        let rng = &mut self.rng;
        let y = rng.random_range(bottom..top) as f32;
        let x = rng.random_range(left..right) as f32;
        let vel = Vec2::new(rng.random_range(-1.0..1.0), rng.random_range(-1.0..1.0));
        let change_angle = rng.random_range(-1.0..1.0);

        self.spawn_asteroid(Vec2::new(x, y), vel, change_angle, Tier::Large)
    }

    /// Spawn a bullet and immediately advance it one tick.
    ///
    /// Returns the bullet id, or `None` if that first step already left the
    /// bullet rectangle.
    pub fn spawn_bullet(&mut self, pos: Vec2, vel: Vec2) -> Option<u32> {
        let id = self.next_entity_id();
        let mut bullet = Entity::new(
            id,
            EntityKind::Bullet,
            Kinematics {
                pos,
                vel,
                ..Default::default()
            },
        );
        bullet.advance(&self.settings);
        if bullet.is_expired(&self.settings) {
            return None;
        }
        self.bullets.push(bullet);
        Some(id)
    }

    /// Fire a bullet from the ship along its current heading
    pub fn fire(&mut self) -> Option<u32> {
        let vel = heading_vector(self.player.kin.angle) * self.settings.bullet_speed;
        let id = self.spawn_bullet(self.player.kin.pos, vel);
        log::debug!("Fired bullet {:?} at frame {}", id, self.frame_count);
        id
    }

    /// Set the ship's rotation rate (degrees per tick)
    pub fn set_turn(&mut self, change_angle: f32) {
        self.player.kin.change_angle = change_angle;
    }

    /// Ensure collections are sorted by ID for deterministic iteration
    pub fn normalize_order(&mut self) {
        self.asteroids.sort_by_key(|a| a.id);
        self.bullets.sort_by_key(|b| b.id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn asteroid_at(pos: Vec2, vel: Vec2) -> Entity {
        Entity::new(
            1,
            EntityKind::Asteroid { tier: Tier::Large },
            Kinematics {
                pos,
                vel,
                ..Default::default()
            },
        )
    }

    #[test]
    fn test_tier_chain() {
        assert_eq!(Tier::Large.next(), Some(Tier::Small));
        assert_eq!(Tier::Small.next(), Some(Tier::Smaller));
        assert_eq!(Tier::Smaller.next(), Some(Tier::Tiny));
        assert_eq!(Tier::Tiny.next(), None);
        assert_eq!(Tier::Tiny.fragment_spread(), None);
        assert_eq!(Tier::from_size(0), None);
        assert_eq!(Tier::from_size(5), None);
    }

    #[test]
    fn test_new_session() {
        let state = GameState::new(Settings::default(), 7);
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.lives, 5);
        assert_eq!(state.score, 0);
        assert_eq!(state.life_icons.len(), 5);
        assert_eq!(state.asteroids.len(), 5);
        assert!(state.bullets.is_empty());
        assert_eq!(state.player.kin.pos, Vec2::new(540.0, 540.0));

        let s = &state.settings;
        for a in &state.asteroids {
            assert_eq!(a.tier(), Some(Tier::Large));
            assert!(a.kin.pos.x >= s.left_limit() && a.kin.pos.x < s.right_limit());
            assert!(a.kin.pos.y >= s.bottom_limit() && a.kin.pos.y < s.top_limit());
            assert!(a.kin.vel.x.abs() <= 1.0 && a.kin.vel.y.abs() <= 1.0);
            assert!(a.kin.change_angle.abs() <= 1.0);
            assert!(a.sprite < 4);
        }
    }

    #[test]
    fn test_player_id_is_reserved() {
        let mut state = GameState::new(Settings::default(), 11);
        assert_eq!(state.player.id, PLAYER_ID);
        state.fire();
        for _ in 0..3 {
            state.setup();
            state.fire();
        }
        assert_eq!(state.player.id, PLAYER_ID);
        let others = state
            .life_icons
            .iter()
            .chain(&state.asteroids)
            .chain(&state.bullets);
        assert!(others.map(|e| e.id).all(|id| id != PLAYER_ID));
    }

    #[test]
    fn test_life_icons_laid_out_left_to_right() {
        let state = GameState::new(Settings::default(), 7);
        let xs: Vec<f32> = state.life_icons.iter().map(|e| e.kin.pos.x).collect();
        assert!(xs.windows(2).all(|w| w[0] < w[1]));
        assert_relative_eq!(xs[0], 22.0);
    }

    #[test]
    fn test_asteroid_wraps_each_edge() {
        let s = Settings::default();

        let mut a = asteroid_at(Vec2::new(-199.5, 500.0), Vec2::new(-1.0, 0.0));
        a.advance(&s);
        assert_eq!(a.kin.pos.x, 1280.0);

        let mut a = asteroid_at(Vec2::new(1279.5, 500.0), Vec2::new(1.0, 0.0));
        a.advance(&s);
        assert_eq!(a.kin.pos.x, -200.0);

        let mut a = asteroid_at(Vec2::new(500.0, 1279.5), Vec2::new(0.0, 1.0));
        a.advance(&s);
        assert_eq!(a.kin.pos.y, -200.0);

        let mut a = asteroid_at(Vec2::new(500.0, -199.5), Vec2::new(0.0, -1.0));
        a.advance(&s);
        assert_eq!(a.kin.pos.y, 1280.0);
    }

    #[test]
    fn test_still_asteroid_stays_put() {
        let s = Settings::default();
        let mut a = asteroid_at(Vec2::new(300.0, 700.0), Vec2::ZERO);
        a.kin.change_angle = 0.5;
        a.advance(&s);
        assert_eq!(a.kin.pos, Vec2::new(300.0, 700.0));
        assert_relative_eq!(a.kin.angle, 0.5);
    }

    #[test]
    fn test_bullet_faces_travel_and_expires() {
        let s = Settings::default();
        let mut b = Entity::new(
            1,
            EntityKind::Bullet,
            Kinematics {
                pos: Vec2::new(1495.0, 500.0),
                vel: Vec2::new(10.0, 0.0),
                ..Default::default()
            },
        );
        assert!(!b.is_expired(&s));
        b.advance(&s);
        assert_relative_eq!(b.kin.angle, 0.0);
        assert_eq!(b.kin.pos.x, 1505.0);
        assert!(b.is_expired(&s));
    }

    #[test]
    fn test_player_moves_along_heading() {
        let s = Settings::default();
        let mut p = Entity::new(
            1,
            EntityKind::Player { speed: 2.0 },
            Kinematics {
                pos: Vec2::new(100.0, 100.0),
                vel: Vec2::new(50.0, 50.0),
                angle: 90.0,
                change_angle: 3.0,
            },
        );
        p.advance(&s);
        // Facing left at the start of the tick; vel is ignored
        assert_relative_eq!(p.kin.pos.x, 98.0, epsilon = 1e-4);
        assert_relative_eq!(p.kin.pos.y, 100.0, epsilon = 1e-4);
        assert_relative_eq!(p.kin.angle, 93.0);
    }

    #[test]
    fn test_player_angle_wraps() {
        let s = Settings::default();
        let mut p = Entity::new(
            1,
            EntityKind::Player { speed: 0.0 },
            Kinematics {
                angle: 358.5,
                change_angle: 3.0,
                ..Default::default()
            },
        );
        p.advance(&s);
        assert_relative_eq!(p.kin.angle, 1.5, epsilon = 1e-4);
    }

    #[test]
    fn test_fire_from_rest() {
        let mut state = GameState::new(Settings::default(), 1);
        state.player.kin.pos = Vec2::new(540.0, 540.0);
        state.player.kin.angle = 0.0;
        let id = state.fire().unwrap();
        let bullet = state.bullets.iter().find(|b| b.id == id).unwrap();
        assert_relative_eq!(bullet.kin.vel.x, 0.0, epsilon = 1e-5);
        assert_relative_eq!(bullet.kin.vel.y, 10.0, epsilon = 1e-5);
        // Already one step past the muzzle
        assert_relative_eq!(bullet.kin.pos.y, 550.0, epsilon = 1e-4);
        assert_relative_eq!(bullet.kin.angle, 90.0, epsilon = 1e-4);
    }

    #[test]
    fn test_bullet_spawned_outside_is_dropped() {
        let mut state = GameState::new(Settings::default(), 1);
        assert!(state.spawn_bullet(Vec2::new(1495.0, 0.0), Vec2::new(10.0, 0.0)).is_none());
        assert!(state.bullets.is_empty());
    }

    #[test]
    fn test_same_seed_same_field() {
        let a = GameState::new(Settings::default(), 42);
        let b = GameState::new(Settings::default(), 42);
        assert_eq!(a.asteroids, b.asteroids);
    }

    #[test]
    fn test_setup_resets() {
        let mut state = GameState::new(Settings::default(), 3);
        state.score = 9;
        state.lives = 0;
        state.phase = GamePhase::GameOver;
        state.life_icons.clear();
        state.asteroids.clear();
        state.fire();
        state.frame_count = 100;

        state.setup();
        assert_eq!(state.player.id, PLAYER_ID);
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.score, 0);
        assert_eq!(state.lives, 5);
        assert_eq!(state.frame_count, 0);
        assert_eq!(state.life_icons.len(), 5);
        assert_eq!(state.asteroids.len(), 5);
        assert!(state.bullets.is_empty());
    }

    mod props {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #![proptest_config(ProptestConfig::with_cases(256))]

            /// Leaving through any edge lands exactly on the opposite limit
            #[test]
            fn prop_wrap_laws(
                x in -200.0f32..=1280.0,
                y in -200.0f32..=1280.0,
                vx in -2.0f32..2.0,
                vy in -2.0f32..2.0,
            ) {
                let s = Settings::default();
                let mut a = asteroid_at(Vec2::new(x, y), Vec2::new(vx, vy));
                let raw = Vec2::new(x, y) + Vec2::new(vx, vy);
                a.advance(&s);

                if raw.x < s.left_limit() {
                    prop_assert_eq!(a.kin.pos.x, s.right_limit());
                } else if raw.x > s.right_limit() {
                    prop_assert_eq!(a.kin.pos.x, s.left_limit());
                } else {
                    prop_assert_eq!(a.kin.pos.x, raw.x);
                }
                if raw.y > s.top_limit() {
                    prop_assert_eq!(a.kin.pos.y, s.bottom_limit());
                } else if raw.y < s.bottom_limit() {
                    prop_assert_eq!(a.kin.pos.y, s.top_limit());
                } else {
                    prop_assert_eq!(a.kin.pos.y, raw.y);
                }
            }

            /// A still asteroid inside the field never moves
            #[test]
            fn prop_still_asteroid_fixed(x in -199.0f32..1279.0, y in -199.0f32..1279.0) {
                let s = Settings::default();
                let mut a = asteroid_at(Vec2::new(x, y), Vec2::ZERO);
                a.advance(&s);
                prop_assert_eq!(a.kin.pos, Vec2::new(x, y));
            }

            /// Bullets expire exactly outside the bullet rectangle
            #[test]
            fn prop_bullet_expiry(x in -300.0f32..1700.0, y in -300.0f32..1300.0) {
                let s = Settings::default();
                let b = Entity::new(
                    1,
                    EntityKind::Bullet,
                    Kinematics { pos: Vec2::new(x, y), ..Default::default() },
                );
                let outside = x < -100.0 || x > 1500.0 || y > 1100.0 || y < -100.0;
                prop_assert_eq!(b.is_expired(&s), outside);
            }
        }
    }
}
