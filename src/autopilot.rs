//! Demo pilot for attract mode and the headless binary
//!
//! The pilot sits on the host side of the input seam: it looks at the session
//! and answers with the key events a player would send, which the host feeds
//! through its `KeyMap` like any other keyboard input.

use crate::input::KeyEvent;
use crate::normalize_degrees;
use crate::sim::GameState;

/// Host key names the pilot presses. They match the default bindings.
const LEFT_KEY: &str = "left";
const RIGHT_KEY: &str = "right";
const FIRE_KEY: &str = "space";

/// Aim error (degrees) below which the pilot opens fire
const FIRE_CONE: f32 = 15.0;

/// Swing toward the nearest asteroid and fire on a fixed cadence once roughly
/// lined up
pub fn steer(state: &GameState) -> Vec<KeyEvent> {
    let mut events = Vec::new();
    if state.game_over() {
        return events;
    }

    let ship = &state.player.kin;
    let target = state.asteroids.iter().min_by(|a, b| {
        let da = a.kin.pos.distance_squared(ship.pos);
        let db = b.kin.pos.distance_squared(ship.pos);
        da.total_cmp(&db)
    });
    let Some(target) = target else {
        if ship.change_angle != 0.0 {
            events.push(KeyEvent::Release(LEFT_KEY.into()));
        }
        return events;
    };

    let to_target = target.kin.pos - ship.pos;
    let desired = normalize_degrees((-to_target.x).atan2(to_target.y).to_degrees());
    let error = shortest_turn(ship.angle, desired);
    let turn_speed = state.settings.turn_speed;

    if error > turn_speed {
        if ship.change_angle <= 0.0 {
            events.push(KeyEvent::Press(LEFT_KEY.into()));
        }
    } else if error < -turn_speed {
        if ship.change_angle >= 0.0 {
            events.push(KeyEvent::Press(RIGHT_KEY.into()));
        }
    } else if ship.change_angle != 0.0 {
        events.push(KeyEvent::Release(LEFT_KEY.into()));
    }

    let interval = u64::from(state.settings.autopilot_fire_interval.max(1));
    if error.abs() < FIRE_CONE && state.frame_count % interval == 0 {
        events.push(KeyEvent::Press(FIRE_KEY.into()));
        events.push(KeyEvent::Release(FIRE_KEY.into()));
    }
    events
}

/// Signed rotation from `from` to `to`, in (-180, 180]
fn shortest_turn(from: f32, to: f32) -> f32 {
    let diff = normalize_degrees(to - from);
    if diff > 180.0 { diff - 360.0 } else { diff }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::KeyMap;
    use crate::settings::Settings;
    use crate::sim::{GameEvent, Tier, TickInput, tick};
    use approx::assert_relative_eq;
    use glam::Vec2;

    /// Let the pilot press keys, then advance one frame
    fn fly(state: &mut GameState, map: &KeyMap) {
        for event in steer(state) {
            state.handle_key_event(map, &event);
        }
        tick(state, &TickInput::default());
    }

    fn lone_asteroid(seed: u64, pos: Vec2) -> GameState {
        let mut state = GameState::new(Settings::default(), seed);
        state.asteroids.clear();
        state.spawn_asteroid(pos, Vec2::ZERO, 0.0, Tier::Large);
        state
    }

    #[test]
    fn test_shortest_turn() {
        assert_relative_eq!(shortest_turn(10.0, 20.0), 10.0);
        assert_relative_eq!(shortest_turn(350.0, 10.0), 20.0);
        assert_relative_eq!(shortest_turn(10.0, 350.0), -20.0);
        assert_relative_eq!(shortest_turn(0.0, 180.0), 180.0);
    }

    #[test]
    fn test_turns_toward_target() {
        let mut state = lone_asteroid(3, Vec2::ZERO);
        let ship = state.player.kin.pos;
        state.asteroids[0].kin.pos = ship + Vec2::new(-300.0, 0.0);

        let events = steer(&state);
        assert_eq!(events, vec![KeyEvent::Press("left".into())]);

        // Already turning the right way: no repeat press
        state.handle_key_event(&KeyMap::default(), &events[0]);
        assert_eq!(state.player.kin.change_angle, 3.0);
        assert!(steer(&state).is_empty());

        state.asteroids[0].kin.pos = ship + Vec2::new(300.0, 0.0);
        assert_eq!(steer(&state), vec![KeyEvent::Press("right".into())]);
    }

    #[test]
    fn test_fires_when_lined_up() {
        let mut state = lone_asteroid(4, Vec2::ZERO);
        state.asteroids[0].kin.pos = state.player.kin.pos + Vec2::new(0.0, 300.0);
        state.player.kin.change_angle = 3.0;
        state.frame_count = 40;

        let events = steer(&state);
        assert_eq!(
            events,
            vec![
                KeyEvent::Release("left".into()),
                KeyEvent::Press("space".into()),
                KeyEvent::Release("space".into()),
            ]
        );

        state.frame_count = 41;
        assert_eq!(steer(&state), vec![KeyEvent::Release("left".into())]);
    }

    #[test]
    fn test_rebound_keys_disarm_pilot() {
        let mut map = KeyMap::default();
        map.bind("space", crate::input::Key::Other);
        let mut state = lone_asteroid(5, Vec2::ZERO);
        state.asteroids[0].kin.pos = state.player.kin.pos + Vec2::new(0.0, 300.0);
        for _ in 0..100 {
            fly(&mut state, &map);
        }
        assert_eq!(state.score, 0);
        assert!(state.bullets.is_empty());
    }

    #[test]
    fn test_determinism() {
        let map = KeyMap::default();
        let mut a = GameState::new(Settings::default(), 99999);
        let mut b = GameState::new(Settings::default(), 99999);
        for _ in 0..600 {
            fly(&mut a, &map);
            fly(&mut b, &map);
        }
        assert_eq!(a.score, b.score);
        assert_eq!(a.lives, b.lives);
        assert_eq!(a.asteroids, b.asteroids);
        assert_eq!(a.bullets, b.bullets);
        assert_eq!(a.player, b.player);
    }

    #[test]
    fn test_long_run_invariants() {
        let map = KeyMap::default();
        let mut state = GameState::new(Settings::default(), 2024);
        for _ in 0..3000 {
            let score_before = state.score;
            fly(&mut state, &map);
            let splits = state
                .events
                .iter()
                .filter(|e| matches!(e, GameEvent::AsteroidSplit { .. }))
                .count() as u32;
            assert_eq!(state.score, score_before + splits);
            assert_eq!(state.life_icons.len(), state.lives as usize);
            let s = &state.settings;
            for b in &state.bullets {
                assert!(s.bullet_bounds.contains(b.kin.pos));
            }
            for a in &state.asteroids {
                assert!(a.kin.pos.x >= s.left_limit() && a.kin.pos.x <= s.right_limit());
                assert!(a.kin.pos.y >= s.bottom_limit() && a.kin.pos.y <= s.top_limit());
            }
        }
    }
}
