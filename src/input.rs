//! Keyboard bindings
//!
//! The host window reports key names; `KeyMap` turns them into game keys and
//! the handlers on `GameState` apply them between ticks.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::sim::GameState;

/// A key the game reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Key {
    Fire,
    TurnLeft,
    TurnRight,
    Other,
}

/// A raw key event as the host window reports it
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyEvent {
    Press(String),
    Release(String),
}

/// Host key name to game key
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KeyMap {
    bindings: HashMap<String, Key>,
}

impl Default for KeyMap {
    fn default() -> Self {
        let bindings = [
            ("space", Key::Fire),
            ("left", Key::TurnLeft),
            ("a", Key::TurnLeft),
            ("right", Key::TurnRight),
            ("d", Key::TurnRight),
        ]
        .into_iter()
        .map(|(name, key)| (name.to_string(), key))
        .collect();
        Self { bindings }
    }
}

impl KeyMap {
    /// Case-insensitive lookup; unbound names map to `Key::Other`
    pub fn lookup(&self, name: &str) -> Key {
        self.bindings
            .get(&name.to_lowercase())
            .copied()
            .unwrap_or(Key::Other)
    }

    /// Bind (or rebind) a host key name
    pub fn bind(&mut self, name: &str, key: Key) {
        self.bindings.insert(name.to_lowercase(), key);
    }
}

impl GameState {
    /// Key-down edge. Ignored once the game is over.
    pub fn on_key_press(&mut self, key: Key) {
        if self.game_over() {
            return;
        }
        let turn_speed = self.settings.turn_speed;
        match key {
            Key::Fire => {
                self.fire();
            }
            Key::TurnLeft => self.set_turn(turn_speed),
            Key::TurnRight => self.set_turn(-turn_speed),
            Key::Other => {}
        }
    }

    /// Resolve a host key event through `map` and apply it
    pub fn handle_key_event(&mut self, map: &KeyMap, event: &KeyEvent) {
        match event {
            KeyEvent::Press(name) => self.on_key_press(map.lookup(name)),
            KeyEvent::Release(name) => self.on_key_release(map.lookup(name)),
        }
    }

    /// Key-up edge. Releasing either turn key stops the rotation.
    pub fn on_key_release(&mut self, key: Key) {
        if self.game_over() {
            return;
        }
        if matches!(key, Key::TurnLeft | Key::TurnRight) {
            self.set_turn(0.0);
        }
    }
}
