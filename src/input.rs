//! Input intent table
//!
//! Decouples device events (keys, buttons, touch) from the simulation. Hosts
//! translate whatever they receive into [`Action`] presses and releases; the
//! session reads one [`TickInput`] snapshot per tick.

use serde::{Deserialize, Serialize};

use crate::sim::{Rotation, TickInput};

/// Device-independent game controls
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Action {
    RotateLeft,
    RotateRight,
    Thrust,
    Fire,
}

impl Action {
    pub fn as_str(&self) -> &'static str {
        match self {
            Action::RotateLeft => "rotate_left",
            Action::RotateRight => "rotate_right",
            Action::Thrust => "thrust",
            Action::Fire => "fire",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "rotate_left" | "left" => Some(Action::RotateLeft),
            "rotate_right" | "right" => Some(Action::RotateRight),
            "thrust" | "up" => Some(Action::Thrust),
            "fire" | "shoot" | "space" => Some(Action::Fire),
            _ => None,
        }
    }
}

/// Current intent, mutated by the host between ticks
#[derive(Debug, Clone, Default)]
pub struct InputState {
    rotate: Rotation,
    thrust: bool,
    released_before_press: bool,
    fire_pressed: bool,
    fire_released: bool,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_rotate(&mut self, rotate: Rotation) {
        self.rotate = rotate;
    }

    pub fn set_thrust(&mut self, thrust: bool) {
        self.thrust = thrust;
    }

    /// Edge-triggered shot. Only one shot per press: the ship's latch stays
    /// down until [`InputState::release_fire`].
    pub fn request_fire(&mut self) {
        self.fire_pressed = true;
    }

    /// A release that arrives before this tick's press re-arms ahead of it
    pub fn release_fire(&mut self) {
        if self.fire_pressed {
            self.fire_released = true;
        } else {
            self.released_before_press = true;
        }
    }

    pub fn press(&mut self, action: Action) {
        match action {
            Action::RotateLeft => self.set_rotate(Rotation::Left),
            Action::RotateRight => self.set_rotate(Rotation::Right),
            Action::Thrust => self.set_thrust(true),
            Action::Fire => self.request_fire(),
        }
    }

    /// Releasing either rotate control stops rotation
    pub fn release(&mut self, action: Action) {
        match action {
            Action::RotateLeft | Action::RotateRight => self.set_rotate(Rotation::None),
            Action::Thrust => self.set_thrust(false),
            Action::Fire => self.release_fire(),
        }
    }

    /// Snapshot for the coming tick; fire edges are consumed
    pub fn take(&mut self) -> TickInput {
        let input = self.peek();
        self.released_before_press = false;
        self.fire_pressed = false;
        self.fire_released = false;
        input
    }

    /// Snapshot without consuming edges
    pub fn peek(&self) -> TickInput {
        TickInput {
            rotate: self.rotate,
            thrust: self.thrust,
            release_before_fire: self.released_before_press,
            fire: self.fire_pressed,
            release_fire: self.fire_released,
        }
    }

    /// Drop everything (new game)
    pub fn clear(&mut self) {
        *self = Self::default();
    }
}
