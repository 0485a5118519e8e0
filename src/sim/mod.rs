//! Simulation module
//!
//! All gameplay logic lives here. This module must stay free of rendering,
//! input devices and storage:
//! - Fixed timestep only
//! - Randomness only through an injected `RandomSource`
//! - Stable iteration order (collection order is spawn order)

pub mod belt;
pub mod collision;
pub mod state;
pub mod tick;

pub use belt::{MAX_SPAWN_ATTEMPTS, belt_size, generate_belt, sample_spawn_point};
pub use collision::{circles_overlap, point_in_circle, projectile_hit, ship_hit};
pub use state::{Asteroid, AsteroidTier, GameEvent, Projectile, Ship};
pub use tick::{Rotation, TickInput, World, destroy_asteroid, tick};
