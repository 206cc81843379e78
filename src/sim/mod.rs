//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Elapsed time comes from the host
//! - Seeded RNG only
//! - Stable iteration order (bricks and power-ups in insertion order)
//! - No rendering or platform dependencies

pub mod collision;
pub mod flow;
pub mod level;
pub mod particles;
pub mod powerup;
pub mod state;
pub mod tick;

pub use collision::{Aabb, CollisionInfo, Direction, check_aabb, check_circle_aabb, vector_direction};
pub use flow::{process_input, step};
pub use level::Level;
pub use particles::{Particle, ParticleGenerator};
pub use powerup::{PowerUp, PowerUpKind};
pub use state::{Ball, Body, Effects, GamePhase, GameState};
pub use tick::{paddle_bounce, resolve_collisions, tick};
