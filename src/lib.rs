//! Breakout - simulation core for a 2D brick-breaker
//!
//! Core modules:
//! - `sim`: Deterministic simulation (collisions, power-ups, game flow)
//! - `input`: Key-state table with edge-trigger latches
//! - `render`: Draw commands handed to the host renderer
//! - `settings`: Data-driven game balance
//! - `error`: Level, settings and timestep errors reported to the host

pub mod error;
pub mod input;
pub mod render;
pub mod settings;
pub mod sim;

pub use error::{GameError, GameResult, LevelLoadError};
pub use input::{Key, KeyState};
pub use settings::Settings;

/// Game configuration constants
pub mod consts {
    use glam::{Vec2, Vec3};

    /// Fixed simulation timestep used by the native host (60 Hz)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;

    /// Play-field dimensions
    pub const FIELD_WIDTH: f32 = 800.0;
    pub const FIELD_HEIGHT: f32 = 600.0;
    /// Fraction of the field height the brick grid occupies
    pub const LEVEL_HEIGHT_FRACTION: f32 = 0.5;

    pub const STARTING_LIVES: u32 = 3;

    /// Paddle defaults
    pub const PLAYER_SIZE: Vec2 = Vec2::new(100.0, 20.0);
    pub const PLAYER_VELOCITY: f32 = 500.0;
    /// Horizontal deflection strength when the ball hits off-center
    pub const PADDLE_STRENGTH: f32 = 2.0;

    /// Ball defaults
    pub const BALL_RADIUS: f32 = 12.5;
    pub const INITIAL_BALL_VELOCITY: Vec2 = Vec2::new(100.0, -350.0);

    /// Power-up defaults
    pub const POWERUP_SIZE: Vec2 = Vec2::new(60.0, 20.0);
    pub const POWERUP_VELOCITY: Vec2 = Vec2::new(0.0, 150.0);
    pub const SPEED_MULTIPLIER: f32 = 1.2;
    pub const PAD_SIZE_INCREASE: f32 = 50.0;

    /// Screen shake after a solid brick hit (seconds)
    pub const SHAKE_DURATION: f32 = 0.05;

    /// Particle trail
    pub const MAX_PARTICLES: usize = 500;
    pub const PARTICLES_PER_FRAME: usize = 2;

    pub const WHITE: Vec3 = Vec3::ONE;
}
