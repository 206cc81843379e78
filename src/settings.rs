//! Game settings and balance
//!
//! Loaded once by the host (usually from a JSON file) and handed to the
//! session. Every field has a default, so partial JSON is fine.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::{GameError, GameResult};

/// Tunable game parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Play field ===
    pub width: f32,
    pub height: f32,
    /// Fraction of the field height occupied by the brick grid
    pub level_height_fraction: f32,
    pub starting_lives: u32,

    // === Paddle ===
    pub paddle_size: Vec2,
    /// Paddle speed (pixels/s)
    pub paddle_speed: f32,
    /// Horizontal deflection on off-center paddle hits
    pub paddle_strength: f32,

    // === Ball ===
    pub ball_radius: f32,
    pub ball_velocity: Vec2,

    // === Power-ups ===
    pub powerup_size: Vec2,
    pub powerup_velocity: Vec2,
    pub speed_multiplier: f32,
    pub pad_size_increase: f32,
    /// 1-in-N spawn odds for every type except Confuse
    pub spawn_odds: u32,
    /// 1-in-N spawn odds for Confuse
    pub confuse_spawn_odds: u32,

    // === Effects ===
    pub shake_duration: f32,
    pub max_particles: usize,
    pub particles_per_frame: usize,

    // === Accessibility ===
    /// Reduced motion (no screen shake)
    pub reduced_motion: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            width: FIELD_WIDTH,
            height: FIELD_HEIGHT,
            level_height_fraction: LEVEL_HEIGHT_FRACTION,
            starting_lives: STARTING_LIVES,

            paddle_size: PLAYER_SIZE,
            paddle_speed: PLAYER_VELOCITY,
            paddle_strength: PADDLE_STRENGTH,

            ball_radius: BALL_RADIUS,
            ball_velocity: INITIAL_BALL_VELOCITY,

            powerup_size: POWERUP_SIZE,
            powerup_velocity: POWERUP_VELOCITY,
            speed_multiplier: SPEED_MULTIPLIER,
            pad_size_increase: PAD_SIZE_INCREASE,
            spawn_odds: 75,
            confuse_spawn_odds: 15,

            shake_duration: SHAKE_DURATION,
            max_particles: MAX_PARTICLES,
            particles_per_frame: PARTICLES_PER_FRAME,

            reduced_motion: false,
        }
    }
}

impl Settings {
    /// Parse settings from JSON, filling missing fields with defaults
    pub fn from_json(json: &str) -> GameResult<Self> {
        let settings: Settings = serde_json::from_str(json)?;
        settings.validate()?;
        log::info!(
            "Loaded settings: field {}x{}, {} lives",
            settings.width,
            settings.height,
            settings.starting_lives
        );
        Ok(settings)
    }

    /// Reject geometry the simulation cannot work with: field, paddle,
    /// ball and power-up extents must all be positive.
    pub fn validate(&self) -> GameResult<()> {
        let checks = [
            ("width", self.width),
            ("height", self.height),
            ("level_height_fraction", self.level_height_fraction),
            ("paddle_size.x", self.paddle_size.x),
            ("paddle_size.y", self.paddle_size.y),
            ("ball_radius", self.ball_radius),
            ("powerup_size.x", self.powerup_size.x),
            ("powerup_size.y", self.powerup_size.y),
        ];
        for (field, value) in checks {
            if !is_positive(value) {
                log::warn!("Rejected setting {} = {}", field, value);
                return Err(GameError::InvalidSettings(field));
            }
        }
        if self.level_height_fraction > 1.0 {
            return Err(GameError::InvalidSettings("level_height_fraction"));
        }
        Ok(())
    }

    pub fn to_json(&self) -> GameResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Height of the area the brick grid is scaled into
    pub fn level_height(&self) -> f32 {
        self.height * self.level_height_fraction
    }

    /// Effective screen shake (respects reduced_motion)
    pub fn effective_screen_shake(&self) -> bool {
        !self.reduced_motion
    }

    /// Paddle position at the bottom center of the field
    pub fn paddle_start(&self) -> Vec2 {
        Vec2::new(
            self.width / 2.0 - self.paddle_size.x / 2.0,
            self.height - self.paddle_size.y,
        )
    }
}

fn is_positive(value: f32) -> bool {
    value.is_finite() && value > 0.0
}
