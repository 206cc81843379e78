//! Game state and core simulation types
//!
//! `GameState` is the session context: it owns the paddle, ball, levels and
//! power-ups, and is passed explicitly to `tick` and `process_input`.

use glam::{Vec2, Vec3};
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::collision::Aabb;
use super::level::Level;
use super::particles::ParticleGenerator;
use super::powerup::PowerUp;
use crate::consts::WHITE;
use crate::error::{GameError, GameResult};
use crate::settings::Settings;

/// Current phase of the game flow
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GamePhase {
    /// Level select, ball waits on the paddle
    #[default]
    Menu,
    /// Active gameplay
    Active,
    /// Level cleared, waiting for confirm to replay
    Win,
}

/// Shared physical record: bricks and the paddle are bare bodies, the ball
/// and power-ups embed one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Body {
    /// Top-left corner
    pub pos: Vec2,
    pub size: Vec2,
    pub vel: Vec2,
    pub color: Vec3,
    pub destroyed: bool,
    /// Indestructible (bricks only)
    pub solid: bool,
}

impl Body {
    pub fn new(pos: Vec2, size: Vec2) -> Self {
        Self {
            pos,
            size,
            vel: Vec2::ZERO,
            color: WHITE,
            destroyed: false,
            solid: false,
        }
    }

    pub fn with_color(mut self, color: Vec3) -> Self {
        self.color = color;
        self
    }

    pub fn with_velocity(mut self, vel: Vec2) -> Self {
        self.vel = vel;
        self
    }

    #[inline]
    pub fn aabb(&self) -> Aabb {
        Aabb::new(self.pos, self.size)
    }
}

/// The ball
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ball {
    /// `body.pos` is the top-left of the ball's 2r x 2r square
    pub body: Body,
    pub radius: f32,
    /// Riding on the paddle, waiting for launch
    pub stuck: bool,
    /// Sticky power-up: attach on the next paddle hit
    pub sticky: bool,
    /// Pass-through power-up: destroy bricks without bouncing
    pub pass_through: bool,
}

impl Ball {
    pub fn new(pos: Vec2, radius: f32, vel: Vec2) -> Self {
        Self {
            body: Body::new(pos, Vec2::splat(radius * 2.0)).with_velocity(vel),
            radius,
            stuck: true,
            sticky: false,
            pass_through: false,
        }
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        self.body.pos + Vec2::splat(self.radius)
    }

    #[inline]
    pub fn speed(&self) -> f32 {
        self.body.vel.length()
    }

    /// Advance a free ball and bounce it off the left, right and top edges.
    /// The bottom edge is open.
    pub fn advance(&mut self, dt: f32, field_width: f32) {
        if self.stuck {
            return;
        }
        let body = &mut self.body;
        body.pos += body.vel * dt;

        if body.pos.x <= 0.0 {
            body.vel.x = -body.vel.x;
            body.pos.x = 0.0;
        } else if body.pos.x + body.size.x >= field_width {
            body.vel.x = -body.vel.x;
            body.pos.x = field_width - body.size.x;
        }
        if body.pos.y <= 0.0 {
            body.vel.y = -body.vel.y;
            body.pos.y = 0.0;
        }
    }

    /// Put the ball back on the paddle with its power-up flags cleared
    pub fn reset(&mut self, pos: Vec2, vel: Vec2) {
        self.body.pos = pos;
        self.body.vel = vel;
        self.body.color = WHITE;
        self.stuck = true;
        self.sticky = false;
        self.pass_through = false;
    }
}

/// Post-processing flags read by the host renderer
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Effects {
    pub shake: bool,
    pub confuse: bool,
    pub chaos: bool,
}

/// Complete session state
#[derive(Debug, Clone)]
pub struct GameState {
    pub settings: Settings,
    /// Run seed for reproducibility
    pub seed: u64,
    pub rng: Pcg32,
    pub phase: GamePhase,
    /// Loaded levels; `level` indexes into it
    pub levels: Vec<Level>,
    pub level: usize,
    pub lives: u32,
    pub player: Body,
    pub ball: Ball,
    /// Falling and active power-ups
    pub powerups: Vec<PowerUp>,
    pub particles: ParticleGenerator,
    pub effects: Effects,
    /// Remaining screen-shake time (seconds)
    pub shake_time: f32,
    /// Simulation frame counter
    pub frames: u64,
}

impl GameState {
    /// Create a session from level layouts (see `Level::from_layout`).
    pub fn new<S: AsRef<str>>(settings: Settings, layouts: &[S], seed: u64) -> GameResult<Self> {
        settings.validate()?;
        if layouts.is_empty() {
            return Err(GameError::NoLevels);
        }
        let mut levels = Vec::with_capacity(layouts.len());
        for layout in layouts {
            levels.push(Level::from_layout(
                layout.as_ref(),
                settings.width,
                settings.level_height(),
            )?);
        }
        log::info!("Loaded {} levels, seed {}", levels.len(), seed);

        let player = Body::new(settings.paddle_start(), settings.paddle_size);
        let ball = Ball::new(
            Self::ball_start(&settings, player.pos),
            settings.ball_radius,
            settings.ball_velocity,
        );

        Ok(Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            phase: GamePhase::Menu,
            levels,
            level: 0,
            lives: settings.starting_lives,
            player,
            ball,
            powerups: Vec::new(),
            particles: ParticleGenerator::new(settings.max_particles),
            effects: Effects::default(),
            shake_time: 0.0,
            frames: 0,
            settings,
        })
    }

    /// Ball position resting on top of the paddle's center
    fn ball_start(settings: &Settings, paddle_pos: Vec2) -> Vec2 {
        paddle_pos
            + Vec2::new(
                settings.paddle_size.x / 2.0 - settings.ball_radius,
                -settings.ball_radius * 2.0,
            )
    }

    pub fn current_level(&self) -> &Level {
        &self.levels[self.level]
    }

    pub fn current_level_mut(&mut self) -> &mut Level {
        &mut self.levels[self.level]
    }

    /// Select a level programmatically. Out-of-range indices are rejected.
    pub fn select_level(&mut self, index: usize) -> GameResult<()> {
        if index >= self.levels.len() {
            log::warn!("Rejected level index {} ({} loaded)", index, self.levels.len());
            return Err(GameError::LevelIndexOutOfRange {
                index,
                count: self.levels.len(),
            });
        }
        self.level = index;
        Ok(())
    }

    /// Step the menu selection forward or back, wrapping around
    pub fn cycle_level(&mut self, forward: bool) {
        let count = self.levels.len();
        self.level = if forward {
            (self.level + 1) % count
        } else {
            (self.level + count - 1) % count
        };
        log::info!("Selected level {}", self.level + 1);
    }

    /// Rebuild the current level's bricks and restore lives
    pub fn reset_level(&mut self) -> GameResult<()> {
        let (width, height) = (self.settings.width, self.settings.level_height());
        self.current_level_mut().reload(width, height)?;
        self.lives = self.settings.starting_lives;
        log::info!("Level {} reset", self.level + 1);
        Ok(())
    }

    /// Paddle and ball back to their defaults, all power-up effects off.
    /// Idempotent.
    pub fn reset_player(&mut self) {
        self.player.size = self.settings.paddle_size;
        self.player.pos = self.settings.paddle_start();
        self.player.color = WHITE;
        let ball_pos = Self::ball_start(&self.settings, self.player.pos);
        self.ball.reset(ball_pos, self.settings.ball_velocity);
        self.effects.confuse = false;
        self.effects.chaos = false;
        // Running effects were just reverted; falling ones stay catchable
        self.powerups.retain(|p| !p.activated);
    }
}
