//! Power-up spawning and lifecycle
//!
//! A power-up falls from a destroyed brick. Catching it with the paddle
//! applies its effect and starts its countdown; when the countdown ends the
//! effect is reverted unless another active power-up of the same kind is
//! still running. An entry is dropped only once it is both destroyed (caught
//! or fallen off-screen) and no longer active.

use glam::{Vec2, Vec3};
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::collision::check_aabb;
use super::state::{Body, GameState};
use crate::consts::WHITE;

/// Power-up types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PowerUpKind {
    Speed,
    Sticky,
    PassThrough,
    PadSizeIncrease,
    Confuse,
    Chaos,
}

impl PowerUpKind {
    /// Spawn roll order
    pub const ALL: [PowerUpKind; 6] = [
        PowerUpKind::Speed,
        PowerUpKind::Sticky,
        PowerUpKind::PassThrough,
        PowerUpKind::PadSizeIncrease,
        PowerUpKind::Confuse,
        PowerUpKind::Chaos,
    ];

    /// Effect duration in seconds (0 = one-shot)
    pub fn duration(self) -> f32 {
        match self {
            PowerUpKind::Speed | PowerUpKind::PadSizeIncrease => 0.0,
            PowerUpKind::Sticky => 20.0,
            PowerUpKind::PassThrough => 10.0,
            PowerUpKind::Confuse | PowerUpKind::Chaos => 15.0,
        }
    }

    pub fn color(self) -> Vec3 {
        match self {
            PowerUpKind::Speed => Vec3::new(0.5, 0.5, 1.0),
            PowerUpKind::Sticky => Vec3::new(1.0, 0.5, 1.0),
            PowerUpKind::PassThrough => Vec3::new(0.5, 1.0, 0.5),
            PowerUpKind::PadSizeIncrease => Vec3::new(1.0, 0.6, 0.4),
            PowerUpKind::Confuse => Vec3::new(1.0, 0.3, 0.3),
            PowerUpKind::Chaos => Vec3::new(0.9, 0.25, 0.25),
        }
    }

    /// Texture identifier resolved by the host
    pub fn texture(self) -> &'static str {
        match self {
            PowerUpKind::Speed => "powerup_speed",
            PowerUpKind::Sticky => "powerup_sticky",
            PowerUpKind::PassThrough => "powerup_passthrough",
            PowerUpKind::PadSizeIncrease => "powerup_increase",
            PowerUpKind::Confuse => "powerup_confuse",
            PowerUpKind::Chaos => "powerup_chaos",
        }
    }
}

/// Sticky paddle tint
pub const STICKY_TINT: Vec3 = Vec3::new(1.0, 0.5, 1.0);
/// Pass-through ball tint
pub const PASS_THROUGH_TINT: Vec3 = Vec3::new(1.0, 0.5, 0.5);

/// A power-up entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PowerUp {
    pub body: Body,
    pub kind: PowerUpKind,
    /// Remaining effect time (seconds)
    pub duration: f32,
    pub activated: bool,
}

impl PowerUp {
    pub fn new(kind: PowerUpKind, pos: Vec2, size: Vec2, vel: Vec2) -> Self {
        Self {
            body: Body::new(pos, size)
                .with_color(kind.color())
                .with_velocity(vel),
            kind,
            duration: kind.duration(),
            activated: false,
        }
    }
}

/// 1-in-`odds` roll
fn should_spawn<R: Rng>(rng: &mut R, odds: u32) -> bool {
    odds > 0 && rng.random_range(0..odds) == 0
}

/// True if any currently activated power-up has this kind
pub fn is_other_active(powerups: &[PowerUp], kind: PowerUpKind) -> bool {
    powerups.iter().any(|p| p.activated && p.kind == kind)
}

impl GameState {
    /// Roll every power-up kind independently for a destroyed brick at `pos`.
    /// Returns how many were spawned.
    pub fn spawn_powerups(&mut self, pos: Vec2) -> usize {
        let mut spawned = 0;
        for kind in PowerUpKind::ALL {
            let odds = match kind {
                PowerUpKind::Confuse => self.settings.confuse_spawn_odds,
                _ => self.settings.spawn_odds,
            };
            if should_spawn(&mut self.rng, odds) {
                log::debug!("Spawned {:?} at ({:.0}, {:.0})", kind, pos.x, pos.y);
                self.powerups.push(PowerUp::new(
                    kind,
                    pos,
                    self.settings.powerup_size,
                    self.settings.powerup_velocity,
                ));
                spawned += 1;
            }
        }
        spawned
    }

    /// Apply a caught power-up's effect
    pub fn activate_powerup(&mut self, kind: PowerUpKind) {
        log::debug!("Activated {:?}", kind);
        match kind {
            PowerUpKind::Speed => {
                self.ball.body.vel *= self.settings.speed_multiplier;
            }
            PowerUpKind::Sticky => {
                self.ball.sticky = true;
                self.player.color = STICKY_TINT;
            }
            PowerUpKind::PassThrough => {
                self.ball.pass_through = true;
                self.ball.body.color = PASS_THROUGH_TINT;
            }
            PowerUpKind::PadSizeIncrease => {
                self.player.size.x += self.settings.pad_size_increase;
            }
            // Only one screen distortion at a time
            PowerUpKind::Confuse => {
                if !self.effects.chaos {
                    self.effects.confuse = true;
                }
            }
            PowerUpKind::Chaos => {
                if !self.effects.confuse {
                    self.effects.chaos = true;
                }
            }
        }
    }

    /// Revert an expired power-up's effect. One-shot kinds have nothing to
    /// revert.
    fn deactivate_powerup(&mut self, kind: PowerUpKind) {
        if is_other_active(&self.powerups, kind) {
            return;
        }
        log::debug!("Expired {:?}", kind);
        match kind {
            PowerUpKind::Speed | PowerUpKind::PadSizeIncrease => {}
            PowerUpKind::Sticky => {
                self.ball.sticky = false;
                self.player.color = WHITE;
            }
            PowerUpKind::PassThrough => {
                self.ball.pass_through = false;
                self.ball.body.color = WHITE;
            }
            PowerUpKind::Confuse => self.effects.confuse = false,
            PowerUpKind::Chaos => self.effects.chaos = false,
        }
    }

    /// Catch falling power-ups with the paddle and retire missed ones
    pub fn collect_powerups(&mut self) {
        let paddle = self.player.aabb();
        for i in 0..self.powerups.len() {
            let powerup = &mut self.powerups[i];
            if powerup.body.destroyed {
                continue;
            }
            if powerup.body.pos.y >= self.settings.height {
                powerup.body.destroyed = true;
            }
            if check_aabb(&paddle, &powerup.body.aabb()) {
                powerup.body.destroyed = true;
                powerup.activated = true;
                let kind = powerup.kind;
                self.activate_powerup(kind);
            }
        }
    }

    /// Move power-ups, count down active ones and prune finished entries.
    /// Removal happens after the pass so indices stay valid during it.
    pub fn update_powerups(&mut self, dt: f32) {
        for i in 0..self.powerups.len() {
            let powerup = &mut self.powerups[i];
            powerup.body.pos += powerup.body.vel * dt;
            if !powerup.activated {
                continue;
            }
            powerup.duration -= dt;
            if powerup.duration <= 0.0 {
                powerup.activated = false;
                let kind = powerup.kind;
                self.deactivate_powerup(kind);
            }
        }
        self.powerups.retain(|p| !(p.body.destroyed && !p.activated));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::Settings;

    fn new_state() -> GameState {
        GameState::new(Settings::default(), &["2 2 2 2"], 42).unwrap()
    }

    /// A power-up that has already been caught and is running
    fn active(kind: PowerUpKind, remaining: f32) -> PowerUp {
        let mut p = PowerUp::new(kind, Vec2::ZERO, Vec2::new(60.0, 20.0), Vec2::ZERO);
        p.body.destroyed = true;
        p.activated = true;
        p.duration = remaining;
        p
    }

    #[test]
    fn test_overlapping_sticky_outlasts_first_expiry() {
        let mut state = new_state();
        state.activate_powerup(PowerUpKind::Sticky);
        state.activate_powerup(PowerUpKind::Sticky);
        state.powerups.push(active(PowerUpKind::Sticky, 1.0));
        state.powerups.push(active(PowerUpKind::Sticky, 5.0));

        state.update_powerups(2.0);
        assert!(state.ball.sticky, "second sticky still running");
        assert_eq!(state.player.color, STICKY_TINT);
        assert_eq!(state.powerups.len(), 1);

        state.update_powerups(4.0);
        assert!(!state.ball.sticky);
        assert_eq!(state.player.color, WHITE);
        assert!(state.powerups.is_empty());
    }

    #[test]
    fn test_confuse_expiry_checks_confuse_not_sticky() {
        let mut state = new_state();
        state.activate_powerup(PowerUpKind::Confuse);
        state.powerups.push(active(PowerUpKind::Confuse, 0.5));
        state.powerups.push(active(PowerUpKind::Sticky, 10.0));
        state.update_powerups(1.0);
        assert!(!state.effects.confuse);
    }

    #[test]
    fn test_confuse_and_chaos_exclude_each_other() {
        let mut state = new_state();
        state.activate_powerup(PowerUpKind::Chaos);
        state.activate_powerup(PowerUpKind::Confuse);
        assert!(state.effects.chaos);
        assert!(!state.effects.confuse);

        let mut state = new_state();
        state.activate_powerup(PowerUpKind::Confuse);
        state.activate_powerup(PowerUpKind::Chaos);
        assert!(state.effects.confuse);
        assert!(!state.effects.chaos);
    }

    #[test]
    fn test_one_shot_effects() {
        let mut state = new_state();
        let vel = state.ball.body.vel;
        let width = state.player.size.x;
        state.activate_powerup(PowerUpKind::Speed);
        state.activate_powerup(PowerUpKind::PadSizeIncrease);
        assert!((state.ball.body.vel - vel * 1.2).length() < 1e-3);
        assert_eq!(state.player.size.x, width + 50.0);

        // Zero-duration entries expire on the next update without reverting
        state.powerups.push(active(PowerUpKind::PadSizeIncrease, 0.0));
        state.update_powerups(0.016);
        assert!(state.powerups.is_empty());
        assert_eq!(state.player.size.x, width + 50.0);
    }

    #[test]
    fn test_pass_through_tints_ball() {
        let mut state = new_state();
        state.activate_powerup(PowerUpKind::PassThrough);
        assert!(state.ball.pass_through);
        assert_eq!(state.ball.body.color, PASS_THROUGH_TINT);
        state.powerups.push(active(PowerUpKind::PassThrough, 0.1));
        state.update_powerups(0.2);
        assert!(!state.ball.pass_through);
        assert_eq!(state.ball.body.color, WHITE);
    }

    #[test]
    fn test_paddle_catches_falling_powerup() {
        let mut state = new_state();
        let pos = state.player.pos + Vec2::new(10.0, -10.0);
        state.powerups.push(PowerUp::new(
            PowerUpKind::Sticky,
            pos,
            Vec2::new(60.0, 20.0),
            Vec2::new(0.0, 150.0),
        ));
        state.collect_powerups();
        let caught = &state.powerups[0];
        assert!(caught.body.destroyed && caught.activated);
        assert!(state.ball.sticky);

        // Still listed while the effect runs
        state.update_powerups(0.5);
        assert_eq!(state.powerups.len(), 1);
    }

    #[test]
    fn test_missed_powerup_is_pruned() {
        let mut state = new_state();
        state.powerups.push(PowerUp::new(
            PowerUpKind::Chaos,
            Vec2::new(0.0, 700.0),
            Vec2::new(60.0, 20.0),
            Vec2::new(0.0, 150.0),
        ));
        state.collect_powerups();
        assert!(state.powerups[0].body.destroyed);
        assert!(!state.powerups[0].activated);
        state.update_powerups(0.016);
        assert!(state.powerups.is_empty());
        assert!(!state.effects.chaos);
    }

    #[test]
    fn test_confuse_spawn_rate() {
        let mut state = new_state();
        let trials = 10_000;
        for _ in 0..trials {
            state.spawn_powerups(Vec2::ZERO);
        }
        let confuse = state
            .powerups
            .iter()
            .filter(|p| p.kind == PowerUpKind::Confuse)
            .count();
        let speed = state
            .powerups
            .iter()
            .filter(|p| p.kind == PowerUpKind::Speed)
            .count();
        // Expected 666.7 and 133.3, both within ~5 standard deviations
        assert!((540..=795).contains(&confuse), "confuse spawned {confuse} times");
        assert!((78..=192).contains(&speed), "speed spawned {speed} times");
    }

    #[test]
    fn test_spawn_uses_brick_position_and_kind_defaults() {
        let mut state = new_state();
        state.settings.spawn_odds = 1;
        state.settings.confuse_spawn_odds = 1;
        let at = Vec2::new(120.0, 40.0);
        assert_eq!(state.spawn_powerups(at), 6);
        for (p, kind) in state.powerups.iter().zip(PowerUpKind::ALL) {
            assert_eq!(p.kind, kind);
            assert_eq!(p.body.pos, at);
            assert_eq!(p.duration, kind.duration());
            assert!(!p.activated);
        }
    }
}
