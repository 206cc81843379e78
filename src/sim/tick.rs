//! Per-frame simulation step
//!
//! Order matters: the ball moves, then bricks and the paddle resolve
//! against it, then power-ups update, and only then are loss and win
//! evaluated on the settled state.

use glam::Vec2;

use super::collision::{check_circle_aabb, resolve};
use super::state::{Ball, Body, GamePhase, GameState};
use crate::error::{GameError, GameResult};

/// Advance the game state by `dt` seconds of elapsed time
pub fn tick(state: &mut GameState, dt: f32) -> GameResult<()> {
    if !dt.is_finite() || dt < 0.0 {
        return Err(GameError::InvalidTimestep(dt));
    }

    update_shake(state, dt);

    if state.phase != GamePhase::Active {
        return Ok(());
    }
    state.frames += 1;

    let width = state.settings.width;
    state.ball.advance(dt, width);

    resolve_collisions(state);

    let offset = Vec2::splat(state.ball.radius / 2.0);
    let new_particles = state.settings.particles_per_frame;
    state.particles.update(
        &mut state.rng,
        dt,
        state.ball.body.pos,
        state.ball.body.vel,
        new_particles,
        offset,
    );

    state.collect_powerups();
    state.update_powerups(dt);

    check_loss(state)?;
    check_win(state)?;
    Ok(())
}

/// Resolve the ball against every standing brick, then the paddle.
/// Returns the number of bricks destroyed.
pub fn resolve_collisions(state: &mut GameState) -> usize {
    let mut destroyed = 0;
    let level = state.level;

    for i in 0..state.levels[level].bricks.len() {
        let brick = &mut state.levels[level].bricks[i];
        if brick.destroyed {
            continue;
        }
        let Some(info) = check_circle_aabb(state.ball.center(), state.ball.radius, &brick.aabb())
        else {
            continue;
        };

        if brick.solid {
            trigger_shake(state);
        } else {
            brick.destroyed = true;
            destroyed += 1;
            let pos = brick.pos;
            state.spawn_powerups(pos);
        }

        if !state.ball.pass_through {
            let ball = &mut state.ball;
            resolve(&mut ball.body.pos, &mut ball.body.vel, ball.radius, &info);
        }
    }

    if !state.ball.stuck
        && check_circle_aabb(state.ball.center(), state.ball.radius, &state.player.aabb()).is_some()
    {
        paddle_bounce(
            &mut state.ball,
            &state.player,
            state.settings.ball_velocity.x,
            state.settings.paddle_strength,
        );
    }

    destroyed
}

/// Redirect the ball by where it struck the paddle.
///
/// The horizontal component scales with the offset from the paddle center,
/// the result is rescaled to the old speed and always points upward. A
/// sticky ball attaches instead of leaving.
pub fn paddle_bounce(ball: &mut Ball, paddle: &Body, base_vx: f32, strength: f32) {
    ball.stuck = ball.sticky;

    let half_width = paddle.size.x / 2.0;
    let paddle_center = paddle.pos.x + half_width;
    let offset = ball.center().x - paddle_center;
    let percentage = offset / half_width;

    let speed = ball.speed();
    let vel = &mut ball.body.vel;
    vel.x = base_vx * percentage * strength;
    *vel = vel.normalize_or_zero() * speed;
    vel.y = -vel.y.abs();
}

fn trigger_shake(state: &mut GameState) {
    state.shake_time = state.settings.shake_duration;
    if state.settings.effective_screen_shake() {
        state.effects.shake = true;
    }
}

fn update_shake(state: &mut GameState, dt: f32) {
    if state.shake_time > 0.0 {
        state.shake_time -= dt;
        if state.shake_time <= 0.0 {
            state.effects.shake = false;
        }
    }
}

/// Ball past the bottom edge costs a life; the last life resets the level.
fn check_loss(state: &mut GameState) -> GameResult<()> {
    if state.ball.body.pos.y < state.settings.height {
        return Ok(());
    }
    state.lives = state.lives.saturating_sub(1);
    log::info!("Ball lost, {} lives left", state.lives);
    if state.lives == 0 {
        state.reset_level()?;
    }
    state.reset_player();
    Ok(())
}

fn check_win(state: &mut GameState) -> GameResult<()> {
    if state.phase == GamePhase::Active && state.current_level().is_completed() {
        state.reset_player();
        state.reset_level()?;
        state.effects.chaos = true;
        state.phase = GamePhase::Win;
        log::info!("Level {} cleared", state.level + 1);
    }
    Ok(())
}
