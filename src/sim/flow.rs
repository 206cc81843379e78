//! Game flow: Menu -> Active -> Win -> Active ...
//!
//! Input is read here once per frame, before `tick`. Confirm and menu
//! navigation are edge-triggered through the key latches; paddle movement
//! and launch are level-triggered. Losing every life never leaves Active,
//! it only resets the level.

use super::state::{GamePhase, GameState};
use super::tick::tick;
use crate::error::GameResult;
use crate::input::{Key, KeyState};

/// Apply this frame's key state to the session
pub fn process_input(state: &mut GameState, keys: &mut KeyState, dt: f32) {
    match state.phase {
        GamePhase::Menu => {
            if keys.take_press(Key::Confirm) {
                state.phase = GamePhase::Active;
                log::info!("Starting level {}", state.level + 1);
            }
            if keys.take_press(Key::Up) {
                state.cycle_level(true);
            }
            if keys.take_press(Key::Down) {
                state.cycle_level(false);
            }
        }
        GamePhase::Active => move_paddle(state, keys, dt),
        GamePhase::Win => {
            if keys.take_press(Key::Confirm) {
                state.effects.chaos = false;
                state.phase = GamePhase::Active;
                log::info!("Replaying level {}", state.level + 1);
            }
        }
    }
}

fn move_paddle(state: &mut GameState, keys: &KeyState, dt: f32) {
    let max_x = state.settings.width - state.player.size.x;
    let step = state.settings.paddle_speed * dt;

    let mut delta = 0.0;
    if keys.is_down(Key::Left) {
        delta -= step;
    }
    if keys.is_down(Key::Right) {
        delta += step;
    }

    let old_x = state.player.pos.x;
    state.player.pos.x = (old_x + delta).clamp(0.0, max_x.max(0.0));
    if state.ball.stuck {
        state.ball.body.pos.x += state.player.pos.x - old_x;
    }

    if keys.is_down(Key::Launch) {
        state.ball.stuck = false;
    }
}

/// One host frame: input, then simulation
pub fn step(state: &mut GameState, keys: &mut KeyState, dt: f32) -> GameResult<()> {
    process_input(state, keys, dt);
    tick(state, dt)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::Settings;
    use glam::Vec2;

    fn new_state() -> GameState {
        GameState::new(Settings::default(), &["2 2 2", "3 3", "4"], 5).unwrap()
    }

    #[test]
    fn test_held_confirm_starts_game_once() {
        let mut state = new_state();
        let mut keys = KeyState::new();
        keys.press(Key::Confirm);

        let mut transitions = 0;
        let mut last = state.phase;
        for _ in 0..2 {
            step(&mut state, &mut keys, 1.0 / 60.0).unwrap();
            if state.phase != last {
                transitions += 1;
                last = state.phase;
            }
        }
        assert_eq!(transitions, 1);
        assert_eq!(state.phase, GamePhase::Active);
        assert!(keys.is_processed(Key::Confirm));

        // Still held when the level is won: no instant replay
        state.phase = GamePhase::Win;
        state.effects.chaos = true;
        process_input(&mut state, &mut keys, 0.0);
        assert_eq!(state.phase, GamePhase::Win);

        keys.release(Key::Confirm);
        keys.press(Key::Confirm);
        process_input(&mut state, &mut keys, 0.0);
        assert_eq!(state.phase, GamePhase::Active);
        assert!(!state.effects.chaos);
    }

    #[test]
    fn test_menu_navigation_wraps_and_latches() {
        let mut state = new_state();
        let mut keys = KeyState::new();

        keys.press(Key::Down);
        process_input(&mut state, &mut keys, 0.0);
        assert_eq!(state.level, 2);
        process_input(&mut state, &mut keys, 0.0);
        assert_eq!(state.level, 2, "held key must not repeat");
        keys.release(Key::Down);

        keys.press(Key::Up);
        process_input(&mut state, &mut keys, 0.0);
        assert_eq!(state.level, 0);
        assert_eq!(state.phase, GamePhase::Menu);
    }

    #[test]
    fn test_paddle_carries_stuck_ball() {
        let mut state = new_state();
        state.phase = GamePhase::Active;
        let mut keys = KeyState::new();
        let ball_x = state.ball.body.pos.x;

        keys.press(Key::Right);
        process_input(&mut state, &mut keys, 0.1);
        assert_eq!(state.player.pos.x, 400.0);
        assert_eq!(state.ball.body.pos.x, ball_x + 50.0);

        // Clamped at the right edge
        process_input(&mut state, &mut keys, 10.0);
        assert_eq!(state.player.pos.x, 700.0);
        assert_eq!(state.ball.body.pos.x, ball_x + 350.0);
    }

    #[test]
    fn test_launch_frees_ball() {
        let mut state = new_state();
        state.phase = GamePhase::Active;
        let mut keys = KeyState::new();
        keys.press(Key::Launch);
        keys.press(Key::Left);
        process_input(&mut state, &mut keys, 0.1);
        assert!(!state.ball.stuck);
        assert_eq!(state.player.pos.x, 300.0);

        let before = state.ball.center();
        step(&mut state, &mut KeyState::new(), 0.1).unwrap();
        assert!((state.ball.center() - (before + Vec2::new(10.0, -35.0))).length() < 1e-3);
    }

    #[test]
    fn test_losing_all_lives_stays_active() {
        let mut state = new_state();
        state.phase = GamePhase::Active;
        state.lives = 1;
        state.ball.stuck = false;
        state.ball.body.pos = Vec2::new(400.0, 650.0);
        step(&mut state, &mut KeyState::new(), 1.0 / 60.0).unwrap();
        assert_eq!(state.phase, GamePhase::Active);
        assert_eq!(state.lives, 3);
    }
}
