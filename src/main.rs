//! Breakout headless host
//!
//! Drives the simulation with a fixed-timestep accumulator and an autopilot
//! in place of a keyboard, building a draw frame each host frame. Useful for
//! soak-testing the core without a window.
//!
//! Usage: `breakout [settings.json] [host-seconds]`

use std::process::ExitCode;

use breakout::consts::{MAX_SUBSTEPS, SIM_DT};
use breakout::render::{Frame, Renderer, Sprite, Text};
use breakout::sim::{GamePhase, GameState, step};
use breakout::{GameResult, Key, KeyState, Settings};

const LEVELS: [&str; 4] = [
    include_str!("../levels/one.lvl"),
    include_str!("../levels/two.lvl"),
    include_str!("../levels/three.lvl"),
    include_str!("../levels/four.lvl"),
];

/// Host frame time (30 Hz display, two sim steps per frame)
const HOST_DT: f32 = 1.0 / 30.0;

/// Counts what would have been drawn
#[derive(Default)]
struct CountingRenderer {
    sprites: usize,
    texts: usize,
}

impl Renderer for CountingRenderer {
    fn draw_sprite(&mut self, _sprite: &Sprite) {
        self.sprites += 1;
    }

    fn draw_text(&mut self, _text: &Text) {
        self.texts += 1;
    }
}

/// Stand-in for a player: start, launch, and chase the ball with the paddle
fn autopilot(state: &GameState, keys: &mut KeyState) {
    match state.phase {
        GamePhase::Menu | GamePhase::Win => {
            // Confirm is edge-triggered: release between presses
            if keys.is_processed(Key::Confirm) {
                keys.release(Key::Confirm);
            } else {
                keys.press(Key::Confirm);
            }
        }
        GamePhase::Active => {
            let paddle_center = state.player.pos.x + state.player.size.x / 2.0;
            let ball_x = state.ball.center().x;
            // Lead slightly so the ball leaves at an angle
            let target = ball_x + state.ball.body.vel.x.signum() * 10.0;
            keys.set(Key::Left, target < paddle_center - 5.0);
            keys.set(Key::Right, target > paddle_center + 5.0);
            keys.set(Key::Launch, state.ball.stuck);
        }
    }
}

fn load_settings(path: Option<&str>) -> GameResult<Settings> {
    match path {
        Some(path) => {
            log::info!("Reading settings from {}", path);
            Settings::from_json(&std::fs::read_to_string(path)?)
        }
        None => Ok(Settings::default()),
    }
}

fn run(settings_path: Option<&str>, seconds: f32) -> GameResult<()> {
    let settings = load_settings(settings_path)?;
    let seed = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0);
    let mut state = GameState::new(settings, &LEVELS, seed)?;
    let mut keys = KeyState::new();
    log::info!("Session seed: {}", state.seed);

    let host_frames = (seconds / HOST_DT) as u32;
    let mut accumulator = 0.0;
    let mut renderer = CountingRenderer::default();
    let mut wins = 0;
    let mut last_phase = state.phase;

    for _ in 0..host_frames {
        accumulator += HOST_DT;
        let mut substeps = 0;
        while accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
            autopilot(&state, &mut keys);
            step(&mut state, &mut keys, SIM_DT)?;
            accumulator -= SIM_DT;
            substeps += 1;
        }

        if state.phase != last_phase {
            if state.phase == GamePhase::Win {
                wins += 1;
            }
            last_phase = state.phase;
        }

        Frame::build(&state).submit(&mut renderer);
    }

    log::info!(
        "Simulated {} frames: {} wins, {} lives, level {} has {} bricks left",
        state.frames,
        wins,
        state.lives,
        state.level + 1,
        state.current_level().remaining()
    );
    log::info!(
        "Emitted {} sprites and {} text draws",
        renderer.sprites,
        renderer.texts
    );
    Ok(())
}

fn main() -> ExitCode {
    env_logger::init();
    log::info!("Breakout (headless) starting...");

    let args: Vec<String> = std::env::args().collect();
    let settings_path = args.get(1).map(String::as_str);
    let seconds = args
        .get(2)
        .and_then(|s| s.parse::<f32>().ok())
        .unwrap_or(120.0);

    match run(settings_path, seconds) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{}", e);
            ExitCode::FAILURE
        }
    }
}
