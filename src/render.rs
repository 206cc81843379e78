//! Draw commands for the host renderer
//!
//! The core never draws. Each frame it describes sprites and text in
//! play-field coordinates, plus the post-processing flags, and the host
//! resolves texture identifiers and issues the GPU work.

use glam::{Vec2, Vec3, Vec4};

use crate::sim::{Body, Effects, GamePhase, GameState};

/// Particle quad size (pixels)
const PARTICLE_SIZE: f32 = 10.0;

/// A textured quad
#[derive(Debug, Clone, PartialEq)]
pub struct Sprite {
    /// Texture identifier resolved by the host's asset layer
    pub texture: &'static str,
    pub pos: Vec2,
    pub size: Vec2,
    /// Degrees
    pub rotation: f32,
    pub color: Vec4,
}

impl Sprite {
    fn body(texture: &'static str, body: &Body) -> Self {
        Self {
            texture,
            pos: body.pos,
            size: body.size,
            rotation: 0.0,
            color: body.color.extend(1.0),
        }
    }
}

/// A line of text
#[derive(Debug, Clone, PartialEq)]
pub struct Text {
    pub text: String,
    pub pos: Vec2,
    pub scale: f32,
    pub color: Vec3,
}

impl Text {
    fn new(text: impl Into<String>, x: f32, y: f32, scale: f32, color: Vec3) -> Self {
        Self {
            text: text.into(),
            pos: Vec2::new(x, y),
            scale,
            color,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Sprite(Sprite),
    Text(Text),
}

/// Host-side drawing backend
pub trait Renderer {
    fn draw_sprite(&mut self, sprite: &Sprite);
    fn draw_text(&mut self, text: &Text);
    /// Post-processing flags for the frame, sent before any draw
    fn set_effects(&mut self, _effects: Effects) {}
}

/// Everything the host needs to present one frame, in draw order
#[derive(Debug, Clone, Default)]
pub struct Frame {
    pub effects: Effects,
    pub commands: Vec<DrawCommand>,
}

impl Frame {
    /// Describe the current state
    pub fn build(state: &GameState) -> Self {
        let mut frame = Frame {
            effects: state.effects,
            commands: Vec::new(),
        };
        let (width, height) = (state.settings.width, state.settings.height);
        let white = Vec3::ONE;

        if matches!(state.phase, GamePhase::Menu | GamePhase::Active) {
            frame.sprite(Sprite {
                texture: "background",
                pos: Vec2::ZERO,
                size: Vec2::new(width, height),
                rotation: 0.0,
                color: Vec4::ONE,
            });

            for brick in state.current_level().bricks.iter().filter(|b| !b.destroyed) {
                let texture = if brick.solid { "block_solid" } else { "block" };
                frame.sprite(Sprite::body(texture, brick));
            }

            frame.sprite(Sprite::body("paddle", &state.player));

            for p in state.particles.alive() {
                frame.sprite(Sprite {
                    texture: "particle",
                    pos: p.pos,
                    size: Vec2::splat(PARTICLE_SIZE),
                    rotation: 0.0,
                    color: p.color,
                });
            }

            frame.sprite(Sprite::body("face", &state.ball.body));

            for powerup in state.powerups.iter().filter(|p| !p.body.destroyed) {
                frame.sprite(Sprite::body(powerup.kind.texture(), &powerup.body));
            }

            frame.text(Text::new(format!("Lives:{}", state.lives), 5.0, 5.0, 1.0, white));
        }

        match state.phase {
            GamePhase::Menu => {
                frame.text(Text::new("Press Enter To Start", 250.0, height / 2.0, 1.0, white));
                frame.text(Text::new(
                    "Press W or S to select level",
                    245.0,
                    height / 2.0 + 40.0,
                    0.76,
                    white,
                ));
            }
            GamePhase::Win => {
                frame.text(Text::new(
                    "YOU WIN!!!",
                    250.0,
                    height / 2.0 - 20.0,
                    1.0,
                    Vec3::new(0.0, 1.0, 0.0),
                ));
                frame.text(Text::new(
                    "Press ENTER to retry or ESC to quit",
                    130.0,
                    height / 2.0,
                    1.0,
                    Vec3::new(1.0, 1.0, 0.0),
                ));
            }
            GamePhase::Active => {}
        }

        frame
    }

    fn sprite(&mut self, sprite: Sprite) {
        self.commands.push(DrawCommand::Sprite(sprite));
    }

    fn text(&mut self, text: Text) {
        self.commands.push(DrawCommand::Text(text));
    }

    /// Replay the frame into a backend
    pub fn submit<R: Renderer>(&self, renderer: &mut R) {
        renderer.set_effects(self.effects);
        for command in &self.commands {
            match command {
                DrawCommand::Sprite(sprite) => renderer.draw_sprite(sprite),
                DrawCommand::Text(text) => renderer.draw_text(text),
            }
        }
    }

    pub fn sprites(&self) -> impl Iterator<Item = &Sprite> {
        self.commands.iter().filter_map(|c| match c {
            DrawCommand::Sprite(s) => Some(s),
            DrawCommand::Text(_) => None,
        })
    }

    pub fn texts(&self) -> impl Iterator<Item = &Text> {
        self.commands.iter().filter_map(|c| match c {
            DrawCommand::Text(t) => Some(t),
            DrawCommand::Sprite(_) => None,
        })
    }
}
