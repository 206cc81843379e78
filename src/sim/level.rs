//! Brick layouts
//!
//! A layout is a whitespace-separated grid of tile codes, one row per line:
//! `0` is empty, `1` a solid (indestructible) brick, `2` and up colored
//! destructible bricks. The grid is stretched over the given area.

use glam::{Vec2, Vec3};
use serde::{Deserialize, Serialize};

use super::state::Body;
use crate::error::LevelLoadError;

/// A grid of bricks
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Level {
    pub bricks: Vec<Body>,
    /// Source text, kept so the level can be rebuilt on reset
    layout: String,
}

impl Level {
    /// Parse a layout and lay it out over `width` x `height`
    pub fn from_layout(layout: &str, width: f32, height: f32) -> Result<Self, LevelLoadError> {
        let mut level = Self::default();
        level.load(layout, width, height)?;
        Ok(level)
    }

    /// Replace the bricks with those described by `layout`. On error the
    /// brick collection is left empty.
    pub fn load(&mut self, layout: &str, width: f32, height: f32) -> Result<(), LevelLoadError> {
        self.bricks.clear();
        self.layout = layout.to_string();
        let tiles = parse_tiles(layout)?;
        self.bricks = build_bricks(&tiles, width, height)?;
        log::info!(
            "Level loaded: {}x{} grid, {} bricks",
            tiles[0].len(),
            tiles.len(),
            self.bricks.len()
        );
        Ok(())
    }

    /// Rebuild from the stored layout
    pub fn reload(&mut self, width: f32, height: f32) -> Result<(), LevelLoadError> {
        let layout = std::mem::take(&mut self.layout);
        self.load(&layout, width, height)
    }

    /// Cleared once every destructible brick is destroyed
    pub fn is_completed(&self) -> bool {
        self.bricks.iter().all(|b| b.solid || b.destroyed)
    }

    /// Destructible bricks still standing
    pub fn remaining(&self) -> usize {
        self.bricks
            .iter()
            .filter(|b| !b.solid && !b.destroyed)
            .count()
    }
}

fn parse_tiles(layout: &str) -> Result<Vec<Vec<u32>>, LevelLoadError> {
    let mut rows: Vec<Vec<u32>> = Vec::new();
    for line in layout.lines().filter(|l| !l.trim().is_empty()) {
        let row_index = rows.len();
        let row = line
            .split_whitespace()
            .enumerate()
            .map(|(column, token)| {
                token.parse::<u32>().map_err(|_| LevelLoadError::InvalidTile {
                    row: row_index,
                    column,
                    token: token.to_string(),
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        match rows.first() {
            Some(first) if first.len() != row.len() => {
                return Err(LevelLoadError::RaggedRow {
                    row: row_index,
                    expected: first.len(),
                    found: row.len(),
                });
            }
            _ => {}
        }
        rows.push(row);
    }

    if rows.is_empty() {
        return Err(LevelLoadError::Empty);
    }
    Ok(rows)
}

fn build_bricks(tiles: &[Vec<u32>], width: f32, height: f32) -> Result<Vec<Body>, LevelLoadError> {
    if !(width > 0.0 && height > 0.0) {
        return Err(LevelLoadError::InvalidArea);
    }
    let unit = Vec2::new(width / tiles[0].len() as f32, height / tiles.len() as f32);

    let mut bricks = Vec::new();
    for (y, row) in tiles.iter().enumerate() {
        for (x, &code) in row.iter().enumerate() {
            if code == 0 {
                continue;
            }
            let pos = unit * Vec2::new(x as f32, y as f32);
            let mut brick = Body::new(pos, unit).with_color(tile_color(code));
            brick.solid = code == 1;
            bricks.push(brick);
        }
    }
    Ok(bricks)
}

fn tile_color(code: u32) -> Vec3 {
    match code {
        1 => Vec3::new(0.8, 0.8, 0.7),
        2 => Vec3::new(0.2, 0.6, 1.0),
        3 => Vec3::new(0.0, 0.7, 0.0),
        4 => Vec3::new(0.8, 0.8, 0.4),
        5 => Vec3::new(1.0, 0.5, 0.0),
        _ => Vec3::ONE,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layout_scales_to_area() {
        let level = Level::from_layout("1 0 2 3\n5 5 5 5\n", 800.0, 300.0).unwrap();
        assert_eq!(level.bricks.len(), 7);

        let solid = &level.bricks[0];
        assert!(solid.solid);
        assert_eq!(solid.pos, Vec2::ZERO);
        assert_eq!(solid.size, Vec2::new(200.0, 150.0));

        // Second brick skips the empty tile
        let blue = &level.bricks[1];
        assert!(!blue.solid);
        assert_eq!(blue.pos, Vec2::new(400.0, 0.0));
        assert_eq!(blue.color, Vec3::new(0.2, 0.6, 1.0));

        assert_eq!(level.bricks[6].pos, Vec2::new(600.0, 150.0));
    }

    #[test]
    fn test_completion_ignores_solid_bricks() {
        let mut level = Level::from_layout("1 2\n1 2", 100.0, 100.0).unwrap();
        assert!(!level.is_completed());
        assert_eq!(level.remaining(), 2);
        for brick in level.bricks.iter_mut().filter(|b| !b.solid) {
            brick.destroyed = true;
        }
        assert!(level.is_completed());
        assert_eq!(level.remaining(), 0);
    }

    #[test]
    fn test_invalid_tile_leaves_level_empty() {
        let mut level = Level::from_layout("2 2", 100.0, 100.0).unwrap();
        let err = level.load("2 2\n2 -1", 100.0, 100.0).unwrap_err();
        assert_eq!(
            err,
            LevelLoadError::InvalidTile {
                row: 1,
                column: 1,
                token: "-1".to_string()
            }
        );
        assert!(level.bricks.is_empty());
    }

    #[test]
    fn test_ragged_rows_rejected() {
        let err = Level::from_layout("1 1 1\n1 1\n", 100.0, 100.0).unwrap_err();
        assert_eq!(
            err,
            LevelLoadError::RaggedRow {
                row: 1,
                expected: 3,
                found: 2
            }
        );
    }

    #[test]
    fn test_empty_layout_and_area_rejected() {
        assert_eq!(Level::from_layout("\n  \n", 100.0, 100.0).unwrap_err(), LevelLoadError::Empty);
        assert_eq!(Level::from_layout("1", 0.0, 100.0).unwrap_err(), LevelLoadError::InvalidArea);
    }

    #[test]
    fn test_reload_restores_destroyed_bricks() {
        let mut level = Level::from_layout("2 3", 100.0, 50.0).unwrap();
        level.bricks[0].destroyed = true;
        level.reload(100.0, 50.0).unwrap();
        assert_eq!(level.remaining(), 2);
        assert_eq!(level.layout, "2 3");
    }
}
