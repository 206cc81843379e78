//! Ball trail particles
//!
//! Fixed-size pool. Each frame a few dead slots are respawned at the ball,
//! and live particles drift against the ball's motion while fading out.

use glam::{Vec2, Vec4};
use rand::Rng;

/// A particle for visual effects
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    pub color: Vec4,
    /// Seconds left; dead at or below zero
    pub life: f32,
}

impl Particle {
    #[inline]
    pub fn is_alive(&self) -> bool {
        self.life > 0.0
    }
}

#[derive(Debug, Clone)]
pub struct ParticleGenerator {
    particles: Vec<Particle>,
    last_used: usize,
}

impl ParticleGenerator {
    pub fn new(amount: usize) -> Self {
        Self {
            particles: vec![Particle::default(); amount],
            last_used: 0,
        }
    }

    /// Spawn `new_particles` at `origin + offset`, then age everything by `dt`
    pub fn update<R: Rng>(
        &mut self,
        rng: &mut R,
        dt: f32,
        origin: Vec2,
        origin_vel: Vec2,
        new_particles: usize,
        offset: Vec2,
    ) {
        if !self.particles.is_empty() {
            for _ in 0..new_particles {
                let slot = self.first_unused();
                respawn(&mut self.particles[slot], rng, origin, origin_vel, offset);
            }
        }

        for p in self.particles.iter_mut() {
            p.life -= dt;
            if p.is_alive() {
                p.pos -= p.vel * dt;
                p.color.w -= dt * 2.5;
            }
        }
    }

    /// Next dead slot, searching forward from the last one used. Falls back
    /// to slot 0 when every particle is alive.
    fn first_unused(&mut self) -> usize {
        let n = self.particles.len();
        let found = (self.last_used..n)
            .chain(0..self.last_used)
            .find(|&i| !self.particles[i].is_alive())
            .unwrap_or(0);
        self.last_used = found;
        found
    }

    pub fn alive(&self) -> impl Iterator<Item = &Particle> {
        self.particles.iter().filter(|p| p.is_alive())
    }

    pub fn capacity(&self) -> usize {
        self.particles.len()
    }
}

fn respawn<R: Rng>(p: &mut Particle, rng: &mut R, origin: Vec2, origin_vel: Vec2, offset: Vec2) {
    let jitter = (rng.random_range(0..100) - 50) as f32 / 10.0;
    let grey = 0.5 + rng.random_range(0..100) as f32 / 100.0;
    p.pos = origin + Vec2::splat(jitter) + offset;
    p.color = Vec4::new(grey, grey, grey, 1.0);
    p.life = 1.0;
    p.vel = origin_vel * 0.1;
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_spawns_near_origin() {
        let mut rng = Pcg32::seed_from_u64(3);
        let mut pool = ParticleGenerator::new(10);
        pool.update(&mut rng, 0.0, Vec2::new(100.0, 100.0), Vec2::new(0.0, -350.0), 2, Vec2::ZERO);

        let alive: Vec<_> = pool.alive().collect();
        assert_eq!(alive.len(), 2);
        for p in alive {
            assert!((p.pos - Vec2::new(100.0, 100.0)).abs().max_element() <= 5.0);
            assert!(p.color.x >= 0.5 && p.color.x < 1.5);
            assert!((p.vel - Vec2::new(0.0, -35.0)).length() < 1e-4);
        }
    }

    #[test]
    fn test_particles_age_and_die() {
        let mut rng = Pcg32::seed_from_u64(3);
        let mut pool = ParticleGenerator::new(4);
        pool.update(&mut rng, 0.25, Vec2::ZERO, Vec2::new(0.0, 100.0), 1, Vec2::ZERO);
        let p = *pool.alive().next().unwrap();
        assert!((p.life - 0.75).abs() < 1e-6);
        assert!((p.color.w - (1.0 - 0.625)).abs() < 1e-6);

        for _ in 0..4 {
            pool.update(&mut rng, 0.25, Vec2::ZERO, Vec2::ZERO, 0, Vec2::ZERO);
        }
        assert_eq!(pool.alive().count(), 0);
    }

    #[test]
    fn test_pool_never_grows() {
        let mut rng = Pcg32::seed_from_u64(9);
        let mut pool = ParticleGenerator::new(3);
        for _ in 0..10 {
            pool.update(&mut rng, 0.01, Vec2::ZERO, Vec2::ZERO, 2, Vec2::ZERO);
        }
        assert_eq!(pool.capacity(), 3);
        assert_eq!(pool.alive().count(), 3);
    }
}
