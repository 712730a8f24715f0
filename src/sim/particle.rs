//! Decorative particles
//!
//! Purely visual feedback. Nothing in the game logic reads particle state.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::collision::Rect;
use super::entity::{Entity, WorldView};
use crate::renderer::{Canvas, Color, rgb, with_alpha};

/// Downward acceleration (pixels/s²)
const GRAVITY: f32 = 300.0;
/// Velocity kept per tick
const DRAG: f32 = 0.99;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ParticleKind {
    /// Bug swatted or bug hitting a plant
    Spark,
    /// Plant level-up
    Leaf,
    /// Bug pushed away by the interaction pulse
    Pop,
    /// Flow orb collected
    Flow,
}

impl ParticleKind {
    pub fn color(self) -> Color {
        match self {
            ParticleKind::Spark => rgb(255, 210, 100),
            ParticleKind::Leaf => rgb(100, 180, 100),
            ParticleKind::Pop => rgb(220, 100, 100),
            ParticleKind::Flow => rgb(100, 200, 255),
        }
    }

    /// Inclusive size range in pixels
    fn size_range(self) -> (u32, u32) {
        match self {
            ParticleKind::Spark => (3, 6),
            ParticleKind::Leaf => (4, 8),
            ParticleKind::Pop => (2, 5),
            ParticleKind::Flow => (4, 7),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    pub kind: ParticleKind,
    pub size: f32,
    /// Total lifespan in seconds
    pub life: f32,
    pub age: f32,
    pub rotation: f32,
    pub rotation_speed: f32,
    alive: bool,
}

impl Particle {
    pub fn new(pos: Vec2, kind: ParticleKind, rng: &mut impl Rng) -> Self {
        let (min_size, max_size) = kind.size_range();
        Self {
            pos,
            vel: Vec2::new(rng.random_range(-120.0..120.0), rng.random_range(-160.0..-40.0)),
            kind,
            size: rng.random_range(min_size..=max_size) as f32,
            life: rng.random_range(0.4..1.1),
            age: 0.0,
            rotation: rng.random_range(0.0..std::f32::consts::TAU),
            rotation_speed: rng.random_range(-5.0..5.0),
            alive: true,
        }
    }

    /// Remaining life fraction, 1 at spawn down to 0
    pub fn fade(&self) -> f32 {
        (1.0 - self.age / self.life).clamp(0.0, 1.0)
    }
}

impl Entity for Particle {
    fn bounds(&self) -> Rect {
        Rect::from_center(self.pos, Vec2::splat(self.size * 2.0))
    }

    fn is_alive(&self) -> bool {
        self.alive
    }

    fn update(&mut self, dt: f32, _world: &mut WorldView<'_>) {
        self.age += dt;
        self.rotation += self.rotation_speed * dt;
        if self.age >= self.life {
            self.alive = false;
            return;
        }

        self.vel.y += GRAVITY * dt;
        self.vel *= DRAG;
        self.pos += self.vel * dt;

        if self.kind == ParticleKind::Leaf {
            self.pos.x += (self.age * 5.0).sin() * 2.0 * 60.0 * dt;
        }
    }

    fn draw(&self, canvas: &mut dyn Canvas) {
        let fade = self.fade();
        canvas.circle(
            self.pos,
            self.size * (0.5 + 0.5 * fade),
            with_alpha(self.kind.color(), fade),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::GameEvent;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_particle_expires_after_lifespan() {
        let mut rng = Pcg32::seed_from_u64(7);
        let mut p = Particle::new(Vec2::new(100.0, 100.0), ParticleKind::Spark, &mut rng);
        assert!((0.4..1.1).contains(&p.life));

        let mut events: Vec<GameEvent> = Vec::new();
        let mut world = WorldView::new(50.0, Rect::default(), Rect::default(), &mut events);
        let mut t = 0.0;
        while p.is_alive() {
            p.update(1.0 / 60.0, &mut world);
            t += 1.0 / 60.0;
            assert!(t < 2.0, "particle outlived its lifespan");
        }
        assert!(t >= 0.4);
    }

    #[test]
    fn test_gravity_pulls_down() {
        let mut rng = Pcg32::seed_from_u64(1);
        let mut p = Particle::new(Vec2::ZERO, ParticleKind::Flow, &mut rng);
        p.life = 10.0;
        let start_vy = p.vel.y;
        let mut events: Vec<GameEvent> = Vec::new();
        let mut world = WorldView::new(50.0, Rect::default(), Rect::default(), &mut events);
        p.update(0.1, &mut world);
        assert!(p.vel.y > start_vy);
    }
}
