//! Garden state and simulation events
//!
//! Everything a gameplay session simulates lives in [`Garden`]. Entities are
//! kept in typed collections; ids are unique per garden and collections keep
//! spawn order, so iteration is deterministic for a given seed.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::bug::Bug;
use super::entity::Entity;
use super::orb::FlowOrb;
use super::particle::{Particle, ParticleKind};
use super::plant::Plant;
use super::player::Player;
use crate::renderer::Canvas;

/// Number of plants planted at the start of a session
pub const PLANT_COUNT: usize = 3;
/// Plant row layout
pub const PLANT_START_X: f32 = 140.0;
pub const PLANT_SPACING: f32 = 220.0;
pub const PLANT_Y: f32 = 510.0;

/// Side effects entities report while updating or reacting.
/// Drained by the owning scene after each update pass.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    /// Spawn `count` particles of `kind` at `at`
    Burst {
        at: Vec2,
        kind: ParticleKind,
        count: u32,
    },
    /// A plant gained a level
    PlantGrew { plant_id: u32, level: u8 },
    /// A plant's health ran out
    PlantLost { plant_id: u32 },
    /// A bug chewed on a plant
    BugReachedPlant { plant_id: u32, damage: f32 },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Garden {
    pub player: Player,
    pub plants: Vec<Plant>,
    pub bugs: Vec<Bug>,
    pub orbs: Vec<FlowOrb>,
    /// Visual only
    #[serde(skip)]
    pub particles: Vec<Particle>,
    next_id: u32,
}

impl Default for Garden {
    fn default() -> Self {
        Self {
            player: Player::default(),
            plants: Vec::new(),
            bugs: Vec::new(),
            orbs: Vec::new(),
            particles: Vec::new(),
            next_id: 1,
        }
    }
}

impl Garden {
    /// Fresh garden: player at the start position and a row of sprouts
    pub fn new(rng: &mut impl Rng) -> Self {
        let mut garden = Self::default();
        for i in 0..PLANT_COUNT {
            let id = garden.next_entity_id();
            let center = Vec2::new(PLANT_START_X + i as f32 * PLANT_SPACING, PLANT_Y);
            let wobble = rng.random_range(0.0..std::f32::consts::TAU);
            garden.plants.push(Plant::new(id, center, wobble));
        }
        garden
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    pub fn spawn_bug(&mut self, level_id: u32, rng: &mut impl Rng) -> &Bug {
        let id = self.next_entity_id();
        self.bugs.push(Bug::spawn(id, level_id, rng));
        &self.bugs[self.bugs.len() - 1]
    }

    pub fn spawn_orb(&mut self, rng: &mut impl Rng) -> &FlowOrb {
        let id = self.next_entity_id();
        self.orbs.push(FlowOrb::spawn(id, rng));
        &self.orbs[self.orbs.len() - 1]
    }

    /// Add a particle burst, dropping whatever would exceed `cap`
    pub fn burst(
        &mut self,
        at: Vec2,
        kind: ParticleKind,
        count: u32,
        cap: usize,
        rng: &mut impl Rng,
    ) {
        let room = cap.saturating_sub(self.particles.len());
        let count = (count as usize).min(room);
        self.particles
            .extend((0..count).map(|_| Particle::new(at, kind, rng)));
    }

    pub fn living_plants(&self) -> usize {
        self.plants.iter().filter(|p| p.is_alive()).count()
    }

    /// Drop every entity whose alive flag is clear
    pub fn prune(&mut self) {
        self.plants.retain(|e| e.is_alive());
        self.bugs.retain(|e| e.is_alive());
        self.orbs.retain(|e| e.is_alive());
        self.particles.retain(|e| e.is_alive());
    }

    /// Draw back to front: plants, orbs, bugs, player, particles
    pub fn draw(&self, canvas: &mut dyn Canvas) {
        for plant in &self.plants {
            plant.draw(canvas);
        }
        for orb in &self.orbs {
            orb.draw(canvas);
        }
        for bug in &self.bugs {
            bug.draw(canvas);
        }
        self.player.draw(canvas);
        for particle in &self.particles {
            particle.draw(canvas);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_new_garden_layout() {
        let mut rng = Pcg32::seed_from_u64(1);
        let garden = Garden::new(&mut rng);
        assert_eq!(garden.plants.len(), PLANT_COUNT);
        let xs: Vec<f32> = garden.plants.iter().map(|p| p.rect.center().x).collect();
        assert_eq!(xs, vec![140.0, 360.0, 580.0]);
        assert!(garden.plants.iter().all(|p| p.level == 1 && p.health == 100.0));
        assert!(garden.bugs.is_empty() && garden.orbs.is_empty());
    }

    #[test]
    fn test_ids_are_unique() {
        let mut rng = Pcg32::seed_from_u64(2);
        let mut garden = Garden::new(&mut rng);
        let a = garden.spawn_bug(1, &mut rng).id;
        let b = garden.spawn_orb(&mut rng).id;
        let c = garden.spawn_bug(1, &mut rng).id;
        let mut ids: Vec<u32> = garden.plants.iter().map(|p| p.id).collect();
        ids.extend([a, b, c]);
        let len = ids.len();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), len);
    }

    #[test]
    fn test_burst_respects_cap() {
        let mut rng = Pcg32::seed_from_u64(3);
        let mut garden = Garden::default();
        garden.burst(Vec2::ZERO, ParticleKind::Spark, 10, 16, &mut rng);
        garden.burst(Vec2::ZERO, ParticleKind::Spark, 10, 16, &mut rng);
        assert_eq!(garden.particles.len(), 16);
    }

    #[test]
    fn test_same_seed_same_garden() {
        let mut a = Pcg32::seed_from_u64(99);
        let mut b = Pcg32::seed_from_u64(99);
        let mut ga = Garden::new(&mut a);
        let mut gb = Garden::new(&mut b);
        for _ in 0..5 {
            ga.spawn_bug(2, &mut a);
            gb.spawn_bug(2, &mut b);
        }
        assert_eq!(ga, gb);
    }
}
