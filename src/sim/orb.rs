//! Flow orbs - timed focus pickups

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::collision::Rect;
use super::entity::{Contact, Entity, Interaction, WorldView};
use super::particle::ParticleKind;
use super::state::GameEvent;
use crate::renderer::{Canvas, colors, with_alpha};

pub const ORB_SIZE: Vec2 = Vec2::new(20.0, 20.0);
/// Seconds an uncollected orb lingers
pub const ORB_LIFETIME: f32 = 10.0;
/// Focus restored on pickup
pub const ORB_FOCUS: f32 = 20.0;
/// Score paid on pickup
pub const ORB_SCORE: u32 = 20;
/// Spawn area, by centre
pub const SPAWN_X: (f32, f32) = (120.0, 880.0);
pub const SPAWN_Y: (f32, f32) = (120.0, 450.0);
const COLLECT_PARTICLES: u32 = 12;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlowOrb {
    pub id: u32,
    pub rect: Rect,
    /// Seconds left before the orb fades
    pub timer: f32,
    pub pulse: f32,
    alive: bool,
}

impl FlowOrb {
    pub fn new(id: u32, center: Vec2) -> Self {
        Self {
            id,
            rect: Rect::from_center(center, ORB_SIZE),
            timer: ORB_LIFETIME,
            pulse: 0.0,
            alive: true,
        }
    }

    pub fn spawn(id: u32, rng: &mut impl Rng) -> Self {
        let x = rng.random_range(SPAWN_X.0..=SPAWN_X.1).round();
        let y = rng.random_range(SPAWN_Y.0..=SPAWN_Y.1).round();
        Self::new(id, Vec2::new(x, y))
    }
}

impl Entity for FlowOrb {
    fn bounds(&self) -> Rect {
        self.rect
    }

    fn is_alive(&self) -> bool {
        self.alive
    }

    fn update(&mut self, dt: f32, _world: &mut WorldView<'_>) {
        self.pulse += dt * 4.0;
        self.timer -= dt;
        if self.timer <= 0.0 {
            self.alive = false;
        }
    }

    fn draw(&self, canvas: &mut dyn Canvas) {
        let c = self.rect.center();
        // Blink during the last two seconds
        let alpha = if self.timer < 2.0 {
            0.4 + 0.6 * (self.timer * 10.0).sin().abs()
        } else {
            1.0
        };
        let ring = self.rect.w / 2.0 + 3.0 + self.pulse.sin() * 2.0;
        canvas.circle(c, ring, with_alpha(colors::ORB_RING, 0.5 * alpha));
        canvas.circle(c, self.rect.w / 2.0, with_alpha(colors::ORB, alpha));
    }

    fn interact(&mut self, contact: Contact, events: &mut Vec<GameEvent>) -> Option<Interaction> {
        if !self.alive || contact != Contact::Touch {
            return None;
        }
        self.alive = false;
        events.push(GameEvent::Burst {
            at: self.rect.center(),
            kind: ParticleKind::Flow,
            count: COLLECT_PARTICLES,
        });
        Some(Interaction::FlowCollected)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_orb_expires() {
        let mut orb = FlowOrb::new(1, Vec2::new(300.0, 300.0));
        let mut events = Vec::new();
        let mut world = WorldView::new(50.0, Rect::default(), Rect::default(), &mut events);
        orb.update(9.5, &mut world);
        assert!(orb.is_alive());
        orb.update(0.5, &mut world);
        assert!(!orb.is_alive());
    }

    #[test]
    fn test_touch_collects_pulse_ignores() {
        let mut events = Vec::new();
        let mut orb = FlowOrb::new(1, Vec2::new(300.0, 300.0));
        assert_eq!(orb.interact(Contact::Pulse, &mut events), None);
        assert!(orb.is_alive());
        assert!(events.is_empty());

        assert_eq!(
            orb.interact(Contact::Touch, &mut events),
            Some(Interaction::FlowCollected)
        );
        assert!(!orb.is_alive());
        assert_eq!(events.len(), 1);
    }

    #[test]
    fn test_spawn_inside_area() {
        let mut rng = Pcg32::seed_from_u64(3);
        for id in 0..40 {
            let c = FlowOrb::spawn(id, &mut rng).rect.center();
            assert!(c.x >= SPAWN_X.0 && c.x <= SPAWN_X.1);
            assert!(c.y >= SPAWN_Y.0 && c.y <= SPAWN_Y.1);
        }
    }
}
