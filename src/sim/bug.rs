//! Bugs - the falling distractions
//!
//! One record shared by all variants; `BugKind` carries what differs.
//! Lifecycle: spawned above the arena, falls with a sideways wobble, and ends
//! by being swatted, by reaching a plant, or by leaving the bottom edge.

use glam::Vec2;
use rand::Rng;
use rand::seq::IndexedRandom;
use serde::{Deserialize, Serialize};

use super::collision::Rect;
use super::entity::{Contact, Entity, Interaction, WorldView};
use super::particle::ParticleKind;
use super::state::GameEvent;
use crate::consts::ARENA_WIDTH;
use crate::renderer::{Canvas, Color, colors, rgb};
use crate::tuning;

/// Spawn height (centre), just above the visible arena
pub const SPAWN_Y: f32 = -20.0;
/// Horizontal spawn margin from either wall
pub const SPAWN_MARGIN: f32 = 60.0;
/// Random spread applied to the per-level base speed
pub const SPEED_VARIATION: f32 = 0.3;
/// Focus lost when the player swats a notification badge
pub const NOTIF_FOCUS_PENALTY: f32 = 10.0;

const PLANT_HIT_PARTICLES: u32 = 8;
const SWAT_PARTICLES: u32 = 10;
const POPUP_SWAT_PARTICLES: u32 = 15;
const PULSE_PARTICLES: u32 = 12;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BugKind {
    /// Chat bubble - plain score
    Chat,
    /// Notification badge - worth more, but costs focus when swatted
    Notif,
    /// Popup window - opens a question instead of paying score
    Popup,
}

impl BugKind {
    pub const ALL: [BugKind; 3] = [BugKind::Chat, BugKind::Notif, BugKind::Popup];

    pub fn size(self) -> Vec2 {
        match self {
            BugKind::Chat => Vec2::new(32.0, 32.0),
            BugKind::Notif => Vec2::new(28.0, 28.0),
            BugKind::Popup => Vec2::new(36.0, 30.0),
        }
    }

    /// Score reward, also the damage dealt to a plant
    pub fn value(self) -> u32 {
        match self {
            BugKind::Chat => 7,
            BugKind::Notif => 10,
            BugKind::Popup => 9,
        }
    }

    pub fn focus_penalty(self) -> f32 {
        match self {
            BugKind::Notif => NOTIF_FOCUS_PENALTY,
            _ => 0.0,
        }
    }

    pub fn color(self) -> Color {
        match self {
            BugKind::Chat => colors::CHAT_BUG,
            BugKind::Notif => colors::NOTIF_BUG,
            BugKind::Popup => colors::POPUP_BUG,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            BugKind::Chat => "chat",
            BugKind::Notif => "notif",
            BugKind::Popup => "popup",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bug {
    pub id: u32,
    pub kind: BugKind,
    pub rect: Rect,
    /// Fall speed in pixels per 1/60 s
    pub speed: f32,
    pub value: u32,
    /// Per-instance wobble phase and amplitude
    pub wobble_phase: f32,
    pub wobble_amount: f32,
    alive: bool,
}

impl Bug {
    pub fn new(id: u32, kind: BugKind, center: Vec2, speed: f32) -> Self {
        Self {
            id,
            kind,
            rect: Rect::from_center(center, kind.size()),
            speed,
            value: kind.value(),
            wobble_phase: 0.0,
            wobble_amount: 0.0,
            alive: true,
        }
    }

    /// Random bug for a level: uniform kind, random column, level speed ± variation
    pub fn spawn(id: u32, level_id: u32, rng: &mut impl Rng) -> Self {
        let kind = *BugKind::ALL.choose(rng).unwrap_or(&BugKind::Chat);
        let x = rng.random_range(SPAWN_MARGIN..=ARENA_WIDTH - SPAWN_MARGIN).round();
        let speed = tuning::bug_base_speed(level_id)
            + rng.random_range(-SPEED_VARIATION..SPEED_VARIATION);

        let mut bug = Self::new(id, kind, Vec2::new(x, SPAWN_Y), speed);
        bug.wobble_phase = rng.random_range(0.0..std::f32::consts::TAU);
        bug.wobble_amount = rng.random_range(0.5..2.0);
        bug
    }

    /// Fall velocity in pixels per second
    pub fn fall_rate(&self) -> f32 {
        self.speed * 60.0
    }

    fn destroy(&mut self) {
        self.alive = false;
    }
}

impl Entity for Bug {
    fn bounds(&self) -> Rect {
        self.rect
    }

    fn is_alive(&self) -> bool {
        self.alive
    }

    fn update(&mut self, dt: f32, world: &mut WorldView<'_>) {
        if !self.alive {
            return;
        }

        self.rect.y += self.fall_rate() * dt;
        self.wobble_phase += dt * 3.0;
        self.rect.x += self.wobble_phase.sin() * self.wobble_amount * 60.0 * dt;

        // Fell past the bottom: no reward, no penalty
        if self.rect.top() > world.arena.bottom() {
            self.destroy();
            return;
        }

        let hit = world
            .plants
            .iter_mut()
            .find(|p| p.is_alive() && p.bounds().intersects(&self.rect));
        if let Some(plant) = hit {
            let damage = self.value as f32;
            plant.damage(damage);
            self.destroy();

            world.events.push(GameEvent::BugReachedPlant {
                plant_id: plant.id,
                damage,
            });
            if !plant.is_alive() {
                world.events.push(GameEvent::PlantLost { plant_id: plant.id });
            }
            world.events.push(GameEvent::Burst {
                at: self.rect.center(),
                kind: ParticleKind::Spark,
                count: PLANT_HIT_PARTICLES,
            });
        }
    }

    fn draw(&self, canvas: &mut dyn Canvas) {
        let c = self.rect.center();
        let half = self.rect.w / 2.0;
        match self.kind {
            BugKind::Chat => {
                canvas.circle(c, half, self.kind.color());
                canvas.circle(c, half - 4.0, colors::WHITE);
                for i in 0..3 {
                    let dot = c + Vec2::new(-5.0 + i as f32 * 5.0, 0.0);
                    canvas.circle(dot, 2.0, rgb(100, 100, 100));
                }
            }
            BugKind::Notif => {
                canvas.circle(c, half, self.kind.color());
                canvas.circle(c, half - 2.0, colors::WHITE);
                canvas.circle(c, half - 4.0, self.kind.color());
            }
            BugKind::Popup => {
                canvas.rect(self.rect, self.kind.color());
                let pad = 8.0;
                let (l, r) = (self.rect.left() + pad, self.rect.right() - pad);
                let (t, b) = (self.rect.top() + pad, self.rect.bottom() - pad);
                canvas.line(Vec2::new(l, t), Vec2::new(r, b), 3.0, rgb(100, 100, 100));
                canvas.line(Vec2::new(r, t), Vec2::new(l, b), 3.0, rgb(100, 100, 100));
            }
        }
    }

    fn interact(&mut self, contact: Contact, events: &mut Vec<GameEvent>) -> Option<Interaction> {
        if !self.alive {
            return None;
        }
        self.destroy();
        let at = self.rect.center();

        if contact == Contact::Pulse {
            events.push(GameEvent::Burst {
                at,
                kind: ParticleKind::Pop,
                count: PULSE_PARTICLES,
            });
            return Some(Interaction::Repelled { value: self.value });
        }

        let count = match self.kind {
            BugKind::Popup => POPUP_SWAT_PARTICLES,
            _ => SWAT_PARTICLES,
        };
        events.push(GameEvent::Burst {
            at,
            kind: ParticleKind::Spark,
            count,
        });

        match self.kind {
            BugKind::Popup => Some(Interaction::PopupTriggered),
            kind => Some(Interaction::BugDestroyed {
                kind,
                value: self.value,
                focus_penalty: kind.focus_penalty(),
            }),
        }
    }
}
