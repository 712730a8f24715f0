//! Entity capability contract
//!
//! Every simulated object is an AABB with an alive flag. Concrete entity
//! types live in their own modules and are stored in typed collections on
//! [`Garden`](super::Garden); this trait is the one flat polymorphic layer
//! they share.

use glam::Vec2;

use super::bug::BugKind;
use super::collision::Rect;
use super::plant::Plant;
use super::state::GameEvent;
use crate::renderer::Canvas;

/// What an entity may see and touch while it updates
pub struct WorldView<'a> {
    /// Current session focus (0-100)
    pub focus: f32,
    /// Whole arena
    pub arena: Rect,
    /// Walkable part of the arena (below the HUD band)
    pub field: Rect,
    /// Steering direction from input, components in {-1, 0, 1}
    pub steer: Vec2,
    /// Sibling plants (empty while the plants themselves update)
    pub plants: &'a mut [Plant],
    /// Outbox for effects the owning scene applies
    pub events: &'a mut Vec<GameEvent>,
}

impl<'a> WorldView<'a> {
    pub fn new(focus: f32, arena: Rect, field: Rect, events: &'a mut Vec<GameEvent>) -> Self {
        Self {
            focus,
            arena,
            field,
            steer: Vec2::ZERO,
            plants: &mut [],
            events,
        }
    }

    pub fn with_steer(mut self, steer: Vec2) -> Self {
        self.steer = steer;
        self
    }

    pub fn with_plants(mut self, plants: &'a mut [Plant]) -> Self {
        self.plants = plants;
        self
    }
}

/// How the player reached an entity
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Contact {
    /// Bounding boxes overlap
    Touch,
    /// Caught in the player's interaction pulse
    Pulse,
}

/// Result reported back to the scene by [`Entity::interact`]
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Interaction {
    /// A bug was swatted; the scene pays out `value` and applies the penalty
    BugDestroyed {
        kind: BugKind,
        value: u32,
        focus_penalty: f32,
    },
    /// A popup bug was swatted; the scene may open a question
    PopupTriggered,
    /// A flow orb was picked up
    FlowCollected,
    /// A bug was pushed away by the interaction pulse
    Repelled { value: u32 },
}

pub trait Entity {
    /// Current bounding box
    fn bounds(&self) -> Rect;

    fn is_alive(&self) -> bool;

    /// Advance by `dt` seconds. Called at most once per tick.
    fn update(&mut self, dt: f32, world: &mut WorldView<'_>);

    /// Issue draw calls. Must not mutate state.
    fn draw(&self, canvas: &mut dyn Canvas);

    /// React to the player. Removal and particle bursts happen here,
    /// before the result is returned.
    fn interact(&mut self, _contact: Contact, _events: &mut Vec<GameEvent>) -> Option<Interaction> {
        None
    }
}

/// Update every entity in a collection, then drop the dead ones
pub fn update_all<E: Entity>(items: &mut Vec<E>, dt: f32, world: &mut WorldView<'_>) {
    for item in items.iter_mut() {
        item.update(dt, world);
    }
    items.retain(|e| e.is_alive());
}

/// View a typed collection as trait objects (for `Player::interact_nearby`)
pub fn as_dyn<'a, E: Entity + 'a>(items: &'a mut [E]) -> impl Iterator<Item = &'a mut dyn Entity> + 'a {
    items.iter_mut().map(|e| e as &mut dyn Entity)
}
