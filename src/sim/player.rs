//! The gardener avatar

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::{Rect, centers_within};
use super::entity::{Contact, Entity, Interaction, WorldView};
use super::state::GameEvent;
use crate::consts::{ARENA_HEIGHT, ARENA_WIDTH};
use crate::renderer::{Canvas, colors, rgb, with_alpha};

pub const PLAYER_SIZE: Vec2 = Vec2::new(40.0, 46.0);
/// Movement speed (pixels/s)
pub const PLAYER_SPEED: f32 = 260.0;
/// Reach of the interaction pulse, centre to centre
pub const INTERACT_RADIUS: f32 = 48.0;

/// Starting position, centre of the arena nudged down toward the plants
pub fn start_position() -> Vec2 {
    Vec2::new(ARENA_WIDTH / 2.0, ARENA_HEIGHT / 2.0 + 40.0)
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub rect: Rect,
    pub score: u32,
    /// Bugs pushed away with the pulse
    pub repels: u32,
    /// Pulse ring, 1 when fired, decays to 0
    pub interact_timer: f32,
    /// Cosmetic clocks
    pub walk_timer: f32,
    pub blink_timer: f32,
    pub facing: Vec2,
}

impl Default for Player {
    fn default() -> Self {
        Self::new(start_position())
    }
}

impl Player {
    pub fn new(center: Vec2) -> Self {
        Self {
            rect: Rect::from_center(center, PLAYER_SIZE),
            score: 0,
            repels: 0,
            interact_timer: 0.0,
            walk_timer: 0.0,
            blink_timer: 0.0,
            facing: Vec2::X,
        }
    }

    /// Fire the interaction pulse at everything within `radius`.
    ///
    /// Returns the results of all entities that reacted; repels are already
    /// credited to the player.
    pub fn interact_nearby<'a>(
        &mut self,
        targets: impl IntoIterator<Item = &'a mut dyn Entity>,
        radius: f32,
        events: &mut Vec<GameEvent>,
    ) -> Vec<Interaction> {
        self.interact_timer = 1.0;

        let mut results = Vec::new();
        for target in targets {
            if !target.is_alive() || !centers_within(&self.rect, &target.bounds(), radius) {
                continue;
            }
            if let Some(result) = target.interact(Contact::Pulse, events) {
                if let Interaction::Repelled { value } = result {
                    self.repels += 1;
                    self.score += value;
                }
                results.push(result);
            }
        }
        results
    }
}

impl Entity for Player {
    fn bounds(&self) -> Rect {
        self.rect
    }

    fn is_alive(&self) -> bool {
        true
    }

    fn update(&mut self, dt: f32, world: &mut WorldView<'_>) {
        self.interact_timer = (self.interact_timer - dt * 4.0).max(0.0);
        self.blink_timer += dt;

        let dir = world.steer.normalize_or_zero();
        if dir != Vec2::ZERO {
            self.walk_timer += dt;
            if dir.x != 0.0 {
                self.facing = Vec2::new(dir.x.signum(), 0.0);
            }
        }
        self.rect.translate(dir * PLAYER_SPEED * dt);
        self.rect.clamp_within(&world.field);
    }

    fn draw(&self, canvas: &mut dyn Canvas) {
        let c = self.rect.center();
        let bob = (self.walk_timer * 12.0).sin() * 2.0;

        if self.interact_timer > 0.0 {
            let r = INTERACT_RADIUS * (1.0 - self.interact_timer * 0.5);
            canvas.circle(c, r, with_alpha(colors::ACCENT, 0.35 * self.interact_timer));
        }

        let body = Rect::from_center(c + Vec2::new(0.0, 6.0 + bob), Vec2::new(28.0, 30.0));
        canvas.rect(body, colors::PLAYER);
        let head = c + Vec2::new(0.0, -12.0 + bob);
        canvas.circle(head, 12.0, rgb(250, 220, 180));

        // Blink for a tenth of a second every three seconds
        if self.blink_timer % 3.0 > 0.1 {
            let eye = head + Vec2::new(self.facing.x * 4.0, -1.0);
            canvas.circle(eye + Vec2::new(-3.0, 0.0), 1.5, colors::PLAYER_EYE);
            canvas.circle(eye + Vec2::new(3.0, 0.0), 1.5, colors::PLAYER_EYE);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::HUD_HEIGHT;
    use crate::sim::{Bug, BugKind, FlowOrb, as_dyn};

    fn field() -> Rect {
        Rect::new(0.0, HUD_HEIGHT, ARENA_WIDTH, ARENA_HEIGHT - HUD_HEIGHT)
    }

    fn step(player: &mut Player, steer: Vec2, dt: f32) {
        let mut events = Vec::new();
        let arena = Rect::new(0.0, 0.0, ARENA_WIDTH, ARENA_HEIGHT);
        let mut world = WorldView::new(100.0, arena, field(), &mut events).with_steer(steer);
        player.update(dt, &mut world);
    }

    #[test]
    fn test_starts_at_expected_position() {
        let p = Player::default();
        assert_eq!(p.rect.center(), Vec2::new(500.0, 365.0));
    }

    #[test]
    fn test_diagonal_is_normalised() {
        let mut p = Player::default();
        let start = p.rect.center();
        step(&mut p, Vec2::new(1.0, 1.0), 0.1);
        let moved = p.rect.center().distance(start);
        assert!((moved - PLAYER_SPEED * 0.1).abs() < 1e-3);
    }

    #[test]
    fn test_clamped_to_field() {
        let mut p = Player::default();
        step(&mut p, Vec2::new(0.0, -1.0), 10.0);
        assert_eq!(p.rect.top(), HUD_HEIGHT);
        step(&mut p, Vec2::new(1.0, 0.0), 10.0);
        assert_eq!(p.rect.right(), ARENA_WIDTH);
    }

    #[test]
    fn test_pulse_repels_only_nearby_bugs() {
        let mut p = Player::default();
        let c = p.rect.center();
        let mut bugs = vec![
            Bug::new(1, BugKind::Notif, c + Vec2::new(30.0, 0.0), 1.0),
            Bug::new(2, BugKind::Chat, c + Vec2::new(200.0, 0.0), 1.0),
        ];
        let mut orbs = vec![FlowOrb::new(3, c + Vec2::new(0.0, 20.0))];
        let mut events = Vec::new();

        let results = p.interact_nearby(
            as_dyn(&mut bugs).chain(as_dyn(&mut orbs)),
            INTERACT_RADIUS,
            &mut events,
        );

        assert_eq!(results, vec![Interaction::Repelled { value: 10 }]);
        assert_eq!(p.repels, 1);
        assert_eq!(p.score, 10);
        assert!(!bugs[0].is_alive());
        assert!(bugs[1].is_alive());
        assert!(orbs[0].is_alive());
        assert_eq!(p.interact_timer, 1.0);
    }
}
