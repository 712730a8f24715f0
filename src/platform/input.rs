//! Logical input events

use glam::Vec2;

/// Logical keys; the shell decides which physical keys map here
/// (arrows/WASD, Enter/Space, Escape, E, T/1, F/2)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Up,
    Down,
    Left,
    Right,
    Confirm,
    Cancel,
    Interact,
    True,
    False,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    KeyDown(Key),
    KeyUp(Key),
    /// Pointer position in arena coordinates
    MouseMove(Vec2),
    MouseDown(Vec2),
    /// Window closed
    Quit,
}

/// Held-key state for continuous steering
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Controls {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
}

impl Controls {
    /// Track a key event. Returns true when the event changed held state.
    pub fn apply(&mut self, event: &InputEvent) -> bool {
        let (key, down) = match *event {
            InputEvent::KeyDown(k) => (k, true),
            InputEvent::KeyUp(k) => (k, false),
            _ => return false,
        };
        let slot = match key {
            Key::Up => &mut self.up,
            Key::Down => &mut self.down,
            Key::Left => &mut self.left,
            Key::Right => &mut self.right,
            _ => return false,
        };
        let changed = *slot != down;
        *slot = down;
        changed
    }

    /// Steering direction, each component in {-1, 0, 1}
    pub fn steer(&self) -> Vec2 {
        let axis = |neg: bool, pos: bool| (pos as i8 - neg as i8) as f32;
        Vec2::new(axis(self.left, self.right), axis(self.up, self.down))
    }

    pub fn release_all(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_steer_from_held_keys() {
        let mut c = Controls::default();
        assert_eq!(c.steer(), Vec2::ZERO);
        c.apply(&InputEvent::KeyDown(Key::Left));
        c.apply(&InputEvent::KeyDown(Key::Down));
        assert_eq!(c.steer(), Vec2::new(-1.0, 1.0));
        c.apply(&InputEvent::KeyDown(Key::Right));
        assert_eq!(c.steer(), Vec2::new(0.0, 1.0));
        c.apply(&InputEvent::KeyUp(Key::Down));
        assert_eq!(c.steer(), Vec2::ZERO);
    }

    #[test]
    fn test_non_steering_events_ignored() {
        let mut c = Controls::default();
        assert!(!c.apply(&InputEvent::KeyDown(Key::Confirm)));
        assert!(!c.apply(&InputEvent::MouseDown(Vec2::ZERO)));
        assert!(c.apply(&InputEvent::KeyDown(Key::Up)));
        assert!(!c.apply(&InputEvent::KeyDown(Key::Up)));
    }
}
