//! Buttons and keyboard/mouse menus shared by the scenes

use glam::Vec2;

use crate::audio::{AudioPort, SoundEffect};
use crate::platform::{InputEvent, Key};
use crate::renderer::{Canvas, Color, colors, with_alpha};
use crate::sim::Rect;

#[derive(Debug, Clone, PartialEq)]
pub struct Button {
    pub rect: Rect,
    pub label: &'static str,
}

impl Button {
    pub fn new(rect: Rect, label: &'static str) -> Self {
        Self { rect, label }
    }

    pub fn contains(&self, pos: Vec2) -> bool {
        self.rect.contains_point(pos)
    }

    pub fn draw(&self, canvas: &mut dyn Canvas, base: Color, highlighted: bool) {
        let fill = if highlighted { base } else { with_alpha(base, 0.6) };
        if highlighted {
            let glow = Rect::new(
                self.rect.x - 4.0,
                self.rect.y - 4.0,
                self.rect.w + 8.0,
                self.rect.h + 8.0,
            );
            canvas.rect(glow, with_alpha(colors::WHITE, 0.3));
        }
        canvas.rect(self.rect, fill);
        let text_pos = Vec2::new(self.rect.x + 16.0, self.rect.center().y - 10.0);
        canvas.text(text_pos, self.label, 20.0, colors::WHITE);
    }
}

/// Which arrow keys move the cursor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    Vertical,
    Horizontal,
}

/// A row or column of buttons with a wrapping cursor
#[derive(Debug, Clone, PartialEq)]
pub struct Menu {
    pub buttons: Vec<Button>,
    pub selected: usize,
    axis: Axis,
}

impl Menu {
    pub fn new(buttons: Vec<Button>, axis: Axis) -> Self {
        Self {
            buttons,
            selected: 0,
            axis,
        }
    }

    fn step(&mut self, forward: bool) {
        let n = self.buttons.len();
        if n == 0 {
            return;
        }
        self.selected = if forward {
            (self.selected + 1) % n
        } else {
            (self.selected + n - 1) % n
        };
    }

    /// Move the cursor on arrows/hover and report the index activated by
    /// Confirm or a click. Sounds are played here.
    pub fn handle(&mut self, event: &InputEvent, audio: &mut dyn AudioPort) -> Option<usize> {
        let (back, forward) = match self.axis {
            Axis::Vertical => (Key::Up, Key::Down),
            Axis::Horizontal => (Key::Left, Key::Right),
        };
        match *event {
            InputEvent::KeyDown(k) if k == back || k == forward => {
                self.step(k == forward);
                audio.play(SoundEffect::MenuSelect, 1.0);
                None
            }
            InputEvent::KeyDown(Key::Confirm) if !self.buttons.is_empty() => {
                audio.play(SoundEffect::ButtonClick, 1.0);
                Some(self.selected)
            }
            InputEvent::MouseMove(pos) => {
                if let Some(i) = self.hit(pos) {
                    if i != self.selected {
                        self.selected = i;
                        audio.play(SoundEffect::Hover, 1.0);
                    }
                }
                None
            }
            InputEvent::MouseDown(pos) => {
                let i = self.hit(pos)?;
                self.selected = i;
                audio.play(SoundEffect::ButtonClick, 1.0);
                Some(i)
            }
            _ => None,
        }
    }

    pub fn hit(&self, pos: Vec2) -> Option<usize> {
        self.buttons.iter().position(|b| b.contains(pos))
    }

    pub fn draw(&self, canvas: &mut dyn Canvas, base: Color) {
        for (i, button) in self.buttons.iter().enumerate() {
            button.draw(canvas, base, i == self.selected);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::AudioLog;

    fn menu() -> Menu {
        Menu::new(
            vec![
                Button::new(Rect::new(0.0, 0.0, 100.0, 40.0), "A"),
                Button::new(Rect::new(0.0, 50.0, 100.0, 40.0), "B"),
                Button::new(Rect::new(0.0, 100.0, 100.0, 40.0), "C"),
            ],
            Axis::Vertical,
        )
    }

    #[test]
    fn test_cursor_wraps() {
        let mut m = menu();
        let mut audio = AudioLog::default();
        m.handle(&InputEvent::KeyDown(Key::Up), &mut audio);
        assert_eq!(m.selected, 2);
        m.handle(&InputEvent::KeyDown(Key::Down), &mut audio);
        assert_eq!(m.selected, 0);
        // Wrong axis does nothing
        m.handle(&InputEvent::KeyDown(Key::Right), &mut audio);
        assert_eq!(m.selected, 0);
        assert_eq!(audio.count(SoundEffect::MenuSelect), 2);
    }

    #[test]
    fn test_hover_and_click() {
        let mut m = menu();
        let mut audio = AudioLog::default();
        assert_eq!(m.handle(&InputEvent::MouseMove(Vec2::new(10.0, 60.0)), &mut audio), None);
        assert_eq!(m.selected, 1);
        // Hovering the same button again stays quiet
        m.handle(&InputEvent::MouseMove(Vec2::new(20.0, 70.0)), &mut audio);
        assert_eq!(audio.count(SoundEffect::Hover), 1);

        assert_eq!(m.handle(&InputEvent::MouseDown(Vec2::new(10.0, 110.0)), &mut audio), Some(2));
        assert_eq!(m.handle(&InputEvent::MouseDown(Vec2::new(500.0, 500.0)), &mut audio), None);
        assert_eq!(m.handle(&InputEvent::KeyDown(Key::Confirm), &mut audio), Some(2));
    }
}
