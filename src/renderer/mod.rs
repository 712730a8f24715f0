//! Rendering collaborator interface
//!
//! The simulation never talks to a window or GPU. Entities and scenes issue
//! 2D primitive draw calls into a [`Canvas`]; a frontend presents the frame.
//! [`DrawList`] records the calls, which is all a headless run needs.

use glam::Vec2;

use crate::sim::Rect;

/// RGBA color, components in 0-1
pub type Color = [f32; 4];

/// Sink for 2D primitive draw calls, presented once per frame
pub trait Canvas {
    /// Clear the frame to a solid color
    fn fill(&mut self, color: Color);
    /// Filled rectangle
    fn rect(&mut self, rect: Rect, color: Color);
    /// Filled circle
    fn circle(&mut self, center: Vec2, radius: f32, color: Color);
    /// Line segment
    fn line(&mut self, from: Vec2, to: Vec2, width: f32, color: Color);
    /// Text anchored at its top-left corner
    fn text(&mut self, pos: Vec2, text: &str, size: f32, color: Color);
}

/// A recorded draw call
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Fill(Color),
    Rect(Rect, Color),
    Circle { center: Vec2, radius: f32, color: Color },
    Line { from: Vec2, to: Vec2, width: f32, color: Color },
    Text { pos: Vec2, text: String, size: f32, color: Color },
}

/// Canvas that records every call for later presentation or inspection
#[derive(Debug, Clone, Default)]
pub struct DrawList {
    pub commands: Vec<DrawCommand>,
}

impl DrawList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drop the previous frame's commands
    pub fn clear(&mut self) {
        self.commands.clear();
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// All text drawn this frame (handy for asserting on what a scene shows)
    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.commands.iter().filter_map(|c| match c {
            DrawCommand::Text { text, .. } => Some(text.as_str()),
            _ => None,
        })
    }
}

impl Canvas for DrawList {
    fn fill(&mut self, color: Color) {
        self.commands.push(DrawCommand::Fill(color));
    }

    fn rect(&mut self, rect: Rect, color: Color) {
        self.commands.push(DrawCommand::Rect(rect, color));
    }

    fn circle(&mut self, center: Vec2, radius: f32, color: Color) {
        self.commands.push(DrawCommand::Circle {
            center,
            radius,
            color,
        });
    }

    fn line(&mut self, from: Vec2, to: Vec2, width: f32, color: Color) {
        self.commands.push(DrawCommand::Line {
            from,
            to,
            width,
            color,
        });
    }

    fn text(&mut self, pos: Vec2, text: &str, size: f32, color: Color) {
        self.commands.push(DrawCommand::Text {
            pos,
            text: text.to_string(),
            size,
            color,
        });
    }
}

/// Build a color from 0-255 channels
pub const fn rgb(r: u8, g: u8, b: u8) -> Color {
    [r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0, 1.0]
}

/// Same color with a different alpha
pub fn with_alpha(color: Color, alpha: f32) -> Color {
    [color[0], color[1], color[2], alpha.clamp(0.0, 1.0)]
}

/// Colors for game elements
pub mod colors {
    use super::{Color, rgb};

    pub const WHITE: Color = rgb(255, 255, 255);
    pub const BLACK: Color = rgb(0, 0, 0);
    pub const SKY: Color = rgb(230, 245, 255);
    pub const ACCENT: Color = rgb(80, 160, 220);
    pub const FOCUS_GREEN: Color = rgb(34, 139, 34);
    pub const ALERT_RED: Color = rgb(220, 60, 60);
    pub const NOTE_ORANGE: Color = rgb(255, 165, 80);
    pub const SOFT_GREY: Color = rgb(200, 200, 205);
    pub const GRASS_LIGHT: Color = rgb(180, 215, 180);
    pub const GRASS_DARK: Color = rgb(160, 195, 160);
    pub const PARTICLE_GOLD: Color = rgb(255, 215, 0);
    pub const UI_BG: Color = [30.0 / 255.0, 40.0 / 255.0, 50.0 / 255.0, 0.8];
    pub const UI_HIGHLIGHT: Color = rgb(50, 150, 220);

    pub const PLAYER: Color = rgb(120, 200, 255);
    pub const PLAYER_EYE: Color = rgb(20, 30, 40);
    pub const STEM: Color = rgb(70, 120, 60);
    pub const LEAF: Color = rgb(86, 146, 92);
    pub const LEAF_UPPER: Color = rgb(102, 170, 110);
    pub const BLOOM: Color = rgb(250, 220, 110);
    pub const ORB: Color = rgb(160, 230, 255);
    pub const ORB_RING: Color = rgb(120, 200, 255);

    pub const CHAT_BUG: Color = rgb(255, 50, 50);
    pub const NOTIF_BUG: Color = rgb(50, 200, 50);
    pub const POPUP_BUG: Color = rgb(255, 255, 50);
}
