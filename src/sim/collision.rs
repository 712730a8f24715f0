//! Axis-aligned boxes and overlap tests
//!
//! Every entity is an AABB in screen space (y grows downward). Overlap is
//! strict: boxes that only share an edge do not collide.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Axis-aligned rectangle (top-left corner + size)
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    /// Rectangle of the given size centred on `center`
    pub fn from_center(center: Vec2, size: Vec2) -> Self {
        Self {
            x: center.x - size.x / 2.0,
            y: center.y - size.y / 2.0,
            w: size.x,
            h: size.y,
        }
    }

    #[inline]
    pub fn left(&self) -> f32 {
        self.x
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.x + self.w
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.y
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.y + self.h
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        Vec2::new(self.x + self.w / 2.0, self.y + self.h / 2.0)
    }

    #[inline]
    pub fn size(&self) -> Vec2 {
        Vec2::new(self.w, self.h)
    }

    pub fn translate(&mut self, delta: Vec2) {
        self.x += delta.x;
        self.y += delta.y;
    }

    /// Strict overlap test
    pub fn intersects(&self, other: &Rect) -> bool {
        self.left() < other.right()
            && other.left() < self.right()
            && self.top() < other.bottom()
            && other.top() < self.bottom()
    }

    /// Point containment (right/bottom edges exclusive)
    pub fn contains_point(&self, p: Vec2) -> bool {
        p.x >= self.left() && p.x < self.right() && p.y >= self.top() && p.y < self.bottom()
    }

    /// Shift this rect so it lies inside `outer`. A rect larger than `outer`
    /// along an axis is centred on that axis instead.
    pub fn clamp_within(&mut self, outer: &Rect) {
        if self.w >= outer.w {
            self.x = outer.x + (outer.w - self.w) / 2.0;
        } else {
            self.x = self.x.clamp(outer.left(), outer.right() - self.w);
        }
        if self.h >= outer.h {
            self.y = outer.y + (outer.h - self.h) / 2.0;
        } else {
            self.y = self.y.clamp(outer.top(), outer.bottom() - self.h);
        }
    }
}

/// True when the centres of two boxes lie within `radius` of each other
pub fn centers_within(a: &Rect, b: &Rect, radius: f32) -> bool {
    a.center().distance_squared(b.center()) <= radius * radius
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_center() {
        let r = Rect::from_center(Vec2::new(100.0, 50.0), Vec2::new(20.0, 10.0));
        assert_eq!(r, Rect::new(90.0, 45.0, 20.0, 10.0));
        assert_eq!(r.center(), Vec2::new(100.0, 50.0));
    }

    #[test]
    fn test_intersects_is_strict() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let touching = Rect::new(10.0, 0.0, 10.0, 10.0);
        let overlapping = Rect::new(9.0, 9.0, 10.0, 10.0);
        assert!(!a.intersects(&touching));
        assert!(a.intersects(&overlapping));
        assert!(overlapping.intersects(&a));
    }

    #[test]
    fn test_clamp_within() {
        let field = Rect::new(0.0, 64.0, 1000.0, 586.0);

        let mut r = Rect::new(-30.0, 10.0, 40.0, 46.0);
        r.clamp_within(&field);
        assert_eq!(r.x, 0.0);
        assert_eq!(r.y, 64.0);

        let mut r = Rect::new(990.0, 640.0, 40.0, 46.0);
        r.clamp_within(&field);
        assert_eq!(r.right(), 1000.0);
        assert_eq!(r.bottom(), 650.0);

        let mut huge = Rect::new(0.0, 0.0, 2000.0, 10.0);
        huge.clamp_within(&field);
        assert_eq!(huge.center().x, 500.0);
    }

    #[test]
    fn test_centers_within() {
        let a = Rect::from_center(Vec2::new(0.0, 0.0), Vec2::splat(10.0));
        let b = Rect::from_center(Vec2::new(30.0, 40.0), Vec2::splat(10.0));
        assert!(centers_within(&a, &b, 50.0));
        assert!(!centers_within(&a, &b, 49.9));
    }
}
