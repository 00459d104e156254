//! Screen-space geometry shared by every mini-game.
//!
//! Level layouts are authored against the viewport edges and the water line
//! rather than absolute pixels, so the same table fits any screen. An
//! [`Anchor`] pair is resolved into a [`Vec2`] once a [`Viewport`] is known.

use serde::{Deserialize, Serialize};

/// Fraction of the viewport height where the water surface sits.
pub const WATER_LINE_RATIO: f32 = 0.65;

/// A point (or offset) in screen units.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Euclidean distance between two points.
    pub fn distance(self, other: Vec2) -> f32 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }
}

/// Size of the drawable area the game is rendered into.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    pub fn center_x(&self) -> f32 {
        self.width / 2.0
    }

    pub fn water_y(&self) -> f32 {
        self.height * WATER_LINE_RATIO
    }
}

impl Default for Viewport {
    /// A landscape tablet, the device the layouts were tuned on.
    fn default() -> Self {
        Self::new(1024.0, 768.0)
    }
}

/// Horizontal anchor for an authored coordinate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AnchorX {
    /// Offset from the left edge.
    Left(f32),
    /// Offset inward from the right edge.
    Right(f32),
    /// Offset from the horizontal centre.
    Center(f32),
}

/// Vertical anchor for an authored coordinate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AnchorY {
    /// Offset from the top edge.
    Top(f32),
    /// Offset upward from the bottom edge.
    Bottom(f32),
    /// Offset from the water line (negative is above the water).
    Water(f32),
}

/// An authored position, resolved against a viewport on demand.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Anchor {
    pub x: AnchorX,
    pub y: AnchorY,
}

impl Anchor {
    pub const fn new(x: AnchorX, y: AnchorY) -> Self {
        Self { x, y }
    }

    pub fn resolve(&self, viewport: &Viewport) -> Vec2 {
        let x = match self.x {
            AnchorX::Left(dx) => dx,
            AnchorX::Right(dx) => viewport.width - dx,
            AnchorX::Center(dx) => viewport.center_x() + dx,
        };
        let y = match self.y {
            AnchorY::Top(dy) => dy,
            AnchorY::Bottom(dy) => viewport.height - dy,
            AnchorY::Water(dy) => viewport.water_y() + dy,
        };
        Vec2::new(x, y)
    }
}

/// Axis-aligned rectangle (top-left origin).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Inclusive on every edge.
    pub fn contains(&self, p: Vec2) -> bool {
        p.x >= self.x && p.x <= self.x + self.width && p.y >= self.y && p.y <= self.y + self.height
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_distance_is_euclidean() {
        let a = Vec2::new(0.0, 0.0);
        let b = Vec2::new(30.0, 40.0);
        assert!((a.distance(b) - 50.0).abs() < f32::EPSILON);
        assert!((b.distance(a) - 50.0).abs() < f32::EPSILON);
    }

    #[test]
    fn test_anchors_resolve_against_edges_and_water() {
        let vp = Viewport::new(1000.0, 800.0);
        let p = Anchor::new(AnchorX::Right(150.0), AnchorY::Bottom(150.0)).resolve(&vp);
        assert_eq!(p, Vec2::new(850.0, 650.0));

        let p = Anchor::new(AnchorX::Center(-10.0), AnchorY::Water(-70.0)).resolve(&vp);
        assert!((p.x - 490.0).abs() < 0.001);
        assert!((p.y - 450.0).abs() < 0.001);

        let p = Anchor::new(AnchorX::Left(100.0), AnchorY::Top(180.0)).resolve(&vp);
        assert_eq!(p, Vec2::new(100.0, 180.0));
    }

    #[test]
    fn test_rect_contains_edges() {
        let r = Rect::new(20.0, 120.0, 100.0, 50.0);
        assert!(r.contains(Vec2::new(20.0, 120.0)));
        assert!(r.contains(Vec2::new(120.0, 170.0)));
        assert!(!r.contains(Vec2::new(19.9, 130.0)));
        assert!(!r.contains(Vec2::new(50.0, 170.1)));
        assert_eq!(r.center(), Vec2::new(70.0, 145.0));
    }
}
