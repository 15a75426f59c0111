//! Axis-aligned rectangle math
//!
//! Entities, the player and both hitboxes are plain rects. Coordinates grow
//! right and down, `min` is the top-left corner.

use glam::Vec2;

/// An axis-aligned rectangle (top-left anchored)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub min: Vec2,
    pub size: Vec2,
}

impl Rect {
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self {
            min: Vec2::new(x, y),
            size: Vec2::new(w, h),
        }
    }

    /// Build a rect sitting on `bottom` (ground-anchored spawns)
    pub fn anchored_bottom(x: f32, bottom: f32, w: f32, h: f32) -> Self {
        Self::new(x, bottom - h, w, h)
    }

    #[inline]
    pub fn left(&self) -> f32 {
        self.min.x
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.min.x + self.size.x
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.min.y
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.min.y + self.size.y
    }

    /// Move the rect so its bottom edge sits at `bottom`
    pub fn set_bottom(&mut self, bottom: f32) {
        self.min.y = bottom - self.size.y;
    }

    /// Shrink by `dx`/`dy` total (half on each side), keeping the center
    pub fn deflate(&self, dx: f32, dy: f32) -> Self {
        Self {
            min: self.min + Vec2::new(dx / 2.0, dy / 2.0),
            size: self.size - Vec2::new(dx, dy),
        }
    }

    /// Overlap test. Shared edges do not count as contact.
    pub fn intersects(&self, other: &Rect) -> bool {
        self.left() < other.right()
            && other.left() < self.right()
            && self.top() < other.bottom()
            && other.top() < self.bottom()
    }
}
