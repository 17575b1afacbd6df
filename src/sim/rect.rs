//! Axis-aligned integer rectangles
//!
//! Every entity in the world is a rectangle with a top-left corner and a
//! size. Overlap is strict: rectangles that only share an edge do not touch.

use glam::Vec2;

/// An axis-aligned rectangle in world units
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
}

impl Rect {
    pub const fn new(x: i32, y: i32, w: i32, h: i32) -> Self {
        Self { x, y, w, h }
    }

    /// Square of side `size` centered on (cx, cy)
    pub fn centered(cx: i32, cy: i32, size: i32) -> Self {
        Self::new(cx - size / 2, cy - size / 2, size, size)
    }

    #[inline]
    pub fn left(&self) -> i32 {
        self.x
    }

    #[inline]
    pub fn right(&self) -> i32 {
        self.x + self.w
    }

    #[inline]
    pub fn top(&self) -> i32 {
        self.y
    }

    #[inline]
    pub fn bottom(&self) -> i32 {
        self.y + self.h
    }

    /// Integer center (rounds toward the top-left)
    #[inline]
    pub fn center(&self) -> (i32, i32) {
        (self.x + self.w / 2, self.y + self.h / 2)
    }

    pub fn center_vec(&self) -> Vec2 {
        let (cx, cy) = self.center();
        Vec2::new(cx as f32, cy as f32)
    }

    pub fn translate(&mut self, dx: i32, dy: i32) {
        self.x += dx;
        self.y += dy;
    }

    /// Strict overlap test
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.w > 0
            && self.h > 0
            && other.w > 0
            && other.h > 0
            && self.x < other.right()
            && self.right() > other.x
            && self.y < other.bottom()
            && self.bottom() > other.y
    }

    /// Point test: left/top edges inclusive, right/bottom exclusive
    pub fn contains_point(&self, px: i32, py: i32) -> bool {
        px >= self.x && px < self.right() && py >= self.y && py < self.bottom()
    }

    /// True when `self` lies entirely inside `bounds`
    pub fn is_inside(&self, bounds: &Rect) -> bool {
        self.x >= bounds.x
            && self.y >= bounds.y
            && self.right() <= bounds.right()
            && self.bottom() <= bounds.bottom()
    }

    /// Move (never resize) so the rectangle sits inside `bounds`.
    ///
    /// A rectangle larger than the bounds on an axis is centered on that axis.
    pub fn clamp_within(&mut self, bounds: &Rect) {
        self.x = clamp_axis(self.x, self.w, bounds.x, bounds.w);
        self.y = clamp_axis(self.y, self.h, bounds.y, bounds.h);
    }
}

fn clamp_axis(pos: i32, len: i32, min: i32, span: i32) -> i32 {
    if len >= span {
        min + span / 2 - len / 2
    } else if pos < min {
        min
    } else if pos + len > min + span {
        min + span - len
    } else {
        pos
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_edge_contact_is_not_overlap() {
        let a = Rect::new(0, 0, 10, 10);
        let b = Rect::new(10, 0, 10, 10);
        assert!(!a.overlaps(&b));

        let c = Rect::new(9, 9, 10, 10);
        assert!(a.overlaps(&c));
        assert!(c.overlaps(&a));
    }

    #[test]
    fn test_clamp_within() {
        let bounds = Rect::new(0, 0, 100, 80);

        let mut r = Rect::new(-5, 90, 24, 24);
        r.clamp_within(&bounds);
        assert_eq!((r.x, r.y), (0, 56));
        assert!(r.is_inside(&bounds));

        let mut inside = Rect::new(10, 10, 24, 24);
        inside.clamp_within(&bounds);
        assert_eq!((inside.x, inside.y), (10, 10));
    }

    #[test]
    fn test_contains_point_half_open() {
        let r = Rect::new(10, 10, 5, 5);
        assert!(r.contains_point(10, 10));
        assert!(r.contains_point(14, 14));
        assert!(!r.contains_point(15, 12));
    }

    #[test]
    fn test_centered() {
        let r = Rect::centered(100, 50, 20);
        assert_eq!(r, Rect::new(90, 40, 20, 20));
        assert_eq!(r.center(), (100, 50));
    }
}
