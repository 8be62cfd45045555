use bevy::math::Vec2;

/// Convert a map pixel-space point (y down) to world space (y up).
pub fn map_to_world(point: Vec2) -> Vec2 {
    Vec2::new(point.x, -point.y)
}

/// Axis-aligned rectangle in map pixel-space.
///
/// The origin is the top-left corner of the map and `y` grows downward,
/// matching the way map assets are authored. Width and height are never
/// negative.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct PixelRect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl PixelRect {
    /// Create a rectangle; negative extents are clamped to zero.
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width: width.max(0.0),
            height: height.max(0.0),
        }
    }

    /// Zero-area rectangle at the origin. Intersects nothing.
    pub const EMPTY: Self = Self {
        x: 0.0,
        y: 0.0,
        width: 0.0,
        height: 0.0,
    };

    pub fn from_corner(corner: Vec2, size: Vec2) -> Self {
        Self::new(corner.x, corner.y, size.x, size.y)
    }

    pub fn left(&self) -> f32 {
        self.x
    }

    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    pub fn top(&self) -> f32 {
        self.y
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    pub fn size(&self) -> Vec2 {
        Vec2::new(self.width, self.height)
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    /// Middle of the bottom edge.
    pub fn mid_bottom(&self) -> Vec2 {
        Vec2::new(self.x + self.width / 2.0, self.bottom())
    }

    /// Same size, moved so that its bottom-edge midpoint sits on `point`.
    pub fn with_mid_bottom(&self, point: Vec2) -> Self {
        Self {
            x: point.x - self.width / 2.0,
            y: point.y - self.height,
            ..*self
        }
    }

    /// True if the rectangle has no area.
    pub fn is_empty(&self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }

    /// Strict overlap test.
    ///
    /// Rectangles that only share an edge do not intersect, and an empty
    /// rectangle never intersects anything.
    pub fn intersects(&self, other: &PixelRect) -> bool {
        if self.is_empty() || other.is_empty() {
            return false;
        }

        self.left() < other.right()
            && other.left() < self.right()
            && self.top() < other.bottom()
            && other.top() < self.bottom()
    }

    /// Index of the first rectangle in `others` that intersects this one.
    pub fn first_intersecting<'a, I>(&self, others: I) -> Option<usize>
    where
        I: IntoIterator<Item = &'a PixelRect>,
    {
        others.into_iter().position(|other| self.intersects(other))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn overlapping_rects_intersect() {
        let a = PixelRect::new(0.0, 0.0, 10.0, 10.0);
        let b = PixelRect::new(5.0, 5.0, 10.0, 10.0);
        assert!(a.intersects(&b));
        assert!(b.intersects(&a));
    }

    #[test]
    fn touching_edges_do_not_intersect() {
        let a = PixelRect::new(0.0, 0.0, 10.0, 10.0);
        let right = PixelRect::new(10.0, 0.0, 10.0, 10.0);
        let below = PixelRect::new(0.0, 10.0, 10.0, 10.0);
        assert!(!a.intersects(&right));
        assert!(!a.intersects(&below));
    }

    #[test]
    fn empty_rect_intersects_nothing() {
        let big = PixelRect::new(-100.0, -100.0, 500.0, 500.0);
        assert!(!PixelRect::EMPTY.intersects(&big));
        assert!(!big.intersects(&PixelRect::new(10.0, 10.0, 0.0, 5.0)));
    }

    #[test]
    fn negative_extent_is_clamped() {
        let r = PixelRect::new(3.0, 4.0, -2.0, 7.0);
        assert_eq!(r.width, 0.0);
        assert!(r.is_empty());
    }

    #[test]
    fn mid_bottom_alignment() {
        let body = PixelRect::new(10.0, 20.0, 32.0, 32.0);
        let feet = PixelRect::new(0.0, 0.0, 16.0, 12.0).with_mid_bottom(body.mid_bottom());
        assert_eq!(feet, PixelRect::new(18.0, 40.0, 16.0, 12.0));
        assert_eq!(feet.bottom(), body.bottom());
    }

    #[test]
    fn first_intersecting_keeps_declaration_order() {
        let probe = PixelRect::new(0.0, 0.0, 4.0, 4.0);
        let list = [
            PixelRect::new(50.0, 50.0, 4.0, 4.0),
            PixelRect::new(2.0, 2.0, 4.0, 4.0),
            PixelRect::new(1.0, 1.0, 4.0, 4.0),
        ];
        assert_eq!(probe.first_intersecting(&list), Some(1));
        assert_eq!(PixelRect::EMPTY.first_intersecting(&list), None);
    }

    #[test]
    fn world_space_flips_y() {
        assert_eq!(map_to_world(Vec2::new(3.0, 4.0)), Vec2::new(3.0, -4.0));
    }
}
