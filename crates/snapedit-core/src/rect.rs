//! Placement rectangles.
//!
//! [`Rect`] describes an axis-aligned region in pixel coordinates. The
//! compositor uses it to validate sticker placement; the frontend's region
//! selection also yields one (only the top-left corner is consumed there).

/// Axis-aligned rectangle in pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rect {
    /// Left edge.
    pub x: u32,
    /// Top edge.
    pub y: u32,
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl Rect {
    /// Creates a rectangle from its top-left corner and size.
    #[inline]
    pub fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Creates a rectangle at the origin covering `width` x `height`.
    #[inline]
    pub fn from_size(width: u32, height: u32) -> Self {
        Self::new(0, 0, width, height)
    }

    /// Returns the exclusive right edge (`x + width`).
    #[inline]
    pub fn right(&self) -> u64 {
        self.x as u64 + self.width as u64
    }

    /// Returns the exclusive bottom edge (`y + height`).
    #[inline]
    pub fn bottom(&self) -> u64 {
        self.y as u64 + self.height as u64
    }

    /// Returns `true` if the rectangle has zero area.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Returns `true` if `other` lies entirely within this rectangle.
    ///
    /// Edges may touch: a 10x10 sticker at (20, 20) fits a 30x30 image.
    #[inline]
    pub fn contains_rect(&self, other: &Rect) -> bool {
        other.x >= self.x
            && other.y >= self.y
            && other.right() <= self.right()
            && other.bottom() <= self.bottom()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contains_rect_inside() {
        let outer = Rect::from_size(30, 30);
        assert!(outer.contains_rect(&Rect::new(5, 5, 10, 10)));
    }

    #[test]
    fn test_contains_rect_touching_edge() {
        let outer = Rect::from_size(30, 30);
        assert!(outer.contains_rect(&Rect::new(20, 20, 10, 10)));
    }

    #[test]
    fn test_contains_rect_overflow() {
        let outer = Rect::from_size(30, 30);
        assert!(!outer.contains_rect(&Rect::new(25, 5, 10, 10)));
        assert!(!outer.contains_rect(&Rect::new(5, 25, 10, 10)));
    }

    #[test]
    fn test_edges_do_not_overflow_u32() {
        let r = Rect::new(u32::MAX, u32::MAX, u32::MAX, u32::MAX);
        assert_eq!(r.right(), u32::MAX as u64 * 2);
    }
}
