//! Physical pixel units.
//!
//! Everything the seek bar lays out, hit tests or hands to the host is
//! expressed in whole device pixels. Rectangles use edge coordinates
//! (`left`, `top`, `right`, `bottom`) with exclusive right and bottom edges.

use std::ops::{Add, AddAssign, Neg, Sub, SubAssign};

/// Physical pixel coordinate type, supports negative values.
#[derive(Debug, Default, Clone, Copy, PartialEq, PartialOrd, Eq, Ord, Hash)]
pub struct Px(pub i32);

impl Px {
    /// Zero pixels.
    pub const ZERO: Self = Self(0);

    /// Create a new Px instance
    pub const fn new(value: i32) -> Self {
        Px(value)
    }

    /// Convert to f32
    pub fn to_f32(self) -> f32 {
        self.0 as f32
    }

    /// Create from f32, truncating toward zero.
    pub fn from_f32(value: f32) -> Self {
        Px(value as i32)
    }

    /// Halves the value with integer division.
    pub fn half(self) -> Self {
        Px(self.0 / 2)
    }
}

impl Add for Px {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Px(self.0 + rhs.0)
    }
}

impl Sub for Px {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        Px(self.0 - rhs.0)
    }
}

impl Neg for Px {
    type Output = Self;

    fn neg(self) -> Self::Output {
        Px(-self.0)
    }
}

impl AddAssign for Px {
    fn add_assign(&mut self, rhs: Self) {
        self.0 += rhs.0;
    }
}

impl SubAssign for Px {
    fn sub_assign(&mut self, rhs: Self) {
        self.0 -= rhs.0;
    }
}

impl From<i32> for Px {
    fn from(value: i32) -> Self {
        Px(value)
    }
}

/// Physical pixel position type
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PxPosition {
    /// Horizontal coordinate.
    pub x: Px,
    /// Vertical coordinate.
    pub y: Px,
}

impl PxPosition {
    /// The origin.
    pub const ZERO: Self = Self { x: Px(0), y: Px(0) };

    /// Create a new position
    pub const fn new(x: Px, y: Px) -> Self {
        Self { x, y }
    }

    /// Offset the position
    pub fn offset(self, dx: Px, dy: Px) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }
}

impl From<[i32; 2]> for PxPosition {
    fn from([x, y]: [i32; 2]) -> Self {
        Self::new(Px(x), Px(y))
    }
}

/// Physical pixel size.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PxSize {
    /// Width in pixels.
    pub width: Px,
    /// Height in pixels.
    pub height: Px,
}

impl PxSize {
    /// The empty size.
    pub const ZERO: Self = Self {
        width: Px(0),
        height: Px(0),
    };

    /// Creates a new size.
    pub const fn new(width: Px, height: Px) -> Self {
        Self { width, height }
    }
}

/// Axis aligned rectangle in pixels.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PxRect {
    /// Left edge, inclusive.
    pub left: Px,
    /// Top edge, inclusive.
    pub top: Px,
    /// Right edge, exclusive.
    pub right: Px,
    /// Bottom edge, exclusive.
    pub bottom: Px,
}

impl PxRect {
    /// The empty rectangle at the origin.
    pub const ZERO: Self = Self {
        left: Px(0),
        top: Px(0),
        right: Px(0),
        bottom: Px(0),
    };

    /// Creates a rectangle from its four edges.
    pub const fn new(left: Px, top: Px, right: Px, bottom: Px) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    /// Creates a rectangle from an origin and a size.
    pub fn from_origin_size(origin: PxPosition, size: PxSize) -> Self {
        Self::new(
            origin.x,
            origin.y,
            origin.x + size.width,
            origin.y + size.height,
        )
    }

    /// Width of the rectangle.
    pub fn width(&self) -> Px {
        self.right - self.left
    }

    /// Height of the rectangle.
    pub fn height(&self) -> Px {
        self.bottom - self.top
    }

    /// Size of the rectangle.
    pub fn size(&self) -> PxSize {
        PxSize::new(self.width(), self.height())
    }

    /// Horizontal center, rounded toward the left edge.
    pub fn center_x(&self) -> Px {
        Px((self.left.0 + self.right.0) / 2)
    }

    /// Vertical center, rounded toward the top edge.
    pub fn center_y(&self) -> Px {
        Px((self.top.0 + self.bottom.0) / 2)
    }

    /// Returns `true` when the rectangle has no area.
    pub fn is_empty(&self) -> bool {
        self.left >= self.right || self.top >= self.bottom
    }

    /// Returns `true` if `pos` lies inside the rectangle.
    pub fn contains(&self, pos: PxPosition) -> bool {
        !self.is_empty()
            && pos.x >= self.left
            && pos.x < self.right
            && pos.y >= self.top
            && pos.y < self.bottom
    }

    /// Shrinks the rectangle by `dx`/`dy` on each side. Negative values grow it.
    pub fn inset(&self, dx: Px, dy: Px) -> Self {
        Self::new(
            self.left + dx,
            self.top + dy,
            self.right - dx,
            self.bottom - dy,
        )
    }

    /// Moves the rectangle horizontally so its left edge sits at `left`.
    pub fn with_left(&self, left: Px) -> Self {
        let width = self.width();
        Self::new(left, self.top, left + width, self.bottom)
    }

    /// Smallest rectangle containing both `self` and `other`.
    ///
    /// Empty rectangles do not contribute.
    pub fn union(&self, other: &Self) -> Self {
        if other.is_empty() {
            return *self;
        }
        if self.is_empty() {
            return *other;
        }
        Self::new(
            self.left.min(other.left),
            self.top.min(other.top),
            self.right.max(other.right),
            self.bottom.max(other.bottom),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_px_arithmetic() {
        let a = Px(10);
        let b = Px(5);

        assert_eq!(a + b, Px(15));
        assert_eq!(a - b, Px(5));
        assert_eq!(-a, Px(-10));
        assert_eq!(Px(7).half(), Px(3));

        let mut c = a;
        c += b;
        c -= Px(1);
        assert_eq!(c, Px(14));
    }

    #[test]
    fn test_px_from_f32_truncates() {
        assert_eq!(Px::from_f32(100.9), Px(100));
        assert_eq!(Px::from_f32(-100.9), Px(-100));
    }

    #[test]
    fn test_rect_contains_is_half_open() {
        let rect = PxRect::new(Px(0), Px(0), Px(10), Px(10));
        assert!(rect.contains(PxPosition::new(Px(0), Px(0))));
        assert!(rect.contains(PxPosition::new(Px(9), Px(9))));
        assert!(!rect.contains(PxPosition::new(Px(10), Px(5))));
        assert!(!PxRect::ZERO.contains(PxPosition::ZERO));
    }

    #[test]
    fn test_rect_inset_grows_with_negative_values() {
        let rect = PxRect::new(Px(10), Px(10), Px(22), Px(22));
        let grown = rect.inset(Px(-10), Px(-10));
        assert_eq!(grown, PxRect::new(Px(0), Px(0), Px(32), Px(32)));
        assert_eq!(grown.center_x(), rect.center_x());
    }

    #[test]
    fn test_rect_union_skips_empty() {
        let a = PxRect::new(Px(0), Px(0), Px(10), Px(10));
        let b = PxRect::new(Px(20), Px(5), Px(30), Px(12));
        assert_eq!(a.union(&b), PxRect::new(Px(0), Px(0), Px(30), Px(12)));
        assert_eq!(a.union(&PxRect::ZERO), a);
        assert_eq!(PxRect::ZERO.union(&b), b);
    }

    #[test]
    fn test_rect_with_left_keeps_width() {
        let rect = PxRect::new(Px(4), Px(2), Px(16), Px(14));
        let moved = rect.with_left(Px(40));
        assert_eq!(moved, PxRect::new(Px(40), Px(2), Px(52), Px(14)));
    }
}
