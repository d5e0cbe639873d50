use super::{Error, Point, Result, Size};

/// A box described by an anchor point and a size.
///
/// Item areas use a center-origin convention: `(x, y)` is the center of the
/// box and the box extends `w / 2` and `h / 2` on either side. All the
/// geometric queries below assume that convention. Layout negotiation
/// produces boxes whose anchor is the top-left corner of a window-relative
/// frame; those are converted before being handed to items.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    /// Anchor x coordinate.
    pub x: f32,
    /// Anchor y coordinate.
    pub y: f32,
    /// Width.
    pub w: f32,
    /// Height.
    pub h: f32,
}

impl Rect {
    /// Construct a rectangle from an anchor and a size.
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    /// Construct a rectangle, rejecting negative or non-finite dimensions.
    pub fn try_new(x: f32, y: f32, w: f32, h: f32) -> Result<Self> {
        if !(w.is_finite() && h.is_finite()) || w < 0.0 || h < 0.0 {
            return Err(Error::InvalidDimensions { w, h });
        }
        Ok(Self { x, y, w, h })
    }

    /// A zero rectangle at the origin.
    pub fn zero() -> Self {
        Self::default()
    }

    /// A rectangle of the given size anchored at `p`.
    pub fn at(p: Point, sz: Size) -> Self {
        Self::new(p.x, p.y, sz.w, sz.h)
    }

    /// The anchor point.
    pub fn anchor(&self) -> Point {
        Point::new(self.x, self.y)
    }

    /// The dimensions of the rectangle.
    pub fn size(&self) -> Size {
        Size::new(self.w, self.h)
    }

    /// Smallest x coordinate covered by the box.
    pub fn left(&self) -> f32 {
        self.x - self.w / 2.0
    }

    /// Largest x coordinate covered by the box.
    pub fn right(&self) -> f32 {
        self.x + self.w / 2.0
    }

    /// Smallest y coordinate covered by the box.
    pub fn bottom(&self) -> f32 {
        self.y - self.h / 2.0
    }

    /// Largest y coordinate covered by the box.
    pub fn top(&self) -> f32 {
        self.y + self.h / 2.0
    }

    /// Does the box contain `p`? Edges are inclusive.
    pub fn contains(&self, p: Point) -> bool {
        p.x >= self.left() && p.x <= self.right() && p.y >= self.bottom() && p.y <= self.top()
    }

    /// Do the two boxes share a region of non-zero area?
    pub fn intersects(&self, other: &Self) -> bool {
        self.intersection(other).is_some()
    }

    /// The overlapping region of two boxes, if it has a non-zero area.
    pub fn intersection(&self, other: &Self) -> Option<Self> {
        let left = self.left().max(other.left());
        let right = self.right().min(other.right());
        let bottom = self.bottom().max(other.bottom());
        let top = self.top().min(other.top());
        if right <= left || top <= bottom {
            return None;
        }
        Some(Self::new(
            (left + right) / 2.0,
            (bottom + top) / 2.0,
            right - left,
            top - bottom,
        ))
    }

    /// Shift the anchor by an offset.
    pub fn translate(&self, offset: Point) -> Self {
        Self::at(self.anchor() + offset, self.size())
    }
}
