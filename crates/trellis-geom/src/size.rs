use super::Axis;

/// A `Size` has a width and height but no location.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Size {
    /// Width.
    pub w: f32,
    /// Height.
    pub h: f32,
}

impl Size {
    /// Construct a new size.
    pub fn new(w: f32, h: f32) -> Self {
        Self { w, h }
    }

    /// A zero-valued size.
    pub fn zero() -> Self {
        Self { w: 0.0, h: 0.0 }
    }

    /// The largest representable size, used as an unbounded maximum.
    pub fn max() -> Self {
        Self {
            w: f32::MAX,
            h: f32::MAX,
        }
    }

    /// A size is valid when it is strictly positive in both dimensions.
    pub fn is_valid(&self) -> bool {
        self.w > 0.0 && self.h > 0.0
    }

    /// The extent along `axis`.
    pub fn along(&self, axis: Axis) -> f32 {
        match axis {
            Axis::Horizontal => self.w,
            Axis::Vertical => self.h,
        }
    }

    /// Set the extent along `axis`.
    pub fn set_along(&mut self, axis: Axis, value: f32) {
        match axis {
            Axis::Horizontal => self.w = value,
            Axis::Vertical => self.h = value,
        }
    }

}

impl From<(f32, f32)> for Size {
    fn from(v: (f32, f32)) -> Self {
        Self { w: v.0, h: v.1 }
    }
}
