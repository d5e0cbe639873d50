use tracing::warn;

use crate::geom::Rect;

/// Coordinate frame a paint region is expressed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Frame {
    /// Relative to the emitting item. Not mappable to other items.
    Local,
    /// The shared, center-origin frame item areas live in.
    Global,
}

/// An invalidated region.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PaintRegion {
    /// The invalidated box.
    pub area: Rect,
    /// Frame `area` is expressed in.
    pub frame: Frame,
}

impl PaintRegion {
    /// A region in the global frame.
    pub fn global(area: Rect) -> Self {
        Self {
            area,
            frame: Frame::Global,
        }
    }

    /// A region in the emitter's local frame.
    pub fn local(area: Rect) -> Self {
        Self {
            area,
            frame: Frame::Local,
        }
    }
}

/// A set of invalidated regions.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PaintEvent {
    /// Regions in insertion order.
    regions: Vec<PaintRegion>,
}

impl PaintEvent {
    /// A paint event covering the given regions.
    pub fn new(regions: Vec<PaintRegion>) -> Self {
        Self { regions }
    }

    /// A paint event covering one global box.
    pub fn global(area: Rect) -> Self {
        Self::new(vec![PaintRegion::global(area)])
    }

    /// Add a region.
    pub fn add_region(&mut self, region: PaintRegion) {
        self.regions.push(region);
    }

    /// The regions carried by this event.
    pub fn regions(&self) -> &[PaintRegion] {
        &self.regions
    }

    /// Does the event carry no region at all?
    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }

    /// Build the event a child covering `area` should receive: global regions
    /// overlapping the child, in order. Local regions cannot be mapped and
    /// are dropped. Returns `None` when nothing survives.
    pub fn scoped_to(&self, area: &Rect) -> Option<Self> {
        let regions: Vec<PaintRegion> = self
            .regions
            .iter()
            .filter(|r| match r.frame {
                Frame::Local => {
                    warn!(region = ?r.area, "skipping paint region in local frame");
                    false
                }
                Frame::Global => r.area.intersects(area),
            })
            .copied()
            .collect();
        if regions.is_empty() {
            None
        } else {
            Some(Self { regions })
        }
    }
}
