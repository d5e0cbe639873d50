/// The negotiation algorithm.
pub mod negotiate;

use std::mem;

use tracing::debug;

use crate::{
    error::{Error, Result},
    geom::{Axis, Size},
    id::ItemId,
};

/// How a layout places its children.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Arrangement {
    /// Children side by side, left to right.
    #[default]
    Horizontal,
    /// Children stacked top to bottom.
    Vertical,
    /// Every child negotiates against the full interior.
    Overlay,
}

impl Arrangement {
    /// The axis space is distributed along, if any.
    pub fn axis(self) -> Option<Axis> {
        match self {
            Self::Horizontal => Some(Axis::Horizontal),
            Self::Vertical => Some(Axis::Vertical),
            Self::Overlay => None,
        }
    }
}

/// Whether a layout's boxes are relative to a parent frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Nesting {
    /// Top-level: the window is the whole frame.
    #[default]
    Root,
    /// Owned by a managed item: the window's own offset is added back.
    Nested,
}

/// An ordered container of items that negotiates space among them.
///
/// A child's position in the sequence is its physical id. Insertion order is
/// stable and drives geometry assignment and paint fan-out.
#[derive(Debug, Clone, Default)]
pub struct Layout {
    /// Children in insertion order.
    items: Vec<ItemId>,
    /// Space kept free on both sides of each axis.
    margin: Size,
    /// Space between consecutive children along the main axis.
    spacing: f32,
    /// Placement scheme.
    arrangement: Arrangement,
    /// Root or nested.
    nesting: Nesting,
    /// Do the children need new boxes?
    dirty: bool,
}

impl Layout {
    /// An empty layout with the given arrangement.
    pub fn new(arrangement: Arrangement) -> Self {
        Self {
            arrangement,
            dirty: true,
            ..Default::default()
        }
    }

    /// An empty left-to-right layout.
    pub fn horizontal() -> Self {
        Self::new(Arrangement::Horizontal)
    }

    /// An empty top-to-bottom layout.
    pub fn vertical() -> Self {
        Self::new(Arrangement::Vertical)
    }

    /// An empty layout whose children overlap.
    pub fn overlay() -> Self {
        Self::new(Arrangement::Overlay)
    }

    /// Set the margin.
    pub fn margin(mut self, margin: Size) -> Self {
        self.margin = margin;
        self.dirty = true;
        self
    }

    /// Set the spacing. Negative values clamp to zero.
    pub fn spacing(mut self, spacing: f32) -> Self {
        self.spacing = spacing.max(0.0);
        self.dirty = true;
        self
    }

    /// The margin.
    pub fn margin_size(&self) -> Size {
        self.margin
    }

    /// The spacing between children.
    pub fn spacing_value(&self) -> f32 {
        self.spacing
    }

    /// The arrangement.
    pub fn arrangement(&self) -> Arrangement {
        self.arrangement
    }

    /// Root or nested.
    pub fn nesting(&self) -> Nesting {
        self.nesting
    }

    /// Is this layout nested inside another?
    pub fn is_nested(&self) -> bool {
        self.nesting == Nesting::Nested
    }

    /// Children in insertion order.
    pub fn items(&self) -> &[ItemId] {
        &self.items
    }

    /// Number of children.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Does the layout have no children?
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// The child at physical id `index`.
    pub fn get(&self, index: usize) -> Option<ItemId> {
        self.items.get(index).copied()
    }

    /// Is `id` a child of this layout?
    pub fn contains(&self, id: ItemId) -> bool {
        self.items.contains(&id)
    }

    /// The physical id of `id`.
    pub fn index_of(&self, id: ItemId) -> Option<usize> {
        self.items.iter().position(|x| *x == id)
    }

    /// Do the children need new boxes?
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Append an item and return its physical id.
    ///
    /// A missing item is skipped and yields `Ok(None)`. An item that is
    /// already present is an error.
    pub fn add_item(&mut self, item: Option<ItemId>) -> Result<Option<usize>> {
        let Some(id) = item else {
            debug!("skipping null item insertion");
            return Ok(None);
        };
        if self.contains(id) {
            return Err(Error::DuplicateItem(id));
        }
        self.items.push(id);
        self.dirty = true;
        Ok(Some(self.items.len() - 1))
    }

    /// Remove an item. Returns `false` if it was not present.
    pub fn remove_item(&mut self, id: ItemId) -> bool {
        match self.index_of(id) {
            Some(index) => {
                self.items.remove(index);
                self.dirty = true;
                true
            }
            None => false,
        }
    }

    /// Should a keyboard event addressed to `watched` be suppressed?
    ///
    /// Only recognized children are ever filtered, and only while they do not
    /// hold keyboard focus.
    pub fn filters_keyboard(&self, watched: ItemId, has_keyboard_focus: bool) -> bool {
        self.contains(watched) && !has_keyboard_focus
    }

    /// Flag the children as needing new boxes.
    pub(crate) fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    /// Flag the children's boxes as fresh.
    pub(crate) fn clear_dirty(&mut self) {
        self.dirty = false;
    }

    /// Remove every child, returning them in order.
    pub(crate) fn take_items(&mut self) -> Vec<ItemId> {
        self.dirty = true;
        mem::take(&mut self.items)
    }

    /// Switch between root and nested conversion.
    pub(crate) fn set_nesting(&mut self, nesting: Nesting) {
        if self.nesting != nesting {
            self.nesting = nesting;
            self.dirty = true;
        }
    }
}

#[cfg(test)]
mod tests {
    use slotmap::SlotMap;

    use super::*;

    fn ids(n: usize) -> Vec<ItemId> {
        let mut arena: SlotMap<ItemId, ()> = SlotMap::with_key();
        (0..n).map(|_| arena.insert(())).collect()
    }

    #[test]
    fn add_and_remove() -> Result<()> {
        let ids = ids(3);
        let mut l = Layout::vertical().margin(Size::new(1.0, 1.0)).spacing(-2.0);
        assert_eq!(l.spacing_value(), 0.0);
        assert_eq!(l.add_item(Some(ids[0]))?, Some(0));
        assert_eq!(l.add_item(Some(ids[1]))?, Some(1));
        assert_eq!(l.index_of(ids[1]), Some(1));

        l.clear_dirty();
        assert!(l.remove_item(ids[0]));
        assert!(l.is_dirty());
        assert_eq!(l.index_of(ids[1]), Some(0));

        l.clear_dirty();
        assert!(!l.remove_item(ids[2]));
        assert!(!l.is_dirty());
        Ok(())
    }

    #[test]
    fn null_and_duplicate_insertions() -> Result<()> {
        let ids = ids(1);
        let mut l = Layout::horizontal();
        assert_eq!(l.add_item(None)?, None);
        assert!(l.is_empty());

        l.add_item(Some(ids[0]))?;
        assert_eq!(l.add_item(Some(ids[0])), Err(Error::DuplicateItem(ids[0])));
        assert_eq!(l.len(), 1);
        Ok(())
    }

    #[test]
    fn keyboard_filtering() -> Result<()> {
        let ids = ids(2);
        let mut l = Layout::horizontal();
        l.add_item(Some(ids[0]))?;
        assert!(l.filters_keyboard(ids[0], false));
        assert!(!l.filters_keyboard(ids[0], true));
        // Unknown targets are never filtered.
        assert!(!l.filters_keyboard(ids[1], false));
        Ok(())
    }

    #[test]
    fn nesting_dirties() {
        let mut l = Layout::overlay();
        assert_eq!(l.arrangement().axis(), None);
        l.clear_dirty();
        l.set_nesting(Nesting::Root);
        assert!(!l.is_dirty());
        l.set_nesting(Nesting::Nested);
        assert!(l.is_dirty() && l.is_nested());
    }
}
