use std::collections::HashSet;

use slotmap::SlotMap;
use tracing::{debug, trace, warn};

use crate::{
    config::Config,
    error::{Error, Result},
    event::{Envelope, Event, EventQueue, Poster},
    focus::FocusReason,
    geom::{Point, Rect, Size},
    id::ItemId,
    item::{LayoutItem, VisibilityHandle},
    layout::{
        Layout, Nesting,
        negotiate::{self, ItemInfo},
    },
    paint::PaintEvent,
    policy::SizePolicy,
    state::ItemName,
};

/// The item arena and event pump.
///
/// `Core` owns every [`LayoutItem`]. Mutations only mark state dirty and post
/// events; [`Core::tick`] later drains the queue and reconciles.
pub struct Core {
    /// Item storage.
    pub(crate) items: SlotMap<ItemId, LayoutItem>,
    /// Pending events.
    queue: EventQueue,
    /// Posting handle onto `queue`.
    poster: Poster,
    /// Tunables.
    config: Config,
    /// Item currently under the pointer.
    pub(crate) hovered: Option<ItemId>,
}

impl Default for Core {
    fn default() -> Self {
        Self::new()
    }
}

impl Core {
    /// Create an empty core with the default configuration.
    pub fn new() -> Self {
        Self::with_config(Config::default())
    }

    /// Create an empty core with a custom configuration.
    pub fn with_config(config: Config) -> Self {
        let queue = EventQueue::new();
        let poster = queue.poster();
        Self {
            items: SlotMap::with_key(),
            queue,
            poster,
            config,
            hovered: None,
        }
    }

    /// The active configuration.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// A handle for posting events from anywhere.
    pub fn poster(&self) -> Poster {
        self.poster.clone()
    }

    /// Insert an item. Children already listed in the item's layout are
    /// adopted as if added with [`Core::add_child`].
    pub fn add(&mut self, mut item: LayoutItem) -> Result<ItemId> {
        let children = item
            .layout
            .as_mut()
            .map(Layout::take_items)
            .unwrap_or_default();
        let id = self.items.insert(item);
        for child in children {
            self.add_child(id, Some(child))?;
        }
        Ok(id)
    }

    /// Destroy an item, detaching it from its manager first. Its children
    /// stay in the arena, unmanaged.
    pub fn remove(&mut self, id: ItemId) -> Result<LayoutItem> {
        if let Some(manager) = self.get(id)?.manager() {
            self.remove_child(manager, id)?;
        }
        let mut item = self.items.remove(id).ok_or(Error::ItemNotFound(id))?;
        if let Some(layout) = item.layout.as_mut() {
            for child in layout.take_items() {
                if let Some(c) = self.items.get_mut(child) {
                    c.clear_manager();
                }
            }
        }
        if self.hovered == Some(id) {
            self.hovered = None;
        }
        Ok(item)
    }

    /// Look up an item.
    pub fn item(&self, id: ItemId) -> Option<&LayoutItem> {
        self.items.get(id)
    }

    /// Look up an item, failing on stale handles.
    pub fn get(&self, id: ItemId) -> Result<&LayoutItem> {
        self.items.get(id).ok_or(Error::ItemNotFound(id))
    }

    /// Mutable lookup, failing on stale handles.
    fn get_mut(&mut self, id: ItemId) -> Result<&mut LayoutItem> {
        self.items.get_mut(id).ok_or(Error::ItemNotFound(id))
    }

    /// The layout owned by `id`.
    pub fn layout_of(&self, id: ItemId) -> Result<&Layout> {
        self.get(id)?.layout().ok_or(Error::NoLayout(id))
    }

    /// Mutable access to the layout owned by `id`.
    fn layout_mut(&mut self, id: ItemId) -> Result<&mut Layout> {
        self.get_mut(id)?.layout.as_mut().ok_or(Error::NoLayout(id))
    }

    /// Number of live items.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Is the arena empty?
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Mutate an item in place. If the mutation left its geometry dirty, a
    /// geometry update is requested for it and for its manager.
    pub fn update_item(&mut self, id: ItemId, f: impl FnOnce(&mut LayoutItem)) -> Result<()> {
        let dirty = {
            let item = self.get_mut(id)?;
            f(item);
            item.is_geometry_dirty()
        };
        if dirty {
            self.invalidate(id)?;
        }
        Ok(())
    }

    /// Set an item's minimum size.
    pub fn set_min_size(&mut self, id: ItemId, size: Size) -> Result<()> {
        self.update_item(id, |i| i.set_min_size(size))
    }

    /// Set an item's size hint.
    pub fn set_size_hint(&mut self, id: ItemId, size: Size) -> Result<()> {
        self.update_item(id, |i| i.set_size_hint(size))
    }

    /// Set an item's maximum size.
    pub fn set_max_size(&mut self, id: ItemId, size: Size) -> Result<()> {
        self.update_item(id, |i| i.set_max_size(size))
    }

    /// Set an item's size policy.
    pub fn set_size_policy(&mut self, id: ItemId, policy: SizePolicy) -> Result<()> {
        self.update_item(id, |i| i.set_size_policy(policy))
    }

    /// Request a geometry update for `id`, and renegotiation of the layout
    /// managing it.
    fn invalidate(&mut self, id: ItemId) -> Result<()> {
        let (is_virtual, manager) = {
            let item = self.get(id)?;
            (item.is_virtual(), item.manager())
        };
        if !is_virtual {
            self.poster.post(id, None, Event::GeometryUpdate)?;
        }
        if let Some(manager) = manager {
            self.invalidate_layout(manager, Some(id))?;
        }
        Ok(())
    }

    /// Mark the layout owned by `owner` dirty and request renegotiation.
    fn invalidate_layout(&mut self, owner: ItemId, emitter: Option<ItemId>) -> Result<()> {
        let item = self.get_mut(owner)?;
        item.mark_geometry_dirty();
        if let Some(layout) = item.layout.as_mut() {
            layout.mark_dirty();
        }
        self.poster.post(owner, emitter, Event::GeometryUpdate)
    }

    /// Replace the layout owned by `id`. Children of the old layout become
    /// unmanaged; children listed in the new one are adopted.
    pub fn set_layout(&mut self, id: ItemId, mut layout: Layout) -> Result<()> {
        let children = layout.take_items();
        let old = {
            let item = self.get_mut(id)?;
            layout.set_nesting(if item.manager().is_some() {
                Nesting::Nested
            } else {
                Nesting::Root
            });
            item.layout.replace(layout)
        };
        if let Some(mut old) = old {
            for child in old.take_items() {
                if let Some(c) = self.items.get_mut(child) {
                    c.clear_manager();
                }
            }
        }
        for child in children {
            self.add_child(id, Some(child))?;
        }
        self.invalidate_layout(id, None)
    }

    /// Is `ancestor` on the manager chain above `id`?
    fn is_ancestor(&self, ancestor: ItemId, id: ItemId) -> bool {
        let mut current = self.items.get(id).and_then(LayoutItem::manager);
        while let Some(m) = current {
            if m == ancestor {
                return true;
            }
            current = self.items.get(m).and_then(LayoutItem::manager);
        }
        false
    }

    /// Append `child` to the layout owned by `parent` and return its
    /// physical id.
    ///
    /// A missing child is skipped and yields `Ok(None)`. A child already in
    /// the layout is a [`Error::DuplicateItem`]. A child managed elsewhere
    /// is detached from its old manager first.
    pub fn add_child(&mut self, parent: ItemId, child: Option<ItemId>) -> Result<Option<usize>> {
        let Some(child) = child else {
            return self.layout_mut(parent)?.add_item(None);
        };
        let old = self.get(child)?.manager();
        if self.layout_of(parent)?.contains(child) {
            return Err(Error::DuplicateItem(child));
        }
        if child == parent || self.is_ancestor(child, parent) {
            return Err(Error::Internal(format!(
                "adding {child:?} under {parent:?} would create a cycle"
            )));
        }
        if let Some(old) = old {
            self.remove_child(old, child)?;
        }
        let index = self.layout_mut(parent)?.add_item(Some(child))?;
        self.get_mut(child)?.set_manager(parent);
        self.invalidate_layout(parent, None)?;
        Ok(index)
    }

    /// Remove `child` from the layout owned by `parent`. Returns `false` if
    /// it was not there.
    pub fn remove_child(&mut self, parent: ItemId, child: ItemId) -> Result<bool> {
        let removed = self.layout_mut(parent)?.remove_item(child);
        if removed {
            if let Some(c) = self.items.get_mut(child) {
                c.clear_manager();
            }
            self.invalidate_layout(parent, None)?;
        }
        Ok(removed)
    }

    /// The first child of `parent` named `name`, with its physical id. The
    /// query is munged the same way item names are, so `"OkButton"` finds
    /// `ok_button`.
    pub fn find_child(&self, parent: ItemId, name: &str) -> Option<(usize, ItemId)> {
        let layout = self.items.get(parent)?.layout()?;
        let name = ItemName::convert(name);
        layout
            .items()
            .iter()
            .enumerate()
            .find(|(_, c)| self.items.get(**c).is_some_and(|i| *i.name() == name))
            .map(|(index, c)| (index, *c))
    }

    /// Siblings of `id` in its manager's layout, in insertion order.
    pub(crate) fn siblings(&self, id: ItemId) -> Vec<ItemId> {
        self.items
            .get(id)
            .and_then(LayoutItem::manager)
            .and_then(|m| self.items.get(m))
            .and_then(LayoutItem::layout)
            .map(|l| l.items().iter().copied().filter(|c| *c != id).collect())
            .unwrap_or_default()
    }

    /// Enqueue an event for `target`.
    pub fn post(&self, target: ItemId, event: Event) -> Result<()> {
        self.poster.post(target, None, event)
    }

    /// Assign a new area to an item. Negative or non-finite dimensions are
    /// rejected.
    pub fn resize(&self, id: ItemId, area: Rect) -> Result<()> {
        let area = Rect::try_new(area.x, area.y, area.w, area.h)?;
        self.post(id, Event::Resize(area))
    }

    /// A handle that toggles the visibility of `id` from any thread.
    pub fn visibility_handle(&self, id: ItemId) -> Result<VisibilityHandle> {
        Ok(self.get(id)?.visibility_handle(id, self.poster.clone()))
    }

    /// Set visibility. Returns `true` if it changed.
    pub fn set_visible(&self, id: ItemId, visible: bool) -> Result<bool> {
        self.visibility_handle(id)?.set_visible(visible)
    }

    /// Show an item. Returns `true` if visibility changed.
    pub fn show(&self, id: ItemId) -> Result<bool> {
        self.set_visible(id, true)
    }

    /// Hide an item. Returns `true` if visibility changed.
    pub fn hide(&self, id: ItemId) -> Result<bool> {
        self.set_visible(id, false)
    }

    /// Set the visibility of the children of `owner` positionally. Extra
    /// flags are ignored.
    pub fn assign_visibility_status(&self, owner: ItemId, flags: &[bool]) -> Result<()> {
        let children = self.layout_of(owner)?.items().to_vec();
        for (child, visible) in children.into_iter().zip(flags) {
            self.set_visible(child, *visible)?;
        }
        Ok(())
    }

    /// Dispatch every event pending at the start of the tick, and return the
    /// envelopes dispatched. Repeated geometry updates for one target are
    /// coalesced. Events posted while dispatching wait for the next tick.
    /// A failed dispatch does not stop the batch; the first error is returned
    /// once every pending event has been handled.
    pub fn tick(&mut self) -> Result<Vec<Envelope>> {
        let mut refreshed = HashSet::new();
        let mut dispatched = Vec::new();
        let mut failure = None;
        for mut env in self.queue.drain() {
            if matches!(env.event, Event::GeometryUpdate) && !refreshed.insert(env.target) {
                trace!(item = ?env.target, "coalescing geometry update");
                continue;
            }
            match self.dispatch(&env) {
                Ok(true) => env.accept(),
                Ok(false) => {}
                Err(e) => {
                    warn!(item = ?env.target, error = %e, "dispatch failed");
                    failure.get_or_insert(e);
                }
            }
            dispatched.push(env);
        }
        match failure {
            Some(e) => Err(e),
            None => Ok(dispatched),
        }
    }

    /// Tick until the queue is empty. Returns the number of events
    /// dispatched.
    pub fn run_until_idle(&mut self) -> Result<usize> {
        let mut total = 0;
        for _ in 0..self.config.max_ticks {
            let n = self.tick()?.len();
            if n == 0 {
                return Ok(total);
            }
            total += n;
        }
        Err(Error::Internal(format!(
            "event queue did not settle after {} ticks",
            self.config.max_ticks
        )))
    }

    /// Should a keyboard event for `id` be suppressed by its manager?
    fn keyboard_filtered(&self, id: ItemId) -> bool {
        let Some(item) = self.items.get(id) else {
            return false;
        };
        item.manager()
            .and_then(|m| self.items.get(m))
            .and_then(LayoutItem::layout)
            .is_some_and(|l| l.filters_keyboard(id, item.has_keyboard_focus()))
    }

    /// Route one envelope to its handler. Returns whether the event was
    /// recognized.
    fn dispatch(&mut self, env: &Envelope) -> Result<bool> {
        let id = env.target;
        let Some(item) = self.items.get(id) else {
            debug!(item = ?id, "dropping event for unknown item");
            return Ok(false);
        };
        let kind = env.event.kind();
        trace!(item = ?id, ?kind, "dispatch");
        if let Some(filter) = item.input_filter()
            && filter.is_filtered(kind)
        {
            debug!(item = ?id, ?kind, "event suppressed by input filter");
            return Ok(false);
        }
        if kind.is_keyboard() && self.keyboard_filtered(id) {
            debug!(item = ?id, ?kind, "keyboard event suppressed without keyboard focus");
            return Ok(false);
        }
        match &env.event {
            Event::GeometryUpdate => self.on_geometry_update(id),
            Event::Resize(area) => self.on_resize(id, *area),
            Event::Show => self.on_visibility(id, true),
            Event::Hide => self.on_visibility(id, false),
            Event::Repaint(paint) => self.on_repaint(id, env.emitter, paint),
            Event::FocusIn(reason) => self.on_focus_in(id, env.emitter, *reason),
            Event::FocusOut(reason) => self.on_focus_out(id, *reason),
            Event::KeyboardGrab => self.on_keyboard_grab(id),
            Event::KeyboardRelease => Ok(self.get_mut(id)?.set_keyboard_focus(false)),
            event => match self.get_mut(id)?.handler_mut() {
                Some(handler) => handler.handle(event),
                None => Ok(false),
            },
        }
    }

    /// Recompute children boxes if the item is dirty and visible.
    fn on_geometry_update(&mut self, id: ItemId) -> Result<bool> {
        let item = self.get(id)?;
        if !item.needs_geometry_update() {
            return Ok(false);
        }
        if item.layout().is_some_and(|l| !l.is_empty()) {
            self.compute_geometry(id)?;
        }
        let item = self.get_mut(id)?;
        item.clear_geometry_dirty();
        if let Some(layout) = item.layout.as_mut() {
            layout.clear_dirty();
        }
        Ok(true)
    }

    /// Negotiate boxes for the visible children of `owner` inside its area
    /// and post a resize to each.
    pub fn compute_geometry(&self, owner: ItemId) -> Result<()> {
        let item = self.get(owner)?;
        let window = item.area();
        let layout = item.layout().ok_or(Error::NoLayout(owner))?;
        let children: Vec<(ItemId, ItemInfo)> = layout
            .items()
            .iter()
            .filter_map(|c| self.items.get(*c).map(|i| (*c, i)))
            .filter(|(_, i)| i.is_visible())
            .map(|(c, i)| (c, i.info()))
            .collect();
        let infos: Vec<ItemInfo> = children.iter().map(|(_, info)| *info).collect();
        let boxes = negotiate::negotiate(
            &infos,
            window.size(),
            layout.arrangement(),
            layout.margin_size(),
            layout.spacing_value(),
            &self.config,
        );
        let assigned: Vec<(ItemId, Rect)> = children
            .into_iter()
            .map(|(c, _)| c)
            .zip(boxes)
            .collect();
        self.assign_rendering_areas(owner, &assigned)
    }

    /// Convert negotiated top-left boxes into item areas and post a resize
    /// to each child, in order.
    pub fn assign_rendering_areas(&self, owner: ItemId, boxes: &[(ItemId, Rect)]) -> Result<()> {
        let item = self.get(owner)?;
        let window = item.area();
        let nesting = item.layout().ok_or(Error::NoLayout(owner))?.nesting();
        for (child, b) in boxes {
            let area = negotiate::to_rendering_area(b, &window, nesting);
            self.poster.post(*child, Some(owner), Event::Resize(area))?;
        }
        Ok(())
    }

    /// Take a new area, invalidating everything below.
    fn on_resize(&mut self, id: ItemId, area: Rect) -> Result<bool> {
        let item = self.get_mut(id)?;
        item.set_area(area);
        item.request_repaint();
        if let Some(layout) = item.layout.as_mut() {
            layout.mark_dirty();
        }
        if !item.is_virtual() {
            self.poster.post(id, None, Event::GeometryUpdate)?;
        }
        Ok(true)
    }

    /// Apply a visibility change and renegotiate the surrounding layout.
    fn on_visibility(&mut self, id: ItemId, visible: bool) -> Result<bool> {
        let item = self.get_mut(id)?;
        item.set_visible(visible);
        item.mark_geometry_dirty();
        if let Some(manager) = item.manager() {
            self.invalidate_layout(manager, Some(id))?;
        }
        if visible {
            self.poster.post(id, None, Event::GeometryUpdate)?;
        }
        Ok(true)
    }

    /// Request a repaint and forward the overlapping regions to each visible
    /// child other than the emitter.
    fn on_repaint(
        &mut self,
        id: ItemId,
        emitter: Option<ItemId>,
        paint: &PaintEvent,
    ) -> Result<bool> {
        let item = self.get_mut(id)?;
        item.request_repaint();
        let children = item
            .layout()
            .map(|l| l.items().to_vec())
            .unwrap_or_default();
        for child in children {
            if Some(child) == emitter {
                continue;
            }
            let Some(c) = self.items.get(child) else {
                continue;
            };
            if !c.is_visible() {
                continue;
            }
            if let Some(scoped) = paint.scoped_to(&c.area()) {
                self.poster.post(child, Some(id), Event::Repaint(scoped))?;
            }
        }
        Ok(true)
    }

    /// Gain focus and evict focused siblings.
    fn on_focus_in(
        &mut self,
        id: ItemId,
        emitter: Option<ItemId>,
        reason: FocusReason,
    ) -> Result<bool> {
        let item = self.get_mut(id)?;
        if !item.focus_state_mut().handle_focus_in(reason) {
            return Ok(false);
        }
        item.request_repaint();
        for sibling in self.siblings(id) {
            if Some(sibling) == emitter {
                continue;
            }
            if self
                .items
                .get(sibling)
                .is_some_and(|s| s.focus_state().has_focus())
            {
                self.poster
                    .post(sibling, Some(id), Event::FocusOut(reason))?;
            }
        }
        Ok(true)
    }

    /// Release focus if the reason is strong enough.
    fn on_focus_out(&mut self, id: ItemId, reason: FocusReason) -> Result<bool> {
        let item = self.get_mut(id)?;
        let changed = item.focus_state_mut().handle_focus_out(reason);
        if changed {
            item.request_repaint();
        }
        Ok(changed)
    }

    /// Take keyboard focus and ask every other holder to release it.
    fn on_keyboard_grab(&mut self, id: ItemId) -> Result<bool> {
        self.get_mut(id)?.set_keyboard_focus(true);
        let holders: Vec<ItemId> = self
            .items
            .iter()
            .filter(|(other, i)| *other != id && i.has_keyboard_focus())
            .map(|(other, _)| other)
            .collect();
        for holder in holders {
            self.poster
                .post(holder, Some(id), Event::KeyboardRelease)?;
        }
        Ok(true)
    }

    /// The hierarchical z-order string of `id`: the z-orders of the item and
    /// each managed ancestor, from the outermost down. Unmanaged items
    /// contribute nothing.
    pub fn z_order_string(&self, id: ItemId) -> String {
        let mut parts = Vec::new();
        let mut current = Some(id);
        while let Some(c) = current {
            let Some(item) = self.items.get(c) else {
                break;
            };
            let Some(manager) = item.manager() else {
                break;
            };
            parts.push(item.z_order().to_string());
            current = Some(manager);
        }
        parts.reverse();
        parts.concat()
    }

    /// Best match for `p` at or below `id`: the deepest matching child, or
    /// the item itself.
    fn item_at(&self, id: ItemId, p: Point) -> Option<ItemId> {
        let item = self.items.get(id)?;
        if !item.is_visible() || !item.area().contains(p) {
            return None;
        }
        match item.layout() {
            Some(layout) => self.best_among(layout.items(), p).or(Some(id)),
            None => Some(id),
        }
    }

    /// Among the matches under `children`, the one with the greatest
    /// z-order string. Ties go to the last candidate in insertion order.
    fn best_among(&self, children: &[ItemId], p: Point) -> Option<ItemId> {
        let mut hits: Vec<(String, ItemId)> = children
            .iter()
            .filter_map(|c| self.item_at(*c, p))
            .map(|hit| (self.z_order_string(hit), hit))
            .collect();
        hits.sort_by(|a, b| a.0.cmp(&b.0));
        if let [.., (a, first), (b, second)] = hits.as_slice()
            && a == b
        {
            warn!(
                z_order = %b,
                chosen = ?second,
                discarded = ?first,
                "ambiguous overlap in hit test"
            );
        }
        hits.last().map(|(_, hit)| *hit)
    }

    /// The child of `owner` under `p`, descending into composite children.
    /// Returns `None` if no child matches.
    pub fn get_item_at(&self, owner: ItemId, p: Point) -> Option<ItemId> {
        let layout = self.items.get(owner)?.layout()?;
        self.best_among(layout.items(), p)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{
        Arc,
        atomic::{AtomicUsize, Ordering},
    };

    use super::*;
    use crate::{InputHandler, policy::Policy};

    struct Echo {
        poster: Poster,
        target: Arc<parking_lot::Mutex<Option<ItemId>>>,
        seen: Arc<AtomicUsize>,
    }

    impl InputHandler for Echo {
        fn handle(&mut self, _event: &Event) -> Result<bool> {
            self.seen.fetch_add(1, Ordering::SeqCst);
            if let Some(t) = *self.target.lock() {
                self.poster.post(t, None, Event::Enter)?;
            }
            Ok(true)
        }
    }

    #[test]
    fn geometry_updates_coalesce() -> Result<()> {
        let mut core = Core::new();
        let a = core.add(LayoutItem::new("a", Some(Size::new(4.0, 4.0))))?;
        core.post(a, Event::GeometryUpdate)?;
        core.post(a, Event::GeometryUpdate)?;
        core.set_size_hint(a, Size::new(5.0, 5.0))?;
        let dispatched = core.tick()?;
        assert_eq!(dispatched.len(), 1);
        assert!(dispatched[0].is_accepted());
        assert!(!core.get(a)?.is_geometry_dirty());
        assert_eq!(core.run_until_idle()?, 0);
        Ok(())
    }

    #[test]
    fn event_storms_are_bounded() -> Result<()> {
        let mut core = Core::with_config(Config::new().max_ticks(4));
        let target = Arc::new(parking_lot::Mutex::new(None));
        let seen = Arc::new(AtomicUsize::new(0));
        let a = core.add(LayoutItem::new("a", None).with_handler(Echo {
            poster: core.poster(),
            target: target.clone(),
            seen: seen.clone(),
        }))?;
        *target.lock() = Some(a);
        core.post(a, Event::Enter)?;
        assert!(matches!(core.run_until_idle(), Err(Error::Internal(_))));
        assert_eq!(seen.load(Ordering::SeqCst), 4);
        Ok(())
    }

    struct Broken;

    impl InputHandler for Broken {
        fn handle(&mut self, _event: &Event) -> Result<bool> {
            Err(Error::Internal("broken handler".into()))
        }
    }

    #[test]
    fn handler_errors_do_not_drop_the_batch() -> Result<()> {
        let mut core = Core::new();
        let seen = Arc::new(AtomicUsize::new(0));
        let broken = core.add(LayoutItem::new("broken", None).with_handler(Broken))?;
        let echo = core.add(LayoutItem::new("echo", None).with_handler(Echo {
            poster: core.poster(),
            target: Arc::new(parking_lot::Mutex::new(None)),
            seen: seen.clone(),
        }))?;

        core.post(broken, Event::Enter)?;
        core.post(echo, Event::Enter)?;
        assert_eq!(
            core.tick().err(),
            Some(Error::Internal("broken handler".into()))
        );
        assert_eq!(seen.load(Ordering::SeqCst), 1);

        core.post(echo, Event::Enter)?;
        assert!(core.tick()?[0].is_accepted());
        assert_eq!(seen.load(Ordering::SeqCst), 2);
        Ok(())
    }

    #[test]
    fn invalid_areas_are_rejected() -> Result<()> {
        let mut core = Core::new();
        let a = core.add(LayoutItem::new("a", None))?;
        assert!(matches!(
            core.resize(a, Rect::new(0.0, 0.0, -1.0, 4.0)),
            Err(Error::Geometry(_))
        ));
        Ok(())
    }

    #[test]
    fn stale_targets_are_dropped() -> Result<()> {
        let mut core = Core::new();
        let a = core.add(LayoutItem::new("a", None))?;
        core.remove(a)?;
        core.post(a, Event::Show)?;
        let dispatched = core.tick()?;
        assert!(!dispatched[0].is_accepted());
        assert_eq!(core.get(a).err(), Some(Error::ItemNotFound(a)));
        Ok(())
    }

    #[test]
    fn children_are_adopted_and_reparented() -> Result<()> {
        let mut core = Core::new();
        let a = core.add(LayoutItem::new("a", None))?;
        let left = core.add(LayoutItem::new("left", None).with_layout(Layout::horizontal()))?;
        let right = core.add(LayoutItem::new("right", None).with_layout(Layout::vertical()))?;
        assert_eq!(core.add_child(left, Some(a))?, Some(0));
        assert_eq!(core.get(a)?.manager(), Some(left));

        assert_eq!(core.add_child(right, Some(a))?, Some(0));
        assert_eq!(core.get(a)?.manager(), Some(right));
        assert!(core.layout_of(left)?.is_empty());

        assert_eq!(core.add_child(right, Some(a)), Err(Error::DuplicateItem(a)));
        assert_eq!(core.add_child(right, None)?, None);
        assert_eq!(core.add_child(a, Some(right)), Err(Error::NoLayout(a)));
        assert!(matches!(
            core.add_child(right, Some(right)),
            Err(Error::Internal(_))
        ));

        assert_eq!(core.find_child(right, "a"), Some((0, a)));
        assert_eq!(core.find_child(right, "b"), None);

        let button = core.add(LayoutItem::new("OkButton", None))?;
        core.add_child(right, Some(button))?;
        assert_eq!(core.find_child(right, "OkButton"), Some((1, button)));
        assert_eq!(core.find_child(right, "ok_button"), Some((1, button)));
        core.remove(button)?;

        let outer = core.add(
            LayoutItem::new("outer", None)
                .with_layout(Layout::horizontal())
                .with_size_policy(Policy::Expanding),
        )?;
        core.add_child(outer, Some(right))?;
        assert!(core.layout_of(right)?.is_nested());
        core.remove(outer)?;
        assert_eq!(core.get(right)?.manager(), None);
        assert!(!core.layout_of(right)?.is_nested());
        Ok(())
    }
}
