use std::{mem, sync::Arc};

use parking_lot::Mutex;

use crate::{
    error::Result,
    event::{Event, Poster, filter::UserInputFilter},
    focus::{FocusPolicy, FocusState},
    geom::{Rect, Size},
    id::ItemId,
    layout::{Layout, Nesting, negotiate::ItemInfo},
    policy::SizePolicy,
    state::ItemName,
};

/// Concrete widget behavior plugged into an item. Receives the input events
/// that survive filtering.
pub trait InputHandler {
    /// Handle an input event. Returns `true` if the event was recognized.
    fn handle(&mut self, event: &Event) -> Result<bool>;
}

/// Flags shared with producer threads through a [`VisibilityHandle`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct ItemFlags {
    /// Is the item shown?
    pub(crate) visible: bool,
    /// Is the cached area stale?
    pub(crate) geometry_dirty: bool,
}

impl Default for ItemFlags {
    fn default() -> Self {
        Self {
            visible: true,
            geometry_dirty: true,
        }
    }
}

/// The unit of geometry: size bounds, policies, a current area and the focus
/// bookkeeping for one item in the tree.
pub struct LayoutItem {
    /// Name used for lookups and diagnostics.
    name: ItemName,
    /// Smallest acceptable size.
    min_size: Size,
    /// Preferred size. Invalid (non-positive) hints disable hint snapping.
    size_hint: Size,
    /// Largest acceptable size.
    max_size: Size,
    /// Per-axis sizing capabilities.
    policy: SizePolicy,
    /// Current rendering area, center-origin.
    area: Rect,
    /// Stacking order among siblings.
    z_order: i32,
    /// Visibility and geometry-dirty flags, lockable from other threads.
    flags: Arc<Mutex<ItemFlags>>,
    /// Ways this item may acquire focus.
    focus_policy: FocusPolicy,
    /// Reason currently granting focus.
    focus_state: FocusState,
    /// Does this item receive keyboard input?
    keyboard_focus: bool,
    /// Layout managing this item. Non-owning.
    manager: Option<ItemId>,
    /// Virtual items do not request geometry updates on their own.
    is_virtual: bool,
    /// Set when the item's content must be redrawn.
    repaint_pending: bool,
    /// Input classes suppressed before reaching the handler.
    input_filter: Option<UserInputFilter>,
    /// Concrete widget behavior.
    handler: Option<Box<dyn InputHandler>>,
    /// Children of a composite item.
    pub(crate) layout: Option<Layout>,
}

impl LayoutItem {
    /// Create an item with a name and an optional size hint.
    pub fn new(name: &str, hint: Option<Size>) -> Self {
        Self {
            name: ItemName::convert(name),
            min_size: Size::zero(),
            size_hint: hint.unwrap_or_default(),
            max_size: Size::max(),
            policy: SizePolicy::default(),
            area: Rect::zero(),
            z_order: 0,
            flags: Arc::new(Mutex::new(ItemFlags::default())),
            focus_policy: FocusPolicy::empty(),
            focus_state: FocusState::None,
            keyboard_focus: false,
            manager: None,
            is_virtual: false,
            repaint_pending: false,
            input_filter: None,
            handler: None,
            layout: None,
        }
    }

    /// Builder: set the minimum size.
    pub fn with_min_size(mut self, size: Size) -> Self {
        self.set_min_size(size);
        self
    }

    /// Builder: set the maximum size.
    pub fn with_max_size(mut self, size: Size) -> Self {
        self.set_max_size(size);
        self
    }

    /// Builder: set the size policy.
    pub fn with_size_policy(mut self, policy: impl Into<SizePolicy>) -> Self {
        self.set_size_policy(policy.into());
        self
    }

    /// Builder: set the focus policy.
    pub fn with_focus_policy(mut self, policy: FocusPolicy) -> Self {
        self.focus_policy = policy;
        self
    }

    /// Builder: set the z-order.
    pub fn with_z_order(mut self, z: i32) -> Self {
        self.z_order = z;
        self
    }

    /// Builder: make this a composite item managing `layout`.
    pub fn with_layout(mut self, layout: Layout) -> Self {
        self.layout = Some(layout);
        self.mark_geometry_dirty();
        self
    }

    /// Builder: install an input filter.
    pub fn with_input_filter(mut self, filter: UserInputFilter) -> Self {
        self.input_filter = Some(filter);
        self
    }

    /// Builder: plug in widget behavior.
    pub fn with_handler(mut self, handler: impl InputHandler + 'static) -> Self {
        self.handler = Some(Box::new(handler));
        self
    }

    /// Builder: exclude this item from active event processing.
    pub fn virtual_item(mut self) -> Self {
        self.is_virtual = true;
        self
    }

    /// The item's name.
    pub fn name(&self) -> &ItemName {
        &self.name
    }

    /// The minimum size.
    pub fn min_size(&self) -> Size {
        self.min_size
    }

    /// The size hint.
    pub fn size_hint(&self) -> Size {
        self.size_hint
    }

    /// The maximum size.
    pub fn max_size(&self) -> Size {
        self.max_size
    }

    /// The size policy.
    pub fn size_policy(&self) -> SizePolicy {
        self.policy
    }

    /// The current rendering area.
    pub fn area(&self) -> Rect {
        self.area
    }

    /// The z-order among siblings.
    pub fn z_order(&self) -> i32 {
        self.z_order
    }

    /// Is the item shown?
    pub fn is_visible(&self) -> bool {
        self.flags.lock().visible
    }

    /// Is the cached area stale?
    pub fn is_geometry_dirty(&self) -> bool {
        self.flags.lock().geometry_dirty
    }

    /// The focus policy.
    pub fn focus_policy(&self) -> FocusPolicy {
        self.focus_policy
    }

    /// The focus state.
    pub fn focus_state(&self) -> FocusState {
        self.focus_state
    }

    /// Does this item receive keyboard input?
    pub fn has_keyboard_focus(&self) -> bool {
        self.keyboard_focus
    }

    /// The layout managing this item, if any.
    pub fn manager(&self) -> Option<ItemId> {
        self.manager
    }

    /// Is this a virtual item?
    pub fn is_virtual(&self) -> bool {
        self.is_virtual
    }

    /// Does the item's content need redrawing?
    pub fn repaint_pending(&self) -> bool {
        self.repaint_pending
    }

    /// Consume the pending repaint request.
    pub fn take_repaint(&mut self) -> bool {
        mem::take(&mut self.repaint_pending)
    }

    /// The input filter, if any.
    pub fn input_filter(&self) -> Option<UserInputFilter> {
        self.input_filter
    }

    /// The layout of a composite item.
    pub fn layout(&self) -> Option<&Layout> {
        self.layout.as_ref()
    }

    /// Set the minimum size.
    pub fn set_min_size(&mut self, size: Size) {
        self.min_size = size;
        self.mark_geometry_dirty();
    }

    /// Set the size hint.
    pub fn set_size_hint(&mut self, size: Size) {
        self.size_hint = size;
        self.mark_geometry_dirty();
    }

    /// Set the maximum size.
    pub fn set_max_size(&mut self, size: Size) {
        self.max_size = size;
        self.mark_geometry_dirty();
    }

    /// Set the size policy.
    pub fn set_size_policy(&mut self, policy: SizePolicy) {
        self.policy = policy;
        self.mark_geometry_dirty();
    }

    /// Set the z-order.
    pub fn set_z_order(&mut self, z: i32) {
        self.z_order = z;
    }

    /// Set the focus policy.
    pub fn set_focus_policy(&mut self, policy: FocusPolicy) {
        self.focus_policy = policy;
    }

    /// Replace the input filter.
    pub fn set_input_filter(&mut self, filter: Option<UserInputFilter>) {
        self.input_filter = filter;
    }

    /// Snapshot of the bounds and policy fed to the negotiation.
    pub fn info(&self) -> ItemInfo {
        ItemInfo {
            min: self.min_size,
            hint: self.size_hint,
            max: self.max_size,
            policy: self.policy,
        }
    }

    /// Flag the cached area as stale.
    pub(crate) fn mark_geometry_dirty(&mut self) {
        self.flags.lock().geometry_dirty = true;
    }

    /// Flag the cached area as fresh.
    pub(crate) fn clear_geometry_dirty(&mut self) {
        self.flags.lock().geometry_dirty = false;
    }

    /// Dirty and visible: the only state in which a geometry update runs.
    pub(crate) fn needs_geometry_update(&self) -> bool {
        let flags = self.flags.lock();
        flags.geometry_dirty && flags.visible
    }

    /// Assign a new area. Always invalidates geometry, even when the area is
    /// numerically unchanged.
    pub(crate) fn set_area(&mut self, area: Rect) {
        self.area = area;
        self.mark_geometry_dirty();
    }

    /// Write the visibility flag. Returns `true` if it changed.
    pub(crate) fn set_visible(&mut self, visible: bool) -> bool {
        let mut flags = self.flags.lock();
        let changed = flags.visible != visible;
        flags.visible = visible;
        if changed {
            flags.geometry_dirty = true;
        }
        changed
    }

    /// Mutable access to the focus state machine.
    pub(crate) fn focus_state_mut(&mut self) -> &mut FocusState {
        &mut self.focus_state
    }

    /// Grant or revoke keyboard focus. Returns `true` if it changed.
    pub(crate) fn set_keyboard_focus(&mut self, focus: bool) -> bool {
        mem::replace(&mut self.keyboard_focus, focus) != focus
    }

    /// Record the managing layout's owner.
    pub(crate) fn set_manager(&mut self, manager: ItemId) {
        self.manager = Some(manager);
        if let Some(layout) = self.layout.as_mut() {
            layout.set_nesting(Nesting::Nested);
        }
    }

    /// Forget the managing layout.
    pub(crate) fn clear_manager(&mut self) {
        self.manager = None;
        if let Some(layout) = self.layout.as_mut() {
            layout.set_nesting(Nesting::Root);
        }
    }

    /// Ask the rendering collaborator to redraw this item.
    pub(crate) fn request_repaint(&mut self) {
        self.repaint_pending = true;
    }

    /// The plugged-in widget behavior.
    pub(crate) fn handler_mut(&mut self) -> Option<&mut (dyn InputHandler + 'static)> {
        self.handler.as_deref_mut()
    }

    /// A handle for toggling visibility from another thread.
    pub(crate) fn visibility_handle(&self, target: ItemId, poster: Poster) -> VisibilityHandle {
        VisibilityHandle {
            target,
            flags: Arc::clone(&self.flags),
            poster,
        }
    }
}

/// Toggles an item's visibility from any thread.
///
/// The flag lock is held only for the read-modify-write; the derived
/// `Show`/`Hide` event is posted after it is released.
#[derive(Debug, Clone)]
pub struct VisibilityHandle {
    /// Item whose flags this handle guards.
    target: ItemId,
    /// Shared flags.
    flags: Arc<Mutex<ItemFlags>>,
    /// Queue the derived events go to.
    poster: Poster,
}

impl VisibilityHandle {
    /// Set visibility. Returns `true` if it changed, in which case a `Show`
    /// or `Hide` event has been posted to the item.
    pub fn set_visible(&self, visible: bool) -> Result<bool> {
        let changed = {
            let mut flags = self.flags.lock();
            let changed = flags.visible != visible;
            if changed {
                flags.visible = visible;
                flags.geometry_dirty = true;
            }
            changed
        };
        if changed {
            let event = if visible { Event::Show } else { Event::Hide };
            self.poster.post(self.target, None, event)?;
        }
        Ok(changed)
    }

    /// Show the item.
    pub fn show(&self) -> Result<bool> {
        self.set_visible(true)
    }

    /// Hide the item.
    pub fn hide(&self) -> Result<bool> {
        self.set_visible(false)
    }

    /// Current visibility.
    pub fn is_visible(&self) -> bool {
        self.flags.lock().visible
    }

    /// The item this handle controls.
    pub fn target(&self) -> ItemId {
        self.target
    }
}
