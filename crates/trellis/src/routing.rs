use tracing::debug;

use crate::{
    core::Core,
    error::Result,
    event::{Event, key::Key, mouse::Button},
    focus::{FocusPolicy, FocusReason},
    geom::Point,
    id::ItemId,
    navigation::FocusManager,
};

/// Translation of raw host input into item events.
///
/// Every method posts events and returns the item they were addressed to;
/// nothing is dispatched until the core ticks.
pub trait InputRouter {
    /// Track the pointer: the item under `p` receives `Enter` and hover
    /// focus, the previously hovered item `Leave`, then the new item a
    /// `MouseMove`.
    fn mouse_move(&mut self, root: ItemId, p: Point) -> Result<Option<ItemId>>;

    /// A button went down at `p`. Click-focusable targets take focus and the
    /// keyboard.
    fn mouse_press(&mut self, root: ItemId, button: Button, p: Point) -> Result<Option<ItemId>>;

    /// A button went up at `p`.
    fn mouse_release(&mut self, root: ItemId, button: Button, p: Point)
    -> Result<Option<ItemId>>;

    /// The wheel moved at `p`. Wheel-focusable targets take focus.
    fn mouse_wheel(&mut self, root: ItemId, p: Point, steps: i32) -> Result<Option<ItemId>>;

    /// A key went down. Tab and backtab move focus within `root`; anything
    /// else goes to the keyboard focus holder.
    fn key_press(&mut self, root: ItemId, key: Key) -> Result<Option<ItemId>>;

    /// A key went up. Delivered to the keyboard focus holder.
    fn key_release(&mut self, root: ItemId, key: Key) -> Result<Option<ItemId>>;
}

impl InputRouter for Core {
    fn mouse_move(&mut self, root: ItemId, p: Point) -> Result<Option<ItemId>> {
        let target = self.get_item_at(root, p);
        if target != self.hovered {
            if let Some(old) = self.hovered {
                self.post(old, Event::Leave)?;
                if allows(self, old, FocusPolicy::can_grab_hover_focus) {
                    self.post(old, Event::FocusOut(FocusReason::HoverFocus))?;
                }
            }
            if let Some(new) = target {
                self.post(new, Event::Enter)?;
                if allows(self, new, FocusPolicy::can_grab_hover_focus) {
                    self.post(new, Event::FocusIn(FocusReason::HoverFocus))?;
                }
            }
            self.hovered = target;
        }
        if let Some(t) = target {
            self.post(t, Event::MouseMove(p))?;
        }
        Ok(target)
    }

    fn mouse_press(&mut self, root: ItemId, button: Button, p: Point) -> Result<Option<ItemId>> {
        let Some(target) = self.get_item_at(root, p) else {
            debug!(?p, "mouse press outside every item");
            return Ok(None);
        };
        self.post(target, Event::MouseButtonPress(button, p))?;
        if allows(self, target, FocusPolicy::can_grab_click_focus) {
            self.set_focus(target, FocusReason::MouseFocus)?;
        }
        Ok(Some(target))
    }

    fn mouse_release(
        &mut self,
        root: ItemId,
        button: Button,
        p: Point,
    ) -> Result<Option<ItemId>> {
        let target = self.get_item_at(root, p);
        if let Some(t) = target {
            self.post(t, Event::MouseButtonRelease(button, p))?;
        }
        Ok(target)
    }

    fn mouse_wheel(&mut self, root: ItemId, p: Point, steps: i32) -> Result<Option<ItemId>> {
        let target = self.get_item_at(root, p);
        if let Some(t) = target {
            self.post(t, Event::MouseWheel(p, steps))?;
            if allows(self, t, FocusPolicy::can_grab_wheel_focus) {
                self.post(t, Event::FocusIn(FocusReason::MouseFocus))?;
            }
        }
        Ok(target)
    }

    fn key_press(&mut self, root: ItemId, key: Key) -> Result<Option<ItemId>> {
        if key.is_backtab() {
            return self.focus_prev(root);
        }
        if key.is_tab() {
            return self.focus_next(root);
        }
        let target = self.keyboard_focus();
        match target {
            Some(t) => self.post(t, Event::KeyPress(key))?,
            None => debug!(?key, "key press without keyboard focus"),
        }
        Ok(target)
    }

    fn key_release(&mut self, _root: ItemId, key: Key) -> Result<Option<ItemId>> {
        let target = self.keyboard_focus();
        if let Some(t) = target {
            self.post(t, Event::KeyRelease(key))?;
        }
        Ok(target)
    }
}

/// Does the focus policy of `id` pass `check`?
fn allows(core: &Core, id: ItemId, check: fn(&FocusPolicy) -> bool) -> bool {
    core.item(id).is_some_and(|i| check(&i.focus_policy()))
}
