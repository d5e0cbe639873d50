use crate::{
    core::Core,
    error::Result,
    event::Event,
    focus::{FocusReason, FocusState},
    id::ItemId,
};

/// Trait for moving logical and keyboard focus across the item tree.
pub trait FocusManager {
    /// The item under `root` holding the strongest focus. Ties go to the
    /// first in pre-order.
    fn focused_item(&self, root: ItemId) -> Option<ItemId>;

    /// The item holding keyboard focus, if any.
    fn keyboard_focus(&self) -> Option<ItemId>;

    /// Visible items under `root` that accept tab focus, in pre-order.
    fn focus_chain(&self, root: ItemId) -> Vec<ItemId>;

    /// Move focus to `target` for `reason`: the current keyboard focus
    /// holder is released and `target` grabs the keyboard.
    fn set_focus(&mut self, target: ItemId, reason: FocusReason) -> Result<()>;

    /// Focus the next tab-focusable item in the pre-order traversal of
    /// `root`, wrapping around. Returns the new target.
    fn focus_next(&mut self, root: ItemId) -> Result<Option<ItemId>>;

    /// Focus the previous tab-focusable item in the pre-order traversal of
    /// `root`, wrapping around. Returns the new target.
    fn focus_prev(&mut self, root: ItemId) -> Result<Option<ItemId>>;
}

impl FocusManager for Core {
    fn focused_item(&self, root: ItemId) -> Option<ItemId> {
        let mut best: Option<(FocusState, ItemId)> = None;
        for id in pre_order(self, root) {
            let Some(state) = self.item(id).map(|i| i.focus_state()) else {
                continue;
            };
            if state.has_focus() && best.is_none_or(|(s, _)| state > s) {
                best = Some((state, id));
            }
        }
        best.map(|(_, id)| id)
    }

    fn keyboard_focus(&self) -> Option<ItemId> {
        self.items
            .iter()
            .find(|(_, i)| i.has_keyboard_focus())
            .map(|(id, _)| id)
    }

    fn focus_chain(&self, root: ItemId) -> Vec<ItemId> {
        pre_order(self, root)
            .into_iter()
            .filter(|id| {
                self.item(*id)
                    .is_some_and(|i| i.focus_policy().can_grab_tab_focus())
            })
            .collect()
    }

    fn set_focus(&mut self, target: ItemId, reason: FocusReason) -> Result<()> {
        self.get(target)?;
        if let Some(current) = self.keyboard_focus()
            && current != target
        {
            self.post(current, Event::FocusOut(reason))?;
        }
        self.post(target, Event::FocusIn(reason))?;
        self.post(target, Event::KeyboardGrab)
    }

    fn focus_next(&mut self, root: ItemId) -> Result<Option<ItemId>> {
        let chain = self.focus_chain(root);
        let current = self
            .keyboard_focus()
            .and_then(|k| chain.iter().position(|c| *c == k));
        let next = match current {
            Some(pos) => chain.get((pos + 1) % chain.len()),
            None => chain.first(),
        };
        cycle_to(self, next.copied(), FocusReason::TabFocus)
    }

    fn focus_prev(&mut self, root: ItemId) -> Result<Option<ItemId>> {
        let chain = self.focus_chain(root);
        let current = self
            .keyboard_focus()
            .and_then(|k| chain.iter().position(|c| *c == k));
        let prev = match current {
            Some(pos) => chain.get((pos + chain.len() - 1) % chain.len()),
            None => chain.last(),
        };
        cycle_to(self, prev.copied(), FocusReason::BacktabFocus)
    }
}

// Private helper functions

/// Focus `target` through keyboard navigation, unless it already holds the
/// keyboard.
fn cycle_to(core: &mut Core, target: Option<ItemId>, reason: FocusReason) -> Result<Option<ItemId>> {
    let Some(target) = target else {
        return Ok(None);
    };
    if core.keyboard_focus() != Some(target) {
        core.set_focus(target, reason)?;
    }
    Ok(Some(target))
}

/// Visible items under `root`, root included, in pre-order. Hidden items
/// prune their subtree.
fn pre_order(core: &Core, root: ItemId) -> Vec<ItemId> {
    let mut out = Vec::new();
    let mut stack = vec![root];
    while let Some(id) = stack.pop() {
        let Some(item) = core.item(id) else {
            continue;
        };
        if !item.is_visible() {
            continue;
        }
        out.push(id);
        if let Some(layout) = item.layout() {
            for child in layout.items().iter().rev() {
                stack.push(*child);
            }
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{FocusPolicy, Layout, LayoutItem};

    fn tree(core: &mut Core) -> Result<(ItemId, Vec<ItemId>)> {
        let root = core.add(LayoutItem::new("root", None).with_layout(Layout::vertical()))?;
        let row = core.add(LayoutItem::new("row", None).with_layout(Layout::horizontal()))?;
        let mut leaves = Vec::new();
        for name in ["a", "b", "c"] {
            leaves.push(core.add(LayoutItem::new(name, None).with_focus_policy(FocusPolicy::STRONG))?);
        }
        core.add_child(root, Some(leaves[0]))?;
        core.add_child(root, Some(row))?;
        core.add_child(row, Some(leaves[1]))?;
        core.add_child(row, Some(leaves[2]))?;
        core.run_until_idle()?;
        Ok((root, leaves))
    }

    #[test]
    fn chain_is_pre_order() -> Result<()> {
        let mut core = Core::new();
        let (root, leaves) = tree(&mut core)?;
        assert_eq!(core.focus_chain(root), leaves);

        core.hide(leaves[1])?;
        core.run_until_idle()?;
        assert_eq!(core.focus_chain(root), vec![leaves[0], leaves[2]]);
        Ok(())
    }

    #[test]
    fn next_and_prev_wrap() -> Result<()> {
        let mut core = Core::new();
        let (root, leaves) = tree(&mut core)?;

        assert_eq!(core.focus_next(root)?, Some(leaves[0]));
        core.run_until_idle()?;
        assert_eq!(core.keyboard_focus(), Some(leaves[0]));
        assert_eq!(core.focused_item(root), Some(leaves[0]));

        core.focus_next(root)?;
        core.run_until_idle()?;
        assert_eq!(core.keyboard_focus(), Some(leaves[1]));
        assert_eq!(core.get(leaves[0])?.focus_state(), FocusState::None);
        assert_eq!(core.get(leaves[1])?.focus_state(), FocusState::Tab);

        core.focus_prev(root)?;
        core.run_until_idle()?;
        core.focus_prev(root)?;
        core.run_until_idle()?;
        assert_eq!(core.keyboard_focus(), Some(leaves[2]));
        assert!(!core.get(leaves[0])?.has_keyboard_focus());
        Ok(())
    }

    #[test]
    fn empty_chain() -> Result<()> {
        let mut core = Core::new();
        let root = core.add(LayoutItem::new("root", None).with_layout(Layout::vertical()))?;
        assert_eq!(core.focus_next(root)?, None);
        assert_eq!(core.focused_item(root), None);
        Ok(())
    }
}
