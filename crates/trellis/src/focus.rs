use std::str::FromStr;

use bitflags::bitflags;

use crate::error::{Error, Result};

bitflags! {
    /// The ways an item may acquire focus.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct FocusPolicy: u8 {
        /// Focus follows the pointer.
        const HOVER = 1 << 0;
        /// Focus on button press.
        const CLICK = 1 << 1;
        /// Focus through keyboard navigation.
        const TAB = 1 << 2;
        /// Focus on wheel motion.
        const WHEEL = 1 << 3;
        /// Every way at once.
        const STRONG = Self::HOVER.bits() | Self::CLICK.bits() | Self::TAB.bits() | Self::WHEEL.bits();
    }
}

/// Static name table for focus policies.
const FOCUS_POLICY_NAMES: &[(&str, FocusPolicy)] = &[
    ("no_focus", FocusPolicy::empty()),
    ("hover_focus", FocusPolicy::HOVER),
    ("click_focus", FocusPolicy::CLICK),
    ("tab_focus", FocusPolicy::TAB),
    ("wheel_focus", FocusPolicy::WHEEL),
    ("strong_focus", FocusPolicy::STRONG),
];

impl FocusPolicy {
    /// Look up a policy by name. Unknown names are a programming error.
    pub fn by_name(name: &str) -> Result<Self> {
        FOCUS_POLICY_NAMES
            .iter()
            .find(|(n, _)| *n == name)
            .map(|(_, p)| *p)
            .ok_or_else(|| Error::UnknownFocusPolicy(name.into()))
    }

    /// Can the item take focus when hovered?
    pub fn can_grab_hover_focus(&self) -> bool {
        self.contains(Self::HOVER)
    }

    /// Can the item take focus when clicked?
    pub fn can_grab_click_focus(&self) -> bool {
        self.contains(Self::CLICK)
    }

    /// Can the item take focus through keyboard navigation?
    pub fn can_grab_tab_focus(&self) -> bool {
        self.contains(Self::TAB)
    }

    /// Can the item take focus on wheel motion?
    pub fn can_grab_wheel_focus(&self) -> bool {
        self.contains(Self::WHEEL)
    }
}

impl FromStr for FocusPolicy {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::by_name(s)
    }
}

/// The stimulus that requests or releases focus.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FocusReason {
    /// The pointer entered the item.
    HoverFocus,
    /// A mouse button was pressed over the item.
    MouseFocus,
    /// Forward keyboard navigation.
    TabFocus,
    /// Backward keyboard navigation.
    BacktabFocus,
    /// Anything else.
    OtherFocus,
}

/// Visual role an item should be drawn with, derived from its focus state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColorRole {
    /// Unfocused.
    Background,
    /// Hovered.
    Highlight,
    /// Focused through the keyboard or a click.
    Dark,
}

/// The reason currently granting focus to an item.
///
/// Variants are ordered by how specialized the reason is: `None < Hover <
/// Tab < Click`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub enum FocusState {
    /// Not focused.
    #[default]
    None,
    /// Focused by hovering.
    Hover,
    /// Focused by keyboard navigation.
    Tab,
    /// Focused by a click.
    Click,
}

impl From<FocusReason> for FocusState {
    fn from(reason: FocusReason) -> Self {
        match reason {
            FocusReason::HoverFocus => Self::Hover,
            FocusReason::MouseFocus => Self::Click,
            FocusReason::TabFocus | FocusReason::BacktabFocus => Self::Tab,
            FocusReason::OtherFocus => Self::None,
        }
    }
}

impl FocusState {
    /// Is any reason holding focus?
    pub fn has_focus(&self) -> bool {
        *self != Self::None
    }

    /// Handle a focus-in stimulus. A strictly stronger reason replaces the
    /// current one. Returns `true` if the state changed and the visual role
    /// needs refreshing.
    pub fn handle_focus_in(&mut self, reason: FocusReason) -> bool {
        let candidate = Self::from(reason);
        if candidate > *self {
            *self = candidate;
            true
        } else {
            false
        }
    }

    /// Handle a focus-out stimulus. A reason at least as strong as the one
    /// holding focus releases it; a weaker one cannot. An unfocused item
    /// never changes. Returns `true` if the state changed.
    pub fn handle_focus_out(&mut self, reason: FocusReason) -> bool {
        if *self == Self::None {
            return false;
        }
        if *self <= Self::from(reason) {
            *self = Self::None;
            true
        } else {
            false
        }
    }

    /// The role the rendering collaborator should draw with.
    pub fn color_role(&self) -> ColorRole {
        match self {
            Self::None => ColorRole::Background,
            Self::Hover => ColorRole::Highlight,
            Self::Tab | Self::Click => ColorRole::Dark,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn reason() -> impl Strategy<Value = FocusReason> {
        prop_oneof![
            Just(FocusReason::HoverFocus),
            Just(FocusReason::MouseFocus),
            Just(FocusReason::TabFocus),
            Just(FocusReason::BacktabFocus),
            Just(FocusReason::OtherFocus),
        ]
    }

    #[test]
    fn ordering() {
        assert!(FocusState::None < FocusState::Hover);
        assert!(FocusState::Hover < FocusState::Tab);
        assert!(FocusState::Tab < FocusState::Click);
    }

    #[test]
    fn focus_in_upgrades_only() {
        let mut s = FocusState::default();
        assert!(s.handle_focus_in(FocusReason::HoverFocus));
        assert_eq!(s, FocusState::Hover);
        assert!(s.handle_focus_in(FocusReason::MouseFocus));
        assert_eq!(s, FocusState::Click);
        assert!(!s.handle_focus_in(FocusReason::TabFocus));
        assert_eq!(s, FocusState::Click);
        assert!(!s.handle_focus_in(FocusReason::MouseFocus));
        assert!(!FocusState::default().handle_focus_in(FocusReason::OtherFocus));
    }

    #[test]
    fn focus_out_needs_a_strong_enough_reason() {
        let mut s = FocusState::Tab;
        assert!(!s.handle_focus_out(FocusReason::HoverFocus));
        assert_eq!(s, FocusState::Tab);
        assert!(s.handle_focus_out(FocusReason::BacktabFocus));
        assert_eq!(s, FocusState::None);

        let mut s = FocusState::Hover;
        assert!(s.handle_focus_out(FocusReason::MouseFocus));
        assert_eq!(s, FocusState::None);

        let mut s = FocusState::Click;
        assert!(!s.handle_focus_out(FocusReason::TabFocus));
        assert!(s.handle_focus_out(FocusReason::MouseFocus));
    }

    #[test]
    fn color_roles() {
        assert_eq!(FocusState::None.color_role(), ColorRole::Background);
        assert_eq!(FocusState::Hover.color_role(), ColorRole::Highlight);
        assert_eq!(FocusState::Tab.color_role(), ColorRole::Dark);
        assert_eq!(FocusState::Click.color_role(), ColorRole::Dark);
    }

    #[test]
    fn policy_names() -> Result<()> {
        assert_eq!(FocusPolicy::by_name("strong_focus")?, FocusPolicy::STRONG);
        let p: FocusPolicy = "click_focus".parse()?;
        assert!(p.can_grab_click_focus() && !p.can_grab_hover_focus());
        assert!(FocusPolicy::STRONG.can_grab_hover_focus());
        assert!(FocusPolicy::STRONG.can_grab_tab_focus());
        assert!(FocusPolicy::STRONG.can_grab_wheel_focus());
        assert!(matches!(
            FocusPolicy::by_name("sticky"),
            Err(Error::UnknownFocusPolicy(_))
        ));
        // Flag identifiers and policy names are separate tables.
        assert_eq!(FocusPolicy::from_name("HOVER"), Some(FocusPolicy::HOVER));
        assert_eq!(FocusPolicy::from_name("hover_focus"), None);
        Ok(())
    }

    proptest! {
        #[test]
        fn focus_in_is_monotonic(reasons in proptest::collection::vec(reason(), 0..16)) {
            let mut s = FocusState::default();
            for r in reasons {
                let before = s;
                let changed = s.handle_focus_in(r);
                prop_assert!(s >= before);
                prop_assert_eq!(changed, s != before);
            }
        }

        #[test]
        fn focus_out_on_unfocused_is_inert(r in reason()) {
            let mut s = FocusState::None;
            prop_assert!(!s.handle_focus_out(r));
            prop_assert_eq!(s, FocusState::None);
        }
    }
}
