use bitflags::bitflags;

use super::EventKind;
use crate::error::{Error, Result};

bitflags! {
    /// A set of user input event classes.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct InputMask: u16 {
        /// Key presses.
        const KEY_PRESSED = 1 << 0;
        /// Key releases.
        const KEY_RELEASED = 1 << 1;
        /// Mouse button presses.
        const MOUSE_BUTTON_PRESSED = 1 << 2;
        /// Mouse button releases.
        const MOUSE_BUTTON_RELEASED = 1 << 3;
        /// Pointer motion.
        const MOUSE_MOVE = 1 << 4;
        /// Wheel motion.
        const MOUSE_WHEEL = 1 << 5;
        /// Pointer entering an item.
        const ENTER = 1 << 6;
        /// Pointer leaving an item.
        const LEAVE = 1 << 7;
        /// All keyboard input.
        const KEYBOARD = Self::KEY_PRESSED.bits() | Self::KEY_RELEASED.bits();
        /// All mouse input.
        const MOUSE = Self::MOUSE_BUTTON_PRESSED.bits()
            | Self::MOUSE_BUTTON_RELEASED.bits()
            | Self::MOUSE_MOVE.bits()
            | Self::MOUSE_WHEEL.bits()
            | Self::ENTER.bits()
            | Self::LEAVE.bits();
    }
}

/// Static name table for mask bits.
const MASK_NAMES: &[(&str, InputMask)] = &[
    ("key_pressed", InputMask::KEY_PRESSED),
    ("key_released", InputMask::KEY_RELEASED),
    ("mouse_button_pressed", InputMask::MOUSE_BUTTON_PRESSED),
    ("mouse_button_released", InputMask::MOUSE_BUTTON_RELEASED),
    ("mouse_move", InputMask::MOUSE_MOVE),
    ("mouse_wheel", InputMask::MOUSE_WHEEL),
    ("enter", InputMask::ENTER),
    ("leave", InputMask::LEAVE),
    ("keyboard", InputMask::KEYBOARD),
    ("mouse", InputMask::MOUSE),
];

impl InputMask {
    /// Look up a mask bit by name. Unregistered names are a programming
    /// error.
    pub fn by_name(name: &str) -> Result<Self> {
        MASK_NAMES
            .iter()
            .find(|(n, _)| *n == name)
            .map(|(_, m)| *m)
            .ok_or_else(|| Error::UnregisteredBit(name.into()))
    }

    /// Union of several named bits.
    pub fn by_names<'a>(names: impl IntoIterator<Item = &'a str>) -> Result<Self> {
        names
            .into_iter()
            .try_fold(Self::empty(), |acc, n| Ok(acc | Self::by_name(n)?))
    }

    /// The bit corresponding to an event kind, if the kind is user input.
    pub fn for_kind(kind: EventKind) -> Option<Self> {
        match kind {
            EventKind::KeyPress => Some(Self::KEY_PRESSED),
            EventKind::KeyRelease => Some(Self::KEY_RELEASED),
            EventKind::MouseButtonPress => Some(Self::MOUSE_BUTTON_PRESSED),
            EventKind::MouseButtonRelease => Some(Self::MOUSE_BUTTON_RELEASED),
            EventKind::MouseMove => Some(Self::MOUSE_MOVE),
            EventKind::MouseWheel => Some(Self::MOUSE_WHEEL),
            EventKind::Enter => Some(Self::ENTER),
            EventKind::Leave => Some(Self::LEAVE),
            _ => None,
        }
    }
}

/// Suppresses classes of user input before they reach an item's handlers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct UserInputFilter {
    /// Event classes the filter is about.
    mask: InputMask,
    /// When set, the filter suppresses everything outside `mask` instead.
    exclusion: bool,
}

impl UserInputFilter {
    /// Filter out the events matching `mask`.
    pub fn matching(mask: InputMask) -> Self {
        Self {
            mask,
            exclusion: false,
        }
    }

    /// Filter out the events not matching `mask`.
    pub fn not_matching(mask: InputMask) -> Self {
        Self {
            mask,
            exclusion: true,
        }
    }

    /// The mask this filter tests against.
    pub fn mask(&self) -> InputMask {
        self.mask
    }

    /// Is this an exclusion filter?
    pub fn is_exclusion(&self) -> bool {
        self.exclusion
    }

    /// Should an event of `kind` be suppressed? Kinds that do not map to a
    /// mask bit are never filtered.
    pub fn is_filtered(&self, kind: EventKind) -> bool {
        let Some(bit) = InputMask::for_kind(kind) else {
            return false;
        };
        let hit = self.mask.intersects(bit);
        if self.exclusion { !hit } else { hit }
    }
}
