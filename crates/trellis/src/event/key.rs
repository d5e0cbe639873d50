//! Keyboard input primitives.
use std::ops::Add;

/// Modifier key state.
#[derive(Default, Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub struct Mods {
    /// Shift is active.
    pub shift: bool,
    /// Control is active.
    pub ctrl: bool,
    /// Alt is active.
    pub alt: bool,
}

/// No modifiers pressed.
#[allow(non_upper_case_globals)]
pub const Empty: Mods = Mods {
    shift: false,
    ctrl: false,
    alt: false,
};

/// Shift-only modifier state.
#[allow(non_upper_case_globals)]
pub const Shift: Mods = Mods {
    shift: true,
    ctrl: false,
    alt: false,
};

/// Key codes the core cares about. Everything else is carried as a char or
/// an opaque code for the widget collaborator.
#[derive(Debug, PartialEq, Eq, Hash, Clone, Copy)]
pub enum KeyCode {
    /// A printable character.
    Char(char),
    /// Forward navigation.
    Tab,
    /// Backward navigation.
    BackTab,
    /// Return.
    Enter,
    /// Escape.
    Esc,
    /// Backspace.
    Backspace,
    /// A key without a dedicated variant.
    Other(u32),
}

impl From<char> for KeyCode {
    fn from(c: char) -> Self {
        Self::Char(c)
    }
}

/// A key together with the modifiers held while it was pressed.
#[derive(Debug, PartialEq, Eq, Hash, Clone, Copy)]
pub struct Key {
    /// Modifier state.
    pub mods: Mods,
    /// The key itself.
    pub key: KeyCode,
}

impl Key {
    /// Is this a request to move focus forward?
    pub fn is_tab(&self) -> bool {
        self.key == KeyCode::Tab && !self.mods.shift
    }

    /// Is this a request to move focus backward?
    pub fn is_backtab(&self) -> bool {
        self.key == KeyCode::BackTab || (self.key == KeyCode::Tab && self.mods.shift)
    }
}

impl From<KeyCode> for Key {
    fn from(key: KeyCode) -> Self {
        Self { mods: Empty, key }
    }
}

impl From<char> for Key {
    fn from(c: char) -> Self {
        KeyCode::Char(c).into()
    }
}

impl Add<KeyCode> for Mods {
    type Output = Key;

    fn add(self, key: KeyCode) -> Self::Output {
        Key { mods: self, key }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tab_detection() {
        assert!(Key::from(KeyCode::Tab).is_tab());
        assert!(!Key::from(KeyCode::Tab).is_backtab());
        assert!((Shift + KeyCode::Tab).is_backtab());
        assert!(!(Shift + KeyCode::Tab).is_tab());
        assert!(Key::from(KeyCode::BackTab).is_backtab());
        assert!(!Key::from('a').is_tab());
    }
}
