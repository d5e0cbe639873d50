//! Mouse input primitives.

/// The button behind a press or release.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum Button {
    /// Primary button.
    Left,
    /// Secondary button.
    Right,
    /// Wheel button.
    Middle,
    /// Any extra button, by host index.
    Other(u8),
}
