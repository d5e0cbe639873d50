use std::{result::Result as StdResult, sync::mpsc};

use thiserror::Error;

use crate::{geom, id::ItemId};

/// Result type for trellis operations.
pub type Result<T> = StdResult<T, Error>;

/// Core error type.
#[derive(PartialEq, Eq, Error, Debug, Clone)]
pub enum Error {
    #[error("duplicate item: {0:?} is already managed by this layout")]
    /// An item was inserted twice into the same layout.
    DuplicateItem(ItemId),
    #[error("item not found: {0:?}")]
    /// The handle does not refer to a live item.
    ItemNotFound(ItemId),
    #[error("no layout: {0:?} does not own a layout")]
    /// A layout operation was requested on an item without a layout.
    NoLayout(ItemId),
    #[error("unknown focus policy: {0}")]
    /// A focus policy name is not in the name table.
    UnknownFocusPolicy(String),
    #[error("unknown size policy: {0}")]
    /// A size policy name is not in the name table.
    UnknownSizePolicy(String),
    #[error("unregistered bit: {0}")]
    /// A mask bit name is not in the name table.
    UnregisteredBit(String),
    #[error("invalid name: {0}")]
    /// An item name violates the naming rules.
    InvalidName(String),
    #[error("geometry: {0}")]
    /// Geometry failure.
    Geometry(String),
    #[error("internal: {0}")]
    /// Internal error.
    Internal(String),
}

impl From<geom::Error> for Error {
    fn from(e: geom::Error) -> Self {
        Self::Geometry(e.to_string())
    }
}

impl From<mpsc::SendError<crate::event::Envelope>> for Error {
    fn from(e: mpsc::SendError<crate::event::Envelope>) -> Self {
        Self::Internal(format!("event queue closed: {e}"))
    }
}
