//! Trellis: layout negotiation and focus routing for retained-mode widget trees.
//!
//! Trellis computes concrete geometry for a tree of items from their size
//! constraints, and routes input and paint events down the tree while
//! tracking which item holds logical and keyboard focus. Rendering, fonts and
//! the OS event pump are external collaborators.
//!
//! # Quick Start
//!
//! The main entry points are:
//! - [`Core`] - the item arena and event pump
//! - [`LayoutItem`] - the unit of geometry
//! - [`Layout`] - a container negotiating space among its children
//!
//! # Module Organization
//!
//! - [`geom`] - Geometry primitives (Rect, Point, Size)
//! - [`policy`] - Size policies
//! - [`focus`] - Focus policies and the focus state machine
//! - [`event`] - Events, queues and input filters

#![warn(missing_docs)]

/// The item arena and event dispatch.
mod core;

/// Runtime configuration.
pub mod config;
/// Error types.
pub mod error;
/// Events, queueing and input filtering.
pub mod event;
/// Focus policy and focus state.
pub mod focus;
/// Item identifiers.
pub mod id;
/// The unit of geometry.
pub mod item;
/// Layout containers and the negotiation algorithm.
pub mod layout;
/// Focus navigation across the item tree.
pub mod navigation;
/// Paint regions and their propagation.
pub mod paint;
/// Size policies.
pub mod policy;
/// Translation of raw input into item events.
pub mod routing;
/// Item names.
pub mod state;
/// Testing utilities.
#[cfg(any(test, feature = "testing"))]
pub mod testing;

pub use trellis_geom as geom;

pub use crate::core::Core;
pub use config::Config;
pub use error::{Error, Result};
pub use event::{Envelope, Event, EventKind, Poster};
pub use focus::{ColorRole, FocusPolicy, FocusReason, FocusState};
pub use id::ItemId;
pub use item::{InputHandler, LayoutItem, VisibilityHandle};
pub use layout::{Arrangement, Layout, Nesting};
pub use navigation::FocusManager;
pub use paint::{Frame, PaintEvent, PaintRegion};
pub use policy::{AxisPolicy, Policy, SizePolicy};
pub use routing::InputRouter;
pub use state::ItemName;
