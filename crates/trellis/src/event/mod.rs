/// Mask-based suppression of input events.
pub mod filter;
/// Keyboard input primitives.
pub mod key;
/// Mouse input primitives.
pub mod mouse;

use std::sync::mpsc;

use crate::{
    error::Result,
    focus::FocusReason,
    geom::{Point, Rect},
    id::ItemId,
    paint::PaintEvent,
};

/// Every event an item can receive.
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    /// Recompute the item's geometry if it is dirty and visible.
    GeometryUpdate,
    /// Assign a new area to the item.
    Resize(Rect),
    /// The item becomes visible.
    Show,
    /// The item becomes hidden.
    Hide,
    /// Regions of the item need repainting.
    Repaint(PaintEvent),
    /// A focus stimulus.
    FocusIn(FocusReason),
    /// A focus release stimulus.
    FocusOut(FocusReason),
    /// The item takes keyboard focus.
    KeyboardGrab,
    /// The item gives up keyboard focus.
    KeyboardRelease,
    /// A key went down.
    KeyPress(key::Key),
    /// A key went up.
    KeyRelease(key::Key),
    /// A mouse button went down at a location.
    MouseButtonPress(mouse::Button, Point),
    /// A mouse button went up at a location.
    MouseButtonRelease(mouse::Button, Point),
    /// The pointer moved to a location.
    MouseMove(Point),
    /// The wheel moved by a number of steps at a location.
    MouseWheel(Point, i32),
    /// The pointer entered the item.
    Enter,
    /// The pointer left the item.
    Leave,
}

/// The fieldless discriminant of an [`Event`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    /// See [`Event::GeometryUpdate`].
    GeometryUpdate,
    /// See [`Event::Resize`].
    Resize,
    /// See [`Event::Show`].
    Show,
    /// See [`Event::Hide`].
    Hide,
    /// See [`Event::Repaint`].
    Repaint,
    /// See [`Event::FocusIn`].
    FocusIn,
    /// See [`Event::FocusOut`].
    FocusOut,
    /// See [`Event::KeyboardGrab`].
    KeyboardGrab,
    /// See [`Event::KeyboardRelease`].
    KeyboardRelease,
    /// See [`Event::KeyPress`].
    KeyPress,
    /// See [`Event::KeyRelease`].
    KeyRelease,
    /// See [`Event::MouseButtonPress`].
    MouseButtonPress,
    /// See [`Event::MouseButtonRelease`].
    MouseButtonRelease,
    /// See [`Event::MouseMove`].
    MouseMove,
    /// See [`Event::MouseWheel`].
    MouseWheel,
    /// See [`Event::Enter`].
    Enter,
    /// See [`Event::Leave`].
    Leave,
}

impl Event {
    /// The kind of this event.
    pub fn kind(&self) -> EventKind {
        match self {
            Self::GeometryUpdate => EventKind::GeometryUpdate,
            Self::Resize(_) => EventKind::Resize,
            Self::Show => EventKind::Show,
            Self::Hide => EventKind::Hide,
            Self::Repaint(_) => EventKind::Repaint,
            Self::FocusIn(_) => EventKind::FocusIn,
            Self::FocusOut(_) => EventKind::FocusOut,
            Self::KeyboardGrab => EventKind::KeyboardGrab,
            Self::KeyboardRelease => EventKind::KeyboardRelease,
            Self::KeyPress(_) => EventKind::KeyPress,
            Self::KeyRelease(_) => EventKind::KeyRelease,
            Self::MouseButtonPress(..) => EventKind::MouseButtonPress,
            Self::MouseButtonRelease(..) => EventKind::MouseButtonRelease,
            Self::MouseMove(_) => EventKind::MouseMove,
            Self::MouseWheel(..) => EventKind::MouseWheel,
            Self::Enter => EventKind::Enter,
            Self::Leave => EventKind::Leave,
        }
    }
}

impl EventKind {
    /// Is this a keyboard event?
    pub fn is_keyboard(&self) -> bool {
        matches!(self, Self::KeyPress | Self::KeyRelease)
    }
}

/// An event addressed to an item, with the item that caused it.
#[derive(Debug, Clone, PartialEq)]
pub struct Envelope {
    /// Receiving item.
    pub target: ItemId,
    /// Item that emitted the event, if any.
    pub emitter: Option<ItemId>,
    /// The payload.
    pub event: Event,
    /// Set once a handler recognized the event.
    accepted: bool,
}

impl Envelope {
    /// Wrap an event for delivery.
    pub fn new(target: ItemId, emitter: Option<ItemId>, event: Event) -> Self {
        Self {
            target,
            emitter,
            event,
            accepted: false,
        }
    }

    /// Mark the event as handled.
    pub fn accept(&mut self) {
        self.accepted = true;
    }

    /// Has a handler recognized the event?
    pub fn is_accepted(&self) -> bool {
        self.accepted
    }
}

/// A cloneable handle that enqueues events for later dispatch. Posting never
/// runs a handler inline, and the handle can be moved to other threads.
#[derive(Debug, Clone)]
pub struct Poster {
    /// Sending half of the queue.
    tx: mpsc::Sender<Envelope>,
}

impl Poster {
    /// Enqueue `event` for `target`.
    pub fn post(&self, target: ItemId, emitter: Option<ItemId>, event: Event) -> Result<()> {
        self.tx.send(Envelope::new(target, emitter, event))?;
        Ok(())
    }
}

/// The queue from which the core pulls pending events.
#[derive(Debug)]
pub(crate) struct EventQueue {
    /// Sending half, cloned into every [`Poster`].
    tx: mpsc::Sender<Envelope>,
    /// Receiving half.
    rx: mpsc::Receiver<Envelope>,
}

impl EventQueue {
    /// Create an empty queue.
    pub(crate) fn new() -> Self {
        let (tx, rx) = mpsc::channel();
        Self { tx, rx }
    }

    /// A posting handle for this queue.
    pub(crate) fn poster(&self) -> Poster {
        Poster {
            tx: self.tx.clone(),
        }
    }

    /// Take every event pending right now, without blocking.
    pub(crate) fn drain(&self) -> Vec<Envelope> {
        self.rx.try_iter().collect()
    }
}

#[cfg(test)]
mod tests {
    use slotmap::SlotMap;

    use super::*;

    #[test]
    fn queue_is_fifo() -> Result<()> {
        let mut ids: SlotMap<ItemId, ()> = SlotMap::with_key();
        let a = ids.insert(());
        let b = ids.insert(());

        let q = EventQueue::new();
        let p = q.poster();
        p.post(a, None, Event::Show)?;
        p.post(b, Some(a), Event::GeometryUpdate)?;

        let events = q.drain();
        assert_eq!(events.len(), 2);
        assert_eq!(events[0].target, a);
        assert_eq!(events[1].emitter, Some(a));
        assert_eq!(events[1].event.kind(), EventKind::GeometryUpdate);
        assert!(!events[0].is_accepted());
        assert!(q.drain().is_empty());
        Ok(())
    }

    #[test]
    fn posting_from_another_thread() -> Result<()> {
        let mut ids: SlotMap<ItemId, ()> = SlotMap::with_key();
        let a = ids.insert(());
        let q = EventQueue::new();
        let p = q.poster();
        std::thread::spawn(move || p.post(a, None, Event::Hide))
            .join()
            .map_err(|_| crate::Error::Internal("poster thread panicked".into()))??;
        assert_eq!(q.drain()[0].event, Event::Hide);
        Ok(())
    }

    #[test]
    fn kinds() {
        assert!(Event::KeyPress('a'.into()).kind().is_keyboard());
        assert!(!Event::MouseMove(Point::zero()).kind().is_keyboard());
    }
}
