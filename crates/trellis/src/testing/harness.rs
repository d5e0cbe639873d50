use super::init_tracing;
use crate::{
    Core,
    config::Config,
    error::Result,
    event::{key::Key, mouse::Button},
    geom::{Point, Rect, Size},
    id::ItemId,
    item::LayoutItem,
    layout::Layout,
    routing::InputRouter,
};

/// A simple harness that holds a [`Core`] and a root item owning a layout.
/// Tests build a tree under the root, drive it with input and then inspect
/// the settled geometry and focus.
pub struct Harness {
    /// The core under test.
    pub core: Core,
    /// The root item. Its area is the harness window, centered on the origin.
    pub root: ItemId,
}

/// Builder for creating a test harness with a fluent API.
pub struct HarnessBuilder {
    /// Window size.
    size: Size,
    /// Layout owned by the root.
    layout: Layout,
    /// Core configuration.
    config: Config,
}

impl HarnessBuilder {
    /// Create a new harness builder with default settings.
    fn new() -> Self {
        Self {
            size: Size::new(100.0, 100.0),
            layout: Layout::horizontal(),
            config: Config::default(),
        }
    }

    /// Set the size of the harness window.
    pub fn size(mut self, width: f32, height: f32) -> Self {
        self.size = Size::new(width, height);
        self
    }

    /// Set the layout owned by the root.
    pub fn layout(mut self, layout: Layout) -> Self {
        self.layout = layout;
        self
    }

    /// Set the core configuration.
    pub fn config(mut self, config: Config) -> Self {
        self.config = config;
        self
    }

    /// Build the harness and settle the initial geometry.
    pub fn build(self) -> Result<Harness> {
        init_tracing();
        let mut core = Core::with_config(self.config);
        let root = core.add(LayoutItem::new("root", Some(self.size)).with_layout(self.layout))?;
        core.resize(root, Rect::at(Point::zero(), self.size))?;
        core.run_until_idle()?;
        Ok(Harness { core, root })
    }
}

impl Harness {
    /// Create a harness builder for constructing a test harness with a fluent API.
    pub fn builder() -> HarnessBuilder {
        HarnessBuilder::new()
    }

    /// Create a harness with a 100x100 window and a horizontal root layout.
    pub fn new() -> Result<Self> {
        Self::builder().build()
    }

    /// Add an item under the root.
    pub fn add(&mut self, item: LayoutItem) -> Result<ItemId> {
        let root = self.root;
        self.add_to(root, item)
    }

    /// Add an item under `parent`.
    pub fn add_to(&mut self, parent: ItemId, item: LayoutItem) -> Result<ItemId> {
        let id = self.core.add(item)?;
        self.core.add_child(parent, Some(id))?;
        Ok(id)
    }

    /// Run the core until no events are pending.
    pub fn settle(&mut self) -> Result<usize> {
        self.core.run_until_idle()
    }

    /// The settled area of an item.
    pub fn area(&self, id: ItemId) -> Result<Rect> {
        Ok(self.core.get(id)?.area())
    }

    /// Move the pointer and settle.
    pub fn hover(&mut self, p: Point) -> Result<Option<ItemId>> {
        let target = self.core.mouse_move(self.root, p)?;
        self.settle()?;
        Ok(target)
    }

    /// Press and release the left button and settle.
    pub fn click(&mut self, p: Point) -> Result<Option<ItemId>> {
        let target = self.core.mouse_press(self.root, Button::Left, p)?;
        self.core.mouse_release(self.root, Button::Left, p)?;
        self.settle()?;
        Ok(target)
    }

    /// Press and release a key and settle.
    pub fn key(&mut self, k: impl Into<Key>) -> Result<Option<ItemId>> {
        let k = k.into();
        let target = self.core.key_press(self.root, k)?;
        self.core.key_release(self.root, k)?;
        self.settle()?;
        Ok(target)
    }
}
