use slotmap::new_key_type;

new_key_type! {
    /// Opaque identifier for an item stored in the [`Core`](crate::Core) arena.
    ///
    /// The handle is non-owning: once the item is removed from the arena,
    /// lookups through a stale id fail instead of reaching a recycled item.
    pub struct ItemId;
}
