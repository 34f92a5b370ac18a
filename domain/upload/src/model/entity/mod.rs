mod item;

#[rustfmt::skip]
pub use {
    item::ItemRef,
    item::RemoteItem,
};
