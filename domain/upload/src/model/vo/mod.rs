mod access;
mod content;
mod metadata;
mod part;
mod status;
mod task;

#[rustfmt::skip]
pub use {
    access::*,
    content::*,
    metadata::*,
    part::*,
    status::*,
    task::*,
};
