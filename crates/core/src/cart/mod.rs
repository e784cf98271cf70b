//! The cart engine.
//!
//! - [`document`] - the persisted aggregate and its invariants
//! - [`storage`] - the key-value port and the persistence adapter
//! - [`store`] - read-modify-write cart operations
//! - [`render`] - projection into mount points and control binding
//! - [`interaction`] - confirmation and notification capabilities
//! - [`input`] - fail-soft coercion of submitted values

pub mod document;
pub mod input;
pub mod interaction;
pub mod render;
pub mod storage;
pub mod store;

#[cfg(test)]
pub(crate) mod testing;

pub use document::{CartDocument, DecodeError, LineItem};
pub use interaction::{DEFAULT_NOTICE_DURATION, Interaction, Notice, NoticeKind, prompts};
pub use render::{
    Binding, CartProjection, ControlKind, EMPTY_CART_LABEL, Headless, RenderTarget, RowView,
    TableBody, render,
};
pub use storage::{CART_STORAGE_KEY, CartRepository, KeyValueStore, MemoryStore, StorageError};
pub use store::{CartCommand, CartStore, Outcome};
