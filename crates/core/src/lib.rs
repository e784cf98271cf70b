//! Bella Mode Core - the storefront's cart engine and page navigation.
//!
//! This crate is shared by every Bella Mode host:
//! - `storefront` - the web storefront (session-backed cart, HTMX pages)
//! - `cli` - a terminal client working on a file-backed cart
//!
//! # Architecture
//!
//! The core does no I/O of its own. Storage, user prompts, page mount points
//! and navigation are traits implemented by each host, so every operation
//! can be driven deterministically from tests.
//!
//! # Modules
//!
//! - [`types`] - prices, currency formatting and the page cycle
//! - [`cart`] - cart document, persistence adapter, store and renderer
//! - [`gesture`] - swipe/keyboard navigation state machine

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cart;
pub mod gesture;
pub mod types;

pub use types::*;
