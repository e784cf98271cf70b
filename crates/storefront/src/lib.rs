//! Bella Mode storefront library.
//!
//! Serves the shop's pages and drives the cart engine over HTMX. Each
//! visitor's session stands in for browser local storage.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod app;
pub mod catalog;
pub mod config;
pub mod error;
pub mod interaction;
pub mod middleware;
pub mod render;
pub mod routes;
pub mod state;
pub mod storage;

pub use app::build_router;
