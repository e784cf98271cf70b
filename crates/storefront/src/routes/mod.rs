//! HTTP route handlers for storefront.
//!
//! # Route Structure
//!
//! ```text
//! GET  /                         - Home page
//! GET  /index.html               - Home page
//! GET  /collection.html          - Collection page
//! GET  /about.html               - About page
//! GET  /contact.html             - Contact page
//!
//! # Cart (HTMX fragments)
//! GET  /cart                     - Cart page
//! GET  /cart.html                - Cart page
//! GET  /cart/count               - Cart count badge (fragment)
//! POST /cart/add                 - Add to cart (returns badge)
//! POST /cart/items/{i}/{control} - Row control (returns cart_items fragment)
//! POST /cart/clear               - Empty the cart (returns cart_items fragment)
//! POST /cart/checkout            - Check out (returns cart_items fragment)
//! ```

pub mod cart;
pub mod pages;

use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

/// Create the page routes router.
pub fn page_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(pages::home))
        .route("/index.html", get(pages::home))
        .route("/collection.html", get(pages::collection))
        .route("/about.html", get(pages::about))
        .route("/contact.html", get(pages::contact))
        .route("/cart.html", get(cart::show))
}

/// Create the cart routes router.
pub fn cart_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(cart::show))
        .route("/count", get(cart::count))
        .route("/add", post(cart::add))
        .route("/items/{index}/{control}", post(cart::control))
        .route("/clear", post(cart::clear))
        .route("/checkout", post(cart::checkout))
}

/// Create all routes for the storefront.
pub fn routes() -> Router<AppState> {
    Router::new()
        .merge(page_routes())
        .nest("/cart", cart_routes())
}
