//! Cart route handlers.
//!
//! Every request runs one cart operation against the session's storage slot
//! and answers with a freshly rendered fragment. The `HX-Trigger` header
//! always carries `cart-updated` so badges elsewhere on the page refresh,
//! plus a toast when the operation produced a notice.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::{Path, State},
    response::{AppendHeaders, IntoResponse, Response},
};
use bella_mode_core::cart::{
    CartCommand, CartStore, ControlKind, EMPTY_CART_LABEL, input, prompts,
};
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;

use crate::error::{AppError, Result};
use crate::interaction::{HX_TRIGGER, HtmxInteraction};
use crate::render::{HtmlTarget, TableView};
use crate::routes::pages::PageNav;
use crate::state::AppState;
use crate::storage::SessionStorage;

/// Add to cart form data.
///
/// Product cards post their displayed name and price label.
#[derive(Debug, Deserialize)]
pub struct AddToCartForm {
    pub name: Option<String>,
    pub price: Option<String>,
    pub qty: Option<String>,
}

/// Row control form data.
#[derive(Debug, Default, Deserialize)]
pub struct ControlForm {
    /// Quantity field value; only the quantity control sends it.
    pub qty: Option<String>,
    /// Prompt the user accepted, if the control asked one.
    pub confirmed: Option<String>,
}

/// Form data for operations that may need confirmation.
#[derive(Debug, Default, Deserialize)]
pub struct ConfirmForm {
    /// Prompt the user accepted.
    pub confirmed: Option<String>,
}

/// Cart page template.
#[derive(Template, WebTemplate)]
#[template(path = "cart/show.html")]
pub struct CartShowTemplate {
    pub nav: PageNav,
    pub item_count: u64,
    pub table: TableView,
}

/// Cart items fragment template (for HTMX).
#[derive(Template, WebTemplate)]
#[template(path = "partials/cart_items.html")]
pub struct CartItemsTemplate {
    pub table: TableView,
}

/// Cart count badge fragment template (for HTMX).
#[derive(Template, WebTemplate)]
#[template(path = "partials/cart_count.html")]
pub struct CartCountTemplate {
    pub count: u64,
}

// =============================================================================
// Request Flow
// =============================================================================

/// Run one cart operation for a session and render the result.
///
/// Without a command this is a plain render. The target is rendered even
/// when the operation did not commit, so declined, stale and unknown-row
/// requests still answer with the current cart.
async fn run(
    state: &AppState,
    session: Session,
    target: HtmlTarget,
    confirmed: Option<String>,
    command: Option<CartCommand>,
) -> (HtmxInteraction, HtmlTarget) {
    let storage = SessionStorage::open(session).await;
    let mut store = CartStore::new(storage, HtmxInteraction::new(confirmed), target)
        .with_style(state.currency().clone());

    if let Some(command) = command {
        let outcome = store.dispatch(command);
        tracing::debug!(?outcome, "cart command handled");
    }
    if !store.target().is_rendered() {
        store.render();
    }

    let (storage, interaction, target) = store.into_parts();
    storage.flush().await;
    (interaction, target)
}

/// Badge value for the session's cart.
pub async fn item_count(state: &AppState, session: Session) -> u64 {
    let (_, target) = run(state, session, HtmlTarget::badge_only(), None, None).await;
    target.item_count()
}

/// Run a command on the cart page and answer with the items fragment.
async fn items_fragment(
    state: &AppState,
    session: Session,
    confirmed: Option<String>,
    command: CartCommand,
) -> Response {
    let (interaction, target) = run(
        state,
        session,
        HtmlTarget::cart_page(),
        confirmed,
        Some(command),
    )
    .await;

    (
        AppendHeaders([(HX_TRIGGER, interaction.trigger_header())]),
        CartItemsTemplate {
            table: table_or_empty(target),
        },
    )
        .into_response()
}

fn table_or_empty(target: HtmlTarget) -> TableView {
    target.into_table().unwrap_or_else(|| {
        tracing::error!("cart page rendered without a table");
        TableView {
            rows: Vec::new(),
            grand_total: String::new(),
            checkout_prompt: None,
            checkout_vals: String::new(),
            quantity_prompt: prompts::QUANTITY_INVALID,
            empty_label: EMPTY_CART_LABEL,
        }
    })
}

// =============================================================================
// Handlers
// =============================================================================

/// Display cart page.
#[instrument(skip(state, session))]
pub async fn show(State(state): State<AppState>, session: Session) -> CartShowTemplate {
    let (_, target) = run(&state, session, HtmlTarget::cart_page(), None, None).await;

    CartShowTemplate {
        nav: PageNav::standalone("cart.html", "Cart"),
        item_count: target.item_count(),
        table: table_or_empty(target),
    }
}

/// Get cart count badge (HTMX fragment).
#[instrument(skip(state, session))]
pub async fn count(State(state): State<AppState>, session: Session) -> CartCountTemplate {
    CartCountTemplate {
        count: item_count(&state, session).await,
    }
}

/// Add item to cart (HTMX).
///
/// Returns the updated badge.
#[instrument(skip(state, session))]
pub async fn add(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<AddToCartForm>,
) -> Response {
    let command = CartCommand::Add {
        name: input::item_name(form.name.as_deref().unwrap_or_default()),
        price: input::price_from_label(form.price.as_deref().unwrap_or_default()),
        qty: input::add_quantity(form.qty.as_deref().unwrap_or("1")),
    };

    let (interaction, target) =
        run(&state, session, HtmlTarget::badge_only(), None, Some(command)).await;

    (
        AppendHeaders([(HX_TRIGGER, interaction.trigger_header())]),
        CartCountTemplate {
            count: target.item_count(),
        },
    )
        .into_response()
}

/// Fire a row control (HTMX).
///
/// Returns the rebuilt items fragment.
///
/// # Errors
///
/// Returns `AppError::NotFound` for an unknown control name.
#[instrument(skip(state, session))]
pub async fn control(
    State(state): State<AppState>,
    session: Session,
    Path((index, control)): Path<(usize, String)>,
    Form(form): Form<ControlForm>,
) -> Result<Response> {
    let kind = ControlKind::from_slug(&control)
        .ok_or_else(|| AppError::NotFound(format!("cart control {control}")))?;
    let command = kind.command(index, form.qty.as_deref());

    Ok(items_fragment(&state, session, form.confirmed, command).await)
}

/// Empty the cart (HTMX).
#[instrument(skip(state, session))]
pub async fn clear(State(state): State<AppState>, session: Session) -> Response {
    items_fragment(&state, session, None, CartCommand::Clear).await
}

/// Check out (HTMX).
///
/// The page asks for confirmation with the total it shows; the cart is only
/// cleared when that prompt arrives with the request and the total still
/// matches.
#[instrument(skip(state, session))]
pub async fn checkout(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<ConfirmForm>,
) -> Response {
    items_fragment(&state, session, form.confirmed, CartCommand::Checkout).await
}
