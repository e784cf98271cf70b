//! HTML render target.
//!
//! Collects what the cart engine pushes into a page and turns the row
//! bindings into HTMX control markup for the templates.

use std::collections::HashMap;

use bella_mode_core::cart::{
    Binding, ControlKind, EMPTY_CART_LABEL, RenderTarget, RowView, TableBody, prompts,
};

/// Markup attributes of one row control.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ControlMarkup {
    /// `hx-post` target.
    pub url: String,
    /// `hx-vals` payload.
    pub vals: String,
    /// `hx-confirm` prompt.
    pub confirm: Option<String>,
}

impl ControlMarkup {
    fn from_binding(binding: &Binding) -> Self {
        Self {
            url: control_url(binding.row, binding.control),
            vals: confirm_vals(binding.confirm.as_deref()),
            confirm: binding.confirm.clone(),
        }
    }
}

/// `hx-vals` payload echoing the prompt back once the user accepts it.
#[must_use]
pub fn confirm_vals(prompt: Option<&str>) -> String {
    match prompt {
        Some(prompt) => serde_json::json!({ "confirmed": prompt }).to_string(),
        None => "{}".to_string(),
    }
}

/// URL a row control posts to.
#[must_use]
pub fn control_url(row: usize, control: ControlKind) -> String {
    format!("/cart/items/{row}/{}", control.slug())
}

/// A table row with its controls.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedRow {
    pub row: RowView,
    pub decrement: ControlMarkup,
    pub quantity: ControlMarkup,
    pub increment: ControlMarkup,
    pub remove: ControlMarkup,
}

/// The cart table as the templates see it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableView {
    pub rows: Vec<RenderedRow>,
    pub grand_total: String,
    /// `None` when the cart is empty and checkout is refused.
    pub checkout_prompt: Option<String>,
    /// `hx-vals` payload of the checkout button.
    pub checkout_vals: String,
    /// Shown by the browser when a typed quantity floors to zero.
    pub quantity_prompt: &'static str,
    pub empty_label: &'static str,
}

impl TableView {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Records one render pass for a page.
#[derive(Debug, Default)]
pub struct HtmlTarget {
    table_mounted: bool,
    item_count: Option<u64>,
    rows: Vec<RowView>,
    grand_total: String,
    table: Option<TableView>,
}

impl HtmlTarget {
    /// A page that only shows the badge.
    #[must_use]
    pub fn badge_only() -> Self {
        Self::default()
    }

    /// The cart page, which has the table.
    #[must_use]
    pub fn cart_page() -> Self {
        Self {
            table_mounted: true,
            ..Self::default()
        }
    }

    /// Whether a render pass has reached this target.
    #[must_use]
    pub const fn is_rendered(&self) -> bool {
        self.item_count.is_some()
    }

    /// Badge value of the last render; zero before any.
    #[must_use]
    pub fn item_count(&self) -> u64 {
        self.item_count.unwrap_or_default()
    }

    /// The rendered table, if the page has one.
    #[must_use]
    pub fn into_table(self) -> Option<TableView> {
        self.table
    }
}

impl RenderTarget for HtmlTarget {
    fn show_item_count(&mut self, count: u64) {
        self.item_count = Some(count);
    }

    fn has_cart_table(&self) -> bool {
        self.table_mounted
    }

    fn replace_table(&mut self, body: &TableBody) {
        self.rows = match body {
            TableBody::Empty => Vec::new(),
            TableBody::Rows(rows) => rows.clone(),
        };
        self.table = None;
    }

    fn show_grand_total(&mut self, total: &str) {
        total.clone_into(&mut self.grand_total);
    }

    fn bind_controls(&mut self, bindings: Vec<Binding>) {
        let mut controls: HashMap<(usize, ControlKind), ControlMarkup> = bindings
            .iter()
            .map(|binding| {
                (
                    (binding.row, binding.control),
                    ControlMarkup::from_binding(binding),
                )
            })
            .collect();

        let rows = std::mem::take(&mut self.rows)
            .into_iter()
            .filter_map(|row| {
                let mut take = |kind| controls.remove(&(row.index, kind));
                let decrement = take(ControlKind::Decrement)?;
                let quantity = take(ControlKind::QuantityField)?;
                let increment = take(ControlKind::Increment)?;
                let remove = take(ControlKind::Remove)?;
                Some(RenderedRow {
                    row,
                    decrement,
                    quantity,
                    increment,
                    remove,
                })
            })
            .collect::<Vec<_>>();

        let checkout_prompt = (!rows.is_empty()).then(|| prompts::checkout(&self.grand_total));
        self.table = Some(TableView {
            rows,
            grand_total: self.grand_total.clone(),
            checkout_vals: confirm_vals(checkout_prompt.as_deref()),
            checkout_prompt,
            quantity_prompt: prompts::QUANTITY_INVALID,
            empty_label: EMPTY_CART_LABEL,
        });
    }
}
