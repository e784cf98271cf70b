//! Projection of the cart into the page's table and summary.
//!
//! Rendering is split in two. [`CartProjection::project`] is a pure function
//! from a document to row view-models; [`render`] pushes a fresh projection
//! into whatever mount points a [`RenderTarget`] exposes and hands it a new
//! set of control [`Binding`]s. The table is always rebuilt in full and the
//! previous bindings are discarded with the old rows.

use super::document::CartDocument;
use super::input;
use super::interaction::prompts;
use super::storage::{CartRepository, KeyValueStore};
use super::store::CartCommand;
use crate::CurrencyStyle;

/// Text of the single row shown for an empty cart.
pub const EMPTY_CART_LABEL: &str = "Your cart is empty";

/// One table row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowView {
    /// Position of the item in the document.
    pub index: usize,
    pub name: String,
    pub unit_price: String,
    pub qty: u32,
    pub line_total: String,
}

/// Contents of the table body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TableBody {
    /// A single "cart is empty" row.
    Empty,
    Rows(Vec<RowView>),
}

/// Everything the page shows about the cart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartProjection {
    /// Badge value: total quantity.
    pub item_count: u64,
    pub body: TableBody,
    /// Grand total, formatted.
    pub grand_total: String,
    /// Confirmation prompt for checkout; `None` for an empty cart.
    pub checkout_prompt: Option<String>,
}

impl CartProjection {
    /// Project a document using the given currency style.
    #[must_use]
    pub fn project(document: &CartDocument, style: &CurrencyStyle) -> Self {
        let grand_total = style.format(document.grand_total());
        let body = if document.is_empty() {
            TableBody::Empty
        } else {
            TableBody::Rows(
                document
                    .items()
                    .iter()
                    .enumerate()
                    .map(|(index, item)| RowView {
                        index,
                        name: item.name().to_string(),
                        unit_price: style.format(item.price()),
                        qty: item.qty(),
                        line_total: style.format(item.line_total()),
                    })
                    .collect(),
            )
        };
        let checkout_prompt = (!document.is_empty()).then(|| prompts::checkout(&grand_total));

        Self {
            item_count: document.item_count(),
            body,
            grand_total,
            checkout_prompt,
        }
    }

    /// Rows of the table; empty for an empty cart.
    #[must_use]
    pub fn rows(&self) -> &[RowView] {
        match &self.body {
            TableBody::Empty => &[],
            TableBody::Rows(rows) => rows,
        }
    }

    /// Control bindings for every row, in row order.
    #[must_use]
    pub fn bindings(&self) -> Vec<Binding> {
        self.rows()
            .iter()
            .flat_map(|row| {
                ControlKind::ALL.into_iter().map(move |control| Binding {
                    row: row.index,
                    control,
                    confirm: control.confirm_prompt(row),
                })
            })
            .collect()
    }
}

/// The per-row controls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ControlKind {
    Decrement,
    QuantityField,
    Increment,
    Remove,
}

impl ControlKind {
    /// All controls in display order.
    pub const ALL: [Self; 4] = [
        Self::Decrement,
        Self::QuantityField,
        Self::Increment,
        Self::Remove,
    ];

    /// URL-safe identifier.
    #[must_use]
    pub const fn slug(self) -> &'static str {
        match self {
            Self::Decrement => "decrement",
            Self::QuantityField => "quantity",
            Self::Increment => "increment",
            Self::Remove => "remove",
        }
    }

    /// Parse a [`slug`](Self::slug).
    #[must_use]
    pub fn from_slug(slug: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.slug() == slug)
    }

    /// The command this control issues for row `index`.
    ///
    /// `submitted` is the quantity field's value and is ignored by the other
    /// controls. It is coerced with [`input::field_quantity`].
    #[must_use]
    pub fn command(self, index: usize, submitted: Option<&str>) -> CartCommand {
        match self {
            Self::Decrement => CartCommand::ChangeQuantity { index, delta: -1 },
            Self::Increment => CartCommand::ChangeQuantity { index, delta: 1 },
            Self::QuantityField => CartCommand::SetQuantity {
                index,
                qty: input::field_quantity(submitted.unwrap_or_default()),
            },
            Self::Remove => CartCommand::Remove { index },
        }
    }

    fn confirm_prompt(self, row: &RowView) -> Option<String> {
        match self {
            Self::Decrement if row.qty <= 1 => Some(prompts::QUANTITY_TO_ZERO.to_string()),
            Self::Remove => Some(prompts::remove(&row.name)),
            _ => None,
        }
    }
}

/// An event handler attached to a freshly rendered row control.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Binding {
    pub row: usize,
    pub control: ControlKind,
    /// Prompt the control will trigger, when its action needs confirmation
    /// given the quantity at render time.
    pub confirm: Option<String>,
}

impl Binding {
    /// The command to dispatch when the control fires.
    #[must_use]
    pub fn command(&self, submitted: Option<&str>) -> CartCommand {
        self.control.command(self.row, submitted)
    }
}

/// Mount points of a page.
///
/// Every mount point is optional. The defaults describe a page that has
/// none of them, so a target only overrides what it actually shows.
pub trait RenderTarget {
    /// Update the item-count badge.
    fn show_item_count(&mut self, _count: u64) {}

    /// Whether the page has a cart table to rebuild.
    fn has_cart_table(&self) -> bool {
        false
    }

    /// Replace the whole table body.
    fn replace_table(&mut self, _body: &TableBody) {}

    /// Update the grand-total display.
    fn show_grand_total(&mut self, _total: &str) {}

    /// Attach handlers to the rows just produced.
    fn bind_controls(&mut self, _bindings: Vec<Binding>) {}
}

impl<T: RenderTarget + ?Sized> RenderTarget for &mut T {
    fn show_item_count(&mut self, count: u64) {
        (**self).show_item_count(count);
    }

    fn has_cart_table(&self) -> bool {
        (**self).has_cart_table()
    }

    fn replace_table(&mut self, body: &TableBody) {
        (**self).replace_table(body);
    }

    fn show_grand_total(&mut self, total: &str) {
        (**self).show_grand_total(total);
    }

    fn bind_controls(&mut self, bindings: Vec<Binding>) {
        (**self).bind_controls(bindings);
    }
}

/// A page with no cart mount points.
#[derive(Debug, Clone, Copy, Default)]
pub struct Headless;

impl RenderTarget for Headless {}

/// Reload the cart and project it into `target`.
///
/// The badge is always updated. The table, total and bindings are only
/// touched when the target has a cart table.
pub fn render<S, T>(
    repository: &CartRepository<S>,
    style: &CurrencyStyle,
    target: &mut T,
) -> CartProjection
where
    S: KeyValueStore,
    T: RenderTarget + ?Sized,
{
    let projection = CartProjection::project(&repository.load(), style);
    target.show_item_count(projection.item_count);

    if target.has_cart_table() {
        target.replace_table(&projection.body);
        target.show_grand_total(&projection.grand_total);
        target.bind_controls(projection.bindings());
    }

    projection
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::cart::storage::{CART_STORAGE_KEY, MemoryStore};
    use crate::cart::testing::RecordingTarget;

    fn repository(raw: &str) -> CartRepository<MemoryStore> {
        CartRepository::new(MemoryStore::new().with_item(CART_STORAGE_KEY, raw))
    }

    const TWO_ITEMS: &str = r#"{"items":[{"name":"Tas A","price":150000,"qty":2},{"name":"Scarf","price":85000,"qty":1}]}"#;

    #[test]
    fn test_project_rows() {
        let document = CartDocument::from_json(TWO_ITEMS).unwrap();
        let projection = CartProjection::project(&document, &CurrencyStyle::rupiah());

        assert_eq!(projection.item_count, 3);
        assert_eq!(projection.grand_total, "Rp 385.000");
        assert_eq!(
            projection.rows().first().unwrap(),
            &RowView {
                index: 0,
                name: "Tas A".to_string(),
                unit_price: "Rp 150.000".to_string(),
                qty: 2,
                line_total: "Rp 300.000".to_string(),
            }
        );
        assert_eq!(
            projection.checkout_prompt.as_deref(),
            Some("Total payment Rp 385.000. Proceed to checkout?")
        );
    }

    #[test]
    fn test_project_empty() {
        let projection = CartProjection::project(&CartDocument::new(), &CurrencyStyle::rupiah());
        assert_eq!(projection.body, TableBody::Empty);
        assert_eq!(projection.grand_total, "Rp 0");
        assert!(projection.checkout_prompt.is_none());
        assert!(projection.bindings().is_empty());
    }

    #[test]
    fn test_bindings_confirm_destructive_controls() {
        let document = CartDocument::from_json(TWO_ITEMS).unwrap();
        let bindings = CartProjection::project(&document, &CurrencyStyle::rupiah()).bindings();
        assert_eq!(bindings.len(), 8);

        let confirm_of = |row: usize, control: ControlKind| {
            bindings
                .iter()
                .find(|b| b.row == row && b.control == control)
                .unwrap()
                .confirm
                .clone()
        };

        // qty 2: stepping down is not destructive
        assert_eq!(confirm_of(0, ControlKind::Decrement), None);
        // qty 1: stepping down removes
        assert_eq!(
            confirm_of(1, ControlKind::Decrement).as_deref(),
            Some(prompts::QUANTITY_TO_ZERO)
        );
        assert_eq!(
            confirm_of(1, ControlKind::Remove).as_deref(),
            Some("Remove \"Scarf\" from the cart?")
        );
        assert_eq!(confirm_of(0, ControlKind::Increment), None);
    }

    #[test]
    fn test_binding_commands() {
        let binding = Binding {
            row: 2,
            control: ControlKind::QuantityField,
            confirm: None,
        };
        assert_eq!(
            binding.command(Some("4.6")),
            CartCommand::SetQuantity { index: 2, qty: 4 }
        );
        assert_eq!(
            binding.command(Some("nope")),
            CartCommand::SetQuantity { index: 2, qty: 1 }
        );
        assert_eq!(
            ControlKind::Decrement.command(0, None),
            CartCommand::ChangeQuantity { index: 0, delta: -1 }
        );
        assert_eq!(
            ControlKind::Remove.command(3, Some("ignored")),
            CartCommand::Remove { index: 3 }
        );
    }

    #[test]
    fn test_control_slugs() {
        for kind in ControlKind::ALL {
            assert_eq!(ControlKind::from_slug(kind.slug()), Some(kind));
        }
        assert_eq!(ControlKind::from_slug("explode"), None);
    }

    #[test]
    fn test_render_without_table_only_updates_badge() {
        let repository = repository(TWO_ITEMS);
        let mut target = RecordingTarget::badge_only();

        render(&repository, &CurrencyStyle::rupiah(), &mut target);

        assert_eq!(target.item_count, Some(3));
        assert!(target.body.is_none());
        assert!(target.grand_total.is_none());
        assert!(target.bindings.is_empty());
    }

    #[test]
    fn test_render_with_table() {
        let repository = repository(TWO_ITEMS);
        let mut target = RecordingTarget::cart_page();

        render(&repository, &CurrencyStyle::rupiah(), &mut target);

        assert_eq!(target.item_count, Some(3));
        assert!(matches!(&target.body, Some(TableBody::Rows(rows)) if rows.len() == 2));
        assert_eq!(target.grand_total.as_deref(), Some("Rp 385.000"));
        assert_eq!(target.bindings.len(), 8);
    }

    #[test]
    fn test_render_is_idempotent() {
        let repository = repository(TWO_ITEMS);
        let style = CurrencyStyle::rupiah();
        let mut first = RecordingTarget::cart_page();
        let mut second = RecordingTarget::cart_page();

        let a = render(&repository, &style, &mut first);
        let b = render(&repository, &style, &mut second);

        assert_eq!(a, b);
        assert_eq!(first, second);
    }

    #[test]
    fn test_render_corrupted_storage_shows_empty_cart() {
        let repository = repository("{not json");
        let mut target = RecordingTarget::cart_page();

        let projection = render(&repository, &CurrencyStyle::rupiah(), &mut target);

        assert_eq!(projection.body, TableBody::Empty);
        assert_eq!(target.item_count, Some(0));
        assert_eq!(target.grand_total.as_deref(), Some("Rp 0"));
    }
}
