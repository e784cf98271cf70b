//! The persisted cart aggregate.
//!
//! A [`CartDocument`] is an ordered list of [`LineItem`]s keyed by name. The
//! methods here are the only way to change it, and they keep two invariants:
//! every item has `qty >= 1`, and no two items share a name.
//!
//! Stored documents look like:
//!
//! ```json
//! {"items":[{"name":"Tas A","price":150000,"qty":2}]}
//! ```

use std::num::NonZeroU32;

use serde::Serialize;
use serde_json::Value;

use super::input;
use crate::Price;

/// Errors decoding a stored cart document.
#[derive(thiserror::Error, Debug)]
pub enum DecodeError {
    /// The payload is not valid JSON.
    #[error("invalid cart JSON: {0}")]
    Json(#[from] serde_json::Error),
    /// The payload has no `items` array.
    #[error("cart document has no items sequence")]
    ItemsNotSequence,
}

/// One named product entry in the cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LineItem {
    name: String,
    price: Price,
    qty: u32,
}

impl LineItem {
    /// Display name, unique within its document.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Unit price, fixed when the item was first added.
    #[must_use]
    pub const fn price(&self) -> Price {
        self.price
    }

    /// Quantity, always at least one.
    #[must_use]
    pub const fn qty(&self) -> u32 {
        self.qty
    }

    /// `price * qty`.
    #[must_use]
    pub fn line_total(&self) -> Price {
        self.price.times(self.qty)
    }
}

/// The full cart state, in display order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CartDocument {
    items: Vec<LineItem>,
}

impl CartDocument {
    /// An empty cart.
    #[must_use]
    pub const fn new() -> Self {
        Self { items: Vec::new() }
    }

    /// Items in insertion order.
    #[must_use]
    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// The item at `index`, if any.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&LineItem> {
        self.items.get(index)
    }

    /// Position of the item with this exact name.
    #[must_use]
    pub fn position(&self, name: &str) -> Option<usize> {
        self.items.iter().position(|item| item.name == name)
    }

    /// Sum of all quantities (the badge count).
    #[must_use]
    pub fn item_count(&self) -> u64 {
        self.items.iter().map(|item| u64::from(item.qty)).sum()
    }

    /// Sum of all line totals.
    #[must_use]
    pub fn grand_total(&self) -> Price {
        self.items.iter().map(LineItem::line_total).sum()
    }

    /// Add `qty` units of `name`, merging into an existing item of that name.
    ///
    /// On merge the existing price is kept. A blank name is replaced by
    /// [`input::FALLBACK_ITEM_NAME`] and a zero quantity counts as one.
    /// Returns the index of the affected item.
    pub fn merge(&mut self, name: &str, price: Price, qty: u32) -> usize {
        let name = input::item_name(name);
        let qty = qty.max(1);
        if let Some(index) = self.position(&name) {
            if let Some(item) = self.items.get_mut(index) {
                item.qty = item.qty.saturating_add(qty);
            }
            index
        } else {
            self.items.push(LineItem { name, price, qty });
            self.items.len() - 1
        }
    }

    /// Set the quantity of the item at `index`. Returns `false` when out of bounds.
    pub fn set_qty(&mut self, index: usize, qty: NonZeroU32) -> bool {
        self.items.get_mut(index).is_some_and(|item| {
            item.qty = qty.get();
            true
        })
    }

    /// Remove and return the item at `index`, preserving the order of the rest.
    pub fn remove(&mut self, index: usize) -> Option<LineItem> {
        (index < self.items.len()).then(|| self.items.remove(index))
    }

    /// Drop every item.
    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Decode a stored document.
    ///
    /// Item fields are read leniently: `price` and `qty` may be numbers or
    /// numeric strings and unknown fields are ignored. Items without a name
    /// or with a non-positive quantity are skipped, and repeated names are
    /// merged with the first price winning.
    ///
    /// # Errors
    ///
    /// Returns an error if the payload is not JSON or has no `items` array.
    pub fn from_json(raw: &str) -> Result<Self, DecodeError> {
        let value: Value = serde_json::from_str(raw)?;
        let items = value
            .get("items")
            .and_then(Value::as_array)
            .ok_or(DecodeError::ItemsNotSequence)?;

        let mut document = Self::new();
        for (index, raw_item) in items.iter().enumerate() {
            match decode_item(raw_item) {
                Some((name, price, qty)) => {
                    document.merge(&name, price, qty);
                }
                None => tracing::warn!(index, "skipping unusable stored cart item"),
            }
        }
        Ok(document)
    }

    /// Encode for storage.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

fn decode_item(value: &Value) -> Option<(String, Price, u32)> {
    let fields = value.as_object()?;
    let name = match fields.get("name")? {
        Value::String(s) if !s.trim().is_empty() => s.clone(),
        Value::Number(n) => n.to_string(),
        _ => return None,
    };
    let price = fields
        .get("price")
        .map_or(Price::ZERO, input::price_from_json);
    let qty = input::quantity_from_json(fields.get("qty")?)?;
    Some((name, price, qty))
}
