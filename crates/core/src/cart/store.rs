//! Cart operations.
//!
//! Every mutating operation is its own read-modify-write transaction: the
//! document is reloaded from storage first, changed, saved, and re-rendered.
//! Nothing is cached between calls because another page may have written
//! the same key in the meantime; the last save wins.

use std::num::NonZeroU32;

use super::document::CartDocument;
use super::interaction::{Interaction, Notice, prompts};
use super::render::{self, CartProjection, RenderTarget};
use super::storage::{CartRepository, KeyValueStore};
use crate::{CurrencyStyle, Price};

/// A user-driven cart operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CartCommand {
    Add { name: String, price: Price, qty: u32 },
    ChangeQuantity { index: usize, delta: i64 },
    SetQuantity { index: usize, qty: i64 },
    Remove { index: usize },
    Clear,
    Checkout,
}

/// How an operation ended. None of these are errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The cart changed (or, for checkout, the order went through).
    Applied,
    /// The user declined a confirmation; nothing changed.
    Declined,
    /// No item at the given index; nothing changed.
    NotFound,
    /// The request was refused and the user was told why.
    Rejected,
}

impl Outcome {
    #[must_use]
    pub const fn is_applied(self) -> bool {
        matches!(self, Self::Applied)
    }
}

/// The cart engine, wired to a storage medium, a user and a page.
#[derive(Debug)]
pub struct CartStore<S, I, T> {
    repository: CartRepository<S>,
    interaction: I,
    target: T,
    style: CurrencyStyle,
}

impl<S, I, T> CartStore<S, I, T>
where
    S: KeyValueStore,
    I: Interaction,
    T: RenderTarget,
{
    pub fn new(store: S, interaction: I, target: T) -> Self {
        Self::with_repository(CartRepository::new(store), interaction, target)
    }

    pub fn with_repository(repository: CartRepository<S>, interaction: I, target: T) -> Self {
        Self {
            repository,
            interaction,
            target,
            style: CurrencyStyle::default(),
        }
    }

    /// Use a different currency style for rendering and prompts.
    #[must_use]
    pub fn with_style(mut self, style: CurrencyStyle) -> Self {
        self.style = style;
        self
    }

    pub const fn repository(&self) -> &CartRepository<S> {
        &self.repository
    }

    pub const fn interaction(&self) -> &I {
        &self.interaction
    }

    pub const fn target(&self) -> &T {
        &self.target
    }

    pub const fn style(&self) -> &CurrencyStyle {
        &self.style
    }

    /// Take the store apart, e.g. to flush the storage medium.
    pub fn into_parts(self) -> (S, I, T) {
        (self.repository.into_store(), self.interaction, self.target)
    }

    /// The current persisted document.
    pub fn load(&self) -> CartDocument {
        self.repository.load()
    }

    /// Persist a whole document as-is.
    pub fn save(&mut self, document: &CartDocument) {
        self.repository.save(document);
    }

    /// Re-project storage into the target.
    pub fn render(&mut self) -> CartProjection {
        render::render(&self.repository, &self.style, &mut self.target)
    }

    /// Run a command.
    pub fn dispatch(&mut self, command: CartCommand) -> Outcome {
        match command {
            CartCommand::Add { name, price, qty } => self.add(&name, price, qty),
            CartCommand::ChangeQuantity { index, delta } => self.change_quantity(index, delta),
            CartCommand::SetQuantity { index, qty } => self.set_quantity(index, qty),
            CartCommand::Remove { index } => self.remove(index),
            CartCommand::Clear => self.clear(),
            CartCommand::Checkout => self.checkout(),
        }
    }

    /// Add `qty` units of an item, merging with an existing item of the same
    /// name. An existing item keeps its original price.
    pub fn add(&mut self, name: &str, price: Price, qty: u32) -> Outcome {
        let mut document = self.load();
        let index = document.merge(name, price, qty);
        let name = document
            .get(index)
            .map_or_else(|| name.to_string(), |item| item.name().to_string());
        tracing::debug!(%name, %price, qty, "adding item to cart");

        self.commit(&document);
        self.interaction.notify(Notice::item_added(&name));
        Outcome::Applied
    }

    /// Step the quantity of the item at `index` by `delta`.
    ///
    /// Reaching zero or below asks to remove the item instead.
    pub fn change_quantity(&mut self, index: usize, delta: i64) -> Outcome {
        let document = self.load();
        let Some(item) = document.get(index) else {
            return Outcome::NotFound;
        };
        let qty = i64::from(item.qty()).saturating_add(delta);
        self.apply_quantity(document, index, qty, prompts::QUANTITY_TO_ZERO)
    }

    /// Set the quantity of the item at `index`.
    ///
    /// Zero or below asks to remove the item instead.
    pub fn set_quantity(&mut self, index: usize, qty: i64) -> Outcome {
        let document = self.load();
        if document.get(index).is_none() {
            return Outcome::NotFound;
        }
        self.apply_quantity(document, index, qty, prompts::QUANTITY_INVALID)
    }

    /// Remove the item at `index` after confirmation.
    pub fn remove(&mut self, index: usize) -> Outcome {
        let mut document = self.load();
        let Some(item) = document.get(index) else {
            return Outcome::NotFound;
        };
        if !self.interaction.confirm(&prompts::remove(item.name())) {
            return Outcome::Declined;
        }
        let Some(removed) = document.remove(index) else {
            return Outcome::NotFound;
        };

        self.commit(&document);
        self.interaction.notify(Notice::item_removed(removed.name()));
        Outcome::Applied
    }

    /// Empty the cart unconditionally.
    pub fn clear(&mut self) -> Outcome {
        self.commit(&CartDocument::new());
        Outcome::Applied
    }

    /// Place a simulated order for the whole cart and empty it.
    pub fn checkout(&mut self) -> Outcome {
        let document = self.load();
        if document.is_empty() {
            self.interaction.notify(Notice::cart_empty());
            return Outcome::Rejected;
        }

        let total = self.style.format(document.grand_total());
        if !self.interaction.confirm(&prompts::checkout(&total)) {
            return Outcome::Declined;
        }

        tracing::info!(%total, items = document.len(), "checkout confirmed");
        self.clear();
        self.interaction.notify(Notice::checkout_succeeded());
        Outcome::Applied
    }

    fn apply_quantity(
        &mut self,
        mut document: CartDocument,
        index: usize,
        qty: i64,
        prompt: &str,
    ) -> Outcome {
        let new_qty = u32::try_from(qty)
            .ok()
            .and_then(NonZeroU32::new)
            .or_else(|| (qty > i64::from(u32::MAX)).then_some(NonZeroU32::MAX));

        match new_qty {
            Some(qty) => {
                document.set_qty(index, qty);
            }
            None => {
                if !self.interaction.confirm(prompt) {
                    return Outcome::Declined;
                }
                document.remove(index);
            }
        }

        self.commit(&document);
        Outcome::Applied
    }

    fn commit(&mut self, document: &CartDocument) {
        self.repository.save(document);
        self.render();
    }
}
