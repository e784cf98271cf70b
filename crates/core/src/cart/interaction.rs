//! Confirmation and notification capabilities injected into the cart store.

use std::time::Duration;

use serde::Serialize;

/// How long a notice stays visible unless the caller says otherwise.
pub const DEFAULT_NOTICE_DURATION: Duration = Duration::from_millis(2200);

/// What a notice reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NoticeKind {
    ItemAdded,
    ItemRemoved,
    CheckoutSucceeded,
    CartEmpty,
}

/// A fire-and-forget message for the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub message: String,
    pub duration: Duration,
}

impl Notice {
    fn new(kind: NoticeKind, message: String) -> Self {
        Self {
            kind,
            message,
            duration: DEFAULT_NOTICE_DURATION,
        }
    }

    #[must_use]
    pub fn item_added(name: &str) -> Self {
        Self::new(NoticeKind::ItemAdded, format!("\"{name}\" added to the cart."))
    }

    #[must_use]
    pub fn item_removed(name: &str) -> Self {
        Self::new(
            NoticeKind::ItemRemoved,
            format!("\"{name}\" removed from the cart."),
        )
    }

    #[must_use]
    pub fn checkout_succeeded() -> Self {
        Self::new(
            NoticeKind::CheckoutSucceeded,
            "Thank you! Your order has been placed (simulated).".to_string(),
        )
    }

    #[must_use]
    pub fn cart_empty() -> Self {
        Self::new(NoticeKind::CartEmpty, "Your cart is empty.".to_string())
    }

    /// Whether this notice reports a failed request.
    #[must_use]
    pub const fn is_error(&self) -> bool {
        matches!(self.kind, NoticeKind::CartEmpty)
    }
}

/// Prompts shown before destructive operations.
pub mod prompts {
    /// A quantity step would take the item to zero.
    pub const QUANTITY_TO_ZERO: &str =
        "Quantity would drop to 0. Remove this item from the cart?";

    /// An absolute quantity of zero or less was submitted.
    pub const QUANTITY_INVALID: &str = "Enter a valid quantity (> 0). Remove this item?";

    /// Removing a named item.
    #[must_use]
    pub fn remove(name: &str) -> String {
        format!("Remove \"{name}\" from the cart?")
    }

    /// Checking out for a formatted total.
    #[must_use]
    pub fn checkout(total: &str) -> String {
        format!("Total payment {total}. Proceed to checkout?")
    }
}

/// The user-facing side of the cart: modal confirmation and notices.
pub trait Interaction {
    /// Ask the user to confirm. Blocks until answered.
    fn confirm(&mut self, prompt: &str) -> bool;

    /// Show a notice. The result is never consumed.
    fn notify(&mut self, notice: Notice);
}

impl<T: Interaction + ?Sized> Interaction for &mut T {
    fn confirm(&mut self, prompt: &str) -> bool {
        (**self).confirm(prompt)
    }

    fn notify(&mut self, notice: Notice) {
        (**self).notify(notice);
    }
}
