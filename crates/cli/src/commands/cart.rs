//! Cart commands.
//!
//! # Usage
//!
//! ```bash
//! bella cart add "Tas A" "Rp 150.000" --qty 2
//! bella cart show
//! bella cart dec 1
//! bella checkout
//! ```
//!
//! Rows are numbered from 1 as printed by `cart show`.

use std::io::{BufRead, Write};
use std::path::Path;

use bella_mode_core::CurrencyStyle;
use bella_mode_core::cart::{CartCommand, CartStore, Outcome, input};
use clap::Subcommand;

use super::CommandError;
use crate::storage::FileStore;
use crate::terminal::{TerminalInteraction, TerminalTable};

#[derive(Debug, Subcommand)]
pub enum CartAction {
    /// Print the cart
    Show,
    /// Add a product
    Add {
        /// Product name
        name: String,
        /// Price or price label, e.g. "Rp 150.000"
        price: String,
        /// Quantity to add
        #[arg(long, default_value = "1")]
        qty: String,
    },
    /// Increase a row's quantity by one
    Inc { row: usize },
    /// Decrease a row's quantity by one
    Dec { row: usize },
    /// Set a row's quantity
    Set {
        row: usize,
        #[arg(allow_hyphen_values = true)]
        qty: String,
    },
    /// Remove a row
    Remove { row: usize },
    /// Empty the cart
    Clear,
}

impl CartAction {
    /// The cart command to run and whether to print the full table after.
    fn command(self) -> Result<(Option<CartCommand>, bool), CommandError> {
        let command = match self {
            Self::Show => return Ok((None, true)),
            Self::Add { name, price, qty } => {
                return Ok((
                    Some(CartCommand::Add {
                        name: input::item_name(&name),
                        price: input::price_from_label(&price),
                        qty: input::add_quantity(&qty),
                    }),
                    false,
                ));
            }
            Self::Inc { row } => CartCommand::ChangeQuantity {
                index: row_index(row)?,
                delta: 1,
            },
            Self::Dec { row } => CartCommand::ChangeQuantity {
                index: row_index(row)?,
                delta: -1,
            },
            Self::Set { row, qty } => CartCommand::SetQuantity {
                index: row_index(row)?,
                qty: input::field_quantity(&qty),
            },
            Self::Remove { row } => CartCommand::Remove {
                index: row_index(row)?,
            },
            Self::Clear => CartCommand::Clear,
        };
        Ok((Some(command), true))
    }
}

/// Run a cart action against the cart in `data_dir`.
///
/// # Errors
///
/// Returns an error for row 0 or when the terminal cannot be written.
pub fn run<R: BufRead, W: Write>(
    action: CartAction,
    data_dir: &Path,
    terminal: TerminalInteraction<R, W>,
) -> Result<Option<Outcome>, CommandError> {
    let (command, full) = action.command()?;
    execute(command, full, data_dir, terminal)
}

/// Check out the cart in `data_dir`.
///
/// # Errors
///
/// Returns an error when the terminal cannot be written.
pub fn checkout<R: BufRead, W: Write>(
    data_dir: &Path,
    terminal: TerminalInteraction<R, W>,
) -> Result<Option<Outcome>, CommandError> {
    execute(Some(CartCommand::Checkout), true, data_dir, terminal)
}

fn row_index(row: usize) -> Result<usize, CommandError> {
    row.checked_sub(1).ok_or(CommandError::InvalidRow)
}

fn execute<R: BufRead, W: Write>(
    command: Option<CartCommand>,
    full: bool,
    data_dir: &Path,
    terminal: TerminalInteraction<R, W>,
) -> Result<Option<Outcome>, CommandError> {
    let table = if full {
        TerminalTable::full()
    } else {
        TerminalTable::summary()
    };
    let mut store = CartStore::new(FileStore::new(data_dir), terminal, table)
        .with_style(CurrencyStyle::rupiah());

    let outcome = command.map(|command| store.dispatch(command));
    if !store.target().is_rendered() {
        store.render();
    }

    let (_, mut terminal, table) = store.into_parts();
    let out = terminal.output();
    match outcome {
        Some(Outcome::Declined) => writeln!(out, "Cancelled.")?,
        Some(Outcome::NotFound) => writeln!(out, "No such row.")?,
        _ => {}
    }
    for line in table.lines() {
        writeln!(out, "{line}")?;
    }
    out.flush()?;
    Ok(outcome)
}
