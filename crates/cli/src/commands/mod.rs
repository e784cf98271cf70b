//! CLI command implementations.

pub mod cart;
pub mod nav;

use thiserror::Error;

/// Errors that end a command.
#[derive(Debug, Error)]
pub enum CommandError {
    /// Terminal output failed.
    #[error("terminal I/O failed: {0}")]
    Io(#[from] std::io::Error),

    /// Rows are numbered from 1.
    #[error("row numbers start at 1")]
    InvalidRow,
}
