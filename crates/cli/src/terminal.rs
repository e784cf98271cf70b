//! Terminal side of the cart: prompts, notices and the cart table.

use std::io::{self, BufRead, Write};

use bella_mode_core::cart::{Interaction, Notice, RenderTarget, TableBody};

/// Asks on the terminal and prints notices.
///
/// With `assume_yes` every prompt is answered yes without reading input.
#[derive(Debug)]
pub struct TerminalInteraction<R, W> {
    input: R,
    output: W,
    assume_yes: bool,
}

impl<R: BufRead, W: Write> TerminalInteraction<R, W> {
    pub const fn new(input: R, output: W, assume_yes: bool) -> Self {
        Self {
            input,
            output,
            assume_yes,
        }
    }

    pub fn output(&mut self) -> &mut W {
        &mut self.output
    }

    pub fn into_output(self) -> W {
        self.output
    }

    fn ask(&mut self, prompt: &str) -> io::Result<bool> {
        write!(self.output, "{prompt} [y/N] ")?;
        if self.assume_yes {
            writeln!(self.output, "y")?;
            return Ok(true);
        }
        self.output.flush()?;

        let mut answer = String::new();
        if self.input.read_line(&mut answer)? == 0 {
            // EOF
            writeln!(self.output)?;
            return Ok(false);
        }
        Ok(matches!(
            answer.trim().to_ascii_lowercase().as_str(),
            "y" | "yes"
        ))
    }
}

impl<R: BufRead, W: Write> Interaction for TerminalInteraction<R, W> {
    fn confirm(&mut self, prompt: &str) -> bool {
        self.ask(prompt).unwrap_or_else(|e| {
            tracing::warn!(error = %e, "could not read confirmation");
            false
        })
    }

    fn notify(&mut self, notice: Notice) {
        let marker = if notice.is_error() { "!" } else { "*" };
        if let Err(e) = writeln!(self.output, "{marker} {}", notice.message) {
            tracing::warn!(error = %e, "could not print notice");
        }
    }
}

/// Collects the cart as printable lines.
///
/// Without a table only the item count is shown.
#[derive(Debug, Default)]
pub struct TerminalTable {
    table: bool,
    lines: Vec<String>,
}

impl TerminalTable {
    /// A summary line only.
    #[must_use]
    pub fn summary() -> Self {
        Self::default()
    }

    /// The full table.
    #[must_use]
    pub fn full() -> Self {
        Self {
            table: true,
            lines: Vec::new(),
        }
    }

    /// Whether anything has been rendered.
    #[must_use]
    pub fn is_rendered(&self) -> bool {
        !self.lines.is_empty()
    }

    #[must_use]
    pub fn lines(&self) -> &[String] {
        &self.lines
    }
}

impl RenderTarget for TerminalTable {
    fn show_item_count(&mut self, count: u64) {
        // every render starts here
        self.lines.clear();
        let noun = if count == 1 { "item" } else { "items" };
        self.lines.push(format!("Cart: {count} {noun}"));
    }

    fn has_cart_table(&self) -> bool {
        self.table
    }

    fn replace_table(&mut self, body: &TableBody) {
        match body {
            TableBody::Empty => self.lines.push(format!(
                "  {}",
                bella_mode_core::cart::EMPTY_CART_LABEL
            )),
            TableBody::Rows(rows) => {
                let width = rows.iter().map(|row| row.name.len()).max().unwrap_or(0);
                self.lines.extend(rows.iter().map(|row| {
                    format!(
                        "  #{:<3}{:<width$}  {} x {}  = {}",
                        row.index + 1,
                        row.name,
                        row.unit_price,
                        row.qty,
                        row.line_total,
                    )
                }));
            }
        }
    }

    fn show_grand_total(&mut self, total: &str) {
        self.lines.push(format!("  Total: {total}"));
    }
}
