//! Fakes for the cart's capability ports.

use std::collections::VecDeque;

use super::interaction::{Interaction, Notice};
use super::render::{Binding, RenderTarget, TableBody};

/// Answers confirmations from a script and records everything it was shown.
#[derive(Debug, Default)]
pub struct ScriptedInteraction {
    answers: VecDeque<bool>,
    pub prompts: Vec<String>,
    pub notices: Vec<Notice>,
}

impl ScriptedInteraction {
    /// Answer confirmations in order; declines once the script runs out.
    pub fn answering(answers: &[bool]) -> Self {
        Self {
            answers: answers.iter().copied().collect(),
            ..Self::default()
        }
    }
}

impl Interaction for ScriptedInteraction {
    fn confirm(&mut self, prompt: &str) -> bool {
        self.prompts.push(prompt.to_string());
        self.answers.pop_front().unwrap_or(false)
    }

    fn notify(&mut self, notice: Notice) {
        self.notices.push(notice);
    }
}

/// Records what a render pushed into each mount point.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct RecordingTarget {
    table: bool,
    pub renders: usize,
    pub item_count: Option<u64>,
    pub body: Option<TableBody>,
    pub grand_total: Option<String>,
    pub bindings: Vec<Binding>,
}

impl RecordingTarget {
    /// A page with only the badge.
    pub fn badge_only() -> Self {
        Self::default()
    }

    /// The cart page: badge, table and total.
    pub fn cart_page() -> Self {
        Self {
            table: true,
            ..Self::default()
        }
    }
}

impl RenderTarget for RecordingTarget {
    fn show_item_count(&mut self, count: u64) {
        self.renders += 1;
        self.item_count = Some(count);
    }

    fn has_cart_table(&self) -> bool {
        self.table
    }

    fn replace_table(&mut self, body: &TableBody) {
        self.body = Some(body.clone());
    }

    fn show_grand_total(&mut self, total: &str) {
        self.grand_total = Some(total.to_string());
    }

    fn bind_controls(&mut self, bindings: Vec<Binding>) {
        self.bindings = bindings;
    }
}
