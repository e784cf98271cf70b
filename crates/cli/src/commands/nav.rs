//! Page navigation commands.
//!
//! Drives the gesture navigator from the terminal. The transition overlay is
//! a line of output and deferred tasks run in order of their delay, sleeping
//! in between unless pacing is turned off.
//!
//! # Usage
//!
//! ```bash
//! bella nav --from about.html next
//! bella nav --from index.html swipe -- -120
//! bella nav --from contact.html key right
//! ```

use std::io::Write;
use std::time::{Duration, Instant};

use bella_mode_core::Page;
use bella_mode_core::gesture::{
    Deferred, Direction, GestureNavigator, GestureOutcome, Key, NavigationError, NavigationHost,
    PressOrigin,
};
use clap::{Subcommand, ValueEnum};

use super::CommandError;

#[derive(Debug, Subcommand)]
pub enum NavAction {
    /// Go to the next page
    Next,
    /// Go to the previous page
    Prev,
    /// Swipe horizontally by this many pixels (negative is leftward)
    Swipe {
        #[arg(allow_hyphen_values = true)]
        dx: f64,
    },
    /// Press an arrow key
    Key { key: ArrowKey },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ArrowKey {
    Left,
    Right,
}

impl From<ArrowKey> for Key {
    fn from(key: ArrowKey) -> Self {
        match key {
            ArrowKey::Left => Self::ArrowLeft,
            ArrowKey::Right => Self::ArrowRight,
        }
    }
}

/// Navigation host printing to a terminal.
#[derive(Debug)]
pub struct TerminalHost<W> {
    output: W,
    pace: bool,
    pending: Vec<(Duration, Deferred)>,
    location: Option<Page>,
}

impl<W: Write> TerminalHost<W> {
    /// With `pace`, deferred tasks wait for their delay in real time.
    pub const fn new(output: W, pace: bool) -> Self {
        Self {
            output,
            pace,
            pending: Vec::new(),
            location: None,
        }
    }

    /// The page navigated to, if any.
    pub const fn location(&self) -> Option<Page> {
        self.location
    }

    pub fn into_output(self) -> W {
        self.output
    }

    /// Take the task with the shortest delay; ties run in scheduling order.
    fn next_due(&mut self) -> Option<(Duration, Deferred)> {
        let (position, _) = self
            .pending
            .iter()
            .enumerate()
            .min_by_key(|(_, (delay, _))| *delay)?;
        Some(self.pending.remove(position))
    }
}

impl<W: Write> NavigationHost for TerminalHost<W> {
    fn now(&self) -> Instant {
        Instant::now()
    }

    fn append_overlay(&mut self) -> Result<(), NavigationError> {
        write!(self.output, "~")
            .and_then(|()| self.output.flush())
            .map_err(|e| NavigationError::Overlay(e.to_string()))
    }

    fn activate_overlay(&mut self) {
        if let Err(e) = write!(self.output, "~~~").and_then(|()| self.output.flush()) {
            tracing::warn!(error = %e, "could not draw transition");
        }
    }

    fn request_frame(&mut self, task: Deferred) {
        self.pending.push((Duration::ZERO, task));
    }

    fn set_timeout(&mut self, delay: Duration, task: Deferred) {
        self.pending.push((delay, task));
    }

    fn assign_location(&mut self, page: Page) -> Result<(), NavigationError> {
        writeln!(self.output, " {} ({})", page.title(), page.file_name()).map_err(|e| {
            NavigationError::Location {
                page,
                reason: e.to_string(),
            }
        })?;
        self.location = Some(page);
        Ok(())
    }
}

/// Run a navigation action from page `from`.
///
/// Returns the final outcome: the page reached, or why nothing happened.
///
/// # Errors
///
/// Returns an error when the terminal cannot be written.
pub fn run<W: Write>(
    from: Page,
    action: NavAction,
    host: TerminalHost<W>,
) -> Result<(GestureOutcome, TerminalHost<W>), CommandError> {
    let mut navigator = GestureNavigator::new(from, host);

    let outcome = match action {
        NavAction::Next => navigator.navigate(Direction::Next),
        NavAction::Prev => navigator.navigate(Direction::Previous),
        NavAction::Swipe { dx } => {
            navigator.press(0.0, PressOrigin::Surface);
            navigator.drag(dx);
            navigator.release(dx)
        }
        NavAction::Key { key } => navigator.key(key.into()),
    };

    let outcome = match outcome {
        GestureOutcome::Navigating(_) => drain(&mut navigator, outcome),
        other => other,
    };

    let current = navigator.current();
    let mut host = navigator.into_host();
    match outcome {
        GestureOutcome::Discarded => writeln!(
            host.output,
            "Swipe too short; staying on {} ({})",
            current.title(),
            current.file_name()
        )?,
        GestureOutcome::Failed => writeln!(host.output, "Navigation failed.")?,
        _ => {}
    }
    Ok((outcome, host))
}

fn drain<W: Write>(
    navigator: &mut GestureNavigator<TerminalHost<W>>,
    started: GestureOutcome,
) -> GestureOutcome {
    let clock = Instant::now();
    let mut last = started;

    while let Some((delay, task)) = navigator.host_mut().next_due() {
        if navigator.host().pace {
            std::thread::sleep(delay.saturating_sub(clock.elapsed()));
        }
        match navigator.run_deferred(task) {
            GestureOutcome::Ignored => {}
            outcome => last = outcome,
        }
    }
    last
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn nav(from: Page, action: NavAction) -> (GestureOutcome, String) {
        let (outcome, host) = run(from, action, TerminalHost::new(Vec::new(), false)).unwrap();
        (outcome, String::from_utf8(host.into_output()).unwrap())
    }

    #[test]
    fn test_next_from_about() {
        let (outcome, out) = nav(Page::About, NavAction::Next);
        assert_eq!(outcome, GestureOutcome::Navigated(Page::Contact));
        assert_eq!(out, "~~~~ Contact (contact.html)\n");
    }

    #[test]
    fn test_prev_wraps_around() {
        let (outcome, _) = nav(Page::Home, NavAction::Prev);
        assert_eq!(outcome, GestureOutcome::Navigated(Page::Contact));
    }

    #[test]
    fn test_left_swipe_goes_forward() {
        let (outcome, _) = nav(Page::Home, NavAction::Swipe { dx: -120.0 });
        assert_eq!(outcome, GestureOutcome::Navigated(Page::Collection));
    }

    #[test]
    fn test_right_swipe_goes_back() {
        let (outcome, _) = nav(Page::Collection, NavAction::Swipe { dx: 70.0 });
        assert_eq!(outcome, GestureOutcome::Navigated(Page::Home));
    }

    #[test]
    fn test_short_swipe_stays() {
        let (outcome, out) = nav(Page::About, NavAction::Swipe { dx: 69.0 });
        assert_eq!(outcome, GestureOutcome::Discarded);
        assert_eq!(out, "Swipe too short; staying on About (about.html)\n");
    }

    #[test]
    fn test_arrow_keys() {
        let (left, _) = nav(Page::Contact, NavAction::Key { key: ArrowKey::Left });
        let (right, _) = nav(Page::Contact, NavAction::Key { key: ArrowKey::Right });
        assert_eq!(left, GestureOutcome::Navigated(Page::About));
        assert_eq!(right, GestureOutcome::Navigated(Page::Home));
    }

    #[test]
    fn test_tasks_run_in_delay_order() {
        let mut host = TerminalHost::new(Vec::new(), false);
        host.set_timeout(Duration::from_millis(450), Deferred::Navigate(Page::About));
        host.request_frame(Deferred::ActivateOverlay);

        assert_eq!(
            host.next_due(),
            Some((Duration::ZERO, Deferred::ActivateOverlay))
        );
        assert_eq!(
            host.next_due(),
            Some((Duration::from_millis(450), Deferred::Navigate(Page::About)))
        );
        assert_eq!(host.next_due(), None);
    }
}
