//! Swipe, drag and arrow-key navigation between the cyclic pages.
//!
//! [`GestureNavigator`] is a small state machine:
//!
//! ```text
//! Idle --press--> Dragging --release--> Idle (short drag)
//!                                   \--> Navigating(next | prev) --> Idle
//! ```
//!
//! A drag shorter than [`SWIPE_THRESHOLD_PX`] is discarded. Leftward drags
//! go to the next page, rightward drags to the previous one. Navigation goes
//! through a debounce gate: once triggered, further requests are ignored for
//! [`NAVIGATION_DEBOUNCE`] unless the navigation fails, which reopens the
//! gate immediately.
//!
//! Timing is owned by the [`NavigationHost`]. The navigator asks the host to
//! run [`Deferred`] tasks on the next frame or after a delay and expects them
//! back through [`GestureNavigator::run_deferred`].

use std::time::{Duration, Instant};

use crate::Page;

/// Minimum horizontal travel for a drag to count as a swipe.
pub const SWIPE_THRESHOLD_PX: f64 = 70.0;

/// How long navigation requests are ignored after one fires.
pub const NAVIGATION_DEBOUNCE: Duration = Duration::from_secs(2);

/// Delay between starting the transition and changing location.
pub const TRANSITION_DELAY: Duration = Duration::from_millis(450);

/// Errors raised by a navigation host.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum NavigationError {
    #[error("transition overlay unavailable: {0}")]
    Overlay(String),
    #[error("navigation to {page} failed: {reason}")]
    Location { page: Page, reason: String },
}

/// What a press landed on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PressOrigin {
    Surface,
    Input,
    TextArea,
    Select,
    Button,
}

impl PressOrigin {
    /// Presses on form controls never start a drag.
    #[must_use]
    pub const fn is_interactive(self) -> bool {
        !matches!(self, Self::Surface)
    }
}

/// Direction through the page cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Next,
    Previous,
}

impl Direction {
    /// The page reached from `from`.
    #[must_use]
    pub const fn target(self, from: Page) -> Page {
        match self {
            Self::Next => from.next(),
            Self::Previous => from.prev(),
        }
    }
}

/// Keys the navigator reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    ArrowLeft,
    ArrowRight,
    Other,
}

/// Where the navigator is in a gesture.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GestureState {
    Idle,
    Dragging { origin_x: f64, displacement: f64 },
    Navigating { target: Page },
}

/// Result of feeding an event to the navigator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GestureOutcome {
    /// The event does not concern navigation.
    Ignored,
    /// A drag ended below the threshold.
    Discarded,
    /// A navigation was requested while the gate was closed.
    Debounced,
    /// A transition towards this page has started.
    Navigating(Page),
    /// The host failed; the gate has been reopened.
    Failed,
    /// The location has been handed to the host.
    Navigated(Page),
}

/// Work the navigator schedules on its host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Deferred {
    /// Activate the overlay appended for the transition.
    ActivateOverlay,
    /// Change location.
    Navigate(Page),
}

/// The page environment: clock, transition overlay, timers and location.
pub trait NavigationHost {
    /// Current time.
    fn now(&self) -> Instant;

    /// Append the transition overlay, inactive.
    ///
    /// # Errors
    ///
    /// Returns an error if the overlay cannot be attached.
    fn append_overlay(&mut self) -> Result<(), NavigationError>;

    /// Start the overlay's visual transition.
    fn activate_overlay(&mut self);

    /// Run `task` on the next paint tick.
    fn request_frame(&mut self, task: Deferred);

    /// Run `task` once `delay` has elapsed.
    fn set_timeout(&mut self, delay: Duration, task: Deferred);

    /// Navigate the whole document to `page`.
    ///
    /// # Errors
    ///
    /// Returns an error if navigation fails.
    fn assign_location(&mut self, page: Page) -> Result<(), NavigationError>;
}

/// Drag and debounce state owned by one navigator.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GestureSession {
    state: GestureState,
    locked_at: Option<Instant>,
}

impl GestureSession {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            state: GestureState::Idle,
            locked_at: None,
        }
    }

    #[must_use]
    pub const fn state(&self) -> GestureState {
        self.state
    }

    /// Whether the debounce gate is closed at `now`.
    #[must_use]
    pub fn is_locked(&self, now: Instant) -> bool {
        self.locked_at
            .is_some_and(|at| now.saturating_duration_since(at) < NAVIGATION_DEBOUNCE)
    }

    fn release(&mut self) {
        self.locked_at = None;
        self.state = GestureState::Idle;
    }
}

impl Default for GestureSession {
    fn default() -> Self {
        Self::new()
    }
}

/// Gesture navigation for the page the user is on.
#[derive(Debug)]
pub struct GestureNavigator<H> {
    current: Page,
    session: GestureSession,
    host: H,
}

impl<H: NavigationHost> GestureNavigator<H> {
    pub const fn new(current: Page, host: H) -> Self {
        Self {
            current,
            session: GestureSession::new(),
            host,
        }
    }

    pub const fn current(&self) -> Page {
        self.current
    }

    pub const fn state(&self) -> GestureState {
        self.session.state
    }

    pub const fn session(&self) -> &GestureSession {
        &self.session
    }

    pub const fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    pub fn into_host(self) -> H {
        self.host
    }

    /// Pointer or touch press at `x`. Returns whether a drag started.
    pub fn press(&mut self, x: f64, origin: PressOrigin) -> bool {
        if origin.is_interactive() {
            return false;
        }
        self.session.state = GestureState::Dragging {
            origin_x: x,
            displacement: 0.0,
        };
        true
    }

    /// Pointer or touch moved to `x`.
    pub fn drag(&mut self, x: f64) {
        if let GestureState::Dragging {
            origin_x,
            displacement,
        } = &mut self.session.state
        {
            *displacement = x - *origin_x;
        }
    }

    /// The pointer left the tracked surface; a pending drag is dropped.
    pub fn leave(&mut self) {
        if matches!(self.session.state, GestureState::Dragging { .. }) {
            self.session.state = GestureState::Idle;
        }
    }

    /// Pointer or touch released at `x`.
    pub fn release(&mut self, x: f64) -> GestureOutcome {
        let GestureState::Dragging { origin_x, .. } = self.session.state else {
            return GestureOutcome::Ignored;
        };
        self.session.state = GestureState::Idle;

        let displacement = x - origin_x;
        if displacement.abs() < SWIPE_THRESHOLD_PX {
            return GestureOutcome::Discarded;
        }

        let direction = if displacement < 0.0 {
            Direction::Next
        } else {
            Direction::Previous
        };
        self.navigate(direction)
    }

    /// Arrow keys navigate like swipes.
    pub fn key(&mut self, key: Key) -> GestureOutcome {
        match key {
            Key::ArrowLeft => self.navigate(Direction::Previous),
            Key::ArrowRight => self.navigate(Direction::Next),
            Key::Other => GestureOutcome::Ignored,
        }
    }

    /// Request navigation through the debounce gate.
    pub fn navigate(&mut self, direction: Direction) -> GestureOutcome {
        let now = self.host.now();
        if self.session.is_locked(now) {
            tracing::debug!(?direction, "navigation debounced");
            return GestureOutcome::Debounced;
        }

        let target = direction.target(self.current);
        self.session.locked_at = Some(now);

        if let Err(e) = self.host.append_overlay() {
            tracing::warn!(error = %e, %target, "page transition failed");
            self.session.release();
            return GestureOutcome::Failed;
        }

        self.session.state = GestureState::Navigating { target };
        self.host.request_frame(Deferred::ActivateOverlay);
        self.host.set_timeout(TRANSITION_DELAY, Deferred::Navigate(target));
        tracing::debug!(from = %self.current, %target, "page transition started");
        GestureOutcome::Navigating(target)
    }

    /// Run a task the host scheduled earlier.
    pub fn run_deferred(&mut self, task: Deferred) -> GestureOutcome {
        match task {
            Deferred::ActivateOverlay => {
                self.host.activate_overlay();
                GestureOutcome::Ignored
            }
            Deferred::Navigate(page) => match self.host.assign_location(page) {
                Ok(()) => {
                    // The debounce window keeps running from the request.
                    self.current = page;
                    self.session.state = GestureState::Idle;
                    GestureOutcome::Navigated(page)
                }
                Err(e) => {
                    tracing::warn!(error = %e, %page, "navigation failed");
                    self.session.release();
                    GestureOutcome::Failed
                }
            },
        }
    }
}
