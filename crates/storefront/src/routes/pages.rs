//! Static page handlers.
//!
//! Each page shows the cart badge and links to its neighbours in the page
//! cycle, which is the same order swipe navigation follows.

use askama::Template;
use askama_web::WebTemplate;
use axum::extract::State;
use bella_mode_core::Page;
use bella_mode_core::gesture::{NAVIGATION_DEBOUNCE, SWIPE_THRESHOLD_PX, TRANSITION_DELAY};
use tower_sessions::Session;
use tracing::instrument;

use crate::catalog::ProductCard;
use crate::routes::cart::item_count;
use crate::state::AppState;

/// A link in the site navigation.
#[derive(Debug, Clone)]
pub struct NavLink {
    pub href: &'static str,
    pub title: &'static str,
    pub active: bool,
}

/// Swipe and transition settings read by the page script.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GestureTiming {
    pub threshold_px: f64,
    pub debounce_ms: u128,
    pub transition_ms: u128,
}

impl Default for GestureTiming {
    fn default() -> Self {
        Self {
            threshold_px: SWIPE_THRESHOLD_PX,
            debounce_ms: NAVIGATION_DEBOUNCE.as_millis(),
            transition_ms: TRANSITION_DELAY.as_millis(),
        }
    }
}

/// Navigation data shared by every page.
#[derive(Debug, Clone)]
pub struct PageNav {
    pub current: &'static str,
    pub title: &'static str,
    pub links: Vec<NavLink>,
    pub prev: NavLink,
    pub next: NavLink,
    pub gesture: GestureTiming,
}

impl PageNav {
    /// Navigation for one page of the cycle.
    #[must_use]
    pub fn for_page(page: Page) -> Self {
        let link = |target: Page| NavLink {
            href: target.file_name(),
            title: target.title(),
            active: target == page,
        };

        Self {
            current: page.file_name(),
            title: page.title(),
            links: Page::CYCLE.into_iter().map(link).collect(),
            prev: link(page.prev()),
            next: link(page.next()),
            gesture: GestureTiming::default(),
        }
    }

    /// Navigation for a page outside the cycle, such as the cart.
    ///
    /// Swipes from such a page move as if from the home page.
    #[must_use]
    pub fn standalone(file: &'static str, title: &'static str) -> Self {
        let mut nav = Self::for_page(Page::default());
        nav.current = file;
        nav.title = title;
        for link in &mut nav.links {
            link.active = false;
        }
        nav.prev.active = false;
        nav.next.active = false;
        nav
    }
}

/// Home page template.
#[derive(Template, WebTemplate)]
#[template(path = "pages/home.html")]
pub struct HomeTemplate {
    pub nav: PageNav,
    pub item_count: u64,
}

/// Collection page template.
#[derive(Template, WebTemplate)]
#[template(path = "pages/collection.html")]
pub struct CollectionTemplate {
    pub nav: PageNav,
    pub item_count: u64,
    pub products: Vec<ProductCard>,
}

/// About page template.
#[derive(Template, WebTemplate)]
#[template(path = "pages/about.html")]
pub struct AboutTemplate {
    pub nav: PageNav,
    pub item_count: u64,
}

/// Contact page template.
#[derive(Template, WebTemplate)]
#[template(path = "pages/contact.html")]
pub struct ContactTemplate {
    pub nav: PageNav,
    pub item_count: u64,
}

/// Display the home page.
#[instrument(skip(state, session))]
pub async fn home(State(state): State<AppState>, session: Session) -> HomeTemplate {
    HomeTemplate {
        nav: PageNav::for_page(Page::Home),
        item_count: item_count(&state, session).await,
    }
}

/// Display the collection page.
#[instrument(skip(state, session))]
pub async fn collection(State(state): State<AppState>, session: Session) -> CollectionTemplate {
    CollectionTemplate {
        nav: PageNav::for_page(Page::Collection),
        item_count: item_count(&state, session).await,
        products: state.catalog().cards(state.currency()),
    }
}

/// Display the about page.
#[instrument(skip(state, session))]
pub async fn about(State(state): State<AppState>, session: Session) -> AboutTemplate {
    AboutTemplate {
        nav: PageNav::for_page(Page::About),
        item_count: item_count(&state, session).await,
    }
}

/// Display the contact page.
#[instrument(skip(state, session))]
pub async fn contact(State(state): State<AppState>, session: Session) -> ContactTemplate {
    ContactTemplate {
        nav: PageNav::for_page(Page::Contact),
        item_count: item_count(&state, session).await,
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_nav_wraps_around() {
        let nav = PageNav::for_page(Page::Home);
        assert_eq!(nav.current, "index.html");
        assert_eq!(nav.prev.href, "contact.html");
        assert_eq!(nav.next.href, "collection.html");

        let nav = PageNav::for_page(Page::Contact);
        assert_eq!(nav.next.href, "index.html");
    }

    #[test]
    fn test_nav_marks_active_link() {
        let nav = PageNav::for_page(Page::About);
        let active: Vec<_> = nav.links.iter().filter(|l| l.active).collect();
        assert_eq!(active.len(), 1);
        assert_eq!(active[0].href, "about.html");
    }

    #[test]
    fn test_standalone_nav_has_no_active_link() {
        let nav = PageNav::standalone("cart.html", "Cart");
        assert!(nav.links.iter().all(|l| !l.active));
        assert_eq!(nav.links.len(), Page::CYCLE.len());
        assert_eq!(nav.prev.href, "contact.html");
        assert_eq!(nav.next.href, "collection.html");
    }

    #[test]
    fn test_gesture_timing_matches_navigator() {
        let timing = PageNav::for_page(Page::About).gesture;
        assert!((timing.threshold_px - 70.0).abs() < f64::EPSILON);
        assert_eq!(timing.debounce_ms, 2000);
        assert_eq!(timing.transition_ms, 450);
    }
}
