//! The fixed, cyclic sequence of storefront pages.
//!
//! Swipes and arrow keys move through the pages in this order and wrap at
//! both ends:
//!
//! ```text
//! index.html -> collection.html -> about.html -> contact.html -> index.html
//! ```

use core::fmt;
use std::str::FromStr;

/// Error returned when a string names no page in the cycle.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown page: {0}")]
pub struct UnknownPage(pub String);

/// A page in the navigation cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Page {
    #[default]
    Home,
    Collection,
    About,
    Contact,
}

impl Page {
    /// All pages in navigation order.
    pub const CYCLE: [Self; 4] = [Self::Home, Self::Collection, Self::About, Self::Contact];

    /// Document file name used for navigation.
    #[must_use]
    pub const fn file_name(self) -> &'static str {
        match self {
            Self::Home => "index.html",
            Self::Collection => "collection.html",
            Self::About => "about.html",
            Self::Contact => "contact.html",
        }
    }

    /// Human-readable page title.
    #[must_use]
    pub const fn title(self) -> &'static str {
        match self {
            Self::Home => "Home",
            Self::Collection => "Collection",
            Self::About => "About",
            Self::Contact => "Contact",
        }
    }

    /// Look up a page by its exact file name.
    #[must_use]
    pub fn from_file_name(name: &str) -> Option<Self> {
        Self::CYCLE.into_iter().find(|page| page.file_name() == name)
    }

    /// Resolve the page a location path points at.
    ///
    /// Only the last path segment is considered. An empty or unknown segment
    /// resolves to [`Page::Home`].
    #[must_use]
    pub fn from_path(path: &str) -> Self {
        let segment = path
            .split(['?', '#'])
            .next()
            .unwrap_or_default()
            .rsplit('/')
            .next()
            .unwrap_or_default();
        Self::from_file_name(segment).unwrap_or_default()
    }

    /// The following page, wrapping to the first.
    #[must_use]
    pub const fn next(self) -> Self {
        match self {
            Self::Home => Self::Collection,
            Self::Collection => Self::About,
            Self::About => Self::Contact,
            Self::Contact => Self::Home,
        }
    }

    /// The preceding page, wrapping to the last.
    #[must_use]
    pub const fn prev(self) -> Self {
        match self {
            Self::Home => Self::Contact,
            Self::Collection => Self::Home,
            Self::About => Self::Collection,
            Self::Contact => Self::About,
        }
    }
}

impl fmt::Display for Page {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.file_name())
    }
}

impl FromStr for Page {
    type Err = UnknownPage;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_file_name(s).ok_or_else(|| UnknownPage(s.to_string()))
    }
}
