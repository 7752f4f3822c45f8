//! Site header navigation
//!
//! The static navigation tree and active-item detection. The header's
//! timing and scroll settings are rendered as data attributes for
//! `site.js`.

use serde::Serialize;
use std::time::Duration;

/// Dropdowns stay open this long after the pointer leaves
pub const DROPDOWN_CLOSE_DELAY: Duration = Duration::from_millis(300);

/// Header switches to its compact style past this scroll offset
pub const SCROLL_THRESHOLD: f64 = 10.0;

/// A link in a dropdown
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct NavLink {
    pub name: &'static str,
    pub path: &'static str,
}

/// Top-level navigation entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NavItem {
    pub name: &'static str,
    pub path: &'static str,
    pub dropdown: Vec<NavLink>,
}

impl NavItem {
    /// Active when the path is the item's own or one of its dropdown links
    pub fn is_active(&self, current_path: &str) -> bool {
        self.path == current_path || self.dropdown.iter().any(|link| link.path == current_path)
    }
}

pub const CONTACT_PATH: &str = "/contact";
pub const LOGIN_PATH: &str = "/login";

/// The main navigation, in display order
pub fn navigation() -> Vec<NavItem> {
    vec![
        NavItem {
            name: "Home",
            path: "/",
            dropdown: Vec::new(),
        },
        NavItem {
            name: "Services",
            path: "/#services",
            dropdown: vec![
                NavLink { name: "College Counseling", path: "/services/college-counseling" },
                NavLink { name: "Graduate Admissions", path: "/services/graduate-admissions" },
                NavLink { name: "Test Prep", path: "/services/test-prep" },
                NavLink {
                    name: "Executive Functioning Coaching",
                    path: "/services/executive-functioning",
                },
                NavLink { name: "Tutoring", path: "/services/tutoring" },
            ],
        },
        NavItem {
            name: "About",
            path: "/about",
            dropdown: vec![
                NavLink { name: "Our Story", path: "/about/story" },
                NavLink { name: "Results", path: "/about/story/results" },
                NavLink { name: "Team", path: "/about/team" },
            ],
        },
        NavItem {
            name: "Resources",
            path: "/resources",
            dropdown: vec![
                NavLink { name: "Blog", path: "/resources/blog" },
                NavLink { name: "Events", path: "/resources/events" },
            ],
        },
    ]
}

/// Template-facing navigation entry
#[derive(Debug, Clone, Serialize)]
pub struct NavItemView {
    pub name: &'static str,
    pub path: &'static str,
    pub active: bool,
    pub dropdown: Vec<NavLinkView>,
}

#[derive(Debug, Clone, Serialize)]
pub struct NavLinkView {
    pub name: &'static str,
    pub path: &'static str,
    pub active: bool,
}

/// Header model for the page at `current_path`
#[derive(Debug, Clone, Serialize)]
pub struct NavView {
    pub items: Vec<NavItemView>,
    pub contact_active: bool,
    pub login_path: &'static str,
    /// `DROPDOWN_CLOSE_DELAY` in milliseconds
    pub close_delay_ms: u64,
    pub scroll_threshold: f64,
}

impl NavView {
    pub fn for_path(current_path: &str) -> Self {
        let items = navigation()
            .into_iter()
            .map(|item| NavItemView {
                name: item.name,
                path: item.path,
                active: item.is_active(current_path),
                dropdown: item
                    .dropdown
                    .iter()
                    .map(|link| NavLinkView {
                        name: link.name,
                        path: link.path,
                        active: link.path == current_path,
                    })
                    .collect(),
            })
            .collect();
        Self {
            items,
            contact_active: current_path == CONTACT_PATH,
            login_path: LOGIN_PATH,
            close_delay_ms: DROPDOWN_CLOSE_DELAY.as_millis() as u64,
            scroll_threshold: SCROLL_THRESHOLD,
        }
    }
}
