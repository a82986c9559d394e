//! Header navigation state.
//!
//! Two booleans: whether the page has scrolled past the threshold (solid
//! header) and whether the narrow-viewport menu overlay is open. Selecting
//! an entry produces a smooth [`ScrollRequest`] and closes the overlay.

use crate::reveal::{Edge, ScrollHost};
use crate::types::{NavItem, Section};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ScrollBehavior {
    Smooth,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ScrollRequest {
    pub section: Section,
    pub behavior: ScrollBehavior,
}

impl ScrollRequest {
    pub fn smooth(section: Section) -> Self {
        Self {
            section,
            behavior: ScrollBehavior::Smooth,
        }
    }

    /// Resolve to a document offset against `host`.
    pub fn resolve<H: ScrollHost + ?Sized>(&self, host: &H) -> Option<f64> {
        scroll_target(host, self.section)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct NavState {
    threshold: f64,
    scrolled: bool,
    menu_open: bool,
}

impl NavState {
    pub fn new(threshold: f64) -> Self {
        Self {
            threshold,
            scrolled: false,
            menu_open: false,
        }
    }

    pub fn is_scrolled(&self) -> bool {
        self.scrolled
    }

    pub fn is_menu_open(&self) -> bool {
        self.menu_open
    }

    /// Update from the current scroll offset. Returns `true` if the header
    /// style changed.
    pub fn on_scroll(&mut self, scroll_y: f64) -> bool {
        let scrolled = scroll_y > self.threshold;
        let changed = scrolled != self.scrolled;
        self.scrolled = scrolled;
        changed
    }

    pub fn toggle_menu(&mut self) {
        self.menu_open = !self.menu_open;
    }

    pub fn select(&mut self, item: &NavItem) -> ScrollRequest {
        self.scroll_to(item.target)
    }

    /// Scroll to an arbitrary section (logo, hero CTA, order button).
    pub fn scroll_to(&mut self, section: Section) -> ScrollRequest {
        self.menu_open = false;
        ScrollRequest::smooth(section)
    }
}

/// Document offset that puts `section`'s top edge at the viewport top.
pub fn scroll_target<H: ScrollHost + ?Sized>(host: &H, section: Section) -> Option<f64> {
    host.edge_offset(section.anchor(), Edge::Top)
        .map(|top| top.max(0.0))
}
