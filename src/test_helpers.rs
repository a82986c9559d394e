//! Shared test utilities for the spice-site test suite.
//!
//! - [`FakeScrollHost`]: an in-memory [`ScrollHost`] with a fixed layout that
//!   records listeners and inline styles.
//! - [`setup_content`]: a temp content directory holding placeholder files
//!   for every asset the stock catalog references.
//!
//! # Usage
//!
//! ```rust
//! use crate::test_helpers::*;
//!
//! let mut host = FakeScrollHost::new(900.0).with_element("contact-heading", 4000.0, 80.0);
//! host.scroll_to(3300.0);
//! assert_eq!(host.listener_count(), 0);
//! ```

use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;
use tempfile::TempDir;

use crate::content::Catalog;
use crate::reveal::{Edge, ListenerId, ScrollHost, VisualState};

// =========================================================================
// Scroll host
// =========================================================================

#[derive(Debug, Default)]
pub struct FakeScrollHost {
    viewport: f64,
    scroll: f64,
    /// element id → (top, height)
    layout: BTreeMap<String, (f64, f64)>,
    listeners: BTreeSet<ListenerId>,
    next_listener: u64,
    styles: BTreeMap<String, VisualState>,
    applies: BTreeMap<String, usize>,
}

impl FakeScrollHost {
    pub fn new(viewport: f64) -> Self {
        Self {
            viewport,
            ..Self::default()
        }
    }

    pub fn with_element(mut self, id: impl Into<String>, top: f64, height: f64) -> Self {
        self.layout.insert(id.into(), (top, height));
        self
    }

    pub fn scroll_to(&mut self, y: f64) {
        self.scroll = y;
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    /// Current inline style of an element, if any was applied.
    pub fn style(&self, id: &str) -> Option<&VisualState> {
        self.styles.get(id)
    }

    /// Elements currently carrying an inline style.
    pub fn styled_count(&self) -> usize {
        self.styles.len()
    }

    /// Total number of style writes an element received.
    pub fn apply_count(&self, id: &str) -> usize {
        self.applies.get(id).copied().unwrap_or(0)
    }
}

impl ScrollHost for FakeScrollHost {
    fn viewport_height(&self) -> f64 {
        self.viewport
    }

    fn scroll_y(&self) -> f64 {
        self.scroll
    }

    fn edge_offset(&self, element: &str, edge: Edge) -> Option<f64> {
        self.layout.get(element).map(|(top, height)| match edge {
            Edge::Top => *top,
            Edge::Bottom => top + height,
        })
    }

    fn subscribe(&mut self) -> ListenerId {
        let id = ListenerId(self.next_listener);
        self.next_listener += 1;
        self.listeners.insert(id);
        id
    }

    fn unsubscribe(&mut self, id: ListenerId) {
        assert!(self.listeners.remove(&id), "listener {id:?} removed twice");
    }

    fn apply(&mut self, target: &str, state: &VisualState) {
        self.styles.insert(target.to_string(), *state);
        *self.applies.entry(target.to_string()).or_default() += 1;
    }

    fn revert(&mut self, target: &str) {
        self.styles.remove(target);
    }
}

// =========================================================================
// Content fixtures
// =========================================================================

/// A temp content directory with a placeholder file for every stock asset.
pub fn setup_content() -> TempDir {
    let tmp = TempDir::new().unwrap();
    write_assets(tmp.path(), &Catalog::stock());
    tmp
}

/// Write placeholder bytes for every asset `catalog` references.
pub fn write_assets(root: &Path, catalog: &Catalog) {
    let assets = root.join("assets");
    std::fs::create_dir_all(&assets).unwrap();
    for path in catalog.asset_paths() {
        std::fs::write(assets.join(path), format!("placeholder for {path}")).unwrap();
    }
}
