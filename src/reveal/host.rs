//! The scroll host seam.
//!
//! [`ScrollHost`] is everything the reveal engine needs from the rendering
//! environment: viewport geometry, element positions, listener bookkeeping,
//! and a way to write and revert inline styles. The browser runtime is one
//! host; tests use a recording fake.

use super::rule::{Edge, VisualState};

/// Opaque id of a subscribed scroll listener.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ListenerId(pub u64);

pub trait ScrollHost {
    fn viewport_height(&self) -> f64;

    /// Current vertical scroll offset.
    fn scroll_y(&self) -> f64;

    /// Document offset of `element`'s edge, or `None` if it is not rendered.
    fn edge_offset(&self, element: &str, edge: Edge) -> Option<f64>;

    fn subscribe(&mut self) -> ListenerId;

    fn unsubscribe(&mut self, id: ListenerId);

    /// Write `state` as the element's inline style.
    fn apply(&mut self, target: &str, state: &VisualState);

    /// Drop every inline style previously applied to the element.
    fn revert(&mut self, target: &str);
}
