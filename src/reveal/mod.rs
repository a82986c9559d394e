//! Scroll-triggered reveal animations.
//!
//! | Piece | Role |
//! |---|---|
//! | [`easing`] | Pure easing curves |
//! | [`rule`] | What a reveal does: targets, trigger line, from/to states, timing |
//! | [`host`] | [`ScrollHost`] trait: the rendering environment seen by the engine |
//! | [`engine`] | [`RevealContext`]: registration, per-frame stepping, disposal |
//! | [`stage`] | [`Stage`]: idempotent per-section mount and unmount |
//!
//! `register_reveal(target, trigger, from, to, options)` maps onto
//! [`RevealContext::register`] with a [`RevealRule`]; the returned
//! [`RevealHandle`] is the disposer.

pub mod easing;
pub mod engine;
pub mod host;
pub mod rule;
pub mod stage;

pub use easing::Easing;
pub use engine::{Phase, RevealContext, RevealHandle};
pub use host::{ListenerId, ScrollHost};
pub use rule::{Edge, Line, Playback, Position, RevealRule, Sequence, Trigger, VisualState};
pub use stage::Stage;

use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum RevealError {
    #[error("element '{0}' is already owned by another reveal")]
    TargetAlreadyOwned(String),
    #[error("reveal has no targets")]
    EmptyTargets,
    #[error("invalid timing: {0}")]
    InvalidTiming(String),
}
