//! Reveal rule types.
//!
//! These structs describe *what* a reveal does: which elements it owns, what
//! triggers it, the visual state it starts from and settles into, and how it
//! plays. The [`engine`](super::engine) decides *when* to apply them against
//! a [`ScrollHost`](super::host::ScrollHost).
//!
//! Rules serialize to JSON verbatim; the generated page embeds them and the
//! page runtime reads the same shape.

use super::easing::Easing;
use super::RevealError;
use serde::{Deserialize, Serialize};

/// Visual properties of an element at one end of a reveal.
///
/// Absent properties are not animated. Translations are in px, rotation in
/// degrees, the scales are factors.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct VisualState {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub opacity: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub x: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub y: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scale: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scale_x: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scale_y: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rotation: Option<f64>,
}

impl VisualState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_opacity(mut self, v: f64) -> Self {
        self.opacity = Some(v);
        self
    }

    pub fn with_x(mut self, v: f64) -> Self {
        self.x = Some(v);
        self
    }

    pub fn with_y(mut self, v: f64) -> Self {
        self.y = Some(v);
        self
    }

    pub fn with_scale(mut self, v: f64) -> Self {
        self.scale = Some(v);
        self
    }

    pub fn with_scale_x(mut self, v: f64) -> Self {
        self.scale_x = Some(v);
        self
    }

    pub fn with_scale_y(mut self, v: f64) -> Self {
        self.scale_y = Some(v);
        self
    }

    pub fn with_rotation(mut self, v: f64) -> Self {
        self.rotation = Some(v);
        self
    }

    /// The element's natural values for every property this state sets.
    pub fn settled(&self) -> Self {
        let pick = |prop: Option<f64>, natural: f64| prop.map(|_| natural);
        Self {
            opacity: pick(self.opacity, 1.0),
            x: pick(self.x, 0.0),
            y: pick(self.y, 0.0),
            scale: pick(self.scale, 1.0),
            scale_x: pick(self.scale_x, 1.0),
            scale_y: pick(self.scale_y, 1.0),
            rotation: pick(self.rotation, 0.0),
        }
    }

    /// Interpolate towards `to` by `t`. A property set on only one side uses
    /// its natural value for the other.
    pub fn lerp(&self, to: &VisualState, t: f64) -> VisualState {
        fn mix(a: Option<f64>, b: Option<f64>, natural: f64, t: f64) -> Option<f64> {
            if a.is_none() && b.is_none() {
                return None;
            }
            let a = a.unwrap_or(natural);
            let b = b.unwrap_or(natural);
            Some(a + (b - a) * t)
        }
        VisualState {
            opacity: mix(self.opacity, to.opacity, 1.0, t),
            x: mix(self.x, to.x, 0.0, t),
            y: mix(self.y, to.y, 0.0, t),
            scale: mix(self.scale, to.scale, 1.0, t),
            scale_x: mix(self.scale_x, to.scale_x, 1.0, t),
            scale_y: mix(self.scale_y, to.scale_y, 1.0, t),
            rotation: mix(self.rotation, to.rotation, 0.0, t),
        }
    }

    /// Inline CSS declarations for this state.
    pub fn to_css(&self) -> String {
        let mut transforms = Vec::new();
        if self.x.is_some() || self.y.is_some() {
            transforms.push(format!(
                "translate({}px, {}px)",
                self.x.unwrap_or(0.0),
                self.y.unwrap_or(0.0)
            ));
        }
        if let Some(s) = self.scale {
            transforms.push(format!("scale({s})"));
        }
        if let Some(s) = self.scale_x {
            transforms.push(format!("scaleX({s})"));
        }
        if let Some(s) = self.scale_y {
            transforms.push(format!("scaleY({s})"));
        }
        if let Some(r) = self.rotation {
            transforms.push(format!("rotate({r}deg)"));
        }

        let mut decls = Vec::new();
        if let Some(o) = self.opacity {
            decls.push(format!("opacity: {o}"));
        }
        if !transforms.is_empty() {
            decls.push(format!("transform: {}", transforms.join(" ")));
        }
        decls.join("; ")
    }
}

/// Which edge of the trigger element is observed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Edge {
    Top,
    Bottom,
}

/// A trigger line: an element edge meeting a point of the viewport.
///
/// `viewport` is a fraction of the viewport height from its top, so
/// `Line::top(0.8)` reads as "top edge crosses 80% down the viewport".
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Line {
    pub edge: Edge,
    pub viewport: f64,
}

impl Line {
    pub fn top(viewport: f64) -> Self {
        Self {
            edge: Edge::Top,
            viewport,
        }
    }

    pub fn bottom(viewport: f64) -> Self {
        Self {
            edge: Edge::Bottom,
            viewport,
        }
    }

    /// Scroll offset at which the element edge (at document offset
    /// `edge_offset`) meets this line.
    pub fn scroll_offset(&self, edge_offset: f64, viewport_height: f64) -> f64 {
        edge_offset - self.viewport * viewport_height
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Trigger {
    /// Play as soon as the rule is registered.
    Load,
    /// Play when `element`'s edge crosses `start`.
    Scroll { element: String, start: Line },
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum Playback {
    /// Play forward exactly once.
    Once,
    /// Bind progress to scroll position between the start line and `end`.
    /// Displayed progress trails the scroll position by `smoothing` seconds.
    Scrub { end: Line, smoothing: f64 },
}

/// One reveal: a set of owned elements animated from `from` to `to`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RevealRule {
    pub targets: Vec<String>,
    pub trigger: Trigger,
    pub from: VisualState,
    pub to: VisualState,
    /// Seconds.
    pub duration: f64,
    pub ease: Easing,
    /// Seconds before the first target starts.
    #[serde(default)]
    pub delay: f64,
    /// Seconds between consecutive targets.
    #[serde(default)]
    pub stagger: f64,
    pub playback: Playback,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transform_origin: Option<String>,
}

impl RevealRule {
    /// A one-shot reveal of `target` from `from` into its settled state,
    /// triggered by its own top edge crossing 80% of the viewport.
    pub fn reveal(target: impl Into<String>, from: VisualState) -> Self {
        let target = target.into();
        Self {
            trigger: Trigger::Scroll {
                element: target.clone(),
                start: Line::top(0.8),
            },
            targets: vec![target],
            to: from.settled(),
            from,
            duration: 1.0,
            ease: Easing::Power3Out,
            delay: 0.0,
            stagger: 0.0,
            playback: Playback::Once,
            transform_origin: None,
        }
    }

    /// Replace the owned targets, keeping the trigger.
    pub fn with_targets<I, S>(mut self, targets: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.targets = targets.into_iter().map(Into::into).collect();
        self
    }

    /// Observe a different element than the first target.
    pub fn triggered_by(mut self, element: impl Into<String>) -> Self {
        let start = self.start_line().unwrap_or(Line::top(0.8));
        self.trigger = Trigger::Scroll {
            element: element.into(),
            start,
        };
        self
    }

    pub fn starting_at(mut self, line: Line) -> Self {
        if let Trigger::Scroll { start, .. } = &mut self.trigger {
            *start = line;
        }
        self
    }

    pub fn on_load(mut self) -> Self {
        self.trigger = Trigger::Load;
        self
    }

    pub fn duration(mut self, secs: f64) -> Self {
        self.duration = secs;
        self
    }

    pub fn ease(mut self, ease: Easing) -> Self {
        self.ease = ease;
        self
    }

    pub fn delay(mut self, secs: f64) -> Self {
        self.delay = secs;
        self
    }

    pub fn stagger(mut self, secs: f64) -> Self {
        self.stagger = secs;
        self
    }

    pub fn scrub(mut self, end: Line, smoothing: f64) -> Self {
        self.playback = Playback::Scrub { end, smoothing };
        self
    }

    pub fn origin(mut self, origin: impl Into<String>) -> Self {
        self.transform_origin = Some(origin.into());
        self
    }

    pub fn start_line(&self) -> Option<Line> {
        match &self.trigger {
            Trigger::Load => None,
            Trigger::Scroll { start, .. } => Some(*start),
        }
    }

    /// Seconds from trigger until the last target settles.
    pub fn total_time(&self) -> f64 {
        let extra = self.targets.len().saturating_sub(1) as f64 * self.stagger;
        self.delay + extra + self.duration
    }

    pub fn validate(&self) -> Result<(), RevealError> {
        if self.targets.is_empty() {
            return Err(RevealError::EmptyTargets);
        }
        let timing_ok = |v: f64| v.is_finite() && v >= 0.0;
        if !timing_ok(self.duration) || !timing_ok(self.delay) || !timing_ok(self.stagger) {
            return Err(RevealError::InvalidTiming(format!(
                "{}: duration, delay and stagger must be finite and >= 0",
                self.targets[0]
            )));
        }
        let line_ok = |l: &Line| (0.0..=1.0).contains(&l.viewport);
        if let Some(start) = self.start_line() {
            if !line_ok(&start) {
                return Err(RevealError::InvalidTiming(format!(
                    "{}: start line must be within the viewport",
                    self.targets[0]
                )));
            }
        }
        if let Playback::Scrub { end, smoothing } = &self.playback {
            if matches!(self.trigger, Trigger::Load) {
                return Err(RevealError::InvalidTiming(format!(
                    "{}: scrub needs a scroll trigger",
                    self.targets[0]
                )));
            }
            if !line_ok(end) || !timing_ok(*smoothing) {
                return Err(RevealError::InvalidTiming(format!(
                    "{}: scrub end line or smoothing out of range",
                    self.targets[0]
                )));
            }
        }
        Ok(())
    }
}

/// Where the next rule of a [`Sequence`] starts.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Position {
    /// When the previous rule ends.
    After,
    /// This many seconds before the previous rule ends.
    Overlap(f64),
}

/// Places load-triggered rules one after another, turning relative
/// positions into absolute delays.
#[derive(Debug, Default)]
pub struct Sequence {
    rules: Vec<RevealRule>,
    cursor: f64,
}

impl Sequence {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(mut self, position: Position, rule: RevealRule) -> Self {
        let start = match position {
            Position::After => self.cursor,
            Position::Overlap(secs) => (self.cursor - secs).max(0.0),
        };
        let mut rule = rule.on_load();
        rule.delay += start;
        self.cursor = rule.total_time();
        self.rules.push(rule);
        self
    }

    pub fn then(self, rule: RevealRule) -> Self {
        self.push(Position::After, rule)
    }

    pub fn overlap(self, secs: f64, rule: RevealRule) -> Self {
        self.push(Position::Overlap(secs), rule)
    }

    /// End time of the last rule.
    pub fn duration(&self) -> f64 {
        self.cursor
    }

    pub fn build(self) -> Vec<RevealRule> {
        self.rules
    }
}
