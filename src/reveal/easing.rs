//! Easing curves for reveal animations.
//!
//! Every curve maps `0 → 0` and `1 → 1`; input outside `[0, 1]` is clamped.
//! `back_out` and `elastic_out` overshoot in between, which is what gives the
//! hero logo and the process icons their bounce.
//!
//! The page runtime (`static/reveal.js`) carries the same formulas, keyed by
//! the serialized `name` tag.

use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(tag = "name", rename_all = "snake_case")]
pub enum Easing {
    Linear,
    /// Cubic ease-out.
    Power2Out,
    /// Quartic ease-out.
    #[default]
    Power3Out,
    /// Overshoots past the end by an amount controlled by `overshoot`, then settles.
    BackOut { overshoot: f64 },
    /// Decaying oscillation around the end value.
    ElasticOut { amplitude: f64, period: f64 },
}

impl Easing {
    pub fn back_out(overshoot: f64) -> Self {
        Easing::BackOut { overshoot }
    }

    pub fn elastic_out(amplitude: f64, period: f64) -> Self {
        Easing::ElasticOut { amplitude, period }
    }

    /// Map linear progress `t` to eased progress.
    pub fn apply(self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        if t == 0.0 || t == 1.0 {
            return t;
        }
        match self {
            Easing::Linear => t,
            Easing::Power2Out => 1.0 - (1.0 - t).powi(3),
            Easing::Power3Out => 1.0 - (1.0 - t).powi(4),
            Easing::BackOut { overshoot: s } => {
                let u = t - 1.0;
                1.0 + (s + 1.0) * u.powi(3) + s * u.powi(2)
            }
            Easing::ElasticOut { amplitude, period } => {
                let amp = amplitude.max(1.0);
                let period = if period > 0.0 { period } else { 0.3 };
                let p = period / amplitude.min(1.0).max(f64::EPSILON);
                let phase = p / (2.0 * PI) * (1.0 / amp).asin();
                amp * 2f64.powf(-10.0 * t) * ((t - phase) * (2.0 * PI) / p).sin() + 1.0
            }
        }
    }
}
