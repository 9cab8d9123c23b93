//! Easing curves mapping normalized progress in `[0, 1]` onto `[0, 1]`.
//!
//! Every curve is monotonic with `f(0) = 0` and `f(1) = 1`. Inputs are not
//! clamped; callers clamp before evaluating.

use serde::{Deserialize, Serialize};

#[inline]
pub fn ease_in_quad(t: f64) -> f64 {
    t * t
}

#[inline]
pub fn ease_in_cubic(t: f64) -> f64 {
    t * t * t
}

#[inline]
pub fn ease_out_quart(t: f64) -> f64 {
    let omt = 1.0 - t;
    1.0 - omt * omt * omt * omt
}

/// Named easing curve, selectable from configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Easing {
    InQuad,
    InCubic,
    #[default]
    OutQuart,
}

impl Easing {
    #[inline]
    pub fn apply(self, t: f64) -> f64 {
        match self {
            Easing::InQuad => ease_in_quad(t),
            Easing::InCubic => ease_in_cubic(t),
            Easing::OutQuart => ease_out_quart(t),
        }
    }
}
