use lattice_common::{CameraState, SurfaceSize};
use lattice_math::{ease_in_cubic, ease_in_quad};
use serde::{Deserialize, Serialize};

/// A pointer-move event in surface pixels, with the surface size at the time of the event.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerEvent {
    pub x: f64,
    pub y: f64,
    pub surface: SurfaceSize,
}

/// Tuning for the pointer-to-camera mapping.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PointerConfig {
    /// Distance from center in pixels at which the response saturates.
    pub range: f64,
    /// Yaw speed in degrees per frame at full horizontal deflection.
    pub max_weight: f64,
    /// Pitch in degrees at full vertical deflection.
    pub max_pitch: f64,
}

impl Default for PointerConfig {
    fn default() -> Self {
        Self {
            range: 100.0,
            max_weight: 4.0,
            max_pitch: 60.0,
        }
    }
}

/// Camera values derived from one pointer position.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraControl {
    pub weight: f64,
    pub angle_x: f64,
}

impl CameraControl {
    /// Overwrite the pointer-owned fields of `state`.
    pub fn apply(&self, state: &mut CameraState) {
        state.weight = self.weight;
        state.angle_x = self.angle_x;
    }
}

fn sign(v: f64) -> f64 {
    if v > 0.0 { 1.0 } else { -1.0 }
}

impl PointerConfig {
    /// Horizontal offset from center drives yaw speed (cubic), vertical offset drives pitch (quadratic).
    ///
    /// Returns `None` for an event with a non-finite coordinate; such events are dropped.
    pub fn control(&self, event: &PointerEvent) -> Option<CameraControl> {
        let (center_x, center_y) = event.surface.center();
        let dx = center_x - event.x;
        let dy = center_y - event.y;
        if !(dx.is_finite() && dy.is_finite()) {
            tracing::debug!(x = event.x, y = event.y, "ignoring non-finite pointer event");
            return None;
        }
        let weight = sign(dx) * self.max_weight * ease_in_cubic((dx.abs() / self.range).min(1.0));
        let angle_x = sign(dy) * self.max_pitch * ease_in_quad((dy.abs() / self.range).min(1.0));
        tracing::trace!(dx, dy, weight, angle_x, "pointer moved");
        Some(CameraControl { weight, angle_x })
    }
}
