use serde::{Deserialize, Serialize};

/// Orbit camera state shared by the render loop and the pointer handler.
///
/// Angles are degrees. `angle_y` and `angle_z` are advanced every frame and
/// always stay in `[0, 360)`; `angle_x` and `weight` are written by pointer input.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CameraState {
    /// Pitch, set directly from pointer height.
    pub angle_x: f64,
    /// Yaw, advanced by `weight` each frame.
    pub angle_y: f64,
    /// Spin phase driving the lattice wave, advanced by a fixed increment each frame.
    pub angle_z: f64,
    /// Orbit distance from the origin.
    pub radius: f64,
    /// Signed yaw speed in degrees per frame.
    pub weight: f64,
}

impl Default for CameraState {
    fn default() -> Self {
        Self::with_radius(500.0)
    }
}

impl CameraState {
    pub fn with_radius(radius: f64) -> Self {
        Self {
            angle_x: 0.0,
            angle_y: 0.0,
            angle_z: 0.0,
            radius,
            weight: 0.0,
        }
    }

    /// Advance yaw by `weight` and spin by `spin_increment`, wrapping both into `[0, 360)`.
    pub fn advance(&mut self, spin_increment: f64) {
        self.angle_y = wrap_degrees(self.angle_y + self.weight);
        self.angle_z = wrap_degrees(self.angle_z + spin_increment);
    }
}

/// Drawable surface size in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SurfaceSize {
    pub width: f64,
    pub height: f64,
}

impl Default for SurfaceSize {
    fn default() -> Self {
        Self {
            width: 1280.0,
            height: 720.0,
        }
    }
}

impl SurfaceSize {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    pub fn center(&self) -> (f64, f64) {
        (self.width * 0.5, self.height * 0.5)
    }

    /// Width over height. `None` for a degenerate surface.
    pub fn aspect(&self) -> Option<f64> {
        let aspect = self.width / self.height;
        (aspect.is_finite() && aspect > 0.0).then_some(aspect)
    }
}

pub fn deg_to_rad(degrees: f64) -> f64 {
    degrees * std::f64::consts::PI / 180.0
}

/// Wrap an angle into `[0, 360)` for either sign.
pub fn wrap_degrees(degrees: f64) -> f64 {
    let wrapped = degrees.rem_euclid(360.0);
    // rem_euclid rounds tiny negative inputs up to exactly 360.
    if wrapped >= 360.0 { 0.0 } else { wrapped }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    #[test]
    fn wrap_handles_both_signs() {
        assert_eq!(wrap_degrees(0.0), 0.0);
        assert_eq!(wrap_degrees(360.0), 0.0);
        assert_eq!(wrap_degrees(365.0), 5.0);
        assert_eq!(wrap_degrees(-5.0), 355.0);
        assert_eq!(wrap_degrees(-720.0), 0.0);
        assert_eq!(wrap_degrees(-1e-20), 0.0);
    }

    #[test]
    fn advance_keeps_angles_in_range() {
        let mut rng = StdRng::seed_from_u64(360);
        let mut state = CameraState::default();
        for _ in 0..10_000 {
            state.weight = rng.random_range(-400.0..400.0);
            state.advance(rng.random_range(-1000.0..1000.0));
            assert!((0.0..360.0).contains(&state.angle_y), "{}", state.angle_y);
            assert!((0.0..360.0).contains(&state.angle_z), "{}", state.angle_z);
        }
    }

    #[test]
    fn advance_applies_weight_and_spin() {
        let mut state = CameraState::with_radius(700.0);
        state.weight = -4.0;
        state.advance(5.0);
        assert_eq!(state.angle_y, 356.0);
        assert_eq!(state.angle_z, 5.0);
        assert_eq!(state.radius, 700.0);
    }

    #[test]
    fn degrees_to_radians() {
        assert!((deg_to_rad(180.0) - std::f64::consts::PI).abs() < 1e-15);
        assert!((deg_to_rad(-60.0) + std::f64::consts::FRAC_PI_3).abs() < 1e-15);
    }

    #[test]
    fn surface_center_and_aspect() {
        let surface = SurfaceSize::new(800.0, 400.0);
        assert_eq!(surface.center(), (400.0, 200.0));
        assert_eq!(surface.aspect(), Some(2.0));
        assert_eq!(SurfaceSize::new(800.0, 0.0).aspect(), None);
        assert_eq!(SurfaceSize::new(0.0, 400.0).aspect(), None);
    }
}
