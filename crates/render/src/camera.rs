use lattice_common::{CameraState, deg_to_rad};
use lattice_math::Matrix4;
use serde::{Deserialize, Serialize};

use crate::RenderError;

/// Static projection parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CameraConfig {
    pub fov_degrees: f64,
    pub near: f64,
    pub far: f64,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            fov_degrees: 60.0,
            near: 1.0,
            far: 2000.0,
        }
    }
}

/// Camera that yaws and pitches about the origin, then steps back along its own z axis.
///
/// Orbit angles come from [`CameraState`], which changes every frame; the
/// projection only changes when the surface is resized.
#[derive(Debug, Clone, Copy)]
pub struct OrbitCamera {
    pub config: CameraConfig,
    aspect: f64,
    projection: Matrix4,
}

impl OrbitCamera {
    pub fn new(config: CameraConfig, aspect: f64) -> Result<Self, RenderError> {
        let projection = Matrix4::perspective(
            deg_to_rad(config.fov_degrees),
            aspect,
            config.near,
            config.far,
        )?;
        Ok(Self {
            config,
            aspect,
            projection,
        })
    }

    pub fn aspect(&self) -> f64 {
        self.aspect
    }

    /// Rebuild the projection for a new aspect ratio. Leaves the camera untouched on error.
    pub fn set_aspect(&mut self, aspect: f64) -> Result<(), RenderError> {
        *self = Self::new(self.config, aspect)?;
        Ok(())
    }

    pub fn projection_matrix(&self) -> Matrix4 {
        self.projection
    }

    /// Camera-to-world transform: yaw, then pitch, then translate by `radius` along local z.
    pub fn camera_matrix(&self, state: &CameraState) -> Matrix4 {
        Matrix4::identity()
            .rotate_y(deg_to_rad(state.angle_y))
            .rotate_x(deg_to_rad(state.angle_x))
            .translate(0.0, 0.0, state.radius)
    }

    pub fn view_matrix(&self, state: &CameraState) -> Result<Matrix4, RenderError> {
        self.camera_matrix(state).inverse().map_err(|e| {
            tracing::warn!(?state, "camera matrix inversion failed: {e}");
            RenderError::from(e)
        })
    }

    pub fn view_projection(&self, state: &CameraState) -> Result<Matrix4, RenderError> {
        Ok(self.projection * self.view_matrix(state)?)
    }

    /// World-space eye position.
    pub fn eye(&self, state: &CameraState) -> [f64; 3] {
        let p = self.camera_matrix(state).transform_point(0.0, 0.0, 0.0);
        [p.x, p.y, p.z]
    }
}
