use lattice_common::deg_to_rad;
use lattice_grid::GridCell;
use lattice_math::{Easing, Matrix4};
use serde::{Deserialize, Serialize};

use crate::RenderError;
use crate::renderer::{DrawRequest, Topology};

/// How the cosine wave maps onto instance height.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PhaseMode {
    /// `cos(..)`: instances sink below the plane as well as rise.
    #[default]
    Signed,
    /// `1 + cos(..)`: instances only rise.
    Offset,
}

/// Wave and falloff parameters for a scene.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AnimationConfig {
    /// Distance at which the wave has fully decayed.
    pub falloff_radius: f64,
    /// Peak height at the origin.
    pub amplitude: f64,
    /// Degrees of phase per world unit of radial distance.
    pub phase_constant: f64,
    #[serde(default)]
    pub phase_mode: PhaseMode,
    #[serde(default)]
    pub falloff_easing: Easing,
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self {
            falloff_radius: 200.0,
            amplitude: 20.0,
            phase_constant: 5.0,
            phase_mode: PhaseMode::Signed,
            falloff_easing: Easing::OutQuart,
        }
    }
}

impl AnimationConfig {
    pub fn validate(&self) -> Result<(), RenderError> {
        if !(self.falloff_radius.is_finite() && self.falloff_radius > 0.0) {
            return Err(RenderError::InvalidConfiguration(format!(
                "falloff radius must be positive, got {}",
                self.falloff_radius
            )));
        }
        if !self.amplitude.is_finite() || !self.phase_constant.is_finite() {
            return Err(RenderError::InvalidConfiguration(format!(
                "amplitude ({}) and phase constant ({}) must be finite",
                self.amplitude, self.phase_constant
            )));
        }
        Ok(())
    }
}

/// Turns grid cells into per-instance draw requests.
///
/// Every instance shares one base geometry; only the model matrix differs.
#[derive(Debug, Clone, Copy)]
pub struct InstanceAnimator {
    config: AnimationConfig,
    vertex_count: u32,
}

impl InstanceAnimator {
    pub fn new(config: AnimationConfig, vertex_count: u32) -> Result<Self, RenderError> {
        config.validate()?;
        Ok(Self {
            config,
            vertex_count,
        })
    }

    pub fn config(&self) -> &AnimationConfig {
        &self.config
    }

    pub fn vertex_count(&self) -> u32 {
        self.vertex_count
    }

    /// Eased falloff weight: 1 at the origin, 0 at and beyond `falloff_radius`.
    pub fn falloff(&self, r: f64) -> f64 {
        let t_norm = (1.0 - r / self.config.falloff_radius).clamp(0.0, 1.0);
        self.config.falloff_easing.apply(t_norm)
    }

    pub fn phase(&self, r: f64, spin_degrees: f64) -> f64 {
        let wave = deg_to_rad(self.config.phase_constant * r + spin_degrees).cos();
        match self.config.phase_mode {
            PhaseMode::Signed => wave,
            PhaseMode::Offset => 1.0 + wave,
        }
    }

    pub fn height(&self, cell: &GridCell, spin_degrees: f64) -> f64 {
        self.falloff(cell.r) * self.config.amplitude * self.phase(cell.r, spin_degrees)
    }

    /// `view_projection * translation(world_x, height, world_z)`.
    pub fn animate(
        &self,
        cell: &GridCell,
        view_projection: &Matrix4,
        spin_degrees: f64,
    ) -> DrawRequest {
        let height = self.height(cell, spin_degrees);
        DrawRequest {
            matrix: view_projection.translate(cell.world_x, height, cell.world_z),
            topology: Topology::Triangles,
            vertex_count: self.vertex_count,
            height,
        }
    }

    /// One draw request per cell, in cell order.
    pub fn animate_all(
        &self,
        cells: &[GridCell],
        view_projection: &Matrix4,
        spin_degrees: f64,
    ) -> Vec<DrawRequest> {
        cells
            .iter()
            .map(|cell| self.animate(cell, view_projection, spin_degrees))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lattice_grid::GridLayout;

    fn cell_at(world_x: f64, world_z: f64) -> GridCell {
        GridCell {
            i: 0,
            j: 0,
            world_x,
            world_z,
            r: world_x.hypot(world_z),
        }
    }

    fn animator(config: AnimationConfig) -> InstanceAnimator {
        InstanceAnimator::new(config, 36).unwrap()
    }

    #[test]
    fn height_vanishes_at_falloff_radius() {
        let anim = animator(AnimationConfig::default());
        let edge = cell_at(200.0, 0.0);
        for spin in [0.0, 45.0, 90.0, 180.0, 359.0] {
            assert_eq!(anim.height(&edge, spin), 0.0);
        }
        assert_eq!(anim.height(&cell_at(300.0, 400.0), 12.0), 0.0);
    }

    #[test]
    fn origin_height_follows_spin() {
        let anim = animator(AnimationConfig::default());
        let origin = cell_at(0.0, 0.0);
        assert!((anim.height(&origin, 0.0) - 20.0).abs() < 1e-12);
        assert!((anim.height(&origin, 180.0) + 20.0).abs() < 1e-12);
        assert!(anim.height(&origin, 90.0).abs() < 1e-12);
    }

    #[test]
    fn offset_phase_never_goes_negative() {
        let anim = animator(AnimationConfig {
            falloff_radius: 270.0,
            phase_constant: 2.0,
            phase_mode: PhaseMode::Offset,
            ..AnimationConfig::default()
        });
        let cells = GridLayout::Hex {
            rows: 8,
            columns: 8,
            spacing: 6.0,
        }
        .cells()
        .unwrap();
        for spin in (0..360).step_by(15) {
            for cell in &cells {
                assert!(anim.height(cell, f64::from(spin)) >= 0.0);
            }
        }
        assert!((anim.height(&cell_at(0.0, 0.0), 0.0) - 40.0).abs() < 1e-12);
    }

    #[test]
    fn falloff_is_eased() {
        let anim = animator(AnimationConfig::default());
        // t_norm = 0.5 -> ease_out_quart(0.5) = 0.9375
        assert!((anim.falloff(100.0) - 0.9375).abs() < 1e-12);
        assert_eq!(anim.falloff(0.0), 1.0);
        assert_eq!(anim.falloff(1000.0), 0.0);
    }

    #[test]
    fn model_matrix_translates_after_view_projection() {
        let anim = animator(AnimationConfig::default());
        let vp = Matrix4::x_rotation(0.3) * Matrix4::translation(0.0, 0.0, -500.0);
        let cell = cell_at(12.0, -8.0);
        let draw = anim.animate(&cell, &vp, 30.0);
        let expected = vp * Matrix4::translation(12.0, draw.height, -8.0);
        assert!(draw.matrix.approx_eq(&expected, 1e-9));
        assert_eq!(draw.vertex_count, 36);
        assert_eq!(draw.topology, Topology::Triangles);
    }

    #[test]
    fn one_draw_per_cell() {
        let anim = animator(AnimationConfig::default());
        let cells = GridLayout::Square { extent: 20, step: 4 }.cells().unwrap();
        let draws = anim.animate_all(&cells, &Matrix4::identity(), 0.0);
        assert_eq!(draws.len(), cells.len());
        assert!(draws.iter().all(|d| d.vertex_count == 36));
    }

    #[test]
    fn invalid_config_rejected() {
        for falloff_radius in [0.0, -5.0, f64::NAN] {
            let config = AnimationConfig {
                falloff_radius,
                ..AnimationConfig::default()
            };
            assert!(matches!(
                InstanceAnimator::new(config, 36),
                Err(RenderError::InvalidConfiguration(_))
            ));
        }
        let config = AnimationConfig {
            amplitude: f64::INFINITY,
            ..AnimationConfig::default()
        };
        assert!(config.validate().is_err());
    }
}
