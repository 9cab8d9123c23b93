use lattice_grid::GridLayout;
use lattice_input::PointerConfig;
use lattice_render::{AnimationConfig, CameraConfig, OrbitCamera, PhaseMode, Shape};
use serde::{Deserialize, Serialize};

use crate::SceneError;

/// Every static parameter of a scene. Validated once, before the loop starts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneConfig {
    pub name: String,
    pub layout: GridLayout,
    pub shape: Shape,
    #[serde(default)]
    pub camera: CameraConfig,
    pub animation: AnimationConfig,
    #[serde(default)]
    pub pointer: PointerConfig,
    /// Orbit distance of the camera from the origin.
    pub radius: f64,
    /// Spin advance in degrees per frame. Tied to the refresh rate, not to elapsed time.
    #[serde(default = "default_spin_increment")]
    pub spin_increment: f64,
}

fn default_spin_increment() -> f64 {
    5.0
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self::square_columns()
    }
}

impl SceneConfig {
    /// Square grid of columns.
    pub fn square_columns() -> Self {
        Self {
            name: "square-columns".into(),
            layout: GridLayout::Square {
                extent: 200,
                step: 4,
            },
            shape: Shape::column(),
            camera: CameraConfig::default(),
            animation: AnimationConfig {
                falloff_radius: 200.0,
                amplitude: 20.0,
                phase_constant: 5.0,
                phase_mode: PhaseMode::Signed,
                ..AnimationConfig::default()
            },
            pointer: PointerConfig::default(),
            radius: 500.0,
            spin_increment: default_spin_increment(),
        }
    }

    /// Hexagonal grid of prisms.
    pub fn hex_prisms() -> Self {
        Self {
            name: "hex-prisms".into(),
            layout: GridLayout::Hex {
                rows: 30,
                columns: 27,
                spacing: 6.0,
            },
            shape: Shape::hex_prism(),
            camera: CameraConfig::default(),
            animation: AnimationConfig {
                falloff_radius: 270.0,
                amplitude: 20.0,
                phase_constant: 2.0,
                phase_mode: PhaseMode::Offset,
                ..AnimationConfig::default()
            },
            pointer: PointerConfig::default(),
            radius: 700.0,
            spin_increment: default_spin_increment(),
        }
    }

    /// Look up a preset by name (`square` or `hex`, or the full preset name).
    pub fn preset(name: &str) -> Option<Self> {
        match name {
            "square" | "square-columns" => Some(Self::square_columns()),
            "hex" | "hex-prisms" => Some(Self::hex_prisms()),
            _ => None,
        }
    }

    pub fn from_yaml_str(text: &str) -> Result<Self, SceneError> {
        let config: Self = serde_yaml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_json_str(text: &str) -> Result<Self, SceneError> {
        let config: Self = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_yaml(&self) -> Result<String, SceneError> {
        Ok(serde_yaml::to_string(self)?)
    }

    pub fn to_json(&self) -> Result<String, SceneError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn validate(&self) -> Result<(), SceneError> {
        self.layout.validate()?;
        self.shape.validate()?;
        self.animation.validate()?;
        OrbitCamera::new(self.camera, 1.0)?;
        if !(self.radius.is_finite() && self.radius > 0.0) {
            return Err(SceneError::InvalidConfiguration(format!(
                "camera radius must be positive, got {}",
                self.radius
            )));
        }
        if !self.spin_increment.is_finite() {
            return Err(SceneError::InvalidConfiguration(format!(
                "spin increment must be finite, got {}",
                self.spin_increment
            )));
        }
        let pointer = &self.pointer;
        if !(pointer.range.is_finite() && pointer.range > 0.0)
            || !pointer.max_weight.is_finite()
            || !pointer.max_pitch.is_finite()
        {
            return Err(SceneError::InvalidConfiguration(format!(
                "pointer tuning must be finite with a positive range: {pointer:?}"
            )));
        }
        Ok(())
    }
}
