//! Rendering adapter: orbit camera, per-instance animation, base geometry, and a
//! renderer-agnostic draw interface.
//!
//! # Invariants
//! - Renderers consume frames; they never mutate camera or animation state.
//! - Each draw renders the same base geometry; only the matrix varies.
//! - GPU program setup and buffer upload belong to the host.

mod animator;
mod camera;
pub mod geometry;
mod renderer;

pub use animator::{AnimationConfig, InstanceAnimator, PhaseMode};
pub use camera::{CameraConfig, OrbitCamera};
pub use geometry::Shape;
pub use renderer::{
    DebugTextRenderer, DrawRequest, Frame, FrameRecord, RecordingRenderer, Renderer, Topology,
};

use lattice_math::MathError;

/// Errors from camera, animation, and geometry setup.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum RenderError {
    #[error(transparent)]
    Math(#[from] MathError),
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),
}

pub fn crate_info() -> &'static str {
    "lattice-render v0.1.0"
}
