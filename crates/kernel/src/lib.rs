//! Scene kernel: configuration and the frame-driven render loop.
//!
//! # Invariants
//! - Camera state is owned by the loop; pointer input and frames mutate it in turn, never together.
//! - The lattice is enumerated once per scene and never changes while running.
//! - Angles advance per frame; elapsed time only feeds the reported frame rate.

mod config;
pub mod driver;

pub use config::SceneConfig;
pub use driver::{LoopState, RenderLoop};

use lattice_grid::LayoutError;
use lattice_render::RenderError;

/// Errors from scene setup and the render loop.
#[derive(Debug, thiserror::Error)]
pub enum SceneError {
    #[error(transparent)]
    Layout(#[from] LayoutError),
    #[error(transparent)]
    Render(#[from] RenderError),
    #[error("invalid scene configuration: {0}")]
    InvalidConfiguration(String),
    #[error("render loop has not been started")]
    NotRunning,
    #[error("render loop is already running")]
    AlreadyRunning,
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub fn crate_info() -> &'static str {
    "lattice-kernel v0.1.0"
}
