//! Shared types for the lattice workspace: camera state, surface size, angle helpers.

mod types;

pub use types::{CameraState, SurfaceSize, deg_to_rad, wrap_degrees};

pub fn crate_info() -> &'static str {
    "lattice-common v0.1.0"
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn crate_loads() {
        assert!(crate_info().contains("common"));
    }
}
