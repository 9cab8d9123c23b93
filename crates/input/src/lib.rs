//! Pointer input mapped to orbit camera control.
//!
//! # Invariants
//! - Input writes only `angle_x` and `weight`; the render loop owns the other angles.

pub mod pointer;

pub use pointer::{CameraControl, PointerConfig, PointerEvent};

pub fn crate_info() -> &'static str {
    "lattice-input v0.1.0"
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn crate_loads() {
        assert!(crate_info().contains("input"));
    }
}
