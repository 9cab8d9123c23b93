//! Transform algebra: 4x4 matrices, homogeneous vectors, easing curves.
//!
//! # Invariants
//! - Matrices are values; no operation mutates its inputs.
//! - `multiply(a, b)` applies `b` first, then `a`. Every helper that post-multiplies
//!   (`translate`, `rotate_x`, ...) follows the same convention.

pub mod easing;
mod matrix;

pub use easing::{Easing, ease_in_cubic, ease_in_quad, ease_out_quart};
pub use matrix::{Matrix4, SINGULAR_EPSILON, Vector4};

/// Errors from matrix construction and inversion.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum MathError {
    #[error("matrix is singular (determinant {determinant:e})")]
    SingularMatrix { determinant: f64 },
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),
}

pub fn crate_info() -> &'static str {
    "lattice-math v0.1.0"
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn crate_loads() {
        assert!(crate_info().contains("math"));
    }

    #[test]
    fn errors_render() {
        let err = MathError::SingularMatrix { determinant: 0.0 };
        assert!(err.to_string().contains("singular"));
        let err = MathError::InvalidConfiguration("near plane must be positive".into());
        assert!(err.to_string().starts_with("invalid configuration"));
    }
}
