//! Lattice layouts: square and hexagonal cell enumeration with radial distances.
//!
//! # Invariants
//! - Enumeration is a pure function of the layout parameters.
//! - Cell order carries no meaning; consumers must not depend on it.

mod layout;

pub use layout::{GridCell, GridLayout, Lattice, MAX_CELLS, MAX_SPAN};

/// Errors from layout validation.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum LayoutError {
    #[error("invalid layout configuration: {0}")]
    InvalidConfiguration(String),
}

pub fn crate_info() -> &'static str {
    "lattice-grid v0.1.0"
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn crate_loads() {
        assert!(crate_info().contains("grid"));
    }
}
