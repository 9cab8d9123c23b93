use serde::{Deserialize, Serialize};

use crate::LayoutError;

/// One lattice position: integer coordinates plus its world-space offset on the XZ plane.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridCell {
    pub i: i32,
    pub j: i32,
    pub world_x: f64,
    pub world_z: f64,
    /// Distance from the origin, `sqrt(world_x^2 + world_z^2)`.
    pub r: f64,
}

impl GridCell {
    fn at(i: i32, j: i32, world_x: f64, world_z: f64) -> Self {
        Self {
            i,
            j,
            world_x,
            world_z,
            r: world_x.hypot(world_z),
        }
    }
}

/// Lattice variant and its static parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum GridLayout {
    /// `i, j` in `[-extent, extent]` stepping by `step`; the coordinates are the world offset.
    Square { extent: i32, step: i32 },
    /// Offset-row hexagonal tiling. Rows `j` span `[-rows, rows]`; odd rows are shifted
    /// half a cell and hold one fewer column, so `i` spans `[-columns, columns - (|j| mod 2)]`.
    Hex {
        rows: i32,
        columns: i32,
        spacing: f64,
    },
}

/// Largest lattice a layout may enumerate.
pub const MAX_CELLS: u64 = 1 << 24;

/// Largest extent, row or column count; keeps `2 * n + 1` inside `i32`.
pub const MAX_SPAN: i32 = i32::MAX / 2;

impl GridLayout {
    pub fn validate(&self) -> Result<(), LayoutError> {
        match *self {
            GridLayout::Square { extent, step } => {
                if step <= 0 {
                    return Err(LayoutError::InvalidConfiguration(format!(
                        "square step must be positive, got {step}"
                    )));
                }
                if !(0..=MAX_SPAN).contains(&extent) {
                    return Err(LayoutError::InvalidConfiguration(format!(
                        "square extent must be in [0, {MAX_SPAN}], got {extent}"
                    )));
                }
            }
            GridLayout::Hex {
                rows,
                columns,
                spacing,
            } => {
                if !((0..=MAX_SPAN).contains(&rows) && (0..=MAX_SPAN).contains(&columns)) {
                    return Err(LayoutError::InvalidConfiguration(format!(
                        "hex rows and columns must be in [0, {MAX_SPAN}], got {rows}x{columns}"
                    )));
                }
                if !(spacing.is_finite() && spacing > 0.0) {
                    return Err(LayoutError::InvalidConfiguration(format!(
                        "hex spacing must be positive, got {spacing}"
                    )));
                }
            }
        }
        match self.checked_count() {
            Some(count) if count <= MAX_CELLS => Ok(()),
            _ => Err(LayoutError::InvalidConfiguration(format!(
                "{self:?} enumerates more than {MAX_CELLS} cells"
            ))),
        }
    }

    /// Cell count in `u64`, `None` on overflow. Assumes non-negative parameters.
    fn checked_count(&self) -> Option<u64> {
        match *self {
            GridLayout::Square { extent, step } => {
                let side = u64::try_from(2 * i64::from(extent) / i64::from(step) + 1).ok()?;
                side.checked_mul(side)
            }
            GridLayout::Hex { rows, columns, .. } => {
                let rows = u64::try_from(rows).ok()?;
                let columns = u64::try_from(columns).ok()?;
                // Rows with odd |j| hold one fewer cell.
                let odd_rows = rows.div_ceil(2) * 2;
                let even_rows = 2 * rows + 1 - odd_rows;
                let wide = even_rows.checked_mul(2 * columns + 1)?;
                let narrow = odd_rows.checked_mul(2 * columns)?;
                wide.checked_add(narrow)
            }
        }
    }

    /// Number of cells the layout enumerates, without building them.
    pub fn cell_count(&self) -> Result<usize, LayoutError> {
        self.validate()?;
        self.checked_count()
            .and_then(|count| usize::try_from(count).ok())
            .ok_or_else(|| {
                LayoutError::InvalidConfiguration(format!("{self:?} cell count overflows"))
            })
    }

    /// Enumerate every cell. Pure function of the parameters.
    pub fn cells(&self) -> Result<Vec<GridCell>, LayoutError> {
        let mut cells = Vec::with_capacity(self.cell_count()?);
        match *self {
            GridLayout::Square { extent, step } => {
                let step = step as usize;
                for i in (-extent..=extent).step_by(step) {
                    for j in (-extent..=extent).step_by(step) {
                        cells.push(GridCell::at(i, j, f64::from(i), f64::from(j)));
                    }
                }
            }
            GridLayout::Hex {
                rows,
                columns,
                spacing,
            } => {
                let pitch = spacing * 3.0_f64.sqrt();
                for j in -rows..=rows {
                    let odd = j.abs() % 2;
                    for i in -columns..=columns - odd {
                        let world_x = (f64::from(odd) * 0.5 + f64::from(i)) * pitch;
                        let world_z = 1.5 * f64::from(j) * spacing;
                        cells.push(GridCell::at(i, j, world_x, world_z));
                    }
                }
            }
        }
        Ok(cells)
    }
}

/// The enumerated cells of one layout, built once and read-only afterwards.
#[derive(Debug, Clone)]
pub struct Lattice {
    layout: GridLayout,
    cells: Vec<GridCell>,
    max_radius: f64,
}

impl Lattice {
    pub fn build(layout: GridLayout) -> Result<Self, LayoutError> {
        let _span = tracing::debug_span!("lattice_build").entered();
        let cells = layout.cells()?;
        let max_radius = cells.iter().map(|c| c.r).fold(0.0, f64::max);
        tracing::debug!(?layout, cells = cells.len(), max_radius, "lattice built");
        Ok(Self {
            layout,
            cells,
            max_radius,
        })
    }

    pub fn layout(&self) -> &GridLayout {
        &self.layout
    }

    pub fn cells(&self) -> &[GridCell] {
        &self.cells
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Largest radial distance of any cell.
    pub fn max_radius(&self) -> f64 {
        self.max_radius
    }

    /// Cells whose radial distance is strictly below `radius`.
    pub fn cells_within(&self, radius: f64) -> impl Iterator<Item = &GridCell> {
        self.cells.iter().filter(move |c| c.r < radius)
    }
}
