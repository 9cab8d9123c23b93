//! Procedural base shapes shared by every instance of a scene.
//!
//! Shapes are authored with their base on `y = 0`, then centered on the origin
//! and flipped half a turn about X before upload.

use std::f64::consts::PI;

use lattice_math::{Matrix4, Vector4};
use serde::{Deserialize, Serialize};

use crate::RenderError;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Shape {
    /// Axis-aligned box.
    Column { width: f64, height: f64, depth: f64 },
    /// Hexagonal prism with pointy ends along Z.
    HexPrism { radius: f64, height: f64 },
}

impl Shape {
    pub fn column() -> Self {
        Shape::Column {
            width: 4.0,
            height: 12.0,
            depth: 4.0,
        }
    }

    pub fn hex_prism() -> Self {
        Shape::HexPrism {
            radius: 5.5,
            height: 20.0,
        }
    }

    pub fn validate(&self) -> Result<(), RenderError> {
        let dims = match *self {
            Shape::Column {
                width,
                height,
                depth,
            } => vec![width, height, depth],
            Shape::HexPrism { radius, height } => vec![radius, height],
        };
        if dims.iter().all(|d| d.is_finite() && *d > 0.0) {
            Ok(())
        } else {
            Err(RenderError::InvalidConfiguration(format!(
                "shape dimensions must be positive: {self:?}"
            )))
        }
    }

    pub fn vertex_count(&self) -> u32 {
        match self {
            Shape::Column { .. } => 6 * 6,
            Shape::HexPrism { .. } => (6 + 6 + 12) * 3,
        }
    }

    /// Translate to the origin first, then flip about X.
    pub fn centering_matrix(&self) -> Matrix4 {
        let offset = match *self {
            Shape::Column {
                width,
                height,
                depth,
            } => Matrix4::translation(-width * 0.5, -height * 0.5, -depth * 0.5),
            Shape::HexPrism { height, .. } => Matrix4::translation(0.0, -height * 0.5, 0.0),
        };
        Matrix4::x_rotation(PI) * offset
    }

    /// Triangle-list positions before centering.
    pub fn raw_positions(&self) -> Vec<[f64; 3]> {
        match *self {
            Shape::Column {
                width: w,
                height: h,
                depth: d,
            } => {
                let faces = [
                    [[0.0, 0.0, 0.0], [0.0, h, 0.0], [w, h, 0.0], [w, 0.0, 0.0]],
                    [[0.0, 0.0, d], [w, 0.0, d], [w, h, d], [0.0, h, d]],
                    [[0.0, 0.0, 0.0], [w, 0.0, 0.0], [w, 0.0, d], [0.0, 0.0, d]],
                    [[0.0, h, 0.0], [0.0, h, d], [w, h, d], [w, h, 0.0]],
                    [[0.0, 0.0, 0.0], [0.0, 0.0, d], [0.0, h, d], [0.0, h, 0.0]],
                    [[w, 0.0, 0.0], [w, h, 0.0], [w, h, d], [w, 0.0, d]],
                ];
                faces
                    .iter()
                    .flat_map(|[a, b, c, e]| [*a, *b, *c, *a, *c, *e])
                    .collect()
            }
            Shape::HexPrism {
                radius: r,
                height: h,
            } => {
                let corner = |k: usize, y: f64| {
                    let theta = (k % 6) as f64 * PI / 3.0;
                    [r * theta.sin(), y, r * theta.cos()]
                };
                let mut positions = Vec::with_capacity(self.vertex_count() as usize);
                for k in 0..6 {
                    positions.extend([[0.0, h, 0.0], corner(k, h), corner(k + 1, h)]);
                }
                for k in 0..6 {
                    positions.extend([[0.0, 0.0, 0.0], corner(k + 1, 0.0), corner(k, 0.0)]);
                }
                for k in 0..6 {
                    positions.extend([corner(k, 0.0), corner(k + 1, 0.0), corner(k, h)]);
                    positions.extend([corner(k, h), corner(k + 1, 0.0), corner(k + 1, h)]);
                }
                positions
            }
        }
    }

    /// Centered positions, narrowed to f32 for a vertex buffer.
    pub fn positions(&self) -> Vec<[f32; 3]> {
        let centering = self.centering_matrix();
        self.raw_positions()
            .into_iter()
            .map(|[x, y, z]| {
                let v = Matrix4::vector_multiply(Vector4::point(x, y, z), &centering);
                [v.x as f32, v.y as f32, v.z as f32]
            })
            .collect()
    }

    /// Raw bytes of [`Shape::positions`] for a vertex buffer upload.
    pub fn position_bytes(&self) -> Vec<u8> {
        bytemuck::cast_slice(&self.positions()).to_vec()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bounds(positions: &[[f32; 3]]) -> ([f32; 3], [f32; 3]) {
        let mut min = [f32::MAX; 3];
        let mut max = [f32::MIN; 3];
        for p in positions {
            for axis in 0..3 {
                min[axis] = min[axis].min(p[axis]);
                max[axis] = max[axis].max(p[axis]);
            }
        }
        (min, max)
    }

    /// Asserts every triangle is counter-clockwise seen from outside the centered shape.
    fn assert_faces_point_outward(shape: Shape) {
        let positions = shape.positions();
        for (n, tri) in positions.chunks_exact(3).enumerate() {
            let [a, b, c] = [tri[0], tri[1], tri[2]].map(|p| p.map(f64::from));
            let u = [b[0] - a[0], b[1] - a[1], b[2] - a[2]];
            let v = [c[0] - a[0], c[1] - a[1], c[2] - a[2]];
            let normal = [
                u[1] * v[2] - u[2] * v[1],
                u[2] * v[0] - u[0] * v[2],
                u[0] * v[1] - u[1] * v[0],
            ];
            let centroid = [0, 1, 2].map(|axis| (a[axis] + b[axis] + c[axis]) / 3.0);
            let facing: f64 = (0..3).map(|axis| normal[axis] * centroid[axis]).sum();
            assert!(facing > 1e-6, "{shape:?} triangle {n} faces inward ({facing})");
        }
    }

    #[test]
    fn column_faces_point_outward() {
        assert_faces_point_outward(Shape::column());
        assert_faces_point_outward(Shape::Column {
            width: 1.0,
            height: 3.0,
            depth: 7.0,
        });
    }

    #[test]
    fn prism_faces_point_outward() {
        assert_faces_point_outward(Shape::hex_prism());
    }

    #[test]
    fn vertex_counts() {
        assert_eq!(Shape::column().vertex_count(), 36);
        assert_eq!(Shape::hex_prism().vertex_count(), 72);
        assert_eq!(Shape::column().raw_positions().len(), 36);
        assert_eq!(Shape::hex_prism().raw_positions().len(), 72);
    }

    #[test]
    fn column_is_centered() {
        let (min, max) = bounds(&Shape::column().positions());
        assert!((min[0] + 2.0).abs() < 1e-5 && (max[0] - 2.0).abs() < 1e-5);
        assert!((min[1] + 6.0).abs() < 1e-5 && (max[1] - 6.0).abs() < 1e-5);
        assert!((min[2] + 2.0).abs() < 1e-5 && (max[2] - 2.0).abs() < 1e-5);
    }

    #[test]
    fn prism_is_centered_vertically() {
        let (min, max) = bounds(&Shape::hex_prism().positions());
        assert!((min[1] + 10.0).abs() < 1e-5 && (max[1] - 10.0).abs() < 1e-5);
        assert!((max[2] - 5.5).abs() < 1e-5 && (min[2] + 5.5).abs() < 1e-5);
    }

    #[test]
    fn centering_translates_before_flipping() {
        // The raw base corner (0, 0, 0) ends up on the top after the flip.
        let m = Shape::column().centering_matrix();
        let v = m.transform_point(0.0, 0.0, 0.0);
        assert!((v.x + 2.0).abs() < 1e-12);
        assert!((v.y - 6.0).abs() < 1e-12);
        assert!((v.z - 2.0).abs() < 1e-12);
    }

    #[test]
    fn position_bytes_cover_every_vertex() {
        let shape = Shape::hex_prism();
        assert_eq!(shape.position_bytes().len(), 72 * 3 * 4);
    }

    #[test]
    fn invalid_dimensions_rejected() {
        let shape = Shape::Column {
            width: 0.0,
            height: 1.0,
            depth: 1.0,
        };
        assert!(shape.validate().is_err());
        assert!(Shape::hex_prism().validate().is_ok());
    }
}
