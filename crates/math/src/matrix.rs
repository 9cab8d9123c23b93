use std::ops::Mul;

use glam::{DMat4, Mat4};

use crate::MathError;

/// Determinant magnitude below which a matrix is treated as singular.
pub const SINGULAR_EPSILON: f64 = 1e-9;

/// A 4x4 transform stored column-major: element (row `r`, column `c`) lives at
/// index `c * 4 + r`, the same layout a GPU `mat4` uniform expects.
///
/// Matrices are plain values. Every operation returns a new matrix and
/// composition reads right-to-left: `multiply(a, b)` applies `b` first, then `a`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Matrix4 {
    cols: [f64; 16],
}

/// A homogeneous vector used as an operand to [`Matrix4::vector_multiply`].
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Vector4 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
    pub w: f64,
}

impl Vector4 {
    pub const fn new(x: f64, y: f64, z: f64, w: f64) -> Self {
        Self { x, y, z, w }
    }

    /// A point (w = 1).
    pub const fn point(x: f64, y: f64, z: f64) -> Self {
        Self::new(x, y, z, 1.0)
    }

    pub fn to_array(self) -> [f64; 4] {
        [self.x, self.y, self.z, self.w]
    }

    /// Divide through by `w`. Returns `None` when `w` is zero.
    pub fn perspective_divide(self) -> Option<[f64; 3]> {
        if self.w == 0.0 {
            return None;
        }
        Some([self.x / self.w, self.y / self.w, self.z / self.w])
    }
}

impl Default for Matrix4 {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Matrix4 {
    #[rustfmt::skip]
    pub const IDENTITY: Self = Self {
        cols: [
            1.0, 0.0, 0.0, 0.0,
            0.0, 1.0, 0.0, 0.0,
            0.0, 0.0, 1.0, 0.0,
            0.0, 0.0, 0.0, 1.0,
        ],
    };

    pub fn identity() -> Self {
        Self::IDENTITY
    }

    pub const fn from_cols_array(cols: [f64; 16]) -> Self {
        Self { cols }
    }

    /// Build from rows as they would be written on paper.
    pub fn from_rows(rows: [[f64; 4]; 4]) -> Self {
        let mut cols = [0.0; 16];
        for (r, row) in rows.iter().enumerate() {
            for (c, value) in row.iter().enumerate() {
                cols[c * 4 + r] = *value;
            }
        }
        Self { cols }
    }

    pub fn to_cols_array(&self) -> [f64; 16] {
        self.cols
    }

    /// Column-major f32 components, narrowed through glam's `Mat4`.
    pub fn to_cols_array_f32(&self) -> [f32; 16] {
        self.as_mat4().to_cols_array()
    }

    /// The 64-byte column-major f32 payload for a `mat4` uniform.
    pub fn to_uniform_bytes(&self) -> [u8; 64] {
        bytemuck::cast(self.to_cols_array_f32())
    }

    pub fn get(&self, row: usize, col: usize) -> f64 {
        self.cols[col * 4 + row]
    }

    fn rows(&self) -> [[f64; 4]; 4] {
        let mut rows = [[0.0; 4]; 4];
        for (r, row) in rows.iter_mut().enumerate() {
            for (c, value) in row.iter_mut().enumerate() {
                *value = self.get(r, c);
            }
        }
        rows
    }

    /// Composed transform `a * b`: applies `b`, then `a`.
    pub fn multiply(a: &Self, b: &Self) -> Self {
        let mut cols = [0.0; 16];
        for c in 0..4 {
            for r in 0..4 {
                cols[c * 4 + r] = (0..4).map(|k| a.get(r, k) * b.get(k, c)).sum();
            }
        }
        Self { cols }
    }

    pub fn transpose(&self) -> Self {
        let mut cols = [0.0; 16];
        for r in 0..4 {
            for c in 0..4 {
                cols[c * 4 + r] = self.get(c, r);
            }
        }
        Self { cols }
    }

    /// Symmetric OpenGL-style perspective projection (clip z in `[-w, w]`).
    pub fn perspective(
        fov_y_radians: f64,
        aspect: f64,
        near: f64,
        far: f64,
    ) -> Result<Self, MathError> {
        if !(fov_y_radians.is_finite() && aspect.is_finite() && near.is_finite() && far.is_finite())
        {
            return Err(MathError::InvalidConfiguration(format!(
                "perspective parameters must be finite (fov={fov_y_radians}, aspect={aspect}, near={near}, far={far})"
            )));
        }
        if fov_y_radians <= 0.0 || fov_y_radians >= std::f64::consts::PI {
            return Err(MathError::InvalidConfiguration(format!(
                "field of view must be in (0, pi), got {fov_y_radians}"
            )));
        }
        if aspect <= 0.0 {
            return Err(MathError::InvalidConfiguration(format!(
                "aspect ratio must be positive, got {aspect}"
            )));
        }
        if near <= 0.0 {
            return Err(MathError::InvalidConfiguration(format!(
                "near plane must be positive, got {near}"
            )));
        }
        if far <= near {
            return Err(MathError::InvalidConfiguration(format!(
                "far plane ({far}) must lie beyond near plane ({near})"
            )));
        }

        let f = (std::f64::consts::FRAC_PI_2 - 0.5 * fov_y_radians).tan();
        let range_inv = 1.0 / (near - far);

        #[rustfmt::skip]
        let cols = [
            f / aspect, 0.0, 0.0, 0.0,
            0.0, f, 0.0, 0.0,
            0.0, 0.0, (near + far) * range_inv, -1.0,
            0.0, 0.0, near * far * range_inv * 2.0, 0.0,
        ];
        Ok(Self { cols })
    }

    #[rustfmt::skip]
    pub fn translation(tx: f64, ty: f64, tz: f64) -> Self {
        Self {
            cols: [
                1.0, 0.0, 0.0, 0.0,
                0.0, 1.0, 0.0, 0.0,
                0.0, 0.0, 1.0, 0.0,
                tx, ty, tz, 1.0,
            ],
        }
    }

    #[rustfmt::skip]
    pub fn x_rotation(radians: f64) -> Self {
        let (s, c) = radians.sin_cos();
        Self {
            cols: [
                1.0, 0.0, 0.0, 0.0,
                0.0, c, s, 0.0,
                0.0, -s, c, 0.0,
                0.0, 0.0, 0.0, 1.0,
            ],
        }
    }

    #[rustfmt::skip]
    pub fn y_rotation(radians: f64) -> Self {
        let (s, c) = radians.sin_cos();
        Self {
            cols: [
                c, 0.0, -s, 0.0,
                0.0, 1.0, 0.0, 0.0,
                s, 0.0, c, 0.0,
                0.0, 0.0, 0.0, 1.0,
            ],
        }
    }

    #[rustfmt::skip]
    pub fn z_rotation(radians: f64) -> Self {
        let (s, c) = radians.sin_cos();
        Self {
            cols: [
                c, s, 0.0, 0.0,
                -s, c, 0.0, 0.0,
                0.0, 0.0, 1.0, 0.0,
                0.0, 0.0, 0.0, 1.0,
            ],
        }
    }

    /// `self * translation(tx, ty, tz)`.
    pub fn translate(&self, tx: f64, ty: f64, tz: f64) -> Self {
        Self::multiply(self, &Self::translation(tx, ty, tz))
    }

    /// `self * x_rotation(radians)`.
    pub fn rotate_x(&self, radians: f64) -> Self {
        Self::multiply(self, &Self::x_rotation(radians))
    }

    /// `self * y_rotation(radians)`.
    pub fn rotate_y(&self, radians: f64) -> Self {
        Self::multiply(self, &Self::y_rotation(radians))
    }

    /// `self * z_rotation(radians)`.
    pub fn rotate_z(&self, radians: f64) -> Self {
        Self::multiply(self, &Self::z_rotation(radians))
    }

    /// Transform a homogeneous vector: `m * v`.
    pub fn vector_multiply(v: Vector4, m: &Self) -> Vector4 {
        let v = v.to_array();
        let mut out = [0.0; 4];
        for (r, value) in out.iter_mut().enumerate() {
            *value = (0..4).map(|c| m.get(r, c) * v[c]).sum();
        }
        Vector4::new(out[0], out[1], out[2], out[3])
    }

    pub fn transform_point(&self, x: f64, y: f64, z: f64) -> Vector4 {
        Self::vector_multiply(Vector4::point(x, y, z), self)
    }

    pub fn determinant(&self) -> f64 {
        eliminate(self).0
    }

    /// Matrix inverse. Fails when `|det| < SINGULAR_EPSILON`.
    pub fn inverse(&self) -> Result<Self, MathError> {
        match eliminate(self) {
            (determinant, Some(inverse)) if determinant.abs() >= SINGULAR_EPSILON => Ok(inverse),
            (determinant, _) => Err(MathError::SingularMatrix { determinant }),
        }
    }

    /// Component-wise comparison within `tolerance`.
    pub fn approx_eq(&self, other: &Self, tolerance: f64) -> bool {
        self.cols
            .iter()
            .zip(other.cols.iter())
            .all(|(a, b)| (a - b).abs() <= tolerance)
    }

    pub fn as_mat4(&self) -> Mat4 {
        DMat4::from(*self).as_mat4()
    }
}

/// Gauss-Jordan elimination with partial pivoting.
///
/// Returns the determinant and, when no pivot vanished, the inverse.
fn eliminate(m: &Matrix4) -> (f64, Option<Matrix4>) {
    let mut a = m.rows();
    let mut inv = Matrix4::IDENTITY.rows();
    let mut determinant = 1.0;

    for col in 0..4 {
        let pivot = (col..4)
            .max_by(|&x, &y| a[x][col].abs().total_cmp(&a[y][col].abs()))
            .unwrap_or(col);
        if a[pivot][col] == 0.0 {
            return (0.0, None);
        }
        if pivot != col {
            a.swap(pivot, col);
            inv.swap(pivot, col);
            determinant = -determinant;
        }

        let p = a[col][col];
        determinant *= p;
        for k in 0..4 {
            a[col][k] /= p;
            inv[col][k] /= p;
        }

        for r in 0..4 {
            if r == col {
                continue;
            }
            let factor = a[r][col];
            if factor == 0.0 {
                continue;
            }
            for k in 0..4 {
                a[r][k] -= factor * a[col][k];
                inv[r][k] -= factor * inv[col][k];
            }
        }
    }

    (determinant, Some(Matrix4::from_rows(inv)))
}

impl Mul for Matrix4 {
    type Output = Matrix4;

    fn mul(self, rhs: Matrix4) -> Matrix4 {
        Matrix4::multiply(&self, &rhs)
    }
}

impl Mul<Vector4> for Matrix4 {
    type Output = Vector4;

    fn mul(self, rhs: Vector4) -> Vector4 {
        Matrix4::vector_multiply(rhs, &self)
    }
}

impl From<Matrix4> for DMat4 {
    fn from(m: Matrix4) -> Self {
        DMat4::from_cols_array(&m.cols)
    }
}
