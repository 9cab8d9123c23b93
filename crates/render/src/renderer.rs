use std::fmt::Write;

use lattice_math::Matrix4;

/// Primitive assembly for a draw.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Topology {
    Triangles,
}

/// One instance draw: the full model-view-projection matrix plus shared geometry size.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DrawRequest {
    pub matrix: Matrix4,
    pub topology: Topology,
    pub vertex_count: u32,
    /// Animated height offset that went into `matrix`.
    pub height: f64,
}

/// Everything one loop iteration produced.
#[derive(Debug, Clone)]
pub struct Frame {
    pub index: u64,
    /// Instantaneous frames per second, `None` when no time elapsed.
    pub fps: Option<f64>,
    pub view_projection: Matrix4,
    pub draws: Vec<DrawRequest>,
}

impl Frame {
    pub fn total_vertices(&self) -> u64 {
        self.draws.iter().map(|d| u64::from(d.vertex_count)).sum()
    }

    /// Lowest and highest instance heights, `None` for an empty frame.
    pub fn height_range(&self) -> Option<(f64, f64)> {
        self.draws.iter().map(|d| d.height).fold(None, |acc, h| match acc {
            None => Some((h, h)),
            Some((lo, hi)) => Some((lo.min(h), hi.max(h))),
        })
    }
}

/// Renderer-agnostic interface. All renderers implement this trait.
///
/// A renderer consumes the draw requests of a frame in order. It never
/// feeds back into camera or animation state.
pub trait Renderer {
    /// The output type produced by this renderer.
    type Output;

    /// Submit one frame.
    fn render(&mut self, frame: &Frame) -> Self::Output;
}

/// Produces a human-readable summary of a frame.
///
/// Useful for CLI output, logging, and testing the render interface.
#[derive(Debug, Clone)]
pub struct DebugTextRenderer {
    /// Number of draw requests listed individually.
    pub max_listed: usize,
}

impl Default for DebugTextRenderer {
    fn default() -> Self {
        Self { max_listed: 8 }
    }
}

impl DebugTextRenderer {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Renderer for DebugTextRenderer {
    type Output = String;

    fn render(&mut self, frame: &Frame) -> String {
        let mut out = String::new();
        let fps = frame
            .fps
            .map_or_else(|| "n/a".to_string(), |fps| format!("{fps:.0}"));
        let _ = writeln!(out, "=== Frame {} ({fps} fps) ===", frame.index);
        let _ = writeln!(
            out,
            "Draws: {}  Vertices: {}",
            frame.draws.len(),
            frame.total_vertices()
        );
        if let Some((lo, hi)) = frame.height_range() {
            let _ = writeln!(out, "Heights: [{lo:.2}, {hi:.2}]");
        }

        for (n, draw) in frame.draws.iter().take(self.max_listed).enumerate() {
            let origin = draw.matrix.transform_point(0.0, 0.0, 0.0);
            let _ = writeln!(
                out,
                "  [{n}] h={:.2} clip=({:.3}, {:.3}, {:.3}, {:.3}) verts={}",
                draw.height, origin.x, origin.y, origin.z, origin.w, draw.vertex_count
            );
        }
        if frame.draws.len() > self.max_listed {
            let _ = writeln!(out, "  ... {} more", frame.draws.len() - self.max_listed);
        }

        out
    }
}

/// Per-frame record kept by [`RecordingRenderer`].
#[derive(Debug, Clone, PartialEq)]
pub struct FrameRecord {
    pub index: u64,
    pub fps: Option<f64>,
    pub draw_count: usize,
    pub total_vertices: u64,
}

/// Keeps a summary of every frame it is handed, plus the matrix uniforms of the latest frame
/// exactly as they would be uploaded.
#[derive(Debug, Default)]
pub struct RecordingRenderer {
    records: Vec<FrameRecord>,
    uniforms: Vec<[u8; 64]>,
}

impl RecordingRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn records(&self) -> &[FrameRecord] {
        &self.records
    }

    /// One 64-byte `mat4` payload per draw of the most recent frame.
    pub fn last_uniforms(&self) -> &[[u8; 64]] {
        &self.uniforms
    }
}

impl Renderer for RecordingRenderer {
    type Output = ();

    fn render(&mut self, frame: &Frame) {
        self.records.push(FrameRecord {
            index: frame.index,
            fps: frame.fps,
            draw_count: frame.draws.len(),
            total_vertices: frame.total_vertices(),
        });
        self.uniforms.clear();
        self.uniforms
            .extend(frame.draws.iter().map(|draw| draw.matrix.to_uniform_bytes()));
    }
}
