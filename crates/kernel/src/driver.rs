use std::time::{Duration, Instant};

use lattice_common::{CameraState, SurfaceSize};
use lattice_grid::Lattice;
use lattice_input::{CameraControl, PointerEvent};
use lattice_render::{Frame, InstanceAnimator, OrbitCamera, Renderer};

use crate::SceneError;
use crate::config::SceneConfig;

/// Lifecycle of the loop. There is no terminal state: the host stops calling [`RenderLoop::frame`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopState {
    Idle,
    Running,
}

/// Frame-driven scene driver.
///
/// Owns the camera state and the enumerated lattice. The host calls
/// [`RenderLoop::frame`] once per display refresh and forwards pointer moves
/// to [`RenderLoop::pointer_moved`]; both take `&mut self`, so they never overlap.
#[derive(Debug)]
pub struct RenderLoop {
    config: SceneConfig,
    lattice: Lattice,
    animator: InstanceAnimator,
    camera: OrbitCamera,
    state: CameraState,
    surface: SurfaceSize,
    loop_state: LoopState,
    last_frame: Option<Instant>,
    frame_index: u64,
}

fn aspect_of(surface: SurfaceSize) -> Result<f64, SceneError> {
    surface.aspect().ok_or_else(|| {
        SceneError::InvalidConfiguration(format!(
            "surface {}x{} has no usable aspect ratio",
            surface.width, surface.height
        ))
    })
}

impl RenderLoop {
    pub fn new(config: SceneConfig, surface: SurfaceSize) -> Result<Self, SceneError> {
        config.validate()?;
        let lattice = Lattice::build(config.layout)?;
        let animator = InstanceAnimator::new(config.animation, config.shape.vertex_count())?;
        let camera = OrbitCamera::new(config.camera, aspect_of(surface)?)?;
        tracing::debug!(
            scene = %config.name,
            cells = lattice.len(),
            vertices = animator.vertex_count(),
            "scene configured"
        );
        Ok(Self {
            state: CameraState::with_radius(config.radius),
            config,
            lattice,
            animator,
            camera,
            surface,
            loop_state: LoopState::Idle,
            last_frame: None,
            frame_index: 0,
        })
    }

    pub fn config(&self) -> &SceneConfig {
        &self.config
    }

    pub fn lattice(&self) -> &Lattice {
        &self.lattice
    }

    pub fn camera_state(&self) -> &CameraState {
        &self.state
    }

    pub fn camera(&self) -> &OrbitCamera {
        &self.camera
    }

    pub fn loop_state(&self) -> LoopState {
        self.loop_state
    }

    /// Frames produced so far.
    pub fn frame_index(&self) -> u64 {
        self.frame_index
    }

    /// `Idle -> Running`. The first frame measures its delta from `now`.
    pub fn start(&mut self, now: Instant) -> Result<(), SceneError> {
        if self.loop_state == LoopState::Running {
            return Err(SceneError::AlreadyRunning);
        }
        self.loop_state = LoopState::Running;
        self.last_frame = Some(now);
        tracing::info!(scene = %self.config.name, cells = self.lattice.len(), "render loop started");
        Ok(())
    }

    /// Run one iteration: advance angles, rebuild the view-projection, animate every cell.
    pub fn frame(&mut self, now: Instant) -> Result<Frame, SceneError> {
        if self.loop_state != LoopState::Running {
            return Err(SceneError::NotRunning);
        }
        let _span = tracing::info_span!("frame", index = self.frame_index + 1).entered();

        let delta = self
            .last_frame
            .map_or(Duration::ZERO, |last| now.saturating_duration_since(last));
        self.last_frame = Some(now);
        let delta_ms = delta.as_secs_f64() * 1000.0;
        let fps = (delta_ms > 0.0).then(|| 1000.0 / delta_ms);

        self.state.advance(self.config.spin_increment);

        let view_projection = self.camera.view_projection(&self.state)?;
        let draws =
            self.animator
                .animate_all(self.lattice.cells(), &view_projection, self.state.angle_z);

        self.frame_index += 1;
        tracing::trace!(
            draws = draws.len(),
            angle_y = self.state.angle_y,
            angle_z = self.state.angle_z,
            ?fps,
            "frame complete"
        );

        Ok(Frame {
            index: self.frame_index,
            fps,
            view_projection,
            draws,
        })
    }

    /// Pointer moved to `(x, y)` on the current surface. Takes effect on the next frame.
    /// Non-finite positions leave the camera untouched.
    pub fn pointer_moved(&mut self, x: f64, y: f64) -> Option<CameraControl> {
        self.handle_pointer(PointerEvent {
            x,
            y,
            surface: self.surface,
        })
    }

    pub fn handle_pointer(&mut self, event: PointerEvent) -> Option<CameraControl> {
        let control = self.config.pointer.control(&event)?;
        control.apply(&mut self.state);
        Some(control)
    }

    /// Adopt a new surface size. On error the previous surface stays in effect.
    pub fn resize(&mut self, surface: SurfaceSize) -> Result<(), SceneError> {
        self.camera.set_aspect(aspect_of(surface)?)?;
        self.surface = surface;
        tracing::debug!(width = surface.width, height = surface.height, "surface resized");
        Ok(())
    }

    /// Drive `frames` iterations at a fixed simulated `interval` after `start`,
    /// handing each frame to `renderer`. Starts the loop if it is still idle.
    pub fn run_frames<R: Renderer>(
        &mut self,
        renderer: &mut R,
        frames: usize,
        start: Instant,
        interval: Duration,
    ) -> Result<Vec<R::Output>, SceneError> {
        if self.loop_state == LoopState::Idle {
            self.start(start)?;
        }
        let mut now = start;
        let mut outputs = Vec::with_capacity(frames);
        for _ in 0..frames {
            now = now.checked_add(interval).ok_or_else(|| {
                SceneError::InvalidConfiguration(format!(
                    "frame interval {interval:?} overflows the clock"
                ))
            })?;
            let frame = self.frame(now)?;
            outputs.push(renderer.render(&frame));
        }
        Ok(outputs)
    }
}
