use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use lattice_common::SurfaceSize;
use lattice_kernel::{RenderLoop, SceneConfig};
use lattice_render::{DebugTextRenderer, Renderer};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "lattice-cli", about = "Headless driver for lattice scenes")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, ValueEnum)]
enum Scene {
    Square,
    Hex,
}

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    Yaml,
    Json,
}

#[derive(Subcommand)]
enum Commands {
    /// Print version and crate info
    Info,
    /// List the lattice cells of a scene
    Cells {
        #[arg(short, long, value_enum, default_value = "square")]
        scene: Scene,
        /// Number of cells to print
        #[arg(short, long, default_value = "10")]
        limit: usize,
    },
    /// Run the render loop headless and print the last frame
    Run {
        #[arg(short, long, value_enum, default_value = "square")]
        scene: Scene,
        /// Scene config file (YAML, or JSON with a .json extension); overrides --scene
        #[arg(short, long)]
        config: Option<PathBuf>,
        /// Number of frames to simulate
        #[arg(short, long, default_value = "60")]
        frames: usize,
        /// Simulated time between frames in milliseconds
        #[arg(long, default_value = "16")]
        frame_ms: u64,
        /// Pointer position applied before the first frame
        #[arg(long, num_args = 2, value_names = ["X", "Y"])]
        pointer: Option<Vec<f64>>,
        #[arg(long, default_value = "1280")]
        width: f64,
        #[arg(long, default_value = "720")]
        height: f64,
        /// Draw requests listed for the last frame
        #[arg(long, default_value = "8")]
        list: usize,
    },
    /// Print a preset scene config
    Preset {
        #[arg(short, long, value_enum, default_value = "square")]
        scene: Scene,
        #[arg(long, value_enum, default_value = "yaml")]
        format: Format,
    },
}

fn preset(scene: Scene) -> SceneConfig {
    match scene {
        Scene::Square => SceneConfig::square_columns(),
        Scene::Hex => SceneConfig::hex_prisms(),
    }
}

fn load_config(path: &Path) -> Result<SceneConfig> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("reading scene config {}", path.display()))?;
    let config = if path.extension().is_some_and(|ext| ext == "json") {
        SceneConfig::from_json_str(&text)
    } else {
        SceneConfig::from_yaml_str(&text)
    };
    config.with_context(|| format!("parsing scene config {}", path.display()))
}

/// Simulated timestamp of frame `n`.
fn frame_time(start: Instant, interval: Duration, n: usize) -> Result<Instant> {
    u32::try_from(n)
        .ok()
        .and_then(|n| interval.checked_mul(n))
        .and_then(|elapsed| start.checked_add(elapsed))
        .with_context(|| format!("frame {n} at {interval:?} per frame overflows the clock"))
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .init();

    match cli.command {
        Commands::Info => {
            println!("lattice-cli v{}", env!("CARGO_PKG_VERSION"));
            println!("common: {}", lattice_common::crate_info());
            println!("math: {}", lattice_math::crate_info());
            println!("grid: {}", lattice_grid::crate_info());
            println!("render: {}", lattice_render::crate_info());
            println!("input: {}", lattice_input::crate_info());
            println!("kernel: {}", lattice_kernel::crate_info());
        }
        Commands::Cells { scene, limit } => {
            let config = preset(scene);
            let lattice = lattice_grid::Lattice::build(config.layout)?;
            println!(
                "{}: {} cells, max radius {:.2}",
                config.name,
                lattice.len(),
                lattice.max_radius()
            );
            for cell in lattice.cells().iter().take(limit) {
                println!(
                    "  ({:>4}, {:>4}) x={:>9.3} z={:>9.3} r={:>8.3}",
                    cell.i, cell.j, cell.world_x, cell.world_z, cell.r
                );
            }
        }
        Commands::Run {
            scene,
            config,
            frames,
            frame_ms,
            pointer,
            width,
            height,
            list,
        } => {
            let config = match config {
                Some(path) => load_config(&path)?,
                None => preset(scene),
            };
            let mut driver = RenderLoop::new(config, SurfaceSize::new(width, height))?;

            if let Some([x, y]) = pointer.as_deref() {
                match driver.pointer_moved(*x, *y) {
                    Some(control) => tracing::info!(
                        weight = control.weight,
                        angle_x = control.angle_x,
                        "pointer applied"
                    ),
                    None => tracing::warn!(x = *x, y = *y, "pointer ignored"),
                }
            }

            let start = Instant::now();
            let interval = Duration::from_millis(frame_ms);
            driver.start(start)?;
            let mut last = None;
            for n in 1..=frames {
                last = Some(driver.frame(frame_time(start, interval, n)?)?);
            }

            match last {
                Some(frame) => {
                    let mut renderer = DebugTextRenderer { max_listed: list };
                    print!("{}", renderer.render(&frame));
                    let state = driver.camera_state();
                    println!(
                        "Camera: angle_x={:.2} angle_y={:.2} angle_z={:.2} radius={:.0}",
                        state.angle_x, state.angle_y, state.angle_z, state.radius
                    );
                }
                None => println!("No frames requested"),
            }
        }
        Commands::Preset { scene, format } => {
            let config = preset(scene);
            let text = match format {
                Format::Yaml => config.to_yaml()?,
                Format::Json => config.to_json()?,
            };
            println!("{text}");
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn frame_time_steps_by_interval() {
        let start = Instant::now();
        let interval = Duration::from_millis(16);
        assert_eq!(frame_time(start, interval, 3).unwrap(), start + Duration::from_millis(48));
    }

    #[test]
    fn frame_time_overflow_is_an_error() {
        let start = Instant::now();
        assert!(frame_time(start, Duration::from_millis(16), usize::MAX).is_err());
        assert!(frame_time(start, Duration::from_millis(u64::MAX), 2).is_err());
        assert!(frame_time(start, Duration::MAX, 1).is_err());
    }
}
