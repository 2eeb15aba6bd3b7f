#![warn(rustdoc::missing_crate_level_docs)]
#![warn(rustdoc::invalid_rust_codeblocks)]

//! # Voxel Frustum
//!
//! The core of a minimal voxel world renderer: deterministic gradient-noise terrain, a
//! chunked voxel world, and per-frame view-frustum culling of chunk bounding boxes.
//!
//! ## Key Modules
//!
//! * `engine_state::voxels` - Noise, terrain sampling, voxels, chunks and the world directory
//! * `engine_state::camera_state` - The look-at camera, frustum extraction and culling
//! * `engine_state::config` - JSON engine configuration
//! * `engine_state` - The per-frame driver and the `ChunkRenderer` hand-off
//!
//! ## Architecture
//!
//! Window creation, input handling and draw calls live outside this crate. The engine
//! decides each frame which chunks are visible and passes every chunk, with its voxel
//! instances when visible, to a `ChunkRenderer` implementation.
//!
//! ## Usage
//!
//! ```rust,no_run
//! fn main() {
//!     voxel_frustum::run();
//! }
//! ```
//!
//! Set `RUST_LOG=debug` to see the per-frame debug listing, and `VOXEL_FRUSTUM_CONFIG` to
//! the path of a JSON config file to override the defaults.

use cgmath::{Deg, Matrix3};
use engine_state::{config::EngineConfig, EngineState, LoggingRenderer};
use log::info;

pub mod engine_state;

pub const APPLICATION_INITIALIZATION_STOPWATCH: &str = "Application Initialization";

/// Heading change applied to the camera between headless frames.
const HEADLESS_YAW_STEP: Deg<f32> = Deg(30.0);

/// Runs the engine headless for the configured number of frames.
///
/// Between frames the camera turns about world up, standing in for the input layer.
pub fn run() {
    let mut log_builder = env_logger::Builder::new();
    log_builder
        .target(env_logger::Target::Stdout)
        .parse_env("RUST_LOG")
        .init();

    info!("Logger initialized");

    let stopwatch = web_time::Instant::now();
    let config = EngineConfig::from_env();
    let frames = config.frames;
    let mut engine = EngineState::new(config);
    info!(
        "{} took {:?}",
        APPLICATION_INITIALIZATION_STOPWATCH,
        stopwatch.elapsed()
    );

    let mut renderer = LoggingRenderer::default();
    for _ in 0..frames {
        let report = engine.frame(&mut renderer);
        info!(
            "Frame {}: rendered {} of {} chunks",
            report.frame,
            report.visible.len(),
            report.total_chunks
        );

        let camera = engine.camera_mut();
        let view = camera.target - camera.position;
        camera.target = camera.position + Matrix3::from_angle_y(HEADLESS_YAW_STEP) * view;
    }

    info!(
        "Finished {} frames, {} voxel instances submitted",
        frames, renderer.instances_drawn
    );
}
