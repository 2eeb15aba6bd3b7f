//! # Engine State Module
//!
//! The core engine module that ties the camera, the voxel world and the renderer together.
//!
//! ## Key Components
//!
//! * `EngineState` - The main state container for the engine
//! * `camera_state` - Camera pose, viewport and frustum extraction
//! * `config` - Engine settings loaded from JSON
//! * `voxels` - Voxel data, chunks and world generation
//!
//! ## Frame order
//!
//! Each call to `EngineState::frame` runs, strictly in order:
//! 1. Frustum recomputation from the camera pose left by the input layer
//! 2. Visibility classification of every chunk's bounding box
//! 3. Hand-off of every chunk to the `ChunkRenderer`, with voxel instances only for
//!    chunks classified visible
//!
//! The world is read-only after `EngineState::new`, so the frame needs no locking.

use camera_state::{
    camera::{horizontal_angle_to_forward, Camera},
    CameraState,
};
use cgmath::Deg;
use config::EngineConfig;
use log::{debug, info, trace};
use voxels::{
    chunk::{BoundingBox, ChunkId, VoxelColoring},
    terrain::TerrainSampler,
    voxel::VoxelInstance,
    world::World,
};
use web_time::Instant;

pub mod camera_state;
pub mod config;
pub mod voxels;

/// Everything the renderer needs to draw one chunk.
///
/// # Fields
/// - `id`: The chunk id
/// - `bounding_box`: World-space bounds, drawn as a wireframe whether or not the chunk is visible
/// - `viewable`: The culling verdict for this frame
/// - `instances`: One entry per present voxel; empty when `viewable` is false
#[derive(Clone, Debug, PartialEq)]
pub struct ChunkRenderView<'a> {
    pub id: &'a ChunkId,
    pub bounding_box: &'a BoundingBox,
    pub viewable: bool,
    pub instances: Vec<VoxelInstance>,
}

/// The draw-call side of the engine.
///
/// Implementations own all graphics resources; the engine only decides what to draw.
pub trait ChunkRenderer {
    /// Called before any chunk of a frame is submitted.
    fn begin_frame(&mut self, _camera: &Camera) {}

    /// Draws (or skips) a single chunk.
    fn draw_chunk(&mut self, view: ChunkRenderView<'_>);

    /// Called after every chunk of a frame has been submitted.
    fn end_frame(&mut self, _report: &FrameReport) {}
}

/// Renderer for headless runs that records each chunk through `log`.
#[derive(Default)]
pub struct LoggingRenderer {
    /// Total voxel instances submitted since creation
    pub instances_drawn: usize,
}

impl ChunkRenderer for LoggingRenderer {
    fn draw_chunk(&mut self, view: ChunkRenderView<'_>) {
        trace!(
            "Chunk {} viewable={} instances={} bounds={:?}..{:?}",
            view.id,
            view.viewable,
            view.instances.len(),
            view.bounding_box.min,
            view.bounding_box.max
        );
        self.instances_drawn += view.instances.len();
    }

    fn end_frame(&mut self, report: &FrameReport) {
        debug!(
            "Frame {}: {}/{} chunks visible, {} voxels",
            report.frame, report.visible.len(), report.total_chunks, report.instance_count
        );
    }
}

/// Summary of one frame's culling pass.
#[derive(Clone, Debug, PartialEq)]
pub struct FrameReport {
    /// Zero-based frame counter
    pub frame: u64,
    /// Ids of the chunks classified visible, sorted
    pub visible: Vec<ChunkId>,
    pub total_chunks: usize,
    /// Voxel instances handed to the renderer
    pub instance_count: usize,
}

impl FrameReport {
    pub fn culled(&self) -> usize {
        self.total_chunks - self.visible.len()
    }
}

/// The main state container for the engine.
///
/// # Examples
///
/// ```
/// use voxel_frustum::engine_state::{config::EngineConfig, EngineState, LoggingRenderer};
///
/// let mut engine = EngineState::new(EngineConfig::default());
/// let mut renderer = LoggingRenderer::default();
/// let report = engine.frame(&mut renderer);
/// assert_eq!(report.total_chunks, 25);
/// assert!(!report.visible.is_empty());
/// ```
pub struct EngineState {
    /// Camera pose, viewport and the current frustum
    camera_state: CameraState,
    /// The voxel world containing all chunk data
    world: World,
    config: EngineConfig,
    frame: u64,
}

impl EngineState {
    /// Generates the world and places the camera at its default pose.
    ///
    /// # Arguments
    /// * `config` - Engine settings; assumed valid (see `EngineConfig::validate`)
    pub fn new(config: EngineConfig) -> Self {
        let start = Instant::now();

        let sampler = TerrainSampler::new(config.noise_scale, config.terrain_amplitude);
        let mut rng = match config.color_seed {
            Some(seed) => fastrand::Rng::with_seed(seed),
            None => fastrand::Rng::new(),
        };
        let world = World::generate(config.generation_radius, &sampler, &mut rng);

        let mut camera = Camera::default();
        camera.fov_y = Deg(config.fov_y_degrees);
        let camera_state = CameraState::new(
            camera,
            config.frustum_settings(),
            config.viewport_width,
            config.viewport_height,
        );

        info!("Engine initialized in {:?}", start.elapsed());

        EngineState {
            camera_state,
            world,
            config,
            frame: 0,
        }
    }

    pub fn camera_state(&self) -> &CameraState {
        &self.camera_state
    }

    /// Mutable camera access for the input layer; takes effect at the next `frame`.
    pub fn camera_mut(&mut self) -> &mut Camera {
        self.camera_state.camera_mut()
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        self.camera_state.resize(width, height);
    }

    /// Runs one frame: recomputes the frustum, culls every chunk and submits it.
    ///
    /// Chunks are submitted in sorted id order so runs are reproducible.
    pub fn frame<R: ChunkRenderer>(&mut self, renderer: &mut R) -> FrameReport {
        self.camera_state.update_frustum();
        renderer.begin_frame(self.camera_state.camera());

        let coloring: VoxelColoring = self.config.voxel_coloring;
        let mut visible = Vec::new();
        let mut instance_count = 0;

        for id in self.world.sorted_ids() {
            let Some(chunk) = self.world.get_chunk(&id) else {
                continue;
            };
            let viewable = self.camera_state.is_viewable(chunk.bounding_box());
            let instances = if viewable {
                chunk.render_instances(coloring)
            } else {
                Vec::new()
            };
            instance_count += instances.len();

            renderer.draw_chunk(ChunkRenderView {
                id: chunk.id(),
                bounding_box: chunk.bounding_box(),
                viewable,
                instances,
            });

            if viewable {
                visible.push(id);
            }
        }

        let report = FrameReport {
            frame: self.frame,
            visible,
            total_chunks: self.world.len(),
            instance_count,
        };
        self.frame += 1;

        self.log_debug_listing(&report);
        renderer.end_frame(&report);
        report
    }

    /// Emits the camera pose, the six frustum planes and the rendered chunk ids.
    fn log_debug_listing(&self, report: &FrameReport) {
        if !log::log_enabled!(log::Level::Debug) {
            return;
        }

        let camera = self.camera_state.camera();
        debug!(
            "Camera pos: ({:.2}, {:.2}, {:.2}) target: ({:.2}, {:.2}, {:.2}) heading: {:.1} deg",
            camera.position.x,
            camera.position.y,
            camera.position.z,
            camera.target.x,
            camera.target.y,
            camera.target.z,
            horizontal_angle_to_forward(camera.target - camera.position).0
        );

        for (name, plane) in self.camera_state.frustum().named_planes() {
            debug!(
                "Frustum.{} normal: ({:.2}, {:.2}, {:.2}), distance: ({:.2})",
                name, plane.normal.x, plane.normal.y, plane.normal.z, plane.distance
            );
        }

        let ids = report
            .visible
            .iter()
            .map(ChunkId::as_str)
            .collect::<Vec<_>>();
        debug!("Chunks rendered: {:?}", ids);
    }
}
