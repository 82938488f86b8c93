use std::f32::consts::TAU;

use glam::{Mat4, Vec2, Vec3};
use gridwave_common::{GridDims, ManipulationMode, ViewConfig};
use gridwave_input::{Command, CommandQueue};
use rayon::prelude::*;

use crate::config::GridConfig;
use crate::controller::CameraController;
use crate::error::GridError;
use crate::grid::GridIndexer;
use crate::manipulation::ManipulationEngine;
use crate::transform::{ViewProjection, compose};
use crate::wave::WaveState;

/// Per-cell model matrices plus the shared camera matrices.
///
/// Overwritten in place every procedural frame and read by the draw routine
/// between frames.
#[derive(Debug, Clone)]
pub struct TransformBuffer {
    models: Vec<Mat4>,
    camera: ViewProjection,
}

impl TransformBuffer {
    fn new(cell_count: usize, camera: ViewProjection) -> Self {
        Self {
            models: vec![Mat4::IDENTITY; cell_count],
            camera,
        }
    }

    pub fn len(&self) -> usize {
        self.models.len()
    }

    pub fn is_empty(&self) -> bool {
        self.models.is_empty()
    }

    pub fn models(&self) -> &[Mat4] {
        &self.models
    }

    pub fn model(&self, index: usize) -> Option<Mat4> {
        self.models.get(index).copied()
    }

    pub fn camera(&self) -> &ViewProjection {
        &self.camera
    }

    pub fn view(&self) -> Mat4 {
        self.camera.view
    }

    pub fn projection(&self) -> Mat4 {
        self.camera.projection
    }

    /// Whether every stored matrix is free of NaN and infinity.
    pub fn is_finite(&self) -> bool {
        self.camera.view.is_finite()
            && self.camera.projection.is_finite()
            && self.models.iter().all(Mat4::is_finite)
    }
}

/// State shared by every cell for one frame.
///
/// Snapshotted before the per-cell loop so all cells see the same values.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameContext {
    pub mode: ManipulationMode,
    pub camera_offset: Vec3,
    pub scale: f32,
    pub wave_increment: i32,
    /// Global Y rotation supplied by the timer, in radians.
    pub rotation: f32,
}

impl FrameContext {
    /// Model matrix for cell `index`.
    pub fn cell_transform(
        &self,
        indexer: &GridIndexer,
        engine: &ManipulationEngine,
        index: usize,
    ) -> Mat4 {
        let (col, row) = indexer.centered(index);
        let offset = engine.compute_offset(
            self.mode,
            col,
            row,
            self.camera_offset,
            self.wave_increment,
        );
        compose(
            self.rotation + offset.rotation_bias,
            self.scale,
            offset.position,
        )
    }
}

/// Drives the grid: applies control commands and regenerates every cell's
/// transform once per frame.
pub struct GridAnimator {
    indexer: GridIndexer,
    engine: ManipulationEngine,
    controller: CameraController,
    mode: ManipulationMode,
    wave: WaveState,
    tracking: bool,
    tracked_model: Mat4,
    pointer: Vec2,
    view_config: ViewConfig,
    buffer: TransformBuffer,
    commands: CommandQueue,
    parallel: bool,
    parallel_threshold: usize,
    frames: u64,
}

impl GridAnimator {
    pub fn new(config: &GridConfig) -> Result<Self, GridError> {
        config.validate()?;
        let dims = GridDims::new(config.cell_count)?;
        let camera = ViewProjection::new(
            &config.view,
            config.output_width,
            config.output_height,
            Mat4::IDENTITY,
        );

        tracing::info!(
            cells = dims.cell_count(),
            mod_amount = dims.mod_amount(),
            half_mod = dims.half_mod(),
            "grid animator created"
        );

        Ok(Self {
            indexer: GridIndexer::new(dims),
            engine: ManipulationEngine::new(dims),
            controller: CameraController::with_scale(config.initial_scale),
            mode: config.initial_mode,
            wave: WaveState::new(dims),
            tracking: false,
            tracked_model: Mat4::IDENTITY,
            pointer: Vec2::ZERO,
            view_config: config.view,
            buffer: TransformBuffer::new(dims.cell_count(), camera),
            commands: CommandQueue::new(),
            parallel: config.parallel,
            parallel_threshold: config.parallel_threshold,
            frames: 0,
        })
    }

    /// Animator with default settings and `cell_count` cells.
    pub fn with_cell_count(cell_count: usize) -> Result<Self, GridError> {
        Self::new(&GridConfig {
            cell_count,
            ..GridConfig::default()
        })
    }

    pub fn dims(&self) -> GridDims {
        self.indexer.dims()
    }

    pub fn indexer(&self) -> &GridIndexer {
        &self.indexer
    }

    pub fn mode(&self) -> ManipulationMode {
        self.mode
    }

    pub fn controller(&self) -> &CameraController {
        &self.controller
    }

    pub fn wave_increment(&self) -> i32 {
        self.wave.increment()
    }

    pub fn is_tracking(&self) -> bool {
        self.tracking
    }

    pub fn buffer(&self) -> &TransformBuffer {
        &self.buffer
    }

    /// Rotation set by the pointer-drag path while tracking.
    pub fn tracked_model(&self) -> Mat4 {
        self.tracked_model
    }

    /// Last pointer location reported on the grid plane.
    pub fn pointer_location(&self) -> Vec2 {
        self.pointer
    }

    /// Number of procedural updates run so far.
    pub fn frame_count(&self) -> u64 {
        self.frames
    }

    /// Queue a command for the start of the next [`frame`](Self::frame).
    pub fn enqueue(&mut self, command: Command) {
        self.commands.push(command);
    }

    pub fn pending_commands(&self) -> usize {
        self.commands.len()
    }

    /// Apply a command immediately. Must not be called while a frame is
    /// being produced; use [`enqueue`](Self::enqueue) from asynchronous sources.
    pub fn apply(&mut self, command: Command) {
        tracing::debug!(?command, "applying command");
        match command {
            Command::ModifyCameraPosition { amount, axis } => {
                self.controller.modify_position(amount, axis)
            }
            Command::UpdatePerspective(amount) => self.controller.update_perspective(amount),
            Command::ModifyRotationRate { amount, adjust } => {
                self.controller.modify_rotation_rate(amount, adjust)
            }
            Command::SetManipulationMode(mode) => self.set_mode(mode),
            Command::SetPointerLocation { x, z } => self.set_pointer_location(x, z),
            Command::BeginTracking => self.begin_tracking(),
            Command::EndTracking => self.end_tracking(),
            Command::Noop => {}
        }
    }

    pub fn set_mode(&mut self, mode: ManipulationMode) {
        if mode != self.mode {
            tracing::info!(from = %self.mode, to = %mode, "manipulation mode changed");
        }
        self.mode = mode;
    }

    pub fn set_pointer_location(&mut self, x: f32, z: f32) {
        self.pointer = Vec2::new(x, z);
    }

    pub fn begin_tracking(&mut self) {
        self.tracking = true;
    }

    pub fn end_tracking(&mut self) {
        self.tracking = false;
    }

    /// Pointer-drag rotation: two full turns across the output width.
    ///
    /// Returns the new tracked matrix, or `None` when not tracking or the
    /// width is not positive.
    pub fn track_pointer(&mut self, position_x: f32, output_width: f32) -> Option<Mat4> {
        if !self.tracking || output_width <= 0.0 || output_width.is_nan() {
            return None;
        }
        let radians = TAU * 2.0 * position_x / output_width;
        self.tracked_model = Mat4::from_rotation_y(radians);
        Some(self.tracked_model)
    }

    /// Recompute the shared view and projection for a new output size.
    pub fn resize(&mut self, width: u32, height: u32, orientation: Mat4) {
        tracing::debug!(width, height, "recomputing view and projection");
        self.buffer.camera = ViewProjection::new(&self.view_config, width, height, orientation);
    }

    /// Snapshot of the state every cell reads this frame.
    pub fn context(&self, rotation: f32) -> FrameContext {
        FrameContext {
            mode: self.mode,
            camera_offset: self.controller.offset(),
            scale: self.controller.scale(),
            wave_increment: self.wave.increment(),
            rotation,
        }
    }

    /// Drain queued commands, then run [`update`](Self::update).
    pub fn frame(&mut self, rotation: f32) -> bool {
        let mut queue = std::mem::take(&mut self.commands);
        for command in queue.drain() {
            self.apply(command);
        }
        self.commands = queue;
        self.update(rotation)
    }

    /// Regenerate every cell transform and advance the wave.
    ///
    /// Returns `false` without touching the buffer while tracking. A
    /// non-finite `rotation` is treated as `0`.
    pub fn update(&mut self, rotation: f32) -> bool {
        if self.tracking {
            return false;
        }

        let rotation = if rotation.is_finite() {
            rotation
        } else {
            tracing::warn!(rotation, "non-finite frame rotation, using 0");
            0.0
        };
        let ctx = self.context(rotation);
        let cells = self.buffer.len();
        let _span = tracing::info_span!("grid_update", cells, mode = %ctx.mode).entered();

        let indexer = self.indexer;
        let engine = self.engine;
        let models = &mut self.buffer.models;
        if self.parallel && cells >= self.parallel_threshold {
            models
                .par_iter_mut()
                .enumerate()
                .for_each(|(i, slot)| *slot = ctx.cell_transform(&indexer, &engine, i));
        } else {
            for (i, slot) in models.iter_mut().enumerate() {
                *slot = ctx.cell_transform(&indexer, &engine, i);
            }
        }

        self.wave.advance();
        self.frames += 1;
        tracing::trace!(wave = self.wave.increment(), frame = self.frames, "grid update complete");
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gridwave_common::{Axis, RateAdjust};

    fn animator(cells: usize, parallel: bool) -> GridAnimator {
        GridAnimator::new(&GridConfig {
            cell_count: cells,
            initial_scale: 1.0,
            parallel,
            parallel_threshold: 0,
            ..GridConfig::default()
        })
        .unwrap()
    }

    fn cell_position(a: &GridAnimator, index: usize) -> Vec3 {
        a.buffer().model(index).unwrap().transform_point3(Vec3::ZERO)
    }

    #[test]
    fn empty_grid_rejected() {
        assert!(matches!(
            GridAnimator::with_cell_count(0),
            Err(GridError::Dims(_))
        ));
    }

    #[test]
    fn buffer_sized_to_grid() {
        let a = animator(70, false);
        assert_eq!(a.buffer().len(), 70);
        assert_eq!(a.dims().mod_amount(), 8);
    }

    #[test]
    fn flat_center_cell_rides_the_crest() {
        let mut a = animator(64, false);
        assert!(a.update(0.0));
        // Centered (0, 0) is column 4 of row 4.
        let p = cell_position(&a, 36);
        assert!(p.abs_diff_eq(Vec3::new(0.0, 3.0, 0.0), 1e-6));
    }

    #[test]
    fn scale_applies_to_placement() {
        let mut a = animator(64, false);
        a.apply(Command::UpdatePerspective(-0.5));
        a.update(0.0);
        let p = cell_position(&a, 36);
        assert!(p.abs_diff_eq(Vec3::new(0.0, 1.5, 0.0), 1e-6));
    }

    #[test]
    fn wave_advances_once_per_update() {
        let mut a = animator(64, false);
        for k in 1..=9 {
            a.update(0.0);
            let expected = (k + 4) % 13 - 4;
            assert_eq!(a.wave_increment(), expected);
        }
        assert_eq!(a.frame_count(), 9);
    }

    #[test]
    fn tracking_short_circuits_update() {
        let mut a = animator(64, false);
        a.update(0.0);
        let before = a.buffer().models().to_vec();
        let wave = a.wave_increment();

        a.apply(Command::BeginTracking);
        a.apply(Command::SetManipulationMode(ManipulationMode::CosColRow));
        assert!(!a.update(1.0));
        assert_eq!(a.buffer().models(), &before[..]);
        assert_eq!(a.wave_increment(), wave);

        a.apply(Command::EndTracking);
        assert!(a.update(1.0));
        assert_ne!(a.buffer().models(), &before[..]);
    }

    #[test]
    fn track_pointer_only_while_tracking() {
        let mut a = animator(16, false);
        assert!(a.track_pointer(100.0, 800.0).is_none());
        a.begin_tracking();
        let m = a.track_pointer(100.0, 800.0).unwrap();
        let expected = Mat4::from_rotation_y(TAU * 2.0 * 100.0 / 800.0);
        assert!(m.abs_diff_eq(expected, 1e-6));
        assert_eq!(a.tracked_model(), m);
        assert!(a.track_pointer(100.0, 0.0).is_none());
    }

    #[test]
    fn queued_commands_apply_at_frame_start() {
        let mut a = animator(64, false);
        a.enqueue(Command::SetManipulationMode(ManipulationMode::GravityWell));
        a.enqueue(Command::ModifyCameraPosition {
            amount: 1.0,
            axis: Axis::X,
        });
        assert_eq!(a.mode(), ManipulationMode::Flat);
        assert_eq!(a.pending_commands(), 2);

        a.frame(0.0);
        assert_eq!(a.pending_commands(), 0);
        assert_eq!(a.mode(), ManipulationMode::GravityWell);
        assert_eq!(a.controller().offset(), Vec3::X);
    }

    #[test]
    fn context_snapshots_controller() {
        let mut a = animator(64, false);
        a.apply(Command::ModifyCameraPosition {
            amount: 2.0,
            axis: Axis::Z,
        });
        a.apply(Command::ModifyRotationRate {
            amount: 30.0,
            adjust: RateAdjust::Increase,
        });
        let ctx = a.context(0.25);
        assert_eq!(ctx.camera_offset, Vec3::new(0.0, 0.0, 2.0));
        assert_eq!(ctx.scale, 1.0);
        assert_eq!(ctx.rotation, 0.25);
        assert_eq!(a.controller().rotation_rate(), 30.0);
    }

    #[test]
    fn parallel_matches_sequential() {
        for mode in ManipulationMode::ALL {
            let mut par = animator(300, true);
            let mut seq = animator(300, false);
            for a in [&mut par, &mut seq] {
                a.set_mode(mode);
                a.apply(Command::ModifyCameraPosition {
                    amount: 3.0,
                    axis: Axis::Y,
                });
                for frame in 0..5 {
                    a.update(frame as f32 * 0.1);
                }
            }
            assert_eq!(par.buffer().models(), seq.buffer().models(), "{mode}");
        }
    }

    #[test]
    fn no_nan_even_at_singular_offsets() {
        for mode in ManipulationMode::ALL {
            for cells in [1, 3, 16, 64, 70] {
                let mut a = animator(cells, false);
                a.set_mode(mode);
                // Shifts that line columns and rows up with mod_amount.
                for (amount, axis) in [(1.0, Axis::X), (4.0, Axis::Z), (-9.0, Axis::Y)] {
                    a.apply(Command::ModifyCameraPosition { amount, axis });
                    for _ in 0..3 {
                        a.update(0.7);
                        assert!(a.buffer().is_finite(), "{mode} cells={cells}");
                    }
                }
            }
        }
    }

    #[test]
    fn biased_modes_compose_rotation_plus_bias() {
        for mode in [ManipulationMode::GravityWell, ManipulationMode::SphereMap] {
            let mut a = animator(64, false);
            a.set_mode(mode);
            let wave = a.wave_increment();
            assert!(a.update(0.3));

            // Centered (1, 0): finite, moderate bias in both modes.
            let (col, row) = a.indexer().centered(37);
            let engine = ManipulationEngine::new(a.dims());
            let off = engine.compute_offset(mode, col, row, Vec3::ZERO, wave);
            assert_ne!(off.rotation_bias, 0.0, "{mode}");

            let model = a.buffer().model(37).unwrap();
            let expected = compose(0.3 + off.rotation_bias, 1.0, off.position);
            assert!(model.abs_diff_eq(expected, 1e-5), "{mode}");
            let unbiased = compose(0.3, 1.0, off.position);
            assert!(!model.abs_diff_eq(unbiased, 1e-3), "{mode}");
        }
    }

    #[test]
    fn infinite_scale_request_keeps_buffer_finite() {
        let mut a = animator(16, false);
        a.apply(Command::UpdatePerspective(f32::INFINITY));
        a.update(0.0);
        assert!(a.controller().scale().is_finite());
        assert!(a.buffer().is_finite());
    }

    #[test]
    fn non_finite_inputs_never_reach_buffer() {
        let mut a = animator(16, false);
        a.apply(Command::ModifyCameraPosition {
            amount: f32::INFINITY,
            axis: Axis::Z,
        });
        a.apply(Command::ModifyRotationRate {
            amount: f32::NAN,
            adjust: RateAdjust::Increase,
        });
        assert!(a.update(f32::NAN));
        assert!(a.buffer().is_finite());
        assert_eq!(a.controller().offset(), Vec3::ZERO);
        assert_eq!(a.controller().rotation_rate(), 0.0);
    }

    #[test]
    fn resize_recomputes_projection_only() {
        let mut a = animator(16, false);
        let before = *a.buffer().camera();
        a.resize(600, 1000, Mat4::IDENTITY);
        assert_ne!(a.buffer().projection(), before.projection);
        assert_eq!(a.buffer().view(), before.view);
    }

    #[test]
    fn pointer_location_recorded() {
        let mut a = animator(16, false);
        a.apply(Command::SetPointerLocation { x: 1.5, z: -2.0 });
        assert_eq!(a.pointer_location(), Vec2::new(1.5, -2.0));
    }
}
