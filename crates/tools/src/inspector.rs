use gridwave_common::ManipulationMode;
use gridwave_kernel::GridAnimator;
use serde::Serialize;

/// Grid inspector for developer tooling.
///
/// Read-only queries against an animator for debugging and on-screen
/// readouts.
pub struct GridInspector;

impl GridInspector {
    /// Produce a summary of the animator state.
    pub fn summary(animator: &GridAnimator) -> GridSummary {
        let dims = animator.dims();
        let controller = animator.controller();
        let pointer = animator.pointer_location();
        GridSummary {
            frame: animator.frame_count(),
            cells: dims.cell_count(),
            mod_amount: dims.mod_amount(),
            half_mod: dims.half_mod(),
            mode: animator.mode(),
            wave_increment: animator.wave_increment(),
            tracking: animator.is_tracking(),
            camera_offset: controller.offset().to_array(),
            display_offset: controller.display_offset(),
            scale: controller.scale(),
            rotation_rate: controller.rotation_rate(),
            pointer: [pointer.x, pointer.y],
        }
    }

    /// Placement of one cell as of the last update.
    pub fn inspect_cell(animator: &GridAnimator, index: usize) -> Option<CellInfo> {
        let model = animator.buffer().model(index)?;
        let coord = animator.indexer().decode(index);
        let (_, centered_row) = animator.indexer().centered(index);
        let (scale, rotation, position) = model.to_scale_rotation_translation();
        let (axis, angle) = rotation.to_axis_angle();
        Some(CellInfo {
            index,
            col: coord.col,
            row: coord.row,
            centered_row,
            position: position.to_array(),
            scale: scale.x,
            yaw: angle * axis.y.signum(),
        })
    }

    /// Index of the cell whose placement is highest, if any.
    pub fn highest_cell(animator: &GridAnimator) -> Option<usize> {
        animator
            .buffer()
            .models()
            .iter()
            .map(|m| m.w_axis.y)
            .enumerate()
            .max_by(|a, b| a.1.total_cmp(&b.1))
            .map(|(i, _)| i)
    }
}

/// Summary of animator state for the inspector.
#[derive(Debug, Clone, Serialize)]
pub struct GridSummary {
    pub frame: u64,
    pub cells: usize,
    pub mod_amount: i32,
    pub half_mod: i32,
    pub mode: ManipulationMode,
    pub wave_increment: i32,
    pub tracking: bool,
    pub camera_offset: [f32; 3],
    pub display_offset: i32,
    pub scale: f32,
    pub rotation_rate: f32,
    pub pointer: [f32; 2],
}

impl std::fmt::Display for GridSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Grid: frame={} cells={} side={} mode={} wave={} tracking={} offset=({:.2}, {:.2}, {:.2}) scale={:.3} rate={:.1}deg/s",
            self.frame,
            self.cells,
            self.mod_amount,
            self.mode,
            self.wave_increment,
            self.tracking,
            self.camera_offset[0],
            self.camera_offset[1],
            self.camera_offset[2],
            self.scale,
            self.rotation_rate,
        )
    }
}

/// Detailed info about a single cell.
#[derive(Debug, Clone, Serialize)]
pub struct CellInfo {
    pub index: usize,
    pub col: i32,
    pub row: i32,
    pub centered_row: i32,
    /// World position after scale and rotation.
    pub position: [f32; 3],
    pub scale: f32,
    /// Rotation about Y in radians.
    pub yaw: f32,
}

impl std::fmt::Display for CellInfo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Cell [{}] col={} row={} (centered {}) pos=({:.2}, {:.2}, {:.2}) scale={:.3} yaw={:.3}",
            self.index,
            self.col,
            self.row,
            self.centered_row,
            self.position[0],
            self.position[1],
            self.position[2],
            self.scale,
            self.yaw,
        )
    }
}
