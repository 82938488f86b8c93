use glam::Vec3;
use gridwave_common::{GridDims, ManipulationMode};

use crate::fractal::FractalField;
use crate::wave::wave_lift;

/// Forward displacement applied by the gravity well, spread over `half_mod`.
const WELL_PULL: f32 = 322.0;

/// Displaced position and extra Y rotation for one cell.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CellOffset {
    pub position: Vec3,
    pub rotation_bias: f32,
}

/// Evaluates the manipulation modes for a grid.
#[derive(Debug, Clone, Copy)]
pub struct ManipulationEngine {
    dims: GridDims,
    fractal: FractalField,
}

impl ManipulationEngine {
    pub fn new(dims: GridDims) -> Self {
        Self {
            dims,
            fractal: FractalField::new(dims),
        }
    }

    /// Full per-cell offset: mode displacement, then the wave lift on `y`,
    /// then the rotation bias measured on the final position.
    ///
    /// `col` and `row` are centered coordinates.
    pub fn compute_offset(
        &self,
        mode: ManipulationMode,
        col: i32,
        row: i32,
        camera_offset: Vec3,
        wave_increment: i32,
    ) -> CellOffset {
        let mut position = self.displace(mode, col, row, camera_offset);
        position.y += wave_lift(col, row, wave_increment);
        CellOffset {
            position,
            rotation_bias: self.rotation_bias(mode, position),
        }
    }

    /// Mode-specific displacement without the wave.
    pub fn displace(&self, mode: ManipulationMode, col: i32, row: i32, camera_offset: Vec3) -> Vec3 {
        let axis = Vec3::new(col as f32, 0.0, row as f32) + camera_offset;
        let modulus = self.dims.mod_amount() as f32;
        let half = self.dims.half_mod() as f32;
        let val_col = modulus - axis.x;
        let val_row = modulus - axis.z;

        let mut out = axis;
        match mode {
            ManipulationMode::Flat => {}
            ManipulationMode::CosCol => out.y -= val_col.cos(),
            ManipulationMode::CosRow => out.y -= val_row.cos(),
            ManipulationMode::CosColRow => out.y -= val_row.cos() + val_col.cos(),
            ManipulationMode::Fractal => {
                let lean = camera_offset.y / 2.0;
                out.y = self.fractal.height(val_col + lean, val_row + lean) as f32;
            }
            ManipulationMode::GravityWell => {
                out.x = val_col - half;
                out.y = val_row - half;
                match ratio(WELL_PULL, half) {
                    Some(pull) => out.z += pull,
                    None => tracing::trace!(col, row, "gravity well pull skipped, zero half width"),
                }
            }
            ManipulationMode::SphereMap => {
                // z reads the column angle, y the row angle, x both.
                let x_rad = ratio(modulus, val_col).map(|share| (share * 360.0).to_radians());
                let z_rad = ratio(modulus, val_row).map(|share| (share * 360.0).to_radians());
                if let Some(x_rad) = x_rad {
                    out.z = half * x_rad.cos() * x_rad.sin();
                }
                if let Some(z_rad) = z_rad {
                    out.y = half * z_rad.cos();
                }
                match (x_rad, z_rad) {
                    (Some(x_rad), Some(z_rad)) => out.x = half * x_rad.cos() * z_rad.sin(),
                    _ => tracing::trace!(col, row, "sphere projection partly skipped at singular cell"),
                }
            }
        }
        out
    }

    /// Extra Y rotation, in radians, for a cell at `position`.
    pub fn rotation_bias(&self, mode: ManipulationMode, position: Vec3) -> f32 {
        let modulus = self.dims.mod_amount() as f32;
        match mode {
            ManipulationMode::GravityWell => {
                let x_share = ratio(modulus, position.x).unwrap_or(0.0);
                let z_share = ratio(modulus, position.z).unwrap_or(0.0);
                (x_share * 90.0 + z_share * 90.0 + 1.0).to_radians()
            }
            ManipulationMode::SphereMap => ratio(modulus, position.z)
                .map(|share| (share * 360.0).to_radians())
                .unwrap_or(0.0),
            ManipulationMode::Flat
            | ManipulationMode::CosCol
            | ManipulationMode::CosRow
            | ManipulationMode::CosColRow
            | ManipulationMode::Fractal => 0.0,
        }
    }
}

/// `num / den`, or `None` when the quotient is not finite.
fn ratio(num: f32, den: f32) -> Option<f32> {
    if den == 0.0 {
        return None;
    }
    let q = num / den;
    q.is_finite().then_some(q)
}
