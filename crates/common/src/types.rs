use std::fmt;
use std::str::FromStr;

use glam::Vec3;
use serde::{Deserialize, Serialize};

/// Errors raised while sizing a grid.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DimsError {
    #[error("grid must contain at least one cell")]
    EmptyGrid,

    #[error("grid of {0} cells exceeds the addressable range")]
    TooLarge(usize),
}

/// Fixed dimensions of the instanced grid.
///
/// `mod_amount` is the side length of the largest square that fits in
/// `cell_count`; cells past the last full row keep the same row-major
/// indexing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridDims {
    cell_count: usize,
    mod_amount: i32,
    half_mod: i32,
}

impl GridDims {
    pub fn new(cell_count: usize) -> Result<Self, DimsError> {
        if cell_count == 0 {
            return Err(DimsError::EmptyGrid);
        }
        if cell_count > i32::MAX as usize {
            return Err(DimsError::TooLarge(cell_count));
        }
        let mod_amount = cell_count.isqrt() as i32;
        Ok(Self {
            cell_count,
            mod_amount,
            half_mod: mod_amount >> 1,
        })
    }

    /// Total number of cells (`N`).
    pub fn cell_count(&self) -> usize {
        self.cell_count
    }

    /// Side length of the square grid, `floor(sqrt(N))`.
    pub fn mod_amount(&self) -> i32 {
        self.mod_amount
    }

    /// `mod_amount >> 1`, the centering offset.
    pub fn half_mod(&self) -> i32 {
        self.half_mod
    }
}

/// The procedural reshaping applied to every cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ManipulationMode {
    #[default]
    Flat,
    CosCol,
    CosRow,
    CosColRow,
    Fractal,
    GravityWell,
    SphereMap,
}

impl ManipulationMode {
    pub const ALL: [ManipulationMode; 7] = [
        ManipulationMode::Flat,
        ManipulationMode::CosCol,
        ManipulationMode::CosRow,
        ManipulationMode::CosColRow,
        ManipulationMode::Fractal,
        ManipulationMode::GravityWell,
        ManipulationMode::SphereMap,
    ];

    /// Look up a mode by its control index. Returns `None` outside `0..=6`.
    pub fn from_index(index: i64) -> Option<Self> {
        usize::try_from(index)
            .ok()
            .and_then(|i| Self::ALL.get(i))
            .copied()
    }

    /// Like [`from_index`](Self::from_index) but falls back to `Flat`.
    pub fn from_index_or_flat(index: i64) -> Self {
        Self::from_index(index).unwrap_or_else(|| {
            tracing::warn!(index, "unknown manipulation mode, falling back to flat");
            Self::Flat
        })
    }

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Flat => "flat",
            Self::CosCol => "cos_col",
            Self::CosRow => "cos_row",
            Self::CosColRow => "cos_col_row",
            Self::Fractal => "fractal",
            Self::GravityWell => "gravity_well",
            Self::SphereMap => "sphere_map",
        }
    }
}

impl fmt::Display for ManipulationMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ManipulationMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|m| m.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("unknown manipulation mode `{s}`"))
    }
}

/// Camera offset axis selected by a position command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    X,
    Y,
    Z,
}

impl Axis {
    pub fn from_index(index: i64) -> Option<Self> {
        match index {
            0 => Some(Self::X),
            1 => Some(Self::Y),
            2 => Some(Self::Z),
            _ => None,
        }
    }
}

/// Direction of a rotation-rate adjustment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RateAdjust {
    Increase,
    Decrease,
}

impl RateAdjust {
    /// `0` increases, `1` decreases; anything else maps to no adjustment.
    pub fn from_index(index: i64) -> Option<Self> {
        match index {
            0 => Some(Self::Increase),
            1 => Some(Self::Decrease),
            _ => None,
        }
    }
}

/// Fixed camera placement and projection parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewConfig {
    /// Camera position in world space.
    pub eye: Vec3,
    /// Point the camera is looking at.
    pub target: Vec3,
    /// Vertical field of view in degrees, doubled for portrait outputs.
    pub fov_degrees: f32,
    pub near: f32,
    pub far: f32,
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            eye: Vec3::new(0.0, 5.7, 11.5),
            target: Vec3::new(0.0, -0.1, 0.0),
            fov_degrees: 70.0,
            near: 0.01,
            far: 100.0,
        }
    }
}
