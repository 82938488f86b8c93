//! Grid kernel: turns grid coordinates plus per-frame state into one model
//! matrix per cell.
//!
//! # Invariants
//! - Every cell in a frame sees the same camera offset, scale, mode and wave.
//! - The per-cell computation is pure with respect to its `FrameContext`.
//! - No NaN or infinity is ever written to the transform buffer.

pub mod animator;
pub mod config;
pub mod controller;
pub mod error;
pub mod fractal;
pub mod grid;
pub mod manipulation;
pub mod transform;
pub mod wave;

pub use animator::{FrameContext, GridAnimator, TransformBuffer};
pub use config::GridConfig;
pub use controller::CameraController;
pub use error::GridError;
pub use fractal::{Escape, FractalField};
pub use grid::{CellCoord, GridIndexer};
pub use manipulation::{CellOffset, ManipulationEngine};
pub use transform::{ViewProjection, compose, upload_layout};
pub use wave::WaveState;

pub fn crate_info() -> &'static str {
    "gridwave-kernel v0.1.0"
}
