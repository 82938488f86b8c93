//! Shared types for the gridwave workspace.
//!
//! # Invariants
//! - `GridDims` is only constructible for a non-empty grid.
//! - Out-of-range mode indices fall back to `Flat`.

mod types;

pub use types::{Axis, DimsError, GridDims, ManipulationMode, RateAdjust, ViewConfig};
