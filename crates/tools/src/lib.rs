//! Developer Tooling: grid inspector and frame statistics.
//!
//! # Invariants
//! - Tools only read animator state.

mod inspector;
mod stats;

pub use inspector::{CellInfo, GridInspector, GridSummary};
pub use stats::FrameStats;

pub fn crate_info() -> &'static str {
    "gridwave-tools v0.1.0"
}
