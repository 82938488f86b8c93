//! Rendering Adapter: the boundary between the transform buffer and a draw
//! routine.
//!
//! # Invariants
//! - Renderers read the transform buffer; they never write grid state.
//! - Packed constant buffers use the same transposed layout for model,
//!   view and projection.
//!
//! The device-facing draw routine (shader binding, mesh buffers, one draw
//! call per cell) lives outside this workspace and implements [`Renderer`].

mod constant_buffer;
mod renderer;

pub use constant_buffer::{ModelViewProjection, pack_constant_buffers};
pub use renderer::{DebugTextRenderer, Renderer};

pub fn crate_info() -> &'static str {
    "gridwave-render v0.1.0"
}
