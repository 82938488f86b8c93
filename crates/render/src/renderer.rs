use std::fmt::Write;

use gridwave_kernel::TransformBuffer;

/// Consumer of a finished frame. Implemented by the device-facing draw
/// routine and by debug renderers.
///
/// Called after `GridAnimator::update` returns and before the next one, so
/// the buffer is never observed half-written.
pub trait Renderer {
    /// The output type produced by this renderer.
    type Output;

    /// Render one frame from the given transform buffer.
    fn render(&self, buffer: &TransformBuffer) -> Self::Output;
}

/// Text renderer listing cell placements, for the CLI and tests.
#[derive(Debug)]
pub struct DebugTextRenderer {
    max_cells: usize,
}

impl Default for DebugTextRenderer {
    fn default() -> Self {
        Self { max_cells: 16 }
    }
}

impl DebugTextRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Limit how many cells are listed.
    pub fn with_max_cells(max_cells: usize) -> Self {
        Self { max_cells }
    }
}

impl Renderer for DebugTextRenderer {
    type Output = String;

    fn render(&self, buffer: &TransformBuffer) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "=== Grid Frame (cells={}) ===", buffer.len());
        let eye = buffer.view().inverse().w_axis;
        let _ = writeln!(
            out,
            "Camera: eye=({:.1}, {:.1}, {:.1}) finite={}",
            eye.x,
            eye.y,
            eye.z,
            buffer.is_finite()
        );

        for (i, model) in buffer.models().iter().take(self.max_cells).enumerate() {
            let (scale, _, p) = model.to_scale_rotation_translation();
            let _ = writeln!(
                out,
                "  [{i:>5}] pos=({:.2}, {:.2}, {:.2}) scale={:.3}",
                p.x, p.y, p.z, scale.x
            );
        }
        if buffer.len() > self.max_cells {
            let _ = writeln!(out, "  ... {} more", buffer.len() - self.max_cells);
        }
        tracing::trace!(bytes = out.len(), "debug frame rendered");
        out
    }
}
