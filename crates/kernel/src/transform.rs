use glam::{Mat4, Vec3};
use gridwave_common::ViewConfig;

/// Model matrix for one cell.
///
/// The cell is translated to its grid position, then the whole placement is
/// rotated about the world Y axis and uniformly scaled, so rotation and scale
/// act on the grid as a unit. In column-vector form that is `S * Ry * T`.
pub fn compose(rotation: f32, scale: f32, translation: Vec3) -> Mat4 {
    Mat4::from_scale(Vec3::splat(scale))
        * Mat4::from_rotation_y(rotation)
        * Mat4::from_translation(translation)
}

/// Matrix as uploaded to the shader constant buffer: row-major storage of
/// the column-vector matrix, i.e. the transpose of glam's column storage.
pub fn upload_layout(m: &Mat4) -> [[f32; 4]; 4] {
    m.transpose().to_cols_array_2d()
}

/// Shared camera matrices, recomputed only when the output size changes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewProjection {
    pub view: Mat4,
    pub projection: Mat4,
}

impl Default for ViewProjection {
    fn default() -> Self {
        Self {
            view: Mat4::IDENTITY,
            projection: Mat4::IDENTITY,
        }
    }
}

impl ViewProjection {
    /// Build the view and projection for an output of `width` x `height`.
    ///
    /// `orientation` is the display's rotation correction, applied after the
    /// perspective divide setup. Portrait outputs get a doubled field of view.
    pub fn new(config: &ViewConfig, width: u32, height: u32, orientation: Mat4) -> Self {
        let aspect = width.max(1) as f32 / height.max(1) as f32;
        let mut fov = config.fov_degrees.to_radians();
        if aspect < 1.0 {
            fov *= 2.0;
        }

        let perspective = Mat4::perspective_rh(fov, aspect, config.near, config.far);
        Self {
            view: Mat4::look_at_rh(config.eye, config.target, Vec3::Y),
            projection: orientation * perspective,
        }
    }

    pub fn view_projection(&self) -> Mat4 {
        self.projection * self.view
    }
}
