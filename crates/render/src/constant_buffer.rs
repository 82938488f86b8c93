use bytemuck::{Pod, Zeroable};
use gridwave_kernel::{TransformBuffer, upload_layout};

/// Per-draw constant buffer: one record per cell, shared view and
/// projection repeated in each.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct ModelViewProjection {
    pub model: [[f32; 4]; 4],
    pub view: [[f32; 4]; 4],
    pub projection: [[f32; 4]; 4],
}

/// Pack every cell of `buffer` into upload-ready records.
pub fn pack_constant_buffers(buffer: &TransformBuffer) -> Vec<ModelViewProjection> {
    let view = upload_layout(&buffer.view());
    let projection = upload_layout(&buffer.projection());
    buffer
        .models()
        .iter()
        .map(|model| ModelViewProjection {
            model: upload_layout(model),
            view,
            projection,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::{Mat4, Vec3};
    use gridwave_kernel::{GridAnimator, GridConfig};

    #[test]
    fn record_is_three_matrices() {
        assert_eq!(std::mem::size_of::<ModelViewProjection>(), 3 * 64);
    }

    #[test]
    fn packs_one_record_per_cell() {
        let mut animator = GridAnimator::with_cell_count(25).unwrap();
        animator.update(0.0);
        let packed = pack_constant_buffers(animator.buffer());
        assert_eq!(packed.len(), 25);
        assert!(packed.iter().all(|r| r.view == packed[0].view));
        let bytes: &[u8] = bytemuck::cast_slice(&packed);
        assert_eq!(bytes.len(), 25 * 192);
    }

    #[test]
    fn model_rows_carry_translation() {
        let mut animator = GridAnimator::new(&GridConfig {
            cell_count: 64,
            initial_scale: 1.0,
            ..GridConfig::default()
        })
        .unwrap();
        animator.update(0.0);
        let packed = pack_constant_buffers(animator.buffer());
        let m = animator.buffer().model(36).unwrap();
        let t = m.transform_point3(Vec3::ZERO);
        assert_eq!(packed[36].model[0][3], t.x);
        assert_eq!(packed[36].model[1][3], t.y);
        assert_eq!(packed[36].model[2][3], t.z);
        assert_eq!(
            Mat4::from_cols_array_2d(&packed[36].model).transpose(),
            m
        );
    }
}
