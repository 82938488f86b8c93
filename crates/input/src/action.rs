use gridwave_common::{Axis, ManipulationMode, RateAdjust};

/// A discrete control event produced by the input-mapping layer.
///
/// The animator consumes commands, never raw input events.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Command {
    /// Shift the camera offset along one axis.
    ModifyCameraPosition { amount: f32, axis: Axis },
    /// Grow or shrink the grid's uniform scale.
    UpdatePerspective(f32),
    /// Adjust the rotation rate in degrees per second. An amount of zero resets it.
    ModifyRotationRate { amount: f32, adjust: RateAdjust },
    /// Switch the active manipulation mode from the next frame on.
    SetManipulationMode(ManipulationMode),
    /// Record where the pointer touched the grid plane.
    SetPointerLocation { x: f32, z: f32 },
    /// Pointer pressed on the grid: hand rotation to the drag path.
    BeginTracking,
    /// Pointer released.
    EndTracking,
    /// No-op (used for input that hasn't been bound yet).
    Noop,
}

impl Command {
    /// Reset the rotation rate to zero.
    pub fn reset_rotation() -> Self {
        Self::ModifyRotationRate {
            amount: 0.0,
            adjust: RateAdjust::Increase,
        }
    }

    /// Switch mode by raw index; out-of-range indices select `Flat`.
    pub fn set_mode_index(index: i64) -> Self {
        Self::SetManipulationMode(ManipulationMode::from_index_or_flat(index))
    }

    /// Rotation-rate change by raw adjust index; unknown indices become `Noop`.
    pub fn rotation_rate(amount: f32, adjust_index: i64) -> Self {
        match RateAdjust::from_index(adjust_index) {
            Some(adjust) => Self::ModifyRotationRate { amount, adjust },
            None => Self::Noop,
        }
    }
}
