use std::f32::consts::TAU;

use glam::Vec3;
use gridwave_common::{Axis, RateAdjust};

/// Uniform scale restored when an update would make it non-positive or
/// non-finite.
pub const SCALE_FLOOR: f32 = 0.02;

/// Scale the grid starts with.
pub const DEFAULT_SCALE: f32 = 0.1;

const FULL_TURN_DEGREES: f32 = 360.0;

/// Camera-side state mutated by discrete control events.
///
/// The animator reads it once per frame; nothing in the per-cell loop
/// writes to it.
#[derive(Debug, Clone, PartialEq)]
pub struct CameraController {
    offset: Vec3,
    scale: f32,
    rotation_rate: f32,
    display_offset: i32,
}

impl Default for CameraController {
    fn default() -> Self {
        Self {
            offset: Vec3::ZERO,
            scale: DEFAULT_SCALE,
            rotation_rate: 0.0,
            display_offset: 0,
        }
    }
}

impl CameraController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from a given scale. Non-positive or non-finite values are
    /// clamped to the floor.
    pub fn with_scale(scale: f32) -> Self {
        let mut controller = Self::default();
        controller.scale = if scale > 0.0 && scale.is_finite() {
            scale
        } else {
            SCALE_FLOOR
        };
        controller
    }

    pub fn offset(&self) -> Vec3 {
        self.offset
    }

    pub fn scale(&self) -> f32 {
        self.scale
    }

    /// Rotation rate in degrees per second.
    pub fn rotation_rate(&self) -> f32 {
        self.rotation_rate
    }

    /// Integer running total of every position change, for on-screen display.
    pub fn display_offset(&self) -> i32 {
        self.display_offset
    }

    /// Non-finite amounts are ignored.
    pub fn modify_position(&mut self, amount: f32, axis: Axis) {
        if !amount.is_finite() {
            tracing::debug!(?axis, amount, "ignoring non-finite camera offset change");
            return;
        }
        self.display_offset += amount as i32;
        match axis {
            Axis::X => self.offset.x += amount,
            Axis::Y => self.offset.y += amount,
            Axis::Z => self.offset.z += amount,
        }
        tracing::debug!(?axis, amount, offset = ?self.offset, "camera offset changed");
    }

    pub fn update_perspective(&mut self, amount: f32) {
        self.scale += amount;
        if !(self.scale > 0.0 && self.scale.is_finite()) {
            tracing::debug!(scale = self.scale, floor = SCALE_FLOOR, "scale clamped to floor");
            self.scale = SCALE_FLOOR;
        }
    }

    /// Adjust the rotation rate. An `amount` of zero resets the rate;
    /// non-finite amounts are ignored.
    ///
    /// The stored rate is wrapped into one turn before the adjustment, not
    /// after, so `+370` from rest leaves the rate at `370`.
    pub fn modify_rotation_rate(&mut self, amount: f32, adjust: RateAdjust) {
        if amount == 0.0 {
            self.rotation_rate = 0.0;
            return;
        }
        if !amount.is_finite() {
            tracing::debug!(amount, "ignoring non-finite rotation rate change");
            return;
        }

        let wrapped = self.rotation_rate % FULL_TURN_DEGREES;
        if wrapped < self.rotation_rate {
            self.rotation_rate = wrapped;
        }

        match adjust {
            RateAdjust::Increase => self.rotation_rate += amount,
            RateAdjust::Decrease => self.rotation_rate -= amount,
        }
        tracing::debug!(rate = self.rotation_rate, "rotation rate changed");
    }

    /// Global Y rotation after `total_seconds` at the current rate, in `[0, 2π)`
    /// for non-negative products.
    pub fn rotation_radians(&self, total_seconds: f64) -> f32 {
        let radians = f64::from(self.rotation_rate.to_radians()) * total_seconds;
        (radians % f64::from(TAU)) as f32
    }
}
