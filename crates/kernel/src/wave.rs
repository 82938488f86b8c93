use gridwave_common::GridDims;

/// How many cells behind the crest the ridge still lifts.
pub const WAVE_REACH: i32 = 10;

/// Height lost per cell of distance from the crest.
const FALLOFF_STEP: f32 = 0.2;

/// Crest height at distance zero.
const CREST: f32 = 2.0;

/// Position of the traveling ridge.
///
/// Starts at `0`, moves `+1` per procedural frame and wraps from just past
/// `mod_amount` back to `-half_mod`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WaveState {
    increment: i32,
    floor: i32,
    ceiling: i32,
}

impl WaveState {
    pub fn new(dims: GridDims) -> Self {
        Self {
            increment: 0,
            floor: -dims.half_mod(),
            ceiling: dims.mod_amount(),
        }
    }

    pub fn increment(&self) -> i32 {
        self.increment
    }

    pub fn advance(&mut self) {
        self.increment += 1;
        if self.increment > self.ceiling {
            self.increment = self.floor;
        }
    }

    /// Number of distinct positions in one full cycle.
    pub fn period(&self) -> i32 {
        self.ceiling - self.floor + 1
    }
}

/// Ridge height at centered cell `(x, z)` for crest position `increment`.
///
/// Rows and columns contribute independently. Within each axis the leading
/// side (`+j`) takes precedence over the trailing side (`-j`).
pub fn wave_lift(x: i32, z: i32, increment: i32) -> f32 {
    let mut lift = 0.0;
    for j in 0..WAVE_REACH {
        let falloff = CREST - j as f32 * FALLOFF_STEP;

        if z + j == increment {
            lift += falloff / 2.0;
        } else if z - j == increment {
            lift += falloff / 4.0;
        }

        if x + j == increment {
            lift += falloff;
        } else if x - j == increment {
            lift += falloff / 2.0;
        }
    }
    lift
}

#[cfg(test)]
mod tests {
    use super::*;

    fn wave(cells: usize) -> WaveState {
        WaveState::new(GridDims::new(cells).unwrap())
    }

    #[test]
    fn origin_at_crest_lifts_three() {
        assert_eq!(wave_lift(0, 0, 0), 3.0);
    }

    #[test]
    fn far_cells_are_flat() {
        assert_eq!(wave_lift(-20, 15, 0), 0.0);
        assert_eq!(wave_lift(30, 30, 0), 0.0);
    }

    #[test]
    fn trailing_side_uses_smaller_falloff() {
        // x - 2 == 0: half of the j=2 falloff (1.6).
        assert!((wave_lift(2, 50, 0) - 0.8).abs() < 1e-6);
        // x + 2 == 0: full j=2 falloff.
        assert!((wave_lift(-2, 50, 0) - 1.6).abs() < 1e-6);
        // z + 1 == 0 and z - 1 == 0 cannot both hold; z=-1 hits the leading side.
        assert!((wave_lift(50, -1, 0) - 0.9).abs() < 1e-6);
        assert!((wave_lift(50, 1, 0) - 0.45).abs() < 1e-6);
    }

    #[test]
    fn starts_at_zero_and_advances() {
        let mut w = wave(64);
        assert_eq!(w.increment(), 0);
        w.advance();
        assert_eq!(w.increment(), 1);
    }

    #[test]
    fn wraps_after_mod_amount() {
        let mut w = wave(64);
        for _ in 0..8 {
            w.advance();
        }
        assert_eq!(w.increment(), 8);
        w.advance();
        assert_eq!(w.increment(), -4);
    }

    #[test]
    fn cycle_matches_closed_form() {
        for cells in [1, 9, 64, 100, 257] {
            let dims = GridDims::new(cells).unwrap();
            let (m, h) = (dims.mod_amount(), dims.half_mod());
            let mut w = WaveState::new(dims);
            assert_eq!(w.period(), m + h + 1);
            for k in 1..=200 {
                w.advance();
                let expected = (k + h).rem_euclid(m + h + 1) - h;
                assert_eq!(w.increment(), expected, "cells={cells} k={k}");
                assert!((-h..=m).contains(&w.increment()));
            }
        }
    }
}
