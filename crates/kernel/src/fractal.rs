//! Escape-time height field.
//!
//! A Mandelbrot-style iteration sampled on the integer grid. The iteration
//! budget is `half_mod`, so the output height is bounded by the grid size.

use gridwave_common::GridDims;

const REAL_ORIGIN: f32 = -1.75;
const IMAG_ORIGIN: f32 = -0.25;
const REAL_SPAN: f32 = 0.45;
const IMAG_SPAN: f32 = 0.25;
const ESCAPE_RADIUS_SQ: f32 = 4.0;

/// Height reported when the budget allows no iteration at all.
pub const NO_BUDGET_HEIGHT: i32 = -2;

/// How an escape-time evaluation ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Escape {
    /// `|z|² >= 4` was observed after `steps` iterations.
    Escaped { steps: i32 },
    /// The orbit stayed bounded for the whole budget.
    Bounded,
    /// The budget was zero; nothing was evaluated.
    NoBudget,
}

/// Escape-time evaluator scaled to a grid.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FractalField {
    x_scale: f32,
    y_scale: f32,
    budget: i32,
}

impl FractalField {
    pub fn new(dims: GridDims) -> Self {
        // Grids narrower than 4 cells would divide by zero here.
        let quarter = (dims.mod_amount() >> 2).max(1) as f32;
        Self {
            x_scale: REAL_SPAN / quarter,
            y_scale: IMAG_SPAN / quarter,
            budget: dims.half_mod(),
        }
    }

    pub fn budget(&self) -> i32 {
        self.budget
    }

    /// Classify the orbit of the sample at integer grid position `(x, z)`.
    pub fn escape(&self, x: i32, z: i32) -> Escape {
        if self.budget <= 0 {
            return Escape::NoBudget;
        }
        let cx = x as f32 * self.x_scale + REAL_ORIGIN;
        let cy = z as f32 * self.y_scale + IMAG_ORIGIN;

        let (mut zx, mut zy) = (0.0_f32, 0.0_f32);
        for step in 0..self.budget {
            if zx * zx + zy * zy >= ESCAPE_RADIUS_SQ {
                return Escape::Escaped { steps: step };
            }
            let next_x = zx * zx - zy * zy + cx;
            zy = 2.0 * zx * zy + cy;
            zx = next_x;
        }
        Escape::Bounded
    }

    /// Height of the field at `(x, z)`. Inputs are truncated toward zero.
    ///
    /// The result is the index of the last iteration run: `budget - 1` for a
    /// bounded orbit, `steps - 1` for an escaped one, and
    /// [`NO_BUDGET_HEIGHT`] when the budget is zero.
    pub fn height(&self, x: f32, z: f32) -> i32 {
        match self.escape(x as i32, z as i32) {
            Escape::Escaped { steps } => steps - 1,
            Escape::Bounded => self.budget - 1,
            Escape::NoBudget => NO_BUDGET_HEIGHT,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn field(cells: usize) -> FractalField {
        FractalField::new(GridDims::new(cells).unwrap())
    }

    #[test]
    fn deterministic() {
        let f = field(400);
        for x in -15..15 {
            for z in -15..15 {
                let (a, b) = (f.height(x as f32, z as f32), f.height(x as f32, z as f32));
                assert_eq!(a, b);
            }
        }
    }

    #[test]
    fn bounded_by_budget() {
        for cells in [1, 4, 16, 64, 400, 4096] {
            let f = field(cells);
            for x in -40..40 {
                for z in -40..40 {
                    let h = f.height(x as f32 * 1.5, z as f32 * 1.5);
                    if f.budget() == 0 {
                        assert_eq!(h, NO_BUDGET_HEIGHT);
                    } else {
                        assert!((0..f.budget()).contains(&h), "h={h} cells={cells}");
                    }
                }
            }
        }
    }

    #[test]
    fn zero_budget_reports_sentinel() {
        let f = field(1);
        assert_eq!(f.escape(0, 0), Escape::NoBudget);
        assert_eq!(f.height(3.0, 3.0), NO_BUDGET_HEIGHT);
    }

    #[test]
    fn origin_sample_never_escapes_first_step() {
        // z starts at 0 so the first check always passes.
        let f = field(64);
        assert_ne!(f.escape(500, 500), Escape::Escaped { steps: 0 });
    }

    #[test]
    fn far_sample_escapes_early() {
        let f = field(64);
        // c is far outside the set: |c|² > 4 after one step.
        assert_eq!(f.escape(100, 100), Escape::Escaped { steps: 1 });
        assert_eq!(f.height(100.0, 100.0), 0);
    }

    #[test]
    fn interior_sample_stays_bounded() {
        let f = field(64);
        // x = 4 maps to real part -0.85, z = 1 maps to imaginary -0.125:
        // inside the period-two bulb.
        assert_eq!(f.escape(4, 1), Escape::Bounded);
        assert_eq!(f.height(4.0, 1.0), f.budget() - 1);
    }

    #[test]
    fn inputs_truncate_toward_zero() {
        let f = field(64);
        assert_eq!(f.height(4.9, 1.7), f.height(4.0, 1.0));
        assert_eq!(f.height(-0.9, -0.9), f.height(0.0, 0.0));
    }
}
