use serde::{Deserialize, Serialize};

use crate::complex::Complex;
use crate::error::CoreError;

/// Divergence threshold on `|z|²` (escape radius 2).
const ESCAPE_RADIUS_SQ: f64 = 4.0;

/// Growth factor applied by depth increase/decrease.
pub const DEPTH_GROWTH: f64 = 1.1;

/// Maximum number of `z ← z² + c` steps evaluated per point.
///
/// Always at least 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct IterationBudget(u32);

impl IterationBudget {
    pub const DEFAULT: Self = Self(100);

    pub fn new(max_iterations: u32) -> crate::Result<Self> {
        if max_iterations < 1 {
            return Err(CoreError::InvalidMaxIterations(max_iterations));
        }
        Ok(Self(max_iterations))
    }

    #[inline]
    pub fn get(self) -> u32 {
        self.0
    }

    /// `m ← m · 1.1 + 1`, truncated. Saturates at `u32::MAX`.
    pub fn increase(&mut self) {
        self.0 = (self.0 as f64 * DEPTH_GROWTH + 1.0) as u32;
    }

    /// `m ← m / 1.1 + 1`, truncated and floored at 1.
    pub fn decrease(&mut self) {
        self.0 = ((self.0 as f64 / DEPTH_GROWTH + 1.0) as u32).max(1);
    }
}

impl Default for IterationBudget {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl TryFrom<u32> for IterationBudget {
    type Error = CoreError;

    fn try_from(value: u32) -> crate::Result<Self> {
        Self::new(value)
    }
}

impl From<IterationBudget> for u32 {
    fn from(budget: IterationBudget) -> u32 {
        budget.0
    }
}

/// Escape-time evaluation of `z ← z² + c` from `z = 0` under a fixed budget.
///
/// Stateless apart from the budget, so a single instance can be shared by
/// every worker of a frame.
#[derive(Debug, Clone, Copy)]
pub struct EscapeTime {
    budget: IterationBudget,
}

impl EscapeTime {
    pub fn new(budget: IterationBudget) -> Self {
        Self { budget }
    }

    /// Number of steps taken before `|z|² > 4`, or the budget if the orbit
    /// stays bounded.
    ///
    /// The magnitude test runs before each step, so the step that carries
    /// `z` past the threshold is counted.
    #[inline]
    pub fn iterations(&self, c: Complex) -> u32 {
        let max_iter = self.budget.get();

        // Closed-form interior checks; the loop below would run out the
        // budget for these points anyway.
        if in_cardioid(c.re, c.im) || in_period2_bulb(c.re, c.im) {
            return max_iter;
        }

        let (mut z_re, mut z_im) = (0.0f64, 0.0f64);
        let mut n = 0;
        while n < max_iter && z_re * z_re + z_im * z_im <= ESCAPE_RADIUS_SQ {
            let re = z_re * z_re - z_im * z_im + c.re;
            z_im = 2.0 * z_re * z_im + c.im;
            z_re = re;
            n += 1;
        }
        n
    }

    /// Normalized escape value in `[0, 1]`.
    ///
    /// Exactly `1.0` means the orbit did not escape within the budget.
    #[inline]
    pub fn fraction(&self, c: Complex) -> f64 {
        self.iterations(c) as f64 / self.budget.get() as f64
    }
}

/// Returns `true` if `c` lies inside the main cardioid.
#[inline]
fn in_cardioid(re: f64, im: f64) -> bool {
    let im2 = im * im;
    let q = (re - 0.25) * (re - 0.25) + im2;
    q * (q + (re - 0.25)) <= 0.25 * im2
}

/// Returns `true` if `c` lies inside the period-2 bulb.
#[inline]
fn in_period2_bulb(re: f64, im: f64) -> bool {
    (re + 1.0) * (re + 1.0) + im * im <= 0.0625
}
