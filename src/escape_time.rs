use num::Complex;

use crate::errors::*;

/// An escape-time engine for the Mandelbrot set.
///
/// `max_iterations` is the iteration budget used to decide if a point is a member, and
/// `escape_radius` the magnitude beyond which an orbit is considered to have diverged.
/// Smooth coloring requires an `escape_radius` greater than 1.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MandelbrotSet {
    max_iterations: u64,
    escape_radius: f64,
}

impl MandelbrotSet {
    /// Create a new engine, rejecting a zero iteration budget or a non-positive radius
    pub fn new(max_iterations: u64, escape_radius: f64) -> Result<Self> {
        if max_iterations < 1 {
            invalid_config!("max_iterations must be at least 1");
        }

        if !(escape_radius > 0.0) || !escape_radius.is_finite() {
            invalid_config!("escape_radius must be a finite number > 0, got '{}'", escape_radius);
        }

        Ok(MandelbrotSet {
            max_iterations,
            escape_radius,
        })
    }

    /// The iteration budget
    pub fn max_iterations(&self) -> u64 {
        self.max_iterations
    }

    /// The divergence threshold
    pub fn escape_radius(&self) -> f64 {
        self.escape_radius
    }

    // Iterate z -> z^2 + c from z = 0 and return the loop index and value of z at the first
    // iteration where |z| exceeds the escape radius, or None if the budget was exhausted
    fn escape(&self, c: Complex<f64>) -> Option<(u64, Complex<f64>)> {
        let mut z = Complex { re: 0.0, im: 0.0 };

        for iteration in 0..self.max_iterations {
            z = z * z + c;
            if z.norm() > self.escape_radius {
                return Some((iteration, z));
            }
        }

        None
    }

    /// Count the iterations survived by `c` before its orbit left the escape radius, or
    /// `max_iterations` if it never did.
    pub fn escape_iterations(&self, c: Complex<f64>) -> u64 {
        match self.escape(c) {
            Some((iteration, _)) => iteration,
            None => self.max_iterations,
        }
    }

    /// Return the escape count of `c`.
    ///
    /// Without smoothing this is the same value as `escape_iterations()`. With smoothing a
    /// diverging point gets the continuous value `n + 1 - log2(ln |z|)` where `n` is the loop
    /// index at which `|z|` first exceeded the radius. That is only defined for `|z| > 1`, so
    /// an engine with an `escape_radius` of 1 or less can return a `NumericDomain` error here.
    pub fn escape_count(&self, c: Complex<f64>, smooth: bool) -> Result<f64> {
        match self.escape(c) {
            Some((iteration, z)) if smooth => {
                let magnitude = z.norm();
                if magnitude <= 1.0 {
                    return Err(ErrorKind::NumericDomain(magnitude).into());
                }
                Ok(iteration as f64 + 1.0 - magnitude.ln().ln() / 2f64.ln())
            }
            Some((iteration, _)) => Ok(iteration as f64),
            None => Ok(self.max_iterations as f64),
        }
    }

    /// The escape count of `c` normalized by `max_iterations`, optionally clamped to [0.0, 1.0]
    pub fn stability(&self, c: Complex<f64>, smooth: bool, clamp: bool) -> Result<f64> {
        let value = self.escape_count(c, smooth)? / self.max_iterations as f64;
        if clamp {
            Ok(value.clamp(0.0, 1.0))
        } else {
            Ok(value)
        }
    }

    /// `c` is considered a member of the set if it survives the whole iteration budget.
    /// The unsmoothed count is used so the smoothing correction can't produce false negatives.
    pub fn contains(&self, c: Complex<f64>) -> bool {
        self.escape_iterations(c) == self.max_iterations
    }
}
