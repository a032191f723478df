//! Annual return sampling
//!
//! Each simulated year is a single random regime: one return is drawn per
//! year from the tier's range and held for all twelve months of that year.

use rand::Rng;
use rand_distr::{Distribution, Uniform};

use crate::error::ValidationError;
use crate::model::ReturnRange;

/// Draws independent uniform annual returns (in percent) for one risk tier.
///
/// The sampler owns only the immutable distribution; all randomness comes
/// from the RNG passed to each call.
#[derive(Debug, Clone)]
pub struct ReturnPathSampler {
    draw: AnnualDraw,
}

#[derive(Debug, Clone)]
enum AnnualDraw {
    Uniform(Uniform<f64>),
    /// `min_pct == max_pct`
    Constant(f64),
}

impl ReturnPathSampler {
    pub fn new(range: ReturnRange) -> Result<Self, ValidationError> {
        range.validate("return_range")?;
        let draw = if range.min_pct == range.max_pct {
            AnnualDraw::Constant(range.min_pct)
        } else {
            let uniform = Uniform::new(range.min_pct, range.max_pct)
                .map_err(|e| ValidationError::new("return_range", e.to_string()))?;
            AnnualDraw::Uniform(uniform)
        };
        Ok(Self { draw })
    }

    /// Draw a single annual return
    pub fn sample_year<R: Rng + ?Sized>(&self, rng: &mut R) -> f64 {
        match &self.draw {
            AnnualDraw::Uniform(uniform) => uniform.sample(rng),
            AnnualDraw::Constant(value) => *value,
        }
    }

    /// Draw one annual return per year of the horizon
    pub fn sample_path<R: Rng + ?Sized>(&self, rng: &mut R, years: u32) -> Vec<f64> {
        (0..years).map(|_| self.sample_year(rng)).collect()
    }

    /// Refill `buf` in place, reusing its allocation across trials
    pub fn fill_path<R: Rng + ?Sized>(&self, rng: &mut R, years: u32, buf: &mut Vec<f64>) {
        buf.clear();
        buf.extend((0..years).map(|_| self.sample_year(rng)));
    }
}
