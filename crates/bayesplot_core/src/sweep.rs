//! Prior sweep: evaluate the posterior curves over a uniform grid of priors.

#[cfg(feature = "parallel")]
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::error::{ParameterError, Result};
use crate::posterior::{PredictiveValues, TestCharacteristics};

/// Largest grid a sweep may produce. The default grid has 10 000 samples.
pub const MAX_SAMPLES: usize = 10_000_000;

/// Uniform grid over the open interval (0, 1).
///
/// Samples are `start + i * step` for every `i` with `start + i * step < stop`,
/// so `stop` itself is never included. The defaults reproduce a 10 000 point
/// grid from `0.00001` in steps of `0.0001`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PriorSweep {
    pub start: f64,
    pub stop: f64,
    pub step: f64,
}

impl Default for PriorSweep {
    fn default() -> Self {
        Self {
            start: 0.00001,
            stop: 1.0,
            step: 0.0001,
        }
    }
}

impl PriorSweep {
    /// Reject grids that would touch the degenerate endpoints, be empty, or
    /// hold more than [`MAX_SAMPLES`] priors.
    pub fn validate(&self) -> Result<()> {
        if !(self.step.is_finite() && self.step > 0.0) {
            return Err(ParameterError::InvalidSweepStep(self.step));
        }
        let bounds_ok = self.start.is_finite()
            && self.stop.is_finite()
            && self.start > 0.0
            && self.stop <= 1.0
            && self.start < self.stop;
        if !bounds_ok {
            return Err(ParameterError::InvalidSweepBounds {
                start: self.start,
                stop: self.stop,
            });
        }
        let samples = self.sample_count();
        if samples > MAX_SAMPLES as f64 {
            return Err(ParameterError::TooManySamples {
                samples,
                max: MAX_SAMPLES,
            });
        }
        Ok(())
    }

    fn sample_count(&self) -> f64 {
        ((self.stop - self.start) / self.step).ceil()
    }

    /// Number of samples, `ceil((stop - start) / step)`. Zero for a grid that
    /// fails [`validate`](Self::validate).
    #[must_use]
    pub fn len(&self) -> usize {
        if self.validate().is_err() {
            return 0;
        }
        self.sample_count() as usize
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Prior at sample `index`. Does not check `index < len()`.
    #[must_use]
    pub fn value(&self, index: usize) -> f64 {
        self.start + index as f64 * self.step
    }

    /// All priors in ascending order.
    #[must_use]
    pub fn priors(&self) -> Vec<f64> {
        (0..self.len()).map(|i| self.value(i)).collect()
    }

    /// Index of the sample closest to `target`, clamped to the grid.
    ///
    /// Returns `None` for an empty grid or a non-finite target.
    #[must_use]
    pub fn nearest_index(&self, target: f64) -> Option<usize> {
        let len = self.len();
        if len == 0 || !target.is_finite() {
            return None;
        }
        let offset = ((target - self.start) / self.step).round();
        if offset <= 0.0 {
            return Some(0);
        }
        Some((offset as usize).min(len - 1))
    }

    /// Evaluate the posterior curves over this grid.
    #[must_use]
    pub fn evaluate(&self, characteristics: &TestCharacteristics) -> PosteriorCurves {
        sweep(characteristics, &self.priors())
    }
}

/// Posterior curves over a prior sweep, stored column-wise.
///
/// All five vectors have the same length and share the ordering of `prior`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PosteriorCurves {
    pub prior: Vec<f64>,
    pub ppv: Vec<f64>,
    pub fdr: Vec<f64>,
    pub npv: Vec<f64>,
    pub false_omission: Vec<f64>,
}

impl PosteriorCurves {
    #[must_use]
    pub fn len(&self) -> usize {
        self.prior.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.prior.is_empty()
    }

    /// The four derived values at sweep index `index`.
    #[must_use]
    pub fn sample(&self, index: usize) -> Option<PredictiveValues> {
        Some(PredictiveValues {
            prior: *self.prior.get(index)?,
            ppv: self.ppv[index],
            fdr: self.fdr[index],
            npv: self.npv[index],
            false_omission: self.false_omission[index],
        })
    }

    /// `(prior, ppv)` pairs, the format chart widgets consume.
    #[must_use]
    pub fn ppv_points(&self) -> Vec<(f64, f64)> {
        zip_points(&self.prior, &self.ppv)
    }

    /// `(prior, npv)` pairs.
    #[must_use]
    pub fn npv_points(&self) -> Vec<(f64, f64)> {
        zip_points(&self.prior, &self.npv)
    }
}

fn zip_points(xs: &[f64], ys: &[f64]) -> Vec<(f64, f64)> {
    xs.iter().copied().zip(ys.iter().copied()).collect()
}

/// Apply the paired posterior computation to every prior, in order.
///
/// Each sample is independent. With the `parallel` feature the map runs on
/// rayon; the indexed `collect` keeps results in the order of `priors`.
#[must_use]
pub fn sweep(characteristics: &TestCharacteristics, priors: &[f64]) -> PosteriorCurves {
    let evaluate = |&prior: &f64| (characteristics.ppv(prior), characteristics.npv(prior));

    #[cfg(feature = "parallel")]
    let pairs: Vec<(f64, f64)> = priors.par_iter().map(evaluate).collect();

    #[cfg(not(feature = "parallel"))]
    let pairs: Vec<(f64, f64)> = priors.iter().map(evaluate).collect();

    let (ppv, npv): (Vec<f64>, Vec<f64>) = pairs.into_iter().unzip();
    let fdr = ppv.iter().map(|v| 1.0 - v).collect();
    let false_omission = npv.iter().map(|v| 1.0 - v).collect();

    PosteriorCurves {
        prior: priors.to_vec(),
        ppv,
        fdr,
        npv,
        false_omission,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_grid_len() {
        let grid = PriorSweep::default();
        assert_eq!(grid.len(), 10_000);
        assert!(grid.value(0) > 0.0);
        assert!(grid.value(grid.len() - 1) < 1.0);
    }

    #[test]
    fn test_nearest_index_matches_reference_highlight() {
        let grid = PriorSweep::default();
        assert_eq!(grid.nearest_index(0.05), Some(500));
        assert!((grid.value(500) - 0.05001).abs() < 1e-12);
    }

    #[test]
    fn test_nearest_index_clamps() {
        let grid = PriorSweep::default();
        assert_eq!(grid.nearest_index(-3.0), Some(0));
        assert_eq!(grid.nearest_index(2.0), Some(9_999));
        assert_eq!(grid.nearest_index(f64::NAN), None);
    }

    #[test]
    fn test_validate_rejects_endpoints() {
        let closed_low = PriorSweep {
            start: 0.0,
            ..PriorSweep::default()
        };
        assert!(matches!(
            closed_low.validate(),
            Err(ParameterError::InvalidSweepBounds { .. })
        ));

        let past_one = PriorSweep {
            stop: 1.5,
            ..PriorSweep::default()
        };
        assert!(past_one.validate().is_err());

        let zero_step = PriorSweep {
            step: 0.0,
            ..PriorSweep::default()
        };
        assert_eq!(
            zero_step.validate(),
            Err(ParameterError::InvalidSweepStep(0.0))
        );
        assert!(zero_step.is_empty());
    }

    #[test]
    fn test_tiny_step_hits_sample_cap() {
        for step in [1e-300, 1e-10] {
            let grid = PriorSweep {
                step,
                ..PriorSweep::default()
            };
            assert!(matches!(
                grid.validate(),
                Err(ParameterError::TooManySamples { max: MAX_SAMPLES, .. })
            ));
            assert_eq!(grid.len(), 0);
            assert!(grid.priors().is_empty());
            assert_eq!(grid.nearest_index(0.05), None);
        }
    }

    #[test]
    fn test_fine_grid_under_cap_is_accepted() {
        let grid = PriorSweep {
            start: 0.5,
            stop: 1.0,
            step: 1e-6,
        };
        assert!(grid.validate().is_ok());
        assert!(grid.len() >= 500_000 && grid.len() <= MAX_SAMPLES);
    }

    #[test]
    fn test_sample_out_of_bounds() {
        let curves = sweep(&TestCharacteristics::REFERENCE, &[0.1, 0.2]);
        assert!(curves.sample(1).is_some());
        assert!(curves.sample(2).is_none());
    }
}
