//! Bayes' rule for a binary hypothesis and a binary test outcome.
//!
//! Notation follows the usual screening-test vocabulary: `H` is the hypothesis
//! (e.g. "is lying"), `E` is a positive test outcome.

use serde::{Deserialize, Serialize};

use crate::error::{Result, check_probability};

/// Posterior probability of a hypothesis given evidence.
///
/// ```text
/// Pr(H|E) = Pr(E|H) Pr(H) / (Pr(E|H) Pr(H) + Pr(E|¬H) (1 - Pr(H)))
/// ```
///
/// # Arguments
/// * `likelihood_given_h` - Pr(E|H)
/// * `prior_h` - Pr(H)
/// * `likelihood_given_not_h` - Pr(E|¬H)
///
/// Inputs are not validated. When the denominator is zero (for example
/// `posterior(0.0, 0.0, 0.0)`, or `prior_h == 0` with `likelihood_given_not_h == 0`)
/// the result is NaN. That value is returned as is and flows into whatever
/// consumes it; it is never coerced to zero.
#[inline]
#[must_use]
pub fn posterior(likelihood_given_h: f64, prior_h: f64, likelihood_given_not_h: f64) -> f64 {
    let joint = likelihood_given_h * prior_h;
    joint / (joint + likelihood_given_not_h * (1.0 - prior_h))
}

/// Fixed operating characteristics of a binary test.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TestCharacteristics {
    /// Pr(+|H), the true-positive rate
    pub sensitivity: f64,
    /// Pr(+|¬H), one minus specificity
    pub false_positive_rate: f64,
}

impl TestCharacteristics {
    /// Sensitivity and false-positive rate of the polygraph example.
    pub const REFERENCE: Self = Self {
        sensitivity: 0.7366,
        false_positive_rate: 0.2445,
    };

    /// Build characteristics after checking both rates are probabilities.
    pub fn new(sensitivity: f64, false_positive_rate: f64) -> Result<Self> {
        Ok(Self {
            sensitivity: check_probability("sensitivity", sensitivity)?,
            false_positive_rate: check_probability("false_positive_rate", false_positive_rate)?,
        })
    }

    /// Pr(-|¬H)
    #[must_use]
    pub fn specificity(&self) -> f64 {
        1.0 - self.false_positive_rate
    }

    /// Positive predictive value, Pr(H|+).
    #[must_use]
    pub fn ppv(&self, prior: f64) -> f64 {
        posterior(self.sensitivity, prior, self.false_positive_rate)
    }

    /// Negative predictive value, Pr(¬H|-).
    ///
    /// Same formula with complemented inputs: specificity as the likelihood,
    /// `1 - prior` as the prior, and `1 - sensitivity` as the alternative.
    #[must_use]
    pub fn npv(&self, prior: f64) -> f64 {
        posterior(self.specificity(), 1.0 - prior, 1.0 - self.sensitivity)
    }

    /// All four derived values at a single prior.
    #[must_use]
    pub fn predictive_values(&self, prior: f64) -> PredictiveValues {
        PredictiveValues::from_posteriors(prior, self.ppv(prior), self.npv(prior))
    }
}

impl Default for TestCharacteristics {
    fn default() -> Self {
        Self::REFERENCE
    }
}

/// The four posterior quantities at one prior.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PredictiveValues {
    pub prior: f64,
    /// Pr(H|+)
    pub ppv: f64,
    /// 1 - PPV
    pub fdr: f64,
    /// Pr(¬H|-)
    pub npv: f64,
    /// 1 - NPV
    pub false_omission: f64,
}

impl PredictiveValues {
    pub(crate) fn from_posteriors(prior: f64, ppv: f64, npv: f64) -> Self {
        Self {
            prior,
            ppv,
            fdr: 1.0 - ppv,
            npv,
            false_omission: 1.0 - npv,
        }
    }

    /// True when every value is a number (no zero-denominator sample).
    #[must_use]
    pub fn is_finite(&self) -> bool {
        self.ppv.is_finite() && self.npv.is_finite()
    }
}
