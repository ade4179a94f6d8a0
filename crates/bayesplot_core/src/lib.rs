//! Posterior probability curves for a binary test
//!
//! This crate applies Bayes' rule to a test with fixed sensitivity and
//! false-positive rate, sweeping the prior prevalence of the hypothesis.
//! It provides:
//! - The closed-form posterior for one prior (`posterior`)
//! - Positive and negative predictive values with their complements
//! - A uniform prior grid over (0, 1) and an order-preserving sweep
//!
//! ```ignore
//! use bayesplot_core::{PriorSweep, TestCharacteristics};
//!
//! let test = TestCharacteristics::new(0.7366, 0.2445)?;
//! let curves = PriorSweep::default().evaluate(&test);
//! let at_five_percent = curves.sample(500).unwrap();
//! ```

#![warn(clippy::all)]

// ============================================================================
// Core modules
// ============================================================================

pub mod error;
pub mod posterior;
pub mod sweep;

// ============================================================================
// Test modules
// ============================================================================

#[cfg(test)]
mod tests;

// ============================================================================
// Public re-exports for convenience
// ============================================================================

pub use error::ParameterError;
pub use posterior::{PredictiveValues, TestCharacteristics, posterior};
pub use sweep::{MAX_SAMPLES, PosteriorCurves, PriorSweep, sweep};
