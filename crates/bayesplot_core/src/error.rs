use std::fmt;

/// Errors raised when validating test characteristics or a prior sweep.
///
/// The posterior formula itself never returns an error; these are checked
/// once, before any computation runs.
#[derive(Debug, Clone, PartialEq)]
pub enum ParameterError {
    /// A probability parameter is outside [0, 1] or not finite
    ProbabilityOutOfRange { name: &'static str, value: f64 },
    /// Sweep bounds must satisfy `0 < start < stop <= 1`
    InvalidSweepBounds { start: f64, stop: f64 },
    /// Sweep step must be finite and strictly positive
    InvalidSweepStep(f64),
    /// Sweep step is so small the grid would exceed the sample cap
    TooManySamples { samples: f64, max: usize },
}

impl fmt::Display for ParameterError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParameterError::ProbabilityOutOfRange { name, value } => {
                write!(f, "{name} must be a probability in [0, 1], got {value}")
            }
            ParameterError::InvalidSweepBounds { start, stop } => {
                write!(
                    f,
                    "invalid sweep bounds (start={start}, stop={stop}): expected 0 < start < stop <= 1"
                )
            }
            ParameterError::InvalidSweepStep(step) => {
                write!(f, "sweep step must be positive, got {step}")
            }
            ParameterError::TooManySamples { samples, max } => {
                write!(
                    f,
                    "sweep would produce {samples:e} samples, more than the limit of {max}"
                )
            }
        }
    }
}

impl std::error::Error for ParameterError {}

pub type Result<T> = std::result::Result<T, ParameterError>;

/// Check that `value` is a finite probability.
pub(crate) fn check_probability(name: &'static str, value: f64) -> Result<f64> {
    if value.is_finite() && (0.0..=1.0).contains(&value) {
        Ok(value)
    } else {
        Err(ParameterError::ProbabilityOutOfRange { name, value })
    }
}
