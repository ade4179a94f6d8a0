//! One run: validate, compute the sweep, then hand results to the outputs.

use bayesplot_core::{
    ParameterError, PosteriorCurves, PredictiveValues, TestCharacteristics,
};

use crate::chart::PosteriorFigure;
use crate::config::{ConfigError, LabelConfig, PlotConfig};
use crate::export::SweepExport;
use crate::report::summary_line;

/// Everything computed for a run, before any output is written.
#[derive(Debug, Clone)]
pub struct PosteriorRun {
    pub characteristics: TestCharacteristics,
    pub curves: PosteriorCurves,
    /// Sweep sample nearest the example prior
    pub highlight: PredictiveValues,
    /// Stdout line for the exact example prior
    pub summary: String,
}

impl PosteriorRun {
    pub fn compute(config: &PlotConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let characteristics = config.characteristics()?;

        let curves = config.sweep.evaluate(&characteristics);
        let highlight = config
            .sweep
            .nearest_index(config.example_prior)
            .and_then(|i| curves.sample(i))
            .ok_or(ParameterError::InvalidSweepBounds {
                start: config.sweep.start,
                stop: config.sweep.stop,
            })?;

        if !highlight.is_finite() {
            tracing::warn!(
                prior = highlight.prior,
                "Posterior is undefined at the highlighted prior (zero denominator)"
            );
        }
        tracing::info!(
            samples = curves.len(),
            sensitivity = characteristics.sensitivity,
            false_positive_rate = characteristics.false_positive_rate,
            highlight_prior = highlight.prior,
            "Sweep computed"
        );

        Ok(Self {
            characteristics,
            summary: summary_line(&characteristics, config.example_prior),
            curves,
            highlight,
        })
    }

    pub fn figure<'a>(&'a self, labels: &'a LabelConfig) -> PosteriorFigure<'a> {
        PosteriorFigure {
            curves: &self.curves,
            highlight: self.highlight,
            labels,
        }
    }

    pub fn export(&self, config: &PlotConfig) -> SweepExport<'_> {
        SweepExport {
            characteristics: self.characteristics,
            sweep: config.sweep,
            highlight: self.highlight,
            curves: &self.curves,
        }
    }
}
