//! Posterior predictive value charts
//!
//! Application layer around `bayesplot_core`: configuration, logging, the
//! stdout summary, chart files (SVG and PNG), the interactive terminal chart
//! and an optional JSON export of the sweep.

pub mod chart;
pub mod config;
pub mod export;
pub mod logging;
pub mod pipeline;
pub mod report;
pub mod view;

#[cfg(test)]
mod tests;

pub use chart::{ChartFiles, PosteriorFigure, write_charts};
pub use config::{ConfigOverrides, PlotConfig};
pub use logging::{LogHandle, init_logging};
pub use pipeline::PosteriorRun;
pub use view::PosteriorView;
