//! JSON export of a sweep for use outside the chart.

use std::fs;
use std::io;
use std::path::Path;

use bayesplot_core::{PosteriorCurves, PredictiveValues, PriorSweep, TestCharacteristics};
use serde::Serialize;

/// Parameters, highlighted sample and the full curves of one run.
///
/// Non-finite posteriors serialize as `null`.
#[derive(Debug, Serialize)]
pub struct SweepExport<'a> {
    pub characteristics: TestCharacteristics,
    pub sweep: PriorSweep,
    pub highlight: PredictiveValues,
    pub curves: &'a PosteriorCurves,
}

impl SweepExport<'_> {
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    /// Write to `path` through a temp file and rename, so an interrupted run
    /// never leaves a truncated export behind.
    pub fn write(&self, path: &Path) -> io::Result<()> {
        let json = self.to_json()?;
        let temp_path = path.with_extension("json.tmp");
        fs::write(&temp_path, json)?;
        fs::rename(&temp_path, path)?;
        tracing::info!(path = %path.display(), samples = self.curves.len(), "Sweep exported");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_export_writes_columns() {
        let grid = PriorSweep {
            start: 0.25,
            stop: 1.0,
            step: 0.25,
        };
        let test = TestCharacteristics::REFERENCE;
        let curves = grid.evaluate(&test);
        let export = SweepExport {
            characteristics: test,
            sweep: grid,
            highlight: curves.sample(0).unwrap(),
            curves: &curves,
        };

        let dir = tempdir().unwrap();
        let path = dir.path().join("sweep.json");
        export.write(&path).unwrap();

        let value: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(value["curves"]["prior"].as_array().unwrap().len(), 3);
        assert_eq!(value["characteristics"]["sensitivity"], 0.7366);
        assert_eq!(value["highlight"]["prior"], 0.25);
        assert!(!path.with_extension("json.tmp").exists());
    }

    #[test]
    fn test_nan_serializes_as_null() {
        let test = TestCharacteristics {
            sensitivity: 0.0,
            false_positive_rate: 0.0,
        };
        let curves = bayesplot_core::sweep(&test, &[0.5]);
        let export = SweepExport {
            characteristics: test,
            sweep: PriorSweep::default(),
            highlight: curves.sample(0).unwrap(),
            curves: &curves,
        };

        let value: serde_json::Value = serde_json::from_str(&export.to_json().unwrap()).unwrap();
        assert!(value["curves"]["ppv"][0].is_null());
    }
}
