//! Run configuration
//!
//! `PlotConfig` holds everything a run needs: the test characteristics, the
//! prior grid, the highlighted prior, chart labels and the output location.
//! Every field has a default, and the defaults reproduce the polygraph
//! example. Values come from an optional YAML file, then CLI overrides.

use std::fmt;
use std::path::{Path, PathBuf};

use bayesplot_core::{ParameterError, PriorSweep, TestCharacteristics};
use serde::{Deserialize, Serialize};

/// Name of the config file looked up in the data directory
pub const CONFIG_FILE_NAME: &str = "config.yaml";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlotConfig {
    /// Pr(+|H)
    pub sensitivity: f64,
    /// Pr(+|¬H)
    pub false_positive_rate: f64,
    /// Prior reported on stdout and highlighted on the chart
    pub example_prior: f64,
    pub sweep: PriorSweep,
    pub output: OutputConfig,
    pub labels: LabelConfig,
    /// Show the terminal chart and wait for a key press before exiting
    pub interactive: bool,
}

impl Default for PlotConfig {
    fn default() -> Self {
        let reference = TestCharacteristics::REFERENCE;
        Self {
            sensitivity: reference.sensitivity,
            false_positive_rate: reference.false_positive_rate,
            example_prior: 0.05,
            sweep: PriorSweep::default(),
            output: OutputConfig::default(),
            labels: LabelConfig::default(),
            interactive: true,
        }
    }
}

/// Where chart files are written. Existing files are overwritten.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub dir: PathBuf,
    /// File stem shared by the vector and raster charts
    pub base_name: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("."),
            base_name: "posteriors".to_string(),
        }
    }
}

impl OutputConfig {
    pub fn svg_path(&self) -> PathBuf {
        self.dir.join(format!("{}.svg", self.base_name))
    }

    pub fn png_path(&self) -> PathBuf {
        self.dir.join(format!("{}.png", self.base_name))
    }
}

/// Names used for the hypothesis in axis titles and legends.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LabelConfig {
    pub hypothesis: String,
    pub negation: String,
}

impl Default for LabelConfig {
    fn default() -> Self {
        Self {
            hypothesis: "Lie".to_string(),
            negation: "No-lie".to_string(),
        }
    }
}

impl LabelConfig {
    /// Horizontal axis title, e.g. `P(Lie)`
    pub fn prior_axis(&self) -> String {
        format!("P({})", self.hypothesis)
    }

    /// Legend entry for the PPV curve, e.g. `P(Lie | +)`
    pub fn ppv_legend(&self) -> String {
        format!("P({} | +)", self.hypothesis)
    }

    /// Legend entry for the NPV curve, e.g. `P(No-lie | -)`
    pub fn npv_legend(&self) -> String {
        format!("P({} | -)", self.negation)
    }
}

/// Values given on the command line; `None` keeps the configured value.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub sensitivity: Option<f64>,
    pub false_positive_rate: Option<f64>,
    pub example_prior: Option<f64>,
    pub output_dir: Option<PathBuf>,
    pub base_name: Option<String>,
    pub no_wait: bool,
}

#[derive(Debug)]
pub enum ConfigError {
    Io { path: PathBuf, source: std::io::Error },
    Parse { path: PathBuf, message: String },
    Invalid(ParameterError),
    EmptyBaseName,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io { path, source } => {
                write!(f, "failed to read {}: {source}", path.display())
            }
            ConfigError::Parse { path, message } => {
                write!(f, "failed to parse {}: {message}", path.display())
            }
            ConfigError::Invalid(e) => write!(f, "invalid configuration: {e}"),
            ConfigError::EmptyBaseName => write!(f, "output base name must not be empty"),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Io { source, .. } => Some(source),
            ConfigError::Invalid(e) => Some(e),
            _ => None,
        }
    }
}

impl From<ParameterError> for ConfigError {
    fn from(e: ParameterError) -> Self {
        ConfigError::Invalid(e)
    }
}

impl PlotConfig {
    /// Parse a YAML document. Missing keys take their defaults.
    pub fn from_yaml(yaml: &str) -> Result<Self, serde_saphyr::Error> {
        serde_saphyr::from_str(yaml)
    }

    pub fn to_yaml(&self) -> Result<String, serde_saphyr::ser::Error> {
        serde_saphyr::to_string(self)
    }

    /// Read and parse a config file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_yaml(&content).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }

    /// Resolve the configuration for a run.
    ///
    /// An explicitly given file must exist. Otherwise `{data_dir}/config.yaml`
    /// is used when present, and the defaults when it is not.
    pub fn load(explicit: Option<&Path>, data_dir: &Path) -> Result<Self, ConfigError> {
        if let Some(path) = explicit {
            tracing::info!(path = %path.display(), "Loading config");
            return Self::from_file(path);
        }

        let default_path = data_dir.join(CONFIG_FILE_NAME);
        if default_path.exists() {
            tracing::info!(path = %default_path.display(), "Loading config");
            Self::from_file(&default_path)
        } else {
            tracing::debug!("No config file found, using defaults");
            Ok(Self::default())
        }
    }

    pub fn apply_overrides(&mut self, overrides: ConfigOverrides) {
        if let Some(v) = overrides.sensitivity {
            self.sensitivity = v;
        }
        if let Some(v) = overrides.false_positive_rate {
            self.false_positive_rate = v;
        }
        if let Some(v) = overrides.example_prior {
            self.example_prior = v;
        }
        if let Some(dir) = overrides.output_dir {
            self.output.dir = dir;
        }
        if let Some(name) = overrides.base_name {
            self.output.base_name = name;
        }
        if overrides.no_wait {
            self.interactive = false;
        }
    }

    /// Validated test characteristics.
    pub fn characteristics(&self) -> Result<TestCharacteristics, ParameterError> {
        TestCharacteristics::new(self.sensitivity, self.false_positive_rate)
    }

    /// Check every parameter before any computation runs.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.characteristics()?;
        if !(self.example_prior.is_finite() && (0.0..=1.0).contains(&self.example_prior)) {
            return Err(ParameterError::ProbabilityOutOfRange {
                name: "example_prior",
                value: self.example_prior,
            }
            .into());
        }
        self.sweep.validate()?;
        if self.output.base_name.trim().is_empty() {
            return Err(ConfigError::EmptyBaseName);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_defaults_match_reference_run() {
        let config = PlotConfig::default();
        assert_eq!(config.sensitivity, 0.7366);
        assert_eq!(config.false_positive_rate, 0.2445);
        assert_eq!(config.example_prior, 0.05);
        assert_eq!(config.sweep.len(), 10_000);
        assert_eq!(config.output.svg_path(), PathBuf::from("./posteriors.svg"));
        assert_eq!(config.output.png_path(), PathBuf::from("./posteriors.png"));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_yaml_keeps_defaults() {
        let yaml = "sensitivity: 0.9\nsweep:\n  step: 0.01\noutput:\n  base_name: chart\n";
        let config = PlotConfig::from_yaml(yaml).unwrap();

        assert_eq!(config.sensitivity, 0.9);
        assert_eq!(config.false_positive_rate, 0.2445);
        assert_eq!(config.sweep.step, 0.01);
        assert_eq!(config.sweep.start, 0.00001);
        assert_eq!(config.output.base_name, "chart");
        assert_eq!(config.labels.hypothesis, "Lie");
    }

    #[test]
    fn test_yaml_roundtrip() {
        let config = PlotConfig::default();
        let yaml = config.to_yaml().unwrap();
        let parsed = PlotConfig::from_yaml(&yaml).unwrap();
        assert_eq!(config, parsed);
    }

    #[test]
    fn test_load_missing_default_file_uses_defaults() {
        let dir = tempdir().unwrap();
        let config = PlotConfig::load(None, dir.path()).unwrap();
        assert_eq!(config, PlotConfig::default());
    }

    #[test]
    fn test_load_missing_explicit_file_fails() {
        let dir = tempdir().unwrap();
        let missing = dir.path().join("nope.yaml");
        let err = PlotConfig::load(Some(&missing), dir.path()).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }

    #[test]
    fn test_load_reads_data_dir_config() {
        let dir = tempdir().unwrap();
        std::fs::write(dir.path().join(CONFIG_FILE_NAME), "example_prior: 0.2\n").unwrap();
        let config = PlotConfig::load(None, dir.path()).unwrap();
        assert_eq!(config.example_prior, 0.2);
    }

    #[test]
    fn test_overrides_take_precedence() {
        let mut config = PlotConfig::default();
        config.apply_overrides(ConfigOverrides {
            sensitivity: Some(0.8),
            base_name: Some("run".to_string()),
            no_wait: true,
            ..Default::default()
        });
        assert_eq!(config.sensitivity, 0.8);
        assert_eq!(config.false_positive_rate, 0.2445);
        assert_eq!(config.output.base_name, "run");
        assert!(!config.interactive);
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let config = PlotConfig {
            false_positive_rate: 1.5,
            ..PlotConfig::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));

        let config = PlotConfig {
            example_prior: -0.1,
            ..PlotConfig::default()
        };
        assert!(config.validate().is_err());

        let mut config = PlotConfig::default();
        config.output.base_name = "  ".to_string();
        assert!(matches!(config.validate(), Err(ConfigError::EmptyBaseName)));
    }

    #[test]
    fn test_validate_rejects_oversized_sweep() {
        let config = PlotConfig::from_yaml("sweep:\n  step: 1.0e-300\n").unwrap();
        let err = config.validate().unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Invalid(ParameterError::TooManySamples { .. })
        ));
    }

    #[test]
    fn test_labels() {
        let labels = LabelConfig::default();
        assert_eq!(labels.prior_axis(), "P(Lie)");
        assert_eq!(labels.ppv_legend(), "P(Lie | +)");
        assert_eq!(labels.npv_legend(), "P(No-lie | -)");
    }
}
