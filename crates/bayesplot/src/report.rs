//! Text produced for the example prior: the stdout summary and the chart
//! annotations.

use bayesplot_core::{PredictiveValues, TestCharacteristics};

/// One-line summary for the example prior.
///
/// Values are computed directly at `prior`, not read from the sweep, and are
/// printed at full `f64` precision.
pub fn summary_line(test: &TestCharacteristics, prior: f64) -> String {
    format!("PrHE={} - PrnHnE={}", test.ppv(prior), test.npv(prior))
}

/// Probability with four decimals, as used in annotations
pub fn format_probability(value: f64) -> String {
    format!("{value:.4}")
}

/// Annotation for the highlighted point on the PPV curve.
pub fn positive_annotation(values: &PredictiveValues) -> [String; 2] {
    [
        format!("True positives (PPV)={}", format_probability(values.ppv)),
        format!("False positives (FDR)={}", format_probability(values.fdr)),
    ]
}

/// Annotation for the highlighted point on the NPV curve.
pub fn negative_annotation(values: &PredictiveValues) -> [String; 2] {
    [
        format!("True negatives (NPV)={}", format_probability(values.npv)),
        format!(
            "False negatives (FOR)={}",
            format_probability(values.false_omission)
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_line_full_precision() {
        let line = summary_line(&TestCharacteristics::REFERENCE, 0.05);
        assert_eq!(line, "PrHE=0.13686107653146543 - PrnHnE=0.9819809959022842");
    }

    #[test]
    fn test_annotations() {
        let values = TestCharacteristics::REFERENCE.predictive_values(0.05001);
        assert_eq!(
            positive_annotation(&values),
            [
                "True positives (PPV)=0.1369".to_string(),
                "False positives (FDR)=0.8631".to_string()
            ]
        );
        assert_eq!(
            negative_annotation(&values),
            [
                "True negatives (NPV)=0.9820".to_string(),
                "False negatives (FOR)=0.0180".to_string()
            ]
        );
    }

    #[test]
    fn test_nan_is_printed_not_hidden() {
        let degenerate = TestCharacteristics {
            sensitivity: 0.0,
            false_positive_rate: 0.0,
        };
        assert_eq!(summary_line(&degenerate, 0.0), "PrHE=NaN - PrnHnE=1");
    }
}
