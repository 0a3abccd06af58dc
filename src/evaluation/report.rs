use super::metrics::{CorrelationReport, EvaluationReport, RateReport};
use crate::error::Result;
use std::fmt;

/// Výstupný formát reportu
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportFormat {
    Text,
    Json,
}

/// Vykreslí report v zvolenom formáte
pub fn render(report: &EvaluationReport, format: ReportFormat) -> Result<String> {
    match format {
        ReportFormat::Text => Ok(report.to_string()),
        ReportFormat::Json => Ok(serde_json::to_string_pretty(report)?),
    }
}

fn fmt_rate(rate: Option<f64>) -> String {
    match rate {
        Some(value) => format!("{:.4}", value),
        None => "undefined".to_string(),
    }
}

impl fmt::Display for RateReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "=== False negative / false positive rates ===")?;
        writeln!(
            f,
            "{:<6} {:>8} {:>8} {:>8} {:>8} {:>10} {:>10}",
            "class", "TP", "TN", "FN", "FP", "fn_rate", "fp_rate"
        )?;
        for class in self.iter() {
            writeln!(
                f,
                "{:<6} {:>8.2} {:>8.2} {:>8.2} {:>8.2} {:>10} {:>10}",
                class.class,
                class.true_positive,
                class.true_negative,
                class.false_negative,
                class.false_positive,
                fmt_rate(class.false_negative_rate),
                fmt_rate(class.false_positive_rate),
            )?;
        }
        Ok(())
    }
}

impl fmt::Display for CorrelationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "=== Pearson correlation ===")?;
        writeln!(f, "{:<6} {:>8} {:>12} {:>12}", "class", "n", "r", "p_value")?;
        for class in self.iter() {
            writeln!(
                f,
                "{:<6} {:>8} {:>12.4} {:>12.4e}",
                class.class, class.samples, class.coefficient, class.p_value
            )?;
        }
        Ok(())
    }
}

impl fmt::Display for EvaluationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Rates(report) => fmt::Display::fmt(report, f),
            Self::Correlation(report) => fmt::Display::fmt(report, f),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::evaluation::metrics::{ClassCorrelation, ClassRates};

    fn rates() -> RateReport {
        RateReport {
            classes: vec![ClassRates {
                class: "X".to_string(),
                samples: 4,
                true_positive: 0.0,
                true_negative: 4.0,
                false_negative: 0.0,
                false_positive: 1.0,
                false_negative_rate: None,
                false_positive_rate: Some(0.25),
            }],
        }
    }

    #[test]
    fn text_marks_undefined_rates() {
        let text = render(&rates().into(), ReportFormat::Text).unwrap();
        assert!(text.contains("undefined"));
        assert!(text.contains("0.2500"));
    }

    #[test]
    fn json_is_tagged_by_mode() {
        let report: EvaluationReport = CorrelationReport {
            classes: vec![ClassCorrelation {
                class: "C".to_string(),
                samples: 10,
                coefficient: 0.5,
                p_value: 0.14,
            }],
        }
        .into();
        let json = render(&report, ReportFormat::Json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["mode"], "correlation");
        assert_eq!(value["classes"][0]["class"], "C");

        let json = render(&rates().into(), ReportFormat::Json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["mode"], "rates");
        assert!(value["classes"][0]["false_negative_rate"].is_null());
    }
}
