use serde::Serialize;

/// Poradie tried erupcií v maticiach predikcií aj skutočných hodnôt
pub const FLARE_CLASSES: [&str; 3] = ["C", "M", "X"];

/// Spôsob evaluácie, ktorý si volí volajúci
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EvaluationMode {
    Rates,
    Correlation,
}

/// Chybovosť jednej triedy (Mode A)
///
/// Miera je `None`, ak je jej menovateľ nulový. Surové počty sú vždy vyplnené,
/// aby bolo z reportu vidieť, prečo miera chýba.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClassRates {
    pub class: String,
    pub samples: usize,
    pub true_positive: f64,
    pub true_negative: f64,
    pub false_negative: f64,
    pub false_positive: f64,
    pub false_negative_rate: Option<f64>,
    pub false_positive_rate: Option<f64>,
}

impl ClassRates {
    pub fn has_undefined_rate(&self) -> bool {
        self.false_negative_rate.is_none() || self.false_positive_rate.is_none()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RateReport {
    pub classes: Vec<ClassRates>,
}

impl RateReport {
    pub fn get(&self, class: &str) -> Option<&ClassRates> {
        self.classes.iter().find(|c| c.class == class)
    }

    pub fn iter(&self) -> impl Iterator<Item = &ClassRates> {
        self.classes.iter()
    }
}

/// Pearsonova korelácia jednej triedy (Mode B)
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClassCorrelation {
    pub class: String,
    pub samples: usize,
    pub coefficient: f64,
    pub p_value: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CorrelationReport {
    pub classes: Vec<ClassCorrelation>,
}

impl CorrelationReport {
    pub fn get(&self, class: &str) -> Option<&ClassCorrelation> {
        self.classes.iter().find(|c| c.class == class)
    }

    pub fn iter(&self) -> impl Iterator<Item = &ClassCorrelation> {
        self.classes.iter()
    }
}

/// Výsledok evaluácie pre prezentačnú vrstvu
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum EvaluationReport {
    Rates(RateReport),
    Correlation(CorrelationReport),
}

impl EvaluationReport {
    pub fn mode(&self) -> EvaluationMode {
        match self {
            Self::Rates(_) => EvaluationMode::Rates,
            Self::Correlation(_) => EvaluationMode::Correlation,
        }
    }
}

impl From<RateReport> for EvaluationReport {
    fn from(report: RateReport) -> Self {
        Self::Rates(report)
    }
}

impl From<CorrelationReport> for EvaluationReport {
    fn from(report: CorrelationReport) -> Self {
        Self::Correlation(report)
    }
}
