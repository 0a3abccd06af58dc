pub mod evaluator;
pub mod metrics;
pub mod report;

pub use evaluator::{evaluate_correlation, evaluate_rates, ModelEvaluator};
pub use metrics::{
    ClassCorrelation, ClassRates, CorrelationReport, EvaluationMode, EvaluationReport, RateReport,
    FLARE_CLASSES,
};
pub use report::{render, ReportFormat};
