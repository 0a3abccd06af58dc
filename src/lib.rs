pub mod error;
pub mod data_loading;
pub mod processing;
pub mod models;
pub mod evaluation;
pub mod pipeline;
pub mod logging;

pub use error::{FlareError, Result};
pub use data_loading::{DataLoader, DataLoaderFactory, FlareDataLoader, FlareDataset, FlareRecord};
pub use evaluation::{
    evaluate_correlation, evaluate_rates, CorrelationReport, EvaluationMode, EvaluationReport,
    ModelEvaluator, RateReport,
};
pub use models::{IModel, MlpWrapper, ModelFactory, TreeWrapper};
pub use pipeline::{Experiment, ExperimentBuilder, ExperimentConfig, ExperimentDirector};
pub use processing::{OneHotEncoder, PredictionMode, SplitPolicy};
