use crate::data_loading::FlareDataset;
use crate::error::Result;
use crate::evaluation::{
    CorrelationReport, EvaluationMode, EvaluationReport, ModelEvaluator, RateReport,
};
use crate::models::IModel;
use crate::processing::{OneHotEncoder, PredictionMode, SplitPolicy};
use super::builder::ExperimentBuilder;
use ndarray::{Array2, Axis};
use serde::Serialize;
use std::fmt;
use tracing::info;

/// Facade pre celý experiment
/// Zapuzdruje kódovanie, delenie, tréning a predikciu
pub struct Experiment {
    pub(crate) model: Box<dyn IModel>,
    pub(crate) model_type: String,
    pub(crate) split: Box<dyn SplitPolicy>,
    pub(crate) prediction_mode: PredictionMode,
    pub(crate) evaluator: ModelEvaluator,
    pub(crate) encoder: OneHotEncoder,
}

impl Experiment {
    /// Vytvorí builder pre konfiguráciu experimentu
    pub fn builder() -> ExperimentBuilder {
        ExperimentBuilder::new()
    }

    /// Názvy stĺpcov po kódovaní (dostupné po `run`)
    pub fn feature_names(&self) -> Result<Vec<String>> {
        self.encoder.feature_names()
    }

    /// Komplétny workflow: kódovanie, delenie, tréning, predikcia na testovacej časti.
    ///
    /// Encoder sa učí kategórie z celého datasetu, aby testovacia časť
    /// neobsahovala neznáme kódy.
    pub fn run(&mut self, data: &FlareDataset) -> Result<ExperimentOutcome> {
        let x = self.encoder.fit_transform(data)?;
        let y = data.targets();

        let indices = self.split.split(data.num_samples())?;
        let x_train = x.select(Axis(0), &indices.train);
        let y_train = y.select(Axis(0), &indices.train);
        let x_test = x.select(Axis(0), &indices.test);
        let y_test = y.select(Axis(0), &indices.test);

        info!(
            model = self.model.get_name(),
            split = self.split.get_name(),
            features = x.ncols(),
            train = indices.train.len(),
            test = indices.test.len(),
            "Spúšťam experiment"
        );

        self.model.train(x_train.view(), y_train.view())?;
        let raw = self.model.predict(x_test.view())?;
        let predicted = self.prediction_mode.apply(raw);

        let outcome = ExperimentOutcome {
            predicted,
            actual: y_test,
            evaluator: self.evaluator.clone(),
            info: self.info(indices.train.len(), indices.test.len(), x.ncols(), data),
        };
        info!("Experiment dokončený");
        Ok(outcome)
    }

    fn info(
        &self,
        train_samples: usize,
        test_samples: usize,
        num_features: usize,
        data: &FlareDataset,
    ) -> ExperimentInfo {
        ExperimentInfo {
            model_name: self.model.get_name().to_string(),
            model_type: self.model_type.clone(),
            split: self.split.get_name().to_string(),
            prediction_mode: format!("{:?}", self.prediction_mode).to_lowercase(),
            schema_version: data.schema_version(),
            num_features,
            train_samples,
            test_samples,
        }
    }
}

/// Predikcie a skutočné hodnoty testovacej časti
#[derive(Debug, Clone)]
pub struct ExperimentOutcome {
    pub predicted: Array2<f64>,
    pub actual: Array2<f64>,
    pub info: ExperimentInfo,
    evaluator: ModelEvaluator,
}

impl ExperimentOutcome {
    pub fn evaluate_rates(&self) -> Result<RateReport> {
        self.evaluator.evaluate_rates(self.predicted.view(), self.actual.view())
    }

    pub fn evaluate_correlation(&self) -> Result<CorrelationReport> {
        self.evaluator
            .evaluate_correlation(self.predicted.view(), self.actual.view())
    }

    /// Vyhodnotí výsledok v režime, ktorý zvolil volajúci
    pub fn evaluate(&self, mode: EvaluationMode) -> Result<EvaluationReport> {
        match mode {
            EvaluationMode::Rates => self.evaluate_rates().map(Into::into),
            EvaluationMode::Correlation => self.evaluate_correlation().map(Into::into),
        }
    }
}

/// Informácie o prebehnutom experimente
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExperimentInfo {
    pub model_name: String,
    pub model_type: String,
    pub split: String,
    pub prediction_mode: String,
    pub schema_version: u32,
    pub num_features: usize,
    pub train_samples: usize,
    pub test_samples: usize,
}

impl fmt::Display for ExperimentInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "=== Experiment ===")?;
        writeln!(f, "Model: {} ({})", self.model_name, self.model_type)?;
        writeln!(f, "Split: {} ({} train / {} test)", self.split, self.train_samples, self.test_samples)?;
        writeln!(f, "Features: {} (schema v{})", self.num_features, self.schema_version)?;
        writeln!(f, "Predictions: {}", self.prediction_mode)
    }
}
