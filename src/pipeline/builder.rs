use crate::error::{FlareError, Result};
use crate::evaluation::ModelEvaluator;
use crate::models::factory::ModelFactory;
use crate::processing::{FractionSplit, OneHotEncoder, PredictionMode, SplitPolicy};
use super::pipeline::Experiment;
use std::collections::BTreeMap;

/// Predvolený podiel trénovacích riadkov, ak nie je zadaná stratégia delenia
pub const DEFAULT_TRAIN_FRACTION: f64 = 0.8;

/// Builder pre konfiguráciu experimentu
pub struct ExperimentBuilder {
    model_type: Option<String>,
    model_params: BTreeMap<String, String>,
    split: Option<Box<dyn SplitPolicy>>,
    prediction_mode: PredictionMode,
    class_labels: Option<Vec<String>>,
}

impl ExperimentBuilder {
    pub fn new() -> Self {
        Self {
            model_type: None,
            model_params: BTreeMap::new(),
            split: None,
            prediction_mode: PredictionMode::Raw,
            class_labels: None,
        }
    }

    /// Nastaví model
    pub fn model(mut self, model_type: &str) -> Self {
        self.model_type = Some(model_type.to_string());
        self
    }

    /// Nastaví parameter modelu
    pub fn model_param(mut self, key: &str, value: &str) -> Self {
        self.model_params.insert(key.to_string(), value.to_string());
        self
    }

    /// Nastaví stratégiu delenia na trénovaciu a testovaciu časť
    pub fn split<P: SplitPolicy + 'static>(mut self, policy: P) -> Self {
        self.split = Some(Box::new(policy));
        self
    }

    pub fn boxed_split(mut self, policy: Box<dyn SplitPolicy>) -> Self {
        self.split = Some(policy);
        self
    }

    /// Surové alebo zaokrúhlené predikcie
    pub fn prediction_mode(mut self, mode: PredictionMode) -> Self {
        self.prediction_mode = mode;
        self
    }

    /// Mená tried pre evaluátor (predvolene C, M, X)
    pub fn class_labels<S: Into<String>>(mut self, labels: Vec<S>) -> Self {
        self.class_labels = Some(labels.into_iter().map(Into::into).collect());
        self
    }

    /// Vytvorí experiment s validáciou konfigurácie
    pub fn build(self) -> Result<Experiment> {
        let model_type = self
            .model_type
            .ok_or_else(|| FlareError::Config("Model musí byť nastavený".to_string()))?;

        let mut model = ModelFactory::create(&model_type)?;
        for (key, value) in &self.model_params {
            model.set_param(key, value)?;
        }

        let evaluator = match self.class_labels {
            Some(labels) => {
                if labels.len() != 3 {
                    return Err(FlareError::Config(format!(
                        "Dataset má 3 triedy erupcií, zadaných {} mien",
                        labels.len()
                    )));
                }
                ModelEvaluator::new(labels)?
            }
            None => ModelEvaluator::flare(),
        };

        let split: Box<dyn SplitPolicy> = match self.split {
            Some(split) => split,
            None => Box::new(FractionSplit::new(DEFAULT_TRAIN_FRACTION)?),
        };

        Ok(Experiment {
            model,
            model_type,
            split,
            prediction_mode: self.prediction_mode,
            evaluator,
            encoder: OneHotEncoder::new(),
        })
    }
}

impl Default for ExperimentBuilder {
    fn default() -> Self {
        Self::new()
    }
}
