use super::builder::ExperimentBuilder;
use super::pipeline::Experiment;
use crate::error::Result;
use crate::processing::{FractionSplit, PositionalSplit, PredictionMode, ShuffledSplit, SplitPolicy};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

/// Stratégia delenia v JSON konfigurácii
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "policy", rename_all = "snake_case")]
pub enum SplitConfig {
    Positional { train_rows: usize },
    Fraction { train_fraction: f64 },
    Shuffled { train_fraction: f64, seed: u64 },
}

impl SplitConfig {
    pub fn to_policy(&self) -> Result<Box<dyn SplitPolicy>> {
        let policy: Box<dyn SplitPolicy> = match *self {
            Self::Positional { train_rows } => Box::new(PositionalSplit::new(train_rows)),
            Self::Fraction { train_fraction } => Box::new(FractionSplit::new(train_fraction)?),
            Self::Shuffled { train_fraction, seed } => {
                Box::new(ShuffledSplit::new(train_fraction, seed)?)
            }
        };
        Ok(policy)
    }
}

/// Konfigurácia experimentu, napr.
/// `{"model": "mlp", "model_params": {"epochs": "500"}, "split": {"policy": "positional", "train_rows": 1000}}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ExperimentConfig {
    pub model: String,
    pub model_params: BTreeMap<String, String>,
    pub split: Option<SplitConfig>,
    pub rounded: bool,
    pub class_labels: Option<Vec<String>>,
}

impl Default for ExperimentConfig {
    fn default() -> Self {
        Self {
            model: "tree".to_string(),
            model_params: BTreeMap::new(),
            split: None,
            rounded: false,
            class_labels: None,
        }
    }
}

impl ExperimentConfig {
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_path(path: &Path) -> Result<Self> {
        let json = fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    pub fn to_builder(&self) -> Result<ExperimentBuilder> {
        let mut builder = ExperimentBuilder::new().model(&self.model);
        for (key, value) in &self.model_params {
            builder = builder.model_param(key, value);
        }
        if let Some(split) = &self.split {
            builder = builder.boxed_split(split.to_policy()?);
        }
        if self.rounded {
            builder = builder.prediction_mode(PredictionMode::Rounded);
        }
        if let Some(labels) = &self.class_labels {
            builder = builder.class_labels(labels.clone());
        }
        Ok(builder)
    }

    pub fn build(&self) -> Result<Experiment> {
        self.to_builder()?.build()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_full_config() {
        let config = ExperimentConfig::from_json(
            r#"{
                "model": "mlp",
                "model_params": {"epochs": "10", "hidden_units": "8"},
                "split": {"policy": "shuffled", "train_fraction": 0.7, "seed": 3},
                "rounded": true
            }"#,
        )
        .unwrap();
        assert_eq!(config.model, "mlp");
        assert_eq!(config.split, Some(SplitConfig::Shuffled { train_fraction: 0.7, seed: 3 }));
        assert!(config.build().is_ok());
    }

    #[test]
    fn empty_config_uses_defaults() {
        let config = ExperimentConfig::from_json("{}").unwrap();
        assert_eq!(config, ExperimentConfig::default());
    }

    #[test]
    fn invalid_configs_fail() {
        assert!(ExperimentConfig::from_json(r#"{"modle": "tree"}"#).is_err());

        let bad_param = ExperimentConfig::from_json(r#"{"model_params": {"max_depth": "x"}}"#).unwrap();
        assert!(bad_param.build().is_err());

        let bad_split =
            ExperimentConfig::from_json(r#"{"split": {"policy": "fraction", "train_fraction": 2.0}}"#)
                .unwrap();
        assert!(bad_split.build().is_err());

        let bad_labels = ExperimentConfig::from_json(r#"{"class_labels": ["C", "M"]}"#).unwrap();
        assert!(bad_labels.build().is_err());
    }
}
