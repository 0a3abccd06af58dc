use super::builder::ExperimentBuilder;
use super::pipeline::Experiment;
use crate::error::Result;
use crate::processing::{PositionalSplit, PredictionMode};
use serde::Serialize;

/// Director pre Builder pattern - hotové "recepty" na experimenty
pub struct ExperimentDirector;

impl ExperimentDirector {
    /// Rozhodovací strom s pevnou hranicou trénovacích riadkov
    pub fn build_tree_baseline(train_rows: usize) -> Result<Experiment> {
        ExperimentBuilder::new()
            .model("tree")
            .model_param("max_depth", "10")
            .split(PositionalSplit::new(train_rows))
            .build()
    }

    /// MLP s pevnou hranicou trénovacích riadkov
    pub fn build_mlp_baseline(train_rows: usize) -> Result<Experiment> {
        ExperimentBuilder::new()
            .model("mlp")
            .model_param("hidden_units", "100")
            .model_param("epochs", "200")
            .split(PositionalSplit::new(train_rows))
            .build()
    }

    /// Strom so zaokrúhlenými predikciami, vhodný pre evaluáciu chybovosti
    pub fn build_tree_counts(train_rows: usize) -> Result<Experiment> {
        ExperimentBuilder::new()
            .model("tree")
            .split(PositionalSplit::new(train_rows))
            .prediction_mode(PredictionMode::Rounded)
            .build()
    }

    /// Vráti zoznam dostupných receptov
    pub fn available_presets() -> Vec<PresetInfo> {
        vec![
            PresetInfo {
                name: "tree_baseline",
                description: "Rozhodovací strom, surové predikcie",
                model: "tree",
                rounded: false,
            },
            PresetInfo {
                name: "mlp_baseline",
                description: "MLP so 100 skrytými neurónmi, surové predikcie",
                model: "mlp",
                rounded: false,
            },
            PresetInfo {
                name: "tree_counts",
                description: "Rozhodovací strom, predikcie zaokrúhlené na počty",
                model: "tree",
                rounded: true,
            },
        ]
    }

    /// Vytvorí experiment podľa názvu receptu
    pub fn build_preset(name: &str, train_rows: usize) -> Option<Result<Experiment>> {
        match name {
            "tree_baseline" => Some(Self::build_tree_baseline(train_rows)),
            "mlp_baseline" => Some(Self::build_mlp_baseline(train_rows)),
            "tree_counts" => Some(Self::build_tree_counts(train_rows)),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct PresetInfo {
    pub name: &'static str,
    pub description: &'static str,
    pub model: &'static str,
    pub rounded: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_listed_preset_builds() {
        for preset in ExperimentDirector::available_presets() {
            let built = ExperimentDirector::build_preset(preset.name, 10);
            assert!(matches!(built, Some(Ok(_))), "preset {}", preset.name);
        }
        assert!(ExperimentDirector::build_preset("knn", 10).is_none());
    }
}
