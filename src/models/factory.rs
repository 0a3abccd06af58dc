use super::{IModel, MlpWrapper, TreeWrapper};
use crate::error::{FlareError, Result};

/// Factory pre vytváranie modelov podľa názvu
pub struct ModelFactory;

impl ModelFactory {
    /// Vytvorí model na základe názvu
    pub fn create(model_type: &str) -> Result<Box<dyn IModel>> {
        match model_type {
            "tree" | "decision_tree" => Ok(Box::new(TreeWrapper::new())),
            "mlp" | "mlp_regressor" => Ok(Box::new(MlpWrapper::new())),
            _ => Err(FlareError::Config(format!("Neznámy model: {}", model_type))),
        }
    }

    /// Vráti zoznam všetkých dostupných modelov
    pub fn available_models() -> Vec<&'static str> {
        vec!["tree", "mlp"]
    }

    /// Vráti popis modelu
    pub fn get_model_description(model_type: &str) -> Option<&'static str> {
        match model_type {
            "tree" => Some("Rozhodovací strom - regresia počtu erupcií, jeden strom na triedu"),
            "mlp" => Some("Viacvrstvový perceptrón - regresia počtu erupcií pre všetky triedy naraz"),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn creates_models_by_alias() {
        assert_eq!(ModelFactory::create("decision_tree").unwrap().get_name(), "Decision Tree");
        assert_eq!(ModelFactory::create("mlp").unwrap().get_name(), "MLP Regressor");
        assert!(ModelFactory::create("knn").is_err());
        for name in ModelFactory::available_models() {
            assert!(ModelFactory::get_model_description(name).is_some());
        }
    }
}
