use crate::error::{FlareError, Result};
use ndarray::{Array2, ArrayView2};

/// Spoločné rozhranie regresorov s viacerými výstupmi (jeden stĺpec na triedu erupcie)
pub trait IModel {
    fn get_name(&self) -> &str;

    fn get_supported_params(&self) -> Vec<&str>;

    fn set_param(&mut self, key: &str, value: &str) -> Result<()>;

    fn train(&mut self, x_train: ArrayView2<f64>, y_train: ArrayView2<f64>) -> Result<()>;

    fn predict(&self, x: ArrayView2<f64>) -> Result<Array2<f64>>;
}

pub mod tree;
pub mod mlp;
pub mod factory;

pub use mlp::MlpWrapper;
pub use tree::TreeWrapper;
pub use factory::ModelFactory;

pub(crate) fn check_training_shapes(x: &ArrayView2<f64>, y: &ArrayView2<f64>) -> Result<()> {
    if x.nrows() == 0 || x.ncols() == 0 {
        return Err(FlareError::Validation(format!(
            "Trénovacia matica je prázdna: {:?}",
            x.dim()
        )));
    }
    if y.ncols() == 0 {
        return Err(FlareError::Validation("Chýbajú cieľové stĺpce".to_string()));
    }
    if x.nrows() != y.nrows() {
        return Err(FlareError::Validation(format!(
            "Nesúlad v počte vzoriek: X má {}, y má {}",
            x.nrows(),
            y.nrows()
        )));
    }
    Ok(())
}

pub(crate) fn parse_param<T: std::str::FromStr>(key: &str, value: &str) -> Result<T> {
    value
        .trim()
        .parse()
        .map_err(|_| FlareError::Config(format!("Neplatná hodnota '{}' pre parameter '{}'", value, key)))
}
