use ndarray::Array2;

/// Ako sa upravia surové výstupy regresora pred evaluáciou
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PredictionMode {
    /// Výstupy modelu bez zmeny
    #[default]
    Raw,
    /// Zaokrúhlené na celé počty, záporné hodnoty orezané na 0
    Rounded,
}

impl PredictionMode {
    pub fn apply(&self, predictions: Array2<f64>) -> Array2<f64> {
        match self {
            Self::Raw => predictions,
            Self::Rounded => predictions.mapv_into(|v| v.round().max(0.0)),
        }
    }
}
